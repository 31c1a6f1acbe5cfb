use super::atom::Atom;
use nalgebra::{Point3, distance};

/// Multiplier applied to the summed display radii (in picometers) to obtain the
/// maximal bonding distance in Angstroms.
pub const BOND_TOLERANCE: f64 = 0.015;

/// A bond between two atoms of the same monomer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Bond {
    pub first: usize,  // Index of the first atom within the monomer
    pub second: usize, // Index of the second atom within the monomer
}

impl Bond {
    pub fn new(first: usize, second: usize) -> Self {
        Self { first, second }
    }

    pub fn contains(&self, atom_index: usize) -> bool {
        self.first == atom_index || self.second == atom_index
    }

    /// Returns the locations of both bonded atoms, or `None` if an index is out of range.
    pub fn endpoints(&self, atoms: &[Atom]) -> Option<(Point3<f64>, Point3<f64>)> {
        Some((
            atoms.get(self.first)?.location(),
            atoms.get(self.second)?.location(),
        ))
    }
}

/// Maximal distance at which two atoms are considered bonded.
pub fn bonding_threshold(a: &Atom, b: &Atom) -> f64 {
    (a.radius_pm() as f64 + b.radius_pm() as f64) * BOND_TOLERANCE
}

/// Infers bonds by comparing every pair of atoms in the given slice.
///
/// Two atoms are bonded iff their Euclidean distance is at most
/// [`bonding_threshold`]; the boundary is inclusive. Pairs are emitted in
/// lexicographic `(first, second)` order with `first < second`.
pub fn infer_bonds(atoms: &[Atom]) -> Vec<Bond> {
    let mut bonds = Vec::new();
    for (i, a) in atoms.iter().enumerate() {
        for (offset, b) in atoms[i + 1..].iter().enumerate() {
            let d = distance(&a.location(), &b.location());
            if d <= bonding_threshold(a, b) {
                bonds.push(Bond::new(i, i + 1 + offset));
            }
        }
    }
    bonds
}
