use super::atom::{Atom, CarbonRole};
use super::residue::MonomerType;
use super::topology::{Bond, infer_bonds};
use nalgebra::Point3;
use std::sync::OnceLock;

/// One amino acid or nucleotide of a chain, together with its atoms.
///
/// The bond list is inferred lazily on first request and cached; moving atoms
/// through [`Monomer::atoms_mut`] does not refresh it, call
/// [`Monomer::invalidate_bonds`] for that.
#[derive(Debug, Clone)]
pub struct Monomer {
    pub sequence_number: isize, // Residue number as reported by the file
    pub kind: MonomerType,      // Classified residue type
    name: String,               // Raw upper-cased residue name (e.g., "ALA", "HOH")
    atoms: Vec<Atom>,
    bonds: OnceLock<Vec<Bond>>,
    claimed_by: Option<isize>, // ATOM residue number whose atoms this monomer holds
}

impl Monomer {
    pub fn new(sequence_number: isize, name: &str) -> Self {
        let name = name.trim().to_ascii_uppercase();
        Self {
            sequence_number,
            kind: MonomerType::from_code(&name),
            name,
            atoms: Vec::new(),
            bonds: OnceLock::new(),
            claimed_by: None,
        }
    }

    /// The residue name exactly as found in the file, upper-cased.
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn atoms(&self) -> &[Atom] {
        &self.atoms
    }

    pub(crate) fn atoms_mut(&mut self) -> &mut [Atom] {
        &mut self.atoms
    }

    pub(crate) fn add_atom(&mut self, atom: Atom) {
        self.atoms.push(atom);
        self.bonds = OnceLock::new();
    }

    pub fn locations(&self) -> impl Iterator<Item = Point3<f64>> + '_ {
        self.atoms.iter().map(Atom::location)
    }

    /// Returns the bonds between atoms of this monomer, inferring them on first use.
    pub fn bonds(&self) -> &[Bond] {
        self.bonds.get_or_init(|| infer_bonds(&self.atoms))
    }

    pub fn invalidate_bonds(&mut self) {
        self.bonds = OnceLock::new();
    }

    /// Location of the first carbon with the given ribbon role, if any.
    pub fn ribbon_anchor(&self, role: CarbonRole) -> Option<Point3<f64>> {
        self.atoms
            .iter()
            .find(|atom| atom.carbon_role() == Some(role))
            .map(Atom::location)
    }

    /// Reserves this monomer for the atoms of one ATOM residue number.
    ///
    /// The first claim sticks; later claims are ignored.
    pub(crate) fn claim(&mut self, atom_sequence_number: isize) {
        self.claimed_by.get_or_insert(atom_sequence_number);
    }

    /// Whether atoms numbered `atom_sequence_number` may be added without
    /// mixing two residues in one monomer.
    pub fn accepts(&self, atom_sequence_number: isize) -> bool {
        self.claimed_by.is_none_or(|claimed| claimed == atom_sequence_number)
    }

    /// Whether this monomer represents the given residue.
    pub fn matches(&self, name: &str, sequence_number: isize) -> bool {
        self.sequence_number == sequence_number && self.name == name
    }
}

impl PartialEq for Monomer {
    fn eq(&self, other: &Self) -> bool {
        self.sequence_number == other.sequence_number
            && self.kind == other.kind
            && self.name == other.name
            && self.atoms == other.atoms
    }
}
