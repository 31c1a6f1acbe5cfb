use super::atom::Atom;
use super::monomer::Monomer;
use super::structure::Structure;
use nalgebra::{Point3, Vector3};
use std::sync::OnceLock;

/// Position of a monomer inside a polymer: structure index, then monomer index.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct MonomerHandle {
    pub structure: usize,
    pub monomer: usize,
}

/// One chain of a macromolecule.
///
/// A polymer exclusively owns its structures, in file order. The flattened
/// monomer list and atom location list are derived on first request and
/// cached; any `&mut` operation that could change them drops the caches.
#[derive(Debug, Clone, Default)]
pub struct Polymer {
    unit_id: String,
    structures: Vec<Structure>,
    monomer_handles: OnceLock<Vec<MonomerHandle>>,
    locations: OnceLock<Vec<Point3<f64>>>,
}

impl Polymer {
    pub fn new(unit_id: &str) -> Self {
        Self {
            unit_id: unit_id.trim().to_uppercase(),
            ..Default::default()
        }
    }

    /// The chain identifier from the file (e.g., "A").
    pub fn unit_id(&self) -> &str {
        &self.unit_id
    }

    pub fn structures(&self) -> &[Structure] {
        &self.structures
    }

    pub(crate) fn structures_mut(&mut self) -> &mut Vec<Structure> {
        self.invalidate();
        &mut self.structures
    }

    pub fn add_structure(&mut self, structure: Structure) {
        self.invalidate();
        self.structures.push(structure);
    }

    /// Handles of all monomers in structure order.
    pub fn monomer_handles(&self) -> &[MonomerHandle] {
        self.monomer_handles.get_or_init(|| {
            self.structures
                .iter()
                .enumerate()
                .flat_map(|(s, structure)| {
                    (0..structure.monomers().len()).map(move |m| MonomerHandle {
                        structure: s,
                        monomer: m,
                    })
                })
                .collect()
        })
    }

    pub fn monomers(&self) -> impl Iterator<Item = &Monomer> + '_ {
        self.monomer_handles()
            .iter()
            .filter_map(|&handle| self.monomer(handle))
    }

    pub fn monomer(&self, handle: MonomerHandle) -> Option<&Monomer> {
        self.structures
            .get(handle.structure)?
            .monomers
            .get(handle.monomer)
    }

    pub(crate) fn monomer_mut(&mut self, handle: MonomerHandle) -> Option<&mut Monomer> {
        self.locations = OnceLock::new();
        self.structures
            .get_mut(handle.structure)?
            .monomers
            .get_mut(handle.monomer)
    }

    /// Finds the first monomer, in structure order, with exactly this name and number.
    pub fn find_monomer(&self, name: &str, sequence_number: isize) -> Option<MonomerHandle> {
        self.monomer_handles().iter().copied().find(|&handle| {
            self.monomer(handle)
                .is_some_and(|m| m.matches(name, sequence_number))
        })
    }

    pub fn atoms(&self) -> impl Iterator<Item = &Atom> + '_ {
        self.monomers().flat_map(|m| m.atoms().iter())
    }

    pub fn atom_count(&self) -> usize {
        self.structures.iter().map(Structure::atom_count).sum()
    }

    /// Locations of all atoms of this polymer, in monomer order.
    pub fn locations(&self) -> &[Point3<f64>] {
        self.locations
            .get_or_init(|| self.monomers().flat_map(Monomer::locations).collect())
    }

    pub(crate) fn translate_atoms(&mut self, offset: &Vector3<f64>) {
        self.locations = OnceLock::new();
        for structure in &mut self.structures {
            for monomer in &mut structure.monomers {
                for atom in monomer.atoms_mut() {
                    atom.translate(offset);
                }
            }
        }
    }

    fn invalidate(&mut self) {
        self.monomer_handles = OnceLock::new();
        self.locations = OnceLock::new();
    }
}

impl PartialEq for Polymer {
    fn eq(&self, other: &Self) -> bool {
        self.unit_id == other.unit_id && self.structures == other.structures
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::models::structure::StructureKind;

    fn monomer_with_atom(seq: isize, name: &str, x: f64) -> Monomer {
        let mut monomer = Monomer::new(seq, name);
        monomer.add_atom(Atom::new("CA", "C", Point3::new(x, 0.0, 0.0), 0.0));
        monomer
    }

    fn sample_polymer() -> Polymer {
        let mut polymer = Polymer::new(" a ");
        polymer.add_structure(Structure::new(
            "1",
            StructureKind::Helix,
            vec![monomer_with_atom(1, "ALA", 1.0), monomer_with_atom(2, "GLY", 2.0)],
        ));
        polymer.add_structure(Structure::new(
            "A",
            StructureKind::Sheet,
            vec![monomer_with_atom(5, "SER", 5.0)],
        ));
        polymer
    }

    #[test]
    fn unit_id_is_normalized() {
        assert_eq!(Polymer::new(" b ").unit_id(), "B");
    }

    #[test]
    fn monomers_are_flattened_in_structure_order() {
        let polymer = sample_polymer();
        let numbers: Vec<isize> = polymer.monomers().map(|m| m.sequence_number).collect();
        assert_eq!(numbers, vec![1, 2, 5]);
        assert_eq!(
            polymer.monomer_handles()[2],
            MonomerHandle {
                structure: 1,
                monomer: 0
            }
        );
    }

    #[test]
    fn locations_are_cached_until_atoms_move() {
        let mut polymer = sample_polymer();
        let cached = polymer.locations().as_ptr();
        assert_eq!(polymer.locations().as_ptr(), cached);
        assert_eq!(polymer.locations().len(), 3);

        polymer.translate_atoms(&Vector3::new(-1.0, 0.0, 0.0));
        assert_eq!(polymer.locations()[0], Point3::origin());
    }

    #[test]
    fn adding_a_structure_refreshes_derived_lists() {
        let mut polymer = sample_polymer();
        assert_eq!(polymer.monomers().count(), 3);
        polymer.add_structure(Structure::new(
            "2",
            StructureKind::Helix,
            vec![monomer_with_atom(9, "LYS", 9.0)],
        ));
        assert_eq!(polymer.monomers().count(), 4);
        assert_eq!(polymer.locations().len(), 4);
        assert_eq!(polymer.atom_count(), 4);
    }

    #[test]
    fn find_monomer_requires_name_and_number() {
        let polymer = sample_polymer();
        assert_eq!(
            polymer.find_monomer("GLY", 2),
            Some(MonomerHandle {
                structure: 0,
                monomer: 1
            })
        );
        assert_eq!(polymer.find_monomer("GLY", 3), None);
        assert_eq!(polymer.find_monomer("ALA", 2), None);
    }

    #[test]
    fn monomer_lookup_out_of_range_is_none() {
        let polymer = sample_polymer();
        assert!(polymer
            .monomer(MonomerHandle {
                structure: 7,
                monomer: 0
            })
            .is_none());
    }
}
