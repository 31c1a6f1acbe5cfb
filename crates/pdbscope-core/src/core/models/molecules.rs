use super::atom::Atom;
use super::polymer::Polymer;
use super::structure::StructureKind;
use crate::core::utils::geometry::{BoundingBox, calculate_bounding_box, calculate_centroid};
use nalgebra::{Point3, Vector3};
use serde::Serialize;
use std::collections::{BTreeMap, BTreeSet};

/// Counts derived from the polymer list, recomputed whenever it is replaced.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub struct MoleculeSummary {
    pub atom_count: usize,
    pub polymer_count: usize,
    pub has_helix: bool,
    pub has_sheet: bool,
}

impl MoleculeSummary {
    fn of(polymers: &[Polymer]) -> Self {
        let has_kind = |kind: StructureKind| {
            polymers
                .iter()
                .flat_map(Polymer::structures)
                .any(|s| s.kind == kind)
        };
        Self {
            atom_count: polymers.iter().map(Polymer::atom_count).sum(),
            polymer_count: polymers.len(),
            has_helix: has_kind(StructureKind::Helix),
            has_sheet: has_kind(StructureKind::Sheet),
        }
    }
}

/// The root of the model: every chain parsed from one structure file.
#[derive(Debug, Clone, PartialEq)]
pub struct Molecules {
    name: String,
    polymers: Vec<Polymer>,
    summary: MoleculeSummary,
    centered: bool,
}

impl Molecules {
    pub fn new(name: &str, polymers: Vec<Polymer>) -> Self {
        Self {
            name: name.to_string(),
            summary: MoleculeSummary::of(&polymers),
            polymers,
            centered: false,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn polymers(&self) -> &[Polymer] {
        &self.polymers
    }

    pub fn polymer(&self, unit_id: &str) -> Option<&Polymer> {
        self.polymers.iter().find(|p| p.unit_id() == unit_id)
    }

    /// Replaces the polymer list and recomputes the summary.
    pub fn set_polymers(&mut self, polymers: Vec<Polymer>) {
        self.summary = MoleculeSummary::of(&polymers);
        self.polymers = polymers;
        self.centered = false;
    }

    pub fn summary(&self) -> &MoleculeSummary {
        &self.summary
    }

    pub fn atom_count(&self) -> usize {
        self.summary.atom_count
    }

    pub fn polymer_count(&self) -> usize {
        self.summary.polymer_count
    }

    pub fn has_helix(&self) -> bool {
        self.summary.has_helix
    }

    pub fn has_sheet(&self) -> bool {
        self.summary.has_sheet
    }

    pub fn atoms(&self) -> impl Iterator<Item = &Atom> + '_ {
        self.polymers.iter().flat_map(Polymer::atoms)
    }

    pub fn is_centered(&self) -> bool {
        self.centered
    }

    /// Translates every atom so that the centroid of the molecule sits at the origin.
    ///
    /// Runs at most once per polymer list. Returns the applied offset, or `None`
    /// if nothing was moved (already centered, no atoms, or centroid already at
    /// the origin).
    pub fn center_at_origin(&mut self) -> Option<Vector3<f64>> {
        if self.centered {
            return None;
        }
        self.centered = true;

        let centroid = calculate_centroid(self.polymers.iter().flat_map(|p| p.locations()))?;
        if centroid == Point3::origin() {
            return None;
        }
        let offset = -centroid.coords;
        for polymer in &mut self.polymers {
            polymer.translate_atoms(&offset);
        }
        Some(offset)
    }

    /// Axis-aligned bounds of all atom locations, `None` for an empty molecule.
    pub fn bounds(&self) -> Option<BoundingBox> {
        calculate_bounding_box(self.polymers.iter().flat_map(|p| p.locations()))
    }

    pub fn chain_ids(&self) -> BTreeSet<&str> {
        self.polymers.iter().map(Polymer::unit_id).collect()
    }

    pub fn structure_kinds(&self) -> BTreeSet<StructureKind> {
        self.polymers
            .iter()
            .flat_map(Polymer::structures)
            .map(|s| s.kind)
            .collect()
    }

    pub fn structure_ids(&self, kind: StructureKind) -> BTreeSet<&str> {
        self.polymers
            .iter()
            .flat_map(Polymer::structures)
            .filter(|s| s.kind == kind)
            .map(|s| s.id.as_str())
            .collect()
    }

    /// Distinct monomer type codes (`ALA`, `DA`, `OTHER`, ...).
    pub fn monomer_names(&self) -> BTreeSet<&'static str> {
        self.polymers
            .iter()
            .flat_map(Polymer::monomers)
            .map(|m| m.kind.code())
            .collect()
    }

    /// Everything a user may select by name: chain ids followed by monomer type codes.
    pub fn structure_names(&self) -> Vec<String> {
        self.chain_ids()
            .into_iter()
            .map(str::to_string)
            .chain(self.monomer_names().into_iter().map(str::to_string))
            .collect()
    }

    /// Histogram of element names over the atoms of one chain.
    ///
    /// Unknown chains yield an empty map.
    pub fn atom_counts_of_chain(&self, unit_id: &str) -> BTreeMap<String, usize> {
        let mut counts = BTreeMap::new();
        if let Some(polymer) = self.polymer(unit_id.trim()) {
            for atom in polymer.atoms() {
                *counts.entry(atom.name().to_string()).or_insert(0) += 1;
            }
        }
        counts
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::models::monomer::Monomer;
    use crate::core::models::structure::Structure;

    fn monomer(seq: isize, name: &str, atoms: &[(&str, [f64; 3])]) -> Monomer {
        let mut monomer = Monomer::new(seq, name);
        for (label, [x, y, z]) in atoms {
            monomer.add_atom(Atom::new(label, "", Point3::new(*x, *y, *z), 0.0));
        }
        monomer
    }

    fn sample_molecules() -> Molecules {
        let mut a = Polymer::new("A");
        a.add_structure(Structure::new(
            "1",
            StructureKind::Helix,
            vec![monomer(1, "ALA", &[("N", [0.0, 0.0, 0.0]), ("CA", [2.0, 0.0, 0.0])])],
        ));
        let mut b = Polymer::new("B");
        b.add_structure(Structure::new(
            "S1",
            StructureKind::Sheet,
            vec![monomer(1, "GLY", &[("O", [0.0, 4.0, 0.0])])],
        ));
        b.add_structure(Structure::new(
            "2",
            StructureKind::Helix,
            vec![monomer(2, "HOH", &[("O", [0.0, 0.0, 6.0])])],
        ));
        Molecules::new("TEST PROTEIN", vec![a, b])
    }

    #[test]
    fn summary_is_derived_on_construction() {
        let molecules = sample_molecules();
        assert_eq!(
            *molecules.summary(),
            MoleculeSummary {
                atom_count: 4,
                polymer_count: 2,
                has_helix: true,
                has_sheet: true,
            }
        );
        assert_eq!(molecules.atoms().count(), 4);
    }

    #[test]
    fn set_polymers_recomputes_summary() {
        let mut molecules = sample_molecules();
        let only_a = vec![molecules.polymers()[0].clone()];
        molecules.set_polymers(only_a);
        assert_eq!(molecules.polymer_count(), 1);
        assert_eq!(molecules.atom_count(), 2);
        assert!(molecules.has_helix());
        assert!(!molecules.has_sheet());

        molecules.set_polymers(Vec::new());
        assert_eq!(*molecules.summary(), MoleculeSummary::default());
    }

    #[test]
    fn center_at_origin_moves_centroid_once() {
        let mut molecules = sample_molecules();
        let offset = molecules.center_at_origin().unwrap();
        assert_eq!(offset, Vector3::new(-0.5, -1.0, -1.5));

        let centroid = calculate_centroid(molecules.polymers().iter().flat_map(|p| p.locations()))
            .unwrap();
        assert!(centroid.coords.norm() < 1e-12);
        assert!(molecules.is_centered());
        assert_eq!(molecules.center_at_origin(), None);
    }

    #[test]
    fn centering_an_empty_molecule_is_a_no_op() {
        let mut molecules = Molecules::new("", Vec::new());
        assert_eq!(molecules.center_at_origin(), None);
        assert!(molecules.bounds().is_none());
    }

    #[test]
    fn bounds_cover_all_atoms() {
        let bounds = sample_molecules().bounds().unwrap();
        assert_eq!(bounds.min, [0.0, 0.0, 0.0]);
        assert_eq!(bounds.max, [2.0, 4.0, 6.0]);
    }

    #[test]
    fn structure_queries_collect_distinct_values() {
        let molecules = sample_molecules();
        assert_eq!(molecules.chain_ids().into_iter().collect::<Vec<_>>(), vec!["A", "B"]);
        assert_eq!(
            molecules.structure_kinds().into_iter().collect::<Vec<_>>(),
            vec![StructureKind::Helix, StructureKind::Sheet]
        );
        assert_eq!(
            molecules
                .structure_ids(StructureKind::Helix)
                .into_iter()
                .collect::<Vec<_>>(),
            vec!["1", "2"]
        );
        assert!(molecules.structure_ids(StructureKind::Nucleotide).is_empty());
        assert_eq!(
            molecules.monomer_names().into_iter().collect::<Vec<_>>(),
            vec!["ALA", "GLY", "OTHER"]
        );
        assert_eq!(
            molecules.structure_names(),
            vec!["A", "B", "ALA", "GLY", "OTHER"]
        );
    }

    #[test]
    fn atom_counts_of_chain_histogram_by_element_name() {
        let molecules = sample_molecules();
        let counts = molecules.atom_counts_of_chain("A");
        assert_eq!(counts.get("Nitrogen"), Some(&1));
        assert_eq!(counts.get("Carbon"), Some(&1));
        assert_eq!(molecules.atom_counts_of_chain("B").get("Oxygen"), Some(&2));
        assert!(molecules.atom_counts_of_chain("Z").is_empty());
    }
}
