use super::PdbMetadata;
use super::diagnostics::ParseDiagnostic;
use super::records::{AtomRecord, CompndField, SecondaryKind, SecondaryRecord, SeqresRecord};
use crate::core::io::resolver::{locate_or_create_monomer, resolve_position};
use crate::core::models::atom::Atom;
use crate::core::models::molecules::Molecules;
use crate::core::models::monomer::Monomer;
use crate::core::models::polymer::Polymer;
use crate::core::models::residue::MonomerType;
use crate::core::models::structure::{Structure, StructureKind};
use std::collections::{HashMap, HashSet};
use tracing::{debug, trace, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
enum ModelState {
    #[default]
    Outside,
    InFirst,
    Done,
}

/// Accumulates the records of one file into chains, structures and atoms.
#[derive(Debug, Default)]
pub(super) struct ModelAssembler {
    molecule_names: Vec<String>,
    pending_molecule: Option<(usize, String)>,
    polymers: Vec<Polymer>,
    references: HashMap<String, Vec<Monomer>>,
    diagnostics: Vec<ParseDiagnostic>,
    reported_monomers: HashSet<String>,
    reported_atoms: HashSet<String>,
    model: ModelState,
    model_count: usize,
}

impl ModelAssembler {
    fn polymer_index(&mut self, chain: &str) -> usize {
        if let Some(index) = self.polymers.iter().position(|p| p.unit_id() == chain) {
            return index;
        }
        debug!(chain, "Creating chain");
        self.polymers.push(Polymer::new(chain));
        self.polymers.len() - 1
    }

    fn diagnose(&mut self, diagnostic: ParseDiagnostic) {
        if diagnostic.is_informational() {
            debug!("{}", diagnostic);
        } else {
            warn!("{}", diagnostic);
        }
        self.diagnostics.push(diagnostic);
    }

    fn note_monomer(&mut self, line: usize, name: &str) {
        if MonomerType::from_code(name) == MonomerType::Other
            && self.reported_monomers.insert(name.to_string())
        {
            self.diagnose(ParseDiagnostic::UnknownMonomer {
                line,
                name: name.to_string(),
            });
        }
    }

    pub(super) fn compnd_field(&mut self, line: usize, field: CompndField) {
        match field {
            CompndField::Molecule(name) => {
                self.finish_compnd();
                self.pending_molecule = Some((line, name));
            }
            CompndField::Chains(chains) => {
                if let Some((_, name)) = self.pending_molecule.take() {
                    self.molecule_names.push(name);
                }
                for chain in &chains {
                    self.polymer_index(chain);
                }
            }
            CompndField::Other => {}
        }
    }

    /// Drops a molecule still waiting for its `CHAIN:` field.
    pub(super) fn finish_compnd(&mut self) {
        if let Some((line, molecule)) = self.pending_molecule.take() {
            self.diagnose(ParseDiagnostic::MissingChainField { line, molecule });
        }
    }

    pub(super) fn add_sequence(&mut self, line: usize, record: SeqresRecord) {
        self.polymer_index(&record.chain);
        for name in &record.residues {
            self.note_monomer(line, name);
        }
        let reference = self.references.entry(record.chain).or_default();
        for name in record.residues {
            let ordinal = reference.len() as isize + 1;
            reference.push(Monomer::new(ordinal, &name));
        }
    }

    pub(super) fn add_secondary(&mut self, line: usize, kind: SecondaryKind, record: SecondaryRecord) {
        let SecondaryRecord { id, start, end } = record;
        if start.chain != end.chain {
            self.diagnose(ParseDiagnostic::CrossChainEnd {
                line,
                structure_id: id,
                start_chain: start.chain,
                end_chain: end.chain,
            });
            return;
        }

        let Some(reference) = self.references.get(&start.chain) else {
            self.diagnose(ParseDiagnostic::MissingReferenceSequence {
                line,
                chain: start.chain,
            });
            return;
        };
        let first = resolve_position(reference, &start.name, start.sequence_number);
        let last = resolve_position(reference, &end.name, end.sequence_number);
        let (first, last) = match (first, last) {
            (Some(first), Some(last)) => (first, last),
            (None, _) => {
                return self.diagnose(ParseDiagnostic::UnresolvedResidue {
                    line,
                    chain: start.chain,
                    residue: start.name,
                    sequence_number: start.sequence_number,
                });
            }
            (_, None) => {
                return self.diagnose(ParseDiagnostic::UnresolvedResidue {
                    line,
                    chain: end.chain,
                    residue: end.name,
                    sequence_number: end.sequence_number,
                });
            }
        };
        if first >= last {
            self.diagnose(ParseDiagnostic::EmptyRange {
                line,
                structure_id: id,
                start: first,
                end: last,
            });
            return;
        }

        let structure_kind = match kind {
            SecondaryKind::Helix => StructureKind::Helix,
            SecondaryKind::Sheet => StructureKind::Sheet,
        };
        let structure = Structure::new(&id, structure_kind, reference[first..=last].to_vec());
        trace!(id = %structure.id, kind = %structure_kind, first, last, "Annotated structure");
        let index = self.polymer_index(&start.chain);
        self.polymers[index].add_structure(structure);
    }

    pub(super) fn enter_model(&mut self, line: usize) {
        self.model_count += 1;
        match self.model {
            ModelState::Outside => self.model = ModelState::InFirst,
            // A MODEL record without a preceding ENDMDL still closes the first model.
            ModelState::InFirst | ModelState::Done => {
                self.model = ModelState::Done;
                self.diagnose(ParseDiagnostic::ExtraModelIgnored { line });
            }
        }
    }

    pub(super) fn leave_model(&mut self) {
        if self.model == ModelState::InFirst {
            self.model = ModelState::Done;
        }
    }

    pub(super) fn add_atom(&mut self, line: usize, record: AtomRecord) {
        if !record.is_primary_location() || self.model == ModelState::Done {
            return;
        }
        if record.sequence_number < 1 {
            self.diagnose(ParseDiagnostic::InvalidSequenceNumber {
                line,
                chain: record.chain,
                residue: record.residue,
                sequence_number: record.sequence_number,
            });
            return;
        }

        self.note_monomer(line, &record.residue);
        let atom = Atom::new(
            &record.name,
            &record.element,
            record.location,
            record.temperature_factor,
        );
        if atom.kind.is_generic() && self.reported_atoms.insert(atom.label.clone()) {
            self.diagnose(ParseDiagnostic::UnknownElement {
                line,
                atom_name: atom.label.clone(),
                element: record.element.clone(),
            });
        }

        let index = self.polymer_index(&record.chain);
        let reference = self
            .references
            .get(&record.chain)
            .map(Vec::as_slice)
            .unwrap_or_default();
        let polymer = &mut self.polymers[index];
        let handle = locate_or_create_monomer(
            polymer,
            reference,
            &record.residue,
            record.sequence_number,
        );
        if let Some(monomer) = polymer.monomer_mut(handle) {
            monomer.add_atom(atom);
        }
    }

    pub(super) fn finish(mut self, fallback_name: Option<&str>) -> (Molecules, PdbMetadata) {
        self.finish_compnd();
        let name = if self.molecule_names.is_empty() {
            fallback_name.unwrap_or_default().to_string()
        } else {
            self.molecule_names.join(", ")
        };
        let molecules = Molecules::new(&name, self.polymers);
        let metadata = PdbMetadata {
            molecule_names: self.molecule_names,
            diagnostics: self.diagnostics,
            model_count: self.model_count,
        };
        (molecules, metadata)
    }
}
