//! Reader for the legacy fixed-column PDB format.
//!
//! Only the records needed to rebuild chains, secondary structure and atoms
//! are interpreted: `COMPND`, `SEQRES`, `HELIX`, `SHEET`, `MODEL`/`ENDMDL`,
//! `ATOM` and optionally `HETATM`. Everything else is skipped.

mod assembler;
mod diagnostics;
pub(crate) mod records;
mod scanner;

pub use diagnostics::ParseDiagnostic;

use crate::core::io::traits::{MolecularFile, ReadContext};
use crate::core::models::molecules::Molecules;
use crate::engine::cancel::TaskOutcome;
use crate::engine::progress::Progress;
use assembler::ModelAssembler;
use records::{AtomRecord, CompndField, SecondaryKind, SecondaryRecord, SeqresRecord, record_name};
use scanner::{LineCursor, ReadError};
use serde::Serialize;
use std::io::{self, BufRead};
use thiserror::Error;
use tracing::{info, instrument};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub struct PdbMetadata {
    /// `MOLECULE:` names in file order, for molecules whose chains were declared.
    pub molecule_names: Vec<String>,
    /// Recoverable problems, in the order they were found.
    pub diagnostics: Vec<ParseDiagnostic>,
    /// Number of `MODEL` records seen. Only the first model contributes atoms.
    pub model_count: usize,
}

impl PdbMetadata {
    pub fn warnings(&self) -> impl Iterator<Item = &ParseDiagnostic> + '_ {
        self.diagnostics.iter().filter(|d| !d.is_informational())
    }
}

#[derive(Debug, Error)]
pub enum PdbError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
    #[error("Parse error on line {line}: {kind}")]
    Parse {
        line: usize,
        kind: PdbParseErrorKind,
    },
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum PdbParseErrorKind {
    #[error("Invalid integer format in columns {columns} (value: '{value}')")]
    InvalidInt { columns: String, value: String },
    #[error("Invalid float format in columns {columns} (value: '{value}')")]
    InvalidFloat { columns: String, value: String },
    #[error("Line is too short for ATOM/HETATM record (must be at least {min} chars)")]
    LineTooShort { min: usize },
}

pub struct PdbFile;

impl MolecularFile for PdbFile {
    type Metadata = PdbMetadata;
    type Error = PdbError;

    #[instrument(skip_all, name = "pdb_reader")]
    fn read_from(
        reader: &mut impl BufRead,
        context: &ReadContext<'_>,
    ) -> Result<TaskOutcome<(Molecules, Self::Metadata)>, Self::Error> {
        match read_records(reader, context) {
            Ok((molecules, metadata)) => {
                info!(
                    atoms = molecules.atom_count(),
                    polymers = molecules.polymer_count(),
                    diagnostics = metadata.diagnostics.len(),
                    "PDB records parsed."
                );
                Ok(TaskOutcome::Completed((molecules, metadata)))
            }
            Err(ReadError::Cancelled) => {
                info!("PDB read cancelled.");
                Ok(TaskOutcome::Cancelled)
            }
            Err(ReadError::Fatal(err)) => Err(err),
        }
    }
}

fn is_coordinate_record(name: &str, context: &ReadContext<'_>) -> bool {
    name == "ATOM" || (name == "HETATM" && context.hetero_atoms_included())
}

fn read_records<R: BufRead>(
    reader: R,
    context: &ReadContext<'_>,
) -> Result<(Molecules, PdbMetadata), ReadError> {
    let mut cursor = LineCursor::new(reader, context);
    let mut assembler = ModelAssembler::default();

    while let Some((line_no, line)) = cursor.next_line()? {
        match record_name(&line) {
            "COMPND" => {
                context.report(Progress::Percent(5.0));
                assembler.compnd_field(line_no, CompndField::parse(&line));
                while let Some((n, next)) = cursor.next_line_if(|l| record_name(l) == "COMPND")? {
                    assembler.compnd_field(n, CompndField::parse(&next));
                }
                assembler.finish_compnd();
            }
            "SEQRES" => {
                context.report(Progress::Percent(15.0));
                let chain = SeqresRecord::chain_of(&line);
                assembler.add_sequence(line_no, SeqresRecord::parse(&line));
                while let Some((n, next)) = cursor.next_line_if(|l| {
                    record_name(l) == "SEQRES" && SeqresRecord::chain_of(l) == chain
                })? {
                    assembler.add_sequence(n, SeqresRecord::parse(&next));
                }
            }
            name @ ("HELIX" | "SHEET") => {
                let (kind, percent) = if name == "HELIX" {
                    (SecondaryKind::Helix, 20.0)
                } else {
                    (SecondaryKind::Sheet, 25.0)
                };
                context.report(Progress::Percent(percent));
                let record_kind = name.to_string();
                let id = SecondaryRecord::id_of(&line);
                assembler.add_secondary(line_no, kind, SecondaryRecord::parse(kind, line_no, &line)?);
                while let Some((n, next)) = cursor.next_line_if(|l| {
                    record_name(l) == record_kind && SecondaryRecord::id_of(l) == id
                })? {
                    assembler.add_secondary(n, kind, SecondaryRecord::parse(kind, n, &next)?);
                }
            }
            "MODEL" => {
                context.report(Progress::Percent(30.0));
                assembler.enter_model(line_no);
            }
            "ENDMDL" => assembler.leave_model(),
            name if is_coordinate_record(name, context) => {
                context.report(Progress::Percent(50.0));
                assembler.add_atom(line_no, AtomRecord::parse(line_no, &line)?);
                while let Some((n, next)) =
                    cursor.next_line_if(|l| is_coordinate_record(record_name(l), context))?
                {
                    assembler.add_atom(n, AtomRecord::parse(n, &next)?);
                }
            }
            _ => {}
        }
    }

    context.report(Progress::Percent(70.0));
    let result = assembler.finish(context.fallback_name());
    context.report(Progress::Percent(90.0));
    Ok(result)
}
