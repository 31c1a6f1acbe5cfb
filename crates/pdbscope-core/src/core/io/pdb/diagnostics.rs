use serde::Serialize;
use std::fmt;

/// A recoverable inconsistency found while reading a PDB file.
///
/// Diagnostics never abort a load; the offending record (or the offending
/// part of it) is skipped and parsing continues.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "kebab-case")]
pub enum ParseDiagnostic {
    /// A `MOLECULE:` field with no following `CHAIN:` field.
    MissingChainField { line: usize, molecule: String },
    /// A HELIX or SHEET pair whose end residue lies on another chain.
    CrossChainEnd {
        line: usize,
        structure_id: String,
        start_chain: String,
        end_chain: String,
    },
    /// A HELIX or SHEET record for a chain without SEQRES records.
    MissingReferenceSequence { line: usize, chain: String },
    /// A HELIX or SHEET residue that is not part of the chain's reference sequence.
    UnresolvedResidue {
        line: usize,
        chain: String,
        residue: String,
        sequence_number: isize,
    },
    /// A HELIX or SHEET pair whose end does not come after its start.
    EmptyRange {
        line: usize,
        structure_id: String,
        start: usize,
        end: usize,
    },
    /// An ATOM record with a residue number below 1.
    InvalidSequenceNumber {
        line: usize,
        chain: String,
        residue: String,
        sequence_number: isize,
    },
    /// First occurrence of a residue name outside the amino acid and nucleotide tables.
    UnknownMonomer { line: usize, name: String },
    /// First occurrence of an atom name that maps to no dedicated element.
    UnknownElement {
        line: usize,
        atom_name: String,
        element: String,
    },
    /// A MODEL record after the first model; its atoms are ignored.
    ExtraModelIgnored { line: usize },
}

impl ParseDiagnostic {
    pub fn line(&self) -> usize {
        match self {
            ParseDiagnostic::MissingChainField { line, .. }
            | ParseDiagnostic::CrossChainEnd { line, .. }
            | ParseDiagnostic::MissingReferenceSequence { line, .. }
            | ParseDiagnostic::UnresolvedResidue { line, .. }
            | ParseDiagnostic::EmptyRange { line, .. }
            | ParseDiagnostic::InvalidSequenceNumber { line, .. }
            | ParseDiagnostic::UnknownMonomer { line, .. }
            | ParseDiagnostic::UnknownElement { line, .. }
            | ParseDiagnostic::ExtraModelIgnored { line } => *line,
        }
    }

    /// Fallback classifications are expected in real files and not worth a warning.
    pub fn is_informational(&self) -> bool {
        matches!(
            self,
            ParseDiagnostic::UnknownMonomer { .. }
                | ParseDiagnostic::UnknownElement { .. }
                | ParseDiagnostic::ExtraModelIgnored { .. }
        )
    }
}

impl fmt::Display for ParseDiagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParseDiagnostic::MissingChainField { line, molecule } => write!(
                f,
                "line {line}: molecule '{molecule}' has no CHAIN field, ignored"
            ),
            ParseDiagnostic::CrossChainEnd {
                line,
                structure_id,
                start_chain,
                end_chain,
            } => write!(
                f,
                "line {line}: structure '{structure_id}' starts on chain {start_chain} but ends on chain {end_chain}, skipped"
            ),
            ParseDiagnostic::MissingReferenceSequence { line, chain } => write!(
                f,
                "line {line}: chain {chain} has no SEQRES records, annotation skipped"
            ),
            ParseDiagnostic::UnresolvedResidue {
                line,
                chain,
                residue,
                sequence_number,
            } => write!(
                f,
                "line {line}: residue {residue} {sequence_number} not found in the sequence of chain {chain}, annotation skipped"
            ),
            ParseDiagnostic::EmptyRange {
                line,
                structure_id,
                start,
                end,
            } => write!(
                f,
                "line {line}: structure '{structure_id}' resolves to positions {start}..={end}, skipped"
            ),
            ParseDiagnostic::InvalidSequenceNumber {
                line,
                chain,
                residue,
                sequence_number,
            } => write!(
                f,
                "line {line}: atom of residue {residue} on chain {chain} has sequence number {sequence_number}, skipped"
            ),
            ParseDiagnostic::UnknownMonomer { line, name } => {
                write!(f, "line {line}: unknown monomer '{name}', classified as OTHER")
            }
            ParseDiagnostic::UnknownElement {
                line,
                atom_name,
                element,
            } => write!(
                f,
                "line {line}: atom '{atom_name}' (element '{element}') has no dedicated type, using generic atom"
            ),
            ParseDiagnostic::ExtraModelIgnored { line } => {
                write!(f, "line {line}: additional model ignored, only the first model is used")
            }
        }
    }
}
