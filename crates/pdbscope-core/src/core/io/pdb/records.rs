use super::{PdbError, PdbParseErrorKind};
use nalgebra::Point3;

/// Extracts the trimmed text between two 0-based, end-exclusive columns.
///
/// Short lines yield whatever part of the range exists, possibly nothing.
pub(super) fn field(line: &str, start: usize, end: usize) -> &str {
    let end = end.min(line.len());
    line.get(start..end).unwrap_or("").trim()
}

pub(super) fn record_name(line: &str) -> &str {
    field(line, 0, 6)
}

fn columns(start: usize, end: usize) -> String {
    format!("{}-{}", start + 1, end)
}

fn parse_int(line_no: usize, line: &str, start: usize, end: usize) -> Result<isize, PdbError> {
    let value = field(line, start, end);
    value.parse().map_err(|_| PdbError::Parse {
        line: line_no,
        kind: PdbParseErrorKind::InvalidInt {
            columns: columns(start, end),
            value: value.into(),
        },
    })
}

fn parse_float(line_no: usize, line: &str, start: usize, end: usize) -> Result<f64, PdbError> {
    let value = field(line, start, end);
    value.parse().map_err(|_| PdbError::Parse {
        line: line_no,
        kind: PdbParseErrorKind::InvalidFloat {
            columns: columns(start, end),
            value: value.into(),
        },
    })
}

fn normalize_id(raw: &str) -> String {
    raw.trim().to_ascii_uppercase()
}

#[derive(Debug, Clone, PartialEq)]
pub(super) enum CompndField {
    Molecule(String),
    Chains(Vec<String>),
    Other,
}

impl CompndField {
    pub(super) fn parse(line: &str) -> Self {
        let text = field(line, 11, 80);
        if let Some(name) = text.strip_prefix("MOLECULE:") {
            CompndField::Molecule(name.replace(';', "").trim().to_string())
        } else if text.starts_with("CHAIN:") {
            let chains = field(line, 18, 80)
                .replace(';', "")
                .split(',')
                .map(normalize_id)
                .filter(|id| !id.is_empty())
                .collect();
            CompndField::Chains(chains)
        } else {
            CompndField::Other
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub(super) struct SeqresRecord {
    pub chain: String,
    pub residues: Vec<String>,
}

impl SeqresRecord {
    pub(super) fn chain_of(line: &str) -> String {
        normalize_id(field(line, 11, 12))
    }

    pub(super) fn parse(line: &str) -> Self {
        let residues = line
            .get(19.min(line.len())..)
            .unwrap_or("")
            .split_whitespace()
            .map(normalize_id)
            .collect();
        Self {
            chain: Self::chain_of(line),
            residues,
        }
    }
}

/// A residue as named by a secondary-structure record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(super) struct ResidueRef {
    pub name: String,
    pub chain: String,
    pub sequence_number: isize,
}

#[derive(Debug, Clone, Copy)]
struct ResidueColumns {
    name: (usize, usize),
    chain: (usize, usize),
    seq: (usize, usize),
}

impl ResidueColumns {
    fn read(&self, line_no: usize, line: &str) -> Result<ResidueRef, PdbError> {
        Ok(ResidueRef {
            name: normalize_id(field(line, self.name.0, self.name.1)),
            chain: normalize_id(field(line, self.chain.0, self.chain.1)),
            sequence_number: parse_int(line_no, line, self.seq.0, self.seq.1)?,
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) enum SecondaryKind {
    Helix,
    Sheet,
}

const SECONDARY_ID_COLUMNS: (usize, usize) = (11, 14);

impl SecondaryKind {
    fn start_columns(self) -> ResidueColumns {
        match self {
            SecondaryKind::Helix => ResidueColumns {
                name: (15, 18),
                chain: (19, 20),
                seq: (21, 25),
            },
            SecondaryKind::Sheet => ResidueColumns {
                name: (17, 20),
                chain: (21, 22),
                seq: (22, 26),
            },
        }
    }

    fn end_columns(self) -> ResidueColumns {
        match self {
            SecondaryKind::Helix => ResidueColumns {
                name: (27, 30),
                chain: (31, 32),
                seq: (33, 37),
            },
            SecondaryKind::Sheet => ResidueColumns {
                name: (28, 31),
                chain: (32, 33),
                seq: (33, 37),
            },
        }
    }
}

/// One HELIX or SHEET line: a start/end residue pair inside a named structure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(super) struct SecondaryRecord {
    pub id: String,
    pub start: ResidueRef,
    pub end: ResidueRef,
}

impl SecondaryRecord {
    pub(super) fn id_of(line: &str) -> String {
        let (start, end) = SECONDARY_ID_COLUMNS;
        normalize_id(field(line, start, end))
    }

    pub(super) fn parse(kind: SecondaryKind, line_no: usize, line: &str) -> Result<Self, PdbError> {
        Ok(Self {
            id: Self::id_of(line),
            start: kind.start_columns().read(line_no, line)?,
            end: kind.end_columns().read(line_no, line)?,
        })
    }
}

/// Coordinates end at column 54; anything shorter cannot describe an atom.
const MIN_ATOM_LINE_LEN: usize = 54;

#[derive(Debug, Clone, PartialEq)]
pub(super) struct AtomRecord {
    pub name: String,
    pub alt_loc: char,
    pub residue: String,
    pub chain: String,
    pub sequence_number: isize,
    pub location: Point3<f64>,
    pub temperature_factor: f64,
    pub element: String,
}

impl AtomRecord {
    pub(super) fn parse(line_no: usize, line: &str) -> Result<Self, PdbError> {
        if line.len() < MIN_ATOM_LINE_LEN {
            return Err(PdbError::Parse {
                line: line_no,
                kind: PdbParseErrorKind::LineTooShort {
                    min: MIN_ATOM_LINE_LEN,
                },
            });
        }

        let x = parse_float(line_no, line, 30, 38)?;
        let y = parse_float(line_no, line, 38, 46)?;
        let z = parse_float(line_no, line, 46, 54)?;
        let temperature_factor = if field(line, 60, 66).is_empty() {
            0.0
        } else {
            parse_float(line_no, line, 60, 66)?
        };

        Ok(Self {
            name: normalize_id(field(line, 12, 16)),
            alt_loc: line
                .get(16..17)
                .and_then(|s| s.chars().next())
                .unwrap_or(' '),
            residue: normalize_id(field(line, 17, 20)),
            chain: normalize_id(field(line, 21, 22)),
            sequence_number: parse_int(line_no, line, 22, 26)?,
            location: Point3::new(x, y, z),
            temperature_factor,
            element: normalize_id(field(line, 76, 78)),
        })
    }

    /// Only the primary conformation (blank or `A`) is kept.
    pub(super) fn is_primary_location(&self) -> bool {
        matches!(self.alt_loc, ' ' | 'A')
    }
}


#[cfg(test)]
mod tests {
    use super::lines;
    use super::*;

    #[test]
    fn field_clamps_to_line_length() {
        assert_eq!(field("ATOM  ", 0, 6), "ATOM");
        assert_eq!(field("ATOM", 0, 6), "ATOM");
        assert_eq!(field("ATOM", 10, 20), "");
        assert_eq!(record_name("HELIX    1"), "HELIX");
    }

    #[test]
    fn compnd_extracts_molecule_and_chains() {
        assert_eq!(
            CompndField::parse(&lines::compnd(2, "MOLECULE: SPIKE GLYCOPROTEIN;")),
            CompndField::Molecule("SPIKE GLYCOPROTEIN".into())
        );
        assert_eq!(
            CompndField::parse(&lines::compnd(3, "CHAIN: a, B ,C;")),
            CompndField::Chains(vec!["A".into(), "B".into(), "C".into()])
        );
        assert_eq!(
            CompndField::parse(&lines::compnd(4, "ENGINEERED: YES;")),
            CompndField::Other
        );
    }

    #[test]
    fn seqres_reads_chain_and_tokens() {
        let record = SeqresRecord::parse(&lines::seqres(1, "A", &["ALA", "GLY", "dA"]));
        assert_eq!(record.chain, "A");
        assert_eq!(record.residues, vec!["ALA", "GLY", "DA"]);
        assert!(SeqresRecord::parse("SEQRES   1 B").residues.is_empty());
    }

    #[test]
    fn helix_columns_are_read() {
        let line = lines::helix(1, "1", ("ALA", "A", 1), ("LYS", "A", 5));
        let record = SecondaryRecord::parse(SecondaryKind::Helix, 7, &line).unwrap();
        assert_eq!(record.id, "1");
        assert_eq!(
            record.start,
            ResidueRef {
                name: "ALA".into(),
                chain: "A".into(),
                sequence_number: 1
            }
        );
        assert_eq!(record.end.name, "LYS");
        assert_eq!(record.end.sequence_number, 5);
    }

    #[test]
    fn sheet_columns_are_read() {
        let line = lines::sheet(1, "S1", ("VAL", "A", 12), ("ILE", "B", 1000));
        let record = SecondaryRecord::parse(SecondaryKind::Sheet, 1, &line).unwrap();
        assert_eq!(record.id, "S1");
        assert_eq!(record.start.chain, "A");
        assert_eq!(record.start.sequence_number, 12);
        assert_eq!(record.end.chain, "B");
        assert_eq!(record.end.sequence_number, 1000);
    }

    #[test]
    fn malformed_secondary_number_is_fatal() {
        let line = lines::helix(1, "1", ("ALA", "A", 1), ("LYS", "A", 5)).replace("   5", "   x");
        let err = SecondaryRecord::parse(SecondaryKind::Helix, 9, &line).unwrap_err();
        assert!(matches!(
            err,
            PdbError::Parse {
                line: 9,
                kind: PdbParseErrorKind::InvalidInt { .. }
            }
        ));
    }

    #[test]
    fn atom_columns_are_read() {
        let line = lines::atom(1, "CA", ' ', ("ALA", "A", 1), [11.104, -6.134, 0.5], "C");
        let atom = AtomRecord::parse(1, &line).unwrap();
        assert_eq!(atom.name, "CA");
        assert_eq!(atom.alt_loc, ' ');
        assert_eq!(atom.residue, "ALA");
        assert_eq!(atom.chain, "A");
        assert_eq!(atom.sequence_number, 1);
        assert_eq!(atom.location, Point3::new(11.104, -6.134, 0.5));
        assert_eq!(atom.temperature_factor, 20.5);
        assert_eq!(atom.element, "C");
        assert!(atom.is_primary_location());
    }

    #[test]
    fn two_letter_elements_keep_both_letters() {
        let line = lines::atom(7, "FE", ' ', ("HEM", "A", 154), [1.0, 2.0, 3.0], "FE");
        assert_eq!(AtomRecord::parse(1, &line).unwrap().element, "FE");
    }

    #[test]
    fn alternate_locations_other_than_a_are_not_primary() {
        let line = lines::atom(1, "CA", 'B', ("ALA", "A", 1), [0.0, 0.0, 0.0], "C");
        assert!(!AtomRecord::parse(1, &line).unwrap().is_primary_location());
        let line = lines::atom(1, "CA", 'A', ("ALA", "A", 1), [0.0, 0.0, 0.0], "C");
        assert!(AtomRecord::parse(1, &line).unwrap().is_primary_location());
    }

    #[test]
    fn temperature_factor_defaults_when_line_ends_after_coordinates() {
        let line = lines::atom(1, "N", ' ', ("GLY", "A", 2), [1.0, 2.0, 3.0], "N");
        let atom = AtomRecord::parse(1, &line[..54]).unwrap();
        assert_eq!(atom.temperature_factor, 0.0);
        assert_eq!(atom.element, "");
    }

    #[test]
    fn short_atom_line_is_rejected() {
        let err = AtomRecord::parse(3, "ATOM      1  CA  ALA A   1").unwrap_err();
        assert!(matches!(
            err,
            PdbError::Parse {
                line: 3,
                kind: PdbParseErrorKind::LineTooShort { .. }
            }
        ));
    }

    #[test]
    fn malformed_coordinate_names_its_columns() {
        let line = lines::atom(1, "CA", ' ', ("ALA", "A", 1), [1.0, 2.0, 3.0], "C")
            .replacen("   2.000", "  2.0x0 ", 1);
        match AtomRecord::parse(4, &line).unwrap_err() {
            PdbError::Parse {
                line,
                kind: PdbParseErrorKind::InvalidFloat { columns, value },
            } => {
                assert_eq!(line, 4);
                assert_eq!(columns, "39-46");
                assert_eq!(value, "2.0x0");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }
}
