use super::monomer::Monomer;
use serde::Serialize;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum StructureKind {
    Helix,
    Sheet,
    Nucleotide,
    Other,
}

#[derive(Debug, Error)]
#[error("Invalid structure kind string")]
pub struct ParseStructureKindError;

impl FromStr for StructureKind {
    type Err = ParseStructureKindError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "helix" => Ok(StructureKind::Helix),
            "sheet" => Ok(StructureKind::Sheet),
            "nucleotide" => Ok(StructureKind::Nucleotide),
            "other" => Ok(StructureKind::Other),
            _ => Err(ParseStructureKindError),
        }
    }
}

impl fmt::Display for StructureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}",
            match self {
                StructureKind::Helix => "HELIX",
                StructureKind::Sheet => "SHEET",
                StructureKind::Nucleotide => "NUCLEOTIDE",
                StructureKind::Other => "OTHER",
            }
        )
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Structure {
    pub id: String,                  // Trimmed, upper-cased structure identifier
    pub kind: StructureKind,         // Secondary structure classification
    pub(crate) auto_created: bool,   // Created on the fly for unannotated residues
    pub(crate) monomers: Vec<Monomer>,
}

impl Structure {
    /// Creates a structure annotated by a HELIX or SHEET record.
    pub fn new(id: &str, kind: StructureKind, monomers: Vec<Monomer>) -> Self {
        Self {
            id: id.trim().to_uppercase(),
            kind,
            auto_created: false,
            monomers,
        }
    }

    /// Creates an empty structure that collects residues no annotation covers.
    pub(crate) fn auto(kind: StructureKind) -> Self {
        Self {
            id: kind.to_string(),
            kind,
            auto_created: true,
            monomers: Vec::new(),
        }
    }

    pub fn monomers(&self) -> &[Monomer] {
        &self.monomers
    }

    pub fn is_auto_created(&self) -> bool {
        self.auto_created
    }

    pub fn atom_count(&self) -> usize {
        self.monomers.iter().map(|m| m.atoms().len()).sum()
    }
}
