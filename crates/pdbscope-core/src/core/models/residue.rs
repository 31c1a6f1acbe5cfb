use phf::{Map, phf_map};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

static MONOMER_CODES: Map<&'static str, MonomerType> = phf_map! {
    "ALA" => MonomerType::Alanine,
    "ARG" => MonomerType::Arginine,
    "ASN" => MonomerType::Asparagine,
    "ASP" => MonomerType::AsparticAcid,
    "CYS" => MonomerType::Cysteine,
    "GLN" => MonomerType::Glutamine,
    "GLU" => MonomerType::GlutamicAcid,
    "GLY" => MonomerType::Glycine,
    "HIS" => MonomerType::Histidine,
    "ILE" => MonomerType::Isoleucine,
    "LEU" => MonomerType::Leucine,
    "LYS" => MonomerType::Lysine,
    "MET" => MonomerType::Methionine,
    "PHE" => MonomerType::Phenylalanine,
    "PRO" => MonomerType::Proline,
    "SER" => MonomerType::Serine,
    "THR" => MonomerType::Threonine,
    "TRP" => MonomerType::Tryptophan,
    "TYR" => MonomerType::Tyrosine,
    "VAL" => MonomerType::Valine,
    "G" => MonomerType::Guanine,
    "A" => MonomerType::Adenine,
    "C" => MonomerType::Cytosine,
    "T" => MonomerType::Thymine,
    "U" => MonomerType::Uracil,
    "DA" => MonomerType::Deoxyadenosine,
    "DC" => MonomerType::Deoxycytidine,
    "DG" => MonomerType::Deoxyguanosine,
    "DT" => MonomerType::Deoxythymidine,
    "DI" => MonomerType::Deoxyinosine,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum MonomerType {
    // --- Amino acids ---
    Alanine,       // ALA
    Arginine,      // ARG
    Asparagine,    // ASN
    AsparticAcid,  // ASP
    Cysteine,      // CYS
    Glutamine,     // GLN
    GlutamicAcid,  // GLU
    Glycine,       // GLY
    Histidine,     // HIS
    Isoleucine,    // ILE
    Leucine,       // LEU
    Lysine,        // LYS
    Methionine,    // MET
    Phenylalanine, // PHE
    Proline,       // PRO
    Serine,        // SER
    Threonine,     // THR
    Tryptophan,    // TRP
    Tyrosine,      // TYR
    Valine,        // VAL

    // --- Ribonucleotides ---
    Guanine,  // G
    Adenine,  // A
    Cytosine, // C
    Thymine,  // T
    Uracil,   // U

    // --- Deoxyribonucleotides ---
    Deoxyadenosine,  // DA
    Deoxycytidine,   // DC
    Deoxyguanosine,  // DG
    Deoxythymidine,  // DT
    Deoxyinosine,    // DI

    // --- Anything not in the tables above (ligands, water, modified residues) ---
    Other,
}

impl MonomerType {
    /// Classifies a residue code, falling back to [`MonomerType::Other`].
    pub fn from_code(code: &str) -> Self {
        MONOMER_CODES
            .get(code.trim().to_ascii_uppercase().as_str())
            .copied()
            .unwrap_or(MonomerType::Other)
    }

    pub fn code(&self) -> &'static str {
        match self {
            MonomerType::Alanine => "ALA",
            MonomerType::Arginine => "ARG",
            MonomerType::Asparagine => "ASN",
            MonomerType::AsparticAcid => "ASP",
            MonomerType::Cysteine => "CYS",
            MonomerType::Glutamine => "GLN",
            MonomerType::GlutamicAcid => "GLU",
            MonomerType::Glycine => "GLY",
            MonomerType::Histidine => "HIS",
            MonomerType::Isoleucine => "ILE",
            MonomerType::Leucine => "LEU",
            MonomerType::Lysine => "LYS",
            MonomerType::Methionine => "MET",
            MonomerType::Phenylalanine => "PHE",
            MonomerType::Proline => "PRO",
            MonomerType::Serine => "SER",
            MonomerType::Threonine => "THR",
            MonomerType::Tryptophan => "TRP",
            MonomerType::Tyrosine => "TYR",
            MonomerType::Valine => "VAL",
            MonomerType::Guanine => "G",
            MonomerType::Adenine => "A",
            MonomerType::Cytosine => "C",
            MonomerType::Thymine => "T",
            MonomerType::Uracil => "U",
            MonomerType::Deoxyadenosine => "DA",
            MonomerType::Deoxycytidine => "DC",
            MonomerType::Deoxyguanosine => "DG",
            MonomerType::Deoxythymidine => "DT",
            MonomerType::Deoxyinosine => "DI",
            MonomerType::Other => "OTHER",
        }
    }

    /// Amino acids are exactly the known three-letter codes.
    pub fn is_amino_acid(&self) -> bool {
        *self != MonomerType::Other && self.code().len() == 3
    }

    /// Nucleotides are exactly the known one- and two-letter codes.
    pub fn is_nucleotide(&self) -> bool {
        *self != MonomerType::Other && self.code().len() <= 2
    }
}

/// Applies the length rule to a raw residue name that may not be a known code.
///
/// Names of at most two letters are treated as nucleotides, longer names as
/// amino acids or other three-letter residues.
pub fn is_nucleotide_code(name: &str) -> bool {
    let len = name.trim().len();
    len > 0 && len <= 2
}

#[derive(Debug, Error, PartialEq, Eq)]
#[error("Unknown monomer code: '{0}'")]
pub struct ParseMonomerTypeError(pub String);

impl FromStr for MonomerType {
    type Err = ParseMonomerTypeError;

    /// Strict parsing: unlike [`MonomerType::from_code`], unknown codes are an error.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match MonomerType::from_code(s) {
            MonomerType::Other if !s.trim().eq_ignore_ascii_case("OTHER") => {
                Err(ParseMonomerTypeError(s.to_string()))
            }
            kind => Ok(kind),
        }
    }
}

impl fmt::Display for MonomerType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}
