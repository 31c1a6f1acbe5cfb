use nalgebra::{Point3, Vector3};
use phf::{Map, phf_map};
use std::fmt;
use std::str::FromStr;

static CARBON_ROLES: Map<&'static str, CarbonRole> = phf_map! {
    "CA" => CarbonRole::Guide,   // amino acid alpha carbon
    "C5'" => CarbonRole::Guide,  // nucleotide sugar C5'
    "CB" => CarbonRole::Twist,   // amino acid beta carbon
    "C1'" => CarbonRole::Twist,  // nucleotide sugar C1'
    "CO" => CarbonRole::Opposite,
};

/// The role a carbon atom plays when reconstructing a ribbon backbone.
///
/// Each monomer is expected to carry at most one `Guide`, one `Twist` and one
/// `Opposite` carbon; every other carbon is tagged `Residue`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub enum CarbonRole {
    /// Carbon the ribbon passes through (`CA` or `C5'`).
    Guide,
    /// Carbon defining the ribbon twist (`CB` or `C1'`).
    Twist,
    /// Carbon opposite to the twisting atom (`CO`).
    Opposite,
    /// Any other carbon.
    #[default]
    Residue,
}

impl CarbonRole {
    /// Looks up the backbone role of a carbon from its PDB atom name.
    ///
    /// Names are matched after trimming and upper-casing; unknown names map to
    /// [`CarbonRole::Residue`].
    pub fn from_atom_name(atom_name: &str) -> Self {
        CARBON_ROLES
            .get(atom_name.trim().to_ascii_uppercase().as_str())
            .copied()
            .unwrap_or_default()
    }
}

impl FromStr for CarbonRole {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "guide" => Ok(CarbonRole::Guide),
            "twist" => Ok(CarbonRole::Twist),
            "opposite" => Ok(CarbonRole::Opposite),
            "residue" => Ok(CarbonRole::Residue),
            _ => Err(()),
        }
    }
}

impl fmt::Display for CarbonRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}",
            match self {
                CarbonRole::Guide => "Guide",
                CarbonRole::Twist => "Twist",
                CarbonRole::Opposite => "Opposite",
                CarbonRole::Residue => "Residue",
            }
        )
    }
}

/// Display color of an atom, following the usual CPK-like scheme.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Color {
    Gray,
    Blue,
    Red,
    White,
    Orange,
    Yellow,
    Green,
}

impl Color {
    pub fn rgb(&self) -> [u8; 3] {
        match self {
            Color::Gray => [128, 128, 128],
            Color::Blue => [0, 0, 255],
            Color::Red => [255, 0, 0],
            Color::White => [255, 255, 255],
            Color::Orange => [255, 165, 0],
            Color::Yellow => [255, 255, 0],
            Color::Green => [0, 128, 0],
        }
    }
}

/// The chemical element of an atom.
///
/// This is a closed set: every element the viewer distinguishes has its own
/// variant, and everything else is carried by [`AtomKind::Generic`] together
/// with the raw element string from the file.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum AtomKind {
    /// Carbon, tagged with its ribbon backbone role.
    Carbon { role: CarbonRole },
    Nitrogen,
    Oxygen,
    Hydrogen,
    Phosphorus,
    Sulfur,
    /// Fallback for elements without a dedicated variant.
    Generic { element: String },
}

impl AtomKind {
    /// Dispatches on the first letter of a PDB atom name.
    ///
    /// # Arguments
    ///
    /// * `atom_name` - The atom name from columns 12-16 (e.g., "CA", "N", "OG1").
    /// * `element` - The element symbol from the end of the record, used only
    ///   for the generic fallback.
    pub fn from_atom_name(atom_name: &str, element: &str) -> Self {
        let atom_name = atom_name.trim().to_ascii_uppercase();
        match atom_name.chars().next() {
            Some('N') => AtomKind::Nitrogen,
            Some('C') => AtomKind::Carbon {
                role: CarbonRole::from_atom_name(&atom_name),
            },
            Some('H') => AtomKind::Hydrogen,
            Some('O') => AtomKind::Oxygen,
            Some('S') => AtomKind::Sulfur,
            Some('P') => AtomKind::Phosphorus,
            _ => AtomKind::Generic {
                element: element.trim().to_ascii_uppercase(),
            },
        }
    }

    pub fn is_generic(&self) -> bool {
        matches!(self, AtomKind::Generic { .. })
    }

    /// Display radius in picometers.
    pub fn radius_pm(&self) -> u32 {
        match self {
            AtomKind::Carbon { .. } => 67,
            AtomKind::Nitrogen => 55,
            AtomKind::Oxygen => 48,
            AtomKind::Hydrogen => 31,
            AtomKind::Phosphorus => 98,
            AtomKind::Sulfur => 88,
            AtomKind::Generic { .. } => 45,
        }
    }

    pub fn color(&self) -> Color {
        match self {
            AtomKind::Carbon { .. } => Color::Gray,
            AtomKind::Nitrogen => Color::Blue,
            AtomKind::Oxygen => Color::Red,
            AtomKind::Hydrogen => Color::White,
            AtomKind::Phosphorus => Color::Orange,
            AtomKind::Sulfur => Color::Yellow,
            AtomKind::Generic { .. } => Color::Green,
        }
    }
}

/// An atom parsed from a coordinate record.
///
/// The identity of an atom (kind, label, radius, color) never changes after
/// parsing. Only its location may be translated, e.g. when the whole molecule
/// is centered at the origin.
#[derive(Debug, Clone, PartialEq)]
pub struct Atom {
    /// The PDB atom name (e.g., "CA", "N", "OG1").
    pub label: String,
    /// The element variant of this atom.
    pub kind: AtomKind,
    /// The crystallographic temperature factor. Informational only.
    pub temperature_factor: f64,
    location: Point3<f64>,
}

impl Atom {
    /// Creates an atom from the raw fields of a coordinate record.
    ///
    /// # Arguments
    ///
    /// * `label` - The PDB atom name.
    /// * `element` - The element symbol column, used for the generic fallback.
    /// * `location` - The 3D coordinates in Angstroms.
    /// * `temperature_factor` - The temperature factor column.
    pub fn new(label: &str, element: &str, location: Point3<f64>, temperature_factor: f64) -> Self {
        let label = label.trim().to_ascii_uppercase();
        Self {
            kind: AtomKind::from_atom_name(&label, element),
            label,
            temperature_factor,
            location,
        }
    }

    /// Returns the element name used for display and per-chain histograms.
    ///
    /// Generic atoms have no dedicated element name and report their PDB label.
    pub fn name(&self) -> &str {
        match &self.kind {
            AtomKind::Carbon { .. } => "Carbon",
            AtomKind::Nitrogen => "Nitrogen",
            AtomKind::Oxygen => "Oxygen",
            AtomKind::Hydrogen => "Hydrogen",
            AtomKind::Phosphorus => "Phosphorus",
            AtomKind::Sulfur => "Sulfur",
            AtomKind::Generic { .. } => &self.label,
        }
    }

    /// Returns the one-letter (or, for generic atoms, raw) element symbol.
    pub fn symbol(&self) -> &str {
        match &self.kind {
            AtomKind::Carbon { .. } => "C",
            AtomKind::Nitrogen => "N",
            AtomKind::Oxygen => "O",
            AtomKind::Hydrogen => "H",
            AtomKind::Phosphorus => "P",
            AtomKind::Sulfur => "S",
            AtomKind::Generic { element } if !element.is_empty() => element,
            AtomKind::Generic { .. } => &self.label,
        }
    }

    pub fn radius_pm(&self) -> u32 {
        self.kind.radius_pm()
    }

    pub fn color(&self) -> Color {
        self.kind.color()
    }

    /// Returns the backbone role if this atom is a carbon.
    pub fn carbon_role(&self) -> Option<CarbonRole> {
        match self.kind {
            AtomKind::Carbon { role } => Some(role),
            _ => None,
        }
    }

    pub fn location(&self) -> Point3<f64> {
        self.location
    }

    pub fn set_location(&mut self, location: Point3<f64>) {
        self.location = location;
    }

    pub fn translate(&mut self, offset: &Vector3<f64>) {
        self.location += offset;
    }
}
