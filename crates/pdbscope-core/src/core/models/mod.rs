//! # Core Models Module
//!
//! Data structures describing a parsed macromolecule as a strict ownership
//! tree: [`molecules::Molecules`] owns [`polymer::Polymer`]s (chains), a polymer
//! owns [`structure::Structure`]s (typed residue runs such as helices and
//! sheets), a structure owns [`monomer::Monomer`]s and a monomer owns its
//! [`atom::Atom`]s.
//!
//! ## Key Components
//!
//! - [`atom`] - Atom records with their element variant, display radius and color
//! - [`residue`] - Classification of residue codes into amino acids and nucleotides
//! - [`monomer`] - A single residue with its atoms and lazily inferred bonds
//! - [`structure`] - Helix, sheet, nucleotide and unannotated residue runs
//! - [`polymer`] - One chain with cached flattened monomer and location lists
//! - [`molecules`] - The root aggregate with summary counts and whole-model queries
//! - [`topology`] - Distance-based bond inference
//!
//! ## Usage
//!
//! ```ignore
//! use pdbscope::core::models::{molecules::Molecules, structure::StructureKind};
//!
//! let molecules: Molecules = load_somehow()?;
//! for polymer in molecules.polymers() {
//!     for monomer in polymer.monomers() {
//!         println!("{} {} bonds={}", polymer.unit_id(), monomer.name(), monomer.bonds().len());
//!     }
//! }
//! let helices = molecules.structure_ids(StructureKind::Helix);
//! ```

pub mod atom;
pub mod molecules;
pub mod monomer;
pub mod polymer;
pub mod residue;
pub mod structure;
pub mod topology;
