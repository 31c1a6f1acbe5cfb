//! # Core Module
//!
//! The stateless foundation of the library: the molecular data model, file
//! readers and small geometric helpers.
//!
//! ## Architecture
//!
//! - **Molecular Representation** ([`models`]) - Molecules, chains, structures, monomers and atoms
//! - **File I/O** ([`io`]) - The PDB reader and the residue resolver it relies on
//! - **Geometry** ([`utils`]) - Centroids and bounding boxes over atom locations
//!
//! Nothing in this module keeps state between loads; progress reporting and
//! cancellation hooks are passed in by the caller.

pub mod io;
pub mod models;
pub mod utils;
