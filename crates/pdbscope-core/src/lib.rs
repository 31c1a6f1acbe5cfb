//! # pdbscope Core Library
//!
//! A reader for legacy PDB structure files that reconciles the independently
//! numbered SEQRES, HELIX/SHEET and ATOM record families into one consistent
//! model of chains, secondary structures, residues and atoms.
//!
//! ## Architectural Philosophy
//!
//! The library follows a strict three-layer architecture:
//!
//! - **[`core`]: The Foundation.** The `Molecules` → `Polymer` → `Structure` →
//!   `Monomer` → `Atom` model, distance-based bond inference, and the PDB
//!   reader together with its residue resolver.
//!
//! - **[`engine`]: The Runtime.** Progress reporting, cooperative
//!   cancellation, load options and workflow errors.
//!
//! - **[`workflows`]: The Public API.** Complete procedures such as "load
//!   this file, center it and hand it over", in blocking and background
//!   variants.

pub mod core;
pub mod engine;
pub mod workflows;
