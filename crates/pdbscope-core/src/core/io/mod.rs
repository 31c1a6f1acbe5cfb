//! Provides input functionality for molecular file formats.
//!
//! The [`traits::MolecularFile`] trait is the common reading interface; the
//! [`pdb`] module implements it for legacy PDB files, and [`resolver`] holds
//! the residue matching rules that reconcile the differently numbered record
//! families of such files.

pub mod pdb;
pub mod resolver;
pub mod traits;
