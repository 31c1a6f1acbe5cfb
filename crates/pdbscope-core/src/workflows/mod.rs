//! # Workflows Module
//!
//! High-level entry points that tie the [`crate::core`] reader and the
//! [`crate::engine`] plumbing together.
//!
//! - **Load Workflow** ([`load`]) - Parse a PDB file, optionally center it, and
//!   hand over the finished model, either on the calling thread
//!   ([`load::run`]) or on a background thread ([`load::spawn`]).

pub mod load;
