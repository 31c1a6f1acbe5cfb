//! # Engine Module
//!
//! Runtime plumbing shared by every load: progress reporting, cooperative
//! cancellation, load options and the error type surfaced by the workflows.
//!
//! ## Architecture
//!
//! - **Configuration** ([`config`]) - Centering, `HETATM` handling and naming options
//! - **Cancellation** ([`cancel`]) - Shared cancellation flag and the `TaskOutcome` union
//! - **Progress Monitoring** ([`progress`]) - Monotonic percentage reporting through a callback
//! - **Error Handling** ([`error`]) - Errors that carry the failing file path

pub mod cancel;
pub mod config;
pub mod error;
pub mod progress;
