use crate::core::io::pdb::PdbError;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum EngineError {
    #[error("Failed to load structure file '{path}': {source}")]
    Load {
        path: PathBuf,
        #[source]
        source: PdbError,
    },

    #[error("Background load worker failed: {0}")]
    Worker(String),
}
