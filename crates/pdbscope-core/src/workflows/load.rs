use crate::core::io::pdb::{PdbFile, PdbMetadata};
use crate::core::io::traits::{MolecularFile, ReadContext};
use crate::core::models::molecules::Molecules;
use crate::engine::cancel::{CancellationToken, TaskOutcome};
use crate::engine::config::LoadConfig;
use crate::engine::error::EngineError;
use crate::engine::progress::{Progress, ProgressReporter};
use std::path::{Path, PathBuf};
use std::thread::JoinHandle;
use tracing::{info, instrument};

#[derive(Debug, Clone)]
pub struct LoadResult {
    pub molecules: Molecules,
    pub metadata: PdbMetadata,
}

/// Loads a PDB file into a [`Molecules`] model on the calling thread.
///
/// The model is only returned once it is complete: cancellation at any point
/// before that yields [`TaskOutcome::Cancelled`].
///
/// # Errors
///
/// Returns [`EngineError::Load`] if the file cannot be read or contains a
/// malformed numeric field.
#[instrument(skip_all, name = "load_workflow", fields(path = %path.display()))]
pub fn run(
    path: &Path,
    config: &LoadConfig,
    reporter: &ProgressReporter,
    cancellation: &CancellationToken,
) -> Result<TaskOutcome<LoadResult>, EngineError> {
    reporter.report(Progress::PhaseStart { name: "Parsing" });
    info!("Loading structure file.");

    let stem = path
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    let fallback_name = config.fallback_name.as_deref().unwrap_or(&stem);
    let context = ReadContext::new()
        .with_reporter(reporter)
        .with_cancellation(cancellation)
        .include_hetero_atoms(config.include_hetero_atoms)
        .with_fallback_name(fallback_name);

    let outcome = PdbFile::read_from_path(path, &context).map_err(|source| EngineError::Load {
        path: path.to_path_buf(),
        source,
    })?;
    reporter.report(Progress::PhaseFinish);

    let TaskOutcome::Completed((mut molecules, metadata)) = outcome else {
        return Ok(TaskOutcome::Cancelled);
    };

    if config.center_at_origin {
        reporter.report(Progress::PhaseStart { name: "Centering" });
        if let Some(offset) = molecules.center_at_origin() {
            info!(dx = offset.x, dy = offset.y, dz = offset.z, "Model centered at origin.");
        }
        reporter.report(Progress::Percent(99.0));
        reporter.report(Progress::PhaseFinish);
    }

    if cancellation.is_cancelled() {
        info!("Load cancelled before completion; discarding model.");
        return Ok(TaskOutcome::Cancelled);
    }

    reporter.report(Progress::Percent(100.0));
    info!(
        name = molecules.name(),
        atoms = molecules.atom_count(),
        polymers = molecules.polymer_count(),
        "Structure loaded."
    );
    Ok(TaskOutcome::Completed(LoadResult {
        molecules,
        metadata,
    }))
}

/// A load running on a background thread.
///
/// [`LoadHandle::join`] is the only way to obtain the result, so the model is
/// handed over exactly once and only after the worker has finished with it.
#[derive(Debug)]
pub struct LoadHandle {
    cancellation: CancellationToken,
    worker: JoinHandle<Result<TaskOutcome<LoadResult>, EngineError>>,
}

impl LoadHandle {
    pub fn cancel(&self) {
        self.cancellation.cancel();
    }

    pub fn is_finished(&self) -> bool {
        self.worker.is_finished()
    }

    pub fn join(self) -> Result<TaskOutcome<LoadResult>, EngineError> {
        self.worker
            .join()
            .map_err(|_| EngineError::Worker("load thread panicked".to_string()))?
    }
}

/// Starts [`run`] on a named background thread.
///
/// # Errors
///
/// Returns [`EngineError::Worker`] if the thread cannot be spawned.
pub fn spawn(
    path: PathBuf,
    config: LoadConfig,
    reporter: ProgressReporter<'static>,
    cancellation: CancellationToken,
) -> Result<LoadHandle, EngineError> {
    let worker_token = cancellation.clone();
    let worker = std::thread::Builder::new()
        .name("pdbscope-load".to_string())
        .spawn(move || run(&path, &config, &reporter, &worker_token))
        .map_err(|e| EngineError::Worker(e.to_string()))?;
    Ok(LoadHandle {
        cancellation,
        worker,
    })
}
