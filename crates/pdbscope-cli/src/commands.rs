pub mod composition;
pub mod info;

use crate::cli::LoadArgs;
use crate::config::build_load_config;
use crate::error::{CliError, Result};
use crate::utils::progress::CliProgressHandler;
use pdbscope::engine::cancel::{CancellationToken, TaskOutcome};
use pdbscope::engine::progress::ProgressReporter;
use pdbscope::workflows::load::{self, LoadResult};
use tracing::{info, warn};

/// Loads the input structure on a blocking worker, cancelling it on Ctrl-C.
pub async fn load_structure(args: &LoadArgs) -> Result<LoadResult> {
    let config = build_load_config(args)?;

    let progress_handler = CliProgressHandler::new();
    let reporter = ProgressReporter::with_callback(progress_handler.get_callback());
    let cancellation = CancellationToken::new();

    info!("Loading input structure from {:?}", &args.input);
    let path = args.input.clone();
    let worker_token = cancellation.clone();
    let mut worker =
        tokio::task::spawn_blocking(move || load::run(&path, &config, &reporter, &worker_token));

    let joined = tokio::select! {
        joined = &mut worker => joined,
        signal = tokio::signal::ctrl_c() => {
            match signal {
                Ok(()) => {
                    warn!("Interrupt received, cancelling the load.");
                    cancellation.cancel();
                }
                Err(e) => warn!("Failed to listen for Ctrl-C: {}", e),
            }
            worker.await
        }
    };
    progress_handler.clear();

    let outcome = joined
        .map_err(|e| CliError::Other(anyhow::anyhow!("Load task failed: {}", e)))??;
    match outcome {
        TaskOutcome::Completed(result) => {
            let warnings = result.metadata.warnings().count();
            if warnings > 0 {
                warn!(
                    "{} record(s) could not be reconciled; rerun with -v or `info --diagnostics` for details.",
                    warnings
                );
            }
            Ok(result)
        }
        TaskOutcome::Cancelled => Err(CliError::Cancelled),
    }
}

#[cfg(test)]
pub(crate) mod fixtures {
    use pdbscope::core::io::pdb::PdbFile;
    use pdbscope::core::io::traits::{MolecularFile, ReadContext};
    use pdbscope::workflows::load::LoadResult;
    use std::io::Cursor;

    pub fn atom(serial: usize, name: &str, residue: (&str, &str, isize), xyz: [f64; 3], element: &str) -> String {
        let (res, chain, seq) = residue;
        format!(
            "ATOM  {:>5} {:<4} {:>3} {}{:>4}    {:>8.3}{:>8.3}{:>8.3}{:>6.2}{:>6.2}          {:>2}",
            serial, name, res, chain, seq, xyz[0], xyz[1], xyz[2], 1.0, 0.0, element
        )
    }

    /// Two chains: a helix-annotated dipeptide in `A` and a lone serine in `B`.
    pub fn sample_pdb() -> String {
        [
            "COMPND    MOL_ID: 1;".to_string(),
            "COMPND   2 MOLECULE: TEST PEPTIDE;".to_string(),
            "COMPND   3 CHAIN: A, B;".to_string(),
            "SEQRES   1 A    3  ALA GLY SER".to_string(),
            "SEQRES   1 B    1  SER".to_string(),
            "HELIX    1  H1 ALA A    1  SER A    3  1                                   3".to_string(),
            atom(1, "N", ("ALA", "A", 1), [0.0, 0.0, 0.0], "N"),
            atom(2, "CA", ("ALA", "A", 1), [1.5, 0.0, 0.0], "C"),
            atom(3, "C", ("ALA", "A", 1), [2.0, 1.4, 0.0], "C"),
            atom(4, "O", ("GLY", "A", 2), [3.2, 1.6, 0.0], "O"),
            atom(5, "N", ("SER", "B", 1), [8.0, 8.0, 8.0], "N"),
            atom(6, "OG", ("SER", "B", 1), [9.0, 8.0, 8.0], "O"),
        ]
        .join("\n")
    }

    pub fn sample_load() -> LoadResult {
        let text = sample_pdb();
        let (molecules, metadata) = PdbFile::read_from(&mut Cursor::new(text), &ReadContext::new())
            .unwrap()
            .completed()
            .unwrap();
        LoadResult {
            molecules,
            metadata,
        }
    }
}
