use crate::core::models::molecules::Molecules;
use crate::engine::cancel::{CancellationToken, TaskOutcome};
use crate::engine::progress::{Progress, ProgressReporter};
use std::error::Error;
use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::Path;

/// Runtime hooks and options for a single read.
///
/// The default context reports nothing, can not be cancelled and skips
/// `HETATM` records.
#[derive(Debug, Clone, Copy, Default)]
pub struct ReadContext<'a> {
    reporter: Option<&'a ProgressReporter<'a>>,
    cancellation: Option<&'a CancellationToken>,
    include_hetero_atoms: bool,
    fallback_name: Option<&'a str>,
}

impl<'a> ReadContext<'a> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_reporter(mut self, reporter: &'a ProgressReporter<'a>) -> Self {
        self.reporter = Some(reporter);
        self
    }

    pub fn with_cancellation(mut self, token: &'a CancellationToken) -> Self {
        self.cancellation = Some(token);
        self
    }

    pub fn include_hetero_atoms(mut self, include: bool) -> Self {
        self.include_hetero_atoms = include;
        self
    }

    /// Name given to the model when the file declares none.
    pub fn with_fallback_name(mut self, name: &'a str) -> Self {
        self.fallback_name = Some(name);
        self
    }

    pub fn hetero_atoms_included(&self) -> bool {
        self.include_hetero_atoms
    }

    pub fn fallback_name(&self) -> Option<&'a str> {
        self.fallback_name
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancellation.is_some_and(CancellationToken::is_cancelled)
    }

    #[inline]
    pub fn report(&self, event: Progress) {
        if let Some(reporter) = self.reporter {
            reporter.report(event);
        }
    }
}

/// Defines the interface for reading molecular file formats.
///
/// Readers produce a complete [`Molecules`] model or nothing: a cancelled read
/// yields [`TaskOutcome::Cancelled`], a malformed file an error.
pub trait MolecularFile {
    /// The type of metadata associated with the file format.
    type Metadata;

    /// The error type for I/O operations.
    type Error: Error + From<io::Error>;

    /// Reads a model from a buffered reader.
    ///
    /// # Arguments
    ///
    /// * `reader` - The buffered reader to read from.
    /// * `context` - Progress, cancellation and record-selection options.
    ///
    /// # Return
    ///
    /// Returns the parsed model and associated metadata, or
    /// [`TaskOutcome::Cancelled`] if the context was cancelled mid-read.
    ///
    /// # Errors
    ///
    /// Returns an error if parsing fails or I/O operations encounter issues.
    fn read_from(
        reader: &mut impl BufRead,
        context: &ReadContext<'_>,
    ) -> Result<TaskOutcome<(Molecules, Self::Metadata)>, Self::Error>;

    /// Reads a model from a file path.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be opened or parsing fails.
    fn read_from_path<P: AsRef<Path>>(
        path: P,
        context: &ReadContext<'_>,
    ) -> Result<TaskOutcome<(Molecules, Self::Metadata)>, Self::Error> {
        let file = File::open(path)?;
        let mut reader = BufReader::new(file);
        Self::read_from(&mut reader, context)
    }
}
