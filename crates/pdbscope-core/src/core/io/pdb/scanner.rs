use super::PdbError;
use crate::core::io::traits::ReadContext;
use std::io::{BufRead, Lines};

pub(super) enum ReadError {
    Fatal(PdbError),
    Cancelled,
}

impl From<PdbError> for ReadError {
    fn from(err: PdbError) -> Self {
        ReadError::Fatal(err)
    }
}

impl From<std::io::Error> for ReadError {
    fn from(err: std::io::Error) -> Self {
        ReadError::Fatal(PdbError::Io(err))
    }
}

/// A numbered line of input, 1-based.
pub(super) type NumberedLine = (usize, String);

/// Line reader with one line of look-ahead.
///
/// Every line handed out is preceded by a cancellation check, so a
/// cancelled read stops before it touches the next record.
pub(super) struct LineCursor<'c, R> {
    lines: Lines<R>,
    peeked: Option<NumberedLine>,
    line_no: usize,
    context: &'c ReadContext<'c>,
}

impl<'c, R: BufRead> LineCursor<'c, R> {
    pub(super) fn new(reader: R, context: &'c ReadContext<'c>) -> Self {
        Self {
            lines: reader.lines(),
            peeked: None,
            line_no: 0,
            context,
        }
    }

    fn fill(&mut self) -> Result<(), ReadError> {
        if self.peeked.is_some() {
            return Ok(());
        }
        if let Some(line) = self.lines.next() {
            self.line_no += 1;
            self.peeked = Some((self.line_no, line?));
        }
        Ok(())
    }

    pub(super) fn next_line(&mut self) -> Result<Option<NumberedLine>, ReadError> {
        if self.context.is_cancelled() {
            return Err(ReadError::Cancelled);
        }
        self.fill()?;
        Ok(self.peeked.take())
    }

    /// Returns the next line only if it satisfies `pred`, leaving it in place otherwise.
    pub(super) fn next_line_if(
        &mut self,
        pred: impl FnOnce(&str) -> bool,
    ) -> Result<Option<NumberedLine>, ReadError> {
        self.fill()?;
        match &self.peeked {
            Some((_, line)) if pred(line) => self.next_line(),
            _ => Ok(None),
        }
    }
}
