use std::cell::Cell;

#[derive(Debug, Clone, PartialEq)]
pub enum Progress {
    PhaseStart { name: &'static str },
    PhaseFinish,

    /// Overall completion in percent, always within `[0, 100]` and never decreasing.
    Percent(f64),

    Message(String),
}

pub type ProgressCallback<'a> = Box<dyn Fn(Progress) + Send + Sync + 'a>;

/// Forwards progress events to an optional callback.
///
/// Percentages are clamped to `[0, 100]` and filtered against the highest
/// value reported so far, so observers only ever see a non-decreasing series.
#[derive(Default)]
pub struct ProgressReporter<'a> {
    callback: Option<ProgressCallback<'a>>,
    high_water: Cell<f64>,
}

impl<'a> ProgressReporter<'a> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_callback(callback: ProgressCallback<'a>) -> Self {
        Self {
            callback: Some(callback),
            high_water: Cell::new(0.0),
        }
    }

    #[inline]
    pub fn report(&self, event: Progress) {
        match event {
            Progress::Percent(value) => self.report_percent(value),
            other => self.emit(other),
        }
    }

    /// Reports a completion percentage; values at or below the last one are dropped.
    pub fn report_percent(&self, value: f64) {
        if value.is_nan() {
            return;
        }
        let value = value.clamp(0.0, 100.0);
        if value <= self.high_water.get() {
            return;
        }
        self.high_water.set(value);
        self.emit(Progress::Percent(value));
    }

    /// The highest percentage reported so far.
    pub fn percent(&self) -> f64 {
        self.high_water.get()
    }

    #[inline]
    fn emit(&self, event: Progress) {
        if let Some(cb) = &self.callback {
            cb(event);
        }
    }
}

impl std::fmt::Debug for ProgressReporter<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProgressReporter")
            .field("has_callback", &self.callback.is_some())
            .field("high_water", &self.high_water.get())
            .finish()
    }
}
