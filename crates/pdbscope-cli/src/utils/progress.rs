use indicatif::{ProgressBar, ProgressDrawTarget, ProgressStyle};
use pdbscope::engine::progress::{Progress, ProgressCallback};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tracing::warn;

const TICK_MS: u64 = 80;
const BAR_LENGTH: u64 = 100;

/// Renders core [`Progress`] events as a single percentage bar on stderr.
#[derive(Clone)]
pub struct CliProgressHandler {
    pb: Arc<Mutex<ProgressBar>>,
    percent: Arc<AtomicU64>,
}

impl CliProgressHandler {
    pub fn new() -> Self {
        let pb = ProgressBar::new(BAR_LENGTH)
            .with_style(Self::bar_style())
            .with_message("Initializing...");
        pb.set_draw_target(ProgressDrawTarget::stderr());
        pb.finish_and_clear();

        Self {
            pb: Arc::new(Mutex::new(pb)),
            percent: Arc::new(AtomicU64::new(0)),
        }
    }

    pub fn get_callback(&self) -> ProgressCallback<'static> {
        let pb_clone = Arc::clone(&self.pb);
        let percent_clone = Arc::clone(&self.percent);

        Box::new(move |progress: Progress| {
            let Ok(pb_guard) = pb_clone.lock() else {
                warn!("Progress bar mutex was poisoned. Cannot update progress.");
                return;
            };

            match progress {
                Progress::PhaseStart { name } => {
                    // Percentages are global across phases; a new phase resumes where the last one stopped.
                    pb_guard.reset();
                    pb_guard.set_length(BAR_LENGTH);
                    pb_guard.set_position(percent_clone.load(Ordering::Relaxed));
                    pb_guard.enable_steady_tick(Duration::from_millis(TICK_MS));
                    pb_guard.set_message(name);
                }
                Progress::PhaseFinish => {
                    pb_guard.disable_steady_tick();
                    pb_guard.abandon_with_message("✓ Done");
                }
                Progress::Percent(percent) => {
                    let position = percent.round() as u64;
                    percent_clone.store(position, Ordering::Relaxed);
                    pb_guard.set_position(position);
                }
                Progress::Message(msg) => {
                    if !pb_guard.is_finished() {
                        pb_guard.println(format!("  {}", msg));
                    } else {
                        pb_guard.set_message(msg);
                    }
                }
            }
        })
    }

    /// Clears the bar from the terminal before results are printed.
    pub fn clear(&self) {
        if let Ok(pb_guard) = self.pb.lock() {
            pb_guard.finish_and_clear();
        }
    }

    fn bar_style() -> ProgressStyle {
        ProgressStyle::with_template("{spinner:.green} {msg:<12} [{bar:40.cyan/blue}] {pos:>3}%")
            .unwrap_or_else(|_| ProgressStyle::default_bar())
            .progress_chars("##-")
    }
}

impl Default for CliProgressHandler {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread;

    #[test]
    fn handler_initializes_in_a_clean_state() {
        let handler = CliProgressHandler::new();
        let pb = handler.pb.lock().unwrap();
        assert_eq!(pb.length(), Some(BAR_LENGTH));
        assert!(pb.is_finished());
        assert_eq!(handler.percent.load(Ordering::Relaxed), 0);
    }

    #[test]
    fn callback_tracks_percent_across_phases() {
        let handler = CliProgressHandler::new();
        let callback = handler.get_callback();

        callback(Progress::PhaseStart { name: "Parsing" });
        {
            let pb = handler.pb.lock().unwrap();
            assert_eq!(pb.message(), "Parsing");
            assert_eq!(pb.position(), 0);
            assert!(!pb.is_finished());
        }

        callback(Progress::Percent(49.6));
        assert_eq!(handler.pb.lock().unwrap().position(), 50);

        callback(Progress::PhaseFinish);
        {
            let pb = handler.pb.lock().unwrap();
            assert!(pb.is_finished());
            assert_eq!(pb.message(), "✓ Done");
        }

        callback(Progress::PhaseStart { name: "Centering" });
        {
            let pb = handler.pb.lock().unwrap();
            assert_eq!(pb.message(), "Centering");
            assert_eq!(pb.position(), 50);
        }

        callback(Progress::Percent(100.0));
        assert_eq!(handler.pb.lock().unwrap().position(), 100);
    }

    #[test]
    fn message_after_finish_replaces_the_bar_message() {
        let handler = CliProgressHandler::new();
        let callback = handler.get_callback();
        callback(Progress::Message("3 warnings".to_string()));
        assert_eq!(handler.pb.lock().unwrap().message(), "3 warnings");
    }

    #[test]
    fn callback_is_thread_safe() {
        let handler = CliProgressHandler::new();
        let callback = handler.get_callback();

        thread::spawn(move || {
            callback(Progress::PhaseStart { name: "Thread Test" });
            callback(Progress::Percent(30.0));
            callback(Progress::PhaseFinish);
        })
        .join()
        .unwrap();

        let pb = handler.pb.lock().unwrap();
        assert!(pb.is_finished());
        assert_eq!(pb.position(), 30);
        assert_eq!(pb.message(), "✓ Done");
    }
}
