use std::io::{self, Write};
use std::sync::atomic::{AtomicU32, Ordering};

/// A minimal transfer progress reporter that prints percentage updates to
/// stdout, at most once per whole percent.
pub struct ConsoleProgressReporter {
    label: String,
    total_bytes: Option<u64>,
    step_bytes: u64,
    last_percent: AtomicU32,
}

impl ConsoleProgressReporter {
    pub fn new(label: impl Into<String>, total_bytes: Option<u64>, step_bytes: u64) -> Self {
        Self {
            label: label.into(),
            total_bytes,
            step_bytes: step_bytes.max(1),
            last_percent: AtomicU32::new(0),
        }
    }

    /// Print progress if a reporting threshold has been reached.
    pub fn maybe_report(&self, processed_bytes: u64) {
        let Some(total) = self.total_bytes else {
            return;
        };
        if total == 0 || !processed_bytes.is_multiple_of(self.step_bytes) {
            return;
        }
        let percent = ((processed_bytes as f64 / total as f64) * 100.0) as u32;
        if self.last_percent.swap(percent, Ordering::Relaxed) == percent {
            return;
        }
        print!("\r {}: {percent}%", self.label);
        let _ = io::stdout().flush();
    }
}
