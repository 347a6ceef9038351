//! Progress display for the load and correlate phases

use crate::io::configuration::PROGRESS_BAR_WIDTH;
use indicatif::{ProgressBar, ProgressStyle};
use std::sync::LazyLock;

static PHASE_STYLE: LazyLock<ProgressStyle> = LazyLock::new(|| {
    ProgressStyle::default_bar()
        .template(&format!(
            "{{msg}} [{{bar:{PROGRESS_BAR_WIDTH}.cyan/blue}}] {{pos}}/{{len}}"
        ))
        .unwrap_or_else(|_| ProgressStyle::default_bar())
        .progress_chars("█▉▊▋▌▍▎▏ ")
});

/// Coordinates progress display for one run
///
/// A run has two counted phases (loading maps, correlating pairs); each
/// phase replaces the previous bar. Ticking is thread-safe, so the
/// parallel coordinator can report completions from worker threads.
pub struct ProgressManager {
    bar: Option<ProgressBar>,
}

impl Default for ProgressManager {
    fn default() -> Self {
        Self::new()
    }
}

impl ProgressManager {
    /// Create a progress manager with no active phase
    pub const fn new() -> Self {
        Self { bar: None }
    }

    /// Start a counted phase, replacing any previous bar
    pub fn start_phase(&mut self, label: &str, len: usize) {
        self.finish();
        let bar = ProgressBar::new(len as u64);
        bar.set_style(PHASE_STYLE.clone());
        bar.set_message(label.to_string());
        self.bar = Some(bar);
    }

    /// Advance the active phase by one completed item
    pub fn tick(&self) {
        if let Some(ref bar) = self.bar {
            bar.inc(1);
        }
    }

    /// Finish and clear the active phase
    pub fn finish(&mut self) {
        if let Some(bar) = self.bar.take() {
            bar.finish_and_clear();
        }
    }
}
