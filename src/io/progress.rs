//! Progress display for unattended training runs

use std::sync::LazyLock;

use indicatif::{ProgressBar, ProgressStyle};

use crate::algorithm::trainer::TrainingSummary;
use crate::io::configuration::PROGRESS_BAR_WIDTH;

static TRAINING_STYLE: LazyLock<ProgressStyle> = LazyLock::new(|| {
    let template = format!(
        "[{{elapsed_precise}}] Rounds: [{{bar:{PROGRESS_BAR_WIDTH}.cyan/blue}}] {{pos}}/{{len}} {{msg}}"
    );
    ProgressStyle::default_bar()
        .template(&template)
        .unwrap_or_else(|_| ProgressStyle::default_bar())
        .progress_chars("█▉▊▋▌▍▎▏ ")
});

/// Progress bar tracking completed training rounds
pub struct TrainingProgress {
    bar: ProgressBar,
}

impl TrainingProgress {
    /// Create a visible progress bar for `rounds` rounds
    pub fn new(rounds: usize) -> Self {
        let bar = ProgressBar::new(rounds as u64);
        bar.set_style(TRAINING_STYLE.clone());
        Self { bar }
    }

    /// Create a progress tracker that draws nothing
    pub fn hidden(rounds: usize) -> Self {
        let bar = ProgressBar::hidden();
        bar.set_length(rounds as u64);
        Self { bar }
    }

    /// Record a finished round
    pub fn advance(&self, summary: &TrainingSummary) {
        self.bar.set_position(summary.rounds as u64);
        self.bar.set_message(format!(
            "passed {}/{} corrections {}",
            summary.passed, summary.rounds, summary.corrections
        ));
    }

    /// Rounds recorded so far
    pub fn position(&self) -> u64 {
        self.bar.position()
    }

    /// Close the bar, leaving the final summary on screen
    pub fn finish(&self, summary: &TrainingSummary) {
        self.bar.finish_with_message(format!(
            "passed {}/{} corrections {}",
            summary.passed, summary.rounds, summary.corrections
        ));
    }
}
