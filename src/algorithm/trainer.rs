//! Unattended generate/test/correct rounds that feed verdicts back into the
//! feedback store

use tracing::info;

use crate::{
    algorithm::{editor::Editor, feedback::Verdict},
    io::{error::Result, progress::TrainingProgress, store::PersistentByteStore},
};

/// How each training round obtains its starting layout
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum TrainingStart {
    /// Start from a random diagram
    #[default]
    Generated,
    /// Start from an empty grid and let corrections build the circuit
    Blank,
}

/// Totals accumulated over a training run
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct TrainingSummary {
    /// Rounds completed
    pub rounds: usize,
    /// Rounds whose final layout passed the tester
    pub passed: usize,
    /// Corrections applied across all rounds
    pub corrections: usize,
}

/// Drives an editor through repeated training rounds
#[derive(Clone, Copy, Debug)]
pub struct Trainer {
    rounds: usize,
    max_corrections: usize,
    start: TrainingStart,
}

impl Trainer {
    /// Create a trainer running `rounds` rounds of at most
    /// `max_corrections` corrections each
    pub const fn new(rounds: usize, max_corrections: usize, start: TrainingStart) -> Self {
        Self {
            rounds,
            max_corrections,
            start,
        }
    }

    /// Run every round
    ///
    /// A round corrects its layout until it passes or the correction budget
    /// runs out, then records an accepted verdict on pass and a rejected one
    /// otherwise. The rejection's own correction is counted too.
    ///
    /// # Errors
    ///
    /// Propagates feedback store write errors
    pub fn run<S: PersistentByteStore>(
        &self,
        editor: &mut Editor<S>,
        progress: &TrainingProgress,
    ) -> Result<TrainingSummary> {
        let mut summary = TrainingSummary::default();

        for _ in 0..self.rounds {
            match self.start {
                TrainingStart::Generated => editor.generate(),
                TrainingStart::Blank => editor.initialize(),
            }

            let mut report = editor.test();
            let mut applied = 0;
            while !report.passed() && applied < self.max_corrections {
                editor.correct();
                applied += 1;
                report = editor.test();
            }

            let verdict = Verdict::from_positive(report.passed());
            if editor.record_feedback(verdict)?.is_some() {
                applied += 1;
            }

            summary.rounds += 1;
            summary.corrections += applied;
            if report.passed() {
                summary.passed += 1;
            }
            progress.advance(&summary);
        }

        progress.finish(&summary);
        info!(
            rounds = summary.rounds,
            passed = summary.passed,
            corrections = summary.corrections,
            "training finished"
        );

        Ok(summary)
    }
}
