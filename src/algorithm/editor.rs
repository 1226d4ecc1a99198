//! Operator-facing state machine tying the grid, tester and feedback loop
//! together
//!
//! ```text
//! EMPTY -> (place/remove)* -> TESTED -> FEEDBACK -> (rejected) CORRECTED -> TESTED -> ...
//! ```

use std::fmt;

use tracing::{debug, info};

use crate::{
    algorithm::{
        correction::{CorrectionEngine, CorrectionResult},
        feedback::{FeedbackStore, Verdict},
        generator::DiagramGenerator,
        tester::{CircuitTester, TestReport},
    },
    io::{configuration::EditorConfig, error::Result, store::PersistentByteStore},
    spatial::{Catalog, ComponentType, GridStore},
};

/// Where the editor is in the edit/test/feedback cycle
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EditorState {
    /// Grid freshly initialized
    Empty,
    /// Grid changed since the last test
    Editing,
    /// Grid tested and unchanged since
    Tested {
        /// Whether the test passed
        passed: bool,
    },
    /// Verdict recorded for the current grid
    Feedback {
        /// Recorded verdict
        verdict: Verdict,
    },
    /// Grid changed by the correction engine
    Corrected,
}

impl fmt::Display for EditorState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => f.write_str("empty"),
            Self::Editing => f.write_str("editing"),
            Self::Tested { passed: true } => f.write_str("tested (pass)"),
            Self::Tested { passed: false } => f.write_str("tested (fail)"),
            Self::Feedback { verdict } => write!(f, "feedback ({verdict})"),
            Self::Corrected => f.write_str("corrected"),
        }
    }
}

/// Owns all editor state for one operator session
#[derive(Debug)]
pub struct Editor<S> {
    grid: GridStore,
    catalog: Catalog,
    generator: DiagramGenerator,
    tester: CircuitTester,
    correction: CorrectionEngine,
    feedback: FeedbackStore<S>,
    state: EditorState,
}

impl<S: PersistentByteStore> Editor<S> {
    /// Build an editor with an empty grid
    ///
    /// # Errors
    ///
    /// Returns `InvalidParameter` for an invalid configuration or
    /// `StoreAccess` when the feedback address does not fit in `store`
    pub fn new(config: &EditorConfig, store: S) -> Result<Self> {
        config.validate()?;

        Ok(Self {
            grid: GridStore::new(config.grid_size)?,
            catalog: Catalog::new(),
            generator: DiagramGenerator::new(config.seed),
            tester: CircuitTester::new(config.policy),
            correction: CorrectionEngine::new(
                config.seed.wrapping_add(1),
                config.max_correction_edits,
            ),
            feedback: FeedbackStore::new(store, config.feedback_address)?,
            state: EditorState::Empty,
        })
    }

    /// Clear the grid
    pub fn initialize(&mut self) {
        self.grid.initialize();
        self.state = EditorState::Empty;
    }

    /// Place a component named by operator input
    ///
    /// # Errors
    ///
    /// Returns `UnknownComponent` or `CoordinateOutOfRange`; the grid is
    /// unchanged on error
    pub fn place(&mut self, row: i64, col: i64, kind: &str) -> Result<ComponentType> {
        let kind = self.catalog.resolve(kind)?;
        self.place_kind(row, col, kind)
    }

    /// Place a component, returning the previous occupant
    ///
    /// # Errors
    ///
    /// Returns `CoordinateOutOfRange`; the grid is unchanged on error
    pub fn place_kind(&mut self, row: i64, col: i64, kind: ComponentType) -> Result<ComponentType> {
        let previous = self.grid.place(row, col, kind)?;
        self.mark_edited();
        Ok(previous)
    }

    /// Clear one cell, returning what it held
    ///
    /// # Errors
    ///
    /// Returns `CoordinateOutOfRange`; the grid is unchanged on error
    pub fn remove(&mut self, row: i64, col: i64) -> Result<ComponentType> {
        let previous = self.grid.remove(row, col)?;
        self.mark_edited();
        Ok(previous)
    }

    /// Fill the grid randomly, steering away from a rejected layout while the
    /// last persisted verdict is negative
    pub fn generate(&mut self) {
        let bias = if self.feedback.get_last_feedback() {
            None
        } else {
            self.correction.rejected_layout()
        };
        self.generator.generate_random_diagram(&mut self.grid, bias);
        self.state = EditorState::Editing;
    }

    /// Evaluate the grid against the tester's rules
    pub fn test(&mut self) -> TestReport {
        let report = self.tester.evaluate(&self.grid);
        self.state = EditorState::Tested {
            passed: report.passed(),
        };
        info!(
            passed = report.passed(),
            violations = report.violations.len(),
            "circuit tested"
        );
        report
    }

    /// Persist the operator's verdict
    ///
    /// A rejection records the current layout and immediately applies a
    /// correction, whose result is returned.
    ///
    /// # Errors
    ///
    /// Propagates the byte store's write error; nothing else changes then
    pub fn record_feedback(&mut self, verdict: Verdict) -> Result<Option<CorrectionResult>> {
        self.feedback.save_feedback(verdict.is_positive())?;
        self.state = EditorState::Feedback { verdict };

        match verdict {
            Verdict::Accepted => {
                self.correction.accept();
                Ok(None)
            }
            Verdict::Rejected => {
                self.correction.remember_rejection(&self.grid);
                Ok(Some(self.correct()))
            }
        }
    }

    /// Apply one correction to the current grid
    pub fn correct(&mut self) -> CorrectionResult {
        let result = self
            .correction
            .generate_correction(&mut self.grid, &self.tester);
        self.state = EditorState::Corrected;
        result
    }

    /// Last persisted verdict, `false` when none was saved
    pub fn last_feedback(&self) -> bool {
        self.feedback.get_last_feedback()
    }

    /// Current cycle state
    pub const fn state(&self) -> EditorState {
        self.state
    }

    /// Read-only view of the grid
    pub const fn grid(&self) -> &GridStore {
        &self.grid
    }

    /// Component catalog
    pub const fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// Circuit tester in use
    pub const fn tester(&self) -> &CircuitTester {
        &self.tester
    }

    /// Correction engine and its rejection memory
    pub const fn correction(&self) -> &CorrectionEngine {
        &self.correction
    }

    /// Feedback persistence
    pub const fn feedback(&self) -> &FeedbackStore<S> {
        &self.feedback
    }

    /// Release the byte store, e.g. to simulate a restart
    pub fn into_store(self) -> S {
        self.feedback.into_store()
    }

    fn mark_edited(&mut self) {
        self.state = if self.grid.is_blank() {
            EditorState::Empty
        } else {
            EditorState::Editing
        };
        debug!(state = %self.state, "grid edited");
    }
}
