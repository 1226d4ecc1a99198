//! Editor constants and runtime configuration defaults

use std::time::Duration;

use crate::algorithm::tester::TestPolicy;
use crate::io::error::{Result, invalid_parameter};

/// Side length of the square component grid
pub const GRID_SIZE: usize = 32;

// Keeps a mistyped --grid-size from allocating an enormous grid
/// Maximum allowed grid side length
pub const MAX_GRID_SIZE: usize = 256;

/// Byte address of the persisted feedback record
pub const EEPROM_ADDRESS: usize = 0;

/// Size of the persistent byte store in bytes
pub const STORE_CAPACITY: usize = 1024;

/// Value held by every byte of a freshly erased store
pub const ERASED_BYTE: u8 = 0xFF;

/// Settling delay after each persisted byte, in milliseconds
pub const DEFAULT_SETTLE_MS: u64 = 4;

/// Fixed seed for reproducible generation
pub const DEFAULT_SEED: u64 = 42;

// Generator bias
/// Relative weight of the kind a rejected layout held at a cell
pub const REJECTED_KIND_WEIGHT: f64 = 0.2;

// Correction engine limits
/// Maximum number of cells a single correction may change
pub const MAX_CORRECTION_EDITS: usize = 4;
/// Initial perturbation radius for a correction of a passing layout
pub const BASE_CORRECTION_RADIUS: usize = 1;
// Bounds the perturbation so a correction stays a visible local fix
/// Largest perturbation radius reached after repeated rejections
pub const MAX_CORRECTION_RADIUS: usize = 3;

// Training defaults
/// Default number of unattended training rounds
pub const DEFAULT_TRAINING_ROUNDS: usize = 100;
/// Default number of corrections attempted per training round
pub const DEFAULT_MAX_CORRECTIONS: usize = 64;
/// Width of the training progress bar in characters
pub const PROGRESS_BAR_WIDTH: u16 = 40;

/// Default path of the file-backed byte store
pub const DEFAULT_STORE_FILE: &str = "circuit-trainer.eeprom";

/// Validated settings used to build an editor
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EditorConfig {
    /// Side length of the grid
    pub grid_size: usize,
    /// Seed shared by the generator and the correction engine
    pub seed: u64,
    /// Byte address of the feedback record
    pub feedback_address: usize,
    /// Maximum cells changed by one correction
    pub max_correction_edits: usize,
    /// Structural rules applied by the circuit tester
    pub policy: TestPolicy,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            grid_size: GRID_SIZE,
            seed: DEFAULT_SEED,
            feedback_address: EEPROM_ADDRESS,
            max_correction_edits: MAX_CORRECTION_EDITS,
            policy: TestPolicy::default(),
        }
    }
}

impl EditorConfig {
    /// Check parameter ranges before any state is allocated
    ///
    /// # Errors
    ///
    /// Returns `InvalidParameter` for a grid size outside `1..=MAX_GRID_SIZE`
    /// or a zero edit budget
    pub fn validate(&self) -> Result<()> {
        if self.grid_size == 0 || self.grid_size > MAX_GRID_SIZE {
            return Err(invalid_parameter(
                "grid_size",
                &self.grid_size,
                &format!("must be between 1 and {MAX_GRID_SIZE}"),
            ));
        }
        if self.max_correction_edits == 0 {
            return Err(invalid_parameter(
                "max_correction_edits",
                &self.max_correction_edits,
                &"must be at least 1",
            ));
        }
        Ok(())
    }
}

/// Convert a millisecond setting into a settle delay
pub const fn settle_delay(millis: u64) -> Duration {
    Duration::from_millis(millis)
}
