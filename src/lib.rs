//! Grid-based circuit diagram editor that learns from operator feedback
//!
//! The editor keeps a fixed square grid of placed components, fills it
//! randomly on request, checks layouts against structural circuit rules, and
//! persists the operator's last accept/reject verdict in a byte store so that
//! later generations steer away from rejected layouts.

#![forbid(unsafe_code)]

/// Generation, testing, feedback and correction
pub mod algorithm;
/// Input/output operations and error handling
pub mod io;
/// Component catalog, grid storage and coordinate validation
pub mod spatial;

pub use io::error::{CircuitError, Result};
