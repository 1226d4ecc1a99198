/// Command-line parsing and the interactive command loop
pub mod cli;
/// Operator command decoding
pub mod command;
/// Editor constants and runtime configuration defaults
pub mod configuration;
/// Error types and context helpers
pub mod error;
/// Structured logging setup
pub mod logging;
/// Progress display for training runs
pub mod progress;
/// Text rendering of grid state
pub mod render;
/// Persistent byte store implementations
pub mod store;
