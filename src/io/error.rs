//! Error types and context management for editor operations

use std::fmt;
use std::path::PathBuf;

/// Main error type for all editor operations
#[derive(Debug)]
pub enum CircuitError {
    /// Row or column lies outside the grid
    CoordinateOutOfRange {
        /// Requested row
        row: i64,
        /// Requested column
        col: i64,
        /// Side length of the grid that rejected the access
        size: usize,
    },

    /// Requested component is not in the catalog
    UnknownComponent {
        /// Name or code as supplied by the caller
        name: String,
    },

    /// Operator input did not match any command
    UnrecognizedCommand {
        /// First token of the offending line
        command: String,
    },

    /// A command argument could not be interpreted
    InvalidArgument {
        /// Command being parsed
        command: &'static str,
        /// Name of the argument
        argument: &'static str,
        /// Why the value was rejected
        reason: String,
    },

    /// A required command argument was not supplied
    MissingArgument {
        /// Command being parsed
        command: &'static str,
        /// Name of the missing argument
        argument: &'static str,
    },

    /// Byte store access past the end of the device
    StoreAccess {
        /// First byte address of the access
        address: usize,
        /// Number of bytes requested
        length: usize,
        /// Total bytes available in the store
        capacity: usize,
    },

    /// Configuration parameter validation failed
    InvalidParameter {
        /// Name of the invalid parameter
        parameter: &'static str,
        /// Provided value that failed validation
        value: String,
        /// Explanation of why the value is invalid
        reason: String,
    },

    /// General file system operation failure
    FileSystem {
        /// Path involved in the operation
        path: PathBuf,
        /// Description of the operation that failed
        operation: &'static str,
        /// Underlying I/O error
        source: std::io::Error,
    },
}

impl fmt::Display for CircuitError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::CoordinateOutOfRange { row, col, size } => {
                write!(
                    f,
                    "Coordinate ({row}, {col}) is out of range (grid is {size}x{size})"
                )
            }
            Self::UnknownComponent { name } => {
                write!(f, "Unknown component kind '{name}'")
            }
            Self::UnrecognizedCommand { command } => {
                write!(f, "Unrecognized command '{command}' (type 'help' for a list)")
            }
            Self::InvalidArgument {
                command,
                argument,
                reason,
            } => {
                write!(f, "Invalid {argument} for '{command}': {reason}")
            }
            Self::MissingArgument { command, argument } => {
                write!(f, "Missing {argument} for '{command}'")
            }
            Self::StoreAccess {
                address,
                length,
                capacity,
            } => {
                write!(
                    f,
                    "Store access of {length} byte(s) at address {address} exceeds capacity {capacity}"
                )
            }
            Self::InvalidParameter {
                parameter,
                value,
                reason,
            } => {
                write!(f, "Invalid parameter '{parameter}' = '{value}': {reason}")
            }
            Self::FileSystem {
                path,
                operation,
                source,
            } => {
                write!(
                    f,
                    "File system error during {operation} on '{}': {source}",
                    path.display()
                )
            }
        }
    }
}

impl std::error::Error for CircuitError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::FileSystem { source, .. } => Some(source),
            _ => None,
        }
    }
}

/// Convenience type alias for editor results
pub type Result<T> = std::result::Result<T, CircuitError>;

impl CircuitError {
    /// Whether the operator can correct this error by retyping the command
    ///
    /// Store and file system failures are reported the same way but point at
    /// the environment rather than the input.
    pub const fn is_input_error(&self) -> bool {
        matches!(
            self,
            Self::CoordinateOutOfRange { .. }
                | Self::UnknownComponent { .. }
                | Self::UnrecognizedCommand { .. }
                | Self::InvalidArgument { .. }
                | Self::MissingArgument { .. }
        )
    }
}

/// Enriches I/O failures with the path and operation involved
pub trait WithPath<T> {
    /// Attach a path and operation to an I/O error
    ///
    /// # Errors
    ///
    /// Propagates the original error wrapped as `CircuitError::FileSystem`
    fn with_path(self, path: impl Into<PathBuf>, operation: &'static str) -> Result<T>;
}

impl<T> WithPath<T> for std::result::Result<T, std::io::Error> {
    fn with_path(self, path: impl Into<PathBuf>, operation: &'static str) -> Result<T> {
        self.map_err(|source| CircuitError::FileSystem {
            path: path.into(),
            operation,
            source,
        })
    }
}

impl From<std::io::Error> for CircuitError {
    fn from(err: std::io::Error) -> Self {
        Self::FileSystem {
            path: PathBuf::from("<unknown>"),
            operation: "unknown",
            source: err,
        }
    }
}

/// Create an invalid parameter error
pub fn invalid_parameter(
    parameter: &'static str,
    value: &impl ToString,
    reason: &impl ToString,
) -> CircuitError {
    CircuitError::InvalidParameter {
        parameter,
        value: value.to_string(),
        reason: reason.to_string(),
    }
}

/// Create an invalid argument error for command parsing
pub fn invalid_argument(
    command: &'static str,
    argument: &'static str,
    reason: &impl ToString,
) -> CircuitError {
    CircuitError::InvalidArgument {
        command,
        argument,
        reason: reason.to_string(),
    }
}
