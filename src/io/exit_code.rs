//! Exit codes for CLI operations following Unix conventions.
//!
//! # Exit Code Semantics
//!
//! - `0`: Success - results printed (an empty index is still a success)
//! - `1`: General error - unspecified failure
//! - `3-125`: Specific recoverable errors
//! - `126-255`: Reserved by shell

use crate::vector::VectorError;

/// Standard exit codes for CLI operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum ExitCode {
    /// Operation succeeded (code 0)
    Success = 0,

    /// Unspecified error occurred (code 1)
    GeneralError = 1,

    /// No query was given, nothing to search for (code 3)
    EmptyQuery = 3,

    /// Input vectors or files were rejected (code 4)
    InvalidInput = 4,

    /// File I/O error (code 5)
    IoError = 5,

    /// Configuration error, including mismatched embedding dimensions (code 6)
    ConfigError = 6,
}

impl From<ExitCode> for i32 {
    fn from(code: ExitCode) -> i32 {
        code as i32
    }
}

impl ExitCode {
    /// Convert a `VectorError` to the appropriate exit code.
    ///
    /// Dimension problems almost always mean two different embedding
    /// configurations were mixed, so they map to `ConfigError`.
    pub fn from_error(error: &VectorError) -> Self {
        match error {
            VectorError::DimensionMismatch { .. } | VectorError::InvalidDimension { .. } => {
                ExitCode::ConfigError
            }
            VectorError::EmptyQuery => ExitCode::EmptyQuery,
            VectorError::InvalidVector { .. }
            | VectorError::InvalidScore { .. }
            | VectorError::DegenerateVector
            | VectorError::BatchLengthMismatch { .. } => ExitCode::InvalidInput,
            VectorError::PartialBatchFailure { source, .. } => match Self::from_error(source) {
                ExitCode::ConfigError => ExitCode::ConfigError,
                _ => ExitCode::InvalidInput,
            },
            VectorError::Io(_) => ExitCode::IoError,
            VectorError::EmbeddingFailed(_) => ExitCode::GeneralError,
        }
    }

    /// Get a human-readable description of the exit code.
    pub fn description(&self) -> &str {
        match self {
            ExitCode::Success => "Success",
            ExitCode::GeneralError => "General error",
            ExitCode::EmptyQuery => "Empty query",
            ExitCode::InvalidInput => "Invalid input",
            ExitCode::IoError => "I/O error",
            ExitCode::ConfigError => "Configuration error",
        }
    }
}
