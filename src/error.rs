//! Error types for revolver
//!
//! Centralized error handling using thiserror.

use thiserror::Error;

/// All error types that can occur while post-processing G-code
#[derive(Debug, Error)]
pub enum RevolverError {
    /// Nozzle index outside the profile table
    #[error("Unknown nozzle: {0}")]
    UnknownNozzle(usize),

    /// Invalid configuration values
    #[error("Config error: {0}")]
    Config(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias for revolver operations
pub type Result<T> = std::result::Result<T, RevolverError>;
