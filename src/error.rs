//! Error handling for plotwire
//!
//! This module defines the crate's error types and a Result alias.
//! Decode failures are fatal for a single message only: the caller is
//! expected to log them, drop the message and continue with the next one.
//! Key-resolution misses and unsupported leaf types are policy outcomes,
//! not errors, and never surface here.

use crate::decode::MessageFormat;
use thiserror::Error;

/// A message could not be turned into a canonical value tree.
#[derive(Error, Debug)]
pub enum DecodeError {
    /// The byte buffer is not valid for the selected format (malformed or
    /// truncated input).
    #[error("{format} decode failed: {reason}")]
    Malformed {
        format: MessageFormat,
        reason: String,
    },

    /// The bytes decoded, but the top-level shape can never produce a sample
    /// (e.g. a bare `null` document).
    #[error("{format} message has an unsupported top-level shape")]
    UnsupportedRoot { format: MessageFormat },
}

impl DecodeError {
    pub(crate) fn malformed(format: MessageFormat, err: impl std::fmt::Display) -> Self {
        DecodeError::Malformed {
            format,
            reason: err.to_string(),
        }
    }

    /// The format the failing message was decoded with.
    pub fn format(&self) -> MessageFormat {
        match self {
            DecodeError::Malformed { format, .. } => *format,
            DecodeError::UnsupportedRoot { format } => *format,
        }
    }
}

/// Main error type for plotwire operations
#[derive(Error, Debug)]
pub enum PlotWireError {
    /// A message failed to decode
    #[error("Decode error: {0}")]
    Decode(#[from] DecodeError),

    /// Errors related to configuration loading/saving
    #[error("Configuration error: {0}")]
    Config(String),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias for plotwire operations
pub type Result<T> = std::result::Result<T, PlotWireError>;
