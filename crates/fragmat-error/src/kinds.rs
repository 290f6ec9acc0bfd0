//! Error kind enums for the different fragmat domains
//!
//! These categorize errors within each domain for programmatic handling. The
//! kind name doubles as the fault category surfaced in diagnostic output.

use thiserror::Error;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Specific kinds of binary decoding errors
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum DecodeErrorKind {
    #[error("Missing or invalid root table")]
    MissingRoot,
    #[error("Invalid vtable")]
    InvalidVTable,
    #[error("Invalid offset")]
    InvalidOffset,
    #[error("Truncated buffer")]
    Truncated,
    #[error("Invalid enum tag")]
    InvalidEnum,
    #[error("Index out of range")]
    OutOfRange,
}

impl DecodeErrorKind {
    /// Stable identifier for this kind
    pub fn name(self) -> &'static str {
        match self {
            Self::MissingRoot => "MissingRoot",
            Self::InvalidVTable => "InvalidVTable",
            Self::InvalidOffset => "InvalidOffset",
            Self::Truncated => "Truncated",
            Self::InvalidEnum => "InvalidEnum",
            Self::OutOfRange => "OutOfRange",
        }
    }
}

/// Specific kinds of CLI errors
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum CliErrorKind {
    #[error("Invalid command arguments")]
    InvalidArguments,
    #[error("Output formatting failed")]
    OutputFormatError,
}

/// Specific kinds of configuration errors
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum ConfigErrorKind {
    #[error("Invalid configuration value")]
    InvalidValue,
}
