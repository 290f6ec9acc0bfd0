//! Helper functions for creating standardized errors

use crate::kinds::*;
use crate::types::FragError;

impl FragError {
    /// Create a new decode error
    pub fn decode<M: Into<String>>(message: M, kind: DecodeErrorKind) -> Self {
        Self::Decode {
            message: message.into(),
            file_path: None,
            offset: None,
            index: None,
            kind,
        }
    }

    /// Create a new decode error anchored at a byte offset
    pub fn decode_at<M: Into<String>>(message: M, kind: DecodeErrorKind, offset: usize) -> Self {
        Self::Decode {
            message: message.into(),
            file_path: None,
            offset: Some(offset),
            index: None,
            kind,
        }
    }

    /// Create a new CLI error
    pub fn cli<M: Into<String>>(message: M, kind: CliErrorKind) -> Self {
        Self::Cli {
            message: message.into(),
            command: None,
            kind,
        }
    }

    /// Create a new config error
    pub fn config<M: Into<String>>(message: M, kind: ConfigErrorKind) -> Self {
        Self::Config {
            message: message.into(),
            kind,
        }
    }

    // === Decode Domain Helpers ===

    pub fn decode_missing_root<M: Into<String>>(message: M) -> Self {
        Self::decode(message, DecodeErrorKind::MissingRoot)
    }

    pub fn decode_invalid_vtable<M: Into<String>>(message: M) -> Self {
        Self::decode(message, DecodeErrorKind::InvalidVTable)
    }

    pub fn decode_invalid_offset<M: Into<String>>(message: M) -> Self {
        Self::decode(message, DecodeErrorKind::InvalidOffset)
    }

    pub fn decode_invalid_enum<M: Into<String>>(message: M) -> Self {
        Self::decode(message, DecodeErrorKind::InvalidEnum)
    }

    pub fn decode_out_of_range<M: Into<String>>(message: M) -> Self {
        Self::decode(message, DecodeErrorKind::OutOfRange)
    }

    // === CLI Domain Helpers ===

    /// Create a CLI error for invalid arguments
    pub fn cli_invalid_arguments<M: Into<String>>(message: M) -> Self {
        Self::cli(message, CliErrorKind::InvalidArguments)
    }

    /// Create a CLI error for output that could not be rendered
    pub fn cli_output_format<M: Into<String>>(message: M) -> Self {
        Self::cli(message, CliErrorKind::OutputFormatError)
    }

    // === Config Domain Helpers ===

    /// Create a config error for a value that can never be honored
    pub fn config_invalid_value<M: Into<String>>(message: M) -> Self {
        Self::config(message, ConfigErrorKind::InvalidValue)
    }
}
