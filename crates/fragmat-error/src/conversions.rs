//! Error conversion implementations and contextual methods

use crate::kinds::DecodeErrorKind;
use crate::types::FragError;
use std::path::PathBuf;

// === From implementations for standard library types ===

impl From<std::io::Error> for FragError {
    fn from(err: std::io::Error) -> Self {
        Self::Io {
            message: err.to_string(),
            file_path: None,
            source_message: Some(format!("IO Error: {err}")),
        }
    }
}

// === Contextual builder methods ===

impl FragError {
    /// Add file path context to error types that carry one
    pub fn with_file_path<P: Into<PathBuf>>(mut self, path: P) -> Self {
        match &mut self {
            Self::Io { file_path, .. } => *file_path = Some(path.into()),
            Self::Decode { file_path, .. } => *file_path = Some(path.into()),
            Self::Cli { .. } | Self::Config { .. } => {}
        }
        self
    }

    /// Add byte offset context to decode errors
    pub fn with_offset(mut self, at: usize) -> Self {
        if let Self::Decode { offset, .. } = &mut self {
            *offset = Some(at);
        }
        self
    }

    /// Add material index context to decode errors
    pub fn with_index(mut self, at: usize) -> Self {
        if let Self::Decode { index, .. } = &mut self {
            *index = Some(at);
        }
        self
    }

    /// Add command context to CLI errors
    pub fn with_command<C: Into<String>>(mut self, command: C) -> Self {
        if let Self::Cli { command: cmd, .. } = &mut self {
            *cmd = Some(command.into());
        }
        self
    }
}

// === Type checking methods ===

impl FragError {
    pub fn is_io(&self) -> bool {
        matches!(self, Self::Io { .. })
    }

    pub fn is_decode(&self) -> bool {
        matches!(self, Self::Decode { .. })
    }
}

// === Context accessor methods ===

impl FragError {
    pub fn file_path(&self) -> Option<&PathBuf> {
        match self {
            Self::Io { file_path, .. } => file_path.as_ref(),
            Self::Decode { file_path, .. } => file_path.as_ref(),
            Self::Cli { .. } | Self::Config { .. } => None,
        }
    }

    pub fn offset(&self) -> Option<usize> {
        match self {
            Self::Decode { offset, .. } => *offset,
            _ => None,
        }
    }

    pub fn index(&self) -> Option<usize> {
        match self {
            Self::Decode { index, .. } => *index,
            _ => None,
        }
    }

    pub fn decode_kind(&self) -> Option<&DecodeErrorKind> {
        match self {
            Self::Decode { kind, .. } => Some(kind),
            _ => None,
        }
    }

    /// Short category name of the fault, e.g. `InvalidOffset` or `Io`
    pub fn category(&self) -> &'static str {
        match self {
            Self::Io { .. } => "Io",
            Self::Decode { kind, .. } => kind.name(),
            Self::Cli { .. } => "Cli",
            Self::Config { .. } => "Config",
        }
    }

    /// Full single-line diagnostic: category, message and any positional context
    pub fn detail(&self) -> String {
        let mut out = format!("{}: {}", self.category(), self);
        if let Some(offset) = self.offset() {
            out.push_str(&format!(" (at offset 0x{offset:X})"));
        }
        if let Some(index) = self.index() {
            out.push_str(&format!(" (material index {index})"));
        }
        if let Some(path) = self.file_path() {
            out.push_str(&format!(" (file: {})", path.display()));
        }
        if let Self::Io {
            source_message: Some(source),
            ..
        } = self
        {
            out.push_str(&format!(" [{source}]"));
        }
        out
    }
}

// === User-friendly message generation ===

impl FragError {
    /// Generate a user-friendly error message with context
    pub fn user_message(&self) -> String {
        match self {
            Self::Io {
                message, file_path, ..
            } => {
                if let Some(path) = file_path {
                    format!("File operation failed on '{}': {}", path.display(), message)
                } else {
                    format!("File operation failed: {message}")
                }
            }
            Self::Decode {
                message,
                file_path,
                offset,
                ..
            } => {
                let mut msg = format!("Model decode failed: {message}");
                if let Some(path) = file_path {
                    msg.push_str(&format!(" (file: {})", path.display()));
                }
                if let Some(offset) = offset {
                    msg.push_str(&format!(" (offset: 0x{offset:X})"));
                }
                msg
            }
            Self::Cli {
                message, command, ..
            } => {
                if let Some(cmd) = command {
                    format!("Command '{cmd}' failed: {message}")
                } else {
                    format!("Command failed: {message}")
                }
            }
            Self::Config { message, .. } => format!("Configuration error: {message}"),
        }
    }
}
