//! # fragmat-error - Unified Error Handling
//!
//! This crate provides the error system shared by the fragmat crates:
//! - One error type across the reader, the report writer and the CLI
//! - Contextual information (file paths, byte offsets, material indices)
//! - User-friendly messages for the CLI and full detail lines for diagnostics
//!
//! ## Module Organization
//!
//! - [`types`] - Main error type and Result alias
//! - [`kinds`] - Error kind enums for fine-grained categorization
//! - [`helpers`] - Constructors for standardized errors
//! - [`conversions`] - Conversions, context builders and accessors

pub use kinds::*;
pub use types::*;

pub mod conversions;
pub mod helpers;
pub mod kinds;
pub mod types;
