//! Core infrastructure layer for Verso.
//!
//! This crate provides the foundational pieces shared by the rest of the
//! workspace: the [`types::Color`] value type used by the theming system,
//! the [`error::CoreError`] error type, and tracing-based logging setup.

pub mod error;
pub mod logging;
pub mod types;

pub use error::CoreError;
pub use types::{Color, ColorParseError};
