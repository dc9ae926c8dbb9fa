//! Core value types shared across the Verso workspace.

pub mod color;

pub use color::{Color, ColorParseError};
