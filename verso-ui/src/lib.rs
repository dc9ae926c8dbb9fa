//! Presentation layer for the site.
//!
//! This crate holds the pieces that sit on top of the theming domain: the
//! page layout shell, the lazy external-script loader, and the themed
//! force-directed graph view.

pub mod error;
pub mod graph;
pub mod layout;
pub mod script;

pub use error::UiError;
