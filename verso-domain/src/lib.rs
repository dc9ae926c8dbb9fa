//! Domain layer for the Verso blog presentation system.
//!
//! The only subsystem with real state-machine structure in this workspace
//! lives here: the [`theming`] module, which owns the light/dark theme
//! variant, derives the CSS custom-property sets applied to the document
//! root, persists the user's choice, and broadcasts change events to
//! consumers.

pub mod theming;
