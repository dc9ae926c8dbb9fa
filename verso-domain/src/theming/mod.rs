//! The theming engine.
//!
//! Palettes and variable derivation are pure ([`logic`], [`palettes`]); the
//! stateful pieces are the [`service::ThemeService`] driving a
//! [`document::DocumentRoot`] and a [`store::PreferenceStore`].

pub mod document;
pub mod errors;
pub mod events;
pub mod logic;
pub mod palettes;
pub mod service;
pub mod store;
pub mod types;

// Re-exports
pub use document::{DocumentRoot, RecordingDocument};
pub use errors::ThemingError;
pub use events::ThemeChangedEvent;
pub use logic::{derive_variables, inline_style, resolved_palette};
pub use service::{ThemeHandle, ThemeService};
pub use store::{FilePreferenceStore, MemoryPreferenceStore, PreferenceStore, PREFERENCE_KEY};
pub use types::{
    AppliedThemeState, Palette, ThemeVariant, VariableName, VariableSet, VariableValue,
};
