use thiserror::Error;

use crate::theming::types::VariableName;

/// Errors produced by the theming layer.
///
/// None of these are fatal to the page: the theme service absorbs storage
/// failures into the default variant and best-effort writes, so this type
/// mostly surfaces in logs and in validation tests.
#[derive(Debug, Error)]
pub enum ThemingError {
    /// A persisted value outside the closed variant set. Treated as absent by
    /// the service.
    #[error("Unknown theme variant '{value}'")]
    UnknownVariant { value: String },

    /// A variable references a name with no entry in the set.
    #[error("Variable '{name}' references undefined variable '{target}'")]
    DanglingReference {
        name: VariableName,
        target: VariableName,
    },

    /// A variable references another reference. The derivation tables only
    /// ever produce single-hop indirection.
    #[error("Variable '{name}' references '{target}', which is itself a reference")]
    MultiHopReference {
        name: VariableName,
        target: VariableName,
    },

    /// Reading from or writing to the preference store failed.
    #[error("Preference store error: {message}")]
    PreferenceStore {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync + 'static>>,
    },

    /// The platform config directory could not be determined.
    #[error("Could not determine a configuration directory for the preference store")]
    NoConfigDirectory,

    /// Serializing or parsing the preference file failed.
    #[error("Preference file error: {message}")]
    PreferenceFormat {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync + 'static>>,
    },
}
