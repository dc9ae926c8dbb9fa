use thiserror::Error;

/// Errors produced by the presentation layer.
#[derive(Debug, Error)]
pub enum UiError {
    /// An external script failed to load. The consumer stays in its
    /// unscripted fallback state.
    #[error("Failed to load script '{url}': {message}")]
    ScriptLoad { url: String, message: String },
}
