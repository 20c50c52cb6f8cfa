use crate::schema::validate::SceneErrors;

/// Convenience result type used across the crate.
pub type StickmanResult<T> = Result<T, StickmanError>;

/// Top-level error taxonomy.
///
/// The synthesizer and the playback engine have no error paths; everything here originates at
/// the import boundary, the validator, or a concrete drawing surface.
#[derive(thiserror::Error, Debug)]
pub enum StickmanError {
    /// Malformed input text at the import boundary (not a schema problem).
    #[error("import error: {0}")]
    Import(String),

    /// Structural and referential schema violations, reported all at once.
    #[error("scene validation failed:\n{0}")]
    Validation(#[from] SceneErrors),

    /// Errors raised by a drawing surface implementation.
    #[error("render error: {0}")]
    Render(String),

    /// Errors when serializing a scene for export.
    #[error("serialization error: {0}")]
    Serde(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl StickmanError {
    /// Build a [`StickmanError::Import`] value.
    pub fn import(msg: impl Into<String>) -> Self {
        Self::Import(msg.into())
    }

    /// Build a [`StickmanError::Render`] value.
    pub fn render(msg: impl Into<String>) -> Self {
        Self::Render(msg.into())
    }

    /// Build a [`StickmanError::Serde`] value.
    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }

    /// The aggregate schema report, when this is a validation failure.
    pub fn scene_errors(&self) -> Option<&SceneErrors> {
        match self {
            Self::Validation(errs) => Some(errs),
            _ => None,
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
