/// Convenience result type used across Wavy.
pub type WavyResult<T> = Result<T, WavyError>;

/// Top-level error taxonomy used by compiler and renderer APIs.
///
/// Only the conditions that abort a run are represented here. Unrecognized transition
/// pairs are reported through [`Diagnostic`](crate::Diagnostic) values instead.
#[derive(thiserror::Error, Debug)]
pub enum WavyError {
    /// A non-blank input line has fewer than two space-separated fields.
    #[error("malformed line: {input}:{line}: need two or more fields, got {fields}")]
    MalformedLine {
        /// Identifier of the input document (usually its path).
        input: String,
        /// 1-based line number.
        line: usize,
        /// Number of fields found on the line.
        fields: usize,
    },

    /// A clock line's half period or phase failed to parse.
    #[error("invalid clock spec: {input}:{line}: {reason}")]
    InvalidClockSpec {
        /// Identifier of the input document (usually its path).
        input: String,
        /// 1-based line number.
        line: usize,
        /// Human-readable parse failure.
        reason: String,
    },

    /// Structurally invalid state or parameters.
    #[error("validation error: {0}")]
    Validation(String),

    /// Failures inside a rendering backend.
    #[error("render error: {0}")]
    Render(String),

    /// Errors when serializing or deserializing data structures.
    #[error("serialization error: {0}")]
    Serde(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl WavyError {
    /// Build a [`WavyError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`WavyError::Render`] value.
    pub fn render(msg: impl Into<String>) -> Self {
        Self::Render(msg.into())
    }

    /// Build a [`WavyError::Serde`] value.
    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }

    /// 1-based line number for errors tied to an input line.
    pub fn line(&self) -> Option<usize> {
        match self {
            Self::MalformedLine { line, .. } | Self::InvalidClockSpec { line, .. } => Some(*line),
            _ => None,
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
