//! Error types for schema loading and faking

use thiserror::Error;

/// Errors that can occur while loading or faking a schema
#[derive(Debug, Error)]
pub enum FakerError {
    /// Schema text failed to parse or validate
    #[error("Invalid schema: {0}")]
    InvalidSchema(String),

    /// One of the faker directives is not defined by the schema
    #[error("Missing directive definition: @{0}")]
    MissingDirective(&'static str),

    /// A directive declaration has arguments that do not fit its configuration record
    #[error("Invalid @{directive} on {coordinate}: {message}")]
    InvalidDirective {
        directive: &'static str,
        coordinate: String,
        message: String,
    },

    /// A type reference points at a type the schema does not define
    #[error("Unknown type: {0}")]
    UnknownType(String),

    /// A field has an input object as its output type
    #[error("Field {0} has an input type as its output type")]
    InputTypeAsOutput(String),
}

impl FakerError {
    pub(crate) fn invalid_directive(
        directive: &'static str,
        coordinate: impl Into<String>,
        message: impl ToString,
    ) -> Self {
        FakerError::InvalidDirective {
            directive,
            coordinate: coordinate.into(),
            message: message.to_string(),
        }
    }
}

/// Result type alias for faker operations
pub type FakerResult<T> = Result<T, FakerError>;
