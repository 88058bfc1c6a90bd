use crate::domain::error_fields::ErrorFieldsMap;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum TypesError {
    #[error("Cannot parse '{input}' with layout '{layout}': {reason}")]
    ParseError {
        input: String,
        layout: String,
        reason: String,
    },

    #[error("Cannot convert {found} to {expected}")]
    TypeConversionError {
        expected: &'static str,
        found: &'static str,
    },

    #[error("Invalid layout: '{layout}'")]
    InvalidLayoutError { layout: String },

    #[error("Unknown time zone: '{name}'")]
    UnknownTimezoneError { name: String },

    #[error("Time zone already initialized as '{current}', cannot switch to '{requested}'")]
    AlreadyInitializedError { current: String, requested: String },

    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    #[error("XML error: {message}")]
    XmlError { message: String },

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Validation failed:\n{0}")]
    ValidationError(ErrorFieldsMap),
}

impl TypesError {
    pub(crate) fn xml(err: impl std::fmt::Display) -> Self {
        TypesError::XmlError {
            message: err.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, TypesError>;
