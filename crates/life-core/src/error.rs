//! Error types for the simulation.

use std::path::PathBuf;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
    #[error("File does not exist: {}", .0.display())]
    InputNotFound(PathBuf),

    #[error("Failed to parse XML: {0}")]
    MalformedDocument(String),

    #[error("{message}")]
    InvalidInput { field: String, message: String },

    #[error("Writing XML file failed: {0}")]
    OutputWrite(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// A required element is absent from the input document
    pub fn missing(field: &str) -> Self {
        Error::InvalidInput {
            field: field.to_string(),
            message: format!("Missing element '{}'", field),
        }
    }

    /// A field is present but its value is outside the accepted range
    pub fn out_of_range(field: &str, requirement: &str) -> Self {
        Error::InvalidInput {
            field: field.to_string(),
            message: format!("Value of element '{}' must be {}", field, requirement),
        }
    }

    /// Name of the offending input field, for `InvalidInput` errors
    pub fn field(&self) -> Option<&str> {
        match self {
            Error::InvalidInput { field, .. } => Some(field),
            _ => None,
        }
    }
}
