use std::fmt::{self, Display};

/// Errors produced by model constructors and parsers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ModelError {
    InvalidMediaKind(String),
    InvalidSortKey(String),
    InvalidRegion(String),
    InvalidLanguage(String),
    InvalidCategory(String),
}

impl Display for ModelError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ModelError::InvalidMediaKind(raw) => {
                write!(f, "invalid media type '{raw}' (expected movie or tv)")
            }
            ModelError::InvalidSortKey(raw) => write!(f, "invalid sort key '{raw}'"),
            ModelError::InvalidRegion(raw) => {
                write!(f, "invalid region code '{raw}' (expected ISO-3166-1 alpha-2)")
            }
            ModelError::InvalidLanguage(raw) => {
                write!(f, "invalid language code '{raw}' (expected ISO-639-1)")
            }
            ModelError::InvalidCategory(raw) => {
                write!(f, "invalid availability category '{raw}'")
            }
        }
    }
}

impl std::error::Error for ModelError {}

pub type Result<T> = std::result::Result<T, ModelError>;
