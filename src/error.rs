use std::path::PathBuf;
use thiserror::Error;

/// Where an error sits in the load policy: structural and unsupported errors
/// always abort, field errors abort a block document but only skip a legacy line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Structural,
    Field,
    Unsupported,
}

#[derive(Debug, Error)]
pub enum ParseError {
    #[error("Invalid ColorTable block")]
    InvalidBlock,

    #[error("Unknown color band definition: {0}")]
    UnknownColorBand(String),

    #[error("Unsupported color format: {0}")]
    UnsupportedColorFormat(String),

    #[error("Invalid color component in '{0}' (expected integers 0-255)")]
    InvalidColorComponent(String),

    #[error("Invalid band value '{0}'")]
    InvalidValue(String),

    #[error("{key}: expected {expected} values, found {found}")]
    InvalidTokenCount {
        key: String,
        expected: &'static str,
        found: usize,
    },

    #[error("Invalid RF color '{0}' (expected three integers 0-255)")]
    InvalidRf(String),

    #[error("Failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl ParseError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            ParseError::InvalidBlock | ParseError::Io { .. } => ErrorKind::Structural,
            ParseError::UnsupportedColorFormat(_) => ErrorKind::Unsupported,
            ParseError::UnknownColorBand(_)
            | ParseError::InvalidColorComponent(_)
            | ParseError::InvalidValue(_)
            | ParseError::InvalidTokenCount { .. }
            | ParseError::InvalidRf(_) => ErrorKind::Field,
        }
    }
}

pub type Result<T, E = ParseError> = std::result::Result<T, E>;
