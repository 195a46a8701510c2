//! Scene error types.
//!
//! Geometry queries never fail: they answer with `+∞`, `-1`, `MarkType::None`
//! or invalid points. `PcmError` covers the remaining hard failures:
//! querying geometry that was never configured and loading scene files.

use thiserror::Error;

use super::types::ObjectType;

/// PCM scene error type
#[derive(Error, Debug)]
pub enum PcmError {
    #[error("{0} is not configured in this scene")]
    NotConfigured(ObjectType),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("YAML parse error: {0}")]
    Parse(#[from] serde_yaml::Error),

    #[error("Invalid scene: {0}")]
    InvalidScene(String),
}

impl PcmError {
    /// Short error code for logging.
    pub fn code(&self) -> &'static str {
        match self {
            Self::NotConfigured(_) => "NOT_CONFIGURED",
            Self::Io(_) => "IO",
            Self::Parse(_) => "PARSE",
            Self::InvalidScene(_) => "INVALID_SCENE",
        }
    }
}

pub type Result<T> = std::result::Result<T, PcmError>;
