//! Error types for projection runs and assumption loading

use thiserror::Error;

/// Reasons a projection run refuses to start
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ProjectionError {
    /// A divisor or loop bound in the assumptions is unusable
    #[error("invalid configuration: {field} = {value} ({reason})")]
    InvalidConfiguration {
        field: &'static str,
        value: f64,
        reason: &'static str,
    },
}

impl ProjectionError {
    pub(crate) fn invalid(field: &'static str, value: f64, reason: &'static str) -> Self {
        Self::InvalidConfiguration { field, value, reason }
    }

    /// Name of the offending assumption
    pub fn field(&self) -> &'static str {
        match self {
            Self::InvalidConfiguration { field, .. } => field,
        }
    }
}

/// Failures while reading assumptions from disk or applying overrides
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("failed to read assumptions: {0}")]
    Io(#[from] std::io::Error),

    #[error("malformed assumptions CSV: {0}")]
    Csv(#[from] csv::Error),

    #[error("malformed assumptions JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("unknown assumption parameter `{0}`")]
    UnknownParameter(String),

    #[error("invalid value `{value}` for `{parameter}`")]
    InvalidValue { parameter: String, value: String },

    #[error("unsupported assumptions file extension: {0}")]
    UnsupportedFormat(String),
}
