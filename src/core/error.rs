//! Centralised error types used across the crate.

use std::io;

use thiserror::Error;

use crate::core::data::ParseCsvError;

/// Precise configuration faults.  Raised before any rendering work.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("field `{0}` is not present in the first record")]
    MissingField(String),
    #[error("{name} must be at least {min}, got {value}")]
    InvalidDimension {
        name: &'static str,
        value: usize,
        min: usize,
    },
}

/// Top-level error type bubbled up by public APIs.
#[derive(Debug, Error)]
pub enum GraphError {
    #[error("{0}")]
    Io(#[from] io::Error),
    #[error("{0}")]
    Csv(#[from] ParseCsvError),
    #[error("{0}")]
    Config(#[from] ConfigError),
    #[error("row {row}: invalid `{field}`: {reason}")]
    InvalidData {
        row: usize,
        field: String,
        reason: String,
    },
    #[error("data set is empty")]
    EmptyData,
}

impl GraphError {
    pub(crate) fn invalid(row: usize, field: &str, reason: impl Into<String>) -> Self {
        Self::InvalidData {
            row,
            field: field.to_owned(),
            reason: reason.into(),
        }
    }
}

/// Faults surfaced by the remote chart service and image export boundaries.
#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("API key environment variable `{var}` is missing or empty")]
    Auth { var: String },
    #[error("remote call failed with status {status}: {body}")]
    Remote { status: u16, body: String },
    #[error("network error: {0}")]
    Network(String),
    #[error("unsupported export format `{0}` (expected .png, .jpeg or .svg)")]
    UnsupportedFormat(String),
    #[error("could not encode CSV payload: {0}")]
    Encode(#[from] csv::Error),
    #[error("{0}")]
    Io(#[from] io::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_name_the_offender() {
        let e = GraphError::invalid(3, "v", "expected a number, got null");
        assert_eq!(e.to_string(), "row 3: invalid `v`: expected a number, got null");

        let e = GraphError::from(ConfigError::MissingField("region".into()));
        assert_eq!(e.to_string(), "field `region` is not present in the first record");

        let e = ServiceError::Remote {
            status: 401,
            body: "unauthorized".into(),
        };
        assert!(e.to_string().contains("401"));
    }
}
