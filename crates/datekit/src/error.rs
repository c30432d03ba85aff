//! Error types for datekit operations.

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum DateKitError {
    #[error("Invalid timezone: {0}")]
    InvalidTimezone(String),

    #[error("Invalid datetime: {0}")]
    InvalidDatetime(String),

    #[error("Unknown field kind: {0}")]
    UnknownField(String),

    #[error("Unsupported field kind: {0}")]
    UnsupportedField(String),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

pub type Result<T> = std::result::Result<T, DateKitError>;
