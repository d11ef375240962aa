//! Errors raised while constructing or parsing core types.

use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum TypesError {
    #[error("exit request indices must strictly increase: index {index} at position {position} follows {previous}")]
    NotStrictlyIncreasing {
        position: usize,
        previous: usize,
        index: usize,
    },

    #[error("invalid hex: {0}")]
    InvalidHex(String),

    #[error("invalid length: expected {expected}, got {actual} bytes")]
    InvalidLength {
        expected: &'static str,
        actual: usize,
    },

    #[error("invalid amount: {0}")]
    InvalidAmount(String),

    #[error("unknown allocation type {0}")]
    UnknownAllocationType(u8),
}
