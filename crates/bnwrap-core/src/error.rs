//! Error types for the bnwrap library

use thiserror::Error;

use crate::curve::CurveId;

pub type Result<T> = std::result::Result<T, Error>;

/// Malformed hexadecimal text handed to [`crate::BigNumber::from_hex_string`]
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    #[error("Empty input")]
    Empty,

    #[error("Sign without digits")]
    MissingDigits,

    #[error("Invalid hex digit {ch:?} at position {position}")]
    InvalidDigit { ch: char, position: usize },

    #[error("Sign character at position {position}, only a leading '-' is allowed")]
    MisplacedSign { position: usize },
}

#[derive(Error, Debug)]
pub enum Error {
    #[error("Parse error: {0}")]
    Parse(#[from] ParseError),

    #[error("Unknown curve: {0}")]
    UnknownCurve(String),

    #[error("Curve parameter mismatch: {0}")]
    ParameterMismatch(String),

    #[error("Invalid threshold {threshold} for {parties} parties")]
    InvalidThreshold { threshold: usize, parties: usize },

    #[error("Need {needed} shares to reconstruct, got {got}")]
    NotEnoughShares { needed: usize, got: usize },

    #[error("Invalid share index: {0}")]
    InvalidShareIndex(u32),

    #[error("Duplicate share index: {0}")]
    DuplicateShareIndex(u32),

    #[error("Proof verification failed: {0}")]
    ProofRejected(&'static str),

    #[error("No group arithmetic for curve {0}")]
    Unsupported(CurveId),
}
