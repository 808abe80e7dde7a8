//! Error types for the Buffalo slot core

use thiserror::Error;

/// Slot core error type
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SlotError {
    #[error("Insufficient funds: balance {balance} < bet {bet}")]
    InsufficientFunds { balance: u64, bet: u64 },

    #[error("Invalid bet {bet}: must be within {min}..={max}")]
    InvalidBet { bet: u64, min: u64, max: u64 },

    #[error("Unknown session: {0}")]
    UnknownSession(String),

    #[error("Session already open: {0}")]
    SessionExists(String),

    #[error("Grid is {reels}x{rows}, expected {expected_reels}x{expected_rows}")]
    GridShape {
        reels: usize,
        rows: usize,
        expected_reels: usize,
        expected_rows: usize,
    },

    #[error("Random source unavailable: {0}")]
    Rng(String),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("JSON error: {0}")]
    Json(String),

    #[error("YAML error: {0}")]
    Yaml(String),
}

impl From<serde_json::Error> for SlotError {
    fn from(e: serde_json::Error) -> Self {
        SlotError::Json(e.to_string())
    }
}

impl From<serde_yml::Error> for SlotError {
    fn from(e: serde_yml::Error) -> Self {
        SlotError::Yaml(e.to_string())
    }
}

/// Result type alias
pub type SlotResult<T> = Result<T, SlotError>;
