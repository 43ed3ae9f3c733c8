//! Treasury error types

use chrono::{DateTime, Utc};
use ranger_core::{ErrorKind, Money};
use thiserror::Error;

use crate::transaction::TransactionStatus;

/// Multi-signature treasury errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TreasuryError {
    #[error("Requires exactly {required} unique authorized signers, got {provided}")]
    InvalidSignerSet { required: usize, provided: usize },

    #[error("{0} is not an authorized signer")]
    Unauthorized(String),

    #[error("Transaction not found: {0}")]
    TransactionNotFound(String),

    #[error("Transaction {tx_id} is {actual}, expected {expected}")]
    InvalidStatus {
        tx_id: String,
        expected: TransactionStatus,
        actual: TransactionStatus,
    },

    #[error("Timelock active for {tx_id} until {unlocks_at}")]
    TimelockActive {
        tx_id: String,
        unlocks_at: DateTime<Utc>,
    },

    #[error("Insufficient treasury balance: requested {requested}, available {available}")]
    InsufficientBalance { requested: Money, available: Money },

    #[error("Invalid amount: {0}")]
    InvalidAmount(String),
}

impl TreasuryError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::InvalidSignerSet { .. } => ErrorKind::Configuration,
            Self::Unauthorized(_) => ErrorKind::Authorization,
            Self::TransactionNotFound(_) | Self::InvalidStatus { .. } => ErrorKind::State,
            Self::TimelockActive { .. } => ErrorKind::Timing,
            Self::InsufficientBalance { .. } => ErrorKind::Funds,
            Self::InvalidAmount(_) => ErrorKind::Validation,
        }
    }
}

pub type Result<T> = std::result::Result<T, TreasuryError>;
