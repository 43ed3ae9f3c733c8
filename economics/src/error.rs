//! Economics error types

use ranger_core::{ErrorKind, Money};
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EducationFundError {
    #[error("Tithe of {amount} from {source_description} is negative")]
    NegativeAmount {
        amount: Money,
        source_description: String,
    },

    #[error("Tithe of {amount} from {source_description} would overflow the fund total")]
    Overflow {
        amount: Money,
        source_description: String,
    },
}

impl EducationFundError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::NegativeAmount { .. } | Self::Overflow { .. } => ErrorKind::Validation,
        }
    }
}

pub type Result<T> = std::result::Result<T, EducationFundError>;
