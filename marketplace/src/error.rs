//! Marketplace error types

use chrono::{DateTime, Utc};
use ranger_core::{ErrorKind, Money};
use ranger_economics::EducationFundError;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MarketplaceError {
    #[error("Price €{price} exceeds the €{cap} cap")]
    PriceAboveCap { price: Money, cap: Money },

    #[error("Invalid price: €{0}")]
    InvalidPrice(Money),

    #[error("Creator {creator_id} can only list one item per 24 hours (next at {next_allowed})")]
    ListingRateLimited {
        creator_id: String,
        next_allowed: DateTime<Utc>,
    },

    #[error("Item not found: {0}")]
    ItemNotFound(String),

    #[error("Item not available: {0}")]
    ItemNotAvailable(String),

    #[error("Purchase of €{amount} by {buyer_id} exceeds €{limit} daily spend limit (already spent €{spent})")]
    SpendLimitExceeded {
        buyer_id: String,
        amount: Money,
        spent: Money,
        limit: Money,
    },

    #[error("Education fund rejected tithe: {0}")]
    Tithe(#[from] EducationFundError),
}

impl MarketplaceError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::PriceAboveCap { .. }
            | Self::ListingRateLimited { .. }
            | Self::SpendLimitExceeded { .. } => ErrorKind::PolicyLimit,
            Self::InvalidPrice(_) => ErrorKind::Validation,
            Self::ItemNotFound(_) | Self::ItemNotAvailable(_) => ErrorKind::State,
            Self::Tithe(e) => e.kind(),
        }
    }
}

pub type Result<T> = std::result::Result<T, MarketplaceError>;
