//! Marketplace listings

use chrono::{DateTime, Utc};
use ranger_core::Money;
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ItemStatus {
    Available,
    Sold,
}

impl fmt::Display for ItemStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Available => write!(f, "available"),
            Self::Sold => write!(f, "sold"),
        }
    }
}

/// A listed item. Sold exactly once, never re-listed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Item {
    pub item_id: String,
    pub creator_id: String,
    pub name: String,
    pub price: Money,
    pub status: ItemStatus,
    pub listed_at: DateTime<Utc>,
    pub buyer_id: Option<String>,
    pub sold_at: Option<DateTime<Utc>>,
}

impl Item {
    pub fn is_available(&self) -> bool {
        self.status == ItemStatus::Available
    }

    pub fn short_id(&self) -> &str {
        self.item_id.get(..8).unwrap_or(&self.item_id)
    }
}
