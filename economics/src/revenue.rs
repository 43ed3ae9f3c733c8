//! Fair Trade revenue split
//!
//! Every sale is divided five ways. Each share is `price * fraction`
//! quantized on its own, so the shares may miss the price by a few cents.
//! No remainder correction is applied; `residue()` reports the gap so a
//! settlement layer can reconcile it. With five half-up roundings of at
//! most half a cent each, `|residue|` never exceeds `0.02`.

use ranger_core::Money;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::constants::*;

/// Maximum absolute gap between a price and the sum of its shares
pub const MAX_SPLIT_RESIDUE_CENTS: i64 = 2;

/// The fixed share fractions
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RevenueSplit {
    pub creator: Decimal,
    pub education: Decimal,
    pub operations: Decimal,
    pub partners: Decimal,
    pub investment: Decimal,
}

impl RevenueSplit {
    /// The official split: 73.60 / 10.00 / 6.40 / 5.00 / 5.00
    pub fn fair_trade() -> Self {
        Self {
            creator: bps(CREATOR_SHARE_BPS),
            education: bps(EDUCATION_SHARE_BPS),
            operations: bps(OPS_SHARE_BPS),
            partners: bps(PARTNERS_SHARE_BPS),
            investment: bps(INVESTMENT_SHARE_BPS),
        }
    }

    pub fn total(&self) -> Decimal {
        self.creator + self.education + self.operations + self.partners + self.investment
    }

    /// Apply the split to a price
    pub fn distribute(&self, price: Money) -> RevenueDistribution {
        RevenueDistribution {
            price,
            creator: price.share(self.creator),
            education_fund: price.share(self.education),
            operations: price.share(self.operations),
            partners: price.share(self.partners),
            investment: price.share(self.investment),
        }
    }
}

impl Default for RevenueSplit {
    fn default() -> Self {
        Self::fair_trade()
    }
}

fn bps(parts: i64) -> Decimal {
    Decimal::new(parts, 0) / Decimal::new(BPS_DENOMINATOR, 0)
}

/// Amounts owed to each party for one sale
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RevenueDistribution {
    pub price: Money,
    pub creator: Money,
    pub education_fund: Money,
    #[serde(rename = "rangeros_ops")]
    pub operations: Money,
    pub partners: Money,
    pub investment: Money,
}

impl RevenueDistribution {
    /// Split `price` with the official Fair Trade fractions
    pub fn from_price(price: Money) -> Self {
        RevenueSplit::fair_trade().distribute(price)
    }

    /// Sum of the five shares
    pub fn total(&self) -> Money {
        self.entries().iter().map(|(_, amount)| *amount).sum()
    }

    /// `price - total()`; positive means cents were rounded away
    pub fn residue(&self) -> Money {
        self.price - self.total()
    }

    /// Recipient label and amount, in payout order
    pub fn entries(&self) -> [(&'static str, Money); 5] {
        [
            ("creator", self.creator),
            ("education_fund", self.education_fund),
            ("rangeros_ops", self.operations),
            ("partners", self.partners),
            ("investment", self.investment),
        ]
    }
}
