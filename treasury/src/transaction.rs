//! Treasury transaction records

use chrono::{DateTime, Duration, Utc};
use ranger_core::Money;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;

/// Lifecycle of a payout: `Pending -> Approved -> Executed`, never backwards
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionStatus {
    /// Collecting signer approvals
    Pending,
    /// Quorum reached; timelock running
    Approved,
    /// Funds moved
    Executed,
}

impl fmt::Display for TransactionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Pending => write!(f, "pending"),
            Self::Approved => write!(f, "approved"),
            Self::Executed => write!(f, "executed"),
        }
    }
}

/// A proposed payout from the treasury
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TreasuryTransaction {
    pub tx_id: String,
    pub proposer: String,
    pub recipient: String,
    pub amount: Money,
    pub description: String,
    pub created_at: DateTime<Utc>,
    pub approvals: BTreeSet<String>,
    pub final_approval_at: Option<DateTime<Utc>>,
    pub executed_at: Option<DateTime<Utc>>,
    pub status: TransactionStatus,
}

impl TreasuryTransaction {
    /// New pending transaction; proposing counts as the proposer's approval
    pub fn new(
        tx_id: String,
        proposer: String,
        recipient: String,
        amount: Money,
        description: String,
        created_at: DateTime<Utc>,
    ) -> Self {
        let mut approvals = BTreeSet::new();
        approvals.insert(proposer.clone());

        Self {
            tx_id,
            proposer,
            recipient,
            amount,
            description,
            created_at,
            approvals,
            final_approval_at: None,
            executed_at: None,
            status: TransactionStatus::Pending,
        }
    }

    pub fn approval_count(&self) -> usize {
        self.approvals.len()
    }

    pub fn has_approved(&self, signer: &str) -> bool {
        self.approvals.contains(signer)
    }

    /// Earliest execution instant, once quorum has been reached
    pub fn unlocks_at(&self, timelock: Duration) -> Option<DateTime<Utc>> {
        self.final_approval_at.map(|at| at + timelock)
    }

    /// First 8 characters of the id, for log lines
    pub fn short_id(&self) -> &str {
        short_id(&self.tx_id)
    }
}

pub(crate) fn short_id(id: &str) -> &str {
    id.get(..8).unwrap_or(id)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn sample() -> TreasuryTransaction {
        TreasuryTransaction::new(
            "0123456789abcdef".to_string(),
            "alice".to_string(),
            "school".to_string(),
            Money::from_cents(50_000),
            "Laptops".to_string(),
            Utc.with_ymd_and_hms(2025, 3, 1, 9, 0, 0).unwrap(),
        )
    }

    #[test]
    fn test_new_transaction_is_pending_with_proposer_approval() {
        let tx = sample();
        assert_eq!(tx.status, TransactionStatus::Pending);
        assert_eq!(tx.approval_count(), 1);
        assert!(tx.has_approved("alice"));
        assert!(tx.final_approval_at.is_none());
        assert!(tx.executed_at.is_none());
    }

    #[test]
    fn test_unlocks_at_needs_final_approval() {
        let mut tx = sample();
        assert_eq!(tx.unlocks_at(Duration::days(7)), None);

        let approved = Utc.with_ymd_and_hms(2025, 3, 2, 9, 0, 0).unwrap();
        tx.final_approval_at = Some(approved);
        assert_eq!(
            tx.unlocks_at(Duration::days(7)),
            Some(approved + Duration::days(7))
        );
    }

    #[test]
    fn test_short_id() {
        assert_eq!(sample().short_id(), "01234567");
        assert_eq!(short_id("abc"), "abc");
    }

    #[test]
    fn test_status_serializes_lowercase() {
        let json = serde_json::to_string(&TransactionStatus::Approved).unwrap();
        assert_eq!(json, "\"approved\"");
    }
}
