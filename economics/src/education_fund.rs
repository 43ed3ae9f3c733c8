//! Education Fund
//!
//! Transparent running total of every tithe routed to education, with the
//! provenance of each contribution kept for audit. The total never
//! decreases: there is no withdrawal path, and negative tithes are refused.
//!
//! The fund is shared (`Arc<EducationFund>`) between the marketplace and
//! whoever else reports on it, so its state sits behind a lock.

use parking_lot::RwLock;
use ranger_core::Money;
use serde::{Deserialize, Serialize};

use crate::error::{EducationFundError, Result};

/// One recorded contribution
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tithe {
    pub amount: Money,
    pub source_description: String,
}

#[derive(Debug, Default)]
struct FundState {
    total_donated: Money,
    contributions: Vec<Tithe>,
}

#[derive(Debug, Default)]
pub struct EducationFund {
    state: RwLock<FundState>,
}

impl EducationFund {
    pub fn new() -> Self {
        log::info!("[EducationFund] Initialized. Awaiting contributions.");
        Self::default()
    }

    /// Add a tithe and return the new total.
    ///
    /// The amount is quantized first. Zero is accepted and recorded; a
    /// negative amount is rejected and leaves the fund untouched.
    pub fn receive_tithe(&self, amount: Money, source_description: &str) -> Result<Money> {
        if amount.is_negative() {
            log::warn!(
                "[EducationFund] Rejected negative tithe of €{} from {}",
                amount,
                source_description
            );
            return Err(EducationFundError::NegativeAmount {
                amount,
                source_description: source_description.to_string(),
            });
        }

        let mut state = self.state.write();
        let Some(total) = state.total_donated.checked_add(amount) else {
            return Err(EducationFundError::Overflow {
                amount,
                source_description: source_description.to_string(),
            });
        };
        state.total_donated = total;
        state.contributions.push(Tithe {
            amount,
            source_description: source_description.to_string(),
        });
        let balance = state.total_donated;
        drop(state);

        log::info!(
            "[EducationFund] Received tithe of €{} from {}. New Balance: €{}",
            amount,
            source_description,
            balance
        );
        Ok(balance)
    }

    /// Total donated so far
    pub fn balance(&self) -> Money {
        self.state.read().total_donated
    }

    pub fn contribution_count(&self) -> usize {
        self.state.read().contributions.len()
    }

    /// Snapshot of the provenance log, oldest first
    pub fn contributions(&self) -> Vec<Tithe> {
        self.state.read().contributions.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    fn m(s: &str) -> Money {
        s.parse().unwrap()
    }

    #[test]
    fn test_new_fund_is_empty() {
        let fund = EducationFund::new();
        assert_eq!(fund.balance(), Money::zero());
        assert_eq!(fund.contribution_count(), 0);
    }

    #[test]
    fn test_receive_tithe_accumulates() {
        let fund = EducationFund::new();
        assert_eq!(fund.receive_tithe(m("2.00"), "purchase of A").unwrap(), m("2.00"));
        assert_eq!(fund.receive_tithe(m("0.705"), "purchase of B").unwrap(), m("2.71"));
        assert_eq!(fund.balance(), m("2.71"));

        let log = fund.contributions();
        assert_eq!(log.len(), 2);
        assert_eq!(log[1].amount, m("0.71"));
        assert_eq!(log[1].source_description, "purchase of B");
    }

    #[test]
    fn test_zero_tithe_is_recorded() {
        let fund = EducationFund::new();
        fund.receive_tithe(Money::zero(), "purchase of a freebie").unwrap();
        assert_eq!(fund.balance(), Money::zero());
        assert_eq!(fund.contribution_count(), 1);
    }

    #[test]
    fn test_negative_tithe_rejected() {
        let fund = EducationFund::new();
        fund.receive_tithe(m("5.00"), "seed").unwrap();

        let err = fund.receive_tithe(m("-1.00"), "refund").unwrap_err();
        assert_eq!(err.kind(), ranger_core::ErrorKind::Validation);
        assert_eq!(fund.balance(), m("5.00"));
        assert_eq!(fund.contribution_count(), 1);
    }

    #[test]
    fn test_overflowing_tithe_rejected() {
        let fund = EducationFund::new();
        fund.receive_tithe(Money::MAX, "endowment").unwrap();

        let err = fund.receive_tithe(m("0.01"), "purchase of D").unwrap_err();
        assert!(matches!(err, EducationFundError::Overflow { .. }));
        assert_eq!(fund.balance(), Money::MAX);
        assert_eq!(fund.contribution_count(), 1);
    }

    #[test]
    fn test_shared_between_owners() {
        let fund = Arc::new(EducationFund::new());
        let other = Arc::clone(&fund);

        other.receive_tithe(m("1.50"), "purchase of C").unwrap();
        assert_eq!(fund.balance(), m("1.50"));
    }
}
