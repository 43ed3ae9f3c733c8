//! Multi-Signature Treasury
//!
//! A 3-of-3 wallet with a 7-day timelock. Every payout must be approved by
//! all three authorized signers, and even then cannot execute until seven
//! days after the final approval. Deposits and approvals never move funds;
//! `execute_transaction` is the only call that debits the balance.

use chrono::{DateTime, Duration, Utc};
use ranger_core::{Money, SharedClock};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeSet, HashMap};
use uuid::Uuid;

use crate::error::{Result, TreasuryError};
use crate::transaction::{short_id, TransactionStatus, TreasuryTransaction};

/// Number of distinct signers, all of whom must approve
pub const REQUIRED_SIGNERS: usize = 3;

/// Waiting period between quorum and execution
pub const TIMELOCK_DAYS: i64 = 7;

pub fn timelock_duration() -> Duration {
    Duration::days(TIMELOCK_DAYS)
}

/// Treasury statistics
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TreasuryStats {
    pub balance: Money,
    pub total_deposited: Money,
    pub total_executed: Money,
    pub pending: usize,
    pub approved: usize,
    pub executed: usize,
}

pub struct MultiSigTreasury {
    signers: BTreeSet<String>,
    balance: Money,
    total_deposited: Money,
    transactions: HashMap<String, TreasuryTransaction>,
    clock: SharedClock,
}

impl MultiSigTreasury {
    /// Create a treasury controlled by exactly three distinct signers.
    ///
    /// Repeated names in `signers` collapse to one identity before counting.
    pub fn new<I, S>(signers: I, clock: SharedClock) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let signers: BTreeSet<String> = signers.into_iter().map(Into::into).collect();
        if signers.len() != REQUIRED_SIGNERS {
            return Err(TreasuryError::InvalidSignerSet {
                required: REQUIRED_SIGNERS,
                provided: signers.len(),
            });
        }

        log::info!(
            "[Treasury] Initialized with signers {:?}",
            signers.iter().collect::<Vec<_>>()
        );

        Ok(Self {
            signers,
            balance: Money::zero(),
            total_deposited: Money::zero(),
            transactions: HashMap::new(),
            clock,
        })
    }

    pub fn balance(&self) -> Money {
        self.balance
    }

    pub fn signers(&self) -> impl Iterator<Item = &str> {
        self.signers.iter().map(String::as_str)
    }

    pub fn is_signer(&self, identity: &str) -> bool {
        self.signers.contains(identity)
    }

    /// Add funds. Only strictly positive amounts are accepted.
    pub fn deposit(&mut self, amount: Money) -> Result<Money> {
        if !amount.is_positive() {
            log::warn!("[Treasury] Rejected deposit of €{}", amount);
            return Err(TreasuryError::InvalidAmount(format!(
                "deposit must be positive, got {}",
                amount
            )));
        }

        let (balance, total_deposited) = match (
            self.balance.checked_add(amount),
            self.total_deposited.checked_add(amount),
        ) {
            (Some(balance), Some(total)) => (balance, total),
            _ => {
                log::warn!(
                    "[Treasury] Rejected deposit of €{}: balance would overflow",
                    amount
                );
                return Err(TreasuryError::InvalidAmount(format!(
                    "deposit of {} would exceed the maximum balance",
                    amount
                )));
            }
        };

        self.balance = balance;
        self.total_deposited = total_deposited;
        log::info!(
            "[Treasury] Deposited €{}. New Balance: €{}",
            amount,
            self.balance
        );
        Ok(self.balance)
    }

    /// Open a new payout. The proposer's approval is recorded immediately.
    pub fn propose_transaction(
        &mut self,
        proposer: &str,
        recipient: &str,
        amount: Money,
        description: &str,
    ) -> Result<String> {
        self.ensure_signer(proposer)?;
        if !amount.is_positive() {
            return Err(TreasuryError::InvalidAmount(format!(
                "payout must be positive, got {}",
                amount
            )));
        }

        let tx_id = self.fresh_id();
        let tx = TreasuryTransaction::new(
            tx_id.clone(),
            proposer.to_string(),
            recipient.to_string(),
            amount,
            description.to_string(),
            self.clock.now(),
        );

        log::info!(
            "[Treasury] TXN {} proposed by {} for €{}.",
            tx.short_id(),
            proposer,
            tx.amount
        );
        self.transactions.insert(tx_id.clone(), tx);
        Ok(tx_id)
    }

    /// Record `signer`'s approval. Repeat approvals are no-ops.
    ///
    /// Returns the transaction status after the approval.
    pub fn approve_transaction(&mut self, signer: &str, tx_id: &str) -> Result<TransactionStatus> {
        self.ensure_signer(signer)?;
        let now = self.clock.now();

        let tx = self
            .transactions
            .get_mut(tx_id)
            .ok_or_else(|| TreasuryError::TransactionNotFound(tx_id.to_string()))?;

        if tx.status != TransactionStatus::Pending {
            log::warn!(
                "[Treasury] Approval by {} rejected: TXN {} is {}",
                signer,
                short_id(tx_id),
                tx.status
            );
            return Err(TreasuryError::InvalidStatus {
                tx_id: tx_id.to_string(),
                expected: TransactionStatus::Pending,
                actual: tx.status,
            });
        }

        tx.approvals.insert(signer.to_string());
        log::info!(
            "[Treasury] TXN {} approved by {}. Total approvals: {}/{}.",
            tx.short_id(),
            signer,
            tx.approval_count(),
            REQUIRED_SIGNERS
        );

        if tx.approval_count() == REQUIRED_SIGNERS {
            tx.status = TransactionStatus::Approved;
            tx.final_approval_at = Some(now);
            log::info!(
                "[Treasury] Final approval for TXN {} received. {}-day timelock has begun.",
                tx.short_id(),
                TIMELOCK_DAYS
            );
        }

        Ok(tx.status)
    }

    /// Move the funds of an approved transaction once its timelock expired.
    pub fn execute_transaction(&mut self, tx_id: &str) -> Result<Money> {
        let now = self.clock.now();
        let balance = self.balance;

        let tx = self
            .transactions
            .get_mut(tx_id)
            .ok_or_else(|| TreasuryError::TransactionNotFound(tx_id.to_string()))?;

        if tx.status != TransactionStatus::Approved {
            return Err(TreasuryError::InvalidStatus {
                tx_id: tx_id.to_string(),
                expected: TransactionStatus::Approved,
                actual: tx.status,
            });
        }

        let unlocks_at = match tx.unlocks_at(timelock_duration()) {
            Some(at) => at,
            None => {
                return Err(TreasuryError::InvalidStatus {
                    tx_id: tx_id.to_string(),
                    expected: TransactionStatus::Approved,
                    actual: tx.status,
                })
            }
        };
        if now < unlocks_at {
            log::warn!(
                "[Treasury] TXN {} still timelocked until {}",
                tx.short_id(),
                unlocks_at
            );
            return Err(TreasuryError::TimelockActive {
                tx_id: tx_id.to_string(),
                unlocks_at,
            });
        }

        let remaining =
            balance
                .checked_sub(tx.amount)
                .ok_or(TreasuryError::InsufficientBalance {
                    requested: tx.amount,
                    available: balance,
                })?;

        tx.status = TransactionStatus::Executed;
        tx.executed_at = Some(now);
        log::info!(
            "[Treasury] SUCCESS: TXN {} executed. €{} sent to {}.",
            tx.short_id(),
            tx.amount,
            tx.recipient
        );

        self.balance = remaining;
        log::info!("[Treasury] Remaining Balance: €{}", self.balance);
        Ok(self.balance)
    }

    /// Get transaction by ID
    pub fn transaction(&self, tx_id: &str) -> Option<&TreasuryTransaction> {
        self.transactions.get(tx_id)
    }

    /// Get transactions by status, oldest first
    pub fn transactions_by_status(&self, status: TransactionStatus) -> Vec<&TreasuryTransaction> {
        let mut txs: Vec<_> = self
            .transactions
            .values()
            .filter(|tx| tx.status == status)
            .collect();
        txs.sort_by_key(|tx| tx.created_at);
        txs
    }

    /// When an approved transaction may execute
    pub fn unlocks_at(&self, tx_id: &str) -> Option<DateTime<Utc>> {
        self.transactions
            .get(tx_id)
            .and_then(|tx| tx.unlocks_at(timelock_duration()))
    }

    pub fn stats(&self) -> TreasuryStats {
        let count = |status: TransactionStatus| {
            self.transactions
                .values()
                .filter(|tx| tx.status == status)
                .count()
        };

        TreasuryStats {
            balance: self.balance,
            total_deposited: self.total_deposited,
            total_executed: self
                .transactions
                .values()
                .filter(|tx| tx.status == TransactionStatus::Executed)
                .map(|tx| tx.amount)
                .sum(),
            pending: count(TransactionStatus::Pending),
            approved: count(TransactionStatus::Approved),
            executed: count(TransactionStatus::Executed),
        }
    }

    fn ensure_signer(&self, identity: &str) -> Result<()> {
        if self.is_signer(identity) {
            Ok(())
        } else {
            log::warn!("[Treasury] {} is not authorized.", identity);
            Err(TreasuryError::Unauthorized(identity.to_string()))
        }
    }

    fn fresh_id(&self) -> String {
        loop {
            let id = Uuid::new_v4().to_string();
            if !self.transactions.contains_key(&id) {
                return id;
            }
        }
    }
}
