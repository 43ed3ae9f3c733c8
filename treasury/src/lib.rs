//! RangerBlock Treasury Module
//!
//! Community treasury guarded by a 3-of-3 multi-signature approval flow
//! and a 7-day timelock between quorum and execution.
//!
//! Funds only leave through `MultiSigTreasury::execute_transaction`.

pub mod error;
pub mod multisig;
pub mod transaction;

pub use error::{Result, TreasuryError};
pub use multisig::{
    timelock_duration, MultiSigTreasury, TreasuryStats, REQUIRED_SIGNERS, TIMELOCK_DAYS,
};
pub use transaction::{TransactionStatus, TreasuryTransaction};
