//! Rejection taxonomy shared by every contract
//!
//! Each contract has its own error enum; `ErrorKind` is the coarse
//! classification a host can match on without knowing the contract.

use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ErrorKind {
    /// Contract constructed with an invalid setup
    Configuration,
    /// Caller is not allowed to perform the operation
    Authorization,
    /// Target is missing or in the wrong lifecycle state
    State,
    /// A time gate has not opened yet
    Timing,
    /// Not enough balance to cover the operation
    Funds,
    /// A price, rate or spend policy would be exceeded
    PolicyLimit,
    /// Malformed input such as a non-positive amount
    Validation,
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Configuration => "configuration",
            Self::Authorization => "authorization",
            Self::State => "state",
            Self::Timing => "timing",
            Self::Funds => "funds",
            Self::PolicyLimit => "policy-limit",
            Self::Validation => "validation",
        };
        write!(f, "{}", name)
    }
}
