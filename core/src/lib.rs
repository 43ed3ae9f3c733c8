//! RangerBlock Core Library
//!
//! Shared building blocks for the RangerBlock contracts:
//! - `Money`: two-place decimal amounts with half-up rounding
//! - `Clock`: injectable UTC time source
//! - `ErrorKind`: the rejection taxonomy every contract maps into

pub mod clock;
pub mod error;
pub mod money;

pub use clock::{Clock, ManualClock, SharedClock, SystemClock};
pub use error::ErrorKind;
pub use money::{Money, MoneyError, MONEY_SCALE};
