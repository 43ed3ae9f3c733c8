//! RangerBlock Fair Trade Marketplace
//!
//! Listing and purchase flow with:
//! - a €19.99 price cap and one listing per creator per 24 hours
//! - a €10.00 rolling 24-hour spend cap per buyer
//! - the five-way Fair Trade revenue split, with the education share
//!   paid into a shared `EducationFund`

pub mod error;
pub mod item;
pub mod marketplace;
pub mod policy;
pub mod rate_limit;

pub use error::{MarketplaceError, Result};
pub use item::{Item, ItemStatus};
pub use marketplace::FairTradeMarketplace;
pub use rate_limit::{ListingRateLimiter, SpendTracker};
