//! RangerBlock Economics Module
//!
//! Implements the fair-trade economic model:
//! - The Education Fund that receives a tithe from every sale
//! - The fixed five-way revenue split applied to each purchase

pub mod education_fund;
pub mod error;
pub mod revenue;

pub use education_fund::{EducationFund, Tithe};
pub use error::{EducationFundError, Result};
pub use revenue::{RevenueDistribution, RevenueSplit};

/// Fair Trade Protocol shares (parts per ten thousand)
pub mod constants {
    /// Creator share (73.60%)
    pub const CREATOR_SHARE_BPS: i64 = 7_360;

    /// Education Fund tithe (10.00%)
    pub const EDUCATION_SHARE_BPS: i64 = 1_000;

    /// Operations share (6.40%)
    pub const OPS_SHARE_BPS: i64 = 640;

    /// Partners share (5.00%)
    pub const PARTNERS_SHARE_BPS: i64 = 500;

    /// Investment share (5.00%)
    pub const INVESTMENT_SHARE_BPS: i64 = 500;

    /// Denominator for all shares
    pub const BPS_DENOMINATOR: i64 = 10_000;
}

#[cfg(test)]
mod tests {
    use super::constants::*;

    #[test]
    fn test_shares_sum_to_one() {
        let total = CREATOR_SHARE_BPS
            + EDUCATION_SHARE_BPS
            + OPS_SHARE_BPS
            + PARTNERS_SHARE_BPS
            + INVESTMENT_SHARE_BPS;
        assert_eq!(total, BPS_DENOMINATOR);
    }
}
