//! Marketplace policy
//!
//! Fixed limits of the Fair Trade Protocol. These are part of the contract,
//! not host configuration.

use chrono::Duration;
use ranger_core::Money;

/// Highest price a creator may ask (in cents): €19.99
pub const MAX_LISTING_PRICE_CENTS: i64 = 1_999;

/// Most a buyer may spend inside one spend window (in cents): €10.00
pub const SPEND_LIMIT_CENTS: i64 = 1_000;

/// Minimum gap between two listings by the same creator
pub const LISTING_COOLDOWN_HOURS: i64 = 24;

/// Length of the rolling spend window
pub const SPEND_WINDOW_HOURS: i64 = 24;

pub fn max_listing_price() -> Money {
    Money::from_cents(MAX_LISTING_PRICE_CENTS)
}

pub fn spend_limit() -> Money {
    Money::from_cents(SPEND_LIMIT_CENTS)
}

pub fn listing_cooldown() -> Duration {
    Duration::hours(LISTING_COOLDOWN_HOURS)
}

pub fn spend_window() -> Duration {
    Duration::hours(SPEND_WINDOW_HOURS)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_policy_values() {
        assert_eq!(max_listing_price().to_string(), "19.99");
        assert_eq!(spend_limit().to_string(), "10.00");
        assert_eq!(listing_cooldown(), Duration::days(1));
        assert_eq!(spend_window(), Duration::days(1));
    }
}
