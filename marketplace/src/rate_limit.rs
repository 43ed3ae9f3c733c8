//! Rate limiting for listings and purchases
//!
//! Both limits are evaluated lazily against the caller's clock reading;
//! nothing runs in the background. Expired spend entries are pruned only
//! when a new purchase is recorded for the same buyer.

use chrono::{DateTime, Duration, Utc};
use ranger_core::Money;
use std::collections::HashMap;

/// One listing per creator per cooldown period
#[derive(Debug, Clone)]
pub struct ListingRateLimiter {
    /// creator_id -> time of most recent listing
    last_listing: HashMap<String, DateTime<Utc>>,
    cooldown: Duration,
}

impl ListingRateLimiter {
    pub fn new(cooldown: Duration) -> Self {
        Self {
            last_listing: HashMap::new(),
            cooldown,
        }
    }

    /// `Err(next_allowed)` if the creator listed less than a cooldown ago
    pub fn check(&self, creator_id: &str, now: DateTime<Utc>) -> Result<(), DateTime<Utc>> {
        match self.last_listing.get(creator_id) {
            Some(last) if now - *last < self.cooldown => Err(*last + self.cooldown),
            _ => Ok(()),
        }
    }

    pub fn record(&mut self, creator_id: &str, now: DateTime<Utc>) {
        self.last_listing.insert(creator_id.to_string(), now);
    }

    #[cfg(test)]
    fn last_listing(&self, creator_id: &str) -> Option<DateTime<Utc>> {
        self.last_listing.get(creator_id).copied()
    }
}

/// Rolling per-buyer spend cap
#[derive(Debug, Clone)]
pub struct SpendTracker {
    /// buyer_id -> (time, amount), oldest first
    history: HashMap<String, Vec<(DateTime<Utc>, Money)>>,
    window: Duration,
    limit: Money,
}

impl SpendTracker {
    pub fn new(window: Duration, limit: Money) -> Self {
        Self {
            history: HashMap::new(),
            window,
            limit,
        }
    }

    pub fn limit(&self) -> Money {
        self.limit
    }

    fn in_window(&self, at: DateTime<Utc>, now: DateTime<Utc>) -> bool {
        now - at < self.window
    }

    /// Sum of the buyer's purchases inside the window ending at `now`
    pub fn window_total(&self, buyer_id: &str, now: DateTime<Utc>) -> Money {
        self.history
            .get(buyer_id)
            .map(|entries| {
                entries
                    .iter()
                    .filter(|(at, _)| self.in_window(*at, now))
                    .map(|(_, amount)| *amount)
                    .sum::<Money>()
            })
            .unwrap_or_default()
    }

    /// `Err(spent)` if `amount` on top of the window total would pass the limit
    pub fn check(&self, buyer_id: &str, amount: Money, now: DateTime<Utc>) -> Result<(), Money> {
        let spent = self.window_total(buyer_id, now);
        if spent + amount > self.limit {
            Err(spent)
        } else {
            Ok(())
        }
    }

    /// Drop the buyer's entries that fell out of the window
    pub fn prune(&mut self, buyer_id: &str, now: DateTime<Utc>) {
        let window = self.window;
        if let Some(entries) = self.history.get_mut(buyer_id) {
            entries.retain(|(at, _)| now - *at < window);
        }
    }

    /// Prune, then append a purchase
    pub fn record(&mut self, buyer_id: &str, amount: Money, now: DateTime<Utc>) {
        self.prune(buyer_id, now);
        self.history
            .entry(buyer_id.to_string())
            .or_default()
            .push((now, amount));
    }

    /// Stored entries for a buyer, including any not yet pruned
    #[cfg(test)]
    fn entry_count(&self, buyer_id: &str) -> usize {
        self.history.get(buyer_id).map_or(0, Vec::len)
    }
}
