//! Fair Trade Marketplace
//!
//! Creators list items under a price cap, at most once per 24 hours.
//! Buyers purchase them subject to a rolling 24-hour spend cap. Each sale
//! is split five ways; the education share is paid straight into the
//! shared `EducationFund`, the rest is returned for the host to settle.

use ranger_core::{Money, SharedClock};
use ranger_economics::{EducationFund, RevenueDistribution, RevenueSplit};
use std::collections::HashMap;
use std::sync::Arc;
use uuid::Uuid;

use crate::error::{MarketplaceError, Result};
use crate::item::{Item, ItemStatus};
use crate::policy;
use crate::rate_limit::{ListingRateLimiter, SpendTracker};

pub struct FairTradeMarketplace {
    education_fund: Arc<EducationFund>,
    clock: SharedClock,
    split: RevenueSplit,
    items: HashMap<String, Item>,
    listings: ListingRateLimiter,
    spending: SpendTracker,
}

impl FairTradeMarketplace {
    pub fn new(education_fund: Arc<EducationFund>, clock: SharedClock) -> Self {
        Self {
            education_fund,
            clock,
            split: RevenueSplit::fair_trade(),
            items: HashMap::new(),
            listings: ListingRateLimiter::new(policy::listing_cooldown()),
            spending: SpendTracker::new(policy::spend_window(), policy::spend_limit()),
        }
    }

    /// List a new item and return its id.
    pub fn list_item(&mut self, creator_id: &str, item_name: &str, price: Money) -> Result<String> {
        let cap = policy::max_listing_price();
        if price > cap {
            log::warn!(
                "[Marketplace] {} tried to list '{}' at €{} (cap €{})",
                creator_id,
                item_name,
                price,
                cap
            );
            return Err(MarketplaceError::PriceAboveCap { price, cap });
        }
        if !price.is_positive() {
            return Err(MarketplaceError::InvalidPrice(price));
        }

        let now = self.clock.now();
        if let Err(next_allowed) = self.listings.check(creator_id, now) {
            log::warn!(
                "[Marketplace] {} is rate limited until {}",
                creator_id,
                next_allowed
            );
            return Err(MarketplaceError::ListingRateLimited {
                creator_id: creator_id.to_string(),
                next_allowed,
            });
        }

        let item_id = self.fresh_id();
        let item = Item {
            item_id: item_id.clone(),
            creator_id: creator_id.to_string(),
            name: item_name.to_string(),
            price,
            status: ItemStatus::Available,
            listed_at: now,
            buyer_id: None,
            sold_at: None,
        };
        log::info!(
            "[Marketplace] Item '{}' ({}) listed by {} for €{}.",
            item_name,
            item.short_id(),
            creator_id,
            price
        );

        self.items.insert(item_id.clone(), item);
        self.listings.record(creator_id, now);
        Ok(item_id)
    }

    /// Buy an available item.
    ///
    /// Returns the revenue split for the host to apply. The education
    /// share has already been paid into the fund when this returns. On any
    /// error nothing is modified.
    pub fn purchase_item(&mut self, buyer_id: &str, item_id: &str) -> Result<RevenueDistribution> {
        let item = self
            .items
            .get(item_id)
            .ok_or_else(|| MarketplaceError::ItemNotFound(item_id.to_string()))?;
        if !item.is_available() {
            return Err(MarketplaceError::ItemNotAvailable(item_id.to_string()));
        }
        let price = item.price;
        let name = item.name.clone();

        let now = self.clock.now();
        if let Err(spent) = self.spending.check(buyer_id, price, now) {
            log::warn!(
                "[Marketplace] {} blocked by spend cap: €{} spent, €{} requested",
                buyer_id,
                spent,
                price
            );
            return Err(MarketplaceError::SpendLimitExceeded {
                buyer_id: buyer_id.to_string(),
                amount: price,
                spent,
                limit: self.spending.limit(),
            });
        }

        let distribution = self.split.distribute(price);
        self.education_fund
            .receive_tithe(distribution.education_fund, &format!("purchase of {}", name))?;

        if let Some(item) = self.items.get_mut(item_id) {
            item.status = ItemStatus::Sold;
            item.buyer_id = Some(buyer_id.to_string());
            item.sold_at = Some(now);
        }
        self.spending.record(buyer_id, price, now);

        log::info!(
            "[Marketplace] SUCCESS: {} purchased '{}' for €{}.",
            buyer_id,
            name,
            price
        );
        Ok(distribution)
    }

    pub fn item(&self, item_id: &str) -> Option<&Item> {
        self.items.get(item_id)
    }

    /// Items still for sale, oldest listing first
    pub fn available_items(&self) -> Vec<&Item> {
        let mut items: Vec<_> = self.items.values().filter(|i| i.is_available()).collect();
        items.sort_by_key(|i| i.listed_at);
        items
    }

    pub fn items_by_creator(&self, creator_id: &str) -> Vec<&Item> {
        let mut items: Vec<_> = self
            .items
            .values()
            .filter(|i| i.creator_id == creator_id)
            .collect();
        items.sort_by_key(|i| i.listed_at);
        items
    }

    pub fn education_fund(&self) -> &Arc<EducationFund> {
        &self.education_fund
    }

    /// What the buyer has spent in the current window
    pub fn buyer_window_total(&self, buyer_id: &str) -> Money {
        self.spending.window_total(buyer_id, self.clock.now())
    }

    fn fresh_id(&self) -> String {
        loop {
            let id = Uuid::new_v4().to_string();
            if !self.items.contains_key(&id) {
                return id;
            }
        }
    }
}
