//! Scripted walkthrough of the contracts on a simulated clock

use anyhow::{anyhow, Result};
use chrono::{Duration, Utc};
use ranger_core::{ManualClock, Money};
use ranger_economics::{EducationFund, RevenueDistribution};
use ranger_marketplace::FairTradeMarketplace;
use ranger_treasury::{timelock_duration, TransactionStatus, TreasuryStats};
use rust_decimal::Decimal;
use serde::Serialize;
use std::sync::Arc;

use crate::config::Config;

#[derive(Debug, Clone, Serialize)]
pub struct DemoReport {
    pub treasury: TreasuryStats,
    pub payout_status: TransactionStatus,
    pub education_fund_balance: Money,
    pub sales: Vec<RevenueDistribution>,
    pub events: Vec<String>,
}

pub fn run_demo(config: &Config) -> Result<DemoReport> {
    let clock = Arc::new(ManualClock::new(Utc::now()));
    let mut events = Vec::new();

    // Treasury: propose, approve, wait out the timelock, execute
    let mut treasury = config.build_treasury(clock.clone())?;
    let signers: Vec<String> = treasury.signers().map(str::to_string).collect();
    if config.treasury.initial_deposit.is_positive() {
        treasury.deposit(config.treasury.initial_deposit)?;
    }

    let payout = treasury.balance().share(Decimal::new(5, 1));
    let payout = if payout.is_positive() {
        payout
    } else {
        Money::from_cents(1)
    };

    let tx_id = treasury.propose_transaction(
        &signers[0],
        "education-partners",
        payout,
        "Quarterly education grant",
    )?;
    events.push(format!("{} proposed payout of €{}", signers[0], payout));

    for signer in &signers[1..] {
        clock.advance(Duration::hours(1));
        let status = treasury.approve_transaction(signer, &tx_id)?;
        events.push(format!("{} approved ({})", signer, status));
    }

    clock.advance(Duration::days(1));
    match treasury.execute_transaction(&tx_id) {
        Err(e) => events.push(format!("early execution rejected: {}", e)),
        Ok(_) => return Err(anyhow!("timelock did not hold")),
    }

    clock.advance(timelock_duration());
    match treasury.execute_transaction(&tx_id) {
        Ok(balance) => events.push(format!("payout executed, treasury balance €{}", balance)),
        Err(e) => events.push(format!("payout failed: {}", e)),
    }
    let payout_status = treasury
        .transaction(&tx_id)
        .map(|tx| tx.status)
        .ok_or_else(|| anyhow!("payout {} vanished", tx_id))?;

    // Marketplace: list, buy, hit the spend cap, buy again next day
    let fund = Arc::new(EducationFund::new());
    let mut market = FairTradeMarketplace::new(Arc::clone(&fund), clock.clone());
    let mut sales = Vec::new();

    let song = market.list_item("creator-ada", "Ranger Anthem", Money::from_cents(700))?;
    let sketch = market.list_item("creator-lin", "Ship Sketch", Money::from_cents(500))?;
    events.push("two items listed".to_string());

    match market.list_item("creator-ada", "Second Anthem", Money::from_cents(300)) {
        Err(e) => events.push(format!("second listing rejected: {}", e)),
        Ok(_) => return Err(anyhow!("listing cooldown did not hold")),
    }

    sales.push(market.purchase_item("buyer-sam", &song)?);
    events.push("buyer-sam bought Ranger Anthem".to_string());

    clock.advance(Duration::hours(1));
    match market.purchase_item("buyer-sam", &sketch) {
        Err(e) => events.push(format!("second purchase rejected: {}", e)),
        Ok(_) => return Err(anyhow!("spend cap did not hold")),
    }

    clock.advance(Duration::hours(24));
    sales.push(market.purchase_item("buyer-sam", &sketch)?);
    events.push("buyer-sam bought Ship Sketch the next day".to_string());

    Ok(DemoReport {
        treasury: treasury.stats(),
        payout_status,
        education_fund_balance: fund.balance(),
        sales,
        events,
    })
}
