//! RangerBlock host CLI
//!
//! Embeds the contract crates in a small binary that can walk through the
//! treasury and marketplace flows, print revenue splits and validate a
//! `ranger.toml`.

mod config;
mod demo;

use anyhow::Result;
use clap::{Parser, Subcommand};
use owo_colors::OwoColorize;
use ranger_core::{Money, SystemClock};
use ranger_economics::RevenueDistribution;
use std::path::PathBuf;

use crate::config::Config;
use crate::demo::{run_demo, DemoReport};

#[derive(Parser)]
#[command(name = "ranger")]
#[command(about = "RangerBlock contract host")]
#[command(version = concat!(env!("CARGO_PKG_VERSION"), " (", env!("GIT_HASH"), ")"))]
struct Cli {
    /// Path to configuration file
    #[arg(short, long, value_name = "FILE", global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the treasury and marketplace walkthrough on a simulated clock
    Demo {
        /// Print the report as JSON
        #[arg(long)]
        json: bool,
    },
    /// Show the Fair Trade split for a price
    Split {
        /// Sale price, e.g. 19.99
        price: Money,

        /// Print the split as JSON
        #[arg(long)]
        json: bool,
    },
    /// Load the config and check that it builds a treasury
    CheckConfig,
}

fn init_logging(config: &Config) {
    env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or(config.logging.level.as_str()),
    )
    .init();
}

fn print_split(dist: &RevenueDistribution) {
    println!("{} €{}", "Sale price:".yellow().bold(), dist.price);
    for (label, amount) in dist.entries() {
        println!("  {:<16} €{}", label, amount.to_string().green());
    }
    println!("  {:<16} €{}", "residue", dist.residue());
}

fn print_report(report: &DemoReport) {
    println!("{}", "RangerBlock contract walkthrough".cyan().bold());
    println!("{}", "━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━".bright_black());
    for (i, event) in report.events.iter().enumerate() {
        println!("  {}. {}", i + 1, event);
    }

    println!("\n{}", "Treasury".yellow().bold());
    println!("  balance:         €{}", report.treasury.balance);
    println!("  total deposited: €{}", report.treasury.total_deposited);
    println!("  total executed:  €{}", report.treasury.total_executed);
    println!("  payout status:   {}", report.payout_status);

    println!("\n{}", "Marketplace".yellow().bold());
    for dist in &report.sales {
        print_split(dist);
    }
    println!(
        "\n{} €{}",
        "Education Fund:".green().bold(),
        report.education_fund_balance
    );
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let (config, load_error) = Config::load_or_default(cli.config.as_deref());
    init_logging(&config);
    if let Some(e) = load_error {
        log::warn!("Could not load config, using defaults: {:#}", e);
    }

    match cli.command {
        Commands::Demo { json } => {
            let report = run_demo(&config)?;
            if json {
                println!("{}", serde_json::to_string_pretty(&report)?);
            } else {
                print_report(&report);
            }
        }
        Commands::Split { price, json } => {
            let dist = RevenueDistribution::from_price(price);
            if json {
                println!("{}", serde_json::to_string_pretty(&dist)?);
            } else {
                print_split(&dist);
            }
        }
        Commands::CheckConfig => {
            let treasury = config.build_treasury(SystemClock::shared())?;
            println!("{}", "✓ Config is valid".green());
            println!(
                "  signers: {}",
                treasury.signers().collect::<Vec<_>>().join(", ")
            );
            println!("  initial deposit: €{}", config.treasury.initial_deposit);
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_split() {
        let cli = Cli::try_parse_from(["ranger", "split", "19.99", "--json"]).unwrap();
        match cli.command {
            Commands::Split { price, json } => {
                assert_eq!(price, Money::from_cents(1999));
                assert!(json);
            }
            _ => panic!("expected split"),
        }
    }

    #[test]
    fn test_parse_rejects_bad_price() {
        assert!(Cli::try_parse_from(["ranger", "split", "abc"]).is_err());
    }

    #[test]
    fn test_global_config_flag() {
        let cli = Cli::try_parse_from(["ranger", "demo", "--config", "ranger.toml"]).unwrap();
        assert_eq!(cli.config, Some(PathBuf::from("ranger.toml")));
    }
}
