//! Host configuration (`ranger.toml`)
//!
//! ```toml
//! [treasury]
//! signers = ["alice", "bob", "carol"]
//! initial_deposit = "1000.00"
//!
//! [logging]
//! level = "info"
//! ```

use anyhow::{Context, Result};
use ranger_core::{Money, SharedClock};
use ranger_treasury::MultiSigTreasury;
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub treasury: TreasuryConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TreasuryConfig {
    pub signers: Vec<String>,

    #[serde(default = "default_deposit")]
    pub initial_deposit: Money,
}

impl Default for TreasuryConfig {
    fn default() -> Self {
        Self {
            signers: vec!["alice".to_string(), "bob".to_string(), "carol".to_string()],
            initial_deposit: default_deposit(),
        }
    }
}

fn default_deposit() -> Money {
    Money::from_cents(100_000)
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// env_logger filter used when RUST_LOG is unset
    #[serde(default = "default_level")]
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_level(),
        }
    }
}

fn default_level() -> String {
    "info".to_string()
}

impl Config {
    pub fn load(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("reading config {}", path.display()))?;
        let config: Config = toml::from_str(&contents)
            .with_context(|| format!("parsing config {}", path.display()))?;
        Ok(config)
    }

    /// Load `path` if given; a missing or broken file falls back to defaults.
    ///
    /// The load error is handed back so it can be logged once logging is up.
    pub fn load_or_default(path: Option<&Path>) -> (Self, Option<anyhow::Error>) {
        match path.map(Self::load) {
            Some(Ok(config)) => (config, None),
            Some(Err(e)) => (Config::default(), Some(e)),
            None => (Config::default(), None),
        }
    }

    /// Build the treasury this config describes
    pub fn build_treasury(&self, clock: SharedClock) -> Result<MultiSigTreasury> {
        let treasury = MultiSigTreasury::new(self.treasury.signers.iter().cloned(), clock)
            .context("invalid [treasury] signers")?;
        Ok(treasury)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ranger_core::SystemClock;
    use std::io::Write;

    #[test]
    fn test_parse_full_config() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            file,
            r#"
[treasury]
signers = ["x", "y", "z"]
initial_deposit = "250.505"

[logging]
level = "debug"
"#
        )
        .unwrap();

        let config = Config::load(file.path()).unwrap();
        assert_eq!(config.treasury.signers, vec!["x", "y", "z"]);
        assert_eq!(config.treasury.initial_deposit, Money::from_cents(25_051));
        assert_eq!(config.logging.level, "debug");
        assert!(config.build_treasury(SystemClock::shared()).is_ok());
    }

    #[test]
    fn test_sections_default() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[treasury]\nsigners = [\"a\", \"b\", \"c\"]").unwrap();

        let config = Config::load(file.path()).unwrap();
        assert_eq!(config.treasury.initial_deposit, Money::from_cents(100_000));
        assert_eq!(config.logging, LoggingConfig::default());
    }

    #[test]
    fn test_missing_file_falls_back() {
        let dir = tempfile::tempdir().unwrap();
        let (config, error) = Config::load_or_default(Some(&dir.path().join("absent.toml")));
        assert_eq!(config, Config::default());
        let message = format!("{:#}", error.unwrap());
        assert!(message.contains("absent.toml"));

        let (config, error) = Config::load_or_default(None);
        assert_eq!(config, Config::default());
        assert!(error.is_none());
    }

    #[test]
    fn test_broken_file_reports_parse_error() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[treasury\nsigners = 3").unwrap();

        let (config, error) = Config::load_or_default(Some(file.path()));
        assert_eq!(config, Config::default());
        assert!(format!("{:#}", error.unwrap()).starts_with("parsing config"));
    }

    #[test]
    fn test_bad_signer_set_is_reported() {
        let config = Config {
            treasury: TreasuryConfig {
                signers: vec!["solo".to_string()],
                initial_deposit: Money::zero(),
            },
            logging: LoggingConfig::default(),
        };
        assert!(config.build_treasury(SystemClock::shared()).is_err());
    }
}
