//! # configs
//!
//! Festival configuration: defaults, then an optional `mushaira.toml`,
//! then `MUSHAIRA_*` environment overrides. Demo account passwords are
//! wrapped in `SecretString` and never logged or written back out.

use std::path::PathBuf;

use secrecy::SecretString;
use serde::Deserialize;
use thiserror::Error;
use tracing::debug;

use domains::{Language, Role};

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("configuration error: {0}")]
    Load(#[from] config::ConfigError),
}

/// A demo account provisioned by `cmd/seed`.
#[derive(Debug, Deserialize)]
pub struct SeedAccountConfig {
    pub name: String,
    pub email: String,
    pub role: Role,
    pub password: SecretString,
}

#[derive(Debug, Deserialize)]
pub struct FestivalConfig {
    /// Length of the festival; opening verses are tied to days `1..=N`.
    #[serde(default = "defaults::festival_days")]
    pub festival_days: u8,

    /// Minimum length of a manually typed entry, in characters.
    #[serde(default = "defaults::min_poem_chars")]
    pub min_poem_chars: usize,

    /// Languages open for submission this festival, in display order.
    #[serde(default = "defaults::languages")]
    pub languages: Vec<Language>,

    /// Directory for the session record and the seed file.
    #[serde(default = "defaults::data_dir")]
    pub data_dir: PathBuf,

    /// Accounts written by `cmd/seed`. The only way `Role::Admin` enters
    /// the system.
    #[serde(default = "defaults::seed_accounts")]
    pub seed_accounts: Vec<SeedAccountConfig>,
}

impl FestivalConfig {
    /// Loads configuration from `mushaira.toml` (optional) and the
    /// `MUSHAIRA_*` environment.
    pub fn load() -> Result<Self, ConfigError> {
        let cfg: FestivalConfig = config::Config::builder()
            .add_source(config::File::with_name("mushaira").required(false))
            .add_source(
                config::Environment::with_prefix("MUSHAIRA")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?
            .try_deserialize()?;
        debug!(
            days = cfg.festival_days,
            languages = cfg.languages.len(),
            "configuration loaded"
        );
        Ok(cfg)
    }

    pub fn seed_accounts_file(&self) -> PathBuf {
        self.data_dir.join("seed_accounts.json")
    }
}

impl Default for FestivalConfig {
    fn default() -> Self {
        Self {
            festival_days: defaults::festival_days(),
            min_poem_chars: defaults::min_poem_chars(),
            languages: defaults::languages(),
            data_dir: defaults::data_dir(),
            seed_accounts: defaults::seed_accounts(),
        }
    }
}

mod defaults {
    use super::*;

    pub fn festival_days() -> u8 {
        10
    }

    pub fn min_poem_chars() -> usize {
        20
    }

    pub fn languages() -> Vec<Language> {
        Language::DECLARED_ORDER.to_vec()
    }

    pub fn data_dir() -> PathBuf {
        PathBuf::from("./data")
    }

    pub fn seed_accounts() -> Vec<SeedAccountConfig> {
        vec![
            SeedAccountConfig {
                name: "Admin User".to_string(),
                email: "admin@poetry.com".to_string(),
                role: Role::Admin,
                password: SecretString::from("password123".to_string()),
            },
            SeedAccountConfig {
                name: "Regular User".to_string(),
                email: "user@poetry.com".to_string(),
                role: Role::User,
                password: SecretString::from("password123".to_string()),
            },
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_cover_the_festival() {
        let cfg = FestivalConfig::default();
        assert_eq!(cfg.festival_days, 10);
        assert_eq!(cfg.min_poem_chars, 20);
        assert_eq!(cfg.languages.len(), 5);
        assert!(cfg
            .seed_accounts
            .iter()
            .any(|a| a.role == Role::Admin));
        assert!(cfg.seed_accounts_file().ends_with("seed_accounts.json"));
    }
}
