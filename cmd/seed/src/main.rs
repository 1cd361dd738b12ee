//! Seeds the demo accounts: hashes the configured passwords and writes
//! `seed_accounts.json` for the main binary to load. This is the only
//! path that creates `Role::Admin` identities.

use anyhow::Context;
use secrecy::ExposeSecret;
use tracing::info;
use tracing_subscriber::EnvFilter;

use auth_adapters::{hash_password, SeedAccount};
use configs::FestivalConfig;
use domains::{Identity, IdentityId};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let cfg = FestivalConfig::load().context("loading festival configuration")?;

    let mut accounts = Vec::with_capacity(cfg.seed_accounts.len());
    for (index, seed) in cfg.seed_accounts.iter().enumerate() {
        let identity = Identity {
            id: IdentityId::from((index + 1).to_string().as_str()),
            name: seed.name.clone(),
            email: seed.email.clone(),
            role: seed.role,
        };
        let password_hash = hash_password(seed.password.expose_secret())
            .with_context(|| format!("hashing password for {}", seed.email))?;
        accounts.push(SeedAccount {
            identity,
            password_hash,
        });
    }

    tokio::fs::create_dir_all(&cfg.data_dir)
        .await
        .context("creating data directory")?;
    let path = cfg.seed_accounts_file();
    tokio::fs::write(&path, serde_json::to_vec_pretty(&accounts)?)
        .await
        .with_context(|| format!("writing {}", path.display()))?;

    info!(count = accounts.len(), path = %path.display(), "seed accounts written");
    Ok(())
}
