//! # Mushaira
//!
//! Composition root for the festival workflow core. Assembles the
//! in-memory adapters behind the domain ports, restores any persisted
//! session, and runs a short walkthrough of the submission lifecycle.
//! A presentation layer would hold the same service handles and call
//! the same contracts.

mod demo;

use std::sync::Arc;

use anyhow::Context;
use secrecy::ExposeSecret;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use auth_adapters::{ArgonCredentialStore, SeedAccount};
use configs::FestivalConfig;
use domains::{Role, SubmissionRepo, SystemClock};
use services::{query, NewVerse, SessionService, SubmissionQuery, VerseService, WorkflowService};
use storage_adapters::{FileSessionStorage, MemorySubmissionRepo, MemoryVerseRepo};

/// Loads the seed file written by `cmd/seed`, or provisions the
/// configured accounts in-process when it is missing.
async fn credential_store(cfg: &FestivalConfig) -> anyhow::Result<ArgonCredentialStore> {
    let path = cfg.seed_accounts_file();
    match tokio::fs::read(&path).await {
        Ok(bytes) => {
            let accounts: Vec<SeedAccount> =
                serde_json::from_slice(&bytes).context("parsing seed accounts")?;
            info!(count = accounts.len(), "loaded seeded accounts");
            Ok(ArgonCredentialStore::from_seed(accounts))
        }
        Err(_) => {
            warn!(path = %path.display(), "seed file missing, hashing configured accounts");
            let mut accounts = Vec::new();
            for (index, seed) in cfg.seed_accounts.iter().enumerate() {
                accounts.push(SeedAccount {
                    identity: domains::Identity {
                        id: domains::IdentityId::from((index + 1).to_string().as_str()),
                        name: seed.name.clone(),
                        email: seed.email.clone(),
                        role: seed.role,
                    },
                    password_hash: auth_adapters::hash_password(seed.password.expose_secret())?,
                });
            }
            Ok(ArgonCredentialStore::from_seed(accounts))
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let cfg = FestivalConfig::load().context("loading festival configuration")?;

    // Adapters behind the domain ports.
    let credentials = Arc::new(credential_store(&cfg).await?);
    let session_storage = Arc::new(FileSessionStorage::new(&cfg.data_dir));
    let submissions = Arc::new(MemorySubmissionRepo::new());
    let verse_repo = Arc::new(MemoryVerseRepo::new());
    let clock = Arc::new(SystemClock);

    submissions.seed(demo::submissions()?).await;
    verse_repo.seed(demo::verses()?);

    // Services.
    let session = SessionService::new(credentials, session_storage);
    let workflow = WorkflowService::new(submissions.clone(), verse_repo.clone(), clock.clone())
        .with_min_poem_chars(cfg.min_poem_chars);
    let verse_service = VerseService::new(verse_repo.clone(), submissions.clone(), clock)
        .with_festival_days(cfg.festival_days);

    if let Some(identity) = session.restore().await? {
        info!(user = %identity.id, "session restored from previous run");
    }

    // Walkthrough: the admin reviews the queue and curates the showcase.
    let admin = cfg
        .seed_accounts
        .iter()
        .find(|a| a.role == Role::Admin)
        .context("no admin account configured")?;
    session
        .login(&admin.email, admin.password.expose_secret())
        .await?;

    let verse = verse_service
        .create(
            &session,
            NewVerse {
                text: "Every dawn carries a verse the night kept secret".to_string(),
                attributed_to: "Mirza Ghalib".to_string(),
                language: domains::Language::Urdu,
                day: 3,
            },
        )
        .await?;
    info!(id = %verse.id, day = verse.day, "opening verse published");

    let collection = submissions.list().await?;
    let pending = SubmissionQuery::admin_review().apply(&collection);
    info!(count = pending.len(), "submissions awaiting review");

    for sub in &pending {
        workflow.approve(&session, &sub.id).await?;
        workflow.rate(&session, &sub.id, 4.0).await?;
    }
    if let Some(first) = pending.first() {
        workflow.feature(&session, &first.id).await?;
    }

    let collection = submissions.list().await?;
    for (place, sub) in query::leaderboard(&collection, None).iter().enumerate() {
        info!(
            place = place + 1,
            id = %sub.id,
            rating = %sub.rating,
            author = %sub.author.name,
            "leaderboard"
        );
    }
    if let Some(showcased) = query::featured(&collection) {
        info!(id = %showcased.id, kind = showcased.kind.label(), "featured today");
    }
    let best = query::best_of(&collection, &cfg.languages);
    info!(
        languages = best.best_per_language.len(),
        "per-language winners selected"
    );

    session.logout().await?;
    Ok(())
}
