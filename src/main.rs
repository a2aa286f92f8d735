//! Person store entry point: initialize, list, then idle until Ctrl+C.

use anyhow::{Context, Result};
use person_store::{InitOutcome, PersonStore, StoreConfig};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let _ = dotenvy::dotenv();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "person_store=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = StoreConfig::from_env();
    info!(path = %config.db_path().display(), "using user database");
    let store = PersonStore::new(config);

    match store
        .initialize()
        .context("failed to initialize user database")?
    {
        InitOutcome::Seeded(n) => println!("Database created and {n} demo users added."),
        InitOutcome::Existing(n) => println!("Database already contains {n} users."),
    }

    let records = store.list_all().context("failed to list users")?;
    println!("\nUsers in the database:");
    for record in &records {
        println!("{record}");
    }

    println!("\nRunning. Press Ctrl+C to exit.");
    tokio::signal::ctrl_c()
        .await
        .context("failed to listen for Ctrl+C")?;
    println!("\nShutting down...");
    Ok(())
}
