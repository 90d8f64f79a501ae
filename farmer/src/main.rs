//! Promo farmer - main entry point
//!
//! Mints promo codes for every game in the remote catalog, one output
//! shard per cycle, forever (or until the shard budget is exhausted).
//! There are no CLI flags; behavior is tuned via the constants below
//! and the `RUST_LOG` filter.

use anyhow::Context;
use promo_engine::{CycleDriver, DriverConfig};
use promo_networking::{CatalogSource, GamePromoClient};
use promo_persistence::CodeStore;
use std::sync::Arc;
use tokio_util::sync::CancellationToken;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

const GAMES_URL: &str = "https://raw.githubusercontent.com/SP-l33t/GenofcodesHMSTR/main/games.json";

/// Where shards are written and resumed from
const OUTPUT_DIR: &str = ".";

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                "promo_farmer=debug,promo_engine=debug,promo_networking=debug".into()
            }),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting promo farmer");

    // One HTTP client for the whole run; the catalog fetcher shares its
    // connection pool
    let client = Arc::new(GamePromoClient::new());
    let http = client.http().clone();

    let driver = CycleDriver::new(
        client,
        http,
        CatalogSource::Remote(GAMES_URL.to_string()),
        CodeStore::new(OUTPUT_DIR),
        DriverConfig::default(),
    );

    let cancel = CancellationToken::new();
    let signal_cancel = cancel.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            tracing::info!("Shutdown requested");
            signal_cancel.cancel();
        }
    });

    driver.run(cancel).await.context("farm loop failed")?;

    tracing::info!("Promo farmer stopped");
    Ok(())
}
