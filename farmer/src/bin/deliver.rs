//! Deliver collected code files to a Telegram chat
//!
//! One-shot utility: uploads every regular file in the download
//! directory as a document attachment, then exits. The first failed
//! upload aborts the whole run. Credentials come from the
//! `TELEGRAM_API_KEY` and `TELEGRAM_CHAT_ID` environment variables.

use anyhow::Context;
use promo_networking::TelegramDelivery;
use std::path::Path;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

const CODES_DIR: &str = "./downloaded_promo_codes";

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "deliver=info,promo_networking=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let delivery = TelegramDelivery::from_env().context("missing Telegram credentials")?;

    let sent = delivery
        .send_directory(Path::new(CODES_DIR))
        .await
        .context("upload run aborted")?;

    tracing::info!("Uploaded {} files from {}", sent, CODES_DIR);
    Ok(())
}
