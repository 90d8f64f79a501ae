//! Telegram delivery of collected code files
//!
//! Uploads every regular file in a directory as a `sendDocument`
//! attachment. Credentials come from the process environment; a single
//! failed upload aborts the whole run.

use promo_core::{Error, Result};
use reqwest::multipart::{Form, Part};
use reqwest::Client;
use std::path::Path;
use tracing::{debug, error, info};

const TELEGRAM_API_BASE: &str = "https://api.telegram.org";

/// Environment variable holding the bot API token
pub const API_KEY_ENV: &str = "TELEGRAM_API_KEY";
/// Environment variable holding the destination chat id
pub const CHAT_ID_ENV: &str = "TELEGRAM_CHAT_ID";

/// Telegram bot client for forwarding code files to a chat
pub struct TelegramDelivery {
    http: Client,
    api_key: String,
    chat_id: String,
    api_base: String,
}

impl TelegramDelivery {
    pub fn new(api_key: impl Into<String>, chat_id: impl Into<String>) -> Self {
        Self {
            http: Client::new(),
            api_key: api_key.into(),
            chat_id: chat_id.into(),
            api_base: TELEGRAM_API_BASE.to_string(),
        }
    }

    /// Read the bot token and chat id from the environment
    pub fn from_env() -> Result<Self> {
        let api_key = std::env::var(API_KEY_ENV)
            .map_err(|_| Error::ConfigError(format!("{API_KEY_ENV} not set")))?;
        let chat_id = std::env::var(CHAT_ID_ENV)
            .map_err(|_| Error::ConfigError(format!("{CHAT_ID_ENV} not set")))?;
        Ok(Self::new(api_key, chat_id))
    }

    /// Point the client at a custom API base (used by tests)
    pub fn with_api_base(mut self, api_base: impl Into<String>) -> Self {
        self.api_base = api_base.into();
        self
    }

    /// Upload a single file as a document attachment
    pub async fn send_document(&self, path: &Path) -> Result<()> {
        let file_name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .ok_or_else(|| Error::InvalidData(format!("no file name in {}", path.display())))?;

        debug!("Uploading {}", path.display());

        let bytes = tokio::fs::read(path).await?;
        let form = Form::new()
            .text("chat_id", self.chat_id.clone())
            .part("document", Part::bytes(bytes).file_name(file_name.clone()));

        let url = format!("{}/bot{}/sendDocument", self.api_base, self.api_key);
        let response = self.http.post(&url).multipart(form).send().await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            error!("Upload of {} failed: HTTP {} {}", file_name, status, body);
            return Err(Error::DeliveryError(format!(
                "{file_name}: HTTP {status}: {body}"
            )));
        }

        info!("{} sent", file_name);
        Ok(())
    }

    /// Upload every regular file in `dir`, aborting on the first failure.
    ///
    /// Subdirectories are skipped. Returns the number of files sent.
    pub async fn send_directory(&self, dir: &Path) -> Result<usize> {
        let mut entries: Vec<_> = std::fs::read_dir(dir)?
            .collect::<std::io::Result<Vec<_>>>()?
            .into_iter()
            .filter(|e| e.path().is_file())
            .map(|e| e.path())
            .collect();
        entries.sort();

        let mut sent = 0;
        for path in &entries {
            self.send_document(path).await?;
            sent += 1;
        }

        Ok(sent)
    }
}
