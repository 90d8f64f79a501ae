//! Game catalog loading
//!
//! The catalog is a flat JSON object keyed by game name, either
//! embedded in the binary as a static table or fetched from a remote
//! raw-content URL at the start of every cycle.

use promo_core::{Catalog, Error, Result, RetryPolicy};
use reqwest::Client;
use tracing::{debug, warn};

/// Where the game catalog comes from
#[derive(Debug, Clone)]
pub enum CatalogSource {
    /// Embedded table, fixed for the process lifetime
    Static(Catalog),
    /// Remote JSON document, re-fetched every cycle
    Remote(String),
}

impl CatalogSource {
    /// Resolve the catalog for one cycle.
    ///
    /// Remote fetches poll with the given policy's fixed pause; the
    /// attempt ceiling is deliberate — an unreachable catalog host
    /// should fail the run, not spin forever.
    pub async fn load(&self, http: &Client, policy: &RetryPolicy) -> Result<Catalog> {
        match self {
            CatalogSource::Static(catalog) => Ok(catalog.clone()),
            CatalogSource::Remote(url) => fetch_catalog_with_retry(http, url, policy).await,
        }
    }
}

/// Fetch and parse the catalog once
pub async fn fetch_catalog(http: &Client, url: &str) -> Result<Catalog> {
    debug!("GET {}", url);

    let response = http.get(url).send().await?;

    let status = response.status();
    if !status.is_success() {
        let body = response.text().await.unwrap_or_default();
        return Err(Error::CatalogError(format!("HTTP {status}: {body}")));
    }

    let catalog: Catalog = response
        .json()
        .await
        .map_err(|e| Error::CatalogError(format!("invalid catalog JSON: {e}")))?;

    debug!("Catalog loaded: {} games", catalog.len());
    Ok(catalog)
}

/// Fetch the catalog, retrying with a fixed pause up to the policy ceiling
pub async fn fetch_catalog_with_retry(
    http: &Client,
    url: &str,
    policy: &RetryPolicy,
) -> Result<Catalog> {
    let mut last_err = Error::CatalogError("no fetch attempts configured".to_string());

    for attempt in policy.attempts() {
        match fetch_catalog(http, url).await {
            Ok(catalog) => return Ok(catalog),
            Err(e) => {
                warn!(
                    "Catalog fetch attempt {}/{} failed: {}",
                    attempt, policy.max_attempts, e
                );
                last_err = e;
                if !policy.is_last(attempt) {
                    tokio::time::sleep(policy.retry_delay).await;
                }
            }
        }
    }

    Err(last_err)
}
