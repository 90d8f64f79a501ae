//! Cycle driver
//!
//! Runs the farm: refresh the catalog, mint every game's quota of codes
//! concurrently (one task per game), flush the sorted results into the
//! next output shard, sleep, repeat until every shard in the batch
//! exists or the run is cancelled.

use crate::acquire::acquire_code;
use promo_core::{Catalog, PromoCode, Result, RetryPolicy};
use promo_networking::{CatalogSource, PromoApi};
use promo_persistence::CodeStore;
use rand::Rng;
use std::sync::Arc;
use std::time::Duration;
use tokio_util::sync::CancellationToken;
use tracing::{error, info};

// ─── Config ──────────────────────────────────────────────────────────

/// Tuning knobs for the farm loop
#[derive(Debug, Clone)]
pub struct DriverConfig {
    /// Register/create attempt ceiling per code
    pub max_attempts: u32,
    /// Policy for catalog fetch polling
    pub catalog_policy: RetryPolicy,
    /// Total number of output shards before the batch is complete
    pub shard_limit: u32,
    /// Pause between complete cycles
    pub cycle_delay: Duration,
    /// Inclusive range of per-game startup jitter, in seconds
    pub jitter_secs: (u64, u64),
}

impl Default for DriverConfig {
    fn default() -> Self {
        Self {
            max_attempts: 30,
            catalog_policy: RetryPolicy::new(10, Duration::from_secs(30)),
            shard_limit: 1000,
            cycle_delay: Duration::from_secs(2 * 60),
            jitter_secs: (1, 10),
        }
    }
}

// ─── Driver ──────────────────────────────────────────────────────────

/// Drives full passes over the catalog, one output shard per cycle
pub struct CycleDriver<A: PromoApi + 'static> {
    api: Arc<A>,
    http: reqwest::Client,
    source: CatalogSource,
    store: CodeStore,
    config: DriverConfig,
}

impl<A: PromoApi + 'static> CycleDriver<A> {
    pub fn new(
        api: Arc<A>,
        http: reqwest::Client,
        source: CatalogSource,
        store: CodeStore,
        config: DriverConfig,
    ) -> Self {
        Self {
            api,
            http,
            source,
            store,
            config,
        }
    }

    /// One full pass over the catalog.
    ///
    /// Spawns one task per game; each sleeps a small random jitter so
    /// the logins do not land on the API in a burst, then mints its
    /// game's quota sequentially. Tasks share only the read-only
    /// catalog; results are collected after all of them finish.
    pub async fn run_cycle(&self, catalog: &Catalog) -> Vec<PromoCode> {
        let (jitter_min, jitter_max) = self.config.jitter_secs;
        let mut handles = Vec::with_capacity(catalog.len());

        for (name, game) in catalog {
            let api = Arc::clone(&self.api);
            let name = name.clone();
            let game = game.clone();
            let policy =
                RetryPolicy::new(self.config.max_attempts, Duration::from_secs(game.retry));

            handles.push(tokio::spawn(async move {
                let jitter = rand::thread_rng().gen_range(jitter_min..=jitter_max);
                tokio::time::sleep(Duration::from_secs(jitter)).await;

                let mut codes = Vec::new();
                for _ in 0..game.keys {
                    if let Some(code) = acquire_code(api.as_ref(), &name, &game, &policy).await {
                        info!("{}", code);
                        codes.push(code);
                    }
                }
                codes
            }));
        }

        let mut collected = Vec::new();
        for handle in handles {
            match handle.await {
                Ok(mut codes) => collected.append(&mut codes),
                Err(e) => error!("Acquisition task panicked: {}", e),
            }
        }
        collected
    }

    /// Run cycles until the shard budget is exhausted or `cancel` fires.
    ///
    /// Shards that already exist are skipped, so a restarted run resumes
    /// the batch where the previous one stopped.
    pub async fn run(&self, cancel: CancellationToken) -> Result<()> {
        loop {
            if cancel.is_cancelled() {
                info!("Farm loop cancelled");
                return Ok(());
            }

            let Some(shard) = self.store.next_shard(self.config.shard_limit) else {
                info!(
                    "All {} output shards exist, batch complete",
                    self.config.shard_limit
                );
                return Ok(());
            };

            info!("Refreshing games config");
            let catalog = self
                .source
                .load(&self.http, &self.config.catalog_policy)
                .await?;

            let mut codes = self.run_cycle(&catalog).await;
            codes.sort();
            self.store.append_codes(&shard, &codes)?;
            info!(
                "End of cycle: {} codes written to {}",
                codes.len(),
                shard.display()
            );

            tokio::select! {
                _ = cancel.cancelled() => {
                    info!("Farm loop cancelled");
                    return Ok(());
                }
                _ = tokio::time::sleep(self.config.cycle_delay) => {}
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use promo_core::{ClientSession, GameConfig, Result};
    use std::sync::atomic::{AtomicU32, Ordering};

    /// API double that hands out one code per create call, tagged by promo id
    #[derive(Default)]
    struct CountingApi {
        login_calls: AtomicU32,
        serial: AtomicU32,
    }

    #[async_trait]
    impl PromoApi for CountingApi {
        async fn login_client(&self, _app_token: &str) -> Result<ClientSession> {
            self.login_calls.fetch_add(1, Ordering::SeqCst);
            Ok(ClientSession::new("tok"))
        }

        async fn register_event(&self, _s: &ClientSession, _promo_id: &str) -> Result<bool> {
            Ok(true)
        }

        async fn create_code(&self, _s: &ClientSession, promo_id: &str) -> Result<PromoCode> {
            let n = self.serial.fetch_add(1, Ordering::SeqCst);
            Ok(PromoCode::new(format!("{promo_id}-{n:03}")).unwrap())
        }
    }

    /// API double whose logins always fail
    struct DeadApi;

    #[async_trait]
    impl PromoApi for DeadApi {
        async fn login_client(&self, _app_token: &str) -> Result<ClientSession> {
            Err(promo_core::Error::LoginFailed("down".into()))
        }

        async fn register_event(&self, _s: &ClientSession, _promo_id: &str) -> Result<bool> {
            unreachable!("register must not run without a session")
        }

        async fn create_code(&self, _s: &ClientSession, _promo_id: &str) -> Result<PromoCode> {
            unreachable!("create must not run without a session")
        }
    }

    fn game(promo_id: &str, keys: u32) -> GameConfig {
        GameConfig {
            app_token: format!("app-{promo_id}"),
            promo_id: promo_id.to_string(),
            delay: 0,
            retry: 0,
            keys,
        }
    }

    fn test_config() -> DriverConfig {
        DriverConfig {
            max_attempts: 3,
            catalog_policy: RetryPolicy::new(1, Duration::ZERO),
            shard_limit: 5,
            cycle_delay: Duration::ZERO,
            jitter_secs: (0, 0),
        }
    }

    fn driver<A: PromoApi + 'static>(api: A, dir: &std::path::Path) -> CycleDriver<A> {
        CycleDriver::new(
            Arc::new(api),
            reqwest::Client::new(),
            CatalogSource::Static(Catalog::new()),
            CodeStore::new(dir),
            test_config(),
        )
    }

    #[tokio::test]
    async fn cycle_collects_every_games_quota() {
        let dir = tempfile::tempdir().unwrap();
        let drv = driver(CountingApi::default(), dir.path());

        let mut catalog = Catalog::new();
        catalog.insert("alpha".into(), game("ALPHA", 2));
        catalog.insert("beta".into(), game("BETA", 3));

        let codes = drv.run_cycle(&catalog).await;
        assert_eq!(codes.len(), 5);
        // one login per code, not per game
        assert_eq!(drv.api.login_calls.load(Ordering::SeqCst), 5);
    }

    #[tokio::test]
    async fn cycle_with_dead_api_yields_no_codes() {
        let dir = tempfile::tempdir().unwrap();
        let drv = driver(DeadApi, dir.path());

        let mut catalog = Catalog::new();
        catalog.insert("alpha".into(), game("ALPHA", 2));

        let codes = drv.run_cycle(&catalog).await;
        assert!(codes.is_empty());
    }

    #[tokio::test]
    async fn run_writes_sorted_shards_and_stops_at_budget() {
        let dir = tempfile::tempdir().unwrap();
        let store = CodeStore::new(dir.path());

        let mut catalog = Catalog::new();
        catalog.insert("zeta".into(), game("ZETA", 1));
        catalog.insert("alpha".into(), game("ALPHA", 1));

        let drv = CycleDriver::new(
            Arc::new(CountingApi::default()),
            reqwest::Client::new(),
            CatalogSource::Static(catalog),
            store.clone(),
            DriverConfig {
                shard_limit: 2,
                ..test_config()
            },
        );

        drv.run(CancellationToken::new()).await.unwrap();

        // Both shards written, then the run ended on its own
        for i in 0..2 {
            let contents = std::fs::read_to_string(store.shard_path(i)).unwrap();
            let lines: Vec<&str> = contents.lines().collect();
            assert_eq!(lines.len(), 2);
            let mut sorted = lines.clone();
            sorted.sort();
            assert_eq!(lines, sorted);
            assert!(lines.iter().all(|l| l.starts_with('`') && l.ends_with('`')));
        }
        assert!(store.next_shard(2).is_none());
    }

    #[tokio::test]
    async fn run_resumes_past_existing_shards() {
        let dir = tempfile::tempdir().unwrap();
        let store = CodeStore::new(dir.path());
        std::fs::write(store.shard_path(0), "`OLD`\n").unwrap();

        let mut catalog = Catalog::new();
        catalog.insert("alpha".into(), game("ALPHA", 1));

        let drv = CycleDriver::new(
            Arc::new(CountingApi::default()),
            reqwest::Client::new(),
            CatalogSource::Static(catalog),
            store.clone(),
            DriverConfig {
                shard_limit: 2,
                ..test_config()
            },
        );

        drv.run(CancellationToken::new()).await.unwrap();

        // Shard 0 untouched, shard 1 freshly written
        assert_eq!(std::fs::read_to_string(store.shard_path(0)).unwrap(), "`OLD`\n");
        assert_eq!(
            std::fs::read_to_string(store.shard_path(1)).unwrap(),
            "`ALPHA-000`\n"
        );
    }

    #[tokio::test]
    async fn cancelled_run_exits_cleanly() {
        let dir = tempfile::tempdir().unwrap();
        let drv = driver(CountingApi::default(), dir.path());

        let cancel = CancellationToken::new();
        cancel.cancel();
        drv.run(cancel).await.unwrap();

        // Cancelled before any shard was produced
        assert_eq!(drv.store.next_shard(5).unwrap(), drv.store.shard_path(0));
    }
}
