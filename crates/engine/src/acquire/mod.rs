//! Per-game promo code acquisition
//!
//! The one piece of the farm with sequencing logic: log in once, then
//! register events against the promo until the server reports a ready
//! code, then claim it. All pacing is plain fixed sleeps; the upstream
//! rejects clients that move faster than a human game session would.

use promo_core::{GameConfig, PromoCode, RetryPolicy};
use promo_networking::PromoApi;
use std::time::Duration;
use tokio::time::sleep;
use tracing::{debug, info, warn};

/// Acquire zero or one promo code for `game`.
///
/// Semantics, in order:
/// - Login failure aborts immediately; no retries, no register calls.
/// - The login session is reused across every retry; only the event id
///   is refreshed per attempt.
/// - Register/create failures and a not-ready event (`hasCode` false)
///   all cost one attempt and one fixed retry sleep.
/// - Exhausting the attempt budget is a normal outcome, not an error.
pub async fn acquire_code<A: PromoApi>(
    api: &A,
    game: &str,
    config: &GameConfig,
    policy: &RetryPolicy,
) -> Option<PromoCode> {
    let session = match api.login_client(&config.app_token).await {
        Ok(session) => session,
        Err(e) => {
            info!("Failed to login client for {}: {}", game, e);
            return None;
        }
    };

    for attempt in policy.attempts() {
        // Pacing expected by the upstream before an event can register
        sleep(Duration::from_secs(config.delay)).await;

        let has_code = match api.register_event(&session, &config.promo_id).await {
            Ok(has_code) => has_code,
            Err(e) => {
                info!("Failed to register event for {}: {}", game, e);
                sleep(policy.retry_delay).await;
                continue;
            }
        };

        if !has_code {
            debug!("{}: event not ready (attempt {})", game, attempt);
            sleep(policy.retry_delay).await;
            continue;
        }

        match api.create_code(&session, &config.promo_id).await {
            Ok(code) => return Some(code),
            Err(e) => {
                warn!("Failed to create code for {}: {}", game, e);
                sleep(policy.retry_delay).await;
            }
        }
    }

    info!(
        "Unable to get {} promo after {} attempts",
        game, policy.max_attempts
    );
    None
}
