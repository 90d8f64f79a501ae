//! Operation trait over the GamePromo endpoints
//!
//! The acquisition engine drives these three calls through a trait so
//! tests can substitute a scripted implementation and count calls.

use async_trait::async_trait;
use promo_core::{ClientSession, PromoCode, Result};

/// The three GamePromo operations the acquisition sequence performs.
#[async_trait]
pub trait PromoApi: Send + Sync {
    /// Log in with a fresh client id, returning a short-lived session.
    async fn login_client(&self, app_token: &str) -> Result<ClientSession>;

    /// Register a fresh event against the promo; returns whether the
    /// server-side event is ready to grant a code (`hasCode`).
    async fn register_event(&self, session: &ClientSession, promo_id: &str) -> Result<bool>;

    /// Claim a code for the promo once an event is ready.
    async fn create_code(&self, session: &ClientSession, promo_id: &str) -> Result<PromoCode>;
}
