//! Game catalog models

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Per-game configuration from the catalog.
///
/// Delays are in seconds and model the pacing the upstream API expects
/// before an event can be registered.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GameConfig {
    /// Opaque application credential for `/promo/login-client`
    pub app_token: String,
    /// Opaque promotion identifier for register/create calls
    pub promo_id: String,
    /// Seconds to wait before each register-event attempt
    pub delay: u64,
    /// Seconds to wait after a failed or not-ready attempt
    pub retry: u64,
    /// Number of codes to mint for this game per cycle
    pub keys: u32,
}

/// Mapping from game name to its config.
///
/// `BTreeMap` so a cycle walks games in a stable order.
pub type Catalog = BTreeMap<String, GameConfig>;
