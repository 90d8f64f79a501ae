//! Wire models for the GamePromo API
//!
//! Field names follow the upstream camelCase contract exactly; the
//! serde renames here are the single source of truth for it.

use serde::{Deserialize, Serialize};

/// Request body for POST /promo/login-client
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginClientRequest {
    pub app_token: String,
    /// Fresh random UUID per login
    pub client_id: String,
    pub client_origin: String,
}

/// Response from POST /promo/login-client
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginClientResponse {
    #[serde(default)]
    pub client_token: Option<String>,
}

/// Request body for POST /promo/register-event
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterEventRequest {
    pub promo_id: String,
    /// Fresh random UUID per attempt
    pub event_id: String,
    pub event_origin: String,
}

/// Response from POST /promo/register-event
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterEventResponse {
    /// True once the server-side event has accumulated enough state
    /// to unlock a code grant
    #[serde(default)]
    pub has_code: bool,
}

/// Request body for POST /promo/create-code
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateCodeRequest {
    pub promo_id: String,
}

/// Response from POST /promo/create-code
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateCodeResponse {
    #[serde(default)]
    pub promo_code: String,
}
