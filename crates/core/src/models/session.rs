//! Client session credential

/// Short-lived bearer credential returned by `/promo/login-client`.
///
/// Scoped to one acquisition attempt; the same session is reused for
/// every register/create retry within that attempt but never persisted
/// or shared across codes.
#[derive(Debug, Clone)]
pub struct ClientSession {
    token: String,
}

impl ClientSession {
    pub fn new(token: impl Into<String>) -> Self {
        Self {
            token: token.into(),
        }
    }

    /// Token value for the `Authorization: Bearer` header
    pub fn bearer_token(&self) -> &str {
        &self.token
    }
}
