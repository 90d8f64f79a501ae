//! GamePromo HTTP client with bearer-token authentication

use crate::api::PromoApi;
use async_trait::async_trait;
use promo_core::{
    ClientSession, CreateCodeRequest, CreateCodeResponse, Error, LoginClientRequest,
    LoginClientResponse, PromoCode, RegisterEventRequest, RegisterEventResponse, Result,
};
use reqwest::Client;
use tracing::{debug, error, instrument};
use uuid::Uuid;

const BASE_URL: &str = "https://api.gamepromo.io";

/// Client origin reported on login; the upstream only hands out codes
/// to clients claiming a mobile origin
const CLIENT_ORIGIN: &str = "ios";

/// Event origin reported on register-event
const EVENT_ORIGIN: &str = "undefined";

/// HTTP client for the GamePromo API
///
/// One instance is shared for the whole process run; `reqwest::Client`
/// handles connection pooling internally. Login sessions are carried
/// explicitly by the caller, not stored on the client, since each
/// acquisition attempt uses its own short-lived token.
pub struct GamePromoClient {
    http: Client,
    base_url: String,
}

impl GamePromoClient {
    /// Create a new client against the production API
    pub fn new() -> Self {
        Self::with_base_url(BASE_URL)
    }

    /// Create a client against a custom base URL (used by tests)
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        Self {
            http: Client::new(),
            base_url: base_url.into(),
        }
    }

    /// The underlying `reqwest::Client`, for callers that need to issue
    /// plain requests (catalog fetch) on the same connection pool
    pub fn http(&self) -> &Client {
        &self.http
    }

    /// POST a JSON body and decode a JSON response.
    ///
    /// Any non-success status is an unconditional failure for the call;
    /// the API makes no useful distinction between 4xx and 5xx here.
    async fn post_json<B, T>(&self, path: &str, bearer: Option<&str>, body: &B) -> Result<T>
    where
        B: serde::Serialize + ?Sized,
        T: serde::de::DeserializeOwned,
    {
        let url = format!("{}{}", self.base_url, path);
        debug!("POST {}", url);

        let mut request = self.http.post(&url).json(body);
        if let Some(token) = bearer {
            request = request.bearer_auth(token);
        }

        let response = request.send().await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            error!("{} failed: HTTP {} {}", path, status, body);
            return Err(Error::ApiError(format!("{path}: HTTP {status}: {body}")));
        }

        response.json::<T>().await.map_err(|e| {
            error!("Failed to parse {} response: {}", path, e);
            Error::InvalidData(e.to_string())
        })
    }
}

impl Default for GamePromoClient {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl PromoApi for GamePromoClient {
    /// Log in with a fresh random client id and the game's app token
    #[instrument(skip(self, app_token))]
    async fn login_client(&self, app_token: &str) -> Result<ClientSession> {
        let request = LoginClientRequest {
            app_token: app_token.to_string(),
            client_id: Uuid::new_v4().to_string(),
            client_origin: CLIENT_ORIGIN.to_string(),
        };

        let response: LoginClientResponse =
            self.post_json("/promo/login-client", None, &request).await?;

        match response.client_token {
            Some(token) if !token.is_empty() => {
                debug!("Client logged in");
                Ok(ClientSession::new(token))
            }
            _ => Err(Error::MissingToken),
        }
    }

    /// Register a fresh event; returns the server's `hasCode` flag
    #[instrument(skip(self, session))]
    async fn register_event(&self, session: &ClientSession, promo_id: &str) -> Result<bool> {
        let request = RegisterEventRequest {
            promo_id: promo_id.to_string(),
            event_id: Uuid::new_v4().to_string(),
            event_origin: EVENT_ORIGIN.to_string(),
        };

        let response: RegisterEventResponse = self
            .post_json(
                "/promo/register-event",
                Some(session.bearer_token()),
                &request,
            )
            .await?;

        debug!("Event registered, hasCode={}", response.has_code);
        Ok(response.has_code)
    }

    /// Claim a code for a ready event
    #[instrument(skip(self, session))]
    async fn create_code(&self, session: &ClientSession, promo_id: &str) -> Result<PromoCode> {
        let request = CreateCodeRequest {
            promo_id: promo_id.to_string(),
        };

        let response: CreateCodeResponse = self
            .post_json("/promo/create-code", Some(session.bearer_token()), &request)
            .await?;

        PromoCode::new(response.promo_code)
            .ok_or_else(|| Error::InvalidData("empty promo code in response".to_string()))
    }
}
