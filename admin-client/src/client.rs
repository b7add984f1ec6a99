//! Request executor and token refresh policy.

use std::sync::Arc;

use reqwest::{header, multipart, Client};
use serde::de::DeserializeOwned;
use serde_json::{json, Value};
use support_common::{build_http_client, PlatformError};
use tokio::sync::{watch, Mutex};
use tracing::{debug, info, instrument, warn};

use crate::config::ApiConfig;
use crate::error::{extract_error_message, ApiError, ApiResult};
use crate::request::{FilePart, RequestBody, RequestSpec};
use crate::storage::KeyValueStorage;
use crate::token::{TokenPair, TokenStore};

/// Fixed refresh endpoint. Never receives an auth header and never triggers
/// its own refresh.
pub const REFRESH_PATH: &str = "/auth/refresh";

/// Session lifecycle as observed by the UI layer.
///
/// Transitions to [`SessionState::Expired`] when a refresh attempt fails
/// terminally; the UI must then navigate to re-authentication.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    /// Tokens (if any) are usable
    Active,
    /// The refresh token was rejected and local tokens were cleared
    Expired,
}

/// HTTP client for the admin backend.
///
/// Owns the token store and the refresh policy. Cheap to share behind an
/// [`Arc`]; all methods take `&self`.
pub struct ApiClient {
    config: ApiConfig,
    http: Client,
    tokens: Arc<TokenStore>,
    /// Serializes refresh attempts so concurrent 401s coalesce into one
    /// refresh call.
    refresh_gate: Mutex<()>,
    session_tx: watch::Sender<SessionState>,
}

impl ApiClient {
    /// Build a client over the given configuration and storage backend.
    ///
    /// Previously persisted tokens are loaded from storage, so a restarted
    /// dashboard resumes its session without a new login.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying HTTP client cannot be built.
    pub fn new(config: ApiConfig, storage: Arc<dyn KeyValueStorage>) -> ApiResult<Self> {
        let http = build_http_client(&config.http_config()).map_err(PlatformError::from)?;
        let (session_tx, _) = watch::channel(SessionState::Active);

        Ok(Self {
            config,
            http,
            tokens: Arc::new(TokenStore::new(storage)),
            refresh_gate: Mutex::new(()),
            session_tx,
        })
    }

    /// The token store backing this client.
    #[must_use]
    pub fn tokens(&self) -> &TokenStore {
        &self.tokens
    }

    /// Subscribe to session lifecycle changes.
    #[must_use]
    pub fn session_state(&self) -> watch::Receiver<SessionState> {
        self.session_tx.subscribe()
    }

    /// Execute a request and return its parsed JSON body.
    ///
    /// A 401 on an authenticated request triggers at most one token refresh
    /// followed by one replay; see [`REFRESH_PATH`] and the module docs.
    ///
    /// # Errors
    ///
    /// Fails with a classified [`ApiError`]; see [`ApiError::user_message`].
    #[instrument(skip_all, fields(method = %spec.method, path = %spec.path))]
    pub async fn execute(&self, spec: RequestSpec) -> ApiResult<Value> {
        let pair = if spec.skip_auth { None } else { self.tokens.get() };
        let access = pair.as_ref().map(|p| p.access_token.clone());

        let err = match self.dispatch(&spec, access.as_deref()).await {
            Ok(value) => return Ok(value),
            Err(err) => err,
        };

        // Refresh only on 401, for authenticated requests that are not the
        // refresh call, and only when a refresh token exists.
        let unauthorized = matches!(err, ApiError::Status { status: 401, .. });
        if !unauthorized || spec.skip_auth || spec.path == REFRESH_PATH {
            return Err(err);
        }
        let Some(stale) = pair else {
            return Err(err);
        };

        debug!("access token rejected, entering refresh path");
        self.refresh_and_replay(&spec, &stale).await
    }

    /// Execute a request and decode its body into `T`.
    ///
    /// # Errors
    ///
    /// Fails like [`ApiClient::execute`], or with
    /// [`ApiError::MalformedResponse`] when the body does not match `T`.
    pub async fn send<T: DeserializeOwned>(&self, spec: RequestSpec) -> ApiResult<T> {
        let body = self.execute(spec).await?;
        serde_json::from_value(body)
            .map_err(|err| ApiError::malformed(format!("response decode: {err}")))
    }

    /// One refresh, then one replay. Holding the gate serializes concurrent
    /// 401s: the losers observe the winner's fresh tokens and replay without
    /// a second refresh call.
    async fn refresh_and_replay(&self, spec: &RequestSpec, stale: &TokenPair) -> ApiResult<Value> {
        let _gate = self.refresh_gate.lock().await;

        let fresh = match self.tokens.get() {
            Some(current) if current.access_token != stale.access_token => current,
            Some(current) => self.refresh(&current.refresh_token).await?,
            // A concurrent teardown already cleared the store.
            None => return Err(ApiError::SessionExpired),
        };

        // Replay exactly once; a second 401 propagates without another
        // refresh attempt.
        self.dispatch(spec, Some(&fresh.access_token)).await
    }

    /// Exchange the refresh token for a new pair. Any failure (network,
    /// non-2xx, undecodable body) tears the session down.
    async fn refresh(&self, refresh_token: &str) -> ApiResult<TokenPair> {
        let spec = RequestSpec::post(REFRESH_PATH)
            .with_json(json!({ "refreshToken": refresh_token }))
            .without_auth();

        let outcome = match self.dispatch(&spec, None).await {
            Ok(body) => serde_json::from_value::<TokenPair>(body)
                .map_err(|err| ApiError::malformed(format!("refresh response: {err}"))),
            Err(err) => Err(err),
        };

        match outcome {
            Ok(pair) => {
                self.tokens.set(pair.clone())?;
                info!("access token refreshed");
                Ok(pair)
            }
            Err(err) => {
                warn!(%err, "token refresh failed, terminating session");
                self.terminate_session();
                Err(ApiError::SessionExpired)
            }
        }
    }

    fn terminate_session(&self) {
        if let Err(err) = self.tokens.clear() {
            warn!(%err, "failed to clear token store during session teardown");
        }
        self.session_tx.send_replace(SessionState::Expired);
    }

    /// Issue one request. No refresh logic lives here.
    async fn dispatch(&self, spec: &RequestSpec, access_token: Option<&str>) -> ApiResult<Value> {
        let url = self.config.endpoint(&spec.path);
        let mut request = self.http.request(spec.method.clone(), &url);

        if !spec.query.is_empty() {
            request = request.query(&spec.query);
        }
        for (name, value) in &spec.headers {
            request = request.header(name.as_str(), value.as_str());
        }
        if let Some(token) = access_token {
            request = request.bearer_auth(token);
        }
        request = match &spec.body {
            // The backend expects a JSON content type even on bodyless
            // requests; `json` sets it together with the body.
            RequestBody::Empty => request.header(header::CONTENT_TYPE, "application/json"),
            RequestBody::Json(body) => request.json(body),
            // The transport sets the multipart content type and boundary.
            RequestBody::Multipart(parts) => request.multipart(build_form(parts)?),
        };

        let response = match request.send().await {
            Ok(response) => response,
            Err(err) => {
                warn!(%err, %url, "no response received");
                return Err(ApiError::transport(err.to_string()));
            }
        };

        let status = response.status().as_u16();
        let text = response
            .text()
            .await
            .map_err(|err| ApiError::transport(err.to_string()))?;

        if (200..300).contains(&status) {
            if text.trim().is_empty() {
                // 204-style responses from delete/mark-read endpoints.
                return Ok(Value::Null);
            }
            return serde_json::from_str(&text)
                .map_err(|err| ApiError::malformed(format!("status {status}: {err}")));
        }

        let payload: Option<Value> = serde_json::from_str(&text).ok();
        let message = payload
            .as_ref()
            .and_then(extract_error_message)
            .or_else(|| {
                let trimmed = text.trim();
                (!trimmed.is_empty()).then(|| trimmed.to_string())
            })
            .unwrap_or_else(|| format!("HTTP {status}"));

        debug!(status, %message, "request returned error status");
        Err(ApiError::status(status, message, payload))
    }
}

fn build_form(parts: &[FilePart]) -> ApiResult<multipart::Form> {
    let mut form = multipart::Form::new();
    for part in parts {
        let piece = multipart::Part::bytes(part.bytes.clone())
            .file_name(part.file_name.clone())
            .mime_str(&part.mime_type)
            .map_err(|_| {
                PlatformError::invalid_input(format!("invalid mime type: {}", part.mime_type))
            })?;
        form = form.part(part.name.clone(), piece);
    }
    Ok(form)
}
