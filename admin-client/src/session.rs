//! Session facade: sign-in/sign-out lifecycle and the persisted session
//! record.
//!
//! The session record and the token pair live under distinct storage keys;
//! this module keeps them in sync. If a session record with tokens exists,
//! the token store holds the same values.

use std::sync::Arc;

use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use support_common::PlatformError;
use tracing::{debug, info, instrument, warn};

use crate::client::ApiClient;
use crate::error::{ApiError, ApiResult};
use crate::request::RequestSpec;
use crate::storage::KeyValueStorage;
use crate::token::TokenPair;

/// Storage key for the persisted session record.
pub const SESSION_STORAGE_KEY: &str = "support_admin_session";

const SIGN_IN_PATH: &str = "/auth/login";
const SIGN_OUT_PATH: &str = "/auth/logout";
const PASSWORD_RESET_REQUEST_PATH: &str = "/auth/password-reset/request";
const PASSWORD_RESET_CONFIRM_PATH: &str = "/auth/password-reset/confirm";
const INVITATIONS_PATH: &str = "/auth/invitations";
const PASSWORD_SETUP_PATH: &str = "/auth/password-setup";

/// Sign-in credentials.
#[derive(Debug, Clone)]
pub struct Credentials {
    /// Account email
    pub email: String,
    /// Account password; redacted in debug output
    pub password: SecretString,
}

impl Credentials {
    /// Create credentials from an email and password.
    #[must_use]
    pub fn new(email: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            password: SecretString::from(password.into()),
        }
    }
}

/// Locally persisted snapshot of the signed-in user and their tokens.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionRecord {
    /// Mirror of the access token; older dashboard builds read this field
    pub token: String,
    /// Access token at sign-in time
    pub access_token: String,
    /// Refresh token at sign-in time
    pub refresh_token: String,
    /// Backend-defined user object, stored opaquely
    pub user: Value,
}

/// The backend has two generations of sign-in payloads: a success envelope
/// with nested tokens, and an older flat shape. Both normalize into a
/// [`SessionRecord`]; anything else is an error.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum SignInResponse {
    Envelope {
        success: bool,
        data: SignInData,
    },
    Flat {
        user: Value,
        #[serde(rename = "accessToken")]
        access_token: String,
        #[serde(rename = "refreshToken")]
        refresh_token: String,
    },
}

#[derive(Debug, Deserialize)]
struct SignInData {
    user: Value,
    tokens: TokenPayload,
}

#[derive(Debug, Deserialize)]
struct TokenPayload {
    #[serde(rename = "accessToken")]
    access_token: String,
    #[serde(rename = "refreshToken")]
    refresh_token: String,
}

impl SignInResponse {
    fn into_record(self) -> ApiResult<SessionRecord> {
        let (user, access, refresh) = match self {
            Self::Envelope { success: false, .. } => {
                return Err(ApiError::malformed(
                    "sign-in envelope flagged failure with a success status",
                ));
            }
            Self::Envelope { data, .. } => {
                (data.user, data.tokens.access_token, data.tokens.refresh_token)
            }
            Self::Flat {
                user,
                access_token,
                refresh_token,
            } => (user, access_token, refresh_token),
        };

        Ok(SessionRecord {
            token: access.clone(),
            access_token: access,
            refresh_token: refresh,
            user,
        })
    }
}

fn decode_sign_in(body: Value) -> ApiResult<SessionRecord> {
    let response: SignInResponse = serde_json::from_value(body)
        .map_err(|_| ApiError::malformed("sign-in response did not match any known shape"))?;
    response.into_record()
}

/// Login/logout lifecycle over an [`ApiClient`].
pub struct SessionManager {
    client: Arc<ApiClient>,
    storage: Arc<dyn KeyValueStorage>,
}

impl SessionManager {
    /// Create a facade over the given client and storage backend.
    ///
    /// Pass the same backend the client's token store uses so both records
    /// land in one place.
    #[must_use]
    pub fn new(client: Arc<ApiClient>, storage: Arc<dyn KeyValueStorage>) -> Self {
        Self { client, storage }
    }

    /// Sign in, persist the session record, and synchronize the token
    /// store.
    ///
    /// # Errors
    ///
    /// Fails with the classified backend error (401 reads as "Invalid email
    /// or password."), or with [`ApiError::MalformedResponse`] when the
    /// response matches no known sign-in shape.
    #[instrument(skip_all, fields(email = %credentials.email))]
    pub async fn login(&self, credentials: &Credentials) -> ApiResult<SessionRecord> {
        let spec = RequestSpec::post(SIGN_IN_PATH)
            .with_json(json!({
                "email": credentials.email,
                "password": credentials.password.expose_secret(),
            }))
            .without_auth();

        let body = self.client.execute(spec).await?;
        let record = decode_sign_in(body)?;
        self.persist(&record)?;
        info!("signed in");
        Ok(record)
    }

    /// Sign out. The backend call is best effort; local cleanup always
    /// happens.
    ///
    /// # Errors
    ///
    /// Fails only when local cleanup fails; backend failures are logged and
    /// swallowed.
    #[instrument(skip_all)]
    pub async fn logout(&self) -> ApiResult<()> {
        if let Err(err) = self.client.execute(RequestSpec::post(SIGN_OUT_PATH)).await {
            warn!(%err, "sign-out call failed, clearing local session anyway");
        }

        // Both cleanups run regardless of the other's outcome.
        let record_removed = self.storage.remove(SESSION_STORAGE_KEY);
        let tokens_cleared = self.client.tokens().clear();
        record_removed?;
        tokens_cleared?;
        info!("signed out");
        Ok(())
    }

    /// Read the persisted session record without touching the network.
    ///
    /// Fails soft: a missing or unparsable record reads as `None`.
    #[must_use]
    pub fn session(&self) -> Option<SessionRecord> {
        let raw = match self.storage.load(SESSION_STORAGE_KEY) {
            Ok(Some(raw)) => raw,
            Ok(None) => return None,
            Err(err) => {
                debug!(%err, "session record unreadable");
                return None;
            }
        };
        match serde_json::from_str(&raw) {
            Ok(record) => Some(record),
            Err(err) => {
                debug!(%err, "session record unparsable");
                None
            }
        }
    }

    /// Ask the backend to send a password reset email.
    ///
    /// # Errors
    ///
    /// Fails with the classified backend error.
    pub async fn request_password_reset(&self, email: &str) -> ApiResult<()> {
        self.client
            .execute(
                RequestSpec::post(PASSWORD_RESET_REQUEST_PATH)
                    .with_json(json!({ "email": email }))
                    .without_auth(),
            )
            .await?;
        Ok(())
    }

    /// Complete a password reset with the emailed token.
    ///
    /// # Errors
    ///
    /// Fails with the classified backend error.
    pub async fn confirm_password_reset(
        &self,
        reset_token: &str,
        new_password: &SecretString,
    ) -> ApiResult<()> {
        self.client
            .execute(
                RequestSpec::post(PASSWORD_RESET_CONFIRM_PATH)
                    .with_json(json!({
                        "token": reset_token,
                        "password": new_password.expose_secret(),
                    }))
                    .without_auth(),
            )
            .await?;
        Ok(())
    }

    /// Validate an invitation token, returning the backend's invitation
    /// details.
    ///
    /// # Errors
    ///
    /// Fails with the classified backend error (404 for an unknown or
    /// expired invitation).
    pub async fn validate_invitation(&self, invitation_token: &str) -> ApiResult<Value> {
        self.client
            .execute(
                RequestSpec::get(format!("{INVITATIONS_PATH}/{invitation_token}")).without_auth(),
            )
            .await
    }

    /// Set the initial password for an invited account. On success the
    /// backend signs the account in, so this persists a session exactly
    /// like [`SessionManager::login`].
    ///
    /// # Errors
    ///
    /// Fails like [`SessionManager::login`].
    #[instrument(skip_all)]
    pub async fn setup_password(
        &self,
        invitation_token: &str,
        password: &SecretString,
    ) -> ApiResult<SessionRecord> {
        let spec = RequestSpec::post(PASSWORD_SETUP_PATH)
            .with_json(json!({
                "token": invitation_token,
                "password": password.expose_secret(),
            }))
            .without_auth();

        let body = self.client.execute(spec).await?;
        let record = decode_sign_in(body)?;
        self.persist(&record)?;
        info!("password set, signed in");
        Ok(record)
    }

    fn persist(&self, record: &SessionRecord) -> ApiResult<()> {
        let raw = serde_json::to_string(record).map_err(PlatformError::from)?;
        self.storage.store(SESSION_STORAGE_KEY, &raw)?;
        self.client.tokens().set(TokenPair::new(
            record.access_token.clone(),
            record.refresh_token.clone(),
        ))?;
        Ok(())
    }
}
