//! Client error types and status classification.
//!
//! Every failure surfaces as a single [`ApiError`] carrying both the
//! technical message (for logs) and a user-safe message (for display), plus
//! the raw response payload when one was received.

use serde_json::Value;
use support_common::PlatformError;
use thiserror::Error;

/// User-facing fallback when no better message is available.
pub const GENERIC_ERROR_MESSAGE: &str = "Something went wrong. Please try again.";

/// Result type for client operations.
pub type ApiResult<T> = Result<T, ApiError>;

/// Admin API client errors.
#[derive(Error, Debug)]
pub enum ApiError {
    /// The request failed before any response was received (DNS, refused
    /// connection, TLS, timeout). Reported as status 0.
    #[error("request failed: {message}")]
    Transport {
        /// Technical failure description from the transport
        message: String,
    },

    /// The backend answered with a non-success status.
    #[error("HTTP {status}: {message}")]
    Status {
        /// HTTP status code
        status: u16,
        /// Most specific message extracted from the response body, or the
        /// raw body/status line when none was found
        message: String,
        /// Raw JSON response body, when the body parsed as JSON
        payload: Option<Value>,
    },

    /// A success status carried a body that did not decode. Fatal; never
    /// retried automatically.
    #[error("malformed response: {message}")]
    MalformedResponse {
        /// Decode failure description
        message: String,
    },

    /// The refresh token was rejected and the local session has been torn
    /// down. The UI must navigate to re-authentication.
    #[error("session terminated: refresh token rejected")]
    SessionExpired,

    /// Local failure outside the HTTP exchange (storage, client setup).
    #[error(transparent)]
    Platform(#[from] PlatformError),
}

/// Coarse failure taxonomy, independent of the exact status code.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// No response received
    Transport,
    /// 4xx: caller-correctable
    Client,
    /// 5xx: transient, retry later
    Server,
    /// 401: recoverable via refresh
    AuthExpired,
    /// 403, or 401 after the refresh path is exhausted
    AuthRejected,
    /// Undecodable success body
    MalformedResponse,
    /// Local (non-HTTP) failure
    Local,
}

impl ApiError {
    /// Create a transport error.
    #[must_use]
    pub fn transport(message: impl Into<String>) -> Self {
        Self::Transport {
            message: message.into(),
        }
    }

    /// Create a status error with the extracted message and raw payload.
    #[must_use]
    pub fn status(status: u16, message: impl Into<String>, payload: Option<Value>) -> Self {
        Self::Status {
            status,
            message: message.into(),
            payload,
        }
    }

    /// Create a malformed-response error.
    #[must_use]
    pub fn malformed(message: impl Into<String>) -> Self {
        Self::MalformedResponse {
            message: message.into(),
        }
    }

    /// HTTP status code, with 0 denoting a transport-level failure or a
    /// local error.
    #[must_use]
    pub const fn status_code(&self) -> u16 {
        match self {
            Self::Status { status, .. } => *status,
            _ => 0,
        }
    }

    /// Raw JSON payload of the failed response, when one was received.
    #[must_use]
    pub const fn payload(&self) -> Option<&Value> {
        match self {
            Self::Status { payload, .. } => payload.as_ref(),
            _ => None,
        }
    }

    /// Coarse taxonomy bucket for this error.
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::Transport { .. } => ErrorKind::Transport,
            Self::Status { status, .. } => match status {
                401 => ErrorKind::AuthExpired,
                403 => ErrorKind::AuthRejected,
                500..=599 => ErrorKind::Server,
                _ => ErrorKind::Client,
            },
            Self::MalformedResponse { .. } => ErrorKind::MalformedResponse,
            Self::SessionExpired => ErrorKind::AuthRejected,
            Self::Platform(_) => ErrorKind::Local,
        }
    }

    /// Whether a caller may reasonably retry the same request.
    #[must_use]
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::Transport { .. } => true,
            Self::Status { status, .. } => *status == 429 || (500..=599).contains(status),
            Self::Platform(p) => p.is_retryable(),
            _ => false,
        }
    }

    /// User-safe message for display.
    ///
    /// Status errors classify by code; the raw technical message and payload
    /// stay available on the error for diagnostics.
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            Self::Transport { .. } => user_message_for_status(0, ""),
            Self::Status {
                status, message, ..
            } => user_message_for_status(*status, message),
            Self::SessionExpired => "Your session has expired. Please sign in again.".to_string(),
            Self::MalformedResponse { .. } | Self::Platform(_) => GENERIC_ERROR_MESSAGE.to_string(),
        }
    }
}

/// Map a status code to its user-facing message.
///
/// Statuses outside the table fall back to the raw message, or to
/// [`GENERIC_ERROR_MESSAGE`] when the raw message is blank. Status 0 denotes
/// a transport failure.
#[must_use]
pub fn user_message_for_status(status: u16, raw: &str) -> String {
    let fixed = match status {
        400 => "Invalid request. Please check your input and try again.",
        401 => "Invalid email or password.",
        403 => "You don't have permission to perform this action.",
        404 => "The requested resource was not found.",
        409 => "This action conflicts with existing data.",
        422 => "The provided data is invalid. Please check your input.",
        429 => "Too many requests. Please wait a moment and try again.",
        500 | 502 | 503 | 504 => {
            "Our servers are temporarily unavailable. Please try again later."
        }
        0 => "Unable to connect. Please check your internet connection.",
        _ => {
            return if raw.trim().is_empty() {
                GENERIC_ERROR_MESSAGE.to_string()
            } else {
                raw.to_string()
            };
        }
    };
    fixed.to_string()
}

/// Most specific error message in a response body.
///
/// Extractors run in priority order; the first non-blank result wins. The
/// order is a contract relied on by the dashboard:
///
/// 1. a string `details` field
/// 2. the first element of an `errors` array (its `message` field, or the
///    element itself when it is a string)
/// 3. a string `message` field
/// 4. a string `error` field
/// 5. a string `detail` field
#[must_use]
pub fn extract_error_message(payload: &Value) -> Option<String> {
    string_field(payload, "details")
        .or_else(|| first_error_entry(payload))
        .or_else(|| string_field(payload, "message"))
        .or_else(|| string_field(payload, "error"))
        .or_else(|| string_field(payload, "detail"))
}

fn non_blank(s: &str) -> Option<String> {
    let trimmed = s.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

fn string_field(payload: &Value, key: &str) -> Option<String> {
    payload.get(key).and_then(Value::as_str).and_then(non_blank)
}

fn first_error_entry(payload: &Value) -> Option<String> {
    let entry = payload.get("errors")?.as_array()?.first()?;
    match entry {
        Value::String(s) => non_blank(s),
        other => other
            .get("message")
            .and_then(Value::as_str)
            .and_then(non_blank),
    }
}
