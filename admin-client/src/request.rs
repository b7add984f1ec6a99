//! Declarative request descriptions.
//!
//! A [`RequestSpec`] carries everything needed to issue a request, and can
//! be re-materialized as many times as needed; the refresh-and-retry path
//! replays the original spec with a fresh access token.

use std::fmt;

use reqwest::Method;
use serde_json::Value;

/// One backend request: endpoint, method, headers, body, auth handling.
#[derive(Debug, Clone)]
pub struct RequestSpec {
    /// API path starting with `/`, relative to the configured base URL
    pub path: String,
    /// HTTP method
    pub method: Method,
    /// Query string parameters
    pub query: Vec<(String, String)>,
    /// Extra headers beyond the computed auth/content-type headers
    pub headers: Vec<(String, String)>,
    /// Request body
    pub body: RequestBody,
    /// When true, no auth header is attached and a 401 never triggers the
    /// refresh path. Set on login, password reset, invitation validation,
    /// password setup, and the refresh call itself.
    pub skip_auth: bool,
}

/// Request body variants.
#[derive(Debug, Clone, Default)]
pub enum RequestBody {
    /// No body
    #[default]
    Empty,
    /// JSON body; `Content-Type: application/json` is set by the executor
    Json(Value),
    /// Multipart form; the content type (with its boundary) is left for the
    /// transport to set
    Multipart(Vec<FilePart>),
}

/// One part of a multipart upload.
///
/// Parts own their bytes so a request can be rebuilt for the replay after a
/// token refresh.
#[derive(Clone)]
pub struct FilePart {
    /// Form field name
    pub name: String,
    /// Original file name
    pub file_name: String,
    /// MIME type of the content
    pub mime_type: String,
    /// File content
    pub bytes: Vec<u8>,
}

impl FilePart {
    /// Create a part from in-memory file content.
    #[must_use]
    pub fn new(
        name: impl Into<String>,
        file_name: impl Into<String>,
        mime_type: impl Into<String>,
        bytes: Vec<u8>,
    ) -> Self {
        Self {
            name: name.into(),
            file_name: file_name.into(),
            mime_type: mime_type.into(),
            bytes,
        }
    }
}

impl fmt::Debug for FilePart {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FilePart")
            .field("name", &self.name)
            .field("file_name", &self.file_name)
            .field("mime_type", &self.mime_type)
            .field("bytes", &format_args!("{} bytes", self.bytes.len()))
            .finish()
    }
}

impl RequestSpec {
    /// Create a spec for the given method and path.
    #[must_use]
    pub fn new(method: Method, path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            method,
            query: Vec::new(),
            headers: Vec::new(),
            body: RequestBody::Empty,
            skip_auth: false,
        }
    }

    /// GET request.
    #[must_use]
    pub fn get(path: impl Into<String>) -> Self {
        Self::new(Method::GET, path)
    }

    /// POST request.
    #[must_use]
    pub fn post(path: impl Into<String>) -> Self {
        Self::new(Method::POST, path)
    }

    /// PUT request.
    #[must_use]
    pub fn put(path: impl Into<String>) -> Self {
        Self::new(Method::PUT, path)
    }

    /// PATCH request.
    #[must_use]
    pub fn patch(path: impl Into<String>) -> Self {
        Self::new(Method::PATCH, path)
    }

    /// DELETE request.
    #[must_use]
    pub fn delete(path: impl Into<String>) -> Self {
        Self::new(Method::DELETE, path)
    }

    /// Attach a JSON body.
    #[must_use]
    pub fn with_json(mut self, body: Value) -> Self {
        self.body = RequestBody::Json(body);
        self
    }

    /// Attach a multipart body.
    #[must_use]
    pub fn with_multipart(mut self, parts: Vec<FilePart>) -> Self {
        self.body = RequestBody::Multipart(parts);
        self
    }

    /// Add a query string parameter.
    #[must_use]
    pub fn with_query(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.query.push((name.into(), value.into()));
        self
    }

    /// Add an extra header.
    #[must_use]
    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }

    /// Mark this request as unauthenticated: no auth header, no refresh.
    #[must_use]
    pub const fn without_auth(mut self) -> Self {
        self.skip_auth = true;
        self
    }
}
