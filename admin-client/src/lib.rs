//! Support Platform admin API client.
//!
//! The HTTP layer the admin dashboard uses to talk to the platform backend:
//! durable token storage, bearer-auth request execution with a single-shot
//! refresh-and-retry policy, status classification into user-facing
//! messages, and per-resource endpoint wrappers.

pub mod client;
pub mod config;
pub mod endpoints;
pub mod error;
pub mod models;
pub mod request;
pub mod session;
pub mod storage;
pub mod token;

pub use client::{ApiClient, SessionState, REFRESH_PATH};
pub use config::ApiConfig;
pub use endpoints::ListQuery;
pub use endpoints::analytics::DateRange;
pub use error::{ApiError, ApiResult, ErrorKind};
pub use request::{FilePart, RequestBody, RequestSpec};
pub use session::{Credentials, SessionManager, SessionRecord};
pub use storage::{FileStorage, KeyValueStorage, MemoryStorage};
pub use token::{TokenPair, TokenStore};
