//! Test fixtures with canned backend response bodies.

use serde_json::{json, Value};
use uuid::Uuid;

/// Envelope-shaped sign-in response (`{success, data: {user, tokens}}`).
#[must_use]
pub fn sign_in_envelope(access_token: &str, refresh_token: &str) -> Value {
    json!({
        "success": true,
        "data": {
            "user": sample_user(),
            "tokens": {
                "accessToken": access_token,
                "refreshToken": refresh_token,
            }
        }
    })
}

/// Flat sign-in response (`{user, accessToken, refreshToken}`).
#[must_use]
pub fn sign_in_flat(access_token: &str, refresh_token: &str) -> Value {
    json!({
        "user": sample_user(),
        "accessToken": access_token,
        "refreshToken": refresh_token,
    })
}

/// Refresh endpoint response: a new token pair.
#[must_use]
pub fn refresh_response(access_token: &str, refresh_token: &str) -> Value {
    json!({
        "accessToken": access_token,
        "refreshToken": refresh_token,
    })
}

/// The backend-defined user object used across fixtures.
#[must_use]
pub fn sample_user() -> Value {
    json!({
        "id": 1,
        "name": "Dana Ops",
        "email": "dana@support.example.com",
        "role": "admin"
    })
}

/// Validation-error body whose message lives in `errors[0].message`.
#[must_use]
pub fn validation_error_body(message: &str) -> Value {
    json!({
        "message": "validation failed",
        "errors": [{"field": "email", "message": message}]
    })
}

/// A customer record body with the given id.
#[must_use]
pub fn customer_body(id: Uuid) -> Value {
    json!({
        "id": id,
        "name": "Ada Lovelace",
        "email": "ada@example.com",
        "phone": "+44 20 7946 0958",
        "company": "Analytical Engines Ltd",
        "notes": "<p>Priority account</p>",
        "tags": ["vip"],
        "createdAt": "2025-04-01T09:30:00Z",
        "updatedAt": "2025-07-15T16:45:00Z"
    })
}

/// A one-page list envelope around the given items.
#[must_use]
pub fn page_body(items: Vec<Value>) -> Value {
    let total = items.len();
    json!({
        "items": items,
        "total": total,
        "page": 1,
        "pageSize": 25
    })
}
