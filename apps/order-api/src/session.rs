//! # Session Identity
//!
//! Session identity is supplied by the caller as an opaque `x-session-id`
//! header. An absent (or non-UTF8) header maps to the single well-known
//! default session rather than an error, which keeps the contract simple
//! for single-user and testing contexts.

use axum::http::HeaderMap;

use fotokiosk_core::DEFAULT_SESSION_ID;

/// Header carrying the opaque session token.
pub const SESSION_HEADER: &str = "x-session-id";

/// Extracts the session id from request headers.
pub fn session_id(headers: &HeaderMap) -> String {
    headers
        .get(SESSION_HEADER)
        .and_then(|value| value.to_str().ok())
        .filter(|value| !value.trim().is_empty())
        .unwrap_or(DEFAULT_SESSION_ID)
        .to_string()
}
