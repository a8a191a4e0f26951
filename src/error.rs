// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use thiserror::Error;

/// Classified failures raised by the HTTP client and passed through the
/// adapters unchanged. The cache layer keys its retry policy off
/// [`ApiError::is_retryable`].
#[derive(Debug, Error)]
pub enum ApiError {
    /// No response was received at all.
    #[error("network error: {0}")]
    Network(String),

    /// The request deadline elapsed before a response arrived.
    #[error("request timed out")]
    Timeout,

    /// The backend answered 401. Raising this has already cleared the
    /// session; retrying cannot succeed without new credentials.
    #[error("session expired")]
    SessionExpired,

    /// 403 from the backend.
    #[error("permission denied: {0}")]
    Permission(String),

    /// 404 from the backend.
    #[error("not found: {0}")]
    NotFound(String),

    /// Any 5xx, with the original status preserved.
    #[error("server error ({status}): {message}")]
    Server { status: u16, message: String },

    /// A client-side invariant violation (raised before any network call)
    /// or a 4xx with field-level detail. Never retried.
    #[error("validation failed: {0}")]
    Validation(String),

    /// The response body matched none of the known envelope shapes.
    #[error("unrecognized response shape: {0}")]
    UnexpectedShape(String),
}

impl ApiError {
    /// Transient or ambiguous failures may be retried by the cache layer;
    /// authentication failures and validation errors may not.
    pub fn is_retryable(&self) -> bool {
        !matches!(self, ApiError::SessionExpired | ApiError::Validation(_))
    }
}

impl From<serde_json::Error> for ApiError {
    fn from(err: serde_json::Error) -> Self {
        ApiError::UnexpectedShape(err.to_string())
    }
}
