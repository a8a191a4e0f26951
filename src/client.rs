// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use reqwest::blocking::Response;
use reqwest::{Method, StatusCode};
use serde_json::Value;

use crate::error::ApiError;
use crate::notify::SharedNotifier;
use crate::session::SessionStore;

const DEFAULT_BASE_URL: &str = "https://finance-be.calestira.com/api/v1";

const UA: &str = concat!(
    "fintrack/",
    env!("CARGO_PKG_VERSION"),
    " (+https://github.com/alphavelocity/fintrack)"
);

const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

pub fn api_base_url() -> String {
    std::env::var("FINTRACK_API_URL").unwrap_or_else(|_| DEFAULT_BASE_URL.to_string())
}

/// Single configured request sender. Attaches the bearer token when one is
/// present, applies the fixed timeout, classifies failures into [`ApiError`]
/// and emits the one-shot user notification for each terminal error class so
/// the adapters never have to.
pub struct ApiClient {
    http: reqwest::blocking::Client,
    base_url: String,
    session: Arc<SessionStore>,
    notifier: SharedNotifier,
}

impl ApiClient {
    pub fn new(base_url: String, session: Arc<SessionStore>, notifier: SharedNotifier) -> Result<Self> {
        let http = reqwest::blocking::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .user_agent(UA)
            .build()?;
        Ok(ApiClient {
            http,
            base_url,
            session,
            notifier,
        })
    }

    /// Send a request and return the parsed JSON body. Empty and 204
    /// responses yield `Value::Null`.
    #[tracing::instrument(skip(self, body, query), fields(method = %method))]
    pub fn send(
        &self,
        method: Method,
        path: &str,
        body: Option<Value>,
        query: &[(&str, String)],
    ) -> Result<Value, ApiError> {
        let url = format!("{}{}", self.base_url, path);
        let mut req = self.http.request(method, &url);
        if !query.is_empty() {
            req = req.query(query);
        }
        if let Some(token) = self.session.token() {
            req = req.bearer_auth(token);
        }
        if let Some(b) = &body {
            req = req.json(b);
        }

        let resp = req.send().map_err(|e| self.transport_error(e))?;
        let status = resp.status();
        if !status.is_success() {
            return Err(self.status_error(status, resp));
        }
        if status == StatusCode::NO_CONTENT {
            return Ok(Value::Null);
        }
        let text = resp
            .text()
            .map_err(|e| ApiError::Network(e.to_string()))?;
        if text.trim().is_empty() {
            return Ok(Value::Null);
        }
        serde_json::from_str(&text)
            .map_err(|e| ApiError::UnexpectedShape(format!("invalid JSON body: {e}")))
    }

    fn transport_error(&self, err: reqwest::Error) -> ApiError {
        if err.is_timeout() {
            tracing::warn!(error = %err, "request timed out");
            self.notifier.error("Request timeout. Please try again.");
            ApiError::Timeout
        } else {
            tracing::warn!(error = %err, "network failure");
            self.notifier
                .error("Network error. Please check your connection.");
            ApiError::Network(err.to_string())
        }
    }

    fn status_error(&self, status: StatusCode, resp: Response) -> ApiError {
        let body = resp.text().unwrap_or_default();
        let message = serde_json::from_str::<Value>(&body)
            .ok()
            .and_then(|v| v.get("message").and_then(Value::as_str).map(str::to_string))
            .filter(|m| !m.is_empty())
            .unwrap_or_else(|| {
                status
                    .canonical_reason()
                    .unwrap_or("request failed")
                    .to_string()
            });
        tracing::warn!(status = status.as_u16(), message, "request rejected");

        match status {
            StatusCode::UNAUTHORIZED => {
                // The persisted token is useless now; drop the whole session
                // so the next command lands back at the login step.
                self.session.expire();
                self.notifier.error("Session expired. Please login again.");
                ApiError::SessionExpired
            }
            StatusCode::FORBIDDEN => {
                self.notifier
                    .error("You do not have permission to perform this action.");
                ApiError::Permission(message)
            }
            StatusCode::NOT_FOUND => {
                self.notifier.error("Resource not found.");
                ApiError::NotFound(message)
            }
            s if s.is_server_error() => {
                self.notifier.error("Server error. Please try again later.");
                ApiError::Server {
                    status: s.as_u16(),
                    message,
                }
            }
            // Remaining 4xx carry field-level detail for the caller to
            // surface; no centralized notification.
            _ => ApiError::Validation(message),
        }
    }
}
