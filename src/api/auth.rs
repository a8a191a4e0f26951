// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use reqwest::Method;
use serde_json::json;

use super::decode_entity;
use crate::client::ApiClient;
use crate::error::ApiError;
use crate::models::{AuthResponse, OauthStatus, User};

#[tracing::instrument(skip(client, password))]
pub fn login(client: &ApiClient, email: &str, password: &str) -> Result<AuthResponse, ApiError> {
    if email.trim().is_empty() || password.is_empty() {
        return Err(ApiError::Validation(
            "email and password are required".to_string(),
        ));
    }
    let body = json!({ "email": email, "password": password });
    let value = client.send(Method::POST, "/auth/login", Some(body), &[])?;
    decode_entity(value)
}

pub fn register(client: &ApiClient, email: &str, password: &str) -> Result<AuthResponse, ApiError> {
    if email.trim().is_empty() || password.is_empty() {
        return Err(ApiError::Validation(
            "email and password are required".to_string(),
        ));
    }
    let body = json!({ "email": email, "password": password });
    let value = client.send(Method::POST, "/auth/register", Some(body), &[])?;
    decode_entity(value)
}

/// Current user profile. A 401 here surfaces as [`ApiError::SessionExpired`]
/// and is never retried by the cache layer.
pub fn me(client: &ApiClient) -> Result<User, ApiError> {
    let value = client.send(Method::GET, "/auth/me", None, &[])?;
    decode_entity(value)
}

pub fn oauth_disconnect(client: &ApiClient, provider: &str) -> Result<OauthStatus, ApiError> {
    let body = json!({ "provider": provider });
    let value = client.send(Method::POST, "/oauth/disconnect", Some(body), &[])?;
    decode_entity(value)
}

pub fn oauth_callback(
    client: &ApiClient,
    provider: &str,
    code: &str,
    state: &str,
) -> Result<OauthStatus, ApiError> {
    if code.is_empty() || state.is_empty() {
        return Err(ApiError::Validation(
            "missing authorization code or state parameter".to_string(),
        ));
    }
    let value = client.send(
        Method::GET,
        &format!("/oauth/{provider}/callback"),
        None,
        &[("code", code.to_string()), ("state", state.to_string())],
    )?;
    decode_entity(value)
}
