// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use reqwest::Method;

use super::{decode_entity, decode_list};
use crate::client::ApiClient;
use crate::error::ApiError;
use crate::models::{Account, AccountPatch, NewAccount};

pub fn list(client: &ApiClient) -> Result<Vec<Account>, ApiError> {
    let value = client.send(Method::GET, "/accounts", None, &[])?;
    decode_list(value, "accounts")
}

pub fn get(client: &ApiClient, id: &str) -> Result<Account, ApiError> {
    let value = client.send(Method::GET, &format!("/accounts/{id}"), None, &[])?;
    decode_entity(value)
}

pub fn create(client: &ApiClient, new: &NewAccount) -> Result<Account, ApiError> {
    if new.name.trim().is_empty() {
        return Err(ApiError::Validation(
            "account name must not be empty".to_string(),
        ));
    }
    let body = serde_json::to_value(new)?;
    let value = client.send(Method::POST, "/accounts", Some(body), &[])?;
    decode_entity(value)
}

pub fn update(client: &ApiClient, id: &str, patch: &AccountPatch) -> Result<Account, ApiError> {
    if let Some(name) = &patch.name {
        if name.trim().is_empty() {
            return Err(ApiError::Validation(
                "account name must not be empty".to_string(),
            ));
        }
    }
    let body = serde_json::to_value(patch)?;
    let value = client.send(Method::PUT, &format!("/accounts/{id}"), Some(body), &[])?;
    decode_entity(value)
}

pub fn delete(client: &ApiClient, id: &str) -> Result<(), ApiError> {
    client.send(Method::DELETE, &format!("/accounts/{id}"), None, &[])?;
    Ok(())
}
