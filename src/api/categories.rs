// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use reqwest::Method;

use super::{decode_entity, decode_list};
use crate::client::ApiClient;
use crate::error::ApiError;
use crate::models::{Category, CategoryPatch, NewCategory};

pub fn list(client: &ApiClient) -> Result<Vec<Category>, ApiError> {
    let value = client.send(Method::GET, "/categories", None, &[])?;
    decode_list(value, "categories")
}

pub fn get(client: &ApiClient, id: &str) -> Result<Category, ApiError> {
    let value = client.send(Method::GET, &format!("/categories/{id}"), None, &[])?;
    decode_entity(value)
}

pub fn create(client: &ApiClient, new: &NewCategory) -> Result<Category, ApiError> {
    if new.name.trim().is_empty() {
        return Err(ApiError::Validation(
            "category name must not be empty".to_string(),
        ));
    }
    let body = serde_json::to_value(new)?;
    let value = client.send(Method::POST, "/categories", Some(body), &[])?;
    decode_entity(value)
}

pub fn update(client: &ApiClient, id: &str, patch: &CategoryPatch) -> Result<Category, ApiError> {
    if let Some(name) = &patch.name {
        if name.trim().is_empty() {
            return Err(ApiError::Validation(
                "category name must not be empty".to_string(),
            ));
        }
    }
    let body = serde_json::to_value(patch)?;
    let value = client.send(Method::PUT, &format!("/categories/{id}"), Some(body), &[])?;
    decode_entity(value)
}

pub fn delete(client: &ApiClient, id: &str) -> Result<(), ApiError> {
    client.send(Method::DELETE, &format!("/categories/{id}"), None, &[])?;
    Ok(())
}
