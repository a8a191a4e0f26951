// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

pub mod accounts;
pub mod auth;
pub mod categories;
pub mod dashboard;
pub mod transactions;

use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::error::ApiError;

/// Unwrap a listing response. The backend's envelope changed across its own
/// versions, so three shapes are accepted for every resource: a bare array,
/// `{ <resource>: [...] }` and `{ "data": [...] }`. Anything else is an
/// explicit [`ApiError::UnexpectedShape`] rather than a silent empty list.
pub fn decode_list<T: DeserializeOwned>(value: Value, resource: &str) -> Result<Vec<T>, ApiError> {
    let items = match value {
        Value::Array(items) => items,
        Value::Object(mut map) => match map.remove(resource).or_else(|| map.remove("data")) {
            Some(Value::Array(items)) => items,
            _ => {
                return Err(ApiError::UnexpectedShape(format!(
                    "no '{resource}' or 'data' array in listing response"
                )));
            }
        },
        other => {
            return Err(ApiError::UnexpectedShape(format!(
                "expected a {resource} listing, got {}",
                json_kind(&other)
            )));
        }
    };
    items
        .into_iter()
        .map(|v| serde_json::from_value(v).map_err(ApiError::from))
        .collect()
}

/// Unwrap a single-entity response: either the bare object or `{ "data": {...} }`.
pub fn decode_entity<T: DeserializeOwned>(value: Value) -> Result<T, ApiError> {
    let value = match value {
        Value::Object(mut map) => match map.remove("data") {
            Some(inner @ Value::Object(_)) => inner,
            Some(other) => {
                // An entity field that happens to be named "data"; put it back.
                map.insert("data".to_string(), other);
                Value::Object(map)
            }
            None => Value::Object(map),
        },
        other => other,
    };
    serde_json::from_value(value).map_err(ApiError::from)
}

pub(crate) fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
