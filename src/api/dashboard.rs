// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use reqwest::Method;
use serde_json::Value;

use super::json_kind;
use crate::client::ApiClient;
use crate::error::ApiError;
use crate::models::DashboardSummary;

pub fn summary(client: &ApiClient, year: i32, month: u32) -> Result<DashboardSummary, ApiError> {
    let value = client.send(
        Method::GET,
        "/reports/summary",
        None,
        &[("year", year.to_string()), ("month", month.to_string())],
    )?;
    decode_summary(value)
}

/// The summary arrives as `{ summary: {...} }`; a bare summary object is
/// tolerated for older backend versions.
pub fn decode_summary(value: Value) -> Result<DashboardSummary, ApiError> {
    let value = match value {
        Value::Object(mut map) => match map.remove("summary") {
            Some(inner @ Value::Object(_)) => inner,
            Some(other) => {
                return Err(ApiError::UnexpectedShape(format!(
                    "'summary' is {}, expected an object",
                    json_kind(&other)
                )));
            }
            None => Value::Object(map),
        },
        other => {
            return Err(ApiError::UnexpectedShape(format!(
                "expected a summary object, got {}",
                json_kind(&other)
            )));
        }
    };
    serde_json::from_value(value).map_err(ApiError::from)
}
