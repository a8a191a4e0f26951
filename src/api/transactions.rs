// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Transactions adapter. The listing endpoint is the one whose envelope has
//! drifted the most across backend versions, so reads go through a
//! three-tier normalization into the canonical [`TransactionPage`], and
//! every transaction gets its nested sub-objects remapped on the way in.

use chrono::{DateTime, Utc};
use reqwest::Method;
use rust_decimal::Decimal;
use serde::Deserialize;
use serde_json::{Value, json};
use uuid::Uuid;

use super::json_kind;
use crate::client::ApiClient;
use crate::error::ApiError;
use crate::models::{
    Account, Category, CategoryKind, RawEvent, Transaction, TransactionAccount,
    TransactionCategory, TransactionDraft, TransactionFilters, TransactionPage, User,
};

pub fn list(client: &ApiClient, filters: &TransactionFilters) -> Result<TransactionPage, ApiError> {
    let value = client.send(Method::GET, "/transactions", None, &filters.to_query())?;
    normalize_page(value, filters)
}

pub fn get(client: &ApiClient, id: &str) -> Result<Transaction, ApiError> {
    let value = client.send(Method::GET, &format!("/transactions/{id}"), None, &[])?;
    decode_transaction(value)
}

/// `payload` is the full denormalized structure from [`build_full_payload`].
pub fn create(client: &ApiClient, payload: &Value) -> Result<Transaction, ApiError> {
    let value = client.send(Method::POST, "/transactions", Some(payload.clone()), &[])?;
    decode_transaction(value)
}

pub fn update(client: &ApiClient, id: &str, payload: &Value) -> Result<Transaction, ApiError> {
    let value = client.send(
        Method::PUT,
        &format!("/transactions/{id}"),
        Some(payload.clone()),
        &[],
    )?;
    decode_transaction(value)
}

pub fn delete(client: &ApiClient, id: &str) -> Result<(), ApiError> {
    client.send(Method::DELETE, &format!("/transactions/{id}"), None, &[])?;
    Ok(())
}

#[derive(Debug, Default, Deserialize)]
struct WirePagination {
    current_page: Option<u32>,
    per_page: Option<u32>,
    total: Option<u64>,
    total_pages: Option<u32>,
}

#[derive(Debug, Deserialize)]
struct WireEnvelope {
    transactions: Option<Vec<WireTransaction>>,
    pagination: Option<WirePagination>,
}

#[derive(Debug, Deserialize)]
struct WireAccount {
    id: String,
    name: String,
    #[serde(rename = "type")]
    kind: crate::models::AccountType,
    user_id: String,
    created_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize)]
struct WireCategory {
    id: String,
    name: String,
    #[serde(rename = "type")]
    kind: CategoryKind,
    user_id: String,
    created_at: DateTime<Utc>,
    #[serde(default)]
    updated_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Deserialize)]
struct WireTransaction {
    id: String,
    user_id: String,
    account_id: String,
    category_id: String,
    amount: Decimal,
    currency: String,
    #[serde(rename = "type")]
    kind: CategoryKind,
    #[serde(default)]
    description: String,
    occurred_at: DateTime<Utc>,
    created_at: DateTime<Utc>,
    #[serde(default)]
    updated_at: Option<DateTime<Utc>>,
    #[serde(default)]
    external_id: Option<String>,
    #[serde(default)]
    raw_event_id: Option<String>,
    #[serde(default)]
    account: Option<WireAccount>,
    #[serde(default)]
    category: Option<WireCategory>,
    #[serde(default)]
    raw_event: Option<RawEvent>,
}

/// Normalize a listing response, in priority order:
///
/// 1. `{ transactions: [...], pagination: {current_page, per_page, total,
///    total_pages} }` maps directly, falling back to the caller's filter for
///    pagination fields the backend left out.
/// 2. A bare array is wrapped; `total_pages` is computed as
///    `ceil(len / limit)` from the caller's requested limit (default 10).
/// 3. Any other object is read best-effort with the tier-1 fallbacks,
///    totals defaulting to 0 and 1 when absent.
///
/// A body that is neither an array nor an object matches no known backend
/// version and is rejected as [`ApiError::UnexpectedShape`].
pub fn normalize_page(
    value: Value,
    filters: &TransactionFilters,
) -> Result<TransactionPage, ApiError> {
    let limit_fallback = filters.effective_limit();
    let page_fallback = filters.page.unwrap_or(1);

    match value {
        Value::Array(items) => {
            let data = items
                .into_iter()
                .map(decode_wire)
                .collect::<Result<Vec<_>, _>>()?;
            let total = data.len() as u64;
            Ok(TransactionPage {
                total,
                page: page_fallback,
                limit: limit_fallback,
                total_pages: total.div_ceil(limit_fallback as u64) as u32,
                data,
            })
        }
        Value::Object(_) => {
            let envelope: WireEnvelope = serde_json::from_value(value)?;
            let had_items = envelope.transactions.is_some();
            let data = envelope
                .transactions
                .unwrap_or_default()
                .into_iter()
                .map(from_wire)
                .collect::<Vec<_>>();
            let pagination = envelope.pagination.unwrap_or_default();
            Ok(TransactionPage {
                total: pagination
                    .total
                    .unwrap_or(if had_items { data.len() as u64 } else { 0 }),
                page: pagination.current_page.unwrap_or(page_fallback),
                limit: pagination.per_page.unwrap_or(limit_fallback),
                total_pages: pagination.total_pages.unwrap_or(1),
                data,
            })
        }
        other => Err(ApiError::UnexpectedShape(format!(
            "expected a transaction listing, got {}",
            json_kind(&other)
        ))),
    }
}

/// Decode a single-transaction response (bare object or `{ "data": {...} }`).
pub fn decode_transaction(value: Value) -> Result<Transaction, ApiError> {
    let wire: WireTransaction = super::decode_entity(value)?;
    Ok(from_wire(wire))
}

fn decode_wire(value: Value) -> Result<Transaction, ApiError> {
    let wire: WireTransaction = serde_json::from_value(value)?;
    Ok(from_wire(wire))
}

/// Wire-to-canonical field mapping. Nested sub-objects arrive with
/// snake_case `created_at`; the canonical nested shapes carry `createdAt`,
/// and a nested category without its own update timestamp gets `updatedAt`
/// backfilled from `created_at`.
fn from_wire(wire: WireTransaction) -> Transaction {
    Transaction {
        id: wire.id,
        user_id: wire.user_id,
        account_id: wire.account_id,
        category_id: wire.category_id,
        amount: wire.amount,
        currency: wire.currency,
        kind: wire.kind,
        description: wire.description,
        occurred_at: wire.occurred_at,
        created_at: wire.created_at,
        updated_at: wire.updated_at,
        external_id: wire.external_id,
        raw_event_id: wire.raw_event_id,
        account: wire.account.map(|a| TransactionAccount {
            id: a.id,
            name: a.name,
            kind: a.kind,
            user_id: a.user_id,
            created_at: a.created_at,
        }),
        category: wire.category.map(|c| TransactionCategory {
            id: c.id,
            name: c.name,
            kind: c.kind,
            user_id: c.user_id,
            created_at: c.created_at,
            updated_at: c.updated_at.unwrap_or(c.created_at),
        }),
        raw_event: wire.raw_event,
    }
}

/// Expand a minimal form draft into the full denormalized payload the
/// backend demands on writes: the draft's own fields plus synthesized
/// account/category/user sub-objects and, for manually entered transactions,
/// a fabricated raw event tagged `source = "manual"`. Identifiers the form
/// does not collect are filled with fresh UUIDs, or carried over from
/// `existing` on an update.
pub fn build_full_payload(
    draft: &TransactionDraft,
    account: &Account,
    category: &Category,
    user: &User,
    existing: Option<&Transaction>,
) -> Result<Value, ApiError> {
    if draft.amount <= Decimal::ZERO {
        return Err(ApiError::Validation(
            "transaction amount must be positive".to_string(),
        ));
    }
    if draft.currency.trim().is_empty() {
        return Err(ApiError::Validation(
            "transaction currency must not be empty".to_string(),
        ));
    }

    let now = Utc::now();
    let id = existing
        .map(|t| t.id.clone())
        .unwrap_or_else(|| Uuid::new_v4().to_string());
    let external_id = existing
        .and_then(|t| t.external_id.clone())
        .unwrap_or_else(|| Uuid::new_v4().to_string());
    let raw_event_id = existing
        .and_then(|t| t.raw_event_id.clone())
        .unwrap_or_else(|| Uuid::new_v4().to_string());

    let raw_event = match existing.and_then(|t| t.raw_event.clone()) {
        Some(ev) => ev,
        None => RawEvent {
            id: raw_event_id.clone(),
            external_id: Uuid::new_v4().to_string(),
            source: "manual".to_string(),
            provider_hint: "manual_entry".to_string(),
            mail_from: String::new(),
            mail_to: String::new(),
            subject: format!("Manual transaction: {}", draft.description),
            message_id: String::new(),
            payload: serde_json::to_string(draft)?,
            status: "processed".to_string(),
            error_message: String::new(),
            received_at: now,
            created_at: now,
            user_id: user.id.clone(),
        },
    };

    let user_obj = json!({
        "id": user.id,
        "email": user.email,
        "created_at": user.created_at,
    });

    let mut raw_event_obj = serde_json::to_value(&raw_event)?;
    raw_event_obj["transactions"] = json!([]);
    raw_event_obj["user"] = user_obj.clone();

    Ok(json!({
        "id": id,
        "user_id": user.id,
        "account_id": draft.account_id,
        "category_id": draft.category_id,
        "amount": draft.amount,
        "currency": draft.currency,
        "description": draft.description,
        "external_id": external_id,
        "raw_event_id": raw_event.id,
        "type": draft.kind,
        "occurred_at": draft.occurred_at,
        "created_at": existing.map(|t| t.created_at).unwrap_or(now),
        "updated_at": now,
        "account": {
            "id": account.id,
            "name": account.name,
            "type": account.kind,
            "user_id": account.user_id,
            "created_at": account.created_at,
            "transactions": [],
            "user": user_obj.clone(),
        },
        "category": {
            "id": category.id,
            "name": category.name,
            "type": category.kind,
            "user_id": category.user_id,
            "created_at": category.created_at,
            "transactions": [],
            "user": user_obj.clone(),
        },
        "raw_event": raw_event_obj,
        "user": user_obj,
    }))
}
