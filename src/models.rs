// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::ApiError;

/// Canonical shapes used throughout the client, independent of whatever
/// envelope the backend wrapped them in. Nested sub-objects attached to a
/// transaction serialize their timestamps in camelCase (`createdAt`); the
/// adapters perform that rename on every read.

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AccountType {
    Bank,
    Ewallet,
    Cash,
}

impl fmt::Display for AccountType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AccountType::Bank => write!(f, "bank"),
            AccountType::Ewallet => write!(f, "ewallet"),
            AccountType::Cash => write!(f, "cash"),
        }
    }
}

impl FromStr for AccountType {
    type Err = ApiError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "bank" => Ok(AccountType::Bank),
            "ewallet" => Ok(AccountType::Ewallet),
            "cash" => Ok(AccountType::Cash),
            other => Err(ApiError::Validation(format!(
                "invalid account type '{other}', expected bank|ewallet|cash"
            ))),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CategoryKind {
    Income,
    Expense,
}

impl fmt::Display for CategoryKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CategoryKind::Income => write!(f, "income"),
            CategoryKind::Expense => write!(f, "expense"),
        }
    }
}

impl FromStr for CategoryKind {
    type Err = ApiError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "income" => Ok(CategoryKind::Income),
            "expense" => Ok(CategoryKind::Expense),
            other => Err(ApiError::Validation(format!(
                "invalid type '{other}', expected income|expense"
            ))),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub id: String,
    pub email: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Account {
    pub id: String,
    pub user_id: String,
    pub name: String,
    #[serde(rename = "type")]
    pub kind: AccountType,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Category {
    pub id: String,
    pub user_id: String,
    pub name: String,
    #[serde(rename = "type")]
    pub kind: CategoryKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    pub created_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

/// Denormalized account copy the backend attaches to a transaction.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TransactionAccount {
    pub id: String,
    pub name: String,
    #[serde(rename = "type")]
    pub kind: AccountType,
    pub user_id: String,
    #[serde(rename = "createdAt")]
    pub created_at: DateTime<Utc>,
}

/// Denormalized category copy the backend attaches to a transaction.
/// `updated_at` is backfilled from `created_at` when the backend does not
/// send a distinct update timestamp.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TransactionCategory {
    pub id: String,
    pub name: String,
    #[serde(rename = "type")]
    pub kind: CategoryKind,
    pub user_id: String,
    #[serde(rename = "createdAt")]
    pub created_at: DateTime<Utc>,
    #[serde(rename = "updatedAt")]
    pub updated_at: DateTime<Utc>,
}

/// Ingestion record behind a transaction. Manually entered transactions get
/// a synthetic one tagged `source = "manual"`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RawEvent {
    pub id: String,
    pub external_id: String,
    pub source: String,
    pub provider_hint: String,
    #[serde(default)]
    pub mail_from: String,
    #[serde(default)]
    pub mail_to: String,
    #[serde(default)]
    pub subject: String,
    #[serde(default)]
    pub message_id: String,
    #[serde(default)]
    pub payload: String,
    pub status: String,
    #[serde(default)]
    pub error_message: String,
    pub received_at: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
    pub user_id: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Transaction {
    pub id: String,
    pub user_id: String,
    pub account_id: String,
    pub category_id: String,
    pub amount: Decimal,
    pub currency: String,
    #[serde(rename = "type")]
    pub kind: CategoryKind,
    #[serde(default)]
    pub description: String,
    pub occurred_at: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub external_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub raw_event_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub account: Option<TransactionAccount>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<TransactionCategory>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub raw_event: Option<RawEvent>,
}

/// Canonical paginated listing, regardless of which envelope version the
/// backend answered with.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TransactionPage {
    pub data: Vec<Transaction>,
    pub total: u64,
    pub page: u32,
    pub limit: u32,
    #[serde(rename = "totalPages")]
    pub total_pages: u32,
}

pub const DEFAULT_PAGE_LIMIT: u32 = 10;

#[derive(Debug, Clone, Default, Serialize)]
pub struct TransactionFilters {
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub account_id: Option<String>,
    pub category_id: Option<String>,
    pub kind: Option<CategoryKind>,
    pub page: Option<u32>,
    pub limit: Option<u32>,
}

impl TransactionFilters {
    /// Query-parameter mapping: `start_date -> from_date`,
    /// `end_date -> to_date`, `account_id`/`category_id` keep their snake
    /// names, `kind -> type`; only present fields are forwarded.
    pub fn to_query(&self) -> Vec<(&'static str, String)> {
        let mut params = Vec::new();
        if let Some(page) = self.page {
            params.push(("page", page.to_string()));
        }
        if let Some(limit) = self.limit {
            params.push(("limit", limit.to_string()));
        }
        if let Some(d) = self.start_date {
            params.push(("from_date", d.to_string()));
        }
        if let Some(d) = self.end_date {
            params.push(("to_date", d.to_string()));
        }
        if let Some(id) = &self.account_id {
            params.push(("account_id", id.clone()));
        }
        if let Some(id) = &self.category_id {
            params.push(("category_id", id.clone()));
        }
        if let Some(kind) = self.kind {
            params.push(("type", kind.to_string()));
        }
        params
    }

    /// Requested page size, floored at 1 so page-count arithmetic never
    /// divides by zero.
    pub fn effective_limit(&self) -> u32 {
        self.limit.unwrap_or(DEFAULT_PAGE_LIMIT).max(1)
    }
}

/// Minimal form payload for a transaction write; the adapter expands it into
/// the full denormalized structure the backend demands.
#[derive(Debug, Clone, Serialize)]
pub struct TransactionDraft {
    pub account_id: String,
    pub category_id: String,
    pub amount: Decimal,
    #[serde(rename = "type")]
    pub kind: CategoryKind,
    pub currency: String,
    pub description: String,
    pub occurred_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize)]
pub struct NewAccount {
    pub name: String,
    #[serde(rename = "type")]
    pub kind: AccountType,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct AccountPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub kind: Option<AccountType>,
}

#[derive(Debug, Clone, Serialize)]
pub struct NewCategory {
    pub name: String,
    #[serde(rename = "type")]
    pub kind: CategoryKind,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct CategoryPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub kind: Option<CategoryKind>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
}

/// Month window aggregate from `GET /reports/summary`. The backend names the
/// closing balance `saldo_akhir`; it stays on the wire name for round-trips.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DashboardSummary {
    pub year: i32,
    pub month: u32,
    pub total_income: Decimal,
    pub total_expense: Decimal,
    pub net_income: Decimal,
    #[serde(rename = "saldo_akhir")]
    pub ending_balance: Decimal,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AuthResponse {
    pub token: String,
    pub user: User,
}

#[derive(Debug, Clone, Deserialize)]
pub struct OauthStatus {
    pub success: bool,
    #[serde(default)]
    pub message: String,
}
