// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::{NaiveDate, TimeZone, Utc};
use fintrack::api::transactions::{build_full_payload, normalize_page};
use fintrack::error::ApiError;
use fintrack::models::{
    Account, AccountType, Category, CategoryKind, Transaction, TransactionDraft,
    TransactionFilters, User,
};
use rust_decimal::Decimal;
use serde_json::{Value, json};

fn wire_tx(i: u32) -> Value {
    json!({
        "id": format!("tx-{i}"),
        "user_id": "u1",
        "account_id": "a1",
        "category_id": "c1",
        "amount": 25,
        "currency": "USD",
        "type": "expense",
        "description": format!("item {i}"),
        "occurred_at": "2025-08-01T00:00:00Z",
        "created_at": "2025-08-01T00:00:00Z",
    })
}

#[test]
fn paginated_envelope_maps_directly() {
    let items: Vec<Value> = (1..=8).map(wire_tx).collect();
    let raw = json!({
        "transactions": items,
        "pagination": {
            "current_page": 2,
            "per_page": 10,
            "total": 18,
            "total_pages": 2,
            "has_next": false,
            "has_prev": true,
        },
    });
    let filters = TransactionFilters {
        account_id: Some("A1".to_string()),
        page: Some(2),
        limit: Some(10),
        ..Default::default()
    };
    let page = normalize_page(raw, &filters).unwrap();
    assert_eq!(page.data.len(), 8);
    assert_eq!(page.total, 18);
    assert_eq!(page.page, 2);
    assert_eq!(page.limit, 10);
    assert_eq!(page.total_pages, 2);
}

#[test]
fn bare_array_is_wrapped_with_computed_page_count() {
    let items: Vec<Value> = (1..=25).map(wire_tx).collect();
    let page = normalize_page(Value::Array(items), &TransactionFilters::default()).unwrap();
    assert_eq!(page.total, 25);
    assert_eq!(page.data.len(), 25);
    assert_eq!(page.page, 1);
    assert_eq!(page.limit, 10);
    assert_eq!(page.total_pages, 3);
}

#[test]
fn bare_array_uses_caller_limit() {
    let items: Vec<Value> = (1..=25).map(wire_tx).collect();
    let filters = TransactionFilters {
        limit: Some(8),
        ..Default::default()
    };
    let page = normalize_page(Value::Array(items), &filters).unwrap();
    assert_eq!(page.limit, 8);
    assert_eq!(page.total_pages, 4);
}

#[test]
fn zero_limit_is_floored_before_page_arithmetic() {
    let items: Vec<Value> = (1..=25).map(wire_tx).collect();
    let filters = TransactionFilters {
        limit: Some(0),
        ..Default::default()
    };
    let page = normalize_page(Value::Array(items), &filters).unwrap();
    assert_eq!(page.limit, 1);
    assert_eq!(page.total, 25);
    assert_eq!(page.total_pages, 25);
}

#[test]
fn missing_pagination_falls_back_to_item_count() {
    let raw = json!({ "transactions": [wire_tx(1), wire_tx(2)] });
    let page = normalize_page(raw, &TransactionFilters::default()).unwrap();
    assert_eq!(page.total, 2);
    assert_eq!(page.data.len() as u64, page.total);
    assert_eq!(page.page, 1);
    assert_eq!(page.total_pages, 1);
}

#[test]
fn best_effort_object_defaults_totals() {
    let page = normalize_page(json!({}), &TransactionFilters::default()).unwrap();
    assert!(page.data.is_empty());
    assert_eq!(page.total, 0);
    assert_eq!(page.page, 1);
    assert_eq!(page.total_pages, 1);

    let raw = json!({ "pagination": { "total": 5 } });
    let page = normalize_page(raw, &TransactionFilters::default()).unwrap();
    assert!(page.data.is_empty());
    assert_eq!(page.total, 5);
}

#[test]
fn non_listing_body_is_rejected() {
    let err = normalize_page(json!("nope"), &TransactionFilters::default()).unwrap_err();
    assert!(matches!(err, ApiError::UnexpectedShape(_)));
}

#[test]
fn nested_objects_get_canonical_timestamps() {
    let mut tx = wire_tx(1);
    tx["account"] = json!({
        "id": "a1",
        "name": "Checking",
        "type": "bank",
        "user_id": "u1",
        "created_at": "2025-07-01T00:00:00Z",
    });
    tx["category"] = json!({
        "id": "c1",
        "name": "Groceries",
        "type": "expense",
        "user_id": "u1",
        "created_at": "2025-07-02T00:00:00Z",
    });
    let page = normalize_page(json!([tx]), &TransactionFilters::default()).unwrap();
    let canonical = &page.data[0];

    let account = serde_json::to_value(canonical.account.as_ref().unwrap()).unwrap();
    assert!(account.get("createdAt").is_some());
    assert!(account.get("created_at").is_none());

    let category = canonical.category.as_ref().unwrap();
    assert_eq!(category.updated_at, category.created_at);
}

#[test]
fn filters_map_to_backend_query_params() {
    let filters = TransactionFilters {
        start_date: Some(NaiveDate::from_ymd_opt(2025, 8, 1).unwrap()),
        end_date: Some(NaiveDate::from_ymd_opt(2025, 8, 31).unwrap()),
        account_id: Some("a1".to_string()),
        kind: Some(CategoryKind::Expense),
        page: Some(2),
        limit: Some(20),
        ..Default::default()
    };
    let params = filters.to_query();
    assert!(params.contains(&("from_date", "2025-08-01".to_string())));
    assert!(params.contains(&("to_date", "2025-08-31".to_string())));
    assert!(params.contains(&("account_id", "a1".to_string())));
    assert!(params.contains(&("type", "expense".to_string())));
    assert!(params.contains(&("page", "2".to_string())));
    assert!(params.contains(&("limit", "20".to_string())));
    // Absent filters are not forwarded at all.
    assert!(!params.iter().any(|(k, _)| *k == "category_id"));
}

fn fixtures() -> (TransactionDraft, Account, Category, User) {
    let when = Utc.with_ymd_and_hms(2025, 8, 15, 0, 0, 0).unwrap();
    let draft = TransactionDraft {
        account_id: "a1".to_string(),
        category_id: "c1".to_string(),
        amount: Decimal::new(4250, 2),
        kind: CategoryKind::Expense,
        currency: "USD".to_string(),
        description: "Weekly groceries".to_string(),
        occurred_at: when,
    };
    let account = Account {
        id: "a1".to_string(),
        user_id: "u1".to_string(),
        name: "Checking".to_string(),
        kind: AccountType::Bank,
        created_at: when,
    };
    let category = Category {
        id: "c1".to_string(),
        user_id: "u1".to_string(),
        name: "Groceries".to_string(),
        kind: CategoryKind::Expense,
        icon: None,
        color: None,
        created_at: when,
        updated_at: None,
    };
    let user = User {
        id: "u1".to_string(),
        email: "me@example.com".to_string(),
        created_at: when,
    };
    (draft, account, category, user)
}

#[test]
fn full_payload_fabricates_manual_raw_event() {
    let (draft, account, category, user) = fixtures();
    let payload = build_full_payload(&draft, &account, &category, &user, None).unwrap();

    assert_eq!(payload["raw_event"]["source"], "manual");
    assert_eq!(payload["raw_event"]["provider_hint"], "manual_entry");
    assert_eq!(payload["raw_event"]["status"], "processed");
    assert_eq!(
        payload["raw_event"]["subject"],
        "Manual transaction: Weekly groceries"
    );
    assert_eq!(payload["raw_event"]["user_id"], "u1");
    assert_eq!(payload["type"], "expense");
    assert_eq!(payload["account"]["name"], "Checking");
    assert_eq!(payload["category"]["name"], "Groceries");
    assert_eq!(payload["user"]["email"], "me@example.com");
    // The ids the form never collects are fabricated, not empty.
    assert!(!payload["id"].as_str().unwrap().is_empty());
    assert_eq!(payload["raw_event_id"], payload["raw_event"]["id"]);
}

#[test]
fn full_payload_preserves_existing_identifiers_on_update() {
    let (draft, account, category, user) = fixtures();
    let existing: Transaction = serde_json::from_value(json!({
        "id": "tx-9",
        "user_id": "u1",
        "account_id": "a1",
        "category_id": "c1",
        "amount": 10,
        "currency": "USD",
        "type": "expense",
        "description": "old",
        "occurred_at": "2025-08-01T00:00:00Z",
        "created_at": "2025-08-01T00:00:00Z",
        "external_id": "ext-9",
        "raw_event_id": "re-9",
    }))
    .unwrap();

    let payload =
        build_full_payload(&draft, &account, &category, &user, Some(&existing)).unwrap();
    assert_eq!(payload["id"], "tx-9");
    assert_eq!(payload["external_id"], "ext-9");
    assert_eq!(payload["raw_event_id"], "re-9");
    assert_eq!(payload["created_at"], "2025-08-01T00:00:00Z");
}

#[test]
fn non_positive_amount_is_rejected_before_any_network_call() {
    let (mut draft, account, category, user) = fixtures();
    draft.amount = Decimal::ZERO;
    let err = build_full_payload(&draft, &account, &category, &user, None).unwrap_err();
    assert!(matches!(err, ApiError::Validation(_)));
}
