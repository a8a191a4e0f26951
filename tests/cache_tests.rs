// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use std::cell::Cell;
use std::sync::{Arc, Mutex};

use fintrack::cache::{self, CacheKey, CacheStore};
use fintrack::error::ApiError;
use fintrack::notify::Notifier;

#[derive(Default)]
struct Recorder {
    successes: Mutex<Vec<String>>,
    errors: Mutex<Vec<String>>,
}

impl Notifier for Recorder {
    fn success(&self, message: &str) {
        self.successes.lock().unwrap().push(message.to_string());
    }

    fn error(&self, message: &str) {
        self.errors.lock().unwrap().push(message.to_string());
    }
}

fn store() -> (CacheStore, Arc<Recorder>) {
    let recorder = Arc::new(Recorder::default());
    (CacheStore::new(recorder.clone()), recorder)
}

#[test]
fn second_read_inside_stale_window_skips_fetch() {
    let (cache, _) = store();
    let key = CacheKey::new(cache::ACCOUNTS, &());
    let calls = Cell::new(0u32);

    for _ in 0..2 {
        let got: Vec<String> = cache
            .query(&key, || {
                calls.set(calls.get() + 1);
                Ok(vec!["checking".to_string()])
            })
            .unwrap();
        assert_eq!(got, vec!["checking".to_string()]);
    }
    assert_eq!(calls.get(), 1);
}

#[test]
fn distinct_args_are_distinct_entries() {
    let (cache, _) = store();
    let calls = Cell::new(0u32);
    for page in [1u32, 2, 1] {
        let key = CacheKey::new(cache::TRANSACTIONS, &page);
        let _: u32 = cache
            .query(&key, || {
                calls.set(calls.get() + 1);
                Ok(page)
            })
            .unwrap();
    }
    // Pages 1 and 2 each fetch once; the repeated page 1 is a hit.
    assert_eq!(calls.get(), 2);
}

#[test]
fn transient_failures_are_retried_up_to_policy() {
    let (cache, _) = store();
    let key = CacheKey::new(cache::ACCOUNTS, &());
    let calls = Cell::new(0u32);

    let err = cache
        .query::<Vec<String>, _>(&key, || {
            calls.set(calls.get() + 1);
            Err(ApiError::Network("connection reset".to_string()))
        })
        .unwrap_err();
    assert!(matches!(err, ApiError::Network(_)));
    assert_eq!(calls.get(), 3);
}

#[test]
fn retry_stops_on_first_success() {
    let (cache, _) = store();
    let key = CacheKey::new(cache::ACCOUNTS, &());
    let calls = Cell::new(0u32);

    let got: u32 = cache
        .query(&key, || {
            calls.set(calls.get() + 1);
            if calls.get() < 2 {
                Err(ApiError::Timeout)
            } else {
                Ok(7)
            }
        })
        .unwrap();
    assert_eq!(got, 7);
    assert_eq!(calls.get(), 2);
}

#[test]
fn expired_session_is_never_retried() {
    let (cache, _) = store();
    let key = CacheKey::new(cache::AUTH_ME, &());
    let calls = Cell::new(0u32);

    let err = cache
        .query::<String, _>(&key, || {
            calls.set(calls.get() + 1);
            Err(ApiError::SessionExpired)
        })
        .unwrap_err();
    assert!(matches!(err, ApiError::SessionExpired));
    assert_eq!(calls.get(), 1);
}

#[test]
fn validation_errors_are_never_retried() {
    let (cache, _) = store();
    let key = CacheKey::new(cache::ACCOUNTS, &());
    let calls = Cell::new(0u32);

    let _ = cache
        .query::<String, _>(&key, || {
            calls.set(calls.get() + 1);
            Err(ApiError::Validation("name is required".to_string()))
        })
        .unwrap_err();
    assert_eq!(calls.get(), 1);
}

#[test]
fn write_invalidates_resource_and_dependents_only() {
    let (cache, _) = store();
    let tx_key = CacheKey::new(cache::TRANSACTIONS, &());
    let summary_key = CacheKey::new(cache::DASHBOARD_SUMMARY, &(2025, 8));
    let accounts_key = CacheKey::new(cache::ACCOUNTS, &());

    let tx_calls = Cell::new(0u32);
    let summary_calls = Cell::new(0u32);
    let account_calls = Cell::new(0u32);

    let fill = || {
        let _: u32 = cache
            .query(&tx_key, || {
                tx_calls.set(tx_calls.get() + 1);
                Ok(1)
            })
            .unwrap();
        let _: u32 = cache
            .query(&summary_key, || {
                summary_calls.set(summary_calls.get() + 1);
                Ok(2)
            })
            .unwrap();
        let _: u32 = cache
            .query(&accounts_key, || {
                account_calls.set(account_calls.get() + 1);
                Ok(3)
            })
            .unwrap();
    };

    fill();
    cache
        .mutate(cache::TRANSACTIONS, "ok", "failed", || Ok(()))
        .unwrap();
    fill();

    // Transactions and the summary re-fetch after the write; accounts stay.
    assert_eq!(tx_calls.get(), 2);
    assert_eq!(summary_calls.get(), 2);
    assert_eq!(account_calls.get(), 1);
}

#[test]
fn entity_key_is_invalidated_with_its_resource() {
    let (cache, _) = store();
    let entity_key = CacheKey::new(cache::TRANSACTIONS, &("get", "tx-9"));
    let calls = Cell::new(0u32);

    let fetch_entity = || {
        let _: u32 = cache
            .query(&entity_key, || {
                calls.set(calls.get() + 1);
                Ok(9)
            })
            .unwrap();
    };

    fetch_entity();
    fetch_entity();
    assert_eq!(calls.get(), 1);

    cache
        .mutate(cache::TRANSACTIONS, "ok", "failed", || Ok(()))
        .unwrap();
    fetch_entity();
    assert_eq!(calls.get(), 2);
}

#[test]
fn successful_write_emits_exactly_one_success() {
    let (cache, recorder) = store();
    cache
        .mutate(cache::ACCOUNTS, "Account created", "Failed to create account", || Ok(()))
        .unwrap();
    assert_eq!(
        *recorder.successes.lock().unwrap(),
        vec!["Account created".to_string()]
    );
    assert!(recorder.errors.lock().unwrap().is_empty());
}

#[test]
fn failed_write_leaves_cache_intact_and_reports_once() {
    let (cache, recorder) = store();
    let key = CacheKey::new(cache::TRANSACTIONS, &());
    let calls = Cell::new(0u32);

    let _: u32 = cache
        .query(&key, || {
            calls.set(calls.get() + 1);
            Ok(42)
        })
        .unwrap();

    let err = cache
        .mutate::<(), _>(
            cache::TRANSACTIONS,
            "Transaction created",
            "Failed to create transaction",
            || Err(ApiError::Server { status: 500, message: "boom".to_string() }),
        )
        .unwrap_err();
    assert!(matches!(err, ApiError::Server { status: 500, .. }));

    // The cached page survives a failed write.
    let got: u32 = cache.query(&key, || Ok(0)).unwrap();
    assert_eq!(got, 42);
    assert_eq!(calls.get(), 1);

    let errors = recorder.errors.lock().unwrap();
    assert_eq!(errors.len(), 1);
    assert!(errors[0].starts_with("Failed to create transaction"));
    assert!(recorder.successes.lock().unwrap().is_empty());
}

#[test]
fn clear_drops_every_resource() {
    let (cache, _) = store();
    let key = CacheKey::new(cache::AUTH_ME, &());
    let calls = Cell::new(0u32);

    for _ in 0..2 {
        let _: u32 = cache
            .query(&key, || {
                calls.set(calls.get() + 1);
                Ok(1)
            })
            .unwrap();
    }
    assert_eq!(calls.get(), 1);

    cache.clear();
    let _: u32 = cache
        .query(&key, || {
            calls.set(calls.get() + 1);
            Ok(1)
        })
        .unwrap();
    assert_eq!(calls.get(), 2);
}
