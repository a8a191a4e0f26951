// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Keyed query/mutation cache. Reads are served from the store while inside
//! the resource's staleness window and retried on transient failure;
//! successful writes invalidate the owning resource plus its declared
//! dependents, forcing the next read to re-fetch. The execution model is
//! single-threaded and blocking, so at most one request per key is ever in
//! flight and the store itself only needs a plain mutex.

use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard, PoisonError};
use std::time::{Duration, Instant};

use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::error::ApiError;
use crate::notify::SharedNotifier;

pub const ACCOUNTS: &str = "accounts";
pub const CATEGORIES: &str = "categories";
pub const TRANSACTIONS: &str = "transactions";
pub const DASHBOARD_SUMMARY: &str = "dashboard-summary";
pub const AUTH_ME: &str = "auth-me";
pub const OAUTH: &str = "oauth";

#[derive(Debug, Clone, Copy)]
pub struct CachePolicy {
    /// How long a successful fetch is served without a network call.
    pub stale: Duration,
    /// Total attempts for a read, counting the first.
    pub retries: u32,
    /// Resources whose cached state derives from this one and must be
    /// invalidated together with it after a successful write.
    pub dependents: &'static [&'static str],
}

/// Per-resource configuration, in one place instead of scattered per call
/// site. Staleness tracks volatility: transactions move fastest, the
/// monthly summary slowest.
pub fn policy(resource: &str) -> CachePolicy {
    match resource {
        ACCOUNTS | CATEGORIES => CachePolicy {
            stale: Duration::from_secs(120),
            retries: 3,
            dependents: &[],
        },
        TRANSACTIONS => CachePolicy {
            stale: Duration::from_secs(60),
            retries: 3,
            dependents: &[DASHBOARD_SUMMARY],
        },
        DASHBOARD_SUMMARY | AUTH_ME => CachePolicy {
            stale: Duration::from_secs(300),
            retries: 3,
            dependents: &[],
        },
        OAUTH => CachePolicy {
            stale: Duration::from_secs(0),
            retries: 1,
            dependents: &[AUTH_ME],
        },
        _ => CachePolicy {
            stale: Duration::from_secs(60),
            retries: 3,
            dependents: &[],
        },
    }
}

/// Request identity: resource name plus the serialized fetch arguments.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CacheKey {
    pub resource: &'static str,
    args: String,
}

impl CacheKey {
    pub fn new<A: Serialize>(resource: &'static str, args: &A) -> Self {
        let args = serde_json::to_string(args).unwrap_or_default();
        CacheKey { resource, args }
    }
}

struct Entry {
    value: Value,
    fetched_at: Instant,
}

pub struct CacheStore {
    entries: Mutex<HashMap<CacheKey, Entry>>,
    notifier: SharedNotifier,
}

impl CacheStore {
    pub fn new(notifier: SharedNotifier) -> Self {
        CacheStore {
            entries: Mutex::new(HashMap::new()),
            notifier,
        }
    }

    /// Cached, retryable read. Inside the staleness window the stored value
    /// is returned without calling `fetch` at all; otherwise `fetch` runs
    /// with up to `policy(resource).retries` total attempts, retrying only
    /// failures that can plausibly succeed on a second try. A failed
    /// re-fetch leaves any previous entry untouched.
    pub fn query<T, F>(&self, key: &CacheKey, mut fetch: F) -> Result<T, ApiError>
    where
        T: Serialize + DeserializeOwned,
        F: FnMut() -> Result<T, ApiError>,
    {
        let policy = policy(key.resource);
        if let Some(value) = self.fresh(key, policy.stale) {
            if let Ok(hit) = serde_json::from_value(value) {
                tracing::debug!(resource = key.resource, "cache hit");
                return Ok(hit);
            }
            // A stored value that no longer decodes is dropped and re-fetched.
            self.lock().remove(key);
        }

        let mut attempt = 0;
        loop {
            attempt += 1;
            match fetch() {
                Ok(value) => {
                    let stored = serde_json::to_value(&value)?;
                    self.lock().insert(
                        key.clone(),
                        Entry {
                            value: stored,
                            fetched_at: Instant::now(),
                        },
                    );
                    return Ok(value);
                }
                Err(err) if err.is_retryable() && attempt < policy.retries => {
                    tracing::warn!(
                        resource = key.resource,
                        attempt,
                        error = %err,
                        "fetch failed, retrying"
                    );
                }
                Err(err) => return Err(err),
            }
        }
    }

    /// Write-then-invalidate. The operation runs exactly once — writes are
    /// never silently retried — and on success the owning resource plus its
    /// declared dependents are invalidated. Exactly one outcome
    /// notification is emitted either way.
    pub fn mutate<T, F>(
        &self,
        resource: &str,
        ok_msg: &str,
        err_msg: &str,
        op: F,
    ) -> Result<T, ApiError>
    where
        F: FnOnce() -> Result<T, ApiError>,
    {
        match op() {
            Ok(value) => {
                self.invalidate(resource);
                for dep in policy(resource).dependents {
                    self.invalidate(dep);
                }
                self.notifier.success(ok_msg);
                Ok(value)
            }
            Err(err) => {
                self.notifier.error(&format!("{err_msg}: {err}"));
                Err(err)
            }
        }
    }

    /// Drop every key of `resource`; the next read re-fetches immediately.
    pub fn invalidate(&self, resource: &str) {
        tracing::debug!(resource, "invalidating");
        self.lock().retain(|k, _| k.resource != resource);
    }

    pub fn clear(&self) {
        self.lock().clear();
    }

    fn fresh(&self, key: &CacheKey, stale: Duration) -> Option<Value> {
        let entries = self.lock();
        let entry = entries.get(key)?;
        if entry.fetched_at.elapsed() <= stale {
            Some(entry.value.clone())
        } else {
            None
        }
    }

    fn lock(&self) -> MutexGuard<'_, HashMap<CacheKey, Entry>> {
        self.entries.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
