// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

pub mod accounts;
pub mod auth;
pub mod categories;
pub mod oauth;
pub mod summary;
pub mod transactions;

use std::sync::Arc;

use anyhow::Result;

use crate::cache::CacheStore;
use crate::client::{ApiClient, api_base_url};
use crate::notify::{ConsoleNotifier, SharedNotifier};
use crate::session::SessionStore;

/// Shared context threaded through every command: one session store, one
/// configured client, one cache. Commands read and write through the cache
/// layer, never the adapters directly.
pub struct App {
    pub client: ApiClient,
    pub cache: CacheStore,
    pub session: Arc<SessionStore>,
    pub notifier: SharedNotifier,
}

impl App {
    pub fn new() -> Result<App> {
        let session = Arc::new(SessionStore::open()?);
        let notifier: SharedNotifier = Arc::new(ConsoleNotifier);
        let client = ApiClient::new(
            api_base_url(),
            Arc::clone(&session),
            Arc::clone(&notifier),
        )?;
        let cache = CacheStore::new(Arc::clone(&notifier));
        Ok(App {
            client,
            cache,
            session,
            notifier,
        })
    }
}
