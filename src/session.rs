// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use std::fs;
use std::path::PathBuf;
use std::sync::{Mutex, PoisonError};

use anyhow::{Context, Result};
use directories::ProjectDirs;
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

use crate::models::User;

static APP: Lazy<(&str, &str, &str)> = Lazy::new(|| ("com.alphavelocity", "Fintrack", "fintrack"));

#[derive(Debug, Default, Clone, Serialize, Deserialize)]
struct SessionState {
    token: Option<String>,
    user: Option<User>,
}

/// Persisted session: bearer token plus user profile, surviving restarts as
/// a JSON file in the platform data dir. The token is the source of truth —
/// a persisted user without a token is discarded on load, and
/// `is_authenticated` is always derived as `token.is_some()`, never stored.
pub struct SessionStore {
    path: PathBuf,
    state: Mutex<SessionState>,
}

impl SessionStore {
    pub fn open() -> Result<Self> {
        let proj = ProjectDirs::from(APP.0, APP.1, APP.2)
            .context("Could not determine platform-specific data dir")?;
        let data_dir = proj.data_dir();
        fs::create_dir_all(data_dir).context("Failed to create data dir")?;
        Ok(Self::load_from(data_dir.join("session.json")))
    }

    /// Rehydrate from `path`; a missing or unreadable file yields an empty
    /// (logged-out) session.
    pub fn load_from(path: PathBuf) -> Self {
        let mut state: SessionState = fs::read_to_string(&path)
            .ok()
            .and_then(|s| serde_json::from_str(&s).ok())
            .unwrap_or_default();
        if state.token.is_none() {
            state.user = None;
        }
        SessionStore {
            path,
            state: Mutex::new(state),
        }
    }

    pub fn login(&self, token: String, user: User) -> Result<()> {
        let mut st = self.lock();
        st.token = Some(token);
        st.user = Some(user);
        self.persist(&st)
    }

    pub fn logout(&self) -> Result<()> {
        let mut st = self.lock();
        st.token = None;
        st.user = None;
        if self.path.exists() {
            fs::remove_file(&self.path)
                .with_context(|| format!("Remove session file {}", self.path.display()))?;
        }
        Ok(())
    }

    /// 401 path: drop the session unconditionally. A failure to remove the
    /// file must not mask the original error, so it is only logged.
    pub fn expire(&self) {
        let mut st = self.lock();
        st.token = None;
        st.user = None;
        drop(st);
        if self.path.exists() {
            if let Err(err) = fs::remove_file(&self.path) {
                tracing::warn!(error = %err, "failed to remove session file");
            }
        }
    }

    pub fn token(&self) -> Option<String> {
        self.lock().token.clone()
    }

    pub fn user(&self) -> Option<User> {
        self.lock().user.clone()
    }

    pub fn is_authenticated(&self) -> bool {
        self.lock().token.is_some()
    }

    fn persist(&self, st: &SessionState) -> Result<()> {
        let tmp = self.path.with_extension("json.tmp");
        fs::write(&tmp, serde_json::to_string_pretty(st)?)
            .with_context(|| format!("Write session file {}", tmp.display()))?;
        fs::rename(&tmp, &self.path)
            .with_context(|| format!("Replace session file {}", self.path.display()))?;
        Ok(())
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, SessionState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
