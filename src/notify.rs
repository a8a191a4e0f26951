// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use std::sync::Arc;

/// One-shot user-facing outcome channel. The HTTP client notifies once per
/// terminal error class and the cache layer notifies once per mutation
/// outcome; nothing else talks to the user directly.
pub trait Notifier: Send + Sync {
    fn success(&self, message: &str);
    fn error(&self, message: &str);
}

pub type SharedNotifier = Arc<dyn Notifier>;

/// Default notifier for the CLI: successes on stdout, failures on stderr.
pub struct ConsoleNotifier;

impl Notifier for ConsoleNotifier {
    fn success(&self, message: &str) {
        println!("{message}");
    }

    fn error(&self, message: &str) {
        eprintln!("error: {message}");
    }
}
