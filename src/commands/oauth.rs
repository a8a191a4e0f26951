// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::Result;

use super::App;
use crate::api;
use crate::cache;

pub fn handle(app: &App, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("disconnect", sub)) => {
            let provider = sub.get_one::<String>("provider").unwrap();
            let status = app.cache.mutate(
                cache::OAUTH,
                "OAuth connection disconnected",
                "Failed to disconnect OAuth",
                || api::auth::oauth_disconnect(&app.client, provider),
            )?;
            if !status.message.is_empty() {
                println!("{}", status.message);
            }
        }
        Some(("callback", sub)) => {
            let provider = sub.get_one::<String>("provider").unwrap();
            let code = sub.get_one::<String>("code").unwrap();
            let state = sub.get_one::<String>("state").unwrap();
            let status = app.cache.mutate(
                cache::OAUTH,
                "Provider connected",
                "Failed to complete OAuth connection",
                || api::auth::oauth_callback(&app.client, provider, code, state),
            )?;
            if !status.success {
                anyhow::bail!("provider reported failure: {}", status.message);
            }
            if !status.message.is_empty() {
                println!("{}", status.message);
            }
        }
        _ => {}
    }
    Ok(())
}
