// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::Result;

use super::App;
use crate::api;
use crate::cache::{self, CacheKey};
use crate::models::User;

pub fn handle(app: &App, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("login", sub)) => {
            let email = sub.get_one::<String>("email").unwrap();
            let password = sub.get_one::<String>("password").unwrap();
            let resp = api::auth::login(&app.client, email, password)?;
            app.session.login(resp.token, resp.user.clone())?;
            app.cache.clear();
            println!("Logged in as {}", resp.user.email);
        }
        Some(("register", sub)) => {
            let email = sub.get_one::<String>("email").unwrap();
            let password = sub.get_one::<String>("password").unwrap();
            let resp = api::auth::register(&app.client, email, password)?;
            app.session.login(resp.token, resp.user.clone())?;
            app.cache.clear();
            println!("Registered and logged in as {}", resp.user.email);
        }
        Some(("logout", _)) => {
            app.session.logout()?;
            app.cache.clear();
            println!("Logged out.");
        }
        Some(("whoami", _)) => {
            let key = CacheKey::new(cache::AUTH_ME, &());
            let user: User = app
                .cache
                .query(&key, || api::auth::me(&app.client))?;
            println!(
                "{} (id {}, member since {})",
                user.email,
                user.id,
                user.created_at.format("%Y-%m-%d")
            );
        }
        _ => {}
    }
    Ok(())
}
