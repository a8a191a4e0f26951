// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::Result;

use super::App;
use crate::api;
use crate::cache::{self, CacheKey};
use crate::models::{Account, AccountPatch, AccountType, NewAccount};
use crate::utils::{maybe_print_json, pretty_table};

pub fn handle(app: &App, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("add", sub)) => {
            let name = sub.get_one::<String>("name").unwrap();
            let kind: AccountType = sub.get_one::<String>("type").unwrap().parse()?;
            let created = app.cache.mutate(
                cache::ACCOUNTS,
                "Account created",
                "Failed to create account",
                || {
                    api::accounts::create(
                        &app.client,
                        &NewAccount {
                            name: name.clone(),
                            kind,
                        },
                    )
                },
            )?;
            println!("Added account '{}' ({})", created.name, created.kind);
        }
        Some(("list", sub)) => {
            let accounts = list(app)?;
            if !maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &accounts)? {
                let rows = accounts
                    .iter()
                    .map(|a| {
                        vec![
                            a.id.clone(),
                            a.name.clone(),
                            a.kind.to_string(),
                            a.created_at.format("%Y-%m-%d").to_string(),
                        ]
                    })
                    .collect();
                println!("{}", pretty_table(&["ID", "Name", "Type", "Created"], rows));
            }
        }
        Some(("edit", sub)) => {
            let id = sub.get_one::<String>("id").unwrap();
            let patch = AccountPatch {
                name: sub.get_one::<String>("name").cloned(),
                kind: sub
                    .get_one::<String>("type")
                    .map(|s| s.parse())
                    .transpose()?,
            };
            let updated = app.cache.mutate(
                cache::ACCOUNTS,
                "Account updated",
                "Failed to update account",
                || api::accounts::update(&app.client, id, &patch),
            )?;
            println!("Updated account '{}'", updated.name);
        }
        Some(("rm", sub)) => {
            let id = sub.get_one::<String>("id").unwrap();
            app.cache.mutate(
                cache::ACCOUNTS,
                "Account deleted",
                "Failed to delete account",
                || api::accounts::delete(&app.client, id),
            )?;
        }
        _ => {}
    }
    Ok(())
}

pub fn list(app: &App) -> Result<Vec<Account>> {
    let key = CacheKey::new(cache::ACCOUNTS, &());
    Ok(app
        .cache
        .query(&key, || api::accounts::list(&app.client))?)
}
