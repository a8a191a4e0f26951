// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::Result;

use super::App;
use crate::api;
use crate::cache::{self, CacheKey};
use crate::models::{Category, CategoryKind, CategoryPatch, NewCategory};
use crate::utils::{maybe_print_json, pretty_table};

pub fn handle(app: &App, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("add", sub)) => {
            let name = sub.get_one::<String>("name").unwrap();
            let kind: CategoryKind = sub.get_one::<String>("type").unwrap().parse()?;
            let new = NewCategory {
                name: name.clone(),
                kind,
                icon: sub.get_one::<String>("icon").cloned(),
                color: sub.get_one::<String>("color").cloned(),
            };
            let created = app.cache.mutate(
                cache::CATEGORIES,
                "Category created",
                "Failed to create category",
                || api::categories::create(&app.client, &new),
            )?;
            println!("Added category '{}' ({})", created.name, created.kind);
        }
        Some(("list", sub)) => {
            let categories = list(app)?;
            if !maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &categories)? {
                let rows = categories
                    .iter()
                    .map(|c| {
                        vec![
                            c.id.clone(),
                            c.name.clone(),
                            c.kind.to_string(),
                            c.icon.clone().unwrap_or_default(),
                            c.created_at.format("%Y-%m-%d").to_string(),
                        ]
                    })
                    .collect();
                println!(
                    "{}",
                    pretty_table(&["ID", "Name", "Type", "Icon", "Created"], rows)
                );
            }
        }
        Some(("edit", sub)) => {
            let id = sub.get_one::<String>("id").unwrap();
            let patch = CategoryPatch {
                name: sub.get_one::<String>("name").cloned(),
                kind: sub
                    .get_one::<String>("type")
                    .map(|s| s.parse())
                    .transpose()?,
                icon: sub.get_one::<String>("icon").cloned(),
                color: sub.get_one::<String>("color").cloned(),
            };
            let updated = app.cache.mutate(
                cache::CATEGORIES,
                "Category updated",
                "Failed to update category",
                || api::categories::update(&app.client, id, &patch),
            )?;
            println!("Updated category '{}'", updated.name);
        }
        Some(("rm", sub)) => {
            let id = sub.get_one::<String>("id").unwrap();
            app.cache.mutate(
                cache::CATEGORIES,
                "Category deleted",
                "Failed to delete category",
                || api::categories::delete(&app.client, id),
            )?;
        }
        _ => {}
    }
    Ok(())
}

pub fn list(app: &App) -> Result<Vec<Category>> {
    let key = CacheKey::new(cache::CATEGORIES, &());
    Ok(app
        .cache
        .query(&key, || api::categories::list(&app.client))?)
}
