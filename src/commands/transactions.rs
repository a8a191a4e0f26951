// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::{Context, Result, bail};
use chrono::{NaiveTime, Utc};

use super::App;
use crate::api;
use crate::cache::{self, CacheKey};
use crate::models::{
    Account, Category, CategoryKind, Transaction, TransactionDraft, TransactionFilters,
    TransactionPage, User,
};
use crate::utils::{fmt_money, maybe_print_json, parse_date, parse_decimal, parse_month, pretty_table};

pub fn handle(app: &App, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("add", sub)) => add(app, sub)?,
        Some(("list", sub)) => list(app, sub)?,
        Some(("edit", sub)) => edit(app, sub)?,
        Some(("rm", sub)) => {
            let id = sub.get_one::<String>("id").unwrap();
            app.cache.mutate(
                cache::TRANSACTIONS,
                "Transaction deleted",
                "Failed to delete transaction",
                || api::transactions::delete(&app.client, id),
            )?;
        }
        _ => {}
    }
    Ok(())
}

fn add(app: &App, sub: &clap::ArgMatches) -> Result<()> {
    let user = current_user(app)?;
    let account = resolve_account(app, sub.get_one::<String>("account").unwrap())?;
    let category = resolve_category(app, sub.get_one::<String>("category").unwrap())?;

    let amount = parse_decimal(sub.get_one::<String>("amount").unwrap())?;
    let kind: CategoryKind = sub.get_one::<String>("type").unwrap().parse()?;
    let occurred_at = match sub.get_one::<String>("date") {
        Some(d) => parse_date(d)?.and_time(NaiveTime::MIN).and_utc(),
        None => Utc::now(),
    };

    let draft = TransactionDraft {
        account_id: account.id.clone(),
        category_id: category.id.clone(),
        amount,
        kind,
        currency: sub.get_one::<String>("currency").unwrap().to_uppercase(),
        description: sub.get_one::<String>("description").unwrap().clone(),
        occurred_at,
    };
    let payload =
        api::transactions::build_full_payload(&draft, &account, &category, &user, None)?;

    let created = app.cache.mutate(
        cache::TRANSACTIONS,
        "Transaction created",
        "Failed to create transaction",
        || api::transactions::create(&app.client, &payload),
    )?;
    println!(
        "Recorded {} {} on {} ({})",
        created.kind,
        fmt_money(&created.amount, &created.currency),
        created.occurred_at.format("%Y-%m-%d"),
        account.name
    );
    Ok(())
}

fn list(app: &App, sub: &clap::ArgMatches) -> Result<()> {
    let mut filters = TransactionFilters {
        start_date: sub
            .get_one::<String>("from")
            .map(|s| parse_date(s))
            .transpose()?,
        end_date: sub
            .get_one::<String>("to")
            .map(|s| parse_date(s))
            .transpose()?,
        account_id: sub.get_one::<String>("account").cloned(),
        category_id: sub.get_one::<String>("category").cloned(),
        kind: sub
            .get_one::<String>("type")
            .map(|s| s.parse())
            .transpose()?,
        page: sub.get_one::<u32>("page").copied(),
        limit: sub.get_one::<u32>("limit").copied(),
    };
    if let Some(m) = sub.get_one::<String>("month") {
        let (first, last) = parse_month(m)?;
        filters.start_date = Some(first);
        filters.end_date = Some(last);
    }

    let key = CacheKey::new(cache::TRANSACTIONS, &filters);
    let page: TransactionPage = app
        .cache
        .query(&key, || api::transactions::list(&app.client, &filters))?;

    if !maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &page.data)? {
        let rows = page
            .data
            .iter()
            .map(|t| {
                vec![
                    t.occurred_at.format("%Y-%m-%d").to_string(),
                    t.description.clone(),
                    t.account
                        .as_ref()
                        .map(|a| a.name.clone())
                        .unwrap_or_else(|| t.account_id.clone()),
                    t.category
                        .as_ref()
                        .map(|c| c.name.clone())
                        .unwrap_or_else(|| t.category_id.clone()),
                    t.kind.to_string(),
                    fmt_money(&t.amount, &t.currency),
                ]
            })
            .collect();
        println!(
            "{}",
            pretty_table(
                &["Date", "Description", "Account", "Category", "Type", "Amount"],
                rows,
            )
        );
        println!(
            "Page {} of {} ({} total)",
            page.page, page.total_pages, page.total
        );
    }
    Ok(())
}

fn edit(app: &App, sub: &clap::ArgMatches) -> Result<()> {
    let id = sub.get_one::<String>("id").unwrap();
    let user = current_user(app)?;
    let key = CacheKey::new(cache::TRANSACTIONS, &("get", id));
    let existing: Transaction = app
        .cache
        .query(&key, || api::transactions::get(&app.client, id))?;

    let account = match sub.get_one::<String>("account") {
        Some(a) => resolve_account(app, a)?,
        None => find_account_by_id(app, &existing.account_id)?,
    };
    let category = match sub.get_one::<String>("category") {
        Some(c) => resolve_category(app, c)?,
        None => find_category_by_id(app, &existing.category_id)?,
    };

    let draft = TransactionDraft {
        account_id: account.id.clone(),
        category_id: category.id.clone(),
        amount: match sub.get_one::<String>("amount") {
            Some(a) => parse_decimal(a)?,
            None => existing.amount,
        },
        kind: match sub.get_one::<String>("type") {
            Some(k) => k.parse()?,
            None => existing.kind,
        },
        currency: sub
            .get_one::<String>("currency")
            .map(|c| c.to_uppercase())
            .unwrap_or_else(|| existing.currency.clone()),
        description: sub
            .get_one::<String>("description")
            .cloned()
            .unwrap_or_else(|| existing.description.clone()),
        occurred_at: match sub.get_one::<String>("date") {
            Some(d) => parse_date(d)?.and_time(NaiveTime::MIN).and_utc(),
            None => existing.occurred_at,
        },
    };
    let payload = api::transactions::build_full_payload(
        &draft,
        &account,
        &category,
        &user,
        Some(&existing),
    )?;

    app.cache.mutate(
        cache::TRANSACTIONS,
        "Transaction updated",
        "Failed to update transaction",
        || api::transactions::update(&app.client, id, &payload),
    )?;
    Ok(())
}

fn current_user(app: &App) -> Result<User> {
    if let Some(user) = app.session.user() {
        return Ok(user);
    }
    let key = CacheKey::new(cache::AUTH_ME, &());
    app.cache
        .query(&key, || api::auth::me(&app.client))
        .context("Not logged in; run 'fintrack auth login' first")
}

fn resolve_account(app: &App, needle: &str) -> Result<Account> {
    let accounts = super::accounts::list(app)?;
    match accounts
        .into_iter()
        .find(|a| a.id == needle || a.name == needle)
    {
        Some(a) => Ok(a),
        None => bail!("Account '{}' not found", needle),
    }
}

fn find_account_by_id(app: &App, id: &str) -> Result<Account> {
    let accounts = super::accounts::list(app)?;
    accounts
        .into_iter()
        .find(|a| a.id == id)
        .with_context(|| format!("Account '{}' not found", id))
}

fn resolve_category(app: &App, needle: &str) -> Result<Category> {
    let categories = super::categories::list(app)?;
    match categories
        .into_iter()
        .find(|c| c.id == needle || c.name == needle)
    {
        Some(c) => Ok(c),
        None => bail!("Category '{}' not found", needle),
    }
}

fn find_category_by_id(app: &App, id: &str) -> Result<Category> {
    let categories = super::categories::list(app)?;
    categories
        .into_iter()
        .find(|c| c.id == id)
        .with_context(|| format!("Category '{}' not found", id))
}
