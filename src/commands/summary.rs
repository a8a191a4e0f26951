// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::Result;
use chrono::{Datelike, Utc};

use super::App;
use crate::api;
use crate::cache::{self, CacheKey};
use crate::models::DashboardSummary;
use crate::utils::{maybe_print_json, pretty_table};

pub fn handle(app: &App, m: &clap::ArgMatches) -> Result<()> {
    let now = Utc::now();
    let year = m.get_one::<i32>("year").copied().unwrap_or(now.year());
    let month = m.get_one::<u32>("month").copied().unwrap_or(now.month());

    let key = CacheKey::new(cache::DASHBOARD_SUMMARY, &(year, month));
    let summary: DashboardSummary = app
        .cache
        .query(&key, || api::dashboard::summary(&app.client, year, month))?;

    if !maybe_print_json(m.get_flag("json"), m.get_flag("jsonl"), &summary)? {
        let rows = vec![
            vec!["Income".to_string(), summary.total_income.to_string()],
            vec!["Expense".to_string(), summary.total_expense.to_string()],
            vec!["Net".to_string(), summary.net_income.to_string()],
            vec![
                "Ending balance".to_string(),
                summary.ending_balance.to_string(),
            ],
        ];
        println!("Summary for {}-{:02}", summary.year, summary.month);
        println!("{}", pretty_table(&["Metric", "Amount"], rows));
    }
    Ok(())
}
