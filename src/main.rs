// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::Result;
use tracing_subscriber::EnvFilter;

use fintrack::{cli, commands};

fn main() -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let matches = cli::build_cli().get_matches();
    let app = commands::App::new()?;

    match matches.subcommand() {
        Some(("auth", sub)) => commands::auth::handle(&app, sub)?,
        Some(("oauth", sub)) => commands::oauth::handle(&app, sub)?,
        Some(("account", sub)) => commands::accounts::handle(&app, sub)?,
        Some(("category", sub)) => commands::categories::handle(&app, sub)?,
        Some(("tx", sub)) => commands::transactions::handle(&app, sub)?,
        Some(("summary", sub)) => commands::summary::handle(&app, sub)?,
        _ => {
            cli::build_cli().print_help()?;
            println!();
        }
    }
    Ok(())
}
