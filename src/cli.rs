// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use clap::{Arg, ArgAction, Command, value_parser};

pub fn build_cli() -> Command {
    Command::new("fintrack")
        .about("Personal-finance tracker: cached client for the finance backend API")
        .version(env!("CARGO_PKG_VERSION"))
        .subcommand(auth_cmd())
        .subcommand(oauth_cmd())
        .subcommand(account_cmd())
        .subcommand(category_cmd())
        .subcommand(tx_cmd())
        .subcommand(summary_cmd())
}

fn output_flags(cmd: Command) -> Command {
    cmd.arg(
        Arg::new("json")
            .long("json")
            .action(ArgAction::SetTrue)
            .help("Print output as pretty JSON"),
    )
    .arg(
        Arg::new("jsonl")
            .long("jsonl")
            .action(ArgAction::SetTrue)
            .help("Print output as JSON Lines"),
    )
}

fn auth_cmd() -> Command {
    Command::new("auth")
        .about("Authenticate against the backend")
        .subcommand(
            Command::new("login")
                .about("Log in and persist the session")
                .arg(Arg::new("email").long("email").required(true))
                .arg(Arg::new("password").long("password").required(true)),
        )
        .subcommand(
            Command::new("register")
                .about("Register a new user and log in")
                .arg(Arg::new("email").long("email").required(true))
                .arg(Arg::new("password").long("password").required(true)),
        )
        .subcommand(Command::new("logout").about("Clear the persisted session"))
        .subcommand(Command::new("whoami").about("Show the current user profile"))
}

fn oauth_cmd() -> Command {
    Command::new("oauth")
        .about("Manage OAuth provider connections")
        .subcommand(
            Command::new("disconnect")
                .about("Disconnect a provider")
                .arg(Arg::new("provider").long("provider").required(true)),
        )
        .subcommand(
            Command::new("callback")
                .about("Complete a provider authorization")
                .arg(
                    Arg::new("provider")
                        .long("provider")
                        .default_value("google"),
                )
                .arg(Arg::new("code").long("code").required(true))
                .arg(Arg::new("state").long("state").required(true)),
        )
}

fn account_cmd() -> Command {
    Command::new("account")
        .about("Manage accounts")
        .subcommand(
            Command::new("add")
                .about("Create an account")
                .arg(Arg::new("name").long("name").required(true))
                .arg(
                    Arg::new("type")
                        .long("type")
                        .required(true)
                        .value_parser(["bank", "ewallet", "cash"]),
                ),
        )
        .subcommand(output_flags(
            Command::new("list").about("List accounts"),
        ))
        .subcommand(
            Command::new("edit")
                .about("Update an account")
                .arg(Arg::new("id").long("id").required(true))
                .arg(Arg::new("name").long("name"))
                .arg(
                    Arg::new("type")
                        .long("type")
                        .value_parser(["bank", "ewallet", "cash"]),
                ),
        )
        .subcommand(
            Command::new("rm")
                .about("Delete an account")
                .arg(Arg::new("id").long("id").required(true)),
        )
}

fn category_cmd() -> Command {
    Command::new("category")
        .about("Manage categories")
        .subcommand(
            Command::new("add")
                .about("Create a category")
                .arg(Arg::new("name").long("name").required(true))
                .arg(
                    Arg::new("type")
                        .long("type")
                        .required(true)
                        .value_parser(["income", "expense"]),
                )
                .arg(Arg::new("icon").long("icon"))
                .arg(Arg::new("color").long("color")),
        )
        .subcommand(output_flags(
            Command::new("list").about("List categories"),
        ))
        .subcommand(
            Command::new("edit")
                .about("Update a category")
                .arg(Arg::new("id").long("id").required(true))
                .arg(Arg::new("name").long("name"))
                .arg(
                    Arg::new("type")
                        .long("type")
                        .value_parser(["income", "expense"]),
                )
                .arg(Arg::new("icon").long("icon"))
                .arg(Arg::new("color").long("color")),
        )
        .subcommand(
            Command::new("rm")
                .about("Delete a category")
                .arg(Arg::new("id").long("id").required(true)),
        )
}

fn tx_cmd() -> Command {
    Command::new("tx")
        .about("Manage transactions")
        .subcommand(
            Command::new("add")
                .about("Record a transaction")
                .arg(Arg::new("account").long("account").required(true).help("Account id or name"))
                .arg(Arg::new("category").long("category").required(true).help("Category id or name"))
                .arg(Arg::new("amount").long("amount").required(true))
                .arg(
                    Arg::new("type")
                        .long("type")
                        .required(true)
                        .value_parser(["income", "expense"]),
                )
                .arg(Arg::new("currency").long("currency").default_value("USD"))
                .arg(Arg::new("description").long("description").default_value(""))
                .arg(Arg::new("date").long("date").help("Occurrence date, YYYY-MM-DD (default today)")),
        )
        .subcommand(output_flags(
            Command::new("list")
                .about("List transactions")
                .arg(
                    Arg::new("month")
                        .long("month")
                        .help("Whole month, YYYY-MM (overrides --from/--to)"),
                )
                .arg(Arg::new("from").long("from").help("YYYY-MM-DD"))
                .arg(Arg::new("to").long("to").help("YYYY-MM-DD"))
                .arg(Arg::new("account").long("account").help("Account id"))
                .arg(Arg::new("category").long("category").help("Category id"))
                .arg(
                    Arg::new("type")
                        .long("type")
                        .value_parser(["income", "expense"]),
                )
                .arg(
                    Arg::new("page")
                        .long("page")
                        .value_parser(value_parser!(u32)),
                )
                .arg(
                    Arg::new("limit")
                        .long("limit")
                        .value_parser(value_parser!(u32).range(1..)),
                ),
        ))
        .subcommand(
            Command::new("edit")
                .about("Update a transaction")
                .arg(Arg::new("id").long("id").required(true))
                .arg(Arg::new("account").long("account"))
                .arg(Arg::new("category").long("category"))
                .arg(Arg::new("amount").long("amount"))
                .arg(
                    Arg::new("type")
                        .long("type")
                        .value_parser(["income", "expense"]),
                )
                .arg(Arg::new("currency").long("currency"))
                .arg(Arg::new("description").long("description"))
                .arg(Arg::new("date").long("date")),
        )
        .subcommand(
            Command::new("rm")
                .about("Delete a transaction")
                .arg(Arg::new("id").long("id").required(true)),
        )
}

fn summary_cmd() -> Command {
    output_flags(
        Command::new("summary")
            .about("Monthly income/expense summary")
            .arg(
                Arg::new("year")
                    .long("year")
                    .value_parser(value_parser!(i32)),
            )
            .arg(
                Arg::new("month")
                    .long("month")
                    .value_parser(value_parser!(u32)),
            ),
    )
}
