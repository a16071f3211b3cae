// Copyright (c) 2025 Centime Contributors.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use clap::{value_parser, Arg, ArgAction, Command};

fn user_arg() -> Arg {
    Arg::new("user")
        .long("user")
        .value_parser(value_parser!(i64))
        .required(true)
        .help("User id that owns the ledger")
}

fn json_flags(cmd: Command) -> Command {
    cmd.arg(
        Arg::new("json")
            .long("json")
            .action(ArgAction::SetTrue)
            .help("Print pretty JSON"),
    )
    .arg(
        Arg::new("jsonl")
            .long("jsonl")
            .action(ArgAction::SetTrue)
            .help("Print one JSON object per line"),
    )
}

pub fn build_cli() -> Command {
    Command::new("centime")
        .about("Personal finance tracker with a running-balance ledger")
        .version(env!("CARGO_PKG_VERSION"))
        .subcommand(Command::new("init").about("Create the database"))
        .subcommand(
            Command::new("user")
                .about("Manage users")
                .subcommand(
                    Command::new("create").about("Create a user").arg(
                        Arg::new("seed")
                            .long("seed")
                            .action(ArgAction::SetTrue)
                            .help("Populate the new user with a demo ledger and budget"),
                    ),
                )
                .subcommand(Command::new("list").about("List users")),
        )
        .subcommand(
            Command::new("tx")
                .about("Record and manage transactions")
                .subcommand(
                    Command::new("add")
                        .about("Record a transaction")
                        .arg(user_arg())
                        .arg(
                            Arg::new("amount")
                                .long("amount")
                                .required(true)
                                .allow_negative_numbers(true)
                                .help("Signed amount: positive income, negative expense"),
                        )
                        .arg(Arg::new("category").long("category").required(true))
                        .arg(Arg::new("description").long("description"))
                        .arg(
                            Arg::new("date")
                                .long("date")
                                .help("Effective date (YYYY-MM-DD or 'YYYY-MM-DD HH:MM:SS'); defaults to now"),
                        ),
                )
                .subcommand(json_flags(
                    Command::new("list")
                        .about("List transactions, newest first")
                        .arg(user_arg())
                        .arg(
                            Arg::new("limit")
                                .long("limit")
                                .value_parser(value_parser!(usize)),
                        ),
                ))
                .subcommand(
                    Command::new("edit")
                        .about("Edit a transaction")
                        .arg(user_arg())
                        .arg(
                            Arg::new("id")
                                .long("id")
                                .value_parser(value_parser!(i64))
                                .required(true),
                        )
                        .arg(Arg::new("amount").long("amount").allow_negative_numbers(true))
                        .arg(Arg::new("category").long("category"))
                        .arg(Arg::new("description").long("description"))
                        .arg(Arg::new("date").long("date")),
                )
                .subcommand(
                    Command::new("rm")
                        .about("Delete a transaction")
                        .arg(user_arg())
                        .arg(
                            Arg::new("id")
                                .long("id")
                                .value_parser(value_parser!(i64))
                                .required(true),
                        ),
                )
                .subcommand(
                    Command::new("resync")
                        .about("Rebuild every running balance from scratch")
                        .arg(user_arg()),
                ),
        )
        .subcommand(
            Command::new("category")
                .about("Manage the suggested category set")
                .subcommand(
                    Command::new("add")
                        .arg(user_arg())
                        .arg(Arg::new("name").long("name").required(true)),
                )
                .subcommand(Command::new("list").arg(user_arg()))
                .subcommand(
                    Command::new("rm")
                        .arg(user_arg())
                        .arg(Arg::new("name").long("name").required(true)),
                ),
        )
        .subcommand(
            Command::new("budget")
                .about("Manage monthly/yearly budgets")
                .subcommand(
                    Command::new("set")
                        .about("Create or replace a budget")
                        .arg(user_arg())
                        .arg(
                            Arg::new("period")
                                .long("period")
                                .required(true)
                                .help("monthly or yearly"),
                        )
                        .arg(Arg::new("total").long("total").required(true))
                        .arg(
                            Arg::new("auto-renew")
                                .long("auto-renew")
                                .action(ArgAction::SetTrue),
                        )
                        .arg(
                            Arg::new("category")
                                .long("category")
                                .action(ArgAction::Append)
                                .help("Per-category limit as NAME=AMOUNT (repeatable)"),
                        ),
                )
                .subcommand(json_flags(
                    Command::new("show").about("Show budgets").arg(user_arg()),
                ))
                .subcommand(
                    Command::new("rm")
                        .about("Reset a budget to its empty shape")
                        .arg(user_arg())
                        .arg(Arg::new("period").long("period").required(true)),
                ),
        )
        .subcommand(
            Command::new("report")
                .about("Dashboard aggregates")
                .subcommand(json_flags(
                    Command::new("summary")
                        .about("Total balance plus monthly/yearly income and spend")
                        .arg(user_arg()),
                ))
                .subcommand(json_flags(
                    Command::new("monthly")
                        .about("Category breakdown and daily spending for a month")
                        .arg(user_arg())
                        .arg(Arg::new("month").long("month").help("YYYY-MM, defaults to current")),
                )),
        )
        .subcommand(
            Command::new("export")
                .about("Export data")
                .subcommand(
                    Command::new("transactions")
                        .arg(
                            Arg::new("format")
                                .long("format")
                                .required(true)
                                .help("csv or json"),
                        )
                        .arg(Arg::new("out").long("out").required(true))
                        .arg(
                            Arg::new("user")
                                .long("user")
                                .value_parser(value_parser!(i64))
                                .help("Limit to one user's ledger"),
                        ),
                ),
        )
        .subcommand(Command::new("doctor").about("Audit ledger consistency"))
}
