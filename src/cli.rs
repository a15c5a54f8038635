// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use clap::{Arg, ArgAction, Command, command};

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
            .conflicts_with("json")
            .help("Print one JSON object per line"),
    )
}

fn source_arg() -> Arg {
    Arg::new("source")
        .long("source")
        .value_parser(["local", "remote"])
        .default_value("local")
        .help("Read from the local database or the remote document store")
}

pub fn build_cli() -> Command {
    command!()
        .name("budgetwatch")
        .arg(
            Arg::new("user")
                .long("user")
                .global(true)
                .help("User id (defaults to BUDGETWATCH_USER or 'local')"),
        )
        .subcommand(Command::new("init").about("Create the local database"))
        .subcommand(
            Command::new("budget")
                .about("Running budget balance")
                .subcommand(
                    Command::new("deposit")
                        .about("Add funds to the balance")
                        .arg(Arg::new("amount").long("amount").required(true)),
                )
                .subcommand(json_flags(
                    Command::new("show").about("Show the current balance"),
                )),
        )
        .subcommand(
            Command::new("category")
                .about("Expense categories")
                .subcommand(
                    Command::new("add").arg(Arg::new("name").long("name").required(true)),
                )
                .subcommand(Command::new("list"))
                .subcommand(
                    Command::new("rm").arg(Arg::new("name").long("name").required(true)),
                ),
        )
        .subcommand(
            Command::new("expense")
                .about("Expense ledger")
                .subcommand(
                    Command::new("add")
                        .about("Record a pending expense")
                        .arg(Arg::new("amount").long("amount").required(true))
                        .arg(Arg::new("category").long("category"))
                        .arg(
                            Arg::new("date")
                                .long("date")
                                .help("Due date YYYY-MM-DD (defaults to today)"),
                        ),
                )
                .subcommand(json_flags(
                    Command::new("list").arg(
                        Arg::new("status")
                            .long("status")
                            .help("Only pending, paid or expired"),
                    ),
                ))
                .subcommand(
                    Command::new("pay")
                        .about("Settle a pending expense against the balance")
                        .arg(Arg::new("id").long("id").required(true)),
                )
                .subcommand(
                    Command::new("expire")
                        .about("Expire pending expenses past their due date")
                        .arg(Arg::new("as-of").long("as-of")),
                ),
        )
        .subcommand(json_flags(
            Command::new("health")
                .about("Paid spending against the budget balance")
                .arg(source_arg()),
        ))
        .subcommand(
            Command::new("alert")
                .about("Report whether the alert threshold is reached")
                .arg(source_arg()),
        )
        .subcommand(
            Command::new("export").about("Export data").subcommand(
                Command::new("expenses")
                    .arg(
                        Arg::new("format")
                            .long("format")
                            .value_parser(["csv", "json"])
                            .default_value("csv"),
                    )
                    .arg(Arg::new("out").long("out").required(true)),
            ),
        )
        .subcommand(
            Command::new("settings").about("Database settings").subcommand(
                Command::new("currency")
                    .about("Show or set the display currency")
                    .arg(Arg::new("set").long("set")),
            ),
        )
}
