// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use clap::{Arg, ArgAction, Command, value_parser};

fn json_flags(cmd: Command) -> Command {
    cmd.arg(
        Arg::new("json")
            .long("json")
            .action(ArgAction::SetTrue)
            .help("Print JSON instead of a table"),
    )
    .arg(
        Arg::new("jsonl")
            .long("jsonl")
            .action(ArgAction::SetTrue)
            .conflicts_with("json")
            .help("Print one JSON object per line"),
    )
}

fn month_args(cmd: Command) -> Command {
    cmd.arg(
        Arg::new("year")
            .long("year")
            .value_parser(value_parser!(i32))
            .help("Year (defaults to the current year)"),
    )
    .arg(
        Arg::new("month")
            .long("month")
            .value_parser(value_parser!(u32).range(1..=12))
            .help("Month number 1-12 (defaults to the current month)"),
    )
}

pub fn build_cli() -> Command {
    Command::new("tallyclip")
        .about("Terminal client for the budget tracker API")
        .version(clap::crate_version!())
        .arg(
            Arg::new("server")
                .long("server")
                .env("TALLYCLIP_SERVER")
                .global(true)
                .help("Base URL of the budget tracker server"),
        )
        .arg(
            Arg::new("currency_symbol")
                .long("currency-symbol")
                .global(true)
                .help("Symbol prefixed to money amounts"),
        )
        .arg(
            Arg::new("timeout")
                .long("timeout")
                .value_parser(value_parser!(u64))
                .global(true)
                .help("HTTP timeout in seconds"),
        )
        .subcommand(
            Command::new("add")
                .about("Add a transaction")
                .arg(
                    Arg::new("type")
                        .long("type")
                        .value_parser(["income", "expense"])
                        .default_value("expense"),
                )
                .arg(Arg::new("amount").long("amount"))
                .arg(Arg::new("category").long("category"))
                .arg(Arg::new("description").long("description"))
                .arg(
                    Arg::new("date")
                        .long("date")
                        .help("YYYY-MM-DD (defaults to today)"),
                ),
        )
        .subcommand(json_flags(
            Command::new("list").about("List all transactions, newest first"),
        ))
        .subcommand(
            Command::new("rm")
                .about("Delete a transaction by its list index")
                .arg(
                    Arg::new("index")
                        .required(true)
                        .value_parser(value_parser!(usize)),
                )
                .arg(
                    Arg::new("yes")
                        .long("yes")
                        .short('y')
                        .action(ArgAction::SetTrue)
                        .help("Skip the confirmation prompt"),
                ),
        )
        .subcommand(json_flags(
            Command::new("dashboard")
                .about("Totals and top spending categories")
                .arg(
                    Arg::new("top")
                        .long("top")
                        .value_parser(value_parser!(usize))
                        .default_value("10"),
                )
                .arg(
                    Arg::new("csv")
                        .long("csv")
                        .help("Also write the category breakdown to this CSV file"),
                ),
        ))
        .subcommand(
            Command::new("watch")
                .about("Refresh the dashboard on an interval")
                .arg(
                    Arg::new("interval")
                        .long("interval")
                        .value_parser(value_parser!(u64).range(1..))
                        .default_value("5"),
                )
                .arg(
                    Arg::new("count")
                        .long("count")
                        .value_parser(value_parser!(usize))
                        .help("Stop after this many refreshes"),
                ),
        )
        .subcommand(json_flags(month_args(
            Command::new("report")
                .about("Monthly income, expenses and balance")
                .arg(
                    Arg::new("local")
                        .long("local")
                        .action(ArgAction::SetTrue)
                        .help("Compute from the transaction list instead of the server report"),
                ),
        )))
        .subcommand(json_flags(month_args(
            Command::new("analysis")
                .about("Spending by category for a month")
                .arg(
                    Arg::new("local")
                        .long("local")
                        .action(ArgAction::SetTrue)
                        .help("Compute from the transaction list instead of the server analysis"),
                ),
        )))
        .subcommand(month_args(
            Command::new("chart")
                .about("Save a chart image rendered by the server")
                .arg(
                    Arg::new("kind")
                        .required(true)
                        .value_parser(["category", "income-vs-expense"]),
                )
                .arg(Arg::new("out").long("out").help("Output file")),
        ))
        .subcommand(Command::new("alert").about("Show the budget alert"))
        .subcommand(month_args(
            Command::new("export")
                .about("Download a CSV export")
                .arg(
                    Arg::new("kind")
                        .required(true)
                        .value_parser(["all", "monthly", "analysis"]),
                )
                .arg(Arg::new("out").long("out").help("Output file")),
        ))
        .subcommand(
            Command::new("config")
                .about("Show or change saved settings")
                .subcommand(Command::new("show"))
                .subcommand(
                    Command::new("set")
                        .arg(Arg::new("set_server").long("server-url"))
                        .arg(Arg::new("set_symbol").long("symbol"))
                        .arg(
                            Arg::new("set_timeout")
                                .long("timeout-secs")
                                .value_parser(value_parser!(u64)),
                        ),
                ),
        )
}
