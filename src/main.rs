// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::Result;
use std::process::ExitCode;
use tracing::{error, warn};

use tallyclip::api::{BudgetApi, HttpApi};
use tallyclip::commands::{self, dashboard, exporter, reports, transactions};
use tallyclip::config::{self, Settings};
use tallyclip::render::Notice;
use tallyclip::{cli, utils};

fn main() -> ExitCode {
    utils::init_tracing();
    let matches = cli::build_cli().get_matches();
    match run(&matches) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            let msg = format!("{:#}", e);
            error!(error = %msg, "command failed");
            eprintln!("{}", Notice::error(msg).line());
            ExitCode::FAILURE
        }
    }
}

/// Mutations are followed by a fresh budget alert.
fn after_mutation<A: BudgetApi>(api: &A, notice: Notice) {
    eprintln!("{}", notice.line());
    match commands::budget_alert(api) {
        Ok(Some(alert)) => eprintln!("{}", alert.line()),
        Ok(None) => {}
        Err(e) => warn!(error = %format!("{:#}", e), "budget alert unavailable"),
    }
}

fn run(matches: &clap::ArgMatches) -> Result<()> {
    if let Some(("config", sub)) = matches.subcommand() {
        return commands::settings::handle(&config::settings_path()?, sub);
    }

    let settings = Settings::load()?.with_overrides(matches);
    let api = HttpApi::new(
        &settings.server_url,
        utils::http_client(settings.timeout_secs)?,
    );

    match matches.subcommand() {
        Some(("add", sub)) => {
            let notice = transactions::add(&api, sub)?;
            after_mutation(&api, notice);
        }
        Some(("rm", sub)) => {
            if let Some(notice) = transactions::remove(&api, sub)? {
                after_mutation(&api, notice);
            }
        }
        Some(("list", sub)) => transactions::list(&api, &settings, sub)?,
        Some(("dashboard", sub)) => dashboard::handle(&api, &settings, sub)?,
        Some(("watch", sub)) => dashboard::watch(&api, &settings, sub)?,
        Some(("report", sub)) => reports::report(&api, &settings, sub)?,
        Some(("analysis", sub)) => reports::handle_analysis(&api, &settings, sub)?,
        Some(("chart", sub)) => exporter::chart(&api, sub)?,
        Some(("export", sub)) => exporter::handle(&api, sub)?,
        Some(("alert", _)) => match commands::budget_alert(&api)? {
            Some(notice) => println!("{}", notice.line()),
            None => println!("No transactions yet."),
        },
        _ => {
            cli::build_cli().print_help()?;
            println!();
        }
    }
    Ok(())
}
