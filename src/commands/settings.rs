// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::config::Settings;
use crate::utils::pretty_table;
use anyhow::Result;
use std::path::Path;

pub fn handle(path: &Path, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("set", sub)) => {
            let s = apply(Settings::load_from(path)?, sub);
            s.save_to(path)?;
            println!("Settings saved to {}", path.display());
        }
        _ => {
            let s = Settings::load_from(path)?;
            let rows = vec![
                vec!["server_url".into(), s.server_url],
                vec!["currency_symbol".into(), s.currency_symbol],
                vec!["timeout_secs".into(), s.timeout_secs.to_string()],
                vec!["file".into(), path.display().to_string()],
            ];
            println!("{}", pretty_table(&["Key", "Value"], rows));
        }
    }
    Ok(())
}

pub fn apply(mut s: Settings, sub: &clap::ArgMatches) -> Settings {
    if let Some(v) = sub.get_one::<String>("set_server") {
        s.server_url = v.trim().trim_end_matches('/').to_string();
    }
    if let Some(v) = sub.get_one::<String>("set_symbol") {
        s.currency_symbol = v.to_string();
    }
    if let Some(v) = sub.get_one::<u64>("set_timeout") {
        s.timeout_secs = *v;
    }
    s
}
