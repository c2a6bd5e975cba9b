// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::api::BudgetApi;
use crate::charts::save_chart;
use crate::models::{ChartKind, ExportKind};
use crate::utils::resolve_month;
use anyhow::{Context, Result, anyhow};
use std::path::{Path, PathBuf};
use tracing::info;

fn month_of(sub: &clap::ArgMatches) -> Result<(i32, u32)> {
    resolve_month(
        sub.get_one::<i32>("year").copied(),
        sub.get_one::<u32>("month").copied(),
    )
}

pub fn export_kind(kind: &str, year: i32, month: u32) -> Result<ExportKind> {
    match kind {
        "all" => Ok(ExportKind::All),
        "monthly" => Ok(ExportKind::Monthly { year, month }),
        "analysis" => Ok(ExportKind::Analysis { year, month }),
        other => Err(anyhow!("Unknown export '{}' (use all|monthly|analysis)", other)),
    }
}

fn fallback_name(kind: ExportKind) -> String {
    match kind {
        ExportKind::All => "budget_transactions.csv".to_string(),
        ExportKind::Monthly { year, month } => format!("budget_report_{}_{:02}.csv", year, month),
        ExportKind::Analysis { year, month } => {
            format!("budget_category_analysis_{}_{:02}.csv", year, month)
        }
    }
}

/// Downloads an export and writes it to `out`, the server's filename, or a
/// name derived from the export kind, in that order.
pub fn export_to<A: BudgetApi>(api: &A, kind: ExportKind, out: Option<&Path>) -> Result<PathBuf> {
    let dl = api.export(kind).context("Download export")?;
    let path = match out {
        Some(p) => p.to_path_buf(),
        None => PathBuf::from(dl.filename.unwrap_or_else(|| fallback_name(kind))),
    };
    std::fs::write(&path, &dl.bytes).with_context(|| format!("Write {}", path.display()))?;
    info!(path = %path.display(), bytes = dl.bytes.len(), "export saved");
    Ok(path)
}

pub fn handle<A: BudgetApi>(api: &A, sub: &clap::ArgMatches) -> Result<()> {
    let (year, month) = month_of(sub)?;
    let kind = export_kind(sub.get_one::<String>("kind").unwrap(), year, month)?;
    let out = sub.get_one::<String>("out").map(Path::new);
    let path = export_to(api, kind, out)?;
    println!("Exported to {}", path.display());
    Ok(())
}

pub fn chart_to<A: BudgetApi>(
    api: &A,
    kind: ChartKind,
    year: i32,
    month: u32,
    out: Option<&Path>,
) -> Result<PathBuf> {
    let chart = api.chart(kind, year, month).context("Fetch chart")?;
    let stem = format!("chart_{}_{}_{:02}", kind.slug().replace('-', "_"), year, month);
    save_chart(&chart.image, out, &stem)
}

pub fn chart<A: BudgetApi>(api: &A, sub: &clap::ArgMatches) -> Result<()> {
    let (year, month) = month_of(sub)?;
    let kind = sub
        .get_one::<String>("kind")
        .unwrap()
        .parse::<ChartKind>()
        .map_err(|e| anyhow!(e))?;
    let out = sub.get_one::<String>("out").map(Path::new);
    let path = chart_to(api, kind, year, month, out)?;
    println!("Chart saved to {}", path.display());
    Ok(())
}
