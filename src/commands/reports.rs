// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::aggregate::{category_analysis, for_month, monthly_summary};
use crate::api::BudgetApi;
use crate::config::Settings;
use crate::models::{CategoryShare, MonthlySummary};
use crate::render;
use crate::utils::{maybe_print_json, resolve_month};
use anyhow::{Context, Result, anyhow};

fn month_of(sub: &clap::ArgMatches) -> Result<(i32, u32)> {
    resolve_month(
        sub.get_one::<i32>("year").copied(),
        sub.get_one::<u32>("month").copied(),
    )
}

pub fn monthly<A: BudgetApi>(api: &A, year: i32, month: u32, local: bool) -> Result<MonthlySummary> {
    if local {
        let batch = api.list_transactions().context("Load transactions")?;
        return monthly_summary(&batch.records, year, month)
            .ok_or_else(|| anyhow!("No transactions found for {}-{:02}", year, month));
    }
    Ok(api.monthly_report(year, month)?)
}

pub fn analysis<A: BudgetApi>(
    api: &A,
    year: i32,
    month: u32,
    local: bool,
) -> Result<Vec<CategoryShare>> {
    if local {
        let batch = api.list_transactions().context("Load transactions")?;
        let month_records = for_month(&batch.records, year, month);
        if month_records.is_empty() {
            return Err(anyhow!("No transactions found for {}-{:02}", year, month));
        }
        return Ok(category_analysis(&month_records));
    }
    Ok(api.category_analysis(year, month)?.categories)
}

pub fn report<A: BudgetApi>(api: &A, settings: &Settings, sub: &clap::ArgMatches) -> Result<()> {
    let (year, month) = month_of(sub)?;
    let summary = monthly(api, year, month, sub.get_flag("local"))?;
    if !maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &summary)? {
        println!("{}", render::monthly(&summary, &settings.currency_symbol));
    }
    Ok(())
}

pub fn handle_analysis<A: BudgetApi>(
    api: &A,
    settings: &Settings,
    sub: &clap::ArgMatches,
) -> Result<()> {
    let (year, month) = month_of(sub)?;
    let categories = analysis(api, year, month, sub.get_flag("local"))?;
    if !maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &categories)? {
        println!("Category analysis {}-{:02}", year, month);
        println!("{}", render::analysis(&categories, &settings.currency_symbol));
    }
    Ok(())
}
