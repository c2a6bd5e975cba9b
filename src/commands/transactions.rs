// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::api::{BudgetApi, NewTransaction};
use crate::config::Settings;
use crate::models::{TransactionBatch, TransactionType};
use crate::render::{self, Notice};
use crate::utils::{maybe_print_json, today};
use anyhow::{Context, Result, anyhow};
use std::io::{self, BufRead, Write};
use tracing::info;

fn arg<'a>(sub: &'a clap::ArgMatches, id: &str) -> &'a str {
    sub.get_one::<String>(id).map(|s| s.as_str()).unwrap_or("")
}

/// Validates the form fields and posts them. Nothing is sent when a field is missing.
pub fn add<A: BudgetApi>(api: &A, sub: &clap::ArgMatches) -> Result<Notice> {
    let r#type = arg(sub, "type")
        .parse::<TransactionType>()
        .map_err(|e| anyhow!(e))?;
    let default_date = today().to_string();
    let date = sub
        .get_one::<String>("date")
        .map(|s| s.as_str())
        .unwrap_or(&default_date);
    let tx = NewTransaction::validate(
        r#type,
        arg(sub, "amount"),
        arg(sub, "category"),
        arg(sub, "description"),
        date,
    )?;
    let reply = api.add_transaction(&tx).context("Add transaction")?;
    info!(amount = %tx.amount, category = %tx.category, "transaction added");
    let text = if reply.message.is_empty() {
        "Transaction added successfully!".to_string()
    } else {
        reply.message
    };
    Ok(Notice::success(text))
}

pub fn list_batch<A: BudgetApi>(api: &A) -> Result<TransactionBatch> {
    api.list_transactions().context("Load transactions")
}

pub fn list<A: BudgetApi>(api: &A, settings: &Settings, sub: &clap::ArgMatches) -> Result<()> {
    let batch = list_batch(api)?;
    if !maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &batch.records)? {
        println!(
            "{}",
            render::transactions(batch.indexed(), &settings.currency_symbol)
        );
        if batch.skipped > 0 {
            println!("({} malformed transaction(s) skipped)", batch.skipped);
        }
    }
    Ok(())
}

fn confirm<R: BufRead, W: Write>(mut input: R, mut output: W, index: usize) -> Result<bool> {
    write!(
        output,
        "Are you sure you want to delete transaction #{}? [y/N] ",
        index
    )?;
    output.flush()?;
    let mut line = String::new();
    input.read_line(&mut line)?;
    Ok(matches!(line.trim().to_lowercase().as_str(), "y" | "yes"))
}

pub fn remove<A: BudgetApi>(api: &A, sub: &clap::ArgMatches) -> Result<Option<Notice>> {
    let index = *sub.get_one::<usize>("index").unwrap();
    if !sub.get_flag("yes") && !confirm(io::stdin().lock(), io::stdout(), index)? {
        return Ok(None);
    }
    api.delete_transaction(index)
        .with_context(|| format!("Delete transaction #{}", index))?;
    info!(index, "transaction deleted");
    Ok(Some(Notice::success("Transaction deleted")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn confirmation_accepts_yes_only() {
        let mut out = Vec::new();
        assert!(confirm("y\n".as_bytes(), &mut out, 3).unwrap());
        assert!(confirm("YES\n".as_bytes(), &mut out, 3).unwrap());
        assert!(!confirm("\n".as_bytes(), &mut out, 3).unwrap());
        assert!(!confirm("nope\n".as_bytes(), &mut out, 3).unwrap());
        assert!(String::from_utf8(out).unwrap().contains("#3"));
    }
}
