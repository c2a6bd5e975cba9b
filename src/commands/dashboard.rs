// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::aggregate::{DASHBOARD_TOP_N, compute_aggregate_top};
use crate::api::{ApiError, BudgetApi};
use crate::config::Settings;
use crate::models::{AggregateReport, TransactionBatch};
use crate::render;
use crate::sequence::{RequestSequencer, Ticket};
use crate::utils::maybe_print_json;
use anyhow::{Context, Result};
use std::fs::File;
use std::io::Write;
use std::sync::mpsc;
use std::thread;
use std::time::{Duration, Instant};
use tracing::{debug, error};

pub struct Dashboard {
    pub report: AggregateReport,
    pub record_count: usize,
    pub skipped: usize,
}

impl Dashboard {
    pub fn from_batch(batch: &TransactionBatch, top_n: usize) -> Self {
        Self {
            report: compute_aggregate_top(&batch.records, top_n),
            record_count: batch.records.len(),
            skipped: batch.skipped,
        }
    }

    pub fn render(&self, settings: &Settings) -> String {
        render::dashboard(
            &self.report,
            self.record_count,
            self.skipped,
            &settings.currency_symbol,
        )
    }
}

pub fn load<A: BudgetApi>(api: &A, top_n: usize) -> Result<Dashboard> {
    let batch = api.list_transactions().context("Load dashboard")?;
    Ok(Dashboard::from_batch(&batch, top_n))
}

pub fn handle<A: BudgetApi>(api: &A, settings: &Settings, sub: &clap::ArgMatches) -> Result<()> {
    let top_n = sub
        .get_one::<usize>("top")
        .copied()
        .unwrap_or(DASHBOARD_TOP_N);
    let dash = load(api, top_n)?;
    if let Some(path) = sub.get_one::<String>("csv") {
        let f = File::create(path).with_context(|| format!("Create {}", path))?;
        render::write_breakdown_csv(&dash.report, &settings.currency_symbol, f)?;
        println!("Category breakdown written to {}", path);
    }
    if !maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &dash.report)? {
        println!("{}", dash.render(settings));
    }
    Ok(())
}

/// Refreshes the dashboard every `interval`, each fetch on its own thread.
/// A response is dropped when a newer fetch has already been drawn. Returns
/// the number of frames drawn.
pub fn watch_with<A, W>(
    api: &A,
    settings: &Settings,
    interval: Duration,
    count: Option<usize>,
    out: &mut W,
) -> Result<usize>
where
    A: BudgetApi + Sync,
    W: Write,
{
    let seq = RequestSequencer::new();
    let (tx, rx) = mpsc::channel::<(Ticket, Result<TransactionBatch, ApiError>)>();
    let mut drawn = 0usize;

    let mut deliver = |ticket: Ticket,
                       res: Result<TransactionBatch, ApiError>,
                       out: &mut W|
     -> Result<()> {
        if !seq.accept(ticket) {
            return Ok(());
        }
        match res {
            Ok(batch) => {
                let dash = Dashboard::from_batch(&batch, DASHBOARD_TOP_N);
                writeln!(out, "{}", dash.render(settings))?;
                drawn += 1;
            }
            Err(e) => {
                error!(seq = ticket.seq(), error = %e, "dashboard refresh failed");
                writeln!(out, "{}", render::Notice::error(e.to_string()).line())?;
            }
        }
        Ok(())
    };

    thread::scope(|s| -> Result<()> {
        let mut ticks = 0usize;
        loop {
            let ticket = seq.issue();
            debug!(seq = ticket.seq(), "refreshing dashboard");
            let tx = tx.clone();
            s.spawn(move || {
                let _ = tx.send((ticket, api.list_transactions()));
            });
            ticks += 1;
            if count.is_some_and(|c| ticks >= c) {
                break;
            }
            let deadline = Instant::now() + interval;
            loop {
                let left = deadline.saturating_duration_since(Instant::now());
                match rx.recv_timeout(left) {
                    Ok((ticket, res)) => deliver(ticket, res, &mut *out)?,
                    Err(_) => break,
                }
            }
        }
        drop(tx);
        for (ticket, res) in rx.iter() {
            deliver(ticket, res, &mut *out)?;
        }
        Ok(())
    })?;

    Ok(drawn)
}

pub fn watch<A: BudgetApi + Sync>(
    api: &A,
    settings: &Settings,
    sub: &clap::ArgMatches,
) -> Result<()> {
    let secs = sub.get_one::<u64>("interval").copied().unwrap_or(5);
    let count = sub.get_one::<usize>("count").copied();
    let stdout = std::io::stdout();
    let mut lock = stdout.lock();
    watch_with(api, settings, Duration::from_secs(secs), count, &mut lock)?;
    Ok(())
}
