// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::models::{AggregateReport, BudgetAlert, CategoryShare, MonthlySummary, Transaction};
use crate::utils::pretty_table;
use anyhow::Result;
use rust_decimal::{Decimal, RoundingStrategy};
use std::io::Write;
use std::time::{Duration, Instant};

pub const EMPTY_DASHBOARD: &str = "No transactions yet. Start by adding your first transaction!";
pub const EMPTY_TRANSACTIONS: &str = "No transactions yet. Add one to get started!";
pub const EMPTY_ANALYSIS: &str = "No expenses found for this month";

/// How long a status notice stays relevant.
pub const NOTICE_TTL: Duration = Duration::from_secs(3);

fn round(d: Decimal, dp: u32) -> Decimal {
    d.round_dp_with_strategy(dp, RoundingStrategy::MidpointAwayFromZero)
}

pub fn fmt_money(d: Decimal, symbol: &str) -> String {
    let r = round(d, 2);
    if r.is_sign_negative() && !r.is_zero() {
        format!("-{}{:.2}", symbol, r.abs())
    } else {
        format!("{}{:.2}", symbol, r.abs())
    }
}

pub fn fmt_percent(p: Decimal) -> String {
    format!("{:.1}%", round(p, 1))
}

fn share_rows(shares: &[CategoryShare], symbol: &str) -> Vec<Vec<String>> {
    shares
        .iter()
        .map(|c| {
            vec![
                c.category.clone(),
                fmt_money(c.amount, symbol),
                fmt_percent(c.percentage),
            ]
        })
        .collect()
}

pub fn dashboard(report: &AggregateReport, record_count: usize, skipped: usize, symbol: &str) -> String {
    let mut out = String::new();
    if record_count == 0 {
        out.push_str(EMPTY_DASHBOARD);
    } else {
        let summary = pretty_table(
            &["Total Income", "Total Expenses", "Balance"],
            vec![vec![
                fmt_money(report.total_income, symbol),
                fmt_money(report.total_expense, symbol),
                fmt_money(report.balance(), symbol),
            ]],
        );
        out.push_str(&summary.to_string());
        out.push_str("\n\nTop Spending Categories\n");
        let breakdown = pretty_table(
            &["Category", "Amount", "Percentage"],
            share_rows(&report.category_breakdown, symbol),
        );
        out.push_str(&breakdown.to_string());
    }
    if skipped > 0 {
        out.push_str(&format!("\n({} malformed transaction(s) skipped)", skipped));
    }
    out
}

pub fn transactions<'a, I>(records: I, symbol: &str) -> String
where
    I: IntoIterator<Item = (usize, &'a Transaction)>,
{
    let rows: Vec<Vec<String>> = records
        .into_iter()
        .map(|(i, t)| {
            vec![
                i.to_string(),
                t.date.to_string(),
                t.r#type.as_str().to_uppercase(),
                t.category.clone(),
                t.description.clone(),
                fmt_money(t.amount, symbol),
            ]
        })
        .collect();
    if rows.is_empty() {
        return EMPTY_TRANSACTIONS.to_string();
    }
    pretty_table(
        &["#", "Date", "Type", "Category", "Description", "Amount"],
        rows,
    )
    .to_string()
}

pub fn monthly(summary: &MonthlySummary, symbol: &str) -> String {
    let title = format!("Monthly report {}-{:02}\n", summary.year, summary.month);
    let table = pretty_table(
        &["Income", "Expenses", "Balance"],
        vec![vec![
            fmt_money(summary.income, symbol),
            fmt_money(summary.expenses, symbol),
            fmt_money(summary.balance, symbol),
        ]],
    );
    format!("{}{}", title, table)
}

pub fn analysis(categories: &[CategoryShare], symbol: &str) -> String {
    if categories.is_empty() {
        return EMPTY_ANALYSIS.to_string();
    }
    pretty_table(
        &["Category", "Amount", "Percentage"],
        share_rows(categories, symbol),
    )
    .to_string()
}

pub fn alert(alert: &BudgetAlert) -> Option<Notice> {
    if alert.alert {
        Some(Notice::error(format!("BUDGET ALERT! {}", alert.message)))
    } else if !alert.message.is_empty() {
        Some(Notice::success(alert.message.clone()))
    } else {
        None
    }
}

/// Breakdown as CSV, formatted the same way as the dashboard table.
pub fn write_breakdown_csv<W: Write>(report: &AggregateReport, symbol: &str, w: W) -> Result<()> {
    let mut wtr = csv::Writer::from_writer(w);
    wtr.write_record(["Category", "Amount", "Percentage"])?;
    for row in share_rows(&report.category_breakdown, symbol) {
        wtr.write_record(&row)?;
    }
    wtr.flush()?;
    Ok(())
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeKind {
    Success,
    Error,
}

/// Transient status message.
#[derive(Debug, Clone)]
pub struct Notice {
    pub kind: NoticeKind,
    pub text: String,
    shown_at: Instant,
}

impl Notice {
    pub fn success(text: impl Into<String>) -> Self {
        Self {
            kind: NoticeKind::Success,
            text: text.into(),
            shown_at: Instant::now(),
        }
    }

    pub fn error(text: impl Into<String>) -> Self {
        Self {
            kind: NoticeKind::Error,
            text: text.into(),
            shown_at: Instant::now(),
        }
    }

    pub fn is_expired(&self, now: Instant) -> bool {
        now.saturating_duration_since(self.shown_at) >= NOTICE_TTL
    }

    pub fn line(&self) -> String {
        match self.kind {
            NoticeKind::Success => format!("✓ {}", self.text),
            NoticeKind::Error => format!("✗ {}", self.text),
        }
    }
}
