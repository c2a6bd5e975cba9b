// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Client-side totals and category breakdowns over a transaction list.
//!
//! Every function here is pure: it borrows the records and returns a fresh
//! value, so the same input always yields the same report.

use crate::models::{
    AggregateReport, CategoryShare, MonthlySummary, Transaction, TransactionType,
};
use chrono::Datelike;
use rust_decimal::Decimal;
use std::collections::HashMap;

/// Number of categories shown on the dashboard.
pub const DASHBOARD_TOP_N: usize = 10;

/// Expense totals keyed by category, iterated in first-seen order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CategoryTotals {
    entries: Vec<(String, Decimal)>,
    index: HashMap<String, usize>,
}

impl CategoryTotals {
    pub fn add(&mut self, category: &str, amount: Decimal) {
        match self.index.get(category) {
            Some(&i) => self.entries[i].1 += amount,
            None => {
                self.index.insert(category.to_string(), self.entries.len());
                self.entries.push((category.to_string(), amount));
            }
        }
    }

    pub fn get(&self, category: &str) -> Option<Decimal> {
        self.index.get(category).map(|&i| self.entries[i].1)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, Decimal)> {
        self.entries.iter().map(|(c, a)| (c.as_str(), *a))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn total(&self) -> Decimal {
        self.entries.iter().map(|(_, a)| *a).sum()
    }

    /// Ranks categories by amount, largest first. Ties keep first-seen order.
    fn ranked(&self, total_expense: Decimal) -> Vec<CategoryShare> {
        if total_expense.is_zero() {
            return Vec::new();
        }
        let mut items: Vec<CategoryShare> = self
            .entries
            .iter()
            .map(|(category, amount)| CategoryShare {
                category: category.clone(),
                amount: *amount,
                percentage: *amount / total_expense * Decimal::ONE_HUNDRED,
            })
            .collect();
        items.sort_by(|a, b| b.amount.cmp(&a.amount));
        items
    }
}

pub fn category_totals(records: &[Transaction]) -> CategoryTotals {
    let mut totals = CategoryTotals::default();
    for t in records.iter().filter(|t| t.r#type == TransactionType::Expense) {
        totals.add(t.category_key(), t.amount);
    }
    totals
}

/// Dashboard report: totals plus the top ten expense categories.
pub fn compute_aggregate(records: &[Transaction]) -> AggregateReport {
    compute_aggregate_top(records, DASHBOARD_TOP_N)
}

pub fn compute_aggregate_top(records: &[Transaction], top_n: usize) -> AggregateReport {
    let mut total_income = Decimal::ZERO;
    let mut total_expense = Decimal::ZERO;
    let mut totals = CategoryTotals::default();

    for t in records {
        match t.r#type {
            TransactionType::Income => total_income += t.amount,
            TransactionType::Expense => {
                total_expense += t.amount;
                totals.add(t.category_key(), t.amount);
            }
        }
    }

    let mut category_breakdown = totals.ranked(total_expense);
    category_breakdown.truncate(top_n);

    AggregateReport {
        total_income,
        total_expense,
        category_breakdown,
    }
}

/// Full, untruncated breakdown for the category analysis view.
pub fn category_analysis(records: &[Transaction]) -> Vec<CategoryShare> {
    let totals = category_totals(records);
    totals.ranked(totals.total())
}

pub fn for_month(records: &[Transaction], year: i32, month: u32) -> Vec<Transaction> {
    records
        .iter()
        .filter(|t| t.date.year() == year && t.date.month() == month)
        .cloned()
        .collect()
}

/// Income, expenses and balance for one month. `None` when the month has no
/// transactions at all.
pub fn monthly_summary(records: &[Transaction], year: i32, month: u32) -> Option<MonthlySummary> {
    let month_records = for_month(records, year, month);
    if month_records.is_empty() {
        return None;
    }
    let report = compute_aggregate_top(&month_records, 0);
    Some(MonthlySummary {
        year,
        month,
        income: report.total_income,
        expenses: report.total_expense,
        balance: report.balance(),
    })
}
