// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;
use std::str::FromStr;

/// Label used for expenses that arrive without a category.
pub const UNCATEGORIZED: &str = "(uncategorized)";

/// Largest amount accepted from the server. Keeps every running total far
/// below `Decimal::MAX`.
// 10^15 (1_000_000_000_000_000), built with the const constructor (`Decimal::new` is not const).
pub const MAX_AMOUNT: Decimal = Decimal::from_parts(0xA4C6_8000, 0x0003_8D7E, 0, false, 0);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionType {
    Income,
    Expense,
}

impl TransactionType {
    pub fn as_str(&self) -> &'static str {
        match self {
            TransactionType::Income => "income",
            TransactionType::Expense => "expense",
        }
    }
}

impl fmt::Display for TransactionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TransactionType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "income" => Ok(TransactionType::Income),
            "expense" => Ok(TransactionType::Expense),
            other => Err(format!("Unknown transaction type '{}'", other)),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    pub r#type: TransactionType,
    pub amount: Decimal,
    pub category: String,
    pub description: String,
    pub date: NaiveDate,
}

impl Transaction {
    pub fn new(
        r#type: TransactionType,
        amount: Decimal,
        category: &str,
        description: &str,
        date: NaiveDate,
    ) -> Self {
        Self {
            r#type,
            amount,
            category: category.to_string(),
            description: description.to_string(),
            date,
        }
    }

    /// Category key used when grouping expenses.
    pub fn category_key(&self) -> &str {
        if self.category.trim().is_empty() {
            UNCATEGORIZED
        } else {
            &self.category
        }
    }
}

/// A transaction exactly as the server sent it. Every field is optional so a
/// single bad record never fails the whole list.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawTransaction {
    #[serde(default)]
    pub r#type: Option<String>,
    #[serde(default)]
    pub amount: Option<Value>,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub date: Option<String>,
}

impl RawTransaction {
    /// Validates the record. Returns `None` when it has to be skipped.
    pub fn validate(&self) -> Option<Transaction> {
        let r#type = self.r#type.as_deref()?.parse::<TransactionType>().ok()?;
        let amount = parse_amount(self.amount.as_ref()?)?;
        let date = parse_wire_date(self.date.as_deref()?)?;
        Some(Transaction {
            r#type,
            amount,
            category: self.category.clone().unwrap_or_default(),
            description: self.description.clone().unwrap_or_default(),
            date,
        })
    }
}

fn parse_amount(v: &Value) -> Option<Decimal> {
    let d = match v {
        Value::Number(n) => {
            let s = n.to_string();
            Decimal::from_str(&s)
                .or_else(|_| Decimal::from_scientific(&s))
                .ok()?
        }
        Value::String(s) => Decimal::from_str(s.trim()).ok()?,
        _ => return None,
    };
    if (d.is_sign_negative() && !d.is_zero()) || d > MAX_AMOUNT {
        return None;
    }
    Some(d)
}

fn parse_wire_date(s: &str) -> Option<NaiveDate> {
    let s = s.trim();
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .ok()
        .or_else(|| s.get(..10).and_then(|d| NaiveDate::parse_from_str(d, "%Y-%m-%d").ok()))
}

/// Validated transactions plus the number of raw records that were rejected.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TransactionBatch {
    pub records: Vec<Transaction>,
    /// Position of each kept record in the server's list.
    pub positions: Vec<usize>,
    pub skipped: usize,
}

impl TransactionBatch {
    pub fn from_raw(raw: &[RawTransaction]) -> Self {
        let mut batch = TransactionBatch::default();
        for (i, r) in raw.iter().enumerate() {
            match r.validate() {
                Some(t) => {
                    batch.records.push(t);
                    batch.positions.push(i);
                }
                None => batch.skipped += 1,
            }
        }
        batch
    }

    /// Builds a batch from already validated records, numbered in order.
    pub fn from_records(records: Vec<Transaction>) -> Self {
        let positions = (0..records.len()).collect();
        Self {
            records,
            positions,
            skipped: 0,
        }
    }

    pub fn indexed(&self) -> impl Iterator<Item = (usize, &Transaction)> {
        self.positions.iter().copied().zip(self.records.iter())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryShare {
    pub category: String,
    pub amount: Decimal,
    pub percentage: Decimal,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct AggregateReport {
    pub total_income: Decimal,
    pub total_expense: Decimal,
    pub category_breakdown: Vec<CategoryShare>,
}

impl AggregateReport {
    pub fn balance(&self) -> Decimal {
        self.total_income - self.total_expense
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonthlySummary {
    pub year: i32,
    pub month: u32,
    pub income: Decimal,
    pub expenses: Decimal,
    pub balance: Decimal,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryAnalysis {
    pub categories: Vec<CategoryShare>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BudgetAlert {
    pub alert: bool,
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub income: Decimal,
    #[serde(default)]
    pub expenses: Decimal,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub deficit: Option<Decimal>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub remaining: Option<Decimal>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ChartImage {
    pub image: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChartKind {
    Category,
    IncomeVsExpense,
}

impl ChartKind {
    pub fn slug(&self) -> &'static str {
        match self {
            ChartKind::Category => "category",
            ChartKind::IncomeVsExpense => "income-vs-expense",
        }
    }
}

impl FromStr for ChartKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "category" => Ok(ChartKind::Category),
            "income-vs-expense" => Ok(ChartKind::IncomeVsExpense),
            other => Err(format!("Unknown chart '{}'", other)),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportKind {
    All,
    Monthly { year: i32, month: u32 },
    Analysis { year: i32, month: u32 },
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ApiReply {
    pub success: bool,
    #[serde(default)]
    pub message: String,
}
