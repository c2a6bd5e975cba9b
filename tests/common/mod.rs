// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

#![allow(dead_code)]

use chrono::NaiveDate;
use rust_decimal::Decimal;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;
use tallyclip::api::{ApiError, BudgetApi, Download, NewTransaction};
use tallyclip::models::{
    ApiReply, BudgetAlert, CategoryAnalysis, ChartImage, ChartKind, ExportKind, MonthlySummary,
    RawTransaction, Transaction, TransactionBatch, TransactionType,
};

pub fn date(s: &str) -> NaiveDate {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
}

pub fn income(amount: &str, day: &str) -> Transaction {
    Transaction::new(
        TransactionType::Income,
        amount.parse::<Decimal>().unwrap(),
        "",
        "",
        date(day),
    )
}

pub fn expense(amount: &str, category: &str, day: &str) -> Transaction {
    Transaction::new(
        TransactionType::Expense,
        amount.parse::<Decimal>().unwrap(),
        category,
        "",
        date(day),
    )
}

/// In-memory stand-in for the budget tracker server.
#[derive(Default)]
pub struct FakeApi {
    pub raw: Vec<RawTransaction>,
    pub added: Mutex<Vec<NewTransaction>>,
    pub deleted: Mutex<Vec<usize>>,
    pub list_calls: AtomicUsize,
    /// Delay applied to the first list call only.
    pub first_list_delay: Option<Duration>,
    pub list_delay: Option<Duration>,
    pub chart_image: Option<String>,
    pub export_body: Option<Download>,
}

impl FakeApi {
    pub fn with_json(json: &str) -> Self {
        Self {
            raw: serde_json::from_str(json).unwrap(),
            ..Default::default()
        }
    }
}

impl BudgetApi for FakeApi {
    fn list_transactions(&self) -> Result<TransactionBatch, ApiError> {
        let n = self.list_calls.fetch_add(1, Ordering::SeqCst);
        if n == 0 {
            if let Some(d) = self.first_list_delay {
                std::thread::sleep(d);
            }
        }
        if let Some(d) = self.list_delay {
            std::thread::sleep(d);
        }
        Ok(TransactionBatch::from_raw(&self.raw))
    }

    fn add_transaction(&self, tx: &NewTransaction) -> Result<ApiReply, ApiError> {
        self.added.lock().unwrap().push(tx.clone());
        Ok(ApiReply {
            success: true,
            message: "Transaction added successfully".into(),
        })
    }

    fn delete_transaction(&self, index: usize) -> Result<ApiReply, ApiError> {
        if index >= self.raw.len() {
            return Err(ApiError::Rejected("Invalid index".into()));
        }
        self.deleted.lock().unwrap().push(index);
        Ok(ApiReply {
            success: true,
            message: "Transaction deleted".into(),
        })
    }

    fn monthly_report(&self, year: i32, month: u32) -> Result<MonthlySummary, ApiError> {
        let batch = TransactionBatch::from_raw(&self.raw);
        tallyclip::aggregate::monthly_summary(&batch.records, year, month).ok_or_else(|| {
            ApiError::NotFound(format!("No transactions found for {}-{:02}", year, month))
        })
    }

    fn category_analysis(&self, year: i32, month: u32) -> Result<CategoryAnalysis, ApiError> {
        let batch = TransactionBatch::from_raw(&self.raw);
        let recs = tallyclip::aggregate::for_month(&batch.records, year, month);
        Ok(CategoryAnalysis {
            categories: tallyclip::aggregate::category_analysis(&recs),
        })
    }

    fn chart(&self, _kind: ChartKind, _year: i32, _month: u32) -> Result<ChartImage, ApiError> {
        match &self.chart_image {
            Some(image) => Ok(ChartImage {
                image: image.clone(),
            }),
            None => Err(ApiError::NotFound("No expenses found".into())),
        }
    }

    fn budget_alert(&self) -> Result<BudgetAlert, ApiError> {
        Ok(BudgetAlert {
            alert: false,
            message: String::new(),
            income: Decimal::ZERO,
            expenses: Decimal::ZERO,
            deficit: None,
            remaining: None,
        })
    }

    fn export(&self, _kind: ExportKind) -> Result<Download, ApiError> {
        self.export_body
            .clone()
            .ok_or_else(|| ApiError::NotFound("No transactions to export".into()))
    }
}
