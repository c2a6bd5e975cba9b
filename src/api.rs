// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! HTTP collaborator: the budget tracker's REST API.

use crate::models::{
    ApiReply, BudgetAlert, CategoryAnalysis, ChartImage, ChartKind, ExportKind, MonthlySummary,
    RawTransaction, TransactionBatch, TransactionType,
};
use chrono::NaiveDate;
use once_cell::sync::Lazy;
use regex::Regex;
use reqwest::blocking::{Client, Response};
use reqwest::header::CONTENT_DISPOSITION;
use rust_decimal::Decimal;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use thiserror::Error;
use tracing::{debug, warn};

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("{0}")]
    NotFound(String),
    #[error("{0}")]
    Rejected(String),
    #[error("server returned {status}: {message}")]
    Status { status: u16, message: String },
    #[error("unexpected response body: {0}")]
    Decode(#[from] serde_json::Error),
}

#[derive(Debug, Error, PartialEq)]
pub enum ValidationError {
    #[error("Please fill all fields (missing: {})", .0.join(", "))]
    MissingFields(Vec<&'static str>),
    #[error("Invalid amount '{0}', expected a non-negative number")]
    InvalidAmount(String),
    #[error("Invalid date '{0}', expected YYYY-MM-DD")]
    InvalidDate(String),
}

/// A transaction about to be posted. Built only through [`NewTransaction::validate`].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NewTransaction {
    pub r#type: TransactionType,
    pub amount: String,
    pub category: String,
    pub description: String,
    pub date: String,
}

impl NewTransaction {
    pub fn validate(
        r#type: TransactionType,
        amount: &str,
        category: &str,
        description: &str,
        date: &str,
    ) -> Result<Self, ValidationError> {
        let fields = [
            ("amount", amount),
            ("category", category),
            ("description", description),
            ("date", date),
        ];
        let missing: Vec<&'static str> = fields
            .iter()
            .filter(|(_, v)| v.trim().is_empty())
            .map(|(k, _)| *k)
            .collect();
        if !missing.is_empty() {
            return Err(ValidationError::MissingFields(missing));
        }

        let amount = amount.trim();
        match Decimal::from_str(amount) {
            Ok(d) if !d.is_sign_negative() || d.is_zero() => {}
            _ => return Err(ValidationError::InvalidAmount(amount.to_string())),
        }
        let date = date.trim();
        NaiveDate::parse_from_str(date, "%Y-%m-%d")
            .map_err(|_| ValidationError::InvalidDate(date.to_string()))?;

        Ok(Self {
            r#type,
            amount: amount.to_string(),
            category: category.trim().to_string(),
            description: description.trim().to_string(),
            date: date.to_string(),
        })
    }
}

/// A file the server offered for download.
#[derive(Debug, Clone, PartialEq)]
pub struct Download {
    pub filename: Option<String>,
    pub bytes: Vec<u8>,
}

pub trait BudgetApi {
    fn list_transactions(&self) -> Result<TransactionBatch, ApiError>;
    fn add_transaction(&self, tx: &NewTransaction) -> Result<ApiReply, ApiError>;
    fn delete_transaction(&self, index: usize) -> Result<ApiReply, ApiError>;
    fn monthly_report(&self, year: i32, month: u32) -> Result<MonthlySummary, ApiError>;
    fn category_analysis(&self, year: i32, month: u32) -> Result<CategoryAnalysis, ApiError>;
    fn chart(&self, kind: ChartKind, year: i32, month: u32) -> Result<ChartImage, ApiError>;
    fn budget_alert(&self) -> Result<BudgetAlert, ApiError>;
    fn export(&self, kind: ExportKind) -> Result<Download, ApiError>;
}

#[derive(Deserialize)]
struct TransactionList {
    #[serde(default)]
    transactions: Vec<RawTransaction>,
}

#[derive(Deserialize, Default)]
struct ErrorBody {
    error: Option<String>,
    message: Option<String>,
}

pub struct HttpApi {
    base: String,
    client: Client,
}

impl HttpApi {
    pub fn new(base: &str, client: Client) -> Self {
        Self {
            base: base.trim_end_matches('/').to_string(),
            client,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base
    }

    fn url(&self, path: &str) -> String {
        format!("{}/api/{}", self.base, path)
    }

    fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        let url = self.url(path);
        debug!(%url, "GET");
        let resp = self.client.get(&url).send()?;
        decode(resp)
    }
}

fn error_for(status: u16, body: &str) -> ApiError {
    let parsed: ErrorBody = serde_json::from_str(body).unwrap_or_default();
    match (parsed.error, parsed.message) {
        (Some(e), _) if status == 404 => ApiError::NotFound(e),
        (Some(e), _) => ApiError::Status { status, message: e },
        (None, Some(m)) => ApiError::Rejected(m),
        (None, None) => ApiError::Status {
            status,
            message: body.chars().take(200).collect(),
        },
    }
}

fn decode<T: DeserializeOwned>(resp: Response) -> Result<T, ApiError> {
    let status = resp.status();
    let body = resp.text()?;
    if !status.is_success() {
        warn!(status = status.as_u16(), "request rejected by server");
        return Err(error_for(status.as_u16(), &body));
    }
    Ok(serde_json::from_str(&body)?)
}

fn check_reply(reply: ApiReply) -> Result<ApiReply, ApiError> {
    if reply.success {
        Ok(reply)
    } else {
        Err(ApiError::Rejected(reply.message))
    }
}

static FILENAME_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"filename\*?=(?:UTF-8'')?"?([^";]+)"?"#).expect("static regex")
});

pub fn filename_from_disposition(header: &str) -> Option<String> {
    FILENAME_RE
        .captures(header)
        .and_then(|c| c.get(1))
        .map(|m| m.as_str().trim().to_string())
        .filter(|s| !s.is_empty())
}

impl BudgetApi for HttpApi {
    fn list_transactions(&self) -> Result<TransactionBatch, ApiError> {
        let list: TransactionList = self.get_json("transactions")?;
        let batch = TransactionBatch::from_raw(&list.transactions);
        if batch.skipped > 0 {
            warn!(skipped = batch.skipped, "skipped malformed transactions");
        }
        Ok(batch)
    }

    fn add_transaction(&self, tx: &NewTransaction) -> Result<ApiReply, ApiError> {
        let url = self.url("add-transaction");
        debug!(%url, "POST");
        let resp = self.client.post(&url).json(tx).send()?;
        check_reply(decode(resp)?)
    }

    fn delete_transaction(&self, index: usize) -> Result<ApiReply, ApiError> {
        let url = self.url(&format!("delete-transaction/{}", index));
        debug!(%url, "DELETE");
        let resp = self.client.delete(&url).send()?;
        check_reply(decode(resp)?)
    }

    fn monthly_report(&self, year: i32, month: u32) -> Result<MonthlySummary, ApiError> {
        self.get_json(&format!("monthly-report/{}/{}", year, month))
    }

    fn category_analysis(&self, year: i32, month: u32) -> Result<CategoryAnalysis, ApiError> {
        self.get_json(&format!("category-analysis/{}/{}", year, month))
    }

    fn chart(&self, kind: ChartKind, year: i32, month: u32) -> Result<ChartImage, ApiError> {
        self.get_json(&format!("chart/{}/{}/{}", kind.slug(), year, month))
    }

    fn budget_alert(&self) -> Result<BudgetAlert, ApiError> {
        self.get_json("budget-alert")
    }

    fn export(&self, kind: ExportKind) -> Result<Download, ApiError> {
        let path = match kind {
            ExportKind::All => "export/all-transactions".to_string(),
            ExportKind::Monthly { year, month } => {
                format!("export/monthly-report/{}/{}", year, month)
            }
            ExportKind::Analysis { year, month } => {
                format!("export/category-analysis/{}/{}", year, month)
            }
        };
        let url = self.url(&path);
        debug!(%url, "GET");
        let resp = self.client.get(&url).send()?;
        let status = resp.status();
        if !status.is_success() {
            let body = resp.text()?;
            return Err(error_for(status.as_u16(), &body));
        }
        let filename = resp
            .headers()
            .get(CONTENT_DISPOSITION)
            .and_then(|v| v.to_str().ok())
            .and_then(filename_from_disposition);
        let bytes = resp.bytes()?.to_vec();
        Ok(Download { filename, bytes })
    }
}
