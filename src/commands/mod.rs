// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

pub mod dashboard;
pub mod exporter;
pub mod reports;
pub mod settings;
pub mod transactions;

use crate::api::BudgetApi;
use crate::render::{self, Notice};
use anyhow::{Context, Result};

pub fn budget_alert<A: BudgetApi>(api: &A) -> Result<Option<Notice>> {
    let alert = api.budget_alert().context("Check budget alert")?;
    Ok(render::alert(&alert))
}
