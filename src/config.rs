// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::{Context, Result};
use directories::ProjectDirs;
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

static APP: Lazy<(&str, &str, &str)> =
    Lazy::new(|| ("com.alphavelocity", "Tallyclip", "tallyclip"));

pub const DEFAULT_SERVER: &str = "http://127.0.0.1:5000";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub server_url: String,
    pub currency_symbol: String,
    pub timeout_secs: u64,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            server_url: DEFAULT_SERVER.to_string(),
            currency_symbol: "$".to_string(),
            timeout_secs: 15,
        }
    }
}

pub fn settings_path() -> Result<PathBuf> {
    let proj = ProjectDirs::from(APP.0, APP.1, APP.2)
        .context("Could not determine platform-specific config dir")?;
    let dir = proj.config_dir();
    fs::create_dir_all(dir).context("Failed to create config dir")?;
    Ok(dir.join("settings.json"))
}

impl Settings {
    /// Reads settings from `path`; a missing file yields the defaults.
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            debug!(path = %path.display(), "no settings file, using defaults");
            return Ok(Self::default());
        }
        let raw = fs::read_to_string(path)
            .with_context(|| format!("Read settings at {}", path.display()))?;
        serde_json::from_str(&raw)
            .with_context(|| format!("Parse settings at {}", path.display()))
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        fs::write(path, serde_json::to_string_pretty(self)?)
            .with_context(|| format!("Write settings at {}", path.display()))
    }

    pub fn load() -> Result<Self> {
        Self::load_from(&settings_path()?)
    }

    /// Command-line values (clap already folds in the environment) win over the file.
    pub fn with_overrides(mut self, m: &clap::ArgMatches) -> Self {
        if let Some(s) = m.get_one::<String>("server") {
            self.server_url = s.trim().to_string();
        }
        if let Some(s) = m.get_one::<String>("currency_symbol") {
            self.currency_symbol = s.to_string();
        }
        if let Some(t) = m.get_one::<u64>("timeout") {
            self.timeout_secs = *t;
        }
        self
    }
}
