// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::{Context, Result, anyhow};
use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use once_cell::sync::Lazy;
use regex::Regex;
use std::fs;
use std::path::{Path, PathBuf};

static DATA_URL_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^data:image/([A-Za-z0-9.+-]+);base64,(.*)$").expect("static regex")
});

/// Splits a `data:image/<fmt>;base64,...` URL into its format and raw bytes.
pub fn decode_data_url(url: &str) -> Result<(String, Vec<u8>)> {
    let caps = DATA_URL_RE
        .captures(url.trim())
        .ok_or_else(|| anyhow!("Chart is not a base64 image data URL"))?;
    let format = caps[1].to_lowercase();
    let bytes = STANDARD
        .decode(caps[2].trim())
        .context("Chart payload is not valid base64")?;
    Ok((format, bytes))
}

/// Writes the chart image to `out`, or to `<stem>.<format>` when no path is given.
pub fn save_chart(image: &str, out: Option<&Path>, stem: &str) -> Result<PathBuf> {
    let (format, bytes) = decode_data_url(image)?;
    let path = match out {
        Some(p) => p.to_path_buf(),
        None => PathBuf::from(format!("{}.{}", stem, format)),
    };
    fs::write(&path, bytes).with_context(|| format!("Write chart to {}", path.display()))?;
    Ok(path)
}
