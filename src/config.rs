// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2025 Alexander Minges

//! Client configuration: optional `romaneios.toml` plus `ROMANEIOS_*` env vars.

use std::path::Path;
use std::time::Duration;

use anyhow::{Context, Result};
use serde::Deserialize;
use url::Url;

/// Settings for the API connection and the worker pool.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    /// Root of the web application serving `/api/romaneios`.
    #[serde(default = "defaults::base_url")]
    pub base_url: String,

    #[serde(default = "defaults::timeout_secs")]
    pub timeout_secs: u64,

    #[serde(default = "defaults::worker_threads")]
    pub worker_threads: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            base_url: defaults::base_url(),
            timeout_secs: defaults::timeout_secs(),
            worker_threads: defaults::worker_threads(),
        }
    }
}

mod defaults {
    pub fn base_url() -> String {
        "http://127.0.0.1:5000".into()
    }

    pub fn timeout_secs() -> u64 {
        30
    }

    pub fn worker_threads() -> usize {
        std::thread::available_parallelism()
            .map(|n| n.get().max(2))
            .unwrap_or(2)
    }
}

impl Config {
    /// Load `romaneios.toml` from the working directory (if present) and env overrides.
    pub fn load() -> Result<Self> {
        Self::load_from(Path::new("romaneios"))
    }

    /// Load from an explicit file stem/path; the file is optional.
    pub fn load_from(file: &Path) -> Result<Self> {
        let name = file.to_string_lossy();
        let config: Config = config::Config::builder()
            .add_source(config::File::with_name(&name).required(false))
            .add_source(config::Environment::with_prefix("ROMANEIOS").try_parsing(true))
            .build()
            .context("Failed to read configuration")?
            .try_deserialize()
            .context("Invalid configuration")?;
        config.validate()?;
        Ok(config)
    }

    /// Parsed base URL; only http and https are accepted.
    pub fn base_url(&self) -> Result<Url> {
        let raw = self.base_url.trim();
        let url = Url::parse(raw).with_context(|| format!("Invalid base_url: {raw}"))?;
        match url.scheme() {
            "http" | "https" => Ok(url),
            other => anyhow::bail!("base_url must use http or https, got {other}"),
        }
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    fn validate(&self) -> Result<()> {
        self.base_url()?;
        if self.timeout_secs == 0 {
            anyhow::bail!("timeout_secs must be greater than zero");
        }
        if self.worker_threads == 0 {
            anyhow::bail!("worker_threads must be greater than zero");
        }
        Ok(())
    }
}
