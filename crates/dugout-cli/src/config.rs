// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use anyhow::{Context, Result, anyhow, bail};
use dugout_app::{DEFAULT_MAX_SORT_KEYS, DEFAULT_PAGE_SIZE};
use serde::Deserialize;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing_subscriber::EnvFilter;

pub const APP_NAME: &str = "dugout";
pub const API_URL_ENV: &str = "DUGOUT_API_URL";
pub const CONFIG_PATH_ENV: &str = "DUGOUT_CONFIG_PATH";
pub const LOG_FILTER_ENV: &str = "DUGOUT_LOG";

const CONFIG_VERSION: i64 = 1;
const DEFAULT_API_BASE_URL: &str = "http://localhost:8000";
const DEFAULT_API_TIMEOUT: &str = "5s";
const DEFAULT_LOG_LEVEL: &str = "info";
const MAX_PAGE_SIZE: u32 = 1000;

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub version: i64,
    #[serde(default)]
    pub api: Api,
    #[serde(default)]
    pub table: Table,
    #[serde(default)]
    pub log: Log,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            version: CONFIG_VERSION,
            api: Api::default(),
            table: Table::default(),
            log: Log::default(),
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Api {
    pub base_url: Option<String>,
    pub timeout: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Table {
    pub page_size: Option<u32>,
    pub max_sort_keys: Option<usize>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Log {
    pub level: Option<String>,
    pub file: Option<String>,
}

impl Config {
    pub fn default_path() -> Result<PathBuf> {
        if let Some(path) = env::var_os(CONFIG_PATH_ENV) {
            return Ok(PathBuf::from(path));
        }

        let config_root = dirs::config_dir().ok_or_else(|| {
            anyhow!("cannot resolve config directory; set {CONFIG_PATH_ENV} to the config file")
        })?;
        Ok(config_root.join(APP_NAME).join("config.toml"))
    }

    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let raw = fs::read_to_string(path)
            .with_context(|| format!("read config file {}", path.display()))?;
        let value: toml::Value = toml::from_str(&raw)
            .with_context(|| format!("parse TOML config {}", path.display()))?;

        let version = value
            .get("version")
            .and_then(toml::Value::as_integer)
            .ok_or_else(|| {
                anyhow!(
                    "config file {} has no version; add `version = 1` and put settings under [api], [table], and [log]",
                    path.display()
                )
            })?;

        if version != CONFIG_VERSION {
            bail!(
                "unsupported config version {} in {}; expected version = 1",
                version,
                path.display()
            );
        }

        let config: Config = value
            .try_into()
            .with_context(|| format!("decode config {}", path.display()))?;
        config.validate(path)?;
        Ok(config)
    }

    fn validate(&self, path: &Path) -> Result<()> {
        if let Some(base_url) = &self.api.base_url {
            validate_base_url(base_url)
                .with_context(|| format!("api.base_url in {}", path.display()))?;
        }

        if let Some(timeout) = &self.api.timeout {
            let parsed = parse_duration(timeout)?;
            if parsed.is_zero() {
                bail!(
                    "api.timeout in {} must be positive, got {}",
                    path.display(),
                    timeout
                );
            }
        }

        if let Some(page_size) = self.table.page_size {
            validate_page_size(page_size)
                .with_context(|| format!("table.page_size in {}", path.display()))?;
        }

        if let Some(max_sort_keys) = self.table.max_sort_keys
            && max_sort_keys == 0
        {
            bail!(
                "table.max_sort_keys in {} must be at least 1",
                path.display()
            );
        }

        if let Some(level) = &self.log.level {
            EnvFilter::try_new(level).with_context(|| {
                format!(
                    "log.level {level:?} in {} is not a valid filter (try \"info\" or \"dugout_api=debug\")",
                    path.display()
                )
            })?;
        }

        Ok(())
    }

    /// Base URL of the stats service. `DUGOUT_API_URL` wins over the file.
    pub fn api_base_url(&self) -> String {
        if let Ok(url) = env::var(API_URL_ENV)
            && !url.trim().is_empty()
        {
            return url.trim().trim_end_matches('/').to_owned();
        }
        self.api
            .base_url
            .as_deref()
            .unwrap_or(DEFAULT_API_BASE_URL)
            .trim_end_matches('/')
            .to_owned()
    }

    pub fn api_timeout(&self) -> Result<Duration> {
        parse_duration(self.api.timeout.as_deref().unwrap_or(DEFAULT_API_TIMEOUT))
    }

    pub fn page_size(&self) -> u32 {
        self.table.page_size.unwrap_or(DEFAULT_PAGE_SIZE)
    }

    pub fn max_sort_keys(&self) -> usize {
        self.table.max_sort_keys.unwrap_or(DEFAULT_MAX_SORT_KEYS)
    }

    pub fn log_level(&self) -> &str {
        self.log.level.as_deref().unwrap_or(DEFAULT_LOG_LEVEL)
    }

    /// Log filter from the env override when set, otherwise `[log].level`.
    pub fn log_filter(&self) -> Result<EnvFilter> {
        if let Ok(raw) = env::var(LOG_FILTER_ENV)
            && !raw.trim().is_empty()
        {
            return EnvFilter::try_new(raw.trim()).with_context(|| {
                format!("{LOG_FILTER_ENV}={raw:?} is not a valid filter; fix or unset it")
            });
        }
        EnvFilter::try_new(self.log_level())
            .with_context(|| format!("invalid log filter {:?}", self.log_level()))
    }

    pub fn log_file(&self) -> Result<PathBuf> {
        if let Some(file) = &self.log.file {
            return Ok(PathBuf::from(file));
        }
        let cache_root = dirs::cache_dir()
            .ok_or_else(|| anyhow!("cannot resolve cache directory; set [log].file"))?;
        Ok(cache_root.join(APP_NAME).join("dugout.log"))
    }

    pub fn example_config(path: &Path) -> String {
        format!(
            "# dugout config\n# Place this file at: {}\n\nversion = 1\n\n[api]\n# {API_URL_ENV} overrides this value when set.\nbase_url = \"{DEFAULT_API_BASE_URL}\"\n# <N>ms, <N>s or <N>m\ntimeout = \"{DEFAULT_API_TIMEOUT}\"\n\n[table]\npage_size = {DEFAULT_PAGE_SIZE}\nmax_sort_keys = {DEFAULT_MAX_SORT_KEYS}\n\n[log]\n# {LOG_FILTER_ENV} overrides this filter when set.\nlevel = \"{DEFAULT_LOG_LEVEL}\"\n# Optional. Default is the platform cache dir (for example ~/.cache/dugout/dugout.log)\n# file = \"/absolute/path/to/dugout.log\"\n",
            path.display(),
        )
    }
}

pub fn validate_base_url(raw: &str) -> Result<()> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        bail!("base URL must not be empty");
    }
    if !(trimmed.starts_with("http://") || trimmed.starts_with("https://")) {
        bail!("base URL {trimmed:?} must start with http:// or https://");
    }
    Ok(())
}

pub fn validate_page_size(page_size: u32) -> Result<()> {
    if page_size == 0 || page_size > MAX_PAGE_SIZE {
        bail!("page size must be between 1 and {MAX_PAGE_SIZE}, got {page_size}");
    }
    Ok(())
}

pub fn parse_duration(raw: &str) -> Result<Duration> {
    if let Some(value) = raw.strip_suffix("ms") {
        let millis: u64 = value
            .parse()
            .with_context(|| format!("invalid timeout duration {raw:?}"))?;
        return Ok(Duration::from_millis(millis));
    }
    if let Some(value) = raw.strip_suffix('s') {
        let secs: u64 = value
            .parse()
            .with_context(|| format!("invalid timeout duration {raw:?}"))?;
        return Ok(Duration::from_secs(secs));
    }
    if let Some(value) = raw.strip_suffix('m') {
        let mins: u64 = value
            .parse()
            .with_context(|| format!("invalid timeout duration {raw:?}"))?;
        return Ok(Duration::from_secs(mins.saturating_mul(60)));
    }

    bail!("invalid duration {raw:?}; use one of: <N>ms, <N>s, <N>m (for example 500ms or 5s)")
}
