//! Service configuration (`~/.config/founder-intake/config.toml`).
//!
//! Holds the Notion credential and target database plus the HTTP listener
//! settings. Environment variables override file values so that deployments
//! can keep the API key out of the file entirely.

use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result, bail};
use serde::{Deserialize, Serialize};

use crate::paths;

pub const ENV_API_KEY: &str = "NOTION_API_KEY";
pub const ENV_DATABASE_ID: &str = "NOTION_DATABASE_ID";
pub const ENV_BIND: &str = "FI_BIND";
pub const ENV_PORT: &str = "FI_PORT";

const DEFAULT_BASE_URL: &str = "https://api.notion.com/v1";
const DEFAULT_NOTION_VERSION: &str = "2022-06-28";
const DEFAULT_PAGE_SIZE: u32 = 100;
const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;
const DEFAULT_BIND: &str = "127.0.0.1";
const DEFAULT_PORT: u16 = 8888;
const DEFAULT_MAX_REQUEST_BODY_BYTES: usize = 64 * 1024;

/// Notion page-size ceiling for block listings.
const MAX_PAGE_SIZE: u32 = 100;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServiceConfig {
    #[serde(default)]
    pub notion: NotionConfig,
    #[serde(default)]
    pub server: ServerConfig,
}

/// `[notion]` section.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NotionConfig {
    /// Integration token. Usually supplied via `NOTION_API_KEY`.
    #[serde(default)]
    pub api_key: String,
    /// Founders database. Usually supplied via `NOTION_DATABASE_ID`.
    #[serde(default)]
    pub database_id: String,
    #[serde(default = "default_base_url")]
    pub base_url: String,
    #[serde(default = "default_notion_version")]
    pub notion_version: String,
    #[serde(default = "default_page_size")]
    pub page_size: u32,
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,
}

impl Default for NotionConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            database_id: String::new(),
            base_url: default_base_url(),
            notion_version: default_notion_version(),
            page_size: DEFAULT_PAGE_SIZE,
            request_timeout_secs: DEFAULT_REQUEST_TIMEOUT_SECS,
        }
    }
}

impl NotionConfig {
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}

/// `[server]` section.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_bind")]
    pub bind: String,
    #[serde(default = "default_port")]
    pub port: u16,
    #[serde(default = "default_max_request_body_bytes")]
    pub max_request_body_bytes: usize,
    /// Include upstream error text in 500 responses.
    #[serde(default = "default_true")]
    pub expose_error_details: bool,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind: default_bind(),
            port: DEFAULT_PORT,
            max_request_body_bytes: DEFAULT_MAX_REQUEST_BODY_BYTES,
            expose_error_details: true,
        }
    }
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

fn default_notion_version() -> String {
    DEFAULT_NOTION_VERSION.to_string()
}

fn default_page_size() -> u32 {
    DEFAULT_PAGE_SIZE
}

fn default_request_timeout_secs() -> u64 {
    DEFAULT_REQUEST_TIMEOUT_SECS
}

fn default_bind() -> String {
    DEFAULT_BIND.to_string()
}

fn default_port() -> u16 {
    DEFAULT_PORT
}

fn default_max_request_body_bytes() -> usize {
    DEFAULT_MAX_REQUEST_BODY_BYTES
}

fn default_true() -> bool {
    true
}

impl ServiceConfig {
    /// Load from the default config path, then apply process environment overrides.
    ///
    /// A missing file (or an undeterminable config directory) yields defaults.
    pub fn load() -> Result<Self> {
        let mut config = match Self::config_path() {
            Some(path) => Self::load_from(&path)?,
            None => Self::default(),
        };
        config.apply_env_overrides(|key| std::env::var(key).ok());
        Ok(config)
    }

    /// Load from an explicit file. Missing file yields defaults.
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            tracing::debug!(path = %path.display(), "config file not found, using defaults");
            return Ok(Self::default());
        }
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config: {}", path.display()))?;
        let config: Self = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config: {}", path.display()))?;
        Ok(config)
    }

    pub fn config_path() -> Option<PathBuf> {
        paths::config_path()
    }

    /// Overlay values from the environment. Empty variables are ignored.
    pub fn apply_env_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());

        if let Some(api_key) = get(ENV_API_KEY) {
            self.notion.api_key = api_key;
        }
        if let Some(database_id) = get(ENV_DATABASE_ID) {
            self.notion.database_id = database_id;
        }
        if let Some(bind) = get(ENV_BIND) {
            self.server.bind = bind;
        }
        if let Some(port) = get(ENV_PORT) {
            match port.trim().parse::<u16>() {
                Ok(port) => self.server.port = port,
                Err(_) => tracing::warn!(value = %port, "ignoring invalid {ENV_PORT}"),
            }
        }
    }

    /// Check that everything needed to talk to Notion is present.
    pub fn validate(&self) -> Result<()> {
        if self.notion.api_key.trim().is_empty() {
            bail!("Notion API key is not configured (set {ENV_API_KEY} or notion.api_key)");
        }
        if self.notion.database_id.trim().is_empty() {
            bail!(
                "Notion database id is not configured (set {ENV_DATABASE_ID} or notion.database_id)"
            );
        }
        if self.notion.page_size == 0 || self.notion.page_size > MAX_PAGE_SIZE {
            bail!(
                "notion.page_size must be between 1 and {MAX_PAGE_SIZE}, got {}",
                self.notion.page_size
            );
        }
        if !self.notion.base_url.starts_with("https://")
            && !self.notion.base_url.starts_with("http://")
        {
            bail!(
                "notion.base_url must be an http(s) URL, got '{}'",
                self.notion.base_url
            );
        }
        Ok(())
    }

    /// Copy with the API key masked, for display.
    pub fn redacted(&self) -> Self {
        let mut copy = self.clone();
        if !copy.notion.api_key.is_empty() {
            copy.notion.api_key = "***".to_string();
        }
        copy
    }

    /// Render the effective config as TOML with the API key masked.
    pub fn to_display_toml(&self) -> Result<String> {
        toml::to_string_pretty(&self.redacted()).context("Failed to serialize config")
    }

    /// Commented config template.
    pub fn default_template() -> String {
        r#"# Founder intake service configuration
# Location: ~/.config/founder-intake/config.toml
#
# NOTION_API_KEY / NOTION_DATABASE_ID override the values below.

[notion]
# api_key = "secret_..."
# database_id = "0123456789abcdef0123456789abcdef"
base_url = "https://api.notion.com/v1"
notion_version = "2022-06-28"
page_size = 100             # children per block listing request (max 100)
request_timeout_secs = 30

[server]
bind = "127.0.0.1"          # FI_BIND
port = 8888                 # FI_PORT
max_request_body_bytes = 65536
expose_error_details = true # include upstream error text in 500 responses
"#
        .to_string()
    }
}

#[cfg(test)]
#[path = "service_tests.rs"]
mod tests;
