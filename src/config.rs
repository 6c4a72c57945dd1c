use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::PathBuf;

use crate::constants::{
    DEFAULT_API_URL, DEFAULT_ITEM_COUNT, DEFAULT_MAX_TOKENS, DEFAULT_MODEL, DEFAULT_SMTP_PORT,
    DEFAULT_SMTP_SERVER, DEFAULT_TIMEOUT_SECS,
};

const ENV_API_KEY: &str = "ANTHROPIC_API_KEY";
const ENV_GMAIL_ADDRESS: &str = "GMAIL_ADDRESS";
const ENV_GMAIL_APP_PASSWORD: &str = "GMAIL_APP_PASSWORD";
const ENV_TO_EMAIL: &str = "TO_EMAIL";

/// Non-secret settings, read from `config.toml` when present
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub ai: AiConfig,
    #[serde(default)]
    pub smtp: SmtpConfig,
    #[serde(default)]
    pub digest: DigestConfig,
}

/// Model API settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AiConfig {
    #[serde(default = "default_api_url")]
    pub api_url: String,
    #[serde(default = "default_model")]
    pub model: String,
    #[serde(default = "default_max_tokens")]
    pub max_tokens: u32,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    /// Upper bound on searches the model may run (None = API default)
    #[serde(default)]
    pub web_search_max_uses: Option<u32>,
}

impl Default for AiConfig {
    fn default() -> Self {
        Self {
            api_url: default_api_url(),
            model: default_model(),
            max_tokens: default_max_tokens(),
            timeout_secs: default_timeout_secs(),
            web_search_max_uses: None,
        }
    }
}

/// How the SMTP connection is secured
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum SmtpSecurity {
    /// TLS from the first byte (SMTPS, port 465)
    #[default]
    Implicit,
    /// Plain connection upgraded with STARTTLS (port 587)
    Starttls,
}

/// SMTP relay settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SmtpConfig {
    #[serde(default = "default_smtp_server")]
    pub server: String,
    #[serde(default = "default_smtp_port")]
    pub port: u16,
    #[serde(default)]
    pub security: SmtpSecurity,
}

impl Default for SmtpConfig {
    fn default() -> Self {
        Self {
            server: default_smtp_server(),
            port: default_smtp_port(),
            security: SmtpSecurity::default(),
        }
    }
}

/// Digest content settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DigestConfig {
    /// Number of headlines to ask for
    #[serde(default = "default_item_count")]
    pub item_count: usize,
}

impl Default for DigestConfig {
    fn default() -> Self {
        Self {
            item_count: default_item_count(),
        }
    }
}

fn default_api_url() -> String {
    DEFAULT_API_URL.to_string()
}

fn default_model() -> String {
    DEFAULT_MODEL.to_string()
}

fn default_max_tokens() -> u32 {
    DEFAULT_MAX_TOKENS
}

fn default_timeout_secs() -> u64 {
    DEFAULT_TIMEOUT_SECS
}

fn default_smtp_server() -> String {
    DEFAULT_SMTP_SERVER.to_string()
}

fn default_smtp_port() -> u16 {
    DEFAULT_SMTP_PORT
}

fn default_item_count() -> usize {
    DEFAULT_ITEM_COUNT
}

impl Config {
    pub fn config_dir() -> Result<PathBuf> {
        let dir = dirs::config_dir()
            .context("Could not find config directory")?
            .join("ai-news-digest");
        Ok(dir)
    }

    pub fn config_path() -> Result<PathBuf> {
        Ok(Self::config_dir()?.join("config.toml"))
    }

    /// Load the config file, falling back to defaults when it does not exist
    pub fn load() -> Result<Self> {
        let path = Self::config_path()?;

        if !path.exists() {
            tracing::debug!("No config file at {}, using defaults", path.display());
            return Ok(Self::default());
        }

        let content = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let config = Self::from_toml(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;
        tracing::debug!("Loaded config from {}", path.display());
        Ok(config)
    }

    pub fn from_toml(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }
}

/// Anthropic API key
#[derive(Clone)]
pub struct ApiKey(String);

impl ApiKey {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        required(&lookup, ENV_API_KEY).map(Self)
    }

    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Debug for ApiKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("ApiKey(***)")
    }
}

/// Sender credentials and the digest recipient
#[derive(Clone)]
pub struct MailAccount {
    /// Gmail address, used both as SMTP username and as `From`
    pub address: String,
    /// Gmail app password (not the account password)
    pub app_password: String,
    pub recipient: String,
}

impl MailAccount {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        Ok(Self {
            address: required(&lookup, ENV_GMAIL_ADDRESS)?,
            app_password: required(&lookup, ENV_GMAIL_APP_PASSWORD)?,
            recipient: required(&lookup, ENV_TO_EMAIL)?,
        })
    }
}

impl std::fmt::Debug for MailAccount {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MailAccount")
            .field("address", &self.address)
            .field("app_password", &"***")
            .field("recipient", &self.recipient)
            .finish()
    }
}

fn required(lookup: &impl Fn(&str) -> Option<String>, name: &str) -> Result<String> {
    lookup(name)
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
        .with_context(|| format!("{} environment variable not set", name))
}
