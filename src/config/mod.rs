//! Configuration management for wpreport
//!
//! This module handles loading and validating configuration from environment
//! variables, TOML files, and command-line overrides.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

/// Largest page size the WordPress REST API accepts
pub const MAX_PER_PAGE: u32 = 100;

const LOG_LEVELS: &[&str] = &["trace", "debug", "info", "warn", "error"];
const LOG_FORMATS: &[&str] = &["text", "json"];

/// Main configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// HTTP session configuration
    pub session: SessionConfig,

    /// Snapshot crawl configuration
    pub crawl: CrawlConfig,

    /// Logging configuration
    pub logging: LoggingConfig,
}

/// HTTP session configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    /// Proxy server URL; an `https` prefix proxies HTTPS traffic, anything else HTTP
    pub proxy: Option<String>,

    /// Cookies in `Cookie` header format (`a=1; b=2`)
    pub cookies: Option<String>,

    /// Basic authentication user name
    pub username: Option<String>,

    /// Basic authentication password
    pub password: Option<String>,

    /// Skip TLS certificate verification
    pub ignore_ssl_verify: bool,

    /// Request timeout in seconds
    pub request_timeout_secs: u64,

    /// User agent string
    pub user_agent: String,
}

/// Snapshot crawl configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CrawlConfig {
    /// Items requested per page
    pub per_page: u32,

    /// Upper bound on pages fetched per collection
    pub max_pages: u32,

    /// Rate limit (requests per second)
    pub rate_limit: u32,
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    pub level: String,

    /// Log format (text, json)
    pub format: String,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            proxy: None,
            cookies: None,
            username: None,
            password: None,
            ignore_ssl_verify: false,
            request_timeout_secs: 30,
            user_agent: format!("wpreport/{}", env!("CARGO_PKG_VERSION")),
        }
    }
}

impl Default for CrawlConfig {
    fn default() -> Self {
        Self {
            per_page: MAX_PER_PAGE,
            max_pages: 1000,
            rate_limit: 5,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: String::from("info"),
            format: String::from("text"),
        }
    }
}

fn env_flag(name: &str) -> Option<bool> {
    std::env::var(name)
        .ok()
        .map(|v| matches!(v.to_lowercase().as_str(), "1" | "true" | "yes" | "on"))
}

fn env_parse<T: std::str::FromStr>(name: &str) -> Option<T> {
    std::env::var(name).ok().and_then(|v| v.parse::<T>().ok())
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        let defaults = Self::default();

        let session = SessionConfig {
            proxy: std::env::var("WPREPORT_PROXY").ok(),
            cookies: std::env::var("WPREPORT_COOKIES").ok(),
            username: std::env::var("WPREPORT_USERNAME").ok(),
            password: std::env::var("WPREPORT_PASSWORD").ok(),
            ignore_ssl_verify: env_flag("WPREPORT_IGNORE_SSL_VERIFY")
                .unwrap_or(defaults.session.ignore_ssl_verify),
            request_timeout_secs: env_parse("WPREPORT_REQUEST_TIMEOUT")
                .unwrap_or(defaults.session.request_timeout_secs),
            user_agent: std::env::var("WPREPORT_USER_AGENT")
                .unwrap_or(defaults.session.user_agent),
        };

        let crawl = CrawlConfig {
            per_page: env_parse("WPREPORT_PER_PAGE").unwrap_or(defaults.crawl.per_page),
            max_pages: env_parse("WPREPORT_MAX_PAGES").unwrap_or(defaults.crawl.max_pages),
            rate_limit: env_parse("WPREPORT_RATE_LIMIT").unwrap_or(defaults.crawl.rate_limit),
        };

        let logging = LoggingConfig {
            level: std::env::var("WPREPORT_LOG_LEVEL").unwrap_or(defaults.logging.level),
            format: std::env::var("WPREPORT_LOG_FORMAT").unwrap_or(defaults.logging.format),
        };

        Ok(Self {
            session,
            crawl,
            logging,
        })
    }

    /// Load configuration from a file
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let config: Self = toml::from_str(&content)
            .with_context(|| format!("Failed to parse TOML config file: {}", path.display()))?;

        Ok(config)
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<()> {
        if self.crawl.per_page == 0 || self.crawl.per_page > MAX_PER_PAGE {
            anyhow::bail!("per_page must be between 1 and {MAX_PER_PAGE}");
        }

        if self.crawl.max_pages == 0 {
            anyhow::bail!("max_pages must be greater than 0");
        }

        if self.crawl.rate_limit == 0 {
            anyhow::bail!("rate_limit must be positive");
        }

        if self.session.request_timeout_secs == 0 {
            anyhow::bail!("request_timeout_secs must be greater than 0");
        }

        if self.session.password.is_some() && self.session.username.is_none() {
            anyhow::bail!("password given without username");
        }

        if !LOG_LEVELS.contains(&self.logging.level.as_str()) {
            anyhow::bail!("Invalid log level: {}", self.logging.level);
        }

        if !LOG_FORMATS.contains(&self.logging.format.as_str()) {
            anyhow::bail!("Invalid log format: {}", self.logging.format);
        }

        Ok(())
    }

    /// Get request timeout as Duration
    #[must_use]
    pub fn request_timeout(&self) -> Duration {
        self.session.request_timeout()
    }
}

impl LoggingConfig {
    /// `EnvFilter` directive for this crate's events
    ///
    /// Verbose mode raises the crate to `debug` whatever the configured level.
    pub fn filter_directive(&self, verbose: bool) -> String {
        let level = if verbose { "debug" } else { self.level.as_str() };
        format!("wpreport={level},warn")
    }
}

impl SessionConfig {
    /// Get request timeout as Duration
    #[must_use]
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}
