//! Common utilities and helper functions
//!
//! This module provides shared utilities used across the application.

pub mod error;

use anyhow::{Context, Result};
use url::Url;

/// Normalize a target site into a base URL without a trailing slash
///
/// Bare host names get an `http://` scheme.
pub fn normalize_target(target: &str) -> Result<Url> {
    let trimmed = target.trim().trim_end_matches('/');
    let with_scheme = if trimmed.contains("://") {
        trimmed.to_string()
    } else {
        format!("http://{trimmed}")
    };

    let url = Url::parse(&with_scheme).with_context(|| format!("Invalid target URL: {target}"))?;
    if url.host_str().is_none() {
        anyhow::bail!("No host in target URL: {target}");
    }

    Ok(url)
}

/// Join an API path onto a base URL, keeping any path prefix of the base
pub fn join_api_path(base: &Url, path: &str) -> String {
    format!(
        "{}/{}",
        base.as_str().trim_end_matches('/'),
        path.trim_start_matches('/')
    )
}
