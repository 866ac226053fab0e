//! Error types for the wpreport crate
//!
//! This module defines the domain-specific error types used by the HTTP
//! session and the report generator.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while talking to the remote REST API
#[derive(Error, Debug)]
pub enum SessionError {
    /// Host name could not be resolved
    #[error("Could not resolve host {url}")]
    ConnectionCouldNotResolve { url: String },

    /// Remote host refused the connection
    #[error("Connection refused by {url}")]
    ConnectionRefused { url: String },

    /// Remote host reset or closed the connection
    #[error("Connection reset by {url}")]
    ConnectionReset { url: String },

    /// Request timed out
    #[error("Request to {url} timed out")]
    ConnectionTimeout { url: String },

    /// 400 Bad Request
    #[error("Error 400 (Bad Request) while fetching {url}")]
    BadRequest { url: String },

    /// 401 Unauthorized
    #[error("Error 401 (Unauthorized) while fetching {url}")]
    Unauthorized { url: String },

    /// 403 Forbidden
    #[error("Error 403 (Authorization Required) while fetching {url}")]
    Forbidden { url: String },

    /// 404 Not Found
    #[error("Error 404 (Not Found) while fetching {url}")]
    NotFound { url: String },

    /// 500 Internal Server Error
    #[error("Error 500 (Internal Server Error) while fetching {url}")]
    InternalServerError { url: String },

    /// 502 Bad Gateway
    #[error("Error 502 (Bad Gateway) while fetching {url}")]
    BadGateway { url: String },

    /// Any other error status
    #[error("Error {status} while fetching {url}")]
    Http { status: u16, url: String },

    /// Transport failure that does not map onto a connection kind
    #[error("HTTP request failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// Response body was not the expected JSON
    #[error("Invalid JSON from {url}: {message}")]
    InvalidJson { url: String, message: String },

    /// Session could not be configured
    #[error("Invalid session setting: {0}")]
    InvalidSetting(String),
}

impl SessionError {
    /// Map an HTTP status onto its error kind, `None` for non-error statuses
    pub fn from_status(status: u16, url: &str) -> Option<Self> {
        let url = url.to_string();
        let err = match status {
            400 => Self::BadRequest { url },
            401 => Self::Unauthorized { url },
            403 => Self::Forbidden { url },
            404 => Self::NotFound { url },
            500 => Self::InternalServerError { url },
            502 => Self::BadGateway { url },
            s if s >= 400 => Self::Http { status: s, url },
            _ => return None,
        };
        Some(err)
    }

    /// HTTP status carried by this error, if any
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::BadRequest { .. } => Some(400),
            Self::Unauthorized { .. } => Some(401),
            Self::Forbidden { .. } => Some(403),
            Self::NotFound { .. } => Some(404),
            Self::InternalServerError { .. } => Some(500),
            Self::BadGateway { .. } => Some(502),
            Self::Http { status, .. } => Some(*status),
            Self::Transport(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }

    /// True when the server denied access to the resource
    pub fn is_access_denied(&self) -> bool {
        matches!(
            self,
            Self::Unauthorized { .. } | Self::Forbidden { .. } | Self::NotFound { .. }
        )
    }
}

/// Errors raised while loading snapshots and rendering the report
#[derive(Error, Debug)]
pub enum ReportError {
    /// A snapshot file exists but is not valid JSON of the expected shape
    #[error("Malformed JSON in {}: {source}", file.display())]
    MalformedJson {
        file: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// The category parent relation loops back onto itself
    #[error("Category cycle detected at category id {id}")]
    CategoryCycleDetected { id: u64 },

    /// Snapshot directory could not be read or written
    #[error("I/O error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
