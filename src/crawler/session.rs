//! HTTP session wrapper for the WordPress REST API
//!
//! Wraps a `reqwest` client configured with:
//! - an optional HTTP or HTTPS proxy
//! - cookies preloaded from a `Cookie` header string
//! - optional basic credentials
//! - optional TLS certificate verification bypass
//!
//! Every failure, at the transport level or as an error status, is mapped
//! onto a [`SessionError`] kind and logged once. Nothing is retried.

use reqwest::cookie::{CookieStore, Jar};
use reqwest::{Client, Proxy, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use std::error::Error as StdError;
use std::io::ErrorKind;
use std::sync::Arc;
use url::Url;

use crate::config::SessionConfig;
use crate::utils::error::SessionError;

/// Messages in a transport error chain that mean name resolution failed
const RESOLVE_MARKERS: &[&str] = &[
    "dns error",
    "failed to lookup address",
    "name or service not known",
    "nodename nor servname",
    "no such host",
];

/// Messages that mean the peer dropped an established connection
const RESET_MARKERS: &[&str] = &[
    "connection reset",
    "connection closed before message completed",
    "connection aborted",
];

/// Session with shared cookies and credentials across requests
pub struct RequestSession {
    client: Client,
    jar: Arc<Jar>,
    credentials: Option<(String, Option<String>)>,
    proxy: Option<String>,
    ignore_ssl_verify: bool,
}

impl RequestSession {
    /// Build a session from configuration
    ///
    /// # Errors
    ///
    /// Returns `SessionError::InvalidSetting` for an unusable proxy URL and
    /// `SessionError::Transport` if the client cannot be built.
    pub fn new(config: &SessionConfig) -> Result<Self, SessionError> {
        let jar = Arc::new(Jar::default());

        let mut builder = Client::builder()
            .timeout(config.request_timeout())
            .user_agent(config.user_agent.as_str())
            .gzip(true)
            .cookie_provider(Arc::clone(&jar))
            .danger_accept_invalid_certs(config.ignore_ssl_verify);

        if let Some(proxy) = &config.proxy {
            builder = builder.proxy(build_proxy(proxy)?);
        }

        let client = builder.build()?;

        let credentials = config
            .username
            .as_ref()
            .map(|user| (user.clone(), config.password.clone()));

        Ok(Self {
            client,
            jar,
            credentials,
            proxy: config.proxy.clone(),
            ignore_ssl_verify: config.ignore_ssl_verify,
        })
    }

    /// Preload cookies given as `name=value; other=value` for `url`'s host
    ///
    /// Returns the number of cookies stored. Pairs without `=` are skipped.
    pub fn set_cookies(&self, cookies: &str, url: &Url) -> usize {
        let mut stored = 0;
        for pair in cookies.split(';').map(str::trim).filter(|p| !p.is_empty()) {
            match pair.split_once('=') {
                Some((name, value)) if !name.trim().is_empty() => {
                    self.jar
                        .add_cookie_str(&format!("{}={}", name.trim(), value.trim()), url);
                    stored += 1;
                }
                _ => tracing::warn!(cookie = %pair, "Ignoring malformed cookie"),
            }
        }
        stored
    }

    /// Cookies the session would send to `url`, in `Cookie` header format
    pub fn cookies(&self, url: &Url) -> Option<String> {
        self.jar
            .cookies(url)
            .and_then(|v| v.to_str().ok().map(str::to_string))
    }

    pub fn proxy(&self) -> Option<&str> {
        self.proxy.as_deref()
    }

    pub fn username(&self) -> Option<&str> {
        self.credentials.as_ref().map(|(user, _)| user.as_str())
    }

    pub fn ignores_ssl_verify(&self) -> bool {
        self.ignore_ssl_verify
    }

    /// Send a GET request
    pub async fn get(&self, url: &str) -> Result<Response, SessionError> {
        tracing::debug!(url = %url, "GET");
        self.send(self.client.get(url), url).await
    }

    /// Send a form-encoded POST request
    pub async fn post_form(
        &self,
        url: &str,
        data: &[(&str, &str)],
    ) -> Result<Response, SessionError> {
        tracing::debug!(url = %url, fields = data.len(), "POST");
        self.send(self.client.post(url).form(data), url).await
    }

    /// GET a URL and decode its JSON body
    pub async fn get_json<T: DeserializeOwned>(&self, url: &str) -> Result<T, SessionError> {
        let response = self.get(url).await?;
        Self::decode_json(response, url).await
    }

    /// Decode the JSON body of a response obtained from `url`
    pub async fn decode_json<T: DeserializeOwned>(
        response: Response,
        url: &str,
    ) -> Result<T, SessionError> {
        let body = response.text().await?;
        serde_json::from_str(&body).map_err(|e| SessionError::InvalidJson {
            url: url.to_string(),
            message: e.to_string(),
        })
    }

    async fn send(&self, request: RequestBuilder, url: &str) -> Result<Response, SessionError> {
        let request = match &self.credentials {
            Some((user, password)) => request.basic_auth(user, password.as_deref()),
            None => request,
        };

        let response = request
            .send()
            .await
            .map_err(|e| classify_transport_error(e, url))?;

        let status = response.status().as_u16();
        if let Some(err) = SessionError::from_status(status, url) {
            log_status_error(&err);
            return Err(err);
        }

        Ok(response)
    }
}

/// Proxy for HTTPS traffic when the URL says `https`, HTTP traffic otherwise
fn build_proxy(proxy: &str) -> Result<Proxy, SessionError> {
    let result = if proxy.to_lowercase().starts_with("https") {
        Proxy::https(proxy)
    } else {
        Proxy::http(proxy)
    };
    result.map_err(|e| SessionError::InvalidSetting(format!("proxy {proxy}: {e}")))
}

fn log_status_error(err: &SessionError) {
    match err {
        SessionError::BadRequest { .. } | SessionError::NotFound { .. } => {
            tracing::warn!(status = ?err.status(), "{err}");
        }
        _ => tracing::error!(status = ?err.status(), "{err}"),
    }
}

/// Map a transport failure onto the connection error kinds
fn classify_transport_error(err: reqwest::Error, url: &str) -> SessionError {
    let classified = if err.is_timeout() {
        Some(SessionError::ConnectionTimeout {
            url: url.to_string(),
        })
    } else {
        match io_error_kind(&err) {
            Some(ErrorKind::ConnectionRefused) => Some(SessionError::ConnectionRefused {
                url: url.to_string(),
            }),
            Some(
                ErrorKind::ConnectionReset | ErrorKind::ConnectionAborted | ErrorKind::BrokenPipe,
            ) => Some(SessionError::ConnectionReset {
                url: url.to_string(),
            }),
            _ => {
                let chain = error_chain_text(&err);
                if RESOLVE_MARKERS.iter().any(|m| chain.contains(m)) {
                    Some(SessionError::ConnectionCouldNotResolve {
                        url: url.to_string(),
                    })
                } else if RESET_MARKERS.iter().any(|m| chain.contains(m)) {
                    Some(SessionError::ConnectionReset {
                        url: url.to_string(),
                    })
                } else {
                    None
                }
            }
        }
    };

    match classified {
        Some(kind) => {
            tracing::error!(error = %err, "{kind}");
            kind
        }
        None => {
            tracing::error!(url = %url, error = %err, "HTTP request failed");
            SessionError::Transport(err)
        }
    }
}

fn io_error_kind(err: &reqwest::Error) -> Option<ErrorKind> {
    let mut source: Option<&(dyn StdError + 'static)> = err.source();
    while let Some(e) = source {
        if let Some(io) = e.downcast_ref::<std::io::Error>() {
            return Some(io.kind());
        }
        source = e.source();
    }
    None
}

fn error_chain_text(err: &reqwest::Error) -> String {
    let mut text = err.to_string();
    let mut source: Option<&(dyn StdError + 'static)> = err.source();
    while let Some(e) = source {
        text.push_str(": ");
        text.push_str(&e.to_string());
        source = e.source();
    }
    text.to_lowercase()
}
