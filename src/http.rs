//! HTTP client for the local control server.
//!
//! This module provides a wrapper around `reqwest::Client` that adds:
//! * The fixed `Origin` header the control server requires on every request
//! * A consistent user agent and keepalive configuration
//! * JSON decoding that distinguishes transport from decode failures
//!
//! Note that no overall request timeout is set: the status endpoint is a
//! long poll that legitimately blocks for up to the configured `wait`
//! seconds before responding.

use std::time::Duration;

use reqwest::header::{HeaderMap, HeaderValue, ORIGIN};
use url::Url;

use crate::{config::Config, error::Result};

/// HTTP client bound to one control server session.
///
/// The control session and the status poller each construct their own
/// `Client`; the two never share a connection pool.
pub struct Client {
    inner: reqwest::Client,
}

impl Client {
    /// Duration to keep idle connections alive.
    ///
    /// Prevents reconnection overhead between consecutive control calls.
    const KEEPALIVE_TIMEOUT: Duration = Duration::from_secs(60);

    /// Creates a new client with the fixed origin header attached.
    ///
    /// # Errors
    ///
    /// Returns error if the underlying HTTP client cannot be built.
    pub fn new(config: &Config) -> Result<Self> {
        let mut headers = HeaderMap::new();
        if let Ok(origin) = HeaderValue::from_str(config.origin.as_str().trim_end_matches('/')) {
            headers.insert(ORIGIN, origin);
        }

        let inner = reqwest::Client::builder()
            .tcp_keepalive(Self::KEEPALIVE_TIMEOUT)
            .default_headers(headers)
            .user_agent(&config.user_agent)
            .build()?;

        Ok(Self { inner })
    }

    /// Issues a GET request with the given query parameters and decodes
    /// the response body as JSON.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Transport`](crate::error::Error::Transport) on any
    /// network failure and [`Error::Decode`](crate::error::Error::Decode)
    /// when the body is not valid JSON.
    pub async fn get_json(&self, url: Url, params: &[(&str, String)]) -> Result<serde_json::Value> {
        trace!("GET {url}");

        let response = self.inner.get(url).query(params).send().await?;
        let body = response.text().await?;

        serde_json::from_str(&body).map_err(Into::into)
    }
}
