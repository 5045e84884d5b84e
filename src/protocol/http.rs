// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! HTTP protocol implementation for Hombot vacuums.

use std::time::Duration;

use reqwest::{Client, Url};

use crate::error::ProtocolError;
use crate::protocol::Protocol;

// ============================================================================
// HttpConfig - Connection parameters
// ============================================================================

/// Configuration for reaching a Hombot over HTTP.
///
/// # Examples
///
/// ```
/// use hombot_lib::protocol::HttpConfig;
/// use std::time::Duration;
///
/// let config = HttpConfig::new("192.168.1.40");
/// assert_eq!(config.port(), 6260);
/// assert_eq!(config.base_url(), "http://192.168.1.40:6260");
///
/// let config = HttpConfig::new("hombot.lan")
///     .with_port(8080)
///     .with_timeout(Duration::from_secs(5));
/// assert_eq!(config.base_url(), "http://hombot.lan:8080");
/// ```
#[derive(Debug, Clone)]
pub struct HttpConfig {
    host: String,
    port: u16,
    timeout: Duration,
}

impl HttpConfig {
    /// Port the Hombot web interface listens on.
    pub const DEFAULT_PORT: u16 = 6260;
    /// Default request timeout.
    pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

    /// Creates a new configuration for the specified host.
    ///
    /// # Arguments
    ///
    /// * `host` - The hostname or IP address of the vacuum
    #[must_use]
    pub fn new(host: impl Into<String>) -> Self {
        Self {
            host: host.into(),
            port: Self::DEFAULT_PORT,
            timeout: Self::DEFAULT_TIMEOUT,
        }
    }

    /// Sets a custom port.
    #[must_use]
    pub fn with_port(mut self, port: u16) -> Self {
        self.port = port;
        self
    }

    /// Sets the request timeout.
    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Returns the host.
    #[must_use]
    pub fn host(&self) -> &str {
        &self.host
    }

    /// Returns the port.
    #[must_use]
    pub fn port(&self) -> u16 {
        self.port
    }

    /// Returns the timeout.
    #[must_use]
    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Builds the base URL from this configuration.
    #[must_use]
    pub fn base_url(&self) -> String {
        format!("http://{}:{}", self.host, self.port)
    }

    /// Creates an `HttpClient` from this configuration.
    ///
    /// # Errors
    ///
    /// Returns `ProtocolError::InvalidAddress` if the host is empty,
    /// contains a scheme, port or path, or is an IPv6 address without
    /// brackets, and `ProtocolError::Http` if the underlying client cannot be
    /// created.
    pub fn into_client(self) -> Result<HttpClient, ProtocolError> {
        let host = self.host.trim();
        if host.is_empty() {
            return Err(ProtocolError::InvalidAddress("host is required".to_string()));
        }
        let bracketed = host.starts_with('[') && host.ends_with(']');
        if host.contains('/') || (host.contains(':') && !bracketed) {
            return Err(ProtocolError::InvalidAddress(format!(
                "expected a bare host name, got '{host}'"
            )));
        }

        let base_url = format!("http://{host}:{}", self.port);
        Url::parse(&base_url)
            .map_err(|e| ProtocolError::InvalidAddress(format!("'{host}': {e}")))?;

        let client = Client::builder()
            .timeout(self.timeout)
            .build()
            .map_err(ProtocolError::Http)?;

        Ok(HttpClient {
            base_url,
            client,
            timeout: self.timeout,
        })
    }
}

// ============================================================================
// HttpClient
// ============================================================================

/// HTTP client bound to one vacuum.
///
/// Every request is bounded by the configured timeout; a request still
/// pending when it expires fails with `ProtocolError::Timeout`.
#[derive(Debug, Clone)]
pub struct HttpClient {
    base_url: String,
    client: Client,
    timeout: Duration,
}

impl HttpClient {
    /// Creates a client for the specified host using the default port and
    /// timeout.
    ///
    /// # Errors
    ///
    /// Returns error if the host is invalid or the client cannot be created.
    pub fn new(host: impl Into<String>) -> Result<Self, ProtocolError> {
        HttpConfig::new(host).into_client()
    }

    /// Returns the base URL of the device.
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Returns the request timeout.
    #[must_use]
    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Builds the URL for an encoded command query.
    fn command_url(&self, query: &str) -> String {
        format!("{}/json.cgi?{query}", self.base_url)
    }

    /// Builds the URL of the status payload.
    fn status_url(&self) -> String {
        format!("{}/status.txt", self.base_url)
    }

    fn map_error(&self, err: reqwest::Error) -> ProtocolError {
        if err.is_timeout() {
            ProtocolError::Timeout(u64::try_from(self.timeout.as_millis()).unwrap_or(u64::MAX))
        } else if err.is_connect() {
            ProtocolError::ConnectionFailed(err.to_string())
        } else {
            ProtocolError::Http(err)
        }
    }
}

impl Protocol for HttpClient {
    async fn send_query(&self, query: &str) -> Result<(), ProtocolError> {
        let url = self.command_url(query);

        tracing::debug!(url = %url, "Sending HTTP command");

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| self.map_error(e))?;
        let status = response.status();

        // The body carries no acknowledgement, but the exchange is only
        // complete once it has been read.
        let body = response.bytes().await.map_err(|e| self.map_error(e))?;

        tracing::debug!(status = %status, len = body.len(), "Command acknowledged");

        Ok(())
    }

    async fn fetch_status(&self) -> Result<String, ProtocolError> {
        let url = self.status_url();

        tracing::debug!(url = %url, "Fetching status");

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| self.map_error(e))?;

        if !response.status().is_success() {
            return Err(ProtocolError::ConnectionFailed(format!(
                "HTTP {} - {}",
                response.status().as_u16(),
                response.status().canonical_reason().unwrap_or("Unknown")
            )));
        }

        let body = response.text().await.map_err(|e| self.map_error(e))?;

        if body.is_empty() {
            return Err(ProtocolError::EmptyResponse);
        }

        tracing::trace!(body = %body, "Received status");

        Ok(body)
    }
}
