// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! HTTP device builder.

use std::time::Duration;

use crate::device::Device;
use crate::error::Error;
use crate::protocol::{HttpClient, HttpConfig};

/// Builder for creating HTTP sessions.
///
/// # Examples
///
/// ```no_run
/// use hombot_lib::Device;
/// use std::time::Duration;
///
/// # async fn example() -> hombot_lib::Result<()> {
/// // Fetches the status once before returning
/// let device = Device::http("192.168.1.40").build().await?;
///
/// // No network access until the first command or refresh
/// let device = Device::http("192.168.1.40")
///     .with_port(6260)
///     .with_timeout(Duration::from_secs(5))
///     .with_name("Kitchen")
///     .build_without_probe()?;
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct DeviceBuilder {
    config: HttpConfig,
    name: Option<String>,
    refresh_after_command: bool,
}

impl DeviceBuilder {
    /// Creates a new builder with the specified HTTP configuration.
    pub(crate) fn new(config: HttpConfig) -> Self {
        Self {
            config,
            name: None,
            refresh_after_command: false,
        }
    }

    /// Sets the port.
    #[must_use]
    pub fn with_port(mut self, port: u16) -> Self {
        self.config = self.config.with_port(port);
        self
    }

    /// Sets the request timeout.
    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.config = self.config.with_timeout(timeout);
        self
    }

    /// Sets the name reported until the device sends its nickname.
    #[must_use]
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Refreshes the status after every acknowledged command.
    ///
    /// Off by default: commands only update the running flag and fan speed
    /// until the next scheduled refresh.
    #[must_use]
    pub fn with_refresh_after_command(mut self, enabled: bool) -> Self {
        self.refresh_after_command = enabled;
        self
    }

    /// Returns the HTTP configuration.
    #[must_use]
    pub fn config(&self) -> &HttpConfig {
        &self.config
    }

    /// Builds the session and fetches the initial status.
    ///
    /// Use [`build_without_probe`](Self::build_without_probe) to skip the
    /// network query.
    ///
    /// # Errors
    ///
    /// Returns error if:
    /// - The host is invalid
    /// - The status cannot be fetched or parsed
    pub async fn build(self) -> Result<Device<HttpClient>, Error> {
        let device = self.build_without_probe()?;
        device.try_refresh().await?;
        Ok(device)
    }

    /// Builds the session without contacting the device.
    ///
    /// # Errors
    ///
    /// Returns error if the HTTP client cannot be created.
    pub fn build_without_probe(self) -> Result<Device<HttpClient>, Error> {
        let host = self.config.host().trim().to_string();
        let port = self.config.port();
        let client = self.config.into_client().map_err(Error::Protocol)?;

        let mut device = Device::new(client, host, port);
        if let Some(name) = self.name {
            device.set_configured_name(name);
        }
        device.set_refresh_after_command(self.refresh_after_command);
        Ok(device)
    }
}
