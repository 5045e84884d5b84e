// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Persisted configuration of one vacuum.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::device::{Device, DeviceBuilder};
use crate::error::ValueError;
use crate::protocol::HttpConfig;

use super::EntryId;

/// Default polling interval, in seconds.
pub const DEFAULT_SCAN_INTERVAL_SECS: u64 = 20;

/// Configuration entry for one vacuum.
///
/// # Examples
///
/// ```
/// use hombot_lib::integration::ConfigEntry;
/// use std::time::Duration;
///
/// let entry = ConfigEntry::new("192.168.1.40")
///     .with_name("Living room")
///     .with_scan_interval(Duration::from_secs(30));
///
/// assert_eq!(entry.port, 6260);
/// assert_eq!(entry.scan_interval(), Duration::from_secs(30));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConfigEntry {
    /// Entry identifier.
    #[serde(default)]
    pub id: EntryId,
    /// Hostname or IP address of the vacuum.
    pub host: String,
    /// HTTP port of the vacuum.
    #[serde(default = "default_port")]
    pub port: u16,
    /// Display name used until the device reports its nickname.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Polling interval in seconds.
    #[serde(default = "default_scan_interval")]
    pub scan_interval_secs: u64,
}

fn default_port() -> u16 {
    HttpConfig::DEFAULT_PORT
}

fn default_scan_interval() -> u64 {
    DEFAULT_SCAN_INTERVAL_SECS
}

impl ConfigEntry {
    /// Creates an entry for the given host with default port and interval.
    #[must_use]
    pub fn new(host: impl Into<String>) -> Self {
        Self {
            id: EntryId::new(),
            host: host.into(),
            port: default_port(),
            name: None,
            scan_interval_secs: DEFAULT_SCAN_INTERVAL_SECS,
        }
    }

    /// Creates an entry from user-provided host and port strings.
    ///
    /// An empty port selects the default port.
    ///
    /// # Errors
    ///
    /// Returns `ValueError::InvalidPort` if the port is not a number in
    /// 1-65535.
    pub fn from_user_input(host: &str, port: &str) -> Result<Self, ValueError> {
        let port = port.trim();
        let entry = Self::new(host.trim());
        if port.is_empty() {
            return Ok(entry);
        }
        match port.parse::<u16>() {
            Ok(0) | Err(_) => Err(ValueError::InvalidPort(port.to_string())),
            Ok(port) => Ok(entry.with_port(port)),
        }
    }

    /// Sets the port.
    #[must_use]
    pub fn with_port(mut self, port: u16) -> Self {
        self.port = port;
        self
    }

    /// Sets the display name.
    #[must_use]
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Sets the polling interval. Sub-second precision is dropped and the
    /// interval is at least one second.
    #[must_use]
    pub fn with_scan_interval(mut self, interval: Duration) -> Self {
        self.scan_interval_secs = interval.as_secs().max(1);
        self
    }

    /// Returns the polling interval.
    #[must_use]
    pub fn scan_interval(&self) -> Duration {
        Duration::from_secs(self.scan_interval_secs.max(1))
    }

    /// Returns the title shown for this entry.
    #[must_use]
    pub fn title(&self) -> &str {
        self.name.as_deref().unwrap_or(&self.host)
    }

    /// Returns a device builder for this entry.
    #[must_use]
    pub fn device_builder(&self) -> DeviceBuilder {
        let builder = Device::http_config(HttpConfig::new(&self.host).with_port(self.port));
        match &self.name {
            Some(name) => builder.with_name(name),
            None => builder,
        }
    }
}
