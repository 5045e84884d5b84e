// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! High-level session with one Hombot vacuum.
//!
//! A [`Device`] owns the connection parameters of one vacuum and the last
//! status it received. Commands and refreshes never return errors to the
//! caller: they log the failure and report `false`, leaving the last known
//! status in place.
//!
//! # State Tracking
//!
//! The full [`DeviceSnapshot`] only changes on [`refresh`](Device::refresh).
//! Commands update a lightweight running flag (and the fan speed) right after
//! the device acknowledges them, ahead of the next refresh. Enable
//! [`with_refresh_after_command`](DeviceBuilder::with_refresh_after_command)
//! to reconcile immediately instead.
//!
//! ```no_run
//! use hombot_lib::Device;
//!
//! # async fn example() -> hombot_lib::Result<()> {
//! let device = Device::http("192.168.1.40").build().await?;
//!
//! if device.turn_on().await {
//!     assert!(device.is_running());
//! }
//!
//! device.set_fan_speed("turbo").await;
//! device.return_to_base().await;
//! # Ok(())
//! # }
//! ```

mod builder;

pub use builder::DeviceBuilder;

use parking_lot::RwLock;

use crate::command::{Command, RawCommand, VacuumCommand};
use crate::error::Error;
use crate::protocol::{HttpClient, HttpConfig, Protocol};
use crate::state::{Attributes, DeviceSnapshot};
use crate::telemetry::parse_status;
use crate::types::{CleanerState, FanSpeed, RawState};

/// Name used until the device reports its nickname.
pub const DEFAULT_NAME: &str = "Hombot";

/// Mutable part of a session, replaced under a single lock.
#[derive(Debug, Clone, Default)]
struct SessionState {
    snapshot: Option<DeviceSnapshot>,
    is_running: bool,
    fan_speed: Option<FanSpeed>,
}

/// A session with one Hombot vacuum.
///
/// # Type Parameter
///
/// `P` is the transport. [`HttpClient`] is the one used against real
/// hardware; see [`Device::http`].
#[derive(Debug)]
pub struct Device<P: Protocol> {
    protocol: P,
    host: String,
    port: u16,
    configured_name: String,
    refresh_after_command: bool,
    state: RwLock<SessionState>,
}

impl<P: Protocol> Device<P> {
    /// Creates a session over the given transport.
    ///
    /// `host` and `port` identify the device in logs and accessors; the
    /// transport is expected to already point at them.
    #[must_use]
    pub fn new(protocol: P, host: impl Into<String>, port: u16) -> Self {
        Self {
            protocol,
            host: host.into(),
            port,
            configured_name: DEFAULT_NAME.to_string(),
            refresh_after_command: false,
            state: RwLock::new(SessionState::default()),
        }
    }

    pub(crate) fn set_configured_name(&mut self, name: String) {
        self.configured_name = name;
    }

    pub(crate) fn set_refresh_after_command(&mut self, enabled: bool) {
        self.refresh_after_command = enabled;
    }

    /// Returns the transport.
    #[must_use]
    pub fn protocol(&self) -> &P {
        &self.protocol
    }

    // ========== Commands ==========

    /// Sends a command, returning the transport error on failure.
    ///
    /// No local state is touched.
    ///
    /// # Errors
    ///
    /// Returns `Error::Protocol` if the exchange times out or fails.
    pub async fn try_send_command<C: Command + Sync>(&self, command: &C) -> Result<(), Error> {
        self.protocol
            .send_query(&command.encoded_query())
            .await
            .map_err(Error::Protocol)
    }

    /// Sends a command and reports whether the device acknowledged it.
    ///
    /// Failures are logged, never returned.
    pub async fn send_command<C: Command + Sync>(&self, command: &C) -> bool {
        match self.try_send_command(command).await {
            Ok(()) => true,
            Err(e) => {
                tracing::error!(
                    host = %self.host,
                    query = %command.query(),
                    error = %e,
                    "Hombot command failed"
                );
                false
            }
        }
    }

    /// Sends an arbitrary query to `json.cgi`.
    pub async fn send_raw(&self, query: &str) -> bool {
        tracing::debug!(host = %self.host, query, "Sending raw command");
        self.send_command(&RawCommand::new(query)).await
    }

    /// Starts cleaning.
    pub async fn turn_on(&self) -> bool {
        self.run_command(VacuumCommand::Start, true).await
    }

    /// Starts cleaning. Same as [`turn_on`](Self::turn_on).
    pub async fn start(&self) -> bool {
        self.turn_on().await
    }

    /// Sends the vacuum back to its dock.
    pub async fn turn_off(&self) -> bool {
        self.return_to_base().await
    }

    /// Pauses cleaning.
    pub async fn pause(&self) -> bool {
        self.run_command(VacuumCommand::Pause, false).await
    }

    /// Stops cleaning. The device has no stop command, so this pauses.
    pub async fn stop(&self) -> bool {
        self.pause().await
    }

    /// Pauses when running, starts otherwise.
    pub async fn start_pause(&self) -> bool {
        if self.is_running() {
            self.pause().await
        } else {
            self.turn_on().await
        }
    }

    /// Sends the vacuum back to its dock.
    pub async fn return_to_base(&self) -> bool {
        self.run_command(VacuumCommand::Home, false).await
    }

    /// Sets the fan speed by name (`"normal"` or `"turbo"`, any case).
    ///
    /// Unknown names are logged and ignored.
    pub async fn set_fan_speed(&self, fan_speed: &str) -> bool {
        match fan_speed.parse::<FanSpeed>() {
            Ok(target) => self.set_fan_speed_to(target).await,
            Err(e) => {
                tracing::error!(host = %self.host, error = %e, "Cannot set fan speed");
                false
            }
        }
    }

    /// Sets the fan speed.
    ///
    /// The device only offers a toggle, so a command is sent only when the
    /// current speed differs from `target`. Until the first refresh the
    /// current speed is unknown and nothing is sent.
    pub async fn set_fan_speed_to(&self, target: FanSpeed) -> bool {
        let current = self.state.read().fan_speed;

        match current {
            Some(speed) if speed == target => {
                tracing::debug!(host = %self.host, fan_speed = %target, "Fan speed unchanged");
                true
            }
            Some(_) => {
                tracing::debug!(host = %self.host, fan_speed = %target, "Set fan speed");
                if !self.send_command(&VacuumCommand::ToggleTurbo).await {
                    return false;
                }
                self.state.write().fan_speed = Some(target);
                self.reconcile().await;
                true
            }
            None => {
                tracing::warn!(
                    host = %self.host,
                    fan_speed = %target,
                    "Fan speed unknown until the first refresh, not toggling"
                );
                false
            }
        }
    }

    async fn run_command(&self, command: VacuumCommand, running: bool) -> bool {
        if !self.send_command(&command).await {
            return false;
        }
        self.state.write().is_running = running;
        self.reconcile().await;
        true
    }

    async fn reconcile(&self) {
        if self.refresh_after_command {
            self.refresh().await;
        }
    }

    // ========== Status ==========

    /// Fetches and parses the status, replacing the held snapshot.
    ///
    /// On failure the previous snapshot is kept.
    ///
    /// # Errors
    ///
    /// - `Error::Protocol` if the exchange fails or the body is empty
    /// - `Error::Parse` if the payload is malformed or reports an unknown state
    pub async fn try_refresh(&self) -> Result<DeviceSnapshot, Error> {
        tracing::debug!(host = %self.host, "Fetch state from the device");

        let body = self.protocol.fetch_status().await?;
        let snapshot = parse_status(&body)?;

        tracing::debug!(
            host = %self.host,
            state = %snapshot.state,
            raw_state = %snapshot.raw_state,
            battery = snapshot.battery_percent,
            "Got new state from the vacuum"
        );

        let mut state = self.state.write();
        state.is_running = snapshot.is_running;
        state.fan_speed = Some(snapshot.fan_speed);
        state.snapshot = Some(snapshot.clone());
        Ok(snapshot)
    }

    /// Refreshes the held snapshot and reports success.
    ///
    /// Failures are logged, never returned. There is no retry; the caller's
    /// polling cadence decides when to try again.
    pub async fn refresh(&self) -> bool {
        match self.try_refresh().await {
            Ok(_) => true,
            Err(e) => {
                tracing::error!(host = %self.host, error = %e, "Error getting Hombot data");
                false
            }
        }
    }

    // ========== Accessors ==========

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

    /// Returns the last snapshot, if any refresh succeeded.
    #[must_use]
    pub fn snapshot(&self) -> Option<DeviceSnapshot> {
        self.state.read().snapshot.clone()
    }

    /// Returns the normalized state, `Unknown` before the first refresh.
    #[must_use]
    pub fn state(&self) -> CleanerState {
        self.state
            .read()
            .snapshot
            .as_ref()
            .map_or(CleanerState::Unknown, |s| s.state)
    }

    /// Returns the raw device state token.
    #[must_use]
    pub fn raw_state(&self) -> Option<RawState> {
        self.state.read().snapshot.as_ref().map(|s| s.raw_state)
    }

    /// Returns the battery level.
    #[must_use]
    pub fn battery_level(&self) -> Option<u8> {
        self.state.read().snapshot.as_ref().map(|s| s.battery_percent)
    }

    /// Returns whether the vacuum is cleaning, including optimistic updates.
    #[must_use]
    pub fn is_running(&self) -> bool {
        self.state.read().is_running
    }

    /// Returns the fan speed, including optimistic updates.
    #[must_use]
    pub fn fan_speed(&self) -> Option<FanSpeed> {
        self.state.read().fan_speed
    }

    /// Returns the supported fan speeds.
    #[must_use]
    pub fn fan_speed_list(&self) -> &'static [FanSpeed] {
        &FanSpeed::ALL
    }

    /// Returns the device nickname, or the configured name before the first
    /// refresh.
    #[must_use]
    pub fn name(&self) -> String {
        self.state
            .read()
            .snapshot
            .as_ref()
            .map(|s| s.name.clone())
            .filter(|name| !name.is_empty())
            .unwrap_or_else(|| self.configured_name.clone())
    }

    /// Returns the attributes to publish for display.
    ///
    /// Running flag and fan speed reflect optimistic updates.
    #[must_use]
    pub fn attributes(&self) -> Attributes {
        let state = self.state.read();
        let mut attrs = state
            .snapshot
            .as_ref()
            .map(DeviceSnapshot::attributes)
            .unwrap_or_default();

        attrs
            .entry("state".to_string())
            .or_insert_with(|| CleanerState::Unknown.to_string());
        attrs
            .entry("friendly_name".to_string())
            .or_insert_with(|| self.configured_name.clone());
        attrs.insert("is_on".to_string(), state.is_running.to_string());
        if let Some(speed) = state.fan_speed {
            attrs.insert("fan_speed".to_string(), speed.to_string());
        }
        attrs
    }
}

// ========== HTTP Device Entry Point ==========

impl Device<HttpClient> {
    /// Creates a builder for an HTTP device from a host string.
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use hombot_lib::Device;
    ///
    /// # async fn example() -> hombot_lib::Result<()> {
    /// let device = Device::http("192.168.1.40")
    ///     .with_port(6260)
    ///     .build()
    ///     .await?;
    /// # Ok(())
    /// # }
    /// ```
    #[must_use]
    pub fn http(host: impl Into<String>) -> DeviceBuilder {
        DeviceBuilder::new(HttpConfig::new(host))
    }

    /// Creates a builder for an HTTP device from an `HttpConfig`.
    #[must_use]
    pub fn http_config(config: HttpConfig) -> DeviceBuilder {
        DeviceBuilder::new(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ParseError;
    use crate::protocol::mock::{DOCKED, MockProtocol};

    fn device(status: &str) -> Device<MockProtocol> {
        Device::new(MockProtocol::with_status(status), "192.168.1.40", 6260)
    }

    fn sent(device: &Device<MockProtocol>) -> Vec<String> {
        device.protocol.sent.lock().clone()
    }

    #[tokio::test]
    async fn refresh_replaces_snapshot() {
        let device = device(DOCKED);
        assert_eq!(device.state(), CleanerState::Unknown);
        assert_eq!(device.name(), DEFAULT_NAME);

        assert!(device.refresh().await);
        assert_eq!(device.state(), CleanerState::Docked);
        assert_eq!(device.battery_level(), Some(87));
        assert_eq!(device.fan_speed(), Some(FanSpeed::Normal));
        assert_eq!(device.name(), "Bot1");
        assert!(!device.is_running());
    }

    #[tokio::test]
    async fn failed_refresh_keeps_snapshot() {
        let device = device(DOCKED);
        assert!(device.refresh().await);

        *device.protocol.status.lock() = Some(String::new());
        assert!(!device.refresh().await);
        assert_eq!(device.state(), CleanerState::Docked);

        *device.protocol.status.lock() = Some(DOCKED.replace("CHARGING", "SLEEPING"));
        let err = device.try_refresh().await.unwrap_err();
        assert!(matches!(err, Error::Parse(ParseError::UnknownState(_))));
        assert_eq!(device.raw_state(), Some(RawState::Charging));
    }

    #[tokio::test]
    async fn empty_body_without_prior_snapshot() {
        let device = device("");
        assert!(!device.refresh().await);
        assert!(device.snapshot().is_none());
    }

    #[tokio::test]
    async fn turn_on_marks_running() {
        let device = device(DOCKED);
        assert!(device.turn_on().await);
        assert!(device.is_running());
        assert_eq!(sent(&device), vec!["%7B%22COMMAND%22:%22CLEAN_START%22%7D"]);
        // The snapshot itself only changes on refresh.
        assert!(device.snapshot().is_none());
    }

    #[tokio::test]
    async fn pause_and_home_clear_running() {
        let device = device(DOCKED);
        device.turn_on().await;
        assert!(device.pause().await);
        assert!(!device.is_running());

        device.turn_on().await;
        assert!(device.turn_off().await);
        assert!(!device.is_running());
        assert_eq!(
            sent(&device).last().map(String::as_str),
            Some("%7B%22COMMAND%22:%22HOMING%22%7D")
        );
    }

    #[tokio::test]
    async fn stop_pauses() {
        let device = device(DOCKED);
        assert!(device.stop().await);
        assert_eq!(sent(&device), vec!["%7B%22COMMAND%22:%22PAUSE%22%7D"]);
    }

    #[tokio::test]
    async fn start_pause_toggles() {
        let device = device(DOCKED);
        assert!(device.start_pause().await);
        assert!(device.is_running());
        assert!(device.start_pause().await);
        assert!(!device.is_running());
        assert_eq!(
            sent(&device),
            vec![
                "%7B%22COMMAND%22:%22CLEAN_START%22%7D",
                "%7B%22COMMAND%22:%22PAUSE%22%7D"
            ]
        );
    }

    #[tokio::test]
    async fn failed_command_keeps_local_state() {
        let device = device(DOCKED);
        *device.protocol.offline.lock() = true;
        assert!(!device.turn_on().await);
        assert!(!device.is_running());
    }

    #[tokio::test]
    async fn fan_speed_toggles_once() {
        let device = device(DOCKED);
        device.refresh().await;

        assert!(device.set_fan_speed("turbo").await);
        assert_eq!(sent(&device), vec!["turbo"]);
        assert_eq!(device.fan_speed(), Some(FanSpeed::Turbo));

        assert!(device.set_fan_speed("Turbo").await);
        assert_eq!(sent(&device).len(), 1);
    }

    #[tokio::test]
    async fn fan_speed_already_turbo() {
        let device = device(&DOCKED.replace("JSON_TURBO=\"false\"", "JSON_TURBO=\"true\""));
        device.refresh().await;

        assert!(device.set_fan_speed("turbo").await);
        assert!(sent(&device).is_empty());

        assert!(device.set_fan_speed("normal").await);
        assert_eq!(sent(&device), vec!["turbo"]);
    }

    #[tokio::test]
    async fn fan_speed_unknown_name() {
        let device = device(DOCKED);
        device.refresh().await;
        assert!(!device.set_fan_speed("max").await);
        assert!(sent(&device).is_empty());
        assert_eq!(device.fan_speed(), Some(FanSpeed::Normal));
    }

    #[tokio::test]
    async fn fan_speed_before_refresh() {
        let device = device(DOCKED);
        assert!(!device.set_fan_speed("turbo").await);
        assert!(sent(&device).is_empty());
    }

    #[tokio::test]
    async fn fan_speed_toggle_failure() {
        let device = device(DOCKED);
        device.refresh().await;
        *device.protocol.offline.lock() = true;
        assert!(!device.set_fan_speed("turbo").await);
        assert_eq!(device.fan_speed(), Some(FanSpeed::Normal));
    }

    #[tokio::test]
    async fn refresh_overrides_optimistic_flag() {
        let device = device(DOCKED);
        device.turn_on().await;
        assert!(device.is_running());
        device.refresh().await;
        assert!(!device.is_running());
    }

    #[tokio::test]
    async fn refresh_after_command() {
        let mut device = device(DOCKED);
        device.set_refresh_after_command(true);

        assert!(device.turn_on().await);
        // The device still reports CHARGING, which wins over the optimistic flag.
        assert!(!device.is_running());
        assert_eq!(device.state(), CleanerState::Docked);
    }

    #[tokio::test]
    async fn raw_command() {
        let device = device(DOCKED);
        assert!(device.send_raw(r#"{"COMMAND":"CLEAN_SB"}"#).await);
        assert_eq!(sent(&device), vec!["%7B%22COMMAND%22:%22CLEAN_SB%22%7D"]);
    }

    #[tokio::test]
    async fn attributes_before_and_after_refresh() {
        let device = device(DOCKED);
        let attrs = device.attributes();
        assert_eq!(attrs.get("state").map(String::as_str), Some("unknown"));
        assert_eq!(attrs.get("friendly_name").map(String::as_str), Some("Hombot"));

        device.refresh().await;
        device.turn_on().await;
        let attrs = device.attributes();
        assert_eq!(attrs.get("state").map(String::as_str), Some("docked"));
        assert_eq!(attrs.get("is_on").map(String::as_str), Some("true"));
        assert_eq!(attrs.get("JSON_MODE").map(String::as_str), Some("AUTO"));
    }

    #[test]
    fn fan_speed_list() {
        let device = device(DOCKED);
        assert_eq!(device.fan_speed_list(), &[FanSpeed::Normal, FanSpeed::Turbo]);
    }
}
