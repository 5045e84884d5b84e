// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Point-in-time status of a vacuum.

use std::collections::BTreeMap;

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

use crate::types::{CleanerState, FanSpeed, RawState};

/// Named attributes handed to a display sink.
pub type Attributes = BTreeMap<String, String>;

/// Attribute key for the cleaning mode.
pub const ATTR_MODE: &str = "JSON_MODE";
/// Attribute key for the repeat setting.
pub const ATTR_REPEAT: &str = "JSON_REPEAT";
/// Attribute key for the last cleaning run.
pub const ATTR_LAST_CLEAN: &str = "CLREC_LAST_CLEAN";

/// Normalized view of one `status.txt` payload.
///
/// A snapshot is never patched; each successful refresh produces a new one.
///
/// # Examples
///
/// ```
/// use hombot_lib::telemetry::parse_status;
/// use hombot_lib::types::{CleanerState, FanSpeed};
///
/// let payload = "JSON_ROBOT_STATE=\"WORKING\"\n\
///                JSON_BATTPERC=\"55\"\n\
///                JSON_TURBO=\"true\"\n\
///                JSON_NICKNAME=\"Hombot\"\n\
///                JSON_MODE=\"ZZ\"\n\
///                JSON_REPEAT=\"false\"\n\
///                CLREC_LAST_CLEAN=\"2016/12/02/17/55/37.520207\"";
///
/// let snapshot = parse_status(payload).unwrap();
/// assert_eq!(snapshot.state, CleanerState::Cleaning);
/// assert_eq!(snapshot.fan_speed, FanSpeed::Turbo);
/// assert!(snapshot.is_running);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeviceSnapshot {
    /// Normalized state.
    pub state: CleanerState,
    /// State token as reported.
    pub raw_state: RawState,
    /// Battery level (0-100).
    pub battery_percent: u8,
    /// Whether the vacuum is actively cleaning.
    pub is_running: bool,
    /// Current suction level.
    pub fan_speed: FanSpeed,
    /// Nickname configured on the device.
    pub name: String,
    /// Cleaning mode (e.g. `ZZ`, `SB`, `SPOT`).
    pub mode: String,
    /// Repeat setting.
    pub repeat: String,
    /// Timestamp of the last cleaning run, as reported.
    pub last_clean: String,
}

impl DeviceSnapshot {
    /// Builds the display attributes for this snapshot.
    ///
    /// The pass-through keys keep the device's own names.
    #[must_use]
    pub fn attributes(&self) -> Attributes {
        let mut attrs = Attributes::new();
        attrs.insert("state".to_string(), self.state.to_string());
        attrs.insert("raw_state".to_string(), self.raw_state.to_string());
        attrs.insert("battery_level".to_string(), self.battery_percent.to_string());
        attrs.insert("fan_speed".to_string(), self.fan_speed.to_string());
        attrs.insert("is_on".to_string(), self.is_running.to_string());
        attrs.insert("friendly_name".to_string(), self.name.clone());
        attrs.insert(ATTR_MODE.to_string(), self.mode.clone());
        attrs.insert(ATTR_REPEAT.to_string(), self.repeat.clone());
        attrs.insert(ATTR_LAST_CLEAN.to_string(), self.last_clean.clone());
        attrs
    }

    /// Parses [`last_clean`](Self::last_clean) when it uses a known layout.
    ///
    /// Firmware reports `YYYY/MM/DD/HH/MM/SS` with optional microseconds;
    /// plain `YYYY-MM-DD` dates are read as midnight. Anything else yields
    /// `None`.
    #[must_use]
    pub fn last_clean_time(&self) -> Option<NaiveDateTime> {
        let raw = self.last_clean.trim();
        NaiveDateTime::parse_from_str(raw, "%Y/%m/%d/%H/%M/%S%.f")
            .or_else(|_| NaiveDateTime::parse_from_str(raw, "%Y/%m/%d/%H/%M/%S"))
            .ok()
            .or_else(|| {
                NaiveDate::parse_from_str(raw, "%Y-%m-%d")
                    .ok()
                    .and_then(|date| date.and_hms_opt(0, 0, 0))
            })
    }
}

#[cfg(test)]
mod tests {
    use chrono::{Datelike, Timelike};

    use super::*;

    fn snapshot(last_clean: &str) -> DeviceSnapshot {
        DeviceSnapshot {
            state: CleanerState::Docked,
            raw_state: RawState::Charging,
            battery_percent: 87,
            is_running: false,
            fan_speed: FanSpeed::Normal,
            name: "Bot1".to_string(),
            mode: "AUTO".to_string(),
            repeat: "0".to_string(),
            last_clean: last_clean.to_string(),
        }
    }

    #[test]
    fn attributes_carry_passthrough_keys() {
        let attrs = snapshot("2024-01-01").attributes();
        assert_eq!(attrs.get(ATTR_MODE).map(String::as_str), Some("AUTO"));
        assert_eq!(attrs.get(ATTR_REPEAT).map(String::as_str), Some("0"));
        assert_eq!(
            attrs.get(ATTR_LAST_CLEAN).map(String::as_str),
            Some("2024-01-01")
        );
        assert_eq!(attrs.get("state").map(String::as_str), Some("docked"));
        assert_eq!(attrs.get("battery_level").map(String::as_str), Some("87"));
    }

    #[test]
    fn last_clean_device_layout() {
        let time = snapshot("2016/12/02/17/55/37.520207")
            .last_clean_time()
            .unwrap();
        assert_eq!((time.year(), time.month(), time.day()), (2016, 12, 2));
        assert_eq!((time.hour(), time.minute(), time.second()), (17, 55, 37));
    }

    #[test]
    fn last_clean_without_fraction() {
        let time = snapshot("2016/12/02/17/55/37").last_clean_time().unwrap();
        assert_eq!(time.second(), 37);
    }

    #[test]
    fn last_clean_date_only() {
        let time = snapshot("2024-01-01").last_clean_time().unwrap();
        assert_eq!((time.year(), time.hour()), (2024, 0));
    }

    #[test]
    fn last_clean_unparsable() {
        assert!(snapshot("never").last_clean_time().is_none());
        assert!(snapshot("").last_clean_time().is_none());
    }
}
