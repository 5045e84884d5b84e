// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Parser for the Hombot `status.txt` payload.

use std::collections::HashMap;

use crate::error::ParseError;
use crate::state::{ATTR_LAST_CLEAN, ATTR_MODE, ATTR_REPEAT, DeviceSnapshot};
use crate::types::{FanSpeed, RawState};

/// Status key holding the robot state token.
pub const KEY_ROBOT_STATE: &str = "JSON_ROBOT_STATE";
/// Status key holding the battery percentage.
pub const KEY_BATTERY: &str = "JSON_BATTPERC";
/// Status key holding the turbo flag.
pub const KEY_TURBO: &str = "JSON_TURBO";
/// Status key holding the device nickname.
pub const KEY_NICKNAME: &str = "JSON_NICKNAME";

/// Raw key/value pairs of a `status.txt` payload.
///
/// Each line is `KEY=VALUE`, split at the first `=`. Surrounding double
/// quotes are stripped from values. Lines without `=` are skipped and a
/// repeated key keeps its last value.
///
/// # Examples
///
/// ```
/// use hombot_lib::telemetry::StatusPayload;
///
/// let payload = StatusPayload::parse("JSON_MODE=\"ZZ\"\nJSON_VERSION=\"a=b\"");
/// assert_eq!(payload.get("JSON_MODE"), Some("ZZ"));
/// assert_eq!(payload.get("JSON_VERSION"), Some("a=b"));
/// assert_eq!(payload.get("JSON_TURBO"), None);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StatusPayload {
    fields: HashMap<String, String>,
}

impl StatusPayload {
    /// Splits a payload into its key/value pairs.
    #[must_use]
    pub fn parse(text: &str) -> Self {
        let fields = text
            .lines()
            .filter_map(|line| line.split_once('='))
            .map(|(key, value)| (key.trim().to_string(), value.trim_matches('"').to_string()))
            .collect();
        Self { fields }
    }

    /// Returns the value for a key.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&str> {
        self.fields.get(key).map(String::as_str)
    }

    /// Returns the value for a required key.
    ///
    /// # Errors
    ///
    /// Returns `ParseError::MissingField` if the key is absent.
    pub fn require(&self, key: &str) -> Result<&str, ParseError> {
        self.get(key)
            .ok_or_else(|| ParseError::MissingField(key.to_string()))
    }

    /// Returns the number of keys.
    #[must_use]
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Returns true if no key was found.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

/// Parses a `status.txt` payload into a snapshot.
///
/// Unknown keys are ignored.
///
/// # Errors
///
/// - `ParseError::MissingField` if one of the required keys is absent
/// - `ParseError::InvalidValue` if the battery level is not a number in 0-100
/// - `ParseError::UnknownState` if the robot state token is not recognized
pub fn parse_status(text: &str) -> Result<DeviceSnapshot, ParseError> {
    let payload = StatusPayload::parse(text);

    let raw_token = payload.require(KEY_ROBOT_STATE)?;
    let battery = payload.require(KEY_BATTERY)?;
    let name = payload.require(KEY_NICKNAME)?;
    let turbo = payload.require(KEY_TURBO)?;
    let mode = payload.require(ATTR_MODE)?;
    let repeat = payload.require(ATTR_REPEAT)?;
    let last_clean = payload.require(ATTR_LAST_CLEAN)?;

    let raw_state: RawState = raw_token.parse()?;
    let battery_percent = parse_battery(battery)?;

    Ok(DeviceSnapshot {
        state: raw_state.normalized(),
        raw_state,
        battery_percent,
        is_running: raw_state.is_running(),
        fan_speed: FanSpeed::from_turbo_flag(turbo),
        name: name.to_string(),
        mode: mode.to_string(),
        repeat: repeat.to_string(),
        last_clean: last_clean.to_string(),
    })
}

fn parse_battery(value: &str) -> Result<u8, ParseError> {
    let invalid = |message: String| ParseError::InvalidValue {
        field: KEY_BATTERY.to_string(),
        message,
    };

    let level: u8 = value
        .trim()
        .parse()
        .map_err(|e| invalid(format!("'{value}' is not a percentage: {e}")))?;

    if level > 100 {
        return Err(invalid(format!("{level} is out of range [0, 100]")));
    }
    Ok(level)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::CleanerState;

    const CHARGING: &str = "JSON_ROBOT_STATE=\"CHARGING\"\n\
                            JSON_BATTPERC=\"87\"\n\
                            JSON_TURBO=\"false\"\n\
                            JSON_NICKNAME=\"Bot1\"\n\
                            JSON_MODE=\"AUTO\"\n\
                            JSON_REPEAT=\"0\"\n\
                            CLREC_LAST_CLEAN=\"2024-01-01\"";

    fn with_state(token: &str) -> String {
        CHARGING.replace("CHARGING", token)
    }

    #[test]
    fn parse_charging_payload() {
        let snapshot = parse_status(CHARGING).unwrap();
        assert_eq!(snapshot.state, CleanerState::Docked);
        assert_eq!(snapshot.raw_state, RawState::Charging);
        assert_eq!(snapshot.battery_percent, 87);
        assert_eq!(snapshot.fan_speed, FanSpeed::Normal);
        assert!(!snapshot.is_running);
        assert_eq!(snapshot.name, "Bot1");
        assert_eq!(snapshot.mode, "AUTO");
        assert_eq!(snapshot.repeat, "0");
        assert_eq!(snapshot.last_clean, "2024-01-01");
    }

    #[test]
    fn parse_is_pure() {
        assert_eq!(parse_status(CHARGING), parse_status(CHARGING));
    }

    #[test]
    fn every_known_state_maps() {
        for raw in RawState::ALL {
            let snapshot = parse_status(&with_state(raw.as_str())).unwrap();
            assert_eq!(snapshot.raw_state, raw);
            assert_eq!(snapshot.state, raw.normalized());
            assert_eq!(
                snapshot.is_running,
                matches!(raw, RawState::Working | RawState::BackmovingInit)
            );
        }
    }

    #[test]
    fn unknown_state_is_rejected() {
        let err = parse_status(&with_state("SLEEPING")).unwrap_err();
        assert_eq!(err, ParseError::UnknownState("SLEEPING".to_string()));
    }

    #[test]
    fn missing_required_key() {
        let text: String = CHARGING
            .lines()
            .filter(|line| !line.starts_with("JSON_MODE"))
            .collect::<Vec<_>>()
            .join("\n");
        assert_eq!(
            parse_status(&text).unwrap_err(),
            ParseError::MissingField("JSON_MODE".to_string())
        );
    }

    #[test]
    fn non_numeric_battery() {
        let text = CHARGING.replace("\"87\"", "\"full\"");
        let err = parse_status(&text).unwrap_err();
        assert!(err.is_malformed());
        assert!(matches!(err, ParseError::InvalidValue { ref field, .. } if field == KEY_BATTERY));
    }

    #[test]
    fn battery_over_hundred() {
        let text = CHARGING.replace("\"87\"", "\"140\"");
        assert!(parse_status(&text).unwrap_err().is_malformed());
    }

    #[test]
    fn turbo_flag() {
        let text = CHARGING.replace("JSON_TURBO=\"false\"", "JSON_TURBO=\"true\"");
        assert_eq!(parse_status(&text).unwrap().fan_speed, FanSpeed::Turbo);
    }

    #[test]
    fn unknown_keys_and_noise_ignored() {
        let text = format!("JSON_VERSION=\"16552\"\n\nnot a pair\r\n{CHARGING}\r\nLAST_CLEAN_MIN=\"12\"");
        let snapshot = parse_status(&text).unwrap();
        assert_eq!(snapshot.state, CleanerState::Docked);
    }

    #[test]
    fn crlf_line_endings() {
        let text = CHARGING.replace('\n', "\r\n");
        assert_eq!(parse_status(&text).unwrap().last_clean, "2024-01-01");
    }

    #[test]
    fn unquoted_values() {
        let text = CHARGING.replace('"', "");
        assert_eq!(parse_status(&text).unwrap().battery_percent, 87);
    }

    #[test]
    fn value_split_at_first_equals() {
        let payload = StatusPayload::parse("KEY=\"a=b=c\"");
        assert_eq!(payload.get("KEY"), Some("a=b=c"));
        assert_eq!(payload.len(), 1);
    }

    #[test]
    fn last_duplicate_wins() {
        let payload = StatusPayload::parse("JSON_MODE=\"ZZ\"\nJSON_MODE=\"SB\"");
        assert_eq!(payload.get("JSON_MODE"), Some("SB"));
    }

    #[test]
    fn empty_payload() {
        assert!(StatusPayload::parse("").is_empty());
        assert_eq!(
            parse_status("").unwrap_err(),
            ParseError::MissingField(KEY_ROBOT_STATE.to_string())
        );
    }
}
