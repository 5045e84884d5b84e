// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Robot state types.
//!
//! The vacuum reports its activity as one of a fixed set of tokens in the
//! `JSON_ROBOT_STATE` status key. [`RawState`] is that vocabulary, and
//! [`CleanerState`] is the normalized state exposed to callers.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ParseError;

/// State token as reported by the device.
///
/// # Examples
///
/// ```
/// use hombot_lib::types::{CleanerState, RawState};
///
/// let raw: RawState = "CHARGING".parse().unwrap();
/// assert_eq!(raw.normalized(), CleanerState::Docked);
/// assert!(!raw.is_running());
///
/// assert!("SLEEPING".parse::<RawState>().is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RawState {
    /// Waiting for a command away from the dock.
    Standby,
    /// Cleaning.
    Working,
    /// Backing off the dock at the start of a cleaning run.
    BackmovingInit,
    /// Driving back to the dock.
    Homing,
    /// Sitting on the dock.
    Charging,
    /// Final approach onto the dock.
    Docking,
    /// Stuck or faulted.
    Error,
    /// Cleaning run paused.
    Pause,
}

impl RawState {
    /// All tokens the device is known to report.
    pub const ALL: [Self; 8] = [
        Self::Standby,
        Self::Working,
        Self::BackmovingInit,
        Self::Homing,
        Self::Charging,
        Self::Docking,
        Self::Error,
        Self::Pause,
    ];

    /// Returns the token exactly as the device spells it.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Standby => "STANDBY",
            Self::Working => "WORKING",
            Self::BackmovingInit => "BACKMOVING_INIT",
            Self::Homing => "HOMING",
            Self::Charging => "CHARGING",
            Self::Docking => "DOCKING",
            Self::Error => "ERROR",
            Self::Pause => "PAUSE",
        }
    }

    /// Maps the device token onto the normalized state.
    #[must_use]
    pub const fn normalized(&self) -> CleanerState {
        match self {
            Self::Standby => CleanerState::Idle,
            Self::Working | Self::BackmovingInit => CleanerState::Cleaning,
            Self::Homing | Self::Docking => CleanerState::ReturningHome,
            Self::Charging => CleanerState::Docked,
            Self::Error => CleanerState::Error,
            Self::Pause => CleanerState::Paused,
        }
    }

    /// Returns whether the vacuum is actively cleaning in this state.
    #[must_use]
    pub const fn is_running(&self) -> bool {
        matches!(self, Self::Working | Self::BackmovingInit)
    }
}

impl fmt::Display for RawState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RawState {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|state| state.as_str() == s)
            .ok_or_else(|| ParseError::UnknownState(s.to_string()))
    }
}

/// Normalized vacuum state.
///
/// `Unknown` is only reported by a session that has not completed a refresh
/// yet; [`RawState::normalized`] never produces it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CleanerState {
    /// Not cleaning, not docked.
    Idle,
    /// Cleaning.
    Cleaning,
    /// On the way back to the dock.
    ReturningHome,
    /// On the dock.
    Docked,
    /// Faulted.
    Error,
    /// Cleaning paused.
    Paused,
    /// No status received yet.
    #[default]
    Unknown,
}

impl CleanerState {
    /// Returns the lowercase name used in exported attributes.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::Cleaning => "cleaning",
            Self::ReturningHome => "returning",
            Self::Docked => "docked",
            Self::Error => "error",
            Self::Paused => "paused",
            Self::Unknown => "unknown",
        }
    }
}

impl fmt::Display for CleanerState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn state_table() {
        let table = [
            ("STANDBY", CleanerState::Idle),
            ("WORKING", CleanerState::Cleaning),
            ("BACKMOVING_INIT", CleanerState::Cleaning),
            ("HOMING", CleanerState::ReturningHome),
            ("CHARGING", CleanerState::Docked),
            ("DOCKING", CleanerState::ReturningHome),
            ("ERROR", CleanerState::Error),
            ("PAUSE", CleanerState::Paused),
        ];

        for (token, expected) in table {
            let raw: RawState = token.parse().unwrap();
            assert_eq!(raw.normalized(), expected, "token {token}");
            assert_eq!(raw.as_str(), token);
        }
    }

    #[test]
    fn unknown_token_is_an_error() {
        let err = "SLEEPING".parse::<RawState>().unwrap_err();
        assert_eq!(err, ParseError::UnknownState("SLEEPING".to_string()));
    }

    #[test]
    fn tokens_are_case_sensitive() {
        assert!("charging".parse::<RawState>().is_err());
    }

    #[test]
    fn running_only_while_cleaning() {
        for raw in RawState::ALL {
            let expected = matches!(raw, RawState::Working | RawState::BackmovingInit);
            assert_eq!(raw.is_running(), expected, "{raw}");
        }
    }

    #[test]
    fn normalized_never_unknown() {
        assert!(
            RawState::ALL
                .iter()
                .all(|raw| raw.normalized() != CleanerState::Unknown)
        );
    }

    #[test]
    fn serde_uses_device_spelling() {
        let json = serde_json::to_string(&RawState::BackmovingInit).unwrap();
        assert_eq!(json, "\"BACKMOVING_INIT\"");
    }
}
