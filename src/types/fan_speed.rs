// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Fan speed type.
//!
//! The Hombot only knows two suction levels and exposes a single toggle
//! command to switch between them, so setting a speed means comparing the
//! target with the current speed first.
//!
//! # Device Methods
//!
//! Use [`FanSpeed`] with [`set_fan_speed()`](crate::Device::set_fan_speed).

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ValueError;

/// Suction level of the vacuum.
///
/// Parsing is case-insensitive.
///
/// # Examples
///
/// ```
/// use hombot_lib::types::FanSpeed;
///
/// assert_eq!("turbo".parse::<FanSpeed>().unwrap(), FanSpeed::Turbo);
/// assert_eq!("NORMAL".parse::<FanSpeed>().unwrap(), FanSpeed::Normal);
/// assert!("max".parse::<FanSpeed>().is_err());
///
/// assert_eq!(FanSpeed::from_turbo_flag("true"), FanSpeed::Turbo);
/// assert_eq!(FanSpeed::from_turbo_flag("false"), FanSpeed::Normal);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum FanSpeed {
    /// Regular suction.
    #[default]
    Normal,
    /// Boosted suction.
    Turbo,
}

impl FanSpeed {
    /// All supported speeds, in display order.
    pub const ALL: [Self; 2] = [Self::Normal, Self::Turbo];

    /// Returns the display name.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Normal => "Normal",
            Self::Turbo => "Turbo",
        }
    }

    /// Interprets the `JSON_TURBO` status value.
    ///
    /// Only the literal `true` means turbo.
    #[must_use]
    pub fn from_turbo_flag(flag: &str) -> Self {
        if flag == "true" {
            Self::Turbo
        } else {
            Self::Normal
        }
    }

    /// Returns the other speed.
    #[must_use]
    pub const fn toggled(&self) -> Self {
        match self {
            Self::Normal => Self::Turbo,
            Self::Turbo => Self::Normal,
        }
    }
}

impl fmt::Display for FanSpeed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FanSpeed {
    type Err = ValueError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|speed| speed.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| ValueError::InvalidFanSpeed(s.to_string()))
    }
}
