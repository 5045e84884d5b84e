// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Value types for Hombot control.
//!
//! # Types
//!
//! - [`RawState`] - State token as reported by the device
//! - [`CleanerState`] - Normalized vacuum state
//! - [`FanSpeed`] - Normal or turbo suction

mod fan_speed;
mod state;

pub use fan_speed::FanSpeed;
pub use state::{CleanerState, RawState};
