// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! `hombot_lib` - A Rust library to control LG Hombot robot vacuums.
//!
//! The Hombot's Wi-Fi module exposes a small plain-text HTTP interface. This
//! library translates it into typed commands and a normalized status
//! snapshot.
//!
//! # Supported Features
//!
//! - **Cleaning control**: start, pause, return to dock
//! - **Fan speed**: normal and turbo suction
//! - **Status polling**: state, battery, fan speed, cleaning mode
//! - **Host integration**: config entries, periodic polling, attribute sinks
//!
//! # Quick Start
//!
//! ```no_run
//! use hombot_lib::{CleanerState, Device};
//!
//! #[tokio::main]
//! async fn main() -> hombot_lib::Result<()> {
//!     // Connects and fetches the first status
//!     let device = Device::http("192.168.1.40").build().await?;
//!
//!     if device.state() == CleanerState::Docked {
//!         device.turn_on().await;
//!     }
//!
//!     // Later, from a scheduler
//!     if device.refresh().await {
//!         println!("battery: {:?}%", device.battery_level());
//!     }
//!
//!     Ok(())
//! }
//! ```
//!
//! # Error Handling
//!
//! Device operations report a plain `bool` and log failures with `tracing`;
//! the last known status stays available after a failed refresh. The
//! `try_*` variants ([`Device::try_refresh`], [`Device::try_send_command`])
//! return the typed [`Error`] instead.

pub mod command;
mod device;
pub mod error;
pub mod integration;
pub mod protocol;
pub mod state;
pub mod telemetry;
pub mod types;

pub use command::{Command, RawCommand, VacuumCommand, build_command_query};
pub use device::{DEFAULT_NAME, Device, DeviceBuilder};
pub use error::{ConfigError, Error, ParseError, ProtocolError, Result, ValueError};
pub use protocol::{HttpClient, HttpConfig, Protocol};
pub use state::{Attributes, DeviceSnapshot};
pub use telemetry::parse_status;
pub use types::{CleanerState, FanSpeed, RawState};
