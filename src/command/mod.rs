// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Hombot command definitions.
//!
//! Commands are sent as the query component of `GET /json.cgi?<query>`.
//! Most commands are a compact JSON object naming the action:
//!
//! | Command | Query before encoding |
//! |---------|-----------------------|
//! | [`VacuumCommand::Start`] | `{"COMMAND":"CLEAN_START"}` |
//! | [`VacuumCommand::Pause`] | `{"COMMAND":"PAUSE"}` |
//! | [`VacuumCommand::Home`] | `{"COMMAND":"HOMING"}` |
//! | [`VacuumCommand::ToggleTurbo`] | `turbo` |
//!
//! The query is percent-encoded with `:` left as is.
//!
//! # Examples
//!
//! ```
//! use hombot_lib::command::{build_command_query, Command, VacuumCommand};
//!
//! assert_eq!(VacuumCommand::Start.query(), r#"{"COMMAND":"CLEAN_START"}"#);
//! assert_eq!(
//!     build_command_query(&VacuumCommand::Start),
//!     "%7B%22COMMAND%22:%22CLEAN_START%22%7D"
//! );
//! ```

use std::fmt;

/// A command that can be sent to the vacuum.
pub trait Command {
    /// Returns the query string before URL encoding.
    fn query(&self) -> String;

    /// Returns the query ready to append after `json.cgi?`.
    fn encoded_query(&self) -> String {
        encode_query(&self.query())
    }
}

/// The closed set of commands the session issues itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum VacuumCommand {
    /// Start a cleaning run.
    Start,
    /// Pause the current run.
    Pause,
    /// Return to the dock.
    Home,
    /// Switch between normal and turbo suction.
    ToggleTurbo,
}

impl VacuumCommand {
    /// Returns the value of the `COMMAND` key, if this is a JSON command.
    #[must_use]
    pub const fn command_name(&self) -> Option<&'static str> {
        match self {
            Self::Start => Some("CLEAN_START"),
            Self::Pause => Some("PAUSE"),
            Self::Home => Some("HOMING"),
            Self::ToggleTurbo => None,
        }
    }
}

impl Command for VacuumCommand {
    fn query(&self) -> String {
        match self.command_name() {
            Some(name) => serde_json::json!({ "COMMAND": name }).to_string(),
            None => "turbo".to_string(),
        }
    }
}

impl fmt::Display for VacuumCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.command_name().unwrap_or("TURBO_TOGGLE"))
    }
}

/// An arbitrary query passed through unchanged apart from encoding.
///
/// # Examples
///
/// ```
/// use hombot_lib::command::{Command, RawCommand};
///
/// let cmd = RawCommand::new(r#"{"COMMAND":"CLEAN_SB"}"#);
/// assert_eq!(cmd.encoded_query(), "%7B%22COMMAND%22:%22CLEAN_SB%22%7D");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawCommand(String);

impl RawCommand {
    /// Wraps a raw query.
    #[must_use]
    pub fn new(query: impl Into<String>) -> Self {
        Self(query.into())
    }
}

impl Command for RawCommand {
    fn query(&self) -> String {
        self.0.clone()
    }
}

/// Renders a command as the encoded `json.cgi` query.
#[must_use]
pub fn build_command_query(command: &VacuumCommand) -> String {
    command.encoded_query()
}

/// Percent-encodes everything except unreserved characters and `:`.
fn encode_query(query: &str) -> String {
    query
        .split(':')
        .map(|part| urlencoding::encode(part).into_owned())
        .collect::<Vec<_>>()
        .join(":")
}
