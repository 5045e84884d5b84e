// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Error types for the `hombot_lib` library.
//!
//! Failures fall into three families:
//!
//! - [`ProtocolError`]: the HTTP exchange itself failed (timeout, connection
//!   refused, empty body). The session recovers locally from these.
//! - [`ParseError`]: the status payload was malformed or reported a state the
//!   library does not know. Only the current refresh cycle fails.
//! - [`ValueError`]: a caller-supplied value could not be converted.

use thiserror::Error;

/// The main error type for this library.
#[derive(Debug, Error)]
pub enum Error {
    /// Error occurred during value validation.
    #[error("value error: {0}")]
    Value(#[from] ValueError),

    /// Error occurred during protocol communication.
    #[error("protocol error: {0}")]
    Protocol(#[from] ProtocolError),

    /// Error occurred while parsing a status payload.
    #[error("parse error: {0}")]
    Parse(#[from] ParseError),

    /// Error occurred while loading or saving configuration entries.
    #[error("config error: {0}")]
    Config(#[from] ConfigError),
}

/// Errors related to caller-supplied values.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValueError {
    /// The fan speed name is not one the device supports.
    #[error("no such fan speed available: {0}")]
    InvalidFanSpeed(String),

    /// The port could not be parsed.
    #[error("invalid port: {0}")]
    InvalidPort(String),
}

/// Errors related to the HTTP exchange with the vacuum.
#[derive(Debug, Error)]
pub enum ProtocolError {
    /// HTTP request failed.
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// Connection to the device failed or it answered with an error status.
    #[error("connection failed: {0}")]
    ConnectionFailed(String),

    /// Request timed out.
    #[error("request timed out after {0} ms")]
    Timeout(u64),

    /// Invalid host or port.
    #[error("invalid address: {0}")]
    InvalidAddress(String),

    /// The device answered with an empty status body.
    #[error("device returned an empty response")]
    EmptyResponse,
}

/// Errors related to parsing the `status.txt` payload.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ParseError {
    /// A required key is missing from the payload.
    #[error("missing field in status: {0}")]
    MissingField(String),

    /// A field is present but its value cannot be used.
    #[error("failed to parse {field}: {message}")]
    InvalidValue {
        /// The key that failed to parse.
        field: String,
        /// Description of the parsing failure.
        message: String,
    },

    /// The device reported a state token outside the known vocabulary.
    #[error("unknown robot state: {0}")]
    UnknownState(String),
}

impl ParseError {
    /// Returns true for errors caused by a missing or unparsable field.
    #[must_use]
    pub fn is_malformed(&self) -> bool {
        matches!(self, Self::MissingField(_) | Self::InvalidValue { .. })
    }
}

/// Errors related to persisting configuration entries.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Reading or writing the backing file failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The stored configuration is not valid JSON.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// A specialized Result type for this library.
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn value_error_display() {
        let err = ValueError::InvalidFanSpeed("max".to_string());
        assert_eq!(err.to_string(), "no such fan speed available: max");
    }

    #[test]
    fn error_from_parse_error() {
        let parse_err = ParseError::UnknownState("SLEEPING".to_string());
        let err: Error = parse_err.into();
        assert!(matches!(err, Error::Parse(ParseError::UnknownState(ref s)) if s == "SLEEPING"));
    }

    #[test]
    fn parse_error_display() {
        let err = ParseError::MissingField("JSON_BATTPERC".to_string());
        assert_eq!(err.to_string(), "missing field in status: JSON_BATTPERC");
    }

    #[test]
    fn malformed_classification() {
        assert!(ParseError::MissingField("JSON_MODE".into()).is_malformed());
        assert!(
            ParseError::InvalidValue {
                field: "JSON_BATTPERC".into(),
                message: "not a number".into(),
            }
            .is_malformed()
        );
        assert!(!ParseError::UnknownState("X".into()).is_malformed());
    }

    #[test]
    fn protocol_error_display() {
        assert_eq!(
            ProtocolError::Timeout(10_000).to_string(),
            "request timed out after 10000 ms"
        );
        assert_eq!(
            ProtocolError::EmptyResponse.to_string(),
            "device returned an empty response"
        );
    }
}
