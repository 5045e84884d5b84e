// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Transport layer for talking to the vacuum.
//!
//! The Hombot exposes two plain HTTP endpoints:
//!
//! - `GET /json.cgi?<query>` accepts a command; the body of the answer is
//!   meaningless, the exchange completing is the acknowledgement.
//! - `GET /status.txt` returns the status payload.
//!
//! [`HttpClient`] implements both on top of `reqwest`. The [`Protocol`] trait
//! lets [`Device`](crate::Device) run against other transports, which is how
//! the unit tests drive it.

mod http;
#[cfg(test)]
pub(crate) mod mock;

use std::future::Future;

pub use http::{HttpClient, HttpConfig};

use crate::error::ProtocolError;

/// A transport able to reach one vacuum.
pub trait Protocol {
    /// Sends an already encoded command query to `json.cgi`.
    ///
    /// # Errors
    ///
    /// Returns `ProtocolError` if the exchange does not complete.
    fn send_query(&self, query: &str) -> impl Future<Output = Result<(), ProtocolError>> + Send;

    /// Fetches the raw `status.txt` body.
    ///
    /// # Errors
    ///
    /// Returns `ProtocolError` if the exchange fails or the body is empty.
    fn fetch_status(&self) -> impl Future<Output = Result<String, ProtocolError>> + Send;
}
