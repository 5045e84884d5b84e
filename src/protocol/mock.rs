// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! In-memory transport for unit tests.

use parking_lot::Mutex;

use crate::error::ProtocolError;
use crate::protocol::Protocol;

/// Records sent queries and serves a fixed status body.
#[derive(Debug, Default)]
pub(crate) struct MockProtocol {
    pub(crate) sent: Mutex<Vec<String>>,
    pub(crate) status: Mutex<Option<String>>,
    pub(crate) offline: Mutex<bool>,
    pub(crate) status_requests: Mutex<usize>,
}

impl MockProtocol {
    pub(crate) fn with_status(body: &str) -> Self {
        let mock = Self::default();
        *mock.status.lock() = Some(body.to_string());
        mock
    }
}

impl Protocol for MockProtocol {
    async fn send_query(&self, query: &str) -> Result<(), ProtocolError> {
        if *self.offline.lock() {
            return Err(ProtocolError::Timeout(10_000));
        }
        self.sent.lock().push(query.to_string());
        Ok(())
    }

    async fn fetch_status(&self) -> Result<String, ProtocolError> {
        *self.status_requests.lock() += 1;
        if *self.offline.lock() {
            return Err(ProtocolError::Timeout(10_000));
        }
        let status = self.status.lock().clone();
        match status {
            Some(body) if !body.is_empty() => Ok(body),
            Some(_) => Err(ProtocolError::EmptyResponse),
            None => Err(ProtocolError::ConnectionFailed("connection refused".to_string())),
        }
    }
}

/// Status of a docked vacuum.
pub(crate) const DOCKED: &str = "JSON_ROBOT_STATE=\"CHARGING\"\n\
                                 JSON_BATTPERC=\"87\"\n\
                                 JSON_TURBO=\"false\"\n\
                                 JSON_NICKNAME=\"Bot1\"\n\
                                 JSON_MODE=\"AUTO\"\n\
                                 JSON_REPEAT=\"0\"\n\
                                 CLREC_LAST_CLEAN=\"2024-01-01\"";
