// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Status payload parsing.
//!
//! The vacuum serves its status at `GET /status.txt` as plain text, one
//! `KEY="VALUE"` pair per line:
//!
//! ```text
//! JSON_ROBOT_STATE="CHARGING"
//! JSON_BATTPERC="87"
//! JSON_TURBO="false"
//! JSON_NICKNAME="Bot1"
//! JSON_MODE="ZZ"
//! JSON_REPEAT="false"
//! CLREC_LAST_CLEAN="2016/12/02/17/55/37.520207"
//! ```
//!
//! [`parse_status`] turns such a payload into a
//! [`DeviceSnapshot`](crate::state::DeviceSnapshot).

mod status_parser;

pub use status_parser::{
    KEY_BATTERY, KEY_NICKNAME, KEY_ROBOT_STATE, KEY_TURBO, StatusPayload, parse_status,
};
