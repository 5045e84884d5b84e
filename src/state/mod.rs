// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Device status types.
//!
//! [`DeviceSnapshot`] is the normalized result of one status poll, and
//! [`Attributes`] is its flattened form for display sinks.

mod snapshot;

pub use snapshot::{ATTR_LAST_CLEAN, ATTR_MODE, ATTR_REPEAT, Attributes, DeviceSnapshot};
