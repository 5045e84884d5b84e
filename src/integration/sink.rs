// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Attribute sinks.

use tokio::sync::watch;

use crate::state::Attributes;

use super::EntryId;

/// Receives the attributes of a vacuum after each successful refresh.
///
/// Implemented for closures and for `watch::Sender<Attributes>`:
///
/// ```
/// use hombot_lib::integration::{AttributeSink, EntryId};
/// use hombot_lib::state::Attributes;
///
/// let sink = |id: EntryId, name: &str, attrs: &Attributes| {
///     println!("{id} {name}: {attrs:?}");
/// };
/// sink.publish(EntryId::new(), "Hombot", &Attributes::new());
/// ```
pub trait AttributeSink: Send + Sync {
    /// Publishes the current attributes of a device.
    fn publish(&self, entry: EntryId, name: &str, attributes: &Attributes);
}

impl<F> AttributeSink for F
where
    F: Fn(EntryId, &str, &Attributes) + Send + Sync,
{
    fn publish(&self, entry: EntryId, name: &str, attributes: &Attributes) {
        self(entry, name, attributes);
    }
}

impl AttributeSink for watch::Sender<Attributes> {
    fn publish(&self, _entry: EntryId, _name: &str, attributes: &Attributes) {
        self.send_replace(attributes.clone());
    }
}
