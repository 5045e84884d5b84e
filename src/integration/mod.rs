// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Glue for hosting a vacuum inside a home-automation framework.
//!
//! The host framework owns configuration, scheduling and display. This
//! module only defines the narrow interfaces the library needs from it:
//!
//! - [`ConfigStore`]: durable storage of [`ConfigEntry`] values
//! - [`AttributeSink`]: where refreshed attributes are published
//! - [`spawn_poller`]: a periodic refresh task
//!
//! [`setup_entry`] wires them together for one entry: it creates the
//! session, performs a first refresh and starts polling. The returned
//! [`EntryHandle`] keeps the session alive until it is unloaded.
//!
//! # Examples
//!
//! ```no_run
//! use std::sync::Arc;
//!
//! use hombot_lib::integration::{
//!     AttributeSink, ConfigEntry, ConfigStore, EntryId, JsonFileConfigStore, setup_entry,
//! };
//! use hombot_lib::state::Attributes;
//!
//! # async fn example() -> hombot_lib::Result<()> {
//! let store = JsonFileConfigStore::new("/var/lib/hombot/config.json");
//! let entry = ConfigEntry::new("192.168.1.40");
//! store.save(&entry)?;
//!
//! let sink: Arc<dyn AttributeSink> = Arc::new(|id: EntryId, name: &str, attrs: &Attributes| {
//!     println!("{id} {name}: {attrs:?}");
//! });
//!
//! let handle = setup_entry(&entry, sink).await?;
//! handle.device().turn_on().await;
//!
//! handle.unload();
//! # Ok(())
//! # }
//! ```

mod config_entry;
mod entry_id;
mod poller;
mod sink;
mod store;

use std::sync::Arc;
use std::time::Duration;

pub use config_entry::{ConfigEntry, DEFAULT_SCAN_INTERVAL_SECS};
pub use entry_id::EntryId;
pub use poller::{PollerHandle, spawn_poller};
pub use sink::AttributeSink;
pub use store::{ConfigStore, JsonFileConfigStore, MemoryConfigStore};

use crate::device::Device;
use crate::error::Error;
use crate::protocol::{HttpClient, Protocol};

/// A set-up entry: the session and its poller.
///
/// Dropping the handle stops polling; the session is released once the
/// last clone of [`device`](Self::device) is gone.
#[derive(Debug)]
pub struct EntryHandle<P: Protocol = HttpClient> {
    id: EntryId,
    device: Arc<Device<P>>,
    poller: PollerHandle,
}

impl<P: Protocol> EntryHandle<P> {
    /// Returns the entry identifier.
    #[must_use]
    pub fn id(&self) -> EntryId {
        self.id
    }

    /// Returns the session.
    #[must_use]
    pub fn device(&self) -> &Arc<Device<P>> {
        &self.device
    }

    /// Returns whether the poller is still running.
    #[must_use]
    pub fn is_polling(&self) -> bool {
        self.poller.is_running()
    }

    /// Stops polling and releases the session.
    pub fn unload(mut self) {
        self.poller.stop();
        tracing::info!(entry = %self.id, host = self.device.host(), "Entry unloaded");
    }
}

/// Sets up an HTTP session for `entry`.
///
/// A failed first refresh is logged and tolerated; the poller keeps trying
/// at the entry's scan interval.
///
/// # Errors
///
/// Returns error if the entry's host is invalid.
pub async fn setup_entry(
    entry: &ConfigEntry,
    sink: Arc<dyn AttributeSink>,
) -> Result<EntryHandle<HttpClient>, Error> {
    let device = entry.device_builder().build_without_probe()?;
    Ok(setup_device(entry.id, device, sink, entry.scan_interval()).await)
}

/// Sets up an existing session under `id`.
///
/// Performs a first refresh, publishing the attributes if it succeeds,
/// then starts polling every `interval`.
pub async fn setup_device<P>(
    id: EntryId,
    device: Device<P>,
    sink: Arc<dyn AttributeSink>,
    interval: Duration,
) -> EntryHandle<P>
where
    P: Protocol + Send + Sync + 'static,
{
    tracing::debug!(entry = %id, host = device.host(), "Initialize the Hombot handler");

    if device.refresh().await {
        sink.publish(id, &device.name(), &device.attributes());
    } else {
        tracing::warn!(entry = %id, host = device.host(), "First refresh failed, will retry");
    }

    let device = Arc::new(device);
    let poller = spawn_poller(id, Arc::clone(&device), sink, interval);

    EntryHandle { id, device, poller }
}

/// Replaces a set-up entry after its configuration changed.
///
/// # Errors
///
/// Returns error if the updated entry's host is invalid; the old handle is
/// unloaded either way.
pub async fn reload_entry(
    handle: EntryHandle<HttpClient>,
    entry: &ConfigEntry,
    sink: Arc<dyn AttributeSink>,
) -> Result<EntryHandle<HttpClient>, Error> {
    handle.unload();
    setup_entry(entry, sink).await
}
