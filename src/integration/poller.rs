// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Periodic status polling.

use std::sync::Arc;
use std::time::Duration;

use tokio::task::JoinHandle;
use tokio::time::{self, MissedTickBehavior};

use crate::device::Device;
use crate::protocol::Protocol;

use super::{AttributeSink, EntryId};

/// Handle to a running poller.
///
/// Dropping the handle stops the poller.
#[derive(Debug)]
pub struct PollerHandle {
    task: Option<JoinHandle<()>>,
}

impl PollerHandle {
    /// Stops polling. Calling it twice is harmless.
    pub fn stop(&mut self) {
        if let Some(task) = self.task.take() {
            task.abort();
        }
    }

    /// Returns whether the poller is still scheduled.
    #[must_use]
    pub fn is_running(&self) -> bool {
        self.task.as_ref().is_some_and(|task| !task.is_finished())
    }
}

impl Drop for PollerHandle {
    fn drop(&mut self) {
        self.stop();
    }
}

/// Spawns a task refreshing `device` every `interval`.
///
/// The first refresh happens one interval after spawning. After every
/// successful refresh the device attributes are published to `sink`; failed
/// refreshes are only logged and the previous attributes stay on display.
/// A slow refresh delays the next tick instead of bunching ticks up.
///
/// Must be called from within a tokio runtime.
pub fn spawn_poller<P>(
    entry: EntryId,
    device: Arc<Device<P>>,
    sink: Arc<dyn AttributeSink>,
    interval: Duration,
) -> PollerHandle
where
    P: Protocol + Send + Sync + 'static,
{
    let period = interval.max(Duration::from_millis(1));

    let task = tokio::spawn(async move {
        let mut ticker = time::interval_at(time::Instant::now() + period, period);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

        loop {
            ticker.tick().await;
            if device.refresh().await {
                sink.publish(entry, &device.name(), &device.attributes());
            } else {
                tracing::debug!(%entry, host = device.host(), "Keeping stale status");
            }
        }
    });

    tracing::debug!(%entry, interval = ?period, "Poller started");

    PollerHandle { task: Some(task) }
}
