//! Polling (programmed I/O) controller.
//!
//! The caller checks device readiness explicitly on every transfer. Nothing
//! happens in the background; the cost of this style is the busy-wait in
//! [`PollingController::wait_and_read`].

use std::collections::HashMap;
use std::sync::Arc;
use std::thread;
use std::time::{Duration, Instant};

use tracing::{debug, warn};

use crate::common::Word;
use crate::io::device::IoDevice;

/// Pause between readiness checks while waiting for data.
const POLL_INTERVAL: Duration = Duration::from_millis(5);

/// A controller that services devices by explicit status polling.
#[derive(Debug, Default)]
pub struct PollingController {
    devices: HashMap<String, Arc<IoDevice>>,
}

impl PollingController {
    /// Creates a controller with no registered devices.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a device under an identifier.
    pub fn register_device(&mut self, id: impl Into<String>, device: Arc<IoDevice>) {
        let _ = self.devices.insert(id.into(), device);
    }

    /// Looks up a registered device.
    pub fn device(&self, id: &str) -> Option<&Arc<IoDevice>> {
        self.devices.get(id)
    }

    /// Reads one datum from a device.
    ///
    /// Returns `None`, with an advisory log event, when the device is
    /// unknown, not ready, or has no data.
    pub fn read(&self, id: &str) -> Option<Word> {
        let Some(device) = self.devices.get(id) else {
            warn!(device = id, "read from unknown device");
            return None;
        };
        if !device.is_ready() {
            debug!(device = id, status = ?device.status(), "device not ready");
            return None;
        }
        if !device.has_data() {
            debug!(device = id, "no data available");
            return None;
        }
        device.read()
    }

    /// Writes one datum to a device.
    ///
    /// Fails, with an advisory log event, when the device is unknown, not
    /// ready, or its FIFO is full.
    pub fn write(&self, id: &str, value: Word) -> bool {
        let Some(device) = self.devices.get(id) else {
            warn!(device = id, "write to unknown device");
            return false;
        };
        if !device.is_ready() {
            debug!(device = id, status = ?device.status(), "device not ready");
            return false;
        }
        let accepted = device.write(value);
        if !accepted {
            debug!(device = id, value, "buffer full, write rejected");
        }
        accepted
    }

    /// Polls until the device is ready with data, then reads, or gives up at
    /// the deadline.
    pub fn wait_and_read(&self, id: &str, timeout: Duration) -> Option<Word> {
        let Some(device) = self.devices.get(id) else {
            warn!(device = id, "wait on unknown device");
            return None;
        };
        let deadline = Instant::now() + timeout;
        loop {
            if device.is_ready() && device.has_data() {
                return device.read();
            }
            if Instant::now() >= deadline {
                debug!(device = id, ?timeout, "wait for data timed out");
                return None;
            }
            thread::sleep(POLL_INTERVAL);
        }
    }
}
