//! Bounded-FIFO I/O device.

use std::collections::VecDeque;
use std::fmt;
use std::sync::{Mutex, MutexGuard, PoisonError};

use crate::common::Word;

/// Readiness state of an I/O device.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeviceStatus {
    /// The device can transfer data.
    Ready,
    /// The device is busy processing an operation.
    Busy,
    /// The device has encountered an error.
    Error,
}

/// Mutable device state shared between foreground and background threads.
#[derive(Debug)]
struct DeviceState {
    status: DeviceStatus,
    buffer: VecDeque<Word>,
}

/// A named I/O device with a readiness state and a bounded FIFO.
///
/// All state sits behind one mutex, so an `Arc<IoDevice>` can be shared
/// freely between controllers and generator threads. Each operation takes
/// the lock once; none of them block beyond that.
#[derive(Debug)]
pub struct IoDevice {
    name: String,
    capacity: usize,
    state: Mutex<DeviceState>,
}

impl IoDevice {
    /// Creates a ready device with an empty FIFO of `capacity` entries.
    pub fn new(name: impl Into<String>, capacity: usize) -> Self {
        Self {
            name: name.into(),
            capacity,
            state: Mutex::new(DeviceState {
                status: DeviceStatus::Ready,
                buffer: VecDeque::with_capacity(capacity),
            }),
        }
    }

    /// Takes the state lock, recovering from poisoning.
    fn lock(&self) -> MutexGuard<'_, DeviceState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Device name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// FIFO capacity in entries.
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Pops the head of the FIFO, or `None` when it is empty.
    pub fn read(&self) -> Option<Word> {
        self.lock().buffer.pop_front()
    }

    /// Pushes a value if there is room; returns whether it was accepted.
    pub fn write(&self, value: Word) -> bool {
        let mut state = self.lock();
        if state.buffer.len() >= self.capacity {
            false
        } else {
            state.buffer.push_back(value);
            true
        }
    }

    /// Whether the device is in the [`DeviceStatus::Ready`] state.
    pub fn is_ready(&self) -> bool {
        self.lock().status == DeviceStatus::Ready
    }

    /// Whether the FIFO is non-empty.
    pub fn has_data(&self) -> bool {
        !self.lock().buffer.is_empty()
    }

    /// Number of buffered entries.
    pub fn len(&self) -> usize {
        self.lock().buffer.len()
    }

    /// Whether the FIFO is empty.
    pub fn is_empty(&self) -> bool {
        self.lock().buffer.is_empty()
    }

    /// Current readiness state.
    pub fn status(&self) -> DeviceStatus {
        self.lock().status
    }

    /// Sets the readiness state.
    pub fn set_status(&self, status: DeviceStatus) {
        self.lock().status = status;
    }
}

impl fmt::Display for IoDevice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = self.lock();
        write!(
            f,
            "{} [status: {:?}, data: {}/{}]",
            self.name,
            state.status,
            state.buffer.len(),
            self.capacity
        )
    }
}
