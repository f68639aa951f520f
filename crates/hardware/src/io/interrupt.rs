//! Interrupt-driven I/O controller.
//!
//! Instead of the caller polling, one monitor thread per device watches for
//! `ready && has_data`, drains one item at a time, and enqueues an interrupt
//! record. A single dispatcher thread dequeues records and invokes the
//! registered handler for the originating device. A panicking handler is
//! caught and logged; dispatch continues.

use std::collections::{HashMap, VecDeque};
use std::panic::{self, AssertUnwindSafe};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::thread::{self, JoinHandle};
use std::time::Duration;

use tracing::{debug, warn};

use crate::common::Word;
use crate::io::device::IoDevice;

/// Pause between device checks in a monitor loop.
const MONITOR_INTERVAL: Duration = Duration::from_millis(5);

/// Pause of the dispatcher when the interrupt queue is empty.
const DISPATCH_INTERVAL: Duration = Duration::from_millis(2);

/// Callback invoked for each dispatched interrupt: device id and datum.
pub type InterruptHandler = Box<dyn Fn(&str, Word) + Send + Sync + 'static>;

/// A pending interrupt: the originating device and the drained datum.
type PendingInterrupt = (String, Word);

/// A controller that services devices through interrupts.
///
/// Devices and handlers are registered up front; [`start_service`] spawns
/// the monitor and dispatcher threads and [`stop_service`] stops and joins
/// them. Both are idempotent.
///
/// [`start_service`]: InterruptController::start_service
/// [`stop_service`]: InterruptController::stop_service
#[derive(Default)]
pub struct InterruptController {
    devices: HashMap<String, Arc<IoDevice>>,
    handlers: Arc<Mutex<HashMap<String, InterruptHandler>>>,
    pending: Arc<Mutex<VecDeque<PendingInterrupt>>>,
    running: Arc<AtomicBool>,
    workers: Vec<JoinHandle<()>>,
}

impl std::fmt::Debug for InterruptController {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("InterruptController")
            .field("devices", &self.devices.len())
            .field("running", &self.running.load(Ordering::SeqCst))
            .field("workers", &self.workers.len())
            .finish()
    }
}

impl InterruptController {
    /// Creates a controller with no devices, handlers, or threads.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a device under an identifier.
    ///
    /// Devices registered while the service is running are not monitored
    /// until the next [`InterruptController::start_service`].
    pub fn register_device(&mut self, id: impl Into<String>, device: Arc<IoDevice>) {
        let _ = self.devices.insert(id.into(), device);
    }

    /// Registers the interrupt handler for a device.
    pub fn register_handler(
        &mut self,
        id: impl Into<String>,
        handler: impl Fn(&str, Word) + Send + Sync + 'static,
    ) {
        let mut handlers = lock(&self.handlers);
        let _ = handlers.insert(id.into(), Box::new(handler));
    }

    /// Number of interrupts queued but not yet dispatched.
    pub fn pending(&self) -> usize {
        lock(&self.pending).len()
    }

    /// Whether the monitor and dispatcher threads are running.
    pub fn is_running(&self) -> bool {
        self.running.load(Ordering::SeqCst)
    }

    /// Spawns the dispatcher and one monitor per registered device.
    pub fn start_service(&mut self) {
        if self.running.swap(true, Ordering::SeqCst) {
            return;
        }

        let pending = Arc::clone(&self.pending);
        let handlers = Arc::clone(&self.handlers);
        let running = Arc::clone(&self.running);
        self.workers.push(thread::spawn(move || {
            dispatch_loop(&pending, &handlers, &running);
        }));

        for (id, device) in &self.devices {
            let id = id.clone();
            let device = Arc::clone(device);
            let pending = Arc::clone(&self.pending);
            let running = Arc::clone(&self.running);
            self.workers.push(thread::spawn(move || {
                monitor_loop(&id, &device, &pending, &running);
            }));
        }
    }

    /// Stops the service and joins every thread.
    ///
    /// Each loop observes the flag within one bounded sleep interval, so the
    /// joins complete promptly.
    pub fn stop_service(&mut self) {
        self.running.store(false, Ordering::SeqCst);
        for worker in self.workers.drain(..) {
            let _ = worker.join();
        }
    }
}

impl Drop for InterruptController {
    fn drop(&mut self) {
        self.stop_service();
    }
}

/// Takes a mutex, recovering from poisoning.
fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Watches one device and turns available data into queued interrupts.
fn monitor_loop(
    id: &str,
    device: &IoDevice,
    pending: &Mutex<VecDeque<PendingInterrupt>>,
    running: &AtomicBool,
) {
    while running.load(Ordering::SeqCst) {
        if device.is_ready() && device.has_data() {
            if let Some(value) = device.read() {
                lock(pending).push_back((id.to_string(), value));
            }
        }
        thread::sleep(MONITOR_INTERVAL);
    }
}

/// Dequeues interrupts and invokes handlers one at a time.
fn dispatch_loop(
    pending: &Mutex<VecDeque<PendingInterrupt>>,
    handlers: &Mutex<HashMap<String, InterruptHandler>>,
    running: &AtomicBool,
) {
    while running.load(Ordering::SeqCst) {
        let next = lock(pending).pop_front();
        let Some((id, value)) = next else {
            thread::sleep(DISPATCH_INTERVAL);
            continue;
        };
        let handlers = lock(handlers);
        let Some(handler) = handlers.get(&id) else {
            debug!(device = %id, value, "interrupt with no registered handler");
            continue;
        };
        let outcome = panic::catch_unwind(AssertUnwindSafe(|| handler(&id, value)));
        if outcome.is_err() {
            warn!(device = %id, value, "interrupt handler panicked, dispatch continues");
        }
    }
}
