//! Temperature sensor device.
//!
//! A simulated input device that generates pseudo-random temperature readings
//! on a background thread at a configurable rate, occasionally flipping its
//! readiness state the way flaky hardware does.

use std::sync::{Arc, Condvar, Mutex, PoisonError};
use std::thread::{self, JoinHandle};
use std::time::Duration;

use tracing::debug;

use crate::common::{Word, XorShift64};
use crate::config::SensorConfig;
use crate::io::device::{DeviceStatus, IoDevice};

/// Probability per reading that the readiness state flips at random.
const STATE_FLIP_CHANCE: f64 = 0.05;

/// A temperature sensor feeding a bounded-FIFO device.
///
/// Readings are uniform in the configured range and stored as hundredths of
/// a degree, so `23.71` degrees arrives as `2371`. While a reading is being
/// produced the device usually reports ready; with a small probability it
/// flips to a random state instead.
#[derive(Debug)]
pub struct TemperatureSensor {
    device: Arc<IoDevice>,
    config: SensorConfig,
    running: Arc<(Mutex<bool>, Condvar)>,
    worker: Option<JoinHandle<()>>,
}

impl TemperatureSensor {
    /// Creates a stopped sensor from its configuration.
    pub fn new(config: &SensorConfig) -> Self {
        Self {
            device: Arc::new(IoDevice::new(config.name.clone(), config.buffer_size)),
            config: config.clone(),
            running: Arc::new((Mutex::new(false), Condvar::new())),
            worker: None,
        }
    }

    /// A shared handle to the underlying device, for controller registration.
    pub fn device(&self) -> Arc<IoDevice> {
        Arc::clone(&self.device)
    }

    /// Starts the background reading generator. Idempotent while running.
    pub fn start(&mut self) {
        if self.worker.is_some() {
            return;
        }
        {
            let (flag, _) = &*self.running;
            *flag.lock().unwrap_or_else(PoisonError::into_inner) = true;
        }
        let device = Arc::clone(&self.device);
        let running = Arc::clone(&self.running);
        let interval = Duration::from_millis(self.config.interval_ms);
        let (temp_min, temp_max) = (self.config.temp_min, self.config.temp_max);
        let seed = self.config.seed;
        self.worker = Some(thread::spawn(move || {
            generate_readings(&device, &running, interval, temp_min, temp_max, seed);
        }));
    }

    /// Stops the generator and joins it.
    ///
    /// The loop wakes from its interval wait as soon as the flag drops, so
    /// the join is bounded by one interval plus scheduling slack.
    pub fn stop(&mut self) {
        {
            let (flag, condvar) = &*self.running;
            *flag.lock().unwrap_or_else(PoisonError::into_inner) = false;
            condvar.notify_all();
        }
        if let Some(worker) = self.worker.take() {
            let _ = worker.join();
        }
    }
}

impl Drop for TemperatureSensor {
    fn drop(&mut self) {
        self.stop();
    }
}

/// Background loop: wait one interval, emit one reading, maybe flip state.
fn generate_readings(
    device: &IoDevice,
    running: &(Mutex<bool>, Condvar),
    interval: Duration,
    temp_min: f64,
    temp_max: f64,
    seed: u64,
) {
    let mut rng = XorShift64::new(seed);
    let (flag, condvar) = running;
    loop {
        let guard = flag.lock().unwrap_or_else(PoisonError::into_inner);
        if !*guard {
            return;
        }
        let (guard, _) = condvar
            .wait_timeout(guard, interval)
            .unwrap_or_else(PoisonError::into_inner);
        if !*guard {
            return;
        }
        drop(guard);

        let reading = temp_min + rng.next_f64() * (temp_max - temp_min);
        let value = (reading * 100.0) as Word;
        if !device.write(value) {
            debug!(device = device.name(), value, "buffer full, reading dropped");
        }

        if rng.next_f64() < STATE_FLIP_CHANCE {
            let status = match rng.next_below(3) {
                0 => DeviceStatus::Ready,
                1 => DeviceStatus::Busy,
                _ => DeviceStatus::Error,
            };
            device.set_status(status);
        } else {
            device.set_status(DeviceStatus::Ready);
        }
    }
}
