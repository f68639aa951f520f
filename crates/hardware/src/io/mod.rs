//! I/O device and controller simulation.
//!
//! This module contrasts two styles of servicing a device:
//! 1. **Devices:** A named device with a readiness state and a bounded FIFO,
//!    plus a temperature sensor that feeds the FIFO from a background thread.
//! 2. **Polling:** A controller that checks readiness explicitly on every
//!    read and write, with an optional bounded wait.
//! 3. **Interrupts:** A controller whose monitor threads drain ready devices
//!    into an interrupt queue serviced by a single dispatcher.
//!
//! Device state is shared between foreground callers and background loops
//! behind a mutex. Every background loop observes a cancellation flag each
//! iteration and sleeps only for bounded intervals, so `stop` always joins
//! promptly. This subsystem runs on wall-clock time and does not interact
//! with the cycle-driven pipeline.

/// Device status and the bounded-FIFO device.
pub mod device;

/// Interrupt-driven controller.
pub mod interrupt;

/// Polling controller.
pub mod polling;

/// Temperature sensor device.
pub mod sensor;

pub use device::{DeviceStatus, IoDevice};
pub use interrupt::InterruptController;
pub use polling::PollingController;
pub use sensor::TemperatureSensor;
