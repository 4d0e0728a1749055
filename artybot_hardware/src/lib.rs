#![cfg_attr(not(test), no_std)]

//! Register-level drivers for the ArtyBot's MicroBlaze peripherals.

pub mod bus;
pub mod delay;
pub mod error;
pub mod gpio;
pub mod line_sensor;
pub mod motors;
pub mod uart;

#[cfg(any(test, feature = "mock"))]
pub mod mock;

pub use error::ConfigError;

use bus::Mmio;
use delay::BusyWait;

pub struct ArtyHardware {
    pub motor_bus: Mmio,
    pub sensor_bus: Mmio,
    pub delay: BusyWait,
}

impl ArtyHardware {
    /// # Safety
    ///
    /// Call once. Each handle can address every register, so the motor bus must go
    /// to `MotorDriver` and the sensor bus to `LineSensor`, which keep them private.
    /// The UART Lite block is left to the serial logger.
    pub unsafe fn steal() -> Self {
        Self {
            motor_bus: Mmio::steal(),
            sensor_bus: Mmio::steal(),
            delay: BusyWait::default(),
        }
    }
}
