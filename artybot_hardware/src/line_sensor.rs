// Digilent LS1 two-channel line sensor behind an AXI GPIO input channel

use crate::bus::{register_at, RegisterBus};
use crate::error::ConfigError;
use crate::gpio::{configure_inputs, GpioChannel};

pub const LS1_BASE: u32 = 0x4002_0000;

const LEFT_BIT: u32 = 1 << 0;
const RIGHT_BIT: u32 = 1 << 1;
/// Pins switched to input at startup. Only the low two carry sensor data.
const INPUT_MASK: u32 = 0xFF;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SensorReading {
    pub left_detected: bool,
    pub right_detected: bool,
}

impl SensorReading {
    pub const fn new(left_detected: bool, right_detected: bool) -> Self {
        Self {
            left_detected,
            right_detected,
        }
    }

    /// Bit 0 is the left sensor, bit 1 the right one. Everything else is ignored.
    pub const fn from_bits(bits: u32) -> Self {
        Self::new(bits & LEFT_BIT != 0, bits & RIGHT_BIT != 0)
    }
}

/// Which logic level means "line under the sensor". Not all sensor boards agree.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SensorPolarity {
    #[default]
    ActiveHigh,
    ActiveLow,
}

pub struct LineSensor<B: RegisterBus> {
    bus: B,
    data: u32,
    polarity: SensorPolarity,
}

impl<B: RegisterBus> LineSensor<B> {
    /// Configures GPIO channel 1 at `base` as inputs and binds the sensor to it.
    pub fn new(mut bus: B, base: u32, polarity: SensorPolarity) -> Result<Self, ConfigError> {
        let data = register_at(base, GpioChannel::One.data_offset())?;
        configure_inputs(&mut bus, base, GpioChannel::One, INPUT_MASK)?;

        Ok(Self {
            bus,
            data,
            polarity,
        })
    }

    /// One read of the data register.
    pub fn read(&self) -> SensorReading {
        let raw = self.bus.read(self.data);
        let bits = match self.polarity {
            SensorPolarity::ActiveHigh => raw,
            SensorPolarity::ActiveLow => !raw,
        };
        SensorReading::from_bits(bits)
    }

    #[cfg(any(test, feature = "mock"))]
    pub fn bus_mut(&mut self) -> &mut B {
        &mut self.bus
    }

    pub fn free(self) -> B {
        self.bus
    }
}
