// Xilinx AXI GPIO: two channels, each with a data and a tri-state register

use log::debug;

use crate::bus::{is_aligned, register_at, RegisterBus};
use crate::error::ConfigError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GpioChannel {
    One,
    Two,
}

impl GpioChannel {
    pub const fn data_offset(self) -> u32 {
        match self {
            GpioChannel::One => 0x00,
            GpioChannel::Two => 0x08,
        }
    }

    /// A set bit in the tri-state register makes the pin an input.
    pub const fn tri_offset(self) -> u32 {
        match self {
            GpioChannel::One => 0x04,
            GpioChannel::Two => 0x0C,
        }
    }
}

/// Turns the pins in `mask` into inputs and checks that the block took the setting.
pub fn configure_inputs<B: RegisterBus>(
    bus: &mut B,
    base: u32,
    channel: GpioChannel,
    mask: u32,
) -> Result<(), ConfigError> {
    if !is_aligned(base) {
        return Err(ConfigError::Misaligned { addr: base });
    }

    let tri = register_at(base, channel.tri_offset())?;
    let value = bus.read(tri) | mask;
    bus.write(tri, value);

    if bus.read(tri) & mask != mask {
        return Err(ConfigError::GpioInit { base });
    }

    debug!("gpio {:#010x} {:?}: inputs {:#x}", base, channel, mask);
    Ok(())
}
