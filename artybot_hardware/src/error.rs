use thiserror::Error;

/// Startup-time configuration failures. None of them are recoverable: driving the
/// H-bridge through a register map that failed validation can damage the hardware.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("register {addr:#010x} is not aligned to the 32-bit access width")]
    Misaligned { addr: u32 },
    #[error("register {addr:#010x} is assigned to more than one field")]
    OverlappingRegisters { addr: u32 },
    #[error("bit {bit} of the packed control register is assigned to more than one field")]
    OverlappingBits { bit: u8 },
    #[error("bit {bit} does not fit in a 32-bit register")]
    BitOutOfRange { bit: u8 },
    #[error("register block at {base:#010x} runs past the end of the address space")]
    AddressOverflow { base: u32 },
    #[error("GPIO block at {base:#010x} did not accept its direction setting")]
    GpioInit { base: u32 },
}
