// Word-wide access to memory-mapped registers

use core::ptr::{read_volatile, write_volatile};

use crate::error::ConfigError;

/// Width of one register access in bytes. Register addresses must be multiples of it.
pub const ACCESS_WIDTH: u32 = 4;

pub trait RegisterBus {
    fn read(&self, addr: u32) -> u32;
    fn write(&mut self, addr: u32, value: u32);
}

impl<B: RegisterBus + ?Sized> RegisterBus for &mut B {
    #[inline]
    fn read(&self, addr: u32) -> u32 {
        (**self).read(addr)
    }

    #[inline]
    fn write(&mut self, addr: u32, value: u32) {
        (**self).write(addr, value)
    }
}

#[inline]
pub const fn is_aligned(addr: u32) -> bool {
    addr % ACCESS_WIDTH == 0
}

/// Address of the register `offset` bytes past `base`. Fails instead of wrapping
/// around the top of the address space.
pub const fn register_at(base: u32, offset: u32) -> Result<u32, ConfigError> {
    match base.checked_add(offset) {
        Some(addr) => Ok(addr),
        None => Err(ConfigError::AddressOverflow { base }),
    }
}

/// Volatile access to the soft-core's physical address space.
#[derive(Debug)]
pub struct Mmio {
    _private: (),
}

impl Mmio {
    /// # Safety
    ///
    /// The caller decides which register block this handle is used for and must make
    /// sure no other handle writes the same addresses. Every address later passed to
    /// [`RegisterBus::read`] or [`RegisterBus::write`] must be a mapped, aligned
    /// 32-bit register.
    pub const unsafe fn steal() -> Self {
        Self { _private: () }
    }
}

impl RegisterBus for Mmio {
    #[inline]
    fn read(&self, addr: u32) -> u32 {
        // SAFETY: guaranteed by the contract of `Mmio::steal`.
        unsafe { read_volatile(addr as usize as *const u32) }
    }

    #[inline]
    fn write(&mut self, addr: u32, value: u32) {
        // SAFETY: guaranteed by the contract of `Mmio::steal`.
        unsafe { write_volatile(addr as usize as *mut u32, value) }
    }
}
