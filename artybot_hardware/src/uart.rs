// Xilinx AXI UART Lite, transmit side only

use core::fmt;

use crate::bus::RegisterBus;

pub const UART_LITE_BASE: u32 = 0x4060_0000;

const TX_FIFO: u32 = 0x04;
const STATUS: u32 = 0x08;
const STATUS_TX_FULL: u32 = 1 << 3;

pub struct UartLite<B: RegisterBus> {
    bus: B,
    base: u32,
}

impl<B: RegisterBus> UartLite<B> {
    pub fn new(bus: B, base: u32) -> Self {
        Self { bus, base }
    }

    /// Blocks while the transmit FIFO is full.
    pub fn write_byte(&mut self, byte: u8) {
        while self.bus.read(self.base + STATUS) & STATUS_TX_FULL != 0 {
            core::hint::spin_loop();
        }
        self.bus.write(self.base + TX_FIFO, u32::from(byte));
    }
}

impl<B: RegisterBus> fmt::Write for UartLite<B> {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        for byte in s.bytes() {
            self.write_byte(byte);
        }
        Ok(())
    }
}
