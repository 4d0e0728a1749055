// RAM-like register file that records every write. Read-only addresses keep their
// preset value, which stands in for an unresponsive peripheral.

use heapless::{LinearMap, Vec};

use crate::bus::RegisterBus;

const REGISTERS: usize = 32;
const TRACE_DEPTH: usize = 512;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Write {
    pub addr: u32,
    pub value: u32,
}

#[derive(Debug, Default)]
pub struct MockBus {
    registers: LinearMap<u32, u32, REGISTERS>,
    read_only: Vec<u32, 8>,
    trace: Vec<Write, TRACE_DEPTH>,
}

impl MockBus {
    pub fn new() -> Self {
        Self::default()
    }

    /// Presets a register without recording a write.
    pub fn set(&mut self, addr: u32, value: u32) {
        self.registers
            .insert(addr, value)
            .expect("mock register file full");
    }

    pub fn get(&self, addr: u32) -> u32 {
        self.registers.get(&addr).copied().unwrap_or(0)
    }

    /// Writes to `addr` are still traced but no longer change its value.
    pub fn make_read_only(&mut self, addr: u32) {
        self.read_only.push(addr).expect("too many read-only registers");
    }

    pub fn trace(&self) -> &[Write] {
        &self.trace
    }

    pub fn clear_trace(&mut self) {
        self.trace.clear();
    }

    /// Values written to one register, oldest first.
    pub fn writes_to(&self, addr: u32) -> impl Iterator<Item = u32> + '_ {
        self.trace
            .iter()
            .filter(move |w| w.addr == addr)
            .map(|w| w.value)
    }
}

impl RegisterBus for MockBus {
    fn read(&self, addr: u32) -> u32 {
        self.get(addr)
    }

    fn write(&mut self, addr: u32, value: u32) {
        self.trace
            .push(Write { addr, value })
            .expect("mock trace full, clear it between steps");
        if !self.read_only.contains(&addr) {
            self.set(addr, value);
        }
    }
}
