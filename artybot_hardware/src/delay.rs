use embedded_hal::delay::DelayNs;

/// Loop iterations per millisecond for the 100 MHz MicroBlaze build.
pub const MICROBLAZE_SPINS_PER_MS: u32 = 90_000;

/// Calibrated busy loop. Nothing can interrupt or shorten a wait.
#[derive(Debug, Clone, Copy)]
pub struct BusyWait {
    spins_per_ms: u32,
}

impl BusyWait {
    pub const fn new(spins_per_ms: u32) -> Self {
        Self { spins_per_ms }
    }

    /// Loop iterations needed to wait `ns` nanoseconds.
    pub const fn spins_for_ns(&self, ns: u64) -> u64 {
        (ns as u128 * self.spins_per_ms as u128 / 1_000_000) as u64
    }

    fn spin(spins: u64) {
        for i in 0..spins {
            core::hint::black_box(i);
            core::hint::spin_loop();
        }
    }
}

impl Default for BusyWait {
    fn default() -> Self {
        Self::new(MICROBLAZE_SPINS_PER_MS)
    }
}

impl DelayNs for BusyWait {
    fn delay_ns(&mut self, ns: u32) {
        Self::spin(self.spins_for_ns(u64::from(ns)));
    }

    fn delay_us(&mut self, us: u32) {
        Self::spin(self.spins_for_ns(u64::from(us) * 1_000));
    }

    fn delay_ms(&mut self, ms: u32) {
        Self::spin(self.spins_for_ns(u64::from(ms) * 1_000_000));
    }
}
