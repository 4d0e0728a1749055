use embedded_hal::delay::DelayNs;
use fugit::MillisDurationU32;

pub const fn dur_from_millis(millis: u32) -> MillisDurationU32 {
    MillisDurationU32::millis(millis)
}

/// Blocks for `duration`. Cannot be cancelled.
pub fn wait<D: DelayNs>(delay: &mut D, duration: MillisDurationU32) {
    delay.delay_ms(duration.to_millis());
}

#[cfg(test)]
pub(crate) mod fake {
    use embedded_hal::delay::DelayNs;

    /// Records requested waits instead of sleeping.
    #[derive(Debug, Default)]
    pub struct FakeDelay {
        pub elapsed_ns: u64,
        pub waits: u32,
    }

    impl FakeDelay {
        pub fn elapsed_ms(&self) -> u64 {
            self.elapsed_ns / 1_000_000
        }
    }

    impl DelayNs for FakeDelay {
        fn delay_ns(&mut self, ns: u32) {
            self.elapsed_ns += u64::from(ns);
            self.waits += 1;
        }

        fn delay_ms(&mut self, ms: u32) {
            self.elapsed_ns += u64::from(ms) * 1_000_000;
            self.waits += 1;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::fake::FakeDelay;
    use super::*;

    #[test]
    fn wait_blocks_for_whole_duration() {
        let mut delay = FakeDelay::default();

        wait(&mut delay, dur_from_millis(20));
        wait(&mut delay, dur_from_millis(500));

        assert_eq!(delay.elapsed_ms(), 520);
        assert_eq!(delay.waits, 2);
    }
}
