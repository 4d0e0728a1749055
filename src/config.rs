//! Deployment parameters. One `Config` value is read at startup and decides the
//! register map, the controller duties and the loop timing.

use artybot_hardware::{
    line_sensor::{SensorPolarity, LS1_BASE},
    motors::RegisterLayout,
};
use fugit::MillisDurationU32;
use log::Level;

use crate::controls::Controller;
use crate::time::dur_from_millis;

pub const NAME: &str = env!("CARGO_PKG_NAME");
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub const HIGH_DUTY: u16 = 35_000;
pub const MEDIUM_DUTY: u16 = 30_000;
pub const POLL_INTERVAL: MillisDurationU32 = dur_from_millis(20);
pub const PULSE_DURATION: MillisDurationU32 = dur_from_millis(500);

/// Which DHB1 register build the bitstream carries.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LayoutKind {
    Packed,
    #[default]
    Discrete,
}

impl LayoutKind {
    pub const fn layout(self) -> RegisterLayout {
        match self {
            LayoutKind::Packed => RegisterLayout::dhb1_packed(),
            LayoutKind::Discrete => RegisterLayout::dhb1_discrete(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Config {
    pub layout: RegisterLayout,
    pub sensor_base: u32,
    pub sensor_polarity: SensorPolarity,
    pub high_duty: u16,
    pub medium_duty: u16,
    pub poll_interval: MillisDurationU32,
    pub startup_pulses: bool,
    pub pulse_duration: MillisDurationU32,
    pub log_level: Level,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            layout: LayoutKind::default().layout(),
            sensor_base: LS1_BASE,
            sensor_polarity: SensorPolarity::ActiveHigh,
            high_duty: HIGH_DUTY,
            medium_duty: MEDIUM_DUTY,
            poll_interval: POLL_INTERVAL,
            startup_pulses: true,
            pulse_duration: PULSE_DURATION,
            log_level: Level::Info,
        }
    }
}

impl Config {
    pub fn with_layout(self, kind: LayoutKind) -> Self {
        Self {
            layout: kind.layout(),
            ..self
        }
    }

    pub fn controller(&self) -> Controller {
        Controller::new(self.high_duty, self.medium_duty)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_board() {
        let config = Config::default();

        assert_eq!(config.layout, RegisterLayout::dhb1_discrete());
        assert_eq!(config.poll_interval.to_millis(), 20);
        assert!(config.high_duty > config.medium_duty);
        assert_eq!(config.layout.validate(), Ok(()));
    }

    #[test]
    fn layout_switch_keeps_everything_else() {
        let config = Config {
            medium_duty: 12_345,
            ..Config::default()
        }
        .with_layout(LayoutKind::Packed);

        assert_eq!(config.layout, RegisterLayout::dhb1_packed());
        assert_eq!(config.medium_duty, 12_345);
    }
}
