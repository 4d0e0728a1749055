use artybot_hardware::{
    bus::RegisterBus,
    line_sensor::LineSensor,
    motors::MotorDriver,
    ConfigError,
};
use embedded_hal::delay::DelayNs;
use log::info;

use crate::config::Config;
use crate::control_loop::ControlLoop;
use crate::selftest::pulse_motors;

pub type LineFollower<S, M, D> = ControlLoop<S, MotorDriver<M>, D>;

/// Brings the robot up in a fixed order: sensor GPIO, then the motor driver, then
/// the optional pulse self-test. A sensor failure returns before the motor
/// registers are touched.
pub fn startup<S: RegisterBus, M: RegisterBus, D: DelayNs>(
    config: &Config,
    sensor_bus: S,
    motor_bus: M,
    mut delay: D,
) -> Result<LineFollower<S, M, D>, ConfigError> {
    let sensor = LineSensor::new(sensor_bus, config.sensor_base, config.sensor_polarity)?;
    info!("line sensor ready at {:#010x}", config.sensor_base);

    let mut motors = MotorDriver::configure(motor_bus, config.layout)?;
    info!("motor driver ready");

    if config.startup_pulses {
        pulse_motors(&mut motors, &mut delay, config.pulse_duration);
    }

    Ok(ControlLoop::new(
        sensor,
        config.controller(),
        motors,
        delay,
        config.poll_interval,
    ))
}

/// Idle forever. Used when the robot must not move.
pub fn halt() -> ! {
    loop {
        core::hint::spin_loop();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::LayoutKind;
    use crate::time::fake::FakeDelay;
    use artybot_hardware::{
        line_sensor::LS1_BASE,
        mock::MockBus,
        motors::{DriveCommand, PwmRegisters, RegisterLayout},
    };

    fn quiet_config() -> Config {
        Config {
            startup_pulses: false,
            ..Config::default()
        }
    }

    #[test]
    fn gpio_failure_prevents_motor_configuration() {
        let mut sensor_bus = MockBus::new();
        sensor_bus.make_read_only(LS1_BASE + 0x04);
        let mut motor_bus = MockBus::new();

        let result = startup(
            &Config::default(),
            &mut sensor_bus,
            &mut motor_bus,
            FakeDelay::default(),
        );

        assert!(matches!(result, Err(ConfigError::GpioInit { base: LS1_BASE })));
        assert!(motor_bus.trace().is_empty());
    }

    #[test]
    fn bad_layout_is_fatal() {
        let mut config = quiet_config();
        if let RegisterLayout::Discrete(ref mut d) = config.layout {
            d.pwm = PwmRegisters::at(d.dir_m1).unwrap();
        }
        let mut sensor_bus = MockBus::new();
        let mut motor_bus = MockBus::new();

        let result = startup(&config, &mut sensor_bus, &mut motor_bus, FakeDelay::default());

        assert!(matches!(
            result,
            Err(ConfigError::OverlappingRegisters { .. })
        ));
        assert!(motor_bus.trace().is_empty());
    }

    #[test]
    fn pulses_run_before_loop_and_leave_motors_stopped() {
        let mut sensor_bus = MockBus::new();
        let mut motor_bus = MockBus::new();
        let mut delay = FakeDelay::default();

        let control = startup(&Config::default(), &mut sensor_bus, &mut motor_bus, &mut delay)
            .unwrap();

        let state = control.motors().snapshot();
        assert!(!state.m1.enabled && !state.m2.enabled);
        assert_eq!((state.m1.duty, state.m2.duty), (0, 0));
        drop(control);
        assert_eq!(delay.elapsed_ms(), 2_000);
    }

    #[test]
    fn both_layouts_follow_the_line() {
        for kind in [LayoutKind::Discrete, LayoutKind::Packed] {
            let mut sensor_bus = MockBus::new();
            let mut motor_bus = MockBus::new();
            sensor_bus.set(LS1_BASE, 0b11);
            let config = quiet_config().with_layout(kind);

            let mut control =
                startup(&config, &mut sensor_bus, &mut motor_bus, FakeDelay::default()).unwrap();

            assert_eq!(control.step(), DriveCommand::Forward(config.high_duty));
            let state = control.motors().snapshot();
            assert!(state.m1.enabled && state.m2.enabled && state.pwm_enabled);
            assert_eq!(state.m1.duty, u32::from(config.high_duty));
        }
    }
}
