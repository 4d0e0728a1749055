use artybot_hardware::{
    bus::RegisterBus,
    line_sensor::LineSensor,
    motors::{DriveCommand, OpenLoopDrive},
};
use embedded_hal::delay::DelayNs;
use fugit::MillisDurationU32;
use log::debug;

use crate::controls::Controller;
use crate::time::wait;

/// Read sensor, decide, drive, wait. Forever.
pub struct ControlLoop<S: RegisterBus, M: OpenLoopDrive, D: DelayNs> {
    sensor: LineSensor<S>,
    controller: Controller,
    motors: M,
    delay: D,
    poll_interval: MillisDurationU32,
    last_command: Option<DriveCommand>,
}

impl<S: RegisterBus, M: OpenLoopDrive, D: DelayNs> ControlLoop<S, M, D> {
    pub fn new(
        sensor: LineSensor<S>,
        controller: Controller,
        motors: M,
        delay: D,
        poll_interval: MillisDurationU32,
    ) -> Self {
        Self {
            sensor,
            controller,
            motors,
            delay,
            poll_interval,
            last_command: None,
        }
    }

    /// One full cycle including the poll wait. Returns the command applied.
    pub fn step(&mut self) -> DriveCommand {
        let reading = self.sensor.read();
        let command = self.controller.decide(reading);

        if self.last_command != Some(command) {
            debug!("{:?} -> {:?}", reading, command);
            self.last_command = Some(command);
        }

        self.motors.drive(command);
        wait(&mut self.delay, self.poll_interval);
        command
    }

    pub fn run(&mut self) -> ! {
        loop {
            self.step();
        }
    }

    pub fn motors(&self) -> &M {
        &self.motors
    }

    #[cfg(test)]
    pub(crate) fn sensor_mut(&mut self) -> &mut LineSensor<S> {
        &mut self.sensor
    }

    pub fn delay(&self) -> &D {
        &self.delay
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::time::{dur_from_millis, fake::FakeDelay};
    use artybot_hardware::{
        line_sensor::{SensorPolarity, LS1_BASE},
        mock::{MockBus, Write},
        motors::{ChannelState, MotorDriver, RegisterLayout},
    };

    fn build<'a>(
        sensor_bus: &'a mut MockBus,
        motor_bus: &'a mut MockBus,
    ) -> ControlLoop<&'a mut MockBus, MotorDriver<&'a mut MockBus>, FakeDelay> {
        let sensor = LineSensor::new(sensor_bus, LS1_BASE, SensorPolarity::ActiveHigh).unwrap();
        let motors = MotorDriver::configure(motor_bus, RegisterLayout::dhb1_discrete()).unwrap();
        ControlLoop::new(
            sensor,
            Controller::new(35_000, 30_000),
            motors,
            FakeDelay::default(),
            dur_from_millis(20),
        )
    }

    #[test]
    fn line_under_both_sensors_drives_forward() {
        let mut sensor_bus = MockBus::new();
        let mut motor_bus = MockBus::new();
        sensor_bus.set(LS1_BASE, 0b11);
        let mut control = build(&mut sensor_bus, &mut motor_bus);

        assert_eq!(control.step(), DriveCommand::Forward(35_000));

        let state = control.motors().snapshot();
        let expected = ChannelState {
            forward: true,
            enabled: true,
            duty: 35_000,
        };
        assert_eq!((state.m1, state.m2), (expected, expected));
    }

    #[test]
    fn lost_line_stops_without_touching_direction() {
        let mut sensor_bus = MockBus::new();
        let mut motor_bus = MockBus::new();
        sensor_bus.set(LS1_BASE, 0b01);
        let mut control = build(&mut sensor_bus, &mut motor_bus);
        assert_eq!(control.step(), DriveCommand::Left(30_000));

        control.sensor_mut().bus_mut().set(LS1_BASE, 0b00);
        assert_eq!(control.step(), DriveCommand::Stop);

        let state = control.motors().snapshot();
        assert!(!state.m1.enabled && !state.m2.enabled);
        assert_eq!((state.m1.duty, state.m2.duty), (0, 0));
        // still set up for the left spin
        assert!(!state.m1.forward && state.m2.forward);
    }

    #[test]
    fn every_step_waits_one_poll_interval() {
        let mut sensor_bus = MockBus::new();
        let mut motor_bus = MockBus::new();
        let mut control = build(&mut sensor_bus, &mut motor_bus);

        for raw in [0b11, 0b10, 0b01, 0b00, 0b11] {
            control.sensor_mut().bus_mut().set(LS1_BASE, raw);
            control.step();
        }

        assert_eq!(control.delay().waits, 5);
        assert_eq!(control.delay().elapsed_ms(), 100);
    }

    #[test]
    fn follows_changing_line() {
        let mut sensor_bus = MockBus::new();
        let mut motor_bus = MockBus::new();
        let mut control = build(&mut sensor_bus, &mut motor_bus);

        let script = [
            (0b11, DriveCommand::Forward(35_000)),
            (0b10, DriveCommand::Right(30_000)),
            (0b10, DriveCommand::Right(30_000)),
            (0b01, DriveCommand::Left(30_000)),
            (0b00, DriveCommand::Stop),
        ];
        for (raw, expected) in script {
            control.sensor_mut().bus_mut().set(LS1_BASE, raw);
            assert_eq!(control.step(), expected);
        }
    }

    #[test]
    fn sensor_bus_never_writes_while_running() {
        let mut sensor_bus = MockBus::new();
        let mut motor_bus = MockBus::new();
        sensor_bus.set(LS1_BASE, 0b11);
        let mut control = build(&mut sensor_bus, &mut motor_bus);

        for _ in 0..3 {
            control.step();
        }
        drop(control);

        assert_eq!(
            sensor_bus.trace(),
            [Write {
                addr: LS1_BASE + 0x04,
                value: 0xFF,
            }]
        );
        assert!(motor_bus
            .trace()
            .iter()
            .all(|w| !(LS1_BASE..LS1_BASE + 0x10).contains(&w.addr)));
    }
}
