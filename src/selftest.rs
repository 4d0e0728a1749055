use artybot_hardware::motors::{DriveCommand, OpenLoopDrive};
use embedded_hal::delay::DelayNs;
use fugit::MillisDurationU32;
use log::info;

use crate::time::wait;

/// Short pulses run once at boot so the wiring of both motors can be checked by eye.
pub const PULSES: [DriveCommand; 4] = [
    DriveCommand::Forward(40_000),
    DriveCommand::Backward(35_000),
    DriveCommand::Right(35_000),
    DriveCommand::Left(35_000),
];

pub fn pulse_motors<M: OpenLoopDrive, D: DelayNs>(
    motors: &mut M,
    delay: &mut D,
    duration: MillisDurationU32,
) {
    for command in PULSES {
        info!("pulse {:?}", command);
        motors.drive(command);
        wait(delay, duration);
        motors.stop();
    }
}
