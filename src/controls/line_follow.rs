use artybot_hardware::{line_sensor::SensorReading, motors::DriveCommand};

/// Bang-bang line follower for a two-channel sensor.
///
/// | left | right | command        |
/// |------|-------|----------------|
/// | yes  | yes   | forward, high  |
/// | yes  | no    | left, medium   |
/// | no   | yes   | right, medium  |
/// | no   | no    | stop           |
///
/// Which physical side each sensor bit belongs to has not been confirmed on the
/// robot; if it steers away from the line, swap the sensor cable or the bits.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Controller {
    high_duty: u16,
    medium_duty: u16,
}

impl Controller {
    pub const fn new(high_duty: u16, medium_duty: u16) -> Self {
        Self {
            high_duty,
            medium_duty,
        }
    }

    pub fn decide(&self, reading: SensorReading) -> DriveCommand {
        match (reading.left_detected, reading.right_detected) {
            (true, true) => DriveCommand::Forward(self.high_duty),
            (true, false) => DriveCommand::Left(self.medium_duty),
            (false, true) => DriveCommand::Right(self.medium_duty),
            (false, false) => DriveCommand::Stop,
        }
    }
}
