pub mod dhb1;
pub mod layout;

pub use dhb1::{ChannelState, MotorDriver, PinState};
pub use layout::{DiscreteLayout, PackedLayout, PwmRegisters, RegisterLayout};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MotorChannel {
    M1,
    M2,
}

impl MotorChannel {
    pub const ALL: [MotorChannel; 2] = [MotorChannel::M1, MotorChannel::M2];
}

/// A whole-robot drive command. The payload is the PWM duty, 0..=65535.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum DriveCommand {
    Forward(u16),
    Backward(u16),
    /// Spin left: motor 1 reverse, motor 2 forward.
    Left(u16),
    /// Spin right: motor 1 forward, motor 2 reverse.
    Right(u16),
    #[default]
    Stop,
}

impl DriveCommand {
    pub fn duty(&self) -> u16 {
        match *self {
            DriveCommand::Forward(d)
            | DriveCommand::Backward(d)
            | DriveCommand::Left(d)
            | DriveCommand::Right(d) => d,
            DriveCommand::Stop => 0,
        }
    }

    /// `(motor 1 forward, motor 2 forward)`, or `None` for a stop, which leaves
    /// the direction fields alone.
    pub fn directions(&self) -> Option<(bool, bool)> {
        match self {
            DriveCommand::Forward(_) => Some((true, true)),
            DriveCommand::Backward(_) => Some((false, false)),
            DriveCommand::Left(_) => Some((false, true)),
            DriveCommand::Right(_) => Some((true, false)),
            DriveCommand::Stop => None,
        }
    }
}

pub trait OpenLoopDrive {
    fn drive(&mut self, command: DriveCommand);
    fn stop(&mut self);
}
