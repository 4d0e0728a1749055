// Driver for the Digilent DHB1 dual H-bridge behind the soft-core PWM block

use log::{debug, warn};

use crate::bus::RegisterBus;
use crate::error::ConfigError;
use crate::motors::{
    layout::{Field, RegisterLayout},
    DriveCommand, MotorChannel, OpenLoopDrive,
};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ChannelState {
    pub forward: bool,
    pub enabled: bool,
    pub duty: u32,
}

/// Register read-back of both channels. Identical drive histories give identical
/// snapshots regardless of the register layout.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PinState {
    pub m1: ChannelState,
    pub m2: ChannelState,
    pub pwm_enabled: bool,
}

impl PinState {
    pub fn channel(&self, channel: MotorChannel) -> &ChannelState {
        match channel {
            MotorChannel::M1 => &self.m1,
            MotorChannel::M2 => &self.m2,
        }
    }
}

/// Owns the DHB1 control fields and the PWM block.
///
/// Direction is only ever written while the channel's enable is de-asserted, and
/// enable is only asserted by [`MotorDriver::drive`] after a fresh duty has been
/// written. The hardware is the only copy of the motor state; nothing is cached.
pub struct MotorDriver<B: RegisterBus> {
    bus: B,
    layout: RegisterLayout,
}

impl<B: RegisterBus> MotorDriver<B> {
    /// Validates `layout`, takes the registers and parks the bridge: both enables
    /// off, both duties zero, then the PWM block gated on.
    pub fn configure(bus: B, layout: RegisterLayout) -> Result<Self, ConfigError> {
        layout.validate()?;

        let mut driver = Self { bus, layout };
        driver.stop();
        let gate = driver.layout.pwm().enable;
        driver.bus.write(gate, 1);

        debug!("motor driver configured: {:?}", driver.layout);
        Ok(driver)
    }

    /// Writes the direction field. If the channel is still enabled it is disabled
    /// and its duty zeroed first.
    pub fn set_direction(&mut self, channel: MotorChannel, forward: bool) {
        if self.is_enabled(channel) {
            warn!("{:?} enabled during direction change, disabling", channel);
            self.set_enable(channel, false);
            self.set_duty(channel, 0);
        }
        self.write_field(self.layout.direction(channel), forward);
    }

    pub fn set_enable(&mut self, channel: MotorChannel, on: bool) {
        self.write_field(self.layout.enable(channel), on);
    }

    /// The duty is latched even while the channel is disabled. This never enables.
    pub fn set_duty(&mut self, channel: MotorChannel, duty: u16) {
        let addr = self.layout.duty(channel);
        self.bus.write(addr, u32::from(duty));
    }

    pub fn is_enabled(&self, channel: MotorChannel) -> bool {
        self.read_field(self.layout.enable(channel))
    }

    pub fn drive(&mut self, command: DriveCommand) {
        for channel in MotorChannel::ALL {
            self.set_enable(channel, false);
        }

        if let Some((m1_forward, m2_forward)) = command.directions() {
            self.set_direction(MotorChannel::M1, m1_forward);
            self.set_direction(MotorChannel::M2, m2_forward);
        }

        let duty = command.duty();
        for channel in MotorChannel::ALL {
            self.set_duty(channel, duty);
        }

        if command != DriveCommand::Stop {
            for channel in MotorChannel::ALL {
                self.set_enable(channel, true);
            }
        }
    }

    /// Enables off, then duties to zero. Directions are left as they are.
    pub fn stop(&mut self) {
        for channel in MotorChannel::ALL {
            self.set_enable(channel, false);
        }
        for channel in MotorChannel::ALL {
            self.set_duty(channel, 0);
        }
    }

    pub fn snapshot(&self) -> PinState {
        PinState {
            m1: self.channel_state(MotorChannel::M1),
            m2: self.channel_state(MotorChannel::M2),
            pwm_enabled: self.bus.read(self.layout.pwm().enable) & 1 != 0,
        }
    }

    pub fn layout(&self) -> &RegisterLayout {
        &self.layout
    }

    pub fn bus(&self) -> &B {
        &self.bus
    }

    /// Stops the motors, gates the PWM block off and hands the bus back.
    pub fn free(mut self) -> B {
        self.stop();
        let gate = self.layout.pwm().enable;
        self.bus.write(gate, 0);
        self.bus
    }

    fn channel_state(&self, channel: MotorChannel) -> ChannelState {
        ChannelState {
            forward: self.read_field(self.layout.direction(channel)),
            enabled: self.read_field(self.layout.enable(channel)),
            duty: self.bus.read(self.layout.duty(channel)),
        }
    }

    fn read_field(&self, field: Field) -> bool {
        match field {
            Field::Bit { addr, bit } => self.bus.read(addr) & (1 << bit) != 0,
            Field::Word { addr } => self.bus.read(addr) & 1 != 0,
        }
    }

    fn write_field(&mut self, field: Field, on: bool) {
        match field {
            Field::Bit { addr, bit } => {
                let current = self.bus.read(addr);
                let next = if on {
                    current | (1 << bit)
                } else {
                    current & !(1 << bit)
                };
                self.bus.write(addr, next);
            }
            Field::Word { addr } => self.bus.write(addr, u32::from(on)),
        }
    }
}

impl<B: RegisterBus> OpenLoopDrive for MotorDriver<B> {
    fn drive(&mut self, command: DriveCommand) {
        MotorDriver::drive(self, command)
    }

    fn stop(&mut self) {
        MotorDriver::stop(self)
    }
}
