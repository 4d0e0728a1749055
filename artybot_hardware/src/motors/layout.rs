// DHB1 control fields: one register per signal (discrete) or one bit per signal (packed)

use crate::bus::{is_aligned, register_at};
use crate::error::ConfigError;
use crate::motors::MotorChannel;

pub const DHB1_BASE: u32 = 0x44A1_0000;
pub const PWM_BASE: u32 = 0x44A3_0000;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PwmRegisters {
    pub duty_m1: u32,
    pub duty_m2: u32,
    /// Global gate for both duty outputs.
    pub enable: u32,
}

const DEFAULT_PWM: PwmRegisters = PwmRegisters {
    duty_m1: PWM_BASE,
    duty_m2: PWM_BASE + 0x04,
    enable: PWM_BASE + 0x08,
};

impl PwmRegisters {
    /// The standard block layout at `base`.
    pub fn at(base: u32) -> Result<Self, ConfigError> {
        Ok(Self {
            duty_m1: base,
            duty_m2: register_at(base, 0x04)?,
            enable: register_at(base, 0x08)?,
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PackedLayout {
    pub control: u32,
    pub dir_m1: u8,
    pub en_m1: u8,
    pub dir_m2: u8,
    pub en_m2: u8,
    pub pwm: PwmRegisters,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DiscreteLayout {
    pub dir_m1: u32,
    pub dir_m2: u32,
    pub en_m1: u32,
    pub en_m2: u32,
    pub pwm: PwmRegisters,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RegisterLayout {
    Packed(PackedLayout),
    Discrete(DiscreteLayout),
}

/// A one-bit control signal, either a bit inside a shared register or a whole
/// register of its own.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Field {
    Bit { addr: u32, bit: u8 },
    Word { addr: u32 },
}

impl RegisterLayout {
    pub const fn dhb1_discrete() -> Self {
        Self::Discrete(DiscreteLayout {
            dir_m1: DHB1_BASE,
            dir_m2: DHB1_BASE + 0x04,
            en_m1: DHB1_BASE + 0x08,
            en_m2: DHB1_BASE + 0x0C,
            pwm: DEFAULT_PWM,
        })
    }

    pub const fn dhb1_packed() -> Self {
        Self::Packed(PackedLayout {
            control: DHB1_BASE,
            dir_m1: 0,
            en_m1: 1,
            dir_m2: 2,
            en_m2: 3,
            pwm: DEFAULT_PWM,
        })
    }

    pub fn pwm(&self) -> &PwmRegisters {
        match self {
            Self::Packed(p) => &p.pwm,
            Self::Discrete(d) => &d.pwm,
        }
    }

    pub(crate) fn direction(&self, channel: MotorChannel) -> Field {
        match (self, channel) {
            (Self::Packed(p), MotorChannel::M1) => Field::Bit {
                addr: p.control,
                bit: p.dir_m1,
            },
            (Self::Packed(p), MotorChannel::M2) => Field::Bit {
                addr: p.control,
                bit: p.dir_m2,
            },
            (Self::Discrete(d), MotorChannel::M1) => Field::Word { addr: d.dir_m1 },
            (Self::Discrete(d), MotorChannel::M2) => Field::Word { addr: d.dir_m2 },
        }
    }

    pub(crate) fn enable(&self, channel: MotorChannel) -> Field {
        match (self, channel) {
            (Self::Packed(p), MotorChannel::M1) => Field::Bit {
                addr: p.control,
                bit: p.en_m1,
            },
            (Self::Packed(p), MotorChannel::M2) => Field::Bit {
                addr: p.control,
                bit: p.en_m2,
            },
            (Self::Discrete(d), MotorChannel::M1) => Field::Word { addr: d.en_m1 },
            (Self::Discrete(d), MotorChannel::M2) => Field::Word { addr: d.en_m2 },
        }
    }

    pub(crate) fn duty(&self, channel: MotorChannel) -> u32 {
        match channel {
            MotorChannel::M1 => self.pwm().duty_m1,
            MotorChannel::M2 => self.pwm().duty_m2,
        }
    }

    /// Rejects layouts where two fields share storage or an address cannot be
    /// accessed as a 32-bit word.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let pwm = self.pwm();
        match self {
            Self::Packed(p) => {
                let bits = [p.dir_m1, p.en_m1, p.dir_m2, p.en_m2];
                if let Some(&bit) = bits.iter().find(|&&bit| bit >= 32) {
                    return Err(ConfigError::BitOutOfRange { bit });
                }
                if let Some(bit) = first_duplicate(&bits) {
                    return Err(ConfigError::OverlappingBits { bit });
                }
                check_addresses(&[p.control, pwm.duty_m1, pwm.duty_m2, pwm.enable])
            }
            Self::Discrete(d) => check_addresses(&[
                d.dir_m1,
                d.dir_m2,
                d.en_m1,
                d.en_m2,
                pwm.duty_m1,
                pwm.duty_m2,
                pwm.enable,
            ]),
        }
    }
}

fn check_addresses(addrs: &[u32]) -> Result<(), ConfigError> {
    if let Some(&addr) = addrs.iter().find(|&&addr| !is_aligned(addr)) {
        return Err(ConfigError::Misaligned { addr });
    }
    match first_duplicate(addrs) {
        Some(addr) => Err(ConfigError::OverlappingRegisters { addr }),
        None => Ok(()),
    }
}

fn first_duplicate<T: Copy + PartialEq>(items: &[T]) -> Option<T> {
    items
        .iter()
        .enumerate()
        .find(|&(i, item)| items[i + 1..].contains(item))
        .map(|(_, &item)| item)
}
