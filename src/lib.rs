#![no_std]

#[macro_use]
mod trace;

pub mod bus;
pub mod command;
pub mod config;
pub mod device;
pub mod pattern;
pub mod scheduler;
pub mod soft_pwm;
pub mod time_base;
pub mod ws2801;

pub use bus::{BusAction, BusEvent, BusPeripheral, SlaveEngine, Transaction};
pub use command::Command;
pub use config::{ReplyFraming, ResponderConfig};
pub use device::{DeviceState, StatusReply};
pub use pattern::{PatternId, PatternRunner};
pub use scheduler::{PollReport, Scheduler};
pub use soft_pwm::{ChannelOutputs, PwmPins, SharedLevels, SoftPwm};
pub use time_base::{Deadline, Tick, TimeBase};
pub use ws2801::Ws2801;

pub use embassy_time::Duration;

pub type Rgb = smart_leds::RGB8;

/// Abstract LED strip driver
///
/// Implement this trait to support different strip protocols.
/// The scheduler is generic over this trait.
pub trait OutputDriver {
    /// Write colors to the LED strip
    fn write(&mut self, colors: &[Rgb]);
}
