//! Command decoding
//!
//! Turns a completed write transaction into a [`Command`]. The first byte
//! selects the command; everything the decoder does not recognise yields
//! `None` and is silently ignored by the dispatcher.

use crate::Rgb;

/// Set blue, no auto-increment
pub const CMD_PWM0: u8 = 0x81;
/// Set green, no auto-increment
pub const CMD_PWM1: u8 = 0x82;
/// Set red, no auto-increment
pub const CMD_PWM2: u8 = 0x83;
/// Power-save and enable flags
pub const CMD_SETTINGS: u8 = 0x84;
/// Blue, green and red in one write
pub const CMD_AUTO_INCREMENT: u8 = 0x01;
/// Select a built-in pattern
pub const CMD_SCRIPT: u8 = 0xAA;

pub const SETTING_POWERSAVE_MASK: u8 = 0x01;
pub const SETTING_ENABLE_MASK: u8 = 0x02;

/// Expand a 4-bit wire value into an 8-bit channel level
pub const fn wire_to_level(value: u8) -> u8 {
    value << 4
}

/// Channel levels carried by one transaction; `None` leaves a channel as is.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ChannelUpdate {
    pub red: Option<u8>,
    pub green: Option<u8>,
    pub blue: Option<u8>,
}

impl ChannelUpdate {
    /// Collect `(channel code, value)` pairs from the start of the buffer.
    ///
    /// Pairs with an unknown code are skipped, a trailing code without a value
    /// is ignored and a later pair for the same channel wins.
    pub fn scan(bytes: &[u8]) -> Self {
        let mut update = Self::default();
        for pair in bytes.chunks_exact(2) {
            match *pair {
                [CMD_PWM0, value] => update.blue = Some(wire_to_level(value)),
                [CMD_PWM1, value] => update.green = Some(wire_to_level(value)),
                [CMD_PWM2, value] => update.red = Some(wire_to_level(value)),
                _ => {}
            }
        }
        update
    }

    /// Apply the update on top of `color`
    pub fn apply_to(self, color: Rgb) -> Rgb {
        Rgb {
            r: self.red.unwrap_or(color.r),
            g: self.green.unwrap_or(color.g),
            b: self.blue.unwrap_or(color.b),
        }
    }
}

/// A decoded bus command
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// Empty write: rebuild the status reply
    ReadStatus,
    /// Update the power-save and enable flags
    Settings { power_save: bool, enable: bool },
    /// Update one or more channels
    SetChannels(ChannelUpdate),
    /// Set all channels at once
    SetAll(Rgb),
    /// Leave direct color mode and run a pattern (0 = none)
    SelectPattern(u8),
}

impl Command {
    /// Decode a transaction.
    ///
    /// Returns `None` for unknown commands, for commands missing their
    /// argument byte and for auto-increment writes that are not exactly four
    /// bytes long.
    pub fn parse(bytes: &[u8]) -> Option<Self> {
        let Some((&code, args)) = bytes.split_first() else {
            return Some(Self::ReadStatus);
        };

        match code {
            CMD_SETTINGS => args.first().map(|&value| Self::Settings {
                power_save: value & SETTING_POWERSAVE_MASK != 0,
                enable: value & SETTING_ENABLE_MASK != 0,
            }),
            CMD_PWM0 | CMD_PWM1 | CMD_PWM2 => Some(Self::SetChannels(ChannelUpdate::scan(bytes))),
            CMD_AUTO_INCREMENT => match *args {
                [blue, green, red] => Some(Self::SetAll(Rgb {
                    r: wire_to_level(red),
                    g: wire_to_level(green),
                    b: wire_to_level(blue),
                })),
                _ => None,
            },
            CMD_SCRIPT => args.first().map(|&id| Self::SelectPattern(id)),
            _ => None,
        }
    }
}
