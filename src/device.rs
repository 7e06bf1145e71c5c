//! Device state and status reply

use crate::Rgb;
use crate::command::Command;
use crate::pattern::PATTERN_ID_NONE;

/// State mutated by the dispatcher and read by the outputs
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DeviceState {
    /// Channel levels, 8-bit
    pub color: Rgb,
    pub power_save: bool,
    pub enable: bool,
    /// Active pattern id, 0 for direct color mode
    pub pattern: u8,
}

impl DeviceState {
    pub const fn new() -> Self {
        Self {
            color: Rgb { r: 0, g: 0, b: 0 },
            power_save: false,
            enable: false,
            pattern: PATTERN_ID_NONE,
        }
    }

    /// Whether a pattern drives the strip instead of the direct color
    pub const fn pattern_active(&self) -> bool {
        self.pattern != PATTERN_ID_NONE
    }

    /// Apply a command. Only [`Command::ReadStatus`] produces a reply.
    pub fn apply(&mut self, command: Command) -> Option<StatusReply> {
        match command {
            Command::ReadStatus => return Some(self.status()),
            Command::Settings { power_save, enable } => {
                self.power_save = power_save;
                self.enable = enable;
            }
            Command::SetChannels(update) => {
                self.color = update.apply_to(self.color);
            }
            Command::SetAll(color) => {
                self.color = color;
            }
            Command::SelectPattern(id) => {
                self.color = Rgb::default();
                self.pattern = id;
            }
        }
        None
    }

    /// Status reply reflecting the state right now
    pub fn status(&self) -> StatusReply {
        StatusReply::from_state(self)
    }
}

/// Two status bytes as read by the master.
///
/// `byte0`: bit 4 power-save, bit 5 enable, low nibble blue.
/// `byte1`: high nibble green, low nibble red.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StatusReply(pub [u8; 2]);

impl StatusReply {
    pub fn from_state(state: &DeviceState) -> Self {
        let flags = ((u8::from(state.power_save) << 4) | (u8::from(state.enable) << 5)) & 0xF0;
        let byte0 = flags | (state.color.b >> 4);
        let byte1 = ((state.color.g >> 4) << 4) | (state.color.r >> 4);
        Self([byte0, byte1])
    }

    pub const fn bytes(self) -> [u8; 2] {
        self.0
    }

    pub const fn power_save(self) -> bool {
        self.0[0] & 0x10 != 0
    }

    pub const fn enable(self) -> bool {
        self.0[0] & 0x20 != 0
    }

    /// Wire value (4 bits) of the red channel
    pub const fn red(self) -> u8 {
        self.0[1] & 0x0F
    }

    /// Wire value (4 bits) of the green channel
    pub const fn green(self) -> u8 {
        self.0[1] >> 4
    }

    /// Wire value (4 bits) of the blue channel
    pub const fn blue(self) -> u8 {
        self.0[0] & 0x0F
    }
}
