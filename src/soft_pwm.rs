//! Software duty-cycle generator
//!
//! Three on/off outputs dimmed from a fast periodic interrupt instead of a
//! timer compare unit. Each interrupt advances an 8-bit phase; a channel is
//! asserted when the phase wraps to zero and released when the phase reaches
//! its brightness, giving 256 levels per channel.

use core::cell::Cell;

use critical_section::Mutex;
use embedded_hal::digital::{OutputPin, PinState};

use crate::Rgb;

/// One of the three dimmed outputs
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PwmChannel {
    Red,
    Green,
    Blue,
}

/// Digital outputs driven by [`SoftPwm`]
pub trait ChannelOutputs {
    /// Assert (`true`) or release (`false`) a channel output
    fn set(&mut self, channel: PwmChannel, on: bool);
}

/// Three GPIO pins acting as the dimmed outputs.
///
/// Pin errors are dropped: there is nobody to report them to from the interrupt.
pub struct PwmPins<R, G, B> {
    red: R,
    green: G,
    blue: B,
}

impl<R: OutputPin, G: OutputPin, B: OutputPin> PwmPins<R, G, B> {
    /// Wrap three output pins; all channels are released.
    pub fn new(red: R, green: G, blue: B) -> Self {
        let mut pins = Self { red, green, blue };
        pins.set(PwmChannel::Red, false);
        pins.set(PwmChannel::Green, false);
        pins.set(PwmChannel::Blue, false);
        pins
    }

    /// Release the pins
    pub fn release(self) -> (R, G, B) {
        (self.red, self.green, self.blue)
    }
}

impl<R: OutputPin, G: OutputPin, B: OutputPin> ChannelOutputs for PwmPins<R, G, B> {
    fn set(&mut self, channel: PwmChannel, on: bool) {
        let state = PinState::from(on);
        match channel {
            PwmChannel::Red => {
                let _ = self.red.set_state(state);
            }
            PwmChannel::Green => {
                let _ = self.green.set_state(state);
            }
            PwmChannel::Blue => {
                let _ = self.blue.set_state(state);
            }
        }
    }
}

/// Brightness handed from the foreground (sole writer) to the PWM interrupt.
pub struct SharedLevels {
    levels: Mutex<Cell<Rgb>>,
}

impl SharedLevels {
    pub const fn new() -> Self {
        Self {
            levels: Mutex::new(Cell::new(Rgb { r: 0, g: 0, b: 0 })),
        }
    }

    /// Publish new channel levels
    pub fn publish(&self, levels: Rgb) {
        critical_section::with(|cs| self.levels.borrow(cs).set(levels));
    }

    /// Read the current channel levels
    pub fn load(&self) -> Rgb {
        critical_section::with(|cs| self.levels.borrow(cs).get())
    }
}

impl Default for SharedLevels {
    fn default() -> Self {
        Self::new()
    }
}

/// Phase counter of the duty-cycle generator
#[derive(Debug, Default)]
pub struct SoftPwm {
    phase: u8,
}

impl SoftPwm {
    pub const fn new() -> Self {
        Self { phase: 0 }
    }

    /// Current phase (0-255)
    pub const fn phase(&self) -> u8 {
        self.phase
    }

    /// Interrupt body: advance the phase and update the outputs.
    ///
    /// Level 0 keeps a channel off and level 255 keeps it on; anything in
    /// between is on for `level` phases out of 256.
    pub fn tick<O: ChannelOutputs>(&mut self, levels: Rgb, outputs: &mut O) {
        self.phase = self.phase.wrapping_add(1);

        for (channel, level) in [
            (PwmChannel::Red, levels.r),
            (PwmChannel::Green, levels.g),
            (PwmChannel::Blue, levels.b),
        ] {
            if self.phase == 0 && level > 0 {
                outputs.set(channel, true);
            }
            if level != u8::MAX && self.phase == level {
                outputs.set(channel, false);
            }
        }
    }

    /// Interrupt body reading the levels published by the foreground
    pub fn tick_shared<O: ChannelOutputs>(&mut self, levels: &SharedLevels, outputs: &mut O) {
        self.tick(levels.load(), outputs);
    }
}
