//! WS2801 strip output
//!
//! Bit-banged clock/data shift-out. Each pixel is sent as red, green, blue,
//! MSB first, data changing while the clock is low and sampled on the rising
//! edge. The strip latches once the clock stays low for 500 µs, which the
//! refresh interval of the scheduler guarantees.

use embedded_hal::digital::OutputPin;

use crate::{OutputDriver, Rgb};

/// WS2801 driver over two GPIO pins
pub struct Ws2801<CLK, DATA> {
    clock: CLK,
    data: DATA,
}

impl<CLK: OutputPin, DATA: OutputPin> Ws2801<CLK, DATA> {
    pub fn new(mut clock: CLK, mut data: DATA) -> Self {
        let _ = clock.set_low();
        let _ = data.set_low();
        Self { clock, data }
    }

    /// Release the pins
    pub fn release(self) -> (CLK, DATA) {
        (self.clock, self.data)
    }

    fn write_byte(&mut self, byte: u8) {
        for bit in (0..8).rev() {
            let _ = self.clock.set_low();
            let _ = if byte & (1 << bit) != 0 {
                self.data.set_high()
            } else {
                self.data.set_low()
            };
            let _ = self.clock.set_high();
        }
    }
}

impl<CLK: OutputPin, DATA: OutputPin> OutputDriver for Ws2801<CLK, DATA> {
    fn write(&mut self, colors: &[Rgb]) {
        for color in colors {
            self.write_byte(color.r);
            self.write_byte(color.g);
            self.write_byte(color.b);
        }
        // Latch
        let _ = self.clock.set_low();
    }
}
