//! Whole strip stepping through primaries, secondaries and white

use embassy_time::Duration;

use super::{PatternStep, StripFrame};
use crate::Rgb;

const STEP_DELAY: Duration = Duration::from_millis(500);

const fn fill(r: u8, g: u8, b: u8) -> PatternStep {
    PatternStep {
        frame: StripFrame::Fill(Rgb { r, g, b }),
        delay: STEP_DELAY,
    }
}

pub(super) static STEPS: [PatternStep; 7] = [
    fill(255, 0, 0),
    fill(0, 255, 0),
    fill(0, 0, 255),
    fill(255, 255, 0),
    fill(0, 255, 255),
    fill(255, 0, 255),
    fill(255, 255, 255),
];
