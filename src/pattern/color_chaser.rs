//! Blue dot on red, moving one pixel per step

use embassy_time::Duration;

use super::{PatternStep, StripFrame};
use crate::Rgb;

const STEP_DELAY: Duration = Duration::from_millis(100);

const B: Rgb = Rgb { r: 0, g: 0, b: 255 };
const R: Rgb = Rgb { r: 255, g: 0, b: 0 };

static FRAME_0: [Rgb; 9] = [B, R, R, B, R, R, B, R, R];
static FRAME_1: [Rgb; 9] = [R, B, R, R, B, R, R, B, R];
static FRAME_2: [Rgb; 9] = [R, R, B, R, R, B, R, R, B];

pub(super) static STEPS: [PatternStep; 3] = [
    PatternStep {
        frame: StripFrame::Pixels(&FRAME_0),
        delay: STEP_DELAY,
    },
    PatternStep {
        frame: StripFrame::Pixels(&FRAME_1),
        delay: STEP_DELAY,
    },
    PatternStep {
        frame: StripFrame::Pixels(&FRAME_2),
        delay: STEP_DELAY,
    },
];
