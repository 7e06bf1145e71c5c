//! Built-in light patterns
//!
//! Patterns are compiled-in tables of strip frames, each shown for its own
//! delay before the next one, cycling forever. They are selected by id over
//! the bus; id 0 means direct color mode.

mod color_chaser;
mod color_cycle;

use embassy_time::Duration;

use crate::Rgb;
use crate::time_base::{Deadline, Tick, ticks_for};

const PATTERN_NAME_COLOR_CHASER: &str = "color_chaser";
const PATTERN_NAME_COLOR_CYCLE: &str = "color_cycle";

/// Direct color mode
pub const PATTERN_ID_NONE: u8 = 0;
const PATTERN_ID_COLOR_CHASER: u8 = 1;
const PATTERN_ID_COLOR_CYCLE: u8 = 2;

/// What a pattern step writes to the strip
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StripFrame {
    /// Same color on every pixel
    Fill(Rgb),
    /// Explicit pixels from the start of the strip; the rest keep their color
    Pixels(&'static [Rgb]),
}

impl StripFrame {
    /// Render into `frame`, returning the pixels that must be shifted out.
    pub fn render_into(self, frame: &mut [Rgb]) -> &[Rgb] {
        match self {
            Self::Fill(color) => {
                frame.fill(color);
                frame
            }
            Self::Pixels(pixels) => {
                let count = pixels.len().min(frame.len());
                let (head, _) = frame.split_at_mut(count);
                let (source, _) = pixels.split_at(count);
                head.copy_from_slice(source);
                head
            }
        }
    }
}

/// One step of a pattern
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PatternStep {
    pub frame: StripFrame,
    /// Time until the next step
    pub delay: Duration,
}

/// Known pattern ids
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[repr(u8)]
pub enum PatternId {
    ColorChaser = PATTERN_ID_COLOR_CHASER,
    ColorCycle = PATTERN_ID_COLOR_CYCLE,
}

impl PatternId {
    pub fn from_raw(value: u8) -> Option<Self> {
        Some(match value {
            PATTERN_ID_COLOR_CHASER => Self::ColorChaser,
            PATTERN_ID_COLOR_CYCLE => Self::ColorCycle,
            _ => return None,
        })
    }

    pub const fn raw(self) -> u8 {
        self as u8
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::ColorChaser => PATTERN_NAME_COLOR_CHASER,
            Self::ColorCycle => PATTERN_NAME_COLOR_CYCLE,
        }
    }

    pub fn parse_from_str(s: &str) -> Option<Self> {
        match s {
            PATTERN_NAME_COLOR_CHASER => Some(Self::ColorChaser),
            PATTERN_NAME_COLOR_CYCLE => Some(Self::ColorCycle),
            _ => None,
        }
    }

    /// Step table of the pattern
    pub fn steps(self) -> &'static [PatternStep] {
        match self {
            Self::ColorChaser => &color_chaser::STEPS,
            Self::ColorCycle => &color_cycle::STEPS,
        }
    }
}

/// Advances the active pattern at the pace of its own step delays.
#[derive(Debug, Clone, Default)]
pub struct PatternRunner {
    active: Option<PatternId>,
    stage: usize,
    /// `None` until the first step has been shown
    next_step: Option<Deadline>,
}

impl PatternRunner {
    pub const fn new() -> Self {
        Self {
            active: None,
            stage: 0,
            next_step: None,
        }
    }

    /// Select a pattern by raw id and restart it from its first step.
    ///
    /// Unknown ids stop the runner.
    pub fn select(&mut self, raw: u8) {
        self.active = PatternId::from_raw(raw);
        self.stage = 0;
        self.next_step = None;
    }

    pub const fn active(&self) -> Option<PatternId> {
        self.active
    }

    /// Index of the step shown next
    pub const fn stage(&self) -> usize {
        self.stage
    }

    /// Return the frame of the next step if its delay has elapsed.
    pub fn poll(&mut self, now: Tick) -> Option<StripFrame> {
        let pattern = self.active?;
        if let Some(deadline) = self.next_step {
            if !deadline.reached_at(now) {
                return None;
            }
        }

        let steps = pattern.steps();
        let step = steps.get(self.stage)?;
        self.stage = if self.stage + 1 < steps.len() {
            self.stage + 1
        } else {
            0
        };
        self.next_step = Some(Deadline::after(now, ticks_for(step.delay)));
        Some(step.frame)
    }
}
