//! Millisecond time base
//!
//! A 16-bit tick counter advanced by a 1 ms periodic interrupt, and the
//! wraparound-safe deadlines every foreground delay is built on.
//!
//! The counter wraps silently at 65536. Deadlines are compared with a signed
//! 16-bit difference, so a deadline stays valid as long as it is checked within
//! [`MAX_DELAY`] ticks of being reached.

use core::cell::Cell;

use critical_section::Mutex;
use embassy_time::Duration;

/// Longest delay (in ticks) that the signed comparison can represent.
pub const MAX_DELAY: u16 = 0x7FFF;

/// Snapshot of the tick counter
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Tick(pub u16);

impl Tick {
    /// Tick `delta` ticks later, wrapping at 65536
    #[must_use]
    pub const fn wrapping_add(self, delta: u16) -> Self {
        Self(self.0.wrapping_add(delta))
    }
}

/// Point in time at which a delay expires
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Deadline(u16);

impl Deadline {
    /// Deadline `delta` ticks after `now`.
    ///
    /// A zero delta produces a deadline that is already reached.
    pub const fn after(now: Tick, delta: u16) -> Self {
        Self(now.0.wrapping_add(delta).wrapping_sub(1))
    }

    /// Whether the deadline has passed at `now`
    pub const fn reached_at(self, now: Tick) -> bool {
        self.0.wrapping_sub(now.0) & 0x8000 != 0
    }

    /// Raw counter value of the last tick before expiry
    pub const fn raw(self) -> u16 {
        self.0
    }
}

/// Convert a duration to whole milliseconds, saturating at [`MAX_DELAY`].
pub fn ticks_for(duration: Duration) -> u16 {
    u16::try_from(duration.as_millis()).map_or(MAX_DELAY, |ms| ms.min(MAX_DELAY))
}

/// Tick counter shared between the 1 ms interrupt (sole writer) and the
/// foreground loop.
pub struct TimeBase {
    ticks: Mutex<Cell<u16>>,
}

impl TimeBase {
    /// Create a counter starting at zero
    pub const fn new() -> Self {
        Self::starting_at(Tick(0))
    }

    /// Create a counter starting at an arbitrary tick
    pub const fn starting_at(tick: Tick) -> Self {
        Self {
            ticks: Mutex::new(Cell::new(tick.0)),
        }
    }

    /// Interrupt body: advance the counter by exactly one tick.
    pub fn on_tick(&self) {
        critical_section::with(|cs| {
            let ticks = self.ticks.borrow(cs);
            ticks.set(ticks.get().wrapping_add(1));
        });
    }

    /// Current tick
    pub fn now(&self) -> Tick {
        critical_section::with(|cs| Tick(self.ticks.borrow(cs).get()))
    }

    /// Arm a deadline `delta` ticks from now
    pub fn arm(&self, delta: u16) -> Deadline {
        Deadline::after(self.now(), delta)
    }

    /// Arm a deadline `duration` from now
    pub fn arm_for(&self, duration: Duration) -> Deadline {
        self.arm(ticks_for(duration))
    }

    /// Check a deadline against the live counter
    pub fn reached(&self, deadline: Deadline) -> bool {
        deadline.reached_at(self.now())
    }
}

impl Default for TimeBase {
    fn default() -> Self {
        Self::new()
    }
}
