//! Foreground loop
//!
//! A cooperative, non-blocking loop with three activities:
//! - every iteration: dispatch a completed bus transaction
//! - every refresh interval (10 ms): re-arm the status reply, then render the
//!   direct color or advance the active pattern
//! - every heartbeat interval (500 ms): toggle the heartbeat output
//!
//! The only suspension points are deadline checks against the [`TimeBase`].
//!
//! # Usage
//!
//! ```ignore
//! static TIME: TimeBase = TimeBase::new();
//! static BUS: SlaveEngine = SlaveEngine::new(&ResponderConfig::new());
//! static LEVELS: SharedLevels = SharedLevels::new();
//!
//! // 1 ms timer interrupt:    TIME.on_tick();
//! // bus interrupt:           BUS.service(&mut peripheral);
//! // fast timer interrupt:    pwm.tick_shared(&LEVELS, &mut pins);
//!
//! let mut scheduler: Scheduler<'_, _, _, 10> =
//!     Scheduler::new(&BUS, &TIME, &LEVELS, strip, status_led, ResponderConfig::new());
//! scheduler.run();
//! ```

use embedded_hal::digital::StatefulOutputPin;

use crate::bus::{Reply, SlaveEngine, Transaction};
use crate::command::Command;
use crate::config::ResponderConfig;
use crate::device::{DeviceState, StatusReply};
use crate::pattern::PatternRunner;
use crate::soft_pwm::SharedLevels;
use crate::time_base::{Deadline, TimeBase};
use crate::{OutputDriver, Rgb};

/// What one loop iteration did
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PollReport {
    /// A bus transaction was dispatched
    pub dispatched: bool,
    /// The reply was refreshed and the strip rendered
    pub refreshed: bool,
    /// The heartbeat output was toggled
    pub heartbeat: bool,
}

/// Foreground scheduler owning the device state and the outputs.
pub struct Scheduler<'a, S: OutputDriver, H: StatefulOutputPin, const STRIP_LEN: usize> {
    // Shared with interrupts
    bus: &'a SlaveEngine,
    time: &'a TimeBase,
    levels: &'a SharedLevels,

    // Outputs
    strip: S,
    heartbeat: H,

    config: ResponderConfig,
    state: DeviceState,
    patterns: PatternRunner,
    frame_buffer: [Rgb; STRIP_LEN],
    next_refresh: Deadline,
    next_heartbeat: Deadline,
}

impl<'a, S: OutputDriver, H: StatefulOutputPin, const STRIP_LEN: usize>
    Scheduler<'a, S, H, STRIP_LEN>
{
    /// Create a scheduler with the heartbeat output lit; the first refresh
    /// and heartbeat are due immediately.
    pub fn new(
        bus: &'a SlaveEngine,
        time: &'a TimeBase,
        levels: &'a SharedLevels,
        strip: S,
        mut heartbeat: H,
        config: ResponderConfig,
    ) -> Self {
        let _ = heartbeat.set_high();
        let state = DeviceState::new();
        levels.publish(state.color);
        Self {
            bus,
            time,
            levels,
            strip,
            heartbeat,
            config,
            state,
            patterns: PatternRunner::new(),
            frame_buffer: [Rgb::default(); STRIP_LEN],
            next_refresh: time.arm(0),
            next_heartbeat: time.arm(0),
        }
    }

    /// Run one loop iteration without blocking.
    pub fn poll(&mut self) -> PollReport {
        let mut report = PollReport::default();

        if let Some(transaction) = self.bus.take_transaction() {
            self.dispatch(&transaction);
            report.dispatched = true;
        }

        let now = self.time.now();
        if self.next_refresh.reached_at(now) {
            self.refresh();
            self.next_refresh = self.time.arm_for(self.config.refresh_interval);
            report.refreshed = true;
        }

        if self.next_heartbeat.reached_at(now) {
            let _ = self.heartbeat.toggle();
            self.next_heartbeat = self.time.arm_for(self.config.heartbeat_interval);
            report.heartbeat = true;
        }

        report
    }

    /// Run the loop forever.
    pub fn run(&mut self) -> ! {
        loop {
            self.poll();
        }
    }

    /// Interpret a completed transaction and publish the new state.
    fn dispatch(&mut self, transaction: &Transaction) {
        let Some(command) = Command::parse(transaction.as_bytes()) else {
            trace!("ignored transaction {:02x?}", transaction.as_bytes());
            return;
        };
        trace!("dispatch {:?}", command);

        let reply = self.state.apply(command);
        if let Command::SelectPattern(id) = command {
            self.patterns.select(id);
            trace!("pattern {} -> {:?}", id, self.patterns.active());
        }

        self.levels.publish(self.state.color);
        self.arm_status(reply.unwrap_or_else(|| self.state.status()));
    }

    fn refresh(&mut self) {
        self.arm_status(self.state.status());

        if self.state.pattern_active() {
            if let Some(frame) = self.patterns.poll(self.time.now()) {
                let pixels = frame.render_into(&mut self.frame_buffer);
                self.strip.write(pixels);
            }
        } else {
            self.frame_buffer.fill(self.state.color);
            self.strip.write(&self.frame_buffer);
        }
    }

    /// Arm the status reply; a read in progress keeps the previous one until
    /// the next refresh.
    fn arm_status(&self, status: StatusReply) {
        let Ok(reply) = Reply::new(&status.bytes(), self.config.reply_framing) else {
            return;
        };
        if self.bus.arm_reply(reply).is_err() {
            trace!("reply busy, retrying on next refresh");
        }
    }

    pub const fn state(&self) -> &DeviceState {
        &self.state
    }

    pub const fn patterns(&self) -> &PatternRunner {
        &self.patterns
    }

    pub const fn config(&self) -> &ResponderConfig {
        &self.config
    }

    pub const fn strip(&self) -> &S {
        &self.strip
    }

    pub const fn heartbeat(&self) -> &H {
        &self.heartbeat
    }

    pub fn heartbeat_mut(&mut self) -> &mut H {
        &mut self.heartbeat
    }
}
