//! Responder configuration

use embassy_time::Duration;

/// Bus address in the peripheral's register form (7-bit address `0x55`).
pub const DEFAULT_ADDRESS: u8 = 0xAA;

/// Interval between reply refreshes and strip renders
pub const DEFAULT_REFRESH_INTERVAL: Duration = Duration::from_millis(10);

/// Interval between heartbeat toggles
pub const DEFAULT_HEARTBEAT_INTERVAL: Duration = Duration::from_millis(500);

/// How the status reply is laid out on the wire
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ReplyFraming {
    /// Status bytes only
    #[default]
    Bare,
    /// Payload length byte followed by the status bytes
    LengthPrefixed,
}

/// Configuration shared by the bus engine and the scheduler
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResponderConfig {
    /// Own address, register form (7-bit address shifted left by one)
    pub address: u8,
    /// Answer general call writes like addressed writes
    pub general_call: bool,
    /// Status reply layout
    pub reply_framing: ReplyFraming,
    /// Reply refresh and render cadence
    pub refresh_interval: Duration,
    /// Heartbeat toggle cadence
    pub heartbeat_interval: Duration,
}

impl ResponderConfig {
    pub const fn new() -> Self {
        Self {
            address: DEFAULT_ADDRESS,
            general_call: false,
            reply_framing: ReplyFraming::Bare,
            refresh_interval: DEFAULT_REFRESH_INTERVAL,
            heartbeat_interval: DEFAULT_HEARTBEAT_INTERVAL,
        }
    }

    #[must_use]
    pub const fn with_address(mut self, address: u8) -> Self {
        self.address = address;
        self
    }

    #[must_use]
    pub const fn with_general_call(mut self, general_call: bool) -> Self {
        self.general_call = general_call;
        self
    }

    #[must_use]
    pub const fn with_reply_framing(mut self, framing: ReplyFraming) -> Self {
        self.reply_framing = framing;
        self
    }

    #[must_use]
    pub const fn with_refresh_interval(mut self, interval: Duration) -> Self {
        self.refresh_interval = interval;
        self
    }

    #[must_use]
    pub const fn with_heartbeat_interval(mut self, interval: Duration) -> Self {
        self.heartbeat_interval = interval;
        self
    }

    /// 7-bit bus address
    pub const fn seven_bit_address(&self) -> u8 {
        self.address >> 1
    }

    /// Value for the peripheral's own-address register.
    ///
    /// Bit 0 enables general call recognition.
    pub const fn address_register(&self) -> u8 {
        (self.address & 0xFE) | if self.general_call { 1 } else { 0 }
    }
}

impl Default for ResponderConfig {
    fn default() -> Self {
        Self::new()
    }
}
