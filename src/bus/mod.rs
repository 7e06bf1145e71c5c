//! Two-wire bus slave
//!
//! The engine is driven from the bus interrupt by the peripheral's status code.
//! Incoming bytes are collected into a [`Transaction`] that is handed to the
//! foreground once the master sends a stop; reads are answered from a pre-armed
//! [`Reply`].

mod buffer;
mod engine;

pub use buffer::{BUFFER_SIZE, REPLY_CAPACITY, Reply, ReplyError, Transaction, TransactionFull};
pub use engine::{BusStats, SessionState, SlaveEngine};

/// Status codes reported by the slave peripheral
pub mod status {
    /// Own address + W received, ACK returned
    pub const SR_SLA_ACK: u8 = 0x60;
    /// Arbitration lost as master, own address + W received
    pub const SR_ARB_LOST_SLA_ACK: u8 = 0x68;
    /// General call received, ACK returned
    pub const SR_GCALL_ACK: u8 = 0x70;
    /// Arbitration lost as master, general call received
    pub const SR_ARB_LOST_GCALL_ACK: u8 = 0x78;
    /// Data received, ACK returned
    pub const SR_DATA_ACK: u8 = 0x80;
    /// Data received, NACK returned
    pub const SR_DATA_NACK: u8 = 0x88;
    /// General call data received, ACK returned
    pub const SR_GCALL_DATA_ACK: u8 = 0x90;
    /// General call data received, NACK returned
    pub const SR_GCALL_DATA_NACK: u8 = 0x98;
    /// Stop or repeated start while addressed as receiver
    pub const SR_STOP: u8 = 0xA0;
    /// Own address + R received, ACK returned
    pub const ST_SLA_ACK: u8 = 0xA8;
    /// Arbitration lost as master, own address + R received
    pub const ST_ARB_LOST_SLA_ACK: u8 = 0xB0;
    /// Data transmitted, ACK received
    pub const ST_DATA_ACK: u8 = 0xB8;
    /// Data transmitted, NACK received
    pub const ST_DATA_NACK: u8 = 0xC0;
    /// Last data byte transmitted, ACK received
    pub const ST_LAST_DATA: u8 = 0xC8;
    /// Illegal start or stop condition
    pub const BUS_ERROR: u8 = 0x00;
}

/// Bus event decoded from a peripheral status code
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BusEvent {
    /// Addressed as receiver
    AddressedForWrite,
    /// General call write
    GeneralCall,
    /// Data byte received and acknowledged
    DataReceived(u8),
    /// General call data byte received and acknowledged
    GeneralCallData(u8),
    /// Stop or repeated start ends a write
    Stop,
    /// Addressed as transmitter
    AddressedForRead,
    /// Master acknowledged a byte and wants the next one
    DataRequested,
    /// Data received but not acknowledged
    ReceiveNack,
    /// Master did not acknowledge a transmitted byte
    TransmitNack,
    /// Last byte transmitted
    LastDataSent,
    /// Illegal start or stop on the bus
    BusError,
    /// Status code the engine does not know
    Unexpected(u8),
}

impl BusEvent {
    /// Decode a status code, reading the data register only for events that
    /// carry a received byte.
    pub fn decode(status: u8, read_data: impl FnOnce() -> u8) -> Self {
        match status {
            status::SR_SLA_ACK | status::SR_ARB_LOST_SLA_ACK => Self::AddressedForWrite,
            status::SR_GCALL_ACK | status::SR_ARB_LOST_GCALL_ACK => Self::GeneralCall,
            status::SR_DATA_ACK => Self::DataReceived(read_data()),
            status::SR_GCALL_DATA_ACK => Self::GeneralCallData(read_data()),
            status::SR_STOP => Self::Stop,
            status::ST_SLA_ACK | status::ST_ARB_LOST_SLA_ACK => Self::AddressedForRead,
            status::ST_DATA_ACK => Self::DataRequested,
            status::SR_DATA_NACK | status::SR_GCALL_DATA_NACK => Self::ReceiveNack,
            status::ST_DATA_NACK => Self::TransmitNack,
            status::ST_LAST_DATA => Self::LastDataSent,
            status::BUS_ERROR => Self::BusError,
            other => Self::Unexpected(other),
        }
    }
}

/// What the interrupt must do to the peripheral after an event
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BusAction {
    /// Acknowledge and keep listening
    Ack,
    /// Load the byte into the data register, then acknowledge
    Transmit(u8),
    /// Reset the peripheral to a clean listening state
    Reset,
}

/// Register-level access to the slave peripheral.
///
/// Implemented by the firmware for its bus controller.
pub trait BusPeripheral {
    /// Status code of the pending event
    fn status(&mut self) -> u8;
    /// Read the received data byte
    fn read_data(&mut self) -> u8;
    /// Load a byte to transmit
    fn write_data(&mut self, byte: u8);
    /// Release the clock and acknowledge the next byte
    fn acknowledge(&mut self);
    /// Recover from a fault and return to listening
    fn reset(&mut self);
}
