use core::cell::RefCell;
use core::mem;

use critical_section::Mutex;

use super::buffer::{Reply, ReplyError, Transaction};
use super::{BusAction, BusEvent, BusPeripheral};
use crate::config::ResponderConfig;

/// Filler sent when the master reads past the reply.
const FILLER: u8 = 0x00;

/// Write session as seen from the foreground
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    /// Waiting to be addressed
    Idle,
    /// Collecting bytes of a write
    Receiving,
    /// A completed write waits for dispatch
    Ready,
    /// Dropping a write that started before the last one was dispatched
    Discarding,
}

/// Diagnostic counters, wrapping
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BusStats {
    /// Writes completed by a stop condition
    pub transactions: u16,
    /// Received bytes that did not fit or were outside an open write
    pub dropped_bytes: u16,
    /// Peripheral resets, including the normal end of every read
    pub resets: u16,
}

/// The session tag owns the receive buffer, so completing a write and handing
/// it over are both moves of the same value.
#[derive(Debug, Default)]
enum Session {
    #[default]
    Idle,
    Receiving(Transaction),
    Ready(Transaction),
    /// Addressed while a write was still pending. Holds that write until the
    /// foreground takes it and drops every byte of the new one.
    Discarding(Option<Transaction>),
}

#[derive(Debug)]
struct EngineState {
    session: Session,
    reply: Reply,
    cursor: usize,
    reading: bool,
    stats: BusStats,
}

impl EngineState {
    const fn new() -> Self {
        Self {
            session: Session::Idle,
            reply: Reply::empty(),
            cursor: 0,
            reading: false,
            stats: BusStats {
                transactions: 0,
                dropped_bytes: 0,
                resets: 0,
            },
        }
    }

    fn handle(&mut self, event: BusEvent, general_call: bool) -> BusAction {
        match event {
            BusEvent::GeneralCall | BusEvent::GeneralCallData(_) if !general_call => {
                self.reset()
            }
            BusEvent::AddressedForWrite | BusEvent::GeneralCall => {
                self.reading = false;
                self.session = match mem::take(&mut self.session) {
                    Session::Idle => Session::Receiving(Transaction::new()),
                    Session::Ready(pending) => Session::Discarding(Some(pending)),
                    // Repeated start keeps the open session
                    other => other,
                };
                BusAction::Ack
            }
            BusEvent::DataReceived(byte) | BusEvent::GeneralCallData(byte) => {
                self.receive(byte);
                BusAction::Ack
            }
            BusEvent::Stop => {
                self.reading = false;
                self.session = match mem::take(&mut self.session) {
                    // An empty write is a status read and completes like any other
                    Session::Receiving(transaction) => self.complete(transaction),
                    Session::Discarding(pending) => Self::resume(pending),
                    // Nothing was addressed for write
                    other => other,
                };
                BusAction::Ack
            }
            BusEvent::AddressedForRead => {
                self.cursor = 0;
                self.reading = true;
                BusAction::Transmit(self.next_reply_byte())
            }
            BusEvent::DataRequested => BusAction::Transmit(self.next_reply_byte()),
            BusEvent::ReceiveNack
            | BusEvent::TransmitNack
            | BusEvent::LastDataSent
            | BusEvent::BusError
            | BusEvent::Unexpected(_) => self.reset(),
        }
    }

    fn receive(&mut self, byte: u8) {
        let stored = match &mut self.session {
            Session::Receiving(transaction) => transaction.push(byte).is_ok(),
            // Not addressed, or the pending write is owned by the foreground
            Session::Idle | Session::Ready(_) | Session::Discarding(_) => false,
        };
        if !stored {
            self.stats.dropped_bytes = self.stats.dropped_bytes.wrapping_add(1);
        }
    }

    fn complete(&mut self, transaction: Transaction) -> Session {
        self.stats.transactions = self.stats.transactions.wrapping_add(1);
        Session::Ready(transaction)
    }

    /// Session left behind once a discarded write ends.
    fn resume(pending: Option<Transaction>) -> Session {
        match pending {
            Some(transaction) => Session::Ready(transaction),
            None => Session::Idle,
        }
    }

    fn next_reply_byte(&mut self) -> u8 {
        match self.reply.get(self.cursor) {
            Some(byte) => {
                self.cursor = self.cursor.saturating_add(1);
                byte
            }
            None => FILLER,
        }
    }

    fn reset(&mut self) -> BusAction {
        self.reading = false;
        self.session = match mem::take(&mut self.session) {
            Session::Receiving(_) => Session::Idle,
            Session::Discarding(pending) => Self::resume(pending),
            other => other,
        };
        self.stats.resets = self.stats.resets.wrapping_add(1);
        BusAction::Reset
    }
}

/// Slave side of the two-wire protocol.
///
/// `handle`/`service` run in the bus interrupt; `take_transaction` and
/// `arm_reply` run in the foreground. Every call is a short critical section.
pub struct SlaveEngine {
    state: Mutex<RefCell<EngineState>>,
    general_call: bool,
}

impl SlaveEngine {
    pub const fn new(config: &ResponderConfig) -> Self {
        Self {
            state: Mutex::new(RefCell::new(EngineState::new())),
            general_call: config.general_call,
        }
    }

    /// Advance the state machine by one bus event.
    pub fn handle(&self, event: BusEvent) -> BusAction {
        critical_section::with(|cs| {
            self.state
                .borrow(cs)
                .borrow_mut()
                .handle(event, self.general_call)
        })
    }

    /// Complete bus interrupt body: decode the status, advance the state
    /// machine and drive the peripheral.
    pub fn service<P: BusPeripheral>(&self, peripheral: &mut P) -> BusAction {
        let status = peripheral.status();
        let event = BusEvent::decode(status, || peripheral.read_data());
        let action = self.handle(event);
        match action {
            BusAction::Ack => peripheral.acknowledge(),
            BusAction::Transmit(byte) => {
                peripheral.write_data(byte);
                peripheral.acknowledge();
            }
            BusAction::Reset => peripheral.reset(),
        }
        action
    }

    /// Take the completed write, if any, and return the engine to idle.
    pub fn take_transaction(&self) -> Option<Transaction> {
        critical_section::with(|cs| {
            let mut state = self.state.borrow(cs).borrow_mut();
            match mem::take(&mut state.session) {
                Session::Ready(transaction) => Some(transaction),
                Session::Discarding(pending) => {
                    state.session = Session::Discarding(None);
                    pending
                }
                other => {
                    state.session = other;
                    None
                }
            }
        })
    }

    /// Replace the reply served to subsequent reads.
    ///
    /// Refused while a read is in progress so a master never sees a mix of two
    /// replies.
    pub fn arm_reply(&self, reply: Reply) -> Result<(), ReplyError> {
        critical_section::with(|cs| {
            let mut state = self.state.borrow(cs).borrow_mut();
            if state.reading {
                return Err(ReplyError::Busy);
            }
            state.reply = reply;
            state.cursor = 0;
            Ok(())
        })
    }

    pub fn state(&self) -> SessionState {
        critical_section::with(|cs| match self.state.borrow(cs).borrow().session {
            Session::Idle => SessionState::Idle,
            Session::Receiving(_) => SessionState::Receiving,
            Session::Ready(_) | Session::Discarding(Some(_)) => SessionState::Ready,
            Session::Discarding(None) => SessionState::Discarding,
        })
    }

    /// Whether a read is in progress
    pub fn is_reading(&self) -> bool {
        critical_section::with(|cs| self.state.borrow(cs).borrow().reading)
    }

    pub fn stats(&self) -> BusStats {
        critical_section::with(|cs| self.state.borrow(cs).borrow().stats)
    }
}
