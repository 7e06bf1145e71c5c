use heapless::Vec;

use crate::config::ReplyFraming;

/// Capacity of the receive and reply buffers
pub const BUFFER_SIZE: usize = 15;

/// Reply capacity: payload plus an optional length prefix
pub const REPLY_CAPACITY: usize = BUFFER_SIZE + 1;

/// Error returned when a byte does not fit into a [`Transaction`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TransactionFull(pub u8);

/// Errors when arming a reply
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReplyError {
    /// Payload exceeds [`BUFFER_SIZE`]
    TooLong,
    /// A read is in progress; try again later
    Busy,
}

/// Bytes of one write transaction, in arrival order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Transaction {
    bytes: Vec<u8, BUFFER_SIZE>,
}

impl Transaction {
    pub const fn new() -> Self {
        Self { bytes: Vec::new() }
    }

    /// Build a transaction from a slice, keeping only the first
    /// [`BUFFER_SIZE`] bytes.
    pub fn from_slice(bytes: &[u8]) -> Self {
        let mut transaction = Self::new();
        for &byte in bytes {
            if transaction.push(byte).is_err() {
                break;
            }
        }
        transaction
    }

    /// Append a received byte
    pub fn push(&mut self, byte: u8) -> Result<(), TransactionFull> {
        self.bytes.push(byte).map_err(TransactionFull)
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}

/// Bytes served to the master on a read
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Reply {
    bytes: Vec<u8, REPLY_CAPACITY>,
}

impl Reply {
    /// Reply that transmits nothing; reads see filler bytes only.
    pub const fn empty() -> Self {
        Self { bytes: Vec::new() }
    }

    /// Frame a payload for transmission
    pub fn new(payload: &[u8], framing: ReplyFraming) -> Result<Self, ReplyError> {
        let len = u8::try_from(payload.len()).map_err(|_| ReplyError::TooLong)?;
        if payload.len() > BUFFER_SIZE {
            return Err(ReplyError::TooLong);
        }

        let mut bytes = Vec::new();
        if framing == ReplyFraming::LengthPrefixed {
            bytes.push(len).map_err(|_| ReplyError::TooLong)?;
        }
        bytes
            .extend_from_slice(payload)
            .map_err(|()| ReplyError::TooLong)?;
        Ok(Self { bytes })
    }

    /// Byte at `index`, or `None` past the logical length
    pub fn get(&self, index: usize) -> Option<u8> {
        self.bytes.get(index).copied()
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}
