//! Command parser state machine
//!
//! Consumes the host byte stream one byte at a time and drives the I2C
//! port. The protocol has no framing: a byte's meaning depends entirely on
//! the current state. Faults never escape as errors; every fault is folded
//! into the shared [`ErrorFlags`] and the parser lands back in a
//! well-defined state.

use haptica_hal::{I2cError, I2cPort};
use haptica_protocol::{Command, ErrorFlag, ErrorFlags};

/// Parser states
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ParserState {
    /// Between transactions; bytes are interpreted as command opcodes
    Idle,
    /// Start issued; next byte is the address + direction bit
    AwaitingAddress,
    /// Address written; next byte is the data length
    AwaitingLength,
    /// Transferring `remaining` data chunks
    AwaitingData,
}

/// Byte-at-a-time command parser
///
/// Single-threaded and non-reentrant: `consume` is called at most once per
/// service-loop iteration.
#[derive(Debug, Clone)]
pub struct CommandParser {
    state: ParserState,
    /// Direction bit of the current transaction (bit 0 of the address byte)
    direction_is_read: bool,
    /// Data chunks left in the current transfer phase
    remaining: u8,
    /// A start condition was issued and no matching stop yet
    bus_started: bool,
}

impl Default for CommandParser {
    fn default() -> Self {
        Self::new()
    }
}

impl CommandParser {
    /// Create a parser in the idle state
    pub fn new() -> Self {
        Self {
            state: ParserState::Idle,
            direction_is_read: false,
            remaining: 0,
            bus_started: false,
        }
    }

    /// Current state
    pub fn state(&self) -> ParserState {
        self.state
    }

    /// True while an I2C transaction is open
    pub fn bus_started(&self) -> bool {
        self.bus_started
    }

    /// Data chunks left in the current data phase
    pub fn remaining(&self) -> u8 {
        self.remaining
    }

    /// True when the parser is in a read-direction data phase
    ///
    /// Read phases are serviced by the bridge's register poll, not by byte
    /// consumption.
    pub fn read_phase_active(&self) -> bool {
        self.state == ParserState::AwaitingData && self.direction_is_read
    }

    /// Consume one host byte, driving the bus as a side effect
    ///
    /// Returns `Some(byte)` when the command produced a response (only the
    /// error query does); the caller owns queuing it for transmission.
    pub fn consume<B: I2cPort>(
        &mut self,
        byte: u8,
        bus: &mut B,
        errors: &mut ErrorFlags,
    ) -> Option<u8> {
        match self.state {
            ParserState::Idle => return self.consume_idle(byte, bus, errors),

            ParserState::AwaitingAddress => {
                // Lowest bit of the address selects direction (1 = read)
                self.direction_is_read = byte & 1 != 0;
                match bus.write_byte(byte) {
                    Ok(()) => {}
                    Err(I2cError::Nack) => errors.record(ErrorFlag::I2cNackAddress),
                    Err(I2cError::Timeout) => errors.record(ErrorFlag::I2cTimeout),
                }
                // The length byte follows whether or not the device answered
                self.state = ParserState::AwaitingLength;
            }

            ParserState::AwaitingLength => {
                self.remaining = byte;
                self.state = if self.remaining > 0 {
                    ParserState::AwaitingData
                } else {
                    ParserState::Idle
                };
            }

            ParserState::AwaitingData => {
                if self.direction_is_read {
                    // Data bytes are not written over the transport for
                    // read transactions
                    errors.record(ErrorFlag::InvalidCommand);
                } else {
                    match bus.write_byte(byte) {
                        Ok(()) => {}
                        Err(I2cError::Timeout) => errors.record(ErrorFlag::I2cTimeout),
                        Err(I2cError::Nack) => errors.record(ErrorFlag::I2cNackData),
                    }
                    self.finish_data_chunk();
                }
            }
        }
        None
    }

    fn consume_idle<B: I2cPort>(
        &mut self,
        byte: u8,
        bus: &mut B,
        errors: &mut ErrorFlags,
    ) -> Option<u8> {
        match Command::from_byte(byte) {
            Some(Command::GetErrors) => return Some(errors.take()),
            Some(Command::Start) => {
                // Acts as a repeated start when a transaction is open
                bus.start();
                self.bus_started = true;
                self.state = ParserState::AwaitingAddress;
            }
            Some(Command::Stop) if self.bus_started => {
                bus.stop();
                self.bus_started = false;
            }
            // Stop without an open transaction, or any unknown byte
            Some(Command::Stop) | None => errors.record(ErrorFlag::InvalidCommand),
        }
        None
    }

    /// Account for one completed data chunk (write byte or read poll)
    ///
    /// Also called by the bridge when a read poll times out: a failed chunk
    /// is still consumed so the host protocol always terminates.
    pub fn finish_data_chunk(&mut self) {
        self.remaining = self.remaining.saturating_sub(1);
        if self.remaining == 0 {
            self.state = ParserState::Idle;
        }
    }

    /// Force the parser back to idle and drop the open transaction
    ///
    /// Used by the command timeout monitor after it has issued the bus
    /// stop. Does not touch the error flags.
    pub fn abort(&mut self) {
        self.state = ParserState::Idle;
        self.bus_started = false;
        self.remaining = 0;
        self.direction_is_read = false;
    }
}
