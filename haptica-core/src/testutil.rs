//! Mock hal implementations shared by the host tests

use heapless::{Deque, Vec};

use haptica_hal::{ByteTransport, I2cError, I2cPort, LineError};

/// A recorded bus operation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BusOp {
    Start,
    Stop,
    Write(u8),
    Read,
}

/// Scripted I2C port that records every operation
pub struct MockBus {
    pub ops: Vec<BusOp, 512>,
    /// When set, every write fails with this error
    pub write_error: Option<I2cError>,
    /// When set, every read fails with this error
    pub read_error: Option<I2cError>,
    /// Bytes handed out by successful reads
    pub read_data: Deque<u8, 32>,
}

impl MockBus {
    pub fn new() -> Self {
        Self {
            ops: Vec::new(),
            write_error: None,
            read_error: None,
            read_data: Deque::new(),
        }
    }

    /// Queue a 16-bit register value for the next 2-byte read (LSB first)
    pub fn queue_register(&mut self, value: u16) {
        let [lsb, msb] = value.to_le_bytes();
        self.read_data.push_back(lsb).unwrap();
        self.read_data.push_back(msb).unwrap();
    }
}

impl I2cPort for MockBus {
    fn start(&mut self) {
        self.ops.push(BusOp::Start).unwrap();
    }

    fn stop(&mut self) {
        self.ops.push(BusOp::Stop).unwrap();
    }

    fn write_byte(&mut self, byte: u8) -> Result<(), I2cError> {
        self.ops.push(BusOp::Write(byte)).unwrap();
        match self.write_error {
            Some(e) => Err(e),
            None => Ok(()),
        }
    }

    fn read_byte(&mut self, _nack: bool) -> Result<u8, I2cError> {
        self.ops.push(BusOp::Read).unwrap();
        if let Some(e) = self.read_error {
            return Err(e);
        }
        Ok(self.read_data.pop_front().unwrap_or(0))
    }
}

/// In-memory transport with scriptable receive data and send slots
pub struct MockTransport {
    pub rx: Deque<u8, 64>,
    pub tx: Vec<u8, 64>,
    /// When true, `send_slot_available` reports no room
    pub tx_blocked: bool,
    pub line_error: Option<LineError>,
}

impl MockTransport {
    pub fn new() -> Self {
        Self {
            rx: Deque::new(),
            tx: Vec::new(),
            tx_blocked: false,
            line_error: None,
        }
    }

    pub fn push_rx(&mut self, bytes: &[u8]) {
        for &b in bytes {
            self.rx.push_back(b).unwrap();
        }
    }
}

impl ByteTransport for MockTransport {
    fn byte_available(&mut self) -> bool {
        !self.rx.is_empty()
    }

    fn receive_byte(&mut self) -> Option<u8> {
        self.rx.pop_front()
    }

    fn send_slot_available(&mut self) -> bool {
        !self.tx_blocked && self.tx.len() < self.tx.capacity()
    }

    fn send_byte(&mut self, byte: u8) {
        self.tx.push(byte).unwrap();
    }

    fn take_line_error(&mut self) -> Option<LineError> {
        self.line_error.take()
    }
}
