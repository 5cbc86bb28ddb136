//! UART-backed byte-stream transport
//!
//! Wraps a buffered UART behind the [`ByteTransport`] capability set the
//! bridge core expects. Receiver line faults are held until the core
//! collects them with `take_line_error`.

use defmt::warn;
use embassy_rp::uart::{BufferedUart, Error as UartError};
use embedded_io::{Read, ReadReady, Write, WriteReady};

use haptica_hal::{ByteTransport, LineError};

/// Byte transport over a buffered UART
pub struct UartTransport {
    uart: BufferedUart,
    line_error: Option<LineError>,
}

impl UartTransport {
    /// Wrap an already-configured buffered UART
    pub fn new(uart: BufferedUart) -> Self {
        Self {
            uart,
            line_error: None,
        }
    }

    fn note_error(&mut self, error: UartError) {
        warn!("UART line error: {:?}", error);
        self.line_error = Some(match error {
            UartError::Overrun => LineError::Overflow,
            // Parity and break conditions surface as framing faults; the
            // protocol byte only distinguishes overflow from framing
            _ => LineError::Framing,
        });
    }
}

impl ByteTransport for UartTransport {
    fn byte_available(&mut self) -> bool {
        self.uart.read_ready().unwrap_or(false)
    }

    fn receive_byte(&mut self) -> Option<u8> {
        let mut buf = [0u8; 1];
        match self.uart.read(&mut buf) {
            Ok(1) => Some(buf[0]),
            Ok(_) => None,
            Err(e) => {
                self.note_error(e);
                None
            }
        }
    }

    fn send_slot_available(&mut self) -> bool {
        self.uart.write_ready().unwrap_or(false)
    }

    fn send_byte(&mut self, byte: u8) {
        if let Err(e) = self.uart.write(&[byte]) {
            self.note_error(e);
        }
    }

    fn take_line_error(&mut self) -> Option<LineError> {
        self.line_error.take()
    }
}
