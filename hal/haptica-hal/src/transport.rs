//! Host byte-stream transport
//!
//! The bridge core is link-agnostic: the same capability set is satisfied
//! by a UART or by a wireless serial link. Framing, buffering and link
//! establishment are the implementation's concern and stay opaque here.

/// Receiver line fault reported by a transport implementation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum LineError {
    /// Receive buffer overrun; at least one byte was lost
    Overflow,
    /// Framing error on the line (bad stop bit or equivalent)
    Framing,
}

/// Non-blocking byte-stream transport to the host
///
/// All operations are polls; none may block. A byte reported by
/// `byte_available` must be returned by the next `receive_byte`, and a send
/// slot reported by `send_slot_available` must accept the next `send_byte`.
pub trait ByteTransport {
    /// True if at least one received byte is waiting
    fn byte_available(&mut self) -> bool;

    /// Take the next received byte, if any
    fn receive_byte(&mut self) -> Option<u8>;

    /// True if the transmitter can accept a byte without dropping it
    fn send_slot_available(&mut self) -> bool;

    /// Queue one byte for transmission
    fn send_byte(&mut self, byte: u8);

    /// Take the most recent receiver line fault, if one occurred
    ///
    /// Clears the fault; returns `None` until the next occurrence.
    fn take_line_error(&mut self) -> Option<LineError> {
        None
    }
}
