//! Bridge session
//!
//! Owns the bus, the transport and all bridge state, and runs one
//! cooperative service-loop iteration at a time. There are no ambient
//! globals: everything the loop touches lives in this object and is
//! threaded through explicitly by the firmware task.

use heapless::Deque;

use haptica_hal::{ByteTransport, I2cPort, LineError};
use haptica_protocol::{ErrorFlag, ErrorFlags};

use crate::config::BridgeConfig;
use crate::parser::CommandParser;
use crate::timeout::CommandTimeout;
use crate::touch::TouchTracker;

/// Outbound byte queue depth: one full poll cycle of two-byte touch tokens
const TX_QUEUE_DEPTH: usize = 2 * crate::touch::ELECTRODE_COUNT;

/// The bridge session object
///
/// `B` and `T` are injected at construction; the session is the sole owner
/// of both for its lifetime, which is what makes the single-threaded
/// resource model hold.
pub struct Bridge<B: I2cPort, T: ByteTransport> {
    bus: B,
    transport: T,
    parser: CommandParser,
    errors: ErrorFlags,
    timeout: CommandTimeout,
    touch: TouchTracker,
    /// Single-byte response awaiting a send slot (only `'E'` produces one)
    pending_response: Option<u8>,
    /// Encoded touch tokens awaiting send slots
    tx_queue: Deque<u8, TX_QUEUE_DEPTH>,
}

impl<B: I2cPort, T: ByteTransport> Bridge<B, T> {
    /// Create a session around the injected bus and transport
    pub fn new(bus: B, transport: T, config: &BridgeConfig) -> Self {
        Self {
            bus,
            transport,
            parser: CommandParser::new(),
            errors: ErrorFlags::new(),
            timeout: CommandTimeout::new(config.cmd_timeout_ms),
            touch: TouchTracker::new(),
            pending_response: None,
            tx_queue: Deque::new(),
        }
    }

    /// True while any error flag is set (drives the fault LED)
    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    /// Current edge-detector state
    pub fn touch(&self) -> &TouchTracker {
        &self.touch
    }

    /// Current parser state
    pub fn parser(&self) -> &CommandParser {
        &self.parser
    }

    /// Run one service-loop iteration
    ///
    /// # Arguments
    /// * `now_ms` - millisecond tick, used only by the timeout monitor
    /// * `touch_ready` - level of the sensor's data-ready line; gates the
    ///   touch register poll
    pub fn service(&mut self, now_ms: u32, touch_ready: bool) {
        if let Some(err) = self.transport.take_line_error() {
            self.errors.record(match err {
                LineError::Overflow => ErrorFlag::TransportOverflow,
                LineError::Framing => ErrorFlag::TransportFraming,
            });
        }

        self.flush_tx();

        // Back-pressure: nothing new is consumed while output is pending
        if self.pending_response.is_none() && self.tx_queue.is_empty() {
            if self.transport.byte_available() {
                if let Some(byte) = self.transport.receive_byte() {
                    self.pending_response =
                        self.parser.consume(byte, &mut self.bus, &mut self.errors);
                    self.timeout.note_activity(now_ms);
                }
            } else if self.parser.read_phase_active() && touch_ready {
                self.poll_touch_register();
            } else if self.parser.bus_started() && self.timeout.expired(now_ms) {
                // Host went away mid-transaction; release the bus
                self.bus.stop();
                self.parser.abort();
                self.errors.record(ErrorFlag::CommandTimeout);
            }
            self.flush_tx();
        }
    }

    /// Perform one 2-byte read of the touch status register and feed the
    /// edge detector
    ///
    /// A bus timeout aborts the cycle without touching detector state, but
    /// the chunk still counts as consumed so the transfer terminates.
    fn poll_touch_register(&mut self) {
        let last_chunk = self.parser.remaining() == 1;

        let register = self
            .bus
            .read_byte(false)
            .and_then(|lsb| self.bus.read_byte(last_chunk).map(|msb| [lsb, msb]))
            .map(u16::from_le_bytes);

        match register {
            Ok(register) => {
                for event in self.touch.poll_register(register) {
                    for byte in event.encode() {
                        if self.tx_queue.push_back(byte).is_err() {
                            self.errors.record(ErrorFlag::TransportOverflow);
                        }
                    }
                }
            }
            Err(_) => self.errors.record(ErrorFlag::I2cTimeout),
        }

        self.parser.finish_data_chunk();
    }

    /// Move queued output into the transport as far as send slots allow
    fn flush_tx(&mut self) {
        while !self.tx_queue.is_empty() && self.transport.send_slot_available() {
            if let Some(byte) = self.tx_queue.pop_front() {
                self.transport.send_byte(byte);
            }
        }

        if self.tx_queue.is_empty() {
            if let Some(byte) = self.pending_response {
                if self.transport.send_slot_available() {
                    self.transport.send_byte(byte);
                    self.pending_response = None;
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testutil::{BusOp, MockBus, MockTransport};
    use haptica_protocol::ErrorFlag;

    fn bridge() -> Bridge<MockBus, MockTransport> {
        Bridge::new(MockBus::new(), MockTransport::new(), &BridgeConfig::default())
    }

    /// Run service iterations until the receive queue drains
    fn run(bridge: &mut Bridge<MockBus, MockTransport>, now_ms: u32) {
        for _ in 0..128 {
            bridge.service(now_ms, false);
        }
    }

    #[test]
    fn test_write_transaction_end_to_end() {
        let mut bridge = bridge();
        bridge.transport.push_rx(&[b'S', 0x5A << 1, 2, 0x5E, 0x0C, b'P']);
        run(&mut bridge, 0);

        assert_eq!(
            bridge.bus.ops.as_slice(),
            &[
                BusOp::Start,
                BusOp::Write(0x5A << 1),
                BusOp::Write(0x5E),
                BusOp::Write(0x0C),
                BusOp::Stop,
            ]
        );
        assert!(!bridge.has_errors());
        // No response byte for any of these commands
        assert!(bridge.transport.tx.is_empty());
    }

    #[test]
    fn test_error_query_response_on_transport() {
        let mut bridge = bridge();
        bridge.transport.push_rx(&[b'P', b'E']);
        run(&mut bridge, 0);

        assert_eq!(
            bridge.transport.tx.as_slice(),
            &[ErrorFlag::InvalidCommand.mask()]
        );
        // Flags were drained by the query
        assert!(!bridge.has_errors());
    }

    #[test]
    fn test_backpressure_holds_command_bytes() {
        let mut bridge = bridge();
        bridge.transport.tx_blocked = true;
        bridge.transport.push_rx(&[b'E', b'S']);

        run(&mut bridge, 0);
        // The response could not be sent, so `'S'` was never consumed
        assert!(bridge.transport.rx.len() == 1);
        assert!(bridge.bus.ops.is_empty());

        // Transport drains, response goes out, then the start is consumed
        bridge.transport.tx_blocked = false;
        run(&mut bridge, 0);
        assert_eq!(bridge.transport.tx.as_slice(), &[0]);
        assert_eq!(bridge.bus.ops.as_slice(), &[BusOp::Start]);
    }

    #[test]
    fn test_command_timeout_force_closes() {
        let mut bridge = bridge();
        bridge.transport.push_rx(&[b'S']);
        bridge.service(1000, false);
        assert!(bridge.parser.bus_started());

        // Quiet within the window: transaction stays open
        bridge.service(1400, false);
        assert!(bridge.parser.bus_started());

        // Past the 500 ms default window
        bridge.service(1501, false);
        assert!(!bridge.parser.bus_started());
        assert_eq!(bridge.bus.ops.as_slice(), &[BusOp::Start, BusOp::Stop]);

        // The flag is visible in the next error query
        bridge.transport.push_rx(&[b'E']);
        run(&mut bridge, 1502);
        assert_eq!(
            bridge.transport.tx.as_slice(),
            &[ErrorFlag::CommandTimeout.mask()]
        );
    }

    #[test]
    fn test_read_phase_emits_touch_events() {
        let mut bridge = bridge();
        bridge.bus.queue_register(0b0000_0000_0101);
        bridge.transport.push_rx(&[b'S', (0x5A << 1) | 1, 1]);
        run(&mut bridge, 0);
        assert!(bridge.parser.read_phase_active());

        // Poll is gated on the data-ready line
        bridge.service(0, false);
        assert!(bridge.parser.read_phase_active());

        bridge.service(0, true);
        assert!(!bridge.parser.read_phase_active());
        assert_eq!(bridge.transport.tx.as_slice(), &[b'T', 0, b'T', 2]);
        assert!(bridge.touch().is_touched(0));
        assert!(bridge.touch().is_touched(2));
    }

    #[test]
    fn test_release_events_on_following_cycle() {
        let mut bridge = bridge();
        bridge.bus.queue_register(0b0000_0000_0001);
        bridge.transport.push_rx(&[b'S', (0x5A << 1) | 1, 2]);
        run(&mut bridge, 0);

        bridge.service(0, true);
        assert_eq!(bridge.transport.tx.as_slice(), &[b'T', 0]);

        bridge.bus.queue_register(0b0000_0000_0000);
        bridge.service(0, true);
        assert_eq!(bridge.transport.tx.as_slice(), &[b'T', 0, b'R', 0]);
        assert_eq!(bridge.parser.state(), crate::parser::ParserState::Idle);
    }

    #[test]
    fn test_steady_state_poll_is_silent() {
        let mut bridge = bridge();
        bridge.bus.queue_register(0b0000_0000_0011);
        bridge.bus.queue_register(0b0000_0000_0011);
        bridge.transport.push_rx(&[b'S', (0x5A << 1) | 1, 2]);
        run(&mut bridge, 0);

        bridge.service(0, true);
        bridge.service(0, true);
        // Two polls of the same value: events only from the first
        assert_eq!(bridge.transport.tx.as_slice(), &[b'T', 0, b'T', 1]);
    }

    #[test]
    fn test_read_timeout_aborts_cycle_and_preserves_state() {
        let mut bridge = bridge();

        // Establish a touched electrode first
        bridge.bus.queue_register(0b0000_0000_0010);
        bridge.transport.push_rx(&[b'S', (0x5A << 1) | 1, 2]);
        run(&mut bridge, 0);
        bridge.service(0, true);
        assert!(bridge.touch().is_touched(1));
        bridge.transport.tx.clear();

        // Second poll times out on the bus
        bridge.bus.read_error = Some(haptica_hal::I2cError::Timeout);
        bridge.service(0, true);

        assert!(bridge.transport.tx.is_empty());
        assert!(bridge.touch().is_touched(1));
        // The chunk is still consumed, so the transfer terminates
        assert_eq!(bridge.parser.state(), crate::parser::ParserState::Idle);

        bridge.transport.push_rx(&[b'E']);
        run(&mut bridge, 0);
        assert_eq!(
            bridge.transport.tx.as_slice(),
            &[ErrorFlag::I2cTimeout.mask()]
        );
    }

    #[test]
    fn test_final_read_chunk_nacks_last_byte() {
        let mut bridge = bridge();
        bridge.bus.queue_register(0);
        bridge.bus.queue_register(0);
        bridge.transport.push_rx(&[b'S', (0x5A << 1) | 1, 2]);
        run(&mut bridge, 0);

        bridge.service(0, true);
        bridge.service(0, true);
        // Four reads issued; only the very last byte is NACK'd by contract,
        // which the mock does not model beyond accepting the flag
        let reads = bridge
            .bus
            .ops
            .iter()
            .filter(|op| matches!(op, BusOp::Read))
            .count();
        assert_eq!(reads, 4);
    }

    #[test]
    fn test_line_errors_fold_into_flags() {
        let mut bridge = bridge();
        bridge.transport.line_error = Some(haptica_hal::LineError::Framing);
        bridge.service(0, false);

        bridge.transport.line_error = Some(haptica_hal::LineError::Overflow);
        bridge.service(0, false);

        bridge.transport.push_rx(&[b'E']);
        run(&mut bridge, 0);
        assert_eq!(
            bridge.transport.tx.as_slice(),
            &[ErrorFlag::TransportFraming.mask() | ErrorFlag::TransportOverflow.mask()]
        );
    }

    #[test]
    fn test_blocked_transport_defers_touch_events() {
        let mut bridge = bridge();
        bridge.bus.queue_register(0b0000_0000_0001);
        bridge.transport.push_rx(&[b'S', (0x5A << 1) | 1, 1]);
        run(&mut bridge, 0);

        bridge.transport.tx_blocked = true;
        bridge.service(0, true);
        assert!(bridge.transport.tx.is_empty());

        bridge.transport.tx_blocked = false;
        bridge.service(0, false);
        assert_eq!(bridge.transport.tx.as_slice(), &[b'T', 0]);
    }
}
