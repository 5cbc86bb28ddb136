//! Touch edge detector
//!
//! Turns the periodically-read touch status register into discrete
//! touch/release events. Only transitions produce events: a finger held on
//! an electrode generates one `Touched` on contact and one `Released` when
//! lifted, no matter how many polls happen in between.

use heapless::Vec;

use haptica_protocol::TouchEvent;

/// Number of electrodes tracked
pub const ELECTRODE_COUNT: usize = haptica_protocol::events::ELECTRODE_COUNT as usize;

/// Electrode bits of the status register; the top four bits carry sensor
/// status flags, not touch state
const TOUCH_BITS_MASK: u16 = 0x0FFF;

/// Per-electrode touched/released state with edge detection
#[derive(Debug, Clone)]
pub struct TouchTracker {
    touched: [bool; ELECTRODE_COUNT],
}

impl Default for TouchTracker {
    fn default() -> Self {
        Self::new()
    }
}

impl TouchTracker {
    /// Create a tracker with every electrode released
    pub fn new() -> Self {
        Self {
            touched: [false; ELECTRODE_COUNT],
        }
    }

    /// Current reported state of one electrode
    pub fn is_touched(&self, electrode: usize) -> bool {
        self.touched[electrode]
    }

    /// Process one poll of the touch status register
    ///
    /// Returns the events for every electrode that changed state, in
    /// ascending electrode-index order. Steady state yields no events.
    pub fn poll_register(&mut self, register: u16) -> Vec<TouchEvent, ELECTRODE_COUNT> {
        let bits = register & TOUCH_BITS_MASK;
        let mut events = Vec::new();

        for i in 0..ELECTRODE_COUNT {
            let now = bits & (1 << i) != 0;
            if now != self.touched[i] {
                self.touched[i] = now;
                let event = if now {
                    TouchEvent::Touched(i as u8)
                } else {
                    TouchEvent::Released(i as u8)
                };
                // Cannot fail: at most one event per electrode
                let _ = events.push(event);
            }
        }

        events
    }
}
