//! Command timeout monitor
//!
//! Guards against a host that disconnects mid-transaction and leaves the
//! bus held open: if no command byte arrives within the configured window
//! while a transaction is open, the bridge force-closes it.

/// Tracks the time of the last consumed command byte
#[derive(Debug, Clone, Copy)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct CommandTimeout {
    timeout_ms: u16,
    last_cmd_ms: u32,
}

impl CommandTimeout {
    /// Create a monitor; `timeout_ms == 0` disables it
    pub fn new(timeout_ms: u16) -> Self {
        Self {
            timeout_ms,
            last_cmd_ms: 0,
        }
    }

    /// Record command activity at the given millisecond tick
    pub fn note_activity(&mut self, now_ms: u32) {
        self.last_cmd_ms = now_ms;
    }

    /// True if the window has elapsed since the last activity
    ///
    /// Uses wrapping arithmetic so the millisecond tick may roll over.
    pub fn expired(&self, now_ms: u32) -> bool {
        self.timeout_ms > 0 && now_ms.wrapping_sub(self.last_cmd_ms) > self.timeout_ms as u32
    }
}
