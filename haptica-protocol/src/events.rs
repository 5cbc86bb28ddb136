//! Touch notification tokens
//!
//! Touch events are asynchronous: they share the byte stream with command
//! responses but are not correlated with any command. Each event is a
//! two-byte token, a direction marker followed by the electrode index.

/// Number of electrodes reported by the sensor
pub const ELECTRODE_COUNT: u8 = 12;

// Wire format marker bytes
const MARKER_TOUCHED: u8 = b'T';
const MARKER_RELEASED: u8 = b'R';

/// An edge-triggered touch notification
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum TouchEvent {
    /// Electrode transitioned from released to touched
    Touched(u8),
    /// Electrode transitioned from touched to released
    Released(u8),
}

impl TouchEvent {
    /// Electrode index (0..=11) this event refers to
    pub fn electrode(self) -> u8 {
        match self {
            TouchEvent::Touched(i) | TouchEvent::Released(i) => i,
        }
    }

    /// Encode to the two-byte wire token
    pub fn encode(self) -> [u8; 2] {
        match self {
            TouchEvent::Touched(i) => [MARKER_TOUCHED, i],
            TouchEvent::Released(i) => [MARKER_RELEASED, i],
        }
    }

    /// Decode a wire token (host-side use and tests)
    ///
    /// Returns `None` for an unknown marker or an out-of-range electrode.
    pub fn decode(token: [u8; 2]) -> Option<Self> {
        let [marker, index] = token;
        if index >= ELECTRODE_COUNT {
            return None;
        }
        match marker {
            MARKER_TOUCHED => Some(TouchEvent::Touched(index)),
            MARKER_RELEASED => Some(TouchEvent::Released(index)),
            _ => None,
        }
    }
}
