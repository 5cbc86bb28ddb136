//! Sticky error-flag accumulator
//!
//! Faults are never reported synchronously; every component folds its
//! faults into one shared bitset that the host drains with the `'E'`
//! command. The wire format of the `'E'` response is the raw bits.

/// A single fault condition
///
/// The discriminant is the bit position in the wire byte.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
pub enum ErrorFlag {
    /// Device did not acknowledge its address byte
    I2cNackAddress = 0,
    /// Device did not acknowledge a data byte
    I2cNackData = 1,
    /// Bus-level timeout during a transfer
    I2cTimeout = 2,
    /// Byte was not a valid command in the current parser state
    InvalidCommand = 3,
    /// Open transaction force-closed by the command timeout monitor
    CommandTimeout = 4,
    /// Transport receive buffer overflowed
    TransportOverflow = 5,
    /// Transport framing error
    TransportFraming = 6,
}

impl ErrorFlag {
    /// Bit mask of this flag in the wire byte
    pub const fn mask(self) -> u8 {
        1 << (self as u8)
    }
}

/// Accumulated fault bitset
///
/// Flags are monotonically OR'd in by `record` and cleared only by `take`.
/// Nothing else may clear individual flags.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ErrorFlags(u8);

impl ErrorFlags {
    /// Create an empty flag set
    pub const fn new() -> Self {
        Self(0)
    }

    /// Set a flag; setting an already-set flag is a no-op
    pub fn record(&mut self, flag: ErrorFlag) {
        self.0 |= flag.mask();
    }

    /// Read the wire byte and atomically reset the set to empty
    pub fn take(&mut self) -> u8 {
        let bits = self.0;
        self.0 = 0;
        bits
    }

    /// Check a single flag without clearing anything
    pub fn contains(&self, flag: ErrorFlag) -> bool {
        self.0 & flag.mask() != 0
    }

    /// True if no flag is set
    pub fn is_empty(&self) -> bool {
        self.0 == 0
    }

    /// Raw wire byte without clearing
    pub fn bits(&self) -> u8 {
        self.0
    }
}
