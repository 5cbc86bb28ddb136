//! I2C bus primitive
//!
//! The bridge protocol exposes raw start/stop/byte operations to the host,
//! so the abstraction here is a bus *port* rather than a transaction-level
//! master: the caller sequences start, address, data and stop itself.

/// Outcome of a single failed bus operation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum I2cError {
    /// Addressed device did not acknowledge the byte
    Nack,
    /// Bus-level timeout (a device held SCL low past the configured limit)
    Timeout,
}

/// Raw I2C bus port
///
/// Operations are synchronous and bounded: an implementation must report
/// `I2cError::Timeout` rather than block indefinitely on a stretched clock.
pub trait I2cPort {
    /// Issue a start condition
    ///
    /// Also valid mid-transaction, where it acts as a repeated start.
    fn start(&mut self);

    /// Issue a stop condition, releasing the bus
    fn stop(&mut self);

    /// Clock out one byte and sample the acknowledge bit
    ///
    /// The address byte is written through this same operation; bit 0 of an
    /// address byte selects the transfer direction (1 = read).
    fn write_byte(&mut self, byte: u8) -> Result<(), I2cError>;

    /// Clock in one byte
    ///
    /// # Arguments
    /// * `nack` - do not acknowledge the byte (set on the final byte of a
    ///   read transfer)
    fn read_byte(&mut self, nack: bool) -> Result<u8, I2cError>;
}
