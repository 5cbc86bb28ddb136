//! Hardware abstraction traits for the Haptica I2C bridge
//!
//! These traits define the two collaborators the bridge core drives:
//! the raw I2C transaction primitive and the host-facing byte-stream
//! transport. Chip- and link-specific implementations live in the
//! firmware crate.

#![no_std]
#![deny(unsafe_code)]

pub mod i2c;
pub mod transport;

pub use i2c::{I2cError, I2cPort};
pub use transport::{ByteTransport, LineError};
