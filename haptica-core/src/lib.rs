//! Board-agnostic core logic for the Haptica I2C bridge
//!
//! This crate contains all bridge logic that does not depend on specific
//! hardware implementations:
//!
//! - Command parser state machine (byte stream → I2C transactions)
//! - Command timeout monitor
//! - Touch edge detector (register bitmask → touch/release events)
//! - Bridge session object tying the above to the hal traits
//! - Configuration type definitions
//!
//! Everything here is synchronous and single-threaded: the firmware drives
//! one [`bridge::Bridge::service`] iteration at a time from its service
//! loop, and no component is ever entered from interrupt context.

#![no_std]
#![deny(unsafe_code)]

pub mod bridge;
pub mod config;
pub mod parser;
pub mod timeout;
pub mod touch;

#[cfg(test)]
mod testutil;
