//! Haptica host protocol
//!
//! This crate defines the byte-stream protocol between a host and the
//! bridge. The protocol is deliberately minimal: single-byte opcodes with
//! no checksum and no framing beyond the position implied by the bridge's
//! parser state.
//!
//! # Protocol Overview
//!
//! Command channel (host → bridge):
//! ```text
//! 'S'                  open an I2C transaction
//! <addr|dir> <len> …   address byte, data length, then len data bytes
//! 'P'                  close the transaction
//! 'E'                  fetch and clear the accumulated error flags
//! ```
//!
//! The only response byte ever sent is the error-flag byte answering `'E'`.
//! Touch notifications travel on the same stream as asynchronous two-byte
//! tokens (`'T'`/`'R'` + electrode index) and are not correlated with any
//! command.

#![no_std]
#![deny(unsafe_code)]

pub mod commands;
pub mod errors;
pub mod events;

pub use commands::{Command, CMD_GET_ERRORS, CMD_START, CMD_STOP};
pub use errors::{ErrorFlag, ErrorFlags};
pub use events::TouchEvent;
