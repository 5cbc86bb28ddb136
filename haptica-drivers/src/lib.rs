//! Hardware driver implementations for the Haptica bridge
//!
//! Drivers speak through the [`haptica_hal`] bus traits so they can be
//! exercised on the host with mock buses.

#![no_std]
#![deny(unsafe_code)]

pub mod touch;
