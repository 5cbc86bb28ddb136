//! Capacitive touch sensor drivers

pub mod mpr121;

pub use mpr121::Mpr121;
