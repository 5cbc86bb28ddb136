//! Boot-time configuration
//!
//! Fixed at compile time; edit and rebuild to change. Pin numbers must
//! match the wiring in `main.rs` (embassy pins are typed, so the GPIO
//! selection itself happens there).

use haptica_core::config::{BridgeConfig, BridgeMode};

/// The bridge configuration for this board
pub const BRIDGE_CONFIG: BridgeConfig = BridgeConfig {
    bridge_mode: BridgeMode::UartI2c,
    baud_rate: 9600,
    i2c_scl_pin: 10,
    i2c_sda_pin: 11,
    i2c_freq_khz: 100,
    i2c_timeout_ms: 10,
    cmd_timeout_ms: 500,
};
