//! Configuration type definitions
//!
//! The bridge configuration is fixed at boot; nothing here is mutated at
//! runtime. Defaults match the original Wixel bridge parameters.

/// Which transport backend carries the host byte stream
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum BridgeMode {
    /// Wireless serial link
    #[default]
    RadioI2c,
    /// Wired UART
    UartI2c,
}

/// Boot-time bridge configuration
#[derive(Debug, Clone, Copy)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct BridgeConfig {
    /// Transport backend selection
    pub bridge_mode: BridgeMode,
    /// Transport baud rate in bits per second
    pub baud_rate: u32,
    /// GPIO number carrying SCL
    pub i2c_scl_pin: u8,
    /// GPIO number carrying SDA
    pub i2c_sda_pin: u8,
    /// I2C clock frequency in kHz
    pub i2c_freq_khz: u32,
    /// Per-operation bus timeout (clock stretching limit) in ms
    pub i2c_timeout_ms: u16,
    /// Idle limit for an open transaction before it is force-closed, in ms
    ///
    /// Zero disables the command timeout monitor.
    pub cmd_timeout_ms: u16,
}

impl Default for BridgeConfig {
    fn default() -> Self {
        Self {
            bridge_mode: BridgeMode::RadioI2c,
            baud_rate: 9600,
            i2c_scl_pin: 10,
            i2c_sda_pin: 11,
            i2c_freq_khz: 100,
            i2c_timeout_ms: 10,
            cmd_timeout_ms: 500,
        }
    }
}
