//! MPR121 12-electrode capacitive touch controller
//!
//! Only the bring-up sequence and the touch status read live here. Edge
//! detection on the status bits is the bridge core's job; this driver
//! never interprets them.

use haptica_hal::{I2cError, I2cPort};

/// Touch status register, low byte (electrodes 0-7)
pub const REG_TOUCH_STATUS: u8 = 0x00;

// Baseline filter, rising (data > baseline)
const REG_MHD_R: u8 = 0x2B;
const REG_NHD_R: u8 = 0x2C;
const REG_NCL_R: u8 = 0x2D;
const REG_FDL_R: u8 = 0x2E;

// Baseline filter, falling (data < baseline)
const REG_MHD_F: u8 = 0x2F;
const REG_NHD_F: u8 = 0x30;
const REG_NCL_F: u8 = 0x31;
const REG_FDL_F: u8 = 0x32;

/// Electrode 0 touch threshold; release follows at +1, then the pair
/// repeats for each further electrode
const REG_ELE0_T: u8 = 0x41;

/// Filter/global CDC configuration
const REG_FIL_CFG: u8 = 0x5D;

/// Electrode configuration (run/standby, enabled electrode count)
const REG_ELE_CFG: u8 = 0x5E;

/// Default per-electrode touch threshold
pub const TOUCH_THRESHOLD: u8 = 0x06;

/// Default per-electrode release threshold
pub const RELEASE_THRESHOLD: u8 = 0x0A;

/// Fixed bring-up sequence, replayed register by register
///
/// Pure configuration data: standby, baseline filter sections, electrode
/// thresholds, filter config, then run mode with all 12 electrodes.
const INIT_TABLE: &[(u8, u8)] = &[
    // Enter standby before touching configuration
    (REG_ELE_CFG, 0x00),
    // Section A - filtering when data is above the baseline
    (REG_MHD_R, 0x01),
    (REG_NHD_R, 0x01),
    (REG_NCL_R, 0x00),
    (REG_FDL_R, 0x00),
    // Section B - filtering when data is below the baseline
    (REG_MHD_F, 0x01),
    (REG_NHD_F, 0x01),
    (REG_NCL_F, 0xFF),
    (REG_FDL_F, 0x02),
    // Section C - touch/release thresholds per electrode
    (REG_ELE0_T, TOUCH_THRESHOLD),
    (REG_ELE0_T + 1, RELEASE_THRESHOLD),
    (REG_ELE0_T + 2, TOUCH_THRESHOLD),
    (REG_ELE0_T + 3, RELEASE_THRESHOLD),
    (REG_ELE0_T + 4, TOUCH_THRESHOLD),
    (REG_ELE0_T + 5, RELEASE_THRESHOLD),
    (REG_ELE0_T + 6, TOUCH_THRESHOLD),
    (REG_ELE0_T + 7, RELEASE_THRESHOLD),
    (REG_ELE0_T + 8, TOUCH_THRESHOLD),
    (REG_ELE0_T + 9, RELEASE_THRESHOLD),
    (REG_ELE0_T + 10, TOUCH_THRESHOLD),
    (REG_ELE0_T + 11, RELEASE_THRESHOLD),
    (REG_ELE0_T + 12, TOUCH_THRESHOLD),
    (REG_ELE0_T + 13, RELEASE_THRESHOLD),
    (REG_ELE0_T + 14, TOUCH_THRESHOLD),
    (REG_ELE0_T + 15, RELEASE_THRESHOLD),
    (REG_ELE0_T + 16, TOUCH_THRESHOLD),
    (REG_ELE0_T + 17, RELEASE_THRESHOLD),
    (REG_ELE0_T + 18, TOUCH_THRESHOLD),
    (REG_ELE0_T + 19, RELEASE_THRESHOLD),
    (REG_ELE0_T + 20, TOUCH_THRESHOLD),
    (REG_ELE0_T + 21, RELEASE_THRESHOLD),
    (REG_ELE0_T + 22, TOUCH_THRESHOLD),
    (REG_ELE0_T + 23, RELEASE_THRESHOLD),
    // Section D - filter configuration (ESI2)
    (REG_FIL_CFG, 0x04),
    // Section E - run mode, all 12 electrodes enabled
    (REG_ELE_CFG, 0x0C),
];

/// MPR121 device handle
///
/// Holds only the 7-bit address; the bus is borrowed per call so it can be
/// handed to the bridge session after bring-up.
#[derive(Debug, Clone, Copy)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Mpr121 {
    address: u8,
}

impl Default for Mpr121 {
    fn default() -> Self {
        Self::new(Self::DEFAULT_ADDRESS)
    }
}

impl Mpr121 {
    /// Factory address with the ADDR pin tied to ground
    pub const DEFAULT_ADDRESS: u8 = 0x5A;

    /// Create a handle for a device at the given 7-bit address
    pub fn new(address: u8) -> Self {
        Self { address }
    }

    /// Replay the bring-up table
    pub fn init<B: I2cPort>(&self, bus: &mut B) -> Result<(), I2cError> {
        for &(register, value) in INIT_TABLE {
            self.write_register(bus, register, value)?;
        }
        Ok(())
    }

    /// Write one configuration register
    pub fn write_register<B: I2cPort>(
        &self,
        bus: &mut B,
        register: u8,
        value: u8,
    ) -> Result<(), I2cError> {
        bus.start();
        let result = (|| {
            bus.write_byte(self.address << 1)?;
            bus.write_byte(register)?;
            bus.write_byte(value)
        })();
        // Release the bus even when the transfer failed part-way
        bus.stop();
        result
    }

    /// Read the 16-bit touch status register pair
    ///
    /// Bits 0-11 are the electrode touch states; the upper bits carry
    /// over-current and auto-config status.
    pub fn read_touch_status<B: I2cPort>(&self, bus: &mut B) -> Result<u16, I2cError> {
        bus.start();
        let result = (|| {
            bus.write_byte(self.address << 1)?;
            bus.write_byte(REG_TOUCH_STATUS)?;
            // Repeated start into the read
            bus.start();
            bus.write_byte((self.address << 1) | 1)?;
            let lsb = bus.read_byte(false)?;
            let msb = bus.read_byte(true)?;
            Ok(u16::from_le_bytes([lsb, msb]))
        })();
        bus.stop();
        result
    }
}
