//! Bit-banged open-drain I2C master
//!
//! The bridge protocol exposes raw start/stop/byte operations, which the
//! RP2040's hardware I2C block cannot do, so the bus is driven directly on
//! two GPIOs. Open-drain is emulated by switching between input (released,
//! pulled high externally) and driven-low output. Clock stretching is
//! honored up to the configured bus timeout.

use embassy_rp::gpio::Flex;
use embassy_time::{block_for, Duration, Instant};

use haptica_core::config::BridgeConfig;
use haptica_hal::{I2cError, I2cPort};

/// Two-pin bit-banged I2C port
pub struct BitBangI2c<'d> {
    scl: Flex<'d>,
    sda: Flex<'d>,
    /// Half of the SCL period
    half_period: Duration,
    /// Clock-stretch limit
    timeout: Duration,
}

impl<'d> BitBangI2c<'d> {
    /// Take ownership of the two bus pins and release them high
    pub fn new(mut scl: Flex<'d>, mut sda: Flex<'d>, config: &BridgeConfig) -> Self {
        // Released state: input, external pull-ups hold the line high.
        // Output level is latched low once so set_as_output() always
        // means "drive low".
        scl.set_low();
        sda.set_low();
        scl.set_as_input();
        sda.set_as_input();

        let half_period_us = (500 / config.i2c_freq_khz.max(1)).max(1) as u64;

        Self {
            scl,
            sda,
            half_period: Duration::from_micros(half_period_us),
            timeout: Duration::from_millis(config.i2c_timeout_ms as u64),
        }
    }

    fn delay(&self) {
        block_for(self.half_period);
    }

    /// Release SCL and wait out any clock stretching
    fn scl_release(&mut self) -> Result<(), I2cError> {
        self.scl.set_as_input();
        let deadline = Instant::now() + self.timeout;
        while self.scl.is_low() {
            if Instant::now() > deadline {
                return Err(I2cError::Timeout);
            }
        }
        Ok(())
    }

    fn scl_drive_low(&mut self) {
        self.scl.set_as_output();
    }

    fn sda_set(&mut self, high: bool) {
        if high {
            self.sda.set_as_input();
        } else {
            self.sda.set_as_output();
        }
    }

    fn sda_read(&mut self) -> bool {
        self.sda.set_as_input();
        self.sda.is_high()
    }
}

impl<'d> I2cPort for BitBangI2c<'d> {
    fn start(&mut self) {
        // Works as a repeated start too: raise both lines first
        self.sda_set(true);
        self.delay();
        let _ = self.scl_release();
        self.delay();
        self.sda_set(false);
        self.delay();
        self.scl_drive_low();
        self.delay();
    }

    fn stop(&mut self) {
        self.sda_set(false);
        self.delay();
        let _ = self.scl_release();
        self.delay();
        self.sda_set(true);
        self.delay();
    }

    fn write_byte(&mut self, byte: u8) -> Result<(), I2cError> {
        let mut data = byte;
        for _ in 0..8 {
            self.sda_set(data & 0x80 != 0);
            data <<= 1;
            self.delay();
            self.scl_release()?;
            self.delay();
            self.scl_drive_low();
        }

        // ACK phase: release SDA, sample while SCL is high
        self.sda_set(true);
        self.delay();
        self.scl_release()?;
        self.delay();
        let nack = self.sda_read();
        self.scl_drive_low();
        self.delay();

        if nack {
            Err(I2cError::Nack)
        } else {
            Ok(())
        }
    }

    fn read_byte(&mut self, nack: bool) -> Result<u8, I2cError> {
        self.sda_set(true);

        let mut data: u8 = 0;
        for _ in 0..8 {
            self.delay();
            self.scl_release()?;
            self.delay();
            data = (data << 1) | self.sda_read() as u8;
            self.scl_drive_low();
        }

        // ACK (SDA low) or NACK (SDA released) after the byte
        self.sda_set(nack);
        self.delay();
        self.scl_release()?;
        self.delay();
        self.scl_drive_low();
        self.sda_set(true);
        self.delay();

        Ok(data)
    }
}
