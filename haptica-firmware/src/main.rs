//! Haptica - Wireless/Serial to I2C Bridge Firmware
//!
//! Main firmware binary for RP2040-based boards. Bridges the host byte
//! stream onto a bit-banged I2C bus and streams MPR121 touch/release
//! events back to the host.
//!
//! Named after the Greek "haptikos" meaning "able to touch".

#![no_std]
#![no_main]

use defmt::*;
use embassy_executor::Spawner;
use embassy_rp::bind_interrupts;
use embassy_rp::gpio::{Flex, Input, Level, Output, Pull};
use embassy_rp::peripherals::UART0;
use embassy_rp::uart::{BufferedInterruptHandler, Config as UartConfig, Uart};
use embassy_time::{Instant, Timer};
use static_cell::StaticCell;
use {defmt_rtt as _, panic_probe as _};

use haptica_core::bridge::Bridge;
use haptica_core::config::BridgeMode;
use haptica_drivers::touch::Mpr121;

use crate::bus::BitBangI2c;
use crate::config::BRIDGE_CONFIG;
use crate::transport::UartTransport;

mod bus;
mod config;
mod transport;

bind_interrupts!(struct Irqs {
    UART0_IRQ => BufferedInterruptHandler<UART0>;
});

// Static cells for UART buffers (must live forever)
static TX_BUF: StaticCell<[u8; 256]> = StaticCell::new();
static RX_BUF: StaticCell<[u8; 256]> = StaticCell::new();

/// Service-loop period; short enough that a 9600 baud receiver
/// (~1 byte/ms) never backs up the 256-byte buffer
const SERVICE_PERIOD_US: u64 = 200;

/// Main entry point
#[embassy_executor::main]
async fn main(spawner: Spawner) {
    info!("Haptica firmware starting...");

    let p = embassy_rp::init(Default::default());
    info!("Peripherals initialized");

    // Only the wired UART backend is fitted on this board; the radio
    // backend plugs in behind the same transport trait
    if BRIDGE_CONFIG.bridge_mode == BridgeMode::RadioI2c {
        warn!("Radio link not fitted on this board, falling back to UART");
    }

    // Setup UART for host communication
    let mut uart_config = UartConfig::default();
    uart_config.baudrate = BRIDGE_CONFIG.baud_rate;

    let tx_buf = TX_BUF.init([0u8; 256]);
    let rx_buf = RX_BUF.init([0u8; 256]);

    let uart = Uart::new_blocking(p.UART0, p.PIN_0, p.PIN_1, uart_config);
    let uart = uart.into_buffered(Irqs, tx_buf, rx_buf);
    let transport = UartTransport::new(uart);

    info!("UART initialized for host communication");

    // Bit-banged I2C bus; board wiring matches BRIDGE_CONFIG pin numbers
    let scl = Flex::new(p.PIN_10);
    let sda = Flex::new(p.PIN_11);
    let mut bus = BitBangI2c::new(scl, sda, &BRIDGE_CONFIG);

    // MPR121 data-ready line, active low
    let touch_irq = Input::new(p.PIN_5, Pull::Up);

    // Status LEDs: power on solid, fault lit while error flags are set
    let power_led = Output::new(p.PIN_24, Level::High);
    let fault_led = Output::new(p.PIN_25, Level::Low);

    // One-time bulk register initialization of the touch sensor
    match Mpr121::default().init(&mut bus) {
        Ok(()) => info!("MPR121 initialized"),
        Err(e) => warn!("MPR121 init failed: {:?}, continuing as plain bridge", e),
    }

    let bridge = Bridge::new(bus, transport, &BRIDGE_CONFIG);

    spawner
        .spawn(bridge_task(bridge, touch_irq, power_led, fault_led))
        .unwrap();

    info!("Bridge service loop running");
}

/// The cooperative service loop
///
/// Everything with state runs here, one iteration at a time; interrupts
/// only move UART bytes in and out of the buffered driver.
#[embassy_executor::task]
async fn bridge_task(
    mut bridge: Bridge<BitBangI2c<'static>, UartTransport>,
    touch_irq: Input<'static>,
    _power_led: Output<'static>,
    mut fault_led: Output<'static>,
) {
    loop {
        let now_ms = Instant::now().as_millis() as u32;
        let touch_ready = touch_irq.is_low();

        bridge.service(now_ms, touch_ready);

        fault_led.set_level(if bridge.has_errors() {
            Level::High
        } else {
            Level::Low
        });

        Timer::after_micros(SERVICE_PERIOD_US).await;
    }
}
