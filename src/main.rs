//! ParkGate Firmware: Main Entry Point
//!
//! Single-loop controller for a five-slot parking facility.
//!
//! ```text
//! ┌────────────────────────────────────────────────────────────────┐
//! │                      Adapters (outer ring)                     │
//! │                                                                │
//! │  HardwareAdapter    LcdStatusDisplay   SerialLink   LogEventSink│
//! │  (Sensor+Actuator)  (StatusDisplay)    (Telemetry)  (EventSink) │
//! │                                                                │
//! │  ──────────────── Port Trait Boundary ───────────────────      │
//! │                                                                │
//! │  ┌────────────────────────────────────────────────────────┐    │
//! │  │              AppService (pure logic)                   │    │
//! │  │  SlotCounter · GateController · TelemetryEmitter       │    │
//! │  └────────────────────────────────────────────────────────┘    │
//! └────────────────────────────────────────────────────────────────┘
//! ```
#![deny(unused_must_use)]

use std::time::Duration;

use anyhow::Result;
use esp_idf_svc::hal::delay::Ets;
use esp_idf_svc::hal::i2c::{I2cConfig, I2cDriver};
use esp_idf_svc::hal::peripherals::Peripherals;
use esp_idf_svc::hal::units::Hertz;
use log::{info, warn};

use parkgate::adapters::hardware::HardwareAdapter;
use parkgate::adapters::log_sink::LogEventSink;
use parkgate::adapters::serial::SerialLink;
use parkgate::adapters::time::MonotonicClock;
use parkgate::app::service::AppService;
use parkgate::config::SystemConfig;
use parkgate::display::LcdStatusDisplay;
use parkgate::drivers::hw_init;
use parkgate::drivers::lcd::I2cLcd;
use parkgate::pins;

fn main() -> Result<()> {
    // ── 1. ESP-IDF bootstrap ──────────────────────────────────
    esp_idf_svc::sys::link_patches();
    esp_idf_logger::init()?;

    info!("╔══════════════════════════════════════╗");
    info!("║  ParkGate v{}                        ║", env!("CARGO_PKG_VERSION"));
    info!("╚══════════════════════════════════════╝");

    // ── 2. Configuration ──────────────────────────────────────
    let config = SystemConfig::default();
    config.validate()?;
    match serde_json::to_string(&config) {
        Ok(json) => info!("Config: {json}"),
        Err(e) => warn!("Config not serialisable: {e}"),
    }

    // ── 3. Peripherals ────────────────────────────────────────
    hw_init::init_peripherals()?;
    let mut hw = HardwareAdapter::board();

    let peripherals = Peripherals::take()?;
    let i2c = I2cDriver::new(
        peripherals.i2c0,
        peripherals.pins.gpio8,
        peripherals.pins.gpio9,
        &I2cConfig::new().baudrate(Hertz(pins::I2C_BAUD_HZ)),
    )?;
    let mut lcd = I2cLcd::new(i2c, Ets, pins::LCD_I2C_ADDR);
    if let Err(e) = lcd.init() {
        // The facility still works without its display.
        warn!("LCD init failed: {e}");
    }
    let mut display = LcdStatusDisplay::new(lcd, config.full_notice_hold_frames());

    let mut link = SerialLink::new(std::io::stdout());
    let mut log_sink = LogEventSink::new();
    let clock = MonotonicClock::new();

    // ── 4. Splash ─────────────────────────────────────────────
    display.show_splash();
    std::thread::sleep(Duration::from_millis(u64::from(config.splash_ms)));
    display.clear();

    // ── 5. Control loop ───────────────────────────────────────
    let poll = Duration::from_millis(u64::from(config.poll_interval_ms));
    let mut app = AppService::new(config);
    app.start(&mut hw, &mut log_sink);

    info!("System ready. Entering control loop.");
    loop {
        app.tick(
            clock.now_ms(),
            &mut hw,
            &mut display,
            &mut link,
            &mut log_sink,
        );
        std::thread::sleep(poll);
    }
}
