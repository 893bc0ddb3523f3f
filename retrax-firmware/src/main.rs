//! Retrax - Retractable Lift Controller Firmware
//!
//! Main firmware binary for RP2040-based lift controller boards.
//! Supervises the lift motor, the azimuth steering enable and the
//! drive-motor-clutch from two buttons, an emergency line and two
//! position sensors.

#![no_std]
#![no_main]

use defmt::*;
use embassy_executor::Spawner;
use embassy_rp::bind_interrupts;
use embassy_rp::gpio::{Input, Level, Output, Pull};
use embassy_rp::i2c::{self, I2c};
use embassy_rp::peripherals::I2C0;
use {defmt_rtt as _, panic_probe as _};

use retrax_core::actuator::Plant;
use retrax_core::config::{MoveCounters, TimingConfig};
use retrax_drivers::indicator::LedPair;
use retrax_drivers::lift::{LiftPins, Pcf8574Lift, PCF8574_DEFAULT_ADDRESS};
use retrax_drivers::switch::GpioSwitch;
use retrax_hal_rp2040::flash::Rp2040FlashStorage;

use crate::board::{InputLevels, I2C_FREQUENCY_HZ};
use crate::config::{SettingsPersistence, SharedStore, Store};
use crate::tasks::InputLines;

mod board;
mod channels;
mod config;
mod tasks;

bind_interrupts!(struct Irqs {
    I2C0_IRQ => i2c::InterruptHandler<I2C0>;
});

/// Main entry point
#[embassy_executor::main]
async fn main(spawner: Spawner) {
    info!("Retrax firmware starting...");

    // Initialize RP2040 peripherals
    let p = embassy_rp::init(Default::default());
    info!("Peripherals initialized");

    // Load persisted settings into the shared RAM store
    let flash = Rp2040FlashStorage::new(p.FLASH, p.DMA_CH0);
    let mut persistence = SettingsPersistence::new(flash);
    let mut loaded = Store::new();
    persistence.load(&mut loaded).await;
    SharedStore::install(loaded);

    // Missing or out-of-range values fall back to defaults and are
    // written back, so the first save fills the flash
    let mut store = SharedStore;
    let timing = TimingConfig::load(&mut store);
    let counters = MoveCounters::load(&mut store);
    info!(
        "Move counters: retracted={} extended={}",
        counters.retracted, counters.extended
    );
    if store.take_dirty() {
        channels::PERSIST_REQUEST.signal(());
    }

    // Lift motor on the I2C port expander
    let mut i2c_config = i2c::Config::default();
    i2c_config.frequency = I2C_FREQUENCY_HZ;
    let bus = I2c::new_async(p.I2C0, p.PIN_21, p.PIN_20, Irqs, i2c_config);
    let mut lift = Pcf8574Lift::new(bus, PCF8574_DEFAULT_ADDRESS, LiftPins::default());
    if let Err(e) = lift.reset().await {
        warn!("Lift expander not responding: {:?}", e);
    }
    info!("I2C initialized for lift expander");

    // Enable lines, driven off before the controller starts
    let dmc = unwrap!(GpioSwitch::new_active_high(Output::new(p.PIN_16, Level::Low)));
    let azimuth = unwrap!(GpioSwitch::new_active_high(Output::new(p.PIN_17, Level::Low)));

    let plant = Plant::new(lift, azimuth, dmc, store);

    // Button LEDs
    let leds = LedPair::new(
        Output::new(p.PIN_14, Level::Low),
        Output::new(p.PIN_15, Level::Low),
    );

    // Operator and sensor inputs
    let lines = InputLines {
        up: Input::new(p.PIN_2, Pull::Up),
        down: Input::new(p.PIN_3, Pull::Up),
        emergency: Input::new(p.PIN_4, Pull::Up),
        retracted: Input::new(p.PIN_5, Pull::Down),
        extended: Input::new(p.PIN_6, Pull::Down),
    };

    info!("GPIO initialized");

    let levels = InputLevels::default();
    if tasks::factory_reset_held(&lines, &levels).await {
        warn!("Both buttons held at power-up, resetting move counters");
        channels::FACTORY_RESET.signal(());
    }

    // Spawn tasks
    spawner.spawn(tasks::tick_task()).unwrap();
    spawner
        .spawn(tasks::sampler_task(lines, levels))
        .unwrap();
    spawner.spawn(tasks::indicator_task(leds)).unwrap();
    spawner.spawn(tasks::status_task()).unwrap();
    spawner
        .spawn(tasks::storage_task(persistence, SharedStore))
        .unwrap();
    spawner
        .spawn(tasks::controller_task(timing, counters, plant))
        .unwrap();

    info!("All tasks spawned, firmware running");

    loop {
        embassy_time::Timer::after_secs(60).await;
        trace!("Main loop heartbeat");
    }
}
