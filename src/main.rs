// GestureLink — Firmware Entry Point
//
// Battery-powered motion-gesture node: a 3-axis accelerometer feeds a
// sliding-window classifier whose latest result is cached in a versioned,
// lock-guarded store. Two independent consumers poll that store — the RGB
// LED indicator and the BLE publisher.
//
// Boot sequence:
//   1. Bring up logging and the shared I2C bus.
//   2. Probe + initialise the MPU6050 (fatal on failure — no recovery
//      path exists without a physical reset).
//   3. Configure the RGB LED (all channels off).
//   4. Bring up the BLE front-end and start advertising.
//   5. Spawn the inference, LED, and BLE tasks and park the main thread.

mod ble;
mod config;
mod drivers;
mod ei;
mod events;
mod store;
mod tasks;
mod window;

use std::sync::{Arc, Mutex};
use std::thread;
use std::time::Duration;

use esp_idf_hal::gpio::{OutputPin, PinDriver};
use esp_idf_hal::i2c::{I2cConfig, I2cDriver};
use esp_idf_hal::prelude::*;

use crate::ble::{BleRadio, WirelessLink};
use crate::config::*;
use crate::drivers::imu::Mpu6050;
use crate::drivers::led::RgbLed;
use crate::ei::EdgeClassifier;
use crate::store::ResultStore;

fn main() -> anyhow::Result<()> {
    // Link esp-idf-sys runtime patches and initialise logging.
    esp_idf_svc::sys::link_patches();
    esp_idf_svc::log::EspLogger::initialize_default();
    log::info!("GestureLink firmware starting…");

    // ---- Peripherals ------------------------------------------------------
    let peripherals = Peripherals::take()?;

    // ---- I2C bus (accelerometer) ------------------------------------------
    let i2c_config = I2cConfig::new().baudrate(400u32.kHz().into());
    let i2c = I2cDriver::new(
        peripherals.i2c0,
        peripherals.pins.gpio6, // SDA
        peripherals.pins.gpio7, // SCL
        &i2c_config,
    )?;
    // SAFETY: The I2C peripheral is a singleton obtained from `Peripherals::take()`.
    // It will live for the entire programme duration (embedded firmware never exits).
    let i2c_bus: &'static Mutex<I2cDriver<'static>> =
        Box::leak(Box::new(Mutex::new(unsafe { core::mem::transmute(i2c) })));

    // ---- Accelerometer (fatal if absent) ----------------------------------
    let imu = Mpu6050::new(i2c_bus);
    if !imu.is_connected() {
        anyhow::bail!("MPU6050 not responding on I2C — check wiring");
    }
    imu.init()?;

    // ---- RGB LED -----------------------------------------------------------
    // The pins are owned, so the drivers are 'static and can move into a task.
    let led: RgbLed<'static> = RgbLed::new(
        PinDriver::output(peripherals.pins.gpio2.downgrade_output())?,
        PinDriver::output(peripherals.pins.gpio3.downgrade_output())?,
        PinDriver::output(peripherals.pins.gpio4.downgrade_output())?,
    );

    // ---- BLE front-end ------------------------------------------------------
    let mut radio = BleRadio::init()?;
    radio.advertise();

    // ---- Shared state -------------------------------------------------------
    // The result store is the only mutable state shared between the tasks.
    let store = Arc::new(ResultStore::new());

    // ---- Spawn tasks (map to FreeRTOS tasks via std::thread) ----------------
    // All three run at the scheduler's default priority; equal priority is
    // deliberate, so the producer cannot starve the consumers or vice versa.

    let inference_store = Arc::clone(&store);
    thread::Builder::new()
        .name("inference".into())
        .stack_size(STACK_INFERENCE)
        .spawn(move || {
            tasks::inference::inference_task(imu, EdgeClassifier, inference_store);
        })?;

    let led_store = Arc::clone(&store);
    thread::Builder::new()
        .name("led".into())
        .stack_size(STACK_LED)
        .spawn(move || {
            tasks::led::led_task(led, led_store);
        })?;

    let ble_store = Arc::clone(&store);
    thread::Builder::new()
        .name("ble".into())
        .stack_size(STACK_BLE)
        .spawn(move || {
            tasks::ble::ble_task(radio, ble_store);
        })?;

    log::info!("Boot complete — entering normal operation");

    // Main thread has nothing left to do — park it forever.
    // (All work happens in the spawned FreeRTOS tasks.)
    loop {
        thread::sleep(Duration::from_secs(60));
    }
}
