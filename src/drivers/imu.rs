// GestureLink — MPU6050 Accelerometer Driver
//
// Custom register-level driver over a shared I2C bus.
// Avoids external crate version conflicts with esp-idf-hal.
//
// Configured for 62.5 Hz output with the data-ready flag enabled, so the
// inference task can poll `try_read` without ever blocking on the bus.

use std::sync::Mutex;

use esp_idf_hal::i2c::I2cDriver;

use crate::config::*;
use crate::events::Sample;
use crate::window::SampleSource;

/// Thread-safe handle to a shared I2C bus.
pub type SharedBus = &'static Mutex<I2cDriver<'static>>;

// MPU6050 register addresses
const REG_SMPLRT_DIV: u8 = 0x19;
const REG_CONFIG: u8 = 0x1A;
const REG_ACCEL_CONFIG: u8 = 0x1C;
const REG_INT_ENABLE: u8 = 0x38;
const REG_INT_STATUS: u8 = 0x3A;
const REG_ACCEL_XOUT_H: u8 = 0x3B; // Start of 6-byte accel burst
const REG_PWR_MGMT_1: u8 = 0x6B;
const REG_WHO_AM_I: u8 = 0x75;
const WHO_AM_I_EXPECTED: u8 = 0x68;

const DATA_RDY_BIT: u8 = 0x01;

pub struct Mpu6050 {
    bus: SharedBus,
}

impl Mpu6050 {
    pub fn new(bus: SharedBus) -> Self {
        Self { bus }
    }

    /// Verify the device is reachable on the I2C bus.
    pub fn is_connected(&self) -> bool {
        let mut bus = self.bus.lock().unwrap();
        let mut buf = [0u8; 1];
        match bus.write_read(I2C_ADDR_MPU6050, &[REG_WHO_AM_I], &mut buf, I2C_TIMEOUT_TICKS) {
            Ok(()) => buf[0] == WHO_AM_I_EXPECTED,
            Err(_) => false,
        }
    }

    /// Wake the sensor and configure it for gesture capture:
    /// 62.5 Hz output rate, DLPF 21 Hz, accel ±8 g, data-ready flag enabled.
    pub fn init(&self) -> anyhow::Result<()> {
        let mut bus = self.bus.lock().unwrap();

        // Wake up (clear SLEEP bit)
        bus.write(I2C_ADDR_MPU6050, &[REG_PWR_MGMT_1, 0x00], I2C_TIMEOUT_TICKS)?;

        // DLPF bandwidth 21 Hz (internal rate 1 kHz)
        bus.write(I2C_ADDR_MPU6050, &[REG_CONFIG, 0x04], I2C_TIMEOUT_TICKS)?;

        // Sample rate = 1 kHz / (1 + 15) = 62.5 Hz
        bus.write(I2C_ADDR_MPU6050, &[REG_SMPLRT_DIV, 0x0F], I2C_TIMEOUT_TICKS)?;

        // Accelerometer: ±8 g
        bus.write(I2C_ADDR_MPU6050, &[REG_ACCEL_CONFIG, 0x10], I2C_TIMEOUT_TICKS)?;

        // Data-ready interrupt flag (polled via INT_STATUS, no IRQ line)
        bus.write(I2C_ADDR_MPU6050, &[REG_INT_ENABLE, DATA_RDY_BIT], I2C_TIMEOUT_TICKS)?;

        log::info!("MPU6050 initialised (±8g, 62.5Hz, DLPF 21Hz)");
        Ok(())
    }
}

impl SampleSource for Mpu6050 {
    /// Non-blocking read: `Ok(None)` until the sensor has a fresh sample,
    /// then one burst-read of the three accel axes converted to g.
    fn try_read(&mut self) -> anyhow::Result<Option<Sample>> {
        let mut bus = self.bus.lock().unwrap();

        let mut status = [0u8; 1];
        bus.write_read(I2C_ADDR_MPU6050, &[REG_INT_STATUS], &mut status, I2C_TIMEOUT_TICKS)?;
        if status[0] & DATA_RDY_BIT == 0 {
            return Ok(None);
        }

        let mut raw = [0u8; 6];
        bus.write_read(I2C_ADDR_MPU6050, &[REG_ACCEL_XOUT_H], &mut raw, I2C_TIMEOUT_TICKS)?;

        Ok(Some(Sample {
            x: i16::from_be_bytes([raw[0], raw[1]]) as f32 / ACCEL_SCALE_8G,
            y: i16::from_be_bytes([raw[2], raw[3]]) as f32 / ACCEL_SCALE_8G,
            z: i16::from_be_bytes([raw[4], raw[5]]) as f32 / ACCEL_SCALE_8G,
        }))
    }
}
