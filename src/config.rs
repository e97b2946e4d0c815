// GestureLink — Hardware & System Configuration
// Target: Seeed Studio Xiao ESP32-C3 (RISC-V)

// ---------------------------------------------------------------------------
// GPIO Pin Definitions (Xiao ESP32-C3 pinout)
// ---------------------------------------------------------------------------
pub const PIN_LED_R: i32 = 2;   // D0/A0 — RGB red channel (active LOW)
pub const PIN_LED_G: i32 = 3;   // D1/A1 — RGB green channel (active LOW)
pub const PIN_LED_B: i32 = 4;   // D2/A2 — RGB blue channel (active LOW)
pub const PIN_I2C_SDA: i32 = 6; // D4    — I2C data line
pub const PIN_I2C_SCL: i32 = 7; // D5    — I2C clock line

// ---------------------------------------------------------------------------
// I2C Bus
// ---------------------------------------------------------------------------
pub const I2C_ADDR_MPU6050: u8 = 0x68;
pub const I2C_TIMEOUT_TICKS: u32 = 1000; // FreeRTOS ticks

// ---------------------------------------------------------------------------
// Task Stack Sizes (bytes)
// ---------------------------------------------------------------------------
pub const STACK_INFERENCE: usize = 8192;
pub const STACK_LED: usize = 4096;
pub const STACK_BLE: usize = 4096;

// ---------------------------------------------------------------------------
// Timing (milliseconds)
// ---------------------------------------------------------------------------
pub const STARTUP_SETTLE_MS: u64 = 1000;        // let the IMU settle after power-on
pub const SAMPLE_POLL_INTERVAL_MS: u64 = 10;    // sensor data-ready poll cadence
pub const SAMPLE_RETRY_DELAY_MS: u64 = 50;      // back-off after a failed collect/classify
pub const INFERENCE_YIELD_MS: u64 = 1;          // end-of-cycle yield to the consumers
pub const LED_POLL_INTERVAL_MS: u64 = 100;      // indicator snapshot cadence
pub const BLE_POLL_INTERVAL_MS: u64 = 100;      // radio poll / publish cadence
pub const GESTURE_LIGHT_DURATION_MS: u64 = 500; // how long a gesture color stays lit

// ---------------------------------------------------------------------------
// AI / Edge Impulse Model
// ---------------------------------------------------------------------------
pub const EI_RAW_SAMPLES_PER_FRAME: usize = 3;  // accX, accY, accZ
pub const EI_RAW_SAMPLE_COUNT: usize = 125;     // 2-second window @ 62.5 Hz
pub const EI_DSP_INPUT_FRAME_SIZE: usize = EI_RAW_SAMPLE_COUNT * EI_RAW_SAMPLES_PER_FRAME; // 375
pub const EI_LABEL_COUNT: usize = 5;

/// New values absorbed per inference cycle (2 samples × 3 axes).
pub const SLIDING_WINDOW_STEP: usize = 6;

// ---------------------------------------------------------------------------
// Consumer Confidence Gates
// ---------------------------------------------------------------------------
// Inclusive thresholds: a result exactly at the threshold passes.
pub const LED_CONFIDENCE_THRESHOLD: f32 = 0.65;
pub const BLE_CONFIDENCE_THRESHOLD: f32 = 0.55;

// ---------------------------------------------------------------------------
// MPU6050 Sensor Scale Factors
// ---------------------------------------------------------------------------
pub const ACCEL_SCALE_8G: f32 = 4096.0; // LSB/g at ±8 g
