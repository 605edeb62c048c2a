//! GPIO / peripheral pin assignments for the ParkGate controller board.
//!
//! Single source of truth: every driver references this module rather than
//! hard-coding pin numbers.

// ---------------------------------------------------------------------------
// IR sensors (active-low, external pull-up)
// ---------------------------------------------------------------------------

/// Entry trigger: vehicle waiting at the entry barrier.
pub const IR_ENTRY_GPIO: i32 = 4;
/// Back trigger: vehicle has passed the entry barrier.
pub const IR_BACK_GPIO: i32 = 5;
/// Exit trigger: vehicle waiting at the exit barrier.
pub const IR_EXIT_GPIO: i32 = 6;

/// Per-slot occupancy sensors, slot 1 first.
pub const IR_SLOT_GPIOS: [i32; 5] = [7, 15, 16, 17, 18];

// ---------------------------------------------------------------------------
// Gate servos (LEDC PWM, 50 Hz)
// ---------------------------------------------------------------------------

pub const ENTRY_SERVO_GPIO: i32 = 1;
pub const EXIT_SERVO_GPIO: i32 = 2;

/// Standard hobby-servo frame rate.
pub const SERVO_PWM_FREQ_HZ: u32 = 50;
/// LEDC timer resolution (bits).  14-bit gives ~1.2 µs steps at 50 Hz.
pub const SERVO_PWM_RESOLUTION_BITS: u32 = 14;

// ---------------------------------------------------------------------------
// I²C bus (20×4 character LCD behind a PCF8574 backpack)
// ---------------------------------------------------------------------------

/// Must match the `gpio8`/`gpio9` peripherals taken in `main`.
pub const I2C_SDA_GPIO: i32 = 8;
pub const I2C_SCL_GPIO: i32 = 9;
pub const I2C_BAUD_HZ: u32 = 100_000;

/// 7-bit address of the LCD backpack.
pub const LCD_I2C_ADDR: u8 = 0x27;
