//! Board bring-up for the IR inputs and the servo PWM.
//!
//! Configures the IR sensor inputs and the LEDC timer/channels for the two
//! gate servos using raw ESP-IDF sys calls.  Called once from `main()`
//! before the control loop starts.
//!
//! On host builds the register accessors are backed by in-memory state so
//! the drivers above can be exercised in tests.

#[cfg(target_os = "espidf")]
use esp_idf_svc::sys::*;
#[cfg(target_os = "espidf")]
use log::info;

use crate::pins;

// ── Error type ────────────────────────────────────────────────

/// An ESP-IDF configuration call failed; carries its return code.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HwInitError {
    GpioConfigFailed(i32),
    LedcTimerFailed(i32),
    LedcChannelFailed(i32),
}

impl core::fmt::Display for HwInitError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::GpioConfigFailed(rc) => write!(f, "GPIO config failed (rc={rc})"),
            Self::LedcTimerFailed(rc) => write!(f, "LEDC timer config failed (rc={rc})"),
            Self::LedcChannelFailed(rc) => write!(f, "LEDC channel config failed (rc={rc})"),
        }
    }
}

impl std::error::Error for HwInitError {}

pub const LEDC_CH_ENTRY_SERVO: u32 = 0;
pub const LEDC_CH_EXIT_SERVO: u32 = 1;

/// Full-scale duty at the configured LEDC resolution.
pub const LEDC_DUTY_MAX: u16 = ((1u32 << pins::SERVO_PWM_RESOLUTION_BITS) - 1) as u16;

/// All IR inputs: the eight sensors share one configuration.
pub const IR_INPUT_GPIOS: [i32; 8] = [
    pins::IR_SLOT_GPIOS[0],
    pins::IR_SLOT_GPIOS[1],
    pins::IR_SLOT_GPIOS[2],
    pins::IR_SLOT_GPIOS[3],
    pins::IR_SLOT_GPIOS[4],
    pins::IR_ENTRY_GPIO,
    pins::IR_BACK_GPIO,
    pins::IR_EXIT_GPIO,
];

#[cfg(target_os = "espidf")]
pub fn init_peripherals() -> Result<(), HwInitError> {
    // SAFETY: Called once from main() before the control loop; single-threaded.
    unsafe {
        init_gpio_inputs()?;
        init_ledc()?;
    }
    info!("hw_init: IR inputs and servo PWM ready");
    Ok(())
}

#[cfg(not(target_os = "espidf"))]
pub fn init_peripherals() -> Result<(), HwInitError> {
    log::info!("hw_init(sim): simulated inputs idle high, duty 0");
    Ok(())
}

// ── GPIO Inputs ───────────────────────────────────────────────

#[cfg(target_os = "espidf")]
unsafe fn init_gpio_inputs() -> Result<(), HwInitError> {
    let mask = IR_INPUT_GPIOS.iter().fold(0u64, |m, &pin| m | (1u64 << pin));
    let cfg = gpio_config_t {
        pin_bit_mask: mask,
        mode: gpio_mode_t_GPIO_MODE_INPUT,
        pull_up_en: gpio_pullup_t_GPIO_PULLUP_ENABLE,
        pull_down_en: gpio_pulldown_t_GPIO_PULLDOWN_DISABLE,
        intr_type: gpio_int_type_t_GPIO_INTR_DISABLE,
    };
    let ret = unsafe { gpio_config(&cfg) };
    if ret != ESP_OK as i32 {
        return Err(HwInitError::GpioConfigFailed(ret));
    }

    info!("hw_init: {} IR inputs configured (pull-up)", IR_INPUT_GPIOS.len());
    Ok(())
}

#[cfg(target_os = "espidf")]
pub fn gpio_read(pin: i32) -> bool {
    // SAFETY: level read of a pin configured as input in init_gpio_inputs().
    (unsafe { gpio_get_level(pin) }) != 0
}

/// Simulated input levels, one bit per GPIO.  Idle IR sensors read high.
#[cfg(not(target_os = "espidf"))]
static SIM_GPIO_LEVELS: core::sync::atomic::AtomicU64 =
    core::sync::atomic::AtomicU64::new(u64::MAX);

#[cfg(not(target_os = "espidf"))]
pub fn gpio_read(pin: i32) -> bool {
    SIM_GPIO_LEVELS.load(core::sync::atomic::Ordering::Relaxed) & (1u64 << pin) != 0
}

/// Drive a simulated input level (host builds only).
#[cfg(not(target_os = "espidf"))]
pub fn sim_set_level(pin: i32, high: bool) {
    use core::sync::atomic::Ordering;
    if high {
        SIM_GPIO_LEVELS.fetch_or(1u64 << pin, Ordering::Relaxed);
    } else {
        SIM_GPIO_LEVELS.fetch_and(!(1u64 << pin), Ordering::Relaxed);
    }
}

// ── LEDC PWM ─────────────────────────────────────────────────

#[cfg(target_os = "espidf")]
unsafe fn init_ledc() -> Result<(), HwInitError> {
    // Timer 0: both servos (50 Hz, 14-bit)
    let timer0 = ledc_timer_config_t {
        speed_mode: ledc_mode_t_LEDC_LOW_SPEED_MODE,
        timer_num: ledc_timer_t_LEDC_TIMER_0,
        duty_resolution: ledc_timer_bit_t_LEDC_TIMER_14_BIT,
        freq_hz: pins::SERVO_PWM_FREQ_HZ,
        clk_cfg: soc_periph_ledc_clk_src_legacy_t_LEDC_AUTO_CLK,
        ..Default::default()
    };
    // SAFETY: only reached through init_peripherals(), before the loop.
    let ret = unsafe { ledc_timer_config(&timer0) };
    if ret != ESP_OK as i32 {
        return Err(HwInitError::LedcTimerFailed(ret));
    }

    let channels = [
        (LEDC_CH_ENTRY_SERVO, pins::ENTRY_SERVO_GPIO),
        (LEDC_CH_EXIT_SERVO, pins::EXIT_SERVO_GPIO),
    ];
    for (channel, gpio) in channels {
        let ret = unsafe {
            ledc_channel_config(&ledc_channel_config_t {
                speed_mode: ledc_mode_t_LEDC_LOW_SPEED_MODE,
                channel,
                timer_sel: ledc_timer_t_LEDC_TIMER_0,
                gpio_num: gpio,
                duty: 0,
                hpoint: 0,
                ..Default::default()
            })
        };
        if ret != ESP_OK as i32 {
            return Err(HwInitError::LedcChannelFailed(ret));
        }
    }

    info!("hw_init: LEDC configured (entry=CH0, exit=CH1, 50 Hz)");
    Ok(())
}

/// Write a raw duty value; returns the ESP-IDF error code on failure.
#[cfg(target_os = "espidf")]
pub fn ledc_set_duty(channel: u32, duty: u16) -> Result<(), i32> {
    // SAFETY: LEDC channels were configured in init_ledc(); duty register
    // writes are race-free since only the main loop calls this function.
    unsafe {
        let ret = esp_idf_svc::sys::ledc_set_duty(
            ledc_mode_t_LEDC_LOW_SPEED_MODE,
            channel,
            u32::from(duty),
        );
        if ret != ESP_OK as i32 {
            return Err(ret);
        }
        let ret = esp_idf_svc::sys::ledc_update_duty(ledc_mode_t_LEDC_LOW_SPEED_MODE, channel);
        if ret != ESP_OK as i32 {
            return Err(ret);
        }
    }
    Ok(())
}

#[cfg(not(target_os = "espidf"))]
static SIM_DUTY: [core::sync::atomic::AtomicU32; 2] = [
    core::sync::atomic::AtomicU32::new(0),
    core::sync::atomic::AtomicU32::new(0),
];

#[cfg(not(target_os = "espidf"))]
pub fn ledc_set_duty(channel: u32, duty: u16) -> Result<(), i32> {
    let slot = SIM_DUTY.get(channel as usize).ok_or(-1)?;
    slot.store(u32::from(duty), core::sync::atomic::Ordering::Relaxed);
    Ok(())
}

/// Last duty written to a simulated channel (host builds only).
#[cfg(not(target_os = "espidf"))]
pub fn sim_duty(channel: u32) -> Option<u16> {
    SIM_DUTY
        .get(channel as usize)
        .map(|d| d.load(core::sync::atomic::Ordering::Relaxed) as u16)
}
