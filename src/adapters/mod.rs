//! Adapters: concrete implementations of the hexagonal port traits.
//!
//! | Adapter    | Implements    | Connects to                  |
//! |------------|---------------|------------------------------|
//! | `hardware` | SensorPort    | IR sensors on GPIO           |
//! |            | ActuatorPort  | Gate servos on LEDC PWM      |
//! | `log_sink` | EventSink     | Serial log output            |
//! | `serial`   | TelemetryLink | Console UART                 |
//! | `time`     | (clock)       | ESP32 system timer           |
//!
//! The status display adapter lives in [`crate::display`].

pub mod hardware;
pub mod log_sink;
pub mod serial;
pub mod time;
