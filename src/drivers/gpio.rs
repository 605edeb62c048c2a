//! `embedded-hal` input pin over a GPIO configured by [`hw_init`].

use core::convert::Infallible;

use embedded_hal::digital::{ErrorType, InputPin};

use super::hw_init;

/// Pull-up input read straight from the GPIO level register.
#[derive(Debug, Clone, Copy)]
pub struct IrInput {
    gpio: i32,
}

impl IrInput {
    pub fn new(gpio: i32) -> Self {
        Self { gpio }
    }

    pub fn gpio(&self) -> i32 {
        self.gpio
    }
}

impl ErrorType for IrInput {
    type Error = Infallible;
}

impl InputPin for IrInput {
    fn is_high(&mut self) -> Result<bool, Self::Error> {
        Ok(hw_init::gpio_read(self.gpio))
    }

    fn is_low(&mut self) -> Result<bool, Self::Error> {
        Ok(!hw_init::gpio_read(self.gpio))
    }
}
