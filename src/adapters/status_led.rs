//! Single-colour status LED.
//!
//! Generic over any `embedded_hal::digital::OutputPin`, so the same
//! driver runs on an ESP-IDF `PinDriver` and on a mock pin in tests.
//!
//! | Mode    | Behaviour                          |
//! |---------|------------------------------------|
//! | `Off`   | low                                |
//! | `On`    | high                               |
//! | `Blink` | toggles on every `apply` call      |

use embedded_hal::digital::OutputPin;
use log::warn;

use crate::app::ports::IndicatorPort;
use crate::dashboard::LedMode;

pub struct StatusLed<P: OutputPin> {
    pin: P,
    lit: bool,
}

impl<P: OutputPin> StatusLed<P> {
    /// Takes ownership of the pin and switches it off.
    pub fn new(pin: P) -> Self {
        let mut led = Self { pin, lit: true };
        led.set(false);
        led
    }

    pub fn is_lit(&self) -> bool {
        self.lit
    }

    pub fn toggle(&mut self) {
        self.set(!self.lit);
    }

    fn set(&mut self, lit: bool) {
        let result = if lit { self.pin.set_high() } else { self.pin.set_low() };
        match result {
            Ok(()) => self.lit = lit,
            Err(e) => warn!("status LED: pin write failed: {:?}", e),
        }
    }
}

impl<P: OutputPin> IndicatorPort for StatusLed<P> {
    fn apply(&mut self, mode: LedMode) {
        match mode {
            LedMode::Off => self.set(false),
            LedMode::On => self.set(true),
            LedMode::Blink => self.toggle(),
        }
    }
}
