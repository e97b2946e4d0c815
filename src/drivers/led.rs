// GestureLink — RGB LED Driver
//
// Common-anode RGB LED on three GPIOs: a channel lights when its pin is
// driven LOW. The driver exposes logical on/off per channel; polarity stays
// in here.

use esp_idf_hal::gpio::{AnyOutputPin, Output, PinDriver};

/// Tri-color indicator capability: binary per-channel on/off.
pub trait Indicator {
    fn set_color(&mut self, r_on: bool, g_on: bool, b_on: bool);
}

pub struct RgbLed<'d> {
    r: PinDriver<'d, AnyOutputPin, Output>,
    g: PinDriver<'d, AnyOutputPin, Output>,
    b: PinDriver<'d, AnyOutputPin, Output>,
}

impl<'d> RgbLed<'d> {
    pub fn new(
        r: PinDriver<'d, AnyOutputPin, Output>,
        g: PinDriver<'d, AnyOutputPin, Output>,
        b: PinDriver<'d, AnyOutputPin, Output>,
    ) -> Self {
        let mut led = Self { r, g, b };
        led.set_color(false, false, false);
        led
    }
}

impl Indicator for RgbLed<'_> {
    fn set_color(&mut self, r_on: bool, g_on: bool, b_on: bool) {
        // Active LOW: `set_low` turns a channel on.
        let _ = if r_on { self.r.set_low() } else { self.r.set_high() };
        let _ = if g_on { self.g.set_low() } else { self.g.set_high() };
        let _ = if b_on { self.b.set_low() } else { self.b.set_high() };
    }
}
