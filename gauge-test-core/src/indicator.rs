//! Tri-color LED indicator.
//!
//! | State      | Red     | Green   | Blue |
//! | ---------- | ------- | ------- | ---- |
//! | NotStarted | off     | off     | off  |
//! | Running    | blink   | blink   | off  |
//! | Pass       | off     | blink   | off  |
//! | Fail       | blink   | off     | off  |
//! | Halted     | on      | off     | off  |
//!
//! Running blinks red and green in lockstep, which reads as flashing amber.
//! The LEDs are wired active low: a low pin lights the LED.

use embedded_hal::digital::StatefulOutputPin;

use crate::state::{Indication, SharedTestState, TestState};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum IndicatorError<E> {
    Pin(E),
    /// The shared cell held a byte the sequencer never writes. The fault
    /// pattern (red on, green and blue off) has been applied.
    CorruptState(u8),
}

impl<E> From<E> for IndicatorError<E> {
    fn from(e: E) -> Self {
        Self::Pin(e)
    }
}

/// Which LEDs are currently lit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Lamps {
    pub red: bool,
    pub green: bool,
    pub blue: bool,
}

impl Lamps {
    pub const OFF: Lamps = Lamps {
        red: false,
        green: false,
        blue: false,
    };
}

pub struct Indicator<'a, P> {
    red: P,
    green: P,
    blue: P,
    state: &'a SharedTestState,
}

impl<'a, P> Indicator<'a, P>
where
    P: StatefulOutputPin,
{
    /// Takes the three LED pins and switches them all off.
    pub fn new(
        red: P,
        green: P,
        blue: P,
        state: &'a SharedTestState,
    ) -> Result<Self, IndicatorError<P::Error>> {
        let mut indicator = Self {
            red,
            green,
            blue,
            state,
        };
        indicator.all_off()?;
        Ok(indicator)
    }

    /// Re-evaluate the shared state and update the pins. Called once per half
    /// blink period; only touches the pins.
    pub fn tick(&mut self) -> Result<Indication, IndicatorError<P::Error>> {
        let raw = self.state.raw();
        let indication = match SharedTestState::decode(raw) {
            Ok(indication) => indication,
            Err(raw) => {
                self.green.set_high()?;
                self.blue.set_high()?;
                self.red.set_low()?;
                return Err(IndicatorError::CorruptState(raw));
            }
        };

        match indication {
            Indication::Blink(TestState::NotStarted) => self.all_off()?,
            Indication::Blink(TestState::Running) => {
                self.blue.set_high()?;
                self.green.toggle()?;
                self.red.toggle()?;
            }
            Indication::Blink(TestState::Pass) => {
                self.blue.set_high()?;
                self.red.set_high()?;
                self.green.toggle()?;
            }
            Indication::Blink(TestState::Fail) => {
                self.blue.set_high()?;
                self.green.set_high()?;
                self.red.toggle()?;
            }
            Indication::Halted => {
                self.blue.set_high()?;
                self.green.set_high()?;
                self.red.set_low()?;
            }
        }

        Ok(indication)
    }

    pub fn lamps(&mut self) -> Result<Lamps, IndicatorError<P::Error>> {
        Ok(Lamps {
            red: self.red.is_set_low()?,
            green: self.green.is_set_low()?,
            blue: self.blue.is_set_low()?,
        })
    }

    pub fn release(self) -> (P, P, P) {
        (self.red, self.green, self.blue)
    }

    fn all_off(&mut self) -> Result<(), IndicatorError<P::Error>> {
        self.red.set_high()?;
        self.green.set_high()?;
        self.blue.set_high()?;
        Ok(())
    }
}
