//! Test state and the cell that carries it from the sequencer to the indicator.

use portable_atomic::{AtomicU8, Ordering};

/// Progress of the shield test.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
pub enum TestState {
    NotStarted = 0,
    Running = 1,
    Pass = 2,
    Fail = 3,
}

impl TestState {
    /// Verdict for a single voltage reading. The threshold is inclusive.
    pub const fn from_reading(reading_mv: i32, pass_threshold_mv: i32) -> Self {
        if reading_mv >= pass_threshold_mv {
            TestState::Pass
        } else {
            TestState::Fail
        }
    }
}

impl TryFrom<u8> for TestState {
    type Error = u8;

    fn try_from(raw: u8) -> Result<Self, Self::Error> {
        match raw {
            0 => Ok(TestState::NotStarted),
            1 => Ok(TestState::Running),
            2 => Ok(TestState::Pass),
            3 => Ok(TestState::Fail),
            other => Err(other),
        }
    }
}

/// What the indicator should show for the value currently in the cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Indication {
    Blink(TestState),
    /// The gauge never came up. Shown as solid red.
    Halted,
}

// Set together with `Fail` once the sequencer gives up for good
const HALTED: u8 = 0x80;

/// Single-writer, single-reader cell holding the current [`TestState`].
///
/// The sequencer is the only writer and the indicator the only reader. A
/// byte-sized atomic keeps the indicator from ever observing a torn value
/// while the sequencer is mid-update.
pub struct SharedTestState {
    raw: AtomicU8,
}

impl SharedTestState {
    pub const fn new() -> Self {
        Self {
            raw: AtomicU8::new(TestState::NotStarted as u8),
        }
    }

    pub fn set(&self, state: TestState) {
        self.raw.store(state as u8, Ordering::Release);
    }

    /// Record that initialization failed. The state reads as `Fail` from
    /// here on and the indicator switches to solid red.
    pub fn halt(&self) {
        self.raw.store(TestState::Fail as u8 | HALTED, Ordering::Release);
    }

    pub fn get(&self) -> TestState {
        match TestState::try_from(self.raw() & !HALTED) {
            Ok(state) => state,
            Err(_) => TestState::Fail,
        }
    }

    pub fn is_halted(&self) -> bool {
        self.raw() & HALTED != 0
    }

    /// The raw byte, as read by the indicator on each tick.
    pub fn raw(&self) -> u8 {
        self.raw.load(Ordering::Acquire)
    }

    /// Decode a raw byte. Anything that the sequencer cannot have written is
    /// returned as the error.
    pub fn decode(raw: u8) -> Result<Indication, u8> {
        if raw == TestState::Fail as u8 | HALTED {
            return Ok(Indication::Halted);
        }
        TestState::try_from(raw).map(Indication::Blink)
    }

    #[cfg(test)]
    pub(crate) fn force_raw(&self, raw: u8) {
        self.raw.store(raw, Ordering::Release);
    }
}

impl Default for SharedTestState {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_not_started() {
        let cell = SharedTestState::new();
        assert_eq!(cell.get(), TestState::NotStarted);
        assert!(!cell.is_halted());
        assert_eq!(
            SharedTestState::decode(cell.raw()),
            Ok(Indication::Blink(TestState::NotStarted))
        );
    }

    #[test]
    fn threshold_is_inclusive() {
        assert_eq!(TestState::from_reading(2800, 2800), TestState::Pass);
        assert_eq!(TestState::from_reading(2799, 2800), TestState::Fail);
        assert_eq!(TestState::from_reading(3000, 2800), TestState::Pass);
        assert_eq!(TestState::from_reading(-1, 0), TestState::Fail);
    }

    #[test]
    fn halt_reads_back_as_fail() {
        let cell = SharedTestState::new();
        cell.halt();
        assert_eq!(cell.get(), TestState::Fail);
        assert!(cell.is_halted());
        assert_eq!(SharedTestState::decode(cell.raw()), Ok(Indication::Halted));
    }

    #[test]
    fn set_round_trips_every_state() {
        let cell = SharedTestState::new();
        for state in [
            TestState::Running,
            TestState::Pass,
            TestState::Fail,
            TestState::NotStarted,
        ] {
            cell.set(state);
            assert_eq!(cell.get(), state);
            assert_eq!(
                SharedTestState::decode(cell.raw()),
                Ok(Indication::Blink(state))
            );
        }
    }

    #[test]
    fn unknown_bytes_do_not_decode() {
        assert_eq!(SharedTestState::decode(4), Err(4));
        assert_eq!(SharedTestState::decode(0x81), Err(0x81));
        assert_eq!(SharedTestState::decode(0xff), Err(0xff));
    }
}
