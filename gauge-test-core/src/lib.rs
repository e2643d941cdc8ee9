//! Platform-agnostic logic for the battery gauge shield bring-up test.
//!
//! The firmware crate wires these pieces to RP2040 peripherals. Everything in
//! here is `no_std` and driven through `embedded-hal`, `embedded-hal-async` and
//! `embedded-io-async` traits so it can be exercised on the host.
//!
//! - [`state`]: the test state and the cell shared between the two tasks
//! - [`indicator`]: tri-color LED blink patterns
//! - [`sequencer`]: init / enable / read / compare loop
//! - [`gauge`]: the fuel gauge contract the sequencer drives
//! - [`console`]: human readable report lines
//! - [`config`]: thresholds and timing

#![no_std]

extern crate alloc;

// This mod MUST go first, so that the others see its macros.
pub(crate) mod fmt;

pub mod config;
pub mod console;
pub mod gauge;
pub mod indicator;
pub mod sequencer;
pub mod state;

pub use config::{ConfigError, ConfigKey, TestConfig};
pub use console::{Console, Report, SerialConsole};
pub use gauge::BatteryGauge;
pub use indicator::{Indicator, IndicatorError, Lamps};
pub use sequencer::{CycleOutcome, GaugeTest};
pub use state::{Indication, SharedTestState, TestState};
