//! Gauge test sequencer: bring the gauge up, then enable / read / compare in a
//! loop, publishing the verdict to the shared test state.

use embedded_hal_async::delay::DelayNs;

use crate::config::TestConfig;
use crate::console::{Console, Report};
use crate::gauge::BatteryGauge;
use crate::state::{SharedTestState, TestState};

/// What a single enable / read / compare cycle found.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum CycleOutcome {
    GaugingDisabled,
    VoltageUnavailable,
    Measured { reading_mv: i32, verdict: TestState },
}

impl CycleOutcome {
    pub fn state(&self) -> TestState {
        match self {
            CycleOutcome::Measured { verdict, .. } => *verdict,
            _ => TestState::Fail,
        }
    }
}

pub struct GaugeTest<'a, G, C> {
    gauge: G,
    console: C,
    state: &'a SharedTestState,
    config: TestConfig,
}

impl<'a, G, C> GaugeTest<'a, G, C>
where
    G: BatteryGauge,
    C: Console,
{
    pub fn new(gauge: G, console: C, state: &'a SharedTestState, config: TestConfig) -> Self {
        Self {
            gauge,
            console,
            state,
            config,
        }
    }

    /// Run the test forever.
    ///
    /// If the gauge cannot be initialised the state is left at `Fail`, marked
    /// halted, and this never makes progress again.
    pub async fn run<D: DelayNs>(mut self, mut delay: D) {
        self.console.report(Report::Starting).await;

        if self.start().await.is_err() {
            loop {
                core::future::pending::<()>().await;
            }
        }

        loop {
            self.run_cycle().await;
            delay.delay_ms(self.config.poll_interval_ms).await;
        }
    }

    /// Initialise the gauge. On success the state moves to `Running`; on
    /// failure it moves to `Fail` and is marked halted.
    pub async fn start(&mut self) -> Result<(), G::Error> {
        match self.gauge.init().await {
            Ok(()) => {
                self.publish(TestState::Running);
                self.console.report(Report::GaugeInitialised).await;
                Ok(())
            }
            Err(e) => {
                error!("Gauge initialisation failed, halting");
                self.state.halt();
                self.console.report(Report::GaugeInitFailed).await;
                Err(e)
            }
        }
    }

    /// One enable / read / compare pass. Any failure sets `Fail`.
    pub async fn run_cycle(&mut self) -> CycleOutcome {
        if self.gauge.enable_gauge().await.is_err() {
            debug!("Gauge enable request failed");
        }

        let outcome = match self.gauge.is_gauge_enabled().await {
            Ok(true) => match self.gauge.read_voltage_mv().await {
                Ok(reading_mv) => {
                    let threshold_mv = self.config.pass_threshold_mv;
                    self.console
                        .report(Report::BatteryVoltage {
                            reading_mv,
                            threshold_mv,
                        })
                        .await;
                    CycleOutcome::Measured {
                        reading_mv,
                        verdict: TestState::from_reading(reading_mv, threshold_mv),
                    }
                }
                Err(_) => {
                    self.console.report(Report::VoltageUnavailable).await;
                    CycleOutcome::VoltageUnavailable
                }
            },
            Ok(false) | Err(_) => {
                self.console.report(Report::GaugingDisabled).await;
                CycleOutcome::GaugingDisabled
            }
        };

        self.publish(outcome.state());
        outcome
    }

    fn publish(&self, next: TestState) {
        let previous = self.state.get();
        if previous != next {
            debug!("Test state {:?} -> {:?}", previous, next);
        }
        self.state.set(next);
    }
}
