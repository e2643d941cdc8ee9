use defmt::{Debug2Format, info};
use embassy_executor::task;
use embassy_rp::gpio::{Level, Output};
use embassy_time::{Duration, Ticker};
use gauge_test_core::{Indicator, SharedTestState};

use crate::config::TEST_CONFIG;
use crate::config_resources::StatusLedResources;

/// Blinks the status LED to match the shared test state.
///
/// Runs on the high priority executor so it keeps ticking while the gauge
/// test is busy on the bus. The loop body only writes pins.
#[task]
pub async fn status_led_task(r: StatusLedResources, state: &'static SharedTestState) {
    info!("Initializing status LED task");

    // Active low, so start high (dark)
    let red = Output::new(r.red, Level::High);
    let green = Output::new(r.green, Level::High);
    let blue = Output::new(r.blue, Level::High);

    let mut indicator = match Indicator::new(red, green, blue, state) {
        Ok(indicator) => indicator,
        Err(e) => defmt::panic!("Status LED setup failed: {:?}", Debug2Format(&e)),
    };

    let mut ticker = Ticker::every(Duration::from_millis(
        TEST_CONFIG.tick_interval_ms() as u64,
    ));

    info!("Status LED task initialized");

    loop {
        ticker.next().await;

        // On a corrupt state the fault pattern is already on the pins
        if let Err(e) = indicator.tick() {
            defmt::panic!("Status LED: {:?}", Debug2Format(&e));
        }
    }
}
