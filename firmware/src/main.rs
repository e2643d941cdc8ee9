#![no_std]
#![no_main]

extern crate alloc;

use embassy_executor::{InterruptExecutor, Spawner};
use embassy_rp::interrupt;
use embassy_rp::interrupt::{InterruptExt, Priority};
use embedded_alloc::LlffHeap as Heap;
use gauge_test_core::SharedTestState;

#[global_allocator]
static HEAP: Heap = Heap::empty();

use defmt::info;
use {defmt_rtt as _, panic_probe as _};

mod bq35100;
mod config;
mod config_resources;
mod tasks;

use crate::config::{HEAP_SIZE, TEST_CONFIG};
use crate::config_resources::{
    AssignedResources, ConsoleResources, GaugeResources, StatusLedResources,
};

// Written by the gauge test, read by the status LED
static TEST_STATE: SharedTestState = SharedTestState::new();

// The status LED runs here so it preempts the gauge test, like a timer callback
static EXECUTOR_STATUS_LED: InterruptExecutor = InterruptExecutor::new();

#[interrupt]
unsafe fn SWI_IRQ_1() {
    unsafe { EXECUTOR_STATUS_LED.on_interrupt() }
}

#[embassy_executor::main]
async fn main(spawner: Spawner) {
    // Initialize the allocator BEFORE you use it
    {
        use core::mem::MaybeUninit;
        static mut HEAP_MEM: [MaybeUninit<u8>; HEAP_SIZE] = [MaybeUninit::uninit(); HEAP_SIZE];
        unsafe { HEAP.init(&raw mut HEAP_MEM as usize, HEAP_SIZE) }
    }

    let p = embassy_rp::init(Default::default());
    let r = split_resources!(p);

    info!("Starting up...");
    info!(
        "Pass threshold: {} mV | blink period: {} ms | poll interval: {} ms",
        TEST_CONFIG.pass_threshold_mv,
        TEST_CONFIG.blink_period_ms,
        TEST_CONFIG.poll_interval_ms
    );

    interrupt::SWI_IRQ_1.set_priority(Priority::P2);
    let status_led_spawner = EXECUTOR_STATUS_LED.start(interrupt::SWI_IRQ_1);

    status_led_spawner
        .spawn(tasks::status_led::status_led_task(r.status_led, &TEST_STATE))
        .unwrap();

    spawner
        .spawn(tasks::gauge_test::gauge_test_task(
            r.gauge,
            r.console,
            &TEST_STATE,
        ))
        .unwrap();
}
