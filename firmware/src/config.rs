use gauge_test_core::TestConfig;
use gauge_test_core::config::{
    DEFAULT_BLINK_PERIOD_MS, DEFAULT_PASS_THRESHOLD_MV, DEFAULT_POLL_INTERVAL_MS,
};

pub const BQ35100_I2C_ADDR: u8 = 0x55; // 7-bit address of the gauge
pub const GAUGE_I2C_FREQUENCY_HZ: u32 = 100_000;

// Time for the gauge to wake up after GE is driven high
pub const GAUGE_ENABLE_SETTLE_MS: u32 = 10; // ms
// Time between polls of CONTROL_STATUS while waiting for gauging to start
pub const GAUGE_START_POLL_MS: u32 = 100; // ms
pub const GAUGE_START_POLL_ATTEMPTS: u32 = 10;

pub const CONSOLE_BAUD_RATE: u32 = 9600;
pub const CONSOLE_TX_BUFFER_SIZE: usize = 128;

pub const HEAP_SIZE: usize = 4096; // Report lines are formatted on the heap

// Test settings may be overridden at build time, e.g.
// GAUGE_TEST_PASS_THRESHOLD_MV=3000 cargo run --release

macro_rules! env_or {
    ($key:literal, $default:expr) => {{
        // Accepts a plain decimal number, anything else is a build error
        const fn parse(value: Option<&str>, default: u32) -> u32 {
            let bytes = match value {
                Some(v) => v.as_bytes(),
                None => return default,
            };
            assert!(!bytes.is_empty(), concat!("empty value for ", $key));
            let mut result = 0u32;
            let mut i = 0;
            while i < bytes.len() {
                assert!(bytes[i].is_ascii_digit(), concat!("non-digit in ", $key));
                result = result * 10 + (bytes[i] - b'0') as u32;
                i += 1;
            }
            result
        }
        parse(option_env!($key), $default)
    }};
}

pub const TEST_CONFIG: TestConfig = TestConfig {
    pass_threshold_mv: env_or!(
        "GAUGE_TEST_PASS_THRESHOLD_MV",
        DEFAULT_PASS_THRESHOLD_MV as u32
    ) as i32,
    blink_period_ms: env_or!("GAUGE_TEST_BLINK_PERIOD_MS", DEFAULT_BLINK_PERIOD_MS),
    poll_interval_ms: env_or!("GAUGE_TEST_POLL_INTERVAL_MS", DEFAULT_POLL_INTERVAL_MS),
};

const _: () = assert!(TEST_CONFIG.validate().is_ok(), "invalid test configuration");
