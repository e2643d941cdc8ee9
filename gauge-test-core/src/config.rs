//! Test thresholds and timing.

pub const DEFAULT_PASS_THRESHOLD_MV: i32 = 2800; // mV; readings at or above pass
pub const DEFAULT_BLINK_PERIOD_MS: u32 = 1000; // ms; full on/off LED cycle
pub const DEFAULT_POLL_INTERVAL_MS: u32 = 1000; // ms; pause between gauge cycles

// The gauge reports voltage as an unsigned 16-bit millivolt value
pub const MAX_PASS_THRESHOLD_MV: i32 = u16::MAX as i32;
pub const MIN_BLINK_PERIOD_MS: u32 = 2;
pub const MIN_POLL_INTERVAL_MS: u32 = 1;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ConfigError {
    UnknownKey,
    ThresholdOutOfRange(i32),
    BlinkPeriodTooShort(u32),
    PollIntervalTooShort(u32),
    BlinkPeriodTooLong(i64),
    PollIntervalTooLong(i64),
}

/// Recognized configuration options.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ConfigKey {
    PassThresholdMv,
    BlinkPeriodMs,
    PollIntervalMs,
}

impl ConfigKey {
    pub const ALL: [ConfigKey; 3] = [
        ConfigKey::PassThresholdMv,
        ConfigKey::BlinkPeriodMs,
        ConfigKey::PollIntervalMs,
    ];

    pub const fn name(self) -> &'static str {
        match self {
            ConfigKey::PassThresholdMv => "pass-threshold-mv",
            ConfigKey::BlinkPeriodMs => "blink-period-ms",
            ConfigKey::PollIntervalMs => "poll-interval-ms",
        }
    }

    pub fn from_name(name: &str) -> Result<Self, ConfigError> {
        Self::ALL
            .into_iter()
            .find(|key| key.name() == name)
            .ok_or(ConfigError::UnknownKey)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct TestConfig {
    pub pass_threshold_mv: i32,
    pub blink_period_ms: u32,
    pub poll_interval_ms: u32,
}

impl TestConfig {
    pub const fn new() -> Self {
        Self {
            pass_threshold_mv: DEFAULT_PASS_THRESHOLD_MV,
            blink_period_ms: DEFAULT_BLINK_PERIOD_MS,
            poll_interval_ms: DEFAULT_POLL_INTERVAL_MS,
        }
    }

    /// The indicator runs twice per blink period: once to light, once to darken.
    pub const fn tick_interval_ms(&self) -> u32 {
        self.blink_period_ms / 2
    }

    pub const fn validate(&self) -> Result<(), ConfigError> {
        if self.pass_threshold_mv < 0 || self.pass_threshold_mv > MAX_PASS_THRESHOLD_MV {
            return Err(ConfigError::ThresholdOutOfRange(self.pass_threshold_mv));
        }
        if self.blink_period_ms < MIN_BLINK_PERIOD_MS {
            return Err(ConfigError::BlinkPeriodTooShort(self.blink_period_ms));
        }
        if self.poll_interval_ms < MIN_POLL_INTERVAL_MS {
            return Err(ConfigError::PollIntervalTooShort(self.poll_interval_ms));
        }
        Ok(())
    }

    /// Apply a single option. The configuration is left untouched if the
    /// result would not validate.
    pub fn set(&mut self, key: ConfigKey, value: i64) -> Result<(), ConfigError> {
        let mut updated = *self;
        match key {
            ConfigKey::PassThresholdMv => {
                updated.pass_threshold_mv = i32::try_from(value)
                    .map_err(|_| ConfigError::ThresholdOutOfRange(saturate_i32(value)))?;
            }
            ConfigKey::BlinkPeriodMs => {
                updated.blink_period_ms = match u32::try_from(value) {
                    Ok(ms) => ms,
                    Err(_) if value < 0 => return Err(ConfigError::BlinkPeriodTooShort(0)),
                    Err(_) => return Err(ConfigError::BlinkPeriodTooLong(value)),
                };
            }
            ConfigKey::PollIntervalMs => {
                updated.poll_interval_ms = match u32::try_from(value) {
                    Ok(ms) => ms,
                    Err(_) if value < 0 => return Err(ConfigError::PollIntervalTooShort(0)),
                    Err(_) => return Err(ConfigError::PollIntervalTooLong(value)),
                };
            }
        }
        updated.validate()?;
        *self = updated;
        Ok(())
    }

    pub fn get(&self, key: ConfigKey) -> i64 {
        match key {
            ConfigKey::PassThresholdMv => self.pass_threshold_mv as i64,
            ConfigKey::BlinkPeriodMs => self.blink_period_ms as i64,
            ConfigKey::PollIntervalMs => self.poll_interval_ms as i64,
        }
    }
}

impl Default for TestConfig {
    fn default() -> Self {
        Self::new()
    }
}

fn saturate_i32(value: i64) -> i32 {
    value.clamp(i32::MIN as i64, i32::MAX as i64) as i32
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_the_shield_test() {
        let config = TestConfig::default();
        assert_eq!(config.pass_threshold_mv, 2800);
        assert_eq!(config.blink_period_ms, 1000);
        assert_eq!(config.poll_interval_ms, 1000);
        assert_eq!(config.tick_interval_ms(), 500);
        assert_eq!(config.validate(), Ok(()));
    }

    #[test]
    fn keys_round_trip_through_their_names() {
        for key in ConfigKey::ALL {
            assert_eq!(ConfigKey::from_name(key.name()), Ok(key));
        }
        assert_eq!(
            ConfigKey::from_name("blink-rate"),
            Err(ConfigError::UnknownKey)
        );
    }

    #[test]
    fn set_applies_valid_values() {
        let mut config = TestConfig::default();
        config.set(ConfigKey::PassThresholdMv, 3300).unwrap();
        config.set(ConfigKey::BlinkPeriodMs, 250).unwrap();
        config.set(ConfigKey::PollIntervalMs, 5000).unwrap();

        assert_eq!(config.get(ConfigKey::PassThresholdMv), 3300);
        assert_eq!(config.tick_interval_ms(), 125);
        assert_eq!(config.poll_interval_ms, 5000);
    }

    #[test]
    fn set_rejects_invalid_values_without_side_effects() {
        let mut config = TestConfig::default();

        assert_eq!(
            config.set(ConfigKey::PassThresholdMv, -1),
            Err(ConfigError::ThresholdOutOfRange(-1))
        );
        assert_eq!(
            config.set(ConfigKey::PassThresholdMv, 70_000),
            Err(ConfigError::ThresholdOutOfRange(70_000))
        );
        assert_eq!(
            config.set(ConfigKey::BlinkPeriodMs, 1),
            Err(ConfigError::BlinkPeriodTooShort(1))
        );
        assert_eq!(
            config.set(ConfigKey::PollIntervalMs, 0),
            Err(ConfigError::PollIntervalTooShort(0))
        );
        assert_eq!(
            config.set(ConfigKey::PollIntervalMs, -5),
            Err(ConfigError::PollIntervalTooShort(0))
        );

        assert_eq!(config, TestConfig::default());
    }

    #[test]
    fn set_reports_oversized_durations_as_too_long() {
        let mut config = TestConfig::default();

        assert_eq!(
            config.set(ConfigKey::BlinkPeriodMs, 5_000_000_000),
            Err(ConfigError::BlinkPeriodTooLong(5_000_000_000))
        );
        assert_eq!(
            config.set(ConfigKey::PollIntervalMs, 5_000_000_000),
            Err(ConfigError::PollIntervalTooLong(5_000_000_000))
        );

        assert_eq!(config, TestConfig::default());
    }
}
