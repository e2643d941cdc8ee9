// Minimal BQ35100 primary-battery gauge driver: just enough to bring the chip
// up, start gauging and read the battery voltage.

use defmt::{Format, debug, error, warn};
use embedded_hal::digital::OutputPin;
use embedded_hal_async::delay::DelayNs;
use embedded_hal_async::i2c::I2c;

use gauge_test_core::BatteryGauge;

use crate::config::{
    BQ35100_I2C_ADDR, GAUGE_ENABLE_SETTLE_MS, GAUGE_START_POLL_ATTEMPTS, GAUGE_START_POLL_MS,
};

mod command {
    pub const CONTROL: u8 = 0x00;
    pub const VOLTAGE: u8 = 0x08;
    pub const MANUFACTURER_ACCESS_CONTROL: u8 = 0x3e;
    pub const MAC_DATA: u8 = 0x40;
}

mod subcommand {
    pub const DEVICE_TYPE: u16 = 0x0001;
    pub const GAUGE_START: u16 = 0x0011;
}

const DEVICE_TYPE_BQ35100: u16 = 0x0100;

// CONTROL_STATUS bit 0: gauge active
const CONTROL_STATUS_GA: u16 = 1 << 0;

// The chip needs a moment before MACData holds the subcommand result
const MAC_RESPONSE_DELAY_MS: u32 = 2;

#[derive(Debug, Format)]
pub enum Bq35100Error<E> {
    I2c(E),
    GaugeEnablePin,
    UnexpectedDeviceType(u16),
    GaugeStartTimeout,
}

impl<E> From<E> for Bq35100Error<E> {
    fn from(e: E) -> Self {
        Self::I2c(e)
    }
}

pub struct Bq35100<I, P, D> {
    i2c: I,
    gauge_enable: P,
    delay: D,
}

impl<I, P, D> Bq35100<I, P, D>
where
    I: I2c,
    P: OutputPin,
    D: DelayNs,
{
    pub fn new(i2c: I, gauge_enable: P, delay: D) -> Self {
        Self {
            i2c,
            gauge_enable,
            delay,
        }
    }

    async fn read_u16(&mut self, command: u8) -> Result<u16, Bq35100Error<I::Error>> {
        let mut response = [0u8; 2];
        self.i2c
            .write_read(BQ35100_I2C_ADDR, &[command], &mut response)
            .await?;
        Ok(u16::from_le_bytes(response))
    }

    async fn write_control(&mut self, subcommand: u16) -> Result<(), Bq35100Error<I::Error>> {
        let [lo, hi] = subcommand.to_le_bytes();
        self.i2c
            .write(BQ35100_I2C_ADDR, &[command::CONTROL, lo, hi])
            .await?;
        Ok(())
    }

    /// Subcommands that return data answer through MACData.
    async fn read_subcommand(&mut self, subcommand: u16) -> Result<u16, Bq35100Error<I::Error>> {
        let [lo, hi] = subcommand.to_le_bytes();
        self.i2c
            .write(
                BQ35100_I2C_ADDR,
                &[command::MANUFACTURER_ACCESS_CONTROL, lo, hi],
            )
            .await?;
        self.delay.delay_ms(MAC_RESPONSE_DELAY_MS).await;
        self.read_u16(command::MAC_DATA).await
    }

    async fn control_status(&mut self) -> Result<u16, Bq35100Error<I::Error>> {
        self.read_u16(command::CONTROL).await
    }

    async fn gauge_active(&mut self) -> Result<bool, Bq35100Error<I::Error>> {
        Ok(self.control_status().await? & CONTROL_STATUS_GA != 0)
    }

    async fn bring_up(&mut self) -> Result<(), Bq35100Error<I::Error>> {
        self.gauge_enable
            .set_high()
            .map_err(|_| Bq35100Error::GaugeEnablePin)?;
        self.delay.delay_ms(GAUGE_ENABLE_SETTLE_MS).await;

        let device_type = self.read_subcommand(subcommand::DEVICE_TYPE).await?;
        if device_type != DEVICE_TYPE_BQ35100 {
            return Err(Bq35100Error::UnexpectedDeviceType(device_type));
        }
        debug!("BQ35100 found, device type {=u16:#x}", device_type);
        Ok(())
    }

    async fn start_gauging(&mut self) -> Result<(), Bq35100Error<I::Error>> {
        if self.gauge_active().await? {
            return Ok(());
        }

        self.write_control(subcommand::GAUGE_START).await?;
        for _ in 0..GAUGE_START_POLL_ATTEMPTS {
            self.delay.delay_ms(GAUGE_START_POLL_MS).await;
            if self.gauge_active().await? {
                debug!("BQ35100 gauging started");
                return Ok(());
            }
        }
        Err(Bq35100Error::GaugeStartTimeout)
    }
}

impl<I, P, D> BatteryGauge for Bq35100<I, P, D>
where
    I: I2c,
    I::Error: Format,
    P: OutputPin,
    D: DelayNs,
{
    type Error = Bq35100Error<I::Error>;

    async fn init(&mut self) -> Result<(), Self::Error> {
        self.bring_up()
            .await
            .inspect_err(|e| error!("BQ35100 init failed: {:?}", e))
    }

    async fn enable_gauge(&mut self) -> Result<(), Self::Error> {
        self.start_gauging()
            .await
            .inspect_err(|e| warn!("BQ35100 gauge start failed: {:?}", e))
    }

    async fn is_gauge_enabled(&mut self) -> Result<bool, Self::Error> {
        self.gauge_active()
            .await
            .inspect_err(|e| warn!("BQ35100 status read failed: {:?}", e))
    }

    async fn read_voltage_mv(&mut self) -> Result<i32, Self::Error> {
        let voltage_mv = self
            .read_u16(command::VOLTAGE)
            .await
            .inspect_err(|e| warn!("BQ35100 voltage read failed: {:?}", e))?;
        debug!("BQ35100 voltage {=u16} mV", voltage_mv);
        Ok(voltage_mv as i32)
    }
}
