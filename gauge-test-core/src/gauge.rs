//! The fuel gauge as seen by the sequencer.

/// Operations the shield test needs from a battery fuel gauge.
///
/// The driver owns its bus handle; `init` is the first call made on it.
#[allow(async_fn_in_trait)]
pub trait BatteryGauge {
    type Error;

    /// Bring the chip up and check that it is the expected part.
    async fn init(&mut self) -> Result<(), Self::Error>;

    /// Ask the chip to start gauging. Callers confirm the result with
    /// [`BatteryGauge::is_gauge_enabled`].
    async fn enable_gauge(&mut self) -> Result<(), Self::Error>;

    async fn is_gauge_enabled(&mut self) -> Result<bool, Self::Error>;

    async fn read_voltage_mv(&mut self) -> Result<i32, Self::Error>;
}

impl<T: BatteryGauge + ?Sized> BatteryGauge for &mut T {
    type Error = T::Error;

    async fn init(&mut self) -> Result<(), Self::Error> {
        T::init(self).await
    }

    async fn enable_gauge(&mut self) -> Result<(), Self::Error> {
        T::enable_gauge(self).await
    }

    async fn is_gauge_enabled(&mut self) -> Result<bool, Self::Error> {
        T::is_gauge_enabled(self).await
    }

    async fn read_voltage_mv(&mut self) -> Result<i32, Self::Error> {
        T::read_voltage_mv(self).await
    }
}
