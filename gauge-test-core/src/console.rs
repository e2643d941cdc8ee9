//! Human readable progress lines.

use alloc::string::String;
use core::fmt::{self, Write as _};

use embedded_io_async::Write;

/// Everything the test tells the operator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Report {
    Starting,
    GaugeInitialised,
    GaugeInitFailed,
    BatteryVoltage { reading_mv: i32, threshold_mv: i32 },
    VoltageUnavailable,
    GaugingDisabled,
}

impl Report {
    pub fn is_failure(&self) -> bool {
        matches!(
            self,
            Report::GaugeInitFailed | Report::VoltageUnavailable | Report::GaugingDisabled
        )
    }
}

impl fmt::Display for Report {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Report::Starting => f.write_str("Starting up..."),
            Report::GaugeInitialised => f.write_str("Battery gauge chip initialised."),
            Report::GaugeInitFailed => f.write_str("Battery gauge chip could not be initialised."),
            Report::BatteryVoltage {
                reading_mv,
                threshold_mv,
            } => write!(
                f,
                "Battery voltage: {} V (pass threshold {} V).",
                Volts(*reading_mv),
                Volts(*threshold_mv)
            ),
            Report::VoltageUnavailable => f.write_str("Unable to read battery voltage."),
            Report::GaugingDisabled => f.write_str("Battery gauging could not be enabled."),
        }
    }
}

/// Millivolts shown as volts with two decimals. Truncates toward zero so a
/// reading just under the threshold never prints as the threshold.
struct Volts(i32);

impl fmt::Display for Volts {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let magnitude = self.0.unsigned_abs();
        let volts = magnitude / 1000;
        let centivolts = (magnitude % 1000) / 10;
        let sign = if self.0 < 0 && (volts != 0 || centivolts != 0) {
            "-"
        } else {
            ""
        };
        write!(f, "{}{}.{:02}", sign, volts, centivolts)
    }
}

/// Destination for [`Report`]s.
#[allow(async_fn_in_trait)]
pub trait Console {
    async fn report(&mut self, report: Report);
}

impl<T: Console + ?Sized> Console for &mut T {
    async fn report(&mut self, report: Report) {
        T::report(self, report).await
    }
}

/// Writes each report as a `\r\n` terminated line to a serial port and
/// mirrors it to the log.
///
/// Console output is best effort: a failed write is logged and dropped.
pub struct SerialConsole<W> {
    writer: W,
    line: String,
}

impl<W: Write> SerialConsole<W> {
    pub fn new(writer: W) -> Self {
        Self {
            writer,
            line: String::new(),
        }
    }

    pub fn release(self) -> W {
        self.writer
    }
}

impl<W: Write> Console for SerialConsole<W> {
    async fn report(&mut self, report: Report) {
        if report.is_failure() {
            warn!("{:?}", report);
        } else {
            info!("{:?}", report);
        }

        self.line.clear();
        let _ = write!(self.line, "{}\r\n", report);

        let written = match self.writer.write_all(self.line.as_bytes()).await {
            Ok(()) => self.writer.flush().await,
            Err(e) => Err(e),
        };
        if written.is_err() {
            warn!("Console write failed");
        }
    }
}

#[cfg(test)]
mod tests {
    use alloc::format;
    use alloc::vec::Vec;
    use core::convert::Infallible;

    use embassy_futures::block_on;
    use embedded_io_async::{ErrorKind, ErrorType};

    use super::*;

    #[test]
    fn reports_render_as_console_lines() {
        assert_eq!(format!("{}", Report::Starting), "Starting up...");
        assert_eq!(
            format!(
                "{}",
                Report::BatteryVoltage {
                    reading_mv: 3000,
                    threshold_mv: 2800
                }
            ),
            "Battery voltage: 3.00 V (pass threshold 2.80 V)."
        );
        assert_eq!(
            format!("{}", Report::GaugeInitFailed),
            "Battery gauge chip could not be initialised."
        );
        assert_eq!(
            format!("{}", Report::VoltageUnavailable),
            "Unable to read battery voltage."
        );
        assert_eq!(
            format!("{}", Report::GaugingDisabled),
            "Battery gauging could not be enabled."
        );
    }

    #[test]
    fn voltage_truncates_below_the_threshold() {
        let line = |reading_mv| {
            format!(
                "{}",
                Report::BatteryVoltage {
                    reading_mv,
                    threshold_mv: 2800
                }
            )
        };
        assert_eq!(line(2799), "Battery voltage: 2.79 V (pass threshold 2.80 V).");
        assert_eq!(line(2795), "Battery voltage: 2.79 V (pass threshold 2.80 V).");
        assert_eq!(line(2800), "Battery voltage: 2.80 V (pass threshold 2.80 V).");
        assert_eq!(line(12), "Battery voltage: 0.01 V (pass threshold 2.80 V).");
        assert_eq!(line(-5), "Battery voltage: 0.00 V (pass threshold 2.80 V).");
        assert_eq!(line(-1250), "Battery voltage: -1.25 V (pass threshold 2.80 V).");
    }

    #[test]
    fn only_failures_are_flagged() {
        assert!(!Report::Starting.is_failure());
        assert!(!Report::GaugeInitialised.is_failure());
        assert!(
            !Report::BatteryVoltage {
                reading_mv: 1200,
                threshold_mv: 2800
            }
            .is_failure()
        );
        assert!(Report::GaugeInitFailed.is_failure());
        assert!(Report::VoltageUnavailable.is_failure());
        assert!(Report::GaugingDisabled.is_failure());
    }

    #[derive(Default)]
    struct CapturingWriter {
        bytes: Vec<u8>,
        flushes: usize,
    }

    impl ErrorType for CapturingWriter {
        type Error = Infallible;
    }

    impl Write for CapturingWriter {
        async fn write(&mut self, buf: &[u8]) -> Result<usize, Self::Error> {
            // Accept a few bytes at a time to exercise write_all
            let n = buf.len().min(5);
            self.bytes.extend_from_slice(&buf[..n]);
            Ok(n)
        }

        async fn flush(&mut self) -> Result<(), Self::Error> {
            self.flushes += 1;
            Ok(())
        }
    }

    struct BrokenWriter;

    impl ErrorType for BrokenWriter {
        type Error = ErrorKind;
    }

    impl Write for BrokenWriter {
        async fn write(&mut self, _buf: &[u8]) -> Result<usize, Self::Error> {
            Err(ErrorKind::Other)
        }
    }

    #[test]
    fn serial_console_writes_crlf_lines() {
        let mut console = SerialConsole::new(CapturingWriter::default());
        block_on(async {
            console.report(Report::Starting).await;
            console.report(Report::GaugeInitialised).await;
        });

        let writer = console.release();
        assert_eq!(
            core::str::from_utf8(&writer.bytes).unwrap(),
            "Starting up...\r\nBattery gauge chip initialised.\r\n"
        );
        assert_eq!(writer.flushes, 2);
    }

    #[test]
    fn serial_console_survives_write_errors() {
        let mut console = SerialConsole::new(BrokenWriter);
        block_on(console.report(Report::GaugingDisabled));
        block_on(console.report(Report::VoltageUnavailable));
    }
}
