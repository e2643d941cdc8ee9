// Provide a mapping for the controller GPIO pins

//
//| GPIO # | Name       | Description                                               |
//| ------ | ---------- | --------------------------------------------------------- |
//| 0      | UART0_TX   | Serial console output, 9600 baud.                         |
//| 4      | I2C0_SDA   | I2C data line to the battery gauge shield.                |
//| 5      | I2C0_SCL   | I2C clock line to the battery gauge shield.               |
//| 6      | GAUGE_EN   | BQ35100 gauge enable (GE). Active high.                   |
//| 18     | LED_RED    | Red element of the on-board RGB LED. Active low.          |
//| 19     | LED_GREEN  | Green element of the on-board RGB LED. Active low.        |
//| 20     | LED_BLUE   | Blue element of the on-board RGB LED. Active low.         |

use assign_resources::assign_resources;
use embassy_rp::peripherals;

assign_resources! {
  /// Tri-color status LED
  status_led: StatusLedResources {
    red: PIN_18,
    green: PIN_19,
    blue: PIN_20,
  },
  /// Battery gauge shield
  gauge: GaugeResources {
    sda: PIN_4,
    scl: PIN_5,
    gauge_enable: PIN_6,
    i2c: I2C0,
  },
  /// Serial console
  console: ConsoleResources {
    tx: PIN_0,
    uart: UART0,
  },
}
