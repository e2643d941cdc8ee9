pub(crate) mod status_led;
