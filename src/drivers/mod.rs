pub mod status_led;
