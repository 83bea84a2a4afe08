//! NTC Probe Firmware — Main Entry Point
//!
//! Thin glue around the measurement pipeline:
//!
//! ```text
//! ┌──────────────────────────────────────────────────────┐
//! │  EspAdc (oneshot + curve-fitting cali)               │
//! │  ─────────────── AdcPort boundary ────────────────   │
//! │  Thermistor  (sampler · thermal model)               │
//! │  ─────────────────────────────────────────────────   │
//! │  Polling loop · log line · StatusLed colour          │
//! └──────────────────────────────────────────────────────┘
//! ```
//!
//! Every 200 ms: read, log voltage/temperature/resistance, paint the LED.
//! A failed cycle is logged and retried on the next tick — the loop itself
//! is the retry policy.

use anyhow::{Result, anyhow};
use esp_idf_hal::delay::FreeRtos;
use log::{error, info, warn};

use ntcprobe::adapters::esp_adc::EspAdc;
use ntcprobe::config::ProbeConfig;
use ntcprobe::drivers::status_led::StatusLed;
use ntcprobe::thermistor::Thermistor;

fn main() -> Result<()> {
    esp_idf_svc::sys::link_patches();
    esp_idf_logger::init()?;

    info!("ntcprobe v{}", env!("CARGO_PKG_VERSION"));

    let cfg = ProbeConfig::default();
    let interval_ms = cfg.read_interval_ms;

    let adc = EspAdc::new(esp_idf_svc::sys::adc_unit_t_ADC_UNIT_1)
        .map_err(|e| anyhow!("ADC unit init failed: {e}"))?;
    let mut probe =
        Thermistor::init(adc, cfg).map_err(|e| anyhow!("thermistor init failed: {e}"))?;
    let mut led = StatusLed::new();

    loop {
        match probe.get_celsius() {
            Ok(reading) => {
                info!(
                    "Voltage: {:.0} mV\tTemperature: {:.1} C / {:.1} F\tResistance: {:.0} ohm",
                    reading.millivolts,
                    reading.celsius,
                    reading.fahrenheit,
                    reading.resistance_ohm,
                );
                if !reading.calibrated {
                    warn!("reading is uncalibrated — treat temperature as an estimate");
                }
                led.set_from_celsius(reading.celsius);
            }
            Err(e) => error!("read cycle failed: {e}"),
        }
        FreeRtos::delay_ms(interval_ms);
    }
}
