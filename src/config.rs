//! Probe configuration parameters.
//!
//! All tunable parameters for the thermistor divider and the polling loop.
//! Defaults match the stock 10 kΩ NTC reference design; deployments override
//! them at init time (config sourcing itself lives outside this crate).

use serde::{Deserialize, Serialize};

/// Divider and polling configuration, fixed after [`Thermistor::init`]
/// (crate::thermistor::Thermistor::init) succeeds.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProbeConfig {
    // --- Divider wiring ---
    /// ADC channel the divider midpoint is wired to.
    pub adc_channel: u8,
    /// Series resistor from the source rail to the midpoint (Ω).
    pub series_resistance_ohm: f32,
    /// Divider source voltage (mV), usually the 3.3 V rail.
    pub vsource_mv: f32,

    // --- Thermistor characteristics ---
    /// Thermistor resistance at the nominal temperature (Ω).
    pub nominal_resistance_ohm: f32,
    /// Nominal temperature (°C), usually 25.
    pub nominal_temperature_c: f32,
    /// Beta coefficient of the simplified Steinhart–Hart equation.
    pub beta: f32,

    // --- Timing ---
    /// Polling loop period (milliseconds).
    pub read_interval_ms: u32,
}

impl Default for ProbeConfig {
    fn default() -> Self {
        Self {
            adc_channel: crate::pins::THERMISTOR_ADC_CHANNEL,
            series_resistance_ohm: 10_000.0,
            vsource_mv: 3_300.0,
            nominal_resistance_ohm: 10_000.0,
            nominal_temperature_c: 25.0,
            beta: 3_950.0,
            read_interval_ms: 200,
        }
    }
}

impl ProbeConfig {
    /// Range-check every field. Rejected values are reported, never clamped;
    /// a divider with a non-positive series resistor cannot measure anything.
    pub fn validate(&self) -> Result<(), &'static str> {
        if !(self.series_resistance_ohm > 0.0) {
            return Err("series_resistance_ohm must be positive");
        }
        if !(self.nominal_resistance_ohm > 0.0) {
            return Err("nominal_resistance_ohm must be positive");
        }
        if !(self.beta > 0.0) {
            return Err("beta must be positive");
        }
        if !(self.vsource_mv > 0.0) {
            return Err("vsource_mv must be positive");
        }
        // The Kelvin offset must keep the reference temperature positive.
        if self.nominal_temperature_c <= -273.15 {
            return Err("nominal_temperature_c below absolute zero");
        }
        if self.read_interval_ms == 0 {
            return Err("read_interval_ms must be non-zero");
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_sane() {
        let c = ProbeConfig::default();
        assert!(c.validate().is_ok());
        assert_eq!(c.series_resistance_ohm, 10_000.0);
        assert_eq!(c.nominal_resistance_ohm, 10_000.0);
        assert_eq!(c.nominal_temperature_c, 25.0);
        assert_eq!(c.beta, 3_950.0);
        assert_eq!(c.vsource_mv, 3_300.0);
        assert_eq!(c.read_interval_ms, 200);
    }

    #[test]
    fn validate_rejects_bad_ranges() {
        let mut c = ProbeConfig::default();
        c.series_resistance_ohm = 0.0;
        assert!(c.validate().is_err());

        let mut c = ProbeConfig::default();
        c.beta = -3950.0;
        assert!(c.validate().is_err());

        let mut c = ProbeConfig::default();
        c.vsource_mv = f32::NAN;
        assert!(c.validate().is_err(), "NaN must not pass validation");

        let mut c = ProbeConfig::default();
        c.nominal_temperature_c = -300.0;
        assert!(c.validate().is_err());

        let mut c = ProbeConfig::default();
        c.read_interval_ms = 0;
        assert!(c.validate().is_err());
    }

    #[test]
    fn config_round_trips_through_json() {
        let c = ProbeConfig {
            adc_channel: 4,
            series_resistance_ohm: 4_700.0,
            ..ProbeConfig::default()
        };
        let json = serde_json::to_string(&c).unwrap();
        let back: ProbeConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(back.adc_channel, 4);
        assert_eq!(back.series_resistance_ohm, 4_700.0);
        assert!(back.validate().is_ok());
    }
}
