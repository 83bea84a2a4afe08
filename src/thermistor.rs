//! NTC thermistor measurement core.
//!
//! Two coupled stages: the sampler produces a calibrated millivolt reading
//! for the divider midpoint, and the thermal model converts it to a
//! temperature through the voltage-divider law and the simplified Beta
//! (Steinhart–Hart) equation.
//!
//! ```text
//!   AdcPort ──▶ sampler ──▶ vout (mV) ──▶ thermal model ──▶ °C ──▶ °F
//! ```
//!
//! The pipeline is synchronous and blocking; each read holds `&mut self` for
//! the whole cycle, so in-flight mutation from a second caller is
//! unrepresentable. `vout`/`resistance` on the struct are last-observed-value
//! caches for display glue, not authoritative state — the authoritative
//! values are the explicit returns.

use log::{debug, warn};

use crate::config::ProbeConfig;
use crate::error::{DomainError, Error, Result};
use crate::pins;
use crate::ports::AdcPort;
use crate::sampler::{self, SAMPLES_PER_READ};

/// 0 °C in Kelvin.
const KELVIN_OFFSET: f32 = 273.15;

/// One refreshed divider voltage.
#[derive(Debug, Clone, Copy)]
pub struct VoltageReading {
    /// Divider midpoint voltage in mV. When `calibrated` is false this is an
    /// ideal-transfer estimate and anything derived from it is unreliable.
    pub millivolts: f32,
    /// Whether per-device ADC characterization backed the conversion.
    pub calibrated: bool,
    /// Raw samples actually averaged this cycle.
    pub samples: usize,
    /// Acquisition fault that cut the cycle short, if any.
    pub truncated: Option<crate::error::AdcError>,
}

/// One complete measurement: voltage, resistance and temperature.
#[derive(Debug, Clone, Copy)]
pub struct TemperatureReading {
    pub millivolts: f32,
    pub resistance_ohm: f32,
    pub celsius: f32,
    pub fahrenheit: f32,
    /// False when ADC characterization was unavailable — the temperature is
    /// then an estimate, not a trusted measurement.
    pub calibrated: bool,
    pub samples: usize,
}

/// The probe: immutable divider configuration bound to an injected ADC
/// capability, plus last-observed-value caches.
///
/// Exactly one owner for the process lifetime; created once by
/// [`Thermistor::init`], mutated in place by every read cycle.
#[derive(Debug)]
pub struct Thermistor<A: AdcPort> {
    adc: A,
    cfg: ProbeConfig,
    /// Cache of the last measured midpoint voltage (mV).
    vout_mv: f32,
    /// Cache of the last computed thermistor resistance (Ω).
    resistance_ohm: f32,
}

impl<A: AdcPort> Thermistor<A> {
    /// Validate the configuration and configure the ADC channel.
    ///
    /// A configuration failure yields no usable probe state — fatal to this
    /// measurement session, propagated up as [`Error::Init`].
    pub fn init(mut adc: A, cfg: ProbeConfig) -> Result<Self> {
        cfg.validate().map_err(Error::Config)?;
        adc.configure(cfg.adc_channel, pins::THERMISTOR_ATTEN, pins::THERMISTOR_BITWIDTH)
            .map_err(Error::Init)?;

        if !adc.is_calibrated() {
            warn!(
                "thermistor: no ADC characterization on channel {} — voltages will be estimates",
                cfg.adc_channel
            );
        }
        debug!(
            "thermistor: channel {} ready (Rs={} ohm, R0={} ohm, T0={} C, B={}, Vs={} mV)",
            cfg.adc_channel,
            cfg.series_resistance_ohm,
            cfg.nominal_resistance_ohm,
            cfg.nominal_temperature_c,
            cfg.beta,
            cfg.vsource_mv,
        );

        Ok(Self {
            adc,
            cfg,
            vout_mv: 0.0,
            resistance_ohm: 0.0,
        })
    }

    /// Refresh the divider midpoint voltage: 64 raw acquisitions, compensated
    /// averaging, calibrated conversion to mV.
    ///
    /// Deterministic for a deterministic raw sequence, and monotonic: a
    /// uniformly higher raw sequence never yields a lower average. A cycle
    /// with zero good samples fails with [`Error::Acquisition`]; a truncated
    /// cycle averages what was gathered and carries the fault in the reading.
    pub fn read_output_voltage(&mut self) -> Result<VoltageReading> {
        let avg = sampler::multisample(&mut self.adc, self.cfg.adc_channel, SAMPLES_PER_READ)
            .map_err(Error::Acquisition)?;

        if let Some(fault) = avg.truncated {
            warn!(
                "thermistor: cycle truncated after {} samples ({fault})",
                avg.samples
            );
        }

        let calibrated = self.adc.is_calibrated();
        let millivolts = if calibrated {
            self.adc.raw_to_millivolts(avg.code)
        } else {
            // Ideal transfer fallback: full scale maps to the source rail.
            avg.code / pins::THERMISTOR_BITWIDTH.max_code() * self.cfg.vsource_mv
        };

        self.vout_mv = millivolts;
        Ok(VoltageReading {
            millivolts,
            calibrated,
            samples: avg.samples,
            truncated: avg.truncated,
        })
    }

    /// Convert a midpoint voltage to °C.
    ///
    /// Divider law `R = Rs * vout / (vsource - vout)`, then the Beta equation
    /// `1 / (ln(R/R0)/B + 1/T0) - 273.15` with T0 in Kelvin. Domain
    /// violations (`vout >= vsource`, non-positive vout or ratio) mean a
    /// wiring fault and come back as [`Error::Domain`] — never NaN or Inf.
    pub fn voltage_to_celsius(&mut self, vout_mv: f32) -> Result<f32> {
        let vsource_mv = self.cfg.vsource_mv;
        if !(vout_mv > 0.0) {
            return Err(DomainError::VoutNotPositive { vout_mv }.into());
        }
        if vout_mv >= vsource_mv {
            return Err(DomainError::VoutAboveSource {
                vout_mv,
                vsource_mv,
            }
            .into());
        }

        let resistance_ohm = self.cfg.series_resistance_ohm * vout_mv / (vsource_mv - vout_mv);
        let ratio = resistance_ohm / self.cfg.nominal_resistance_ohm;
        if !(ratio > 0.0) {
            return Err(DomainError::RatioNotPositive { resistance_ohm }.into());
        }
        self.resistance_ohm = resistance_ohm;

        let inv_t = ratio.ln() / self.cfg.beta
            + 1.0 / (self.cfg.nominal_temperature_c + KELVIN_OFFSET);
        if !(inv_t > 0.0) {
            // Resistance so far below R0 that 1/T would go non-positive —
            // the beta approximation is meaningless out here.
            return Err(DomainError::OutsideModelRange { resistance_ohm }.into());
        }
        Ok(1.0 / inv_t - KELVIN_OFFSET)
    }

    /// One full pipeline pass: refresh the voltage, then convert it.
    pub fn get_celsius(&mut self) -> Result<TemperatureReading> {
        let voltage = self.read_output_voltage()?;
        let celsius = self.voltage_to_celsius(voltage.millivolts)?;
        Ok(TemperatureReading {
            millivolts: voltage.millivolts,
            resistance_ohm: self.resistance_ohm,
            celsius,
            fahrenheit: celsius_to_fahrenheit(celsius),
            calibrated: voltage.calibrated,
            samples: voltage.samples,
        })
    }

    /// Last measured midpoint voltage (mV). Display convenience, refreshed by
    /// [`Thermistor::read_output_voltage`].
    pub fn last_vout_mv(&self) -> f32 {
        self.vout_mv
    }

    /// Last computed thermistor resistance (Ω). Display convenience,
    /// refreshed by [`Thermistor::voltage_to_celsius`].
    pub fn last_resistance_ohm(&self) -> f32 {
        self.resistance_ohm
    }

    pub fn config(&self) -> &ProbeConfig {
        &self.cfg
    }

    /// The injected ADC capability (shared view — calibration queries only).
    pub fn adc(&self) -> &A {
        &self.adc
    }
}

/// Exact linear transform; pure and total.
pub fn celsius_to_fahrenheit(celsius: f32) -> f32 {
    celsius * 1.8 + 32.0
}
