//! Unified error types for the probe firmware.
//!
//! A single `Error` enum that every subsystem converts into, keeping the
//! top-level polling loop's error handling uniform. All variants are `Copy`
//! so they can be passed through reading structs without allocation.

use core::fmt;

// ---------------------------------------------------------------------------
// Top-level firmware error
// ---------------------------------------------------------------------------

/// Every fallible operation in the measurement pipeline funnels into this type.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Error {
    /// ADC channel configuration failed; no usable probe state exists.
    Init(AdcError),
    /// A measurement cycle produced zero usable samples.
    Acquisition(AdcError),
    /// The divider arithmetic left its valid domain — a wiring or hardware
    /// fault, surfaced instead of a silent NaN/Inf.
    Domain(DomainError),
    /// Configuration failed range validation.
    Config(&'static str),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Init(e) => write!(f, "init: {e}"),
            Self::Acquisition(e) => write!(f, "acquisition: {e}"),
            Self::Domain(e) => write!(f, "domain: {e}"),
            Self::Config(msg) => write!(f, "config: {msg}"),
        }
    }
}

// ---------------------------------------------------------------------------
// ADC port errors
// ---------------------------------------------------------------------------

/// Errors reported by an [`AdcPort`](crate::ports::AdcPort) implementation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AdcError {
    /// Channel configuration was rejected by the platform (raw return code).
    ConfigFailed(i32),
    /// A single raw acquisition failed (raw return code).
    ReadFailed(i32),
    /// A bounded-wait port gave up on a stalled acquisition. Acquisitions
    /// normally block indefinitely; ports that add a timeout report it here.
    Timeout,
}

impl fmt::Display for AdcError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ConfigFailed(rc) => write!(f, "channel config failed (rc={rc})"),
            Self::ReadFailed(rc) => write!(f, "raw read failed (rc={rc})"),
            Self::Timeout => write!(f, "acquisition timed out"),
        }
    }
}

impl From<AdcError> for Error {
    fn from(e: AdcError) -> Self {
        Self::Acquisition(e)
    }
}

// ---------------------------------------------------------------------------
// Domain faults
// ---------------------------------------------------------------------------

/// Violations of the voltage-divider domain. Any of these means the sensor
/// or its wiring is faulty; the caller needs to know, so they are never
/// clamped into a plausible-looking temperature.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DomainError {
    /// Measured output voltage at or above the source voltage. A shorted
    /// divider or a disconnected series resistor reads like this.
    VoutAboveSource { vout_mv: f32, vsource_mv: f32 },
    /// Measured output voltage at or below zero (open thermistor leg).
    VoutNotPositive { vout_mv: f32 },
    /// The resistance ratio fed to the logarithm is not positive.
    RatioNotPositive { resistance_ohm: f32 },
    /// The beta model's inverse-temperature term is not positive — the
    /// resistance is far outside the range the model is valid for.
    OutsideModelRange { resistance_ohm: f32 },
}

impl fmt::Display for DomainError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::VoutAboveSource {
                vout_mv,
                vsource_mv,
            } => write!(f, "vout {vout_mv} mV >= vsource {vsource_mv} mV"),
            Self::VoutNotPositive { vout_mv } => {
                write!(f, "vout {vout_mv} mV is not positive")
            }
            Self::RatioNotPositive { resistance_ohm } => {
                write!(f, "resistance {resistance_ohm} ohm gives non-positive log ratio")
            }
            Self::OutsideModelRange { resistance_ohm } => {
                write!(f, "resistance {resistance_ohm} ohm is outside the beta model range")
            }
        }
    }
}

impl From<DomainError> for Error {
    fn from(e: DomainError) -> Self {
        Self::Domain(e)
    }
}

// ---------------------------------------------------------------------------
// Convenience Result alias
// ---------------------------------------------------------------------------

/// Firmware-wide `Result` alias.
pub type Result<T> = core::result::Result<T, Error>;
