//! Port trait — the boundary between the measurement core and the ADC hardware.
//!
//! ```text
//!   Adapter (esp_adc / sim) ──▶ AdcPort ──▶ Thermistor (domain)
//! ```
//!
//! The core consumes the port via generics, so it never touches hardware
//! directly and never depends on which ESP-IDF ADC API generation is active.
//! One adapter per platform generation implements this trait; tests use the
//! scripted simulator.

use crate::error::AdcError;

/// Index of an ADC channel on the unit the port wraps.
pub type AdcChannel = u8;

/// Input attenuation applied ahead of the ADC. Db12 covers the usual
/// 0 – 3.1 V divider range on ESP32-class parts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Attenuation {
    Db0,
    Db2_5,
    Db6,
    Db12,
}

/// Conversion bit width.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Bitwidth {
    Bits9,
    Bits10,
    Bits11,
    Bits12,
}

impl Bitwidth {
    /// Largest raw code this width can produce.
    pub const fn max_code(self) -> f32 {
        match self {
            Self::Bits9 => 511.0,
            Self::Bits10 => 1023.0,
            Self::Bits11 => 2047.0,
            Self::Bits12 => 4095.0,
        }
    }
}

/// Raw acquisition plus calibration capability.
///
/// Acquisitions are blocking with no timeout: a stalled conversion stalls
/// the whole cycle. An implementation may add a bounded wait and report
/// [`AdcError::Timeout`]; callers treat that like any other failed read.
pub trait AdcPort {
    /// One-time channel setup. Must be called before [`AdcPort::read_raw`].
    fn configure(
        &mut self,
        channel: AdcChannel,
        atten: Attenuation,
        bitwidth: Bitwidth,
    ) -> Result<(), AdcError>;

    /// Single blocking raw acquisition.
    fn read_raw(&mut self, channel: AdcChannel) -> Result<u16, AdcError>;

    /// Whether per-device characterization data is available. Written once at
    /// init, read by every cycle — never mutated afterwards.
    fn is_calibrated(&self) -> bool;

    /// Convert an averaged raw code to millivolts using the characterization
    /// data. Only meaningful when [`AdcPort::is_calibrated`] returns true.
    /// The code is fractional because it is a multi-sample average.
    fn raw_to_millivolts(&self, code: f32) -> f32;
}
