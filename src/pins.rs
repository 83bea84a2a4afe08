//! ADC / peripheral assignments for the probe board.
//!
//! Single source of truth — drivers reference this module rather than
//! hard-coding channel or pin numbers.

use crate::ports::{Attenuation, Bitwidth};

// ---------------------------------------------------------------------------
// Thermistor divider — ADC1
// ---------------------------------------------------------------------------

/// ADC1 channel the divider midpoint is wired to (GPIO2 on ESP32-C3).
pub const THERMISTOR_ADC_CHANNEL: u8 = 2;
/// 12 dB attenuation: full 0 – 3.1 V divider swing.
pub const THERMISTOR_ATTEN: Attenuation = Attenuation::Db12;
/// 12-bit conversions, codes 0 – 4095.
pub const THERMISTOR_BITWIDTH: Bitwidth = Bitwidth::Bits12;

// ---------------------------------------------------------------------------
// Status LED (discrete RGB on LEDC)
// ---------------------------------------------------------------------------

pub const LED_R_GPIO: i32 = 3;
pub const LED_G_GPIO: i32 = 4;
pub const LED_B_GPIO: i32 = 5;

/// LEDC channels for the R/G/B legs.
pub const LEDC_CH_LED_R: u32 = 0;
pub const LEDC_CH_LED_G: u32 = 1;
pub const LEDC_CH_LED_B: u32 = 2;

/// LEDC timer resolution (bits). 8-bit gives 0 – 255 duty levels.
pub const LED_PWM_RESOLUTION_BITS: u32 = 8;
/// LEDC frequency for the RGB status LED (1 kHz).
pub const LED_PWM_FREQ_HZ: u32 = 1_000;
