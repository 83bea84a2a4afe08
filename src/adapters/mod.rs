//! ADC adapters — one per underlying platform API generation, plus the
//! host-side simulator. Each implements [`AdcPort`](crate::ports::AdcPort);
//! the measurement core never depends on which one is active.

#[cfg(feature = "espidf")]
pub mod esp_adc;
pub mod sim;
