//! Multisampling with compensated summation.
//!
//! One representative raw code per cycle: 64 sequential acquisitions reduced
//! by a Kahan-compensated running sum, so the accumulated rounding error of
//! repeated float addition stays bounded instead of growing with N.

use crate::error::AdcError;
use crate::ports::{AdcChannel, AdcPort};

/// Raw acquisitions per measurement cycle.
pub const SAMPLES_PER_READ: usize = 64;

/// Kahan compensated running sum.
#[derive(Debug, Clone, Copy, Default)]
pub struct KahanSum {
    sum: f32,
    /// Running compensation for lost low-order bits.
    c: f32,
}

impl KahanSum {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, sample: f32) {
        let y = sample - self.c;
        let t = self.sum + y;
        self.c = (t - self.sum) - y;
        self.sum = t;
    }

    pub fn value(&self) -> f32 {
        self.sum
    }
}

/// Outcome of one multisampling pass.
#[derive(Debug, Clone, Copy)]
pub struct SampleAverage {
    /// Representative raw code — mean of the gathered samples. Fractional
    /// because the mean of integer codes rarely lands on an integer.
    pub code: f32,
    /// Samples actually averaged (`SAMPLES_PER_READ` on a clean cycle).
    pub samples: usize,
    /// The acquisition fault that cut the cycle short, if any. Present means
    /// `code` averages only the samples gathered before the fault.
    pub truncated: Option<AdcError>,
}

/// Acquire up to `count` raw codes and reduce them to one average.
///
/// A failed acquisition aborts the remaining samples — partial garbage is
/// never averaged in silently. The samples gathered before the failure still
/// form the average, with the fault surfaced in [`SampleAverage::truncated`].
/// Zero successful samples escalates the fault to the caller.
pub fn multisample<A: AdcPort>(
    adc: &mut A,
    channel: AdcChannel,
    count: usize,
) -> Result<SampleAverage, AdcError> {
    let mut acc = KahanSum::new();
    let mut taken = 0usize;
    let mut truncated = None;

    for _ in 0..count {
        match adc.read_raw(channel) {
            Ok(raw) => {
                acc.add(f32::from(raw));
                taken += 1;
            }
            Err(e) => {
                truncated = Some(e);
                break;
            }
        }
    }

    match (taken, truncated) {
        (0, Some(e)) => Err(e),
        (0, None) => Err(AdcError::ReadFailed(0)),
        (n, truncated) => Ok(SampleAverage {
            code: acc.value() / n as f32,
            samples: n,
            truncated,
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::sim::SimAdc;

    #[test]
    fn constant_input_averages_exactly() {
        // No drift from the compensation term on constant input.
        for v in [0u16, 1, 1000, 2047, 4095] {
            let mut adc = SimAdc::with_constant(v);
            let avg = multisample(&mut adc, 0, SAMPLES_PER_READ).unwrap();
            assert_eq!(avg.code, f32::from(v));
            assert_eq!(avg.samples, SAMPLES_PER_READ);
            assert!(avg.truncated.is_none());
        }
    }

    #[test]
    fn compensated_average_matches_arithmetic_mean() {
        let codes: Vec<u16> = (0u16..64).map(|i| 4095 - i * 17).collect();
        let mut adc = SimAdc::new();
        adc.push_codes(&codes);
        let avg = multisample(&mut adc, 0, 64).unwrap();

        let mean = codes.iter().map(|&c| f64::from(c)).sum::<f64>() / 64.0;
        let rel = (f64::from(avg.code) - mean).abs() / mean;
        assert!(rel < 1e-6, "relative error {rel}");
    }

    #[test]
    fn failure_mid_cycle_truncates_average() {
        let mut adc = SimAdc::new();
        adc.push_codes(&[100, 200, 300]);
        adc.push_fault(AdcError::ReadFailed(-1));
        adc.push_codes(&[4000; 61]); // never reached

        let avg = multisample(&mut adc, 0, 64).unwrap();
        assert_eq!(avg.samples, 3);
        assert_eq!(avg.code, 200.0);
        assert_eq!(avg.truncated, Some(AdcError::ReadFailed(-1)));
    }

    #[test]
    fn failure_on_first_sample_escalates() {
        let mut adc = SimAdc::new();
        adc.push_fault(AdcError::Timeout);
        let err = multisample(&mut adc, 0, 64).unwrap_err();
        assert_eq!(err, AdcError::Timeout);
    }
}
