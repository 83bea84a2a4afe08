//! Property tests for the summation and thermal-model laws.
//!
//! Runs on host (x86_64) only — proptest is not available for ESP32 targets.

#![cfg(not(target_os = "espidf"))]

use ntcprobe::adapters::sim::SimAdc;
use ntcprobe::config::ProbeConfig;
use ntcprobe::error::Error;
use ntcprobe::sampler::KahanSum;
use ntcprobe::sampler::multisample;
use ntcprobe::thermistor::Thermistor;
use proptest::prelude::*;

fn probe() -> Thermistor<SimAdc> {
    Thermistor::init(SimAdc::new(), ProbeConfig::default()).unwrap()
}

fn average(codes: &[u16]) -> f32 {
    let mut adc = SimAdc::new();
    adc.push_codes(codes);
    multisample(&mut adc, 0, codes.len()).unwrap().code
}

// ── Compensated summation laws ────────────────────────────────

proptest! {
    /// The compensated average equals the arithmetic mean within 1e-6
    /// relative, for any raw-code sequence.
    #[test]
    fn compensated_average_equals_mean(
        codes in proptest::collection::vec(0u16..=4095, 1..=256),
    ) {
        let avg = f64::from(average(&codes));
        let mean = codes.iter().map(|&c| f64::from(c)).sum::<f64>() / codes.len() as f64;

        let err = (avg - mean).abs();
        prop_assert!(
            err <= mean.abs() * 1e-6,
            "avg {avg} vs mean {mean}"
        );
    }

    /// Sample order never changes the average (permutation invariance).
    #[test]
    fn average_is_permutation_invariant(
        codes in proptest::collection::vec(0u16..=4095, 1..=128),
    ) {
        let forward = average(&codes);

        let mut reversed = codes.clone();
        reversed.reverse();
        prop_assert_eq!(forward, average(&reversed));

        let mut sorted = codes.clone();
        sorted.sort_unstable();
        prop_assert_eq!(forward, average(&sorted));
    }

    /// Constant input averages to itself exactly — the compensation term
    /// introduces no drift.
    #[test]
    fn constant_input_has_no_drift(code in 0u16..=4095, n in 1usize..=256) {
        let codes = vec![code; n];
        prop_assert_eq!(average(&codes), f32::from(code));
    }

    /// A uniformly higher sequence never averages lower.
    #[test]
    fn average_is_monotonic_in_the_samples(
        codes in proptest::collection::vec(0u16..=4000, 1..=64),
        lift in 1u16..=95,
    ) {
        let lifted: Vec<u16> = codes.iter().map(|&c| c + lift).collect();
        prop_assert!(average(&lifted) >= average(&codes));
    }
}

// ── Thermal model laws ────────────────────────────────────────

proptest! {
    /// Inside the valid domain the transform is total and finite, and
    /// resistance rises strictly with vout while temperature falls (NTC).
    #[test]
    fn temperature_is_strictly_monotonic(
        vout in 1.0f32..3_200.0,
        gap in 1.0f32..99.0,
    ) {
        let mut th = probe();

        let c_low = th.voltage_to_celsius(vout).unwrap();
        let r_low = th.last_resistance_ohm();

        let c_high = th.voltage_to_celsius(vout + gap).unwrap();
        let r_high = th.last_resistance_ohm();

        prop_assert!(c_low.is_finite() && c_high.is_finite());
        prop_assert!(r_high > r_low, "resistance must rise with vout");
        prop_assert!(c_high < c_low, "NTC: higher resistance reads colder");
    }

    /// No input produces NaN or infinity — everything outside the domain is
    /// a typed fault.
    #[test]
    fn transform_never_leaks_non_finite(vout in -10_000.0f32..10_000.0) {
        let mut th = probe();
        match th.voltage_to_celsius(vout) {
            Ok(c) => prop_assert!(c.is_finite()),
            Err(e) => prop_assert!(matches!(e, Error::Domain(_))),
        }
    }
}

// ── Kahan microstructure ──────────────────────────────────────

#[test]
fn kahan_recovers_low_order_bits() {
    // Adding 64 copies of a value whose low bits a naive f32 sum would shed
    // past 2^24: the compensated sum stays exact where naive drifts.
    let mut kahan = KahanSum::new();
    let mut naive = 0.0f32;
    let x = 16_777_216.0f32; // 2^24
    kahan.add(x);
    naive += x;
    for _ in 0..64 {
        kahan.add(1.0);
        naive += 1.0;
    }
    assert_eq!(kahan.value(), x + 64.0);
    // Naive addition loses every increment at this magnitude.
    assert_eq!(naive, x);
}
