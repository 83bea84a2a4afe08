//! Scripted in-memory ADC for host tests and the simulator.
//!
//! Queue raw codes and faults, toggle calibration availability, and assert
//! on the configuration the core applied. Conversion uses the ideal 12-bit
//! transfer (full scale = vref), so expected millivolt values in tests are
//! exact arithmetic.

use std::collections::VecDeque;

use crate::error::AdcError;
use crate::ports::{AdcChannel, AdcPort, Attenuation, Bitwidth};

const SIM_FULL_SCALE: f32 = 4_095.0;
const SIM_VREF_MV: f32 = 3_300.0;

#[derive(Debug)]
pub struct SimAdc {
    script: VecDeque<Result<u16, AdcError>>,
    /// Returned once the script runs dry.
    idle_code: u16,
    calibrated: bool,
    configured: Option<(AdcChannel, Attenuation, Bitwidth)>,
    fail_configure: Option<AdcError>,
}

impl SimAdc {
    pub fn new() -> Self {
        Self {
            script: VecDeque::new(),
            idle_code: 2_048,
            calibrated: true,
            configured: None,
            fail_configure: None,
        }
    }

    /// Simulator that returns `code` for every acquisition.
    pub fn with_constant(code: u16) -> Self {
        let mut sim = Self::new();
        sim.idle_code = code;
        sim
    }

    /// Append raw codes to the script (consumed in order).
    pub fn push_codes(&mut self, codes: &[u16]) {
        self.script.extend(codes.iter().map(|&c| Ok(c)));
    }

    /// Append a single acquisition fault to the script.
    pub fn push_fault(&mut self, fault: AdcError) {
        self.script.push_back(Err(fault));
    }

    /// Simulate a device without characterization data.
    pub fn set_calibrated(&mut self, calibrated: bool) {
        self.calibrated = calibrated;
    }

    /// Make the next `configure` call fail.
    pub fn fail_configure_with(&mut self, fault: AdcError) {
        self.fail_configure = Some(fault);
    }

    /// What the core configured, if anything.
    pub fn configured(&self) -> Option<(AdcChannel, Attenuation, Bitwidth)> {
        self.configured
    }

    /// The raw code that would produce `millivolts` under the ideal transfer.
    pub fn code_for_millivolts(millivolts: f32) -> f32 {
        millivolts / SIM_VREF_MV * SIM_FULL_SCALE
    }
}

impl Default for SimAdc {
    fn default() -> Self {
        Self::new()
    }
}

impl AdcPort for SimAdc {
    fn configure(
        &mut self,
        channel: AdcChannel,
        atten: Attenuation,
        bitwidth: Bitwidth,
    ) -> Result<(), AdcError> {
        if let Some(fault) = self.fail_configure.take() {
            return Err(fault);
        }
        self.configured = Some((channel, atten, bitwidth));
        Ok(())
    }

    fn read_raw(&mut self, _channel: AdcChannel) -> Result<u16, AdcError> {
        self.script.pop_front().unwrap_or(Ok(self.idle_code))
    }

    fn is_calibrated(&self) -> bool {
        self.calibrated
    }

    fn raw_to_millivolts(&self, code: f32) -> f32 {
        code / SIM_FULL_SCALE * SIM_VREF_MV
    }
}
