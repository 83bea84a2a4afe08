//! ESP-IDF oneshot ADC adapter with curve-fitting calibration.
//!
//! Wraps the IDF v5 `adc_oneshot` + `adc_cali` APIs behind
//! [`AdcPort`](crate::ports::AdcPort). The unit and calibration handles are
//! owned by the adapter value — no module statics — so a second unit or a
//! mock can coexist with it.

use esp_idf_svc::sys::*;
use log::{info, warn};

use crate::error::AdcError;
use crate::ports::{AdcChannel, AdcPort, Attenuation, Bitwidth};

pub struct EspAdc {
    unit_id: adc_unit_t,
    unit: adc_oneshot_unit_handle_t,
    cali: adc_cali_handle_t,
    calibrated: bool,
}

impl EspAdc {
    /// Claim an ADC unit in oneshot mode.
    pub fn new(unit_id: adc_unit_t) -> Result<Self, AdcError> {
        let init_cfg = adc_oneshot_unit_init_cfg_t {
            unit_id,
            ulp_mode: adc_ulp_mode_t_ADC_ULP_MODE_DISABLE,
            ..Default::default()
        };
        let mut unit: adc_oneshot_unit_handle_t = core::ptr::null_mut();
        // SAFETY: init_cfg is a valid config and `unit` outlives the call.
        let ret = unsafe { adc_oneshot_new_unit(&init_cfg, &mut unit) };
        if ret != ESP_OK as i32 {
            return Err(AdcError::ConfigFailed(ret));
        }
        Ok(Self {
            unit_id,
            unit,
            cali: core::ptr::null_mut(),
            calibrated: false,
        })
    }

    fn characterize(&mut self, atten: adc_atten_t, bitwidth: adc_bitwidth_t) {
        let cali_cfg = adc_cali_curve_fitting_config_t {
            unit_id: self.unit_id,
            atten,
            bitwidth,
            ..Default::default()
        };
        // SAFETY: cali_cfg is valid; self.cali is only written here, once,
        // during the single-threaded init path.
        let ret = unsafe { adc_cali_create_scheme_curve_fitting(&cali_cfg, &mut self.cali) };
        self.calibrated = ret == ESP_OK as i32;
        if self.calibrated {
            info!("esp_adc: curve-fitting characterization available");
        } else {
            // No eFuse data on this part; readings degrade to estimates.
            warn!("esp_adc: characterization unavailable (rc={ret})");
        }
    }
}

impl AdcPort for EspAdc {
    fn configure(
        &mut self,
        channel: AdcChannel,
        atten: Attenuation,
        bitwidth: Bitwidth,
    ) -> Result<(), AdcError> {
        let atten = atten_to_sys(atten);
        let bitwidth = bitwidth_to_sys(bitwidth);
        let chan_cfg = adc_oneshot_chan_cfg_t { atten, bitwidth };
        // SAFETY: self.unit is a live handle from adc_oneshot_new_unit.
        let ret =
            unsafe { adc_oneshot_config_channel(self.unit, adc_channel_t::from(channel), &chan_cfg) };
        if ret != ESP_OK as i32 {
            return Err(AdcError::ConfigFailed(ret));
        }
        self.characterize(atten, bitwidth);
        Ok(())
    }

    fn read_raw(&mut self, channel: AdcChannel) -> Result<u16, AdcError> {
        let mut raw: i32 = 0;
        // SAFETY: self.unit is a live handle; `raw` outlives the call.
        let ret = unsafe { adc_oneshot_read(self.unit, adc_channel_t::from(channel), &mut raw) };
        if ret != ESP_OK as i32 {
            return Err(AdcError::ReadFailed(ret));
        }
        Ok(raw.max(0) as u16)
    }

    fn is_calibrated(&self) -> bool {
        self.calibrated
    }

    fn raw_to_millivolts(&self, code: f32) -> f32 {
        let mut mv: i32 = 0;
        // SAFETY: self.cali is a live handle whenever calibrated is true,
        // the only state callers may invoke this in.
        let ret = unsafe { adc_cali_raw_to_voltage(self.cali, code.round() as i32, &mut mv) };
        if ret != ESP_OK as i32 {
            warn!("esp_adc: raw_to_voltage failed (rc={ret})");
            return 0.0;
        }
        mv as f32
    }
}

impl Drop for EspAdc {
    fn drop(&mut self) {
        // SAFETY: handles were created by this adapter and are not aliased.
        unsafe {
            if !self.cali.is_null() {
                adc_cali_delete_scheme_curve_fitting(self.cali);
            }
            adc_oneshot_del_unit(self.unit);
        }
    }
}

fn atten_to_sys(atten: Attenuation) -> adc_atten_t {
    match atten {
        Attenuation::Db0 => adc_atten_t_ADC_ATTEN_DB_0,
        Attenuation::Db2_5 => adc_atten_t_ADC_ATTEN_DB_2_5,
        Attenuation::Db6 => adc_atten_t_ADC_ATTEN_DB_6,
        Attenuation::Db12 => adc_atten_t_ADC_ATTEN_DB_12,
    }
}

fn bitwidth_to_sys(bitwidth: Bitwidth) -> adc_bitwidth_t {
    match bitwidth {
        Bitwidth::Bits9 => adc_bitwidth_t_ADC_BITWIDTH_9,
        Bitwidth::Bits10 => adc_bitwidth_t_ADC_BITWIDTH_10,
        Bitwidth::Bits11 => adc_bitwidth_t_ADC_BITWIDTH_11,
        Bitwidth::Bits12 => adc_bitwidth_t_ADC_BITWIDTH_12,
    }
}
