//! RGB status LED driver.
//!
//! Temperature maps to a hue — warm readings shift red, cool readings shift
//! blue — rendered through three LEDC PWM channels driving a common-cathode
//! RGB LED.
//!
//! ## Dual-target design
//!
//! On ESP-IDF: drives three LEDC PWM channels configured in `new()`.
//! On host/test: tracks state in-memory only.

/// Hue anchor: 35 °C and above renders hue 0 (red).
const HUE_PIVOT_C: f32 = 35.0;
const HUE_PER_DEGREE: f32 = 10.0;
const SATURATION: u8 = 100;
const BRIGHTNESS: u8 = 50;

pub struct StatusLed {
    current: (u8, u8, u8),
}

impl StatusLed {
    pub fn new() -> Self {
        #[cfg(feature = "espidf")]
        espidf::init_ledc();
        Self { current: (0, 0, 0) }
    }

    /// Render a temperature as colour: `hue = (35 - °C) * 10`, clamped to a
    /// single trip around the wheel.
    pub fn set_from_celsius(&mut self, celsius: f32) {
        let hue = ((HUE_PIVOT_C - celsius) * HUE_PER_DEGREE).clamp(0.0, 359.0) as u16;
        let (r, g, b) = hsv_to_rgb(hue, SATURATION, BRIGHTNESS);
        self.set_colour(r, g, b);
    }

    pub fn set_colour(&mut self, r: u8, g: u8, b: u8) {
        #[cfg(feature = "espidf")]
        {
            espidf::ledc_set(crate::pins::LEDC_CH_LED_R, r);
            espidf::ledc_set(crate::pins::LEDC_CH_LED_G, g);
            espidf::ledc_set(crate::pins::LEDC_CH_LED_B, b);
        }
        self.current = (r, g, b);
    }

    pub fn off(&mut self) {
        self.set_colour(0, 0, 0);
    }

    pub fn current_colour(&self) -> (u8, u8, u8) {
        self.current
    }
}

impl Default for StatusLed {
    fn default() -> Self {
        Self::new()
    }
}

/// HSV → RGB. Hue in degrees (0–359), saturation and value in percent.
pub fn hsv_to_rgb(hue: u16, sat: u8, val: u8) -> (u8, u8, u8) {
    let h = f32::from(hue.min(359));
    let s = f32::from(sat.min(100)) / 100.0;
    let v = f32::from(val.min(100)) / 100.0;

    let c = v * s;
    let x = c * (1.0 - ((h / 60.0) % 2.0 - 1.0).abs());
    let m = v - c;

    let (r, g, b) = match (h / 60.0) as u32 {
        0 => (c, x, 0.0),
        1 => (x, c, 0.0),
        2 => (0.0, c, x),
        3 => (0.0, x, c),
        4 => (x, 0.0, c),
        _ => (c, 0.0, x),
    };

    (
        ((r + m) * 255.0) as u8,
        ((g + m) * 255.0) as u8,
        ((b + m) * 255.0) as u8,
    )
}

#[cfg(feature = "espidf")]
mod espidf {
    //! LEDC plumbing: one low-speed timer, three channels.

    use esp_idf_svc::sys::*;
    use log::warn;

    use crate::pins;

    pub fn init_ledc() {
        let timer_cfg = ledc_timer_config_t {
            speed_mode: ledc_mode_t_LEDC_LOW_SPEED_MODE,
            duty_resolution: pins::LED_PWM_RESOLUTION_BITS,
            timer_num: ledc_timer_t_LEDC_TIMER_0,
            freq_hz: pins::LED_PWM_FREQ_HZ,
            clk_cfg: ledc_clk_cfg_t_LEDC_AUTO_CLK,
            ..Default::default()
        };
        // SAFETY: called once from new() before the polling loop starts.
        let ret = unsafe { ledc_timer_config(&timer_cfg) };
        if ret != ESP_OK as i32 {
            // Indication is non-critical; measurement continues without it.
            warn!("status_led: LEDC timer config failed (rc={ret})");
            return;
        }

        for (ch, gpio) in [
            (pins::LEDC_CH_LED_R, pins::LED_R_GPIO),
            (pins::LEDC_CH_LED_G, pins::LED_G_GPIO),
            (pins::LEDC_CH_LED_B, pins::LED_B_GPIO),
        ] {
            let ch_cfg = ledc_channel_config_t {
                gpio_num: gpio,
                speed_mode: ledc_mode_t_LEDC_LOW_SPEED_MODE,
                channel: ch,
                timer_sel: ledc_timer_t_LEDC_TIMER_0,
                duty: 0,
                hpoint: 0,
                ..Default::default()
            };
            // SAFETY: single-threaded init path, valid config.
            let ret = unsafe { ledc_channel_config(&ch_cfg) };
            if ret != ESP_OK as i32 {
                warn!("status_led: LEDC channel {ch} config failed (rc={ret})");
            }
        }
    }

    pub fn ledc_set(channel: u32, duty: u8) {
        // SAFETY: channels were configured in init_ledc(); duty fits the
        // 8-bit timer resolution.
        unsafe {
            ledc_set_duty(ledc_mode_t_LEDC_LOW_SPEED_MODE, channel, u32::from(duty));
            ledc_update_duty(ledc_mode_t_LEDC_LOW_SPEED_MODE, channel);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hsv_primaries() {
        assert_eq!(hsv_to_rgb(0, 100, 100), (255, 0, 0));
        assert_eq!(hsv_to_rgb(120, 100, 100), (0, 255, 0));
        assert_eq!(hsv_to_rgb(240, 100, 100), (0, 0, 255));
        assert_eq!(hsv_to_rgb(0, 0, 0), (0, 0, 0));
    }

    #[test]
    fn hot_reads_red_cold_reads_blue() {
        let mut led = StatusLed::new();
        led.set_from_celsius(40.0); // above pivot → hue clamps to 0
        let (r, _, b) = led.current_colour();
        assert!(r > b);

        led.set_from_celsius(10.0); // (35-10)*10 = 250° → blue-ish
        let (r, _, b) = led.current_colour();
        assert!(b > r);
    }
}
