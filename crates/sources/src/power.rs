//! Battery and backlight probes

use crate::sysfs::{percent, read_number, read_trimmed};
use statusbar_core::{Probe, ProbeContext, ProbeFailure, ProbeOutcome};
use statusbar_types::{FormatConfig, SegmentId};
use std::path::PathBuf;

/// Battery charge and charging state
pub struct BatteryProbe {
    status: PathBuf,
    capacity: PathBuf,
    warning_below: u8,
    warning_color: String,
    normal_color: String,
}

impl BatteryProbe {
    pub fn new(status: PathBuf, capacity: PathBuf, warning_below: u8, format: &FormatConfig) -> Self {
        Self {
            status,
            capacity,
            warning_below,
            warning_color: format.color_warning.clone(),
            normal_color: format.color_normal.clone(),
        }
    }

    fn render(&self, status: &str, capacity: u8) -> String {
        let marker = match status {
            "Charging" => "+",
            "Discharging" => "-",
            "Full" => "=",
            _ => "",
        };
        let text = format!("{}%{}", capacity, marker);
        if capacity < self.warning_below && status != "Charging" {
            format!("{}{}{}", self.warning_color, text, self.normal_color)
        } else {
            text
        }
    }
}

impl Probe for BatteryProbe {
    fn segment(&self) -> SegmentId {
        SegmentId::Battery
    }

    fn sample(&mut self, _ctx: &ProbeContext) -> ProbeOutcome {
        let status = match read_trimmed(&self.status) {
            Ok(status) => status,
            Err(e) => return ProbeOutcome::failed("Failed to read battery status", &e),
        };
        let capacity = match read_number::<u8>(&self.capacity) {
            Ok(capacity) => capacity.min(100),
            Err(e) => return ProbeOutcome::failed("Failed to read battery capacity", &e),
        };
        ProbeOutcome::Render(self.render(&status, capacity))
    }
}

/// A brightness file and the raw value that counts as 100%
#[derive(Debug, Clone)]
pub struct Backlight {
    pub path: PathBuf,
    pub max: u32,
}

impl Backlight {
    fn read_percent(&self) -> std::io::Result<u32> {
        let raw = read_number::<u32>(&self.path)?;
        Ok(percent(f64::from(raw), f64::from(self.max)))
    }
}

/// Screen brightness, plus keyboard brightness when a keyboard backlight is
/// configured
///
/// A failing keyboard reading is a minor failure; the screen value is still
/// shown.
pub struct BrightnessProbe {
    screen: Backlight,
    keyboard: Option<Backlight>,
}

impl BrightnessProbe {
    pub fn new(screen: Backlight, keyboard: Option<Backlight>) -> Self {
        Self { screen, keyboard }
    }
}

impl Probe for BrightnessProbe {
    fn segment(&self) -> SegmentId {
        SegmentId::Brightness
    }

    fn sample(&mut self, _ctx: &ProbeContext) -> ProbeOutcome {
        let screen = match self.screen.read_percent() {
            Ok(pct) => format!("{}%", pct),
            Err(e) => return ProbeOutcome::failed("Failed to read screen brightness", &e),
        };

        let Some(keyboard) = &self.keyboard else {
            return ProbeOutcome::Render(screen);
        };
        match keyboard.read_percent() {
            Ok(pct) => ProbeOutcome::Render(format!("{} {}%", screen, pct)),
            Err(e) => ProbeOutcome::Degraded {
                failure: ProbeFailure::from_error("Failed to read keyboard brightness", &e),
                text: Some(screen),
            },
        }
    }
}
