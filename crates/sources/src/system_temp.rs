//! CPU temperature probe
//!
//! Averages every discovered thermal input (millidegrees Celsius) and shows
//! the result as a percentage of the configured maximum temperature.

use crate::sensors::{SensorAverage, SensorPaths};
use crate::sysfs::percent;
use statusbar_core::{Probe, ProbeContext, ProbeOutcome};
use statusbar_types::{FormatConfig, SegmentId};
use std::sync::Arc;

/// Percentage at which the reading switches to the warning color
const WARNING_PERCENT: u32 = 80;

pub struct CpuTempProbe {
    sensors: Arc<SensorPaths>,
    temp_max: f64,
    warning_color: String,
    normal_color: String,
}

impl CpuTempProbe {
    pub fn new(sensors: Arc<SensorPaths>, temp_max: f64, format: &FormatConfig) -> Self {
        Self {
            sensors,
            temp_max,
            warning_color: format.color_warning.clone(),
            normal_color: format.color_normal.clone(),
        }
    }

    fn render(&self, millidegrees: f64) -> String {
        let pct = percent(millidegrees / 1000.0, self.temp_max);
        if pct >= WARNING_PERCENT {
            format!("{}{}%{}", self.warning_color, pct, self.normal_color)
        } else {
            format!("{}%", pct)
        }
    }
}

impl Probe for CpuTempProbe {
    fn segment(&self) -> SegmentId {
        SegmentId::CpuTemp
    }

    fn sample(&mut self, _ctx: &ProbeContext) -> ProbeOutcome {
        SensorAverage::read(self.sensors.thermal()).into_outcome("thermal", |mean| self.render(mean))
    }
}
