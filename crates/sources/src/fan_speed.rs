//! Fan speed probe
//!
//! Averages every discovered fan input (RPM) and maps it onto the configured
//! minimum..maximum range as a percentage.

use crate::sensors::{SensorAverage, SensorPaths};
use crate::sysfs::percent;
use statusbar_core::{Probe, ProbeContext, ProbeOutcome};
use statusbar_types::SegmentId;
use std::sync::Arc;

pub struct FanProbe {
    sensors: Arc<SensorPaths>,
    fan_min: f64,
    fan_max: f64,
}

impl FanProbe {
    pub fn new(sensors: Arc<SensorPaths>, fan_min: u32, fan_max: u32) -> Self {
        Self {
            sensors,
            fan_min: f64::from(fan_min),
            fan_max: f64::from(fan_max),
        }
    }
}

impl Probe for FanProbe {
    fn segment(&self) -> SegmentId {
        SegmentId::Fan
    }

    fn sample(&mut self, _ctx: &ProbeContext) -> ProbeOutcome {
        let (min, max) = (self.fan_min, self.fan_max);
        SensorAverage::read(self.sensors.fans())
            .into_outcome("fan", |rpm| format!("{}%", percent(rpm - min, max - min)))
    }
}
