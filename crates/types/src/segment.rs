//! Segment and bar identifiers.
//!
//! The full set of segments is fixed at compile time. Each segment belongs to
//! exactly one bar and is addressed by a dense index so that per-segment state
//! can live in plain arrays.

use serde::{Deserialize, Serialize};
use std::fmt;

/// One of the independently assembled output strings
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum BarId {
    #[serde(rename = "status")]
    Status,
    #[serde(rename = "top")]
    Top,
    #[serde(rename = "bottom")]
    Bottom,
}

impl BarId {
    pub const COUNT: usize = 3;

    pub const ALL: [BarId; Self::COUNT] = [BarId::Status, BarId::Top, BarId::Bottom];

    /// Dense index for array storage
    pub const fn index(self) -> usize {
        self as usize
    }

    pub fn name(self) -> &'static str {
        match self {
            BarId::Status => "status",
            BarId::Top => "top",
            BarId::Bottom => "bottom",
        }
    }
}

impl fmt::Display for BarId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Identity of a single status segment
///
/// Declaration order is display order within each bar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SegmentId {
    Log,
    Todo,
    Weather,
    Backup,
    Portfolio,
    Wifi,
    Time,
    Network,
    Disk,
    Ram,
    Load,
    CpuUsage,
    CpuTemp,
    Fan,
    Brightness,
    Volume,
    Battery,
}

impl SegmentId {
    pub const COUNT: usize = 17;

    pub const ALL: [SegmentId; Self::COUNT] = [
        SegmentId::Log,
        SegmentId::Todo,
        SegmentId::Weather,
        SegmentId::Backup,
        SegmentId::Portfolio,
        SegmentId::Wifi,
        SegmentId::Time,
        SegmentId::Network,
        SegmentId::Disk,
        SegmentId::Ram,
        SegmentId::Load,
        SegmentId::CpuUsage,
        SegmentId::CpuTemp,
        SegmentId::Fan,
        SegmentId::Brightness,
        SegmentId::Volume,
        SegmentId::Battery,
    ];

    /// Dense index for array storage
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Bar this segment is rendered on
    pub fn bar(self) -> BarId {
        match self {
            SegmentId::Log => BarId::Status,
            SegmentId::Todo
            | SegmentId::Weather
            | SegmentId::Backup
            | SegmentId::Portfolio
            | SegmentId::Wifi
            | SegmentId::Time => BarId::Top,
            _ => BarId::Bottom,
        }
    }

    /// Display priority used when a bar overflows.
    ///
    /// Lower values are truncated first.
    pub fn priority(self) -> u8 {
        match self {
            SegmentId::Todo => 0,
            SegmentId::Log => 1,
            _ => 10,
        }
    }

    /// Heading shown in front of the segment text when none is configured
    pub fn default_heading(self) -> &'static str {
        match self {
            SegmentId::Log | SegmentId::Todo | SegmentId::Time => "",
            SegmentId::Weather => "Weather",
            SegmentId::Backup => "Backup",
            SegmentId::Portfolio => "Portfolio",
            SegmentId::Wifi => "Wifi",
            SegmentId::Network => "Net",
            SegmentId::Disk => "Disk",
            SegmentId::Ram => "RAM",
            SegmentId::Load => "Load",
            SegmentId::CpuUsage => "CPU",
            SegmentId::CpuTemp => "Temp",
            SegmentId::Fan => "Fan",
            SegmentId::Brightness => "Bright",
            SegmentId::Volume => "Vol",
            SegmentId::Battery => "Batt",
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            SegmentId::Log => "log",
            SegmentId::Todo => "todo",
            SegmentId::Weather => "weather",
            SegmentId::Backup => "backup",
            SegmentId::Portfolio => "portfolio",
            SegmentId::Wifi => "wifi",
            SegmentId::Time => "time",
            SegmentId::Network => "network",
            SegmentId::Disk => "disk",
            SegmentId::Ram => "ram",
            SegmentId::Load => "load",
            SegmentId::CpuUsage => "cpu_usage",
            SegmentId::CpuTemp => "cpu_temp",
            SegmentId::Fan => "fan",
            SegmentId::Brightness => "brightness",
            SegmentId::Volume => "volume",
            SegmentId::Battery => "battery",
        }
    }
}

impl fmt::Display for SegmentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// One of the three per-segment boolean attributes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FlagKind {
    /// The segment's probe is currently failing
    Error,
    /// Content changed since the last assembly
    Updated,
    /// The segment's cadence fired this cycle
    Triggered,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_indices_are_dense() {
        for (i, id) in SegmentId::ALL.iter().enumerate() {
            assert_eq!(id.index(), i);
        }
        for (i, bar) in BarId::ALL.iter().enumerate() {
            assert_eq!(bar.index(), i);
        }
    }

    #[test]
    fn test_todo_is_lowest_priority_on_top_bar() {
        let lowest = SegmentId::ALL
            .iter()
            .filter(|id| id.bar() == BarId::Top)
            .min_by_key(|id| id.priority())
            .copied();
        assert_eq!(lowest, Some(SegmentId::Todo));
    }

    #[test]
    fn test_segment_id_serialization() {
        let json = serde_json::to_string(&SegmentId::CpuTemp).unwrap();
        assert_eq!(json, "\"cpu_temp\"");
        let back: SegmentId = serde_json::from_str("\"battery\"").unwrap();
        assert_eq!(back, SegmentId::Battery);
    }
}
