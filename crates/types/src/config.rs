//! Startup configuration types.
//!
//! Every section defaults to the constants the status bar has always shipped
//! with, so a missing or partial config file is valid. Values are loaded once
//! before the first poll cycle and never change afterwards.

use crate::{BarId, Cadence, SegmentId};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::PathBuf;

/// Complete status bar configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct StatusbarConfig {
    pub paths: PathsConfig,
    pub bars: BarsConfig,
    pub limits: LimitsConfig,
    pub cadence: CadenceConfig,
    pub format: FormatConfig,
    pub commands: CommandsConfig,
    pub poll: PollConfig,
    pub segments: SegmentsConfig,
}

/// Device and file locations
///
/// Paths starting with `~/` are resolved against the home directory when the
/// configuration is loaded.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PathsConfig {
    pub todo_file: PathBuf,
    pub statusbar_log: PathBuf,
    pub dwm_log: PathBuf,
    pub backup_status: PathBuf,
    pub wifi_interface: String,
    /// Directory holding `<iface>/statistics/{rx,tx}_bytes`
    pub net_class_dir: PathBuf,
    pub wireless_stats: PathBuf,
    pub cpu_temp_dir: PathBuf,
    pub fan_dir: PathBuf,
    pub screen_brightness: PathBuf,
    pub kbd_brightness: Option<PathBuf>,
    pub battery_status: PathBuf,
    pub battery_capacity: PathBuf,
    pub disk_mount: PathBuf,
}

impl Default for PathsConfig {
    fn default() -> Self {
        Self {
            todo_file: PathBuf::from("~/.TODO"),
            statusbar_log: PathBuf::from("~/.logs/dwm-statusbar.log"),
            dwm_log: PathBuf::from("~/.logs/dwm.log"),
            backup_status: PathBuf::from("~/.backup/.sb"),
            wifi_interface: "wlp4s0".to_string(),
            net_class_dir: PathBuf::from("/sys/class/net"),
            wireless_stats: PathBuf::from("/proc/net/wireless"),
            cpu_temp_dir: PathBuf::from("/sys/class/hwmon/hwmon0/"),
            fan_dir: PathBuf::from("/sys/class/hwmon/hwmon2/device/"),
            screen_brightness: PathBuf::from("/sys/class/backlight/nvidia_backlight/brightness"),
            kbd_brightness: Some(PathBuf::from("/sys/class/leds/smc::kbd_backlight/brightness")),
            battery_status: PathBuf::from("/sys/class/power_supply/BAT0/status"),
            battery_capacity: PathBuf::from("/sys/class/power_supply/BAT0/capacity"),
            disk_mount: PathBuf::from("/"),
        }
    }
}

/// Per-bar capacity limits and joining tokens
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct BarsConfig {
    pub status_capacity: usize,
    pub top_capacity: usize,
    pub bottom_capacity: usize,
    /// Placed between a segment's heading and its info
    pub separator: String,
    /// Placed between bars when they are combined into the root window name
    pub joiner: String,
}

impl BarsConfig {
    pub fn capacity(&self, bar: BarId) -> usize {
        match bar {
            BarId::Status => self.status_capacity,
            BarId::Top => self.top_capacity,
            BarId::Bottom => self.bottom_capacity,
        }
    }
}

impl Default for BarsConfig {
    fn default() -> Self {
        Self {
            status_capacity: 256,
            top_capacity: 512,
            bottom_capacity: 512,
            separator: " ".to_string(),
            joiner: ";".to_string(),
        }
    }
}

/// Ratios and maxima used to normalize raw readings into percentages
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LimitsConfig {
    /// Divisor applied to the global CPU usage reading
    pub cpu_ratio: f64,
    /// Temperature in degrees Celsius shown as 100%
    pub temp_max: f64,
    pub fan_min: u32,
    pub fan_max: u32,
    pub screen_brightness_max: u32,
    pub kbd_brightness_max: u32,
    /// Unit step for network rates and disk sizes
    pub block_size: u64,
    /// Battery percentage below which the warning color is used
    pub battery_warning: u8,
}

impl Default for LimitsConfig {
    fn default() -> Self {
        Self {
            cpu_ratio: 1.0,
            temp_max: 100.0,
            fan_min: 2000,
            fan_max: 6200,
            screen_brightness_max: 100,
            kbd_brightness_max: 255,
            block_size: 1024,
            battery_warning: 20,
        }
    }
}

/// Cadence overrides keyed by segment
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct CadenceConfig {
    pub overrides: HashMap<SegmentId, Cadence>,
}

impl CadenceConfig {
    /// Cadence for a segment, falling back to its built-in default
    pub fn for_segment(&self, id: SegmentId) -> Cadence {
        if let Some(cadence) = self.overrides.get(&id) {
            return *cadence;
        }
        match id {
            SegmentId::Weather => Cadence::Hourly,
            SegmentId::Portfolio => Cadence::Daily,
            _ => Cadence::EveryCycle,
        }
    }
}

/// Color and text tokens
///
/// Colors are the single control bytes understood by the dwm statuscolors
/// patch.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FormatConfig {
    pub color_normal: String,
    pub color_active: String,
    pub color1: String,
    pub color2: String,
    pub color_warning: String,
    pub color_error: String,
    pub green_text: String,
    pub red_text: String,
    pub headings: HashMap<SegmentId, String>,
    /// Text substituted for a segment whose probe failed
    pub error_token: String,
    /// Fixed width the error token is padded or clipped to
    pub error_width: usize,
}

impl FormatConfig {
    /// Heading text for a segment, including color tokens
    pub fn heading(&self, id: SegmentId) -> String {
        let label = self
            .headings
            .get(&id)
            .map(String::as_str)
            .unwrap_or_else(|| id.default_heading());
        if label.is_empty() {
            String::new()
        } else {
            format!("{}{}{}", self.color_active, label, self.color_normal)
        }
    }

    /// The fixed-width error token, wrapped in the error color
    pub fn rendered_error_token(&self) -> String {
        let width = self.error_width;
        let clipped: String = self.error_token.chars().take(width).collect();
        format!(
            "{}{:<width$}{}",
            self.color_error,
            clipped,
            self.color_normal,
            width = width
        )
    }
}

impl Default for FormatConfig {
    fn default() -> Self {
        Self {
            color_normal: "\u{1}".to_string(),
            color_active: "\u{2}".to_string(),
            color1: "\u{3}".to_string(),
            color2: "\u{4}".to_string(),
            color_warning: "\u{5}".to_string(),
            color_error: "\u{6}".to_string(),
            green_text: "\u{7}".to_string(),
            red_text: "\u{8}".to_string(),
            headings: HashMap::new(),
            error_token: "ERROR".to_string(),
            error_width: 5,
        }
    }
}

/// Shell commands whose output becomes segment text
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct CommandsConfig {
    pub weather: Option<String>,
    pub portfolio: Option<String>,
    pub volume: Option<String>,
}

/// Poll loop timing
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PollConfig {
    pub interval_ms: u64,
    /// Upper bound for a single probe call
    pub probe_timeout_ms: u64,
}

impl Default for PollConfig {
    fn default() -> Self {
        Self {
            interval_ms: 1000,
            probe_timeout_ms: 2000,
        }
    }
}

/// Segment selection
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SegmentsConfig {
    /// Segments that are never probed and render as empty
    pub disabled: Vec<SegmentId>,
}

impl SegmentsConfig {
    pub fn is_enabled(&self, id: SegmentId) -> bool {
        !self.disabled.contains(&id)
    }
}
