//! Refresh cadence for segments with expensive probes.

use serde::{Deserialize, Serialize};

/// How often a segment's triggered flag fires
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum Cadence {
    /// Fires on every poll cycle
    #[serde(rename = "every_cycle")]
    #[default]
    EveryCycle,
    /// Fires on the first cycle of each wall-clock hour
    #[serde(rename = "hourly")]
    Hourly,
    /// Fires on the first cycle of each calendar day
    #[serde(rename = "daily")]
    Daily,
}
