//! statusbar-types: Shared data types for dwm-statusbar.
//!
//! This crate contains pure data types (segment and bar identifiers, flag
//! kinds, cadences and the startup configuration) shared by every crate in
//! the workspace. Nothing here performs I/O.

pub mod cadence;
pub mod config;
pub mod segment;

// Re-export commonly used types at the crate root for convenience
pub use cadence::Cadence;
pub use config::{
    BarsConfig, CadenceConfig, CommandsConfig, FormatConfig, LimitsConfig, PathsConfig,
    PollConfig, SegmentsConfig, StatusbarConfig,
};
pub use segment::{BarId, FlagKind, SegmentId};
