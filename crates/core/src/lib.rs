//! statusbar-core: Segment composition and update engine for dwm-statusbar.
//!
//! This crate contains the per-segment flag sets, the segment registry with
//! its length reconciler, the error injector, the bar assembler and the
//! cadence scheduler, along with the `Probe` and `DisplaySink` traits that
//! connect the engine to the outside world.

pub mod assembler;
mod engine;
mod error;
mod flags;
mod injector;
mod log_sink;
mod probe;
mod registry;
mod scheduler;
mod sink;

pub use engine::Engine;
pub use error::{EngineError, ProbeFailure, Result};
pub use flags::{FlagSet, Flags};
pub use log_sink::{FailureRecord, FileLogSink, LogSink, MemoryLogSink, Severity};
pub use probe::{BoxedProbe, Probe, ProbeContext, ProbeOutcome};
pub use registry::{Bar, Segment, SegmentRegistry};
pub use scheduler::CadenceScheduler;
pub use sink::{DisplaySink, RecordingSink};

// Re-export types used in public signatures for convenience
pub use statusbar_types::{BarId, Cadence, FlagKind, SegmentId, StatusbarConfig};
