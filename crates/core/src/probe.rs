//! Probe trait and related types

use crate::error::ProbeFailure;
use chrono::NaiveDateTime;
use statusbar_types::SegmentId;

/// What a probe sees when it is invoked
#[derive(Debug, Clone, Copy)]
pub struct ProbeContext {
    /// The segment's cadence fired this cycle
    pub triggered: bool,
    /// Local wall-clock time at the start of the cycle
    pub now: NaiveDateTime,
}

/// Result of one probe invocation
#[derive(Debug, Clone, PartialEq)]
pub enum ProbeOutcome {
    /// New segment text
    Render(String),
    /// Nothing to do this cycle; keep the current text
    Unchanged,
    /// An auxiliary step failed. The failure is logged and, if present, the
    /// text is still applied.
    Degraded {
        failure: ProbeFailure,
        text: Option<String>,
    },
    /// The segment's content could not be produced
    Failed(ProbeFailure),
}

impl ProbeOutcome {
    /// Full failure from an I/O or parse error
    pub fn failed<D: Into<String>>(description: D, err: &dyn std::error::Error) -> Self {
        ProbeOutcome::Failed(ProbeFailure::from_error(description, err))
    }
}

/// Trait for all probes
///
/// A probe reads one data source and renders the info text for exactly one
/// segment. Probes may block; the poll driver bounds each call with a timeout.
pub trait Probe: Send {
    /// Segment this probe feeds
    fn segment(&self) -> SegmentId;

    /// Read the source and render the segment text
    fn sample(&mut self, ctx: &ProbeContext) -> ProbeOutcome;
}

/// Type-erased probe for dynamic dispatch
pub type BoxedProbe = Box<dyn Probe>;
