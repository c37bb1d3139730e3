//! Error injector: the shared failure-handling path for probes
//!
//! Both severities log a record and mark the segment updated. A full failure
//! additionally flags the segment as failing, swaps its info for the error
//! token and hands the caller's fallback value back.

use crate::engine::Engine;
use crate::error::ProbeFailure;
use crate::log_sink::{FailureRecord, Severity};
use chrono::Local;
use log::{error, warn};
use statusbar_types::{FlagKind, SegmentId};

impl Engine {
    /// Log a failure that does not own displayed text
    pub fn fail_minor(&mut self, id: SegmentId, failure: &ProbeFailure) {
        self.log_failure(id, Severity::Minor, failure);
        self.flags.set(id, FlagKind::Updated);
    }

    /// Log a failure and replace the segment's content with the error token.
    ///
    /// Cadence-gated segments are rearmed so the expensive probe is retried on
    /// the next cycle instead of waiting for the next interval.
    pub fn fail_full<T>(&mut self, id: SegmentId, failure: &ProbeFailure, fallback: T) -> T {
        self.log_failure(id, Severity::Full, failure);
        self.flags.set(id, FlagKind::Error);
        self.scheduler.rearm(id);

        let token = self.error_token.clone();
        if let Err(e) = self.apply_update(id, token) {
            error!("Could not substitute error token for {}: {}", id, e);
        }
        fallback
    }

    fn log_failure(&mut self, id: SegmentId, severity: Severity, failure: &ProbeFailure) {
        match severity {
            Severity::Minor => warn!("{}: {}", id, failure),
            Severity::Full => error!("{}: {}", id, failure),
        }
        let record = FailureRecord {
            timestamp: Local::now(),
            segment: id,
            severity,
            description: failure.description.clone(),
            detail: failure.detail.clone(),
        };
        self.log_sink.record(&record);
    }
}
