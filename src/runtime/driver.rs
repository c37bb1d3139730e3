//! Probe slots and the per-cycle driver
//!
//! Probes run on tokio's blocking pool so a slow sysfs read or shell command
//! cannot stall the other segments. Only the outcome travels back; the
//! engine is mutated on the driver's thread.

use chrono::NaiveDateTime;
use log::{debug, error, warn};
use statusbar_core::{BoxedProbe, DisplaySink, Engine, ProbeFailure, ProbeOutcome, SegmentId};
use std::time::Duration;
use tokio::task::JoinHandle;
use tokio::time::{timeout_at, Instant};

type ProbeTask = JoinHandle<(BoxedProbe, ProbeOutcome)>;

/// Where a segment's probe currently lives
enum ProbeSlot {
    /// Ready to be sampled
    Idle(BoxedProbe),
    /// A call that outlived its timeout and has not returned yet
    Busy(ProbeTask),
    /// The probe panicked; the segment stays in error
    Lost,
}

/// Drives poll cycles for one engine
pub struct Driver {
    engine: Engine,
    slots: Vec<(SegmentId, ProbeSlot)>,
    probe_timeout: Duration,
}

impl Driver {
    pub fn new(engine: Engine, probes: Vec<BoxedProbe>, probe_timeout: Duration) -> Self {
        let slots = probes
            .into_iter()
            .map(|probe| (probe.segment(), ProbeSlot::Idle(probe)))
            .collect();
        Self {
            engine,
            slots,
            probe_timeout,
        }
    }

    pub fn engine(&self) -> &Engine {
        &self.engine
    }

    /// Run one poll cycle and render the bars that changed.
    ///
    /// Returns the number of bars written to the sink.
    pub async fn cycle(&mut self, now: NaiveDateTime, sink: &mut dyn DisplaySink) -> usize {
        self.engine.begin_cycle(now);
        self.reclaim_finished().await;

        let deadline = Instant::now() + self.probe_timeout;
        let mut running = Vec::new();
        for (index, (id, slot)) in self.slots.iter_mut().enumerate() {
            let mut probe = match std::mem::replace(slot, ProbeSlot::Lost) {
                ProbeSlot::Idle(probe) => probe,
                other => {
                    *slot = other;
                    continue;
                }
            };
            let ctx = self.engine.context(*id, now);
            let task = tokio::task::spawn_blocking(move || {
                let outcome = probe.sample(&ctx);
                (probe, outcome)
            });
            running.push((index, task));
        }

        for (index, mut task) in running {
            let id = self.slots[index].0;
            match timeout_at(deadline, &mut task).await {
                Ok(Ok((probe, outcome))) => {
                    self.slots[index].1 = ProbeSlot::Idle(probe);
                    self.engine.apply_outcome(id, outcome);
                }
                Ok(Err(e)) => {
                    error!("Probe for {} panicked: {}", id, e);
                    self.engine.apply_outcome(
                        id,
                        ProbeOutcome::Failed(ProbeFailure::new("Probe panicked", e.to_string())),
                    );
                }
                Err(_) => {
                    self.slots[index].1 = ProbeSlot::Busy(task);
                    let failure = ProbeFailure::new(
                        "Probe timed out",
                        format!("no result after {} ms", self.probe_timeout.as_millis()),
                    );
                    self.engine.apply_outcome(id, ProbeOutcome::Failed(failure));
                }
            }
        }

        self.engine.render(sink)
    }

    /// Return probes whose timed-out calls have finished to the idle state
    /// and apply the outcome they came back with.
    ///
    /// A cadence-gated probe may have cached the late result and will
    /// report `Unchanged` until its next firing, so dropping the outcome
    /// would leave the error token on screen for a whole period.
    async fn reclaim_finished(&mut self) {
        for (id, slot) in self.slots.iter_mut() {
            let finished = matches!(slot, ProbeSlot::Busy(task) if task.is_finished());
            if !finished {
                if let ProbeSlot::Busy(_) = slot {
                    debug!("Probe for {} still busy", id);
                }
                continue;
            }
            let ProbeSlot::Busy(task) = std::mem::replace(slot, ProbeSlot::Lost) else {
                continue;
            };
            match task.await {
                Ok((probe, outcome)) => {
                    debug!("Probe for {} returned late, back in rotation", id);
                    *slot = ProbeSlot::Idle(probe);
                    self.engine.apply_outcome(*id, outcome);
                }
                Err(e) => warn!("Timed-out probe for {} panicked: {}", id, e),
            }
        }
    }
}
