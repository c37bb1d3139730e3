//! Engine context tying the registry, flags and scheduler together
//!
//! One `Engine` is built at startup and handed to the poll driver. All segment
//! mutation goes through [`Engine::apply_update`] or the error injector, so
//! the bar length invariant holds after every call.

use crate::assembler;
use crate::error::Result;
use crate::flags::FlagSet;
use crate::log_sink::LogSink;
use crate::probe::{ProbeContext, ProbeOutcome};
use crate::registry::{Segment, SegmentRegistry};
use crate::scheduler::CadenceScheduler;
use crate::sink::DisplaySink;
use chrono::NaiveDateTime;
use log::{debug, trace, warn};
use statusbar_types::{BarId, FlagKind, SegmentId, StatusbarConfig};

/// Segment composition and update engine
pub struct Engine {
    pub(crate) registry: SegmentRegistry,
    pub(crate) flags: FlagSet,
    pub(crate) scheduler: CadenceScheduler,
    pub(crate) log_sink: Box<dyn LogSink>,
    pub(crate) error_token: String,
    needs_redraw: bool,
    rendered: [Option<String>; BarId::COUNT],
}

impl Engine {
    pub fn new(
        registry: SegmentRegistry,
        scheduler: CadenceScheduler,
        log_sink: Box<dyn LogSink>,
        error_token: String,
    ) -> Self {
        Self {
            registry,
            flags: FlagSet::new(),
            scheduler,
            log_sink,
            error_token,
            needs_redraw: true,
            rendered: Default::default(),
        }
    }

    /// Build an engine with every segment registered in its default bar
    pub fn from_config(config: &StatusbarConfig, log_sink: Box<dyn LogSink>) -> Self {
        let capacities = BarId::ALL.map(|bar| config.bars.capacity(bar));
        let mut registry = SegmentRegistry::new(config.bars.separator.clone(), capacities);
        for id in SegmentId::ALL {
            registry.register(id, config.format.heading(id), config.segments.is_enabled(id));
        }

        Self::new(
            registry,
            CadenceScheduler::new(&config.cadence),
            log_sink,
            config.format.rendered_error_token(),
        )
    }

    pub fn registry(&self) -> &SegmentRegistry {
        &self.registry
    }

    pub fn flags(&self) -> &FlagSet {
        &self.flags
    }

    pub fn lookup(&self, id: SegmentId) -> Result<&Segment> {
        self.registry.lookup(id)
    }

    /// The fixed-width text substituted on full failures
    pub fn error_token(&self) -> &str {
        &self.error_token
    }

    /// Set when some segment changed length since the last render
    pub fn needs_redraw(&self) -> bool {
        self.needs_redraw
    }

    /// Enabled segments that have a registered entry, in id order
    pub fn active_segments(&self) -> Vec<SegmentId> {
        self.registry
            .segments()
            .filter(|segment| segment.is_enabled())
            .map(Segment::id)
            .collect()
    }

    /// Start a poll cycle: clear every triggered flag, then set it for
    /// segments whose cadence has elapsed.
    pub fn begin_cycle(&mut self, now: NaiveDateTime) {
        self.flags.clear_all(FlagKind::Triggered);
        for id in self.active_segments() {
            if self.scheduler.fire_if_due(id, now) {
                self.flags.set(id, FlagKind::Triggered);
            }
        }
    }

    /// Snapshot handed to a segment's probe
    pub fn context(&self, id: SegmentId, now: NaiveDateTime) -> ProbeContext {
        ProbeContext {
            triggered: self.flags.get(id, FlagKind::Triggered),
            now,
        }
    }

    /// Replace a segment's info and reconcile its bar's length.
    pub fn apply_update<S: Into<String>>(&mut self, id: SegmentId, info: S) -> Result<()> {
        let delta = self.registry.replace_info(id, info.into())?;
        self.flags.set(id, FlagKind::Updated);
        if delta != 0 {
            self.needs_redraw = true;
        }
        trace!("Segment {} updated (length delta {})", id, delta);
        Ok(())
    }

    /// Route a probe's outcome to the reconciler or the error injector
    pub fn apply_outcome(&mut self, id: SegmentId, outcome: ProbeOutcome) {
        match outcome {
            ProbeOutcome::Render(text) => self.apply_success(id, text),
            ProbeOutcome::Unchanged => {}
            ProbeOutcome::Degraded { failure, text } => {
                self.fail_minor(id, &failure);
                if let Some(text) = text {
                    self.apply_success(id, text);
                }
            }
            ProbeOutcome::Failed(failure) => self.fail_full(id, &failure, ()),
        }
    }

    fn apply_success(&mut self, id: SegmentId, text: String) {
        self.flags.clear(id, FlagKind::Error);
        if let Err(e) = self.apply_update(id, text) {
            warn!("Dropping update for {}: {}", id, e);
        }
    }

    /// Assemble one bar from current segment contents
    pub fn assemble(&self, bar: BarId) -> String {
        assembler::assemble(&self.registry, bar)
    }

    /// Push every bar that changed to the display sink.
    ///
    /// Bars are rebuilt when a length changed anywhere, when one of their
    /// members was updated, or when they have no successfully written text.
    /// Unchanged output is not written again. The sink is flushed after any
    /// write and while it still holds unflushed text. Clears all `updated`
    /// flags.
    /// Returns the number of bars written.
    pub fn render(&mut self, sink: &mut dyn DisplaySink) -> usize {
        let mut written = 0;
        for bar in BarId::ALL {
            let members = self.registry.bar(bar).members();
            let dirty = self.needs_redraw
                || self.rendered[bar.index()].is_none()
                || self.flags.any(members, FlagKind::Updated);
            if !dirty {
                continue;
            }

            if let Some((excess, victim)) = assembler::overflow(&self.registry, bar) {
                debug!("{} bar over capacity by {} bytes, cutting from {}", bar, excess, victim);
            }
            let text = self.assemble(bar);
            if self.rendered[bar.index()].as_deref() == Some(text.as_str()) {
                continue;
            }

            if let Err(e) = sink.set_text(bar, &text) {
                warn!("Display sink rejected {} bar: {}", bar, e);
                // what the display shows is unknown, rewrite on the next pass
                self.rendered[bar.index()] = None;
                continue;
            }
            self.rendered[bar.index()] = Some(text);
            written += 1;
        }

        if written > 0 || sink.pending() {
            if let Err(e) = sink.flush() {
                warn!("Display sink flush failed: {}", e);
            }
        }
        self.flags.clear_all(FlagKind::Updated);
        self.needs_redraw = false;
        written
    }
}
