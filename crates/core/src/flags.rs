//! Per-segment flag sets

use statusbar_types::{FlagKind, SegmentId};

/// The three flags tracked for one segment
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Flags {
    pub error: bool,
    pub updated: bool,
    pub triggered: bool,
}

impl Flags {
    fn slot(&mut self, kind: FlagKind) -> &mut bool {
        match kind {
            FlagKind::Error => &mut self.error,
            FlagKind::Updated => &mut self.updated,
            FlagKind::Triggered => &mut self.triggered,
        }
    }

    fn value(&self, kind: FlagKind) -> bool {
        match kind {
            FlagKind::Error => self.error,
            FlagKind::Updated => self.updated,
            FlagKind::Triggered => self.triggered,
        }
    }
}

/// Flag records for every segment, indexed by segment id
#[derive(Debug, Clone, Default)]
pub struct FlagSet {
    records: [Flags; SegmentId::COUNT],
}

impl FlagSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a flag.
    ///
    /// Setting `Error` also sets `Updated`: a failure is a content change.
    pub fn set(&mut self, id: SegmentId, kind: FlagKind) {
        let record = &mut self.records[id.index()];
        *record.slot(kind) = true;
        if kind == FlagKind::Error {
            record.updated = true;
        }
    }

    pub fn clear(&mut self, id: SegmentId, kind: FlagKind) {
        *self.records[id.index()].slot(kind) = false;
    }

    pub fn get(&self, id: SegmentId, kind: FlagKind) -> bool {
        self.records[id.index()].value(kind)
    }

    /// Snapshot of all three flags for a segment
    pub fn record(&self, id: SegmentId) -> Flags {
        self.records[id.index()]
    }

    /// Clear one flag kind on every segment
    pub fn clear_all(&mut self, kind: FlagKind) {
        for record in &mut self.records {
            *record.slot(kind) = false;
        }
    }

    /// Whether any of the given segments has the flag set
    pub fn any(&self, ids: &[SegmentId], kind: FlagKind) -> bool {
        ids.iter().any(|id| self.get(*id, kind))
    }
}
