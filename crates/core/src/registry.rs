//! Segment registry and length reconciler
//!
//! Segments are registered once at startup and live in a fixed array indexed
//! by [`SegmentId`]. Each bar keeps an aggregate byte length that always equals
//! the sum of its members' rendered lengths. The only way to change a
//! segment's info is [`SegmentRegistry::replace_info`], which reconciles the
//! owning bar's aggregate in the same step.

use crate::error::{EngineError, Result};
use statusbar_types::{BarId, SegmentId};

/// One independently updatable piece of status text
#[derive(Debug, Clone)]
pub struct Segment {
    id: SegmentId,
    bar: BarId,
    heading: String,
    info: String,
    len: usize,
    position: usize,
    priority: u8,
    enabled: bool,
}

impl Segment {
    pub fn id(&self) -> SegmentId {
        self.id
    }

    pub fn bar(&self) -> BarId {
        self.bar
    }

    pub fn heading(&self) -> &str {
        &self.heading
    }

    pub fn info(&self) -> &str {
        &self.info
    }

    /// Current rendered length in bytes
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Display order within the owning bar
    pub fn position(&self) -> usize {
        self.position
    }

    pub fn priority(&self) -> u8 {
        self.priority
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Byte length of heading plus separator, the part that is never truncated
    pub(crate) fn prefix_len(&self, separator: &str) -> usize {
        self.heading.len() + separator.len()
    }

    fn measure(&self, separator: &str) -> usize {
        if self.enabled {
            self.prefix_len(separator) + self.info.len()
        } else {
            0
        }
    }
}

/// One capacity-bounded output string and its members
#[derive(Debug, Clone)]
pub struct Bar {
    id: BarId,
    capacity: usize,
    len: usize,
    members: Vec<SegmentId>,
}

impl Bar {
    pub fn id(&self) -> BarId {
        self.id
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Aggregate length of all member segments
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Member segments in display order
    pub fn members(&self) -> &[SegmentId] {
        &self.members
    }
}

/// Ordered collection of segments grouped into bars
#[derive(Debug, Clone)]
pub struct SegmentRegistry {
    separator: String,
    segments: [Option<Segment>; SegmentId::COUNT],
    bars: [Bar; BarId::COUNT],
}

impl SegmentRegistry {
    /// Create an empty registry with the given per-bar capacities
    pub fn new<S: Into<String>>(separator: S, capacities: [usize; BarId::COUNT]) -> Self {
        Self {
            separator: separator.into(),
            segments: Default::default(),
            bars: BarId::ALL.map(|id| Bar {
                id,
                capacity: capacities[id.index()],
                len: 0,
                members: Vec::new(),
            }),
        }
    }

    /// Register a segment at the end of its bar.
    ///
    /// Only called while building the registry at startup. Registering the
    /// same id twice replaces the earlier entry.
    pub fn register<S: Into<String>>(&mut self, id: SegmentId, heading: S, enabled: bool) {
        let bar_id = id.bar();
        if let Some(old) = self.segments[id.index()].take() {
            let bar = &mut self.bars[bar_id.index()];
            bar.len -= old.len;
            bar.members.retain(|member| *member != id);
        }

        let bar = &mut self.bars[bar_id.index()];
        let mut segment = Segment {
            id,
            bar: bar_id,
            heading: heading.into(),
            info: String::new(),
            len: 0,
            position: bar.members.len(),
            priority: id.priority(),
            enabled,
        };
        segment.len = segment.measure(&self.separator);
        bar.len += segment.len;
        bar.members.push(id);
        self.segments[id.index()] = Some(segment);

        for (position, member) in bar.members.iter().enumerate() {
            if let Some(segment) = self.segments[member.index()].as_mut() {
                segment.position = position;
            }
        }
    }

    pub fn separator(&self) -> &str {
        &self.separator
    }

    /// Look up a registered segment
    pub fn lookup(&self, id: SegmentId) -> Result<&Segment> {
        self.segments[id.index()]
            .as_ref()
            .ok_or(EngineError::UnknownSegment(id))
    }

    pub fn is_registered(&self, id: SegmentId) -> bool {
        self.segments[id.index()].is_some()
    }

    pub fn bar(&self, id: BarId) -> &Bar {
        &self.bars[id.index()]
    }

    /// All registered segments in id order
    pub fn segments(&self) -> impl Iterator<Item = &Segment> {
        self.segments.iter().flatten()
    }

    /// Replace a segment's info and reconcile its bar's aggregate length.
    ///
    /// Returns the signed change in the segment's rendered length.
    pub(crate) fn replace_info(&mut self, id: SegmentId, info: String) -> Result<isize> {
        let separator = &self.separator;
        let segment = self.segments[id.index()]
            .as_mut()
            .ok_or(EngineError::UnknownSegment(id))?;

        let old_len = segment.len;
        segment.info = info;
        let new_len = segment.measure(separator);
        segment.len = new_len;

        let bar = &mut self.bars[segment.bar.index()];
        bar.len = bar.len - old_len + new_len;

        Ok(new_len as isize - old_len as isize)
    }

    /// Sum of member lengths recomputed from scratch
    pub fn recount(&self, id: BarId) -> usize {
        self.bars[id.index()]
            .members
            .iter()
            .filter_map(|member| self.segments[member.index()].as_ref())
            .map(|segment| segment.measure(&self.separator))
            .sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn top_registry() -> SegmentRegistry {
        let mut registry = SegmentRegistry::new(" ", [64, 64, 64]);
        registry.register(SegmentId::Todo, "", true);
        registry.register(SegmentId::Weather, "W", true);
        registry.register(SegmentId::Time, "", true);
        registry
    }

    #[test]
    fn test_register_measures_heading_and_separator() {
        let registry = top_registry();
        assert_eq!(registry.lookup(SegmentId::Todo).unwrap().len(), 1);
        assert_eq!(registry.lookup(SegmentId::Weather).unwrap().len(), 2);
        assert_eq!(registry.bar(BarId::Top).len(), 4);
        assert_eq!(
            registry.bar(BarId::Top).members(),
            &[SegmentId::Todo, SegmentId::Weather, SegmentId::Time]
        );
        assert_eq!(registry.lookup(SegmentId::Time).unwrap().position(), 2);
    }

    #[test]
    fn test_lookup_unknown_segment() {
        let registry = top_registry();
        assert!(matches!(
            registry.lookup(SegmentId::Battery),
            Err(EngineError::UnknownSegment(SegmentId::Battery))
        ));
    }

    #[test]
    fn test_replace_info_reports_delta() {
        let mut registry = top_registry();
        let delta = registry
            .replace_info(SegmentId::Weather, "72F".to_string())
            .unwrap();
        assert_eq!(delta, 3);

        let delta = registry
            .replace_info(SegmentId::Weather, "7".to_string())
            .unwrap();
        assert_eq!(delta, -2);

        let delta = registry
            .replace_info(SegmentId::Weather, "8".to_string())
            .unwrap();
        assert_eq!(delta, 0);
        assert_eq!(registry.bar(BarId::Top).len(), registry.recount(BarId::Top));
    }

    #[test]
    fn test_multibyte_info_counts_bytes() {
        let mut registry = top_registry();
        registry
            .replace_info(SegmentId::Weather, "21°C".to_string())
            .unwrap();
        // heading "W" + separator " " + 5 bytes
        assert_eq!(registry.lookup(SegmentId::Weather).unwrap().len(), 7);
        assert_eq!(registry.bar(BarId::Top).len(), registry.recount(BarId::Top));
    }

    #[test]
    fn test_disabled_segment_has_zero_length() {
        let mut registry = SegmentRegistry::new(" ", [64, 64, 64]);
        registry.register(SegmentId::Volume, "Vol", false);
        registry
            .replace_info(SegmentId::Volume, "50%".to_string())
            .unwrap();
        assert_eq!(registry.lookup(SegmentId::Volume).unwrap().len(), 0);
        assert_eq!(registry.bar(BarId::Bottom).len(), 0);
    }

    #[test]
    fn test_reregister_keeps_aggregate_consistent() {
        let mut registry = top_registry();
        registry.register(SegmentId::Weather, "Weather", true);
        assert_eq!(registry.bar(BarId::Top).len(), registry.recount(BarId::Top));
        assert_eq!(registry.bar(BarId::Top).members().len(), 3);
        assert_eq!(registry.lookup(SegmentId::Time).unwrap().position(), 1);
        assert_eq!(registry.lookup(SegmentId::Weather).unwrap().position(), 2);
    }
}
