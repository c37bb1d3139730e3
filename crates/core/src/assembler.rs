//! Bar assembly with capacity-bounded truncation
//!
//! A bar is the concatenation of its members' rendered forms
//! (heading + separator + info) in display order. When the aggregate length
//! exceeds the bar's capacity, segments are cut starting from the lowest
//! display priority (later positions first on ties). A cut segment keeps its
//! heading and as much info as fits; if not even one info byte fits it is
//! dropped entirely. Every other segment renders in full.

use crate::registry::SegmentRegistry;
use statusbar_types::{BarId, SegmentId};
use std::cmp::Reverse;

/// Build the output string for one bar
///
/// Never fails: ids listed as bar members are always registered.
pub fn assemble(registry: &SegmentRegistry, bar_id: BarId) -> String {
    let bar = registry.bar(bar_id);
    let separator = registry.separator();
    let members: Vec<_> = bar
        .members()
        .iter()
        .filter_map(|id| registry.lookup(*id).ok())
        .collect();

    // Bytes of info each member may show; None means the segment is dropped
    let mut budgets: Vec<Option<usize>> = members
        .iter()
        .map(|segment| segment.is_enabled().then(|| segment.info().len()))
        .collect();

    let mut total = bar.len();
    if total > bar.capacity() {
        let mut victims: Vec<usize> = (0..members.len()).collect();
        victims.sort_by_key(|&i| (members[i].priority(), Reverse(members[i].position())));

        for i in victims {
            if total <= bar.capacity() {
                break;
            }
            let segment = members[i];
            if !segment.is_enabled() {
                continue;
            }

            let excess = total - bar.capacity();
            let info = segment.info();
            let wanted = info.len().saturating_sub(excess);
            let keep = floor_char_boundary(info, wanted);

            if keep == 0 {
                budgets[i] = None;
                total -= segment.len();
            } else {
                budgets[i] = Some(keep);
                total -= info.len() - keep;
            }
            log::trace!(
                "Truncated {} on {} bar to {:?} info bytes",
                segment.id(),
                bar_id,
                budgets[i]
            );
        }
    }

    let mut out = String::with_capacity(total);
    for (segment, budget) in members.iter().zip(&budgets) {
        if let Some(keep) = budget {
            out.push_str(segment.heading());
            out.push_str(separator);
            out.push_str(&segment.info()[..*keep]);
        }
    }
    out
}

/// Bytes over capacity and the first segment truncation will cut
pub fn overflow(registry: &SegmentRegistry, bar_id: BarId) -> Option<(usize, SegmentId)> {
    let bar = registry.bar(bar_id);
    if bar.len() <= bar.capacity() {
        return None;
    }
    bar.members()
        .iter()
        .filter_map(|id| registry.lookup(*id).ok())
        .filter(|segment| segment.is_enabled())
        .min_by_key(|segment| (segment.priority(), Reverse(segment.position())))
        .map(|segment| (bar.len() - bar.capacity(), segment.id()))
}

/// Largest char boundary in `s` that is not past `index`
fn floor_char_boundary(s: &str, index: usize) -> usize {
    if index >= s.len() {
        return s.len();
    }
    let mut i = index;
    while !s.is_char_boundary(i) {
        i -= 1;
    }
    i
}

#[cfg(test)]
mod tests {
    use super::*;

    fn registry(capacity: usize) -> SegmentRegistry {
        // Weather and Time share the top bar with Todo, which has the lowest priority
        let mut registry = SegmentRegistry::new("", [capacity, capacity, capacity]);
        registry.register(SegmentId::Weather, "", true);
        registry.register(SegmentId::Time, "", true);
        registry.register(SegmentId::Todo, "", true);
        registry
    }

    #[test]
    fn test_fits_without_truncation() {
        let mut reg = registry(64);
        reg.replace_info(SegmentId::Weather, "sunny".into()).unwrap();
        reg.replace_info(SegmentId::Time, "12:00".into()).unwrap();
        reg.replace_info(SegmentId::Todo, "laundry".into()).unwrap();

        let out = assemble(&reg, BarId::Top);
        assert_eq!(out, "sunny12:00laundry");
        assert_eq!(out.len(), reg.bar(BarId::Top).len());
    }

    #[test]
    fn test_lowest_priority_truncated_first() {
        let mut reg = registry(20);
        reg.replace_info(SegmentId::Weather, "A-content!".into()).unwrap(); // 10
        reg.replace_info(SegmentId::Time, "B-con".into()).unwrap(); // 5
        reg.replace_info(SegmentId::Todo, "TODO-txt".into()).unwrap(); // 8

        let out = assemble(&reg, BarId::Top);
        assert_eq!(out, "A-content!B-conTODO-");
        assert_eq!(out.len(), 20);
    }

    #[test]
    fn test_lowest_priority_dropped_when_nothing_fits() {
        let mut reg = registry(15);
        reg.replace_info(SegmentId::Weather, "A-content!".into()).unwrap();
        reg.replace_info(SegmentId::Time, "B-con".into()).unwrap();
        reg.replace_info(SegmentId::Todo, "TODO-txt".into()).unwrap();

        assert_eq!(assemble(&reg, BarId::Top), "A-content!B-con");
    }

    #[test]
    fn test_continues_to_next_priority() {
        let mut reg = registry(8);
        reg.replace_info(SegmentId::Weather, "A-content!".into()).unwrap();
        reg.replace_info(SegmentId::Time, "B-con".into()).unwrap();
        reg.replace_info(SegmentId::Todo, "TODO-txt".into()).unwrap();

        // Todo goes first, then the later of the equal-priority segments
        let out = assemble(&reg, BarId::Top);
        assert_eq!(out, "A-conten");
        assert!(out.len() <= 8);
    }

    #[test]
    fn test_truncation_respects_char_boundaries() {
        let mut reg = registry(12);
        reg.replace_info(SegmentId::Weather, "abcdefghij".into()).unwrap();
        reg.replace_info(SegmentId::Todo, "ééé".into()).unwrap(); // 6 bytes

        let out = assemble(&reg, BarId::Top);
        assert_eq!(out, "abcdefghijé");
        assert!(out.len() <= 12);
    }

    #[test]
    fn test_headings_survive_partial_truncation() {
        let mut reg = SegmentRegistry::new(":", [12, 12, 12]);
        reg.register(SegmentId::Time, "T", true);
        reg.register(SegmentId::Todo, "N", true);
        reg.replace_info(SegmentId::Time, "12:00".into()).unwrap(); // 7
        reg.replace_info(SegmentId::Todo, "buy milk".into()).unwrap(); // 10

        assert_eq!(assemble(&reg, BarId::Top), "T:12:00N:buy");
    }

    #[test]
    fn test_assemble_is_idempotent() {
        let mut reg = registry(20);
        reg.replace_info(SegmentId::Weather, "A-content!".into()).unwrap();
        reg.replace_info(SegmentId::Todo, "TODO-txt-long".into()).unwrap();
        assert_eq!(assemble(&reg, BarId::Top), assemble(&reg, BarId::Top));
    }

    #[test]
    fn test_overflow_reports_victim() {
        let mut reg = registry(10);
        assert_eq!(overflow(&reg, BarId::Top), None);
        reg.replace_info(SegmentId::Weather, "A-content!".into()).unwrap();
        reg.replace_info(SegmentId::Todo, "xyz".into()).unwrap();
        assert_eq!(overflow(&reg, BarId::Top), Some((3, SegmentId::Todo)));
    }
}
