//! Cadence scheduling for the per-cycle triggered flag

use chrono::{NaiveDateTime, Timelike};
use statusbar_types::{Cadence, CadenceConfig, SegmentId};

/// Decides which segments fire on a given cycle
#[derive(Debug, Clone)]
pub struct CadenceScheduler {
    cadences: [Cadence; SegmentId::COUNT],
    last_fired: [Option<NaiveDateTime>; SegmentId::COUNT],
}

impl CadenceScheduler {
    pub fn new(config: &CadenceConfig) -> Self {
        Self {
            cadences: SegmentId::ALL.map(|id| config.for_segment(id)),
            last_fired: [None; SegmentId::COUNT],
        }
    }

    pub fn cadence(&self, id: SegmentId) -> Cadence {
        self.cadences[id.index()]
    }

    /// Whether the segment's cadence has elapsed at `now`; records the firing
    pub fn fire_if_due(&mut self, id: SegmentId, now: NaiveDateTime) -> bool {
        let last = &mut self.last_fired[id.index()];
        let due = match (self.cadences[id.index()], *last) {
            (Cadence::EveryCycle, _) | (_, None) => true,
            (Cadence::Hourly, Some(prev)) => (prev.date(), prev.hour()) != (now.date(), now.hour()),
            (Cadence::Daily, Some(prev)) => prev.date() != now.date(),
        };
        if due {
            *last = Some(now);
        }
        due
    }

    /// Forget the last firing so the segment fires again on the next cycle
    pub fn rearm(&mut self, id: SegmentId) {
        self.last_fired[id.index()] = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn at(day: u32, hour: u32, minute: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 6, day)
            .unwrap()
            .and_hms_opt(hour, minute, 0)
            .unwrap()
    }

    #[test]
    fn test_every_cycle_always_fires() {
        let mut scheduler = CadenceScheduler::new(&CadenceConfig::default());
        assert!(scheduler.fire_if_due(SegmentId::Ram, at(1, 10, 0)));
        assert!(scheduler.fire_if_due(SegmentId::Ram, at(1, 10, 0)));
    }

    #[test]
    fn test_hourly_fires_once_per_hour() {
        let mut scheduler = CadenceScheduler::new(&CadenceConfig::default());
        assert_eq!(scheduler.cadence(SegmentId::Weather), Cadence::Hourly);

        assert!(scheduler.fire_if_due(SegmentId::Weather, at(1, 10, 5)));
        assert!(!scheduler.fire_if_due(SegmentId::Weather, at(1, 10, 30)));
        assert!(!scheduler.fire_if_due(SegmentId::Weather, at(1, 10, 59)));
        assert!(scheduler.fire_if_due(SegmentId::Weather, at(1, 11, 0)));
        // same hour on the next day is a new hour
        assert!(scheduler.fire_if_due(SegmentId::Weather, at(2, 11, 0)));
    }

    #[test]
    fn test_daily_fires_once_per_day() {
        let mut scheduler = CadenceScheduler::new(&CadenceConfig::default());
        assert!(scheduler.fire_if_due(SegmentId::Portfolio, at(1, 9, 0)));
        assert!(!scheduler.fire_if_due(SegmentId::Portfolio, at(1, 23, 59)));
        assert!(scheduler.fire_if_due(SegmentId::Portfolio, at(2, 0, 0)));
    }

    #[test]
    fn test_rearm_fires_next_cycle() {
        let mut scheduler = CadenceScheduler::new(&CadenceConfig::default());
        assert!(scheduler.fire_if_due(SegmentId::Weather, at(1, 10, 0)));
        scheduler.rearm(SegmentId::Weather);
        assert!(scheduler.fire_if_due(SegmentId::Weather, at(1, 10, 1)));
        assert!(!scheduler.fire_if_due(SegmentId::Weather, at(1, 10, 2)));
    }
}
