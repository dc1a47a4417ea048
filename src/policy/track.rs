//! Policy 1: single-category tracking.
//!
//! The largest surviving blob is the target. Any lock is a valid kill.

use anyhow::Result;

use crate::candidate::{Candidate, RankedCandidates};
use crate::detect::DetectorBackend;
use crate::engage::{fire_track, FireOutcome};
use crate::frame::{Frame, FrameBounds};
use crate::input::Trigger;
use crate::render::FrameStatus;
use crate::select::{select_primary, Lock};

use super::{FireReport, Policy};

pub struct TrackPolicy {
    backend: Box<dyn DetectorBackend>,
}

impl TrackPolicy {
    pub fn new(backend: Box<dyn DetectorBackend>) -> Self {
        Self { backend }
    }
}

impl Policy for TrackPolicy {
    fn name(&self) -> &'static str {
        "track"
    }

    fn warm_up(&mut self) -> Result<()> {
        self.backend.warm_up()
    }

    fn detect(&mut self, frame: &Frame) -> Result<Vec<Candidate>> {
        self.backend.detect(frame)
    }

    fn select(&self, ranked: &RankedCandidates, _bounds: FrameBounds) -> Lock {
        select_primary(ranked)
    }

    fn status(&self, lock: &Lock) -> FrameStatus {
        FrameStatus {
            headline: if lock.is_locked() {
                "TARGET LOCKED".to_string()
            } else {
                "SEARCHING TARGET...".to_string()
            },
            engagement: None,
        }
    }

    fn on_trigger(&mut self, trigger: Trigger, lock: &Lock) -> Option<FireReport> {
        if trigger != Trigger::Fire {
            return None;
        }
        let outcome = fire_track(lock);
        let text = match (outcome, lock.target()) {
            (FireOutcome::TargetEliminated, Some(target)) => format!(
                "FIRE! Target at ({}, {}) has been eliminated.",
                target.centroid.x, target.centroid.y
            ),
            _ => "Cannot fire, no target locked.".to_string(),
        };
        Some(FireReport { outcome, text })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::candidate::Category;
    use crate::detect::ScriptedBackend;
    use crate::geometry::rect_contour;

    fn bounds() -> FrameBounds {
        FrameBounds {
            width: 640,
            height: 480,
        }
    }

    fn policy() -> TrackPolicy {
        TrackPolicy::new(Box::new(ScriptedBackend::new(vec![])))
    }

    #[test]
    fn fire_without_lock_reports_no_target() {
        let mut p = policy();
        let report = p.on_trigger(Trigger::Fire, &Lock::Empty).unwrap();
        assert_eq!(report.outcome, FireOutcome::NoTarget);
        assert_eq!(report.text, "Cannot fire, no target locked.");
    }

    #[test]
    fn fire_with_lock_eliminates_and_reports_center() {
        let mut p = policy();
        let c = Candidate::from_contour(&rect_contour(100, 100, 40, 40), Category::None, bounds())
            .unwrap();
        let ranked = RankedCandidates::new(vec![c]);
        let lock = p.select(&ranked, bounds());
        let report = p.on_trigger(Trigger::Fire, &lock).unwrap();
        assert_eq!(report.outcome, FireOutcome::TargetEliminated);
        assert!(report.text.contains("(120, 120)"));
    }

    #[test]
    fn new_order_trigger_is_ignored() {
        let mut p = policy();
        assert!(p.on_trigger(Trigger::NewOrder, &Lock::Empty).is_none());
    }

    #[test]
    fn status_reflects_lock_state() {
        let p = policy();
        assert_eq!(p.status(&Lock::Empty).headline, "SEARCHING TARGET...");
    }
}
