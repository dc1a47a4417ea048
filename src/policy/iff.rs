//! Policy 2: friend/foe discrimination.
//!
//! Candidates carry FOE or FRIEND color tags. Enemy presence always takes
//! acquisition priority over size, and a friendly lock refuses the shot.

use anyhow::Result;

use crate::candidate::{Candidate, RankedCandidates};
use crate::detect::DetectorBackend;
use crate::engage::{fire_iff, FireOutcome};
use crate::frame::{Frame, FrameBounds};
use crate::input::Trigger;
use crate::render::FrameStatus;
use crate::select::{select_iff, Lock};

use super::{FireReport, Policy};

pub struct IffPolicy {
    backend: Box<dyn DetectorBackend>,
}

impl IffPolicy {
    pub fn new(backend: Box<dyn DetectorBackend>) -> Self {
        Self { backend }
    }
}

impl Policy for IffPolicy {
    fn name(&self) -> &'static str {
        "friend-foe"
    }

    fn warm_up(&mut self) -> Result<()> {
        self.backend.warm_up()
    }

    fn detect(&mut self, frame: &Frame) -> Result<Vec<Candidate>> {
        self.backend.detect(frame)
    }

    fn rank(&self, filtered: Vec<Candidate>) -> RankedCandidates {
        let mut ranked = RankedCandidates::new(filtered);
        ranked.promote_first_foe();
        ranked
    }

    fn select(&self, ranked: &RankedCandidates, _bounds: FrameBounds) -> Lock {
        select_iff(ranked)
    }

    fn status(&self, lock: &Lock) -> FrameStatus {
        let headline = match lock {
            Lock::Locked(target) if target.engageable => "ENEMY LOCKED".to_string(),
            Lock::Locked(_) => "FRIEND DETECTED".to_string(),
            Lock::Empty => "SEARCHING TARGET...".to_string(),
        };
        FrameStatus {
            headline,
            engagement: None,
        }
    }

    fn on_trigger(&mut self, trigger: Trigger, lock: &Lock) -> Option<FireReport> {
        if trigger != Trigger::Fire {
            return None;
        }
        let outcome = fire_iff(lock);
        let text = match outcome {
            FireOutcome::TargetEliminated => "FIRE! Enemy has been eliminated.".to_string(),
            FireOutcome::FriendlyFireRefused => "DO NOT FIRE AT FRIENDLIES!".to_string(),
            _ => "Cannot fire, no enemy locked.".to_string(),
        };
        Some(FireReport { outcome, text })
    }
}
