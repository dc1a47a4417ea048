//! Engagement policies.
//!
//! The three policies share one frame pipeline (detect, filter, rank,
//! select, render, trigger) and differ only in the hooks this trait
//! exposes: which detector runs, how ranking is adjusted, what a lock
//! means, and how a trigger resolves.

mod iff;
mod order;
mod runner;
mod track;

use anyhow::Result;

use crate::candidate::{Candidate, RankedCandidates};
use crate::engage::FireOutcome;
use crate::frame::{Frame, FrameBounds};
use crate::input::Trigger;
use crate::render::FrameStatus;
use crate::select::Lock;

pub use iff::IffPolicy;
pub use order::OrderPolicy;
pub use runner::{ConsoleLoop, LoopSummary, OutcomeCounts, DEFAULT_POLL_TIMEOUT};
pub use track::TrackPolicy;

/// Which policy the operator selected at startup.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PolicyKind {
    /// 1 — raw largest-blob tracking.
    Track,
    /// 2 — friend/foe discrimination.
    FriendFoe,
    /// 3 — order-constrained object matching.
    OrderConstrained,
}

impl PolicyKind {
    pub fn from_menu_choice(choice: u32) -> Option<Self> {
        match choice {
            1 => Some(PolicyKind::Track),
            2 => Some(PolicyKind::FriendFoe),
            3 => Some(PolicyKind::OrderConstrained),
            _ => None,
        }
    }
}

/// A resolved fire decision plus the operator-facing message.
#[derive(Clone, Debug, PartialEq)]
pub struct FireReport {
    pub outcome: FireOutcome,
    pub text: String,
}

/// Per-policy hooks plugged into the shared console loop.
pub trait Policy {
    fn name(&self) -> &'static str;

    /// One-time detector warm-up before the first frame.
    fn warm_up(&mut self) -> Result<()> {
        Ok(())
    }

    /// Run this policy's detector on the frame.
    fn detect(&mut self, frame: &Frame) -> Result<Vec<Candidate>>;

    /// Rank the filtered candidates. The default is plain size ranking;
    /// friend/foe applies its priority override here.
    fn rank(&self, filtered: Vec<Candidate>) -> RankedCandidates {
        RankedCandidates::new(filtered)
    }

    /// Pick at most one primary candidate for this frame.
    fn select(&self, ranked: &RankedCandidates, bounds: FrameBounds) -> Lock;

    /// Operator status for the renderer.
    fn status(&self, lock: &Lock) -> FrameStatus;

    /// React to an operator trigger against the current lock. Returns
    /// `None` when the trigger does not apply to this policy.
    fn on_trigger(&mut self, trigger: Trigger, lock: &Lock) -> Option<FireReport>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn menu_choice_maps_to_policies() {
        assert_eq!(PolicyKind::from_menu_choice(1), Some(PolicyKind::Track));
        assert_eq!(PolicyKind::from_menu_choice(2), Some(PolicyKind::FriendFoe));
        assert_eq!(
            PolicyKind::from_menu_choice(3),
            Some(PolicyKind::OrderConstrained)
        );
        assert_eq!(PolicyKind::from_menu_choice(0), None);
        assert_eq!(PolicyKind::from_menu_choice(4), None);
    }
}
