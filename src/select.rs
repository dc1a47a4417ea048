//! Per-frame target selection.
//!
//! The selector output is a tagged `Lock` rather than a bundle of booleans:
//! either no primary candidate exists this frame, or exactly one does and it
//! carries its own engageability. Locks are recomputed from scratch every
//! frame; nothing here survives to the next iteration.

use crate::candidate::{Category, RankedCandidates};
use crate::engage::EngagementOrder;
use crate::frame::FrameBounds;
use crate::geometry::{BoundingBox, Point};

/// The selector's current-frame output.
#[derive(Clone, Debug, PartialEq)]
pub enum Lock {
    Empty,
    Locked(LockedTarget),
}

impl Lock {
    pub fn is_locked(&self) -> bool {
        matches!(self, Lock::Locked(_))
    }

    pub fn is_engageable(&self) -> bool {
        matches!(self, Lock::Locked(t) if t.engageable)
    }

    pub fn target(&self) -> Option<&LockedTarget> {
        match self {
            Lock::Empty => None,
            Lock::Locked(t) => Some(t),
        }
    }
}

/// Snapshot of the selected candidate plus whether it satisfies the active
/// policy constraints.
#[derive(Clone, Debug, PartialEq)]
pub struct LockedTarget {
    pub footprint: BoundingBox,
    pub centroid: Point,
    pub category: Category,
    pub confidence: f32,
    pub engageable: bool,
}

impl LockedTarget {
    fn from_candidate(c: &crate::candidate::Candidate, engageable: bool) -> Self {
        Self {
            footprint: c.footprint,
            centroid: c.centroid,
            category: c.category,
            confidence: c.confidence,
            engageable,
        }
    }
}

/// Policy 1: the rank-zero candidate is the target, unconditionally
/// engageable.
pub fn select_primary(ranked: &RankedCandidates) -> Lock {
    match ranked.primary() {
        Some(c) => Lock::Locked(LockedTarget::from_candidate(c, true)),
        None => Lock::Empty,
    }
}

/// Policy 2: the rank-zero candidate after the foe-priority override. A
/// friendly primary still populates the lock for operator display, but is
/// not engageable.
pub fn select_iff(ranked: &RankedCandidates) -> Lock {
    match ranked.primary() {
        Some(c) => Lock::Locked(LockedTarget::from_candidate(c, c.category.is_foe())),
        None => Lock::Empty,
    }
}

/// Policy 3: first ranked candidate matching both the required shape class
/// and the required board side becomes an engageable lock.
///
/// When nothing matches, the first candidate in detection index order (not
/// rank order) is returned as a non-engageable best guess, so the operator
/// always gets visual feedback on a wrong-target frame while engageability
/// stays strict. An empty set yields an empty lock.
pub fn select_for_order(
    ranked: &RankedCandidates,
    order: &EngagementOrder,
    bounds: FrameBounds,
) -> Lock {
    let mid_x = bounds.mid_x();
    for c in ranked.ranked() {
        let shape_matches = c.category == Category::Shape(order.shape);
        let side_matches = order.side.contains_x(c.centroid.x, mid_x);
        if shape_matches && side_matches {
            return Lock::Locked(LockedTarget::from_candidate(c, true));
        }
    }
    match ranked.first_in_detection_order() {
        Some(c) => Lock::Locked(LockedTarget::from_candidate(c, false)),
        None => Lock::Empty,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::candidate::Candidate;
    use crate::engage::BoardSide;

    fn bounds() -> FrameBounds {
        FrameBounds {
            width: 640,
            height: 480,
        }
    }

    fn cand(x: i32, area: f64, category: Category) -> Candidate {
        Candidate {
            footprint: BoundingBox::clamped(x, 100, 20, 20, bounds()),
            centroid: Point::new(x, 110),
            area,
            category,
            confidence: 0.5,
        }
    }

    fn order(side: BoardSide, shape: usize) -> EngagementOrder {
        EngagementOrder {
            side,
            shape,
            description: String::new(),
        }
    }

    #[test]
    fn empty_set_yields_empty_lock() {
        let ranked = RankedCandidates::new(vec![]);
        assert_eq!(select_primary(&ranked), Lock::Empty);
        assert_eq!(select_iff(&ranked), Lock::Empty);
        assert_eq!(
            select_for_order(&ranked, &order(BoardSide::Left, 0), bounds()),
            Lock::Empty
        );
    }

    #[test]
    fn primary_selection_takes_the_largest() {
        let ranked = RankedCandidates::new(vec![
            cand(50, 600.0, Category::None),
            cand(400, 900.0, Category::None),
        ]);
        let lock = select_primary(&ranked);
        assert!(lock.is_engageable());
        assert_eq!(lock.target().unwrap().centroid.x, 400);
    }

    #[test]
    fn iff_locks_smaller_foe_over_larger_friend() {
        let mut ranked = RankedCandidates::new(vec![
            cand(100, 1000.0, Category::Friend),
            cand(300, 300.0, Category::Foe),
        ]);
        ranked.promote_first_foe();
        let lock = select_iff(&ranked);
        assert_eq!(lock.target().unwrap().category, Category::Foe);
        assert!(lock.is_engageable());
    }

    #[test]
    fn iff_friend_lock_is_visible_but_not_engageable() {
        let mut ranked = RankedCandidates::new(vec![cand(100, 800.0, Category::Friend)]);
        ranked.promote_first_foe();
        let lock = select_iff(&ranked);
        assert!(lock.is_locked());
        assert!(!lock.is_engageable());
    }

    #[test]
    fn order_selection_requires_shape_and_side() {
        // LEFT circle required; a square at x=400 and a circle at x=50.
        let ranked = RankedCandidates::new(vec![
            cand(400, 900.0, Category::Shape(1)),
            cand(50, 600.0, Category::Shape(0)),
        ]);
        let lock = select_for_order(&ranked, &order(BoardSide::Left, 0), bounds());
        assert!(lock.is_engageable());
        assert_eq!(lock.target().unwrap().centroid.x, 50);
    }

    #[test]
    fn order_fallback_uses_detection_order() {
        // Nothing matches: required RIGHT triangle. The ranked order would
        // put the 900-area candidate first, but the fallback must return the
        // first detection instead.
        let ranked = RankedCandidates::new(vec![
            cand(50, 600.0, Category::Shape(0)),
            cand(400, 900.0, Category::Shape(1)),
        ]);
        let lock = select_for_order(&ranked, &order(BoardSide::Right, 2), bounds());
        assert!(lock.is_locked());
        assert!(!lock.is_engageable());
        assert_eq!(lock.target().unwrap().centroid.x, 50);
    }

    #[test]
    fn midline_candidate_counts_as_right() {
        let ranked = RankedCandidates::new(vec![cand(320, 600.0, Category::Shape(0))]);
        let left = select_for_order(&ranked, &order(BoardSide::Left, 0), bounds());
        assert!(!left.is_engageable());
        let right = select_for_order(&ranked, &order(BoardSide::Right, 0), bounds());
        assert!(right.is_engageable());
    }
}
