//! Engagement orders and the fire-decision rules.
//!
//! An engagement order is the standing requirement (board side + shape
//! class) that the order-constrained policy must match before a hit counts
//! as correct. Orders are immutable once generated; exactly one is active
//! at a time and a new one is drawn after every resolved trigger.

use std::fmt;
use std::path::Path;

use anyhow::{anyhow, Context, Result};
use rand::Rng;

use crate::select::Lock;

/// Partition of the frame into halves at the horizontal midpoint.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BoardSide {
    Left,
    Right,
}

impl BoardSide {
    /// Whether an x coordinate falls on this side of the midline.
    /// The midline pixel itself belongs to the RIGHT half.
    pub fn contains_x(&self, x: i32, mid_x: i32) -> bool {
        match self {
            BoardSide::Left => x < mid_x,
            BoardSide::Right => x >= mid_x,
        }
    }
}

impl fmt::Display for BoardSide {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BoardSide::Left => write!(f, "LEFT"),
            BoardSide::Right => write!(f, "RIGHT"),
        }
    }
}

/// The shape-class vocabulary the detector was trained on.
///
/// Loaded once at policy start and fixed for the run. An empty vocabulary is
/// a fatal startup error; order generation may assume it is non-empty.
#[derive(Clone, Debug)]
pub struct ShapeVocabulary {
    names: Vec<String>,
}

impl ShapeVocabulary {
    pub fn new(names: Vec<String>) -> Result<Self> {
        if names.is_empty() {
            return Err(anyhow!("shape vocabulary is empty"));
        }
        Ok(Self { names })
    }

    /// Load a vocabulary from a names file, one class per line.
    pub fn load(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("reading class names from {}", path.display()))?;
        let names: Vec<String> = raw
            .lines()
            .map(|line| line.trim())
            .filter(|line| !line.is_empty())
            .map(|line| line.to_string())
            .collect();
        let vocab = Self::new(names)
            .with_context(|| format!("no classes loaded from {}", path.display()))?;
        log::info!("loaded {} shape classes", vocab.len());
        for name in &vocab.names {
            log::debug!("- {}", name);
        }
        Ok(vocab)
    }

    pub fn name(&self, id: usize) -> &str {
        self.names
            .get(id)
            .map(|s| s.as_str())
            .unwrap_or("unknown")
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

/// A standing engagement requirement. Immutable once created.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EngagementOrder {
    pub side: BoardSide,
    pub shape: usize,
    pub description: String,
}

/// Draw a fresh order: board side uniform over {LEFT, RIGHT}, shape class
/// uniform over the vocabulary. Consecutive repeats are allowed; no novelty
/// check is made.
pub fn generate_order<R: Rng>(rng: &mut R, vocab: &ShapeVocabulary) -> EngagementOrder {
    let side = if rng.gen_range(0..2u8) == 0 {
        BoardSide::Left
    } else {
        BoardSide::Right
    };
    let shape = rng.gen_range(0..vocab.len());
    let description = format!("{} SIDE {}", side, vocab.name(shape));
    EngagementOrder {
        side,
        shape,
        description,
    }
}

/// Outcome of a fire trigger. These are expected decisions surfaced to the
/// operator, never errors.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FireOutcome {
    NoTarget,
    TargetEliminated,
    FriendlyFireRefused,
    CorrectHit,
    WrongHit,
}

/// Fire decision, single-category tracking: anything locked is a valid kill.
pub fn fire_track(lock: &Lock) -> FireOutcome {
    match lock {
        Lock::Empty => FireOutcome::NoTarget,
        Lock::Locked(_) => FireOutcome::TargetEliminated,
    }
}

/// Fire decision, friend/foe: a friendly lock refuses the shot.
pub fn fire_iff(lock: &Lock) -> FireOutcome {
    match lock {
        Lock::Empty => FireOutcome::NoTarget,
        Lock::Locked(target) if target.engageable => FireOutcome::TargetEliminated,
        Lock::Locked(_) => FireOutcome::FriendlyFireRefused,
    }
}

/// Fire decision, order-constrained: hit resolution depends on whether the
/// lock satisfied the active order. The caller generates the follow-up order
/// for both hit outcomes.
pub fn fire_order(lock: &Lock) -> FireOutcome {
    match lock {
        Lock::Empty => FireOutcome::NoTarget,
        Lock::Locked(target) if target.engageable => FireOutcome::CorrectHit,
        Lock::Locked(_) => FireOutcome::WrongHit,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::candidate::Category;
    use crate::geometry::{BoundingBox, Point};
    use crate::select::LockedTarget;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn vocab() -> ShapeVocabulary {
        ShapeVocabulary::new(vec!["circle".into(), "square".into(), "triangle".into()]).unwrap()
    }

    fn locked(engageable: bool) -> Lock {
        Lock::Locked(LockedTarget {
            footprint: BoundingBox::default(),
            centroid: Point::new(10, 10),
            category: Category::Foe,
            confidence: 0.9,
            engageable,
        })
    }

    #[test]
    fn empty_vocabulary_is_fatal() {
        assert!(ShapeVocabulary::new(vec![]).is_err());
    }

    #[test]
    fn orders_draw_from_the_vocabulary() {
        let vocab = vocab();
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..50 {
            let order = generate_order(&mut rng, &vocab);
            assert!(order.shape < vocab.len());
            assert!(order
                .description
                .contains(vocab.name(order.shape)));
            assert!(
                order.description.starts_with("LEFT SIDE")
                    || order.description.starts_with("RIGHT SIDE")
            );
        }
    }

    #[test]
    fn order_generation_is_reproducible_with_a_seed() {
        let vocab = vocab();
        let a = generate_order(&mut StdRng::seed_from_u64(42), &vocab);
        let b = generate_order(&mut StdRng::seed_from_u64(42), &vocab);
        assert_eq!(a, b);
    }

    #[test]
    fn board_side_partitions_at_the_midline() {
        assert!(BoardSide::Left.contains_x(319, 320));
        assert!(!BoardSide::Left.contains_x(320, 320));
        assert!(BoardSide::Right.contains_x(320, 320));
        assert!(!BoardSide::Right.contains_x(50, 320));
    }

    #[test]
    fn fire_on_empty_lock_is_always_no_target() {
        assert_eq!(fire_track(&Lock::Empty), FireOutcome::NoTarget);
        assert_eq!(fire_iff(&Lock::Empty), FireOutcome::NoTarget);
        assert_eq!(fire_order(&Lock::Empty), FireOutcome::NoTarget);
    }

    #[test]
    fn iff_refuses_friendly_locks() {
        assert_eq!(fire_iff(&locked(false)), FireOutcome::FriendlyFireRefused);
        assert_eq!(fire_iff(&locked(true)), FireOutcome::TargetEliminated);
    }

    #[test]
    fn order_fire_resolves_by_engageability() {
        assert_eq!(fire_order(&locked(true)), FireOutcome::CorrectHit);
        assert_eq!(fire_order(&locked(false)), FireOutcome::WrongHit);
    }
}
