//! Policy 3: order-constrained object matching.
//!
//! A standing engagement order (board side + shape class) constrains which
//! detection may legally be fired on. Every resolved fire draws a fresh
//! order; the operator can also skip to a new order without firing.

use anyhow::Result;
use rand::Rng;

use crate::candidate::{Candidate, Category, RankedCandidates};
use crate::detect::DetectorBackend;
use crate::engage::{fire_order, generate_order, EngagementOrder, FireOutcome, ShapeVocabulary};
use crate::frame::{Frame, FrameBounds};
use crate::input::Trigger;
use crate::render::FrameStatus;
use crate::select::{select_for_order, Lock};

use super::{FireReport, Policy};

pub struct OrderPolicy<R: Rng> {
    backend: Box<dyn DetectorBackend>,
    vocab: ShapeVocabulary,
    rng: R,
    order: EngagementOrder,
    orders_issued: u64,
}

impl<R: Rng> OrderPolicy<R> {
    /// Enters ACTIVE_ORDER immediately: the first order is drawn here.
    pub fn new(backend: Box<dyn DetectorBackend>, vocab: ShapeVocabulary, mut rng: R) -> Self {
        let order = generate_order(&mut rng, &vocab);
        log::info!("NEW ENGAGEMENT: {}", order.description);
        Self {
            backend,
            vocab,
            rng,
            order,
            orders_issued: 1,
        }
    }

    pub fn current_order(&self) -> &EngagementOrder {
        &self.order
    }

    /// Total orders generated so far, including the initial one.
    pub fn orders_issued(&self) -> u64 {
        self.orders_issued
    }

    fn advance_order(&mut self, reason: &str) {
        self.order = generate_order(&mut self.rng, &self.vocab);
        self.orders_issued += 1;
        log::info!("{}: {}", reason, self.order.description);
    }

    fn lock_label(&self, lock: &Lock) -> String {
        match lock.target().map(|t| t.category) {
            Some(Category::Shape(id)) => self.vocab.name(id).to_string(),
            _ => "unknown".to_string(),
        }
    }
}

impl<R: Rng> Policy for OrderPolicy<R> {
    fn name(&self) -> &'static str {
        "order-constrained"
    }

    fn warm_up(&mut self) -> Result<()> {
        self.backend.warm_up()
    }

    fn detect(&mut self, frame: &Frame) -> Result<Vec<Candidate>> {
        self.backend.detect(frame)
    }

    fn select(&self, ranked: &RankedCandidates, bounds: FrameBounds) -> Lock {
        select_for_order(ranked, &self.order, bounds)
    }

    fn status(&self, lock: &Lock) -> FrameStatus {
        let headline = match lock {
            Lock::Locked(target) if target.engageable => "CORRECT TARGET LOCKED".to_string(),
            Lock::Locked(_) => "WRONG TARGET LOCKED!".to_string(),
            Lock::Empty => "SEARCHING TARGET...".to_string(),
        };
        FrameStatus {
            headline,
            engagement: Some(format!("Engagement: {}", self.order.description)),
        }
    }

    fn on_trigger(&mut self, trigger: Trigger, lock: &Lock) -> Option<FireReport> {
        match trigger {
            Trigger::Fire => {
                let outcome = fire_order(lock);
                let text = match outcome {
                    FireOutcome::CorrectHit => {
                        let text = format!(
                            "FIRE! Correct target ({}) has been eliminated.",
                            self.lock_label(lock)
                        );
                        self.advance_order("NEW ENGAGEMENT");
                        text
                    }
                    FireOutcome::WrongHit => {
                        let text = format!(
                            "WRONG TARGET FIRED AT! Locked: {}. Required: {}",
                            self.lock_label(lock),
                            self.order.description
                        );
                        self.advance_order("NEW ENGAGEMENT");
                        text
                    }
                    _ => "CANNOT FIRE: No target locked.".to_string(),
                };
                Some(FireReport { outcome, text })
            }
            Trigger::NewOrder => {
                self.advance_order("MANUAL NEW ENGAGEMENT");
                None
            }
            Trigger::Exit => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::detect::ScriptedBackend;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn bounds() -> FrameBounds {
        FrameBounds {
            width: 640,
            height: 480,
        }
    }

    fn vocab() -> ShapeVocabulary {
        ShapeVocabulary::new(vec!["circle".into(), "square".into()]).unwrap()
    }

    fn policy(seed: u64) -> OrderPolicy<StdRng> {
        OrderPolicy::new(
            Box::new(ScriptedBackend::new(vec![])),
            vocab(),
            StdRng::seed_from_u64(seed),
        )
    }

    fn engageable_lock(p: &OrderPolicy<StdRng>) -> Lock {
        // Build a candidate that satisfies the active order exactly.
        let order = p.current_order();
        let x = match order.side {
            crate::engage::BoardSide::Left => 50,
            crate::engage::BoardSide::Right => 500,
        };
        let c = Candidate::from_detection(x, 100, 60, 60, order.shape, 0.8, bounds());
        p.select(&RankedCandidates::new(vec![c]), bounds())
    }

    #[test]
    fn starts_with_an_active_order() {
        let p = policy(1);
        assert_eq!(p.orders_issued(), 1);
        assert!(p.current_order().shape < 2);
    }

    #[test]
    fn correct_hit_issues_exactly_one_new_order() {
        let mut p = policy(2);
        let lock = engageable_lock(&p);
        assert!(lock.is_engageable());
        let report = p.on_trigger(Trigger::Fire, &lock).unwrap();
        assert_eq!(report.outcome, FireOutcome::CorrectHit);
        assert_eq!(p.orders_issued(), 2);
        assert!(p.current_order().shape < 2);
    }

    #[test]
    fn wrong_hit_also_issues_a_new_order() {
        let mut p = policy(3);
        // A populated but non-engageable lock: wrong shape on purpose.
        let order_shape = p.current_order().shape;
        let wrong_shape = 1 - order_shape;
        let c = Candidate::from_detection(50, 100, 60, 60, wrong_shape, 0.8, bounds());
        let lock = p.select(&RankedCandidates::new(vec![c]), bounds());
        assert!(lock.is_locked() && !lock.is_engageable());
        let report = p.on_trigger(Trigger::Fire, &lock).unwrap();
        assert_eq!(report.outcome, FireOutcome::WrongHit);
        assert_eq!(p.orders_issued(), 2);
    }

    #[test]
    fn no_target_fire_leaves_the_order_untouched() {
        let mut p = policy(4);
        let before = p.current_order().clone();
        let report = p.on_trigger(Trigger::Fire, &Lock::Empty).unwrap();
        assert_eq!(report.outcome, FireOutcome::NoTarget);
        assert_eq!(p.orders_issued(), 1);
        assert_eq!(p.current_order(), &before);
    }

    #[test]
    fn manual_skip_regenerates_without_firing() {
        let mut p = policy(5);
        assert!(p.on_trigger(Trigger::NewOrder, &Lock::Empty).is_none());
        assert_eq!(p.orders_issued(), 2);
    }

    #[test]
    fn status_carries_the_engagement_line() {
        let p = policy(6);
        let status = p.status(&Lock::Empty);
        assert_eq!(status.headline, "SEARCHING TARGET...");
        let line = status.engagement.unwrap();
        assert!(line.starts_with("Engagement: "));
        assert!(line.contains("SIDE"));
    }
}
