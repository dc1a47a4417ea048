//! Per-frame candidate objects and the ranked candidate set.
//!
//! Candidates are created fresh every frame from detector output and never
//! persist across frames; there is no frame-to-frame identity tracking.
//! Degenerate geometry (a contour with zero first-order moment) is rejected
//! at construction, so nothing downstream ever sees a candidate without a
//! centroid.

use crate::frame::FrameBounds;
use crate::geometry::{self, BoundingBox, Point};

/// Minimum size metric, in square pixels, for a candidate to survive
/// filtering. Fixed across all policies.
pub const MIN_CANDIDATE_AREA: f64 = 500.0;

/// Classification tag attached to a candidate by its detector.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Category {
    /// Untagged blob (single-category tracking).
    #[default]
    None,
    /// Hostile color class.
    Foe,
    /// Friendly color class.
    Friend,
    /// Shape class index into the loaded vocabulary.
    Shape(usize),
}

impl Category {
    pub fn is_foe(&self) -> bool {
        matches!(self, Category::Foe)
    }
}

/// One detected object in one frame.
#[derive(Clone, Debug, PartialEq)]
pub struct Candidate {
    pub footprint: BoundingBox,
    pub centroid: Point,
    /// Size metric: contour area for blob candidates, box area for
    /// detector-box candidates. Always non-negative.
    pub area: f64,
    pub category: Category,
    pub confidence: f32,
}

impl Candidate {
    /// Build a candidate from a segmentation contour.
    ///
    /// Returns `None` for degenerate contours: no centroid means the
    /// candidate is dropped here, before it can reach the selector.
    pub fn from_contour(contour: &[Point], category: Category, bounds: FrameBounds) -> Option<Self> {
        let centroid = geometry::contour_centroid(contour)?;
        Some(Self {
            footprint: geometry::bounding_rect(contour, bounds),
            centroid,
            area: geometry::contour_area(contour),
            category,
            confidence: 0.0,
        })
    }

    /// Build a candidate from a detector box (post non-max-suppression).
    /// The raw box is clamped to frame bounds; the centroid is the clamped
    /// box center.
    pub fn from_detection(
        x: i32,
        y: i32,
        width: i32,
        height: i32,
        class_id: usize,
        confidence: f32,
        bounds: FrameBounds,
    ) -> Self {
        let footprint = BoundingBox::clamped(x, y, width, height, bounds);
        Self {
            footprint,
            centroid: footprint.center(),
            area: footprint.area(),
            category: Category::Shape(class_id),
            confidence,
        }
    }
}

/// Keep candidates strictly larger than `min_area`, preserving relative
/// order. No side effects; empty input yields empty output.
pub fn filter_candidates(candidates: Vec<Candidate>, min_area: f64) -> Vec<Candidate> {
    candidates
        .into_iter()
        .filter(|c| c.area > min_area)
        .collect()
}

/// The filtered candidates of one frame, in both orders the selectors need:
/// original detection order and rank order (descending area, stable).
///
/// Derived per frame; never persisted.
#[derive(Clone, Debug)]
pub struct RankedCandidates {
    candidates: Vec<Candidate>,
    rank: Vec<usize>,
}

impl RankedCandidates {
    /// Rank filtered candidates by descending area. The sort is stable, so
    /// ties keep their detection order.
    pub fn new(filtered: Vec<Candidate>) -> Self {
        let mut rank: Vec<usize> = (0..filtered.len()).collect();
        rank.sort_by(|&a, &b| {
            filtered[b]
                .area
                .partial_cmp(&filtered[a].area)
                .unwrap_or(std::cmp::Ordering::Equal)
        });
        Self {
            candidates: filtered,
            rank,
        }
    }

    /// Friend/foe priority override: the first FOE by rank is moved to rank
    /// zero regardless of size. No-op when no FOE is present, in which case
    /// the largest candidate of any category stays primary.
    ///
    /// Enemy presence always takes acquisition priority.
    pub fn promote_first_foe(&mut self) {
        if let Some(pos) = self
            .rank
            .iter()
            .position(|&i| self.candidates[i].category.is_foe())
        {
            let idx = self.rank.remove(pos);
            self.rank.insert(0, idx);
        }
    }

    /// Candidates in rank order.
    pub fn ranked(&self) -> impl Iterator<Item = &Candidate> {
        self.rank.iter().map(move |&i| &self.candidates[i])
    }

    /// The rank-zero candidate, if any.
    pub fn primary(&self) -> Option<&Candidate> {
        self.rank.first().map(|&i| &self.candidates[i])
    }

    /// The first candidate in the detection index order the detector
    /// supplied, independent of rank.
    pub fn first_in_detection_order(&self) -> Option<&Candidate> {
        self.candidates.first()
    }

    pub fn len(&self) -> usize {
        self.candidates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.candidates.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bounds() -> FrameBounds {
        FrameBounds {
            width: 640,
            height: 480,
        }
    }

    fn cand(area: f64, category: Category) -> Candidate {
        Candidate {
            footprint: BoundingBox::clamped(0, 0, 10, 10, bounds()),
            centroid: Point::new(5, 5),
            area,
            category,
            confidence: 0.0,
        }
    }

    #[test]
    fn filter_drops_small_and_preserves_order() {
        let input = vec![
            cand(600.0, Category::None),
            cand(500.0, Category::None), // not strictly greater, dropped
            cand(900.0, Category::None),
            cand(10.0, Category::None),
        ];
        let out = filter_candidates(input, MIN_CANDIDATE_AREA);
        let areas: Vec<f64> = out.iter().map(|c| c.area).collect();
        assert_eq!(areas, vec![600.0, 900.0]);
    }

    #[test]
    fn filter_is_idempotent() {
        let input = vec![cand(600.0, Category::None), cand(100.0, Category::None)];
        let once = filter_candidates(input, MIN_CANDIDATE_AREA);
        let twice = filter_candidates(once.clone(), MIN_CANDIDATE_AREA);
        assert_eq!(once, twice);
    }

    #[test]
    fn filter_of_nothing_is_nothing() {
        assert!(filter_candidates(vec![], MIN_CANDIDATE_AREA).is_empty());
    }

    #[test]
    fn ranking_is_descending_and_stable() {
        let set = RankedCandidates::new(vec![
            cand(700.0, Category::None),
            cand(900.0, Category::Friend),
            cand(700.0, Category::Foe),
        ]);
        let areas: Vec<f64> = set.ranked().map(|c| c.area).collect();
        assert_eq!(areas, vec![900.0, 700.0, 700.0]);
        // Stable: the tied 700s keep detection order (None before Foe).
        let cats: Vec<Category> = set.ranked().map(|c| c.category).collect();
        assert_eq!(cats[1], Category::None);
        assert_eq!(cats[2], Category::Foe);
    }

    #[test]
    fn ranking_is_deterministic() {
        let input = vec![
            cand(300.0, Category::None),
            cand(800.0, Category::None),
            cand(550.0, Category::None),
        ];
        let a: Vec<f64> = RankedCandidates::new(input.clone())
            .ranked()
            .map(|c| c.area)
            .collect();
        let b: Vec<f64> = RankedCandidates::new(input)
            .ranked()
            .map(|c| c.area)
            .collect();
        assert_eq!(a, b);
    }

    #[test]
    fn foe_promotion_overrides_size() {
        let mut set = RankedCandidates::new(vec![
            cand(1000.0, Category::Friend),
            cand(300.0, Category::Foe),
        ]);
        set.promote_first_foe();
        assert_eq!(set.primary().unwrap().category, Category::Foe);
        // Detection order is untouched by the override.
        assert_eq!(
            set.first_in_detection_order().unwrap().category,
            Category::Friend
        );
    }

    #[test]
    fn foe_promotion_without_foe_is_a_noop() {
        let mut set = RankedCandidates::new(vec![
            cand(400.0, Category::Friend),
            cand(900.0, Category::Friend),
        ]);
        set.promote_first_foe();
        assert_eq!(set.primary().unwrap().area, 900.0);
    }

    #[test]
    fn degenerate_contour_never_becomes_a_candidate() {
        let line = vec![Point::new(0, 0), Point::new(10, 0)];
        assert!(Candidate::from_contour(&line, Category::None, bounds()).is_none());
    }

    #[test]
    fn detection_candidate_is_clamped() {
        let c = Candidate::from_detection(600, 100, 100, 50, 2, 0.9, bounds());
        assert_eq!(c.footprint.width, 40);
        assert!(bounds().contains(c.centroid));
        assert_eq!(c.category, Category::Shape(2));
    }
}
