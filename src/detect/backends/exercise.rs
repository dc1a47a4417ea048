//! Synthetic shape detector for the order-constrained policy.
//!
//! Emulates the output contract of a neural detector after confidence
//! thresholding and non-max-suppression: a short list of boxes with class
//! indices and confidences, in detection index order. Scenes are drawn from
//! a PRNG so an exercise run is reproducible from its seed.

use anyhow::Result;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::candidate::Candidate;
use crate::detect::backend::DetectorBackend;
use crate::frame::Frame;

pub struct ExerciseBackend {
    rng: StdRng,
    class_count: usize,
    confidence_threshold: f32,
}

impl ExerciseBackend {
    pub fn new(seed: u64, class_count: usize, confidence_threshold: f32) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
            class_count,
            confidence_threshold,
        }
    }
}

impl DetectorBackend for ExerciseBackend {
    fn name(&self) -> &'static str {
        "exercise"
    }

    fn detect(&mut self, frame: &Frame) -> Result<Vec<Candidate>> {
        let bounds = frame.bounds();
        let count = self.rng.gen_range(0..4usize);
        let mut out = Vec::with_capacity(count);
        for _ in 0..count {
            let w = self.rng.gen_range(24..120i32);
            let h = self.rng.gen_range(24..120i32);
            // Center-predicted boxes may hang over the edge; clamping is the
            // candidate constructor's job.
            let x = self.rng.gen_range(-w / 2..bounds.width as i32 - w / 2);
            let y = self.rng.gen_range(-h / 2..bounds.height as i32 - h / 2);
            let class_id = self.rng.gen_range(0..self.class_count);
            let confidence = self.rng.gen_range(0.0..1.0f32);
            if confidence < self.confidence_threshold {
                // Below-threshold detections never leave the detector.
                continue;
            }
            out.push(Candidate::from_detection(
                x, y, w, h, class_id, confidence, bounds,
            ));
        }
        Ok(out)
    }
}
