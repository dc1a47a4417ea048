//! Color-blob backend for the tracking and friend/foe policies.
//!
//! A real deployment segments the frame per HSV color class, runs
//! morphological cleanup, and extracts external contours. This backend
//! keeps the per-class configuration (the same numeric ranges a real
//! segmenter would use) but synthesizes its blobs deterministically from
//! the frame content, so the simulation behaves consistently for a given
//! scene without any imaging stack.

use anyhow::Result;
use sha2::{Digest, Sha256};

use crate::candidate::{Candidate, Category};
use crate::detect::backend::DetectorBackend;
use crate::frame::Frame;
use crate::geometry::rect_contour;

/// One HSV color class the segmenter looks for.
#[derive(Clone, Debug)]
pub struct ColorClass {
    pub name: &'static str,
    pub category: Category,
    pub h_min: u8,
    pub s_min: u8,
    pub v_min: u8,
    pub h_max: u8,
    pub s_max: u8,
    pub v_max: u8,
}

impl ColorClass {
    /// Bright blue, the single tracked class of the tracking policy.
    pub fn target_blue() -> Self {
        Self {
            name: "target (BLUE)",
            category: Category::None,
            h_min: 90,
            s_min: 100,
            v_min: 100,
            h_max: 130,
            s_max: 255,
            v_max: 255,
        }
    }

    /// Red marks hostiles in the friend/foe policy.
    pub fn foe_red() -> Self {
        Self {
            name: "foe (RED)",
            category: Category::Foe,
            h_min: 0,
            s_min: 120,
            v_min: 70,
            h_max: 10,
            s_max: 255,
            v_max: 255,
        }
    }

    /// Blue marks friendlies.
    pub fn friend_blue() -> Self {
        Self {
            name: "friend (BLUE)",
            category: Category::Friend,
            h_min: 90,
            s_min: 100,
            v_min: 100,
            h_max: 130,
            s_max: 255,
            v_max: 255,
        }
    }

    /// Green also marks friendlies; both masks are merged downstream.
    pub fn friend_green() -> Self {
        Self {
            name: "friend (GREEN)",
            category: Category::Friend,
            h_min: 40,
            s_min: 100,
            v_min: 100,
            h_max: 80,
            s_max: 255,
            v_max: 255,
        }
    }
}

/// Synthetic color-blob detector. One candidate set per frame, merged
/// across all configured classes in class order.
pub struct BlobBackend {
    classes: Vec<ColorClass>,
}

impl BlobBackend {
    pub fn new(classes: Vec<ColorClass>) -> Self {
        Self { classes }
    }

    /// Backend for the single-category tracking policy.
    pub fn tracking() -> Self {
        Self::new(vec![ColorClass::target_blue()])
    }

    /// Backend for the friend/foe policy. Foe class first, mirroring the
    /// segmenter's mask order.
    pub fn friend_foe() -> Self {
        Self::new(vec![
            ColorClass::foe_red(),
            ColorClass::friend_blue(),
            ColorClass::friend_green(),
        ])
    }

    fn blobs_for_class(&self, frame: &Frame, class: &ColorClass) -> Vec<Candidate> {
        // Deterministic per frame content and class: the same scene always
        // segments the same way.
        let mut hasher = Sha256::new();
        hasher.update(frame.pixels());
        hasher.update(class.name.as_bytes());
        hasher.update([class.h_min, class.h_max, class.s_min, class.v_min]);
        let digest: [u8; 32] = hasher.finalize().into();

        let bounds = frame.bounds();
        let count = (digest[0] % 3) as usize;
        let mut out = Vec::with_capacity(count);
        for i in 0..count {
            let b = &digest[1 + i * 5..6 + i * 5];
            let w = 16 + (b[2] as i32 % 72);
            let h = 16 + (b[3] as i32 % 72);
            let x = (b[0] as i32 * 7) % (bounds.width as i32 - w).max(1);
            let y = (b[1] as i32 * 5) % (bounds.height as i32 - h).max(1);
            let contour = rect_contour(x, y, w, h);
            if let Some(candidate) = Candidate::from_contour(&contour, class.category, bounds) {
                out.push(candidate);
            }
        }
        out
    }
}

impl DetectorBackend for BlobBackend {
    fn name(&self) -> &'static str {
        "blob"
    }

    fn detect(&mut self, frame: &Frame) -> Result<Vec<Candidate>> {
        let mut all = Vec::new();
        for class in &self.classes {
            all.extend(self.blobs_for_class(frame, class));
        }
        Ok(all)
    }
}
