use anyhow::Result;

use crate::candidate::Candidate;
use crate::frame::Frame;

/// Detector backend trait.
///
/// A backend turns one frame into an unordered set of candidates. The
/// contract the core depends on:
///
/// - Candidates are fresh per call; backends hold no reference to them.
/// - Degenerate geometry never escapes: a blob without a centroid is
///   dropped inside the backend.
/// - For shape detectors, confidence thresholding and non-max-suppression
///   are already applied; the core sees only surviving boxes.
pub trait DetectorBackend {
    /// Backend identifier.
    fn name(&self) -> &'static str;

    /// Run detection on a frame.
    fn detect(&mut self, frame: &Frame) -> Result<Vec<Candidate>>;

    /// Optional warm-up hook, called once before the first frame.
    fn warm_up(&mut self) -> Result<()> {
        Ok(())
    }
}
