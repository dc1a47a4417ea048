//! Rendering sink.
//!
//! The renderer consumes the frame, the current lock, and operator status
//! text. It is a pure sink: nothing it produces flows back into the
//! decision core. On-screen annotation (boxes, midline, overlay text) is an
//! external collaborator; the console renderer degrades that to status and
//! outcome lines.

use crate::frame::Frame;
use crate::select::Lock;

/// Per-frame operator status handed to the renderer.
#[derive(Clone, Debug)]
pub struct FrameStatus {
    /// Headline, e.g. "TARGET LOCKED" or "SEARCHING TARGET...".
    pub headline: String,
    /// Active engagement line, order-constrained policy only.
    pub engagement: Option<String>,
}

pub trait Renderer {
    /// Annotate one frame.
    fn draw(&mut self, frame: &Frame, lock: &Lock, status: &FrameStatus);

    /// Surface a discrete outcome to the operator.
    fn announce(&mut self, text: &str);
}

/// Console renderer. Logs the headline when it changes rather than once per
/// frame, and prints outcome announcements directly.
#[derive(Default)]
pub struct ConsoleRenderer {
    last_headline: String,
}

impl ConsoleRenderer {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Renderer for ConsoleRenderer {
    fn draw(&mut self, _frame: &Frame, lock: &Lock, status: &FrameStatus) {
        if status.headline != self.last_headline {
            match (status.engagement.as_deref(), lock.target()) {
                (Some(engagement), Some(target)) => log::info!(
                    "{} [{}] target at ({}, {}) conf {:.0}%",
                    status.headline,
                    engagement,
                    target.centroid.x,
                    target.centroid.y,
                    target.confidence * 100.0
                ),
                (Some(engagement), None) => log::info!("{} [{}]", status.headline, engagement),
                (None, Some(target)) => log::info!(
                    "{} target at ({}, {})",
                    status.headline,
                    target.centroid.x,
                    target.centroid.y
                ),
                (None, None) => log::info!("{}", status.headline),
            }
            self.last_headline = status.headline.clone();
        }
    }

    fn announce(&mut self, text: &str) {
        println!("{}", text);
    }
}

/// Renderer that discards everything. Used by tests and headless runs.
#[derive(Default)]
pub struct NullRenderer;

impl Renderer for NullRenderer {
    fn draw(&mut self, _frame: &Frame, _lock: &Lock, _status: &FrameStatus) {}

    fn announce(&mut self, _text: &str) {}
}
