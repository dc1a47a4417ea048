//! Scripted backend: replays pre-built candidate sets, one per frame.
//!
//! Used by tests and the demo to drive the decision core through exact
//! scenarios. Once the script runs out, every further frame is an empty
//! scene.

use std::collections::VecDeque;

use anyhow::Result;

use crate::candidate::Candidate;
use crate::detect::backend::DetectorBackend;
use crate::frame::Frame;

pub struct ScriptedBackend {
    scenes: VecDeque<Vec<Candidate>>,
}

impl ScriptedBackend {
    pub fn new(scenes: Vec<Vec<Candidate>>) -> Self {
        Self {
            scenes: scenes.into(),
        }
    }
}

impl DetectorBackend for ScriptedBackend {
    fn name(&self) -> &'static str {
        "scripted"
    }

    fn detect(&mut self, _frame: &Frame) -> Result<Vec<Candidate>> {
        Ok(self.scenes.pop_front().unwrap_or_default())
    }
}
