//! The shared console loop.
//!
//! Single-threaded and synchronous: one iteration acquires a frame, runs
//! the policy's pipeline, renders, polls at most one trigger, and resolves
//! it. The bounded input poll is the frame pacer. Engagement state is
//! touched exactly once per iteration, by the trigger step.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;

use crate::candidate::{filter_candidates, MIN_CANDIDATE_AREA};
use crate::engage::FireOutcome;
use crate::ingest::CameraSource;
use crate::input::{InputSource, Trigger};
use crate::render::Renderer;

use super::Policy;

/// Default input poll timeout, which paces the loop at roughly 30 fps.
pub const DEFAULT_POLL_TIMEOUT: Duration = Duration::from_millis(33);

/// Tally of fire-decision outcomes over a run.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct OutcomeCounts {
    pub no_target: u64,
    pub eliminated: u64,
    pub friendly_refused: u64,
    pub correct_hits: u64,
    pub wrong_hits: u64,
}

impl OutcomeCounts {
    fn record(&mut self, outcome: FireOutcome) {
        match outcome {
            FireOutcome::NoTarget => self.no_target += 1,
            FireOutcome::TargetEliminated => self.eliminated += 1,
            FireOutcome::FriendlyFireRefused => self.friendly_refused += 1,
            FireOutcome::CorrectHit => self.correct_hits += 1,
            FireOutcome::WrongHit => self.wrong_hits += 1,
        }
    }

    pub fn total(&self) -> u64 {
        self.no_target + self.eliminated + self.friendly_refused + self.correct_hits
            + self.wrong_hits
    }
}

/// What a policy run did, for the demo summary and tests.
#[derive(Clone, Copy, Debug, Default)]
pub struct LoopSummary {
    pub frames: u64,
    pub locked_frames: u64,
    pub engageable_frames: u64,
    pub outcomes: OutcomeCounts,
}

/// One policy run over one capture stream.
///
/// The capture source is borrowed for the duration of the run and its
/// stream is released when the source is dropped, on every exit path.
pub struct ConsoleLoop<'a> {
    source: &'a mut CameraSource,
    policy: &'a mut dyn Policy,
    renderer: &'a mut dyn Renderer,
    input: &'a mut dyn InputSource,
    cancel: Option<Arc<AtomicBool>>,
    poll_timeout: Duration,
}

impl<'a> ConsoleLoop<'a> {
    pub fn new(
        source: &'a mut CameraSource,
        policy: &'a mut dyn Policy,
        renderer: &'a mut dyn Renderer,
        input: &'a mut dyn InputSource,
    ) -> Self {
        Self {
            source,
            policy,
            renderer,
            input,
            cancel: None,
            poll_timeout: DEFAULT_POLL_TIMEOUT,
        }
    }

    /// Install a global cancel flag, checked once per iteration.
    pub fn with_cancel(mut self, cancel: Arc<AtomicBool>) -> Self {
        self.cancel = Some(cancel);
        self
    }

    pub fn with_poll_timeout(mut self, timeout: Duration) -> Self {
        self.poll_timeout = timeout;
        self
    }

    fn cancelled(&self) -> bool {
        self.cancel
            .as_ref()
            .is_some_and(|flag| flag.load(Ordering::Relaxed))
    }

    pub fn run(mut self) -> Result<LoopSummary> {
        log::info!("running policy '{}'", self.policy.name());
        self.policy.warm_up()?;

        let mut summary = LoopSummary::default();
        loop {
            if self.cancelled() {
                log::info!("cancelled, stopping");
                break;
            }

            // Empty frame is the end-of-stream sentinel; a skipped frame
            // short-circuits the iteration rather than erroring.
            let Some(frame) = self.source.next_frame()? else {
                log::info!("frame stream ended");
                break;
            };
            summary.frames += 1;

            let raw = self.policy.detect(&frame)?;
            let filtered = filter_candidates(raw, MIN_CANDIDATE_AREA);
            let ranked = self.policy.rank(filtered);
            let lock = self.policy.select(&ranked, frame.bounds());
            if lock.is_locked() {
                summary.locked_frames += 1;
            }
            if lock.is_engageable() {
                summary.engageable_frames += 1;
            }

            let status = self.policy.status(&lock);
            self.renderer.draw(&frame, &lock, &status);

            match self.input.poll(self.poll_timeout)? {
                Some(Trigger::Exit) => {
                    log::info!("operator exit");
                    break;
                }
                Some(trigger) => {
                    if let Some(report) = self.policy.on_trigger(trigger, &lock) {
                        self.renderer.announce(&report.text);
                        summary.outcomes.record(report.outcome);
                    }
                }
                None => {}
            }
        }

        log::info!(
            "policy '{}' done: {} frames, {} locked, {} triggers",
            self.policy.name(),
            summary.frames,
            summary.locked_frames,
            summary.outcomes.total()
        );
        Ok(summary)
    }
}
