//! Operator targeting console simulation.
//!
//! Once per video frame the console decides whether a detectable object in
//! the scene is a valid engagement target and tells the operator about it.
//! Image filtering and neural inference are external collaborators behind
//! the `DetectorBackend` seam; this crate is the acquisition and
//! engagement-decision core.
//!
//! # Architecture
//!
//! Three policies share one per-frame pipeline:
//!
//! 1. **Track** — raw largest-blob tracking; any lock is a valid kill.
//! 2. **FriendFoe** — color-tagged candidates; a foe always takes
//!    acquisition priority over a larger friendly, and a friendly lock
//!    refuses the shot.
//! 3. **OrderConstrained** — a standing engagement order (board side +
//!    shape class) gates which detection may legally be fired on; every
//!    resolved fire draws a fresh order.
//!
//! Per frame: candidate source → filter → rank → select → render →
//! (on trigger) fire decision. Locks are recomputed from scratch every
//! frame; there is no tracking memory.
//!
//! # Module Structure
//!
//! - `ingest`: camera frame sources (`stub://` synthetic backend)
//! - `detect`: the detector seam and simulation backends
//! - `candidate`: per-frame candidates, filtering, ranking
//! - `select`: the lock types and the three selectors
//! - `engage`: engagement orders and fire-decision rules
//! - `policy`: the policy hooks and the shared console loop

pub mod candidate;
pub mod config;
pub mod detect;
pub mod engage;
pub mod frame;
pub mod geometry;
pub mod ingest;
pub mod input;
pub mod policy;
pub mod render;
pub mod select;
pub mod ui;

pub use candidate::{filter_candidates, Candidate, Category, RankedCandidates, MIN_CANDIDATE_AREA};
pub use config::{ConsoleConfig, DetectorSettings};
pub use detect::{BlobBackend, ColorClass, DetectorBackend, ExerciseBackend, ScriptedBackend};
pub use engage::{
    fire_iff, fire_order, fire_track, generate_order, BoardSide, EngagementOrder, FireOutcome,
    ShapeVocabulary,
};
pub use frame::{Frame, FrameBounds};
pub use geometry::{BoundingBox, Point};
pub use ingest::{CameraConfig, CameraSource, CameraStats};
pub use input::{InputSource, ScriptedInput, TerminalInput, Trigger};
pub use policy::{
    ConsoleLoop, FireReport, IffPolicy, LoopSummary, OrderPolicy, OutcomeCounts, Policy,
    PolicyKind, TrackPolicy, DEFAULT_POLL_TIMEOUT,
};
pub use render::{ConsoleRenderer, FrameStatus, NullRenderer, Renderer};
pub use select::{Lock, LockedTarget};
