//! Candidate detection.
//!
//! Real segmentation and neural inference are external collaborators; the
//! core consumes them through the `DetectorBackend` trait. The in-tree
//! backends are simulation stand-ins: `BlobBackend` synthesizes color-class
//! blobs from frame content, `ExerciseBackend` synthesizes shape-class
//! detections (post non-max-suppression), and `ScriptedBackend` replays
//! fixed candidate sets for tests and demos.

pub mod backend;
pub mod backends;

pub use backend::DetectorBackend;
pub use backends::{BlobBackend, ColorClass, ExerciseBackend, ScriptedBackend};
