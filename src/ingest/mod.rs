//! Frame ingestion.
//!
//! The console consumes a lazy, finite-until-failure sequence of frames.
//! `CameraSource` is the single entry point; `stub://` URLs select the
//! synthetic backend (the only one shipped with the simulation — real
//! capture devices are an external collaborator behind the same surface).
//!
//! End-of-stream or capture failure is the `Ok(None)` sentinel from
//! `next_frame`, which terminates the policy loop.

mod camera;

pub use camera::{CameraConfig, CameraSource, CameraStats};
