mod blob;
mod exercise;
mod scripted;

pub use blob::{BlobBackend, ColorClass};
pub use exercise::ExerciseBackend;
pub use scripted::ScriptedBackend;
