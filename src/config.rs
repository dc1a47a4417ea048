use anyhow::{anyhow, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::ingest::CameraConfig;

const DEFAULT_CAMERA_URL: &str = "stub://turret_camera";
const DEFAULT_CAMERA_FPS: u32 = 30;
const DEFAULT_CAMERA_WIDTH: u32 = 640;
const DEFAULT_CAMERA_HEIGHT: u32 = 480;
const DEFAULT_CLASS_NAMES: &str = "shapes.names";
const DEFAULT_CONFIDENCE_THRESHOLD: f32 = 0.35;
const DEFAULT_NMS_THRESHOLD: f32 = 0.4;
const DEFAULT_POLL_TIMEOUT_MS: u64 = 33;

#[derive(Debug, Deserialize, Default)]
struct ConsoleConfigFile {
    camera: Option<CameraConfigFile>,
    detector: Option<DetectorConfigFile>,
    poll_timeout_ms: Option<u64>,
}

#[derive(Debug, Deserialize, Default)]
struct CameraConfigFile {
    url: Option<String>,
    target_fps: Option<u32>,
    width: Option<u32>,
    height: Option<u32>,
    frame_limit: Option<u64>,
}

#[derive(Debug, Deserialize, Default)]
struct DetectorConfigFile {
    class_names: Option<PathBuf>,
    confidence_threshold: Option<f32>,
    nms_threshold: Option<f32>,
}

/// Console configuration: JSON file named by `SENTRY_CONFIG`, then env
/// overrides, then validation.
#[derive(Debug, Clone)]
pub struct ConsoleConfig {
    pub camera: CameraConfig,
    pub detector: DetectorSettings,
    pub poll_timeout: Duration,
}

/// Settings for the shape-detector collaborator (order-constrained policy).
#[derive(Debug, Clone)]
pub struct DetectorSettings {
    /// Class-names file, one shape class per line.
    pub class_names: PathBuf,
    /// Detections below this confidence never reach the core.
    pub confidence_threshold: f32,
    /// Non-max-suppression overlap threshold, applied by the detector.
    pub nms_threshold: f32,
}

impl ConsoleConfig {
    pub fn load() -> Result<Self> {
        let config_path = std::env::var("SENTRY_CONFIG").ok();
        let file_cfg = match config_path.as_deref() {
            Some(path) => Some(read_config_file(Path::new(path))?),
            None => None,
        };
        let mut cfg = Self::from_file(file_cfg.unwrap_or_default());
        cfg.apply_env()?;
        cfg.validate()?;
        Ok(cfg)
    }

    fn from_file(file: ConsoleConfigFile) -> Self {
        let camera = CameraConfig {
            url: file
                .camera
                .as_ref()
                .and_then(|c| c.url.clone())
                .unwrap_or_else(|| DEFAULT_CAMERA_URL.to_string()),
            target_fps: file
                .camera
                .as_ref()
                .and_then(|c| c.target_fps)
                .unwrap_or(DEFAULT_CAMERA_FPS),
            width: file
                .camera
                .as_ref()
                .and_then(|c| c.width)
                .unwrap_or(DEFAULT_CAMERA_WIDTH),
            height: file
                .camera
                .as_ref()
                .and_then(|c| c.height)
                .unwrap_or(DEFAULT_CAMERA_HEIGHT),
            frame_limit: file.camera.as_ref().and_then(|c| c.frame_limit),
        };
        let detector = DetectorSettings {
            class_names: file
                .detector
                .as_ref()
                .and_then(|d| d.class_names.clone())
                .unwrap_or_else(|| PathBuf::from(DEFAULT_CLASS_NAMES)),
            confidence_threshold: file
                .detector
                .as_ref()
                .and_then(|d| d.confidence_threshold)
                .unwrap_or(DEFAULT_CONFIDENCE_THRESHOLD),
            nms_threshold: file
                .detector
                .as_ref()
                .and_then(|d| d.nms_threshold)
                .unwrap_or(DEFAULT_NMS_THRESHOLD),
        };
        let poll_timeout =
            Duration::from_millis(file.poll_timeout_ms.unwrap_or(DEFAULT_POLL_TIMEOUT_MS));
        Self {
            camera,
            detector,
            poll_timeout,
        }
    }

    fn apply_env(&mut self) -> Result<()> {
        if let Ok(url) = std::env::var("SENTRY_CAMERA_URL") {
            if !url.trim().is_empty() {
                self.camera.url = url;
            }
        }
        if let Ok(path) = std::env::var("SENTRY_CLASS_NAMES") {
            if !path.trim().is_empty() {
                self.detector.class_names = PathBuf::from(path);
            }
        }
        if let Ok(ms) = std::env::var("SENTRY_POLL_TIMEOUT_MS") {
            let ms: u64 = ms
                .parse()
                .map_err(|_| anyhow!("SENTRY_POLL_TIMEOUT_MS must be an integer of milliseconds"))?;
            self.poll_timeout = Duration::from_millis(ms);
        }
        if let Ok(limit) = std::env::var("SENTRY_FRAME_LIMIT") {
            let limit: u64 = limit
                .parse()
                .map_err(|_| anyhow!("SENTRY_FRAME_LIMIT must be an integer frame count"))?;
            self.camera.frame_limit = Some(limit);
        }
        Ok(())
    }

    fn validate(&self) -> Result<()> {
        if self.camera.target_fps == 0 {
            return Err(anyhow!("camera target_fps must be at least 1"));
        }
        if self.camera.width == 0 || self.camera.height == 0 {
            return Err(anyhow!("camera dimensions must be non-zero"));
        }
        if !(0.0..=1.0).contains(&self.detector.confidence_threshold) {
            return Err(anyhow!("confidence_threshold must be within [0, 1]"));
        }
        if !(0.0..=1.0).contains(&self.detector.nms_threshold) {
            return Err(anyhow!("nms_threshold must be within [0, 1]"));
        }
        if self.poll_timeout.is_zero() {
            return Err(anyhow!("poll timeout must be greater than zero"));
        }
        Ok(())
    }
}

fn read_config_file(path: &Path) -> Result<ConsoleConfigFile> {
    let raw = std::fs::read_to_string(path)
        .map_err(|e| anyhow!("failed to read config file {}: {}", path.display(), e))?;
    let cfg = serde_json::from_str(&raw)
        .map_err(|e| anyhow!("invalid config file {}: {}", path.display(), e))?;
    Ok(cfg)
}
