//! Camera frame source.

use anyhow::{anyhow, Result};

use crate::frame::Frame;

/// Configuration for a camera source.
#[derive(Clone, Debug)]
pub struct CameraConfig {
    /// Capture URL. `stub://<name>` selects the synthetic backend.
    pub url: String,
    /// Target frame rate (frames per second).
    pub target_fps: u32,
    /// Frame width in pixels.
    pub width: u32,
    /// Frame height in pixels.
    pub height: u32,
    /// Synthetic backend only: stop after this many frames (end-of-stream
    /// sentinel). `None` streams until cancelled.
    pub frame_limit: Option<u64>,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            url: "stub://turret_camera".to_string(),
            target_fps: 30,
            width: 640,
            height: 480,
            frame_limit: None,
        }
    }
}

/// Camera frame source.
///
/// Opening a real device is delegated to an external capture stack; this
/// crate ships only the synthetic backend. An unknown URL scheme is a fatal
/// startup error, reported before the policy loop starts.
pub struct CameraSource {
    backend: CameraBackend,
}

enum CameraBackend {
    Synthetic(SyntheticCamera),
}

impl CameraSource {
    pub fn new(config: CameraConfig) -> Result<Self> {
        if config.width == 0 || config.height == 0 {
            return Err(anyhow!("camera dimensions must be non-zero"));
        }
        if config.url.starts_with("stub://") {
            Ok(Self {
                backend: CameraBackend::Synthetic(SyntheticCamera::new(config)),
            })
        } else {
            Err(anyhow!(
                "could not open capture device '{}': no capture backend available",
                config.url
            ))
        }
    }

    /// Open the capture stream. The stream is released when the source is
    /// dropped, on every exit path.
    pub fn connect(&mut self) -> Result<()> {
        match &mut self.backend {
            CameraBackend::Synthetic(camera) => camera.connect(),
        }
    }

    /// Capture the next frame. `Ok(None)` is the end-of-stream sentinel.
    pub fn next_frame(&mut self) -> Result<Option<Frame>> {
        match &mut self.backend {
            CameraBackend::Synthetic(camera) => camera.next_frame(),
        }
    }

    pub fn stats(&self) -> CameraStats {
        match &self.backend {
            CameraBackend::Synthetic(camera) => camera.stats(),
        }
    }
}

/// Statistics for a camera source.
#[derive(Clone, Debug)]
pub struct CameraStats {
    pub frames_captured: u64,
    pub url: String,
}

// ----------------------------------------------------------------------------
// Synthetic camera (stub://)
// ----------------------------------------------------------------------------

struct SyntheticCamera {
    config: CameraConfig,
    frame_count: u64,
    scene_state: u8,
}

impl SyntheticCamera {
    fn new(config: CameraConfig) -> Self {
        Self {
            config,
            frame_count: 0,
            scene_state: 0,
        }
    }

    fn connect(&mut self) -> Result<()> {
        log::info!("camera: connected to {} (synthetic)", self.config.url);
        Ok(())
    }

    fn next_frame(&mut self) -> Result<Option<Frame>> {
        if let Some(limit) = self.config.frame_limit {
            if self.frame_count >= limit {
                return Ok(None);
            }
        }
        self.frame_count += 1;
        Ok(Some(Frame::new(
            self.generate_pixels(),
            self.config.width,
            self.config.height,
        )))
    }

    // The scene shifts every 50 frames so downstream detectors see the
    // board change over time.
    fn generate_pixels(&mut self) -> Vec<u8> {
        if self.frame_count % 50 == 0 {
            self.scene_state = self.scene_state.wrapping_add(1);
        }
        let pixel_count = (self.config.width * self.config.height * 3) as usize;
        let mut pixels = vec![0u8; pixel_count];
        for (i, pixel) in pixels.iter_mut().enumerate() {
            *pixel = ((i as u64 + self.frame_count + self.scene_state as u64) % 256) as u8;
        }
        pixels
    }

    fn stats(&self) -> CameraStats {
        CameraStats {
            frames_captured: self.frame_count,
            url: self.config.url.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_scheme_fails_at_startup() {
        let config = CameraConfig {
            url: "v4l2:///dev/video0".to_string(),
            ..CameraConfig::default()
        };
        assert!(CameraSource::new(config).is_err());
    }

    #[test]
    fn zero_dimensions_are_rejected() {
        let config = CameraConfig {
            width: 0,
            ..CameraConfig::default()
        };
        assert!(CameraSource::new(config).is_err());
    }

    #[test]
    fn frame_limit_ends_the_stream() {
        let config = CameraConfig {
            frame_limit: Some(2),
            width: 8,
            height: 8,
            ..CameraConfig::default()
        };
        let mut source = CameraSource::new(config).unwrap();
        source.connect().unwrap();
        assert!(source.next_frame().unwrap().is_some());
        assert!(source.next_frame().unwrap().is_some());
        assert!(source.next_frame().unwrap().is_none());
        assert_eq!(source.stats().frames_captured, 2);
    }

    #[test]
    fn frames_carry_configured_dimensions() {
        let config = CameraConfig {
            width: 320,
            height: 240,
            frame_limit: Some(1),
            ..CameraConfig::default()
        };
        let mut source = CameraSource::new(config).unwrap();
        let frame = source.next_frame().unwrap().unwrap();
        assert_eq!(frame.width, 320);
        assert_eq!(frame.height, 240);
        assert_eq!(frame.pixels().len(), 320 * 240 * 3);
    }
}
