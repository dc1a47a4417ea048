//! Frame container handed from the ingest layer to the detectors.
//!
//! A `Frame` is a plain RGB pixel buffer plus its dimensions. The core never
//! inspects pixels itself; detectors consume them through the
//! `DetectorBackend` seam and produce candidates. End-of-stream is signaled
//! by the source returning no frame at all, never by an empty buffer
//! reaching the loop.

use crate::geometry::Point;

/// One captured video frame.
pub struct Frame {
    data: Vec<u8>,
    pub width: u32,
    pub height: u32,
}

impl Frame {
    /// Create a frame from decoded pixel data. Called by the ingest layer.
    pub(crate) fn new(data: Vec<u8>, width: u32, height: u32) -> Self {
        Self {
            data,
            width,
            height,
        }
    }

    /// Read-only pixel access for detector backends.
    pub fn pixels(&self) -> &[u8] {
        &self.data
    }

    pub fn bounds(&self) -> FrameBounds {
        FrameBounds {
            width: self.width,
            height: self.height,
        }
    }
}

/// Frame dimensions, used for box clamping and the board-side partition.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FrameBounds {
    pub width: u32,
    pub height: u32,
}

impl FrameBounds {
    /// The vertical midline splitting the board into LEFT and RIGHT halves.
    pub fn mid_x(&self) -> i32 {
        (self.width / 2) as i32
    }

    pub fn contains(&self, p: Point) -> bool {
        p.x >= 0 && p.y >= 0 && (p.x as u32) < self.width && (p.y as u32) < self.height
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn midline_splits_frame() {
        let bounds = FrameBounds {
            width: 640,
            height: 480,
        };
        assert_eq!(bounds.mid_x(), 320);
        assert!(bounds.contains(Point::new(0, 0)));
        assert!(bounds.contains(Point::new(639, 479)));
        assert!(!bounds.contains(Point::new(640, 479)));
        assert!(!bounds.contains(Point::new(-1, 10)));
    }

    #[test]
    fn frame_exposes_pixels_and_bounds() {
        let frame = Frame::new(vec![0u8; 12], 2, 2);
        assert_eq!(frame.pixels().len(), 12);
        assert_eq!(frame.bounds().mid_x(), 1);
    }
}
