// ── Opaque image frame ──

use std::fmt;

/// A captured camera frame, treated as an opaque bitmap.
///
/// Consumers of this crate never interpret the pixel data -- it exists
/// only to be handed to an [`crate::ImageClassifier`]. Raw bytes are
/// whatever the capture layer produced (RGB, YUV, JPEG, ...); the
/// classifier implementation decides what it accepts.
#[derive(Clone, PartialEq, Eq)]
pub struct ImageFrame {
    width: u32,
    height: u32,
    data: Vec<u8>,
}

impl ImageFrame {
    pub fn new(width: u32, height: u32, data: Vec<u8>) -> Self {
        Self {
            width,
            height,
            data,
        }
    }

    /// An empty 0x0 frame, handy as a placeholder in tests.
    pub fn empty() -> Self {
        Self::new(0, 0, Vec::new())
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn data(&self) -> &[u8] {
        &self.data
    }
}

impl fmt::Debug for ImageFrame {
    // Skip the pixel payload; frames can be megabytes.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ImageFrame")
            .field("width", &self.width)
            .field("height", &self.height)
            .field("bytes", &self.data.len())
            .finish()
    }
}
