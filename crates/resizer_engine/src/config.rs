use crate::ImageCrateResizer;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EngineConfig {
    /// Upper bound on chunks converted at the same time.
    pub worker_threads: usize,
    /// JPEG quality, 1-100.
    pub jpeg_quality: u8,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            worker_threads: 4,
            jpeg_quality: 75,
        }
    }
}

impl EngineConfig {
    pub fn resizer(&self) -> ImageCrateResizer {
        ImageCrateResizer::new(self.jpeg_quality)
    }
}
