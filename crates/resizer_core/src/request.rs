use std::path::{Path, PathBuf};

/// File extensions the resizer accepts, compared case-insensitively.
pub const SUPPORTED_EXTENSIONS: [&str; 3] = ["png", "jpg", "jpeg"];

/// How the two scale parameters of a request are interpreted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ScaleMode {
    /// `v0`/`v1` are percentages of the original width/height.
    #[default]
    Percentage,
    /// `v0`/`v1` are the target width/height in pixels.
    Absolute,
}

/// One conversion request. The paths are never modified once dispatched.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResizeRequest {
    pub mode: ScaleMode,
    pub v0: u32,
    pub v1: u32,
    pub paths: Vec<PathBuf>,
}

impl ResizeRequest {
    pub fn new<I, P>(mode: ScaleMode, v0: u32, v1: u32, paths: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<PathBuf>,
    {
        Self {
            mode,
            v0,
            v1,
            paths: paths.into_iter().map(Into::into).collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.paths.len()
    }

    pub fn is_empty(&self) -> bool {
        self.paths.is_empty()
    }

    /// Same mode and parameters, different paths.
    pub(crate) fn with_paths(&self, paths: Vec<PathBuf>) -> Self {
        Self {
            mode: self.mode,
            v0: self.v0,
            v1: self.v1,
            paths,
        }
    }
}

/// Remembered front-end preferences.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScaleSettings {
    pub mode: ScaleMode,
    pub percent_width: u32,
    pub percent_height: u32,
    pub absolute_width: u32,
    pub absolute_height: u32,
    /// Convert as soon as files are added.
    pub auto_convert: bool,
}

impl Default for ScaleSettings {
    fn default() -> Self {
        Self {
            mode: ScaleMode::Percentage,
            percent_width: 50,
            percent_height: 50,
            absolute_width: 1280,
            absolute_height: 720,
            auto_convert: false,
        }
    }
}

impl ScaleSettings {
    /// The `(v0, v1)` pair for the current mode.
    pub fn params(&self) -> (u32, u32) {
        match self.mode {
            ScaleMode::Percentage => (self.percent_width, self.percent_height),
            ScaleMode::Absolute => (self.absolute_width, self.absolute_height),
        }
    }

    pub fn request_for(&self, paths: Vec<PathBuf>) -> ResizeRequest {
        let (v0, v1) = self.params();
        ResizeRequest {
            mode: self.mode,
            v0,
            v1,
            paths,
        }
    }
}

pub fn is_supported_image(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| {
            SUPPORTED_EXTENSIONS
                .iter()
                .any(|supported| ext.eq_ignore_ascii_case(supported))
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extension_check_ignores_case() {
        assert!(is_supported_image(Path::new("a/b/photo.JPG")));
        assert!(is_supported_image(Path::new("photo.Jpeg")));
        assert!(is_supported_image(Path::new("icon.png")));
        assert!(!is_supported_image(Path::new("anim.gif")));
        assert!(!is_supported_image(Path::new("png")));
        assert!(!is_supported_image(Path::new("archive.png.zip")));
    }

    #[test]
    fn params_follow_mode() {
        let mut settings = ScaleSettings::default();
        assert_eq!(settings.params(), (50, 50));
        settings.mode = ScaleMode::Absolute;
        assert_eq!(settings.params(), (1280, 720));

        let request = settings.request_for(vec![PathBuf::from("x.png")]);
        assert_eq!(request.mode, ScaleMode::Absolute);
        assert_eq!((request.v0, request.v1), (1280, 720));
        assert_eq!(request.len(), 1);
    }
}
