use std::io::Cursor;
use std::path::Path;

use image::codecs::jpeg::JpegEncoder;
use image::imageops::FilterType;
use image::{DynamicImage, ImageFormat, ImageReader};

use crate::geometry::{fit_within, target_box, Dimensions};
use crate::persist::replace_file;
use crate::{ConvertError, ResizeSpec};

/// Resizes one file in place.
pub trait Resizer: Send + Sync {
    /// Returns the dimensions the file was rewritten with.
    fn resize_file(&self, path: &Path, spec: ResizeSpec) -> Result<Dimensions, ConvertError>;
}

/// Decodes with the `image` crate, resamples with Catmull-Rom and writes
/// back in the format named by the file extension (PNG or JPEG).
#[derive(Debug, Clone, Copy)]
pub struct ImageCrateResizer {
    jpeg_quality: u8,
}

impl Default for ImageCrateResizer {
    fn default() -> Self {
        Self::new(75)
    }
}

impl ImageCrateResizer {
    pub fn new(jpeg_quality: u8) -> Self {
        Self {
            jpeg_quality: jpeg_quality.clamp(1, 100),
        }
    }

    fn encode(&self, image: &DynamicImage, format: ImageFormat) -> Result<Vec<u8>, ConvertError> {
        let mut buffer = Cursor::new(Vec::new());
        let written = match format {
            // JPEG has no alpha channel.
            ImageFormat::Jpeg => DynamicImage::ImageRgb8(image.to_rgb8()).write_with_encoder(
                JpegEncoder::new_with_quality(&mut buffer, self.jpeg_quality),
            ),
            _ => image.write_to(&mut buffer, format),
        };
        written.map_err(|e| ConvertError::Encode(e.to_string()))?;
        Ok(buffer.into_inner())
    }
}

impl Resizer for ImageCrateResizer {
    fn resize_file(&self, path: &Path, spec: ResizeSpec) -> Result<Dimensions, ConvertError> {
        let image = decode(path)?;
        let format = output_format(path)?;

        let original = Dimensions::new(image.width(), image.height());
        let bounds = target_box(spec, original);
        let fitted = fit_within(original, bounds);
        if fitted.is_empty() {
            return Err(ConvertError::EmptyTarget {
                width: fitted.width,
                height: fitted.height,
            });
        }

        let resized = image.resize_exact(fitted.width, fitted.height, FilterType::CatmullRom);
        let bytes = self.encode(&resized, format)?;
        replace_file(path, &bytes)?;
        Ok(fitted)
    }
}

/// Sniffs the format from content, falling back to the extension.
fn decode(path: &Path) -> Result<DynamicImage, ConvertError> {
    let reader = ImageReader::open(path)
        .and_then(|reader| reader.with_guessed_format())
        .map_err(|e| ConvertError::Decode(e.to_string()))?;
    reader
        .decode()
        .map_err(|e| ConvertError::Decode(e.to_string()))
}

fn output_format(path: &Path) -> Result<ImageFormat, ConvertError> {
    match ImageFormat::from_path(path) {
        Ok(format @ (ImageFormat::Png | ImageFormat::Jpeg)) => Ok(format),
        _ => Err(ConvertError::UnsupportedFormat {
            extension: path
                .extension()
                .map(|ext| ext.to_string_lossy().into_owned())
                .unwrap_or_default(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn output_format_follows_extension_case_insensitively() {
        assert_eq!(output_format(Path::new("a.PNG")).unwrap(), ImageFormat::Png);
        assert_eq!(output_format(Path::new("a.JpEg")).unwrap(), ImageFormat::Jpeg);
        assert_eq!(output_format(Path::new("a.jpg")).unwrap(), ImageFormat::Jpeg);
        assert!(matches!(
            output_format(Path::new("a.bmp")),
            Err(ConvertError::UnsupportedFormat { extension }) if extension == "bmp"
        ));
        assert!(matches!(
            output_format(Path::new("noext")),
            Err(ConvertError::UnsupportedFormat { .. })
        ));
    }

    #[test]
    fn jpeg_quality_is_clamped() {
        assert_eq!(ImageCrateResizer::new(0).jpeg_quality, 1);
        assert_eq!(ImageCrateResizer::new(250).jpeg_quality, 100);
    }
}
