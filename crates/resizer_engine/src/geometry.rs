use crate::{ResizeSpec, ScaleMode};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Dimensions {
    pub width: u32,
    pub height: u32,
}

impl Dimensions {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }
}

/// The box the resized image has to fit in, before aspect-ratio clamping.
pub fn target_box(spec: ResizeSpec, original: Dimensions) -> Dimensions {
    match spec.mode {
        ScaleMode::Percentage => Dimensions {
            width: scale_percent(original.width, spec.v0),
            height: scale_percent(original.height, spec.v1),
        },
        ScaleMode::Absolute => Dimensions::new(spec.v0, spec.v1),
    }
}

/// Largest size with the aspect ratio of `original` that fits inside `bounds`.
///
/// Uses the full box height when the matching width fits, the full box width
/// otherwise. Fractions are truncated.
pub fn fit_within(original: Dimensions, bounds: Dimensions) -> Dimensions {
    if original.is_empty() {
        return Dimensions::new(0, 0);
    }
    let (width, height) = (u64::from(original.width), u64::from(original.height));
    let width_at_box_height = u64::from(bounds.height) * width / height;
    if width_at_box_height <= u64::from(bounds.width) {
        // Bounded by bounds.width, so it fits in u32.
        Dimensions::new(width_at_box_height as u32, bounds.height)
    } else {
        let height_at_box_width = u64::from(bounds.width) * height / width;
        Dimensions::new(bounds.width, height_at_box_width as u32)
    }
}

fn scale_percent(value: u32, percent: u32) -> u32 {
    let scaled = u64::from(value) * u64::from(percent) / 100;
    u32::try_from(scaled).unwrap_or(u32::MAX)
}
