//! Fixed image clean-up applied before recognition.
//!
//! grayscale → contrast ×2 → sharpness ×2, then optionally a light Gaussian
//! blur and a hard threshold at the midpoint. The enhancement steps blend
//! each pixel against a degenerate version of the image (the mean gray level
//! for contrast, a 3×3 smoothing for sharpness) and extrapolate by the
//! factor.

use image::{DynamicImage, GrayImage, Luma};

pub const CONTRAST_FACTOR: f32 = 2.0;
pub const SHARPNESS_FACTOR: f32 = 2.0;
pub const BLUR_SIGMA: f32 = 1.0;
pub const THRESHOLD: u8 = 128;

const SMOOTH_KERNEL: [f32; 9] = [1.0, 1.0, 1.0, 1.0, 5.0, 1.0, 1.0, 1.0, 1.0];
const SMOOTH_DIVISOR: f32 = 13.0;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PreprocessOptions {
    /// Blur and threshold after sharpening.
    pub binarize: bool,
}

/// A named intermediate result, reported to the stage callback.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Grayscale,
    Contrast,
    Sharpness,
    Blur,
    Threshold,
}

impl Stage {
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Stage::Grayscale => "grayscale",
            Stage::Contrast => "contrast",
            Stage::Sharpness => "sharpness",
            Stage::Blur => "blur",
            Stage::Threshold => "threshold",
        }
    }
}

/// Runs the full pipeline, calling `on_stage` after each step.
pub fn preprocess(
    img: &DynamicImage,
    options: PreprocessOptions,
    mut on_stage: impl FnMut(Stage, &GrayImage),
) -> GrayImage {
    let gray = img.to_luma8();
    on_stage(Stage::Grayscale, &gray);

    let contrasted = enhance_contrast(&gray, CONTRAST_FACTOR);
    on_stage(Stage::Contrast, &contrasted);

    let sharpened = enhance_sharpness(&contrasted, SHARPNESS_FACTOR);
    on_stage(Stage::Sharpness, &sharpened);

    if !options.binarize {
        return sharpened;
    }

    let blurred = image::imageops::blur(&sharpened, BLUR_SIGMA);
    on_stage(Stage::Blur, &blurred);

    let thresholded = binarize(&blurred, THRESHOLD);
    on_stage(Stage::Threshold, &thresholded);
    thresholded
}

#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn clamp_u8(value: f32) -> u8 {
    value.round().clamp(0.0, 255.0) as u8
}

#[allow(clippy::cast_precision_loss)]
fn mean_luma(img: &GrayImage) -> f32 {
    let count = u64::from(img.width()) * u64::from(img.height());
    if count == 0 {
        return 0.0;
    }
    let sum: u64 = img.pixels().map(|p| u64::from(p.0[0])).sum();
    (sum as f32 / count as f32).round()
}

/// Pushes every pixel away from the image's mean gray level by `factor`.
#[must_use]
pub fn enhance_contrast(img: &GrayImage, factor: f32) -> GrayImage {
    let mean = mean_luma(img);
    GrayImage::from_fn(img.width(), img.height(), |x, y| {
        let p = f32::from(img.get_pixel(x, y).0[0]);
        Luma([clamp_u8(mean + factor * (p - mean))])
    })
}

/// Pushes every pixel away from its 3×3 smoothed value by `factor`. Border
/// pixels have no full neighbourhood and are left as they are.
#[must_use]
pub fn enhance_sharpness(img: &GrayImage, factor: f32) -> GrayImage {
    let smooth = smooth3x3(img);
    GrayImage::from_fn(img.width(), img.height(), |x, y| {
        let p = f32::from(img.get_pixel(x, y).0[0]);
        let s = f32::from(smooth.get_pixel(x, y).0[0]);
        Luma([clamp_u8(s + factor * (p - s))])
    })
}

fn smooth3x3(img: &GrayImage) -> GrayImage {
    let (width, height) = img.dimensions();
    let mut out = img.clone();
    if width < 3 || height < 3 {
        return out;
    }
    for y in 1..height - 1 {
        for x in 1..width - 1 {
            let mut acc = 0.0f32;
            for (i, weight) in SMOOTH_KERNEL.iter().enumerate() {
                // i / 3 and i % 3 are 0..=2, offsetting from (x - 1, y - 1).
                #[allow(clippy::cast_possible_truncation)]
                let (dx, dy) = ((i % 3) as u32, (i / 3) as u32);
                acc += weight * f32::from(img.get_pixel(x + dx - 1, y + dy - 1).0[0]);
            }
            out.put_pixel(x, y, Luma([clamp_u8(acc / SMOOTH_DIVISOR)]));
        }
    }
    out
}

/// Maps pixels above `threshold` to white and the rest to black.
#[must_use]
pub fn binarize(img: &GrayImage, threshold: u8) -> GrayImage {
    GrayImage::from_fn(img.width(), img.height(), |x, y| {
        if img.get_pixel(x, y).0[0] > threshold {
            Luma([255])
        } else {
            Luma([0])
        }
    })
}
