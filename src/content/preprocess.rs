//! Image normalization ahead of recognition.
//!
//! ```text
//! bytes → decode → flatten alpha → grayscale → autocontrast → binarize
//! ```
//!
//! Output pixels are either 0 (ink) or 255 (background). Identical input
//! pixels always produce identical output.

use image::{DynamicImage, GrayImage, Luma, Rgb, RgbImage};

use crate::error::{ExtractError, Result};

/// Decode `bytes` and normalize the result.
pub fn preprocess(bytes: &[u8], threshold: u8) -> Result<GrayImage> {
    let image = image::load_from_memory(bytes).map_err(|e| ExtractError::invalid("image", e))?;
    Ok(preprocess_decoded(image, threshold))
}

/// Normalize an already decoded image (e.g. a rendered PDF page).
pub fn preprocess_decoded(image: DynamicImage, threshold: u8) -> GrayImage {
    let mut gray = grayscale(&image.to_rgb8());
    autocontrast(&mut gray);
    binarize(&mut gray, threshold);
    gray
}

/// ITU-R 601-2 luma with integer weights: `(R*299 + G*587 + B*114) / 1000`.
///
/// Alpha has already been dropped by the RGB conversion.
pub fn grayscale(rgb: &RgbImage) -> GrayImage {
    GrayImage::from_fn(rgb.width(), rgb.height(), |x, y| {
        let Rgb([r, g, b]) = *rgb.get_pixel(x, y);
        let luma = (u32::from(r) * 299 + u32::from(g) * 587 + u32::from(b) * 114) / 1000;
        Luma([u8::try_from(luma).unwrap_or(u8::MAX)])
    })
}

/// Stretch the observed intensity range to the full 0..=255 range.
///
/// Values are truncated, not rounded. A single-intensity image carries no
/// contrast to stretch and is left untouched.
pub fn autocontrast(image: &mut GrayImage) {
    let Some((lo, hi)) = intensity_range(image) else {
        return;
    };
    if lo >= hi {
        return;
    }

    let span = u32::from(hi - lo);
    let lut: Vec<u8> = (0..=255u8)
        .map(|v| {
            let clamped = v.clamp(lo, hi);
            let scaled = u32::from(clamped - lo) * 255 / span;
            u8::try_from(scaled).unwrap_or(u8::MAX)
        })
        .collect();

    for Luma([v]) in image.pixels_mut() {
        *v = lut[usize::from(*v)];
    }
}

fn intensity_range(image: &GrayImage) -> Option<(u8, u8)> {
    let mut pixels = image.pixels().map(|Luma([v])| *v);
    let first = pixels.next()?;
    Some(pixels.fold((first, first), |(lo, hi), v| (lo.min(v), hi.max(v))))
}

/// Map pixels below `threshold` to ink (0) and the rest to background (255).
pub fn binarize(image: &mut GrayImage, threshold: u8) {
    for Luma([v]) in image.pixels_mut() {
        *v = if *v < threshold { 0 } else { 255 };
    }
}
