//! Adaptive banner construction.
//!
//! The template is treated as three horizontal bands — left mark, center
//! filler, right mark. To fit a target width the center band stretches or
//! compresses while the outer bands keep their proportions; when the outer
//! bands alone are wider than the target, the center is dropped and the
//! outers shrink uniformly instead. All resampling is Lanczos3.

use super::calculations::{band_widths, scaled_template_width, shrunk_banner_height};
use super::params::SliceRatios;
use image::imageops::{self, FilterType};
use image::{Rgb, RgbImage};

const CANVAS_FILL: Rgb<u8> = Rgb([255, 255, 255]);

/// Build a banner of `target_width` x `target_height` from the template.
///
/// The template is first scaled uniformly so its height matches
/// `target_height`, then partitioned into bands by `slices`.
///
/// Dimensions contract: the result is always exactly `target_width` wide.
/// The height is exactly `target_height` in the normal case; in the
/// overflow case (outer bands wider than the target) the banner comes back
/// *shorter*, and the caller must tolerate that.
///
/// Targets must be positive — the compositor guarantees this (photo widths
/// are at least 1 and the banner height is clamped to 1).
pub fn build_adaptive_banner(
    template: &RgbImage,
    target_width: u32,
    target_height: u32,
    slices: SliceRatios,
) -> RgbImage {
    debug_assert!(target_width > 0 && target_height > 0);

    let scaled_w = scaled_template_width(template.dimensions(), target_height);
    let scaled = imageops::resize(template, scaled_w, target_height, FilterType::Lanczos3);
    let bands = band_widths(scaled_w, slices);

    let left = crop_band(&scaled, 0, bands.left);
    let right = crop_band(&scaled, bands.left + bands.center, bands.right);
    let outer_width = bands.left + bands.right;

    if outer_width > target_width {
        // Degenerate-width policy: the outer bands alone exceed the request,
        // so the center band is sacrificed and left+right shrink uniformly.
        let mut joined = RgbImage::from_pixel(outer_width, target_height, CANVAS_FILL);
        imageops::replace(&mut joined, &left, 0, 0);
        imageops::replace(&mut joined, &right, i64::from(bands.left), 0);
        let new_h = shrunk_banner_height(target_height, outer_width, target_width);
        imageops::resize(&joined, target_width, new_h, FilterType::Lanczos3)
    } else {
        let needed = target_width - outer_width;
        let mut out = RgbImage::from_pixel(target_width, target_height, CANVAS_FILL);
        imageops::replace(&mut out, &left, 0, 0);
        if needed > 0 && bands.center > 0 {
            let center = crop_band(&scaled, bands.left, bands.center);
            let stretched = imageops::resize(&center, needed, target_height, FilterType::Lanczos3);
            imageops::replace(&mut out, &stretched, i64::from(bands.left), 0);
        }
        imageops::replace(&mut out, &right, i64::from(bands.left + needed), 0);
        out
    }
}

/// Crop a vertical band out of the scaled template. A zero-width band yields
/// an empty image, which pastes as a no-op.
fn crop_band(scaled: &RgbImage, x: u32, width: u32) -> RgbImage {
    imageops::crop_imm(scaled, x, 0, width, scaled.height()).to_image()
}
