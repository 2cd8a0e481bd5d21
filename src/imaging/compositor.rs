//! Photo + banner composition.
//!
//! Computes the banner height from the photo's aspect ratio, builds the
//! fitted banner, and stacks photo above banner on a single canvas.

use super::banner::build_adaptive_banner;
use super::calculations::calculate_banner_height;
use super::params::StitchParams;
use image::imageops;
use image::{Rgb, RgbImage};

/// Stitch a photo and a template into one composite image.
///
/// The banner is built at the photo's width and a height derived from its
/// aspect ratio (`calculate_banner_height`), then pasted directly beneath
/// the photo. The canvas is white; that background shows only when the
/// banner builder's overflow branch returned a banner shorter than
/// requested.
pub fn stitch(photo: &RgbImage, template: &RgbImage, params: &StitchParams) -> RgbImage {
    let (w, h) = photo.dimensions();
    let banner_height = calculate_banner_height((w, h), params.base_ratio, params.exponent);
    let banner = build_adaptive_banner(template, w, banner_height, params.slices);

    let mut out = RgbImage::from_pixel(w, h + banner_height, Rgb([255, 255, 255]));
    imageops::replace(&mut out, photo, 0, 0);
    imageops::replace(&mut out, &banner, 0, i64::from(h));
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::imaging::params::SliceRatios;
    use crate::test_helpers::{banded_template, test_photo};

    #[test]
    fn stock_scenario_composite_is_800x663() {
        // 800x600 photo → banner height 63 → composite 800x663
        let photo = test_photo(800, 600);
        let template = banded_template(1000, 200);
        let composite = stitch(&photo, &template, &StitchParams::default());
        assert_eq!(composite.dimensions(), (800, 663));
    }

    #[test]
    fn photo_occupies_the_top_of_the_composite() {
        let photo = test_photo(120, 80);
        let template = banded_template(300, 60);
        let composite = stitch(&photo, &template, &StitchParams::default());
        assert_eq!(composite.get_pixel(0, 0), photo.get_pixel(0, 0));
        assert_eq!(composite.get_pixel(119, 79), photo.get_pixel(119, 79));
    }

    #[test]
    fn banner_region_starts_at_photo_height() {
        let photo = test_photo(300, 200);
        let template = banded_template(300, 60);
        let params = StitchParams::default();
        let composite = stitch(&photo, &template, &params);
        let banner_h = composite.height() - 200;
        assert!(banner_h >= 1);
        // First banner row differs from the photo's bottom row fill pattern
        // only if the template contributed pixels there; just confirm the
        // canvas extends below the photo.
        assert!(composite.height() > photo.height());
    }

    #[test]
    fn overflow_branch_leaves_white_below_short_banner() {
        // Outer bands far wider than a narrow photo force the overflow
        // branch; the shrunk banner leaves white canvas beneath it.
        let photo = test_photo(40, 40);
        let template = banded_template(2000, 50);
        let params = StitchParams {
            slices: SliceRatios::new(0.45, 0.10, 0.45),
            ..StitchParams::default()
        };
        let composite = stitch(&photo, &template, &params);
        // Banner height request: floor(40 * 0.1 * 1.0) = 4
        assert_eq!(composite.dimensions(), (40, 44));
        // Scaled template: round(2000*4/50) = 160; outers 72+72 = 144 > 40,
        // shrunk height floor(4*40/144) = 1 — rows below it stay white.
        assert_eq!(*composite.get_pixel(20, 43), Rgb([255, 255, 255]));
    }

    #[test]
    fn tall_photo_gets_thicker_banner_than_wide_photo() {
        let template = banded_template(300, 60);
        let params = StitchParams::default();
        let wide = stitch(&test_photo(400, 200), &template, &params);
        let tall = stitch(&test_photo(400, 800), &template, &params);
        assert!(tall.height() - 800 > wide.height() - 200);
    }
}
