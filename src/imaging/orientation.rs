//! EXIF orientation correction.
//!
//! Cameras store sensor-rotated pixels and record the intended display
//! rotation in the EXIF orientation tag. [`correct_orientation`] applies that
//! rotation so every photo enters the compositor right-side-up.
//!
//! The tag lookup is modeled as an optional value, not an error path: a
//! missing tag, absent EXIF block, or unparseable metadata all mean "no
//! rotation needed" and return the photo unchanged. Only tag values 3, 6 and
//! 8 are recognized; the mirrored variants (2, 4, 5, 7) pass through
//! untouched.

use exif::{In, Tag};
use image::RgbImage;
use image::imageops;
use std::io::Cursor;

/// Read the EXIF orientation tag value from an encoded image's bytes.
///
/// `None` covers every way the lookup can come up empty — no EXIF segment,
/// no orientation field, or a malformed container.
pub fn read_orientation(raw: &[u8]) -> Option<u32> {
    let exif = exif::Reader::new()
        .read_from_container(&mut Cursor::new(raw))
        .ok()?;
    exif.get_field(Tag::Orientation, In::PRIMARY)?
        .value
        .get_uint(0)
}

/// Rotate a decoded photo right-side-up per its EXIF orientation tag.
///
/// `raw` is the encoded byte stream the photo was decoded from; the decoded
/// pixels never carry the tag. Rotations are clockwise: tag 3 → 180°,
/// tag 6 → 90°, tag 8 → 270°. Any other tag value, or no tag at all, returns
/// the photo as-is.
pub fn correct_orientation(img: RgbImage, raw: &[u8]) -> RgbImage {
    match read_orientation(raw) {
        Some(3) => imageops::rotate180(&img),
        Some(6) => imageops::rotate90(&img),
        Some(8) => imageops::rotate270(&img),
        _ => img,
    }
}
