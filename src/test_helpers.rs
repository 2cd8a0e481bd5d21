//! Shared test utilities for the banner-stitch test suite.
//!
//! Synthetic photos and templates built with `RgbImage::from_fn`, byte-level
//! encoders for feeding the batch pipeline, and a hand-rolled EXIF APP1
//! segment for orientation tests (no encoder in the stack writes EXIF).

use image::codecs::jpeg::JpegEncoder;
use image::codecs::png::PngEncoder;
use image::{ExtendedColorType, ImageEncoder, Rgb, RgbImage};

/// A small gradient photo; every pixel is distinct enough to catch
/// misplaced pastes and rotations.
pub fn test_photo(width: u32, height: u32) -> RgbImage {
    RgbImage::from_fn(width, height, |x, y| {
        Rgb([(x % 256) as u8, (y % 256) as u8, 128])
    })
}

/// A template with solid red/green/blue thirds, so band placement is
/// visible in the output: left band red, center green, right blue.
pub fn banded_template(width: u32, height: u32) -> RgbImage {
    RgbImage::from_fn(width, height, |x, _| {
        if x < width / 3 {
            Rgb([255, 0, 0])
        } else if x < 2 * width / 3 {
            Rgb([0, 255, 0])
        } else {
            Rgb([0, 0, 255])
        }
    })
}

pub fn encode_jpeg_bytes(img: &RgbImage) -> Vec<u8> {
    let mut buf = Vec::new();
    JpegEncoder::new_with_quality(&mut buf, 90)
        .write_image(img.as_raw(), img.width(), img.height(), ExtendedColorType::Rgb8)
        .unwrap();
    buf
}

pub fn encode_png_bytes(img: &RgbImage) -> Vec<u8> {
    let mut buf = Vec::new();
    PngEncoder::new(&mut buf)
        .write_image(img.as_raw(), img.width(), img.height(), ExtendedColorType::Rgb8)
        .unwrap();
    buf
}

/// Encode a JPEG and splice in an APP1 EXIF segment holding one orientation
/// tag. Layout: APP1 marker (2) + length (2) + "Exif\0\0" (6) + TIFF header
/// (8) + IFD0 with a single SHORT entry (18).
pub fn jpeg_with_orientation(width: u32, height: u32, orientation: u16) -> Vec<u8> {
    let jpeg = encode_jpeg_bytes(&test_photo(width, height));

    let tiff_len: u16 = 8 + 2 + 12 + 4; // header + entry count + 1 entry + next IFD
    let app1_len: u16 = 2 + 6 + tiff_len; // length field + exif header + tiff

    let mut app1 = Vec::with_capacity(2 + app1_len as usize);
    app1.extend_from_slice(&[0xFF, 0xE1]);
    app1.extend_from_slice(&app1_len.to_be_bytes());
    app1.extend_from_slice(b"Exif\0\0");

    // TIFF header, little-endian
    app1.extend_from_slice(&[0x49, 0x49]);
    app1.extend_from_slice(&42u16.to_le_bytes());
    app1.extend_from_slice(&8u32.to_le_bytes()); // offset to IFD0

    // IFD0: one entry — orientation tag (0x0112), type SHORT (3), count 1
    app1.extend_from_slice(&1u16.to_le_bytes());
    app1.extend_from_slice(&0x0112u16.to_le_bytes());
    app1.extend_from_slice(&3u16.to_le_bytes());
    app1.extend_from_slice(&1u32.to_le_bytes());
    app1.extend_from_slice(&orientation.to_le_bytes());
    app1.extend_from_slice(&[0, 0]); // pad value to 4 bytes
    app1.extend_from_slice(&0u32.to_le_bytes()); // next IFD offset

    // Splice right after the SOI marker
    let mut out = Vec::with_capacity(jpeg.len() + app1.len());
    out.extend_from_slice(&jpeg[..2]);
    out.extend_from_slice(&app1);
    out.extend_from_slice(&jpeg[2..]);
    out
}
