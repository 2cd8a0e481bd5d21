//! Image composition core — pure Rust, no external tools.
//!
//! | Operation | Crate / function |
//! |---|---|
//! | **Orientation** | kamadak-exif tag read + `imageops::rotate*` |
//! | **Banner bands** | `imageops::crop_imm` + Lanczos3 `imageops::resize` |
//! | **Composition** | `RgbImage::from_pixel` + `imageops::replace` |
//!
//! The module is split into:
//! - **Calculations**: pure functions for dimension math (unit testable)
//! - **Params**: data structures describing a stitch run
//! - **Orientation**: EXIF-driven rotation correction
//! - **Banner**: the three-band adaptive template builder
//! - **Compositor**: photo-over-banner stacking

pub mod banner;
mod calculations;
pub mod compositor;
pub mod orientation;
mod params;

pub use banner::build_adaptive_banner;
pub use calculations::{calculate_banner_height, scaled_template_width};
pub use compositor::stitch;
pub use orientation::correct_orientation;
pub use params::{Quality, SliceRatios, StitchParams};
