//! # Banner Stitch
//!
//! Stitches a logo/template banner beneath photos, sized to each photo's
//! aspect ratio. Point it at photos, directories, or a zip archive; every
//! photo comes back as a JPEG with the banner fitted underneath, either as
//! loose files or bundled in a zip.
//!
//! # Pipeline
//!
//! Each photo runs through the same four steps, independently of its
//! siblings:
//!
//! ```text
//! raw bytes → decode → orient (EXIF) → stitch (banner build + stack) → JPEG
//! ```
//!
//! The interesting part is the banner fit. The template is scaled to the
//! computed banner height and sliced into three vertical bands; the center
//! band stretches to absorb whatever width the photo demands, so the marks
//! at the edges keep their proportions:
//!
//! ```text
//! template  | left | center | right |
//! banner    | left |  c e n t e r  | right |     (center stretched)
//! ```
//!
//! When a photo is so narrow that the outer bands alone overflow it, the
//! center is dropped and the outer bands shrink uniformly instead — a
//! shorter banner rather than cropped marks.
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`imaging`] | The core: orientation correction, band math, banner build, composition |
//! | [`batch`] | Per-photo pipeline with rayon fan-out and per-item error isolation |
//! | [`archive`] | Named-byte-entry capability: zip and directory sources/sinks |
//! | [`config`] | `config.toml` loading, validation, stock config generation |
//! | [`output`] | CLI report formatting |
//!
//! # Design Decisions
//!
//! ## Per-Item Failure Isolation
//!
//! A batch is only as useful as the photos that survive it. A photo that
//! fails to decode is reported and skipped; it never takes its siblings
//! down. Only three things abort a run, all before any pixel work: an
//! unusable template, an empty input set, and an input payload over the
//! size cap.
//!
//! ## Pure-Rust Imaging
//!
//! Decoding, resampling (Lanczos3), and encoding all come from the `image`
//! crate; EXIF parsing from `kamadak-exif`. No system dependencies, one
//! self-contained binary.
//!
//! ## Container-Agnostic Batch Core
//!
//! The pipeline consumes and produces named byte entries. Zip archives and
//! plain directories are interchangeable behind the [`archive`] traits, and
//! the core never sees which one is in play.

pub mod archive;
pub mod batch;
pub mod config;
pub mod imaging;
pub mod output;

#[cfg(test)]
pub(crate) mod test_helpers;
