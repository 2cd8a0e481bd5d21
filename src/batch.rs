//! Batch stitching pipeline.
//!
//! Takes named byte entries (loose files, directories, zip archives), runs
//! each through decode → orientation correction → stitch → JPEG encode, and
//! hands the results to an [`EntrySink`].
//!
//! ## Failure semantics
//!
//! Request-level problems — unusable template, empty input set, payload over
//! the size cap — abort before any pixel work. A photo that fails to decode
//! is an item-level problem: it becomes a [`StitchOutcome::Skipped`] with a
//! message and its siblings keep processing.
//!
//! ## Parallelism
//!
//! Photos are independent, so the batch fans out with
//! [rayon](https://docs.rs/rayon). The template is shared read-only across
//! workers; results come back in input order regardless of completion order,
//! keeping output archives reproducible.

use crate::archive::{ArchiveError, Entry, EntrySink, EntrySource, ZipSource};
use crate::imaging::{Quality, StitchParams, correct_orientation, stitch};
use image::codecs::jpeg::JpegEncoder;
use image::{ExtendedColorType, ImageEncoder, RgbImage};
use rayon::prelude::*;
use std::path::{Path, PathBuf};
use thiserror::Error;
use walkdir::WalkDir;

#[derive(Error, Debug)]
pub enum BatchError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("archive error: {0}")]
    Archive(#[from] ArchiveError),
    #[error("template image unusable: {0}")]
    Template(String),
    #[error("{0}")]
    Validation(String),
}

/// Extensions recognized as photos, for both loose files and archive entries.
const PHOTO_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png"];

/// Default cap on the total input payload, in megabytes.
pub const DEFAULT_MAX_INPUT_MB: u64 = 200;

/// One successfully stitched photo, ready to hand to a sink.
#[derive(Debug, Clone)]
pub struct StitchedPhoto {
    /// Output entry name: `stitched_<original file name>`.
    pub name: String,
    pub jpeg: Vec<u8>,
    pub width: u32,
    pub height: u32,
}

/// Per-item result. Skips carry the input name and a human-readable reason.
#[derive(Debug, Clone)]
pub enum StitchOutcome {
    Done(StitchedPhoto),
    Skipped { name: String, reason: String },
}

/// Does this name carry a recognized photo extension?
pub fn is_photo_name(name: &str) -> bool {
    Path::new(name)
        .extension()
        .and_then(|e| e.to_str())
        .is_some_and(|ext| {
            PHOTO_EXTENSIONS
                .iter()
                .any(|known| ext.eq_ignore_ascii_case(known))
        })
}

/// Derive the output entry name. Archive entries can carry directory
/// components (`batch1/dawn.jpg`); outputs are flat, so only the file name
/// survives behind the prefix.
pub fn output_name(input_name: &str) -> String {
    let file_name = Path::new(input_name)
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or(input_name);
    format!("stitched_{file_name}")
}

/// Load and decode the template image. Failure here is fatal for the whole
/// run — no photo can be stitched without it.
pub fn load_template(path: &Path) -> Result<RgbImage, BatchError> {
    let bytes = std::fs::read(path)
        .map_err(|e| BatchError::Template(format!("{}: {e}", path.display())))?;
    let img = image::load_from_memory(&bytes)
        .map_err(|e| BatchError::Template(format!("{}: {e}", path.display())))?;
    Ok(img.to_rgb8())
}

/// Total on-disk size of the inputs, checked against the cap before any
/// bytes are read or decoded.
pub fn enforce_size_cap(inputs: &[PathBuf], max_bytes: u64) -> Result<u64, BatchError> {
    let mut total = 0u64;
    for input in inputs {
        if input.is_dir() {
            for entry in WalkDir::new(input).sort_by_file_name() {
                let entry = entry.map_err(|e| BatchError::Io(e.into()))?;
                if entry.file_type().is_file() {
                    total += entry.metadata().map_err(|e| BatchError::Io(e.into()))?.len();
                }
            }
        } else {
            total += std::fs::metadata(input)?.len();
        }
    }
    if total > max_bytes {
        return Err(BatchError::Validation(format!(
            "input payload is {} bytes, over the {} byte cap",
            total, max_bytes
        )));
    }
    Ok(total)
}

/// Gather photo entries from loose files, directories, and zip archives.
///
/// Directories are walked in sorted order; zip entries keep archive order.
/// Anything without a recognized photo extension is skipped. Entry order
/// mirrors input order, which in turn fixes output order.
pub fn collect_entries(inputs: &[PathBuf]) -> Result<Vec<Entry>, BatchError> {
    let mut entries = Vec::new();
    for input in inputs {
        if input.is_dir() {
            for walked in WalkDir::new(input).sort_by_file_name() {
                let walked = walked.map_err(|e| BatchError::Io(e.into()))?;
                if walked.file_type().is_file() {
                    push_file_entry(&mut entries, walked.path())?;
                }
            }
        } else if is_zip_name(input) {
            let archive_entries = ZipSource::open(input)?.read_entries()?;
            entries.extend(
                archive_entries
                    .into_iter()
                    .filter(|e| is_photo_name(&e.name)),
            );
        } else {
            push_file_entry(&mut entries, input)?;
        }
    }
    if entries.is_empty() {
        return Err(BatchError::Validation("no photos supplied".into()));
    }
    Ok(entries)
}

fn is_zip_name(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("zip"))
}

fn push_file_entry(entries: &mut Vec<Entry>, path: &Path) -> Result<(), BatchError> {
    let name = path
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or_default()
        .to_string();
    if !is_photo_name(&name) {
        return Ok(());
    }
    entries.push(Entry {
        name,
        bytes: std::fs::read(path)?,
    });
    Ok(())
}

/// Run one photo through the full pipeline. The error string is an
/// item-level message, not a batch abort.
pub fn stitch_entry(
    entry: &Entry,
    template: &RgbImage,
    params: &StitchParams,
    quality: Quality,
) -> Result<StitchedPhoto, String> {
    let decoded = image::load_from_memory(&entry.bytes)
        .map_err(|e| format!("not a valid image: {e}"))?;
    let photo = correct_orientation(decoded.to_rgb8(), &entry.bytes);
    let composite = stitch(&photo, template, params);
    let jpeg = encode_jpeg(&composite, quality).map_err(|e| format!("JPEG encode failed: {e}"))?;
    Ok(StitchedPhoto {
        name: output_name(&entry.name),
        jpeg,
        width: composite.width(),
        height: composite.height(),
    })
}

fn encode_jpeg(img: &RgbImage, quality: Quality) -> Result<Vec<u8>, image::ImageError> {
    let mut buf = Vec::new();
    JpegEncoder::new_with_quality(&mut buf, quality.value()).write_image(
        img.as_raw(),
        img.width(),
        img.height(),
        ExtendedColorType::Rgb8,
    )?;
    Ok(buf)
}

/// Stitch every entry, in parallel, isolating per-item failures.
///
/// Outcomes come back in input order.
pub fn stitch_batch(
    entries: &[Entry],
    template: &RgbImage,
    params: &StitchParams,
    quality: Quality,
) -> Vec<StitchOutcome> {
    entries
        .par_iter()
        .map(|entry| match stitch_entry(entry, template, params, quality) {
            Ok(photo) => StitchOutcome::Done(photo),
            Err(reason) => StitchOutcome::Skipped {
                name: entry.name.clone(),
                reason,
            },
        })
        .collect()
}

/// Write the successful outcomes to a sink, in order. Returns the number of
/// entries written.
pub fn write_outcomes(
    outcomes: &[StitchOutcome],
    sink: &mut dyn EntrySink,
) -> Result<usize, ArchiveError> {
    let mut written = 0;
    for outcome in outcomes {
        if let StitchOutcome::Done(photo) = outcome {
            sink.append(&photo.name, &photo.jpeg)?;
            written += 1;
        }
    }
    sink.finish()?;
    Ok(written)
}
