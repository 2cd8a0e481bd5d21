//! CLI output formatting.
//!
//! Each report has a `format_*` function (returns `Vec<String>`) for
//! testability and a `print_*` wrapper that writes to stdout. Format
//! functions are pure — no I/O, no side effects.
//!
//! ```text
//! 001 stitched_dawn.jpg (800x663)
//! 002 notes.bin
//!     Skipped: not a valid image: unsupported format
//! Stitched 1 photo, skipped 1
//! ```

use crate::archive::Entry;
use crate::batch::StitchOutcome;

/// Per-item lines plus a one-line summary for a finished batch.
pub fn format_stitch_report(outcomes: &[StitchOutcome]) -> Vec<String> {
    let mut lines = Vec::new();
    let mut stitched = 0usize;
    let mut skipped = 0usize;

    for (index, outcome) in outcomes.iter().enumerate() {
        match outcome {
            StitchOutcome::Done(photo) => {
                stitched += 1;
                lines.push(format!(
                    "{:03} {} ({}x{})",
                    index + 1,
                    photo.name,
                    photo.width,
                    photo.height
                ));
            }
            StitchOutcome::Skipped { name, reason } => {
                skipped += 1;
                lines.push(format!("{:03} {}", index + 1, name));
                lines.push(format!("    Skipped: {reason}"));
            }
        }
    }

    lines.push(format!(
        "Stitched {} {}, skipped {}",
        stitched,
        plural(stitched, "photo", "photos"),
        skipped
    ));
    lines
}

pub fn print_stitch_report(outcomes: &[StitchOutcome]) {
    for line in format_stitch_report(outcomes) {
        println!("{line}");
    }
}

/// What a `check` run found: the template and every photo that would be
/// processed.
pub fn format_check_output(template_dims: (u32, u32), entries: &[Entry]) -> Vec<String> {
    let mut lines = vec![format!(
        "Template: {}x{}",
        template_dims.0, template_dims.1
    )];
    for (index, entry) in entries.iter().enumerate() {
        lines.push(format!(
            "{:03} {} ({} bytes)",
            index + 1,
            entry.name,
            entry.bytes.len()
        ));
    }
    lines.push(format!(
        "{} {} ready to stitch",
        entries.len(),
        plural(entries.len(), "photo", "photos")
    ));
    lines
}

pub fn print_check_output(template_dims: (u32, u32), entries: &[Entry]) {
    for line in format_check_output(template_dims, entries) {
        println!("{line}");
    }
}

fn plural<'a>(count: usize, singular: &'a str, plural: &'a str) -> &'a str {
    if count == 1 { singular } else { plural }
}
