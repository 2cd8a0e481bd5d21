//! Archive capability: named byte streams in, named byte streams out.
//!
//! The batch pipeline only ever talks to [`EntrySource`] ("enumerate named
//! byte entries") and [`EntrySink`] ("append a named byte entry"), so the
//! container format is a deployment detail. Two sinks exist: a zip bundle
//! for multi-photo downloads and a plain directory for individual files.
//! The one source beyond loose files is a zip archive.

use std::fs::File;
use std::io::{Read, Write};
use std::path::{Path, PathBuf};
use thiserror::Error;
use zip::write::SimpleFileOptions;

#[derive(Error, Debug)]
pub enum ArchiveError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("zip error: {0}")]
    Zip(#[from] zip::result::ZipError),
}

/// A named byte stream — one photo (or one output) in transit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entry {
    pub name: String,
    pub bytes: Vec<u8>,
}

/// Read side of the capability: enumerate named byte entries.
pub trait EntrySource {
    /// All file entries, in container order. Directory entries are skipped.
    fn read_entries(&mut self) -> Result<Vec<Entry>, ArchiveError>;
}

/// Write side of the capability: append named byte entries.
pub trait EntrySink {
    fn append(&mut self, name: &str, bytes: &[u8]) -> Result<(), ArchiveError>;

    /// Flush and close the container. Must be called exactly once, after the
    /// last append.
    fn finish(&mut self) -> Result<(), ArchiveError>;
}

/// Zip archive source.
pub struct ZipSource {
    archive: zip::ZipArchive<File>,
}

impl ZipSource {
    pub fn open(path: &Path) -> Result<Self, ArchiveError> {
        let file = File::open(path)?;
        Ok(Self {
            archive: zip::ZipArchive::new(file)?,
        })
    }
}

impl EntrySource for ZipSource {
    fn read_entries(&mut self) -> Result<Vec<Entry>, ArchiveError> {
        let mut entries = Vec::with_capacity(self.archive.len());
        for index in 0..self.archive.len() {
            let mut file = self.archive.by_index(index)?;
            if !file.is_file() {
                continue;
            }
            let name = file.name().to_string();
            let mut bytes = Vec::with_capacity(file.size() as usize);
            file.read_to_end(&mut bytes)?;
            entries.push(Entry { name, bytes });
        }
        Ok(entries)
    }
}

/// Zip archive sink.
pub struct ZipSink {
    // Taken on finish; ZipWriter::finish consumes the writer.
    writer: Option<zip::ZipWriter<File>>,
}

impl ZipSink {
    pub fn create(path: &Path) -> Result<Self, ArchiveError> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }
        let file = File::create(path)?;
        Ok(Self {
            writer: Some(zip::ZipWriter::new(file)),
        })
    }
}

impl EntrySink for ZipSink {
    fn append(&mut self, name: &str, bytes: &[u8]) -> Result<(), ArchiveError> {
        let writer = self
            .writer
            .as_mut()
            .expect("append called after finish");
        writer.start_file(name, SimpleFileOptions::default())?;
        writer.write_all(bytes)?;
        Ok(())
    }

    fn finish(&mut self) -> Result<(), ArchiveError> {
        if let Some(writer) = self.writer.take() {
            writer.finish()?;
        }
        Ok(())
    }
}

/// Directory sink — each entry becomes a file under the root.
pub struct DirSink {
    root: PathBuf,
}

impl DirSink {
    pub fn create(root: &Path) -> Result<Self, ArchiveError> {
        std::fs::create_dir_all(root)?;
        Ok(Self {
            root: root.to_path_buf(),
        })
    }
}

impl EntrySink for DirSink {
    fn append(&mut self, name: &str, bytes: &[u8]) -> Result<(), ArchiveError> {
        std::fs::write(self.root.join(name), bytes)?;
        Ok(())
    }

    fn finish(&mut self) -> Result<(), ArchiveError> {
        Ok(())
    }
}
