//! Output directory preparation and streamed file writing.
//!
//! The destination is opened (created or truncated) only when the first body
//! chunk arrives, so a request that fails before any body leaves no file.
//! There is no temp file and no rename: a write that fails midway leaves the
//! partial file in place.

use crate::error::FetchError;
use std::fs::{self, File};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

/// Creates `dir` and any missing parents. Succeeds if it already exists.
pub fn ensure_output_dir(dir: &Path) -> Result<(), FetchError> {
    fs::create_dir_all(dir).map_err(|source| FetchError::Directory {
        path: dir.to_path_buf(),
        source,
    })
}

/// Writes body chunks to `path` as they arrive.
#[derive(Debug)]
pub struct ChunkWriter {
    path: PathBuf,
    file: Option<File>,
    written: u64,
}

impl ChunkWriter {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            file: None,
            written: 0,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn bytes_written(&self) -> u64 {
        self.written
    }

    /// Writes one chunk immediately, opening the destination on first use.
    pub fn write_chunk(&mut self, data: &[u8]) -> io::Result<()> {
        if self.file.is_none() {
            self.file = Some(File::create(&self.path)?);
        }
        if let Some(file) = self.file.as_mut() {
            file.write_all(data)?;
            self.written += data.len() as u64;
        }
        Ok(())
    }

    /// Flushes the file and returns the byte count. An empty body still
    /// produces an (empty) file.
    pub fn finish(mut self) -> io::Result<u64> {
        let file = match self.file.take() {
            Some(f) => f,
            None => File::create(&self.path)?,
        };
        file.sync_all()?;
        Ok(self.written)
    }
}
