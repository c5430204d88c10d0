//! Uploaded-audio persistence
//!
//! Enforces the upload size limit and writes accepted buffers verbatim into
//! the audio folder under their original filename. A same-named file is
//! silently overwritten.

use std::path::{Path, PathBuf};
use stressd_common::Result;
use tracing::{info, warn};

/// Outcome of a store attempt: either the written path or a named rejection
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreOutcome {
    /// Buffer written; holds the storage path
    Stored(PathBuf),
    /// Buffer exceeded the size limit; nothing was written
    TooLarge { size: u64, limit: u64 },
}

/// Audio file store with a size guard
pub struct AudioStore {
    folder: PathBuf,
    max_bytes: u64,
}

impl AudioStore {
    pub fn new<P: AsRef<Path>>(folder: P, max_bytes: u64) -> Self {
        Self {
            folder: folder.as_ref().to_path_buf(),
            max_bytes,
        }
    }

    pub fn max_bytes(&self) -> u64 {
        self.max_bytes
    }

    /// Persist an uploaded buffer under its original filename.
    ///
    /// The size check runs before any filesystem access; an oversized buffer
    /// is reported through [`StoreOutcome::TooLarge`] without a write.
    pub fn save(&self, filename: &str, bytes: &[u8]) -> Result<StoreOutcome> {
        let size = bytes.len() as u64;
        if size > self.max_bytes {
            warn!(
                filename = %filename,
                size,
                limit = self.max_bytes,
                "Rejecting oversized upload"
            );
            return Ok(StoreOutcome::TooLarge {
                size,
                limit: self.max_bytes,
            });
        }

        std::fs::create_dir_all(&self.folder)?;
        let path = self.folder.join(filename);
        std::fs::write(&path, bytes)?;
        info!(filename = %filename, size, path = %path.display(), "Stored upload");
        Ok(StoreOutcome::Stored(path))
    }
}
