//! Screen capture file naming
//!
//! Captures go to removable storage when it is mounted, numbered from 1 for
//! the lifetime of the process.

use std::path::{Path, PathBuf};

/// Mount point of the USB drive
pub const DEFAULT_CAPTURE_DIR: &str = "/media";

#[derive(Debug, Clone)]
pub struct CaptureSequence {
    dir: PathBuf,
    next_index: u32,
}

impl CaptureSequence {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into(), next_index: 1 }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Reserve the next capture path, or `None` if the capture directory is absent
    pub fn next_path(&mut self) -> Option<PathBuf> {
        if !self.dir.is_dir() {
            return None;
        }
        let path = self.dir.join(format!("CAPTURE-{:03}.png", self.next_index));
        self.next_index += 1;
        Some(path)
    }
}

impl Default for CaptureSequence {
    fn default() -> Self {
        Self::new(DEFAULT_CAPTURE_DIR)
    }
}
