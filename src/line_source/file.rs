//! File-backed line provider that follows a growing log file
//!
//! The whole file is read on open. [`FileLineProvider::refresh`] then re-stats
//! the file and reads only the bytes appended since the last read. Appended
//! data is split up to its last newline; an unterminated tail is held back
//! until its newline arrives. When the file was replaced (rotation), got
//! shorter (truncation) or a partial last line shown since the last full read
//! was extended, appending is not safe and the file is read again from scratch.

use crate::error::{Result, RltableError};
use crate::line_source::validation::validate_file_path;
use crate::line_source::{split_lines, LineCountChange, LineProvider};
use memchr::memrchr;
use parking_lot::RwLock;
use std::fs::{File, Metadata};
use std::io::{Read, Seek, SeekFrom};
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Line provider reading from a file on disk
#[derive(Debug)]
pub struct FileLineProvider {
    path: PathBuf,
    state: RwLock<FileState>,
}

/// Identifies the file behind a path, so a replaced file is told apart from a
/// grown one
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct FileIdentity {
    #[cfg(unix)]
    device: u64,
    #[cfg(unix)]
    inode: u64,
    #[cfg(not(unix))]
    created: Option<std::time::SystemTime>,
}

impl FileIdentity {
    #[cfg(unix)]
    fn of(metadata: &Metadata) -> Self {
        use std::os::unix::fs::MetadataExt;
        Self {
            device: metadata.dev(),
            inode: metadata.ino(),
        }
    }

    #[cfg(not(unix))]
    fn of(metadata: &Metadata) -> Self {
        Self {
            created: metadata.created().ok(),
        }
    }
}

#[derive(Debug)]
struct FileState {
    lines: Vec<Arc<str>>,

    /// Number of bytes already split into `lines`
    read_bytes: u64,

    /// File size at the last read, held-back partial line included
    seen_bytes: u64,

    /// Whether the last entry of `lines` had no newline when it was read
    partial_tail: bool,

    identity: FileIdentity,
}

impl FileState {
    fn load(path: &Path) -> Result<Self> {
        let mut file = File::open(path).map_err(|e| {
            RltableError::file_error(format!("Failed to open file: {}", path.display()), e)
        })?;
        let metadata = file.metadata().map_err(|e| {
            RltableError::file_error(
                format!("Failed to read file metadata: {}", path.display()),
                e,
            )
        })?;
        let mut data = Vec::new();
        file.read_to_end(&mut data).map_err(|e| {
            RltableError::file_error(format!("Failed to read file: {}", path.display()), e)
        })?;

        let (lines, complete) = split_lines(&data);
        Ok(Self {
            lines,
            read_bytes: data.len() as u64,
            seen_bytes: data.len() as u64,
            partial_tail: !complete,
            identity: FileIdentity::of(&metadata),
        })
    }
}

impl FileLineProvider {
    /// Validate `path` and read its current content
    pub fn open(path: &Path) -> Result<Self> {
        validate_file_path(path)?;
        let state = FileState::load(path)?;
        Ok(Self {
            path: path.to_path_buf(),
            state: RwLock::new(state),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Pick up changes made to the file since the last read
    ///
    /// Returns the change events of this batch, in order:
    /// * nothing when the size did not change or no newline was added,
    /// * one append event when complete lines were added at the end,
    /// * `(0, old)` followed by `(new, 0)` when the file had to be read again.
    pub fn refresh(&self) -> Result<Vec<LineCountChange>> {
        let metadata = std::fs::metadata(&self.path).map_err(|e| {
            RltableError::file_error(
                format!("Failed to read file metadata: {}", self.path.display()),
                e,
            )
        })?;
        let file_size = metadata.len();

        let (read_bytes, seen_bytes, partial_tail, identity) = {
            let state = self.state.read();
            (
                state.read_bytes,
                state.seen_bytes,
                state.partial_tail,
                state.identity,
            )
        };

        if FileIdentity::of(&metadata) != identity || file_size < seen_bytes {
            return self.reload();
        }
        if file_size == seen_bytes {
            return Ok(Vec::new());
        }
        if partial_tail {
            return self.reload();
        }

        let appended = self.read_from(read_bytes)?;
        let complete_len = memrchr(b'\n', &appended).map_or(0, |newline| newline + 1);

        let mut state = self.state.write();
        state.seen_bytes = read_bytes + appended.len() as u64;
        if complete_len == 0 {
            return Ok(Vec::new());
        }

        let (new_lines, _) = split_lines(&appended[..complete_len]);
        let old_count = state.lines.len();
        state.lines.extend(new_lines);
        state.read_bytes += complete_len as u64;
        Ok(vec![LineCountChange::new(state.lines.len(), old_count)])
    }

    fn reload(&self) -> Result<Vec<LineCountChange>> {
        let fresh = FileState::load(&self.path)?;
        let mut state = self.state.write();
        let old_count = state.lines.len();
        *state = fresh;
        let new_count = state.lines.len();
        log::debug!(
            "{} was rewritten: {} -> {} lines",
            self.path.display(),
            old_count,
            new_count
        );

        let mut changes = vec![LineCountChange::new(0, old_count)];
        if new_count > 0 {
            changes.push(LineCountChange::new(new_count, 0));
        }
        Ok(changes)
    }

    fn read_from(&self, offset: u64) -> Result<Vec<u8>> {
        let mut file = File::open(&self.path).map_err(|e| {
            RltableError::file_error(format!("Failed to open file: {}", self.path.display()), e)
        })?;
        file.seek(SeekFrom::Start(offset))
            .map_err(|e| RltableError::file_error("Failed to seek in file", e))?;
        let mut buffer = Vec::new();
        file.read_to_end(&mut buffer)
            .map_err(|e| RltableError::file_error("Failed to read appended data", e))?;
        Ok(buffer)
    }
}

impl LineProvider for FileLineProvider {
    fn line_count(&self) -> usize {
        self.state.read().lines.len()
    }

    fn line_at(&self, index: usize) -> Option<Arc<str>> {
        self.state.read().lines.get(index).cloned()
    }
}
