//! File validation utilities for checking a log path before opening it.

use crate::error::{Result, RltableError};
use std::fs::File;
use std::path::Path;

/// Validate that a file path is accessible and suitable for processing
///
/// # Validations Performed
/// - Path exists and is a regular file
/// - File is readable by the current process
///
/// Empty files are accepted: a followed log may not have been written to yet.
pub fn validate_file_path(path: &Path) -> Result<()> {
    if !path.exists() {
        return Err(RltableError::FileNotFound {
            path: path.to_path_buf(),
        });
    }

    let metadata = std::fs::metadata(path)
        .map_err(|e| RltableError::file_error("Failed to read file metadata", e))?;

    if !metadata.is_file() {
        return Err(RltableError::NotAFile {
            path: path.to_path_buf(),
        });
    }

    // Try to open the file to verify read permissions
    File::open(path).map_err(|e| RltableError::file_error("Cannot open file for reading", e))?;

    Ok(())
}
