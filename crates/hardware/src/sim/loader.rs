//! Image loader.
//!
//! This module places executable images into the memory window before simulation starts. It performs:
//! 1. **Binary loading:** Reads a raw image file from disk into a byte buffer.
//! 2. **Placement:** Copies the buffer into memory at a caller-chosen offset.
//!
//! Images carry no header; the bytes are copied verbatim. A failed load leaves
//! memory untouched, so a window that was erased stays erased.

use std::fs;
use std::path::Path;

use tracing::info;

use crate::common::BusAddr;
use crate::common::error::LoadError;
use crate::soc::Memory;

/// Loads a binary file from disk into a byte vector.
///
/// # Errors
///
/// Returns `LoadError::Io` if the file cannot be opened or read.
pub fn load_binary(path: &Path) -> Result<Vec<u8>, LoadError> {
    fs::read(path).map_err(|source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    })
}

/// Reads the file at `path` into `memory` starting at `offset`.
///
/// # Arguments
///
/// * `memory` - Destination window.
/// * `path` - Image file.
/// * `offset` - Address of the first image byte.
///
/// # Returns
///
/// The number of bytes loaded.
///
/// # Errors
///
/// `LoadError::Io` if the file cannot be read, `LoadError::Overflow` if it does
/// not fit between `offset` and the end of the window. Memory is unchanged in both cases.
pub fn load_image(
    memory: &mut Memory,
    path: impl AsRef<Path>,
    offset: BusAddr,
) -> Result<usize, LoadError> {
    let path = path.as_ref();
    let data = load_binary(path)?;
    memory.load(offset, &data)?;
    info!(
        path = %path.display(),
        offset = %offset,
        len = data.len(),
        "image loaded"
    );
    Ok(data.len())
}
