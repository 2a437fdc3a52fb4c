//! Memory-mapped output file.
//!
//! The final image size is known before anything is written, so the target file is created at
//! that size, mapped, and filled front to back through [`crate::write::writers::ImageSink`].
//!
//! # No Rollback
//!
//! The file is created directly at its target path. If a run fails after
//! [`crate::write::output::Output::create`] succeeded, the file stays on disk with whatever had
//! been copied into it; the unwritten tail reads as zeros. Dropping an unfinalized output
//! flushes it but never removes it.
//!
//! # Usage Examples
//!
//! ```rust,no_run
//! use minibyte::write::{output::Output, writers::ImageSink};
//!
//! let mut output = Output::create("out.exe", 4)?;
//! output.write_all(b"MZ")?;
//! output.write_all(&[0x90, 0xC3])?;
//! output.finalize()?;
//! # Ok::<(), minibyte::Error>(())
//! ```

use std::path::{Path, PathBuf};

use memmap2::{MmapMut, MmapOptions};

use crate::{write::writers::ImageSink, Error, Result};

/// A memory-mapped output file written sequentially.
pub struct Output {
    /// The memory mapping of the target file
    mmap: MmapMut,

    /// The target path
    target_path: PathBuf,

    /// Offset of the next byte to write
    position: usize,

    /// Whether the file has been finalized
    finalized: bool,
}

impl Output {
    /// Creates (or truncates) `target_path` at `size` bytes and maps it for writing.
    ///
    /// # Arguments
    ///
    /// * `target_path` - The path where the file should be created
    /// * `size` - The total size of the file to create, must be non-zero
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::OutputOpen`] if the file cannot be created, sized, or mapped.
    pub fn create<P: AsRef<Path>>(target_path: P, size: u64) -> Result<Self> {
        let target_path = target_path.as_ref().to_path_buf();
        let open_error = |source| Error::OutputOpen {
            path: target_path.clone(),
            source,
        };

        let file = std::fs::OpenOptions::new()
            .read(true)
            .write(true)
            .create(true)
            .truncate(true)
            .open(&target_path)
            .map_err(open_error)?;

        file.set_len(size).map_err(open_error)?;

        let mmap = unsafe { MmapOptions::new().map_mut(&file) }.map_err(open_error)?;

        log::debug!("mapped {} ({size} bytes)", target_path.display());
        Ok(Self {
            mmap,
            target_path,
            position: 0,
            finalized: false,
        })
    }

    /// Gets the total size of the file.
    pub fn size(&self) -> u64 {
        self.mmap.len() as u64
    }

    /// Number of bytes written so far.
    pub fn position(&self) -> u64 {
        self.position as u64
    }

    /// Gets the target path of the file.
    pub fn target_path(&self) -> &Path {
        &self.target_path
    }

    /// Flushes any pending writes to disk.
    ///
    /// # Errors
    /// Returns [`crate::Error::WriteFailed`] if the flush operation fails.
    pub fn flush(&mut self) -> Result<()> {
        self.mmap.flush().map_err(|e| Error::WriteFailed {
            message: format!("Failed to flush memory mapping: {e}"),
        })
    }

    /// Flushes the mapping and marks the file complete.
    ///
    /// # Errors
    /// Returns [`crate::Error::WriteFailed`] if fewer bytes were written than the file holds,
    /// or if the flush fails.
    pub fn finalize(mut self) -> Result<()> {
        if self.position != self.mmap.len() {
            return Err(Error::WriteFailed {
                message: format!(
                    "Output incomplete: wrote {} of {} bytes",
                    self.position,
                    self.mmap.len()
                ),
            });
        }

        self.flush()?;
        self.finalized = true;
        Ok(())
    }
}

impl ImageSink for Output {
    fn write_all(&mut self, data: &[u8]) -> Result<()> {
        let end = self.position + data.len();
        if end > self.mmap.len() {
            return Err(Error::WriteFailed {
                message: format!(
                    "Write would exceed file size: offset={}, len={}, file_size={}",
                    self.position,
                    data.len(),
                    self.mmap.len()
                ),
            });
        }

        self.mmap[self.position..end].copy_from_slice(data);
        self.position = end;
        Ok(())
    }
}

impl Drop for Output {
    fn drop(&mut self) {
        if !self.finalized {
            // Partial output is left in place.
            let _ = self.flush();
        }
    }
}
