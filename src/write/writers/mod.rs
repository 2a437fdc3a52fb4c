//! Serializers for the fixed regions of the output image.
//!
//! Each writer fills a zero-initialized, fixed-size buffer from an
//! [`crate::write::planner::ImageLayout`] and hands it to an [`ImageSink`] in one piece. No
//! writer seeks or revisits bytes written by another; the assembler calls them in file order.
//!
//! # Key Components
//!
//! - [`crate::write::writers::HeaderWriter`] - The 248 byte header block
//! - [`crate::write::writers::SectionHeaderWriter`] - The 40 byte `.text` section record
//! - [`crate::write::writers::write_stub`] - The constant 6 byte machine code preamble
//! - [`crate::write::writers::ImageSink`] - Destination for serialized regions

use crate::Result;

mod header;
mod section;

pub use header::*;
pub use section::*;

/// Size of the combined DOS/PE header block.
pub const HEADER_SIZE: usize = 248;

/// Size of one section header record.
pub const SECTION_HEADER_SIZE: usize = 40;

/// `mov eax, 0; ret`, written verbatim ahead of the bytecode.
pub const STUB_CODE: [u8; 6] = [0xB8, 0x00, 0x00, 0x00, 0x00, 0xC3];

/// Size of [`STUB_CODE`].
pub const STUB_SIZE: usize = STUB_CODE.len();

/// A forward-only destination for image regions.
///
/// Implemented for `Vec<u8>` to assemble images in memory and for
/// [`crate::write::output::Output`] to write them to disk.
pub trait ImageSink {
    /// Appends `data` after everything written so far.
    ///
    /// # Errors
    /// Returns an error if the sink cannot take `data` in full.
    fn write_all(&mut self, data: &[u8]) -> Result<()>;
}

impl ImageSink for Vec<u8> {
    fn write_all(&mut self, data: &[u8]) -> Result<()> {
        self.extend_from_slice(data);
        Ok(())
    }
}

/// Writes [`STUB_CODE`] to `sink`.
///
/// # Errors
/// Propagates the sink's error.
pub fn write_stub<S: ImageSink + ?Sized>(sink: &mut S) -> Result<()> {
    log::trace!("writing {STUB_SIZE} byte stub");
    sink.write_all(&STUB_CODE)
}
