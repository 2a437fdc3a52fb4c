//! Layout planning for the output image.
//!
//! The image is a fixed sequence of four regions: the header block, the section header record,
//! the stub, and the bytecode. Only the bytecode varies in length, so the whole plan is derived
//! from a single input, the decoded byte count.
//!
//! # Aligned Size
//!
//! One rounded value, [`crate::write::planner::ImageLayout::aligned_size`], is written into every
//! size-like header field: size of code, size of image, size of headers, and the section's
//! virtual size, raw size and file pointers. A faithful PE writer would track these separately;
//! this image format reuses the one number everywhere.
//!
//! ```text
//! aligned_size = align_to(code_size + STUB_SIZE, SECTION_ALIGNMENT)
//! ```
//!
//! # Examples
//!
//! ```rust
//! use minibyte::write::planner::ImageLayout;
//!
//! assert_eq!(ImageLayout::plan(0).aligned_size, 0x1000);
//! assert_eq!(ImageLayout::plan(4090).aligned_size, 0x1000);
//! assert_eq!(ImageLayout::plan(4091).aligned_size, 0x2000);
//! assert_eq!(ImageLayout::plan(3).total_size, 297);
//! ```

use crate::write::writers::{HEADER_SIZE, SECTION_HEADER_SIZE, STUB_SIZE};

/// Rounding granularity applied to the derived size fields.
pub const SECTION_ALIGNMENT: u64 = 0x1000;

/// Aligns a value to the specified power-of-two boundary.
///
/// # Arguments
/// * `value` - The value to align
/// * `alignment` - The alignment boundary, must be a power of 2
///
/// # Examples
/// ```rust
/// # use minibyte::write::planner::align_to;
/// assert_eq!(align_to(0, 0x1000), 0);
/// assert_eq!(align_to(1, 0x1000), 0x1000);
/// assert_eq!(align_to(0x1000, 0x1000), 0x1000);
/// ```
pub fn align_to(value: u64, alignment: u64) -> u64 {
    (value + alignment - 1) & !(alignment - 1)
}

/// Every derived quantity of one image.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ImageLayout {
    /// Number of decoded bytecode bytes.
    pub code_size: u64,

    /// `code_size` plus the stub, rounded up to [`SECTION_ALIGNMENT`].
    pub aligned_size: u64,

    /// Exact length of the produced file.
    pub total_size: u64,
}

impl ImageLayout {
    /// Plans the image for `code_size` bytes of bytecode.
    pub fn plan(code_size: u64) -> ImageLayout {
        let aligned_size = align_to(code_size + STUB_SIZE as u64, SECTION_ALIGNMENT);
        let total_size = ImageLayout::bytecode_offset() + code_size;

        log::debug!(
            "planned layout: code_size={code_size:#x} aligned_size={aligned_size:#x} total_size={total_size:#x}"
        );

        ImageLayout {
            code_size,
            aligned_size,
            total_size,
        }
    }

    /// File offset of the section header record.
    pub const fn section_header_offset() -> u64 {
        HEADER_SIZE as u64
    }

    /// File offset of the stub.
    pub const fn stub_offset() -> u64 {
        ImageLayout::section_header_offset() + SECTION_HEADER_SIZE as u64
    }

    /// File offset of the first bytecode byte.
    pub const fn bytecode_offset() -> u64 {
        ImageLayout::stub_offset() + STUB_SIZE as u64
    }
}
