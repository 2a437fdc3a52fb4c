//! Offset-indexed field writes into fixed-size header buffers.
//!
//! Header blocks in this crate are flat, zero-initialized byte arrays whose fields live at
//! fixed numeric offsets. Rather than indexing the arrays ad hoc, every field goes through
//! [`crate::file::io::write_field_at`], which stores the low `width` bytes of a value in
//! little-endian order and bounds-checks the destination.
//!
//! # Truncation
//!
//! A width smaller than the value's natural size keeps only the low-order bytes. Writing
//! `0x10B` with a width of one stores `0x0B`; this is how single-byte marker slots are filled.
//!
//! # Examples
//!
//! ```rust
//! use minibyte::file::io::write_field_at;
//!
//! let mut header = [0u8; 8];
//! write_field_at(&mut header, 0, 0x4550, 4)?;
//! write_field_at(&mut header, 4, 0x10B, 1)?;
//! assert_eq!(header, [0x50, 0x45, 0x00, 0x00, 0x0B, 0x00, 0x00, 0x00]);
//! # Ok::<(), minibyte::Error>(())
//! ```

use crate::Result;

/// Writes the low `width` bytes of `value` into `buffer` at `offset`, little-endian.
///
/// # Arguments
///
/// * `buffer` - The buffer holding the field
/// * `offset` - Byte offset of the first byte of the field
/// * `value` - The value to store, truncated to `width` bytes
/// * `width` - Field width in bytes, at most 8
///
/// # Errors
///
/// Returns [`crate::Error::OutOfBounds`] if the field does not fit in `buffer` or `width`
/// exceeds eight bytes.
pub fn write_field_at(buffer: &mut [u8], offset: usize, value: u64, width: usize) -> Result<()> {
    if width > std::mem::size_of::<u64>() {
        return Err(out_of_bounds_error!());
    }

    let Some(end) = offset.checked_add(width) else {
        return Err(out_of_bounds_error!());
    };
    if end > buffer.len() {
        return Err(out_of_bounds_error!());
    }

    buffer[offset..end].copy_from_slice(&value.to_le_bytes()[..width]);
    Ok(())
}

/// Copies `text` into a zero-padded fixed-size name field.
///
/// Names longer than `N` bytes are cut at `N`.
pub fn fixed_name<const N: usize>(text: &str) -> [u8; N] {
    let mut name = [0u8; N];
    let bytes = text.as_bytes();
    let len = bytes.len().min(N);
    name[..len].copy_from_slice(&bytes[..len]);
    name
}
