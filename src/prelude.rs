//! # minibyte Prelude
//!
//! The types and functions needed to decode a listing and assemble an image.

/// The main error type for all minibyte operations
pub use crate::Error;

/// The result type used throughout minibyte
pub use crate::Result;

/// Decoded bytecode
pub use crate::hex::ByteCode;

/// Assembly entry points
pub use crate::write::{assemble, assemble_file, write_image};

/// Layout computation
pub use crate::write::planner::{align_to, ImageLayout, SECTION_ALIGNMENT};

/// Region serializers and their fixed sizes
pub use crate::write::writers::{
    HeaderField, HeaderWriter, ImageSink, SectionHeaderWriter, HEADER_SIZE, SECTION_HEADER_SIZE,
    STUB_CODE,
};

/// Memory-mapped output file
pub use crate::write::output::Output;
