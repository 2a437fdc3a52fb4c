//! Image assembly from decoded bytecode.
//!
//! This module ties the pipeline together: decoded [`crate::hex::ByteCode`] is planned into an
//! [`crate::write::planner::ImageLayout`], and the writers serialize the four regions of the image
//! in a fixed order.
//!
//! # Architecture
//!
//! ```text
//! offset 0      header block            248 bytes   HeaderWriter
//! offset 248    section header record    40 bytes   SectionHeaderWriter
//! offset 288    stub                      6 bytes   write_stub
//! offset 294    bytecode           code_size bytes
//! ```
//!
//! Data flows strictly forward; no region is read back or patched after it is written.
//!
//! # Key Components
//!
//! - [`crate::write::assemble`] - Builds the image in memory
//! - [`crate::write::assemble_file`] - Decodes a listing file and writes the image to disk
//! - [`crate::write::write_image`] - Writes an image into any [`crate::write::writers::ImageSink`]
//! - [`crate::write::planner`] - Layout computation
//! - [`crate::write::writers`] - Region serializers
//! - [`crate::write::output`] - Memory-mapped output file
//!
//! # Usage Examples
//!
//! ```rust
//! use minibyte::{hex::ByteCode, write::assemble};
//!
//! let code = ByteCode::decode(b"4D 5A C3")?;
//! let image = assemble(&code)?;
//! assert_eq!(image.len(), 297);
//! assert_eq!(&image[..2], b"MZ");
//! assert_eq!(&image[294..], &[0x4D, 0x5A, 0xC3]);
//! # Ok::<(), minibyte::Error>(())
//! ```

use std::path::Path;

use crate::{hex::ByteCode, Result};

pub mod output;
pub mod planner;
pub mod writers;

use output::Output;
use planner::ImageLayout;
use writers::{write_stub, HeaderWriter, ImageSink, SectionHeaderWriter};

/// Writes the complete image for `code` into `sink`.
///
/// Regions are emitted as header block, section header record, stub, then bytecode.
///
/// # Errors
/// Propagates serializer and sink errors; whatever was written before the failure stays in
/// the sink.
pub fn write_image<S: ImageSink + ?Sized>(code: &ByteCode, sink: &mut S) -> Result<ImageLayout> {
    let layout = ImageLayout::plan(code.len() as u64);

    HeaderWriter::new(&layout).write(sink)?;
    SectionHeaderWriter::new(&layout).write(sink)?;
    write_stub(sink)?;
    sink.write_all(code.as_slice())?;

    Ok(layout)
}

/// Builds the complete image for `code` in memory.
///
/// # Errors
/// Returns [`crate::Error::OutOfBounds`] only if the header tables are inconsistent.
pub fn assemble(code: &ByteCode) -> Result<Vec<u8>> {
    let mut image = Vec::with_capacity(ImageLayout::plan(code.len() as u64).total_size as usize);
    write_image(code, &mut image)?;
    Ok(image)
}

/// Decodes the listing at `input` and writes the image to `output`.
///
/// The input is decoded in full before `output` is touched, so a decode failure never creates
/// the output file. Once the output has been opened there is no rollback.
///
/// # Errors
/// - [`crate::Error::InputOpen`] if `input` cannot be read
/// - [`crate::Error::HexParse`] if the listing does not decode
/// - [`crate::Error::OutputOpen`] if `output` cannot be created
/// - [`crate::Error::WriteFailed`] if writing or flushing the output fails
pub fn assemble_file(input: &Path, output: &Path) -> Result<ImageLayout> {
    let code = ByteCode::from_file(input)?;
    let size = ImageLayout::plan(code.len() as u64).total_size;

    let mut sink = Output::create(output, size)?;
    let layout = write_image(&code, &mut sink)?;
    sink.finalize()?;

    log::debug!(
        "wrote {} bytes to {}",
        layout.total_size,
        output.display()
    );
    Ok(layout)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Error;
    use tempfile::tempdir;

    #[test]
    fn region_order() {
        let code = ByteCode::from(vec![0x4D, 0x5A, 0xC3]);
        let image = assemble(&code).unwrap();

        assert_eq!(image.len(), 297);
        assert_eq!(&image[..2], b"MZ");
        assert_eq!(&image[0x3C..0x40], &[0x50, 0x45, 0x00, 0x00]);
        assert_eq!(&image[248..253], b".text");
        assert_eq!(&image[288..294], &writers::STUB_CODE);
        assert_eq!(&image[294..], &[0x4D, 0x5A, 0xC3]);
    }

    #[test]
    fn empty_code() {
        let image = assemble(&ByteCode::default()).unwrap();
        assert_eq!(image.len(), 294);
        assert_eq!(&image[248 + 0x08..248 + 0x0C], &[0x00, 0x10, 0x00, 0x00]);
        assert_eq!(&image[288..], &writers::STUB_CODE);
    }

    #[test]
    fn write_image_reports_layout() {
        let mut sink = Vec::new();
        let layout = write_image(&ByteCode::from(vec![0; 4091]), &mut sink).unwrap();
        assert_eq!(layout.aligned_size, 0x2000);
        assert_eq!(layout.total_size, sink.len() as u64);
    }

    #[test]
    fn file_matches_memory() {
        let temp_dir = tempdir().unwrap();
        let input = temp_dir.path().join("code.hex");
        let output = temp_dir.path().join("code.exe");
        std::fs::write(&input, "B8 2A 00 00 00 C3").unwrap();

        let layout = assemble_file(&input, &output).unwrap();
        let written = std::fs::read(&output).unwrap();

        let expected = assemble(&ByteCode::from(vec![0xB8, 0x2A, 0x00, 0x00, 0x00, 0xC3])).unwrap();
        assert_eq!(written, expected);
        assert_eq!(layout.total_size, 300);
    }

    #[test]
    fn decode_failure_creates_no_output() {
        let temp_dir = tempdir().unwrap();
        let input = temp_dir.path().join("bad.hex");
        let output = temp_dir.path().join("bad.exe");
        std::fs::write(&input, "4D5AG3").unwrap();

        assert!(matches!(
            assemble_file(&input, &output),
            Err(Error::HexParse { .. })
        ));
        assert!(!output.exists());
    }

    #[test]
    fn missing_input_creates_no_output() {
        let temp_dir = tempdir().unwrap();
        let output = temp_dir.path().join("out.exe");

        assert!(matches!(
            assemble_file(&temp_dir.path().join("none.hex"), &output),
            Err(Error::InputOpen { .. })
        ));
        assert!(!output.exists());
    }
}
