//! The single `.text` section header record.
//!
//! 40 bytes: the zero-padded name in bytes 0..8, then the aligned size as a little-endian `u32`
//! at each of the virtual size, raw data size, raw data pointer and relocation pointer slots.
//! All four slots carry the same value.

use crate::{
    file::io::{fixed_name, write_field_at},
    write::{
        planner::ImageLayout,
        writers::{ImageSink, SECTION_HEADER_SIZE},
    },
    Result,
};

/// Name of the code section.
pub const TEXT_SECTION_NAME: &str = ".text";

/// Offsets of the `u32` slots that receive the aligned size.
pub const SECTION_SIZE_OFFSETS: [usize; 4] = [
    0x08, // virtual size
    0x14, // size of raw data
    0x18, // pointer to raw data
    0x1C, // pointer to relocations
];

/// Serializes the section header record for one [`ImageLayout`].
pub struct SectionHeaderWriter<'a> {
    layout: &'a ImageLayout,
}

impl<'a> SectionHeaderWriter<'a> {
    /// Creates a writer for `layout`.
    pub fn new(layout: &'a ImageLayout) -> Self {
        Self { layout }
    }

    /// Builds the 40 byte record.
    ///
    /// # Errors
    /// Returns [`crate::Error::OutOfBounds`] if a slot lies outside the record.
    pub fn build(&self) -> Result<[u8; SECTION_HEADER_SIZE]> {
        let mut record = [0u8; SECTION_HEADER_SIZE];
        record[..8].copy_from_slice(&fixed_name::<8>(TEXT_SECTION_NAME));

        for offset in SECTION_SIZE_OFFSETS {
            write_field_at(&mut record, offset, self.layout.aligned_size, 4)?;
        }

        log::trace!(
            "section {TEXT_SECTION_NAME} sized {:#x}",
            self.layout.aligned_size
        );
        Ok(record)
    }

    /// Builds the record and appends it to `sink`.
    ///
    /// # Errors
    /// Returns an error if building fails or the sink rejects the record.
    pub fn write<S: ImageSink + ?Sized>(&self, sink: &mut S) -> Result<()> {
        let record = self.build()?;
        sink.write_all(&record)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn name_is_padded() {
        let layout = ImageLayout::plan(3);
        let record = SectionHeaderWriter::new(&layout).build().unwrap();
        assert_eq!(&record[..8], b".text\0\0\0");
    }

    #[test]
    fn size_slots() {
        let layout = ImageLayout::plan(4091);
        let record = SectionHeaderWriter::new(&layout).build().unwrap();
        for offset in SECTION_SIZE_OFFSETS {
            assert_eq!(&record[offset..offset + 4], &[0x00, 0x20, 0x00, 0x00]);
        }
    }

    #[test]
    fn zero_elsewhere() {
        let layout = ImageLayout::plan(0);
        let record = SectionHeaderWriter::new(&layout).build().unwrap();
        let mut expected = [0u8; SECTION_HEADER_SIZE];
        expected[..5].copy_from_slice(b".text");
        for offset in SECTION_SIZE_OFFSETS {
            expected[offset + 1] = 0x10;
        }
        assert_eq!(record, expected);
    }

    #[test]
    fn write_appends_record() {
        let layout = ImageLayout::plan(0);
        let mut sink = Vec::new();
        SectionHeaderWriter::new(&layout).write(&mut sink).unwrap();
        assert_eq!(sink.len(), SECTION_HEADER_SIZE);
    }
}
