//! The combined DOS/PE header block.
//!
//! The block is 248 bytes, zero everywhere except for the fields listed in [`HeaderField`].
//! It is a deliberately simplified layout that merges a DOS prefix with PE header fields at
//! overlapping offsets, not a loadable PE header. Most fields are single-byte slots that keep
//! only the low byte of their nominal value:
//!
//! | Offset | Width | Field | Stored |
//! |---|---|---|---|
//! | 0x00 | 2 | DOS signature | `4D 5A` (`"MZ"`) |
//! | 0x3C | 4 | header size, then PE signature | `50 45 00 00` |
//! | 0x04 | 1 | machine (`0x14C`) | `4C` |
//! | 0x06 | 1 | number of sections | `01` |
//! | 0x14 | 1 | size of optional header | `10` |
//! | 0x16 | 1 | characteristics (`0x10B`) | `0B` |
//! | 0x18 | 1 | optional header magic (`0x10B`) | `0B` |
//! | 0x20 | 1 | size of code | low byte of aligned size |
//! | 0x30 | 1 | image base (`0x10000000`) | `00` |
//! | 0x58 | 1 | size of image | low byte of aligned size |
//! | 0x5C | 1 | size of headers | low byte of aligned size |

use goblin::pe::{
    header::{COFF_MACHINE_X86, DOS_MAGIC, PE_MAGIC},
    optional_header::MAGIC_32,
};
use strum::{Display, EnumIter, IntoEnumIterator};

use crate::{
    file::io::write_field_at,
    write::{
        planner::ImageLayout,
        writers::{ImageSink, HEADER_SIZE},
    },
    Result,
};

/// Offset of the slot shared by the header size and the PE signature.
pub const PE_SIGNATURE_OFFSET: usize = 0x3C;

/// Preferred load address; only its low byte reaches the image.
pub const IMAGE_BASE: u64 = 0x1000_0000;

/// Number of sections declared by the header.
pub const NUMBER_OF_SECTIONS: u64 = 1;

/// Declared size of the optional header.
pub const SIZE_OF_OPTIONAL_HEADER: u64 = 0x10;

/// Every field written into the header block, in write order.
///
/// [`HeaderField::HeaderSize`] and [`HeaderField::PeSignature`] share offset 0x3C; the signature
/// is written second and is what remains in the image.
#[derive(Clone, Copy, PartialEq, Eq, Debug, EnumIter, Display)]
#[strum(serialize_all = "snake_case")]
pub enum HeaderField {
    /// `"MZ"` at the start of the file.
    DosSignature,
    /// Size of the header block, overwritten by [`HeaderField::PeSignature`].
    HeaderSize,
    /// `"PE\0\0"`.
    PeSignature,
    /// i386 machine type.
    Machine,
    /// Section count.
    NumberOfSections,
    /// Size of the optional header.
    SizeOfOptionalHeader,
    /// File characteristics marker.
    Characteristics,
    /// PE32 optional header magic.
    OptionalHeaderMagic,
    /// Size of code, taken from the aligned size.
    SizeOfCode,
    /// Preferred load address.
    ImageBase,
    /// Size of image, taken from the aligned size.
    SizeOfImage,
    /// Size of headers, taken from the aligned size.
    SizeOfHeaders,
}

impl HeaderField {
    /// Byte offset of the field within the header block.
    pub const fn offset(self) -> usize {
        match self {
            HeaderField::DosSignature => 0x00,
            HeaderField::HeaderSize | HeaderField::PeSignature => PE_SIGNATURE_OFFSET,
            HeaderField::Machine => 0x04,
            HeaderField::NumberOfSections => 0x06,
            HeaderField::SizeOfOptionalHeader => 0x14,
            HeaderField::Characteristics => 0x16,
            HeaderField::OptionalHeaderMagic => 0x18,
            HeaderField::SizeOfCode => 0x20,
            HeaderField::ImageBase => 0x30,
            HeaderField::SizeOfImage => 0x58,
            HeaderField::SizeOfHeaders => 0x5C,
        }
    }

    /// Number of bytes the field occupies; narrower than the value means truncation.
    pub const fn width(self) -> usize {
        match self {
            HeaderField::DosSignature => 2,
            HeaderField::HeaderSize | HeaderField::PeSignature => 4,
            _ => 1,
        }
    }

    /// The nominal (untruncated) value of the field for `layout`.
    pub fn value(self, layout: &ImageLayout) -> u64 {
        match self {
            HeaderField::DosSignature => u64::from(DOS_MAGIC),
            HeaderField::HeaderSize => HEADER_SIZE as u64,
            HeaderField::PeSignature => u64::from(PE_MAGIC),
            HeaderField::Machine => u64::from(COFF_MACHINE_X86),
            HeaderField::NumberOfSections => NUMBER_OF_SECTIONS,
            HeaderField::SizeOfOptionalHeader => SIZE_OF_OPTIONAL_HEADER,
            HeaderField::Characteristics | HeaderField::OptionalHeaderMagic => {
                u64::from(MAGIC_32)
            }
            HeaderField::ImageBase => IMAGE_BASE,
            HeaderField::SizeOfCode | HeaderField::SizeOfImage | HeaderField::SizeOfHeaders => {
                layout.aligned_size
            }
        }
    }
}

/// Serializes the header block for one [`ImageLayout`].
pub struct HeaderWriter<'a> {
    layout: &'a ImageLayout,
}

impl<'a> HeaderWriter<'a> {
    /// Creates a writer for `layout`.
    pub fn new(layout: &'a ImageLayout) -> Self {
        Self { layout }
    }

    /// Builds the 248 byte block.
    ///
    /// # Errors
    /// Returns [`crate::Error::OutOfBounds`] if a field lies outside the block.
    pub fn build(&self) -> Result<[u8; HEADER_SIZE]> {
        let mut block = [0u8; HEADER_SIZE];

        for field in HeaderField::iter() {
            let value = field.value(self.layout);
            log::trace!(
                "header {field} @ {:#04x} (width {}) = {value:#x}",
                field.offset(),
                field.width()
            );
            write_field_at(&mut block, field.offset(), value, field.width())?;
        }

        Ok(block)
    }

    /// Builds the block and appends it to `sink`.
    ///
    /// # Errors
    /// Returns an error if building fails or the sink rejects the block.
    pub fn write<S: ImageSink + ?Sized>(&self, sink: &mut S) -> Result<()> {
        let block = self.build()?;
        sink.write_all(&block)
    }
}
