//! Integration tests for the byte layout of assembled images.
//!
//! These tests check the produced image against the fixed offset table and the
//! end-to-end properties of the hex-to-image pipeline.

use minibyte::prelude::*;

fn image_for(text: &str) -> Vec<u8> {
    let code = ByteCode::decode(text.as_bytes()).unwrap();
    assemble(&code).unwrap()
}

fn read_u32(image: &[u8], offset: usize) -> u32 {
    u32::from_le_bytes(image[offset..offset + 4].try_into().unwrap())
}

#[test]
fn end_to_end_three_bytes() {
    let image = image_for("4D 5A C3");

    assert_eq!(image.len(), 248 + 40 + 6 + 3);
    assert_eq!(image[0], b'M');
    assert_eq!(image[1], b'Z');
    assert_eq!(&image[0x3C..0x40], &[0x50, 0x45, 0x00, 0x00]);
    assert_eq!(&image[image.len() - 3..], &[0x4D, 0x5A, 0xC3]);
}

#[test]
fn header_offset_table() {
    let image = image_for("4D 5A C3");

    let expected: &[(usize, u8)] = &[
        (0x00, b'M'),
        (0x01, b'Z'),
        (0x04, 0x4C),
        (0x06, 0x01),
        (0x14, 0x10),
        (0x16, 0x0B),
        (0x18, 0x0B),
        (0x20, 0x00),
        (0x30, 0x00),
        (0x3C, 0x50),
        (0x3D, 0x45),
        (0x58, 0x00),
        (0x5C, 0x00),
    ];
    for &(offset, byte) in expected {
        assert_eq!(image[offset], byte, "header byte at {offset:#04x}");
    }

    let marked: Vec<usize> = expected.iter().map(|&(offset, _)| offset).collect();
    for offset in 0..HEADER_SIZE {
        if !marked.contains(&offset) {
            assert_eq!(image[offset], 0, "header byte at {offset:#04x}");
        }
    }
}

#[test]
fn section_header_record() {
    let image = image_for("4D 5A C3");
    let section = &image[HEADER_SIZE..HEADER_SIZE + SECTION_HEADER_SIZE];

    assert_eq!(&section[..8], b".text\0\0\0");
    for offset in [0x08, 0x14, 0x18, 0x1C] {
        assert_eq!(read_u32(section, offset), 0x1000);
    }
}

#[test]
fn stub_precedes_bytecode() {
    let image = image_for("90 90");
    let stub_offset = HEADER_SIZE + SECTION_HEADER_SIZE;

    assert_eq!(&image[stub_offset..stub_offset + 6], &STUB_CODE);
    assert_eq!(&image[stub_offset + 6..], &[0x90, 0x90]);
}

#[test]
fn empty_listing() {
    let code = ByteCode::decode(b"").unwrap();
    assert!(code.is_empty());

    let layout = ImageLayout::plan(code.len() as u64);
    assert_eq!(layout.aligned_size, 0x1000);

    let image = assemble(&code).unwrap();
    assert_eq!(image.len(), 294);
}

#[test]
fn aligned_size_crosses_page() {
    let listing: String = "00 ".repeat(4091);
    let image = image_for(&listing);
    let section = &image[HEADER_SIZE..HEADER_SIZE + SECTION_HEADER_SIZE];

    assert_eq!(read_u32(section, 0x08), 0x2000);
    assert_eq!(image.len(), 294 + 4091);
}

#[test]
fn decoded_bytes_match_listing() {
    let values: Vec<u8> = (0..600u32).map(|i| (i * 37 % 256) as u8).collect();
    let listing: String = values.iter().map(|b| format!("{b:02x} ")).collect();

    let code = ByteCode::decode(listing.as_bytes()).unwrap();
    assert_eq!(code.as_slice(), values.as_slice());
}

#[test]
fn deterministic() {
    assert_eq!(image_for("B8 01 00 00 00 C3"), image_for("B8 01 00 00 00 C3"));
}
