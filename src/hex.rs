//! Decoding of textual hex listings into raw bytecode.
//!
//! The input is read as a sequence of three character windows: two hex digits followed by one
//! separator that is never inspected. `"4D 5A C3"` and `"4D,5A,C3\n"` both decode to
//! `[0x4D, 0x5A, 0xC3]`. The step is always three, so an unseparated listing such as `"4D5AC3"`
//! decodes as the windows `"4D5"` and `"AC3"`, giving `[0x4D, 0xAC]`.
//!
//! # Error Policy
//!
//! The first window whose leading two characters are not both hex digits aborts decoding with
//! [`crate::Error::HexParse`]. A trailing window holding fewer than two characters is treated
//! the same way. No partial result is returned.
//!
//! # Examples
//!
//! ```rust
//! use minibyte::hex::ByteCode;
//!
//! let code = ByteCode::decode(b"4D 5A C3")?;
//! assert_eq!(code.as_slice(), &[0x4D, 0x5A, 0xC3]);
//!
//! assert!(ByteCode::decode(b"4D 5A G3").is_err());
//! # Ok::<(), minibyte::Error>(())
//! ```

use std::path::Path;

use crate::{Error, Result};

/// Characters consumed per decoded byte: two digits and one ignored separator.
pub const WINDOW_SIZE: usize = 3;

/// Number of hex digits read from the start of each window.
pub const DIGITS_PER_BYTE: usize = 2;

/// The decoded payload, in input order.
///
/// Immutable once produced; its length is the `codeSize` every layout computation is based on.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ByteCode {
    bytes: Vec<u8>,
}

impl ByteCode {
    /// Decodes a hex listing.
    ///
    /// # Arguments
    ///
    /// * `text` - The raw listing; any byte sequence is accepted, only hex digit positions
    ///   are validated
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::HexParse`] for the first window that does not start with two
    /// hex digits.
    pub fn decode(text: &[u8]) -> Result<ByteCode> {
        let mut bytes = Vec::with_capacity(text.len().div_ceil(WINDOW_SIZE));

        for (index, window) in text.chunks(WINDOW_SIZE).enumerate() {
            let digits = &window[..window.len().min(DIGITS_PER_BYTE)];
            let byte = parse_byte(digits).ok_or_else(|| Error::HexParse {
                offset: index * WINDOW_SIZE,
                token: String::from_utf8_lossy(digits).into_owned(),
            })?;
            bytes.push(byte);
        }

        log::debug!("decoded {} bytes from {} characters", bytes.len(), text.len());
        Ok(ByteCode { bytes })
    }

    /// Reads and decodes the listing stored at `path`.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::InputOpen`] if the file cannot be read, or
    /// [`crate::Error::HexParse`] if its content does not decode.
    pub fn from_file(path: &Path) -> Result<ByteCode> {
        let text = std::fs::read(path).map_err(|source| Error::InputOpen {
            path: path.to_path_buf(),
            source,
        })?;

        ByteCode::decode(&text)
    }

    /// Number of decoded bytes.
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    /// Returns `true` if nothing was decoded.
    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// The decoded bytes.
    pub fn as_slice(&self) -> &[u8] {
        &self.bytes
    }
}

impl From<Vec<u8>> for ByteCode {
    fn from(bytes: Vec<u8>) -> Self {
        ByteCode { bytes }
    }
}

impl AsRef<[u8]> for ByteCode {
    fn as_ref(&self) -> &[u8] {
        &self.bytes
    }
}

// `u8::from_str_radix` would also take a leading '+', so both digits are checked first.
fn parse_byte(digits: &[u8]) -> Option<u8> {
    match digits {
        [high, low] => Some((hex_value(*high)? << 4) | hex_value(*low)?),
        _ => None,
    }
}

fn hex_value(digit: u8) -> Option<u8> {
    (digit as char).to_digit(16).map(|value| value as u8)
}
