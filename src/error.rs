use std::path::PathBuf;

use thiserror::Error;

macro_rules! out_of_bounds_error {
    () => {
        crate::Error::OutOfBounds {
            file: file!(),
            line: line!(),
        }
    };
}

/// The generic Error type, which provides coverage for all errors this library can potentially
/// return.
///
/// Every variant is terminal for a run: nothing is retried and no partially written output is
/// rolled back. The command line front end reports the [`std::fmt::Display`] form of the error
/// as a single line and exits with status 1.
///
/// # Error Categories
///
/// ## Input Errors
/// - [`Error::InputOpen`] - The hex listing could not be read
/// - [`Error::HexParse`] - A byte window did not hold two hex digits
///
/// ## Output Errors
/// - [`Error::OutputOpen`] - The target file could not be created or mapped
/// - [`Error::WriteFailed`] - Writing or flushing the mapped output failed
/// - [`Error::OutOfBounds`] - A field write fell outside its buffer
///
/// # Examples
///
/// ```rust,no_run
/// use minibyte::{Error, hex::ByteCode};
/// use std::path::Path;
///
/// match ByteCode::from_file(Path::new("program.hex")) {
///     Ok(code) => println!("Decoded {} bytes", code.len()),
///     Err(Error::HexParse { offset, token }) => {
///         eprintln!("Bad hex token {token:?} at offset {offset}");
///     }
///     Err(e) => eprintln!("Other error: {e}"),
/// }
/// ```
#[derive(Error, Debug)]
pub enum Error {
    /// The input file could not be opened or read.
    #[error("Error opening input file '{}': {source}", .path.display())]
    InputOpen {
        /// The path that was requested
        path: PathBuf,
        /// The underlying I/O failure
        source: std::io::Error,
    },

    /// A three character window of the input did not start with exactly two hex digits.
    ///
    /// Decoding stops at the first bad window, no bytes decoded before it are kept.
    ///
    /// # Fields
    ///
    /// * `offset` - Byte offset of the window within the input text
    /// * `token` - The (at most two) characters that failed to parse
    #[error("Error parsing hex code at offset {offset}: {token:?}")]
    HexParse {
        /// Byte offset of the failing window
        offset: usize,
        /// The offending characters, lossily decoded
        token: String,
    },

    /// The output file could not be created, sized, or memory-mapped.
    #[error("Error opening output file '{}': {source}", .path.display())]
    OutputOpen {
        /// The path that was requested
        path: PathBuf,
        /// The underlying I/O failure
        source: std::io::Error,
    },

    /// Writing to the opened output failed.
    ///
    /// Whatever was written before the failure stays on disk.
    #[error("Failed to write output - {message}")]
    WriteFailed {
        /// Description of the failed operation
        message: String,
    },

    /// A field write would have landed outside of its buffer.
    ///
    /// The fixed offset tables never produce this; it guards [`crate::file::io::write_field_at`]
    /// against direct misuse.
    #[error("Out of Bound write would have occurred! - {file}:{line}")]
    OutOfBounds {
        /// The source file in which this error occured
        file: &'static str,
        /// The source line in which this error occured
        line: u32,
    },
}
