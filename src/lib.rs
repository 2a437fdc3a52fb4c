// Copyright 2025 Johann Kempter
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.
//
// SPDX-License-Identifier: Apache-2.0

#![doc(html_no_source)]
#![deny(missing_docs)]

//! # minibyte
//!
//! Turns a textual hex byte listing into a minimal, PE-shaped binary image.
//!
//! The listing is decoded into raw bytecode, and the output file is laid out from a fixed
//! template: a 248 byte DOS/PE style header block, one 40 byte `.text` section header, a six
//! byte `mov eax, 0; ret` stub, and finally the decoded bytes. The image follows the shape of a
//! 32-bit Windows executable but is not meant to be loadable; there are no imports,
//! relocations, or data directories.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use minibyte::prelude::*;
//! use std::path::Path;
//!
//! let layout = assemble_file(Path::new("program.hex"), Path::new("program.exe"))?;
//! println!("Wrote {} bytes", layout.total_size);
//! # Ok::<(), minibyte::Error>(())
//! ```
//!
//! ### In Memory
//!
//! ```rust
//! use minibyte::{hex::ByteCode, write::assemble};
//!
//! let code = ByteCode::decode(b"90 90 C3")?;
//! let image = assemble(&code)?;
//! assert_eq!(&image[image.len() - 3..], &[0x90, 0x90, 0xC3]);
//! # Ok::<(), minibyte::Error>(())
//! ```
//!
//! ## Architecture
//!
//! - [`hex`] - Hex listing decoding into [`hex::ByteCode`]
//! - [`write::planner`] - Derived sizes and region offsets
//! - [`write::writers`] - Header block, section header and stub serializers
//! - [`write::output`] - Memory-mapped output file
//! - [`write`] - The assembly pipeline
//! - [`Error`] and [`Result`] - Error handling
//!
//! ## Error Handling
//!
//! Every failure is terminal. Decoding stops at the first malformed byte window, and an output
//! file that was already opened is left as-is when a later step fails.

#[macro_use]
pub(crate) mod error;
pub mod file;
pub mod hex;
pub mod write;

/// Convenient re-exports of the most commonly used types and functions.
///
/// # Example
///
/// ```rust
/// use minibyte::prelude::*;
///
/// let image = assemble(&ByteCode::decode(b"C3")?)?;
/// assert_eq!(image.len(), 295);
/// # Ok::<(), minibyte::Error>(())
/// ```
pub mod prelude;

/// A type alias for [`std::result::Result<T, Error>`] where the error type is always [`Error`].
///
/// # Examples
///
/// ```rust,no_run
/// use minibyte::{Result, hex::ByteCode};
///
/// fn load(path: &str) -> Result<ByteCode> {
///     ByteCode::from_file(std::path::Path::new(path))
/// }
/// ```
pub type Result<T> = std::result::Result<T, Error>;

/// `minibyte` Error type
///
/// Covers input, decoding and output failures; every variant ends the run.
pub use error::Error;
