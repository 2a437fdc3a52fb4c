//! Low-level byte buffer helpers shared by the header writers.

pub mod io;
