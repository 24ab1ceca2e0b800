//! Bounds-checked binary buffer utilities.
//!
//! This crate provides the byte cursor used to decode Adscore signature
//! payloads. Every read is checked against the remaining input, so no input
//! can cause a read past the end of the buffer.
//!
//! # Overview
//!
//! - [`Reader`] - Reads big-endian integers and byte runs from a byte slice
//! - [`Writer`] - Writes the same primitives to an auto-growing buffer
//!
//! # Example
//!
//! ```
//! use adscore_buffers::{BufferError, Reader, Writer};
//!
//! let mut writer = Writer::new();
//! writer.u8(0x01);
//! writer.u16(0x0203);
//! writer.buf(b"hi");
//! let data = writer.flush();
//!
//! let mut reader = Reader::new(&data);
//! assert_eq!(reader.u8(), Ok(0x01));
//! assert_eq!(reader.u16(), Ok(0x0203));
//! assert_eq!(reader.buf(2), Ok(&b"hi"[..]));
//! assert_eq!(reader.u8(), Err(BufferError::EndOfBuffer));
//! ```

mod reader;
mod writer;

pub use reader::Reader;
pub use writer::Writer;

/// Error type for buffer operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BufferError {
    /// Attempted to read past the end of the buffer.
    EndOfBuffer,
}

impl std::fmt::Display for BufferError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BufferError::EndOfBuffer => write!(f, "end of buffer"),
        }
    }
}

impl std::error::Error for BufferError {}
