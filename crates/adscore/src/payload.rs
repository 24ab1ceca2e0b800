//! V4 payload encoder.

use adscore_buffers::Writer;

use crate::encoding::to_base64_url;
use crate::parser::SUPPORTED_VERSION;

/// Longest byte string a V4 length prefix can carry.
pub const MAX_BYTES_LEN: usize = 0x7FFF;

/// Writes V4 payloads field by field.
///
/// Values are written in the encoding their id's class implies; callers are
/// responsible for pairing ids with matching writers. A payload holds at most
/// 255 fields and byte strings of at most [`MAX_BYTES_LEN`] bytes; debug
/// builds panic past either limit, release builds saturate the count and
/// truncate the value.
///
/// ```
/// use adscore_signature::{parse, PayloadBuilder};
///
/// let payload = PayloadBuilder::new().u8(0x81, 2).finish();
/// assert_eq!(payload, vec![4, 1, 0x81, 0, 2]);
/// assert_eq!(parse(&payload).unwrap().u8("customerSignType"), Ok(2));
/// ```
#[derive(Debug, Default, Clone)]
pub struct PayloadBuilder {
    body: Writer,
    field_num: u8,
}

impl PayloadBuilder {
    /// Starts an empty payload.
    pub fn new() -> Self {
        Self::default()
    }

    fn header(&mut self, id: u8) {
        debug_assert!(self.field_num < u8::MAX, "more than 255 fields");
        self.field_num = self.field_num.saturating_add(1);
        self.body.u8(id);
        self.body.u8(0);
    }

    /// Writes a single-byte field.
    pub fn u8(mut self, id: u8, value: u8) -> Self {
        self.header(id);
        self.body.u8(value);
        self
    }

    /// Writes a big-endian 16-bit field.
    pub fn u16(mut self, id: u8, value: u16) -> Self {
        self.header(id);
        self.body.u16(value);
        self
    }

    /// Writes a big-endian 32-bit field.
    pub fn u32(mut self, id: u8, value: u32) -> Self {
        self.header(id);
        self.body.u32(value);
        self
    }

    /// Writes a length-prefixed byte string.
    pub fn bytes(mut self, id: u8, value: &[u8]) -> Self {
        debug_assert!(
            value.len() <= MAX_BYTES_LEN,
            "byte string of {} bytes",
            value.len()
        );
        let value = &value[..value.len().min(MAX_BYTES_LEN)];
        self.header(id);
        self.body.u16(value.len() as u16);
        self.body.buf(value);
        self
    }

    /// Returns the encoded payload.
    pub fn finish(mut self) -> Vec<u8> {
        let body = self.body.flush();
        let mut out = Writer::with_capacity(body.len() + 2);
        out.u8(SUPPORTED_VERSION);
        out.u8(self.field_num);
        out.buf(&body);
        out.flush()
    }

    /// Returns the encoded payload as base64url text.
    pub fn to_signature(self) -> String {
        to_base64_url(&self.finish())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn layout() {
        let payload = PayloadBuilder::new()
            .u32(0x00, 0x0102_0304)
            .u16(0x40, 0x0506)
            .bytes(0xC0, b"ab")
            .finish();
        assert_eq!(
            payload,
            vec![4, 3, 0x00, 0, 1, 2, 3, 4, 0x40, 0, 5, 6, 0xC0, 0, 0, 2, b'a', b'b']
        );
    }

    #[test]
    fn empty() {
        assert_eq!(PayloadBuilder::new().finish(), vec![4, 0]);
        assert_eq!(PayloadBuilder::new().to_signature(), "BAA");
    }

    #[test]
    fn longest_byte_string() {
        let value = vec![0x5A; MAX_BYTES_LEN];
        let payload = PayloadBuilder::new().bytes(0xC0, &value).finish();
        assert_eq!(&payload[..6], &[4, 1, 0xC0, 0, 0x7F, 0xFF]);
        let fields = crate::parse(&payload).unwrap();
        assert_eq!(fields.bytes("masterToken"), Ok(Some(&value[..])));
    }

    #[test]
    #[cfg(debug_assertions)]
    #[should_panic(expected = "byte string of 32768 bytes")]
    fn oversized_byte_string_panics() {
        let _ = PayloadBuilder::new().bytes(0xC0, &[0; MAX_BYTES_LEN + 1]);
    }

    #[test]
    #[cfg(debug_assertions)]
    #[should_panic(expected = "more than 255 fields")]
    fn field_count_overflow_panics() {
        let mut builder = PayloadBuilder::new();
        for _ in 0..=255 {
            builder = builder.u8(0x80, 0);
        }
    }
}
