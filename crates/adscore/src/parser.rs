//! V4 signature payload parser.
//!
//! Layout: `version:u8 fieldNum:u8` followed by `fieldNum` entries of
//! `fieldId:u8 reserved:u8 value`, where the value encoding is chosen by the
//! field's kind. Byte strings carry a big-endian `u16` length prefix.

use adscore_buffers::Reader;

use crate::encoding::from_base64_url;
use crate::fields::{self, FieldKind};
use crate::value::{DecodedField, ParsedFields};
use crate::Error;

pub const SUPPORTED_VERSION: u8 = 4;

/// Length prefix bit reserved for a future extended-length encoding. When
/// set, only the low byte of the length is used.
const LENGTH_EXTENSION_BIT: u16 = 0x8000;

/// Decodes the base64url text of a signature and parses it.
pub fn parse_signature(signature: &str) -> Result<ParsedFields, Error> {
    let payload = from_base64_url(signature)?;
    parse(&payload)
}

/// Parses a decoded V4 payload.
///
/// Every length is checked against the remaining input before anything is
/// read or allocated; bytes left over after the declared fields are an
/// error.
pub fn parse(payload: &[u8]) -> Result<ParsedFields, Error> {
    let mut reader = Reader::new(payload);
    let version = reader.u8()?;
    if version != SUPPORTED_VERSION {
        return Err(Error::UnsupportedVersion(version));
    }
    let field_num = reader.u8()?;

    let mut fields = ParsedFields::new();
    for ordinal in 0..usize::from(field_num) {
        let field_id = reader.u8()?;
        let (name, kind) = fields::describe(field_id, ordinal)?;
        // reserved
        reader.skip(1)?;
        let value = read_value(&mut reader, kind)?;
        fields.insert(name, value);
    }

    if !reader.is_empty() {
        return Err(Error::TrailingBytes(reader.size()));
    }
    Ok(fields)
}

fn read_value(reader: &mut Reader<'_>, kind: FieldKind) -> Result<DecodedField, Error> {
    let value = match kind {
        FieldKind::UInt8 => DecodedField::UInt8(reader.u8()?),
        FieldKind::UInt16 => DecodedField::UInt16(reader.u16()?),
        FieldKind::UInt32 => DecodedField::UInt32(reader.u32()?),
        FieldKind::Bytes => {
            let mut length = reader.u16()?;
            if length & LENGTH_EXTENSION_BIT != 0 {
                length &= 0xFF;
            }
            DecodedField::Bytes(reader.buf(usize::from(length))?.to_vec())
        }
    };
    Ok(value)
}
