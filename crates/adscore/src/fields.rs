//! Catalogue of V4 field identifiers.
//!
//! The two high bits of a field id select its primitive encoding class
//! (`0x00` ulong, `0x40` ushort, `0x80` uchar, `0xC0` string). Ids missing
//! from [`FIELD_TABLE`] are decoded with their class's encoding under a
//! synthetic name, so payloads carrying newer fields still parse.

use crate::Error;

pub const REQUEST_TIME: &str = "requestTime";
pub const SIGNATURE_TIME: &str = "signatureTime";

/// Mask selecting the encoding class bits of a field id.
pub const TYPE_CLASS_MASK: u8 = 0xC0;

/// Primitive encoding of a field value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FieldKind {
    UInt8,
    UInt16,
    UInt32,
    Bytes,
}

impl FieldKind {
    /// Wire class name, used as the prefix of synthetic field names.
    pub fn class_name(self) -> &'static str {
        match self {
            FieldKind::UInt8 => "uchar",
            FieldKind::UInt16 => "ushort",
            FieldKind::UInt32 => "ulong",
            FieldKind::Bytes => "string",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldDescriptor {
    pub id: u8,
    pub name: &'static str,
    pub kind: FieldKind,
}

const fn field(id: u8, name: &'static str, kind: FieldKind) -> FieldDescriptor {
    FieldDescriptor { id, name, kind }
}

/// Known field ids. Read-only for the life of the process.
pub static FIELD_TABLE: [FieldDescriptor; 9] = [
    field(0x00, REQUEST_TIME, FieldKind::UInt32),
    field(0x01, SIGNATURE_TIME, FieldKind::UInt32),
    field(0x40, "", FieldKind::UInt16),
    field(0x80, "masterSignType", FieldKind::UInt8),
    field(0x81, "customerSignType", FieldKind::UInt8),
    field(0xC0, "masterToken", FieldKind::Bytes),
    field(0xC1, "customerToken", FieldKind::Bytes),
    field(0xC2, "masterTokenV6", FieldKind::Bytes),
    field(0xC3, "customerTokenV6", FieldKind::Bytes),
];

/// Looks up a known field id.
pub fn lookup(id: u8) -> Option<&'static FieldDescriptor> {
    FIELD_TABLE.iter().find(|d| d.id == id)
}

/// Resolves the name and kind of the field at position `ordinal`.
///
/// Unknown ids take the kind of their class entry and the name
/// `<class><ordinal as two hex digits>`, e.g. `ulong02`.
pub fn describe(id: u8, ordinal: usize) -> Result<(String, FieldKind), Error> {
    if let Some(known) = lookup(id) {
        return Ok((known.name.to_owned(), known.kind));
    }
    let class = lookup(id & TYPE_CLASS_MASK).ok_or(Error::UnsupportedFieldType(id))?;
    let name = format!("{}{:02x}", class.kind.class_name(), ordinal);
    Ok((name, class.kind))
}
