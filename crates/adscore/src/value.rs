//! Decoded field values.

use std::collections::BTreeMap;

use crate::Error;

/// A single decoded field value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DecodedField {
    UInt8(u8),
    UInt16(u16),
    UInt32(u32),
    Bytes(Vec<u8>),
}

/// Field name → value mapping produced by the parser.
///
/// Fields are kept in name order so that equal payloads always produce
/// equal, identically ordered mappings.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParsedFields {
    fields: BTreeMap<String, DecodedField>,
}

impl ParsedFields {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts a field. A later field with the same name replaces the
    /// earlier one.
    pub fn insert(&mut self, name: impl Into<String>, value: DecodedField) {
        self.fields.insert(name.into(), value);
    }

    pub fn get(&self, name: &str) -> Option<&DecodedField> {
        self.fields.get(name)
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &DecodedField)> {
        self.fields.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Reads a `UInt8` field.
    pub fn u8(&self, name: &str) -> Result<u8, Error> {
        match self.get(name) {
            Some(DecodedField::UInt8(v)) => Ok(*v),
            _ => Err(Error::MissingField(name.to_owned())),
        }
    }

    /// Reads a `UInt32` field.
    pub fn u32(&self, name: &str) -> Result<u32, Error> {
        match self.get(name) {
            Some(DecodedField::UInt32(v)) => Ok(*v),
            _ => Err(Error::MissingField(name.to_owned())),
        }
    }

    /// Reads a `Bytes` field, `None` when it is absent.
    pub fn bytes(&self, name: &str) -> Result<Option<&[u8]>, Error> {
        match self.get(name) {
            None => Ok(None),
            Some(DecodedField::Bytes(v)) => Ok(Some(v.as_slice())),
            Some(_) => Err(Error::MissingField(name.to_owned())),
        }
    }
}
