//! Signature verification error type.

use adscore_buffers::BufferError;
use thiserror::Error;

/// Every way a verification call can fail.
///
/// Each kind maps to the numeric code reported by [`Error::code`], which
/// existing alerting pipelines match on.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum Error {
    #[error("not a valid base64 signature payload")]
    Base64Decode,
    #[error("signature version not supported: {0}")]
    UnsupportedVersion(u8),
    #[error("premature end of signature")]
    TruncatedInput,
    #[error("unsupported variable type in field {0:#04x}")]
    UnsupportedFieldType(u8),
    #[error("{0} unexpected bytes after the declared field list")]
    TrailingBytes(usize),
    #[error("signature field missing or mistyped: {0}")]
    MissingField(String),
    #[error("invalid sign role")]
    InvalidSignRole,
    #[error("unrecognized sign type: {0}")]
    UnrecognizedSignType(u8),
    #[error("unsupported public key type")]
    UnsupportedKeyType,
    #[error("signature crypt error: {0}")]
    Crypto(String),
    #[error("no verdict matched")]
    NoVerdictMatched,
    #[error("signature base expired")]
    SignatureExpired,
}

impl Error {
    /// Legacy numeric code. Kinds without a dedicated code report 0.
    pub fn code(&self) -> u32 {
        match self {
            Error::InvalidSignRole => 2,
            Error::UnrecognizedSignType(_) => 3,
            Error::Base64Decode => 4,
            Error::UnsupportedVersion(_) => 5,
            Error::TruncatedInput => 6,
            Error::NoVerdictMatched => 10,
            Error::SignatureExpired => 11,
            Error::UnsupportedFieldType(_)
            | Error::TrailingBytes(_)
            | Error::MissingField(_)
            | Error::UnsupportedKeyType
            | Error::Crypto(_) => 0,
        }
    }

    pub(crate) fn crypto(err: impl std::fmt::Display) -> Self {
        Error::Crypto(err.to_string())
    }
}

impl From<BufferError> for Error {
    fn from(_: BufferError) -> Self {
        Error::TruncatedInput
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn legacy_codes() {
        assert_eq!(Error::InvalidSignRole.code(), 2);
        assert_eq!(Error::UnrecognizedSignType(7).code(), 3);
        assert_eq!(Error::Base64Decode.code(), 4);
        assert_eq!(Error::UnsupportedVersion(3).code(), 5);
        assert_eq!(Error::TruncatedInput.code(), 6);
        assert_eq!(Error::NoVerdictMatched.code(), 10);
        assert_eq!(Error::SignatureExpired.code(), 11);
        assert_eq!(Error::Crypto("bad".into()).code(), 0);
    }

    #[test]
    fn buffer_errors_become_truncation() {
        assert_eq!(Error::from(BufferError::EndOfBuffer), Error::TruncatedInput);
    }

    #[test]
    fn messages() {
        assert_eq!(
            Error::UnsupportedVersion(3).to_string(),
            "signature version not supported: 3"
        );
        assert_eq!(
            Error::UnsupportedFieldType(0x45).to_string(),
            "unsupported variable type in field 0x45"
        );
    }
}
