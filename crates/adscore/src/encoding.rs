//! Base64 handling for signature payloads and keys.
//!
//! Decoding accepts both the URL-safe and the standard alphabet (`-`/`_`
//! are folded onto `+`/`/`), ignores `=` padding and line breaks, and
//! tolerates non-zero trailing bits.

use base64::alphabet;
use base64::engine::{DecodePaddingMode, GeneralPurpose, GeneralPurposeConfig};
use base64::Engine;

use crate::Error;

const LENIENT: GeneralPurpose = GeneralPurpose::new(
    &alphabet::STANDARD,
    GeneralPurposeConfig::new()
        .with_encode_padding(false)
        .with_decode_padding_mode(DecodePaddingMode::RequireNone)
        .with_decode_allow_trailing_bits(true),
);

const URL_SAFE: GeneralPurpose = GeneralPurpose::new(
    &alphabet::URL_SAFE,
    GeneralPurposeConfig::new().with_encode_padding(false),
);

/// Decodes base64url (or standard base64) text.
pub fn from_base64_url(encoded: &str) -> Result<Vec<u8>, Error> {
    let normalized: String = encoded
        .chars()
        .filter(|c| !matches!(c, '=' | '\r' | '\n'))
        .map(|c| match c {
            '-' => '+',
            '_' => '/',
            c => c,
        })
        .collect();
    LENIENT.decode(normalized).map_err(|_| Error::Base64Decode)
}

/// Encodes bytes as unpadded base64url.
pub fn to_base64_url(data: &[u8]) -> String {
    URL_SAFE.encode(data)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_both_alphabets() {
        assert_eq!(from_base64_url("-_8").unwrap(), vec![0xfb, 0xff]);
        assert_eq!(from_base64_url("+/8").unwrap(), vec![0xfb, 0xff]);
        assert_eq!(from_base64_url("+/8=").unwrap(), vec![0xfb, 0xff]);
    }

    #[test]
    fn padding_is_optional() {
        assert_eq!(from_base64_url("aGVsbG8").unwrap(), b"hello");
        assert_eq!(from_base64_url("aGVsbG8=").unwrap(), b"hello");
        assert_eq!(from_base64_url("").unwrap(), b"");
    }

    #[test]
    fn line_breaks_are_ignored() {
        assert_eq!(from_base64_url("aGVs\nbG8").unwrap(), b"hello");
        assert_eq!(from_base64_url("aGVs\r\nbG8=\n").unwrap(), b"hello");
    }

    #[test]
    fn rejects_garbage() {
        assert_eq!(from_base64_url("not-base64!!"), Err(Error::Base64Decode));
        assert_eq!(from_base64_url("a"), Err(Error::Base64Decode));
        assert_eq!(from_base64_url("aGVs bG8"), Err(Error::Base64Decode));
    }

    #[test]
    fn encode_matches_decode() {
        let data = [0xfb, 0xff, 0x00, 0x10];
        let text = to_base64_url(&data);
        assert!(!text.contains('+') && !text.contains('/') && !text.contains('='));
        assert_eq!(from_base64_url(&text).unwrap(), data);
    }
}
