//! Verification of Adscore V4 fraud-score signatures.
//!
//! A signature is a base64url-encoded binary payload carrying request and
//! signing timestamps plus one or more tokens. Verification decodes and
//! parses the payload, recovers the verdict by matching a token against the
//! candidate client addresses, and finally rejects signatures older than the
//! configured expiry window.
//!
//! # Example
//!
//! ```
//! use adscore_signature::{verify_at, PayloadBuilder, SignRole, VerificationRequest};
//! use hmac::{Hmac, Mac};
//! use sha2::Sha256;
//!
//! let mut mac = Hmac::<Sha256>::new_from_slice(b"secret").unwrap();
//! mac.update(b"0\n1700000000\n1700000001\n1.2.3.4\nUA1");
//! let token = mac.finalize().into_bytes();
//!
//! let signature = PayloadBuilder::new()
//!     .u32(0x00, 1_700_000_000)
//!     .u32(0x01, 1_700_000_001)
//!     .u8(0x80, 1)
//!     .bytes(0xC0, &token)
//!     .to_signature();
//!
//! let request = VerificationRequest::new(signature, "secret")
//!     .use_raw_key(true)
//!     .ip_addresses(["1.2.3.4"])
//!     .user_agent("UA1")
//!     .sign_role(SignRole::Master);
//!
//! let result = verify_at(&request, 1_700_000_100).unwrap();
//! assert_eq!(result.verdict.as_str(), "ok");
//! assert_eq!(result.matched_ip, "1.2.3.4");
//! ```

mod error;

pub mod config;
pub mod crypto;
pub mod encoding;
pub mod fields;
pub mod outcome;
pub mod parser;
pub mod payload;
pub mod resolver;
pub mod value;

use std::time::{SystemTime, UNIX_EPOCH};

use tracing::debug;

pub use config::{SignRole, VerificationRequest};
pub use crypto::{SignType, TokenVerifier};
pub use error::Error;
pub use outcome::{Outcome, Verdict, OUTCOMES};
pub use parser::{parse, parse_signature};
pub use payload::PayloadBuilder;
pub use resolver::{resolve, VerificationResult};
pub use value::{DecodedField, ParsedFields};

/// Verifies a signature against the system clock.
pub fn verify(request: &VerificationRequest) -> Result<VerificationResult, Error> {
    let now = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0);
    verify_at(request, now)
}

/// Verifies a signature as of `now` (Unix seconds).
///
/// Expiry is checked after the verdict is resolved, so an expired signature
/// is reported as [`Error::SignatureExpired`] even when its token matches.
pub fn verify_at(request: &VerificationRequest, now: u64) -> Result<VerificationResult, Error> {
    let fields = parse_signature(&request.signature)?;
    let result = resolve(&fields, request)?;

    // a request time in the future counts as age 0
    let age = now.saturating_sub(u64::from(result.request_time));
    if age > request.expire_seconds {
        debug!(
            age,
            expire_seconds = request.expire_seconds,
            "signature expired"
        );
        return Err(Error::SignatureExpired);
    }
    Ok(result)
}
