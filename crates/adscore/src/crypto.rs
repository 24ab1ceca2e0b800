//! Token verification schemes.
//!
//! A token is either an HMAC-SHA256 tag or an RSA/ECDSA signature over the
//! SHA-256 digest of the signature base (see [`signature_base`]).

use hmac::{Hmac, Mac};
use p256::ecdsa::signature::hazmat::PrehashVerifier;
use rsa::pkcs1::RsaPublicKey as Pkcs1PublicKey;
use rsa::traits::PublicKeyParts;
use rsa::{BigUint, Pkcs1v15Sign, RsaPublicKey};
use sha2::{Digest, Sha256};
use spki::der::{Decode, Document};
use spki::{DecodePublicKey, ObjectIdentifier, SubjectPublicKeyInfoRef};
use subtle::ConstantTimeEq;

use crate::encoding::from_base64_url;
use crate::Error;

type HmacSha256 = Hmac<Sha256>;

const RSA_ENCRYPTION: ObjectIdentifier = ObjectIdentifier::new_unwrap("1.2.840.113549.1.1.1");
const EC_PUBLIC_KEY: ObjectIdentifier = ObjectIdentifier::new_unwrap("1.2.840.10045.2.1");
const SECP256R1: ObjectIdentifier = ObjectIdentifier::new_unwrap("1.2.840.10045.3.1.7");
const SECP384R1: ObjectIdentifier = ObjectIdentifier::new_unwrap("1.3.132.0.34");

const PEM_ARMOUR: &str = "-----BEGIN";

/// Largest accepted RSA modulus, in bits.
const RSA_MAX_MODULUS_BITS: usize = 16384;

/// Scheme a token was produced with, as carried in the `*SignType` field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SignType {
    /// HMAC-SHA256 with a shared secret.
    HashSha256 = 1,
    /// RSA PKCS#1 v1.5 or ECDSA signature over SHA-256.
    SignSha256 = 2,
}

impl TryFrom<u8> for SignType {
    type Error = Error;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(SignType::HashSha256),
            2 => Ok(SignType::SignSha256),
            other => Err(Error::UnrecognizedSignType(other)),
        }
    }
}

/// Builds the newline-joined string that tokens are computed over.
pub fn signature_base(
    result_code: u8,
    request_time: u32,
    signature_time: u32,
    ip_address: &str,
    user_agent: &str,
) -> String {
    format!("{result_code}\n{request_time}\n{signature_time}\n{ip_address}\n{user_agent}")
}

/// A prepared verification key.
#[derive(Clone)]
pub enum TokenVerifier {
    Hmac(Vec<u8>),
    Rsa(RsaPublicKey),
    P256(p256::ecdsa::VerifyingKey),
    P384(p384::ecdsa::VerifyingKey),
}

impl std::fmt::Debug for TokenVerifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let scheme = match self {
            TokenVerifier::Hmac(_) => "Hmac",
            TokenVerifier::Rsa(_) => "Rsa",
            TokenVerifier::P256(_) => "P256",
            TokenVerifier::P384(_) => "P384",
        };
        write!(f, "{scheme}(..)")
    }
}

impl TokenVerifier {
    /// Prepares the configured key for `sign_type`.
    ///
    /// The key text is base64-decoded unless `use_raw_key` is set. For
    /// asymmetric tokens the result must be a PEM `PUBLIC KEY`; key text that
    /// is already PEM is used as is.
    pub fn new(sign_type: SignType, key: &str, use_raw_key: bool) -> Result<Self, Error> {
        match sign_type {
            SignType::HashSha256 => Ok(TokenVerifier::Hmac(key_material(key, use_raw_key)?)),
            SignType::SignSha256 if key.trim_start().starts_with(PEM_ARMOUR) => {
                Self::from_public_key_pem(key)
            }
            SignType::SignSha256 => {
                let bytes = key_material(key, use_raw_key)?;
                let pem = std::str::from_utf8(&bytes).map_err(Error::crypto)?;
                Self::from_public_key_pem(pem)
            }
        }
    }

    /// Parses a PKIX public key, dispatching on its algorithm.
    pub fn from_public_key_pem(pem: &str) -> Result<Self, Error> {
        let (_label, document) = Document::from_pem(pem).map_err(Error::crypto)?;
        let der = document.as_bytes();
        let info = SubjectPublicKeyInfoRef::from_der(der).map_err(Error::crypto)?;

        if info.algorithm.oid == RSA_ENCRYPTION {
            let pkcs1 = info.subject_public_key.as_bytes().ok_or_else(|| {
                Error::Crypto("rsa public key is not a whole number of bytes".to_owned())
            })?;
            return Ok(TokenVerifier::Rsa(rsa_public_key(pkcs1)?));
        }
        if info.algorithm.oid != EC_PUBLIC_KEY {
            return Err(Error::UnsupportedKeyType);
        }
        let curve = info.algorithm.parameters_oid().map_err(Error::crypto)?;
        if curve == SECP256R1 {
            let key =
                p256::ecdsa::VerifyingKey::from_public_key_der(der).map_err(Error::crypto)?;
            Ok(TokenVerifier::P256(key))
        } else if curve == SECP384R1 {
            let key =
                p384::ecdsa::VerifyingKey::from_public_key_der(der).map_err(Error::crypto)?;
            Ok(TokenVerifier::P384(key))
        } else {
            Err(Error::UnsupportedKeyType)
        }
    }

    /// Checks `token` against `base`.
    ///
    /// `Ok(false)` means the token is well formed but does not match;
    /// structurally invalid tokens are an error.
    pub fn verify(&self, base: &str, token: &[u8]) -> Result<bool, Error> {
        match self {
            TokenVerifier::Hmac(key) => {
                let mut mac = HmacSha256::new_from_slice(key).map_err(Error::crypto)?;
                mac.update(base.as_bytes());
                let expected = mac.finalize().into_bytes();
                Ok(expected[..].ct_eq(token).into())
            }
            TokenVerifier::Rsa(key) => {
                if token.len() != key.size() {
                    return Err(Error::Crypto(format!(
                        "rsa signature is {} bytes, modulus is {}",
                        token.len(),
                        key.size()
                    )));
                }
                let digest = Sha256::digest(base.as_bytes());
                Ok(key
                    .verify(Pkcs1v15Sign::new::<Sha256>(), &digest, token)
                    .is_ok())
            }
            TokenVerifier::P256(key) => {
                let signature = p256::ecdsa::Signature::from_der(token).map_err(Error::crypto)?;
                let digest = Sha256::digest(base.as_bytes());
                Ok(key.verify_prehash(&digest, &signature).is_ok())
            }
            TokenVerifier::P384(key) => {
                let signature = p384::ecdsa::Signature::from_der(token).map_err(Error::crypto)?;
                let digest = Sha256::digest(base.as_bytes());
                Ok(key.verify_prehash(&digest, &signature).is_ok())
            }
        }
    }
}

/// Builds an RSA key from its PKCS#1 encoding, accepting moduli up to
/// [`RSA_MAX_MODULUS_BITS`].
fn rsa_public_key(pkcs1_der: &[u8]) -> Result<RsaPublicKey, Error> {
    let key = Pkcs1PublicKey::from_der(pkcs1_der).map_err(Error::crypto)?;
    let n = BigUint::from_bytes_be(key.modulus.as_bytes());
    let e = BigUint::from_bytes_be(key.public_exponent.as_bytes());
    RsaPublicKey::new_with_max_size(n, e, RSA_MAX_MODULUS_BITS).map_err(Error::crypto)
}

fn key_material(key: &str, use_raw_key: bool) -> Result<Vec<u8>, Error> {
    if use_raw_key {
        return Ok(key.as_bytes().to_vec());
    }
    from_base64_url(key).map_err(|_| Error::Crypto("key is not valid base64".to_owned()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sign_types() {
        assert_eq!(SignType::try_from(1), Ok(SignType::HashSha256));
        assert_eq!(SignType::try_from(2), Ok(SignType::SignSha256));
        assert_eq!(SignType::try_from(0), Err(Error::UnrecognizedSignType(0)));
    }

    #[test]
    fn base_layout() {
        assert_eq!(
            signature_base(6, 1_700_000_000, 1_700_000_001, "::1", "UA"),
            "6\n1700000000\n1700000001\n::1\nUA"
        );
    }

    #[test]
    fn hmac_matches_only_exact_tag() {
        let verifier = TokenVerifier::new(SignType::HashSha256, "secret", true).unwrap();
        let mut mac = HmacSha256::new_from_slice(b"secret").unwrap();
        mac.update(b"base");
        let tag = mac.finalize().into_bytes().to_vec();

        assert_eq!(verifier.verify("base", &tag), Ok(true));
        assert_eq!(verifier.verify("other", &tag), Ok(false));
        assert_eq!(verifier.verify("base", &tag[..31]), Ok(false));
        assert_eq!(verifier.verify("base", &[]), Ok(false));
    }

    #[test]
    fn hmac_key_is_base64_unless_raw() {
        // "c2VjcmV0" is base64 for "secret"
        let decoded = TokenVerifier::new(SignType::HashSha256, "c2VjcmV0", false).unwrap();
        let raw = TokenVerifier::new(SignType::HashSha256, "secret", true).unwrap();
        match (decoded, raw) {
            (TokenVerifier::Hmac(a), TokenVerifier::Hmac(b)) => assert_eq!(a, b),
            other => panic!("unexpected verifiers: {other:?}"),
        }
        assert!(matches!(
            TokenVerifier::new(SignType::HashSha256, "!!", false),
            Err(Error::Crypto(_))
        ));
    }

    #[test]
    fn malformed_pem_is_a_crypto_error() {
        assert!(matches!(
            TokenVerifier::from_public_key_pem("not a key"),
            Err(Error::Crypto(_))
        ));
        let pem = "-----BEGIN PUBLIC KEY-----\nAAAA\n-----END PUBLIC KEY-----\n";
        assert!(matches!(
            TokenVerifier::new(SignType::SignSha256, pem, true),
            Err(Error::Crypto(_))
        ));
    }
}
