//! Verification request configuration.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::Error;

/// Signature lifetime used when a request does not set one.
pub const DEFAULT_EXPIRE_SECONDS: u64 = 3600;

/// Which party's token set a request is checked against.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SignRole {
    Master,
    #[default]
    Customer,
}

impl SignRole {
    /// Lowercase role name, also the prefix of the role's field names.
    pub fn as_str(self) -> &'static str {
        match self {
            SignRole::Master => "master",
            SignRole::Customer => "customer",
        }
    }

    /// Name of the IPv4 token field for this role.
    pub fn token_field(self) -> String {
        format!("{}Token", self.as_str())
    }

    /// Name of the IPv6 token field for this role.
    pub fn token_v6_field(self) -> String {
        format!("{}TokenV6", self.as_str())
    }

    /// Name of the field carrying this role's [`crate::SignType`].
    pub fn sign_type_field(self) -> String {
        format!("{}SignType", self.as_str())
    }
}

impl fmt::Display for SignRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SignRole {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "master" => Ok(SignRole::Master),
            "customer" => Ok(SignRole::Customer),
            _ => Err(Error::InvalidSignRole),
        }
    }
}

/// Everything needed to verify one signature.
///
/// Build with [`VerificationRequest::new`] and the chained setters, or
/// deserialize it; omitted keys take their defaults.
///
/// ```
/// use adscore_signature::{SignRole, VerificationRequest};
///
/// let request = VerificationRequest::new("BAA", "c2VjcmV0")
///     .ip_addresses(["1.2.3.4"])
///     .user_agent("Mozilla/5.0")
///     .sign_role(SignRole::Master)
///     .expire_seconds(21660);
/// assert_eq!(request.expire_seconds, 21660);
/// ```
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct VerificationRequest {
    /// Base64url signature payload.
    pub signature: String,
    /// HMAC secret, or PEM public key for asymmetric signatures.
    pub key: String,
    /// Candidate client addresses, tried in order.
    pub ip_addresses: Vec<String>,
    pub user_agent: String,
    pub sign_role: SignRole,
    /// Maximum accepted age of the signature's request time.
    pub expire_seconds: u64,
    /// Use `key` bytes verbatim instead of base64-decoding them.
    pub use_raw_key: bool,
}

impl Default for VerificationRequest {
    fn default() -> Self {
        Self {
            signature: String::new(),
            key: String::new(),
            ip_addresses: Vec::new(),
            user_agent: String::new(),
            sign_role: SignRole::default(),
            expire_seconds: DEFAULT_EXPIRE_SECONDS,
            use_raw_key: false,
        }
    }
}

impl VerificationRequest {
    /// Creates a request with default settings and no candidate addresses.
    pub fn new(signature: impl Into<String>, key: impl Into<String>) -> Self {
        Self {
            signature: signature.into(),
            key: key.into(),
            ..Self::default()
        }
    }

    /// Replaces the candidate addresses.
    pub fn ip_addresses<I, S>(mut self, ip_addresses: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.ip_addresses = ip_addresses.into_iter().map(Into::into).collect();
        self
    }

    /// Sets the user agent the tokens were computed over.
    pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    /// Selects whose tokens to check.
    pub fn sign_role(mut self, sign_role: SignRole) -> Self {
        self.sign_role = sign_role;
        self
    }

    /// Sets the maximum signature age in seconds.
    pub fn expire_seconds(mut self, expire_seconds: u64) -> Self {
        self.expire_seconds = expire_seconds;
        self
    }

    /// Uses the key text verbatim instead of base64-decoding it.
    pub fn use_raw_key(mut self, use_raw_key: bool) -> Self {
        self.use_raw_key = use_raw_key;
        self
    }
}

impl fmt::Debug for VerificationRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("VerificationRequest")
            .field("signature", &self.signature)
            .field("key", &"<redacted>")
            .field("ip_addresses", &self.ip_addresses)
            .field("user_agent", &self.user_agent)
            .field("sign_role", &self.sign_role)
            .field("expire_seconds", &self.expire_seconds)
            .field("use_raw_key", &self.use_raw_key)
            .finish()
    }
}
