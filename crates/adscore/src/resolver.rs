//! Verdict resolution.
//!
//! A signature does not state its verdict. The verdict is recovered by
//! rebuilding the signature base for every candidate address and every
//! outcome code and finding the one combination the token verifies for.

use std::net::IpAddr;

use serde::Serialize;
use tracing::{debug, trace};

use crate::config::VerificationRequest;
use crate::crypto::{signature_base, SignType, TokenVerifier};
use crate::fields::{REQUEST_TIME, SIGNATURE_TIME};
use crate::outcome::{Verdict, OUTCOMES};
use crate::value::ParsedFields;
use crate::Error;

/// Outcome of a successful verification.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VerificationResult {
    pub verdict: Verdict,
    pub result_code: u8,
    /// Candidate address the token matched, in canonical form.
    pub matched_ip: String,
    pub request_time: u32,
    pub signature_time: u32,
}

/// A candidate address in canonical text form, with its token field.
#[derive(Debug, Clone, PartialEq, Eq)]
struct Candidate {
    ip_address: String,
    v6: bool,
}

/// Classifies and normalizes a caller-supplied address. IPv4-mapped IPv6
/// addresses count as IPv4. Unparseable input yields `None`.
fn candidate(raw: &str) -> Option<Candidate> {
    match raw.parse::<IpAddr>().ok()? {
        IpAddr::V4(v4) => Some(Candidate {
            ip_address: v4.to_string(),
            v6: false,
        }),
        IpAddr::V6(v6) => match v6.to_ipv4_mapped() {
            Some(v4) => Some(Candidate {
                ip_address: v4.to_string(),
                v6: false,
            }),
            None => Some(Candidate {
                ip_address: v6.to_string(),
                v6: true,
            }),
        },
    }
}

/// Finds the first (address, outcome) pair the role's token verifies for.
///
/// Addresses are tried in the order given by the caller and outcomes in the
/// order of [`OUTCOMES`]; the first match wins.
pub fn resolve(
    fields: &ParsedFields,
    request: &VerificationRequest,
) -> Result<VerificationResult, Error> {
    let role = request.sign_role;
    let token_v4 = fields.bytes(&role.token_field())?;
    let token_v6 = fields.bytes(&role.token_v6_field())?;
    if token_v4.is_none() && token_v6.is_none() {
        return Err(Error::InvalidSignRole);
    }

    let sign_type = SignType::try_from(fields.u8(&role.sign_type_field())?)?;
    let request_time = fields.u32(REQUEST_TIME)?;
    let signature_time = fields.u32(SIGNATURE_TIME)?;
    let verifier = TokenVerifier::new(sign_type, &request.key, request.use_raw_key)?;

    for raw in &request.ip_addresses {
        let Some(candidate) = candidate(raw) else {
            trace!(ip = %raw, "skipping malformed address");
            continue;
        };
        let token = if candidate.v6 { token_v6 } else { token_v4 };
        let Some(token) = token else {
            trace!(ip = %candidate.ip_address, "no token for address family");
            continue;
        };

        for outcome in &OUTCOMES {
            let base = signature_base(
                outcome.code,
                request_time,
                signature_time,
                &candidate.ip_address,
                &request.user_agent,
            );
            if verifier.verify(&base, token)? {
                debug!(
                    role = %role,
                    ip = %candidate.ip_address,
                    outcome = outcome.name,
                    verdict = %outcome.verdict,
                    "signature verified"
                );
                return Ok(VerificationResult {
                    verdict: outcome.verdict,
                    result_code: outcome.code,
                    matched_ip: candidate.ip_address,
                    request_time,
                    signature_time,
                });
            }
        }
    }

    Err(Error::NoVerdictMatched)
}
