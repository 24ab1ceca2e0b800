#![allow(dead_code)]

use adscore_signature::PayloadBuilder;
use hmac::{Hmac, Mac};
use sha2::Sha256;

pub const REQUEST_TIME: u32 = 1_700_000_000;
pub const SIGNATURE_TIME: u32 = 1_700_000_001;
/// Shortly after `REQUEST_TIME`.
pub const NOW: u64 = 1_700_000_060;

pub const SECRET: &[u8] = b"0123456789abcdef0123456789abcdef";
/// `SECRET` in unpadded base64url.
pub const SECRET_B64: &str = "MDEyMzQ1Njc4OWFiY2RlZjAxMjM0NTY3ODlhYmNkZWY";

pub const ID_REQUEST_TIME: u8 = 0x00;
pub const ID_SIGNATURE_TIME: u8 = 0x01;
pub const ID_MASTER_SIGN_TYPE: u8 = 0x80;
pub const ID_CUSTOMER_SIGN_TYPE: u8 = 0x81;
pub const ID_MASTER_TOKEN: u8 = 0xC0;
pub const ID_CUSTOMER_TOKEN: u8 = 0xC1;
pub const ID_MASTER_TOKEN_V6: u8 = 0xC2;
pub const ID_CUSTOMER_TOKEN_V6: u8 = 0xC3;

pub fn base(result_code: u8, ip: &str, user_agent: &str) -> String {
    format!("{result_code}\n{REQUEST_TIME}\n{SIGNATURE_TIME}\n{ip}\n{user_agent}")
}

pub fn hmac(key: &[u8], base: &str) -> Vec<u8> {
    let mut mac = Hmac::<Sha256>::new_from_slice(key).unwrap();
    mac.update(base.as_bytes());
    mac.finalize().into_bytes().to_vec()
}

/// Payload header fields shared by every fixture.
pub fn timestamps() -> PayloadBuilder {
    PayloadBuilder::new()
        .u32(ID_REQUEST_TIME, REQUEST_TIME)
        .u32(ID_SIGNATURE_TIME, SIGNATURE_TIME)
}

/// Master-role HMAC signature for a single IPv4 address.
pub fn master_hmac_signature(result_code: u8, ip: &str, user_agent: &str) -> String {
    timestamps()
        .u8(ID_MASTER_SIGN_TYPE, 1)
        .bytes(ID_MASTER_TOKEN, &hmac(SECRET, &base(result_code, ip, user_agent)))
        .to_signature()
}
