use data_encoding::BASE64;
use hmac::{Hmac, Mac};
use serde::{Deserialize, Serialize};
use sha2::Sha256;

use super::address::Address;

pub type HmacSha256 = Hmac<Sha256>;

/// Voter login request: an address plus the access key issued for it.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct VoterCredentials {
    pub address: Address,
    pub access_key: String,
}

/// Keyed MAC over the address bytes.
fn mac_for(secret: &[u8], address: &Address) -> HmacSha256 {
    // HMAC accepts keys of any length.
    let mut mac = HmacSha256::new_from_slice(secret).expect("HMAC can take a key of any size");
    mac.update(address.as_bytes());
    mac
}

/// The access key for `address`: base64 of its HMAC-SHA256 under `secret`.
pub fn issue_access_key(secret: &[u8], address: &Address) -> String {
    BASE64.encode(&mac_for(secret, address).finalize().into_bytes())
}

/// Check an access key in constant time.
pub fn verify_access_key(secret: &[u8], address: &Address, access_key: &str) -> bool {
    match BASE64.decode(access_key.as_bytes()) {
        Ok(tag) => mac_for(secret, address).verify_slice(&tag).is_ok(),
        Err(_) => false,
    }
}
