use hmac::{Hmac, Mac};
use sha2::{Digest, Sha256};

use crate::{TokenError, TokenResult};

type HmacSha256 = Hmac<Sha256>;

/// Keys shorter than this are stretched with SHA-256 before use.
pub const MIN_KEY_LEN: usize = 32;

/// The signing algorithm family. HS256 is the only one supported.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Algorithm {
    #[default]
    HS256,
}

impl Algorithm {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::HS256 => "HS256",
        }
    }

    pub fn from_header(alg: &str) -> Option<Self> {
        match alg {
            "HS256" => Some(Self::HS256),
            _ => None,
        }
    }
}

/// Applies the key-length policy. Generate and validate must both go through
/// here or every token fails verification.
fn effective_key(key: &[u8]) -> TokenResult<Vec<u8>> {
    if key.is_empty() {
        return Err(TokenError::KeyUnavailable);
    }
    if key.len() < MIN_KEY_LEN {
        return Ok(Sha256::digest(key).to_vec());
    }
    Ok(key.to_vec())
}

fn mac_for(key: &[u8], message: &[u8]) -> TokenResult<HmacSha256> {
    let key = effective_key(key)?;
    let mut mac = HmacSha256::new_from_slice(&key).map_err(|_| TokenError::KeyUnavailable)?;
    mac.update(message);
    Ok(mac)
}

pub fn sign(message: &[u8], key: &[u8]) -> TokenResult<[u8; 32]> {
    let mac = mac_for(key, message)?;
    let mut signature = [0u8; 32];
    signature.copy_from_slice(&mac.finalize().into_bytes());
    Ok(signature)
}

/// Constant-time check of `signature` against the MAC of `message`.
pub fn verify(message: &[u8], signature: &[u8], key: &[u8]) -> TokenResult<bool> {
    let mac = mac_for(key, message)?;
    Ok(mac.verify_slice(signature).is_ok())
}
