use sha2::{Digest, Sha256};

use crate::Address;

/// Derives a deterministic address from a key name. Handy for tests and demos.
pub fn generate_address(key: &str) -> Address {
    let hash: [u8; 32] = Sha256::digest(key.as_bytes()).into();
    Address::from(hash)
}
