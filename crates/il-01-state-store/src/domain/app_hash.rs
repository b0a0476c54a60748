use std::collections::BTreeMap;

use sha2::{Digest, Sha256};

pub type AppHash = [u8; 32];

pub const GENESIS_APP_HASH: AppHash = [0u8; 32];

/// `sha256(previous || height || sorted write set)`.
///
/// Each entry contributes its length-prefixed key, a tag byte (1 = put,
/// 0 = delete) and, for puts, the length-prefixed value.
pub fn chain_app_hash(
    previous: &AppHash,
    height: u64,
    writes: &BTreeMap<Vec<u8>, Option<Vec<u8>>>,
) -> AppHash {
    let mut hasher = Sha256::new();
    hasher.update(previous);
    hasher.update(height.to_be_bytes());
    for (key, value) in writes {
        hasher.update((key.len() as u64).to_be_bytes());
        hasher.update(key);
        match value {
            Some(bytes) => {
                hasher.update([1u8]);
                hasher.update((bytes.len() as u64).to_be_bytes());
                hasher.update(bytes);
            }
            None => hasher.update([0u8]),
        }
    }
    hasher.finalize().into()
}
