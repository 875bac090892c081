use rand::RngCore;

/// Length in bytes of generated token and event ids.
pub const ID_BYTES: usize = 16;

pub trait EntropySource: Send + Sync {
    fn fill(&self, dest: &mut [u8]);
}

/// Operating-system randomness.
#[derive(Debug, Clone, Copy, Default)]
pub struct OsEntropy;

impl EntropySource for OsEntropy {
    fn fill(&self, dest: &mut [u8]) {
        rand::rngs::OsRng.fill_bytes(dest);
    }
}

/// Generates a random hex id (16 bytes, 32 characters) for `jti`.
pub fn generate_token_id(entropy: &dyn EntropySource) -> String {
    let mut bytes = [0u8; ID_BYTES];
    entropy.fill(&mut bytes);
    hex::encode(bytes)
}
