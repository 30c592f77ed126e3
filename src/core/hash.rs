//! State Hashing for Verification
//!
//! Provides deterministic hashing of simulation state for:
//! - Replay validation (same seed + same inputs = same hash)
//! - Regression tests on the physics core

use sha2::{Digest, Sha256};

use super::vec2::Vec2;

/// Hash output type (256 bits / 32 bytes)
pub type StateHash = [u8; 32];

/// Deterministic hasher for simulation state.
///
/// Wraps SHA-256 with helpers for the core's value types.
/// Floats are hashed by bit pattern, so two states hash equal only
/// if every component is bit-identical.
/// Order of updates is critical for determinism.
pub struct StateHasher {
    hasher: Sha256,
}

impl StateHasher {
    /// Create a new hasher with domain separator.
    pub fn new(domain: &[u8]) -> Self {
        let mut hasher = Sha256::new();
        hasher.update(domain);
        Self { hasher }
    }

    /// Create hasher for session state.
    pub fn for_session_state() -> Self {
        Self::new(b"CRAG_RUNNER_STATE_V1")
    }

    /// Create hasher for input recordings.
    pub fn for_input_recording() -> Self {
        Self::new(b"CRAG_RUNNER_INPUTS_V1")
    }

    /// Update with raw bytes.
    #[inline]
    pub fn update_bytes(&mut self, bytes: &[u8]) {
        self.hasher.update(bytes);
    }

    /// Update with a u8 value.
    #[inline]
    pub fn update_u8(&mut self, value: u8) {
        self.hasher.update([value]);
    }

    /// Update with a u32 value (little-endian).
    #[inline]
    pub fn update_u32(&mut self, value: u32) {
        self.hasher.update(value.to_le_bytes());
    }

    /// Update with a u64 value (little-endian).
    #[inline]
    pub fn update_u64(&mut self, value: u64) {
        self.hasher.update(value.to_le_bytes());
    }

    /// Update with an i32 value (little-endian).
    #[inline]
    pub fn update_i32(&mut self, value: i32) {
        self.hasher.update(value.to_le_bytes());
    }

    /// Update with an f32 value (bit pattern, little-endian).
    #[inline]
    pub fn update_f32(&mut self, value: f32) {
        self.update_u32(value.to_bits());
    }

    /// Update with a Vec2.
    #[inline]
    pub fn update_vec2(&mut self, value: Vec2) {
        self.update_f32(value.x);
        self.update_f32(value.y);
    }

    /// Update with a boolean.
    #[inline]
    pub fn update_bool(&mut self, value: bool) {
        self.update_u8(value as u8);
    }

    /// Finalize and return the hash.
    pub fn finalize(self) -> StateHash {
        self.hasher.finalize().into()
    }
}

/// Compute a simple hash of arbitrary data.
pub fn hash_bytes(data: &[u8]) -> StateHash {
    let mut hasher = Sha256::new();
    hasher.update(data);
    hasher.finalize().into()
}

/// Compute a session state hash.
///
/// This function is called by `Session::compute_hash()`.
/// The parameter is a closure that adds state-specific data.
pub fn compute_state_hash<F>(frame: u64, run_seed: u64, add_state: F) -> StateHash
where
    F: FnOnce(&mut StateHasher),
{
    let mut hasher = StateHasher::for_session_state();

    // Always hash frame counter and seed first
    hasher.update_u64(frame);
    hasher.update_u64(run_seed);

    // Add game-specific state
    add_state(&mut hasher);

    hasher.finalize()
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_state_hasher_determinism() {
        let make_hash = || {
            let mut hasher = StateHasher::for_session_state();
            hasher.update_u32(100);
            hasher.update_u64(12345);
            hasher.update_f32(5.5);
            hasher.update_vec2(Vec2::new(1.0, 2.0));
            hasher.update_bool(true);
            hasher.finalize()
        };

        let hash1 = make_hash();
        let hash2 = make_hash();

        assert_eq!(hash1, hash2);
    }

    #[test]
    fn test_hash_order_matters() {
        let hash1 = {
            let mut h = StateHasher::new(b"test");
            h.update_u32(1);
            h.update_u32(2);
            h.finalize()
        };

        let hash2 = {
            let mut h = StateHasher::new(b"test");
            h.update_u32(2);
            h.update_u32(1);
            h.finalize()
        };

        assert_ne!(hash1, hash2);
    }

    #[test]
    fn test_domain_separation() {
        let hash1 = {
            let mut h = StateHasher::new(b"DOMAIN_A");
            h.update_bytes(&[1, 2, 3, 4]);
            h.finalize()
        };
        let hash2 = {
            let mut h = StateHasher::new(b"DOMAIN_B");
            h.update_bytes(&[1, 2, 3, 4]);
            h.finalize()
        };

        assert_ne!(hash1, hash2);
    }

    #[test]
    fn test_f32_bit_pattern_hashing() {
        // -0.0 and +0.0 compare equal as floats but have different bits;
        // the hash must distinguish them
        let hash_pos = {
            let mut h = StateHasher::new(b"test");
            h.update_f32(0.0);
            h.finalize()
        };
        let hash_neg = {
            let mut h = StateHasher::new(b"test");
            h.update_f32(-0.0);
            h.finalize()
        };

        assert_ne!(hash_pos, hash_neg);
    }

    #[test]
    fn test_compute_state_hash() {
        let hash = compute_state_hash(100, 12345, |hasher| {
            hasher.update_f32(5.0);
            hasher.update_bool(true);
        });

        // Hash should be consistent
        let hash2 = compute_state_hash(100, 12345, |hasher| {
            hasher.update_f32(5.0);
            hasher.update_bool(true);
        });

        assert_eq!(hash, hash2);

        // Different frame = different hash
        let hash3 = compute_state_hash(101, 12345, |hasher| {
            hasher.update_f32(5.0);
            hasher.update_bool(true);
        });

        assert_ne!(hash, hash3);
    }
}
