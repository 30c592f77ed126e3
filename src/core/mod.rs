//! Core deterministic primitives.
//!
//! All types in this module are designed for reproducible simulation:
//! sanitized geometry, seeded randomness, and bit-exact state hashing.

pub mod hash;
pub mod rect;
pub mod rng;
pub mod vec2;

// Re-export core types
pub use hash::{compute_state_hash, StateHash, StateHasher};
pub use rect::Rect;
pub use rng::DeterministicRng;
pub use vec2::Vec2;
