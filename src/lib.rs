//! # Crag Runner Simulation Core
//!
//! Deterministic physics/collision/player-state core for a side-scrolling
//! platformer. The presentation layer (canvas, UI, audio) lives elsewhere;
//! this crate consumes an input snapshot and a frame delta, and produces
//! updated entity transforms plus discrete lifecycle events.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                       CRAG RUNNER CORE                       │
//! ├─────────────────────────────────────────────────────────────┤
//! │  core/           - Deterministic primitives                  │
//! │  ├── vec2.rs     - f32 2D vector                             │
//! │  ├── rect.rs     - Sanitized AABB                            │
//! │  ├── rng.rs      - Deterministic Xorshift128+ PRNG           │
//! │  └── hash.rs     - State hashing for replay verification     │
//! │                                                              │
//! │  game/           - Simulation (deterministic)                │
//! │  ├── input.rs    - Input snapshots and recordings            │
//! │  ├── collision.rs- Swept/tolerance ground detection          │
//! │  ├── platform.rs - Platform kinds and behavior               │
//! │  ├── enemy.rs    - Enemy AI variants                         │
//! │  ├── player.rs   - The player controller                     │
//! │  ├── stage.rs    - Stage orchestration                       │
//! │  ├── state.rs    - Session state                             │
//! │  └── tick.rs     - Per-frame orchestration + replay          │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Determinism Guarantee
//!
//! Given the same run seed, the same input sequence, and the same deltas,
//! the simulation produces bit-identical state:
//! - All randomness comes from the seeded Xorshift128+ stage RNGs
//! - Moving platforms and flyers advance phase accumulators, never a
//!   wall clock
//! - Entity iteration order is the stable layout order
//! - State hashes compare f32 bit patterns exactly

#![warn(missing_docs)]
#![warn(clippy::all)]
#![deny(unsafe_code)]

pub mod config;
pub mod core;
pub mod game;

// Re-export commonly used types
pub use crate::core::rect::Rect;
pub use crate::core::rng::DeterministicRng;
pub use crate::core::vec2::Vec2;
pub use config::Tuning;
pub use game::input::{InputRecording, InputSnapshot};
pub use game::state::{Session, SessionPhase};
pub use game::tick::{frame, replay_run, FrameResult};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Assumed display rate (Hz) the delta is normalized against
pub const BASE_FRAME_RATE: u32 = 60;

/// One frame at the baseline rate, in milliseconds
pub const BASE_FRAME_MS: f32 = 1000.0 / BASE_FRAME_RATE as f32;

/// Largest delta the simulation will integrate in one frame, in
/// milliseconds; anything beyond is a stalled clock
pub const MAX_FRAME_MS: f32 = 100.0;

/// Visible world width in pixels
pub const CANVAS_WIDTH: f32 = 800.0;

/// Visible world height in pixels
pub const CANVAS_HEIGHT: f32 = 600.0;

/// Falling this far past the canvas bottom is out-of-bounds death
pub const OUT_OF_BOUNDS_MARGIN: f32 = 50.0;

/// Number of hand-authored stages
pub const STAGE_COUNT: u32 = 10;
