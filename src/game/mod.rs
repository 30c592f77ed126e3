//! Game Simulation
//!
//! All simulation code. Deterministic given the run seed and the input
//! sequence.
//!
//! ## Module Structure
//!
//! - `input`: Input snapshots, delta-compressed recordings
//! - `events`: Lifecycle events with priority ordering
//! - `collision`: AABB tests, swept/tolerance ground detection
//! - `platform`: Platform kinds and behavior
//! - `enemy`: Enemy AI variants
//! - `collectible`: Coins and power-ups
//! - `player`: The player controller
//! - `stage`: Stage orchestration and entity ownership
//! - `layout`: Hand-authored stage data
//! - `state`: Session state and hashing
//! - `tick`: Per-frame orchestration and replay

pub mod collectible;
pub mod collision;
pub mod enemy;
pub mod events;
pub mod input;
pub mod layout;
pub mod platform;
pub mod player;
pub mod stage;
pub mod state;
pub mod tick;

// Re-export key types
pub use collectible::{Coin, PowerUp, PowerUpKind};
pub use enemy::{Enemy, EnemyKind};
pub use events::{GameEvent, GameEventData};
pub use input::{InputRecording, InputSnapshot};
pub use platform::{Platform, PlatformKind};
pub use player::{Player, PlayerAction};
pub use stage::{Environment, Stage, StageContext, Theme};
pub use state::{Session, SessionPhase};
pub use tick::{frame, replay_run, FrameResult};
