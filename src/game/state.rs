//! Session State
//!
//! The top-level state of one run: the player (who outlives stages), the
//! active stage, run/pause flags, hitstop, and the pending event queue.

use serde::{Deserialize, Serialize};

use crate::core::hash::{compute_state_hash, StateHash};
use crate::game::events::GameEvent;
use crate::game::player::Player;
use crate::game::stage::Stage;

/// Where the player starts a fresh run.
pub const PLAYER_START_X: f32 = 100.0;

/// Where the player starts a fresh run.
pub const PLAYER_START_Y: f32 = 500.0;

/// Current phase of the run.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum SessionPhase {
    /// Created, not yet started
    #[default]
    Ready,
    /// Active gameplay
    Playing,
    /// Run over (out of lives or all stages cleared)
    Ended,
}

/// Complete state of a run.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Session {
    /// Seed all stage RNGs derive from
    pub run_seed: u64,

    /// Frame counter; advances every simulated or hitstop frame, never
    /// while paused
    pub frame: u64,

    /// Current phase
    pub phase: SessionPhase,

    /// Pause halts the update phase only; rendering is the caller's concern
    pub paused: bool,

    /// Remaining simulation freeze (impact feedback); rendering continues
    pub hitstop_ms: f32,

    /// The player; outlives stage transitions
    pub player: Player,

    /// The active stage
    pub stage: Stage,

    /// Events generated this frame (drained by the caller)
    #[serde(skip)]
    pending_events: Vec<GameEvent>,
}

impl Session {
    /// Create a new session at the first stage.
    pub fn new(run_seed: u64) -> Self {
        let stage = Stage::generate(0, run_seed);
        Self {
            run_seed,
            frame: 0,
            phase: SessionPhase::Ready,
            paused: false,
            hitstop_ms: 0.0,
            player: Player::new(PLAYER_START_X, PLAYER_START_Y),
            stage,
            pending_events: Vec::new(),
        }
    }

    /// Begin the run.
    pub fn start(&mut self) {
        if self.phase == SessionPhase::Ready {
            self.phase = SessionPhase::Playing;
        }
    }

    /// Restart from the first stage with a fully reset player.
    pub fn restart(&mut self) {
        self.stage = Stage::generate(0, self.run_seed);
        self.player.reset(PLAYER_START_X, PLAYER_START_Y);
        self.frame = 0;
        self.phase = SessionPhase::Playing;
        self.paused = false;
        self.hitstop_ms = 0.0;
        self.pending_events.clear();
    }

    /// Regenerate the next stage and carry the player over.
    ///
    /// Returns false when there is no next stage (the run is complete).
    pub fn advance_stage(&mut self) -> bool {
        let next = self.stage.index + 1;
        if next >= crate::STAGE_COUNT {
            return false;
        }
        self.stage = Stage::generate(next, self.run_seed);
        self.player.reposition(self.stage.spawn_point);
        true
    }

    /// Is the run over?
    pub fn is_ended(&self) -> bool {
        self.phase == SessionPhase::Ended
    }

    /// Freeze simulation for a bounded duration (impact feedback).
    ///
    /// Overlapping requests keep the longer freeze.
    pub fn apply_hitstop(&mut self, duration_ms: f32) {
        self.hitstop_ms = self.hitstop_ms.max(duration_ms);
    }

    /// Push a game event.
    pub fn push_event(&mut self, event: GameEvent) {
        self.pending_events.push(event);
    }

    /// Append a batch of events.
    pub fn push_events(&mut self, events: impl IntoIterator<Item = GameEvent>) {
        self.pending_events.extend(events);
    }

    /// Take pending events (consumes them).
    pub fn take_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.pending_events)
    }

    /// Compute hash of current state for replay verification.
    pub fn compute_hash(&self) -> StateHash {
        compute_state_hash(self.frame, self.run_seed, |hasher| {
            hasher.update_u8(self.phase as u8);

            // Player
            hasher.update_vec2(self.player.position);
            hasher.update_vec2(self.player.velocity);
            hasher.update_u32(self.player.lives);
            hasher.update_u32(self.player.score);
            hasher.update_bool(self.player.on_ground);
            hasher.update_bool(self.player.facing_right);
            hasher.update_f32(self.player.invulnerable_ms);
            hasher.update_f32(self.player.power_ups.jump_ms);
            hasher.update_f32(self.player.power_ups.invincible_ms);
            hasher.update_f32(self.player.power_ups.dash_ms);
            hasher.update_f32(self.player.power_ups.magnet_ms);

            // Stage entities
            self.stage.hash_into(hasher);
        })
    }
}

// =============================================================================
// TESTS
// =============================================================================
