//! Stage Orchestration
//!
//! The stage owns the entity collections for the active stage plus its
//! environment and RNG. Stages are regenerated (never mutated in place) on
//! transition; the player is owned by the session and outlives stages.

use serde::{Deserialize, Serialize};

use crate::core::rng::DeterministicRng;
use crate::core::vec2::Vec2;
use crate::game::collectible::{Coin, PowerUp};
use crate::game::enemy::Enemy;
use crate::game::layout::stage_layout;
use crate::game::platform::Platform;
use crate::game::player::PLAYER_WIDTH;
use crate::{CANVAS_HEIGHT, CANVAS_WIDTH};

/// Visual theme tag for a stage. Presentation-only; the simulation never
/// branches on it.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[repr(u8)]
pub enum Theme {
    /// Rolling grass
    Meadow = 0,
    /// Dense trees
    Forest = 1,
    /// Underground
    Cavern = 2,
    /// Ice and snow
    Glacier = 3,
    /// Bog and mud
    Swamp = 4,
    /// Sand and heat
    Dunes = 5,
    /// Crumbling stonework
    Ruins = 6,
    /// Wind and rain
    Storm = 7,
    /// Sheer rock
    Crags = 8,
    /// The top
    Summit = 9,
}

/// Per-stage scalar overrides read by the player controller every frame.
///
/// Set once at stage generation; never mutated mid-stage.
#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
pub struct Environment {
    /// Horizontal acceleration bias (wind), per normalized frame
    pub wind_x: f32,
    /// Gravity multiplier
    pub gravity_scale: f32,
    /// Friction multiplier
    pub friction_scale: f32,
    /// Slip factor an ice landing installs (0.5-0.8 depending on stage)
    pub ice_grip: f32,
    /// Visual theme
    pub theme: Theme,
}

impl Default for Environment {
    fn default() -> Self {
        Self {
            wind_x: 0.0,
            gravity_scale: 1.0,
            friction_scale: 1.0,
            ice_grip: 0.5,
            theme: Theme::Meadow,
        }
    }
}

/// The stage-level facts injected into the player's update call.
#[derive(Clone, Copy, Debug)]
pub struct StageContext {
    /// Total stage width in pixels
    pub stage_width: f32,
    /// Height of the visible world; falling past this (plus margin) is death
    pub canvas_height: f32,
    /// Where damage respawns the player
    pub respawn_point: Vec2,
}

/// Distance from the right edge at which the stage counts as completed.
const STAGE_EXIT_MARGIN: f32 = 4.0;

/// The active stage: entity collections, environment, camera.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Stage {
    /// Zero-based stage index
    pub index: u32,

    /// Total stage width in pixels
    pub width: f32,

    /// Per-stage physics overrides
    pub environment: Environment,

    /// Where the player enters the stage
    pub spawn_point: Vec2,

    /// Where damage respawns the player
    pub respawn_point: Vec2,

    /// Camera left edge, tracking the player
    pub camera_x: f32,

    /// Platforms, including the ground
    pub platforms: Vec<Platform>,

    /// Live enemies
    pub enemies: Vec<Enemy>,

    /// Uncollected coins
    pub coins: Vec<Coin>,

    /// Uncollected power-ups
    pub power_ups: Vec<PowerUp>,

    /// Stage-local RNG (jumper cooldowns)
    pub rng: DeterministicRng,
}

impl Stage {
    /// Generate a stage from its hand-authored layout.
    ///
    /// Entity IDs are assigned in layout order, so two generations of the
    /// same stage are identical.
    pub fn generate(index: u32, run_seed: u64) -> Self {
        let layout = stage_layout(index);
        let rng = DeterministicRng::for_stage(run_seed, index);

        let platforms: Vec<Platform> = layout
            .platforms
            .into_iter()
            .enumerate()
            .map(|(i, spec)| spec.build(i as u32))
            .collect();

        let enemies: Vec<Enemy> = layout
            .enemies
            .into_iter()
            .enumerate()
            .map(|(i, spec)| spec.build(i as u32))
            .collect();

        let coins: Vec<Coin> = layout
            .coins
            .into_iter()
            .enumerate()
            .map(|(i, position)| Coin::new(i as u32, position))
            .collect();

        let power_ups: Vec<PowerUp> = layout
            .power_ups
            .into_iter()
            .enumerate()
            .map(|(i, (kind, position))| PowerUp::new(i as u32, kind, position))
            .collect();

        Self {
            index,
            width: layout.width,
            environment: layout.environment,
            spawn_point: layout.spawn_point,
            respawn_point: layout.spawn_point,
            camera_x: 0.0,
            platforms,
            enemies,
            coins,
            power_ups,
            rng,
        }
    }

    /// The stage facts the player controller needs each frame.
    pub fn context(&self) -> StageContext {
        StageContext {
            stage_width: self.width,
            canvas_height: CANVAS_HEIGHT,
            respawn_point: self.respawn_point,
        }
    }

    /// Advance platform behavior (moving oscillation).
    pub fn update_platforms(&mut self, dt_ms: f32) {
        for platform in &mut self.platforms {
            platform.update(dt_ms);
        }
    }

    /// Advance enemy AI.
    pub fn update_enemies(
        &mut self,
        dt_norm: f32,
        dt_ms: f32,
        player_position: Vec2,
        tuning: &crate::config::EnemyTuning,
    ) {
        for enemy in &mut self.enemies {
            enemy.update(
                dt_norm,
                dt_ms,
                player_position,
                &self.platforms,
                self.width,
                &mut self.rng,
                tuning,
            );
        }
    }

    /// End-of-frame sweep: drop terminal entities.
    pub fn sweep(&mut self) {
        self.platforms.retain(|p| !p.destroyed);
        self.enemies.retain(|e| !e.is_dead);
        self.coins.retain(|c| !c.collected);
        self.power_ups.retain(|p| !p.collected);
    }

    /// Has the player reached the stage's right edge?
    pub fn boundary_reached(&self, player_x: f32) -> bool {
        player_x >= self.width - PLAYER_WIDTH - STAGE_EXIT_MARGIN
    }

    /// Track the player with the camera, clamped to the stage.
    pub fn update_camera(&mut self, player_x: f32) {
        let max_camera = (self.width - CANVAS_WIDTH).max(0.0);
        self.camera_x = (player_x - CANVAS_WIDTH * 0.5).clamp(0.0, max_camera);
    }

    /// Hash the stage's mutable state for replay verification.
    pub fn hash_into(&self, hasher: &mut crate::core::hash::StateHasher) {
        hasher.update_u32(self.index);
        hasher.update_f32(self.camera_x);

        for platform in &self.platforms {
            hasher.update_u32(platform.id);
            hasher.update_vec2(platform.position);
            hasher.update_f32(platform.phase());
            hasher.update_u32(platform.health.unwrap_or(0));
        }
        for enemy in &self.enemies {
            hasher.update_u32(enemy.id);
            hasher.update_vec2(enemy.position);
            hasher.update_vec2(enemy.velocity);
            hasher.update_u32(enemy.health);
        }
        for coin in &self.coins {
            hasher.update_u32(coin.id);
            hasher.update_bool(coin.collected);
        }
        for power_up in &self.power_ups {
            hasher.update_u32(power_up.id);
            hasher.update_bool(power_up.collected);
        }
    }
}

// =============================================================================
// TESTS
// =============================================================================
