//! Enemy AI
//!
//! Five enemy kinds, dispatched on [`EnemyKind`]. All share the same fields;
//! behavior differences live entirely in the per-kind update paths. Grounded
//! kinds run the same simplified platform resolution (snap to the landing y,
//! zero vertical velocity) and die when they fall out of the world; flyers
//! ignore gravity and cannot fall to their death.

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::config::EnemyTuning;
use crate::core::rect::Rect;
use crate::core::rng::DeterministicRng;
use crate::core::vec2::Vec2;
use crate::game::collision::check_platform_collision;
use crate::game::platform::Platform;
use crate::{CANVAS_HEIGHT, OUT_OF_BOUNDS_MARGIN};

/// Enemy box size in pixels.
pub const ENEMY_SIZE: f32 = 24.0;

/// Enemy behavior kind.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[repr(u8)]
pub enum EnemyKind {
    /// Horizontal patrol, gravity-affected
    Basic = 0,
    /// Patrol plus periodic hops on a randomized cooldown
    Jumper = 1,
    /// Patrols until the player comes near, then pursues
    Chaser = 2,
    /// No gravity; oscillates vertically while patrolling
    Flyer = 3,
    /// Slow, short patrol, three hit points
    Tank = 4,
}

impl EnemyKind {
    /// Hit points a freshly spawned enemy of this kind has.
    #[inline]
    pub fn health(self) -> u32 {
        match self {
            EnemyKind::Tank => 3,
            _ => 1,
        }
    }
}

/// An enemy in the active stage.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Enemy {
    /// Stable identifier within the stage
    pub id: u32,

    /// Behavior kind
    pub kind: EnemyKind,

    /// Top-left corner
    pub position: Vec2,

    /// Current velocity (pixels per frame)
    pub velocity: Vec2,

    /// Patrol direction: -1 or +1
    pub direction: f32,

    /// Patrol anchor
    pub start_x: f32,

    /// Patrol half-range around the anchor
    pub patrol_distance: f32,

    /// Remaining hit points
    pub health: u32,

    /// Terminal: set once, then swept
    pub is_dead: bool,

    /// On a platform this frame
    pub on_ground: bool,

    /// Jumper: remaining cooldown until the next hop
    hop_cooldown_ms: f32,

    /// Flyer: accumulated oscillation phase in radians
    phase: f32,

    /// Flyer: vertical oscillation anchor
    origin_y: f32,
}

impl Enemy {
    /// Create a new enemy.
    pub fn new(id: u32, kind: EnemyKind, position: Vec2, patrol_distance: f32) -> Self {
        Self {
            id,
            kind,
            position,
            velocity: Vec2::ZERO,
            direction: 1.0,
            start_x: position.x,
            patrol_distance,
            health: kind.health(),
            is_dead: false,
            on_ground: false,
            hop_cooldown_ms: 0.0,
            phase: 0.0,
            origin_y: position.y,
        }
    }

    /// Bounding box for collision tests.
    #[inline]
    pub fn bounds(&self) -> Rect {
        Rect::from_pos(self.position, ENEMY_SIZE, ENEMY_SIZE)
    }

    /// Apply one stomp's worth of damage.
    ///
    /// Returns true if the enemy died from this hit.
    pub fn hit(&mut self) -> bool {
        if self.is_dead {
            return false;
        }
        self.health = self.health.saturating_sub(1);
        if self.health == 0 {
            self.is_dead = true;
            return true;
        }
        false
    }

    /// Advance one frame of AI.
    ///
    /// `dt_norm` is the delta normalized to the 60 Hz baseline; `dt_ms` the
    /// sanitized raw delta for timers.
    #[allow(clippy::too_many_arguments)]
    pub fn update(
        &mut self,
        dt_norm: f32,
        dt_ms: f32,
        player_position: Vec2,
        platforms: &[Platform],
        stage_width: f32,
        rng: &mut DeterministicRng,
        tuning: &EnemyTuning,
    ) {
        if self.is_dead {
            return;
        }

        // A corrupt entity must not poison the frame: skip it, keep going.
        if !self.position.is_finite() || !self.velocity.is_finite() {
            warn!(enemy = self.id, "skipping enemy with non-finite state");
            return;
        }

        match self.kind {
            EnemyKind::Basic => {
                self.patrol(tuning.patrol_speed, self.patrol_distance, stage_width);
                self.fall(dt_norm, tuning);
            }
            EnemyKind::Jumper => {
                self.patrol(tuning.patrol_speed, self.patrol_distance, stage_width);
                self.hop_cooldown_ms -= dt_ms;
                if self.hop_cooldown_ms <= 0.0 && self.on_ground {
                    self.velocity.y = tuning.hop_impulse;
                    self.hop_cooldown_ms = rng.next_ms(tuning.hop_min_ms, tuning.hop_max_ms);
                }
                self.fall(dt_norm, tuning);
            }
            EnemyKind::Chaser => {
                let dx = player_position.x - self.position.x;
                let dy = player_position.y - self.position.y;
                if dx.abs() < tuning.chase_range && dy.abs() < tuning.chase_band {
                    // Turn toward the player and close in faster than patrol
                    self.direction = if dx < 0.0 { -1.0 } else { 1.0 };
                    let target = self.direction * tuning.chase_speed;
                    let step = tuning.chase_acceleration * dt_norm;
                    if self.velocity.x < target {
                        self.velocity.x = (self.velocity.x + step).min(target);
                    } else {
                        self.velocity.x = (self.velocity.x - step).max(target);
                    }
                } else {
                    self.patrol(tuning.patrol_speed, self.patrol_distance, stage_width);
                }
                self.fall(dt_norm, tuning);
            }
            EnemyKind::Flyer => {
                self.patrol(tuning.patrol_speed, self.patrol_distance, stage_width);
                self.phase += tuning.flyer_frequency * (dt_ms / 1000.0);
                if self.phase > std::f32::consts::TAU {
                    self.phase -= std::f32::consts::TAU;
                }
                self.position.x += self.velocity.x;
                self.position.y = self.origin_y + self.phase.sin() * tuning.flyer_amplitude;
                // No gravity, no ground, no fall death
                self.on_ground = false;
                return;
            }
            EnemyKind::Tank => {
                self.patrol(
                    tuning.tank_speed,
                    self.patrol_distance * tuning.tank_patrol_factor,
                    stage_width,
                );
                self.fall(dt_norm, tuning);
            }
        }

        self.position.x += self.velocity.x;
        self.position.y += self.velocity.y;

        self.resolve_platforms(platforms);

        // Fell out of the world
        if self.position.y > CANVAS_HEIGHT + OUT_OF_BOUNDS_MARGIN {
            self.is_dead = true;
        }
    }

    /// Shared patrol: walk at `speed`, reversing at patrol bounds and
    /// world edges.
    fn patrol(&mut self, speed: f32, range: f32, stage_width: f32) {
        if self.position.x <= self.start_x - range || self.position.x <= 0.0 {
            self.direction = 1.0;
        } else if self.position.x >= self.start_x + range
            || self.position.x + ENEMY_SIZE >= stage_width
        {
            self.direction = -1.0;
        }
        self.velocity.x = speed * self.direction;
    }

    /// Gravity for grounded kinds.
    fn fall(&mut self, dt_norm: f32, tuning: &EnemyTuning) {
        self.velocity.y = (self.velocity.y + tuning.gravity * dt_norm).min(tuning.max_fall_speed);
    }

    /// Simplified platform resolution: snap to the landing y, zero vertical
    /// velocity.
    fn resolve_platforms(&mut self, platforms: &[Platform]) {
        self.on_ground = false;
        let bounds = self.bounds();
        for platform in platforms {
            let hit = check_platform_collision(&bounds, self.velocity, platform);
            if hit.is_on_ground {
                if let Some(landing) = hit.landing {
                    self.position.y = self.position.y.min(landing.landing_y);
                }
                self.velocity.y = 0.0;
                self.on_ground = true;
            }
        }
    }
}

// =============================================================================
// TESTS
// =============================================================================
