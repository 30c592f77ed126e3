//! Player Controller
//!
//! The per-frame integration of player motion: horizontal smoothing, the
//! jump system (coyote time, jump buffering, double jump, wall jump, dash),
//! gravity/wind/friction, platform resolution, damage and scoring.
//!
//! The update order is load-bearing: each stage depends on the previous
//! stage's output (input -> dash -> horizontal -> jump -> gravity -> wind ->
//! integrate -> platforms -> wall slide -> bounds -> enemies -> coins ->
//! power-ups -> timers).
//!
//! Nothing here reaches outward: the environment and stage context are
//! injected per call, and every discrete outcome is pushed as a
//! [`GameEvent`] for the orchestrator to drain.

use serde::{Deserialize, Serialize};

use crate::config::Tuning;
use crate::core::rect::Rect;
use crate::core::vec2::Vec2;
use crate::game::collectible::{Coin, PowerUp, PowerUpKind};
use crate::game::collision::{
    check_coin_collision, check_enemy_collision, check_platform_collision,
    check_power_up_collision, check_wall_contact, magnet_reaches, WallSide,
};
use crate::game::enemy::Enemy;
use crate::game::events::GameEvent;
use crate::game::input::InputSnapshot;
use crate::game::platform::{Platform, PlatformKind};
use crate::game::stage::{Environment, StageContext};
use crate::OUT_OF_BOUNDS_MARGIN;

/// Player box width in pixels.
pub const PLAYER_WIDTH: f32 = 32.0;

/// Player box height in pixels.
pub const PLAYER_HEIGHT: f32 = 32.0;

/// Lives at the start of a run.
pub const STARTING_LIVES: u32 = 3;

/// Presentation-facing action state, derived every frame from physics
/// state. Never authoritative.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum PlayerAction {
    /// Standing still on ground
    Idle,
    /// Moving on ground
    Run,
    /// Airborne, ascending
    Jump,
    /// Airborne, descending
    Fall,
    /// Mid-dash
    Dash,
    /// Sliding down a wall
    WallSlide,
    /// Stage-clear celebration
    Celebrate,
}

/// Active power-up timers. An effect is active while its timer is positive.
#[derive(Clone, Copy, Debug, Default, Serialize, Deserialize)]
pub struct PowerUpTimers {
    /// Jump boost remaining
    pub jump_ms: f32,
    /// Invincibility remaining
    pub invincible_ms: f32,
    /// Dash boost remaining
    pub dash_ms: f32,
    /// Magnet remaining
    pub magnet_ms: f32,
}

impl PowerUpTimers {
    /// Jump boost active?
    #[inline]
    pub fn jump_active(&self) -> bool {
        self.jump_ms > 0.0
    }

    /// Invincibility active?
    #[inline]
    pub fn invincible_active(&self) -> bool {
        self.invincible_ms > 0.0
    }

    /// Dash boost active?
    #[inline]
    pub fn dash_active(&self) -> bool {
        self.dash_ms > 0.0
    }

    /// Magnet active?
    #[inline]
    pub fn magnet_active(&self) -> bool {
        self.magnet_ms > 0.0
    }

    fn tick(&mut self, dt_ms: f32) {
        self.jump_ms = (self.jump_ms - dt_ms).max(0.0);
        self.invincible_ms = (self.invincible_ms - dt_ms).max(0.0);
        self.dash_ms = (self.dash_ms - dt_ms).max(0.0);
        self.magnet_ms = (self.magnet_ms - dt_ms).max(0.0);
    }
}

/// The player. Created once at game start and repositioned (never
/// recreated) on stage transitions, damage respawns, and restarts.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Player {
    /// Top-left corner
    pub position: Vec2,

    /// Current velocity (pixels per frame)
    pub velocity: Vec2,

    /// Facing direction for dash and presentation
    pub facing_right: bool,

    /// Remaining lives
    pub lives: u32,

    /// Accumulated score
    pub score: u32,

    /// Standing on a platform this frame
    pub on_ground: bool,

    /// Post-damage invulnerability remaining
    pub invulnerable_ms: f32,

    /// Active power-up timers
    pub power_ups: PowerUpTimers,

    /// Mid-dash this frame
    pub dashing: bool,

    /// Sliding down a wall this frame
    pub wall_sliding: bool,

    // Jump machinery
    coyote_ms: f32,
    jump_buffer_ms: f32,
    air_jumps_left: u32,
    jump_held: bool,

    // Dash machinery
    dash_ms: f32,
    dash_cooldown_ms: f32,
    dash_direction: f32,

    // Wall machinery
    touching_wall_left: bool,
    touching_wall_right: bool,
    wall_lock_ms: f32,

    /// Friction scale installed by the last platform landed on
    surface_friction: f32,

    // Stage-clear celebration
    celebrating: bool,
    celebrate_ms: f32,
}

impl Player {
    /// Create the player at a position with full defaults.
    pub fn new(x: f32, y: f32) -> Self {
        Self {
            position: Vec2::new(x, y),
            velocity: Vec2::ZERO,
            facing_right: true,
            lives: STARTING_LIVES,
            score: 0,
            on_ground: false,
            invulnerable_ms: 0.0,
            power_ups: PowerUpTimers::default(),
            dashing: false,
            wall_sliding: false,
            coyote_ms: 0.0,
            jump_buffer_ms: 0.0,
            air_jumps_left: 0,
            jump_held: false,
            dash_ms: 0.0,
            dash_cooldown_ms: 0.0,
            dash_direction: 1.0,
            touching_wall_left: false,
            touching_wall_right: false,
            wall_lock_ms: 0.0,
            surface_friction: 1.0,
            celebrating: false,
            celebrate_ms: 0.0,
        }
    }

    /// Full reset to defaults at a position (restart).
    pub fn reset(&mut self, x: f32, y: f32) {
        *self = Self::new(x, y);
    }

    /// Reposition for a stage transition. Motion stops; lives, score and
    /// power-ups carry over.
    pub fn reposition(&mut self, position: Vec2) {
        self.position = position;
        self.velocity = Vec2::ZERO;
        self.on_ground = false;
        self.dashing = false;
        self.wall_sliding = false;
        self.touching_wall_left = false;
        self.touching_wall_right = false;
    }

    /// Bounding box for collision tests.
    #[inline]
    pub fn bounds(&self) -> Rect {
        Rect::from_pos(self.position, PLAYER_WIDTH, PLAYER_HEIGHT)
    }

    /// Start the stage-clear celebration.
    pub fn celebrate(&mut self, duration_ms: f32) {
        self.celebrating = true;
        self.celebrate_ms = duration_ms;
    }

    /// Derived presentation state. Pure function of the physics flags.
    pub fn action(&self) -> PlayerAction {
        if self.celebrating {
            PlayerAction::Celebrate
        } else if self.dashing {
            PlayerAction::Dash
        } else if self.wall_sliding {
            PlayerAction::WallSlide
        } else if !self.on_ground {
            if self.velocity.y < 0.0 {
                PlayerAction::Jump
            } else {
                PlayerAction::Fall
            }
        } else if self.velocity.x.abs() > 0.1 {
            PlayerAction::Run
        } else {
            PlayerAction::Idle
        }
    }

    /// Advance one frame.
    ///
    /// `dt_norm` is the delta normalized against the 60 Hz baseline and
    /// scales accelerations and decays; `dt_ms` is the sanitized raw delta
    /// and drives the millisecond timers. Velocities are in pixels per
    /// frame, so integration itself is unscaled.
    #[allow(clippy::too_many_arguments)]
    pub fn update(
        &mut self,
        input: &InputSnapshot,
        dt_norm: f32,
        dt_ms: f32,
        env: &Environment,
        ctx: &StageContext,
        platforms: &mut [Platform],
        enemies: &mut [Enemy],
        coins: &mut [Coin],
        power_ups: &mut [PowerUp],
        tuning: &Tuning,
        frame: u64,
        events: &mut Vec<GameEvent>,
    ) {
        let p = &tuning.player;

        // 1. Input snapshot. Left+right cancellation happens in horizontal().
        let move_dir = input.horizontal();
        if move_dir > 0.0 {
            self.facing_right = true;
        } else if move_dir < 0.0 {
            self.facing_right = false;
        }
        let jump_pressed = input.jump && !self.jump_held;
        let jump_released = !input.jump && self.jump_held;
        self.jump_held = input.jump;

        // 2. Dash
        self.update_dash(input.dash, dt_ms, tuning);

        // 3. Horizontal movement (suppressed for the dash duration)
        if !self.dashing {
            self.update_horizontal(move_dir, dt_norm, env, tuning);
        }

        // 4. Jump system
        self.update_jump(jump_pressed, jump_released, dt_ms, tuning);

        // 5. Gravity
        self.velocity.y = (self.velocity.y + p.gravity * env.gravity_scale * dt_norm)
            .clamp(p.max_rise_speed, p.max_fall_speed);

        // 6. Wind
        if env.wind_x != 0.0 {
            self.velocity.x =
                (self.velocity.x + env.wind_x * dt_norm).clamp(-p.max_speed, p.max_speed);
        }

        // 7. Integrate position
        self.position.x += self.velocity.x;
        self.position.y += self.velocity.y;

        // 8. Platform collision resolution + wall probe
        self.resolve_platforms(platforms, env, ctx, tuning, frame, events);

        // 9. Wall slide
        self.update_wall_slide(move_dir, tuning);

        // 10. World bounds
        self.apply_world_bounds(ctx, tuning, frame, events);

        // 11. Enemy collision
        self.resolve_enemies(enemies, ctx, tuning, frame, events);

        // 12. Coin collection
        self.collect_coins(coins, tuning, frame, events);

        // 13. Power-up collection
        self.collect_power_ups(power_ups, tuning, frame, events);

        // 14. Timers
        self.invulnerable_ms = (self.invulnerable_ms - dt_ms).max(0.0);
        self.power_ups.tick(dt_ms);
        if self.celebrating {
            self.celebrate_ms -= dt_ms;
            if self.celebrate_ms <= 0.0 {
                self.celebrating = false;
                self.celebrate_ms = 0.0;
            }
        }
    }

    /// Dash state machine.
    fn update_dash(&mut self, dash_input: bool, dt_ms: f32, tuning: &Tuning) {
        let p = &tuning.player;

        self.dash_cooldown_ms = (self.dash_cooldown_ms - dt_ms).max(0.0);

        if self.dashing {
            self.dash_ms -= dt_ms;
            if self.dash_ms <= 0.0 {
                self.dashing = false;
                self.dash_ms = 0.0;
                self.dash_cooldown_ms = if self.power_ups.dash_active() {
                    p.dash_cooldown_ms * 0.5
                } else {
                    p.dash_cooldown_ms
                };
            } else {
                // Horizontal velocity stays locked for the duration
                self.velocity.x = p.dash_speed * self.dash_direction;
            }
        }

        if dash_input && !self.dashing && self.dash_cooldown_ms <= 0.0 {
            self.dashing = true;
            self.dash_ms = if self.power_ups.dash_active() {
                p.dash_duration_ms * p.dash_boost_duration_factor
            } else {
                p.dash_duration_ms
            };
            self.dash_direction = if self.facing_right { 1.0 } else { -1.0 };
            self.velocity.x = p.dash_speed * self.dash_direction;
            // Dashing arrests half of any fall in progress
            if self.velocity.y > 0.0 {
                self.velocity.y *= 0.5;
            }
        }
    }

    /// Horizontal smoothing: accelerate toward the run speed while input is
    /// held, decelerate and apply friction when it is not.
    fn update_horizontal(&mut self, move_dir: f32, dt_norm: f32, env: &Environment, tuning: &Tuning) {
        let p = &tuning.player;

        if move_dir != 0.0 {
            let target = move_dir * p.run_speed;
            let step = p.acceleration * dt_norm;
            if self.velocity.x < target {
                self.velocity.x = (self.velocity.x + step).min(target);
            } else {
                self.velocity.x = (self.velocity.x - step).max(target);
            }
        } else {
            let step = p.deceleration * dt_norm;
            if self.velocity.x > 0.0 {
                self.velocity.x = (self.velocity.x - step).max(0.0);
            } else {
                self.velocity.x = (self.velocity.x + step).min(0.0);
            }

            // Friction only without directional input, so it never fights
            // active acceleration
            let factor = if self.on_ground {
                let strength = env.friction_scale * self.surface_friction;
                (1.0 - (1.0 - p.ground_friction) * strength).clamp(0.0, 1.0)
            } else {
                p.air_resistance
            };
            self.velocity.x *= factor.powf(dt_norm);

            if self.velocity.x.abs() < p.stop_threshold {
                self.velocity.x = 0.0;
            }
        }

        self.velocity.x = self.velocity.x.clamp(-p.max_speed, p.max_speed);
    }

    /// Jump system: coyote time, jump buffering, wall jump, air jumps,
    /// variable height.
    fn update_jump(&mut self, jump_pressed: bool, jump_released: bool, dt_ms: f32, tuning: &Tuning) {
        let p = &tuning.player;

        // Coyote countdown holds at full while grounded; landing also
        // restores the air-jump charges
        if self.on_ground {
            self.coyote_ms = p.coyote_ms;
            self.air_jumps_left = p.max_air_jumps;
        } else {
            self.coyote_ms = (self.coyote_ms - dt_ms).max(0.0);
        }

        // Jump buffer refills on press, decays otherwise
        if jump_pressed {
            self.jump_buffer_ms = p.jump_buffer_ms;
        } else {
            self.jump_buffer_ms = (self.jump_buffer_ms - dt_ms).max(0.0);
        }

        self.wall_lock_ms = (self.wall_lock_ms - dt_ms).max(0.0);

        if self.jump_buffer_ms > 0.0 {
            let force = if self.power_ups.jump_active() {
                p.jump_force * p.jump_boost_factor
            } else {
                p.jump_force
            };

            if self.on_ground || self.coyote_ms > 0.0 {
                self.velocity.y = force;
                self.on_ground = false;
                self.coyote_ms = 0.0;
                self.jump_buffer_ms = 0.0;
            } else if self.wall_sliding {
                // Wall jump: impulse away from the wall, then a lockout so
                // the same wall is not re-grabbed immediately
                let away = if self.touching_wall_left { 1.0 } else { -1.0 };
                self.velocity.x = p.wall_jump_kick * away;
                self.velocity.y = force;
                self.wall_sliding = false;
                self.wall_lock_ms = p.wall_lock_ms;
                self.jump_buffer_ms = 0.0;
            } else if self.air_jumps_left > 0 {
                self.air_jumps_left -= 1;
                self.velocity.y = force;
                self.jump_buffer_ms = 0.0;
            }
        }

        // Variable jump height: releasing while ascending cuts the rise
        if jump_released && self.velocity.y < 0.0 {
            self.velocity.y *= p.jump_cut_factor;
        }
    }

    /// Platform resolution per the landing decision table, plus the coarse
    /// wall-contact probe.
    fn resolve_platforms(
        &mut self,
        platforms: &mut [Platform],
        env: &Environment,
        ctx: &StageContext,
        tuning: &Tuning,
        frame: u64,
        events: &mut Vec<GameEvent>,
    ) {
        let p = &tuning.player;
        let was_on_ground = self.on_ground;
        self.on_ground = false;
        self.touching_wall_left = false;
        self.touching_wall_right = false;

        let mut spike_hit = false;

        for platform in platforms.iter_mut() {
            let bounds = self.bounds();
            let hit = check_platform_collision(&bounds, self.velocity, platform);
            let Some(landing) = hit.landing else {
                continue;
            };
            if !hit.is_on_ground {
                continue;
            }

            // Snap to the higher of the current and reported y so repeated
            // contacts never sink the player into the platform
            self.position.y = self.position.y.min(landing.landing_y);

            match landing.kind {
                PlatformKind::Bounce => {
                    // Launch; deliberately NOT marked grounded
                    self.velocity.y = p.jump_force * p.bounce_factor;
                }
                PlatformKind::Spike => {
                    self.velocity.y = 0.0;
                    self.on_ground = true;
                    self.surface_friction = 1.0;
                    spike_hit = true;
                }
                PlatformKind::Ice | PlatformKind::Mud => {
                    self.velocity.y = 0.0;
                    self.on_ground = true;
                    self.surface_friction = platform.surface_friction(env.ice_grip);
                }
                PlatformKind::Breakable => {
                    self.velocity.y = 0.0;
                    self.on_ground = true;
                    self.surface_friction = 1.0;
                    // Each fresh landing chips the platform
                    if !was_on_ground && platform.damage() {
                        events.push(GameEvent::platform_broken(frame, platform.id));
                    }
                }
                PlatformKind::Normal | PlatformKind::Moving => {
                    self.velocity.y = 0.0;
                    self.on_ground = true;
                    self.surface_friction = 1.0;
                }
            }
        }

        // Coarse wall probe, only while airborne and not locked out after
        // a wall jump
        if !self.on_ground && self.wall_lock_ms <= 0.0 {
            let bounds = self.bounds();
            for platform in platforms.iter() {
                match check_wall_contact(&bounds, platform) {
                    Some(WallSide::Left) => self.touching_wall_left = true,
                    Some(WallSide::Right) => self.touching_wall_right = true,
                    None => {}
                }
            }
        }

        if spike_hit {
            self.take_damage(ctx, tuning, frame, events);
        }
    }

    /// Wall slide: cap the fall against a wall held toward.
    fn update_wall_slide(&mut self, move_dir: f32, tuning: &Tuning) {
        let p = &tuning.player;
        self.wall_sliding = false;

        if !self.on_ground && self.velocity.y > 0.0 {
            let against_left = self.touching_wall_left && move_dir < 0.0;
            let against_right = self.touching_wall_right && move_dir > 0.0;
            if against_left || against_right {
                self.velocity.y = self.velocity.y.min(p.wall_slide_speed);
                self.on_ground = false;
                self.wall_sliding = true;
            }
        }
    }

    /// Clamp to the stage horizontally; falling out of the world is damage.
    fn apply_world_bounds(
        &mut self,
        ctx: &StageContext,
        tuning: &Tuning,
        frame: u64,
        events: &mut Vec<GameEvent>,
    ) {
        let max_x = ctx.stage_width - PLAYER_WIDTH;
        if self.position.x < 0.0 {
            self.position.x = 0.0;
            if self.velocity.x < 0.0 {
                self.velocity.x = 0.0;
            }
        } else if self.position.x > max_x {
            self.position.x = max_x;
            if self.velocity.x > 0.0 {
                self.velocity.x = 0.0;
            }
        }

        if self.position.y > ctx.canvas_height + OUT_OF_BOUNDS_MARGIN {
            self.take_damage(ctx, tuning, frame, events);
        }
    }

    /// Enemy contact: stomps defeat, anything else hurts.
    fn resolve_enemies(
        &mut self,
        enemies: &mut [Enemy],
        ctx: &StageContext,
        tuning: &Tuning,
        frame: u64,
        events: &mut Vec<GameEvent>,
    ) {
        // Contact is ignored entirely while protected
        if self.invulnerable_ms > 0.0 || self.power_ups.invincible_active() {
            return;
        }

        let p = &tuning.player;
        let mut damaged = false;

        for enemy in enemies.iter_mut() {
            // A corrupt entity is skipped, never resolved
            if enemy.is_dead || !enemy.position.is_finite() {
                continue;
            }
            let bounds = self.bounds();
            let enemy_bounds = enemy.bounds();
            if !check_enemy_collision(&bounds, &enemy_bounds) {
                continue;
            }

            let stomp = self.velocity.y > 0.0 && bounds.top() < enemy_bounds.top();
            if stomp {
                // A stomp always scores and always bounces, even when the
                // enemy survives it
                self.score = self.score.saturating_add(tuning.score.stomp);
                self.velocity.y = p.stomp_bounce;
                if enemy.hit() {
                    events.push(GameEvent::enemy_defeated(
                        frame,
                        enemy.id,
                        enemy.kind,
                        tuning.score.stomp,
                    ));
                } else {
                    events.push(GameEvent::enemy_stomped(frame, enemy.id, enemy.health));
                }
            } else {
                damaged = true;
                break;
            }
        }

        if damaged {
            self.take_damage(ctx, tuning, frame, events);
        }
    }

    /// Coin collection; magnet widens the reach to a radius.
    fn collect_coins(
        &mut self,
        coins: &mut [Coin],
        tuning: &Tuning,
        frame: u64,
        events: &mut Vec<GameEvent>,
    ) {
        let magnet = self.power_ups.magnet_active();
        let center = self.bounds().center();

        for coin in coins.iter_mut() {
            if coin.collected || !coin.position.is_finite() {
                continue;
            }
            let collected = if magnet {
                magnet_reaches(center, coin.center(), tuning.player.magnet_radius)
            } else {
                check_coin_collision(&self.bounds(), &coin.bounds())
            };
            if collected {
                coin.collected = true;
                self.score = self.score.saturating_add(tuning.score.coin);
                events.push(GameEvent::coin_collected(
                    frame,
                    coin.id,
                    tuning.score.coin,
                    self.score,
                ));
            }
        }
    }

    /// Power-up collection applies the effect and starts its timer.
    fn collect_power_ups(
        &mut self,
        power_ups: &mut [PowerUp],
        tuning: &Tuning,
        frame: u64,
        events: &mut Vec<GameEvent>,
    ) {
        for power_up in power_ups.iter_mut() {
            if power_up.collected || !power_up.position.is_finite() {
                continue;
            }
            if check_power_up_collision(&self.bounds(), &power_up.bounds()) {
                power_up.collected = true;
                self.apply_power_up(power_up.kind, tuning);
                events.push(GameEvent::power_up_collected(frame, power_up.id, power_up.kind));
            }
        }
    }

    /// Start a power-up effect.
    fn apply_power_up(&mut self, kind: PowerUpKind, tuning: &Tuning) {
        let durations = &tuning.power_ups;
        match kind {
            PowerUpKind::Jump => self.power_ups.jump_ms = durations.jump_ms,
            PowerUpKind::Invincible => self.power_ups.invincible_ms = durations.invincible_ms,
            PowerUpKind::Dash => self.power_ups.dash_ms = durations.dash_ms,
            PowerUpKind::Magnet => self.power_ups.magnet_ms = durations.magnet_ms,
        }
    }

    /// Damage contract: a no-op while protected; otherwise lose a life,
    /// start the invulnerability window, and respawn if lives remain.
    ///
    /// Whether the run is over (zero lives) is the orchestrator's call,
    /// not the player's.
    pub fn take_damage(
        &mut self,
        ctx: &StageContext,
        tuning: &Tuning,
        frame: u64,
        events: &mut Vec<GameEvent>,
    ) -> bool {
        if self.invulnerable_ms > 0.0 || self.power_ups.invincible_active() {
            return false;
        }

        self.lives = self.lives.saturating_sub(1);
        self.invulnerable_ms = tuning.player.invulnerability_ms;
        events.push(GameEvent::player_damaged(frame, self.lives, self.position));

        if self.lives > 0 {
            self.position = ctx.respawn_point;
            self.velocity = Vec2::ZERO;
        }
        true
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::enemy::EnemyKind;
    use crate::game::events::GameEventData;
    use crate::BASE_FRAME_MS;
    use proptest::prelude::*;

    struct World {
        player: Player,
        platforms: Vec<Platform>,
        enemies: Vec<Enemy>,
        coins: Vec<Coin>,
        power_ups: Vec<PowerUp>,
        env: Environment,
        ctx: StageContext,
        tuning: Tuning,
        events: Vec<GameEvent>,
        frame: u64,
    }

    impl World {
        fn new() -> Self {
            Self {
                player: Player::new(100.0, 368.0),
                platforms: vec![Platform::new(
                    0,
                    PlatformKind::Normal,
                    Vec2::new(0.0, 400.0),
                    2000.0,
                    40.0,
                )],
                enemies: Vec::new(),
                coins: Vec::new(),
                power_ups: Vec::new(),
                env: Environment::default(),
                ctx: StageContext {
                    stage_width: 2000.0,
                    canvas_height: 600.0,
                    respawn_point: Vec2::new(100.0, 368.0),
                },
                tuning: Tuning::default(),
                events: Vec::new(),
                frame: 0,
            }
        }

        fn step(&mut self, input: InputSnapshot) {
            self.frame += 1;
            self.player.update(
                &input,
                1.0,
                BASE_FRAME_MS,
                &self.env,
                &self.ctx,
                &mut self.platforms,
                &mut self.enemies,
                &mut self.coins,
                &mut self.power_ups,
                &self.tuning,
                self.frame,
                &mut self.events,
            );
        }

        fn settle(&mut self) {
            for _ in 0..10 {
                self.step(InputSnapshot::new());
            }
            assert!(self.player.on_ground);
        }
    }

    fn held(flags: u8) -> InputSnapshot {
        InputSnapshot::from_flags(flags)
    }

    #[test]
    fn test_landing_on_normal_platform() {
        let mut world = World::new();
        world.player.position = Vec2::new(100.0, 200.0);

        let mut landed_frame = None;
        for i in 0..200 {
            world.step(InputSnapshot::new());
            if world.player.on_ground {
                landed_frame = Some(i);
                break;
            }
        }

        assert!(landed_frame.is_some(), "player must land");
        assert_eq!(world.player.velocity.y, 0.0);
        assert_eq!(world.player.position.y, 400.0 - PLAYER_HEIGHT);
    }

    #[test]
    fn test_huge_fall_does_not_tunnel() {
        // Single frame with velocity.y = 500 (a huge delta): the swept
        // check must land the player instead of passing through. The fall
        // clamp is raised so the test speed survives the gravity step.
        let mut world = World::new();
        world.tuning.player.max_fall_speed = 600.0;
        world.player.position = Vec2::new(100.0, 0.0);
        world.player.velocity = Vec2::new(0.0, 500.0);

        world.step(InputSnapshot::new());

        assert!(world.player.on_ground);
        assert_eq!(world.player.velocity.y, 0.0);
        assert_eq!(world.player.position.y, 400.0 - PLAYER_HEIGHT);
    }

    #[test]
    fn test_run_accelerates_and_clamps() {
        let mut world = World::new();
        world.settle();

        let p = world.tuning.player.clone();
        for _ in 0..120 {
            world.step(held(InputSnapshot::FLAG_RIGHT));
            assert!(world.player.velocity.x <= p.max_speed);
        }
        assert_eq!(world.player.velocity.x, p.run_speed);
        assert!(world.player.facing_right);
    }

    #[test]
    fn test_stop_snaps_to_zero() {
        let mut world = World::new();
        world.settle();

        for _ in 0..60 {
            world.step(held(InputSnapshot::FLAG_RIGHT));
        }
        for _ in 0..60 {
            world.step(InputSnapshot::new());
        }
        assert_eq!(world.player.velocity.x, 0.0);
        assert_eq!(world.player.action(), PlayerAction::Idle);
    }

    #[test]
    fn test_left_and_right_cancel() {
        let mut world = World::new();
        world.settle();

        for _ in 0..30 {
            world.step(held(InputSnapshot::FLAG_LEFT | InputSnapshot::FLAG_RIGHT));
        }
        assert_eq!(world.player.velocity.x, 0.0);
    }

    #[test]
    fn test_jump_and_variable_height() {
        let mut world = World::new();
        world.settle();

        // Hold jump: full force
        world.step(held(InputSnapshot::FLAG_JUMP));
        let full_rise = world.player.velocity.y;
        assert!(full_rise < 0.0);
        assert!(!world.player.on_ground);

        // Release while ascending: rise is cut
        world.step(InputSnapshot::new());
        assert!(world.player.velocity.y > full_rise * 0.9);
    }

    #[test]
    fn test_coyote_time_allows_late_jump() {
        let mut world = World::new();
        world.settle();

        // Walk off the platform edge: simulate by forcing airborne state
        // with a fresh coyote window
        world.player.on_ground = false;
        world.player.position.y -= 1.0;

        // Two frames later (33ms < 100ms coyote) a jump still fires
        world.step(InputSnapshot::new());
        world.step(held(InputSnapshot::FLAG_JUMP));
        assert!(world.player.velocity.y < world.tuning.player.jump_force * 0.5);
    }

    #[test]
    fn test_double_jump_consumes_charge() {
        let mut world = World::new();
        world.settle();

        world.step(held(InputSnapshot::FLAG_JUMP));
        // Wait out the coyote window so the next jump is an air jump
        for _ in 0..10 {
            world.step(InputSnapshot::new());
        }
        assert!(!world.player.on_ground);

        world.step(held(InputSnapshot::FLAG_JUMP));
        assert_eq!(world.player.air_jumps_left, 0);

        // A third press mid-air does nothing
        world.step(InputSnapshot::new());
        let vy = world.player.velocity.y;
        world.step(held(InputSnapshot::FLAG_JUMP));
        assert!(world.player.velocity.y >= vy, "no third jump");
    }

    #[test]
    fn test_jump_buffer_fires_on_landing() {
        let mut world = World::new();
        world.player.position = Vec2::new(100.0, 330.0);
        world.player.velocity = Vec2::new(0.0, 8.0);
        world.player.air_jumps_left = 0;

        // Press jump while still falling, just above the ground
        world.step(held(InputSnapshot::FLAG_JUMP));
        // Within the buffer window the player lands and the jump fires
        let mut jumped = false;
        for _ in 0..8 {
            world.step(held(InputSnapshot::FLAG_JUMP));
            if world.player.velocity.y < -5.0 {
                jumped = true;
                break;
            }
        }
        assert!(jumped, "buffered jump must fire on landing");
    }

    #[test]
    fn test_bounce_platform_launches_without_grounding() {
        let mut world = World::new();
        world.platforms = vec![Platform::new(
            0,
            PlatformKind::Bounce,
            Vec2::new(0.0, 400.0),
            2000.0,
            40.0,
        )];
        world.player.position = Vec2::new(100.0, 360.0);
        world.player.velocity = Vec2::new(0.0, 10.0);

        world.step(InputSnapshot::new());

        assert!(!world.player.on_ground);
        assert!(world.player.velocity.y < 0.0, "bounce must launch upward");
    }

    #[test]
    fn test_spike_platform_damages_and_respawns() {
        let mut world = World::new();
        world.platforms = vec![Platform::new(
            0,
            PlatformKind::Spike,
            Vec2::new(0.0, 400.0),
            2000.0,
            40.0,
        )];
        world.player.position = Vec2::new(400.0, 360.0);
        world.player.velocity = Vec2::new(0.0, 10.0);

        world.step(InputSnapshot::new());

        assert_eq!(world.player.lives, STARTING_LIVES - 1);
        assert!(world.player.invulnerable_ms > 0.0);
        assert_eq!(world.player.position, world.ctx.respawn_point);
        assert!(world
            .events
            .iter()
            .any(|e| matches!(e.data, GameEventData::PlayerDamaged { .. })));
    }

    #[test]
    fn test_ice_and_mud_surface_friction() {
        let mut world = World::new();
        world.platforms[0] = Platform::new(0, PlatformKind::Ice, Vec2::new(0.0, 400.0), 2000.0, 40.0);
        world.settle();
        for _ in 0..60 {
            world.step(held(InputSnapshot::FLAG_RIGHT));
        }
        // Release on ice: the slide outlasts the same release on mud
        let mut ice_frames = 0;
        while world.player.velocity.x != 0.0 && ice_frames < 600 {
            world.step(InputSnapshot::new());
            ice_frames += 1;
        }

        let mut world = World::new();
        world.platforms[0] = Platform::new(0, PlatformKind::Mud, Vec2::new(0.0, 400.0), 2000.0, 40.0);
        world.settle();
        for _ in 0..60 {
            world.step(held(InputSnapshot::FLAG_RIGHT));
        }
        let mut mud_frames = 0;
        while world.player.velocity.x != 0.0 && mud_frames < 600 {
            world.step(InputSnapshot::new());
            mud_frames += 1;
        }

        assert!(
            ice_frames > mud_frames,
            "ice slide ({ice_frames}) must outlast mud ({mud_frames})"
        );
    }

    #[test]
    fn test_breakable_platform_chips_per_landing() {
        let mut world = World::new();
        world.platforms = vec![Platform::new(
            0,
            PlatformKind::Breakable,
            Vec2::new(0.0, 400.0),
            2000.0,
            40.0,
        )];
        world.player.position = Vec2::new(100.0, 360.0);
        world.player.velocity = Vec2::new(0.0, 8.0);

        world.step(InputSnapshot::new());
        assert_eq!(world.platforms[0].health, Some(Platform::BREAKABLE_HEALTH - 1));

        // Standing still does not chip further
        for _ in 0..30 {
            world.step(InputSnapshot::new());
        }
        assert_eq!(world.platforms[0].health, Some(Platform::BREAKABLE_HEALTH - 1));
    }

    #[test]
    fn test_dash_locks_horizontal_velocity() {
        let mut world = World::new();
        world.settle();
        let p = world.tuning.player.clone();

        world.step(held(InputSnapshot::FLAG_DASH));
        assert!(world.player.dashing);
        assert_eq!(world.player.velocity.x, p.dash_speed);

        // Opposing input has no effect for the dash duration
        let frames_in_dash = (p.dash_duration_ms / BASE_FRAME_MS) as u32 - 2;
        for _ in 0..frames_in_dash {
            world.step(held(InputSnapshot::FLAG_LEFT));
            assert_eq!(world.player.velocity.x, p.dash_speed);
        }

        // After expiry a cooldown gates the next dash
        for _ in 0..4 {
            world.step(InputSnapshot::new());
        }
        assert!(!world.player.dashing);
        world.step(held(InputSnapshot::FLAG_DASH));
        assert!(!world.player.dashing, "cooldown must gate the next dash");
    }

    #[test]
    fn test_dash_faces_left() {
        let mut world = World::new();
        world.settle();
        for _ in 0..5 {
            world.step(held(InputSnapshot::FLAG_LEFT));
        }
        world.step(held(InputSnapshot::FLAG_LEFT | InputSnapshot::FLAG_DASH));
        assert_eq!(world.player.velocity.x, -world.tuning.player.dash_speed);
    }

    #[test]
    fn test_stomp_defeats_basic_enemy() {
        let mut world = World::new();
        world.enemies = vec![Enemy::new(7, EnemyKind::Basic, Vec2::new(104.0, 390.0), 0.0)];
        world.player.position = Vec2::new(100.0, 360.0);
        world.player.velocity = Vec2::new(0.0, 6.0);

        world.step(InputSnapshot::new());

        assert!(world.enemies[0].is_dead);
        assert_eq!(world.player.score, world.tuning.score.stomp);
        assert!(world.player.velocity.y < 0.0, "stomp grants a bounce");
        assert!(world
            .events
            .iter()
            .any(|e| matches!(e.data, GameEventData::EnemyDefeated { enemy_id: 7, .. })));
    }

    #[test]
    fn test_tank_survives_two_stomps() {
        let mut world = World::new();
        world.enemies = vec![Enemy::new(1, EnemyKind::Tank, Vec2::new(104.0, 390.0), 0.0)];

        for expected_health in [2u32, 1] {
            world.player.position = Vec2::new(100.0, 360.0);
            world.player.velocity = Vec2::new(0.0, 6.0);
            world.step(InputSnapshot::new());
            assert!(!world.enemies[0].is_dead);
            assert_eq!(world.enemies[0].health, expected_health);
        }

        world.player.position = Vec2::new(100.0, 360.0);
        world.player.velocity = Vec2::new(0.0, 6.0);
        world.step(InputSnapshot::new());
        assert!(world.enemies[0].is_dead);

        // All three stomps scored
        assert_eq!(world.player.score, world.tuning.score.stomp * 3);
        // No damage taken in the process
        assert_eq!(world.player.lives, STARTING_LIVES);
    }

    #[test]
    fn test_side_contact_damages_player() {
        let mut world = World::new();
        world.settle();
        world.enemies = vec![Enemy::new(0, EnemyKind::Basic, world.player.position, 0.0)];

        world.step(InputSnapshot::new());

        assert_eq!(world.player.lives, STARTING_LIVES - 1);
        assert_eq!(world.player.position, world.ctx.respawn_point);
    }

    #[test]
    fn test_invulnerability_blocks_damage() {
        let mut world = World::new();
        world.settle();
        world.player.invulnerable_ms = 1000.0;
        world.enemies = vec![Enemy::new(0, EnemyKind::Basic, world.player.position, 0.0)];

        world.step(InputSnapshot::new());

        assert_eq!(world.player.lives, STARTING_LIVES);
        assert!(world.events.is_empty());
    }

    #[test]
    fn test_invincible_power_up_blocks_damage() {
        let mut world = World::new();
        world.settle();
        world.player.power_ups.invincible_ms = 1000.0;
        world.enemies = vec![Enemy::new(0, EnemyKind::Basic, world.player.position, 0.0)];

        world.step(InputSnapshot::new());

        assert_eq!(world.player.lives, STARTING_LIVES);
    }

    #[test]
    fn test_coin_collection_is_idempotent() {
        let mut world = World::new();
        world.settle();
        world.coins = vec![Coin::new(3, world.player.position)];

        world.step(InputSnapshot::new());
        assert!(world.coins[0].collected);
        let score = world.player.score;
        assert_eq!(score, world.tuning.score.coin);

        // The coin stays overlapped; score must not double-award
        world.step(InputSnapshot::new());
        assert_eq!(world.player.score, score);
        let coin_events = world
            .events
            .iter()
            .filter(|e| matches!(e.data, GameEventData::CoinCollected { .. }))
            .count();
        assert_eq!(coin_events, 1);
    }

    #[test]
    fn test_magnet_pulls_distant_coins() {
        let mut world = World::new();
        world.settle();
        world.player.power_ups.magnet_ms = 1000.0;
        // Out of AABB reach, inside the magnet radius
        let center = world.player.bounds().center();
        world.coins = vec![Coin::new(0, Vec2::new(center.x + 60.0, center.y))];

        world.step(InputSnapshot::new());
        assert!(world.coins[0].collected);
    }

    #[test]
    fn test_power_up_applies_timer() {
        let mut world = World::new();
        world.settle();
        world.power_ups = vec![PowerUp::new(0, PowerUpKind::Jump, world.player.position)];

        world.step(InputSnapshot::new());

        assert!(world.power_ups[0].collected);
        assert!(world.player.power_ups.jump_active());
    }

    #[test]
    fn test_jump_boost_multiplies_force() {
        let mut world = World::new();
        world.settle();
        world.step(held(InputSnapshot::FLAG_JUMP));
        let normal = world.player.velocity.y;

        let mut world = World::new();
        world.settle();
        world.player.power_ups.jump_ms = 10_000.0;
        world.step(held(InputSnapshot::FLAG_JUMP));
        let boosted = world.player.velocity.y;

        assert!(boosted < normal, "boosted jump must rise faster");
    }

    #[test]
    fn test_world_bounds_clamp() {
        let mut world = World::new();
        world.settle();
        world.player.position.x = 1.0;
        world.player.velocity.x = -8.0;

        world.step(InputSnapshot::new());

        assert_eq!(world.player.position.x, 0.0);
        assert!(world.player.velocity.x >= 0.0);
    }

    #[test]
    fn test_fall_out_of_world_damages() {
        let mut world = World::new();
        world.platforms.clear();
        world.player.position = Vec2::new(100.0, 700.0);

        world.step(InputSnapshot::new());

        assert_eq!(world.player.lives, STARTING_LIVES - 1);
        assert_eq!(world.player.position, world.ctx.respawn_point);
    }

    #[test]
    fn test_wall_slide_and_wall_jump() {
        let mut world = World::new();
        // A wall to the player's right, no floor
        world.platforms = vec![Platform::new(
            0,
            PlatformKind::Normal,
            Vec2::new(134.0, 200.0),
            40.0,
            300.0,
        )];
        world.player.position = Vec2::new(100.0, 300.0);
        world.player.velocity = Vec2::new(0.0, 5.0);
        world.player.air_jumps_left = 0;

        // Hold right into the wall until the slide engages
        let mut sliding = false;
        for _ in 0..10 {
            world.step(held(InputSnapshot::FLAG_RIGHT));
            if world.player.wall_sliding {
                sliding = true;
                break;
            }
        }
        assert!(sliding, "wall slide must engage");
        assert!(world.player.velocity.y <= world.tuning.player.wall_slide_speed);
        assert_eq!(world.player.action(), PlayerAction::WallSlide);

        // Wall jump kicks away from the wall
        world.step(held(InputSnapshot::FLAG_RIGHT | InputSnapshot::FLAG_JUMP));
        assert!(world.player.velocity.y < 0.0);
        assert!(world.player.velocity.x < 0.0, "kick away from right wall");
    }

    #[test]
    fn test_reset_restores_defaults() {
        let mut world = World::new();
        world.settle();
        world.player.lives = 1;
        world.player.score = 4200;
        world.player.invulnerable_ms = 500.0;
        world.player.power_ups.magnet_ms = 3000.0;

        world.player.reset(100.0, 500.0);

        assert_eq!(world.player.lives, STARTING_LIVES);
        assert_eq!(world.player.score, 0);
        assert_eq!(world.player.invulnerable_ms, 0.0);
        assert!(!world.player.power_ups.jump_active());
        assert!(!world.player.power_ups.invincible_active());
        assert!(!world.player.power_ups.dash_active());
        assert!(!world.player.power_ups.magnet_active());
        assert_eq!(world.player.position, Vec2::new(100.0, 500.0));
    }

    #[test]
    fn test_action_derivation() {
        let mut world = World::new();
        world.settle();
        assert_eq!(world.player.action(), PlayerAction::Idle);

        world.step(held(InputSnapshot::FLAG_RIGHT));
        assert_eq!(world.player.action(), PlayerAction::Run);

        world.step(held(InputSnapshot::FLAG_RIGHT | InputSnapshot::FLAG_JUMP));
        assert_eq!(world.player.action(), PlayerAction::Jump);

        world.player.celebrate(500.0);
        assert_eq!(world.player.action(), PlayerAction::Celebrate);
    }

    proptest! {
        /// Gravity keeps velocity.y within the clamp for any delta >= 0.
        #[test]
        fn prop_gravity_clamps_fall_speed(
            vy in -100.0f32..100.0,
            dt_ms in 0.0f32..100.0,
        ) {
            let mut world = World::new();
            world.platforms.clear();
            world.player.velocity.y = vy;

            let dt_norm = dt_ms / BASE_FRAME_MS;
            world.frame += 1;
            world.player.update(
                &InputSnapshot::new(),
                dt_norm,
                dt_ms,
                &world.env,
                &world.ctx,
                &mut world.platforms,
                &mut world.enemies,
                &mut world.coins,
                &mut world.power_ups,
                &world.tuning,
                world.frame,
                &mut world.events,
            );

            let p = &world.tuning.player;
            prop_assert!(world.player.velocity.y >= p.max_rise_speed);
            prop_assert!(world.player.velocity.y <= p.max_fall_speed);
        }

        /// |velocity.x| stays within the cap for any directional input
        /// sequence (dash intentionally exceeds the run cap, so its flag
        /// is excluded here).
        #[test]
        fn prop_horizontal_speed_clamped(flags in proptest::collection::vec(0u8..16, 1..120)) {
            let mut world = World::new();
            let max_speed = world.tuning.player.max_speed;
            for f in flags {
                world.step(InputSnapshot::from_flags(f));
                prop_assert!(world.player.velocity.x.abs() <= max_speed);
            }
        }
    }
}
