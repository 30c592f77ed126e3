//! Platforms
//!
//! Platform kinds and their per-frame behavior. Behavior is dispatched on
//! the `PlatformKind` enum; what happens when the player lands on each kind
//! lives in the player's collision resolution, while this module owns the
//! platforms' own motion and lifecycle (oscillation, crumbling).

use serde::{Deserialize, Serialize};

use crate::core::rect::Rect;
use crate::core::vec2::Vec2;

/// Platform behavior kind.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[repr(u8)]
pub enum PlatformKind {
    /// Plain solid ground
    Normal = 0,
    /// Oscillates horizontally around its anchor
    Moving = 1,
    /// Crumbles after repeated landings
    Breakable = 2,
    /// Slippery surface (low friction)
    Ice = 3,
    /// Sticky surface (high friction)
    Mud = 4,
    /// Launches the player upward on contact
    Bounce = 5,
    /// Damages the player on contact
    Spike = 6,
}

/// Friction scale a mud landing installs on the player.
pub const MUD_FRICTION_SCALE: f32 = 2.0;

/// A platform in the active stage.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Platform {
    /// Stable identifier within the stage
    pub id: u32,

    /// Behavior kind
    pub kind: PlatformKind,

    /// Top-left corner
    pub position: Vec2,

    /// Width in pixels
    pub width: f32,

    /// Height in pixels
    pub height: f32,

    /// Remaining landings before crumbling (breakable only)
    pub health: Option<u32>,

    /// Anchor for the moving oscillation
    pub origin_x: f32,

    /// Oscillation half-range in pixels (moving only)
    pub amplitude: f32,

    /// Oscillation speed in radians per second (moving only)
    pub speed: f32,

    /// Accumulated oscillation phase in radians.
    ///
    /// Advanced by delta-time each update, never read from a wall clock,
    /// so the motion replays identically under pause and throttling.
    phase: f32,

    /// Set once a breakable platform crumbles; removed in the frame sweep
    pub destroyed: bool,
}

impl Platform {
    /// Landings a fresh breakable platform survives.
    pub const BREAKABLE_HEALTH: u32 = 3;

    /// Create a platform of the given kind.
    pub fn new(id: u32, kind: PlatformKind, position: Vec2, width: f32, height: f32) -> Self {
        let health = match kind {
            PlatformKind::Breakable => Some(Self::BREAKABLE_HEALTH),
            _ => None,
        };
        Self {
            id,
            kind,
            position,
            width,
            height,
            health,
            origin_x: position.x,
            amplitude: 0.0,
            speed: 0.0,
            phase: 0.0,
            destroyed: false,
        }
    }

    /// Create a moving platform with oscillation parameters.
    pub fn new_moving(
        id: u32,
        position: Vec2,
        width: f32,
        height: f32,
        amplitude: f32,
        speed: f32,
    ) -> Self {
        let mut platform = Self::new(id, PlatformKind::Moving, position, width, height);
        platform.amplitude = amplitude;
        platform.speed = speed;
        platform
    }

    /// Bounding box for collision tests.
    #[inline]
    pub fn bounds(&self) -> Rect {
        Rect::from_pos(self.position, self.width, self.height)
    }

    /// Top edge (what the player lands on).
    #[inline]
    pub fn top(&self) -> f32 {
        self.position.y
    }

    /// Advance per-frame behavior.
    ///
    /// `dt_ms` is the sanitized frame delta in milliseconds.
    pub fn update(&mut self, dt_ms: f32) {
        if self.kind == PlatformKind::Moving {
            self.phase += self.speed * (dt_ms / 1000.0);
            // Keep the phase bounded so precision never degrades on long runs
            if self.phase > std::f32::consts::TAU {
                self.phase -= std::f32::consts::TAU;
            }
            self.position.x = self.origin_x + self.phase.sin() * self.amplitude;
        }
    }

    /// Apply one point of damage to a breakable platform.
    ///
    /// Returns true if the platform crumbled this call.
    /// Non-breakable kinds ignore damage.
    pub fn damage(&mut self) -> bool {
        let Some(health) = self.health.as_mut() else {
            return false;
        };
        if self.destroyed {
            return false;
        }
        *health = health.saturating_sub(1);
        if *health == 0 {
            self.destroyed = true;
            return true;
        }
        false
    }

    /// Friction scale a landing on this platform installs on the player.
    ///
    /// `ice_grip` is the stage's slip factor for ice (0.5-0.8 depending on
    /// the stage).
    #[inline]
    pub fn surface_friction(&self, ice_grip: f32) -> f32 {
        match self.kind {
            PlatformKind::Ice => ice_grip,
            PlatformKind::Mud => MUD_FRICTION_SCALE,
            _ => 1.0,
        }
    }

    /// Current oscillation phase (for state hashing).
    #[inline]
    pub fn phase(&self) -> f32 {
        self.phase
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_moving_platform_uses_accumulated_phase() {
        let mut platform =
            Platform::new_moving(0, Vec2::new(100.0, 300.0), 80.0, 16.0, 50.0, 2.0);

        // Two platforms advanced by the same deltas stay identical,
        // regardless of when the updates happen in wall-clock time
        let mut other = platform.clone();

        for _ in 0..600 {
            platform.update(16.0);
            other.update(16.0);
        }
        assert_eq!(platform.position.x, other.position.x);

        // Position stays within the oscillation range
        assert!((platform.position.x - platform.origin_x).abs() <= 50.0 + 1e-3);
    }

    #[test]
    fn test_moving_platform_zero_delta_is_stationary() {
        let mut platform =
            Platform::new_moving(0, Vec2::new(100.0, 300.0), 80.0, 16.0, 50.0, 2.0);
        let before = platform.position.x;
        platform.update(0.0);
        assert_eq!(platform.position.x, before);
    }

    #[test]
    fn test_breakable_platform_crumbles() {
        let mut platform =
            Platform::new(0, PlatformKind::Breakable, Vec2::new(0.0, 0.0), 64.0, 16.0);
        assert_eq!(platform.health, Some(Platform::BREAKABLE_HEALTH));

        assert!(!platform.damage());
        assert!(!platform.damage());
        assert!(platform.damage()); // third landing crumbles it
        assert!(platform.destroyed);

        // Further damage is a no-op
        assert!(!platform.damage());
    }

    #[test]
    fn test_damage_ignored_for_solid_kinds() {
        let mut platform = Platform::new(0, PlatformKind::Normal, Vec2::ZERO, 64.0, 16.0);
        assert!(!platform.damage());
        assert!(!platform.destroyed);
    }

    #[test]
    fn test_surface_friction_per_kind() {
        let ice = Platform::new(0, PlatformKind::Ice, Vec2::ZERO, 64.0, 16.0);
        let mud = Platform::new(1, PlatformKind::Mud, Vec2::ZERO, 64.0, 16.0);
        let normal = Platform::new(2, PlatformKind::Normal, Vec2::ZERO, 64.0, 16.0);

        assert_eq!(ice.surface_friction(0.6), 0.6);
        assert_eq!(mud.surface_friction(0.6), MUD_FRICTION_SCALE);
        assert_eq!(normal.surface_friction(0.6), 1.0);
    }
}
