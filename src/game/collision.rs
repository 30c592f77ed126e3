//! Collision Detection
//!
//! Stateless AABB tests plus the specialized "is the player standing on this
//! platform" logic. Ground detection has two cooperating paths:
//!
//! - a **swept fallback** that reconstructs the previous frame's bottom edge
//!   from the current velocity and catches landings where a fast fall passed
//!   entirely through a thin platform within one frame, and
//! - a **dynamic tolerance** on the overlap path that widens the landing
//!   snap window with fall speed, so high-speed falls are not missed by a
//!   fixed epsilon.
//!
//! The two overlap in intent but use different thresholds; both are kept as
//! shipped because folding one into the other changes edge-case landings at
//! high fall speeds.

use crate::core::rect::Rect;
use crate::core::vec2::Vec2;
use crate::game::platform::{Platform, PlatformKind};

/// Base landing snap window in pixels.
const LANDING_TOLERANCE_MIN: f32 = 8.0;

/// Extra slack added on top of the speed-scaled tolerance.
const LANDING_TOLERANCE_PAD: f32 = 2.0;

/// Horizontal distance within which a platform edge counts as wall contact.
pub const WALL_CONTACT_RANGE: f32 = 4.0;

/// A resolved ground contact.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Landing {
    /// Kind of the platform landed on
    pub kind: PlatformKind,
    /// Y the player's top edge snaps to (platform top minus player height)
    pub landing_y: f32,
}

/// Result of a player-vs-platform check.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct PlatformHit {
    /// True if this contact counts as standing on the platform
    pub is_on_ground: bool,
    /// Landing details when ground contact was detected
    pub landing: Option<Landing>,
}

impl PlatformHit {
    fn miss() -> Self {
        Self {
            is_on_ground: false,
            landing: None,
        }
    }

    fn grounded(platform: &Platform, bounds: &Rect) -> Self {
        Self {
            is_on_ground: true,
            landing: Some(Landing {
                kind: platform.kind,
                landing_y: platform.top() - bounds.height,
            }),
        }
    }
}

/// Which side of the player a wall is touching.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum WallSide {
    /// Wall to the player's left
    Left,
    /// Wall to the player's right
    Right,
}

/// Check whether the player is landing on / standing on a platform.
///
/// `bounds` is the player's current-frame box, `velocity` the velocity that
/// produced it; the previous frame's box is reconstructed as
/// `bounds - velocity`.
pub fn check_platform_collision(bounds: &Rect, velocity: Vec2, platform: &Platform) -> PlatformHit {
    let plat = platform.bounds();
    if plat.is_empty() || bounds.is_empty() {
        return PlatformHit::miss();
    }

    let prev_bottom = bounds.bottom() - velocity.y;
    let prev_left = bounds.left() - velocity.x;
    let prev_right = bounds.right() - velocity.x;

    let horizontal_now = bounds.right() > plat.left() && bounds.left() < plat.right();
    let horizontal_prev = prev_right > plat.left() && prev_left < plat.right();

    if !bounds.intersects(&plat) {
        // Swept fallback: a fast fall can cross a thin platform entirely
        // within one frame, leaving no current-frame overlap to detect.
        if velocity.y >= 0.0
            && prev_bottom <= plat.top()
            && bounds.bottom() >= plat.top()
            && (horizontal_now || horizontal_prev)
        {
            return PlatformHit::grounded(platform, bounds);
        }
        return PlatformHit::miss();
    }

    // Overlap path: the landing snap window scales with fall speed.
    let tolerance = velocity.y.abs().max(LANDING_TOLERANCE_MIN) + LANDING_TOLERANCE_PAD;
    if velocity.y >= 0.0 && prev_bottom <= plat.top() + tolerance {
        return PlatformHit::grounded(platform, bounds);
    }

    // Side or underside overlap: not ground contact
    PlatformHit::miss()
}

/// Coarse wall-contact probe for the wall-slide system.
///
/// Reports a wall when a platform edge is within [`WALL_CONTACT_RANGE`]
/// pixels horizontally and the boxes overlap vertically. The caller applies
/// the airborne / wall-lock conditions.
pub fn check_wall_contact(bounds: &Rect, platform: &Platform) -> Option<WallSide> {
    let plat = platform.bounds();
    if plat.is_empty() {
        return None;
    }

    let vertical_overlap = bounds.bottom() > plat.top() && bounds.top() < plat.bottom();
    if !vertical_overlap {
        return None;
    }

    if (plat.left() - bounds.right()).abs() < WALL_CONTACT_RANGE {
        return Some(WallSide::Right);
    }
    if (bounds.left() - plat.right()).abs() < WALL_CONTACT_RANGE {
        return Some(WallSide::Left);
    }
    None
}

/// Player-vs-enemy overlap test.
///
/// Defensively rejects zero/negative-size boxes so a malformed enemy can
/// never produce a phantom hit.
#[inline]
pub fn check_enemy_collision(player: &Rect, enemy: &Rect) -> bool {
    if enemy.is_empty() || player.is_empty() {
        return false;
    }
    player.intersects(enemy)
}

/// Player-vs-coin overlap test.
#[inline]
pub fn check_coin_collision(player: &Rect, coin: &Rect) -> bool {
    player.intersects(coin)
}

/// Player-vs-power-up overlap test.
#[inline]
pub fn check_power_up_collision(player: &Rect, power_up: &Rect) -> bool {
    player.intersects(power_up)
}

/// Magnet pull test: true if the coin center is within `radius` of the
/// player center.
#[inline]
pub fn magnet_reaches(player_center: Vec2, coin_center: Vec2, radius: f32) -> bool {
    player_center.distance_squared(coin_center) <= radius * radius
}

// =============================================================================
// TESTS
// =============================================================================
