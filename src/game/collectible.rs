//! Collectibles
//!
//! Coins and power-ups. Both have a terminal `collected` flag and are
//! removed from the stage in the end-of-frame sweep once set.

use serde::{Deserialize, Serialize};

use crate::core::rect::Rect;
use crate::core::vec2::Vec2;

/// Coin box size in pixels.
pub const COIN_SIZE: f32 = 16.0;

/// Power-up box size in pixels.
pub const POWER_UP_SIZE: f32 = 20.0;

/// A coin in the active stage.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Coin {
    /// Stable identifier within the stage
    pub id: u32,

    /// Top-left corner
    pub position: Vec2,

    /// Terminal: set once, then swept
    pub collected: bool,
}

impl Coin {
    /// Create a new coin.
    pub fn new(id: u32, position: Vec2) -> Self {
        Self {
            id,
            position,
            collected: false,
        }
    }

    /// Bounding box for collision tests.
    #[inline]
    pub fn bounds(&self) -> Rect {
        Rect::from_pos(self.position, COIN_SIZE, COIN_SIZE)
    }

    /// Center point (for magnet-radius checks).
    #[inline]
    pub fn center(&self) -> Vec2 {
        self.bounds().center()
    }
}

/// Power-up effect kind.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[repr(u8)]
pub enum PowerUpKind {
    /// Higher jumps while active
    Jump = 0,
    /// Immune to enemy contact while active
    Invincible = 1,
    /// Longer dash, shorter cooldown while active
    Dash = 2,
    /// Coins within a radius are pulled in while active
    Magnet = 3,
}

/// A power-up in the active stage.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct PowerUp {
    /// Stable identifier within the stage
    pub id: u32,

    /// Effect kind
    pub kind: PowerUpKind,

    /// Top-left corner
    pub position: Vec2,

    /// Terminal: set once, then swept
    pub collected: bool,
}

impl PowerUp {
    /// Create a new power-up.
    pub fn new(id: u32, kind: PowerUpKind, position: Vec2) -> Self {
        Self {
            id,
            kind,
            position,
            collected: false,
        }
    }

    /// Bounding box for collision tests.
    #[inline]
    pub fn bounds(&self) -> Rect {
        Rect::from_pos(self.position, POWER_UP_SIZE, POWER_UP_SIZE)
    }
}

// =============================================================================
// TESTS
// =============================================================================
