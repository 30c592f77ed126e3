//! Game Events
//!
//! Lifecycle events generated during simulation. The physics core never
//! reaches into presentation systems: every discrete outcome is pushed onto
//! the session's event queue and drained by the caller each frame, which is
//! where rendering and sound triggers hang off.

use serde::{Deserialize, Serialize};

use crate::core::vec2::Vec2;
use crate::game::collectible::PowerUpKind;
use crate::game::enemy::EnemyKind;

/// Priority for event processing order.
///
/// Lower value = processed first.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[repr(u8)]
pub enum EventPriority {
    /// Run-ending outcomes processed first
    PlayerDeath = 0,
    /// Then damage
    PlayerDamage = 1,
    /// Then enemy outcomes
    EnemyOutcome = 2,
    /// Then pickups
    Collection = 3,
    /// Then stage flow
    StageFlow = 4,
    /// Lowest priority
    Other = 255,
}

/// Game event data.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub enum GameEventData {
    /// Player lost their last life
    PlayerDied,

    /// Player took damage
    PlayerDamaged {
        /// Lives remaining after the hit
        lives_left: u32,
        /// Where the hit happened
        position: Vec2,
    },

    /// Enemy was stomped but survived (tanks take several)
    EnemyStomped {
        /// Enemy identifier
        enemy_id: u32,
        /// Health remaining
        health_left: u32,
    },

    /// Enemy health reached zero
    EnemyDefeated {
        /// Enemy identifier
        enemy_id: u32,
        /// What kind it was
        kind: EnemyKind,
        /// Points awarded
        points: u32,
    },

    /// Player collected a coin
    CoinCollected {
        /// Coin identifier
        coin_id: u32,
        /// Points awarded
        points: u32,
        /// Player score after the award
        new_score: u32,
    },

    /// Player collected a power-up
    PowerUpCollected {
        /// Power-up identifier
        power_up_id: u32,
        /// Which effect was applied
        kind: PowerUpKind,
    },

    /// A breakable platform crumbled away
    PlatformBroken {
        /// Platform identifier
        platform_id: u32,
    },

    /// Player reached the right edge of the stage
    StageBoundaryReached {
        /// Zero-based index of the completed stage
        stage_index: u32,
    },

    /// All stages completed
    RunCompleted {
        /// Final score
        score: u32,
    },
}

/// A game event with timing and priority.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct GameEvent {
    /// Frame when event occurred
    pub frame: u64,

    /// Processing priority
    pub priority: EventPriority,

    /// Event data
    pub data: GameEventData,
}

impl GameEvent {
    /// Create a new event.
    pub fn new(frame: u64, priority: EventPriority, data: GameEventData) -> Self {
        Self {
            frame,
            priority,
            data,
        }
    }

    /// Create player died event.
    pub fn player_died(frame: u64) -> Self {
        Self::new(frame, EventPriority::PlayerDeath, GameEventData::PlayerDied)
    }

    /// Create player damaged event.
    pub fn player_damaged(frame: u64, lives_left: u32, position: Vec2) -> Self {
        Self::new(
            frame,
            EventPriority::PlayerDamage,
            GameEventData::PlayerDamaged {
                lives_left,
                position,
            },
        )
    }

    /// Create enemy stomped event.
    pub fn enemy_stomped(frame: u64, enemy_id: u32, health_left: u32) -> Self {
        Self::new(
            frame,
            EventPriority::EnemyOutcome,
            GameEventData::EnemyStomped {
                enemy_id,
                health_left,
            },
        )
    }

    /// Create enemy defeated event.
    pub fn enemy_defeated(frame: u64, enemy_id: u32, kind: EnemyKind, points: u32) -> Self {
        Self::new(
            frame,
            EventPriority::EnemyOutcome,
            GameEventData::EnemyDefeated {
                enemy_id,
                kind,
                points,
            },
        )
    }

    /// Create coin collected event.
    pub fn coin_collected(frame: u64, coin_id: u32, points: u32, new_score: u32) -> Self {
        Self::new(
            frame,
            EventPriority::Collection,
            GameEventData::CoinCollected {
                coin_id,
                points,
                new_score,
            },
        )
    }

    /// Create power-up collected event.
    pub fn power_up_collected(frame: u64, power_up_id: u32, kind: PowerUpKind) -> Self {
        Self::new(
            frame,
            EventPriority::Collection,
            GameEventData::PowerUpCollected { power_up_id, kind },
        )
    }

    /// Create platform broken event.
    pub fn platform_broken(frame: u64, platform_id: u32) -> Self {
        Self::new(
            frame,
            EventPriority::StageFlow,
            GameEventData::PlatformBroken { platform_id },
        )
    }

    /// Create stage boundary reached event.
    pub fn stage_boundary_reached(frame: u64, stage_index: u32) -> Self {
        Self::new(
            frame,
            EventPriority::StageFlow,
            GameEventData::StageBoundaryReached { stage_index },
        )
    }

    /// Create run completed event.
    pub fn run_completed(frame: u64, score: u32) -> Self {
        Self::new(
            frame,
            EventPriority::Other,
            GameEventData::RunCompleted { score },
        )
    }
}

impl PartialEq for GameEvent {
    fn eq(&self, other: &Self) -> bool {
        self.frame == other.frame && self.priority == other.priority
    }
}

impl Eq for GameEvent {}

impl PartialOrd for GameEvent {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for GameEvent {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        // Sort by: frame, then priority
        self.frame
            .cmp(&other.frame)
            .then(self.priority.cmp(&other.priority))
    }
}
