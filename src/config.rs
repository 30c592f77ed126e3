//! Tuning Configuration
//!
//! Every numeric knob of the simulation lives here: movement and jump feel,
//! enemy behavior, power-up durations, score values. Defaults match the
//! shipped game feel; the binary can load overrides from a JSON file.
//!
//! Speeds and accelerations are in pixels per normalized frame (the 60 Hz
//! baseline); durations are in milliseconds.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Error loading or validating a tuning file.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// File could not be read
    #[error("failed to read tuning file: {0}")]
    Io(#[from] std::io::Error),

    /// File was not valid JSON for the tuning schema
    #[error("failed to parse tuning file: {0}")]
    Parse(#[from] serde_json::Error),

    /// Values were out of range
    #[error("invalid tuning: {0}")]
    Invalid(String),
}

/// Player movement and jump tuning.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct PlayerTuning {
    /// Target run speed the player accelerates toward
    pub run_speed: f32,
    /// Acceleration per normalized frame while input is held
    pub acceleration: f32,
    /// Deceleration per normalized frame with no input
    pub deceleration: f32,
    /// Hard cap on |velocity.x|
    pub max_speed: f32,
    /// Ground friction factor applied with no directional input
    pub ground_friction: f32,
    /// Air resistance factor applied with no directional input
    pub air_resistance: f32,
    /// Below this |velocity.x| snaps to exactly zero
    pub stop_threshold: f32,

    /// Jump impulse (negative = upward)
    pub jump_force: f32,
    /// Gravity per normalized frame
    pub gravity: f32,
    /// Hard cap on downward velocity
    pub max_fall_speed: f32,
    /// Hard floor on upward velocity
    pub max_rise_speed: f32,
    /// Grace window after leaving ground during which a jump still fires
    pub coyote_ms: f32,
    /// Grace window during which a jump press is remembered before landing
    pub jump_buffer_ms: f32,
    /// Air jumps available after the ground jump (1 = double jump)
    pub max_air_jumps: u32,
    /// Upward velocity multiplier when the jump button is released early
    pub jump_cut_factor: f32,
    /// Jump force multiplier while the jump power-up is active
    pub jump_boost_factor: f32,

    /// Downward velocity cap while wall-sliding
    pub wall_slide_speed: f32,
    /// Horizontal impulse away from the wall on a wall-jump
    pub wall_jump_kick: f32,
    /// Wall re-contact lockout after a wall-jump
    pub wall_lock_ms: f32,

    /// Locked horizontal speed while dashing
    pub dash_speed: f32,
    /// Dash duration
    pub dash_duration_ms: f32,
    /// Cooldown between dashes
    pub dash_cooldown_ms: f32,
    /// Dash duration multiplier while the dash power-up is active
    pub dash_boost_duration_factor: f32,

    /// Bounce platform impulse as a fraction of jump force
    pub bounce_factor: f32,
    /// Upward velocity granted by a stomp
    pub stomp_bounce: f32,
    /// Invulnerability window after taking damage
    pub invulnerability_ms: f32,
    /// Coin pull radius while the magnet power-up is active
    pub magnet_radius: f32,
}

impl Default for PlayerTuning {
    fn default() -> Self {
        Self {
            run_speed: 5.0,
            acceleration: 0.5,
            deceleration: 0.8,
            max_speed: 8.0,
            ground_friction: 0.8,
            air_resistance: 0.95,
            stop_threshold: 0.1,

            jump_force: -15.0,
            gravity: 0.8,
            max_fall_speed: 15.0,
            max_rise_speed: -20.0,
            coyote_ms: 100.0,
            jump_buffer_ms: 150.0,
            max_air_jumps: 1,
            jump_cut_factor: 0.7,
            jump_boost_factor: 1.5,

            wall_slide_speed: 2.0,
            wall_jump_kick: 8.0,
            wall_lock_ms: 200.0,

            dash_speed: 15.0,
            dash_duration_ms: 200.0,
            dash_cooldown_ms: 1000.0,
            dash_boost_duration_factor: 1.3,

            bounce_factor: 0.9,
            stomp_bounce: -8.0,
            invulnerability_ms: 2000.0,
            magnet_radius: 100.0,
        }
    }
}

/// Enemy behavior tuning.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct EnemyTuning {
    /// Basic/jumper patrol speed
    pub patrol_speed: f32,
    /// Tank patrol speed
    pub tank_speed: f32,
    /// Tank patrol range as a fraction of the authored patrol distance
    pub tank_patrol_factor: f32,
    /// Gravity per normalized frame for grounded kinds
    pub gravity: f32,
    /// Downward velocity cap
    pub max_fall_speed: f32,

    /// Jumper hop impulse (negative = upward)
    pub hop_impulse: f32,
    /// Jumper hop cooldown lower bound
    pub hop_min_ms: u32,
    /// Jumper hop cooldown upper bound
    pub hop_max_ms: u32,

    /// Horizontal detection range for chasers
    pub chase_range: f32,
    /// Vertical band within which a chaser notices the player
    pub chase_band: f32,
    /// Chaser speed while pursuing
    pub chase_speed: f32,
    /// Chaser acceleration toward pursuit speed per normalized frame
    pub chase_acceleration: f32,

    /// Flyer vertical oscillation half-range
    pub flyer_amplitude: f32,
    /// Flyer oscillation speed in radians per second
    pub flyer_frequency: f32,
}

impl Default for EnemyTuning {
    fn default() -> Self {
        Self {
            patrol_speed: 1.5,
            tank_speed: 0.8,
            tank_patrol_factor: 0.5,
            gravity: 0.8,
            max_fall_speed: 12.0,

            hop_impulse: -10.0,
            hop_min_ms: 1000,
            hop_max_ms: 1800,

            chase_range: 200.0,
            chase_band: 80.0,
            chase_speed: 2.5,
            chase_acceleration: 0.3,

            flyer_amplitude: 40.0,
            flyer_frequency: 2.0,
        }
    }
}

/// Power-up effect durations.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct PowerUpTuning {
    /// Jump boost duration
    pub jump_ms: f32,
    /// Invincibility duration
    pub invincible_ms: f32,
    /// Dash boost duration
    pub dash_ms: f32,
    /// Magnet duration
    pub magnet_ms: f32,
}

impl Default for PowerUpTuning {
    fn default() -> Self {
        Self {
            jump_ms: 10_000.0,
            invincible_ms: 5_000.0,
            dash_ms: 8_000.0,
            magnet_ms: 8_000.0,
        }
    }
}

/// Score values.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoreTuning {
    /// Points per coin
    pub coin: u32,
    /// Points per stomp
    pub stomp: u32,
    /// Bonus on clearing a stage
    pub stage_clear: u32,
}

impl Default for ScoreTuning {
    fn default() -> Self {
        Self {
            coin: 10,
            stomp: 100,
            stage_clear: 500,
        }
    }
}

/// Hitstop durations applied by the orchestrator in response to events.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct HitstopTuning {
    /// Freeze after the player takes damage
    pub damage_ms: f32,
    /// Freeze after an enemy is defeated
    pub defeat_ms: f32,
}

impl Default for HitstopTuning {
    fn default() -> Self {
        Self {
            damage_ms: 120.0,
            defeat_ms: 60.0,
        }
    }
}

/// Complete tuning table for a run.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    /// Player controller tuning
    pub player: PlayerTuning,
    /// Enemy AI tuning
    pub enemies: EnemyTuning,
    /// Power-up durations
    pub power_ups: PowerUpTuning,
    /// Score values
    pub score: ScoreTuning,
    /// Hitstop durations
    pub hitstop: HitstopTuning,
}

impl Tuning {
    /// Load tuning from a JSON file, falling back to defaults for any
    /// omitted field, then validate.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = fs::read_to_string(path)?;
        let tuning: Tuning = serde_json::from_str(&text)?;
        tuning.validate()?;
        Ok(tuning)
    }

    /// Reject values the simulation cannot run with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let p = &self.player;

        if !(p.max_speed > 0.0) {
            return Err(ConfigError::Invalid("player.max_speed must be > 0".into()));
        }
        if !(p.run_speed > 0.0) || p.run_speed > p.max_speed {
            return Err(ConfigError::Invalid(
                "player.run_speed must be in (0, max_speed]".into(),
            ));
        }
        if !(p.gravity > 0.0) {
            return Err(ConfigError::Invalid("player.gravity must be > 0".into()));
        }
        if p.jump_force >= 0.0 {
            return Err(ConfigError::Invalid(
                "player.jump_force must be negative (upward)".into(),
            ));
        }
        if !(p.max_fall_speed > 0.0) {
            return Err(ConfigError::Invalid(
                "player.max_fall_speed must be > 0".into(),
            ));
        }
        if !(p.dash_duration_ms > 0.0) || !(p.dash_speed > 0.0) {
            return Err(ConfigError::Invalid(
                "player dash speed and duration must be > 0".into(),
            ));
        }
        if !(0.0..=1.0).contains(&p.ground_friction) || !(0.0..=1.0).contains(&p.air_resistance) {
            return Err(ConfigError::Invalid(
                "player friction factors must be in [0, 1]".into(),
            ));
        }
        if !(0.0..=1.0).contains(&p.jump_cut_factor) {
            return Err(ConfigError::Invalid(
                "player.jump_cut_factor must be in [0, 1]".into(),
            ));
        }

        let e = &self.enemies;
        if e.hop_min_ms > e.hop_max_ms {
            return Err(ConfigError::Invalid(
                "enemies.hop_min_ms must be <= hop_max_ms".into(),
            ));
        }
        if !(e.chase_range >= 0.0) || !(e.chase_band >= 0.0) {
            return Err(ConfigError::Invalid(
                "enemies chase ranges must be >= 0".into(),
            ));
        }

        Ok(())
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        Tuning::default().validate().unwrap();
    }

    #[test]
    fn test_partial_json_overrides() {
        // Omitted fields fall back to defaults
        let tuning: Tuning =
            serde_json::from_str(r#"{"player": {"run_speed": 6.0}}"#).unwrap();
        assert_eq!(tuning.player.run_speed, 6.0);
        assert_eq!(tuning.player.max_speed, PlayerTuning::default().max_speed);
        tuning.validate().unwrap();
    }

    #[test]
    fn test_validation_rejects_bad_values() {
        let mut tuning = Tuning::default();
        tuning.player.jump_force = 5.0;
        assert!(matches!(
            tuning.validate(),
            Err(ConfigError::Invalid(_))
        ));

        let mut tuning = Tuning::default();
        tuning.player.max_speed = 0.0;
        assert!(tuning.validate().is_err());

        let mut tuning = Tuning::default();
        tuning.enemies.hop_min_ms = 2000;
        tuning.enemies.hop_max_ms = 1000;
        assert!(tuning.validate().is_err());
    }

    #[test]
    fn test_run_speed_capped_by_max_speed() {
        let mut tuning = Tuning::default();
        tuning.player.run_speed = tuning.player.max_speed + 1.0;
        assert!(tuning.validate().is_err());
    }
}
