//! Stage Layouts
//!
//! Hand-authored geometry and entity placement for the ten stages. Pure
//! data: nothing here is simulated, it only seeds [`Stage::generate`].
//!
//! [`Stage::generate`]: crate::game::stage::Stage::generate

use crate::core::vec2::Vec2;
use crate::game::collectible::PowerUpKind;
use crate::game::enemy::{Enemy, EnemyKind};
use crate::game::platform::{Platform, PlatformKind};
use crate::game::stage::{Environment, Theme};
use crate::STAGE_COUNT;

/// Ground level for standard floor segments.
const GROUND_Y: f32 = 568.0;

/// Thickness of floor segments.
const GROUND_H: f32 = 32.0;

/// Thickness of floating platforms.
const DECK_H: f32 = 16.0;

/// Blueprint for one platform.
#[derive(Clone, Copy, Debug)]
pub struct PlatformSpec {
    kind: PlatformKind,
    x: f32,
    y: f32,
    width: f32,
    height: f32,
    amplitude: f32,
    speed: f32,
}

impl PlatformSpec {
    /// Materialize with a stage-assigned id.
    pub fn build(self, id: u32) -> Platform {
        if self.kind == PlatformKind::Moving {
            Platform::new_moving(
                id,
                Vec2::new(self.x, self.y),
                self.width,
                self.height,
                self.amplitude,
                self.speed,
            )
        } else {
            Platform::new(id, self.kind, Vec2::new(self.x, self.y), self.width, self.height)
        }
    }
}

/// Blueprint for one enemy.
#[derive(Clone, Copy, Debug)]
pub struct EnemySpec {
    kind: EnemyKind,
    x: f32,
    y: f32,
    patrol: f32,
}

impl EnemySpec {
    /// Materialize with a stage-assigned id.
    pub fn build(self, id: u32) -> Enemy {
        Enemy::new(id, self.kind, Vec2::new(self.x, self.y), self.patrol)
    }
}

/// Complete blueprint for one stage.
#[derive(Clone, Debug)]
pub struct StageLayout {
    /// Total width in pixels
    pub width: f32,
    /// Physics overrides
    pub environment: Environment,
    /// Player entry point
    pub spawn_point: Vec2,
    /// Platform blueprints
    pub platforms: Vec<PlatformSpec>,
    /// Enemy blueprints
    pub enemies: Vec<EnemySpec>,
    /// Coin positions
    pub coins: Vec<Vec2>,
    /// Power-up kind and position pairs
    pub power_ups: Vec<(PowerUpKind, Vec2)>,
}

fn ground(x: f32, width: f32) -> PlatformSpec {
    solid(x, GROUND_Y, width, GROUND_H)
}

fn solid(x: f32, y: f32, width: f32, height: f32) -> PlatformSpec {
    spec(PlatformKind::Normal, x, y, width, height)
}

fn deck(x: f32, y: f32, width: f32) -> PlatformSpec {
    spec(PlatformKind::Normal, x, y, width, DECK_H)
}

fn ice(x: f32, y: f32, width: f32) -> PlatformSpec {
    spec(PlatformKind::Ice, x, y, width, DECK_H)
}

fn mud(x: f32, y: f32, width: f32) -> PlatformSpec {
    spec(PlatformKind::Mud, x, y, width, DECK_H)
}

fn bounce(x: f32, y: f32, width: f32) -> PlatformSpec {
    spec(PlatformKind::Bounce, x, y, width, DECK_H)
}

fn spike(x: f32, y: f32, width: f32) -> PlatformSpec {
    spec(PlatformKind::Spike, x, y, width, DECK_H)
}

fn breakable(x: f32, y: f32, width: f32) -> PlatformSpec {
    spec(PlatformKind::Breakable, x, y, width, DECK_H)
}

fn moving(x: f32, y: f32, width: f32, amplitude: f32, speed: f32) -> PlatformSpec {
    PlatformSpec {
        kind: PlatformKind::Moving,
        x,
        y,
        width,
        height: DECK_H,
        amplitude,
        speed,
    }
}

fn spec(kind: PlatformKind, x: f32, y: f32, width: f32, height: f32) -> PlatformSpec {
    PlatformSpec {
        kind,
        x,
        y,
        width,
        height,
        amplitude: 0.0,
        speed: 0.0,
    }
}

fn foe(kind: EnemyKind, x: f32, y: f32, patrol: f32) -> EnemySpec {
    EnemySpec { kind, x, y, patrol }
}

fn coin_row(x: f32, y: f32, count: u32, spacing: f32) -> Vec<Vec2> {
    (0..count)
        .map(|i| Vec2::new(x + i as f32 * spacing, y))
        .collect()
}

fn env(wind_x: f32, gravity_scale: f32, friction_scale: f32, ice_grip: f32, theme: Theme) -> Environment {
    Environment {
        wind_x,
        gravity_scale,
        friction_scale,
        ice_grip,
        theme,
    }
}

/// The hand-authored layout for one stage.
///
/// Indexes past the last stage clamp to it, so a malformed index can never
/// panic stage generation.
pub fn stage_layout(index: u32) -> StageLayout {
    match index.min(STAGE_COUNT - 1) {
        0 => meadow(),
        1 => forest(),
        2 => cavern(),
        3 => glacier(),
        4 => swamp(),
        5 => dunes(),
        6 => ruins(),
        7 => storm(),
        8 => crags(),
        _ => summit(),
    }
}

fn meadow() -> StageLayout {
    StageLayout {
        width: 1600.0,
        environment: env(0.0, 1.0, 1.0, 0.5, Theme::Meadow),
        spawn_point: Vec2::new(100.0, 500.0),
        platforms: vec![
            ground(0.0, 700.0),
            ground(820.0, 780.0),
            deck(300.0, 450.0, 120.0),
            deck(520.0, 380.0, 120.0),
            deck(960.0, 440.0, 140.0),
            deck(1200.0, 360.0, 120.0),
        ],
        enemies: vec![
            foe(EnemyKind::Basic, 420.0, 540.0, 80.0),
            foe(EnemyKind::Basic, 1000.0, 540.0, 100.0),
        ],
        coins: [
            coin_row(320.0, 410.0, 4, 30.0),
            coin_row(980.0, 400.0, 4, 30.0),
            coin_row(1220.0, 320.0, 3, 30.0),
        ]
        .concat(),
        power_ups: vec![(PowerUpKind::Jump, Vec2::new(560.0, 340.0))],
    }
}

fn forest() -> StageLayout {
    StageLayout {
        width: 1800.0,
        environment: env(0.0, 1.0, 1.0, 0.5, Theme::Forest),
        spawn_point: Vec2::new(100.0, 500.0),
        platforms: vec![
            ground(0.0, 520.0),
            ground(640.0, 420.0),
            ground(1180.0, 620.0),
            deck(420.0, 460.0, 100.0),
            deck(700.0, 400.0, 110.0),
            deck(900.0, 330.0, 100.0),
            moving(1080.0, 430.0, 90.0, 60.0, 1.6),
            deck(1420.0, 420.0, 120.0),
        ],
        enemies: vec![
            foe(EnemyKind::Basic, 300.0, 540.0, 90.0),
            foe(EnemyKind::Jumper, 760.0, 540.0, 70.0),
            foe(EnemyKind::Basic, 1300.0, 540.0, 110.0),
        ],
        coins: [
            coin_row(430.0, 420.0, 3, 30.0),
            coin_row(910.0, 290.0, 3, 30.0),
            coin_row(1430.0, 380.0, 4, 30.0),
        ]
        .concat(),
        power_ups: vec![(PowerUpKind::Magnet, Vec2::new(950.0, 290.0))],
    }
}

fn cavern() -> StageLayout {
    StageLayout {
        width: 2000.0,
        environment: env(0.0, 1.0, 1.0, 0.5, Theme::Cavern),
        spawn_point: Vec2::new(100.0, 500.0),
        platforms: vec![
            ground(0.0, 460.0),
            ground(580.0, 360.0),
            ground(1060.0, 300.0),
            ground(1480.0, 520.0),
            breakable(480.0, 470.0, 90.0),
            breakable(950.0, 440.0, 90.0),
            deck(700.0, 400.0, 110.0),
            deck(1180.0, 410.0, 100.0),
            moving(1360.0, 360.0, 80.0, 70.0, 1.8),
        ],
        enemies: vec![
            foe(EnemyKind::Chaser, 700.0, 540.0, 80.0),
            foe(EnemyKind::Basic, 1150.0, 540.0, 90.0),
            foe(EnemyKind::Jumper, 1600.0, 540.0, 80.0),
        ],
        coins: [
            coin_row(710.0, 360.0, 3, 30.0),
            coin_row(1190.0, 370.0, 3, 30.0),
            coin_row(1520.0, 520.0, 4, 34.0),
        ]
        .concat(),
        power_ups: vec![(PowerUpKind::Dash, Vec2::new(1400.0, 320.0))],
    }
}

fn glacier() -> StageLayout {
    StageLayout {
        width: 2200.0,
        environment: env(0.0, 1.0, 1.0, 0.5, Theme::Glacier),
        spawn_point: Vec2::new(100.0, 500.0),
        platforms: vec![
            ground(0.0, 420.0),
            ground(540.0, 500.0),
            ground(1160.0, 440.0),
            ground(1720.0, 480.0),
            ice(560.0, 450.0, 140.0),
            ice(820.0, 380.0, 140.0),
            ice(1200.0, 420.0, 160.0),
            deck(1480.0, 360.0, 100.0),
            bounce(1060.0, 540.0, 80.0),
        ],
        enemies: vec![
            foe(EnemyKind::Flyer, 700.0, 260.0, 120.0),
            foe(EnemyKind::Basic, 1250.0, 540.0, 100.0),
            foe(EnemyKind::Flyer, 1560.0, 240.0, 140.0),
        ],
        coins: [
            coin_row(580.0, 410.0, 4, 32.0),
            coin_row(840.0, 340.0, 4, 32.0),
            coin_row(1500.0, 320.0, 3, 30.0),
        ]
        .concat(),
        power_ups: vec![(PowerUpKind::Invincible, Vec2::new(900.0, 330.0))],
    }
}

fn swamp() -> StageLayout {
    StageLayout {
        width: 2200.0,
        environment: env(0.0, 1.05, 1.0, 0.5, Theme::Swamp),
        spawn_point: Vec2::new(100.0, 500.0),
        platforms: vec![
            ground(0.0, 500.0),
            ground(620.0, 460.0),
            ground(1200.0, 400.0),
            ground(1720.0, 480.0),
            mud(620.0, 460.0, 180.0),
            mud(1240.0, 420.0, 160.0),
            deck(900.0, 400.0, 110.0),
            moving(1080.0, 330.0, 90.0, 60.0, 1.5),
            deck(1520.0, 400.0, 100.0),
        ],
        enemies: vec![
            foe(EnemyKind::Tank, 760.0, 540.0, 120.0),
            foe(EnemyKind::Basic, 1320.0, 540.0, 90.0),
            foe(EnemyKind::Jumper, 1820.0, 540.0, 80.0),
        ],
        coins: [
            coin_row(910.0, 360.0, 3, 30.0),
            coin_row(1260.0, 380.0, 4, 32.0),
            coin_row(1530.0, 360.0, 3, 30.0),
        ]
        .concat(),
        power_ups: vec![(PowerUpKind::Jump, Vec2::new(1120.0, 290.0))],
    }
}

fn dunes() -> StageLayout {
    StageLayout {
        width: 2400.0,
        environment: env(0.12, 1.0, 1.0, 0.5, Theme::Dunes),
        spawn_point: Vec2::new(100.0, 500.0),
        platforms: vec![
            ground(0.0, 560.0),
            ground(700.0, 480.0),
            ground(1320.0, 420.0),
            ground(1880.0, 520.0),
            deck(480.0, 450.0, 110.0),
            deck(760.0, 380.0, 100.0),
            moving(1020.0, 420.0, 90.0, 80.0, 1.7),
            deck(1440.0, 380.0, 110.0),
            bounce(1760.0, 540.0, 80.0),
        ],
        enemies: vec![
            foe(EnemyKind::Basic, 340.0, 540.0, 110.0),
            foe(EnemyKind::Jumper, 860.0, 540.0, 90.0),
            foe(EnemyKind::Chaser, 1480.0, 540.0, 90.0),
        ],
        coins: [
            coin_row(490.0, 410.0, 3, 30.0),
            coin_row(1450.0, 340.0, 4, 30.0),
            coin_row(1900.0, 480.0, 4, 34.0),
        ]
        .concat(),
        power_ups: vec![(PowerUpKind::Magnet, Vec2::new(800.0, 340.0))],
    }
}

fn ruins() -> StageLayout {
    StageLayout {
        width: 2400.0,
        environment: env(0.0, 1.0, 1.0, 0.5, Theme::Ruins),
        spawn_point: Vec2::new(100.0, 500.0),
        platforms: vec![
            ground(0.0, 440.0),
            ground(560.0, 380.0),
            ground(1060.0, 420.0),
            ground(1620.0, 560.0),
            spike(440.0, 552.0, 120.0),
            spike(940.0, 552.0, 120.0),
            breakable(500.0, 440.0, 90.0),
            breakable(1000.0, 430.0, 90.0),
            deck(700.0, 380.0, 110.0),
            deck(1240.0, 370.0, 110.0),
            moving(1460.0, 420.0, 80.0, 60.0, 2.0),
        ],
        enemies: vec![
            foe(EnemyKind::Chaser, 660.0, 540.0, 90.0),
            foe(EnemyKind::Tank, 1160.0, 540.0, 100.0),
            foe(EnemyKind::Basic, 1780.0, 540.0, 110.0),
        ],
        coins: [
            coin_row(710.0, 340.0, 3, 30.0),
            coin_row(1250.0, 330.0, 3, 30.0),
            coin_row(1700.0, 520.0, 4, 32.0),
        ]
        .concat(),
        power_ups: vec![(PowerUpKind::Invincible, Vec2::new(1290.0, 320.0))],
    }
}

fn storm() -> StageLayout {
    StageLayout {
        width: 2600.0,
        environment: env(-0.18, 1.0, 1.0, 0.5, Theme::Storm),
        spawn_point: Vec2::new(100.0, 500.0),
        platforms: vec![
            ground(0.0, 480.0),
            ground(620.0, 420.0),
            ground(1200.0, 380.0),
            ground(1740.0, 460.0),
            ground(2320.0, 280.0),
            bounce(500.0, 540.0, 80.0),
            bounce(1100.0, 540.0, 80.0),
            moving(820.0, 400.0, 90.0, 90.0, 2.2),
            moving(1620.0, 380.0, 90.0, 70.0, 1.9),
            deck(1380.0, 340.0, 100.0),
            deck(2160.0, 420.0, 100.0),
        ],
        enemies: vec![
            foe(EnemyKind::Flyer, 760.0, 240.0, 140.0),
            foe(EnemyKind::Jumper, 1300.0, 540.0, 90.0),
            foe(EnemyKind::Flyer, 1900.0, 220.0, 160.0),
            foe(EnemyKind::Basic, 2380.0, 540.0, 80.0),
        ],
        coins: [
            coin_row(840.0, 360.0, 3, 30.0),
            coin_row(1390.0, 300.0, 3, 30.0),
            coin_row(2170.0, 380.0, 3, 30.0),
        ]
        .concat(),
        power_ups: vec![(PowerUpKind::Dash, Vec2::new(1420.0, 290.0))],
    }
}

fn crags() -> StageLayout {
    StageLayout {
        width: 2800.0,
        // The one stage where ice keeps more grip
        environment: env(0.0, 1.0, 1.0, 0.8, Theme::Crags),
        spawn_point: Vec2::new(100.0, 500.0),
        platforms: vec![
            ground(0.0, 420.0),
            ground(560.0, 400.0),
            ground(1120.0, 420.0),
            ground(1700.0, 420.0),
            ground(2260.0, 540.0),
            // Wall-jump chimneys
            solid(520.0, 280.0, 40.0, 288.0),
            solid(700.0, 200.0, 40.0, 288.0),
            solid(1660.0, 260.0, 40.0, 308.0),
            ice(900.0, 420.0, 140.0),
            ice(1300.0, 380.0, 140.0),
            deck(1480.0, 320.0, 100.0),
            moving(2080.0, 420.0, 80.0, 70.0, 1.8),
        ],
        enemies: vec![
            foe(EnemyKind::Basic, 640.0, 540.0, 90.0),
            foe(EnemyKind::Chaser, 1240.0, 540.0, 100.0),
            foe(EnemyKind::Tank, 1820.0, 540.0, 110.0),
            foe(EnemyKind::Flyer, 2000.0, 240.0, 150.0),
        ],
        coins: [
            coin_row(920.0, 380.0, 4, 32.0),
            coin_row(1490.0, 280.0, 3, 30.0),
            coin_row(2280.0, 500.0, 5, 32.0),
        ]
        .concat(),
        power_ups: vec![(PowerUpKind::Jump, Vec2::new(620.0, 170.0))],
    }
}

fn summit() -> StageLayout {
    StageLayout {
        width: 3200.0,
        environment: env(0.1, 1.0, 1.0, 0.6, Theme::Summit),
        spawn_point: Vec2::new(100.0, 500.0),
        platforms: vec![
            ground(0.0, 400.0),
            ground(520.0, 360.0),
            ground(1000.0, 320.0),
            ground(1440.0, 360.0),
            ground(1920.0, 340.0),
            ground(2380.0, 820.0),
            spike(400.0, 552.0, 120.0),
            spike(1320.0, 552.0, 120.0),
            spike(2260.0, 552.0, 120.0),
            ice(640.0, 440.0, 140.0),
            mud(1100.0, 440.0, 140.0),
            breakable(880.0, 400.0, 90.0),
            breakable(1800.0, 380.0, 90.0),
            bounce(1560.0, 540.0, 80.0),
            moving(2040.0, 400.0, 90.0, 90.0, 2.4),
            deck(2560.0, 420.0, 110.0),
            deck(2820.0, 340.0, 110.0),
        ],
        enemies: vec![
            foe(EnemyKind::Jumper, 700.0, 540.0, 90.0),
            foe(EnemyKind::Chaser, 1180.0, 540.0, 110.0),
            foe(EnemyKind::Tank, 1620.0, 540.0, 120.0),
            foe(EnemyKind::Flyer, 1860.0, 220.0, 160.0),
            foe(EnemyKind::Tank, 2500.0, 540.0, 120.0),
            foe(EnemyKind::Basic, 2900.0, 540.0, 100.0),
        ],
        coins: [
            coin_row(660.0, 400.0, 4, 32.0),
            coin_row(1120.0, 400.0, 4, 32.0),
            coin_row(2060.0, 360.0, 3, 30.0),
            coin_row(2580.0, 380.0, 4, 30.0),
        ]
        .concat(),
        power_ups: vec![
            (PowerUpKind::Invincible, Vec2::new(1840.0, 330.0)),
            (PowerUpKind::Dash, Vec2::new(2840.0, 300.0)),
        ],
    }
}

// =============================================================================
// TESTS
// =============================================================================
