//! Per-Frame Orchestration
//!
//! One external rendering clock calls [`frame`] once per animation frame
//! with the input snapshot and the elapsed delta. Everything inside is
//! synchronous and deterministic given the session seed and the inputs.
//!
//! The delta is untrusted: non-finite, zero, or negative values skip the
//! frame, huge values are clamped, so a stalled or broken clock can never
//! divide by zero or explode the physics.

use crate::config::Tuning;
use crate::game::events::{GameEvent, GameEventData};
use crate::game::input::{InputRecording, InputSnapshot};
use crate::game::state::{Session, SessionPhase};
use crate::{BASE_FRAME_MS, MAX_FRAME_MS};

/// Result of one frame.
#[derive(Debug, Default)]
pub struct FrameResult {
    /// Events generated this frame
    pub events: Vec<GameEvent>,
    /// Whether the run ended this frame (or already was over)
    pub run_ended: bool,
    /// Whether a stage transition happened this frame
    pub stage_advanced: bool,
}

/// Clamp an untrusted delta to something the simulation can integrate.
///
/// Returns `None` when the frame should be skipped outright.
fn sanitize_delta(dt_ms: f64) -> Option<f32> {
    if !dt_ms.is_finite() || dt_ms <= 0.0 {
        return None;
    }
    Some((dt_ms as f32).min(MAX_FRAME_MS))
}

/// Run one simulation frame.
///
/// # Determinism
///
/// Given the same session seed, the same input sequence and the same
/// deltas, this function produces bit-identical state on every run:
/// entity iteration order is the stable layout order, all randomness
/// comes from the stage RNG, and no wall clock is consulted anywhere.
pub fn frame(
    session: &mut Session,
    input: &InputSnapshot,
    dt_ms: f64,
    tuning: &Tuning,
) -> FrameResult {
    let mut result = FrameResult::default();

    match session.phase {
        SessionPhase::Ready => return result,
        SessionPhase::Ended => {
            result.run_ended = true;
            return result;
        }
        SessionPhase::Playing => {}
    }

    // Pause halts the update phase only; timers freeze in place
    if session.paused {
        return result;
    }

    let Some(dt_ms) = sanitize_delta(dt_ms) else {
        return result;
    };

    // Hitstop and simulation share one frame timeline, so a recorded run
    // replays through its freezes identically
    session.frame += 1;
    let frame_no = session.frame;

    // Hitstop: simulation freezes, rendering (elsewhere) continues
    if session.hitstop_ms > 0.0 {
        session.hitstop_ms = (session.hitstop_ms - dt_ms).max(0.0);
        return result;
    }

    let dt_norm = dt_ms / BASE_FRAME_MS;

    let mut events: Vec<GameEvent> = Vec::new();

    // 1. Platform behavior (moving oscillation)
    session.stage.update_platforms(dt_ms);

    // 2. Player update
    {
        let env = session.stage.environment;
        let ctx = session.stage.context();
        let stage = &mut session.stage;
        session.player.update(
            input,
            dt_norm,
            dt_ms,
            &env,
            &ctx,
            &mut stage.platforms,
            &mut stage.enemies,
            &mut stage.coins,
            &mut stage.power_ups,
            tuning,
            frame_no,
            &mut events,
        );
    }

    // 3. Enemy AI
    let player_position = session.player.position;
    session
        .stage
        .update_enemies(dt_norm, dt_ms, player_position, &tuning.enemies);

    // 4. Impact feedback from this frame's outcomes
    for event in &events {
        match event.data {
            GameEventData::PlayerDamaged { .. } => session.apply_hitstop(tuning.hitstop.damage_ms),
            GameEventData::EnemyDefeated { .. } => session.apply_hitstop(tuning.hitstop.defeat_ms),
            _ => {}
        }
    }

    // 5. End-of-frame sweep of terminal entities
    session.stage.sweep();

    // 6. Stage boundary
    if session.stage.boundary_reached(session.player.position.x) {
        events.push(GameEvent::stage_boundary_reached(
            frame_no,
            session.stage.index,
        ));
        session.player.score = session
            .player
            .score
            .saturating_add(tuning.score.stage_clear);
        session.player.celebrate(800.0);

        if session.advance_stage() {
            result.stage_advanced = true;
        } else {
            events.push(GameEvent::run_completed(frame_no, session.player.score));
            session.phase = SessionPhase::Ended;
            result.run_ended = true;
        }
    }

    // 7. Out of lives: the orchestrator, not the player, ends the run
    if session.player.lives == 0 {
        events.push(GameEvent::player_died(frame_no));
        session.phase = SessionPhase::Ended;
        result.run_ended = true;
    }

    // 8. Camera
    session.stage.update_camera(session.player.position.x);

    session.push_events(events);
    result.events = session.take_events();
    result
}

/// Replay a run from a recording.
///
/// Returns the final session and all events, for hash comparison against
/// the live run.
pub fn replay_run(recording: &InputRecording, tuning: &Tuning, max_frames: u64) -> (Session, Vec<GameEvent>) {
    let mut session = Session::new(recording.run_seed);
    session.start();

    let mut all_events = Vec::new();

    for (_, input) in recording.replay_iter().take(max_frames as usize) {
        let result = frame(&mut session, &input, BASE_FRAME_MS as f64, tuning);
        all_events.extend(result.events);
        if result.run_ended {
            break;
        }
    }

    (session, all_events)
}

// =============================================================================
// TESTS
// =============================================================================
