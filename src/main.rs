//! Crag Runner Headless Demo
//!
//! Drives a scripted run through the simulation core, logs the lifecycle
//! events, then replays the recorded inputs and verifies the final state
//! hash matches bit-for-bit.

use std::path::PathBuf;

use anyhow::Context;
use tracing::{info, warn, Level};
use tracing_subscriber::FmtSubscriber;

use crag_runner::{
    config::Tuning,
    game::{
        events::GameEventData,
        input::{InputRecording, InputSnapshot},
        tick::{frame, replay_run},
    },
    Session, BASE_FRAME_MS, STAGE_COUNT, VERSION,
};

/// Frames to simulate (two minutes at 60 Hz).
const DEMO_FRAMES: u64 = 7200;

fn main() -> anyhow::Result<()> {
    // Initialize logging
    let subscriber = FmtSubscriber::builder()
        .with_max_level(Level::INFO)
        .finish();
    tracing::subscriber::set_global_default(subscriber)
        .context("failed to set tracing subscriber")?;

    info!("Crag Runner Core v{}", VERSION);
    info!("Stages: {}", STAGE_COUNT);

    // Optional tuning override: first CLI argument is a JSON tuning file
    let tuning = match std::env::args().nth(1).map(PathBuf::from) {
        Some(path) => {
            info!("Loading tuning from {}", path.display());
            Tuning::load(&path)
                .with_context(|| format!("failed to load tuning from {}", path.display()))?
        }
        None => Tuning::default(),
    };

    demo_run(&tuning);
    Ok(())
}

/// Scripted input for one frame of the demo: run right, hop over gaps,
/// dash now and then.
fn scripted_input(frame_no: u64) -> InputSnapshot {
    let mut input = InputSnapshot::new();
    input.right = frame_no % 120 < 100;
    input.jump = frame_no % 36 < 3;
    input.dash = frame_no % 240 == 5;
    input
}

/// Run the demo session and verify determinism by replay.
fn demo_run(tuning: &Tuning) {
    info!("=== Starting Demo Run ===");

    let run_seed = 20_240_614u64;
    info!("Run Seed: {}", run_seed);

    let mut session = Session::new(run_seed);
    session.start();

    let mut recording = InputRecording::new(run_seed);
    let mut total_events = 0usize;
    let mut last_report_frame = 0u64;

    for _ in 0..DEMO_FRAMES {
        let input = scripted_input(session.frame);
        recording.record(session.frame, input);

        let result = frame(&mut session, &input, BASE_FRAME_MS as f64, tuning);
        total_events += result.events.len();

        // Report every 10 seconds
        if session.frame - last_report_frame >= 600 {
            info!(
                "Frame {}: stage {}, score {}, lives {}, {} events so far",
                session.frame,
                session.stage.index + 1,
                session.player.score,
                session.player.lives,
                total_events
            );
            last_report_frame = session.frame;
        }

        // Log important events
        for event in &result.events {
            match &event.data {
                GameEventData::StageBoundaryReached { stage_index } => {
                    info!("Stage {} cleared", stage_index + 1);
                }
                GameEventData::PlayerDamaged { lives_left, .. } => {
                    info!("Player damaged, {} lives left", lives_left);
                }
                GameEventData::EnemyDefeated { kind, .. } => {
                    info!("Enemy defeated: {:?}", kind);
                }
                GameEventData::RunCompleted { score } => {
                    info!("Run completed! Final score: {}", score);
                }
                GameEventData::PlayerDied => {
                    info!("Out of lives");
                }
                _ => {}
            }
        }

        if result.run_ended {
            info!("Run ended at frame {}", session.frame);
            break;
        }
    }

    // Final state
    info!("=== Run Results ===");
    let hash = session.compute_hash();
    info!("Final State Hash: {}", hex::encode(hash));
    info!(
        "Stage {}, score {}, lives {}, {} events",
        session.stage.index + 1,
        session.player.score,
        session.player.lives,
        total_events
    );
    info!(
        "Recording: {} deltas, frames {}..{}",
        recording.delta_count(),
        recording.start_frame,
        recording.end_frame
    );

    // Verify determinism by replaying the recording
    info!("=== Verifying Determinism ===");
    let (replayed, _) = replay_run(&recording, tuning, DEMO_FRAMES);
    let replay_hash = replayed.compute_hash();
    info!("Replay State Hash: {}", hex::encode(replay_hash));

    if hash == replay_hash {
        info!("DETERMINISM VERIFIED: Hashes match!");
    } else {
        warn!("DETERMINISM FAILURE: Hashes differ!");
    }
}
