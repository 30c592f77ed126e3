//! Input Capture and Recording
//!
//! The per-frame input snapshot consumed by the player controller, plus a
//! delta-compressed recording used for replay playback and determinism
//! verification.

use serde::{Deserialize, Serialize};
use thiserror::Error;

// =============================================================================
// INPUT SNAPSHOT
// =============================================================================

/// Raw input state for a single frame.
///
/// This is the minimal input that affects simulation state.
/// NO frame field - the frame number is stored separately for compression.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct InputSnapshot {
    /// Move left held
    pub left: bool,
    /// Move right held
    pub right: bool,
    /// Jump held
    pub jump: bool,
    /// Down held (fast fall / drop intent)
    pub down: bool,
    /// Dash requested
    pub dash: bool,
}

impl InputSnapshot {
    /// Left flag bit
    pub const FLAG_LEFT: u8 = 0x01;
    /// Right flag bit
    pub const FLAG_RIGHT: u8 = 0x02;
    /// Jump flag bit
    pub const FLAG_JUMP: u8 = 0x04;
    /// Down flag bit
    pub const FLAG_DOWN: u8 = 0x08;
    /// Dash flag bit
    pub const FLAG_DASH: u8 = 0x10;

    /// Create a new empty snapshot (nothing held).
    pub const fn new() -> Self {
        Self {
            left: false,
            right: false,
            jump: false,
            down: false,
            dash: false,
        }
    }

    /// Horizontal input direction: -1 (left), +1 (right), or 0.
    ///
    /// Left and right held together cancel each other.
    #[inline]
    pub fn horizontal(&self) -> f32 {
        match (self.left, self.right) {
            (true, false) => -1.0,
            (false, true) => 1.0,
            _ => 0.0,
        }
    }

    /// Check if this is an idle frame (no input).
    #[inline]
    pub fn is_idle(&self) -> bool {
        self.to_flags() == 0
    }

    /// Pack into a flag byte for compact recording.
    #[inline]
    pub fn to_flags(&self) -> u8 {
        let mut flags = 0;
        if self.left {
            flags |= Self::FLAG_LEFT;
        }
        if self.right {
            flags |= Self::FLAG_RIGHT;
        }
        if self.jump {
            flags |= Self::FLAG_JUMP;
        }
        if self.down {
            flags |= Self::FLAG_DOWN;
        }
        if self.dash {
            flags |= Self::FLAG_DASH;
        }
        flags
    }

    /// Unpack from a flag byte.
    #[inline]
    pub fn from_flags(flags: u8) -> Self {
        Self {
            left: flags & Self::FLAG_LEFT != 0,
            right: flags & Self::FLAG_RIGHT != 0,
            jump: flags & Self::FLAG_JUMP != 0,
            down: flags & Self::FLAG_DOWN != 0,
            dash: flags & Self::FLAG_DASH != 0,
        }
    }
}

/// Input state change at a specific frame.
///
/// Only stored when input CHANGES (not every frame).
/// This keeps recordings small even for long runs.
#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
pub struct InputDelta {
    /// Frame when this input state began
    pub frame: u64,
    /// The new input state
    pub snapshot: InputSnapshot,
}

impl InputDelta {
    /// Create new delta entry.
    pub fn new(frame: u64, snapshot: InputSnapshot) -> Self {
        Self { frame, snapshot }
    }
}

// =============================================================================
// INPUT RECORDING
// =============================================================================

/// Error decoding a serialized recording.
#[derive(Debug, Error)]
pub enum RecordingError {
    /// The byte stream was not a valid recording
    #[error("failed to decode input recording: {0}")]
    Decode(#[from] bincode::Error),
}

/// Complete input recording for one run.
///
/// Used for:
/// - Replay playback
/// - Determinism verification (same seed + same recording = same hash)
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct InputRecording {
    /// RNG seed used for this run
    pub run_seed: u64,

    /// Starting frame (usually 0)
    pub start_frame: u64,

    /// Ending frame
    pub end_frame: u64,

    /// Delta-compressed input data.
    /// Only stores frames where input CHANGED.
    deltas: Vec<InputDelta>,

    /// Last recorded input (for delta comparison)
    #[serde(skip)]
    last_snapshot: InputSnapshot,
}

impl InputRecording {
    /// Create a new recording for a run.
    pub fn new(run_seed: u64) -> Self {
        Self {
            run_seed,
            start_frame: 0,
            end_frame: 0,
            deltas: Vec::with_capacity(512),
            last_snapshot: InputSnapshot::new(),
        }
    }

    /// Record input for a frame.
    ///
    /// Only stores if input changed from the previous frame.
    pub fn record(&mut self, frame: u64, snapshot: InputSnapshot) {
        // Update end frame
        self.end_frame = frame;

        // Only store if changed
        if snapshot != self.last_snapshot {
            self.deltas.push(InputDelta::new(frame, snapshot));
            self.last_snapshot = snapshot;
        }
    }

    /// Get input at a specific frame.
    ///
    /// Uses binary search for efficiency.
    pub fn input_at(&self, frame: u64) -> InputSnapshot {
        if self.deltas.is_empty() {
            return InputSnapshot::new();
        }

        // Binary search for the last delta at or before this frame
        let idx = self.deltas.partition_point(|d| d.frame <= frame);

        if idx == 0 {
            // Before first delta - idle
            InputSnapshot::new()
        } else {
            // Most recent delta at or before this frame
            self.deltas[idx - 1].snapshot
        }
    }

    /// Get all deltas.
    pub fn deltas(&self) -> &[InputDelta] {
        &self.deltas
    }

    /// Number of delta entries.
    pub fn delta_count(&self) -> usize {
        self.deltas.len()
    }

    /// Finalize the recording (call at run end).
    pub fn finalize(&mut self, end_frame: u64) {
        self.end_frame = end_frame;
    }

    /// Serialize to bytes for storage.
    pub fn to_bytes(&self) -> Vec<u8> {
        // Serialization of this struct cannot fail
        bincode::serialize(self).expect("recording serialization")
    }

    /// Deserialize a recording from bytes.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, RecordingError> {
        Ok(bincode::deserialize(bytes)?)
    }

    /// Create iterator over all inputs for replay.
    pub fn replay_iter(&self) -> ReplayIterator<'_> {
        ReplayIterator {
            recording: self,
            current_frame: self.start_frame,
            delta_idx: 0,
            current_snapshot: InputSnapshot::new(),
        }
    }
}

/// Iterator for replaying inputs frame-by-frame.
pub struct ReplayIterator<'a> {
    recording: &'a InputRecording,
    current_frame: u64,
    delta_idx: usize,
    current_snapshot: InputSnapshot,
}

impl<'a> Iterator for ReplayIterator<'a> {
    type Item = (u64, InputSnapshot);

    fn next(&mut self) -> Option<Self::Item> {
        if self.current_frame > self.recording.end_frame {
            return None;
        }

        // Check if we need to update current snapshot
        while self.delta_idx < self.recording.deltas.len() {
            let delta = &self.recording.deltas[self.delta_idx];
            if delta.frame <= self.current_frame {
                self.current_snapshot = delta.snapshot;
                self.delta_idx += 1;
            } else {
                break;
            }
        }

        let result = (self.current_frame, self.current_snapshot);
        self.current_frame += 1;
        Some(result)
    }
}

// =============================================================================
// TESTS
// =============================================================================
