//! Run state and core simulation types

use serde::{Deserialize, Serialize};

use super::difficulty::{DifficultyProfile, profile_for};
use crate::consts::*;

/// Why an attempt failed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FailureCause {
    /// Moved while the signal was DANGER
    Caught,
    /// Level time limit ran out
    TimeExpired,
}

/// Outcome of the current level attempt
///
/// Failed and cleared are exclusive by construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Outcome {
    #[default]
    InProgress,
    Failed(FailureCause),
    Cleared,
}

/// Events raised by the level engine and screen machine for collaborators
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameEvent {
    /// Entered Game from Setup
    RunStarted,
    /// Restarted from level 1 after a failure
    RunRestarted,
    /// Signal changed phase
    SignalFlipped(super::signal::Phase),
    /// Player moved during DANGER
    PlayerCaught,
    /// Level timer reached zero
    TimeExpired,
    /// Finish line reached
    LevelCleared { level: u32 },
    /// Fade done, next level started
    LevelAdvanced { level: u32 },
    /// Fade done on the final level
    RunCompleted,
    /// Heartbeat cue due
    Heartbeat { level: u32 },
}

/// Per-frame input sampled by the engine
#[derive(Debug, Clone, Copy, Default)]
pub struct FrameInput {
    /// Movement key held this frame
    pub moving: bool,
}

/// State of one level attempt
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunState {
    /// Distance advanced from the start line
    pub progress: f32,
    /// Active level (1..=MAX_LEVEL)
    pub level: u32,
    /// Time spent in this attempt (ms)
    pub level_elapsed_ms: u64,
    pub outcome: Outcome,
    /// Fade alpha after clearing (0..=255)
    pub fade_progress: u16,
    /// Fade running toward the next level / ending
    pub transitioning: bool,
    /// Set once the final level's fade has completed
    pub completed: bool,
    /// Time since the last heartbeat cue (ms)
    pub heartbeat_elapsed_ms: u64,
}

impl RunState {
    /// Fresh attempt at `level`
    pub fn new(level: u32) -> Self {
        let level = level.clamp(1, MAX_LEVEL);
        Self {
            progress: 0.0,
            level,
            level_elapsed_ms: 0,
            outcome: Outcome::InProgress,
            fade_progress: 0,
            transitioning: false,
            completed: false,
            heartbeat_elapsed_ms: 0,
        }
    }

    /// Difficulty for the active level
    pub fn profile(&self) -> DifficultyProfile {
        profile_for(self.level)
    }

    pub fn failed(&self) -> bool {
        matches!(self.outcome, Outcome::Failed(_))
    }

    pub fn cleared(&self) -> bool {
        self.outcome == Outcome::Cleared
    }

    /// True once the attempt has failed or cleared
    pub fn is_terminal(&self) -> bool {
        self.outcome != Outcome::InProgress
    }

    pub fn time_left_ms(&self) -> u64 {
        LEVEL_TIME_LIMIT_MS.saturating_sub(self.level_elapsed_ms)
    }

    /// Fraction of the level time used (0..=1), for the stopwatch hand
    pub fn time_fraction(&self) -> f32 {
        (self.level_elapsed_ms.min(LEVEL_TIME_LIMIT_MS) as f32) / LEVEL_TIME_LIMIT_MS as f32
    }

    /// On-screen sprite x
    pub fn player_x(&self) -> f32 {
        PLAYER_START_X + self.progress
    }

    pub fn reached_finish(&self) -> bool {
        self.progress >= FINISH_DISTANCE
    }

    pub fn is_final_level(&self) -> bool {
        self.level >= MAX_LEVEL
    }
}
