//! Per-level difficulty table

use serde::{Deserialize, Serialize};

/// Speed and signal-switch window for one level
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DifficultyProfile {
    /// Progress gained per frame while moving on SAFE
    pub advance_speed: f32,
    /// Shortest time between flips (ms)
    pub min_switch_ms: u32,
    /// Longest time between flips (ms)
    pub max_switch_ms: u32,
}

/// Difficulty for `level` (1-based). Levels below 1 are treated as 1.
pub fn profile_for(level: u32) -> DifficultyProfile {
    let level = level.max(1);
    DifficultyProfile {
        advance_speed: 3.0 + level as f32,
        min_switch_ms: 1000u32.saturating_sub(level.saturating_mul(55)).max(280),
        max_switch_ms: 1700u32.saturating_sub(level.saturating_mul(75)).max(650),
    }
}
