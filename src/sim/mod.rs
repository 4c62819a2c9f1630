//! Deterministic level simulation
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Time arrives as explicit `FrameTime` values
//! - Randomness only through `IntervalSource`
//! - No rendering, audio or platform dependencies

pub mod difficulty;
pub mod signal;
pub mod state;
pub mod tick;

pub use difficulty::{DifficultyProfile, profile_for};
pub use signal::{IntervalSource, Phase, ScriptedIntervals, SeededIntervals, SignalState};
pub use state::{FailureCause, FrameInput, GameEvent, Outcome, RunState};
pub use tick::advance;
