//! Don't Move - a single-screen reaction game
//!
//! Core modules:
//! - `sim`: Deterministic level simulation (signal, run state, per-frame advance)
//! - `screen`: Screen state machine and per-frame session driver
//! - `effects`: Cosmetic shake/glitch/fade counters
//! - `audio`: Cue mapping and Web Audio playback
//! - `clock`: Fixed-cadence frame timing
//! - `platform`: Browser key mapping
//! - `settings`: User preferences
//! - `ui`: Text model of each screen

pub mod audio;
pub mod autopilot;
pub mod clock;
pub mod effects;
pub mod platform;
pub mod screen;
pub mod settings;
pub mod sim;
pub mod ui;

pub use screen::{IdentityField, IdentityInput, InputEvent, Screen, Session};
pub use settings::{Settings, SettingsError};

/// Game configuration constants
pub mod consts {
    /// Target frame rate
    pub const FRAME_RATE: u64 = 60;

    /// Playfield dimensions
    pub const WIDTH: f32 = 800.0;
    pub const HEIGHT: f32 = 400.0;

    /// Player sprite
    pub const PLAYER_START_X: f32 = 50.0;
    pub const PLAYER_SIZE: f32 = 40.0;

    /// Finish line sits 100px from the right edge
    pub const FINISH_LINE_X: f32 = WIDTH - 100.0;
    /// Progress needed for the sprite's right edge to touch the finish line
    pub const FINISH_DISTANCE: f32 = FINISH_LINE_X - (PLAYER_START_X + PLAYER_SIZE);

    /// Levels per run
    pub const MAX_LEVEL: u32 = 13;
    /// Time allowed per level attempt (ms)
    pub const LEVEL_TIME_LIMIT_MS: u64 = 60_000;

    /// Fade alpha added per frame after a level is cleared
    pub const FADE_STEP: u16 = 5;
    /// Fade alpha at which the transition completes
    pub const FADE_MAX: u16 = 255;

    /// Effect durations (frames)
    pub const CAUGHT_SHAKE_FRAMES: u32 = 8;
    pub const CAUGHT_GLITCH_FRAMES: u32 = 20;
    pub const TIMEOUT_GLITCH_FRAMES: u32 = 25;
    pub const RESTART_GLITCH_FRAMES: u32 = 30;

    /// Maximum shake displacement per axis (px)
    pub const SHAKE_AMPLITUDE: i32 = 4;

    /// Identity text field capacity (chars)
    pub const IDENTITY_FIELD_MAX: usize = 14;
}

/// Heartbeat period for a level (ms); shrinks as the level rises
#[inline]
pub fn heartbeat_period_ms(level: u32) -> u64 {
    220u64.saturating_sub(10 * level as u64).max(80)
}
