//! Cosmetic effect counters
//!
//! Purely advisory to the renderer; nothing here affects gameplay.

use glam::Vec2;
use rand::Rng;

use crate::consts::*;
use crate::sim::{GameEvent, RunState};

/// Effect kinds that can be triggered
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EffectKind {
    Shake,
    Glitch,
}

/// Shake/glitch countdowns, fade overlay and menu title tilt
#[derive(Debug, Clone, Default)]
pub struct Effects {
    /// Frames of screen shake left
    pub shake_frames: u32,
    /// Frames of glitch overlay left
    pub glitch_frames: u32,
    /// Black overlay alpha (0..=255)
    pub fade_alpha: u16,
    /// Menu title rotation (degrees)
    pub title_tilt: f32,
    tilt_dir: f32,
}

impl Effects {
    /// Title rotation per menu frame (degrees)
    const TILT_STEP: f32 = 0.15;
    /// Tilt reverses past this angle (degrees)
    const TILT_LIMIT: f32 = 4.0;

    pub fn new() -> Self {
        Self {
            tilt_dir: 1.0,
            ..Default::default()
        }
    }

    /// Start (or restart) an effect; re-triggering replaces the remaining time
    pub fn trigger(&mut self, kind: EffectKind, frames: u32) {
        match kind {
            EffectKind::Shake => self.shake_frames = frames,
            EffectKind::Glitch => self.glitch_frames = frames,
        }
    }

    /// React to engine events
    pub fn apply(&mut self, event: &GameEvent) {
        match event {
            GameEvent::PlayerCaught => {
                self.trigger(EffectKind::Shake, CAUGHT_SHAKE_FRAMES);
                self.trigger(EffectKind::Glitch, CAUGHT_GLITCH_FRAMES);
            }
            GameEvent::TimeExpired => self.trigger(EffectKind::Glitch, TIMEOUT_GLITCH_FRAMES),
            GameEvent::RunRestarted => self.trigger(EffectKind::Glitch, RESTART_GLITCH_FRAMES),
            _ => {}
        }
    }

    /// Advance one frame. While a level fade runs the overlay follows it,
    /// otherwise it ramps back down to zero.
    pub fn tick(&mut self, run: Option<&RunState>) {
        self.shake_frames = self.shake_frames.saturating_sub(1);
        self.glitch_frames = self.glitch_frames.saturating_sub(1);

        match run {
            Some(run) if run.transitioning || run.completed => self.fade_alpha = run.fade_progress,
            _ => self.fade_alpha = self.fade_alpha.saturating_sub(FADE_STEP),
        }
    }

    /// Advance the menu title wobble one frame
    pub fn tick_title(&mut self) {
        if self.tilt_dir == 0.0 {
            self.tilt_dir = 1.0;
        }
        self.title_tilt += Self::TILT_STEP * self.tilt_dir;
        if self.title_tilt.abs() > Self::TILT_LIMIT {
            self.tilt_dir = -self.tilt_dir;
        }
    }

    pub fn is_shaking(&self) -> bool {
        self.shake_frames > 0
    }

    pub fn is_glitching(&self) -> bool {
        self.glitch_frames > 0
    }

    /// Random draw offset while shaking, zero otherwise
    pub fn shake_offset(&self, rng: &mut impl Rng) -> Vec2 {
        if !self.is_shaking() {
            return Vec2::ZERO;
        }
        Vec2::new(
            rng.random_range(-SHAKE_AMPLITUDE..=SHAKE_AMPLITUDE) as f32,
            rng.random_range(-SHAKE_AMPLITUDE..=SHAKE_AMPLITUDE) as f32,
        )
    }
}
