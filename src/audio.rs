//! Audio cues
//!
//! Four sine tones, generated on the fly - no external files needed.
//! Cue selection is platform independent; playback uses Web Audio on wasm32.

use crate::sim::GameEvent;

/// Sound cue types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cue {
    /// Signal flipped
    Tick,
    /// Caught moving on red
    Buzz,
    /// Run started
    Start,
    /// Periodic pulse while playing; pitch rises with level
    Heartbeat { level: u32 },
}

/// Parameters of a single sine tone
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tone {
    /// Frequency (Hz)
    pub freq: f32,
    /// Duration (seconds)
    pub duration: f32,
    /// Peak volume (0..1)
    pub volume: f32,
}

impl Cue {
    /// Cue for an engine event, if it has one
    pub fn for_event(event: &GameEvent) -> Option<Self> {
        match event {
            GameEvent::SignalFlipped(_) => Some(Cue::Tick),
            GameEvent::PlayerCaught => Some(Cue::Buzz),
            GameEvent::RunStarted => Some(Cue::Start),
            GameEvent::Heartbeat { level } => Some(Cue::Heartbeat { level: *level }),
            _ => None,
        }
    }

    pub fn tone(&self) -> Tone {
        match self {
            Cue::Tick => Tone {
                freq: 900.0,
                duration: 0.08,
                volume: 0.5,
            },
            Cue::Buzz => Tone {
                freq: 120.0,
                duration: 0.5,
                volume: 0.5,
            },
            Cue::Start => Tone {
                freq: 500.0,
                duration: 0.25,
                volume: 0.5,
            },
            Cue::Heartbeat { level } => Tone {
                freq: 60.0 + *level as f32 * 6.0,
                duration: 0.08,
                volume: 0.4,
            },
        }
    }
}

#[cfg(target_arch = "wasm32")]
pub use web::AudioManager;

#[cfg(target_arch = "wasm32")]
mod web {
    use web_sys::{AudioContext, OscillatorType};

    use super::Cue;
    use crate::settings::Settings;

    /// Audio manager for the game
    pub struct AudioManager {
        ctx: Option<AudioContext>,
        master_volume: f32,
        sfx_volume: f32,
        muted: bool,
    }

    impl AudioManager {
        pub fn new(settings: &Settings) -> Self {
            // May fail outside a secure context
            let ctx = AudioContext::new().ok();
            if ctx.is_none() {
                log::warn!("Failed to create AudioContext - audio disabled");
            }
            Self {
                ctx,
                master_volume: settings.master_volume,
                sfx_volume: settings.sfx_volume,
                muted: settings.muted,
            }
        }

        /// Resume audio context (required after user gesture)
        pub fn resume(&self) {
            if let Some(ctx) = &self.ctx {
                let _ = ctx.resume();
            }
        }

        fn effective_volume(&self) -> f32 {
            if self.muted {
                0.0
            } else {
                self.master_volume * self.sfx_volume
            }
        }

        /// Play a cue (fire and forget)
        pub fn play(&self, cue: Cue) {
            let vol = self.effective_volume();
            if vol <= 0.0 {
                return;
            }
            let Some(ctx) = &self.ctx else { return };

            if ctx.state() == web_sys::AudioContextState::Suspended {
                let _ = ctx.resume();
            }

            let tone = cue.tone();
            let Ok(osc) = ctx.create_oscillator() else { return };
            let Ok(gain) = ctx.create_gain() else { return };
            osc.set_type(OscillatorType::Sine);
            osc.frequency().set_value(tone.freq);
            if osc.connect_with_audio_node(&gain).is_err() {
                return;
            }
            if gain.connect_with_audio_node(&ctx.destination()).is_err() {
                return;
            }

            let t = ctx.current_time();
            let end = t + tone.duration as f64;
            gain.gain().set_value_at_time(vol * tone.volume, t).ok();
            gain.gain().set_value_at_time(vol * tone.volume, end - 0.005).ok();
            gain.gain().linear_ramp_to_value_at_time(0.0, end).ok();
            osc.start().ok();
            osc.stop_with_when(end).ok();
        }
    }
}
