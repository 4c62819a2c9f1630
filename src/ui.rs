//! Text model of each screen
//!
//! Renderers (DOM front end, native log) draw from a `ScreenView`; nothing
//! here feeds back into the game.

use crate::consts::MAX_LEVEL;
use crate::screen::{IdentityField, IdentityInput, Screen, Session};
use crate::settings::Settings;
use crate::sim::IntervalSource;

/// Emphasis hint for a line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tone {
    Normal,
    Dim,
    Safe,
    Danger,
}

/// One line of screen text
#[derive(Debug, Clone, PartialEq)]
pub struct Line {
    pub text: String,
    pub tone: Tone,
}

impl Line {
    fn new(text: impl Into<String>, tone: Tone) -> Self {
        Self {
            text: text.into(),
            tone,
        }
    }
}

/// Everything a renderer needs for one frame
#[derive(Debug, Clone, PartialEq)]
pub struct ScreenView {
    pub screen: &'static str,
    pub title: String,
    pub lines: Vec<Line>,
    /// Background tint while playing
    pub tint: Option<Tone>,
    /// Stopwatch hand position (0..1 of the level time used)
    pub stopwatch: Option<f32>,
    /// Sprite x while playing
    pub player_x: Option<f32>,
    pub fade_alpha: u16,
    pub shake: bool,
    pub glitch: bool,
    /// Menu title rotation (degrees)
    pub title_tilt: f32,
}

const INSTRUCTIONS: [&str; 7] = [
    "• HOLD SPACE to move",
    "• GREEN = Safe",
    "• RED = Do not move",
    "• Fail once → back to Level 1",
    "• 1 minute per level",
    "",
    "ESC — Back",
];

/// Ephemeral leaderboard entry for the current run
pub fn leaderboard_line(identity: &IdentityInput) -> String {
    format!("1. {} — {}", identity.name.trim(), identity.region.trim())
}

/// Build the view for the session's current screen
pub fn view<R: IntervalSource>(session: &Session<R>, settings: &Settings) -> ScreenView {
    let effects = session.effects();
    let mut view = ScreenView {
        screen: session.screen().name(),
        title: String::new(),
        lines: Vec::new(),
        tint: None,
        stopwatch: None,
        player_x: None,
        fade_alpha: effects.fade_alpha,
        shake: effects.is_shaking() && settings.effective_screen_shake(),
        glitch: effects.is_glitching() && settings.effective_glitch(),
        title_tilt: 0.0,
    };

    match session.screen() {
        Screen::Menu => {
            view.title = "DON'T MOVE".into();
            view.title_tilt = if settings.reduced_motion { 0.0 } else { effects.title_tilt };
            view.lines = vec![
                Line::new("TIME IS WATCHING", Tone::Danger),
                Line::new(format!("Survive all {MAX_LEVEL} levels to finish"), Tone::Normal),
                Line::new("ENTER — Start     I — Instructions", Tone::Normal),
            ];
        }
        Screen::Setup => {
            let identity = session.identity();
            let label_tone = |field| {
                if identity.active == field {
                    Tone::Normal
                } else {
                    Tone::Dim
                }
            };
            view.title = "ENTER YOUR IDENTITY".into();
            view.lines = vec![
                Line::new(format!("Username: {}_", identity.name), label_tone(IdentityField::Name)),
                Line::new(format!("Region: {}_", identity.region), label_tone(IdentityField::Region)),
                Line::new("TAB — Switch | ENTER — Confirm", Tone::Dim),
            ];
        }
        Screen::Instructions => {
            view.title = "HOW TO PLAY".into();
            view.lines = INSTRUCTIONS.iter().map(|l| Line::new(*l, Tone::Normal)).collect();
        }
        Screen::Game(game) => {
            let phase_tone = if game.signal.is_safe() { Tone::Safe } else { Tone::Danger };
            view.title = game.signal.phase.as_str().into();
            view.tint = Some(phase_tone);
            view.stopwatch = Some(game.run.time_fraction());
            view.player_x = Some(game.run.player_x());
            view.lines.push(Line::new(format!("LEVEL {} / {MAX_LEVEL}", game.run.level), Tone::Normal));
            if game.run.failed() {
                view.lines.push(Line::new("TIME CAUGHT YOU", Tone::Danger));
                view.lines.push(Line::new("PRESS ENTER TO RESTART", Tone::Normal));
            }
            if game.run.cleared() {
                view.lines.push(Line::new("SURVIVED", Tone::Safe));
            }
        }
        Screen::Ending => {
            view.title = "LEADERBOARD".into();
            view.lines = vec![
                Line::new(leaderboard_line(session.identity()), Tone::Normal),
                Line::new(format!("Completed all {MAX_LEVEL} levels"), Tone::Dim),
                Line::new("Congrats. This game shows time is precious.", Tone::Normal),
                Line::new("Don't waste it.", Tone::Danger),
            ];
        }
    }

    view
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::FrameTime;
    use crate::screen::InputEvent;
    use crate::sim::{FrameInput, Phase, ScriptedIntervals};

    fn session_in_game() -> Session<ScriptedIntervals> {
        let mut s = Session::new(ScriptedIntervals::default());
        s.handle_input(InputEvent::Confirm, 0);
        for c in "Lan".chars() {
            s.handle_input(InputEvent::Char(c), 0);
        }
        s.handle_input(InputEvent::ToggleField, 0);
        for c in "Hanoi".chars() {
            s.handle_input(InputEvent::Char(c), 0);
        }
        s.handle_input(InputEvent::Confirm, 0);
        s
    }

    #[test]
    fn test_menu_view() {
        let s = Session::new(ScriptedIntervals::default());
        let v = view(&s, &Settings::default());
        assert_eq!(v.screen, "menu");
        assert_eq!(v.title, "DON'T MOVE");
        assert!(v.lines.iter().any(|l| l.text.contains("13 levels")));
    }

    #[test]
    fn test_setup_highlights_active_field() {
        let mut s = Session::new(ScriptedIntervals::default());
        s.handle_input(InputEvent::Confirm, 0);
        s.handle_input(InputEvent::Char('A'), 0);
        let v = view(&s, &Settings::default());
        assert_eq!(v.lines[0], Line::new("Username: A_", Tone::Normal));
        assert_eq!(v.lines[1].tone, Tone::Dim);
    }

    #[test]
    fn test_game_view_failure_banner() {
        let mut s = session_in_game();
        let v = view(&s, &Settings::default());
        assert_eq!(v.title, "GREEN");
        assert_eq!(v.tint, Some(Tone::Safe));
        assert_eq!(v.lines[0].text, "LEVEL 1 / 13");

        {
            let game = s.game_mut().unwrap();
            game.signal.force_phase(Phase::Danger);
            game.signal.next_flip_at = u64::MAX;
        }
        s.frame([], FrameInput { moving: true }, FrameTime { now_ms: 16, dt_ms: 16 });

        let v = view(&s, &Settings::default());
        assert_eq!(v.title, "RED");
        assert!(v.shake);
        assert!(v.glitch);
        assert!(v.lines.iter().any(|l| l.text == "TIME CAUGHT YOU"));

        let calm = Settings {
            reduced_motion: true,
            ..Default::default()
        };
        let v = view(&s, &calm);
        assert!(!v.shake && !v.glitch);
    }

    #[test]
    fn test_leaderboard_line() {
        let identity = IdentityInput {
            name: " Lan ".into(),
            region: "Hanoi".into(),
            active: IdentityField::Name,
        };
        assert_eq!(leaderboard_line(&identity), "1. Lan — Hanoi");
    }
}
