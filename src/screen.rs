//! Screen state machine
//!
//! One `Session` owns the active screen, the player's identity and the
//! cosmetic effects. Each frame drains discrete input first, then advances
//! the level simulation once if the Game screen is active.

use serde::{Deserialize, Serialize};
use unicode_general_category::{GeneralCategory, get_general_category};

use crate::clock::FrameTime;
use crate::consts::IDENTITY_FIELD_MAX;
use crate::effects::Effects;
use crate::sim::{self, FrameInput, GameEvent, IntervalSource, RunState, SeededIntervals, SignalState};

/// Discrete key press delivered to the screen machine
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputEvent {
    /// Enter
    Confirm,
    /// Escape
    Cancel,
    /// Tab
    ToggleField,
    Backspace,
    /// Typed character (also carries the menu's help key)
    Char(char),
}

impl InputEvent {
    /// Help key on the menu
    fn is_help(&self) -> bool {
        matches!(self, InputEvent::Char('i' | 'I'))
    }
}

/// Whether a typed character is visible text
///
/// Rejects control, format, private-use, unassigned and separator
/// characters. The plain space is the one whitespace accepted.
pub fn is_printable(c: char) -> bool {
    if c == ' ' {
        return true;
    }
    !matches!(
        get_general_category(c),
        GeneralCategory::Control
            | GeneralCategory::Format
            | GeneralCategory::Surrogate
            | GeneralCategory::PrivateUse
            | GeneralCategory::Unassigned
            | GeneralCategory::SpaceSeparator
            | GeneralCategory::LineSeparator
            | GeneralCategory::ParagraphSeparator
    )
}

/// Which identity text field receives typing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum IdentityField {
    #[default]
    Name,
    Region,
}

/// Player name and region entered on the Setup screen
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct IdentityInput {
    pub name: String,
    pub region: String,
    pub active: IdentityField,
}

impl IdentityInput {
    pub fn new() -> Self {
        Self::default()
    }

    fn active_mut(&mut self) -> &mut String {
        match self.active {
            IdentityField::Name => &mut self.name,
            IdentityField::Region => &mut self.region,
        }
    }

    pub fn active_text(&self) -> &str {
        match self.active {
            IdentityField::Name => &self.name,
            IdentityField::Region => &self.region,
        }
    }

    pub fn toggle(&mut self) {
        self.active = match self.active {
            IdentityField::Name => IdentityField::Region,
            IdentityField::Region => IdentityField::Name,
        };
    }

    /// Append a printable character to the active field (up to the cap)
    pub fn push_char(&mut self, c: char) {
        if !is_printable(c) {
            return;
        }
        let field = self.active_mut();
        if field.chars().count() < IDENTITY_FIELD_MAX {
            field.push(c);
        }
    }

    pub fn backspace(&mut self) {
        self.active_mut().pop();
    }

    /// Both fields contain something other than whitespace
    pub fn is_complete(&self) -> bool {
        !self.name.trim().is_empty() && !self.region.trim().is_empty()
    }
}

/// Live level attempt shown on the Game screen
#[derive(Debug, Clone)]
pub struct GameScreen {
    pub run: RunState,
    pub signal: SignalState,
}

impl GameScreen {
    fn start(level: u32, now: u64, rng: &mut impl IntervalSource) -> Self {
        let run = RunState::new(level);
        let signal = SignalState::start(now, &run.profile(), rng);
        Self { run, signal }
    }
}

/// Top-level screens
#[derive(Debug, Clone)]
pub enum Screen {
    Menu,
    Setup,
    Instructions,
    Game(GameScreen),
    Ending,
}

impl Screen {
    pub fn name(&self) -> &'static str {
        match self {
            Screen::Menu => "menu",
            Screen::Setup => "setup",
            Screen::Instructions => "instructions",
            Screen::Game(_) => "game",
            Screen::Ending => "ending",
        }
    }
}

/// The whole game: screen machine plus the state each screen needs
#[derive(Debug, Clone)]
pub struct Session<R: IntervalSource = SeededIntervals> {
    screen: Screen,
    identity: IdentityInput,
    effects: Effects,
    rng: R,
}

impl Session<SeededIntervals> {
    /// Session drawing switch intervals from a seeded PCG stream
    pub fn seeded(seed: u64) -> Self {
        Self::new(SeededIntervals::new(seed))
    }
}

impl<R: IntervalSource> Session<R> {
    pub fn new(rng: R) -> Self {
        Self {
            screen: Screen::Menu,
            identity: IdentityInput::new(),
            effects: Effects::new(),
            rng,
        }
    }

    pub fn screen(&self) -> &Screen {
        &self.screen
    }

    pub fn identity(&self) -> &IdentityInput {
        &self.identity
    }

    pub fn effects(&self) -> &Effects {
        &self.effects
    }

    /// Active attempt, if on the Game screen
    pub fn game(&self) -> Option<&GameScreen> {
        match &self.screen {
            Screen::Game(game) => Some(game),
            _ => None,
        }
    }

    /// Mutable attempt access for scripted scenarios
    pub fn game_mut(&mut self) -> Option<&mut GameScreen> {
        match &mut self.screen {
            Screen::Game(game) => Some(game),
            _ => None,
        }
    }

    /// Run one frame: apply all queued key presses, then advance the game once
    pub fn frame(
        &mut self,
        inputs: impl IntoIterator<Item = InputEvent>,
        held: FrameInput,
        time: FrameTime,
    ) -> Vec<GameEvent> {
        let mut events = Vec::new();
        for input in inputs {
            events.extend(self.handle_input(input, time.now_ms));
        }

        if let Screen::Game(game) = &mut self.screen {
            let frame_events = sim::advance(&mut game.run, &mut game.signal, &held, time, &mut self.rng);
            let completed = frame_events.contains(&GameEvent::RunCompleted);
            events.extend(frame_events);
            if completed {
                self.transition(Screen::Ending);
            }
        }

        for event in &events {
            self.effects.apply(event);
        }
        let run = match &self.screen {
            Screen::Game(game) => Some(&game.run),
            _ => None,
        };
        self.effects.tick(run);
        if matches!(self.screen, Screen::Menu) {
            self.effects.tick_title();
        }

        events
    }

    /// Apply one discrete key press. Unrecognized presses are no-ops.
    pub fn handle_input(&mut self, input: InputEvent, now: u64) -> Vec<GameEvent> {
        let mut events = Vec::new();
        match &mut self.screen {
            Screen::Menu => {
                if input == InputEvent::Confirm {
                    self.transition(Screen::Setup);
                } else if input.is_help() {
                    self.transition(Screen::Instructions);
                }
            }
            Screen::Instructions => {
                if input == InputEvent::Cancel {
                    self.transition(Screen::Menu);
                }
            }
            Screen::Setup => match input {
                InputEvent::ToggleField => self.identity.toggle(),
                InputEvent::Backspace => self.identity.backspace(),
                InputEvent::Char(c) => self.identity.push_char(c),
                InputEvent::Confirm => {
                    if self.identity.is_complete() {
                        log::info!(
                            "Run started for {} ({})",
                            self.identity.name.trim(),
                            self.identity.region.trim()
                        );
                        let game = GameScreen::start(1, now, &mut self.rng);
                        self.transition(Screen::Game(game));
                        events.push(GameEvent::RunStarted);
                    }
                }
                InputEvent::Cancel => {}
            },
            Screen::Game(game) => match input {
                InputEvent::Cancel => {
                    log::info!("Run abandoned at level {}", game.run.level);
                    self.transition(Screen::Menu);
                }
                InputEvent::Confirm if game.run.failed() => {
                    log::info!("Restarting from level 1 (failed at level {})", game.run.level);
                    *game = GameScreen::start(1, now, &mut self.rng);
                    events.push(GameEvent::RunRestarted);
                }
                _ => {}
            },
            Screen::Ending => {
                if input == InputEvent::Confirm {
                    self.transition(Screen::Menu);
                }
            }
        }
        events
    }

    fn transition(&mut self, next: Screen) {
        log::info!("Screen {} -> {}", self.screen.name(), next.name());
        self.screen = next;
    }
}
