//! Scripted player for headless demo runs
//!
//! Walks through the menus, then holds movement only when the signal is
//! SAFE and will not flip before the upcoming frame.

use crate::clock::FrameTime;
use crate::screen::{InputEvent, Screen, Session};
use crate::sim::{FrameInput, IntervalSource};

#[derive(Debug, Clone)]
pub struct Autopilot {
    name: String,
    region: String,
}

impl Autopilot {
    pub fn new(name: &str, region: &str) -> Self {
        Self {
            name: name.to_string(),
            region: region.to_string(),
        }
    }

    /// Key presses and held state for the frame about to run at `upcoming`
    pub fn plan<R: IntervalSource>(
        &mut self,
        session: &Session<R>,
        upcoming: FrameTime,
    ) -> (Vec<InputEvent>, FrameInput) {
        let mut inputs = Vec::new();
        let mut held = FrameInput::default();

        match session.screen() {
            Screen::Menu => inputs.push(InputEvent::Confirm),
            Screen::Instructions => inputs.push(InputEvent::Cancel),
            Screen::Setup => {
                let identity = session.identity();
                if identity.is_complete() {
                    inputs.push(InputEvent::Confirm);
                } else if identity.active_text().trim().is_empty() {
                    let text = match identity.active {
                        crate::IdentityField::Name => &self.name,
                        crate::IdentityField::Region => &self.region,
                    };
                    inputs.push(InputEvent::Backspace);
                    inputs.extend(text.chars().map(InputEvent::Char));
                } else {
                    inputs.push(InputEvent::ToggleField);
                }
            }
            Screen::Game(game) => {
                if game.run.failed() {
                    inputs.push(InputEvent::Confirm);
                } else {
                    held.moving = !game.run.is_terminal()
                        && game.signal.is_safe()
                        && upcoming.now_ms < game.signal.next_flip_at;
                }
            }
            Screen::Ending => {}
        }

        (inputs, held)
    }
}
