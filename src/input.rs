//! Keyboard handling.
//!
//! `KeyboardControl` tracks which keys are currently held. `handle_key_event`
//! is the dispatcher the main loop feeds crossterm events into.

use crate::core::controller::GameController;
use crate::surface::RenderSurface;
use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use std::collections::HashMap;

/// Held-key state keyed by key name ("Left", "Right", "a", ...).
#[derive(Debug, Clone, Default)]
pub struct KeyboardControl {
    events: HashMap<String, bool>,
    /// Set when the terminal never reports key releases. A key then counts as
    /// released this long after its last press or auto-repeat.
    release_after_ms: Option<u64>,
    last_press_ms: HashMap<String, u64>,
}

impl KeyboardControl {
    pub fn new() -> Self {
        Self::default()
    }

    /// Tracker for terminals that only report presses.
    pub fn with_release_timeout(release_after_ms: u64) -> Self {
        Self {
            release_after_ms: Some(release_after_ms),
            ..Self::default()
        }
    }

    pub fn get(&self, key: &str) -> bool {
        self.events.get(key).copied().unwrap_or(false)
    }

    pub fn press(&mut self, key: &str, now_ms: u64) {
        if self.release_after_ms.is_some() {
            // Terminals only auto-repeat the most recent key, so it replaces the rest
            self.events.values_mut().for_each(|held| *held = false);
            self.last_press_ms.insert(key.to_string(), now_ms);
        }
        self.events.insert(key.to_string(), true);
    }

    pub fn release(&mut self, key: &str) {
        self.events.insert(key.to_string(), false);
        self.last_press_ms.remove(key);
    }

    /// Release keys whose synthetic hold has run out. No-op when the terminal
    /// reports releases itself.
    pub fn expire(&mut self, now_ms: u64) {
        let Some(timeout) = self.release_after_ms else {
            return;
        };
        let expired: Vec<String> = self
            .last_press_ms
            .iter()
            .filter(|&(_, &pressed)| now_ms.saturating_sub(pressed) >= timeout)
            .map(|(key, _)| key.clone())
            .collect();
        for key in expired {
            self.release(&key);
        }
    }

    /// Forget all key state.
    pub fn clear(&mut self) {
        self.events.clear();
        self.last_press_ms.clear();
    }
}

/// Key name for a crossterm key code, using the names the game consults.
pub fn key_name(code: KeyCode) -> Option<String> {
    match code {
        KeyCode::Left => Some("Left".to_string()),
        KeyCode::Right => Some("Right".to_string()),
        KeyCode::Up => Some("Up".to_string()),
        KeyCode::Down => Some("Down".to_string()),
        KeyCode::Enter => Some("Return".to_string()),
        KeyCode::Esc => Some("Escape".to_string()),
        KeyCode::Char(' ') => Some("space".to_string()),
        KeyCode::Char(c) => Some(c.to_string()),
        _ => None,
    }
}

/// Buttons on the game-over banner.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GameOverButton {
    #[default]
    Retry,
    Quit,
}

/// Selection state of the game-over banner.
#[derive(Debug, Clone, Copy, Default)]
pub struct GameOverMenu {
    pub selected: GameOverButton,
}

impl GameOverMenu {
    pub fn toggle(&mut self) {
        self.selected = match self.selected {
            GameOverButton::Retry => GameOverButton::Quit,
            GameOverButton::Quit => GameOverButton::Retry,
        };
    }

    pub fn reset(&mut self) {
        self.selected = GameOverButton::Retry;
    }
}

/// Result of handling a key event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputResult {
    Continue,
    Quit,
}

/// Route one key event to the controller.
pub fn handle_key_event<S: RenderSurface>(
    key: KeyEvent,
    controller: &mut GameController<S>,
    menu: &mut GameOverMenu,
) -> InputResult {
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        controller.quit();
        return InputResult::Quit;
    }

    if key.kind == KeyEventKind::Release {
        if let Some(name) = key_name(key.code) {
            controller.key_released(&name);
        }
        return InputResult::Continue;
    }

    if controller.model.game_over {
        return handle_game_over(key, controller, menu);
    }

    match key.code {
        KeyCode::Esc | KeyCode::Char('q') | KeyCode::Char('Q') => {
            controller.quit();
            InputResult::Quit
        }
        code => {
            if let Some(name) = key_name(code) {
                controller.key_pressed(&name);
            }
            InputResult::Continue
        }
    }
}

fn handle_game_over<S: RenderSurface>(
    key: KeyEvent,
    controller: &mut GameController<S>,
    menu: &mut GameOverMenu,
) -> InputResult {
    // Auto-repeat from the arrow still held when the game ended is ignored
    if key.kind == KeyEventKind::Repeat {
        return InputResult::Continue;
    }
    match key.code {
        KeyCode::Left | KeyCode::Right | KeyCode::Tab => {
            menu.toggle();
            InputResult::Continue
        }
        KeyCode::Enter | KeyCode::Char(' ') => match menu.selected {
            GameOverButton::Retry => {
                menu.reset();
                controller.restart();
                InputResult::Continue
            }
            GameOverButton::Quit => {
                controller.quit();
                InputResult::Quit
            }
        },
        KeyCode::Char('r') | KeyCode::Char('R') => {
            menu.reset();
            controller.restart();
            InputResult::Continue
        }
        KeyCode::Esc | KeyCode::Char('q') | KeyCode::Char('Q') => {
            controller.quit();
            InputResult::Quit
        }
        _ => InputResult::Continue,
    }
}
