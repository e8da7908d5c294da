//! Keyboard sampling: crossterm key events into an `InputState` snapshot
//!
//! Terminals that report key releases give exact held state. Others only
//! send presses and auto-repeats, so a key counts as held for a short window
//! after its last press.

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use crate::core::types::Millis;
use crate::simulation::InputState;

/// How long a key stays held without a repeat, when releases are not reported
pub const HOLD_WINDOW_MS: Millis = 180;

/// A game control bound to one or more keys
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Control {
    Up,
    Down,
    Left,
    Right,
    Attack,
    Bark,
    Hide,
}

impl Control {
    const COUNT: usize = 7;

    fn index(self) -> usize {
        self as usize
    }

    pub fn from_key(code: KeyCode) -> Option<Self> {
        let control = match code {
            KeyCode::Up | KeyCode::Char('w') | KeyCode::Char('W') => Control::Up,
            KeyCode::Down | KeyCode::Char('s') | KeyCode::Char('S') => Control::Down,
            KeyCode::Left | KeyCode::Char('a') | KeyCode::Char('A') => Control::Left,
            KeyCode::Right | KeyCode::Char('d') | KeyCode::Char('D') => Control::Right,
            KeyCode::Char(' ') => Control::Attack,
            KeyCode::Char('e') | KeyCode::Char('E') => Control::Bark,
            KeyCode::Char('f') | KeyCode::Char('F') => Control::Hide,
            _ => return None,
        };
        Some(control)
    }
}

/// Non-game commands handled by the main loop
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Start,
    Quit,
}

#[derive(Debug, Default)]
pub struct KeyboardState {
    /// Time each control was last pressed or repeated
    pressed_at: [Option<Millis>; Control::COUNT],
    /// Set once the terminal has sent a release event
    releases_reported: bool,
}

impl KeyboardState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Apply one key event; returns a command for keys outside the game
    pub fn handle_key(&mut self, key: &KeyEvent, now: Millis) -> Option<Command> {
        if key.kind == KeyEventKind::Release {
            self.releases_reported = true;
            if let Some(control) = Control::from_key(key.code) {
                self.pressed_at[control.index()] = None;
            }
            return None;
        }

        match key.code {
            KeyCode::Enter => return Some(Command::Start),
            KeyCode::Esc | KeyCode::Char('q') | KeyCode::Char('Q') => return Some(Command::Quit),
            KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                return Some(Command::Quit)
            }
            _ => {}
        }

        if let Some(control) = Control::from_key(key.code) {
            self.pressed_at[control.index()] = Some(now);
        }
        None
    }

    pub fn is_held(&self, control: Control, now: Millis) -> bool {
        match self.pressed_at[control.index()] {
            Some(_) if self.releases_reported => true,
            Some(at) => now.saturating_sub(at) < HOLD_WINDOW_MS,
            None => false,
        }
    }

    /// Snapshot of held controls for the next tick
    pub fn snapshot(&self, now: Millis) -> InputState {
        InputState {
            up: self.is_held(Control::Up, now),
            down: self.is_held(Control::Down, now),
            left: self.is_held(Control::Left, now),
            right: self.is_held(Control::Right, now),
            attack: self.is_held(Control::Attack, now),
            bark: self.is_held(Control::Bark, now),
            hide: self.is_held(Control::Hide, now),
        }
    }

    /// Forget every held key, e.g. when focus is lost
    pub fn clear(&mut self) {
        self.pressed_at = [None; Control::COUNT];
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn press(code: KeyCode) -> KeyEvent {
        KeyEvent::new_with_kind(code, KeyModifiers::NONE, KeyEventKind::Press)
    }

    fn release(code: KeyCode) -> KeyEvent {
        KeyEvent::new_with_kind(code, KeyModifiers::NONE, KeyEventKind::Release)
    }

    #[test]
    fn test_wasd_and_arrows_map_to_same_control() {
        assert_eq!(Control::from_key(KeyCode::Char('d')), Some(Control::Right));
        assert_eq!(Control::from_key(KeyCode::Right), Some(Control::Right));
        assert_eq!(Control::from_key(KeyCode::Char(' ')), Some(Control::Attack));
        assert_eq!(Control::from_key(KeyCode::Char('x')), None);
    }

    #[test]
    fn test_hold_window_without_releases() {
        let mut keyboard = KeyboardState::new();
        keyboard.handle_key(&press(KeyCode::Right), 1000);
        assert!(keyboard.snapshot(1000).right);
        assert!(keyboard.snapshot(1000 + HOLD_WINDOW_MS - 1).right);
        assert!(!keyboard.snapshot(1000 + HOLD_WINDOW_MS).right);
    }

    #[test]
    fn test_release_events_give_exact_state() {
        let mut keyboard = KeyboardState::new();
        keyboard.handle_key(&press(KeyCode::Char('e')), 0);
        keyboard.handle_key(&release(KeyCode::Char('x')), 0);
        assert!(keyboard.snapshot(10_000).bark);

        keyboard.handle_key(&release(KeyCode::Char('e')), 10_000);
        assert!(!keyboard.snapshot(10_000).bark);
    }

    #[test]
    fn test_commands() {
        let mut keyboard = KeyboardState::new();
        assert_eq!(keyboard.handle_key(&press(KeyCode::Enter), 0), Some(Command::Start));
        assert_eq!(keyboard.handle_key(&press(KeyCode::Esc), 0), Some(Command::Quit));
        assert_eq!(
            keyboard.handle_key(
                &KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL),
                0
            ),
            Some(Command::Quit)
        );
        assert_eq!(keyboard.handle_key(&press(KeyCode::Char('f')), 0), None);
        assert!(keyboard.snapshot(0).hide);
    }
}
