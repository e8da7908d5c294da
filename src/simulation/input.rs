//! Per-tick input snapshot and edge detection
//!
//! The front end merges keyboard and touch into one [`InputState`] each
//! frame. [`InputTracker`] compares it with the previous frame so one-shot
//! actions fire on the press edge only.

use std::ops::BitOr;

use serde::{Deserialize, Serialize};

use crate::core::types::Position;

/// Raw held state of every control
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct InputState {
    pub up: bool,
    pub down: bool,
    pub left: bool,
    pub right: bool,
    pub attack: bool,
    pub bark: bool,
    pub hide: bool,
}

impl InputState {
    /// Unnormalized movement intent; y grows downwards
    pub fn direction(&self) -> Position {
        let mut dir = Position::ZERO;
        if self.up {
            dir.y -= 1.0;
        }
        if self.down {
            dir.y += 1.0;
        }
        if self.left {
            dir.x -= 1.0;
        }
        if self.right {
            dir.x += 1.0;
        }
        dir
    }
}

/// Keyboard | touch
impl BitOr for InputState {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self {
        Self {
            up: self.up || rhs.up,
            down: self.down || rhs.down,
            left: self.left || rhs.left,
            right: self.right || rhs.right,
            attack: self.attack || rhs.attack,
            bark: self.bark || rhs.bark,
            hide: self.hide || rhs.hide,
        }
    }
}

/// What the simulation step consumes
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TickInput {
    pub held: InputState,
    /// Hide went from released to pressed since the previous sample
    pub hide_pressed: bool,
}

impl TickInput {
    /// Input with the hide edge set, for scripted runs and tests
    pub fn pressing_hide(held: InputState) -> Self {
        Self {
            held,
            hide_pressed: true,
        }
    }
}

impl From<InputState> for TickInput {
    fn from(held: InputState) -> Self {
        Self {
            held,
            hide_pressed: false,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct InputTracker {
    previous: InputState,
}

impl InputTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn sample(&mut self, current: InputState) -> TickInput {
        let hide_pressed = current.hide && !self.previous.hide;
        self.previous = current;
        TickInput {
            held: current,
            hide_pressed,
        }
    }

    pub fn reset(&mut self) {
        self.previous = InputState::default();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_direction_cancels_opposites() {
        let input = InputState {
            left: true,
            right: true,
            up: true,
            ..Default::default()
        };
        assert_eq!(input.direction(), Position::new(0.0, -1.0));
    }

    #[test]
    fn test_merge_is_or() {
        let keys = InputState {
            left: true,
            ..Default::default()
        };
        let touch = InputState {
            attack: true,
            ..Default::default()
        };
        let merged = keys | touch;
        assert!(merged.left && merged.attack);
        assert!(!merged.right);
    }

    #[test]
    fn test_hide_fires_on_press_edge_only() {
        let mut tracker = InputTracker::new();
        let held = InputState {
            hide: true,
            ..Default::default()
        };
        assert!(tracker.sample(held).hide_pressed);
        assert!(!tracker.sample(held).hide_pressed);
        assert!(!tracker.sample(InputState::default()).hide_pressed);
        assert!(tracker.sample(held).hide_pressed);
    }
}
