//! UI module - keyboard input and HUD state for the terminal front end

pub mod input;
pub mod state;

pub use input::{Command, Control, KeyboardState};
pub use state::{EventLog, LogCategory, LogEntry};
