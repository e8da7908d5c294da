//! The simulation step and session lifecycle

pub mod ai;
pub mod combat;
pub mod constants;
pub mod game;
pub mod hiding;
pub mod input;
pub mod movement;
pub mod session;
pub mod spawning;
pub mod tick;

pub use game::Game;
pub use input::{InputState, InputTracker, TickInput};
pub use session::{GameStatus, HideTimer, Session};
pub use tick::{run_simulation_tick, NarrationTopic, SimulationEvent};
