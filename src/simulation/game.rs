//! Game driver: owns the world layout, the current session and the RNG
//!
//! The layout is built once in [`Game::new`]; [`Game::start`] replaces the
//! session wholesale on every (re)start.

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use crate::audio::AudioCue;
use crate::core::config::GameConfig;
use crate::core::types::Millis;
use crate::simulation::input::{InputState, InputTracker};
use crate::simulation::session::{GameStatus, Session};
use crate::simulation::tick::{run_simulation_tick, NarrationTopic, SimulationEvent};
use crate::world::WorldLayout;

pub struct Game<R: Rng = ChaCha8Rng> {
    config: GameConfig,
    layout: WorldLayout,
    session: Session,
    input: InputTracker,
    rng: R,
}

impl Game<ChaCha8Rng> {
    /// Generate the layout and seed the session RNG from one seed
    pub fn new(config: GameConfig, seed: u64) -> Self {
        let mut layout_rng = ChaCha8Rng::seed_from_u64(seed);
        let layout = WorldLayout::generate(&config, &mut layout_rng);
        let rng = ChaCha8Rng::seed_from_u64(seed.wrapping_add(1));
        Self::with_layout(config, layout, rng)
    }
}

impl<R: Rng> Game<R> {
    pub fn with_layout(config: GameConfig, layout: WorldLayout, rng: R) -> Self {
        Self {
            config,
            layout,
            session: Session::new(),
            input: InputTracker::new(),
            rng,
        }
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn layout(&self) -> &WorldLayout {
        &self.layout
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn status(&self) -> GameStatus {
        self.session.status
    }

    /// Begin a fresh session from Start, Won or Lost
    ///
    /// Ignored while a session is already playing.
    pub fn start(&mut self) -> Vec<SimulationEvent> {
        if self.session.is_playing() {
            return Vec::new();
        }
        self.session = Session::begin();
        self.session.update_camera();
        self.input.reset();
        tracing::info!("Session started");
        vec![
            SimulationEvent::SessionStarted,
            SimulationEvent::Sound(AudioCue::SessionStart),
            SimulationEvent::NarrationRequested(NarrationTopic::SessionStart),
        ]
    }

    /// Sample input and advance one tick if playing
    pub fn update(&mut self, raw: InputState, now: Millis) -> Vec<SimulationEvent> {
        let input = self.input.sample(raw);
        run_simulation_tick(
            &mut self.session,
            &self.layout,
            &self.config,
            &input,
            now,
            &mut self.rng,
        )
    }
}
