//! Thor: The Guardian - Entry Point
//!
//! Sets up logging, the async runtime for narration and the terminal, then
//! drives the game at a fixed 60 Hz. `--headless` runs a scripted session
//! and prints a JSON summary instead.

use std::fs::File;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

use clap::Parser;
use crossterm::event::{
    self, Event, KeyboardEnhancementFlags, PopKeyboardEnhancementFlags,
    PushKeyboardEnhancementFlags,
};
use crossterm::{execute, terminal};
use ratatui::backend::CrosstermBackend;
use ratatui::Terminal;
use serde::Serialize;
use tokio::runtime::Runtime;
use tracing_subscriber::EnvFilter;

use thor_guard::audio::{AudioCue, AudioSink, LogSink};
use thor_guard::core::config::GameConfig;
use thor_guard::core::error::Result;
use thor_guard::core::types::Millis;
use thor_guard::narration::{LlmClient, Narrator, ThoughtGenerator};
use thor_guard::render::{draw_frame, FrameView};
use thor_guard::simulation::{Game, GameStatus, InputState, SimulationEvent};
use thor_guard::ui::{Command, EventLog, KeyboardState};

const FRAME_TIME: Duration = Duration::from_micros(16_667);
const HEADLESS_TICK_MS: f64 = 1000.0 / 60.0;

/// Thor: The Guardian - escort the family home
#[derive(Parser, Debug)]
#[command(name = "thor-guard")]
#[command(about = "Escort the family home through the forest")]
struct Args {
    /// Random seed for deterministic runs
    #[arg(long)]
    seed: Option<u64>,

    /// Game config (TOML); absent keys keep their defaults
    #[arg(long)]
    config: Option<PathBuf>,

    /// Log output file; the terminal belongs to the renderer
    #[arg(long, default_value = "thor-guard.log")]
    log_file: PathBuf,

    /// Run a scripted session without a terminal and print a JSON summary
    #[arg(long)]
    headless: bool,

    /// Maximum ticks in headless mode
    #[arg(long, default_value_t = 3600)]
    ticks: u64,
}

/// JSON output of a headless run
#[derive(Serialize)]
struct HeadlessSummary {
    seed: u64,
    ticks: u64,
    status: GameStatus,
    score: u32,
    distance_covered: u32,
    family_health: u32,
    enemies_killed: usize,
    barks: usize,
    sounds: usize,
    thought: String,
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_tracing(&args.log_file)?;

    let seed = args.seed.unwrap_or_else(rand::random);
    tracing::info!("Thor: The Guardian starting (seed {})", seed);

    let config = load_config(args.config.as_deref())?;

    // Narration runs on the runtime; the game loop itself never awaits
    let rt = Runtime::new()?;
    let generator: Option<Arc<dyn ThoughtGenerator>> = match LlmClient::from_env() {
        Ok(client) => {
            tracing::info!("Narration enabled ({:?} API)", client.api_format());
            Some(Arc::new(client))
        }
        Err(e) => {
            tracing::warn!("{} - guardian thoughts use the fallback line", e);
            None
        }
    };
    let mut narrator = Narrator::new(generator, rt.handle().clone(), config.narration_interval_ms);

    let mut game = Game::new(config, seed);

    if args.headless {
        let summary = run_headless(&mut game, &mut narrator, seed, args.ticks);
        println!("{}", serde_json::to_string_pretty(&summary)?);
        return Ok(());
    }

    run_terminal(&mut game, &mut narrator)?;
    tracing::info!("Thor: The Guardian exiting");
    Ok(())
}

fn init_tracing(path: &Path) -> Result<()> {
    let file = File::create(path)?;
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("thor_guard=info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .init();
    Ok(())
}

fn load_config(path: Option<&Path>) -> Result<GameConfig> {
    match path {
        Some(path) if path.exists() => {
            let config = GameConfig::load(path)?;
            tracing::info!("Loaded config from {}", path.display());
            Ok(config)
        }
        Some(path) => {
            tracing::warn!("Config {} not found - using defaults", path.display());
            Ok(GameConfig::default())
        }
        None => Ok(GameConfig::default()),
    }
}

/// Send one tick's events to audio, narration and the HUD log
fn dispatch(
    events: &[SimulationEvent],
    tick: u64,
    now: Millis,
    narrator: &mut Narrator,
    sink: &mut dyn AudioSink,
    log: &mut EventLog,
) {
    for event in events {
        if let SimulationEvent::Sound(cue) = event {
            sink.play(*cue);
        }
    }
    narrator.handle_events(events, now);
    log.record(tick, events);
}

fn run_terminal(game: &mut Game, narrator: &mut Narrator) -> Result<()> {
    terminal::enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, terminal::EnterAlternateScreen)?;

    // Exact key release tracking where the terminal supports it
    let enhanced = terminal::supports_keyboard_enhancement().unwrap_or(false);
    if enhanced {
        execute!(
            stdout,
            PushKeyboardEnhancementFlags(KeyboardEnhancementFlags::REPORT_EVENT_TYPES)
        )?;
    }

    let mut term = Terminal::new(CrosstermBackend::new(stdout))?;
    term.hide_cursor()?;
    term.clear()?;

    let result = game_loop(&mut term, game, narrator);

    if enhanced {
        execute!(term.backend_mut(), PopKeyboardEnhancementFlags)?;
    }
    execute!(term.backend_mut(), terminal::LeaveAlternateScreen)?;
    term.show_cursor()?;
    terminal::disable_raw_mode()?;
    result
}

fn game_loop(
    term: &mut Terminal<CrosstermBackend<io::Stdout>>,
    game: &mut Game,
    narrator: &mut Narrator,
) -> Result<()> {
    let clock = Instant::now();
    let now_ms = || clock.elapsed().as_millis() as Millis;

    let mut keyboard = KeyboardState::new();
    let mut log = EventLog::new();
    let mut sink = LogSink;
    let mut entities = Vec::new();

    loop {
        let frame_start = Instant::now();

        while event::poll(Duration::ZERO)? {
            match event::read()? {
                Event::Key(key) => match keyboard.handle_key(&key, now_ms()) {
                    Some(Command::Quit) => return Ok(()),
                    Some(Command::Start) => {
                        let events = game.start();
                        dispatch(&events, 0, now_ms(), narrator, &mut sink, &mut log);
                    }
                    None => {}
                },
                Event::FocusLost => keyboard.clear(),
                _ => {}
            }
        }

        let now = now_ms();
        let events = game.update(keyboard.snapshot(now), now);
        dispatch(&events, game.session().tick, now, narrator, &mut sink, &mut log);

        let thought = narrator.current_thought();
        let view = FrameView {
            config: game.config(),
            session: game.session(),
            layout: game.layout(),
            thought: &thought,
        };
        term.draw(|frame| draw_frame(frame, &view, &log, &mut entities))?;

        if let Some(rest) = FRAME_TIME.checked_sub(frame_start.elapsed()) {
            std::thread::sleep(rest);
        }
    }
}

/// Scripted controls: push east, bite often, bark and hide now and then
fn scripted_input(tick: u64) -> InputState {
    InputState {
        right: true,
        up: tick % 240 < 30,
        down: (120..150).contains(&(tick % 240)),
        attack: tick % 20 < 2,
        bark: tick % 90 == 0,
        hide: tick % 900 == 450 || tick % 900 == 600,
        ..Default::default()
    }
}

fn run_headless(
    game: &mut Game,
    narrator: &mut Narrator,
    seed: u64,
    max_ticks: u64,
) -> HeadlessSummary {
    let mut sounds: Vec<AudioCue> = Vec::new();
    let mut log = EventLog::new();
    let mut enemies_killed = 0;
    let mut barks = 0;

    let events = game.start();
    dispatch(&events, 0, 0, narrator, &mut sounds, &mut log);

    let mut ticks = 0;
    while ticks < max_ticks && game.status() == GameStatus::Playing {
        let now = (ticks as f64 * HEADLESS_TICK_MS) as Millis;
        let events = game.update(scripted_input(ticks), now);
        for event in &events {
            match event {
                SimulationEvent::EnemyKilled { .. } => enemies_killed += 1,
                SimulationEvent::Barked { .. } => barks += 1,
                _ => {}
            }
        }
        dispatch(&events, game.session().tick, now, narrator, &mut sounds, &mut log);
        ticks += 1;
    }

    let session = game.session();
    tracing::info!(
        "Headless run finished after {} ticks: {:?}, score {}",
        ticks,
        session.status,
        session.score
    );

    HeadlessSummary {
        seed,
        ticks,
        status: session.status,
        score: session.score,
        distance_covered: session.distance_covered,
        family_health: session.family_health(),
        enemies_killed,
        barks,
        sounds: sounds.len(),
        thought: narrator.current_thought(),
    }
}
