//! Tick system - orchestrates one simulation step
//!
//! Each tick runs, in order:
//! counters -> guardian movement -> bark -> attack -> hide toggle/timer ->
//! escortee movement -> spawning -> enemy AI -> collisions -> particles ->
//! culling -> camera -> win check.
//!
//! The step is total: it never fails and never blocks.

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::audio::AudioCue;
use crate::core::config::GameConfig;
use crate::core::types::Millis;
use crate::entity::particle::update_particles;
use crate::entity::EnemyKind;
use crate::simulation::ai::update_enemies;
use crate::simulation::combat::{try_attack, try_bark};
use crate::simulation::constants::{WORLD_HEIGHT, WORLD_WIDTH};
use crate::simulation::hiding::{toggle_hiding, update_hide_timer};
use crate::simulation::input::TickInput;
use crate::simulation::movement::{move_escortees, move_guardian};
use crate::simulation::session::{GameStatus, Session};
use crate::simulation::spawning::{cull_enemies, maybe_spawn_enemy};
use crate::spatial::{resolve_entity_collision, resolve_obstacle_collision};
use crate::world::WorldLayout;

/// Moments the guardian comments on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum NarrationTopic {
    SessionStart,
    Bark,
}

/// Events generated during a tick, for audio, narration and the HUD log
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum SimulationEvent {
    SessionStarted,
    /// A sound cue should be played
    Sound(AudioCue),
    /// The narrator may produce a new thought
    NarrationRequested(NarrationTopic),
    EnemySpawned {
        kind: EnemyKind,
    },
    Barked {
        enemies_pushed: usize,
    },
    Attacked {
        enemies_hit: usize,
    },
    EnemyKilled {
        kind: EnemyKind,
        /// Score after the award
        score: u32,
    },
    HidingStarted,
    HidingEnded {
        timed_out: bool,
    },
    EscorteeDied {
        index: usize,
    },
    SessionWon {
        score: u32,
    },
}

/// Advance a playing session by one tick
///
/// Does nothing unless the session is `Playing`. `now` is the wall clock used
/// for action cooldowns and the hide countdown.
pub fn run_simulation_tick<R: Rng>(
    session: &mut Session,
    layout: &WorldLayout,
    config: &GameConfig,
    input: &TickInput,
    now: Millis,
    rng: &mut R,
) -> Vec<SimulationEvent> {
    let mut events = Vec::new();
    if !session.is_playing() {
        return events;
    }

    tick_counters(session);

    move_guardian(
        &mut session.guardian,
        &input.held,
        config,
        &mut session.particles,
        rng,
    );

    if input.held.bark {
        try_bark(session, config, now, rng, &mut events);
    }
    if input.held.attack {
        try_attack(session, config, now, rng, &mut events);
    }

    if input.hide_pressed {
        toggle_hiding(session, layout, config, now, &mut events);
    }
    update_hide_timer(session, config, now, &mut events);

    let guardian_position = session.guardian.body.position;
    move_escortees(&mut session.escortees, guardian_position, layout, config);

    maybe_spawn_enemy(session, config, rng, &mut events);
    update_enemies(session, layout, config, &mut events);

    resolve_collisions(session, layout, config, rng);
    session.guardian.clamp_to_world(WORLD_WIDTH, WORLD_HEIGHT);

    update_particles(&mut session.particles, config.particle_decay);
    cull_enemies(&mut session.enemies, session.guardian.body.position.x);
    session.update_camera();

    check_goal(session, config, &mut events);
    session.update_distance();
    session.tick += 1;

    events
}

/// Count every animation timer down by one
fn tick_counters(session: &mut Session) {
    session.guardian.tick_counters();
    for enemy in session.enemies.iter_mut() {
        enemy.hit_flash = enemy.hit_flash.saturating_sub(1);
    }
}

/// Push everything out of bushes, then separate overlapping bodies
///
/// An escortee sheltering in its own bush is exempt from that bush.
pub fn resolve_collisions<R: Rng>(
    session: &mut Session,
    layout: &WorldLayout,
    config: &GameConfig,
    rng: &mut R,
) {
    let fraction = config.obstacle_collision_fraction;
    for (id, bush) in layout.obstacles_with_ids() {
        resolve_obstacle_collision(&mut session.guardian.body, bush, fraction);
        for escortee in session.escortees.iter_mut() {
            if !escortee.is_sheltered_by(id) {
                resolve_obstacle_collision(&mut escortee.body, bush, fraction);
            }
        }
        for enemy in session.enemies.iter_mut().filter(|e| !e.is_dead) {
            resolve_obstacle_collision(&mut enemy.body, bush, fraction);
        }
    }

    let share = config.guardian_collision_share;
    for enemy in session.enemies.iter_mut().filter(|e| !e.is_dead) {
        resolve_entity_collision(&mut session.guardian.body, &mut enemy.body, share, rng);
        for escortee in session.escortees.iter_mut() {
            resolve_entity_collision(&mut escortee.body, &mut enemy.body, share, rng);
        }
    }
    for i in 0..session.enemies.len() {
        let (head, tail) = session.enemies.split_at_mut(i + 1);
        let a = &mut head[i];
        if a.is_dead {
            continue;
        }
        for b in tail.iter_mut().filter(|e| !e.is_dead) {
            resolve_entity_collision(&mut a.body, &mut b.body, share, rng);
        }
    }
}

/// Reaching the goal wins, unless the family was lost earlier this tick
fn check_goal(session: &mut Session, config: &GameConfig, events: &mut Vec<SimulationEvent>) {
    if session.status != GameStatus::Playing {
        return;
    }
    if session.guardian.body.position.x >= WORLD_WIDTH - config.goal_margin {
        session.status = GameStatus::Won;
        tracing::info!("Session won at tick {} with score {}", session.tick, session.score);
        events.push(SimulationEvent::Sound(AudioCue::Win));
        events.push(SimulationEvent::SessionWon {
            score: session.score,
        });
    }
}
