//! Hide/reveal: the family ducks into the nearest bushes for a while

use crate::audio::AudioCue;
use crate::core::config::GameConfig;
use crate::core::types::Millis;
use crate::simulation::session::Session;
use crate::simulation::tick::SimulationEvent;
use crate::world::WorldLayout;

/// Flip between hiding and following
pub fn toggle_hiding(
    session: &mut Session,
    layout: &WorldLayout,
    config: &GameConfig,
    now: Millis,
    events: &mut Vec<SimulationEvent>,
) {
    if session.hide.is_active() {
        events.push(SimulationEvent::Sound(AudioCue::HideOff));
        end_hiding(session, false, events);
    } else {
        events.push(SimulationEvent::Sound(AudioCue::HideOn));
        start_hiding(session, layout, config, now, events);
    }
}

fn start_hiding(
    session: &mut Session,
    layout: &WorldLayout,
    config: &GameConfig,
    now: Millis,
    events: &mut Vec<SimulationEvent>,
) {
    session.hide.start(now, config.hide_duration_secs);
    for escortee in session.escortees.iter_mut() {
        let shelter = layout.nearest_obstacle(escortee.body.position);
        escortee.hide_behind(shelter);
    }
    tracing::debug!("Family hiding at tick {}", session.tick);
    events.push(SimulationEvent::HidingStarted);
}

fn end_hiding(session: &mut Session, timed_out: bool, events: &mut Vec<SimulationEvent>) {
    session.hide.stop();
    for escortee in session.escortees.iter_mut() {
        escortee.reveal();
    }
    tracing::debug!("Family revealed at tick {} (timed out: {})", session.tick, timed_out);
    events.push(SimulationEvent::HidingEnded { timed_out });
}

/// Refresh the countdown and end hiding once the full duration has passed
pub fn update_hide_timer(
    session: &mut Session,
    config: &GameConfig,
    now: Millis,
    events: &mut Vec<SimulationEvent>,
) {
    let Some(elapsed) = session.hide.elapsed_secs(now) else {
        return;
    };
    session.hide.time_left_secs = (config.hide_duration_secs - elapsed).max(0.0);
    if elapsed >= config.hide_duration_secs {
        end_hiding(session, true, events);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::types::{ObstacleId, Position};
    use crate::world::Obstacle;

    fn layout() -> WorldLayout {
        let bush = |x: f32, y: f32| Obstacle {
            position: Position::new(x, y),
            radius: 50.0,
            rotation: 0.0,
            leaves: Vec::new(),
        };
        WorldLayout::from_obstacles(vec![bush(100.0, 300.0), bush(100.0, 500.0)])
    }

    #[test]
    fn test_toggle_assigns_nearest_bush_each() {
        let mut session = Session::begin();
        let mut events = Vec::new();
        toggle_hiding(&mut session, &layout(), &GameConfig::default(), 0, &mut events);

        assert!(session.hide.is_active());
        assert_eq!(session.hide.time_left_secs, 10.0);
        assert!(session.escortees.iter().all(|e| e.is_hiding));
        assert_eq!(session.escortees[0].target_obstacle, Some(ObstacleId(0)));
        assert_eq!(session.escortees[1].target_obstacle, Some(ObstacleId(1)));
        assert_eq!(events[0], SimulationEvent::Sound(AudioCue::HideOn));
    }

    #[test]
    fn test_second_toggle_reveals() {
        let mut session = Session::begin();
        let mut events = Vec::new();
        let config = GameConfig::default();
        toggle_hiding(&mut session, &layout(), &config, 0, &mut events);
        toggle_hiding(&mut session, &layout(), &config, 2_000, &mut events);

        assert!(!session.hide.is_active());
        assert_eq!(session.hide.time_left_secs, 0.0);
        assert!(session.escortees.iter().all(|e| !e.is_hiding && e.target_obstacle.is_none()));
        assert!(events.contains(&SimulationEvent::HidingEnded { timed_out: false }));
    }

    #[test]
    fn test_timer_counts_down_then_expires() {
        let mut session = Session::begin();
        let mut events = Vec::new();
        let config = GameConfig::default();
        toggle_hiding(&mut session, &layout(), &config, 1_000, &mut events);

        update_hide_timer(&mut session, &config, 4_500, &mut events);
        assert!((session.hide.time_left_secs - 6.5).abs() < 1e-4);
        assert!(session.hide.is_active());

        update_hide_timer(&mut session, &config, 10_999, &mut events);
        assert!(session.hide.is_active());

        update_hide_timer(&mut session, &config, 11_000, &mut events);
        assert!(!session.hide.is_active());
        assert!(session.escortees.iter().all(|e| !e.is_hiding));
        assert!(events.contains(&SimulationEvent::HidingEnded { timed_out: true }));
    }

    #[test]
    fn test_assignment_stays_fixed_while_hiding() {
        let mut session = Session::begin();
        let mut events = Vec::new();
        let config = GameConfig::default();
        toggle_hiding(&mut session, &layout(), &config, 0, &mut events);
        session.escortees[0].body.position = Position::new(100.0, 520.0);
        update_hide_timer(&mut session, &config, 500, &mut events);
        assert_eq!(session.escortees[0].target_obstacle, Some(ObstacleId(0)));
    }
}
