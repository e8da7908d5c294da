//! HUD state: a short log of what happened recently

use std::collections::VecDeque;

use crate::simulation::SimulationEvent;

/// Maximum log entries to keep
const MAX_LOG_ENTRIES: usize = 50;

/// Rolling event log shown under the playfield
#[derive(Debug, Default)]
pub struct EventLog {
    entries: VecDeque<LogEntry>,
}

/// An entry in the event log
#[derive(Debug, Clone)]
pub struct LogEntry {
    pub tick: u64,
    pub message: String,
    pub category: LogCategory,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogCategory {
    Combat,
    Stealth,
    System,
}

impl EventLog {
    pub fn new() -> Self {
        Self {
            entries: VecDeque::with_capacity(MAX_LOG_ENTRIES),
        }
    }

    /// Add an entry to the log
    pub fn log(&mut self, tick: u64, message: String, category: LogCategory) {
        if self.entries.len() >= MAX_LOG_ENTRIES {
            self.entries.pop_front();
        }
        self.entries.push_back(LogEntry {
            tick,
            message,
            category,
        });
    }

    /// Turn the events of one tick into log lines; sound and narration
    /// requests are not logged
    pub fn record(&mut self, tick: u64, events: &[SimulationEvent]) {
        for event in events {
            let (message, category) = match event {
                SimulationEvent::SessionStarted => {
                    self.entries.clear();
                    ("The journey begins".to_string(), LogCategory::System)
                }
                SimulationEvent::EnemySpawned { kind } => {
                    (format!("A {:?} appears ahead", kind), LogCategory::Combat)
                }
                SimulationEvent::Barked { enemies_pushed } if *enemies_pushed > 0 => (
                    format!("Bark drove back {} enemies", enemies_pushed),
                    LogCategory::Combat,
                ),
                SimulationEvent::EnemyKilled { kind, score } => (
                    format!("{:?} defeated, score {}", kind, score),
                    LogCategory::Combat,
                ),
                SimulationEvent::HidingStarted => {
                    ("The family hides in the bushes".to_string(), LogCategory::Stealth)
                }
                SimulationEvent::HidingEnded { timed_out } => (
                    if *timed_out {
                        "The family comes out of hiding".to_string()
                    } else {
                        "The family follows again".to_string()
                    },
                    LogCategory::Stealth,
                ),
                SimulationEvent::EscorteeDied { index } => (
                    format!("Family member {} has fallen", index + 1),
                    LogCategory::System,
                ),
                SimulationEvent::SessionWon { score } => {
                    (format!("Home safe! Final score {}", score), LogCategory::System)
                }
                _ => continue,
            };
            self.log(tick, message, category);
        }
    }

    /// Most recent entries first
    pub fn recent(&self, count: usize) -> impl Iterator<Item = &LogEntry> {
        self.entries.iter().rev().take(count)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::audio::AudioCue;
    use crate::entity::EnemyKind;

    #[test]
    fn test_log_is_bounded() {
        let mut log = EventLog::new();
        for i in 0..(MAX_LOG_ENTRIES as u64 + 10) {
            log.log(i, format!("entry {}", i), LogCategory::System);
        }
        assert_eq!(log.len(), MAX_LOG_ENTRIES);
        assert_eq!(log.recent(1).next().map(|e| e.tick), Some(MAX_LOG_ENTRIES as u64 + 9));
    }

    #[test]
    fn test_record_skips_sounds_and_empty_barks() {
        let mut log = EventLog::new();
        log.record(
            3,
            &[
                SimulationEvent::Sound(AudioCue::Bark),
                SimulationEvent::Barked { enemies_pushed: 0 },
                SimulationEvent::EnemyKilled {
                    kind: EnemyKind::Wolf,
                    score: 250,
                },
            ],
        );
        assert_eq!(log.len(), 1);
        let entry = log.recent(1).next().unwrap();
        assert_eq!(entry.category, LogCategory::Combat);
        assert!(entry.message.contains("Wolf"));
    }

    #[test]
    fn test_session_start_clears_log() {
        let mut log = EventLog::new();
        log.log(0, "old".into(), LogCategory::Combat);
        log.record(0, &[SimulationEvent::SessionStarted]);
        assert_eq!(log.len(), 1);
    }
}
