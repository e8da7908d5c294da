//! Audio cue boundary
//!
//! The simulation only names cues. Turning them into sound is the job of an
//! [`AudioSink`] supplied by the front end.

use serde::{Deserialize, Serialize};

/// Oscillator shape of a tone
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Waveform {
    Sine,
    Square,
    Triangle,
    Sawtooth,
}

/// One synthesized blip: pitch falls towards a quarter of `frequency`
/// and volume fades out over `duration_secs`
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Tone {
    pub frequency: f32,
    pub duration_secs: f32,
    pub waveform: Waveform,
    pub volume: f32,
    /// Delay after the cue is requested
    pub delay_ms: u64,
}

impl Tone {
    const fn new(frequency: f32, duration_secs: f32, waveform: Waveform, volume: f32) -> Self {
        Self {
            frequency,
            duration_secs,
            waveform,
            volume,
            delay_ms: 0,
        }
    }

    const fn delayed(self, delay_ms: u64) -> Self {
        Self { delay_ms, ..self }
    }
}

const START_TONES: [Tone; 1] = [Tone::new(440.0, 0.3, Waveform::Sine, 0.15)];
const BARK_TONES: [Tone; 2] = [
    Tone::new(180.0, 0.15, Waveform::Triangle, 0.2),
    Tone::new(140.0, 0.1, Waveform::Triangle, 0.15).delayed(50),
];
const ATTACK_TONES: [Tone; 1] = [Tone::new(200.0, 0.15, Waveform::Square, 0.1)];
const HIDE_ON_TONES: [Tone; 1] = [Tone::new(400.0, 0.2, Waveform::Sine, 0.1)];
const HIDE_OFF_TONES: [Tone; 1] = [Tone::new(250.0, 0.2, Waveform::Sine, 0.1)];
const DEATH_TONES: [Tone; 1] = [Tone::new(100.0, 0.5, Waveform::Sawtooth, 0.2)];
const WIN_TONES: [Tone; 1] = [Tone::new(523.25, 0.5, Waveform::Sine, 0.2)];

/// Named sound cues requested by the simulation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AudioCue {
    SessionStart,
    Bark,
    Attack,
    HideOn,
    HideOff,
    EscorteeDeath,
    Win,
}

impl AudioCue {
    pub fn tones(&self) -> &'static [Tone] {
        match self {
            AudioCue::SessionStart => &START_TONES,
            AudioCue::Bark => &BARK_TONES,
            AudioCue::Attack => &ATTACK_TONES,
            AudioCue::HideOn => &HIDE_ON_TONES,
            AudioCue::HideOff => &HIDE_OFF_TONES,
            AudioCue::EscorteeDeath => &DEATH_TONES,
            AudioCue::Win => &WIN_TONES,
        }
    }
}

/// Something that can play cues
pub trait AudioSink {
    fn play(&mut self, cue: AudioCue);
}

/// Sink that only logs the requested tones
#[derive(Debug, Default)]
pub struct LogSink;

impl AudioSink for LogSink {
    fn play(&mut self, cue: AudioCue) {
        for tone in cue.tones() {
            tracing::trace!(
                "cue {:?}: {:.0} Hz {:?} for {:.2}s at {:.2} (+{}ms)",
                cue,
                tone.frequency,
                tone.waveform,
                tone.duration_secs,
                tone.volume,
                tone.delay_ms
            );
        }
    }
}

/// Collects cues in order; handy for headless runs
impl AudioSink for Vec<AudioCue> {
    fn play(&mut self, cue: AudioCue) {
        self.push(cue);
    }
}
