//! Sound events and audio sinks
//!
//! The simulation only queues [`Sound`] events; a sink decides what to do
//! with them. Mixing and device output belong to the platform layer.

use serde::{Deserialize, Serialize};

/// Sound effect types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Sound {
    /// Ship fired
    Bullet,
    /// Asteroid destroyed, keyed by its size before the split
    AsteroidHit(u8),
    /// Thruster loop starts
    ThrustStart,
    /// Thruster loop stops
    ThrustStop,
    /// Ship destroyed
    Explode,
    /// Last life lost
    GameOver,
    /// Score crossed a 10000-point boundary
    ExtraLife,
}

impl Sound {
    /// Sample file a mixer would load for this sound
    pub fn asset(&self) -> &'static str {
        match self {
            Sound::Bullet => "sounds/bullet.wav",
            Sound::AsteroidHit(0 | 1) => "sounds/ast1.wav",
            Sound::AsteroidHit(2) => "sounds/ast2.wav",
            Sound::AsteroidHit(3) => "sounds/ast3.wav",
            Sound::AsteroidHit(_) => "sounds/ast4.wav",
            Sound::ThrustStart | Sound::ThrustStop => "sounds/thrust.wav",
            Sound::Explode => "sounds/explode.wav",
            Sound::GameOver => "sounds/gameover.wav",
            Sound::ExtraLife => "sounds/extralife.wav",
        }
    }

    /// Whether this event controls the looping thrust channel rather than
    /// firing a one-shot sample
    pub fn is_thrust_loop(&self) -> bool {
        matches!(self, Sound::ThrustStart | Sound::ThrustStop)
    }
}

/// Fire-and-forget sound output
pub trait AudioSink {
    fn play(&mut self, sound: Sound);

    fn play_all(&mut self, sounds: &[Sound]) {
        for &sound in sounds {
            self.play(sound);
        }
    }
}

/// Sink that logs every sound; stands in for a mixer in headless runs
#[derive(Debug, Default)]
pub struct LogAudio {
    muted: bool,
    played: u64,
    thrusting: bool,
}

impl LogAudio {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_muted(&mut self, muted: bool) {
        self.muted = muted;
        if muted {
            self.thrusting = false;
        }
    }

    pub fn is_muted(&self) -> bool {
        self.muted
    }

    /// One-shot sounds played so far
    pub fn played(&self) -> u64 {
        self.played
    }

    /// Whether the thrust loop is running
    pub fn thrusting(&self) -> bool {
        self.thrusting
    }
}

impl AudioSink for LogAudio {
    fn play(&mut self, sound: Sound) {
        if self.muted {
            return;
        }

        match sound {
            Sound::ThrustStart => self.thrusting = true,
            Sound::ThrustStop => self.thrusting = false,
            _ => self.played += 1,
        }
        log::debug!("Sound {:?} ({})", sound, sound.asset());
    }
}

/// Sink for `--nosound`: drops everything
#[derive(Debug, Default, Clone, Copy)]
pub struct MutedAudio;

impl AudioSink for MutedAudio {
    fn play(&mut self, _sound: Sound) {}
}
