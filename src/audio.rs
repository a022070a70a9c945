//! Sound effect dispatch
//!
//! The simulation only names effects; a backend sink decides playback.
//! Playback is fire-and-forget: sink failures are logged and dropped, never
//! fed back into the game.

use thiserror::Error;

use crate::settings::Settings;
use crate::sim::{GameEvent, MatchOutcome};

/// Sound effect types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SoundEffect {
    /// Player rocket launched
    RocketFired,
    /// Rocket struck a target or a shield
    Explosion,
    /// First hit of the match
    HitMilestone1,
    /// Tenth hit
    HitMilestone10,
    /// Fifteenth hit and every one after
    HitMilestone15,
    /// Drone took damage
    DroneHit,
    /// Match won
    Win,
    /// Match lost
    Lose,
    /// A defender fired
    DefenseFired,
}

impl SoundEffect {
    pub const ALL: [SoundEffect; 9] = [
        SoundEffect::RocketFired,
        SoundEffect::Explosion,
        SoundEffect::HitMilestone1,
        SoundEffect::HitMilestone10,
        SoundEffect::HitMilestone15,
        SoundEffect::DroneHit,
        SoundEffect::Win,
        SoundEffect::Lose,
        SoundEffect::DefenseFired,
    ];

    /// Trigger name handed to sinks
    pub fn name(&self) -> &'static str {
        match self {
            SoundEffect::RocketFired => "rocket_fired",
            SoundEffect::Explosion => "explosion",
            SoundEffect::HitMilestone1 => "hit_milestone_1",
            SoundEffect::HitMilestone10 => "hit_milestone_10",
            SoundEffect::HitMilestone15 => "hit_milestone_15",
            SoundEffect::DroneHit => "drone_hit",
            SoundEffect::Win => "win",
            SoundEffect::Lose => "lose",
            SoundEffect::DefenseFired => "defense_fired",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|e| e.name() == name)
    }

    /// Conventional asset path for file-backed sinks
    pub fn asset_path(&self) -> &'static str {
        match self {
            SoundEffect::RocketFired => "sounds/rocket.mp3",
            SoundEffect::Explosion => "sounds/explosion.mp3",
            SoundEffect::HitMilestone1 => "sounds/hit1.mp3",
            SoundEffect::HitMilestone10 => "sounds/hit10.mp3",
            SoundEffect::HitMilestone15 => "sounds/hit15.mp3",
            SoundEffect::DroneHit => "sounds/drone_hit.mp3",
            SoundEffect::Win => "sounds/win.mp3",
            SoundEffect::Lose => "sounds/lose.mp3",
            SoundEffect::DefenseFired => "sounds/defense_fire.mp3",
        }
    }

    /// Sound for a simulation event, if it has one
    pub fn for_event(event: &GameEvent) -> Option<Self> {
        match event {
            GameEvent::RocketFired { .. } => Some(SoundEffect::RocketFired),
            GameEvent::RocketBlocked { .. } | GameEvent::TargetHit { .. } => {
                Some(SoundEffect::Explosion)
            }
            GameEvent::HitMilestone { milestone: 1 } => Some(SoundEffect::HitMilestone1),
            GameEvent::HitMilestone { milestone: 10 } => Some(SoundEffect::HitMilestone10),
            GameEvent::HitMilestone { .. } => Some(SoundEffect::HitMilestone15),
            GameEvent::DefenseFired { .. } => Some(SoundEffect::DefenseFired),
            GameEvent::DroneHit { .. } => Some(SoundEffect::DroneHit),
            GameEvent::MatchEnded { outcome } => match outcome {
                MatchOutcome::Won => Some(SoundEffect::Win),
                MatchOutcome::LostDestroyed | MatchOutcome::LostTimeout => Some(SoundEffect::Lose),
                MatchOutcome::Ongoing => None,
            },
        }
    }
}

/// Why a sink could not play an effect
#[derive(Debug, Error)]
pub enum AudioError {
    #[error("audio device busy")]
    Busy,
    #[error("no sound loaded for '{0}'")]
    Missing(&'static str),
    #[error("audio backend error: {0}")]
    Backend(String),
}

/// Playback backend
pub trait AudioSink {
    /// Start `effect` from the beginning at `volume` (0.0 - 1.0)
    fn play(&mut self, effect: SoundEffect, volume: f32) -> Result<(), AudioError>;
}

/// Discards everything
#[derive(Debug, Default)]
pub struct NullSink;

impl AudioSink for NullSink {
    fn play(&mut self, _effect: SoundEffect, _volume: f32) -> Result<(), AudioError> {
        Ok(())
    }
}

/// Logs each trigger; useful headless
#[derive(Debug, Default)]
pub struct LogSink;

impl AudioSink for LogSink {
    fn play(&mut self, effect: SoundEffect, volume: f32) -> Result<(), AudioError> {
        log::info!("♪ {} (vol {:.2})", effect.name(), volume);
        Ok(())
    }
}

/// Audio manager for the game
pub struct AudioManager {
    sink: Box<dyn AudioSink>,
    master_volume: f32,
    sfx_volume: f32,
    muted: bool,
}

impl Default for AudioManager {
    fn default() -> Self {
        Self::new(Box::new(NullSink))
    }
}

impl AudioManager {
    pub fn new(sink: Box<dyn AudioSink>) -> Self {
        Self {
            sink,
            master_volume: 0.8,
            sfx_volume: 1.0,
            muted: false,
        }
    }

    pub fn from_settings(sink: Box<dyn AudioSink>, settings: &Settings) -> Self {
        let mut manager = Self::new(sink);
        manager.apply_settings(settings);
        manager
    }

    pub fn apply_settings(&mut self, settings: &Settings) {
        self.set_master_volume(settings.master_volume);
        self.set_sfx_volume(settings.sfx_volume);
        self.set_muted(settings.muted);
    }

    /// Set master volume (0.0 - 1.0)
    pub fn set_master_volume(&mut self, vol: f32) {
        self.master_volume = vol.clamp(0.0, 1.0);
    }

    /// Set SFX volume (0.0 - 1.0)
    pub fn set_sfx_volume(&mut self, vol: f32) {
        self.sfx_volume = vol.clamp(0.0, 1.0);
    }

    /// Mute/unmute all audio
    pub fn set_muted(&mut self, muted: bool) {
        self.muted = muted;
    }

    fn effective_volume(&self) -> f32 {
        if self.muted {
            0.0
        } else {
            self.master_volume * self.sfx_volume
        }
    }

    /// Play a sound effect; failures are swallowed
    pub fn play(&mut self, effect: SoundEffect) {
        let vol = self.effective_volume();
        if vol <= 0.0 {
            return;
        }
        if let Err(e) = self.sink.play(effect, vol) {
            log::debug!("Dropped sound '{}': {}", effect.name(), e);
        }
    }

    /// Play the sounds for a batch of simulation events, in order
    pub fn dispatch(&mut self, events: &[GameEvent]) {
        for effect in events.iter().filter_map(SoundEffect::for_event) {
            self.play(effect);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    /// Records triggers, optionally failing every other call
    struct Recorder {
        played: Rc<RefCell<Vec<&'static str>>>,
        flaky: bool,
        calls: usize,
    }

    impl AudioSink for Recorder {
        fn play(&mut self, effect: SoundEffect, _volume: f32) -> Result<(), AudioError> {
            self.calls += 1;
            if self.flaky && self.calls % 2 == 0 {
                return Err(AudioError::Busy);
            }
            self.played.borrow_mut().push(effect.name());
            Ok(())
        }
    }

    fn recorder(flaky: bool) -> (AudioManager, Rc<RefCell<Vec<&'static str>>>) {
        let played = Rc::new(RefCell::new(Vec::new()));
        let sink = Recorder {
            played: Rc::clone(&played),
            flaky,
            calls: 0,
        };
        (AudioManager::new(Box::new(sink)), played)
    }

    #[test]
    fn test_event_names() {
        let events = [
            GameEvent::RocketFired { rocket: 1 },
            GameEvent::TargetHit {
                target: 2,
                destroyed: false,
            },
            GameEvent::HitMilestone { milestone: 1 },
            GameEvent::RocketBlocked { rocket: 3 },
            GameEvent::HitMilestone { milestone: 15 },
            GameEvent::DefenseFired { shooter: 4 },
            GameEvent::DroneHit { hp: 2 },
            GameEvent::MatchEnded {
                outcome: MatchOutcome::LostTimeout,
            },
        ];
        let (mut audio, played) = recorder(false);
        audio.dispatch(&events);
        assert_eq!(
            *played.borrow(),
            vec![
                "rocket_fired",
                "explosion",
                "hit_milestone_1",
                "explosion",
                "hit_milestone_15",
                "defense_fired",
                "drone_hit",
                "lose"
            ]
        );
    }

    #[test]
    fn test_sink_failures_are_swallowed() {
        let (mut audio, played) = recorder(true);
        for _ in 0..4 {
            audio.play(SoundEffect::Explosion);
        }
        assert_eq!(played.borrow().len(), 2);
    }

    #[test]
    fn test_muted_plays_nothing() {
        let (mut audio, played) = recorder(false);
        audio.set_muted(true);
        audio.play(SoundEffect::Win);
        assert!(played.borrow().is_empty());
    }

    #[test]
    fn test_name_roundtrip() {
        for effect in SoundEffect::ALL {
            assert_eq!(SoundEffect::from_name(effect.name()), Some(effect));
        }
        assert_eq!(SoundEffect::from_name("kazoo"), None);
        assert_eq!(SoundEffect::HitMilestone10.asset_path(), "sounds/hit10.mp3");
    }
}
