//! Simulation engine: the single owner of match state
//!
//! Hosts call [`Engine::reset`] to start a match, then [`Engine::tick`] once
//! per frame, draining [`Engine::drain_events`] for sound and UI feedback.

use rand_pcg::Pcg32;

use super::rng::{RandomSource, seeded};
use super::state::{GameEvent, GameState, MatchOutcome, MatchStats};
use super::tick::{TickInput, fire_rocket, tick};
use crate::tuning::Tuning;

/// Owns all mutable match state and the random source driving it
#[derive(Debug, Clone)]
pub struct Engine<R: RandomSource = Pcg32> {
    state: GameState,
    rng: R,
}

impl Engine<Pcg32> {
    /// Engine with a seeded PCG random source
    pub fn with_seed(tuning: Tuning, seed: u64) -> Self {
        Self::new(tuning, seeded(seed))
    }
}

impl<R: RandomSource> Engine<R> {
    /// Spawn a match; its timer starts on the first tick unless reset first
    pub fn new(tuning: Tuning, mut rng: R) -> Self {
        let state = GameState::new(tuning.sanitized(), &mut rng);
        Self { state, rng }
    }

    /// Start or restart the match at `now_ms`
    pub fn reset(&mut self, now_ms: f64) {
        self.state.reset(now_ms, &mut self.rng);
    }

    /// Advance to `now_ms`; returns the outcome after the tick
    pub fn tick(&mut self, now_ms: f64, input: &TickInput) -> MatchOutcome {
        tick(&mut self.state, input, now_ms, &mut self.rng)
    }

    /// Request a rocket outside the tick (e.g. straight from a key handler)
    pub fn fire_rocket(&mut self, now_ms: f64) -> bool {
        fire_rocket(&mut self.state, now_ms)
    }

    /// Read-only view for renderers
    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn tuning(&self) -> &Tuning {
        &self.state.tuning
    }

    pub fn outcome(&self) -> MatchOutcome {
        self.state.outcome
    }

    pub fn stats(&self) -> MatchStats {
        self.state.stats()
    }

    /// Take every event raised since the last drain
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        self.state.take_events()
    }

    /// Mutable access for hosts that script scenarios
    pub fn state_mut(&mut self) -> &mut GameState {
        &mut self.state
    }
}
