//! Platform abstraction layer
//!
//! Handles host differences for:
//! - Time/ticks
//! - Input events
//! - Sound and image readiness
//!
//! [`Host`] glues these to the [`Engine`]: one call to [`Host::frame`] per
//! display frame.

pub mod input;
pub mod time;

pub use input::{InputState, Key};
#[cfg(not(target_arch = "wasm32"))]
pub use time::SystemClock;
pub use time::{Clock, ManualClock};

use rand_pcg::Pcg32;

use crate::audio::{AudioManager, AudioSink};
use crate::renderer::{AssetStatus, DrawCmd, build_frame};
use crate::settings::Settings;
use crate::sim::{Engine, MatchOutcome, MatchStats, RandomSource};

/// Frame loop driver owning the engine and its collaborators
pub struct Host<C: Clock, R: RandomSource = Pcg32> {
    engine: Engine<R>,
    clock: C,
    input: InputState,
    audio: AudioManager,
    assets: AssetStatus,
    settings: Settings,
    last_outcome: MatchOutcome,
}

impl<C: Clock, R: RandomSource> Host<C, R> {
    /// Take ownership of `engine` and start its match at the current time
    pub fn new(mut engine: Engine<R>, clock: C, sink: Box<dyn AudioSink>, settings: Settings) -> Self {
        engine.reset(clock.now_ms());
        let audio = AudioManager::from_settings(sink, &settings);
        Self {
            engine,
            clock,
            input: InputState::new(),
            audio,
            assets: AssetStatus::new(),
            settings,
            last_outcome: MatchOutcome::Ongoing,
        }
    }

    /// Run one tick with the input gathered since the last frame
    pub fn frame(&mut self) -> MatchOutcome {
        let now = self.clock.now_ms();
        let input = self.input.take_tick_input();
        let outcome = self.engine.tick(now, &input);

        let events = self.engine.drain_events();
        self.audio.dispatch(&events);

        if outcome != self.last_outcome && outcome.is_terminal() {
            let stats = self.engine.stats();
            log::info!(
                "{} hits={} time left={}",
                outcome.headline(),
                stats.hits,
                crate::format_clock(stats.remaining_secs)
            );
        }
        self.last_outcome = outcome;
        outcome
    }

    /// Start a fresh match now
    pub fn restart(&mut self) {
        self.input.clear();
        self.engine.reset(self.clock.now_ms());
        self.last_outcome = MatchOutcome::Ongoing;
    }

    /// Drop held keys when the window loses focus
    pub fn blur(&mut self) {
        self.input.clear();
    }

    /// Draw list for the current state
    pub fn draw_list(&self) -> Vec<DrawCmd> {
        build_frame(self.engine.state(), &self.assets, self.settings.hit_flash)
    }

    pub fn apply_settings(&mut self, settings: Settings) {
        self.audio.apply_settings(&settings);
        self.settings = settings;
    }

    pub fn stats(&self) -> MatchStats {
        self.engine.stats()
    }

    pub fn engine(&self) -> &Engine<R> {
        &self.engine
    }

    pub fn input_mut(&mut self) -> &mut InputState {
        &mut self.input
    }

    pub fn assets_mut(&mut self) -> &mut AssetStatus {
        &mut self.assets
    }

    pub fn clock_mut(&mut self) -> &mut C {
        &mut self.clock
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::audio::{AudioError, SoundEffect};
    use crate::renderer::AssetId;
    use crate::tuning::Tuning;
    use std::cell::RefCell;
    use std::rc::Rc;

    struct Recorder(Rc<RefCell<Vec<SoundEffect>>>);

    impl AudioSink for Recorder {
        fn play(&mut self, effect: SoundEffect, _volume: f32) -> Result<(), AudioError> {
            self.0.borrow_mut().push(effect);
            Ok(())
        }
    }

    fn host() -> (Host<ManualClock>, Rc<RefCell<Vec<SoundEffect>>>) {
        let played = Rc::new(RefCell::new(Vec::new()));
        let engine = Engine::with_seed(Tuning::default(), 9);
        let host = Host::new(
            engine,
            ManualClock::new(1_000.0),
            Box::new(Recorder(played.clone())),
            Settings::default(),
        );
        (host, played)
    }

    #[test]
    fn test_click_fires_and_plays() {
        let (mut host, played) = host();
        host.input_mut().click(300.0);
        host.clock_mut().advance(16.0);
        host.frame();

        assert_eq!(host.engine().state().rockets.len(), 1);
        assert_eq!(host.engine().state().drone.pos.y, 300.0);
        assert_eq!(played.borrow().first(), Some(&SoundEffect::RocketFired));
    }

    #[test]
    fn test_muted_settings_silence_audio() {
        let (mut host, played) = host();
        host.apply_settings(Settings {
            muted: true,
            ..Settings::default()
        });
        host.input_mut().key_down(Key::Space);
        host.clock_mut().advance(16.0);
        host.frame();
        assert_eq!(host.engine().state().rockets.len(), 1);
        assert!(played.borrow().is_empty());
    }

    #[test]
    fn test_timeout_then_restart() {
        let (mut host, played) = host();
        host.clock_mut().advance(181_000.0);
        assert_eq!(host.frame(), MatchOutcome::LostTimeout);
        assert!(played.borrow().contains(&SoundEffect::Lose));

        host.restart();
        host.clock_mut().advance(16.0);
        assert_eq!(host.frame(), MatchOutcome::Ongoing);
        assert_eq!(host.stats().remaining_secs, 180);
    }

    #[test]
    fn test_blur_releases_keys() {
        let (mut host, _) = host();
        host.input_mut().key_down(Key::ArrowUp);
        host.blur();
        let y = host.engine().state().drone.pos.y;
        host.clock_mut().advance(16.0);
        host.frame();
        assert_eq!(host.engine().state().drone.pos.y, y);
    }

    #[test]
    fn test_draw_list_uses_loaded_assets() {
        let (mut host, _) = host();
        assert!(!host
            .draw_list()
            .iter()
            .any(|c| matches!(c, DrawCmd::Sprite { .. })));
        host.assets_mut().mark_loaded(AssetId::Background);
        assert!(matches!(
            host.draw_list()[0],
            DrawCmd::Sprite {
                asset: AssetId::Background,
                ..
            }
        ));
    }
}
