//! Device-agnostic input mapping
//!
//! Keyboard and pointer events accumulate here between frames; the host turns
//! them into one [`TickInput`] per tick.

use crate::sim::TickInput;

/// Keys the game reacts to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    ArrowUp,
    ArrowDown,
    W,
    S,
    Space,
    Other,
}

/// Held keys and pending one-shot requests
#[derive(Debug, Clone, Default)]
pub struct InputState {
    arrow_up: bool,
    arrow_down: bool,
    w: bool,
    s: bool,
    fire_pending: bool,
    pointer_y: Option<f32>,
}

impl InputState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn key_down(&mut self, key: Key) {
        match key {
            Key::ArrowUp => self.arrow_up = true,
            Key::ArrowDown => self.arrow_down = true,
            Key::W => self.w = true,
            Key::S => self.s = true,
            Key::Space => self.fire_pending = true,
            Key::Other => {}
        }
    }

    pub fn key_up(&mut self, key: Key) {
        match key {
            Key::ArrowUp => self.arrow_up = false,
            Key::ArrowDown => self.arrow_down = false,
            Key::W => self.w = false,
            Key::S => self.s = false,
            Key::Space | Key::Other => {}
        }
    }

    /// Pointer press at playfield `y`: move there and fire
    pub fn click(&mut self, y: f32) {
        self.pointer_y = Some(y);
        self.fire_pending = true;
    }

    /// Release everything (e.g. on focus loss)
    pub fn clear(&mut self) {
        *self = Self::default();
    }

    /// Snapshot for the next tick; one-shot requests are consumed
    pub fn take_tick_input(&mut self) -> TickInput {
        let input = TickInput {
            move_up: self.arrow_up || self.w,
            move_down: self.arrow_down || self.s,
            fire: self.fire_pending,
            pointer_y: self.pointer_y,
        };
        self.fire_pending = false;
        self.pointer_y = None;
        input
    }
}
