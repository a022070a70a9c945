//! Simulation module
//!
//! All gameplay logic lives here:
//! - No rendering, audio or platform dependencies
//! - Randomness only through [`RandomSource`]
//! - Time only through the timestamps hosts pass in
//! - Stable iteration order (grid order for targets, spawn order for projectiles)

pub mod collision;
pub mod engine;
pub mod rng;
pub mod state;
pub mod tick;

pub use collision::{Rect, out_of_bounds, rect_circle_overlap};
pub use engine::Engine;
pub use rng::{RandomSource, ScriptedRandom, seeded};
pub use state::{
    DefenseProjectile, Drone, GameEvent, GameState, MatchOutcome, MatchStats, Rocket, Shield,
    Target, TargetKind, hit_milestone,
};
pub use tick::{TickInput, defense_fire, fire_rocket, tick};
