//! Drone Strike - a side-on arcade shooter
//!
//! Core modules:
//! - `sim`: Simulation engine (movement, fire control, collisions, match state)
//! - `tuning`: Data-driven game balance
//! - `settings`: Player preferences (audio)
//! - `audio`: Named sound-effect sink
//! - `renderer`: Asset readiness and fallback draw lists
//! - `platform`: Clock, input mapping and the host loop

pub mod audio;
pub mod platform;
pub mod renderer;
pub mod settings;
pub mod sim;
pub mod tuning;

pub use settings::Settings;
pub use tuning::{Tuning, TuningError};

/// Default gameplay constants (overridable through [`Tuning`])
pub mod consts {
    /// Playfield dimensions
    pub const GAME_WIDTH: f32 = 1200.0;
    pub const GAME_HEIGHT: f32 = 675.0;

    /// Match length in whole seconds
    pub const GAME_DURATION_SECS: u32 = 180;
    /// Frame deltas are clamped to this to survive stalls
    pub const MAX_FRAME_DT_MS: f64 = 40.0;
    /// Entities this far outside the playfield are discarded
    pub const OUT_OF_BOUNDS_MARGIN: f32 = 50.0;

    /// Drone defaults
    pub const DRONE_X: f32 = 70.0;
    pub const DRONE_WIDTH: f32 = 100.0;
    pub const DRONE_HEIGHT: f32 = 60.0;
    pub const DRONE_SPEED: f32 = 250.0; // pixels per second
    pub const DRONE_MAX_HP: u8 = 3;
    pub const DRONE_HIT_COOLDOWN_MS: f32 = 1000.0;
    /// Vertical travel is clamped to [margin, height - margin]
    pub const DRONE_CLAMP_MARGIN: f32 = 60.0;
    /// Hurtbox top-left relative to the drone's logical position
    pub const DRONE_HURTBOX_OFFSET: (f32, f32) = (-20.0, -30.0);

    /// Player rockets
    pub const ROCKET_SPEED: f32 = 600.0;
    pub const ROCKET_DRIFT: f32 = 10.0; // upward pixels per second
    pub const ROCKET_RADIUS: f32 = 8.0;
    pub const ROCKET_COOLDOWN_MS: f64 = 200.0;
    /// Rockets leave this far behind the drone's front edge
    pub const ROCKET_MUZZLE_INSET: f32 = 10.0;

    /// Shields
    pub const SHIELD_COUNT: usize = 3;
    pub const SHIELD_WIDTH: f32 = 40.0;
    pub const SHIELD_HEIGHT: f32 = 120.0;
    pub const SHIELD_MIN_SPEED: f32 = 60.0;
    pub const SHIELD_SPEED_RANGE: f32 = 80.0;
    pub const SHIELD_BOUNCE_MARGIN: f32 = 40.0;

    /// Target grid
    pub const MAX_TARGETS: usize = 12;
    pub const TARGET_COLUMNS: usize = 4;
    pub const TARGET_WIDTH: f32 = 90.0;

    /// Defense fire
    pub const DEFENSE_FIRE_COOLDOWN_MS: f64 = 800.0;
    pub const DEFENSE_PROJECTILE_SPEED: f32 = 350.0;
    pub const DEFENSE_PROJECTILE_RADIUS: f32 = 8.0;
    pub const AIM_PREDICTION_BIAS: f32 = 50.0;
    pub const MIN_FIRE_DISTANCE: f32 = 50.0;
}

/// Format whole seconds as `mm:ss`
pub fn format_clock(secs: u32) -> String {
    format!("{:02}:{:02}", secs / 60, secs % 60)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_clock() {
        assert_eq!(format_clock(180), "03:00");
        assert_eq!(format_clock(59), "00:59");
        assert_eq!(format_clock(0), "00:00");
    }
}
