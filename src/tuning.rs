//! Data-driven game balance
//!
//! Every gameplay constant the simulation reads lives in [`Tuning`]. Defaults
//! come from [`crate::consts`]; a JSON file may override any subset of them.

use std::path::Path;

use glam::Vec2;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::consts::*;

/// Failure to load a tuning file
#[derive(Debug, Error)]
pub enum TuningError {
    #[error("failed to read tuning file: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid tuning JSON: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Per-category target stats
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TargetStats {
    pub max_hp: u8,
    pub height: f32,
    /// Whether targets of this category return fire
    pub can_fire: bool,
}

/// Complete gameplay tuning
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    pub width: f32,
    pub height: f32,
    pub duration_secs: u32,
    pub max_frame_dt_ms: f64,
    pub out_of_bounds_margin: f32,

    pub drone_x: f32,
    pub drone_size: Vec2,
    pub drone_speed: f32,
    pub drone_max_hp: u8,
    pub drone_hit_cooldown_ms: f32,
    pub drone_clamp_margin: f32,
    pub drone_hurtbox_offset: Vec2,

    pub rocket_speed: f32,
    pub rocket_drift: f32,
    pub rocket_radius: f32,
    pub rocket_cooldown_ms: f64,
    pub rocket_muzzle_inset: f32,

    pub shield_count: usize,
    pub shield_size: Vec2,
    pub shield_min_speed: f32,
    pub shield_speed_range: f32,
    pub shield_bounce_margin: f32,

    pub max_targets: usize,
    pub target_columns: usize,
    pub target_width: f32,
    /// One entry per grid row, top to bottom
    pub target_rows: Vec<TargetStats>,

    pub defense_fire_cooldown_ms: f64,
    pub defense_projectile_speed: f32,
    pub defense_projectile_radius: f32,
    pub aim_prediction_bias: f32,
    pub min_fire_distance: f32,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            width: GAME_WIDTH,
            height: GAME_HEIGHT,
            duration_secs: GAME_DURATION_SECS,
            max_frame_dt_ms: MAX_FRAME_DT_MS,
            out_of_bounds_margin: OUT_OF_BOUNDS_MARGIN,

            drone_x: DRONE_X,
            drone_size: Vec2::new(DRONE_WIDTH, DRONE_HEIGHT),
            drone_speed: DRONE_SPEED,
            drone_max_hp: DRONE_MAX_HP,
            drone_hit_cooldown_ms: DRONE_HIT_COOLDOWN_MS,
            drone_clamp_margin: DRONE_CLAMP_MARGIN,
            drone_hurtbox_offset: Vec2::new(DRONE_HURTBOX_OFFSET.0, DRONE_HURTBOX_OFFSET.1),

            rocket_speed: ROCKET_SPEED,
            rocket_drift: ROCKET_DRIFT,
            rocket_radius: ROCKET_RADIUS,
            rocket_cooldown_ms: ROCKET_COOLDOWN_MS,
            rocket_muzzle_inset: ROCKET_MUZZLE_INSET,

            shield_count: SHIELD_COUNT,
            shield_size: Vec2::new(SHIELD_WIDTH, SHIELD_HEIGHT),
            shield_min_speed: SHIELD_MIN_SPEED,
            shield_speed_range: SHIELD_SPEED_RANGE,
            shield_bounce_margin: SHIELD_BOUNCE_MARGIN,

            max_targets: MAX_TARGETS,
            target_columns: TARGET_COLUMNS,
            target_width: TARGET_WIDTH,
            target_rows: vec![
                // Buildings
                TargetStats { max_hp: 3, height: 120.0, can_fire: true },
                // Buses
                TargetStats { max_hp: 2, height: 80.0, can_fire: true },
                // Cars
                TargetStats { max_hp: 1, height: 50.0, can_fire: false },
            ],

            defense_fire_cooldown_ms: DEFENSE_FIRE_COOLDOWN_MS,
            defense_projectile_speed: DEFENSE_PROJECTILE_SPEED,
            defense_projectile_radius: DEFENSE_PROJECTILE_RADIUS,
            aim_prediction_bias: AIM_PREDICTION_BIAS,
            min_fire_distance: MIN_FIRE_DISTANCE,
        }
    }
}

impl Tuning {
    /// Parse tuning from JSON; missing fields keep their defaults
    pub fn from_json(json: &str) -> Result<Self, TuningError> {
        let tuning: Tuning = serde_json::from_str(json)?;
        Ok(tuning.sanitized())
    }

    /// Load tuning from a JSON file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, TuningError> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    /// Load tuning from a file, falling back to defaults on any failure
    pub fn load_or_default(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        match Self::load(path) {
            Ok(tuning) => {
                log::info!("Loaded tuning from {}", path.display());
                tuning
            }
            Err(e) => {
                log::warn!("Using default tuning ({}): {}", path.display(), e);
                Self::default()
            }
        }
    }

    pub fn to_json(&self) -> String {
        serde_json::to_string_pretty(self).unwrap_or_default()
    }

    /// Clamp out-of-range values into something the simulation can run with
    pub fn sanitized(mut self) -> Self {
        let defaults = Self::default();

        if !(self.width > 0.0) {
            self.width = defaults.width;
        }
        if !(self.height > 0.0) {
            self.height = defaults.height;
        }
        self.duration_secs = self.duration_secs.max(1);
        self.max_frame_dt_ms = self.max_frame_dt_ms.clamp(1.0, 1000.0);
        self.out_of_bounds_margin = self.out_of_bounds_margin.max(0.0);

        self.drone_size = self.drone_size.max(Vec2::ONE);
        self.drone_speed = self.drone_speed.abs();
        self.drone_max_hp = self.drone_max_hp.max(1);
        self.drone_hit_cooldown_ms = self.drone_hit_cooldown_ms.max(0.0);
        self.drone_clamp_margin = self.drone_clamp_margin.clamp(0.0, self.height / 2.0);

        self.rocket_speed = self.rocket_speed.abs();
        self.rocket_radius = self.rocket_radius.max(0.5);
        self.rocket_cooldown_ms = self.rocket_cooldown_ms.max(0.0);

        self.shield_size = self.shield_size.max(Vec2::ONE);
        self.shield_min_speed = self.shield_min_speed.abs();
        self.shield_speed_range = self.shield_speed_range.abs();
        self.shield_bounce_margin = self.shield_bounce_margin.max(0.0);

        self.target_columns = self.target_columns.max(1);
        self.target_width = self.target_width.max(1.0);
        if self.target_rows.is_empty() {
            self.target_rows = defaults.target_rows;
        }
        for row in &mut self.target_rows {
            row.max_hp = row.max_hp.max(1);
            row.height = row.height.max(1.0);
        }

        self.defense_fire_cooldown_ms = self.defense_fire_cooldown_ms.max(0.0);
        self.defense_projectile_speed = self.defense_projectile_speed.abs();
        self.defense_projectile_radius = self.defense_projectile_radius.max(0.5);
        self.min_fire_distance = self.min_fire_distance.max(0.0);

        self
    }
}
