//! Game state and core simulation types
//!
//! One [`GameState`] owns every entity store, timer and counter of a match.
//! Renderers read it; only the tick and fire functions mutate it.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::collision::Rect;
use super::rng::RandomSource;
use crate::tuning::{TargetStats, Tuning};

/// Target grid starts at this fraction of the playfield width (plus inset)
pub const GRID_LEFT_FRACTION: f32 = 0.62;
pub const GRID_INSET: f32 = 20.0;
pub const GRID_COLUMN_GAP: f32 = 18.0;
pub const GRID_TOP: f32 = 80.0;
pub const GRID_ROW_GAP: f32 = 40.0;

/// Shields stagger diagonally from this fraction of the playfield width
pub const SHIELD_LEFT_FRACTION: f32 = 0.55;
pub const SHIELD_SPACING: Vec2 = Vec2::new(80.0, 120.0);
pub const SHIELD_TOP: f32 = 80.0;

/// Match status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum MatchOutcome {
    /// Match in progress
    #[default]
    Ongoing,
    /// Every target destroyed
    Won,
    /// Drone hp reached zero
    LostDestroyed,
    /// Clock ran out with targets still standing
    LostTimeout,
}

impl MatchOutcome {
    /// Terminal outcomes freeze the simulation
    pub fn is_terminal(&self) -> bool {
        *self != MatchOutcome::Ongoing
    }

    /// Short headline for a results overlay
    pub fn headline(&self) -> &'static str {
        match self {
            MatchOutcome::Ongoing => "In Progress",
            MatchOutcome::Won => "Targets Destroyed!",
            MatchOutcome::LostDestroyed => "Drone Destroyed!",
            MatchOutcome::LostTimeout => "Time's Up!",
        }
    }
}

/// Something that happened during a tick, for audio and UI feedback
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum GameEvent {
    /// Player rocket launched
    RocketFired { rocket: u32 },
    /// Rocket absorbed by a shield
    RocketBlocked { rocket: u32 },
    /// Rocket struck a target
    TargetHit { target: u32, destroyed: bool },
    /// Hit counter reached a milestone (1, 10, or 15 and beyond)
    HitMilestone { milestone: u32 },
    /// A defender shot at the drone
    DefenseFired { shooter: u32 },
    /// Drone took a hit
    DroneHit { hp: u8 },
    /// Terminal state entered
    MatchEnded { outcome: MatchOutcome },
}

/// Milestone announced for a given running hit count
pub fn hit_milestone(hits: u32) -> Option<u32> {
    match hits {
        1 => Some(1),
        10 => Some(10),
        h if h >= 15 => Some(15),
        _ => None,
    }
}

/// The player's drone
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Drone {
    /// Logical position (the hurtbox hangs off this by `hurtbox_offset`)
    pub pos: Vec2,
    pub size: Vec2,
    /// Movement intent from the last input snapshot
    pub move_up: bool,
    pub move_down: bool,
    pub hp: u8,
    pub max_hp: u8,
    /// Milliseconds of invulnerability left; <= 0 means vulnerable
    pub hit_cooldown_ms: f32,
    pub hit_cooldown_max_ms: f32,
    pub hurtbox_offset: Vec2,
}

impl Drone {
    pub fn new(tuning: &Tuning) -> Self {
        Self {
            pos: Vec2::new(tuning.drone_x, tuning.height / 2.0),
            size: tuning.drone_size,
            move_up: false,
            move_down: false,
            hp: tuning.drone_max_hp,
            max_hp: tuning.drone_max_hp,
            hit_cooldown_ms: 0.0,
            hit_cooldown_max_ms: tuning.drone_hit_cooldown_ms,
            hurtbox_offset: tuning.drone_hurtbox_offset,
        }
    }

    /// Rectangle used for projectile hits
    pub fn hurtbox(&self) -> Rect {
        Rect::new(self.pos + self.hurtbox_offset, self.size)
    }

    pub fn is_invulnerable(&self) -> bool {
        self.hit_cooldown_ms > 0.0
    }

    pub fn is_destroyed(&self) -> bool {
        self.hp == 0
    }

    /// Whether the flashing sprite should show its highlight this frame
    pub fn flash_on(&self) -> bool {
        self.is_invulnerable() && (self.hit_cooldown_ms / 100.0).floor() as i64 % 2 == 0
    }

    /// Take one point of damage and start the invulnerability window
    pub fn take_hit(&mut self) {
        self.hp = self.hp.saturating_sub(1);
        self.hit_cooldown_ms = self.hit_cooldown_max_ms;
    }
}

/// Target categories, one per grid row
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TargetKind {
    Building,
    Bus,
    Car,
}

impl TargetKind {
    pub fn for_row(row: usize) -> Self {
        match row {
            0 => TargetKind::Building,
            1 => TargetKind::Bus,
            _ => TargetKind::Car,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            TargetKind::Building => "building",
            TargetKind::Bus => "bus",
            TargetKind::Car => "car",
        }
    }
}

/// A stationary enemy target
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Target {
    pub id: u32,
    pub kind: TargetKind,
    pub pos: Vec2,
    pub size: Vec2,
    pub hp: u8,
    pub max_hp: u8,
    pub alive: bool,
    /// Whether this target returns fire
    pub can_fire: bool,
    /// Timestamp (ms) of this target's last shot
    pub last_fire_ms: Option<f64>,
}

impl Target {
    pub fn new(id: u32, kind: TargetKind, pos: Vec2, width: f32, stats: &TargetStats) -> Self {
        Self {
            id,
            kind,
            pos,
            size: Vec2::new(width, stats.height),
            hp: stats.max_hp,
            max_hp: stats.max_hp,
            alive: true,
            can_fire: stats.can_fire,
            last_fire_ms: None,
        }
    }

    pub fn rect(&self) -> Rect {
        Rect::new(self.pos, self.size)
    }

    pub fn center(&self) -> Vec2 {
        self.rect().center()
    }

    /// Apply one point of damage; returns true if this destroyed the target
    pub fn take_hit(&mut self) -> bool {
        self.hp = self.hp.saturating_sub(1);
        if self.hp == 0 {
            self.alive = false;
        }
        !self.alive
    }

    /// Alive and able to shoot back
    pub fn is_shooter(&self) -> bool {
        self.alive && self.can_fire
    }
}

/// A bouncing obstacle that absorbs both projectile kinds
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Shield {
    pub pos: Vec2,
    pub size: Vec2,
    /// Vertical velocity (pixels/s); sign flips at the bounce lines
    pub vy: f32,
}

impl Shield {
    pub fn rect(&self) -> Rect {
        Rect::new(self.pos, self.size)
    }

    /// Move vertically and reflect when crossing either bounce line
    pub fn advance(&mut self, dt: f32, field_height: f32, margin: f32) {
        self.pos.y += self.vy * dt;
        if self.pos.y < margin || self.pos.y + self.size.y > field_height - margin {
            self.vy = -self.vy;
        }
    }
}

/// A player projectile
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Rocket {
    pub id: u32,
    pub pos: Vec2,
    pub vel: Vec2,
    pub radius: f32,
}

/// An enemy projectile aimed at the drone
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DefenseProjectile {
    pub id: u32,
    pub pos: Vec2,
    pub vel: Vec2,
    pub radius: f32,
}

/// Read-only summary for HUDs and hosts
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchStats {
    pub hits: u32,
    pub targets_left: usize,
    pub remaining_secs: u32,
    pub drone_hp: u8,
    pub drone_max_hp: u8,
    pub outcome: MatchOutcome,
}

/// Complete match state
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameState {
    /// Balance values this match runs with
    pub tuning: Tuning,
    pub drone: Drone,
    /// Targets in grid order (row-major); dead targets stay in place
    pub targets: Vec<Target>,
    pub shields: Vec<Shield>,
    pub rockets: Vec<Rocket>,
    pub defense_projectiles: Vec<DefenseProjectile>,
    /// Rockets that struck a target
    pub hits: u32,
    pub outcome: MatchOutcome,
    /// Whole seconds left, recomputed from the start timestamp each tick
    pub remaining_secs: u32,
    /// Timer baseline (ms); latched on first tick if never reset
    pub start_ms: Option<f64>,
    pub last_tick_ms: Option<f64>,
    pub last_shot_ms: Option<f64>,
    /// Shared cooldown for every defender
    pub last_defense_fire_ms: Option<f64>,
    /// Ticks processed while ongoing
    pub time_ticks: u64,
    /// Events raised since the host last drained them
    #[serde(skip)]
    pub events: Vec<GameEvent>,
    next_id: u32,
}

impl GameState {
    /// Build a freshly spawned match whose timer starts on the first tick
    pub fn new(tuning: Tuning, rng: &mut impl RandomSource) -> Self {
        let mut state = Self {
            drone: Drone::new(&tuning),
            remaining_secs: tuning.duration_secs,
            tuning,
            targets: Vec::new(),
            shields: Vec::new(),
            rockets: Vec::new(),
            defense_projectiles: Vec::new(),
            hits: 0,
            outcome: MatchOutcome::Ongoing,
            start_ms: None,
            last_tick_ms: None,
            last_shot_ms: None,
            last_defense_fire_ms: None,
            time_ticks: 0,
            events: Vec::new(),
            next_id: 1,
        };
        state.spawn_targets();
        state.spawn_shields(rng);
        state
    }

    /// Reinitialize every store, timer and counter and restart the clock at `now_ms`
    pub fn reset(&mut self, now_ms: f64, rng: &mut impl RandomSource) {
        self.drone = Drone::new(&self.tuning);
        self.rockets.clear();
        self.defense_projectiles.clear();
        self.hits = 0;
        self.outcome = MatchOutcome::Ongoing;
        self.remaining_secs = self.tuning.duration_secs;
        self.start_ms = Some(now_ms);
        self.last_tick_ms = Some(now_ms);
        self.last_shot_ms = None;
        self.last_defense_fire_ms = None;
        self.time_ticks = 0;
        self.events.clear();
        self.next_id = 1;
        self.spawn_targets();
        self.spawn_shields(rng);
        log::info!(
            "Match reset: {} targets, {} shields, {}s on the clock",
            self.targets.len(),
            self.shields.len(),
            self.remaining_secs
        );
    }

    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// Lay out the target grid: one category per row, capped at `max_targets`
    pub fn spawn_targets(&mut self) {
        self.targets.clear();
        let origin_x = self.tuning.width * GRID_LEFT_FRACTION + GRID_INSET;
        let width = self.tuning.target_width;
        let rows = self.tuning.target_rows.clone();

        for (row, stats) in rows.iter().enumerate() {
            for col in 0..self.tuning.target_columns {
                if self.targets.len() >= self.tuning.max_targets {
                    continue;
                }
                let pos = Vec2::new(
                    origin_x + col as f32 * (width + GRID_COLUMN_GAP),
                    GRID_TOP + row as f32 * (stats.height + GRID_ROW_GAP),
                );
                let id = self.next_entity_id();
                self.targets
                    .push(Target::new(id, TargetKind::for_row(row), pos, width, stats));
            }
        }
    }

    /// Place shields on a diagonal with random bounce speed and direction
    pub fn spawn_shields(&mut self, rng: &mut impl RandomSource) {
        self.shields.clear();
        let base_x = self.tuning.width * SHIELD_LEFT_FRACTION;
        for i in 0..self.tuning.shield_count {
            let direction = if rng.next_f32() > 0.5 { 1.0 } else { -1.0 };
            let speed = self.tuning.shield_min_speed + rng.next_f32() * self.tuning.shield_speed_range;
            self.shields.push(Shield {
                pos: Vec2::new(base_x, SHIELD_TOP) + SHIELD_SPACING * i as f32,
                size: self.tuning.shield_size,
                vy: direction * speed,
            });
        }
    }

    pub fn targets_left(&self) -> usize {
        self.targets.iter().filter(|t| t.alive).count()
    }

    pub fn stats(&self) -> MatchStats {
        MatchStats {
            hits: self.hits,
            targets_left: self.targets_left(),
            remaining_secs: self.remaining_secs,
            drone_hp: self.drone.hp,
            drone_max_hp: self.drone.max_hp,
            outcome: self.outcome,
        }
    }

    /// Take every event raised since the last call
    pub fn take_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    /// Enter a terminal state (first transition wins)
    pub fn finish(&mut self, outcome: MatchOutcome) {
        if self.outcome.is_terminal() || !outcome.is_terminal() {
            return;
        }
        self.outcome = outcome;
        self.events.push(GameEvent::MatchEnded { outcome });
        log::info!(
            "Match over: {:?} (hits={}, targets_left={}, remaining={}s, drone_hp={})",
            outcome,
            self.hits,
            self.targets_left(),
            self.remaining_secs,
            self.drone.hp
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::rng::{ScriptedRandom, seeded};

    #[test]
    fn test_default_spawn_counts() {
        let state = GameState::new(Tuning::default(), &mut seeded(1));
        assert_eq!(state.targets.len(), 12);
        assert_eq!(state.shields.len(), 3);
        assert_eq!(state.hits, 0);
        assert_eq!(state.drone.hp, 3);
        assert_eq!(state.outcome, MatchOutcome::Ongoing);
        assert_eq!(state.remaining_secs, 180);
    }

    #[test]
    fn test_grid_layout_by_row() {
        let state = GameState::new(Tuning::default(), &mut seeded(1));
        let kinds: Vec<_> = state.targets.iter().map(|t| t.kind).collect();
        assert!(kinds[..4].iter().all(|k| *k == TargetKind::Building));
        assert!(kinds[4..8].iter().all(|k| *k == TargetKind::Bus));
        assert!(kinds[8..].iter().all(|k| *k == TargetKind::Car));

        let first = &state.targets[0];
        assert_eq!(first.pos, Vec2::new(1200.0 * 0.62 + 20.0, 80.0));
        assert_eq!(first.max_hp, 3);
        assert!(first.can_fire);
        assert_eq!(state.targets[1].pos.x - first.pos.x, 108.0);
        // Second row sits below a 120px building plus gap
        assert_eq!(state.targets[4].pos.y, 80.0 + 80.0 + 40.0);
        assert!(!state.targets[8].can_fire);
        assert_eq!(state.targets[8].max_hp, 1);
    }

    #[test]
    fn test_max_targets_caps_grid() {
        let tuning = Tuning {
            max_targets: 5,
            ..Default::default()
        };
        let state = GameState::new(tuning, &mut seeded(1));
        assert_eq!(state.targets.len(), 5);
    }

    #[test]
    fn test_shield_velocity_from_rng() {
        // direction roll, speed roll per shield
        let mut rng = ScriptedRandom::new(vec![0.9, 0.5, 0.1, 0.0, 0.6, 1.0]);
        let state = GameState::new(Tuning::default(), &mut rng);
        assert_eq!(state.shields[0].vy, 100.0);
        assert_eq!(state.shields[1].vy, -60.0);
        assert!(state.shields[2].vy > 139.0);
        assert_eq!(state.shields[2].pos, Vec2::new(660.0 + 160.0, 320.0));
    }

    #[test]
    fn test_shield_reflects_at_bounds() {
        let mut shield = Shield {
            pos: Vec2::new(0.0, 41.0),
            size: Vec2::new(40.0, 120.0),
            vy: -100.0,
        };
        shield.advance(0.02, 675.0, 40.0);
        assert!(shield.pos.y < 40.0);
        assert_eq!(shield.vy, 100.0);
    }

    #[test]
    fn test_target_hp_never_underflows() {
        let mut state = GameState::new(Tuning::default(), &mut seeded(1));
        let car = &mut state.targets[8];
        assert!(car.take_hit());
        assert!(car.take_hit());
        assert_eq!(car.hp, 0);
        assert!(!car.alive);
    }

    #[test]
    fn test_reset_restores_everything() {
        let mut rng = seeded(3);
        let mut state = GameState::new(Tuning::default(), &mut rng);
        state.hits = 7;
        state.drone.take_hit();
        state.targets[0].alive = false;
        state.finish(MatchOutcome::LostTimeout);

        state.reset(5000.0, &mut rng);
        assert_eq!(state.hits, 0);
        assert_eq!(state.drone.hp, 3);
        assert!(!state.drone.is_invulnerable());
        assert_eq!(state.targets_left(), 12);
        assert_eq!(state.outcome, MatchOutcome::Ongoing);
        assert_eq!(state.start_ms, Some(5000.0));
        assert!(state.events.is_empty());
    }

    #[test]
    fn test_finish_only_once() {
        let mut state = GameState::new(Tuning::default(), &mut seeded(1));
        state.finish(MatchOutcome::Won);
        state.finish(MatchOutcome::LostTimeout);
        assert_eq!(state.outcome, MatchOutcome::Won);
        assert_eq!(state.events.len(), 1);
    }

    #[test]
    fn test_hit_milestones() {
        assert_eq!(hit_milestone(1), Some(1));
        assert_eq!(hit_milestone(2), None);
        assert_eq!(hit_milestone(10), Some(10));
        assert_eq!(hit_milestone(14), None);
        assert_eq!(hit_milestone(15), Some(15));
        assert_eq!(hit_milestone(22), Some(15));
    }

    #[test]
    fn test_drone_hurtbox_offset() {
        let drone = Drone::new(&Tuning::default());
        let hurtbox = drone.hurtbox();
        assert_eq!(hurtbox.min, Vec2::new(50.0, 675.0 / 2.0 - 30.0));
        assert_eq!(hurtbox.size, Vec2::new(100.0, 60.0));
    }
}
