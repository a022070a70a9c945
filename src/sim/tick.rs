//! Per-frame simulation tick
//!
//! Advances the match by the wall-clock delta since the previous tick (clamped
//! to the tuning's max frame delta), runs defender fire, integrates motion,
//! resolves collisions and decides the outcome.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::collision::{out_of_bounds, rect_circle_overlap};
use super::rng::RandomSource;
use super::state::{
    DefenseProjectile, GameEvent, GameState, MatchOutcome, Rocket, hit_milestone,
};

/// Input snapshot for a single tick
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct TickInput {
    /// Held movement keys
    pub move_up: bool,
    pub move_down: bool,
    /// A fire request arrived since the previous tick
    pub fire: bool,
    /// Pointer press: the drone snaps to this y before anything else moves
    pub pointer_y: Option<f32>,
}

/// Advance the match to `now_ms`
///
/// Returns the outcome after the tick. Once the outcome is terminal every
/// further call is a no-op.
///
/// Events are appended to `state.events` and never cleared here; callers
/// driving `tick` directly must drain them with [`GameState::take_events`].
/// [`Engine`](super::Engine) does this in `drain_events`.
pub fn tick(
    state: &mut GameState,
    input: &TickInput,
    now_ms: f64,
    rng: &mut impl RandomSource,
) -> MatchOutcome {
    if state.outcome.is_terminal() {
        return state.outcome;
    }

    let start_ms = *state.start_ms.get_or_insert(now_ms);
    let dt = frame_dt(state, now_ms);
    state.last_tick_ms = Some(now_ms);
    state.time_ticks += 1;

    state.drone.move_up = input.move_up;
    state.drone.move_down = input.move_down;
    if let Some(y) = input.pointer_y.filter(|y| y.is_finite()) {
        state.drone.pos.y = clamp_drone_y(state, y);
    }
    if input.fire {
        fire_rocket(state, now_ms);
    }

    update_drone(state, dt);
    update_clock(state, start_ms, now_ms);
    defense_fire(state, now_ms, rng);
    update_shields(state, dt);
    update_projectiles(state, dt);

    resolve_rocket_hits(state);
    if resolve_projectile_hits(state) {
        return state.outcome;
    }

    if state.targets_left() == 0 {
        state.finish(MatchOutcome::Won);
    } else if state.remaining_secs == 0 {
        state.finish(MatchOutcome::LostTimeout);
    }

    state.outcome
}

/// Launch a player rocket from the drone's front edge
///
/// Ignored after the match has ended or while the fire cooldown runs.
/// Returns true if a rocket was spawned.
pub fn fire_rocket(state: &mut GameState, now_ms: f64) -> bool {
    if state.outcome.is_terminal() {
        return false;
    }
    let cooldown = state.tuning.rocket_cooldown_ms;
    if state.last_shot_ms.is_some_and(|last| now_ms - last < cooldown) {
        return false;
    }
    state.last_shot_ms = Some(now_ms);

    let id = state.next_entity_id();
    let drone = &state.drone;
    let pos = Vec2::new(
        drone.pos.x + drone.size.x - state.tuning.rocket_muzzle_inset,
        drone.pos.y,
    );
    state.rockets.push(Rocket {
        id,
        pos,
        vel: Vec2::new(state.tuning.rocket_speed, -state.tuning.rocket_drift),
        radius: state.tuning.rocket_radius,
    });
    state.events.push(GameEvent::RocketFired { rocket: id });
    true
}

/// Let one randomly chosen defender shoot at the drone
///
/// A single cooldown is shared by every defender. The aim point leads the
/// drone by the prediction bias in the direction it is being steered.
/// Returns true if a projectile was spawned.
pub fn defense_fire(state: &mut GameState, now_ms: f64, rng: &mut impl RandomSource) -> bool {
    if state.outcome.is_terminal() {
        return false;
    }

    let shooters: Vec<usize> = state
        .targets
        .iter()
        .enumerate()
        .filter(|(_, t)| t.is_shooter())
        .map(|(i, _)| i)
        .collect();
    if shooters.is_empty() {
        return false;
    }

    let cooldown = state.tuning.defense_fire_cooldown_ms;
    if state
        .last_defense_fire_ms
        .is_some_and(|last| now_ms - last < cooldown)
    {
        return false;
    }

    let index = shooters[rng.pick_index(shooters.len())];

    let bias = if state.drone.move_down {
        state.tuning.aim_prediction_bias
    } else if state.drone.move_up {
        -state.tuning.aim_prediction_bias
    } else {
        0.0
    };
    let aim = state.drone.pos + Vec2::new(0.0, bias);

    let shooter = &state.targets[index];
    let delta = aim - shooter.pos;
    let distance = delta.length();
    if distance <= state.tuning.min_fire_distance || distance <= f32::EPSILON {
        return false;
    }

    let shooter_id = shooter.id;
    let origin = shooter.center();
    let vel = delta / distance * state.tuning.defense_projectile_speed;

    let id = state.next_entity_id();
    state.defense_projectiles.push(DefenseProjectile {
        id,
        pos: origin,
        vel,
        radius: state.tuning.defense_projectile_radius,
    });
    state.targets[index].last_fire_ms = Some(now_ms);
    state.last_defense_fire_ms = Some(now_ms);
    state.events.push(GameEvent::DefenseFired { shooter: shooter_id });
    log::debug!("Defender {} fired at ({:.0}, {:.0})", shooter_id, aim.x, aim.y);
    true
}

/// Clamped frame delta in seconds
fn frame_dt(state: &GameState, now_ms: f64) -> f32 {
    let last = state.last_tick_ms.unwrap_or(now_ms);
    let elapsed = now_ms - last;
    if !elapsed.is_finite() {
        return 0.0;
    }
    (elapsed.clamp(0.0, state.tuning.max_frame_dt_ms) / 1000.0) as f32
}

fn clamp_drone_y(state: &GameState, y: f32) -> f32 {
    let margin = state.tuning.drone_clamp_margin;
    y.clamp(margin, state.tuning.height - margin)
}

fn update_drone(state: &mut GameState, dt: f32) {
    if state.drone.hit_cooldown_ms > 0.0 {
        state.drone.hit_cooldown_ms -= dt * 1000.0;
    }

    let step = state.tuning.drone_speed * dt;
    let mut y = state.drone.pos.y;
    if state.drone.move_up {
        y -= step;
    }
    if state.drone.move_down {
        y += step;
    }
    state.drone.pos.y = clamp_drone_y(state, y);
}

/// Remaining time is derived from the start timestamp, never accumulated
fn update_clock(state: &mut GameState, start_ms: f64, now_ms: f64) {
    let elapsed_secs = ((now_ms - start_ms) / 1000.0).max(0.0).floor();
    state.remaining_secs = (state.tuning.duration_secs as f64 - elapsed_secs).max(0.0) as u32;
}

fn update_shields(state: &mut GameState, dt: f32) {
    let height = state.tuning.height;
    let margin = state.tuning.shield_bounce_margin;
    for shield in &mut state.shields {
        shield.advance(dt, height, margin);
    }
}

fn update_projectiles(state: &mut GameState, dt: f32) {
    let (width, height) = (state.tuning.width, state.tuning.height);
    let margin = state.tuning.out_of_bounds_margin;

    for rocket in &mut state.rockets {
        rocket.pos += rocket.vel * dt;
    }
    state
        .rockets
        .retain(|r| !out_of_bounds(r.pos, width, height, margin));

    for projectile in &mut state.defense_projectiles {
        projectile.pos += projectile.vel * dt;
    }
    state
        .defense_projectiles
        .retain(|p| !out_of_bounds(p.pos, width, height, margin));
}

/// Rockets against shields, then targets in grid order
///
/// A shield hit short-circuits the target test, and the first target hit
/// absorbs the rocket.
fn resolve_rocket_hits(state: &mut GameState) {
    for i in (0..state.rockets.len()).rev() {
        let Rocket { id, pos, radius, .. } = state.rockets[i];

        if state
            .shields
            .iter()
            .any(|s| rect_circle_overlap(&s.rect(), pos, radius))
        {
            state.rockets.remove(i);
            state.events.push(GameEvent::RocketBlocked { rocket: id });
            continue;
        }

        let Some(target) = state
            .targets
            .iter_mut()
            .find(|t| t.alive && rect_circle_overlap(&t.rect(), pos, radius))
        else {
            continue;
        };

        let destroyed = target.take_hit();
        let target_id = target.id;
        if destroyed {
            log::debug!("Destroyed {} {}", target.kind.as_str(), target_id);
        }
        state.hits += 1;
        state.rockets.remove(i);
        state.events.push(GameEvent::TargetHit {
            target: target_id,
            destroyed,
        });
        if let Some(milestone) = hit_milestone(state.hits) {
            state.events.push(GameEvent::HitMilestone { milestone });
        }
    }
}

/// Defense projectiles against the drone hurtbox, then shields
///
/// Returns true if the drone was destroyed, which ends the tick at once.
fn resolve_projectile_hits(state: &mut GameState) -> bool {
    for i in (0..state.defense_projectiles.len()).rev() {
        let DefenseProjectile { pos, radius, .. } = state.defense_projectiles[i];

        if !state.drone.is_invulnerable()
            && rect_circle_overlap(&state.drone.hurtbox(), pos, radius)
        {
            state.drone.take_hit();
            state.defense_projectiles.remove(i);
            state.events.push(GameEvent::DroneHit { hp: state.drone.hp });
            log::debug!("Drone hit! HP: {}/{}", state.drone.hp, state.drone.max_hp);

            if state.drone.is_destroyed() {
                state.finish(MatchOutcome::LostDestroyed);
                return true;
            }
            continue;
        }

        if state
            .shields
            .iter()
            .any(|s| rect_circle_overlap(&s.rect(), pos, radius))
        {
            state.defense_projectiles.remove(i);
        }
    }
    false
}
