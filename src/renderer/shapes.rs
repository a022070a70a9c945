//! Draw list generation
//!
//! Turns a read-only [`GameState`] into back-to-front draw commands. Sprites
//! are used when their asset is ready, placeholder shapes otherwise.

use glam::Vec2;

use super::assets::{AssetId, AssetReadiness};
use super::vertex::{QuadInstance, ShapeKind, colors};
use crate::sim::{GameState, Rect, TargetKind};

/// Height of the fallback skyline strip
const SKYLINE_HEIGHT: f32 = 100.0;
const BAR_HEIGHT: f32 = 6.0;
const ROCKET_SPRITE: Vec2 = Vec2::new(20.0, 8.0);
const DEFENSE_SPRITE: Vec2 = Vec2::new(16.0, 16.0);
const SHIELD_EDGE_WIDTH: f32 = 2.0;

/// A single primitive for the renderer
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DrawCmd {
    Sprite {
        asset: AssetId,
        rect: Rect,
        rotation: f32,
        /// Brighten (drone hit flash)
        highlight: bool,
    },
    Rect {
        rect: Rect,
        color: [f32; 4],
    },
    Outline {
        rect: Rect,
        color: [f32; 4],
        thickness: f32,
    },
    Circle {
        center: Vec2,
        radius: f32,
        color: [f32; 4],
    },
}

impl DrawCmd {
    pub fn to_instance(&self) -> QuadInstance {
        match *self {
            DrawCmd::Sprite {
                asset,
                rect,
                rotation,
                highlight,
            } => QuadInstance {
                center: rect.center().to_array(),
                size: rect.size.to_array(),
                rotation,
                shape: ShapeKind::Sprite as u32,
                color: colors::WHITE,
                texture: asset as u32,
                param: if highlight { 1.0 } else { 0.0 },
            },
            DrawCmd::Rect { rect, color } => QuadInstance {
                center: rect.center().to_array(),
                size: rect.size.to_array(),
                rotation: 0.0,
                shape: ShapeKind::Rect as u32,
                color,
                texture: 0,
                param: 0.0,
            },
            DrawCmd::Outline {
                rect,
                color,
                thickness,
            } => QuadInstance {
                center: rect.center().to_array(),
                size: rect.size.to_array(),
                rotation: 0.0,
                shape: ShapeKind::Outline as u32,
                color,
                texture: 0,
                param: thickness,
            },
            DrawCmd::Circle {
                center,
                radius,
                color,
            } => QuadInstance {
                center: center.to_array(),
                size: [radius * 2.0; 2],
                rotation: 0.0,
                shape: ShapeKind::Circle as u32,
                color,
                texture: 0,
                param: 0.0,
            },
        }
    }
}

fn target_color(kind: TargetKind) -> [f32; 4] {
    match kind {
        TargetKind::Building => colors::BUILDING,
        TargetKind::Bus => colors::BUS,
        TargetKind::Car => colors::CAR,
    }
}

/// Background bar plus a fill proportional to `fraction`
fn health_bar(out: &mut Vec<DrawCmd>, min: Vec2, width: f32, fraction: f32, fill: [f32; 4]) {
    out.push(DrawCmd::Rect {
        rect: Rect::new(min, Vec2::new(width, BAR_HEIGHT)),
        color: colors::BAR_BACK,
    });
    let fill_width = width * fraction.clamp(0.0, 1.0);
    if fill_width > 0.0 {
        out.push(DrawCmd::Rect {
            rect: Rect::new(min, Vec2::new(fill_width, BAR_HEIGHT)),
            color: fill,
        });
    }
}

/// Build the frame's draw list, back to front
///
/// `hit_flash` toggles the invulnerability flash on the drone.
pub fn build_frame(state: &GameState, assets: &impl AssetReadiness, hit_flash: bool) -> Vec<DrawCmd> {
    let field = Vec2::new(state.tuning.width, state.tuning.height);
    let mut out = Vec::with_capacity(
        8 + state.targets.len() * 3 + state.shields.len() * 2 + state.rockets.len() * 2
            + state.defense_projectiles.len() * 2,
    );

    // Background
    if assets.is_ready(AssetId::Background) {
        out.push(DrawCmd::Sprite {
            asset: AssetId::Background,
            rect: Rect::new(Vec2::ZERO, field),
            rotation: 0.0,
            highlight: false,
        });
    } else {
        out.push(DrawCmd::Rect {
            rect: Rect::new(Vec2::ZERO, field),
            color: colors::BACKGROUND,
        });
        out.push(DrawCmd::Rect {
            rect: Rect::new(
                Vec2::new(0.0, field.y - SKYLINE_HEIGHT),
                Vec2::new(field.x, SKYLINE_HEIGHT),
            ),
            color: colors::SKYLINE,
        });
    }
    out.push(DrawCmd::Rect {
        rect: Rect::new(Vec2::ZERO, field),
        color: colors::DIM,
    });

    // Drone (drawn at its hurtbox)
    let drone = &state.drone;
    let drone_rect = drone.hurtbox();
    let flashing = hit_flash && drone.flash_on();
    if assets.is_ready(AssetId::Drone) {
        out.push(DrawCmd::Sprite {
            asset: AssetId::Drone,
            rect: drone_rect,
            rotation: 0.0,
            highlight: flashing,
        });
    } else {
        out.push(DrawCmd::Rect {
            rect: drone_rect,
            color: if flashing {
                colors::DRONE_FLASH
            } else {
                colors::DRONE
            },
        });
        out.push(DrawCmd::Rect {
            rect: Rect::new(drone.pos + Vec2::new(10.0, -42.0), Vec2::new(60.0, 8.0)),
            color: colors::DRONE_ROTOR,
        });
    }
    let drone_fill = if drone.hp > 1 {
        colors::BAR_HEALTHY
    } else {
        colors::BAR_CRITICAL
    };
    health_bar(
        &mut out,
        drone_rect.min - Vec2::new(0.0, 15.0),
        drone.size.x,
        drone.hp as f32 / drone.max_hp.max(1) as f32,
        drone_fill,
    );

    // Targets
    for target in state.targets.iter().filter(|t| t.alive) {
        let asset = AssetId::for_target(target.kind);
        if assets.is_ready(asset) {
            out.push(DrawCmd::Sprite {
                asset,
                rect: target.rect(),
                rotation: 0.0,
                highlight: false,
            });
        } else {
            out.push(DrawCmd::Rect {
                rect: target.rect(),
                color: target_color(target.kind),
            });
        }
        health_bar(
            &mut out,
            target.pos - Vec2::new(0.0, 8.0),
            target.size.x,
            target.hp as f32 / target.max_hp.max(1) as f32,
            colors::BAR_TARGET,
        );
    }

    // Shields
    for shield in &state.shields {
        out.push(DrawCmd::Rect {
            rect: shield.rect(),
            color: colors::SHIELD_FILL,
        });
        out.push(DrawCmd::Outline {
            rect: shield.rect(),
            color: colors::SHIELD_EDGE,
            thickness: SHIELD_EDGE_WIDTH,
        });
    }

    // Rockets
    for rocket in &state.rockets {
        if assets.is_ready(AssetId::Rocket) {
            out.push(DrawCmd::Sprite {
                asset: AssetId::Rocket,
                rect: Rect::new(rocket.pos - ROCKET_SPRITE / 2.0, ROCKET_SPRITE),
                rotation: rocket.vel.y.atan2(rocket.vel.x),
                highlight: false,
            });
        } else {
            out.push(DrawCmd::Circle {
                center: rocket.pos,
                radius: rocket.radius,
                color: colors::ROCKET,
            });
            out.push(DrawCmd::Circle {
                center: rocket.pos - Vec2::new(rocket.radius + 4.0, 0.0),
                radius: rocket.radius * 0.5,
                color: colors::ROCKET_EXHAUST,
            });
        }
    }

    // Defense projectiles
    for projectile in &state.defense_projectiles {
        if assets.is_ready(AssetId::DefenseProjectile) {
            out.push(DrawCmd::Sprite {
                asset: AssetId::DefenseProjectile,
                rect: Rect::new(projectile.pos - DEFENSE_SPRITE / 2.0, DEFENSE_SPRITE),
                rotation: projectile.vel.y.atan2(projectile.vel.x),
                highlight: false,
            });
        } else {
            out.push(DrawCmd::Circle {
                center: projectile.pos,
                radius: projectile.radius,
                color: colors::DEFENSE,
            });
            out.push(DrawCmd::Circle {
                center: projectile.pos,
                radius: projectile.radius * 0.6,
                color: colors::DEFENSE_CORE,
            });
        }
    }

    out
}

/// Flatten a draw list into GPU instances
pub fn instances(cmds: &[DrawCmd]) -> Vec<QuadInstance> {
    cmds.iter().map(DrawCmd::to_instance).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::renderer::assets::{AssetStatus, NoAssets};
    use crate::sim::{GameState, seeded};
    use crate::tuning::Tuning;

    fn state() -> GameState {
        let mut rng = seeded(11);
        let mut state = GameState::new(Tuning::default(), &mut rng);
        state.reset(0.0, &mut rng);
        state
    }

    #[test]
    fn test_placeholders_without_assets() {
        let state = state();
        let cmds = build_frame(&state, &NoAssets, true);
        assert!(!cmds.iter().any(|c| matches!(c, DrawCmd::Sprite { .. })));
        let target_rects = cmds
            .iter()
            .filter(|c| matches!(c, DrawCmd::Rect { color, .. } if *color == colors::BUILDING))
            .count();
        assert_eq!(target_rects, 4);
    }

    #[test]
    fn test_sprites_when_ready() {
        let state = state();
        let mut assets = AssetStatus::new();
        for asset in AssetId::ALL {
            assets.mark_loaded(asset);
        }
        let cmds = build_frame(&state, &assets, true);
        let sprites = cmds
            .iter()
            .filter(|c| matches!(c, DrawCmd::Sprite { .. }))
            .count();
        // background + drone + 12 targets
        assert_eq!(sprites, 14);
    }

    #[test]
    fn test_dead_targets_not_drawn() {
        let mut state = state();
        for target in &mut state.targets {
            target.alive = false;
            target.hp = 0;
        }
        let cmds = build_frame(&state, &NoAssets, true);
        assert!(!cmds.iter().any(|c| matches!(
            c,
            DrawCmd::Rect { color, .. } if *color == colors::BAR_TARGET
        )));
    }

    #[test]
    fn test_drone_flash_respects_setting() {
        let mut state = state();
        state.drone.hit_cooldown_ms = 850.0;
        assert!(state.drone.flash_on());

        let flashing = build_frame(&state, &NoAssets, true);
        assert!(flashing.iter().any(|c| matches!(
            c,
            DrawCmd::Rect { color, .. } if *color == colors::DRONE_FLASH
        )));
        let steady = build_frame(&state, &NoAssets, false);
        assert!(!steady.iter().any(|c| matches!(
            c,
            DrawCmd::Rect { color, .. } if *color == colors::DRONE_FLASH
        )));
    }

    #[test]
    fn test_instances_byte_layout() {
        let state = state();
        let cmds = build_frame(&state, &NoAssets, true);
        let quads = instances(&cmds);
        assert_eq!(quads.len(), cmds.len());
        assert_eq!(std::mem::size_of::<QuadInstance>(), 48);
        assert_eq!(QuadInstance::as_bytes(&quads).len(), quads.len() * 48);
    }
}
