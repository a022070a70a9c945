//! GPU-uploadable instance data for 2D quads

use bytemuck::{Pod, Zeroable};

/// How the fragment stage should fill an instance
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u32)]
pub enum ShapeKind {
    Rect = 0,
    Circle = 1,
    Outline = 2,
    Sprite = 3,
}

/// One quad per draw command
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, Pod, Zeroable)]
pub struct QuadInstance {
    /// Quad center in playfield pixels
    pub center: [f32; 2],
    pub size: [f32; 2],
    pub rotation: f32,
    /// [`ShapeKind`] discriminant
    pub shape: u32,
    pub color: [f32; 4],
    /// Texture slot for sprites (asset index), 0 otherwise
    pub texture: u32,
    /// Outline thickness, or 1.0 to brighten a sprite
    pub param: f32,
}

impl QuadInstance {
    pub fn as_bytes(instances: &[QuadInstance]) -> &[u8] {
        bytemuck::cast_slice(instances)
    }
}

/// Colors for game elements
pub mod colors {
    pub const BACKGROUND: [f32; 4] = [0.0, 0.067, 0.102, 1.0];
    pub const SKYLINE: [f32; 4] = [0.0, 0.0, 0.2, 1.0];
    pub const DIM: [f32; 4] = [0.0, 0.0, 0.0, 0.24];
    pub const DRONE: [f32; 4] = [0.059, 0.69, 1.0, 1.0];
    pub const DRONE_FLASH: [f32; 4] = [1.0, 0.267, 0.267, 1.0];
    pub const DRONE_ROTOR: [f32; 4] = [0.804, 0.875, 0.976, 1.0];
    pub const BUILDING: [f32; 4] = [0.545, 0.271, 0.075, 1.0];
    pub const BUS: [f32; 4] = [1.0, 0.42, 0.208, 1.0];
    pub const CAR: [f32; 4] = [0.306, 0.804, 0.769, 1.0];
    pub const SHIELD_FILL: [f32; 4] = [0.47, 0.784, 1.0, 0.16];
    pub const SHIELD_EDGE: [f32; 4] = [0.47, 0.784, 1.0, 0.6];
    pub const ROCKET: [f32; 4] = [1.0, 0.839, 0.651, 1.0];
    pub const ROCKET_EXHAUST: [f32; 4] = [1.0, 0.549, 0.078, 0.9];
    pub const DEFENSE: [f32; 4] = [1.0, 0.267, 0.267, 1.0];
    pub const DEFENSE_CORE: [f32; 4] = [1.0, 0.784, 0.196, 0.9];
    pub const BAR_BACK: [f32; 4] = [0.0, 0.0, 0.0, 0.6];
    pub const BAR_HEALTHY: [f32; 4] = [0.298, 0.686, 0.314, 1.0];
    pub const BAR_CRITICAL: [f32; 4] = [0.957, 0.263, 0.212, 1.0];
    pub const BAR_TARGET: [f32; 4] = [0.886, 0.243, 0.243, 1.0];
    pub const WHITE: [f32; 4] = [1.0, 1.0, 1.0, 1.0];
}
