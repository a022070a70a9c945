//! Asset catalogue and readiness tracking
//!
//! The draw list asks an [`AssetReadiness`] whether a sprite can be used and
//! falls back to placeholder shapes when it cannot. Loading itself belongs to
//! the platform layer; it only reports results here.

use crate::sim::TargetKind;

const ASSET_COUNT: usize = 7;

/// Every image the game knows about
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AssetId {
    Background,
    Drone,
    Rocket,
    Building,
    Bus,
    Car,
    DefenseProjectile,
}

impl AssetId {
    pub const ALL: [AssetId; ASSET_COUNT] = [
        AssetId::Background,
        AssetId::Drone,
        AssetId::Rocket,
        AssetId::Building,
        AssetId::Bus,
        AssetId::Car,
        AssetId::DefenseProjectile,
    ];

    pub fn path(&self) -> &'static str {
        match self {
            AssetId::Background => "Assets/background.png",
            AssetId::Drone => "Assets/drone.png",
            AssetId::Rocket => "Assets/rocket.png",
            AssetId::Building => "Assets/building.png",
            AssetId::Bus => "Assets/bus.png",
            AssetId::Car => "Assets/car.png",
            AssetId::DefenseProjectile => "Assets/defense_projectile.png",
        }
    }

    pub fn for_target(kind: TargetKind) -> Self {
        match kind {
            TargetKind::Building => AssetId::Building,
            TargetKind::Bus => AssetId::Bus,
            TargetKind::Car => AssetId::Car,
        }
    }

    fn index(&self) -> usize {
        *self as usize
    }
}

/// Whether an asset can be drawn right now
pub trait AssetReadiness {
    fn is_ready(&self, asset: AssetId) -> bool;
}

/// Load result for one asset
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LoadState {
    #[default]
    Pending,
    Loaded,
    Failed,
}

/// Load results reported by the platform
#[derive(Debug, Clone, Default)]
pub struct AssetStatus {
    states: [LoadState; ASSET_COUNT],
}

impl AssetStatus {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self, asset: AssetId) -> LoadState {
        self.states[asset.index()]
    }

    pub fn mark_loaded(&mut self, asset: AssetId) {
        log::debug!("Loaded: {}", asset.path());
        self.set(asset, LoadState::Loaded);
    }

    pub fn mark_failed(&mut self, asset: AssetId) {
        log::warn!("Failed to load image: {} (using placeholder)", asset.path());
        self.set(asset, LoadState::Failed);
    }

    fn set(&mut self, asset: AssetId, state: LoadState) {
        self.states[asset.index()] = state;
        if self.all_attempted() {
            log::info!(
                "All images attempted: {}/{} loaded",
                self.loaded_count(),
                AssetId::ALL.len()
            );
        }
    }

    /// Every asset has either loaded or failed
    pub fn all_attempted(&self) -> bool {
        self.states.iter().all(|s| *s != LoadState::Pending)
    }

    pub fn loaded_count(&self) -> usize {
        self.states
            .iter()
            .filter(|s| **s == LoadState::Loaded)
            .count()
    }
}

impl AssetReadiness for AssetStatus {
    fn is_ready(&self, asset: AssetId) -> bool {
        self.state(asset) == LoadState::Loaded
    }
}

/// No images at all; everything draws as placeholders
#[derive(Debug, Clone, Copy, Default)]
pub struct NoAssets;

impl AssetReadiness for NoAssets {
    fn is_ready(&self, _asset: AssetId) -> bool {
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_all_attempted_counts_failures() {
        let mut status = AssetStatus::new();
        assert!(!status.all_attempted());
        for (i, asset) in AssetId::ALL.into_iter().enumerate() {
            if i % 2 == 0 {
                status.mark_loaded(asset);
            } else {
                status.mark_failed(asset);
            }
        }
        assert!(status.all_attempted());
        assert_eq!(status.loaded_count(), 4);
        assert!(status.is_ready(AssetId::Background));
        assert!(!status.is_ready(AssetId::Drone));
    }

    #[test]
    fn test_target_assets() {
        assert_eq!(AssetId::for_target(TargetKind::Bus), AssetId::Bus);
        assert_eq!(AssetId::Car.path(), "Assets/car.png");
    }
}
