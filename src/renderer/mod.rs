//! Rendering support
//!
//! The simulation never calls into rendering. Renderers read a [`GameState`]
//! and turn it into [`DrawCmd`]s, using sprites when their asset is ready and
//! placeholder shapes otherwise.
//!
//! [`GameState`]: crate::sim::GameState

pub mod assets;
pub mod shapes;
pub mod vertex;

pub use assets::{AssetId, AssetReadiness, AssetStatus, LoadState, NoAssets};
pub use shapes::{DrawCmd, build_frame, instances};
pub use vertex::{QuadInstance, ShapeKind};
