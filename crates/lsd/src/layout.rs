//! Layout of level schemes.
//!
//! Layout turns a [`LevelScheme`](lsd_core::scheme::LevelScheme) into
//! positions in data space: a display y for every level and a lane x for
//! every transition.
//!
//! - [`regions`] finds clusters of levels that sit too close together and
//!   the interval each cluster is spread over.
//! - [`space`] owns the per-diagram occupancy grid: it hands out spaced
//!   level positions and routes transitions through free lanes.
//! - [`SchemeLayout`] drives both for a whole scheme.

pub mod regions;
pub mod space;

mod scheme;

pub use regions::{Region, normalize_regions};
pub use scheme::{PositionedLevel, RoutedTransition, SchemeLayout};
pub use space::SpaceManager;

use thiserror::Error;

use lsd_core::scheme::EnergyKey;

/// Errors raised while laying out a scheme.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum LayoutError {
    #[error("at least one lane is required")]
    NoLanes,

    #[error("lane position must be a finite number, got {0}")]
    InvalidLane(f32),

    #[error("level energy must be a finite number, got {0}")]
    NonFiniteEnergy(f32),

    #[error("no level with energy {0} was registered")]
    UnknownLevel(EnergyKey),
}
