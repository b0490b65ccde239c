//! Draw Path - draw curves, watch balls run along them
//!
//! Core modules:
//! - `sim`: Path geometry, ball kinematics and the scene update loop
//! - `renderer`: Canvas 2D drawing and ghost trail sampling
//! - `view`: Grid <-> screen coordinate transform
//! - `settings`: Tunables persisted in LocalStorage
//! - `error`: Error types shared by the core

pub mod error;
pub mod renderer;
pub mod settings;
pub mod sim;
pub mod view;

pub use error::{PathError, PathRejection};
pub use settings::Settings;

use glam::DVec2;

/// A point in grid space
pub type Point = DVec2;

/// Configuration constants
pub mod consts {
    /// Minimum length of a closed path (open paths need half of it)
    pub const LENGTH_MIN: f64 = 5.0;
    /// Minimum size/length ratio for a drawn path
    pub const RATIO_MIN: f64 = 0.2;

    /// A pointer sample this close to the before-last point moves the last point
    pub const MERGE_DISTANCE: f64 = 0.5;
    /// First and last points this close turn the stroke into a loop
    pub const CLOSE_DISTANCE: f64 = 0.5;

    /// Milliseconds per second (ball speeds are per second, ticks are in ms)
    pub const MS_PER_SECOND: f64 = 1000.0;
    /// Longest frame fed to the scene (tab switches stall animation frames)
    pub const MAX_FRAME_MS: f64 = 100.0;

    /// Ghost trail defaults
    pub const GHOST_COUNT: usize = 10;
    pub const GHOST_STEP_MS: f64 = 50.0;

    /// Pixels per grid unit at zoom 1
    pub const DEFAULT_TILE_SIZE: f64 = 32.0;

    /// Capacity of the pairwise distance memo kept by each path
    pub const DISTANCE_MEMO_CAPACITY: usize = 1000;
}

/// Euclidean distance between two points
#[inline]
pub fn distance(a: Point, b: Point) -> f64 {
    a.distance(b)
}

/// Largest value of a set, `None` when empty.
///
/// NaN entries never win against a number.
pub fn max_of<I: IntoIterator<Item = f64>>(values: I) -> Option<f64> {
    values.into_iter().fold(None, |best, v| match best {
        Some(b) if b >= v || v.is_nan() => Some(b),
        _ => Some(v),
    })
}
