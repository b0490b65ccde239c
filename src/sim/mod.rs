//! Path geometry and motion
//!
//! Everything that moves lives here. This module is pure:
//! - No rendering or platform dependencies
//! - Time comes in as explicit millisecond deltas
//! - Stable iteration order (ball list order)

pub mod ball;
pub mod collision;
pub mod demo;
pub mod memo;
pub mod path;
pub mod scene;

pub use ball::{Ball, BallColor, Direction, Motion};
pub use collision::{Collision, balls_touch, resolve_impacts};
pub use memo::PairMemo;
pub use path::{Path, Resolution, SegmentPosition, cyclic_index};
pub use scene::{
    BallSnapshot, Scene, SceneConfig, SceneSnapshot, frequency_for, validate_path,
};
