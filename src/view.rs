//! Camera mapping between grid space (where paths live) and canvas pixels

use serde::{Deserialize, Serialize};

use crate::Point;
use crate::consts::DEFAULT_TILE_SIZE;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct View {
    /// Grid coordinates of the canvas' top-left corner
    pub camera: Point,
    pub zoom: f64,
    pub default_tile_size: f64,
    pub width: u32,
    pub height: u32,
}

impl Default for View {
    fn default() -> Self {
        Self {
            camera: Point::ZERO,
            zoom: 1.0,
            default_tile_size: DEFAULT_TILE_SIZE,
            width: 1200,
            height: 800,
        }
    }
}

impl View {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            ..Default::default()
        }
    }

    /// Pixels per grid unit
    #[inline]
    pub fn tile_size(&self) -> f64 {
        self.default_tile_size * self.zoom
    }

    pub fn screen_coordinates(&self, grid: Point) -> Point {
        (grid - self.camera) * self.tile_size()
    }

    pub fn grid_coordinates(&self, screen: Point) -> Point {
        screen / self.tile_size() + self.camera
    }

    /// Visible grid area as (width, height)
    pub fn grid_extent(&self) -> Point {
        Point::new(self.width as f64, self.height as f64) / self.tile_size()
    }
}
