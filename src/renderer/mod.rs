//! Rendering feed
//!
//! Pure helpers that turn scene state into things to draw (ghost trails,
//! monitoring readout), plus the Canvas 2D backend on the web. Nothing here
//! mutates the scene.

#[cfg(target_arch = "wasm32")]
pub mod canvas;

#[cfg(target_arch = "wasm32")]
pub use canvas::CanvasRenderer;

use crate::Point;
use crate::consts::MS_PER_SECOND;
use crate::settings::GhostSettings;
use crate::sim::{Ball, BallColor};

/// Frames per FPS averaging window
const FPS_WINDOW: u64 = 100;

/// A faded copy of a ball at a past position
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GhostSample {
    pub position: Point,
    pub radius: f64,
    pub opacity: f64,
    pub color: BallColor,
}

/// Past positions of `ball`, most recent first.
///
/// Ghosts shrink and fade with age: the k-th one (0-based) has radius
/// `radius / (k + 2) * 1.5` and opacity `1 / (2k + 1)`.
pub fn ghost_trail(ball: &Ball, ghosts: &GhostSettings) -> Vec<GhostSample> {
    (0..ghosts.count)
        .map(|k| {
            let dt = -((k + 1) as f64) * ghosts.step_ms;
            let motion = ball.sample(dt);
            GhostSample {
                position: motion.position,
                radius: ball.radius / (k as f64 + 2.0) * 1.5,
                opacity: 1.0 / (2.0 * k as f64 + 1.0),
                color: ball.color,
            }
        })
        .collect()
}

/// Frame rate averaged over fixed windows of frames
#[derive(Debug, Clone, Default)]
pub struct FrameStats {
    frames: u64,
    durations: Vec<f64>,
    fps: f64,
}

impl FrameStats {
    /// Record one frame that took `dt` milliseconds
    pub fn record(&mut self, dt: f64) {
        self.frames += 1;
        if self.frames % FPS_WINDOW == 0 {
            if !self.durations.is_empty() {
                let avg = self.durations.iter().sum::<f64>() / self.durations.len() as f64;
                if avg > 0.0 {
                    self.fps = MS_PER_SECOND / avg;
                }
            }
            self.durations.clear();
        } else {
            self.durations.push(dt);
        }
    }

    pub fn frames(&self) -> u64 {
        self.frames
    }

    pub fn fps(&self) -> f64 {
        self.fps
    }
}

/// `mm:ss.t` clock readout
pub fn time_string(ms: f64) -> String {
    let tenths = (ms.max(0.0) / 100.0).floor() as u64;
    let minutes = tenths / 600;
    let seconds = (tenths / 10) % 60;
    format!("{:02}:{:02}.{}", minutes, seconds, tenths % 10)
}

/// Monitoring readout lines, top to bottom
pub fn monitoring_lines(clock_ms: f64, stats: &FrameStats, balls: usize, mouse: Point) -> Vec<String> {
    vec![
        format!("Time : {}", time_string(clock_ms)),
        format!("FPS : {:.1}", stats.fps()),
        format!("Balls : {balls}"),
        format!("Mouse : {:.2},{:.2}", mouse.x, mouse.y),
    ]
}
