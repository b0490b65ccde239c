//! Scene state: the stroke being drawn, live balls, and the per-frame update
//!
//! Drawing flow:
//! - `start_drawing` opens an empty sketch
//! - `draw_to` feeds pointer samples (grid space) into the sketch
//! - `end_drawing` validates the sketch and, if it passes, puts a ball on it

use std::rc::Rc;

use glam::DVec2;
use serde::{Deserialize, Serialize};

use super::ball::{Ball, BallColor, Direction};
use super::collision::{Collision, resolve_impacts};
use super::path::Path;
use crate::consts::*;
use crate::error::{PathError, PathRejection};
use crate::{Point, distance};

/// Drawing and validation thresholds
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SceneConfig {
    /// Minimum length of a closed path, open paths need half of it
    pub length_min: f64,
    pub ratio_min: f64,
    pub merge_distance: f64,
    pub close_distance: f64,
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self {
            length_min: LENGTH_MIN,
            ratio_min: RATIO_MIN,
            merge_distance: MERGE_DISTANCE,
            close_distance: CLOSE_DISTANCE,
        }
    }
}

/// Oscillation frequency (path lengths per second) shared by all balls.
///
/// Grows with the ball count, so every new ball speeds the others up.
#[inline]
pub fn frequency_for(ball_count: usize) -> f64 {
    (ball_count as f64 / 2.0 + 1.0) / 5.0
}

/// Check that a drawn path can host a ball
pub fn validate_path(path: &Path, config: &SceneConfig) -> Result<(), PathRejection> {
    if path.len() < 2 {
        return Err(PathRejection::TooFewPoints { count: path.len() });
    }

    let min = if path.is_closed() {
        config.length_min
    } else {
        config.length_min / 2.0
    };
    let length = path.length();
    if length.is_nan() || length < min {
        return Err(PathRejection::TooShort { length, min });
    }

    let ratio = path.ratio();
    if ratio.is_nan() || ratio < config.ratio_min {
        return Err(PathRejection::TooThin {
            ratio,
            min: config.ratio_min,
        });
    }

    Ok(())
}

/// Serializable view of one ball
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BallSnapshot {
    pub position: DVec2,
    pub radius: f64,
    pub color: BallColor,
    pub distance: f64,
    pub direction: Direction,
    pub closed_path: bool,
}

/// Serializable view of the scene
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SceneSnapshot {
    pub clock_ms: f64,
    pub frequency: f64,
    pub period_ms: f64,
    pub balls: Vec<BallSnapshot>,
}

#[derive(Debug, Clone, Default)]
pub struct Scene {
    pub config: SceneConfig,
    balls: Vec<Ball>,
    /// Stroke being drawn
    sketch: Option<Path>,
    /// Last finished stroke, kept for display
    last_path: Option<Rc<Path>>,
    /// Milliseconds of simulated time
    clock_ms: f64,
}

impl Scene {
    pub fn new(config: SceneConfig) -> Self {
        Self {
            config,
            ..Default::default()
        }
    }

    pub fn balls(&self) -> &[Ball] {
        &self.balls
    }

    pub fn clock_ms(&self) -> f64 {
        self.clock_ms
    }

    pub fn frequency(&self) -> f64 {
        frequency_for(self.balls.len())
    }

    /// Milliseconds to cover one path length at the current frequency
    pub fn period(&self) -> f64 {
        MS_PER_SECOND / self.frequency()
    }

    pub fn is_drawing(&self) -> bool {
        self.sketch.is_some()
    }

    /// Path to display: the sketch while drawing, the last stroke otherwise
    pub fn current_path(&self) -> Option<&Path> {
        self.sketch.as_ref().or(self.last_path.as_deref())
    }

    pub fn start_drawing(&mut self) {
        if self.sketch.is_none() {
            log::debug!("Drawing started");
            self.sketch = Some(Path::default());
        }
    }

    /// Feed a pointer sample into the sketch.
    ///
    /// A sample close to the before-last point drags the last point instead of
    /// adding one. Once the sketch has more than two points it is closed
    /// whenever its ends are close together.
    pub fn draw_to(&mut self, point: Point) -> Result<(), PathError> {
        let config = self.config;
        let Some(path) = self.sketch.as_mut() else {
            return Ok(());
        };
        if path.last() == Some(point) {
            return Ok(());
        }

        let n = path.len();
        let drag = n >= 2 && distance(path.points()[n - 2], point) < config.merge_distance;
        if drag {
            path.edit_point(n - 1, point)?;
        } else {
            path.add_point(point);
        }

        if path.len() > 2 {
            if let (Some(first), Some(last)) = (path.first(), path.last()) {
                let closed = distance(first, last) < config.close_distance;
                if closed != path.is_closed() {
                    log::debug!("Sketch {}", if closed { "closed" } else { "opened" });
                }
                path.set_closed(closed);
            }
        }
        Ok(())
    }

    /// Finish the sketch and try to put a ball on it.
    ///
    /// Ending without a sketch is reported as an empty path.
    pub fn end_drawing(&mut self) -> Result<(), PathRejection> {
        let path = Rc::new(self.sketch.take().unwrap_or_default());
        self.last_path = Some(Rc::clone(&path));
        self.add_path(path)
    }

    /// Validate `path` and add a ball running along it.
    ///
    /// Every ball is re-speeded afterwards since the frequency depends on
    /// the ball count.
    pub fn add_path(&mut self, path: Rc<Path>) -> Result<(), PathRejection> {
        if let Err(rejection) = validate_path(&path, &self.config) {
            log::info!("Path not valid: {rejection}");
            return Err(rejection);
        }

        let count = self.balls.len();
        let size = count as f64 / 5.0 + 1.0;
        let color = if count % 2 == 1 {
            BallColor::Red
        } else {
            BallColor::Blue
        };
        let ball = Ball::new(path, self.frequency(), size, color);
        log::info!(
            "Ball #{} ({}) on a {} path of length {:.2}",
            count + 1,
            color.as_str(),
            if ball.path().is_closed() { "closed" } else { "open" },
            ball.path().length()
        );
        self.push_ball(ball);
        Ok(())
    }

    /// Add a ball as-is and re-speed everything
    pub fn push_ball(&mut self, ball: Ball) {
        self.balls.push(ball);
        let frequency = self.frequency();
        for ball in &mut self.balls {
            ball.set_speed(frequency);
        }
    }

    /// Advance every ball by `dt` milliseconds, then remove colliding pairs.
    ///
    /// Returns the collisions in the order they were resolved.
    pub fn tick(&mut self, dt: f64) -> Vec<Collision> {
        self.clock_ms += dt;
        for ball in &mut self.balls {
            ball.advance(dt);
        }

        let collisions = resolve_impacts(&mut self.balls);
        for collision in &collisions {
            let at = collision.point();
            log::info!(
                "Impact at ({:.2}, {:.2}), {} ball(s) left",
                at.x,
                at.y,
                self.balls.len()
            );
        }
        collisions
    }

    pub fn snapshot(&self) -> SceneSnapshot {
        SceneSnapshot {
            clock_ms: self.clock_ms,
            frequency: self.frequency(),
            period_ms: self.period(),
            balls: self
                .balls
                .iter()
                .map(|ball| BallSnapshot {
                    position: ball.position(),
                    radius: ball.radius,
                    color: ball.color,
                    distance: ball.distance(),
                    direction: ball.direction(),
                    closed_path: ball.path().is_closed(),
                })
                .collect(),
        }
    }
}
