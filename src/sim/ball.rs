//! Balls travelling back and forth along a path

use std::rc::Rc;

use serde::{Deserialize, Serialize};

use super::path::Path;
use crate::Point;
use crate::consts::MS_PER_SECOND;

/// Travel direction along the path's arclength
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum Direction {
    #[default]
    Forward,
    Backward,
}

impl Direction {
    #[inline]
    pub fn sign(self) -> f64 {
        match self {
            Direction::Forward => 1.0,
            Direction::Backward => -1.0,
        }
    }

    #[inline]
    pub fn flipped(self) -> Self {
        match self {
            Direction::Forward => Direction::Backward,
            Direction::Backward => Direction::Forward,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BallColor {
    Red,
    Blue,
}

impl BallColor {
    /// CSS color name
    pub fn as_str(&self) -> &'static str {
        match self {
            BallColor::Red => "red",
            BallColor::Blue => "blue",
        }
    }
}

/// Kinematic state of a ball at some time offset
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Motion {
    pub position: Point,
    pub distance: f64,
    pub direction: Direction,
}

#[derive(Debug, Clone)]
pub struct Ball {
    path: Rc<Path>,
    /// Arclength units per second
    absolute_speed: f64,
    pub radius: f64,
    pub color: BallColor,
    direction: Direction,
    distance: f64,
    position: Point,
}

impl Ball {
    /// Put a ball at the start of `path`.
    ///
    /// `frequency` is the number of path lengths covered per second, `size`
    /// scales the radius (`size / 10`).
    pub fn new(path: Rc<Path>, frequency: f64, size: f64, color: BallColor) -> Self {
        let position = path.coordinates_at(0.0);
        let mut ball = Self {
            path,
            absolute_speed: 0.0,
            radius: size / 10.0,
            color,
            direction: Direction::Forward,
            distance: 0.0,
            position,
        };
        ball.set_speed(frequency);
        ball
    }

    pub fn path(&self) -> &Rc<Path> {
        &self.path
    }

    pub fn absolute_speed(&self) -> f64 {
        self.absolute_speed
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    pub fn distance(&self) -> f64 {
        self.distance
    }

    pub fn position(&self) -> Point {
        self.position
    }

    pub fn set_speed(&mut self, frequency: f64) {
        self.absolute_speed = frequency * self.path.length();
    }

    /// Instantaneous velocity along the path's forward direction
    pub fn speed_vector(&self) -> Point {
        self.path.tangent_at(self.distance) * self.absolute_speed
    }

    /// Where the ball would be `dt` milliseconds from now, without moving it.
    ///
    /// Negative `dt` looks into the past (ghost trail).
    pub fn sample(&self, dt: f64) -> Motion {
        let travel = dt * self.absolute_speed / MS_PER_SECOND;
        let resolution = self
            .path
            .resolve(self.distance + travel * self.direction.sign());

        let direction = if resolution.reversed {
            self.direction.flipped()
        } else {
            self.direction
        };

        Motion {
            position: self.path.coordinates_at(resolution.distance),
            distance: resolution.distance,
            direction,
        }
    }

    /// Move the ball forward by `dt` milliseconds
    pub fn advance(&mut self, dt: f64) {
        let Motion {
            position,
            distance,
            direction,
        } = self.sample(dt);
        self.direction = direction;
        self.distance = distance;
        self.position = position;
    }
}
