//! Seeded stroke generator for headless runs
//!
//! Produces pointer samples that look like hand-drawn strokes: wobbly loops
//! that end on their start point, and meandering open lines.

use std::f64::consts::TAU;

use rand::Rng;

use crate::Point;

/// Samples per loop stroke
const LOOP_SAMPLES: usize = 48;
/// Samples per open stroke
const LINE_SAMPLES: usize = 24;

/// Wobbly ellipse around `center`, last sample equal to the first
pub fn loop_stroke<R: Rng>(rng: &mut R, center: Point) -> Vec<Point> {
    let rx = rng.random_range(3.0..8.0);
    let ry = rng.random_range(3.0..8.0);
    let phase = rng.random_range(0.0..TAU);

    let mut points: Vec<Point> = (0..LOOP_SAMPLES)
        .map(|i| {
            let theta = phase + TAU * i as f64 / LOOP_SAMPLES as f64;
            let wobble = 1.0 + rng.random_range(-0.05..0.05);
            center + Point::new(rx * theta.cos(), ry * theta.sin()) * wobble
        })
        .collect();
    if let Some(&first) = points.first() {
        points.push(first);
    }
    points
}

/// Meandering open line starting at `start`
pub fn line_stroke<R: Rng>(rng: &mut R, start: Point) -> Vec<Point> {
    let mut heading = rng.random_range(0.0..TAU);
    let mut at = start;
    let mut points = Vec::with_capacity(LINE_SAMPLES);
    points.push(at);
    for _ in 1..LINE_SAMPLES {
        heading += rng.random_range(-0.4..0.4);
        let step = rng.random_range(0.6..1.4);
        at += Point::new(heading.cos(), heading.sin()) * step;
        points.push(at);
    }
    points
}

/// Either kind of stroke somewhere inside `[0, width) x [0, height)`
pub fn random_stroke<R: Rng>(rng: &mut R, width: f64, height: f64) -> Vec<Point> {
    let anchor = Point::new(
        rng.random_range(0.0..width),
        rng.random_range(0.0..height),
    );
    if rng.random_bool(0.5) {
        loop_stroke(rng, anchor)
    } else {
        line_stroke(rng, anchor)
    }
}
