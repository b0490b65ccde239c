//! Ball-ball impacts
//!
//! There is no collision response: two balls that touch are both removed.

use super::ball::Ball;
use crate::{Point, distance};

/// A pair of balls removed in the same impact
#[derive(Debug, Clone)]
pub struct Collision {
    pub first: Ball,
    pub second: Ball,
}

impl Collision {
    /// Midpoint between the two balls at impact
    pub fn point(&self) -> Point {
        (self.first.position() + self.second.position()) * 0.5
    }
}

/// Check whether two balls overlap or touch
#[inline]
pub fn balls_touch(a: &Ball, b: &Ball) -> bool {
    distance(a.position(), b.position()) <= a.radius + b.radius
}

/// Remove touching pairs from `balls`, returning them in removal order.
///
/// Pairs are scanned in list order and the first touching pair found is
/// removed right away, so in a pile-up of three or more balls the survivors
/// depend on list order.
pub fn resolve_impacts(balls: &mut Vec<Ball>) -> Vec<Collision> {
    let mut collisions = Vec::new();
    let mut i = 0;

    'scan: while i + 1 < balls.len() {
        for j in i + 1..balls.len() {
            if balls_touch(&balls[i], &balls[j]) {
                let second = balls.remove(j);
                let first = balls.remove(i);
                collisions.push(Collision { first, second });
                // Whatever shifted into slot `i` is scanned next
                continue 'scan;
            }
        }
        i += 1;
    }

    collisions
}
