//! Bounded memo table for pure functions of a point pair
//!
//! Entries are keyed by the exact bit patterns of both points. Once the table
//! is full, the oldest inserted entry is evicted first.

use std::collections::{HashMap, VecDeque};

use crate::Point;

type PairKey = [u64; 4];

fn pair_key(a: Point, b: Point) -> PairKey {
    [a.x.to_bits(), a.y.to_bits(), b.x.to_bits(), b.y.to_bits()]
}

#[derive(Debug, Clone, Default)]
pub struct PairMemo {
    capacity: usize,
    order: VecDeque<PairKey>,
    values: HashMap<PairKey, f64>,
}

impl PairMemo {
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity,
            order: VecDeque::with_capacity(capacity),
            values: HashMap::with_capacity(capacity),
        }
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn contains(&self, a: Point, b: Point) -> bool {
        self.values.contains_key(&pair_key(a, b))
    }

    /// Return the memoized value for `(a, b)`, computing and storing it on a miss
    pub fn get_or_insert_with(&mut self, a: Point, b: Point, f: impl FnOnce(Point, Point) -> f64) -> f64 {
        let key = pair_key(a, b);
        if let Some(&value) = self.values.get(&key) {
            return value;
        }

        let value = f(a, b);
        if self.capacity == 0 {
            return value;
        }

        self.values.insert(key, value);
        self.order.push_back(key);
        while self.order.len() > self.capacity {
            if let Some(oldest) = self.order.pop_front() {
                self.values.remove(&oldest);
            }
        }
        value
    }
}
