use crate::{Ray, Vec3};
use std::mem::swap;

/// Axis-aligned bounding box. `EMPTY` (min = +inf, max = -inf) is the
/// identity under `union`, so folds over collections need no special case.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct AABB {
    pub minimum: Vec3,
    pub maximum: Vec3,
}

impl AABB {
    pub const EMPTY: AABB = AABB {
        minimum: Vec3 {
            x: f64::INFINITY,
            y: f64::INFINITY,
            z: f64::INFINITY,
        },
        maximum: Vec3 {
            x: f64::NEG_INFINITY,
            y: f64::NEG_INFINITY,
            z: f64::NEG_INFINITY,
        },
    };

    pub fn new(minimum: Vec3, maximum: Vec3) -> Self {
        Self { minimum, maximum }
    }

    pub fn is_empty(&self) -> bool {
        self.minimum.x > self.maximum.x
            || self.minimum.y > self.maximum.y
            || self.minimum.z > self.maximum.z
    }

    pub fn diagonal(&self) -> Vec3 {
        self.maximum - self.minimum
    }

    /// Index of the coordinate axis with the largest extent.
    pub fn longest_axis(&self) -> usize {
        let d = self.diagonal();
        let mut axis = 0;
        if d.y > d[axis] {
            axis = 1;
        }
        if d.z > d[axis] {
            axis = 2;
        }
        axis
    }

    pub fn union(&self, other: &AABB) -> AABB {
        AABB::new(
            Vec3::new(
                self.minimum.x.min(other.minimum.x),
                self.minimum.y.min(other.minimum.y),
                self.minimum.z.min(other.minimum.z),
            ),
            Vec3::new(
                self.maximum.x.max(other.maximum.x),
                self.maximum.y.max(other.maximum.y),
                self.maximum.z.max(other.maximum.z),
            ),
        )
    }

    pub fn contains(&self, p: &Vec3) -> bool {
        (p.x >= self.minimum.x && p.x <= self.maximum.x)
            && (p.y >= self.minimum.y && p.y <= self.maximum.y)
            && (p.z >= self.minimum.z && p.z <= self.maximum.z)
    }

    /// Slab test: whether the ray crosses the box within `[t_min, t_max]`.
    pub fn hit(&self, r: &Ray, t_min: f64, t_max: f64) -> bool {
        let mut min = t_min;
        let mut max = t_max;
        for a in 0..3 {
            let inv_d = 1.0 / r.dir[a];
            let mut t0 = (self.minimum[a] - r.orig[a]) * inv_d;
            let mut t1 = (self.maximum[a] - r.orig[a]) * inv_d;
            if inv_d < 0.0 {
                swap(&mut t0, &mut t1);
            }
            min = min.max(t0);
            max = max.min(t1);
            if max <= min {
                return false;
            }
        }
        true
    }
}
