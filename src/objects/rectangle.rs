use crate::material::Material;
use crate::objects::aabb::AABB;
use crate::objects::hit::{HitRecord, Hitable};
use crate::{Ray, Vec3};
use rand::RngCore;
use std::sync::Arc;

/// Coordinate plane a rect lies on. The in-plane axes are ordered so that
/// `(u, v, fixed)` follows the plane name, e.g. ZX maps u to z and v to x.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum RectPlane {
    XY,
    YZ,
    ZX,
}

impl RectPlane {
    /// (first in-plane axis, second in-plane axis, fixed axis)
    fn axes(&self) -> (usize, usize, usize) {
        match self {
            RectPlane::XY => (0, 1, 2),
            RectPlane::YZ => (1, 2, 0),
            RectPlane::ZX => (2, 0, 1),
        }
    }
}

/// Rectangle on one of the three coordinate planes at `value` along the
/// fixed axis. `negative_normal` flips the normal to the negative side of
/// that axis, used for the inward-facing pair of box faces.
pub struct AxisAlignedRect {
    pub plane: RectPlane,
    pub min: (f64, f64),
    pub max: (f64, f64),
    pub value: f64,
    pub negative_normal: bool,
    pub material: Arc<dyn Material>,
}

impl AxisAlignedRect {
    pub fn new(
        plane: RectPlane,
        min: (f64, f64),
        max: (f64, f64),
        value: f64,
        negative_normal: bool,
        material: Arc<dyn Material>,
    ) -> Self {
        Self {
            plane,
            min,
            max,
            value,
            negative_normal,
            material,
        }
    }

    fn outward_normal(&self) -> Vec3 {
        let (_, _, k) = self.plane.axes();
        let mut n = Vec3::zero();
        match k {
            0 => n.x = 1.,
            1 => n.y = 1.,
            _ => n.z = 1.,
        }
        if self.negative_normal {
            -n
        } else {
            n
        }
    }
}

impl Hitable for AxisAlignedRect {
    fn hit(&self, r: &Ray, t_min: f64, t_max: f64, _rng: &mut dyn RngCore) -> Option<HitRecord> {
        let (a1, a2, k) = self.plane.axes();
        let t = (self.value - r.orig[k]) / r.dir[k];
        // NaN t means the ray is parallel to the plane
        if t.is_nan() || t < t_min || t > t_max {
            return None;
        }
        let p = r.at(t);
        let (p1, p2) = (p[a1], p[a2]);
        if p1 < self.min.0 || p1 > self.max.0 || p2 < self.min.1 || p2 > self.max.1 {
            return None;
        }
        let uv = (
            (p1 - self.min.0) / (self.max.0 - self.min.0),
            (p2 - self.min.1) / (self.max.1 - self.min.1),
        );
        Some(HitRecord::new(
            t,
            self.outward_normal(),
            r,
            Arc::clone(&self.material),
            uv,
        ))
    }

    /// The rect is inflated along its fixed axis (on the side away from the
    /// normal) so the BVH slab test sees a box with volume.
    fn bounding_box(&self) -> Option<AABB> {
        const BIAS: f64 = 1e-4;
        let (a1, a2, k) = self.plane.axes();
        let mut minimum = Vec3::zero();
        let mut maximum = Vec3::zero();
        let set = |v: &mut Vec3, axis: usize, value: f64| match axis {
            0 => v.x = value,
            1 => v.y = value,
            _ => v.z = value,
        };
        set(&mut minimum, a1, self.min.0);
        set(&mut minimum, a2, self.min.1);
        set(&mut maximum, a1, self.max.0);
        set(&mut maximum, a2, self.max.1);
        if self.negative_normal {
            set(&mut minimum, k, self.value);
            set(&mut maximum, k, self.value + BIAS);
        } else {
            set(&mut minimum, k, self.value - BIAS);
            set(&mut maximum, k, self.value);
        }
        Some(AABB::new(minimum, maximum))
    }
}
