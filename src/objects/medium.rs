use crate::material::Material;
use crate::objects::aabb::AABB;
use crate::objects::hit::{HitRecord, Hitable};
use crate::{Ray, Vec3};
use rand::{Rng, RngCore};
use std::sync::Arc;

/// Constant-density participating medium (fog, smoke). A ray entering the
/// boundary scatters after an exponentially distributed free path; if the
/// drawn path outruns the boundary segment the ray passes through untouched.
pub struct ConstantMedium {
    pub boundary: Arc<dyn Hitable>,
    pub phase_function: Arc<dyn Material>,
    neg_inv_density: f64,
}

impl ConstantMedium {
    pub fn new(density: f64, boundary: Arc<dyn Hitable>, phase_function: Arc<dyn Material>) -> Self {
        Self {
            boundary,
            phase_function,
            neg_inv_density: -1. / density,
        }
    }
}

impl Hitable for ConstantMedium {
    fn hit(&self, r: &Ray, t_min: f64, t_max: f64, rng: &mut dyn RngCore) -> Option<HitRecord> {
        // entry and exit through the boundary over the whole ray
        let rec1 = self
            .boundary
            .hit(r, f64::NEG_INFINITY, f64::INFINITY, rng)?;
        let rec2 = self.boundary.hit(r, rec1.t + 1e-4, f64::INFINITY, rng)?;

        let mut t1 = rec1.t.max(t_min);
        let t2 = rec2.t.min(t_max);
        if t1 >= t2 {
            return None;
        }
        t1 = t1.max(0.);

        let ray_length = r.dir.length();
        let distance_inside_boundary = (t2 - t1) * ray_length;
        let hit_distance = self.neg_inv_density * rng.gen::<f64>().ln();
        if hit_distance > distance_inside_boundary {
            return None;
        }

        let t = t1 + hit_distance / ray_length;
        // a volume has no surface orientation: both are arbitrary draws
        Some(HitRecord {
            p: r.at(t),
            normal: Vec3::random_unit_vector(rng),
            t,
            uv: (0., 0.),
            front_face: rng.gen::<f64>() > 0.5,
            mat: Arc::clone(&self.phase_function),
        })
    }

    fn bounding_box(&self) -> Option<AABB> {
        self.boundary.bounding_box()
    }
}
