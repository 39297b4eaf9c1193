use crate::material::Material;
use crate::objects::aabb::AABB;
use crate::objects::hit::{HitRecord, Hitable};
use crate::{Ray, Vec3};
use rand::RngCore;
use std::f64::consts::PI;
use std::sync::Arc;

/// Spherical coordinates of a point on the unit sphere, mapped to [0,1]².
pub fn sphere_uv(p: Vec3) -> (f64, f64) {
    let theta = (-p.y).acos();
    let phi = (-p.z).atan2(p.x) + PI;
    (phi / (2. * PI), theta / PI)
}

pub struct Sphere {
    pub center: Vec3,
    pub radius: f64,
    pub material: Arc<dyn Material>,
}

fn hit_sphere(
    center: Vec3,
    radius: f64,
    r: &Ray,
    t_min: f64,
    t_max: f64,
    material: &Arc<dyn Material>,
) -> Option<HitRecord> {
    let oc = r.orig - center;
    let a = r.dir.squared_length();
    let half_b = oc * r.dir;
    let c = oc.squared_length() - radius * radius;
    let discriminant = half_b * half_b - a * c;
    // covers both the miss case and NaN from degenerate inputs
    if !(discriminant >= 0.) {
        return None;
    }
    let sqrt_d = discriminant.sqrt();

    // Find the nearest root that lies in the acceptable range.
    let in_range = |root: f64| root >= t_min && root <= t_max;
    let mut root = (-half_b - sqrt_d) / a;
    if !in_range(root) {
        root = (-half_b + sqrt_d) / a;
    }
    if !in_range(root) {
        return None;
    }

    let p = r.at(root);
    let outward_normal = (p - center) / radius;
    let uv = sphere_uv(outward_normal);
    Some(HitRecord::new(
        root,
        outward_normal,
        r,
        Arc::clone(material),
        uv,
    ))
}

impl Hitable for Sphere {
    fn hit(&self, r: &Ray, t_min: f64, t_max: f64, _rng: &mut dyn RngCore) -> Option<HitRecord> {
        hit_sphere(self.center, self.radius, r, t_min, t_max, &self.material)
    }

    fn bounding_box(&self) -> Option<AABB> {
        let rv = Vec3::new(self.radius.abs(), self.radius.abs(), self.radius.abs());
        Some(AABB::new(self.center - rv, self.center + rv))
    }
}

/// Sphere whose center moves linearly from `center0` at `time0` to
/// `center1` at `time1`; `ray.time` selects the sampled position.
pub struct MovingSphere {
    pub center0: Vec3,
    pub center1: Vec3,
    pub time0: f64,
    pub time1: f64,
    pub radius: f64,
    pub material: Arc<dyn Material>,
}

impl MovingSphere {
    pub fn center(&self, time: f64) -> Vec3 {
        self.center0
            + ((time - self.time0) / (self.time1 - self.time0)) * (self.center1 - self.center0)
    }
}

impl Hitable for MovingSphere {
    fn hit(&self, r: &Ray, t_min: f64, t_max: f64, _rng: &mut dyn RngCore) -> Option<HitRecord> {
        hit_sphere(
            self.center(r.time),
            self.radius,
            r,
            t_min,
            t_max,
            &self.material,
        )
    }

    /// Union of the boxes at both keyframes, bounding the full sweep.
    fn bounding_box(&self) -> Option<AABB> {
        let rv = Vec3::new(self.radius.abs(), self.radius.abs(), self.radius.abs());
        let c0 = self.center(self.time0);
        let c1 = self.center(self.time1);
        let box0 = AABB::new(c0 - rv, c0 + rv);
        let box1 = AABB::new(c1 - rv, c1 + rv);
        Some(box0.union(&box1))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::material::Lambertian;
    use crate::texture::SolidColor;
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    fn test_material() -> Arc<dyn Material> {
        Arc::new(Lambertian::new(SolidColor(Vec3::new(0.5, 0.5, 0.5))))
    }

    #[test]
    fn test_head_on_hit() {
        let s = Sphere {
            center: Vec3::new(0., 0., -1.),
            radius: 0.5,
            material: test_material(),
        };
        let r = Ray::new(Vec3::zero(), Vec3::new(0., 0., -1.), 0.);
        let mut rng = StdRng::seed_from_u64(0);
        let rec = s.hit(&r, 0., f64::INFINITY, &mut rng).unwrap();
        assert!((rec.t - 0.5).abs() < 1e-9);
        assert!((rec.p - Vec3::new(0., 0., -0.5)).length() < 1e-9);
        assert!((rec.normal - Vec3::new(0., 0., 1.)).length() < 1e-9);
        assert!(rec.front_face);
    }

    #[test]
    fn test_hit_point_on_surface() {
        let center = Vec3::new(1.5, -0.5, -4.);
        let s = Sphere {
            center,
            radius: 2.,
            material: test_material(),
        };
        // pad the box by an epsilon so surface hits stay inside under fp error
        let bounds = s.bounding_box().unwrap();
        let pad = Vec3::new(1e-6, 1e-6, 1e-6);
        let bounds = AABB::new(bounds.minimum - pad, bounds.maximum + pad);
        let mut rng = StdRng::seed_from_u64(3);
        let mut hits = 0;
        for _ in 0..1000 {
            let orig = Vec3::new(
                rng.gen_range(-10.0..10.0),
                rng.gen_range(-10.0..10.0),
                rng.gen_range(5.0..10.0),
            );
            let r = Ray::new(orig, (center - orig).unit(), 0.);
            if let Some(rec) = s.hit(&r, 0., f64::INFINITY, &mut rng) {
                hits += 1;
                assert!(((rec.p - center).length() - 2.).abs() < 1e-6);
                assert!(rec.normal * (rec.p - center) > 0.);
                assert!(rec.normal * r.dir <= 0.);
                assert!(bounds.contains(&rec.p));
            }
        }
        // rays aimed at the center always hit
        assert_eq!(hits, 1000);
    }

    #[test]
    fn test_inside_hit_flips_normal() {
        let s = Sphere {
            center: Vec3::zero(),
            radius: 1.,
            material: test_material(),
        };
        let r = Ray::new(Vec3::zero(), Vec3::new(1., 0., 0.), 0.);
        let mut rng = StdRng::seed_from_u64(0);
        let rec = s.hit(&r, 0., f64::INFINITY, &mut rng).unwrap();
        assert!(!rec.front_face);
        assert!(rec.normal * r.dir < 0.);
    }

    #[test]
    fn test_smaller_root_preferred() {
        let s = Sphere {
            center: Vec3::new(0., 0., -3.),
            radius: 1.,
            material: test_material(),
        };
        let r = Ray::new(Vec3::zero(), Vec3::new(0., 0., -1.), 0.);
        let mut rng = StdRng::seed_from_u64(0);
        let rec = s.hit(&r, 0., f64::INFINITY, &mut rng).unwrap();
        assert!((rec.t - 2.).abs() < 1e-9);
        // with the near root excluded, the far root is used
        let rec = s.hit(&r, 3., f64::INFINITY, &mut rng).unwrap();
        assert!((rec.t - 4.).abs() < 1e-9);
    }

    #[test]
    fn test_moving_sphere_interpolates() {
        let s = MovingSphere {
            center0: Vec3::new(0., 0., -2.),
            center1: Vec3::new(2., 0., -2.),
            time0: 0.,
            time1: 1.,
            radius: 0.5,
            material: test_material(),
        };
        let mut rng = StdRng::seed_from_u64(0);
        // at time 0 the sphere sits on the z axis, at time 1 it has moved away
        let r0 = Ray::new(Vec3::zero(), Vec3::new(0., 0., -1.), 0.);
        let r1 = Ray::new(Vec3::zero(), Vec3::new(0., 0., -1.), 1.);
        assert!(s.hit(&r0, 0., f64::INFINITY, &mut rng).is_some());
        assert!(s.hit(&r1, 0., f64::INFINITY, &mut rng).is_none());
        // the box covers both keyframe positions
        let bounds = s.bounding_box().unwrap();
        assert_eq!(bounds.minimum, Vec3::new(-0.5, -0.5, -2.5));
        assert_eq!(bounds.maximum, Vec3::new(2.5, 0.5, -1.5));
    }

    #[test]
    fn test_sphere_uv_poles() {
        let (_, v_bottom) = sphere_uv(Vec3::new(0., -1., 0.));
        let (_, v_top) = sphere_uv(Vec3::new(0., 1., 0.));
        assert!(v_bottom.abs() < 1e-9);
        assert!((v_top - 1.).abs() < 1e-9);
    }
}
