use crate::material::Material;
use crate::objects::aabb::AABB;
use crate::objects::hit::{HitRecord, Hitable, HittableList};
use crate::objects::rectangle::{AxisAlignedRect, RectPlane};
use crate::{Ray, Vec3};
use rand::RngCore;
use std::sync::Arc;

/// Axis-aligned box assembled from six rects; the min-side faces carry
/// `negative_normal` so every face points outward.
pub struct Cube {
    pub box_min: Vec3,
    pub box_max: Vec3,
    sides: HittableList,
}

impl Cube {
    pub fn new(p0: Vec3, p1: Vec3, mat: Arc<dyn Material>) -> Self {
        let box_min = Vec3::new(p0.x.min(p1.x), p0.y.min(p1.y), p0.z.min(p1.z));
        let box_max = Vec3::new(p0.x.max(p1.x), p0.y.max(p1.y), p0.z.max(p1.z));
        let mut sides = HittableList::new();
        sides.add(Arc::new(AxisAlignedRect::new(
            RectPlane::XY,
            box_min.xy(),
            box_max.xy(),
            box_max.z,
            false,
            Arc::clone(&mat),
        )));
        sides.add(Arc::new(AxisAlignedRect::new(
            RectPlane::XY,
            box_min.xy(),
            box_max.xy(),
            box_min.z,
            true,
            Arc::clone(&mat),
        )));
        sides.add(Arc::new(AxisAlignedRect::new(
            RectPlane::YZ,
            box_min.yz(),
            box_max.yz(),
            box_max.x,
            false,
            Arc::clone(&mat),
        )));
        sides.add(Arc::new(AxisAlignedRect::new(
            RectPlane::YZ,
            box_min.yz(),
            box_max.yz(),
            box_min.x,
            true,
            Arc::clone(&mat),
        )));
        sides.add(Arc::new(AxisAlignedRect::new(
            RectPlane::ZX,
            (box_min.z, box_min.x),
            (box_max.z, box_max.x),
            box_max.y,
            false,
            Arc::clone(&mat),
        )));
        sides.add(Arc::new(AxisAlignedRect::new(
            RectPlane::ZX,
            (box_min.z, box_min.x),
            (box_max.z, box_max.x),
            box_min.y,
            true,
            mat,
        )));
        Self {
            box_min,
            box_max,
            sides,
        }
    }
}

impl Hitable for Cube {
    fn hit(&self, r: &Ray, t_min: f64, t_max: f64, rng: &mut dyn RngCore) -> Option<HitRecord> {
        self.sides.hit(r, t_min, t_max, rng)
    }

    fn bounding_box(&self) -> Option<AABB> {
        Some(AABB::new(self.box_min, self.box_max))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::material::Lambertian;
    use crate::texture::SolidColor;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn unit_cube() -> Cube {
        Cube::new(
            Vec3::new(-1., -1., -1.),
            Vec3::new(1., 1., 1.),
            Arc::new(Lambertian::new(SolidColor(Vec3::new(0.5, 0.5, 0.5)))),
        )
    }

    #[test]
    fn test_nearest_face_hit() {
        let cube = unit_cube();
        let mut rng = StdRng::seed_from_u64(0);
        let r = Ray::new(Vec3::new(0., 0., 5.), Vec3::new(0., 0., -1.), 0.);
        let rec = cube.hit(&r, 0., f64::INFINITY, &mut rng).unwrap();
        assert!((rec.t - 4.).abs() < 1e-9);
        assert_eq!(rec.normal, Vec3::new(0., 0., 1.));
        assert!(rec.front_face);
    }

    #[test]
    fn test_inside_hit_faces_inward() {
        let cube = unit_cube();
        let mut rng = StdRng::seed_from_u64(0);
        let r = Ray::new(Vec3::zero(), Vec3::new(1., 0., 0.), 0.);
        let rec = cube.hit(&r, 0., f64::INFINITY, &mut rng).unwrap();
        assert!((rec.t - 1.).abs() < 1e-9);
        assert!(!rec.front_face);
        assert!(rec.normal * r.dir < 0.);
    }

    #[test]
    fn test_min_face_normal() {
        let cube = unit_cube();
        let mut rng = StdRng::seed_from_u64(0);
        let r = Ray::new(Vec3::new(-5., 0., 0.), Vec3::new(1., 0., 0.), 0.);
        let rec = cube.hit(&r, 0., f64::INFINITY, &mut rng).unwrap();
        assert!((rec.t - 4.).abs() < 1e-9);
        assert!(rec.front_face);
        assert_eq!(rec.normal, Vec3::new(-1., 0., 0.));
    }

    #[test]
    fn test_bounding_box() {
        // corners may be given in any order
        let cube = Cube::new(
            Vec3::new(1., -1., 1.),
            Vec3::new(-1., 1., -1.),
            Arc::new(Lambertian::new(SolidColor(Vec3::new(0.5, 0.5, 0.5)))),
        );
        let bounds = cube.bounding_box().unwrap();
        assert_eq!(bounds.minimum, Vec3::new(-1., -1., -1.));
        assert_eq!(bounds.maximum, Vec3::new(1., 1., 1.));
    }
}
