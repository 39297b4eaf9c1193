use crate::objects::aabb::AABB;
use crate::objects::hit::{HitRecord, Hitable, HittableList};
use crate::Ray;
use rand::RngCore;
use std::sync::Arc;

/// Fraction of the split axis extent forming the overlap band around the
/// midpoint; straddlers stay at the node instead of being duplicated.
const BAND_RATIO: f64 = 0.1;

/// Binary BVH node built once by `build` and read-only afterwards. Unlike a
/// strict median-split tree, a node may hold a local aggregate of items that
/// straddle the split band in addition to its two children.
pub struct BvhNode {
    left: Option<Box<BvhNode>>,
    right: Option<Box<BvhNode>>,
    objects: Option<HittableList>,
    bounds: Option<AABB>,
}

impl BvhNode {
    /// Recursion stops into a plain leaf when the depth budget runs out,
    /// a single item remains, or any item has no finite bounding box (the
    /// node then degrades to an unbounded leaf instead of failing).
    pub fn build(items: Vec<Arc<dyn Hitable>>, max_depth: u32) -> Self {
        let list = HittableList::from(items);
        let bounds = list.bounding_box();
        let bbox = match bounds {
            Some(b) if max_depth > 0 && list.len() > 1 => b,
            _ => {
                return Self {
                    left: None,
                    right: None,
                    objects: Some(list),
                    bounds,
                }
            }
        };

        let axis = bbox.longest_axis();
        let max_dim = bbox.diagonal()[axis];
        let mid = (bbox.minimum[axis] + bbox.maximum[axis]) * 0.5;
        let band = BAND_RATIO * max_dim;
        let left_limit = mid - band;
        let right_limit = mid + band;

        let mut left_items: Vec<Arc<dyn Hitable>> = vec![];
        let mut right_items: Vec<Arc<dyn Hitable>> = vec![];
        let mut retained: Vec<Arc<dyn Hitable>> = vec![];
        for object in list.objects {
            // the aggregate box was finite, so each member box is too
            let b = match object.bounding_box() {
                Some(b) => b,
                None => {
                    retained.push(object);
                    continue;
                }
            };
            if b.minimum[axis] >= left_limit {
                right_items.push(object);
            } else if b.maximum[axis] <= right_limit {
                left_items.push(object);
            } else {
                retained.push(object);
            }
        }

        let child = |items: Vec<Arc<dyn Hitable>>| {
            if items.is_empty() {
                None
            } else {
                Some(Box::new(Self::build(items, max_depth - 1)))
            }
        };
        Self {
            left: child(left_items),
            right: child(right_items),
            objects: if retained.is_empty() {
                None
            } else {
                Some(HittableList::from(retained))
            },
            bounds: Some(bbox),
        }
    }
}

impl Hitable for BvhNode {
    /// Local aggregate first, then left, then right; not nearest-first
    /// across subtrees, but every branch re-tests against the shrinking
    /// closest `t`, so the closest hit always wins.
    fn hit(&self, r: &Ray, t_min: f64, t_max: f64, rng: &mut dyn RngCore) -> Option<HitRecord> {
        if let Some(bounds) = &self.bounds {
            if !bounds.hit(r, t_min, t_max) {
                return None;
            }
        }
        let mut closest_so_far = t_max;
        let mut res = None;
        if let Some(objects) = &self.objects {
            if let Some(rec) = objects.hit(r, t_min, closest_so_far, rng) {
                closest_so_far = rec.t;
                res = Some(rec);
            }
        }
        if let Some(left) = &self.left {
            if let Some(rec) = left.hit(r, t_min, closest_so_far, rng) {
                closest_so_far = rec.t;
                res = Some(rec);
            }
        }
        if let Some(right) = &self.right {
            if let Some(rec) = right.hit(r, t_min, closest_so_far, rng) {
                res = Some(rec);
            }
        }
        res
    }

    fn bounding_box(&self) -> Option<AABB> {
        self.bounds
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::material::Lambertian;
    use crate::objects::sphere::Sphere;
    use crate::texture::SolidColor;
    use crate::Vec3;
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    fn random_spheres(rng: &mut StdRng, n: usize) -> Vec<Arc<dyn Hitable>> {
        let mat = Arc::new(Lambertian::new(SolidColor(Vec3::new(0.5, 0.5, 0.5))));
        (0..n)
            .map(|_| {
                Arc::new(Sphere {
                    center: Vec3::new(
                        rng.gen_range(-20.0..20.0),
                        rng.gen_range(-20.0..20.0),
                        rng.gen_range(-20.0..20.0),
                    ),
                    radius: rng.gen_range(0.1..3.0),
                    material: mat.clone(),
                }) as Arc<dyn Hitable>
            })
            .collect()
    }

    #[test]
    fn test_matches_brute_force() {
        let mut rng = StdRng::seed_from_u64(2021);
        let objects = random_spheres(&mut rng, 60);
        let brute = HittableList::from(objects.clone());
        let bvh = BvhNode::build(objects, 8);
        for _ in 0..1000 {
            let orig = Vec3::new(
                rng.gen_range(-40.0..40.0),
                rng.gen_range(-40.0..40.0),
                rng.gen_range(-40.0..40.0),
            );
            let dir = Vec3::random_unit_vector(&mut rng);
            let r = Ray::new(orig, dir, 0.);
            let expected = brute.hit(&r, 0., f64::INFINITY, &mut rng);
            let actual = bvh.hit(&r, 0., f64::INFINITY, &mut rng);
            match (expected, actual) {
                (None, None) => {}
                (Some(a), Some(b)) => {
                    assert!((a.t - b.t).abs() < 1e-9);
                    assert!((a.p - b.p).length() < 1e-9);
                }
                (a, b) => panic!(
                    "bvh/brute-force disagree: {:?} vs {:?}",
                    a.map(|r| r.t),
                    b.map(|r| r.t)
                ),
            }
        }
    }

    #[test]
    fn test_bounds_cover_members() {
        let mut rng = StdRng::seed_from_u64(5);
        let objects = random_spheres(&mut rng, 30);
        let expected = HittableList::from(objects.clone()).bounding_box().unwrap();
        let bvh = BvhNode::build(objects, 8);
        assert_eq!(bvh.bounding_box().unwrap(), expected);
    }

    #[test]
    fn test_depth_zero_is_leaf() {
        let mut rng = StdRng::seed_from_u64(6);
        let objects = random_spheres(&mut rng, 10);
        let bvh = BvhNode::build(objects, 0);
        assert!(bvh.left.is_none());
        assert!(bvh.right.is_none());
        assert_eq!(bvh.objects.as_ref().unwrap().len(), 10);
    }

    #[test]
    fn test_unbounded_item_degrades_to_unbounded_leaf() {
        struct Everywhere;
        impl Hitable for Everywhere {
            fn hit(
                &self,
                r: &Ray,
                t_min: f64,
                _t_max: f64,
                _rng: &mut dyn RngCore,
            ) -> Option<HitRecord> {
                let mat: Arc<dyn crate::material::Material> =
                    Arc::new(Lambertian::new(SolidColor(Vec3::ones())));
                Some(HitRecord::new(
                    t_min.max(1.),
                    -r.dir,
                    r,
                    mat,
                    (0., 0.),
                ))
            }
            fn bounding_box(&self) -> Option<AABB> {
                None
            }
        }

        let mut rng = StdRng::seed_from_u64(7);
        let mut objects = random_spheres(&mut rng, 4);
        objects.push(Arc::new(Everywhere));
        let bvh = BvhNode::build(objects, 8);
        assert!(bvh.bounding_box().is_none());
        // an unbounded leaf still answers queries rather than crashing
        let r = Ray::new(Vec3::new(1000., 1000., 1000.), Vec3::new(1., 0., 0.), 0.);
        assert!(bvh.hit(&r, 0., f64::INFINITY, &mut rng).is_some());
    }

    #[test]
    fn test_single_item_is_leaf() {
        let mut rng = StdRng::seed_from_u64(8);
        let objects = random_spheres(&mut rng, 1);
        let bvh = BvhNode::build(objects, 8);
        assert!(bvh.left.is_none() && bvh.right.is_none());
        assert_eq!(bvh.objects.as_ref().unwrap().len(), 1);
    }
}
