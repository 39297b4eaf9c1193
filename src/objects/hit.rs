use crate::material::Material;
use crate::objects::aabb::AABB;
use crate::vec3::Vec3;
use crate::Ray;
use rand::RngCore;
use std::sync::Arc;

pub struct HitRecord {
    pub p: Vec3,
    pub normal: Vec3,
    pub t: f64,
    pub uv: (f64, f64),
    pub front_face: bool,
    pub mat: Arc<dyn Material>,
}

impl HitRecord {
    /// `front_face` derives from the un-flipped geometric normal; the stored
    /// normal is normalized and always opposes the incoming ray.
    pub fn new(
        t: f64,
        outward_normal: Vec3,
        r: &Ray,
        mat: Arc<dyn Material>,
        uv: (f64, f64),
    ) -> Self {
        let p = r.at(t);
        let front_face = r.dir * outward_normal < 0.;
        let normal = if front_face {
            outward_normal
        } else {
            -outward_normal
        };
        Self {
            p,
            normal: normal.normalized().unwrap_or(normal),
            t,
            uv,
            front_face,
            mat,
        }
    }

    pub fn set_face_normal(&mut self, r: &Ray, outward_normal: Vec3) {
        self.front_face = r.dir * outward_normal < 0.;
        let normal = if self.front_face {
            outward_normal
        } else {
            -outward_normal
        };
        self.normal = normal.normalized().unwrap_or(normal);
    }
}

pub trait Hitable: Send + Sync {
    fn hit(&self, r: &Ray, t_min: f64, t_max: f64, rng: &mut dyn RngCore) -> Option<HitRecord>;
    /// `None` only for genuinely unbounded geometry.
    fn bounding_box(&self) -> Option<AABB>;
}

/// Ordered collection of hittables with closest-hit scan semantics.
#[derive(Default)]
pub struct HittableList {
    pub objects: Vec<Arc<dyn Hitable>>,
}

impl HittableList {
    pub fn new() -> Self {
        Self { objects: vec![] }
    }

    pub fn from(objects: Vec<Arc<dyn Hitable>>) -> Self {
        Self { objects }
    }

    pub fn add(&mut self, object: Arc<dyn Hitable>) {
        self.objects.push(object);
    }

    pub fn clear(&mut self) {
        self.objects.clear();
    }

    pub fn len(&self) -> usize {
        self.objects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }
}

impl Hitable for HittableList {
    fn hit(&self, r: &Ray, t_min: f64, t_max: f64, rng: &mut dyn RngCore) -> Option<HitRecord> {
        let mut closest_so_far = t_max;
        let mut res = None;
        for object in &self.objects {
            if let Some(temp_rec) = object.hit(r, t_min, closest_so_far, rng) {
                closest_so_far = temp_rec.t;
                res = Some(temp_rec);
            }
        }
        res
    }

    /// Union of all member boxes, recomputed on demand. Unbounded members
    /// make the whole aggregate unbounded.
    fn bounding_box(&self) -> Option<AABB> {
        let mut bounds = AABB::EMPTY;
        for object in &self.objects {
            bounds = bounds.union(&object.bounding_box()?);
        }
        Some(bounds)
    }
}
