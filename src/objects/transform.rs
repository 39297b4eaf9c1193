use crate::objects::aabb::AABB;
use crate::objects::hit::{HitRecord, Hitable};
use crate::{Ray, Vec3};
use nalgebra::{Matrix4, UnitQuaternion, Vector3};
use rand::RngCore;
use std::sync::Arc;

/// Places a hittable in the world with a position, non-uniform scale and
/// orientation. Incoming rays are mapped to object-local space, the hit
/// point is mapped back by the forward matrix, and the normal by the
/// inverse-transpose of its linear part (required for non-uniform scale).
///
/// The transform components are plain fields; call `update()` after
/// changing any of them, as with `Camera`. Queries never recompute state.
pub struct SceneObject {
    pub mesh: Arc<dyn Hitable>,
    pub position: Vec3,
    pub scale: Vec3,
    pub orientation: UnitQuaternion<f64>,
    matrix: Matrix4<f64>,
    inverse: Matrix4<f64>,
    normal_matrix: Matrix4<f64>,
    bounds: Option<AABB>,
}

impl SceneObject {
    pub fn new(mesh: Arc<dyn Hitable>) -> Self {
        Self::with_transform(
            mesh,
            Vec3::zero(),
            Vec3::ones(),
            UnitQuaternion::identity(),
        )
    }

    pub fn with_transform(
        mesh: Arc<dyn Hitable>,
        position: Vec3,
        scale: Vec3,
        orientation: UnitQuaternion<f64>,
    ) -> Self {
        let mut object = Self {
            mesh,
            position,
            scale,
            orientation,
            matrix: Matrix4::identity(),
            inverse: Matrix4::identity(),
            normal_matrix: Matrix4::identity(),
            bounds: None,
        };
        object.update();
        object
    }

    /// Rebuilds the combined matrix, its inverse and the world bounding box
    /// from the current transform components.
    pub fn update(&mut self) {
        let translation = Matrix4::new_translation(&Vector3::new(
            self.position.x,
            self.position.y,
            self.position.z,
        ));
        let rotation = self.orientation.to_homogeneous();
        let scaling = Matrix4::new_nonuniform_scaling(&Vector3::new(
            self.scale.x,
            self.scale.y,
            self.scale.z,
        ));
        self.matrix = translation * rotation * scaling;
        self.inverse = match self.matrix.try_inverse() {
            Some(inverse) => inverse,
            None => panic!("scene object transform is not invertible"),
        };
        self.normal_matrix = self.inverse.transpose();
        self.bounds = self.mesh.bounding_box().map(|bbox| {
            let mut minimum = [f64::INFINITY; 3];
            let mut maximum = [f64::NEG_INFINITY; 3];
            for i in 0..2 {
                for j in 0..2 {
                    for k in 0..2 {
                        let (i, j, k) = (i as f64, j as f64, k as f64);
                        let corner = Vec3::new(
                            i * bbox.maximum.x + (1. - i) * bbox.minimum.x,
                            j * bbox.maximum.y + (1. - j) * bbox.minimum.y,
                            k * bbox.maximum.z + (1. - k) * bbox.minimum.z,
                        )
                        .transform_point(&self.matrix);
                        for c in 0..3 {
                            minimum[c] = minimum[c].min(corner[c]);
                            maximum[c] = maximum[c].max(corner[c]);
                        }
                    }
                }
            }
            AABB::new(
                Vec3::new(minimum[0], minimum[1], minimum[2]),
                Vec3::new(maximum[0], maximum[1], maximum[2]),
            )
        });
    }
}

impl Hitable for SceneObject {
    fn hit(&self, r: &Ray, t_min: f64, t_max: f64, rng: &mut dyn RngCore) -> Option<HitRecord> {
        let local_ray = Ray::new(
            r.orig.transform_point(&self.inverse),
            r.dir.transform_dir(&self.inverse),
            r.time,
        );
        // affine map keeps t comparable between spaces
        let mut rec = self.mesh.hit(&local_ray, t_min, t_max, rng)?;
        rec.p = rec.p.transform_point(&self.matrix);
        let world_normal = rec.normal.transform_dir(&self.normal_matrix);
        rec.normal = world_normal.normalized().unwrap_or(world_normal);
        Some(rec)
    }

    fn bounding_box(&self) -> Option<AABB> {
        self.bounds
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::material::Lambertian;
    use crate::objects::cube::Cube;
    use crate::objects::sphere::Sphere;
    use crate::texture::SolidColor;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use std::f64::consts::FRAC_PI_4;

    fn unit_sphere() -> Arc<dyn Hitable> {
        Arc::new(Sphere {
            center: Vec3::zero(),
            radius: 1.,
            material: Arc::new(Lambertian::new(SolidColor(Vec3::new(0.5, 0.5, 0.5)))),
        })
    }

    #[test]
    fn test_translation() {
        let object = SceneObject::with_transform(
            unit_sphere(),
            Vec3::new(0., 0., -5.),
            Vec3::ones(),
            UnitQuaternion::identity(),
        );
        let mut rng = StdRng::seed_from_u64(0);
        let r = Ray::new(Vec3::zero(), Vec3::new(0., 0., -1.), 0.);
        let rec = object.hit(&r, 0., f64::INFINITY, &mut rng).unwrap();
        assert!((rec.t - 4.).abs() < 1e-9);
        assert!((rec.p - Vec3::new(0., 0., -4.)).length() < 1e-9);
        assert!((rec.normal - Vec3::new(0., 0., 1.)).length() < 1e-9);
    }

    #[test]
    fn test_identity_is_transparent() {
        let sphere = unit_sphere();
        let object = SceneObject::new(sphere.clone());
        let mut rng = StdRng::seed_from_u64(0);
        let r = Ray::new(Vec3::new(0., 0., 5.), Vec3::new(0., 0., -1.), 0.);
        let direct = sphere.hit(&r, 0., f64::INFINITY, &mut rng).unwrap();
        let wrapped = object.hit(&r, 0., f64::INFINITY, &mut rng).unwrap();
        assert!((direct.t - wrapped.t).abs() < 1e-12);
        assert!((direct.p - wrapped.p).length() < 1e-12);
        assert_eq!(object.bounding_box(), sphere.bounding_box());
    }

    #[test]
    fn test_nonuniform_scale_normal_uses_inverse_transpose() {
        // sphere scaled to the ellipsoid x^2 + y^2/4 + z^2 = 1
        let object = SceneObject::with_transform(
            unit_sphere(),
            Vec3::zero(),
            Vec3::new(1., 2., 1.),
            UnitQuaternion::identity(),
        );
        let mut rng = StdRng::seed_from_u64(0);
        let r = Ray::new(Vec3::new(10., 1.6, 0.), Vec3::new(-1., 0., 0.), 0.);
        let rec = object.hit(&r, 0., f64::INFINITY, &mut rng).unwrap();
        assert!((rec.p - Vec3::new(0.6, 1.6, 0.)).length() < 1e-6);
        // the gradient of the ellipsoid, not the forward-scaled local normal
        let expected = Vec3::new(1.2, 0.8, 0.).unit();
        assert!((rec.normal - expected).length() < 1e-6);
        assert!((rec.normal.length() - 1.).abs() < 1e-9);
    }

    #[test]
    fn test_rotated_cube_bounding_box() {
        let cube = Arc::new(Cube::new(
            Vec3::new(-1., -1., -1.),
            Vec3::new(1., 1., 1.),
            Arc::new(Lambertian::new(SolidColor(Vec3::new(0.5, 0.5, 0.5)))),
        ));
        let object = SceneObject::with_transform(
            cube,
            Vec3::zero(),
            Vec3::ones(),
            UnitQuaternion::from_axis_angle(&Vector3::y_axis(), FRAC_PI_4),
        );
        let bounds = object.bounding_box().unwrap();
        let sqrt2 = 2f64.sqrt();
        assert!((bounds.maximum.x - sqrt2).abs() < 1e-9);
        assert!((bounds.minimum.z + sqrt2).abs() < 1e-9);
        assert!((bounds.maximum.y - 1.).abs() < 1e-9);
    }

    #[test]
    fn test_update_after_mutation() {
        let mut object = SceneObject::new(unit_sphere());
        object.position = Vec3::new(3., 0., 0.);
        object.update();
        let bounds = object.bounding_box().unwrap();
        assert_eq!(bounds.minimum, Vec3::new(2., -1., -1.));
        assert_eq!(bounds.maximum, Vec3::new(4., 1., 1.));
    }
}
