use crate::vec3::degrees_to_radians;
use crate::{Ray, Vec3};
use rand::{Rng, RngCore};

/// Thin-lens camera. The configuration fields are plain and public; after
/// changing any of them call `update()` to rebuild the cached basis and
/// view-plane corners. `get_ray` never recomputes derived state.
#[derive(Copy, Clone)]
pub struct Camera {
    pub position: Vec3,
    pub look_direction: Vec3,
    pub up_direction: Vec3,
    /// vertical field of view, degrees
    pub fovy: f64,
    pub aspect: f64,
    /// lens diameter; 0 gives a pinhole camera
    pub aperture: f64,
    /// distance to the plane of perfect focus
    pub near_plane: f64,
    /// when set, each ray gets a time drawn uniformly from this interval
    pub shutter: Option<(f64, f64)>,
    x: Vec3,
    y: Vec3,
    z: Vec3,
    horizontal: Vec3,
    vertical: Vec3,
    lower_left_corner: Vec3,
    lens_radius: f64,
}

impl Default for Camera {
    fn default() -> Self {
        let mut camera = Self {
            position: Vec3::zero(),
            look_direction: Vec3::new(0., 0., -1.),
            up_direction: Vec3::new(0., 1., 0.),
            fovy: 90.,
            aspect: 16. / 9.,
            aperture: 2.,
            near_plane: 1.,
            shutter: None,
            x: Vec3::zero(),
            y: Vec3::zero(),
            z: Vec3::zero(),
            horizontal: Vec3::zero(),
            vertical: Vec3::zero(),
            lower_left_corner: Vec3::zero(),
            lens_radius: 0.,
        };
        camera.update();
        camera
    }
}

impl Camera {
    /// Rebuilds the orthonormal basis and view-plane corners from the
    /// current configuration.
    pub fn update(&mut self) {
        let theta = degrees_to_radians(self.fovy);
        let height = f64::tan(theta / 2.) * self.near_plane * 2.;
        let width = height * self.aspect;

        self.z = (-self.look_direction).unit();
        self.x = Vec3::cross(self.up_direction, self.z).unit();
        self.y = Vec3::cross(self.z, self.x);

        self.horizontal = self.x * width;
        self.vertical = self.y * height;
        self.lower_left_corner =
            self.position - self.horizontal / 2. - self.vertical / 2. - self.z * self.near_plane;
        self.lens_radius = self.aperture / 2.;
    }

    /// `u`, `v` are normalized image coordinates in [0, 1], v pointing up.
    pub fn get_ray(&self, u: f64, v: f64, rng: &mut dyn RngCore) -> Ray {
        let rd = self.lens_radius * Vec3::random_in_unit_disk(rng);
        let offset = self.x * rd.x + self.y * rd.y;
        let origin = self.position + offset;
        let time = match self.shutter {
            Some((time0, time1)) => rng.gen_range(time0..time1),
            None => 0.,
        };
        Ray::new(
            origin,
            self.lower_left_corner + u * self.horizontal + v * self.vertical - origin,
            time,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_update_is_idempotent() {
        let mut camera = Camera::default();
        camera.position = Vec3::new(3., 2., 1.);
        camera.look_direction = Vec3::new(-1., -0.5, -1.);
        camera.fovy = 40.;
        camera.update();
        let first = (
            camera.x,
            camera.y,
            camera.z,
            camera.horizontal,
            camera.vertical,
            camera.lower_left_corner,
        );
        camera.update();
        let second = (
            camera.x,
            camera.y,
            camera.z,
            camera.horizontal,
            camera.vertical,
            camera.lower_left_corner,
        );
        assert_eq!(first, second);
    }

    #[test]
    fn test_basis_is_orthonormal() {
        let mut camera = Camera::default();
        camera.look_direction = Vec3::new(1., 2., -3.);
        camera.up_direction = Vec3::new(0., 1., 0.1);
        camera.update();
        assert!((camera.x.length() - 1.).abs() < 1e-12);
        assert!((camera.y.length() - 1.).abs() < 1e-12);
        assert!((camera.z.length() - 1.).abs() < 1e-12);
        assert!((camera.x * camera.y).abs() < 1e-12);
        assert!((camera.y * camera.z).abs() < 1e-12);
        assert!((camera.z * camera.x).abs() < 1e-12);
        assert!((camera.z + camera.look_direction.unit()).length() < 1e-12);
    }

    #[test]
    fn test_pinhole_center_ray_points_down_look_direction() {
        let mut camera = Camera::default();
        camera.aperture = 0.;
        camera.update();
        let mut rng = StdRng::seed_from_u64(0);
        let r = camera.get_ray(0.5, 0.5, &mut rng);
        assert_eq!(r.orig, camera.position);
        assert!((r.dir.unit() - Vec3::new(0., 0., -1.)).length() < 1e-12);
        assert_eq!(r.time, 0.);
    }

    #[test]
    fn test_corner_rays_span_the_fov() {
        let mut camera = Camera::default();
        camera.aperture = 0.;
        camera.fovy = 90.;
        camera.aspect = 1.;
        camera.update();
        let mut rng = StdRng::seed_from_u64(0);
        // at fovy 90 and near 1 the view plane spans [-1, 1] vertically
        let bottom = camera.get_ray(0.5, 0., &mut rng);
        let top = camera.get_ray(0.5, 1., &mut rng);
        assert!((bottom.dir - Vec3::new(0., -1., -1.)).length() < 1e-12);
        assert!((top.dir - Vec3::new(0., 1., -1.)).length() < 1e-12);
    }

    #[test]
    fn test_shutter_samples_stay_in_interval() {
        let mut camera = Camera::default();
        camera.shutter = Some((0.25, 0.75));
        camera.update();
        let mut rng = StdRng::seed_from_u64(17);
        for _ in 0..200 {
            let r = camera.get_ray(0.3, 0.6, &mut rng);
            assert!(r.time >= 0.25 && r.time < 0.75);
        }
    }

    #[test]
    fn test_lens_offset_stays_within_aperture() {
        let mut camera = Camera::default();
        camera.aperture = 2.;
        camera.near_plane = 5.;
        camera.update();
        let mut rng = StdRng::seed_from_u64(23);
        for _ in 0..200 {
            let r = camera.get_ray(0.5, 0.5, &mut rng);
            assert!((r.orig - camera.position).length() <= 1. + 1e-12);
            // every lens ray still focuses on the same view-plane point
            let focus = r.orig + r.dir;
            let center = camera.position + camera.near_plane * -camera.z;
            assert!((focus - center).length() < 1e-9);
        }
    }
}
