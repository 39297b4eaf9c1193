use crate::camera::Camera;
use crate::material::{Dielectric, DiffuseLight, Isotropic, Lambertian, Material, Metal};
use crate::objects::bvh::BvhNode;
use crate::objects::cube::Cube;
use crate::objects::hit::{HitRecord, Hitable, HittableList};
use crate::objects::medium::ConstantMedium;
use crate::objects::rectangle::{AxisAlignedRect, RectPlane};
use crate::objects::sphere::{MovingSphere, Sphere};
use crate::objects::transform::SceneObject;
use crate::texture::{CheckerTexture, NoiseTexture, Perlin, SolidColor};
use crate::{Ray, Vec3};
use nalgebra::{UnitQuaternion, Vector3};
use rand::rngs::StdRng;
use rand::{RngCore, SeedableRng};
use std::f64::consts::FRAC_PI_4;
use std::sync::Arc;

const BVH_MAX_DEPTH: u32 = 8;

/// A camera, a background color and the hittables to render. Queries go
/// through the bounding-volume hierarchy once `build_scene` has run, and
/// fall back to a linear scan over the list before that.
pub struct Scene {
    pub camera: Camera,
    pub background: Vec3,
    pub objects: HittableList,
    root: Option<BvhNode>,
}

impl Scene {
    pub fn new(camera: Camera, background: Vec3) -> Self {
        Self {
            camera,
            background,
            objects: HittableList::new(),
            root: None,
        }
    }

    pub fn add(&mut self, object: Arc<dyn Hitable>) {
        self.objects.add(object);
        // the hierarchy no longer covers the list
        self.root = None;
    }

    pub fn build_scene(&mut self) {
        self.root = Some(BvhNode::build(self.objects.objects.clone(), BVH_MAX_DEPTH));
    }

    pub fn hit(
        &self,
        r: &Ray,
        t_min: f64,
        t_max: f64,
        rng: &mut dyn RngCore,
    ) -> Option<HitRecord> {
        match &self.root {
            Some(root) => root.hit(r, t_min, t_max, rng),
            None => self.objects.hit(r, t_min, t_max, rng),
        }
    }
}

/// Three spheres on a matte ground, with a hollow glass ball on the left.
fn glass_spheres_scene() -> Scene {
    let mut camera = Camera::default();
    camera.position = Vec3::new(0., 0., 0.5);
    camera.aperture = 0.1;
    camera.near_plane = 1.5;
    camera.update();

    let mut scene = Scene::new(camera, Vec3::new(0.7, 0.8, 1.));
    scene.add(Arc::new(Sphere {
        center: Vec3::new(0., -100.5, -1.),
        radius: 100.,
        material: Arc::new(Lambertian::new(SolidColor(Vec3::new(0.8, 0.8, 0.)))),
    }));
    scene.add(Arc::new(Sphere {
        center: Vec3::new(0., 0., -1.),
        radius: 0.5,
        material: Arc::new(Lambertian::new(SolidColor(Vec3::new(0.1, 0.2, 0.5)))),
    }));
    scene.add(Arc::new(Sphere {
        center: Vec3::new(-1., 0., -1.),
        radius: 0.5,
        material: Arc::new(Dielectric::new(1.5)),
    }));
    // negative radius flips the normals, turning the glass sphere into a shell
    scene.add(Arc::new(Sphere {
        center: Vec3::new(-1., 0., -1.),
        radius: -0.4,
        material: Arc::new(Dielectric::new(1.5)),
    }));
    scene.add(Arc::new(Sphere {
        center: Vec3::new(1., 0., -1.),
        radius: 0.5,
        material: Arc::new(Metal::new(SolidColor(Vec3::new(0.8, 0.6, 0.2)), 0.1)),
    }));
    scene.build_scene();
    scene
}

/// Closed box lit from the ceiling, exercising rectangles, a rotated cube,
/// smoke, motion blur and the procedural textures.
fn cornell_box_scene() -> Scene {
    let red: Arc<dyn Material> =
        Arc::new(Lambertian::new(SolidColor(Vec3::new(0.65, 0.05, 0.05))));
    let white: Arc<dyn Material> =
        Arc::new(Lambertian::new(SolidColor(Vec3::new(0.73, 0.73, 0.73))));
    let green: Arc<dyn Material> =
        Arc::new(Lambertian::new(SolidColor(Vec3::new(0.12, 0.45, 0.15))));
    let light: Arc<dyn Material> =
        Arc::new(DiffuseLight::new(SolidColor(Vec3::new(7., 7., 7.))));

    let mut camera = Camera::default();
    camera.position = Vec3::new(278., 278., -800.);
    camera.look_direction = Vec3::new(278., 278., 278.) - camera.position;
    camera.fovy = 40.;
    camera.aspect = 1.;
    camera.aperture = 0.;
    camera.near_plane = 10.;
    camera.shutter = Some((0., 1.));
    camera.update();

    let mut scene = Scene::new(camera, Vec3::zero());
    scene.add(Arc::new(AxisAlignedRect::new(
        RectPlane::YZ,
        (0., 0.),
        (555., 555.),
        555.,
        true,
        red,
    )));
    scene.add(Arc::new(AxisAlignedRect::new(
        RectPlane::YZ,
        (0., 0.),
        (555., 555.),
        0.,
        false,
        green,
    )));
    scene.add(Arc::new(AxisAlignedRect::new(
        RectPlane::ZX,
        (127., 113.),
        (432., 443.),
        554.,
        true,
        light,
    )));
    scene.add(Arc::new(AxisAlignedRect::new(
        RectPlane::ZX,
        (0., 0.),
        (555., 555.),
        0.,
        false,
        white.clone(),
    )));
    scene.add(Arc::new(AxisAlignedRect::new(
        RectPlane::ZX,
        (0., 0.),
        (555., 555.),
        555.,
        true,
        white.clone(),
    )));
    scene.add(Arc::new(AxisAlignedRect::new(
        RectPlane::XY,
        (0., 0.),
        (555., 555.),
        555.,
        true,
        white.clone(),
    )));

    let tall_box = Arc::new(Cube::new(
        Vec3::new(-82.5, 0., -82.5),
        Vec3::new(82.5, 330., 82.5),
        white.clone(),
    ));
    scene.add(Arc::new(SceneObject::with_transform(
        tall_box,
        Vec3::new(347.5, 0., 377.5),
        Vec3::ones(),
        UnitQuaternion::from_axis_angle(&Vector3::y_axis(), FRAC_PI_4 / 3.),
    )));

    let smoke_boundary = Arc::new(Cube::new(
        Vec3::new(82.5, 0., 147.5),
        Vec3::new(247.5, 165., 312.5),
        white,
    ));
    scene.add(Arc::new(ConstantMedium::new(
        0.01,
        smoke_boundary,
        Arc::new(Isotropic::new(SolidColor(Vec3::ones()))),
    )));

    scene.add(Arc::new(MovingSphere {
        center0: Vec3::new(420., 400., 200.),
        center1: Vec3::new(440., 420., 200.),
        time0: 0.,
        time1: 1.,
        radius: 45.,
        material: Arc::new(Metal::new(SolidColor(Vec3::new(0.8, 0.85, 0.88)), 0.)),
    }));

    let mut noise_rng = StdRng::seed_from_u64(0);
    scene.add(Arc::new(Sphere {
        center: Vec3::new(150., 420., 300.),
        radius: 60.,
        material: Arc::new(Lambertian::new(NoiseTexture::new(
            Perlin::new(&mut noise_rng),
            0.05,
        ))),
    }));
    scene.add(Arc::new(Sphere {
        center: Vec3::new(278., 70., 100.),
        radius: 70.,
        material: Arc::new(Lambertian::new(CheckerTexture(
            SolidColor(Vec3::new(0.9, 0.9, 0.9)),
            SolidColor(Vec3::new(0.2, 0.3, 0.1)),
        ))),
    }));

    scene.build_scene();
    scene
}

pub fn select_scene(index: usize) -> Scene {
    match index {
        0 => glass_spheres_scene(),
        _ => cornell_box_scene(),
    }
}
