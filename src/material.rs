use crate::objects::hit::HitRecord;
use crate::texture::Texture;
use crate::Ray;
use crate::Vec3;
use rand::{Rng, RngCore};
use std::f64::consts::FRAC_1_PI;

pub struct Scatter {
    pub attenuation: Vec3,
    pub ray: Ray,
    /// Density the scattered direction was drawn with. The integrator weights
    /// each bounce by `scattering_pdf / pdf`.
    pub pdf: f64,
}

pub trait Material: Send + Sync {
    fn scatter(&self, r: &Ray, rec: &HitRecord, rng: &mut dyn RngCore) -> Option<Scatter>;
    /// Density of `scattered` under the material's own reflectance model.
    fn scattering_pdf(&self, _r: &Ray, _rec: &HitRecord, _scattered: &Ray) -> f64 {
        1.
    }
    fn emitted(&self, _rec: &HitRecord) -> Vec3 {
        Vec3::zero()
    }
}

/// Materials take a generic texture parameter to avoid a second layer of
/// `dyn` dispatch per sample.
pub struct Lambertian<T: Texture> {
    pub albedo: T,
}

impl<T: Texture> Lambertian<T> {
    pub fn new(albedo: T) -> Self {
        Self { albedo }
    }
}

impl<T: Texture> Material for Lambertian<T> {
    fn scatter(&self, r: &Ray, rec: &HitRecord, rng: &mut dyn RngCore) -> Option<Scatter> {
        let mut direction = Vec3::random_cosine_direction(rec.normal, rng);
        if direction.is_near_zero() {
            direction = rec.normal;
        }
        let cosine = (rec.normal * direction.normalized()?).max(0.);
        Some(Scatter {
            attenuation: self.albedo.sample(rec.uv.0, rec.uv.1, rec.p),
            ray: Ray::new(rec.p, direction, r.time),
            pdf: cosine * FRAC_1_PI,
        })
    }

    fn scattering_pdf(&self, _r: &Ray, rec: &HitRecord, scattered: &Ray) -> f64 {
        match scattered.dir.normalized() {
            Some(dir) => (rec.normal * dir).max(0.) * FRAC_1_PI,
            None => 0.,
        }
    }
}

pub struct Metal<T: Texture> {
    pub albedo: T,
    pub fuzz: f64,
}

impl<T: Texture> Metal<T> {
    pub fn new(albedo: T, fuzz: f64) -> Self {
        Self { albedo, fuzz }
    }
}

impl<T: Texture> Material for Metal<T> {
    fn scatter(&self, r: &Ray, rec: &HitRecord, rng: &mut dyn RngCore) -> Option<Scatter> {
        let reflected = Vec3::reflect(r.dir.normalized()?, rec.normal);
        let direction = reflected + self.fuzz * Vec3::random_in_unit_sphere(rng);
        if direction * rec.normal > 0. {
            Some(Scatter {
                attenuation: self.albedo.sample(rec.uv.0, rec.uv.1, rec.p),
                ray: Ray::new(rec.p, direction, r.time),
                pdf: 1.,
            })
        } else {
            None
        }
    }
}

pub struct Dielectric {
    pub ir: f64,
}

impl Dielectric {
    pub fn new(ir: f64) -> Self {
        Self { ir }
    }

    // Schlick's approximation
    fn reflectance(cosine: f64, ref_idx: f64) -> f64 {
        let r0 = ((1. - ref_idx) / (1. + ref_idx)).powi(2);
        r0 + (1. - r0) * (1. - cosine).powi(5)
    }
}

impl Material for Dielectric {
    fn scatter(&self, r: &Ray, rec: &HitRecord, rng: &mut dyn RngCore) -> Option<Scatter> {
        let refraction_ratio = if rec.front_face {
            1. / self.ir
        } else {
            self.ir
        };
        let unit_direction = r.dir.normalized()?;
        let cos_theta = (-unit_direction * rec.normal).min(1.);
        let sin_theta = (1. - cos_theta * cos_theta).sqrt();
        let cannot_refract = refraction_ratio * sin_theta > 1.;
        let direction =
            if cannot_refract || Self::reflectance(cos_theta, refraction_ratio) > rng.gen() {
                Vec3::reflect(unit_direction, rec.normal)
            } else {
                Vec3::refract(unit_direction, rec.normal, refraction_ratio)
            };
        Some(Scatter {
            attenuation: Vec3::ones(),
            ray: Ray::new(rec.p, direction, r.time),
            pdf: 1.,
        })
    }
}

pub struct Isotropic<T: Texture> {
    pub albedo: T,
}

impl<T: Texture> Isotropic<T> {
    pub fn new(albedo: T) -> Self {
        Self { albedo }
    }
}

impl<T: Texture> Material for Isotropic<T> {
    fn scatter(&self, r: &Ray, rec: &HitRecord, rng: &mut dyn RngCore) -> Option<Scatter> {
        Some(Scatter {
            attenuation: self.albedo.sample(rec.uv.0, rec.uv.1, rec.p),
            ray: Ray::new(rec.p, Vec3::random_in_unit_sphere(rng), r.time),
            pdf: 1.,
        })
    }
}

pub struct DiffuseLight<T: Texture> {
    pub emit: T,
}

impl<T: Texture> DiffuseLight<T> {
    pub fn new(emit: T) -> Self {
        Self { emit }
    }
}

impl<T: Texture> Material for DiffuseLight<T> {
    fn scatter(&self, _r: &Ray, _rec: &HitRecord, _rng: &mut dyn RngCore) -> Option<Scatter> {
        None
    }

    // the back side of a light stays dark
    fn emitted(&self, rec: &HitRecord) -> Vec3 {
        if rec.front_face {
            self.emit.sample(rec.uv.0, rec.uv.1, rec.p)
        } else {
            Vec3::zero()
        }
    }
}
