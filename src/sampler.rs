use crate::scene::Scene;
use crate::{Ray, Vec3};
use rand::{Rng, RngCore};
use std::sync::Arc;

/// Shadow-acne epsilon: hits closer than this are ignored so a scattered
/// ray never re-hits the surface it just left.
const T_MIN: f64 = 1e-3;

/// Estimates the radiance carried back along `r`. The estimator is biased
/// by the fixed depth cutoff but consistent as `depth` grows; each bounce
/// is weighted by `scattering_pdf / pdf` to undo the importance sampling.
pub fn ray_color(scene: &Scene, r: &Ray, depth: u32, rng: &mut dyn RngCore) -> Vec3 {
    if depth == 0 {
        return Vec3::zero();
    }
    match scene.hit(r, T_MIN, f64::INFINITY, rng) {
        Some(rec) => {
            let emitted = rec.mat.emitted(&rec);
            match rec.mat.scatter(r, &rec, rng) {
                Some(scatter) if scatter.pdf > 0. => {
                    let weight = rec.mat.scattering_pdf(r, &rec, &scatter.ray) / scatter.pdf;
                    emitted
                        + Vec3::elemul(
                            scatter.attenuation * weight,
                            ray_color(scene, &scatter.ray, depth - 1, rng),
                        )
                }
                _ => emitted,
            }
        }
        None => scene.background,
    }
}

/// Produces the color of one pixel; `row` 0 is the top of the image.
pub trait Sampler: Send + Sync {
    fn sample(&self, row: u32, col: u32, rng: &mut dyn RngCore) -> Vec3;
}

/// One ray straight through the pixel center. Cheap and noiseless, useful
/// for debugging geometry.
pub struct CenterSampler {
    pub scene: Arc<Scene>,
    pub width: u32,
    pub height: u32,
    pub max_ray_depth: u32,
}

impl Sampler for CenterSampler {
    fn sample(&self, row: u32, col: u32, rng: &mut dyn RngCore) -> Vec3 {
        let u = (col as f64 + 0.5) / self.width as f64;
        let v = 1. - (row as f64 + 0.5) / self.height as f64;
        let r = self.scene.camera.get_ray(u, v, rng);
        ray_color(&self.scene, &r, self.max_ray_depth, rng)
    }
}

/// Averages `samples_per_pixel` rays, each jittered uniformly within the
/// pixel footprint.
pub struct MultiSampler {
    pub scene: Arc<Scene>,
    pub width: u32,
    pub height: u32,
    pub max_ray_depth: u32,
    pub samples_per_pixel: u32,
}

impl Sampler for MultiSampler {
    fn sample(&self, row: u32, col: u32, rng: &mut dyn RngCore) -> Vec3 {
        let mut acc = Vec3::zero();
        for _ in 0..self.samples_per_pixel {
            let u = (col as f64 + 0.5 + rng.gen_range(-0.5..0.5)) / self.width as f64;
            let v = 1. - (row as f64 + 0.5 + rng.gen_range(-0.5..0.5)) / self.height as f64;
            let r = self.scene.camera.get_ray(u, v, rng);
            acc += ray_color(&self.scene, &r, self.max_ray_depth, rng);
        }
        acc / self.samples_per_pixel as f64
    }
}
