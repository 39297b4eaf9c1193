use crate::Vec3;
use image::{DynamicImage, GenericImageView};
use rand::{Rng, RngCore};
use std::f64::consts::PI;

pub trait Texture: Send + Sync {
    fn sample(&self, u: f64, v: f64, p: Vec3) -> Vec3;
}

pub struct SolidColor(pub Vec3);
/// Checker pattern in uv space, the sign band flips every 1/50 along each
/// axis: even cell -> `.0`, odd cell -> `.1`.
pub struct CheckerTexture(pub SolidColor, pub SolidColor);
pub struct ImageTexture(pub DynamicImage);

impl Texture for SolidColor {
    fn sample(&self, _u: f64, _v: f64, _p: Vec3) -> Vec3 {
        self.0
    }
}

impl Texture for CheckerTexture {
    fn sample(&self, u: f64, v: f64, p: Vec3) -> Vec3 {
        let sines = f64::sin(u * 50. * PI) * f64::sin(v * 50. * PI);
        if sines < 0. {
            self.1.sample(u, v, p)
        } else {
            self.0.sample(u, v, p)
        }
    }
}

impl Texture for ImageTexture {
    fn sample(&self, u: f64, v: f64, _p: Vec3) -> Vec3 {
        let image = &self.0;
        let (u, v) = (u.clamp(0., 1.), 1. - v.clamp(0., 1.));
        let (width, height) = (image.width(), image.height());
        let x = ((width as f64 * u) as u32).min(width - 1);
        let y = ((height as f64 * v) as u32).min(height - 1);

        let rgba = image.get_pixel(x, y);
        Vec3::new(
            rgba[0] as f64 / 255.,
            rgba[1] as f64 / 255.,
            rgba[2] as f64 / 255.,
        )
    }
}

const POINT_COUNT: usize = 256;

/// Gradient-lattice noise: 256 random unit gradients indexed through three
/// independent coordinate permutations, blended with a Hermite-smoothed
/// trilinear filter. `noise` lands in roughly [-1, 1].
pub struct Perlin {
    gradients: Vec<Vec3>,
    perm_x: Vec<usize>,
    perm_y: Vec<usize>,
    perm_z: Vec<usize>,
}

impl Perlin {
    pub fn new(rng: &mut dyn RngCore) -> Self {
        let gradients = (0..POINT_COUNT)
            .map(|_| Vec3::random_unit_vector(rng))
            .collect();
        Self {
            gradients,
            perm_x: Self::generate_perm(rng),
            perm_y: Self::generate_perm(rng),
            perm_z: Self::generate_perm(rng),
        }
    }

    fn generate_perm(rng: &mut dyn RngCore) -> Vec<usize> {
        let mut perm: Vec<usize> = (0..POINT_COUNT).collect();
        for i in (1..POINT_COUNT).rev() {
            let target = rng.gen_range(0..=i);
            perm.swap(target, i);
        }
        perm
    }

    pub fn noise(&self, p: Vec3) -> f64 {
        let u = p.x - p.x.floor();
        let v = p.y - p.y.floor();
        let w = p.z - p.z.floor();
        let i = p.x.floor() as i64;
        let j = p.y.floor() as i64;
        let k = p.z.floor() as i64;

        let smooth = |t: f64| t * t * (3. - 2. * t);
        let (uu, vv, ww) = (smooth(u), smooth(v), smooth(w));
        let mut acc = 0.;
        for di in 0..2i64 {
            for dj in 0..2i64 {
                for dk in 0..2i64 {
                    let gradient = self.gradients[self.perm_x[((i + di) & 255) as usize]
                        ^ self.perm_y[((j + dj) & 255) as usize]
                        ^ self.perm_z[((k + dk) & 255) as usize]];
                    let (di, dj, dk) = (di as f64, dj as f64, dk as f64);
                    let weight = Vec3::new(u - di, v - dj, w - dk);
                    acc += (di * uu + (1. - di) * (1. - uu))
                        * (dj * vv + (1. - dj) * (1. - vv))
                        * (dk * ww + (1. - dk) * (1. - ww))
                        * (gradient * weight);
                }
            }
        }
        acc
    }

    /// Sum of `depth` octaves, doubling frequency and halving weight each step.
    pub fn turb(&self, p: Vec3, depth: u32) -> f64 {
        let mut acc = 0.;
        let mut weight = 1.;
        let mut tp = p;
        for _ in 0..depth {
            acc += weight * self.noise(tp);
            tp *= 2.;
            weight *= 0.5;
        }
        acc.abs()
    }
}

pub struct NoiseTexture {
    pub noise: Perlin,
    pub scale: f64,
}

impl NoiseTexture {
    pub fn new(noise: Perlin, scale: f64) -> Self {
        Self { noise, scale }
    }
}

impl Texture for NoiseTexture {
    fn sample(&self, _u: f64, _v: f64, p: Vec3) -> Vec3 {
        Vec3::ones() * 0.5 * (1. + f64::sin(self.noise.turb(p, 7) * 10. + self.scale * p.z))
    }
}
