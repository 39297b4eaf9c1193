use image::Rgb;
use nalgebra::{Matrix4, Point3, Vector3};
use rand::{Rng, RngCore};
use std::f64::consts::{FRAC_PI_2, FRAC_PI_4, PI};
use std::ops::{Add, AddAssign, Div, DivAssign, Index, Mul, MulAssign, Neg, Sub, SubAssign};

#[derive(Clone, Debug, PartialEq, Copy)]
pub struct Vec3 {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

pub fn degrees_to_radians(degrees: f64) -> f64 {
    degrees * PI / 180.
}

impl Vec3 {
    pub fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    pub fn ones() -> Self {
        Self::new(1.0, 1.0, 1.0)
    }

    pub fn zero() -> Self {
        Self::new(0.0, 0.0, 0.0)
    }

    pub fn squared_length(&self) -> f64 {
        self.x * self.x + self.y * self.y + self.z * self.z
    }

    pub fn length(&self) -> f64 {
        self.squared_length().sqrt()
    }

    pub fn elemul(lhs: Self, rhs: Self) -> Self {
        Self {
            x: lhs.x * rhs.x,
            y: lhs.y * rhs.y,
            z: lhs.z * rhs.z,
        }
    }

    pub fn cross(lhs: Self, rhs: Self) -> Self {
        Self {
            x: lhs.y * rhs.z - lhs.z * rhs.y,
            y: lhs.z * rhs.x - lhs.x * rhs.z,
            z: lhs.x * rhs.y - lhs.y * rhs.x,
        }
    }

    pub fn unit(&self) -> Vec3 {
        match self {
            v if v.length() == 0. => panic!(),
            _ => self / self.length(),
        }
    }

    /// Zero-guarded normalization. Returns `None` for near-zero vectors
    /// instead of letting a division produce NaN components.
    pub fn normalized(&self) -> Option<Vec3> {
        if self.is_near_zero() {
            None
        } else {
            Some(self / self.length())
        }
    }

    pub fn is_near_zero(&self) -> bool {
        const S: f64 = 1e-8;
        (self.x.abs() < S) && (self.y.abs() < S) && (self.z.abs() < S)
    }

    pub fn xyz(&self) -> (f64, f64, f64) {
        (self.x, self.y, self.z)
    }
    pub fn xy(&self) -> (f64, f64) {
        (self.x, self.y)
    }
    pub fn xz(&self) -> (f64, f64) {
        (self.x, self.z)
    }
    pub fn yz(&self) -> (f64, f64) {
        (self.y, self.z)
    }

    pub fn random(rng: &mut dyn RngCore) -> Vec3 {
        Vec3::new(rng.gen::<f64>(), rng.gen::<f64>(), rng.gen::<f64>())
    }

    pub fn random_in_range(rng: &mut dyn RngCore, min: f64, max: f64) -> Vec3 {
        let span = max - min;
        let remap = |x: f64| min + span * x;
        Vec3::new(
            remap(rng.gen()),
            remap(rng.gen()),
            remap(rng.gen()),
        )
    }

    pub fn random_in_unit_sphere(rng: &mut dyn RngCore) -> Vec3 {
        loop {
            let p = Vec3::random_in_range(rng, -1., 1.);
            if p.squared_length() >= 1. {
                continue;
            }
            return p;
        }
    }

    pub fn random_unit_vector(rng: &mut dyn RngCore) -> Vec3 {
        Vec3::random_in_unit_sphere(rng).unit()
    }

    pub fn random_in_unit_disk(rng: &mut dyn RngCore) -> Vec3 {
        loop {
            let p = Vec3::new(rng.gen_range(-1.0..1.0), rng.gen_range(-1.0..1.0), 0.);
            if p.squared_length() >= 1. {
                continue;
            }
            return p;
        }
    }

    /// Cosine-weighted direction about `normal`: concentric-disk sample
    /// projected up to the hemisphere, then rotated into the normal's frame.
    pub fn random_cosine_direction(normal: Vec3, rng: &mut dyn RngCore) -> Vec3 {
        let (x, y) = concentric_sample_disk(rng);
        let z = (1. - x * x - y * y).max(0.).sqrt();
        Onb::new(normal).local(Vec3::new(x, y, z))
    }

    pub fn reflect(v_in: Self, norm: Self) -> Self {
        v_in - 2. * (v_in * norm) * norm
    }

    /// Snell refraction. Both `v_in` and `norm` must be unit length.
    pub fn refract(v_in: Self, norm: Self, ratio: f64) -> Self {
        let cos_theta = (-v_in * norm).min(1.0);
        let r_out_perp = ratio * (v_in + cos_theta * norm);
        let r_out_parallel = -(1.0 - r_out_perp.squared_length()).abs().sqrt() * norm;
        r_out_perp + r_out_parallel
    }

    pub fn transform_point(&self, m: &Matrix4<f64>) -> Vec3 {
        let p = m.transform_point(&Point3::new(self.x, self.y, self.z));
        Vec3::new(p.x, p.y, p.z)
    }

    pub fn transform_dir(&self, m: &Matrix4<f64>) -> Vec3 {
        let v = m.transform_vector(&Vector3::new(self.x, self.y, self.z));
        Vec3::new(v.x, v.y, v.z)
    }
}

/// Shirley's concentric mapping of the unit square onto the unit disk.
fn concentric_sample_disk(rng: &mut dyn RngCore) -> (f64, f64) {
    let ox = 2. * rng.gen::<f64>() - 1.;
    let oy = 2. * rng.gen::<f64>() - 1.;
    if ox == 0. && oy == 0. {
        return (0., 0.);
    }
    let (r, theta) = if ox.abs() > oy.abs() {
        (ox, FRAC_PI_4 * (oy / ox))
    } else {
        (oy, FRAC_PI_2 - FRAC_PI_4 * (ox / oy))
    };
    (r * theta.cos(), r * theta.sin())
}

/// Orthonormal basis whose w axis is the given direction.
pub struct Onb {
    pub u: Vec3,
    pub v: Vec3,
    pub w: Vec3,
}

impl Onb {
    pub fn new(w: Vec3) -> Self {
        let w = w.unit();
        let a = if w.x.abs() > 0.9 {
            Vec3::new(0., 1., 0.)
        } else {
            Vec3::new(1., 0., 0.)
        };
        let v = Vec3::cross(w, a).unit();
        let u = Vec3::cross(w, v);
        Self { u, v, w }
    }

    pub fn local(&self, a: Vec3) -> Vec3 {
        a.x * self.u + a.y * self.v + a.z * self.w
    }
}

impl From<Vec3> for Rgb<u8> {
    fn from(item: Vec3) -> Self {
        // sqrt is the gamma-2 correction applied at the image boundary
        Self([
            (item.x.sqrt().clamp(0., 1.) * 255.).floor() as u8,
            (item.y.sqrt().clamp(0., 1.) * 255.).floor() as u8,
            (item.z.sqrt().clamp(0., 1.) * 255.).floor() as u8,
        ])
    }
}

impl Add for Vec3 {
    type Output = Self;

    fn add(self, other: Self) -> Self {
        Self {
            x: self.x + other.x,
            y: self.y + other.y,
            z: self.z + other.z,
        }
    }
}

impl AddAssign for Vec3 {
    fn add_assign(&mut self, other: Self) {
        *self = *self + other;
    }
}

impl Sub for Vec3 {
    type Output = Self;

    fn sub(self, other: Self) -> Self {
        Self {
            x: self.x - other.x,
            y: self.y - other.y,
            z: self.z - other.z,
        }
    }
}

impl SubAssign for Vec3 {
    fn sub_assign(&mut self, other: Self) {
        *self = *self - other;
    }
}

impl Mul for Vec3 {
    type Output = f64;

    fn mul(self, other: Self) -> Self::Output {
        self.x * other.x + self.y * other.y + self.z * other.z
    }
}

impl Mul<Vec3> for f64 {
    type Output = Vec3;

    fn mul(self, other: Vec3) -> Self::Output {
        Vec3 {
            x: other.x * self,
            y: other.y * self,
            z: other.z * self,
        }
    }
}

impl Mul<f64> for Vec3 {
    type Output = Self;

    fn mul(self, other: f64) -> Self::Output {
        other * self
    }
}

impl MulAssign<f64> for Vec3 {
    fn mul_assign(&mut self, other: f64) {
        *self = *self * other;
    }
}

impl Div<f64> for Vec3 {
    type Output = Self;
    fn div(self, other: f64) -> Self::Output {
        Self {
            x: self.x / other,
            y: self.y / other,
            z: self.z / other,
        }
    }
}

impl Div<f64> for &Vec3 {
    type Output = Vec3;
    fn div(self, other: f64) -> Self::Output {
        *self / other
    }
}

impl DivAssign<f64> for Vec3 {
    fn div_assign(&mut self, other: f64) {
        *self = *self / other;
    }
}

impl Neg for Vec3 {
    type Output = Self;
    fn neg(self) -> Self::Output {
        Self {
            x: -self.x,
            y: -self.y,
            z: -self.z,
        }
    }
}

impl Index<usize> for Vec3 {
    type Output = f64;
    fn index(&self, index: usize) -> &f64 {
        match index {
            0 => &self.x,
            1 => &self.y,
            2 => &self.z,
            _ => panic!("Vec3 index out of range: {}", index),
        }
    }
}
