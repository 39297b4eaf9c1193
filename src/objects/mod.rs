pub mod aabb;
pub mod bvh;
pub mod cube;
pub mod hit;
pub mod medium;
pub mod rectangle;
pub mod sphere;
pub mod transform;
