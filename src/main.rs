#![allow(clippy::float_cmp)]
#[macro_use]
extern crate lazy_static;

mod camera;
mod material;
mod objects;
mod pipeline;
mod ray;
mod sampler;
mod scene;
mod texture;
mod vec3;

use crate::pipeline::Pipeline;
use crate::sampler::MultiSampler;
pub use ray::Ray;
use scene::select_scene;
use std::sync::Arc;
use std::time::SystemTime;
pub use vec3::Vec3;

fn is_ci() -> bool {
    option_env!("CI").unwrap_or_default() == "true"
}

pub struct GlobalConfig {
    // jobs: split image into how many parts
    // workers: maximum allowed concurrent running threads
    n_jobs_n_workers: (usize, usize),
    width: u32,
    height: u32,
    samples_per_pixel: u32,
    max_ray_depth: u32,
    seed: u64,
}

const WIDTH: u32 = 800;
const ASPECT_RATIO: f64 = 1.;
lazy_static! {
    pub static ref CONFIGS: GlobalConfig = GlobalConfig {
        n_jobs_n_workers: if is_ci() { (32, 2) } else { (64, 8) },
        width: WIDTH,
        height: (WIDTH as f64 / ASPECT_RATIO) as u32,
        samples_per_pixel: if is_ci() { 64 } else { 256 },
        max_ray_depth: 50,
        seed: 0,
    };
}

fn main() {
    let scene = Arc::new(select_scene(1));
    let start_time = SystemTime::now();

    let sampler = Arc::new(MultiSampler {
        scene,
        width: CONFIGS.width,
        height: CONFIGS.height,
        max_ray_depth: CONFIGS.max_ray_depth,
        samples_per_pixel: CONFIGS.samples_per_pixel,
    });
    let pipeline = Pipeline {
        width: CONFIGS.width,
        height: CONFIGS.height,
        n_jobs: CONFIGS.n_jobs_n_workers.0,
        n_workers: CONFIGS.n_jobs_n_workers.1,
        seed: CONFIGS.seed,
    };
    let result = pipeline.render(sampler);

    std::fs::create_dir_all("output").expect("failed to create output directory");
    result.save("output/test.png").expect("failed to save image");

    println!(
        "Total: {}s",
        SystemTime::now()
            .duration_since(start_time)
            .map(|d| d.as_secs())
            .unwrap_or_default(),
    );
}
