use crate::sampler::Sampler;
use image::{ImageBuffer, Rgb, RgbImage};
use indicatif::ProgressBar;
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::sync::mpsc::channel;
use std::sync::Arc;
use threadpool::ThreadPool;

/// Renders an image by splitting it into `n_jobs` horizontal bands and
/// farming them out to a pool of `n_workers` threads. Each job owns a
/// seeded rng of its own, so bands are statistically independent and a
/// fixed `seed` reproduces the image exactly.
pub struct Pipeline {
    pub width: u32,
    pub height: u32,
    pub n_jobs: usize,
    pub n_workers: usize,
    pub seed: u64,
}

impl Pipeline {
    pub fn render(&self, sampler: Arc<dyn Sampler>) -> RgbImage {
        let pool = ThreadPool::new(self.n_workers);
        let bar = ProgressBar::new(self.n_jobs as u64);
        let (tx, rx) = channel();
        for i in 0..self.n_jobs {
            let tx = tx.clone();
            let sampler = sampler.clone();
            let (width, height) = (self.width, self.height);
            let (n_jobs, seed) = (self.n_jobs, self.seed);
            pool.execute(move || {
                let row_begin = height as usize * i / n_jobs;
                let row_end = height as usize * (i + 1) / n_jobs;
                let band_height = row_end - row_begin;
                let mut band: RgbImage = ImageBuffer::new(width, band_height as u32);

                let mut rng = StdRng::seed_from_u64(seed.wrapping_add(i as u64));
                for col in 0..width {
                    // band_row is the row within this band, row the position
                    // in the final image
                    for (band_row, row) in (row_begin..row_end).enumerate() {
                        let color = sampler.sample(row as u32, col, &mut rng);
                        *band.get_pixel_mut(col, band_row as u32) = Rgb::from(color);
                    }
                }
                tx.send((row_begin..row_end, band))
                    .expect("failed to send result");
            });
        }

        let mut result: RgbImage = ImageBuffer::new(self.width, self.height);
        for (rows, band) in rx.iter().take(self.n_jobs) {
            for (band_row, row) in rows.enumerate() {
                for col in 0..self.width {
                    *result.get_pixel_mut(col, row as u32) =
                        *band.get_pixel(col, band_row as u32);
                }
            }
            bar.inc(1);
        }
        bar.finish();
        result
    }
}
