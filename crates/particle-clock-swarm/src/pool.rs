//! Ordered particle pool that follows the sampled point set.

use std::f32::consts::PI;

use particle_clock_core::Point;
use rand::{Rng, SeedableRng, rngs::StdRng};

use crate::particle::Particle;

/// How a reconciliation changed the pool.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Reconciled {
    /// Particles appended.
    pub spawned: usize,
    /// Particles removed from the tail.
    pub truncated: usize,
}

/// Particles bound to sampled points by index.
#[derive(Debug)]
pub struct ParticlePool {
    particles: Vec<Particle>,
    rng: StdRng,
    /// Smallest spawn radius in pixels.
    min_size: u32,
    /// Largest spawn radius in pixels.
    max_size: u32,
}

impl ParticlePool {
    /// Create an empty pool. Radii are drawn from `min_size..=max_size`.
    pub fn new(min_size: u32, max_size: u32, rng: StdRng) -> Self {
        let min_size = min_size.max(1);
        Self {
            particles: Vec::new(),
            rng,
            min_size,
            max_size: max_size.max(min_size),
        }
    }

    /// Create an empty pool with a reproducible RNG.
    pub fn seeded(min_size: u32, max_size: u32, seed: u64) -> Self {
        Self::new(min_size, max_size, StdRng::seed_from_u64(seed))
    }

    pub fn len(&self) -> usize {
        self.particles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }

    #[cfg(test)]
    fn get(&self, index: usize) -> Option<&Particle> {
        self.particles.get(index)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Particle> {
        self.particles.iter()
    }

    /// Send particle `i` toward `points[i]`, spawning particles as needed,
    /// then drop the particles past the end of `points`.
    ///
    /// `bounds` is the surface size new particles spawn around.
    pub fn reconcile(
        &mut self,
        points: &[Point],
        bounds: (u32, u32),
        elapsed_ms: u64,
        duration_ms: u64,
    ) -> Reconciled {
        let mut spawned = 0;
        for (i, &point) in points.iter().enumerate() {
            if i == self.particles.len() {
                let particle = self.spawn(bounds);
                self.particles.push(particle);
                spawned += 1;
            }
            self.particles[i].retarget(point, elapsed_ms, duration_ms);
        }

        let truncated = self.particles.len().saturating_sub(points.len());
        self.particles.truncate(points.len());

        Reconciled { spawned, truncated }
    }

    /// Step every particle to `elapsed_ms`. Returns how many are still moving.
    pub fn advance(&mut self, elapsed_ms: u64) -> usize {
        self.particles
            .iter_mut()
            .map(|p| p.advance(elapsed_ms))
            .filter(|&moving| moving)
            .count()
    }

    /// A new particle on the circle inscribed in the surface.
    fn spawn(&mut self, (width, height): (u32, u32)) -> Particle {
        let size = self.rng.random_range(self.min_size..=self.max_size) as f32;

        let radius = width.min(height) as f32 / 2.0;
        let degrees = self.rng.random_range(0..=360u32) as f32;
        let rad = degrees * PI / 180.0;
        let cx = width as f32 / 2.0;
        let cy = height as f32 / 2.0;

        Particle::new(cx + radius * rad.cos(), cy + radius * rad.sin(), size)
    }
}
