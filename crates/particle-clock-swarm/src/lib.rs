//! Particle swarm for the particle-clock.
//!
//! Once per cycle the [`Sampler`] rasterizes the time string offscreen and
//! scans it for visible pixels. The [`ParticlePool`] grows or shrinks to one
//! particle per sampled point and sends every particle toward its point. Each
//! frame the particles are advanced from elapsed wall-clock time and drawn by
//! [`SwarmState::render`].

mod particle;
mod pool;
mod sampler;
mod shape;
mod state;

pub use particle::{Particle, Transition};
pub use pool::{ParticlePool, Reconciled};
pub use sampler::{Sampler, VISIBLE_ALPHA, scan};
pub use shape::Disc;
pub use state::{SwarmOptions, SwarmState};
