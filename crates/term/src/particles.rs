//! Line-clear and lock sparkle effects.
//!
//! Purely cosmetic: particles are spawned from the core's cell events and never feed
//! back into the game. Positions and velocities are in board cells (and cells per frame).

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::types::{Cell, CellEvent, CellEventCause};

/// Particles spawned per locked cell.
pub const LOCK_BURST: usize = 5;

/// Particles spawned per cleared cell.
pub const LINE_CLEAR_BURST: usize = 8;

/// Frames a particle lives (about half a second at 60 FPS).
pub const PARTICLE_LIFE: u8 = 30;

/// Upper bound on live particles; bursts beyond it are dropped.
pub const MAX_PARTICLES: usize = 4096;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Particle {
    pub x: f32,
    pub y: f32,
    pub vx: f32,
    pub vy: f32,
    pub life: u8,
    pub color: Cell,
    pub size: f32,
}

#[derive(Debug, Clone)]
pub struct ParticleField {
    particles: Vec<Particle>,
    rng: StdRng,
}

impl ParticleField {
    pub fn new(seed: u64) -> Self {
        Self {
            particles: Vec::new(),
            rng: StdRng::seed_from_u64(seed),
        }
    }

    pub fn from_entropy() -> Self {
        Self {
            particles: Vec::new(),
            rng: StdRng::from_entropy(),
        }
    }

    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    pub fn len(&self) -> usize {
        self.particles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }

    /// Spawn a burst at the center of the event's cell.
    pub fn emit(&mut self, event: &CellEvent) {
        let count = match event.cause {
            CellEventCause::Lock => LOCK_BURST,
            CellEventCause::LineClear => LINE_CLEAR_BURST,
        };
        let room = MAX_PARTICLES.saturating_sub(self.particles.len());

        for _ in 0..count.min(room) {
            let particle = Particle {
                x: event.x as f32 + 0.5,
                y: event.y as f32 + 0.5,
                vx: (self.rng.gen::<f32>() - 0.5) * 0.3,
                vy: (self.rng.gen::<f32>() - 0.5) * 0.3,
                life: PARTICLE_LIFE,
                color: event.color,
                size: self.rng.gen::<f32>() * 0.2 + 0.05,
            };
            self.particles.push(particle);
        }
    }

    /// Advance one frame: move every particle and drop the expired ones.
    pub fn step(&mut self) {
        self.particles.retain_mut(|p| {
            p.x += p.vx;
            p.y += p.vy;
            p.life = p.life.saturating_sub(1);
            p.life > 0
        });
    }

    pub fn clear(&mut self) {
        self.particles.clear();
    }
}

impl Default for ParticleField {
    fn default() -> Self {
        Self::from_entropy()
    }
}
