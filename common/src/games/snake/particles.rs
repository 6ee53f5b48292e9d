use serde::{Deserialize, Serialize};

use crate::games::SessionRng;
use super::types::Point;

pub const MAX_PARTICLES: usize = 256;

const LIFE_DECAY_PER_FRAME: f32 = 0.02;
const MAX_SPEED_CELLS_PER_FRAME: f32 = 0.05;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum ParticleKind {
    Food,
    Bonus,
    LevelUp,
}

/// Cosmetic only. Position and size are in cell units.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Particle {
    pub x: f32,
    pub y: f32,
    pub vx: f32,
    pub vy: f32,
    pub size: f32,
    pub life: f32,
    pub kind: ParticleKind,
}

#[derive(Clone, Debug, Default)]
pub struct ParticleField {
    particles: Vec<Particle>,
}

impl ParticleField {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn burst(&mut self, cell: Point, kind: ParticleKind, count: usize, rng: &mut SessionRng) {
        let free = MAX_PARTICLES.saturating_sub(self.particles.len());
        for _ in 0..count.min(free) {
            self.particles.push(Particle {
                x: cell.x as f32 + 0.5,
                y: cell.y as f32 + 0.5,
                vx: rng.random_range(-MAX_SPEED_CELLS_PER_FRAME..MAX_SPEED_CELLS_PER_FRAME),
                vy: rng.random_range(-MAX_SPEED_CELLS_PER_FRAME..MAX_SPEED_CELLS_PER_FRAME),
                size: rng.random_range(0.05..0.2),
                life: 1.0,
                kind,
            });
        }
    }

    pub fn advance(&mut self) {
        for particle in &mut self.particles {
            particle.x += particle.vx;
            particle.y += particle.vy;
            particle.life -= LIFE_DECAY_PER_FRAME;
        }
        self.particles.retain(|p| p.life > 0.0);
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
}
