//! Cosmetic particle bursts
//!
//! Particles never feed back into scoring or consumption.

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::state::Color;
use crate::consts::*;

/// Life at or below this is treated as spent
///
/// Only covers f32 rounding left over from repeated subtraction. A decay that
/// divides 1.0 gives exactly `1 / decay` ticks (50 at [`PARTICLE_DECAY`]), which
/// plain `> 0.0` would miss when the running sum lands a hair above zero.
const LIFE_EPSILON: f32 = 1e-4;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Particle {
    pub pos: Vec2,
    pub vel: Vec2,
    pub color: Color,
    /// 1.0 at birth, removed once spent
    pub life: f32,
    /// Life lost per tick
    pub decay: f32,
}

impl Particle {
    fn step(&mut self) {
        self.pos += self.vel;
        self.vel *= PARTICLE_DAMPING;
        self.life -= self.decay;
    }

    pub fn is_alive(&self) -> bool {
        self.life > LIFE_EPSILON
    }
}

/// Active particles under a fixed budget
#[derive(Debug, Clone, Default)]
pub struct ParticleSystem {
    particles: Vec<Particle>,
    budget: usize,
}

impl ParticleSystem {
    pub fn new(budget: usize) -> Self {
        Self {
            particles: Vec::with_capacity(budget),
            budget,
        }
    }

    /// Shrinking the budget drops the newest particles first
    pub fn set_budget(&mut self, budget: usize) {
        self.budget = budget;
        self.particles.truncate(budget);
    }

    /// Spawn up to `count` particles at `pos`; returns how many fit the budget
    pub fn spawn<R: Rng + ?Sized>(
        &mut self,
        rng: &mut R,
        pos: Vec2,
        color: Color,
        count: u32,
    ) -> u32 {
        let room = self.budget.saturating_sub(self.particles.len());
        let n = (count as usize).min(room);
        for _ in 0..n {
            let vel = Vec2::new(
                rng.random_range(-PARTICLE_SPEED..PARTICLE_SPEED),
                rng.random_range(-PARTICLE_SPEED..PARTICLE_SPEED),
            );
            self.particles.push(Particle {
                pos,
                vel,
                color,
                life: 1.0,
                decay: PARTICLE_DECAY,
            });
        }
        n as u32
    }

    /// Advance every particle one tick and drop spent ones
    pub fn tick(&mut self) {
        for particle in self.particles.iter_mut() {
            particle.step();
        }
        self.particles.retain(Particle::is_alive);
    }

    pub fn as_slice(&self) -> &[Particle] {
        &self.particles
    }

    pub fn len(&self) -> usize {
        self.particles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }

    pub fn clear(&mut self) {
        self.particles.clear();
    }
}
