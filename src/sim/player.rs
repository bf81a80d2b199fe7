//! The player's void: inertial pointer follow and saturating growth

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::consts::*;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Player {
    pub pos: Vec2,
    pub radius: f32,
}

impl Player {
    pub fn new(pos: Vec2) -> Self {
        Self {
            pos,
            radius: PLAYER_START_RADIUS,
        }
    }

    /// Next position after one tick of exponential smoothing toward `target`
    #[must_use]
    pub fn follow(self, target: Vec2) -> Self {
        Self {
            pos: self.pos + (target - self.pos) * FOLLOW_FACTOR,
            ..self
        }
    }

    /// Radius after swallowing an object of the given size (capped)
    #[must_use]
    pub fn grown(self, size: f32) -> Self {
        Self {
            radius: (self.radius + size * GROWTH_FACTOR).min(PLAYER_MAX_RADIUS),
            ..self
        }
    }

    /// Recenter and shrink back to the starting radius
    pub fn reset(&mut self, center: Vec2) {
        *self = Self::new(center);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_follow_moves_ten_percent() {
        let p = Player::new(Vec2::ZERO).follow(Vec2::new(100.0, -50.0));
        assert!((p.pos.x - 10.0).abs() < 1e-5);
        assert!((p.pos.y + 5.0).abs() < 1e-5);
        assert_eq!(p.radius, PLAYER_START_RADIUS);
    }

    #[test]
    fn test_follow_converges() {
        let target = Vec2::new(300.0, 200.0);
        let mut p = Player::new(Vec2::ZERO);
        for _ in 0..200 {
            p = p.follow(target);
        }
        assert!(p.pos.distance(target) < 0.01);
    }

    #[test]
    fn test_growth_saturates() {
        let mut p = Player::new(Vec2::ZERO);
        p = p.grown(40.0);
        assert!((p.radius - 24.0).abs() < 1e-5);

        for _ in 0..1000 {
            let before = p.radius;
            p = p.grown(60.0);
            assert!(p.radius >= before);
        }
        assert_eq!(p.radius, PLAYER_MAX_RADIUS);
    }

    #[test]
    fn test_reset() {
        let mut p = Player::new(Vec2::ZERO).grown(100.0);
        p.reset(Vec2::new(50.0, 60.0));
        assert_eq!(p, Player::new(Vec2::new(50.0, 60.0)));
    }
}
