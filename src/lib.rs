//! Neon Sinkhole - a cyberpunk city-swallowing arcade game
//!
//! Core modules:
//! - `sim`: Deterministic simulation (player, objects, consumption, particles, zones)
//! - `session`: Session shell driving the simulation on fixed-period timers
//! - `snapshot`: Read-only per-tick view for renderers and the HUD
//! - `renderer`: WebGPU draw pass
//! - `highscores` / `settings`: LocalStorage-backed persistence

pub mod error;
pub mod highscores;
pub mod notify;
pub mod renderer;
pub mod session;
pub mod settings;
pub mod sim;
pub mod snapshot;

pub use error::{Result, SimError};
pub use highscores::{HighScore, HighScoreStore};
pub use notify::{Notification, NotificationQueue, NotificationSink};
pub use session::Session;
pub use settings::{QualityPreset, Settings};
pub use snapshot::Snapshot;

/// Game configuration constants
pub mod consts {
    /// Gameplay timer period (player follow, consumption, particles)
    pub const GAMEPLAY_TICK_MS: f64 = 16.0;
    /// Countdown timer period
    pub const COUNTDOWN_TICK_MS: f64 = 1000.0;
    /// Maximum gameplay ticks run for one `advance` call to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 8;

    /// Session length in seconds
    pub const SESSION_SECONDS: u32 = 120;

    /// Player defaults
    pub const PLAYER_START_RADIUS: f32 = 20.0;
    pub const PLAYER_MAX_RADIUS: f32 = 150.0;
    /// Fraction of the remaining distance to the pointer covered each tick
    pub const FOLLOW_FACTOR: f32 = 0.1;
    /// Radius gained per unit of consumed object size
    pub const GROWTH_FACTOR: f32 = 0.1;

    /// Object generation
    pub const SPAWN_MARGIN: f32 = 50.0;
    pub const BASE_COUNT_PER_ZONE: u32 = 15;
    /// Upper bounds for user-editable generation settings
    pub const MAX_BASE_COUNT_PER_ZONE: u32 = 200;
    pub const MAX_GENERATION_DELAY_MS: u32 = 5000;

    /// Particle defaults
    pub const PARTICLE_DECAY: f32 = 0.02;
    pub const PARTICLE_DAMPING: f32 = 0.98;
    /// Maximum initial speed along each axis (units per tick)
    pub const PARTICLE_SPEED: f32 = 4.0;
    pub const PARTICLES_PER_CONSUME: u32 = 6;
}

/// Format whole seconds as `m:ss` for the countdown display
pub fn format_time(seconds: u32) -> String {
    format!("{}:{:02}", seconds / 60, seconds % 60)
}

/// Format a score with comma thousands separators
pub fn format_score(score: u64) -> String {
    let digits = score.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_time() {
        assert_eq!(format_time(120), "2:00");
        assert_eq!(format_time(65), "1:05");
        assert_eq!(format_time(9), "0:09");
        assert_eq!(format_time(0), "0:00");
    }

    #[test]
    fn test_format_score() {
        assert_eq!(format_score(0), "0");
        assert_eq!(format_score(999), "999");
        assert_eq!(format_score(1000), "1,000");
        assert_eq!(format_score(1234567), "1,234,567");
    }
}
