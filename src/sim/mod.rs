//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed-period ticks only
//! - Seeded RNG only
//! - Stable iteration order (by object ID)
//! - No rendering, platform, or ambient window dependencies

pub mod clock;
pub mod collision;
pub mod generator;
pub mod particles;
pub mod player;
pub mod state;
pub mod tick;
pub mod zones;

pub use clock::{Fires, SimClock, TimerKind};
pub use collision::{Resolution, can_consume, resolve};
pub use generator::generate;
pub use particles::{Particle, ParticleSystem};
pub use player::Player;
pub use state::{
    Color, GameEvent, GamePhase, GameState, ObjectKind, ObjectSet, ObjectShape, WorldObject,
    WorldSize,
};
pub use tick::{TickInput, TickParams, countdown_tick, tick};
pub use zones::{Extent, Rect, SpawnEntry, Zone, ZoneMap};
