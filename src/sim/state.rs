//! Game state and core simulation types
//!
//! Everything a session mutates lives in [`GameState`]; the session shell only
//! drives it through the functions in `tick`.

use std::collections::BTreeMap;

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::particles::ParticleSystem;
use super::player::Player;
use super::zones::ZoneMap;
use crate::consts::*;
use crate::error::{Result, check_dimensions};

/// Current phase of a session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Main menu, nothing simulated
    Start,
    /// Active gameplay
    Playing,
    /// Clock ran out (or the run was ended early)
    GameOver,
}

/// Opaque display color, stored as 0xRRGGBB
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Color(pub u32);

impl Color {
    pub const fn rgb(hex: u32) -> Self {
        Self(hex & 0x00ff_ffff)
    }

    /// Linear-ish RGBA for the draw pass
    pub fn to_rgba(self, alpha: f32) -> [f32; 4] {
        let r = ((self.0 >> 16) & 0xff) as f32 / 255.0;
        let g = ((self.0 >> 8) & 0xff) as f32 / 255.0;
        let b = (self.0 & 0xff) as f32 / 255.0;
        [r, g, b, alpha]
    }
}

/// Rendering hint only - consumption always treats objects as circles
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ObjectShape {
    Circle,
    Square,
    Triangle,
}

/// Category of a consumable city object
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ObjectKind {
    Trash,
    Sign,
    Drone,
    Hovercar,
    Billboard,
    Building,
}

impl ObjectKind {
    pub const ALL: [ObjectKind; 6] = [
        ObjectKind::Trash,
        ObjectKind::Sign,
        ObjectKind::Drone,
        ObjectKind::Hovercar,
        ObjectKind::Billboard,
        ObjectKind::Building,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ObjectKind::Trash => "trash",
            ObjectKind::Sign => "sign",
            ObjectKind::Drone => "drone",
            ObjectKind::Hovercar => "hovercar",
            ObjectKind::Billboard => "billboard",
            ObjectKind::Building => "building",
        }
    }
}

/// A consumable entity placed in the world
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorldObject {
    /// Unique within a session, never reused
    pub id: u32,
    pub pos: Vec2,
    /// Consumption radius
    pub size: f32,
    pub shape: ObjectShape,
    pub kind: ObjectKind,
    pub points: u32,
    pub color: Color,
    /// District the object was generated in
    pub zone: Option<String>,
}

/// Arena of live objects keyed by id
///
/// Iteration through [`ObjectSet::iter`] is ascending by id, which keeps
/// consumption order stable. Draw order is the generator's shuffled order.
#[derive(Debug, Clone, Default)]
pub struct ObjectSet {
    objects: BTreeMap<u32, WorldObject>,
    draw_order: Vec<u32>,
}

impl ObjectSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Take ownership of a generated batch, keeping its order for drawing
    pub fn from_objects(objects: Vec<WorldObject>) -> Self {
        let mut set = Self::new();
        for obj in objects {
            set.insert(obj);
        }
        set
    }

    /// Insert an object; an existing object with the same id is replaced in place
    pub fn insert(&mut self, obj: WorldObject) {
        let id = obj.id;
        if self.objects.insert(id, obj).is_none() {
            self.draw_order.push(id);
        }
    }

    pub fn len(&self) -> usize {
        self.objects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }

    pub fn get(&self, id: u32) -> Option<&WorldObject> {
        self.objects.get(&id)
    }

    pub fn contains(&self, id: u32) -> bool {
        self.objects.contains_key(&id)
    }

    /// Objects ascending by id
    pub fn iter(&self) -> impl Iterator<Item = &WorldObject> {
        self.objects.values()
    }

    /// Objects in draw order
    pub fn in_draw_order(&self) -> impl Iterator<Item = &WorldObject> {
        self.draw_order.iter().filter_map(|id| self.objects.get(id))
    }

    /// Remove a batch of ids, returning the removed objects ascending by id
    pub fn remove_many(&mut self, ids: &[u32]) -> Vec<WorldObject> {
        let mut removed: Vec<WorldObject> =
            ids.iter().filter_map(|id| self.objects.remove(id)).collect();
        if !removed.is_empty() {
            self.draw_order.retain(|id| self.objects.contains_key(id));
        }
        removed.sort_by_key(|o| o.id);
        removed
    }

    pub fn remove(&mut self, id: u32) -> Option<WorldObject> {
        self.remove_many(&[id]).pop()
    }

    pub fn clear(&mut self) {
        self.objects.clear();
        self.draw_order.clear();
    }
}

/// A generated population held back until the initialization delay elapses
#[derive(Debug, Clone)]
pub struct PendingObjects {
    pub objects: ObjectSet,
    pub remaining_ms: f64,
}

/// Something the simulation wants observers to know about
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum GameEvent {
    /// An object was swallowed this tick
    Consumed {
        id: u32,
        kind: ObjectKind,
        points: u32,
        size: f32,
        pos: Vec2,
        color: Color,
    },
    /// A particle burst was spawned at a consumption site
    ParticleBurst { pos: Vec2, color: Color, count: u32 },
    /// Player crossed into a different district
    ZoneChanged {
        name: String,
        description: String,
        previous: Option<String>,
    },
    /// The generated population became live
    ObjectsReady { count: usize },
    /// Session ended
    GameOver { score: u64, new_high_score: bool },
}

/// World rectangle size
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WorldSize {
    pub width: f32,
    pub height: f32,
}

impl WorldSize {
    pub fn new(width: f32, height: f32) -> Result<Self> {
        check_dimensions(width, height)?;
        Ok(Self { width, height })
    }

    pub fn center(&self) -> Vec2 {
        Vec2::new(self.width / 2.0, self.height / 2.0)
    }

    /// Clamp a point into the world rectangle
    pub fn clamp(&self, p: Vec2) -> Vec2 {
        Vec2::new(p.x.clamp(0.0, self.width), p.y.clamp(0.0, self.height))
    }
}

/// Complete session state (deterministic given seed and inputs)
#[derive(Debug, Clone)]
pub struct GameState {
    /// Run seed for reproducibility
    pub seed: u64,
    /// Shared RNG for generation and particles
    pub rng: Pcg32,
    pub phase: GamePhase,
    pub score: u64,
    /// Whole seconds left on the countdown
    pub time_remaining: u32,
    pub world: WorldSize,
    pub player: Player,
    /// Latest sanitized pointer target
    pub target: Vec2,
    /// Live objects (empty while generation is pending)
    pub objects: ObjectSet,
    pub pending: Option<PendingObjects>,
    /// Visual particles (not gameplay-affecting)
    pub particles: ParticleSystem,
    pub zones: ZoneMap,
    /// Index into `zones` of the last district the player stood in
    pub current_zone: Option<usize>,
    /// Gameplay tick counter for the current session
    pub time_ticks: u64,
    /// Events raised since the last drain
    pub events: Vec<GameEvent>,
}

impl GameState {
    /// Create a new state on the main menu
    pub fn new(seed: u64, width: f32, height: f32, particle_budget: usize) -> Result<Self> {
        let world = WorldSize::new(width, height)?;
        let zones = ZoneMap::city(width, height)?;
        Ok(Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
            phase: GamePhase::Start,
            score: 0,
            time_remaining: SESSION_SECONDS,
            world,
            player: Player::new(world.center()),
            target: world.center(),
            objects: ObjectSet::new(),
            pending: None,
            particles: ParticleSystem::new(particle_budget),
            zones,
            current_zone: None,
            time_ticks: 0,
            events: Vec::new(),
        })
    }

    /// True once the generated population is live
    pub fn objects_ready(&self) -> bool {
        self.pending.is_none()
    }

    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }
}
