//! Fixed-period simulation ticks and session transitions
//!
//! Within one gameplay tick: player follow -> zone lookup -> consumption ->
//! particle spawn. Particle decay runs last and touches nothing else.

use glam::Vec2;

use super::collision::resolve;
use super::state::{GameEvent, GamePhase, GameState, ObjectSet, PendingObjects, WorldObject};
use crate::consts::*;

/// Input sampled for a single tick
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Latest pointer position in world coordinates (already sanitized)
    pub target: Option<Vec2>,
}

/// Per-tick tunables taken from settings
#[derive(Debug, Clone, Copy)]
pub struct TickParams {
    pub burst_particles: u32,
}

impl Default for TickParams {
    fn default() -> Self {
        Self {
            burst_particles: PARTICLES_PER_CONSUME,
        }
    }
}

/// Advance gameplay by one 16 ms tick
///
/// No-op outside `Playing` and while the object set is still pending.
pub fn tick(state: &mut GameState, input: &TickInput, params: &TickParams) {
    if state.phase != GamePhase::Playing {
        return;
    }
    if let Some(target) = input.target {
        state.target = target;
    }
    if !state.objects_ready() {
        return;
    }

    state.time_ticks += 1;

    state.player = state.player.follow(state.target);

    update_zone(state);

    let objects = std::mem::take(&mut state.objects);
    let resolution = resolve(&state.player, objects);
    state.objects = resolution.remaining;

    for obj in resolution.consumed {
        state.score += obj.points as u64;
        state.player = state.player.grown(obj.size);
        state.events.push(GameEvent::Consumed {
            id: obj.id,
            kind: obj.kind,
            points: obj.points,
            size: obj.size,
            pos: obj.pos,
            color: obj.color,
        });

        let count = state
            .particles
            .spawn(&mut state.rng, obj.pos, obj.color, params.burst_particles);
        state.events.push(GameEvent::ParticleBurst {
            pos: obj.pos,
            color: obj.color,
            count,
        });
    }

    state.particles.tick();
}

/// Track the district under the player; leaving every district keeps the last one
fn update_zone(state: &mut GameState) {
    let Some(index) = state.zones.index_at(state.player.pos) else {
        return;
    };
    if state.current_zone == Some(index) {
        return;
    }
    let previous = state
        .current_zone
        .and_then(|i| state.zones.get(i))
        .map(|z| z.name.clone());
    state.current_zone = Some(index);

    if let Some(zone) = state.zones.get(index) {
        log::debug!("Zone changed: {:?} -> {}", previous, zone.name);
        state.events.push(GameEvent::ZoneChanged {
            name: zone.name.clone(),
            description: zone.description.clone(),
            previous,
        });
    }
}

/// Count down the held-back population; returns true when it goes live
pub fn advance_generation(state: &mut GameState, elapsed_ms: f64) -> bool {
    if state.phase != GamePhase::Playing {
        return false;
    }
    let Some(pending) = state.pending.as_mut() else {
        return false;
    };
    if elapsed_ms.is_finite() && elapsed_ms > 0.0 {
        pending.remaining_ms -= elapsed_ms;
    }
    if pending.remaining_ms > 0.0 {
        return false;
    }
    if let Some(pending) = state.pending.take() {
        state.objects = pending.objects;
        log::info!("{} objects live", state.objects.len());
        state.events.push(GameEvent::ObjectsReady {
            count: state.objects.len(),
        });
    }
    true
}

/// One second of countdown; returns true if this tick ended the session
pub fn countdown_tick(state: &mut GameState) -> bool {
    if state.phase != GamePhase::Playing {
        return false;
    }
    if state.time_remaining <= 1 {
        state.time_remaining = 0;
        return enter_game_over(state);
    }
    state.time_remaining -= 1;
    false
}

/// Full reset into `Playing` with a freshly generated population
pub fn begin_session(state: &mut GameState, objects: Vec<WorldObject>, delay_ms: f64) {
    state.score = 0;
    state.time_remaining = SESSION_SECONDS;
    state.time_ticks = 0;
    state.player.reset(state.world.center());
    state.target = state.world.center();
    state.objects.clear();
    state.particles.clear();
    state.current_zone = None;
    state.events.clear();

    let objects = ObjectSet::from_objects(objects);
    state.pending = Some(PendingObjects {
        objects,
        remaining_ms: delay_ms,
    });
    state.phase = GamePhase::Playing;

    // A zero delay goes live immediately
    advance_generation(state, 0.0);
}

/// Move to `GameOver`; returns false if already there (or never started)
pub fn enter_game_over(state: &mut GameState) -> bool {
    if state.phase != GamePhase::Playing {
        return false;
    }
    state.phase = GamePhase::GameOver;
    state.pending = None;
    true
}

/// Back to the main menu
pub fn return_to_start(state: &mut GameState) {
    state.phase = GamePhase::Start;
    state.current_zone = None;
    state.pending = None;
    state.objects.clear();
    state.particles.clear();
}
