//! Read-only per-tick view for renderers and the HUD

use serde::Serialize;

use crate::sim::{GamePhase, GameState, Particle, Player, WorldObject, Zone};

/// An object plus whether the player could swallow it by size alone
#[derive(Debug, Clone, Serialize)]
pub struct ObjectView<'a> {
    #[serde(flatten)]
    pub object: &'a WorldObject,
    pub consumable: bool,
}

/// Name and flavor text of the current district
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ZoneLabel<'a> {
    pub name: &'a str,
    pub description: &'a str,
}

#[derive(Debug, Clone, Serialize)]
pub struct Snapshot<'a> {
    pub phase: GamePhase,
    pub player: Player,
    /// Live objects in draw order
    pub objects: Vec<ObjectView<'a>>,
    pub particles: &'a [Particle],
    pub zones: &'a [Zone],
    pub current_zone: Option<ZoneLabel<'a>>,
    pub score: u64,
    pub time_remaining: u32,
    pub world_width: f32,
    pub world_height: f32,
    /// Generation still pending
    pub loading: bool,
}

impl<'a> Snapshot<'a> {
    pub fn capture(state: &'a GameState) -> Self {
        let player = state.player;
        let objects = state
            .objects
            .in_draw_order()
            .map(|object| ObjectView {
                object,
                consumable: object.size < player.radius,
            })
            .collect();
        let current_zone = state
            .current_zone
            .and_then(|i| state.zones.get(i))
            .map(|z| ZoneLabel {
                name: &z.name,
                description: &z.description,
            });

        Self {
            phase: state.phase,
            player,
            objects,
            particles: state.particles.as_slice(),
            zones: state.zones.zones(),
            current_zone,
            score: state.score,
            time_remaining: state.time_remaining,
            world_width: state.world.width,
            world_height: state.world.height,
            loading: state.phase == GamePhase::Playing && !state.objects_ready(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::tick::begin_session;
    use crate::sim::{Color, ObjectKind, ObjectShape};
    use glam::Vec2;

    fn object(id: u32, x: f32, size: f32) -> WorldObject {
        WorldObject {
            id,
            pos: Vec2::new(x, 500.0),
            size,
            shape: ObjectShape::Triangle,
            kind: ObjectKind::Drone,
            points: 50,
            color: Color::rgb(0xff00ff),
            zone: Some("Residential".into()),
        }
    }

    #[test]
    fn test_capture_marks_consumable() {
        let mut state = GameState::new(3, 1000.0, 1000.0, 50).unwrap();
        begin_session(
            &mut state,
            vec![object(1, 505.0, 10.0), object(2, 900.0, 30.0)],
            0.0,
        );
        let snap = Snapshot::capture(&state);
        assert_eq!(snap.objects.len(), 2);
        assert!(snap.objects.iter().any(|v| v.object.id == 1 && v.consumable));
        assert!(snap.objects.iter().any(|v| v.object.id == 2 && !v.consumable));
        assert!(!snap.loading);
        assert_eq!(snap.current_zone, None);
    }

    #[test]
    fn test_snapshot_serializes() {
        let mut state = GameState::new(3, 800.0, 600.0, 50).unwrap();
        begin_session(&mut state, vec![object(7, 100.0, 10.0)], 0.0);
        let json = serde_json::to_string(&Snapshot::capture(&state)).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["phase"], "Playing");
        assert_eq!(value["objects"][0]["id"], 7);
        assert_eq!(value["objects"][0]["kind"], "drone");
        assert_eq!(value["objects"][0]["consumable"], true);
        assert_eq!(value["time_remaining"], 120);
    }
}
