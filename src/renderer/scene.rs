//! Frame assembly: snapshot in, vertex list out
//!
//! Draw order is back to front: grid, districts, objects, particles, player.

use glam::Vec2;

use super::shapes;
use super::vertex::{Vertex, colors, with_alpha};
use crate::settings::Settings;
use crate::sim::{GamePhase, ObjectShape};
use crate::snapshot::{ObjectView, Snapshot};

const GRID_SPACING: f32 = 50.0;
const PARTICLE_RADIUS: f32 = 2.0;
const RIM_WIDTH: f32 = 3.0;

/// Build the full vertex list for one frame
pub fn build_frame(snapshot: &Snapshot<'_>, settings: &Settings) -> Vec<Vertex> {
    let segments = settings.quality.circle_segments();
    let mut out = Vec::with_capacity(4096);

    grid(&mut out, snapshot.world_width, snapshot.world_height);
    if snapshot.phase == GamePhase::Start {
        return out;
    }

    if settings.district_overlay {
        let current = snapshot.current_zone.map(|z| z.name);
        for zone in snapshot.zones {
            let active = current == Some(zone.name.as_str());
            let (alpha, width) = if active { (0.5, 3.0) } else { (0.125, 1.0) };
            shapes::rect_outline(&mut out, &zone.bounds, width, zone.overlay.to_rgba(alpha));
        }
    }

    for view in &snapshot.objects {
        object(&mut out, view, segments);
    }

    for p in snapshot.particles {
        shapes::circle(
            &mut out,
            p.pos,
            PARTICLE_RADIUS,
            p.color.to_rgba(p.life.clamp(0.0, 1.0)),
            6,
        );
    }

    let player = snapshot.player;
    shapes::ring(
        &mut out,
        player.pos,
        player.radius,
        player.radius + RIM_WIDTH * 3.0,
        colors::RIM_GLOW,
        segments,
    );
    shapes::radial_circle(
        &mut out,
        player.pos,
        player.radius,
        colors::VOID,
        colors::VOID_EDGE,
        segments,
    );
    shapes::ring(
        &mut out,
        player.pos,
        (player.radius - RIM_WIDTH).max(0.0),
        player.radius,
        colors::RIM,
        segments,
    );

    out
}

/// Faint cyan lines every 50 px
fn grid(out: &mut Vec<Vertex>, width: f32, height: f32) {
    let mut x = 0.0;
    while x <= width {
        shapes::line(out, Vec2::new(x, 0.0), Vec2::new(x, height), 1.0, colors::GRID);
        x += GRID_SPACING;
    }
    let mut y = 0.0;
    while y <= height {
        shapes::line(out, Vec2::new(0.0, y), Vec2::new(width, y), 1.0, colors::GRID);
        y += GRID_SPACING;
    }
}

/// Swallowable objects glow; the rest are drawn half transparent
fn object(out: &mut Vec<Vertex>, view: &ObjectView<'_>, segments: u32) {
    let obj = view.object;
    let fill = obj.color.to_rgba(if view.consumable { 1.0 } else { 0.5 });

    if view.consumable {
        shapes::circle(
            out,
            obj.pos,
            obj.size * 1.4,
            with_alpha(fill, 0.2),
            segments,
        );
    }

    match obj.shape {
        ObjectShape::Circle => shapes::circle(out, obj.pos, obj.size, fill, segments),
        ObjectShape::Square => shapes::square(out, obj.pos, obj.size, fill),
        ObjectShape::Triangle => shapes::triangle(out, obj.pos, obj.size, fill),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::tick::begin_session;
    use crate::sim::{Color, GameState, ObjectKind, WorldObject};

    fn square_object(id: u32, size: f32) -> WorldObject {
        WorldObject {
            id,
            pos: Vec2::new(100.0, 100.0),
            size,
            shape: ObjectShape::Square,
            kind: ObjectKind::Sign,
            points: 25,
            color: Color::rgb(0xffff00),
            zone: None,
        }
    }

    fn overlay_off() -> Settings {
        Settings {
            district_overlay: false,
            ..Settings::default()
        }
    }

    #[test]
    fn test_start_screen_only_draws_grid() {
        let state = GameState::new(1, 100.0, 100.0, 10).unwrap();
        let frame = build_frame(&Snapshot::capture(&state), &Settings::default());
        // 3 vertical + 3 horizontal lines
        assert_eq!(frame.len(), 6 * 6);
        assert!(frame.iter().all(|v| v.color == colors::GRID));
    }

    #[test]
    fn test_consumable_objects_are_opaque() {
        let mut state = GameState::new(1, 1000.0, 1000.0, 10).unwrap();
        begin_session(&mut state, vec![square_object(1, 10.0)], 0.0);
        let frame = build_frame(&Snapshot::capture(&state), &overlay_off());
        let yellow = Color::rgb(0xffff00).to_rgba(1.0);
        assert_eq!(frame.iter().filter(|v| v.color == yellow).count(), 6);
    }

    #[test]
    fn test_oversized_objects_are_faded() {
        let mut state = GameState::new(1, 1000.0, 1000.0, 10).unwrap();
        begin_session(&mut state, vec![square_object(1, 40.0)], 0.0);
        let frame = build_frame(&Snapshot::capture(&state), &overlay_off());
        let faded = Color::rgb(0xffff00).to_rgba(0.5);
        assert_eq!(frame.iter().filter(|v| v.color == faded).count(), 6);
    }

    #[test]
    fn test_overlay_toggle() {
        let mut state = GameState::new(1, 1000.0, 1000.0, 10).unwrap();
        begin_session(&mut state, Vec::new(), 0.0);
        let snap = Snapshot::capture(&state);
        let with = build_frame(&snap, &Settings::default());
        let without = build_frame(&snap, &overlay_off());
        // Four bars per district outline
        assert_eq!(with.len() - without.len(), snap.zones.len() * 4 * 6);
    }
}
