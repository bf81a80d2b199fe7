//! Triangle-list tessellation for 2D primitives
//!
//! All functions append to an output buffer in world pixels (y down).

use glam::Vec2;
use std::f32::consts::TAU;

use super::vertex::Vertex;
use crate::sim::Rect;

fn push_quad(out: &mut Vec<Vertex>, a: Vec2, b: Vec2, c: Vec2, d: Vec2, color: [f32; 4]) {
    for p in [a, b, c, c, b, d] {
        out.push(Vertex::new(p.x, p.y, color));
    }
}

/// Filled circle as a triangle fan
pub fn circle(out: &mut Vec<Vertex>, center: Vec2, radius: f32, color: [f32; 4], segments: u32) {
    let segments = segments.max(3);
    for i in 0..segments {
        let p1 = center + Vec2::from_angle(i as f32 / segments as f32 * TAU) * radius;
        let p2 = center + Vec2::from_angle((i + 1) as f32 / segments as f32 * TAU) * radius;
        out.push(Vertex::new(center.x, center.y, color));
        out.push(Vertex::new(p1.x, p1.y, color));
        out.push(Vertex::new(p2.x, p2.y, color));
    }
}

/// Circle whose color fades from `inner` at the center to `outer` at the edge
pub fn radial_circle(
    out: &mut Vec<Vertex>,
    center: Vec2,
    radius: f32,
    inner: [f32; 4],
    outer: [f32; 4],
    segments: u32,
) {
    let segments = segments.max(3);
    for i in 0..segments {
        let p1 = center + Vec2::from_angle(i as f32 / segments as f32 * TAU) * radius;
        let p2 = center + Vec2::from_angle((i + 1) as f32 / segments as f32 * TAU) * radius;
        out.push(Vertex::new(center.x, center.y, inner));
        out.push(Vertex::new(p1.x, p1.y, outer));
        out.push(Vertex::new(p2.x, p2.y, outer));
    }
}

/// Hollow circle band between two radii
pub fn ring(
    out: &mut Vec<Vertex>,
    center: Vec2,
    inner_radius: f32,
    outer_radius: f32,
    color: [f32; 4],
    segments: u32,
) {
    let segments = segments.max(3);
    for i in 0..segments {
        let d1 = Vec2::from_angle(i as f32 / segments as f32 * TAU);
        let d2 = Vec2::from_angle((i + 1) as f32 / segments as f32 * TAU);
        push_quad(
            out,
            center + d1 * inner_radius,
            center + d1 * outer_radius,
            center + d2 * inner_radius,
            center + d2 * outer_radius,
            color,
        );
    }
}

/// Axis-aligned square with the given half extent
pub fn square(out: &mut Vec<Vertex>, center: Vec2, half: f32, color: [f32; 4]) {
    push_quad(
        out,
        center + Vec2::new(-half, -half),
        center + Vec2::new(half, -half),
        center + Vec2::new(-half, half),
        center + Vec2::new(half, half),
        color,
    );
}

/// Apex-up triangle inscribed in the square of half extent `half`
pub fn triangle(out: &mut Vec<Vertex>, center: Vec2, half: f32, color: [f32; 4]) {
    let apex = center + Vec2::new(0.0, -half);
    let left = center + Vec2::new(-half, half);
    let right = center + Vec2::new(half, half);
    for p in [apex, left, right] {
        out.push(Vertex::new(p.x, p.y, color));
    }
}

/// Thick line segment
pub fn line(out: &mut Vec<Vertex>, from: Vec2, to: Vec2, width: f32, color: [f32; 4]) {
    let dir = (to - from).normalize_or_zero();
    if dir == Vec2::ZERO {
        return;
    }
    let perp = dir.perp() * (width / 2.0);
    push_quad(out, from + perp, from - perp, to + perp, to - perp, color);
}

/// Rectangle border drawn inside the rect bounds
pub fn rect_outline(out: &mut Vec<Vertex>, rect: &Rect, width: f32, color: [f32; 4]) {
    let w = width.min(rect.width / 2.0).min(rect.height / 2.0).max(0.0);
    let (x0, y0) = (rect.x, rect.y);
    let (x1, y1) = (rect.x + rect.width, rect.y + rect.height);
    let bar = |out: &mut Vec<Vertex>, ax: f32, ay: f32, bx: f32, by: f32| {
        push_quad(
            out,
            Vec2::new(ax, ay),
            Vec2::new(bx, ay),
            Vec2::new(ax, by),
            Vec2::new(bx, by),
            color,
        );
    };
    bar(out, x0, y0, x1, y0 + w);
    bar(out, x0, y1 - w, x1, y1);
    bar(out, x0, y0 + w, x0 + w, y1 - w);
    bar(out, x1 - w, y0 + w, x1, y1 - w);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_circle_stays_within_radius() {
        let mut out = Vec::new();
        circle(&mut out, Vec2::new(10.0, 20.0), 5.0, [1.0; 4], 16);
        assert_eq!(out.len(), 16 * 3);
        for v in &out {
            let d = Vec2::from(v.position).distance(Vec2::new(10.0, 20.0));
            assert!(d <= 5.0 + 1e-4);
        }
    }

    #[test]
    fn test_ring_vertex_count() {
        let mut out = Vec::new();
        ring(&mut out, Vec2::ZERO, 8.0, 10.0, [1.0; 4], 12);
        assert_eq!(out.len(), 12 * 6);
    }

    #[test]
    fn test_square_and_triangle_extents() {
        let mut out = Vec::new();
        square(&mut out, Vec2::new(100.0, 100.0), 10.0, [1.0; 4]);
        assert_eq!(out.len(), 6);
        assert!(out.iter().all(|v| (90.0..=110.0).contains(&v.position[0])));

        out.clear();
        triangle(&mut out, Vec2::new(50.0, 50.0), 4.0, [1.0; 4]);
        assert_eq!(out[0].position, [50.0, 46.0]);
        assert_eq!(out[1].position, [46.0, 54.0]);
        assert_eq!(out[2].position, [54.0, 54.0]);
    }

    #[test]
    fn test_degenerate_line_is_skipped() {
        let mut out = Vec::new();
        line(&mut out, Vec2::ONE, Vec2::ONE, 2.0, [1.0; 4]);
        assert!(out.is_empty());
    }

    #[test]
    fn test_rect_outline_stays_inside() {
        let mut out = Vec::new();
        let rect = Rect::new(0.0, 0.0, 100.0, 50.0);
        rect_outline(&mut out, &rect, 3.0, [1.0; 4]);
        assert_eq!(out.len(), 4 * 6);
        for v in &out {
            assert!((0.0..=100.0).contains(&v.position[0]));
            assert!((0.0..=50.0).contains(&v.position[1]));
        }
    }
}
