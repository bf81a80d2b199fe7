//! City districts
//!
//! Zones are defined relative to the world size and resolved to absolute
//! rectangles whenever the world is resized. Lookup is first-match in list
//! order, so overlapping districts always resolve the same way.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::state::{Color, ObjectKind, ObjectShape};
use crate::error::{Result, check_dimensions};

/// Absolute axis-aligned rectangle in world coordinates
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Inclusive of all four edges
    pub fn contains(&self, p: Vec2) -> bool {
        p.x >= self.x && p.x <= self.x + self.width && p.y >= self.y && p.y <= self.y + self.height
    }
}

/// How a zone's rectangle is expressed
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum Extent {
    /// Fractions of the world size
    Ratio { x: f32, y: f32, width: f32, height: f32 },
    /// Fixed world coordinates
    Absolute(Rect),
}

impl Extent {
    pub fn resolve(&self, world_width: f32, world_height: f32) -> Rect {
        match *self {
            Extent::Ratio {
                x,
                y,
                width,
                height,
            } => Rect::new(
                x * world_width,
                y * world_height,
                width * world_width,
                height * world_height,
            ),
            Extent::Absolute(rect) => rect,
        }
    }
}

/// One weighted entry of a zone's spawn table
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SpawnEntry {
    pub kind: ObjectKind,
    /// Relative weight within the zone
    pub weight: u32,
    pub min_size: f32,
    pub max_size: f32,
    pub points: u32,
    pub color: Color,
    pub shape: ObjectShape,
}

impl SpawnEntry {
    /// Entry using the standard catalogue values for `kind`
    pub fn catalogue(kind: ObjectKind, weight: u32) -> Self {
        let (min_size, max_size, points, color, shape) = match kind {
            ObjectKind::Trash => (3.0, 8.0, 10, 0x666666, ObjectShape::Circle),
            ObjectKind::Sign => (8.0, 15.0, 25, 0xffff00, ObjectShape::Square),
            ObjectKind::Drone => (12.0, 20.0, 50, 0xff00ff, ObjectShape::Triangle),
            ObjectKind::Hovercar => (18.0, 30.0, 100, 0x00ffff, ObjectShape::Square),
            ObjectKind::Billboard => (25.0, 40.0, 200, 0xff6600, ObjectShape::Square),
            ObjectKind::Building => (35.0, 60.0, 500, 0x9900ff, ObjectShape::Square),
        };
        Self {
            kind,
            weight,
            min_size,
            max_size,
            points,
            color: Color::rgb(color),
            shape,
        }
    }
}

/// Catalogue entries with weights in `ObjectKind::ALL` order
fn table(weights: [u32; 6]) -> Vec<SpawnEntry> {
    ObjectKind::ALL
        .iter()
        .zip(weights)
        .map(|(&kind, weight)| SpawnEntry::catalogue(kind, weight))
        .collect()
}

/// City-wide table used when no district carries its own
pub fn flat_spawn_table() -> Vec<SpawnEntry> {
    table([40, 30, 20, 15, 8, 3])
}

/// A named district
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Zone {
    pub name: String,
    pub description: String,
    pub extent: Extent,
    /// Resolved against the current world size
    pub bounds: Rect,
    /// Overlay color for the map/draw pass
    pub overlay: Color,
    /// Empty for districts that spawn nothing
    pub spawns: Vec<SpawnEntry>,
}

impl Zone {
    pub fn new(name: &str, description: &str, extent: Extent, overlay: u32) -> Self {
        Self {
            name: name.to_string(),
            description: description.to_string(),
            extent,
            bounds: Rect::default(),
            overlay: Color::rgb(overlay),
            spawns: Vec::new(),
        }
    }

    pub fn with_spawns(mut self, spawns: Vec<SpawnEntry>) -> Self {
        self.spawns = spawns;
        self
    }

    /// Single implicit zone covering the whole world
    pub fn whole_world(spawns: Vec<SpawnEntry>) -> Self {
        Self::new(
            "City",
            "Neon Sprawl",
            Extent::Ratio {
                x: 0.0,
                y: 0.0,
                width: 1.0,
                height: 1.0,
            },
            0x00ffff,
        )
        .with_spawns(spawns)
    }
}

/// The standard district list, in lookup priority order
pub fn districts() -> Vec<Zone> {
    let ratio = |x, y, width, height| Extent::Ratio {
        x,
        y,
        width,
        height,
    };
    vec![
        Zone::new("Downtown", "Business Core", ratio(0.0, 0.0, 0.4, 0.4), 0xff6b6b)
            .with_spawns(table([20, 25, 15, 10, 20, 30])),
        Zone::new("Residential", "Living Areas", ratio(0.4, 0.0, 0.6, 0.5), 0x4ecdc4)
            .with_spawns(table([40, 30, 5, 15, 5, 10])),
        Zone::new("Industrial", "Factory Zone", ratio(0.0, 0.4, 0.3, 0.6), 0x45b7d1)
            .with_spawns(table([15, 10, 25, 5, 10, 35])),
        Zone::new("Commercial", "Shopping District", ratio(0.3, 0.5, 0.4, 0.5), 0xf9ca24),
        Zone::new("Tech District", "Innovation Hub", ratio(0.7, 0.5, 0.3, 0.5), 0x6c5ce7),
    ]
}

/// Ordered district list with bounds resolved for the current world size
#[derive(Debug, Clone, PartialEq)]
pub struct ZoneMap {
    zones: Vec<Zone>,
}

impl ZoneMap {
    pub fn new(zones: Vec<Zone>, world_width: f32, world_height: f32) -> Result<Self> {
        let mut map = Self { zones };
        map.resolve_bounds(world_width, world_height)?;
        Ok(map)
    }

    /// The standard city districts
    pub fn city(world_width: f32, world_height: f32) -> Result<Self> {
        Self::new(districts(), world_width, world_height)
    }

    /// Recompute absolute bounds; call on every world resize
    pub fn resolve_bounds(&mut self, world_width: f32, world_height: f32) -> Result<()> {
        check_dimensions(world_width, world_height)?;
        for zone in &mut self.zones {
            zone.bounds = zone.extent.resolve(world_width, world_height);
        }
        Ok(())
    }

    pub fn zones(&self) -> &[Zone] {
        &self.zones
    }

    pub fn get(&self, index: usize) -> Option<&Zone> {
        self.zones.get(index)
    }

    /// Index of the first zone containing `p`
    pub fn index_at(&self, p: Vec2) -> Option<usize> {
        if !p.is_finite() {
            return None;
        }
        self.zones.iter().position(|z| z.bounds.contains(p))
    }

    /// First zone containing `p`, if any
    pub fn zone_at(&self, p: Vec2) -> Option<&Zone> {
        self.index_at(p).and_then(|i| self.zones.get(i))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_rect_contains_is_inclusive() {
        let r = Rect::new(10.0, 10.0, 20.0, 20.0);
        assert!(r.contains(Vec2::new(10.0, 10.0)));
        assert!(r.contains(Vec2::new(30.0, 30.0)));
        assert!(!r.contains(Vec2::new(30.1, 30.0)));
        assert!(!r.contains(Vec2::new(9.9, 15.0)));
    }

    #[test]
    fn test_city_lookup() {
        let map = ZoneMap::city(1000.0, 1000.0).unwrap();
        assert_eq!(map.zone_at(Vec2::new(100.0, 100.0)).unwrap().name, "Downtown");
        assert_eq!(map.zone_at(Vec2::new(800.0, 100.0)).unwrap().name, "Residential");
        assert_eq!(map.zone_at(Vec2::new(100.0, 800.0)).unwrap().name, "Industrial");
        assert_eq!(map.zone_at(Vec2::new(500.0, 800.0)).unwrap().name, "Commercial");
        assert_eq!(map.zone_at(Vec2::new(900.0, 900.0)).unwrap().name, "Tech District");
        assert!(map.zone_at(Vec2::new(-5.0, 100.0)).is_none());
        assert!(map.zone_at(Vec2::new(f32::NAN, 100.0)).is_none());
    }

    #[test]
    fn test_overlap_resolves_to_first_in_list() {
        // (100, 400) sits on Downtown's bottom edge and Industrial's top edge
        let map = ZoneMap::city(1000.0, 1000.0).unwrap();
        let p = Vec2::new(100.0, 400.0);
        assert!(map.zones()[2].bounds.contains(p));
        for _ in 0..10 {
            assert_eq!(map.zone_at(p).unwrap().name, "Downtown");
        }

        // Shared edge between Industrial and Commercial
        let p = Vec2::new(300.0, 700.0);
        assert_eq!(map.zone_at(p).unwrap().name, "Industrial");
    }

    #[test]
    fn test_resolve_bounds_on_resize() {
        let mut map = ZoneMap::city(1000.0, 1000.0).unwrap();
        assert_eq!(map.zones()[0].bounds, Rect::new(0.0, 0.0, 400.0, 400.0));

        map.resolve_bounds(2000.0, 500.0).unwrap();
        assert_eq!(map.zones()[0].bounds, Rect::new(0.0, 0.0, 800.0, 200.0));
        assert_eq!(map.zone_at(Vec2::new(700.0, 150.0)).unwrap().name, "Downtown");

        assert!(map.resolve_bounds(0.0, 500.0).is_err());
        // Failed resize leaves previous bounds intact
        assert_eq!(map.zones()[0].bounds, Rect::new(0.0, 0.0, 800.0, 200.0));
    }

    #[test]
    fn test_absolute_extent_ignores_world_size() {
        let zone = Zone::new(
            "Pit",
            "Fixed",
            Extent::Absolute(Rect::new(5.0, 5.0, 10.0, 10.0)),
            0xffffff,
        );
        let map = ZoneMap::new(vec![zone], 3000.0, 3000.0).unwrap();
        assert_eq!(map.zones()[0].bounds, Rect::new(5.0, 5.0, 10.0, 10.0));
    }

    #[test]
    fn test_spawning_districts() {
        let zones = districts();
        let spawning: Vec<&str> = zones
            .iter()
            .filter(|z| !z.spawns.is_empty())
            .map(|z| z.name.as_str())
            .collect();
        assert_eq!(spawning, vec!["Downtown", "Residential", "Industrial"]);
        assert_eq!(flat_spawn_table().len(), 6);
    }

    proptest! {
        #[test]
        fn lookup_is_first_match(x in -100.0f32..1100.0, y in -100.0f32..1100.0) {
            let map = ZoneMap::city(1000.0, 1000.0).unwrap();
            let p = Vec2::new(x, y);
            let expected = map.zones().iter().position(|z| z.bounds.contains(p));
            prop_assert_eq!(map.index_at(p), expected);
            prop_assert_eq!(map.index_at(p), map.index_at(p));
        }
    }
}
