//! Initial object population
//!
//! Each spawning zone gets roughly `base_count` objects split by weight.
//! A zone list with no spawn tables degrades to one implicit zone covering
//! the whole world with the flat table.

use glam::Vec2;
use rand::Rng;
use rand::seq::SliceRandom;

use super::state::WorldObject;
use super::zones::{Rect, SpawnEntry, Zone, flat_spawn_table};
use crate::consts::SPAWN_MARGIN;
use crate::error::{Result, SimError, check_dimensions};

/// Generate a shuffled population for a world of the given size
///
/// Ids start at 1 and increase strictly across the whole set.
pub fn generate<R: Rng + ?Sized>(
    world_width: f32,
    world_height: f32,
    zones: &[Zone],
    base_count: u32,
    rng: &mut R,
) -> Result<Vec<WorldObject>> {
    check_dimensions(world_width, world_height)?;

    let fallback;
    let spawning: Vec<&Zone> = if zones.iter().any(|z| !z.spawns.is_empty()) {
        zones.iter().filter(|z| !z.spawns.is_empty()).collect()
    } else {
        fallback = Zone::whole_world(flat_spawn_table());
        vec![&fallback]
    };

    for zone in &spawning {
        for entry in &zone.spawns {
            validate_entry(entry)?;
        }
    }

    let mut objects = Vec::new();
    let mut next_id = 1u32;

    for zone in spawning {
        let bounds = zone.extent.resolve(world_width, world_height);
        let total_weight: u64 = zone.spawns.iter().map(|e| e.weight as u64).sum();

        for entry in &zone.spawns {
            let count = instance_count(entry.weight, total_weight, base_count);
            for _ in 0..count {
                let size = if entry.max_size > entry.min_size {
                    rng.random_range(entry.min_size..entry.max_size)
                } else {
                    entry.min_size
                };
                objects.push(WorldObject {
                    id: next_id,
                    pos: spawn_point(&bounds, rng),
                    size,
                    shape: entry.shape,
                    kind: entry.kind,
                    points: entry.points,
                    color: entry.color,
                    zone: Some(zone.name.clone()),
                });
                next_id += 1;
            }
        }
    }

    objects.shuffle(rng);
    log::info!(
        "Generated {} objects for {}x{} world",
        objects.len(),
        world_width,
        world_height
    );
    Ok(objects)
}

/// `weight / total * base`, floored, never below 1
pub fn instance_count(weight: u32, total_weight: u64, base_count: u32) -> u32 {
    if total_weight == 0 {
        return 1;
    }
    let share = (weight as f64 / total_weight as f64) * base_count as f64;
    (share.floor() as u32).max(1)
}

fn validate_entry(entry: &SpawnEntry) -> Result<()> {
    let reason = if entry.weight == 0 {
        Some("weight must be positive")
    } else if !(entry.min_size.is_finite() && entry.max_size.is_finite()) {
        Some("sizes must be finite")
    } else if entry.min_size <= 0.0 {
        Some("min size must be positive")
    } else if entry.min_size > entry.max_size {
        Some("min size exceeds max size")
    } else if entry.points == 0 {
        Some("points must be positive")
    } else {
        None
    };
    match reason {
        Some(reason) => Err(SimError::InvalidObjectType {
            kind: entry.kind,
            reason: reason.to_string(),
        }),
        None => Ok(()),
    }
}

/// Uniform point inside `bounds` inset by the spawn margin
fn spawn_point<R: Rng + ?Sized>(bounds: &Rect, rng: &mut R) -> Vec2 {
    Vec2::new(
        spread(bounds.x, bounds.width, rng),
        spread(bounds.y, bounds.height, rng),
    )
}

/// Collapses to the midpoint when the extent is narrower than twice the margin
fn spread<R: Rng + ?Sized>(origin: f32, extent: f32, rng: &mut R) -> f32 {
    let inset = SPAWN_MARGIN.min(extent / 2.0);
    let span = extent - inset * 2.0;
    let offset = if span > 0.0 {
        rng.random_range(0.0..span)
    } else {
        0.0
    };
    origin + inset + offset
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::state::ObjectKind;
    use crate::sim::zones::{Extent, districts};
    use rand::SeedableRng;
    use rand_pcg::Pcg32;
    use std::collections::HashSet;

    fn single_zone(weight: u32) -> Vec<Zone> {
        vec![
            Zone::new(
                "Only",
                "Test",
                Extent::Absolute(Rect::new(0.0, 0.0, 1000.0, 1000.0)),
                0xffffff,
            )
            .with_spawns(vec![SpawnEntry::catalogue(ObjectKind::Drone, weight)]),
        ]
    }

    #[test]
    fn test_single_zone_count_and_placement() {
        let mut rng = Pcg32::seed_from_u64(1);
        let objects = generate(1000.0, 1000.0, &single_zone(100), 15, &mut rng).unwrap();
        assert_eq!(objects.len(), 15);
        for obj in &objects {
            assert!(obj.size >= 12.0 && obj.size < 20.0);
            assert!(obj.pos.x >= 50.0 && obj.pos.x <= 950.0);
            assert!(obj.pos.y >= 50.0 && obj.pos.y <= 950.0);
            assert_eq!(obj.zone.as_deref(), Some("Only"));
        }
    }

    #[test]
    fn test_ids_unique_and_sequential() {
        let mut rng = Pcg32::seed_from_u64(2);
        let objects = generate(1280.0, 720.0, &districts(), 15, &mut rng).unwrap();
        let mut ids: Vec<u32> = objects.iter().map(|o| o.id).collect();
        ids.sort_unstable();
        let expected: Vec<u32> = (1..=objects.len() as u32).collect();
        assert_eq!(ids, expected);
    }

    #[test]
    fn test_district_counts() {
        // Downtown: 2+3+1+1+2+3, Residential: 5+4+1+2+1+1, Industrial: 2+1+3+1+1+5
        let mut rng = Pcg32::seed_from_u64(3);
        let objects = generate(1280.0, 720.0, &districts(), 15, &mut rng).unwrap();
        let count = |name: &str| objects.iter().filter(|o| o.zone.as_deref() == Some(name)).count();
        assert_eq!(count("Downtown"), 12);
        assert_eq!(count("Residential"), 14);
        assert_eq!(count("Industrial"), 13);
        assert_eq!(objects.len(), 39);
    }

    #[test]
    fn test_output_is_shuffled() {
        let mut rng = Pcg32::seed_from_u64(4);
        let objects = generate(1280.0, 720.0, &districts(), 15, &mut rng).unwrap();
        let ids: Vec<u32> = objects.iter().map(|o| o.id).collect();
        let mut sorted = ids.clone();
        sorted.sort_unstable();
        assert_ne!(ids, sorted);
    }

    #[test]
    fn test_deterministic_for_seed() {
        let a = generate(800.0, 600.0, &districts(), 15, &mut Pcg32::seed_from_u64(9)).unwrap();
        let b = generate(800.0, 600.0, &districts(), 15, &mut Pcg32::seed_from_u64(9)).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_minimum_one_per_type() {
        assert_eq!(instance_count(1, 1000, 15), 1);
        assert_eq!(instance_count(100, 100, 15), 15);
        assert_eq!(instance_count(20, 120, 15), 2);
    }

    #[test]
    fn test_flat_fallback_without_spawn_tables() {
        let zones: Vec<Zone> = districts()
            .into_iter()
            .map(|z| z.with_spawns(Vec::new()))
            .collect();
        let mut rng = Pcg32::seed_from_u64(5);
        let objects = generate(1000.0, 1000.0, &zones, 15, &mut rng).unwrap();
        // 40/116, 30/116, 20/116, 15/116, 8/116, 3/116 of 15 -> 5+3+2+1+1+1
        assert_eq!(objects.len(), 13);
        let kinds: HashSet<ObjectKind> = objects.iter().map(|o| o.kind).collect();
        assert_eq!(kinds.len(), 6);
        assert!(objects.iter().all(|o| o.zone.as_deref() == Some("City")));
    }

    #[test]
    fn test_tiny_zone_clamps_to_center() {
        let zones = vec![
            Zone::new(
                "Alley",
                "Narrow",
                Extent::Absolute(Rect::new(10.0, 10.0, 40.0, 300.0)),
                0xffffff,
            )
            .with_spawns(vec![SpawnEntry::catalogue(ObjectKind::Trash, 1)]),
        ];
        let mut rng = Pcg32::seed_from_u64(6);
        let objects = generate(500.0, 500.0, &zones, 15, &mut rng).unwrap();
        for obj in &objects {
            assert_eq!(obj.pos.x, 30.0);
            assert!(obj.pos.y >= 60.0 && obj.pos.y <= 260.0);
        }
    }

    #[test]
    fn test_huge_weights_do_not_overflow() {
        let zones = vec![Zone::whole_world(vec![
            SpawnEntry::catalogue(ObjectKind::Building, u32::MAX),
            SpawnEntry::catalogue(ObjectKind::Trash, 1),
        ])];
        let mut rng = Pcg32::seed_from_u64(10);
        let objects = generate(1000.0, 1000.0, &zones, 15, &mut rng).unwrap();
        // Building takes (almost) the whole share, trash still gets its minimum of one
        assert_eq!(objects.len(), 15);
        assert_eq!(
            objects.iter().filter(|o| o.kind == ObjectKind::Trash).count(),
            1
        );
    }

    #[test]
    fn test_invalid_world_rejected() {
        let mut rng = Pcg32::seed_from_u64(7);
        assert!(matches!(
            generate(0.0, 600.0, &districts(), 15, &mut rng),
            Err(SimError::InvalidDimensions { .. })
        ));
        assert!(generate(800.0, -1.0, &districts(), 15, &mut rng).is_err());
    }

    #[test]
    fn test_invalid_entry_rejected() {
        let mut entry = SpawnEntry::catalogue(ObjectKind::Sign, 10);
        entry.min_size = 20.0;
        let zones = vec![Zone::whole_world(vec![entry])];
        let mut rng = Pcg32::seed_from_u64(8);
        assert!(matches!(
            generate(800.0, 600.0, &zones, 15, &mut rng),
            Err(SimError::InvalidObjectType {
                kind: ObjectKind::Sign,
                ..
            })
        ));
    }
}
