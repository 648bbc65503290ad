//! Procedural world generation
//!
//! Scatters buildings and collectibles uniformly over square regions, run once
//! per session. Candidates that land in an exclusion zone are skipped rather
//! than relocated, so realized counts can fall short of the request.

use glam::Vec3;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::physics::{ColliderHandle, PhysicsWorld};
use crate::settings::WorldSettings;

/// A static block obstacle. What the renderer draws and what the physics
/// engine collides against are derived from the same two methods.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Building {
    pub id: u32,
    /// Ground-level center (x, z)
    pub x: f32,
    pub z: f32,
    pub width: f32,
    pub height: f32,
    pub depth: f32,
    #[serde(skip)]
    pub collider: Option<ColliderHandle>,
}

impl Building {
    /// Box center; sits on the ground, so y is half the height
    pub fn center(&self) -> Vec3 {
        Vec3::new(self.x, self.height / 2.0, self.z)
    }

    pub fn half_extents(&self) -> Vec3 {
        Vec3::new(self.width / 2.0, self.height / 2.0, self.depth / 2.0)
    }
}

/// A pickup hovering at a fixed height
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Collectible {
    pub id: u32,
    pub pos: Vec3,
}

/// Everything scattered over the world at session start
#[derive(Debug, Clone, Default)]
pub struct GeneratedWorld {
    pub buildings: Vec<Building>,
    pub collectibles: Vec<Collectible>,
}

/// True if a building candidate would sit on the central road
#[inline]
pub fn on_road(x: f32, road_half_width: f32) -> bool {
    x.abs() < road_half_width
}

/// True if a collectible candidate falls in the spawn square
#[inline]
pub fn in_spawn_square(x: f32, z: f32, half_width: f32) -> bool {
    x.abs() < half_width && z.abs() < half_width
}

/// Sample building placements and register one static collider per building
pub fn generate_buildings<R: Rng, P: PhysicsWorld>(
    rng: &mut R,
    cfg: &WorldSettings,
    physics: &mut P,
) -> Vec<Building> {
    let extent = cfg.building_extent;
    let mut buildings = Vec::with_capacity(cfg.building_count);

    for _ in 0..cfg.building_count {
        let x = rng.random_range(-extent..extent);
        let z = rng.random_range(-extent..extent);
        let width = rng.random_range(cfg.building_footprint.clone());
        let height = rng.random_range(cfg.building_height.clone());
        let depth = rng.random_range(cfg.building_footprint.clone());

        if on_road(x, cfg.road_half_width) {
            continue;
        }

        let mut building = Building {
            id: buildings.len() as u32,
            x,
            z,
            width,
            height,
            depth,
            collider: None,
        };
        building.collider =
            Some(physics.create_static_box(building.center(), building.half_extents()));
        buildings.push(building);
    }

    buildings
}

/// Sample collectible placements outside the spawn square
pub fn generate_collectibles<R: Rng>(rng: &mut R, cfg: &WorldSettings) -> Vec<Collectible> {
    let extent = cfg.collectible_extent;
    let mut collectibles = Vec::with_capacity(cfg.collectible_count);

    for _ in 0..cfg.collectible_count {
        let x = rng.random_range(-extent..extent);
        let z = rng.random_range(-extent..extent);
        if in_spawn_square(x, z, cfg.collectible_exclusion) {
            continue;
        }
        collectibles.push(Collectible {
            id: collectibles.len() as u32,
            pos: Vec3::new(x, cfg.collectible_height, z),
        });
    }

    collectibles
}

/// Populate the world once: buildings first, then collectibles
pub fn generate_world<R: Rng, P: PhysicsWorld>(
    rng: &mut R,
    cfg: &WorldSettings,
    physics: &mut P,
) -> GeneratedWorld {
    let buildings = generate_buildings(rng, cfg, physics);
    let collectibles = generate_collectibles(rng, cfg);
    log::info!(
        "World generated: {}/{} buildings, {}/{} collectibles",
        buildings.len(),
        cfg.building_count,
        collectibles.len(),
        cfg.collectible_count
    );
    GeneratedWorld {
        buildings,
        collectibles,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::physics::RapierPhysics;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    #[test]
    fn test_no_collectible_in_spawn_square() {
        let cfg = WorldSettings {
            collectible_count: 100,
            collectible_exclusion: 10.0,
            ..Default::default()
        };
        let mut rng = Pcg32::seed_from_u64(7);
        let collectibles = generate_collectibles(&mut rng, &cfg);
        assert!(collectibles.len() <= 100);
        for c in &collectibles {
            assert!(!in_spawn_square(c.pos.x, c.pos.z, 10.0));
            assert_eq!(c.pos.y, cfg.collectible_height);
        }
    }

    #[test]
    fn test_exclusion_skips_instead_of_relocating() {
        // Exclusion covers most of the area: most candidates are dropped
        let cfg = WorldSettings {
            collectible_count: 200,
            collectible_extent: 20.0,
            collectible_exclusion: 18.0,
            ..Default::default()
        };
        let mut rng = Pcg32::seed_from_u64(3);
        let collectibles = generate_collectibles(&mut rng, &cfg);
        assert!(collectibles.len() < 200);
        assert!(collectibles.iter().all(|c| !in_spawn_square(c.pos.x, c.pos.z, 18.0)));
    }

    #[test]
    fn test_buildings_keep_road_clear() {
        let cfg = WorldSettings::default();
        let mut rng = Pcg32::seed_from_u64(42);
        let mut physics = RapierPhysics::new();
        let buildings = generate_buildings(&mut rng, &cfg, &mut physics);

        assert!(buildings.len() <= cfg.building_count);
        assert!(!buildings.is_empty());
        for b in &buildings {
            assert!(b.x.abs() >= cfg.road_half_width);
            assert!(b.x.abs() <= cfg.building_extent && b.z.abs() <= cfg.building_extent);
            assert!(cfg.building_footprint.contains(&b.width));
            assert!(cfg.building_footprint.contains(&b.depth));
            assert!(cfg.building_height.contains(&b.height));
        }
    }

    #[test]
    fn test_collider_matches_visual_bounds() {
        let cfg = WorldSettings {
            building_count: 50,
            ..Default::default()
        };
        let mut rng = Pcg32::seed_from_u64(11);
        let mut physics = RapierPhysics::new();
        let buildings = generate_buildings(&mut rng, &cfg, &mut physics);

        assert_eq!(physics.static_count(), buildings.len());
        for b in &buildings {
            let (center, half) = physics.static_box(b.collider.unwrap()).unwrap();
            assert_eq!(center, b.center());
            assert_eq!(half, b.half_extents());
            assert_eq!(center.y, b.height / 2.0);
        }
    }

    #[test]
    fn test_same_seed_same_world() {
        let cfg = WorldSettings::default();
        let mut p1 = RapierPhysics::new();
        let mut p2 = RapierPhysics::new();
        let w1 = generate_world(&mut Pcg32::seed_from_u64(99), &cfg, &mut p1);
        let w2 = generate_world(&mut Pcg32::seed_from_u64(99), &cfg, &mut p2);

        assert_eq!(w1.buildings.len(), w2.buildings.len());
        assert_eq!(w1.collectibles.len(), w2.collectibles.len());
        for (a, b) in w1.collectibles.iter().zip(&w2.collectibles) {
            assert_eq!(a.pos, b.pos);
        }
    }
}
