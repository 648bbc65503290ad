//! Collectible pickup detection
//!
//! Distance is measured in the ground plane, so hover height never matters.

use glam::{Vec2, Vec3};

use super::generator::Collectible;

/// Planar (x, z) distance between two points
#[inline]
pub fn planar_distance(a: Vec3, b: Vec3) -> f32 {
    Vec2::new(a.x - b.x, a.z - b.z).length()
}

/// Remove every collectible within `radius` of `point` and return them.
///
/// Removal happens in the same pass as detection, so each collectible can be
/// returned at most once. Order of the remaining set is not preserved.
pub fn collect_within(
    collectibles: &mut Vec<Collectible>,
    point: Vec3,
    radius: f32,
) -> Vec<Collectible> {
    let mut picked = Vec::new();
    let mut i = 0;
    while i < collectibles.len() {
        if planar_distance(collectibles[i].pos, point) < radius {
            picked.push(collectibles.swap_remove(i));
        } else {
            i += 1;
        }
    }
    picked
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at(id: u32, x: f32, z: f32) -> Collectible {
        Collectible {
            id,
            pos: Vec3::new(x, 1.5, z),
        }
    }

    #[test]
    fn test_picks_only_within_radius() {
        let mut live = vec![at(0, 1.0, 1.0), at(1, 10.0, 0.0), at(2, -2.0, 0.0), at(3, 0.0, 2.99)];
        let picked = collect_within(&mut live, Vec3::new(0.0, 0.5, 0.0), 3.0);

        let mut ids: Vec<u32> = picked.iter().map(|c| c.id).collect();
        ids.sort();
        assert_eq!(ids, vec![0, 2, 3]);
        assert_eq!(live.len(), 1);
        assert_eq!(live[0].id, 1);
    }

    #[test]
    fn test_height_is_ignored() {
        let mut live = vec![Collectible {
            id: 0,
            pos: Vec3::new(1.0, 50.0, 0.0),
        }];
        let picked = collect_within(&mut live, Vec3::ZERO, 3.0);
        assert_eq!(picked.len(), 1);
    }

    #[test]
    fn test_collectible_counted_once() {
        let mut live = vec![at(0, 0.5, 0.5)];
        assert_eq!(collect_within(&mut live, Vec3::ZERO, 3.0).len(), 1);
        assert_eq!(collect_within(&mut live, Vec3::ZERO, 3.0).len(), 0);
    }

    #[test]
    fn test_boundary_is_exclusive() {
        let mut live = vec![at(0, 3.0, 0.0)];
        assert!(collect_within(&mut live, Vec3::ZERO, 3.0).is_empty());
    }
}
