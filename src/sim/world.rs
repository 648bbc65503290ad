//! World bounds and wrap-around teleport
//!
//! The playable area is a square of half-size `limit`. Crossing an edge
//! teleports to `rewrap_offset` inside the opposite edge; velocity and
//! orientation are untouched.

use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::error::{Result, SimError};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WorldBounds {
    /// Half-size of the square; |x| or |z| beyond this triggers a wrap
    pub limit: f32,
    /// Landing distance from center after a wrap (strictly inside `limit`)
    pub rewrap_offset: f32,
}

impl WorldBounds {
    pub fn new(limit: f32, rewrap_offset: f32) -> Result<Self> {
        let valid = limit.is_finite()
            && rewrap_offset.is_finite()
            && rewrap_offset > 0.0
            && rewrap_offset < limit;
        if !valid {
            return Err(SimError::InvalidBounds {
                limit,
                rewrap_offset,
            });
        }
        Ok(Self {
            limit,
            rewrap_offset,
        })
    }

    /// Wrap a single axis coordinate
    #[inline]
    pub fn wrap_axis(&self, v: f32) -> f32 {
        if v > self.limit {
            -self.rewrap_offset
        } else if v < -self.limit {
            self.rewrap_offset
        } else {
            v
        }
    }

    /// Wrap the planar (x, z) coordinates of a position; y passes through.
    /// Returns the new position and whether any axis teleported.
    pub fn wrap(&self, pos: Vec3) -> (Vec3, bool) {
        let wrapped = Vec3::new(self.wrap_axis(pos.x), pos.y, self.wrap_axis(pos.z));
        let moved = wrapped.x != pos.x || wrapped.z != pos.z;
        (wrapped, moved)
    }

    /// True if (x, z) lies within the closed square
    pub fn contains(&self, pos: Vec3) -> bool {
        pos.x.abs() <= self.limit && pos.z.abs() <= self.limit
    }
}

impl Default for WorldBounds {
    fn default() -> Self {
        Self {
            limit: 500.0,
            rewrap_offset: 490.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_wrap_positive_edge() {
        let bounds = WorldBounds::new(500.0, 490.0).unwrap();
        let (pos, moved) = bounds.wrap(Vec3::new(505.0, 1.0, 0.0));
        assert!(moved);
        assert_eq!(pos.x, -490.0);
        assert_eq!(pos.y, 1.0);
        assert_eq!(pos.z, 0.0);
    }

    #[test]
    fn test_wrap_epsilon_past_edges() {
        let bounds = WorldBounds::default();
        let eps = 0.001;
        assert_eq!(bounds.wrap_axis(500.0 + eps), -490.0);
        assert_eq!(bounds.wrap_axis(-500.0 - eps), 490.0);
    }

    #[test]
    fn test_wrap_both_axes_independently() {
        let bounds = WorldBounds::default();
        let (pos, moved) = bounds.wrap(Vec3::new(-501.0, 0.0, 600.0));
        assert!(moved);
        assert_eq!(pos.x, 490.0);
        assert_eq!(pos.z, -490.0);
    }

    #[test]
    fn test_exact_limit_does_not_wrap() {
        let bounds = WorldBounds::default();
        assert_eq!(bounds.wrap_axis(500.0), 500.0);
        assert_eq!(bounds.wrap_axis(-500.0), -500.0);
    }

    #[test]
    fn test_wrapped_position_does_not_rewrap() {
        let bounds = WorldBounds::default();
        let (once, _) = bounds.wrap(Vec3::new(700.0, 0.0, -900.0));
        let (twice, moved) = bounds.wrap(once);
        assert!(!moved);
        assert_eq!(once, twice);
    }

    #[test]
    fn test_rejects_offset_at_or_beyond_limit() {
        assert!(WorldBounds::new(500.0, 500.0).is_err());
        assert!(WorldBounds::new(500.0, 600.0).is_err());
        assert!(WorldBounds::new(500.0, 0.0).is_err());
        assert!(WorldBounds::new(500.0, 499.9).is_ok());
    }

    proptest! {
        #[test]
        fn prop_wrap_is_noop_inside_bounds(
            x in -499.99f32..499.99,
            y in -10.0f32..10.0,
            z in -499.99f32..499.99
        ) {
            let bounds = WorldBounds::default();
            let pos = Vec3::new(x, y, z);
            let (wrapped, moved) = bounds.wrap(pos);
            prop_assert!(!moved);
            prop_assert_eq!(wrapped, pos);
        }

        #[test]
        fn prop_wrap_always_lands_inside(x in -5000.0f32..5000.0, z in -5000.0f32..5000.0) {
            let bounds = WorldBounds::default();
            let (wrapped, _) = bounds.wrap(Vec3::new(x, 0.0, z));
            prop_assert!(bounds.contains(wrapped));
        }
    }
}
