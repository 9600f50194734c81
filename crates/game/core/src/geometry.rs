//! Ground-plane geometry.
//!
//! Positions live on the horizontal `x`/`z` plane of the game world; height
//! is owned by the client and never simulated here.

use std::fmt;

/// Position on the ground plane.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Point {
    pub x: f32,
    pub z: f32,
}

impl Point {
    pub const ORIGIN: Self = Self { x: 0.0, z: 0.0 };

    pub const fn new(x: f32, z: f32) -> Self {
        Self { x, z }
    }

    /// Euclidean distance to `other`.
    pub fn distance(self, other: Point) -> f32 {
        (other.x - self.x).hypot(other.z - self.z)
    }

    /// Moves at most `max_step` toward `target`, landing exactly on it when
    /// it is within reach.
    pub fn step_toward(self, target: Point, max_step: f32) -> Point {
        let distance = self.distance(target);
        if distance <= max_step || distance <= f32::EPSILON {
            return target;
        }
        let ratio = max_step.max(0.0) / distance;
        Point {
            x: self.x + (target.x - self.x) * ratio,
            z: self.z + (target.z - self.z) * ratio,
        }
    }

    /// Yaw in radians that faces `target`, measured from the `+z` axis
    /// toward `+x`. `None` when the points coincide.
    pub fn heading_to(self, target: Point) -> Option<f32> {
        let (dx, dz) = (target.x - self.x, target.z - self.z);
        if dx.hypot(dz) <= f32::EPSILON {
            return None;
        }
        Some(dx.atan2(dz))
    }
}

impl fmt::Display for Point {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({:.2}, {:.2})", self.x, self.z)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn distance_is_euclidean() {
        let a = Point::new(0.0, 0.0);
        let b = Point::new(3.0, 4.0);
        assert_eq!(a.distance(b), 5.0);
        assert_eq!(b.distance(a), 5.0);
    }

    #[test]
    fn step_toward_is_bounded() {
        let start = Point::ORIGIN;
        let target = Point::new(10.0, 0.0);

        let next = start.step_toward(target, 2.5);
        assert_eq!(next, Point::new(2.5, 0.0));

        // Overshoot snaps onto the target.
        assert_eq!(Point::new(9.0, 0.0).step_toward(target, 5.0), target);
    }

    #[test]
    fn step_toward_with_zero_step_stays_put() {
        let start = Point::new(1.0, 1.0);
        assert_eq!(start.step_toward(Point::new(5.0, 5.0), 0.0), start);
    }

    #[test]
    fn heading_follows_the_ground_axes() {
        use std::f32::consts::{FRAC_PI_2, PI};

        let origin = Point::ORIGIN;
        assert_eq!(origin.heading_to(Point::new(0.0, 5.0)), Some(0.0));
        assert_eq!(origin.heading_to(Point::new(5.0, 0.0)), Some(FRAC_PI_2));
        assert_eq!(origin.heading_to(Point::new(0.0, -5.0)), Some(PI));
        assert_eq!(origin.heading_to(origin), None);
    }
}
