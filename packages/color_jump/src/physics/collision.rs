//! Result of a box/box test.

use super::plane::EPSILON;
use vek::*;


/// A way two boxes collide, as seen by one of them.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Collision {
    /// Direction along which the receiving body should separate.
    direction: Vec3<f32>,
    /// Signed overlap along `direction`. Zero for resting contact.
    delta: f32,
}

impl Collision {
    pub fn new(direction: Vec3<f32>, delta: f32) -> Self {
        Collision {
            direction,
            delta,
        }
    }

    pub fn direction(&self) -> Vec3<f32> {
        self.direction
    }

    pub fn delta(&self) -> f32 {
        self.delta
    }

    pub fn overlap(&self) -> f32 {
        self.delta.abs()
    }

    /// Whether this is resting contact rather than penetration.
    pub fn is_intersection(&self) -> bool {
        self.overlap() < EPSILON
    }

    /// Minimal push-out vector: the direction scaled to the overlap.
    pub fn offset_direction(&self) -> Vec3<f32> {
        let magnitude = self.direction.magnitude();
        if magnitude == 0.0 {
            return Vec3::zero();
        }
        self.direction / magnitude * self.overlap()
    }

    /// The same collision, as seen by the other body.
    pub fn flip(&self) -> Self {
        Collision {
            direction: -self.direction,
            delta: self.delta,
        }
    }
}


#[test]
fn test_flip_is_involution() {
    for collision in [
        Collision::new(Vec3::new(0.0, 1.0, 0.0), 0.0),
        Collision::new(Vec3::new(-1.0, 0.0, 0.0), -0.35),
        Collision::new(Vec3::new(0.1, -0.7, 3.3), 12.5),
        Collision::new(Vec3::new(-0.0, 0.0, -1.0), -0.0),
    ] {
        let flipped = collision.flip();
        assert_eq!(flipped.direction(), -collision.direction());
        assert_eq!(flipped.overlap(), collision.overlap());
        assert_eq!(flipped.flip(), collision);
        assert_eq!(
            flipped.flip().direction().map(f32::to_bits),
            collision.direction().map(f32::to_bits),
        );
    }
}

#[test]
fn test_offset_direction() {
    let collision = Collision::new(Vec3::new(0.0, 2.0, 0.0), -0.25);
    assert_eq!(collision.overlap(), 0.25);
    assert_eq!(collision.offset_direction(), Vec3::new(0.0, 0.25, 0.0));
    assert!(!collision.is_intersection());

    let degenerate = Collision::new(Vec3::zero(), -1.0);
    assert_eq!(degenerate.offset_direction(), Vec3::zero());
}
