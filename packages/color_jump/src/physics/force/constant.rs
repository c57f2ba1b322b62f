//! Constant force.

use super::apply_reactions;
use vek::*;


/// Force with a fixed velocity, such as walking or a jump impulse.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct ConstantForce {
    force: Vec3<f32>,
}

impl ConstantForce {
    pub fn new(force: Vec3<f32>) -> Self {
        ConstantForce { force }
    }

    pub fn force(&self) -> Vec3<f32> {
        self.force
    }

    pub fn update(&mut self, dt: f32, reactions: &[Vec3<f32>]) -> Vec3<f32> {
        apply_reactions(self.force, reactions) * dt
    }
}


#[test]
fn test_constant_update() {
    let mut force = ConstantForce::new(Vec3::new(5.0, 0.0, 0.0));
    assert_eq!(force.update(0.5, &[]), Vec3::new(2.5, 0.0, 0.0));
    // a wall to the right stops it, a wall to the left doesn't
    assert_eq!(force.update(0.5, &[-Vec3::unit_x()]), Vec3::zero());
    assert_eq!(force.update(0.5, &[Vec3::unit_x()]), Vec3::new(2.5, 0.0, 0.0));
    assert_eq!(force.force(), Vec3::new(5.0, 0.0, 0.0));
}
