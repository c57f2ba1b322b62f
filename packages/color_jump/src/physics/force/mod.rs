//! Forces which contribute to a body's displacement each frame.
//!
//! A force is a velocity contributor. Each frame it is asked to `update` given the reaction forces
//! (normal forces of surfaces a body is resting against) currently acting on the body, and returns
//! the displacement it contributes over the frame. A reaction force cancels exactly the component
//! of a force's velocity which drives the body into the surface it comes from.

mod constant;
mod accelerating;

pub use self::{
    constant::ConstantForce,
    accelerating::{
        AcceleratingForce,
        GRAVITY,
    },
};

use super::plane::EPSILON;
use vek::*;


/// One named contributor to a body's velocity.
#[derive(Debug, Clone, PartialEq)]
pub enum PhysicsForce {
    Constant(ConstantForce),
    Accelerating(AcceleratingForce),
}

impl PhysicsForce {
    pub fn constant(force: Vec3<f32>) -> Self {
        PhysicsForce::Constant(ConstantForce::new(force))
    }

    pub fn accelerating(acceleration: Vec3<f32>, initial_velocity: Vec3<f32>) -> Self {
        PhysicsForce::Accelerating(AcceleratingForce::new(acceleration, initial_velocity))
    }

    /// Accelerating force pulling down at `GRAVITY`, starting from rest.
    pub fn gravity() -> Self {
        PhysicsForce::Accelerating(AcceleratingForce::gravity())
    }

    /// Advance by `dt` seconds and return the displacement contributed over that time.
    pub fn update(&mut self, dt: f32, reactions: &[Vec3<f32>]) -> Vec3<f32> {
        match self {
            PhysicsForce::Constant(force) => force.update(dt, reactions),
            PhysicsForce::Accelerating(force) => force.update(dt, reactions),
        }
    }

    /// Current velocity, before any reactions.
    pub fn velocity(&self) -> Vec3<f32> {
        match self {
            PhysicsForce::Constant(force) => force.force(),
            PhysicsForce::Accelerating(force) => force.velocity(),
        }
    }

    /// Whether `reaction` alone would fully neutralize this force's current velocity.
    pub fn is_normal_force(&self, reaction: Vec3<f32>) -> bool {
        is_neutralized_by(self.velocity(), &[reaction])
    }

    /// Whether any one of `reactions` would fully neutralize this force's current velocity.
    pub fn is_any_normal_force(&self, reactions: &[Vec3<f32>]) -> bool {
        reactions.iter().any(|&reaction| self.is_normal_force(reaction))
    }
}

impl From<ConstantForce> for PhysicsForce {
    fn from(force: ConstantForce) -> Self {
        PhysicsForce::Constant(force)
    }
}

impl From<AcceleratingForce> for PhysicsForce {
    fn from(force: AcceleratingForce) -> Self {
        PhysicsForce::Accelerating(force)
    }
}


/// The velocity which `reactions` add to `velocity` to cancel the parts of it which push into
/// them, or `None` if none of them oppose it.
///
/// Reactions are applied in order, each one seeing the velocity as already corrected by the ones
/// before it, so that two reactions from the same direction don't cancel twice. Zero reactions
/// have no direction and are ignored.
pub fn cancellation(velocity: Vec3<f32>, reactions: &[Vec3<f32>]) -> Option<Vec3<f32>> {
    let mut velocity = velocity;
    let mut total: Option<Vec3<f32>> = None;
    for &reaction in reactions {
        let magnitude = reaction.magnitude();
        if magnitude == 0.0 {
            continue;
        }
        let normal = reaction / magnitude;

        let projection = (-velocity).dot(normal);
        if projection > 0.0 {
            let cancel = normal * projection;
            velocity += cancel;
            *total.get_or_insert(Vec3::zero()) += cancel;
        }
    }
    total
}

/// `velocity` with `reactions` applied.
pub fn apply_reactions(velocity: Vec3<f32>, reactions: &[Vec3<f32>]) -> Vec3<f32> {
    match cancellation(velocity, reactions) {
        Some(cancel) => velocity + cancel,
        None => velocity,
    }
}

/// Whether `velocity` with `reactions` applied comes to rest.
pub fn is_neutralized_by(velocity: Vec3<f32>, reactions: &[Vec3<f32>]) -> bool {
    apply_reactions(velocity, reactions).magnitude() < EPSILON
}


#[test]
fn test_cancellation_only_opposing() {
    let velocity = Vec3::new(3.0, -10.0, 0.0);
    // floor pushes up, cancels the downward part only
    let cancel = cancellation(velocity, &[Vec3::new(0.0, 4.0, 0.0)]).unwrap();
    assert_eq!(cancel, Vec3::new(0.0, 10.0, 0.0));
    assert_eq!(apply_reactions(velocity, &[Vec3::unit_y()]), Vec3::new(3.0, 0.0, 0.0));

    // ceiling pushes down, doesn't oppose
    assert_eq!(cancellation(velocity, &[-Vec3::unit_y()]), None);
    assert_eq!(cancellation(velocity, &[]), None);
    assert_eq!(cancellation(velocity, &[Vec3::zero()]), None);
}

#[test]
fn test_cancellation_does_not_double_count() {
    let velocity = Vec3::new(0.0, -10.0, 0.0);
    let cancel = cancellation(velocity, &[Vec3::unit_y(), Vec3::unit_y() * 2.0]).unwrap();
    assert_eq!(cancel, Vec3::new(0.0, 10.0, 0.0));
}

#[test]
fn test_cancellation_corner() {
    let velocity = Vec3::new(5.0, -10.0, 0.0);
    let reactions = [Vec3::unit_y(), -Vec3::unit_x()];
    assert!(is_neutralized_by(velocity, &reactions));
    assert!(!is_neutralized_by(velocity, &reactions[..1]));
}

#[test]
fn test_constant_force_neutralized_by_floor() {
    let mut force = PhysicsForce::constant(Vec3::new(0.0, -10.0, 0.0));
    assert!(force.is_any_normal_force(&[Vec3::unit_y()]));
    assert!(!force.is_any_normal_force(&[Vec3::unit_x(), -Vec3::unit_y()]));
    assert!(!force.is_any_normal_force(&[]));

    let displacement = force.update(1.0 / 60.0, &[Vec3::unit_y()]);
    assert!(displacement.y.abs() < EPSILON);
}

#[test]
fn test_gravity_is_accelerating() {
    let gravity = PhysicsForce::gravity();
    assert_eq!(
        gravity,
        PhysicsForce::accelerating(Vec3::new(0.0, GRAVITY, 0.0), Vec3::zero()),
    );
    assert_eq!(gravity.velocity(), Vec3::zero());
}
