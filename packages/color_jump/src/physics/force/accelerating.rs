//! Accelerating force.

use super::{
    super::plane::EPSILON,
    apply_reactions,
};
use vek::*;


/// Downward acceleration of gravity, in units per second squared.
pub const GRAVITY: f32 = -9.8;


/// Force whose velocity grows linearly with the time it has been acting.
///
/// When reactions bring its velocity to rest, it starts over from rest, so a body which lands
/// and then walks off a ledge falls from zero velocity rather than from its speed before landing.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct AcceleratingForce {
    acceleration: Vec3<f32>,
    initial_velocity: Vec3<f32>,
    elapsed: f32,
}

impl AcceleratingForce {
    pub fn new(acceleration: Vec3<f32>, initial_velocity: Vec3<f32>) -> Self {
        AcceleratingForce {
            acceleration,
            initial_velocity,
            elapsed: 0.0,
        }
    }

    pub fn gravity() -> Self {
        Self::new(Vec3::new(0.0, GRAVITY, 0.0), Vec3::zero())
    }

    pub fn acceleration(&self) -> Vec3<f32> {
        self.acceleration
    }

    /// Seconds of acceleration accumulated since the force last started from rest.
    pub fn elapsed(&self) -> f32 {
        self.elapsed
    }

    pub fn velocity(&self) -> Vec3<f32> {
        self.acceleration * self.elapsed + self.initial_velocity
    }

    /// Start over from rest.
    pub fn reset(&mut self) {
        self.reset_with_initial_velocity(Vec3::zero());
    }

    /// Start over from `initial_velocity`.
    pub fn reset_with_initial_velocity(&mut self, initial_velocity: Vec3<f32>) {
        self.elapsed = 0.0;
        self.initial_velocity = initial_velocity;
    }

    pub fn update(&mut self, dt: f32, reactions: &[Vec3<f32>]) -> Vec3<f32> {
        self.elapsed += dt;

        let velocity = apply_reactions(self.velocity(), reactions);
        if velocity.magnitude() < EPSILON {
            self.elapsed = 0.0;
        }

        velocity * dt
    }
}


#[test]
fn test_accelerating_update() {
    let mut force = AcceleratingForce::new(Vec3::new(0.0, -10.0, 0.0), Vec3::new(1.0, 0.0, 0.0));
    let displacement = force.update(0.5, &[]);
    assert_eq!(displacement, Vec3::new(0.5, -2.5, 0.0));
    assert_eq!(force.elapsed(), 0.5);
    let displacement = force.update(0.5, &[]);
    assert_eq!(displacement, Vec3::new(0.5, -5.0, 0.0));
    assert_eq!(force.velocity(), Vec3::new(1.0, -10.0, 0.0));
}

#[test]
fn test_accelerating_restarts_when_cancelled() {
    let mut gravity = AcceleratingForce::gravity();
    for _ in 0..30 {
        gravity.update(1.0 / 60.0, &[]);
    }
    assert!(gravity.elapsed() > 0.4);

    // landing cancels the fall entirely
    let displacement = gravity.update(1.0 / 60.0, &[Vec3::unit_y()]);
    assert!(displacement.magnitude() < EPSILON);
    assert_eq!(gravity.elapsed(), 0.0);

    // walking off the ledge falls from rest again
    let mut fresh = AcceleratingForce::gravity();
    assert_eq!(gravity.update(0.1, &[]), fresh.update(0.1, &[]));
    assert_eq!(gravity, fresh);
}

#[test]
fn test_accelerating_partial_cancel_keeps_time() {
    let mut force = AcceleratingForce::new(Vec3::new(2.0, -10.0, 0.0), Vec3::zero());
    force.update(0.5, &[Vec3::unit_y()]);
    assert_eq!(force.elapsed(), 0.5);
}

#[test]
fn test_accelerating_reset() {
    let mut force = AcceleratingForce::gravity();
    force.update(1.0, &[]);
    force.reset_with_initial_velocity(Vec3::new(0.0, 3.0, 0.0));
    assert_eq!(force.elapsed(), 0.0);
    assert_eq!(force.velocity(), Vec3::new(0.0, 3.0, 0.0));
    force.reset();
    assert_eq!(force.velocity(), Vec3::zero());
}
