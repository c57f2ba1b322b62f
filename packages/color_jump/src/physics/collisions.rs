//! Policy for choosing among several simultaneous collisions.

use super::collision::Collision;
use vek::*;


/// Collisions which are resting contact.
pub fn intersections(collisions: &[Collision]) -> Vec<Collision> {
    collisions.iter().copied().filter(Collision::is_intersection).collect()
}

/// Collisions which are actual penetration.
pub fn non_intersections(collisions: &[Collision]) -> Vec<Collision> {
    collisions.iter().copied().filter(|c| !c.is_intersection()).collect()
}

/// Whether `collisions` is non-empty and all resting contact.
pub fn all_intersections(collisions: &[Collision]) -> bool {
    !collisions.is_empty() && collisions.iter().all(Collision::is_intersection)
}

/// Pick the collision a body should respond to.
///
/// - A single resting contact wins outright.
/// - Among several resting contacts, the one whose direction points most along `tie_breaker`
///   wins. This is how a body standing on the corner between two surfaces prefers the floor.
/// - With no resting contact, the penetration with the smallest overlap wins, as it is the
///   cheapest to correct.
///
/// Remaining ties go to whichever comes first in `collisions`.
pub fn best_collision(
    collisions: &[Collision],
    tie_breaker: Vec3<f32>,
) -> Option<Collision> {
    let intersections = intersections(collisions);
    match intersections.len() {
        0 => first_min_by_key(collisions, |c| c.overlap()),
        1 => Some(intersections[0]),
        _ => first_min_by_key(&intersections, |c| -c.direction().dot(tie_breaker)),
    }
}

fn first_min_by_key<F>(collisions: &[Collision], mut key: F) -> Option<Collision>
where
    F: FnMut(&Collision) -> f32,
{
    let mut best: Option<(Collision, f32)> = None;
    for collision in collisions {
        let k = key(collision);
        if best.map(|(_, best_k)| k < best_k).unwrap_or(true) {
            best = Some((*collision, k));
        }
    }
    best.map(|(collision, _)| collision)
}


#[test]
fn test_partition() {
    let collisions = [
        Collision::new(Vec3::unit_y(), 0.0),
        Collision::new(Vec3::unit_x(), -0.5),
        Collision::new(-Vec3::unit_x(), 0.00005),
    ];
    assert_eq!(intersections(&collisions), vec![collisions[0], collisions[2]]);
    assert_eq!(non_intersections(&collisions), vec![collisions[1]]);
    assert!(!all_intersections(&collisions));
    assert!(all_intersections(&[collisions[0]]));
    assert!(!all_intersections(&[]));
}

#[test]
fn test_best_collision_empty() {
    assert_eq!(best_collision(&[], Vec3::unit_y()), None);
}

#[test]
fn test_best_collision_single_intersection_wins() {
    let collisions = [
        Collision::new(Vec3::unit_x(), -0.01),
        Collision::new(-Vec3::unit_y(), 0.0),
    ];
    assert_eq!(best_collision(&collisions, Vec3::unit_y()), Some(collisions[1]));
}

#[test]
fn test_best_collision_tie_breaker_prefers_floor() {
    let collisions = [
        Collision::new(Vec3::unit_x(), 0.0),
        Collision::new(Vec3::unit_y(), 0.0),
    ];
    assert_eq!(best_collision(&collisions, Vec3::unit_y()), Some(collisions[1]));
    assert_eq!(best_collision(&collisions, Vec3::unit_x()), Some(collisions[0]));
}

#[test]
fn test_best_collision_ties_keep_input_order() {
    let collisions = [
        Collision::new(Vec3::unit_x(), 0.0),
        Collision::new(Vec3::unit_z(), 0.0),
    ];
    assert_eq!(best_collision(&collisions, Vec3::unit_y()), Some(collisions[0]));

    let penetrations = [
        Collision::new(Vec3::unit_z(), -0.3),
        Collision::new(Vec3::unit_x(), -0.3),
        Collision::new(Vec3::unit_y(), -0.7),
    ];
    assert_eq!(best_collision(&penetrations, Vec3::unit_y()), Some(penetrations[0]));
}

#[test]
fn test_best_collision_smallest_penetration() {
    let collisions = [
        Collision::new(Vec3::unit_x(), -0.8),
        Collision::new(Vec3::unit_y(), -0.1),
        Collision::new(-Vec3::unit_y(), -1.9),
    ];
    assert_eq!(best_collision(&collisions, Vec3::unit_x()), Some(collisions[1]));
}
