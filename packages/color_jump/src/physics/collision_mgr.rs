//! See `CollisionMgr`.

use super::{
    body::Body,
    collision::Collision,
};
use anyhow::*;


/// Largest time step collisions may be tested for. Bodies move by up to a frame's worth of
/// displacement between tests, and larger steps let them pass through each other.
pub const MAX_DT: f32 = 0.1;


/// Tests groups of bodies against each other and tells them about it.
#[derive(Debug, Clone, Default)]
pub struct CollisionMgr {
    tested_pairs: u64,
    colliding_pairs: u64,
}

impl CollisionMgr {
    pub fn new() -> Self {
        Self::default()
    }

    /// Test every body in `group_a` against every body in `group_b`, using the boxes they predict
    /// for `dt` seconds from now, and return how many pairs collided.
    ///
    /// For a colliding pair `(a, b)`, `b` is told about the collisions as `a`'s box reports them,
    /// and then `a` is told about the same collisions flipped, so both see directions pointing
    /// away from the other.
    ///
    /// Errors if `dt` is greater than `MAX_DT`. Callers should split longer frames into steps.
    pub fn test_all(
        &mut self,
        dt: f32,
        group_a: &mut [&mut dyn Body],
        group_b: &mut [&mut dyn Body],
    ) -> Result<usize> {
        ensure!(
            dt <= MAX_DT,
            "cannot run collisions for time step {}s, greater than {}s",
            dt,
            MAX_DT,
        );

        let mut colliding = 0;
        for a in group_a.iter_mut() {
            for b in group_b.iter_mut() {
                if self.test_pair(dt, &mut **a, &mut **b)? {
                    colliding += 1;
                }
            }
        }
        Ok(colliding)
    }

    fn test_pair(&mut self, dt: f32, a: &mut dyn Body, b: &mut dyn Body) -> Result<bool> {
        self.tested_pairs += 1;

        let box_a = a.bounding_box(dt)?;
        let box_b = b.bounding_box(dt)?;
        let collisions = match box_a.test(&box_b) {
            Some(collisions) => collisions,
            None => return Ok(false),
        };
        self.colliding_pairs += 1;
        trace!(a = a.label(), b = b.label(), ?collisions, "collision");

        b.on_collision(&*a, &collisions);
        let flipped = collisions
            .iter()
            .map(Collision::flip)
            .collect::<Vec<_>>();
        a.on_collision(&*b, &flipped);
        Ok(true)
    }

    /// Number of pairs tested so far.
    pub fn tested_pairs(&self) -> u64 {
        self.tested_pairs
    }

    /// Number of tested pairs which collided so far.
    pub fn colliding_pairs(&self) -> u64 {
        self.colliding_pairs
    }
}


#[cfg(test)]
mod test_bodies {
    use super::*;
    use crate::{
        input::Input,
        physics::aa_box::AaBox,
    };
    use std::{
        cell::RefCell,
        rc::Rc,
    };
    use vek::*;

    /// Order in which bodies were told about collisions, by label.
    pub type CallLog = Rc<RefCell<Vec<&'static str>>>;

    /// Box which records what it was told.
    pub struct Recorder {
        pub label: &'static str,
        pub center: Vec3<f32>,
        pub seen: Vec<(String, Vec<Collision>)>,
        pub log: CallLog,
    }

    impl Recorder {
        pub fn new(label: &'static str, center: Vec3<f32>) -> Self {
            Self::logging_to(label, center, CallLog::default())
        }

        pub fn logging_to(label: &'static str, center: Vec3<f32>, log: CallLog) -> Self {
            Recorder {
                label,
                center,
                seen: Vec::new(),
                log,
            }
        }
    }

    impl Body for Recorder {
        fn label(&self) -> &str {
            self.label
        }

        fn bounding_box(&mut self, _dt: f32) -> Result<AaBox> {
            Ok(AaBox::from_center(self.center, Extent3::new(1.0, 1.0, 1.0)))
        }

        fn on_collision(&mut self, other: &dyn Body, collisions: &[Collision]) {
            self.log.borrow_mut().push(self.label);
            self.seen.push((other.label().to_owned(), collisions.to_vec()));
        }

        fn pre_update(&mut self, _dt: f32, _input: &Input) {}

        fn update(&mut self, _dt: f32) {}

        fn post_update(&mut self, _dt: f32) {}
    }
}

#[test]
fn test_all_dispatches_both_sides() {
    use self::test_bodies::Recorder;
    use vek::*;

    let mut a = Recorder::new("a", Vec3::new(0.0, 0.0, 0.0));
    let mut b = Recorder::new("b", Vec3::new(1.0, 0.0, 0.0));
    let mut c = Recorder::new("c", Vec3::new(10.0, 0.0, 0.0));

    let mut mgr = CollisionMgr::new();
    let colliding = mgr
        .test_all(1.0 / 60.0, &mut [&mut a], &mut [&mut b, &mut c])
        .unwrap();
    assert_eq!(colliding, 1);
    assert_eq!(mgr.tested_pairs(), 2);
    assert_eq!(mgr.colliding_pairs(), 1);

    assert!(c.seen.is_empty());
    assert_eq!(b.seen.len(), 1);
    assert_eq!(a.seen.len(), 1);
    assert_eq!(b.seen[0].0, "a");
    assert_eq!(a.seen[0].0, "b");

    // b is to the right of a, so b is pushed right and a is pushed left
    assert_eq!(b.seen[0].1[0].direction(), Vec3::unit_x());
    assert_eq!(a.seen[0].1[0].direction(), -Vec3::unit_x());
    assert_eq!(a.seen[0].1[0].flip(), b.seen[0].1[0]);
}

#[test]
fn test_second_group_told_first() {
    use self::test_bodies::{
        CallLog,
        Recorder,
    };
    use vek::*;

    let log = CallLog::default();
    let mut a = Recorder::logging_to("a", Vec3::new(0.0, 0.0, 0.0), log.clone());
    let mut b = Recorder::logging_to("b", Vec3::new(0.5, 0.0, 0.0), log.clone());
    CollisionMgr::new()
        .test_all(1.0 / 60.0, &mut [&mut a], &mut [&mut b])
        .unwrap();
    assert_eq!(*log.borrow(), vec!["b", "a"]);
}

#[test]
fn test_all_rejects_large_dt() {
    use self::test_bodies::Recorder;
    use vek::*;

    let mut a = Recorder::new("a", Vec3::zero());
    let mut b = Recorder::new("b", Vec3::zero());
    let mut mgr = CollisionMgr::new();
    assert!(mgr.test_all(0.5, &mut [&mut a], &mut [&mut b]).is_err());
    assert!(a.seen.is_empty() && b.seen.is_empty());
    assert!(mgr.test_all(MAX_DT, &mut [&mut a], &mut [&mut b]).is_ok());
}
