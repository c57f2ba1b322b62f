//! See `ForceSystem`.

use super::force::PhysicsForce;
use std::collections::BTreeMap;
use slab::Slab;
use vek::*;
use anyhow::*;


/// Key of a reaction force within the `ForceSystem` it was added to.
///
/// Only unique among the reactions present at the same time. Keys are reused once reactions are
/// cleared.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct ReactionKey(usize);

/// Everything a checkpoint saves.
#[derive(Debug, Clone, Default)]
struct ForceState {
    forces: BTreeMap<String, PhysicsForce>,
    reactions: Slab<Vec3<f32>>,
}

/// The forces acting on one body.
///
/// Holds named forces, which persist across frames until removed, and reaction forces, which the
/// body's collision response adds during a frame and clears at the end of it. State can be saved
/// and restored with a stack of checkpoints, so that a body can work out where it will be after a
/// frame without actually moving.
#[derive(Debug, Clone, Default)]
pub struct ForceSystem {
    state: ForceState,
    checkpoints: Vec<ForceState>,
}

impl ForceSystem {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a force under `name`, replacing any force already there.
    pub fn add<S: Into<String>>(&mut self, name: S, force: PhysicsForce) {
        let name = name.into();
        trace!(%name, ?force, "adding force");
        self.state.forces.insert(name, force);
    }

    /// Remove and return the force under `name`, if any.
    pub fn remove(&mut self, name: &str) -> Option<PhysicsForce> {
        let removed = self.state.forces.remove(name);
        if removed.is_some() {
            trace!(%name, "removed force");
        }
        removed
    }

    pub fn has(&self, name: &str) -> bool {
        self.state.forces.contains_key(name)
    }

    /// Get the force under `name`. Errors if there is none, so check with `has` first.
    pub fn get(&self, name: &str) -> Result<&PhysicsForce> {
        self.state.forces
            .get(name)
            .ok_or_else(|| anyhow!("no force named {:?}", name))
    }

    pub fn get_mut(&mut self, name: &str) -> Result<&mut PhysicsForce> {
        self.state.forces
            .get_mut(name)
            .ok_or_else(|| anyhow!("no force named {:?}", name))
    }

    /// Iterate over named forces in name order.
    pub fn forces(&self) -> impl Iterator<Item=(&str, &PhysicsForce)> {
        self.state.forces.iter().map(|(name, force)| (name.as_str(), force))
    }

    /// Add a reaction force pushing in `direction`, until `clear_reactions` is called.
    pub fn add_reaction(&mut self, direction: Vec3<f32>) -> ReactionKey {
        ReactionKey(self.state.reactions.insert(direction))
    }

    pub fn remove_reaction(&mut self, key: ReactionKey) -> Option<Vec3<f32>> {
        self.state.reactions.try_remove(key.0)
    }

    pub fn clear_reactions(&mut self) {
        self.state.reactions.clear();
    }

    /// Current reaction forces, in key order.
    pub fn reactions(&self) -> Vec<Vec3<f32>> {
        self.state.reactions.iter().map(|(_, &reaction)| reaction).collect()
    }

    /// Advance every named force by `dt` seconds against the current reactions, and return the
    /// total displacement.
    pub fn run(&mut self, dt: f32) -> Vec3<f32> {
        let reactions = self.reactions();
        self.state.forces
            .values_mut()
            .map(|force| force.update(dt, &reactions))
            .fold(Vec3::zero(), |sum, displacement| sum + displacement)
    }

    /// Save a copy of the current forces and reactions.
    pub fn push_checkpoint(&mut self) {
        self.checkpoints.push(self.state.clone());
    }

    /// Restore the most recently saved checkpoint and discard it. Errors if there is none.
    pub fn pop_checkpoint(&mut self) -> Result<()> {
        self.state = self.checkpoints
            .pop()
            .ok_or_else(|| anyhow!("unequal number of checkpoint pushes and pops"))?;
        Ok(())
    }

    /// Number of checkpoints currently saved.
    pub fn checkpoint_depth(&self) -> usize {
        self.checkpoints.len()
    }

    /// Run forward by `dt` seconds, pass the resulting displacement to `f`, then restore the state
    /// from before and return what `f` returned.
    pub fn speculate<T, F>(&mut self, dt: f32, f: F) -> Result<T>
    where
        F: FnOnce(Vec3<f32>) -> T,
    {
        let depth = self.checkpoint_depth();
        self.push_checkpoint();
        let displacement = self.run(dt);
        let value = f(displacement);
        self.pop_checkpoint()?;
        debug_assert_eq!(depth, self.checkpoint_depth());
        Ok(value)
    }
}


#[cfg(test)]
fn observable(system: &ForceSystem) -> (Vec<(String, PhysicsForce)>, Vec<Vec3<f32>>) {
    (
        system.forces().map(|(name, force)| (name.to_owned(), force.clone())).collect(),
        system.reactions(),
    )
}

#[test]
fn test_add_get_remove() {
    let mut system = ForceSystem::new();
    assert!(!system.has("gravity"));
    assert!(system.get("gravity").is_err());

    system.add("gravity", PhysicsForce::gravity());
    assert!(system.has("gravity"));
    assert_eq!(system.get("gravity").unwrap(), &PhysicsForce::gravity());

    system.add("gravity", PhysicsForce::constant(Vec3::unit_x()));
    assert_eq!(system.forces().count(), 1);
    assert_eq!(system.get("gravity").unwrap().velocity(), Vec3::unit_x());

    assert!(system.remove("gravity").is_some());
    assert!(system.remove("gravity").is_none());
    assert!(!system.has("gravity"));
}

#[test]
fn test_run_sums_forces() {
    let mut system = ForceSystem::new();
    system.add("movement", PhysicsForce::constant(Vec3::new(5.0, 0.0, 0.0)));
    system.add("jump", PhysicsForce::constant(Vec3::new(0.0, 4.0, 0.0)));
    assert_eq!(system.run(0.5), Vec3::new(2.5, 2.0, 0.0));

    let key = system.add_reaction(-Vec3::unit_x());
    assert_eq!(system.run(0.5), Vec3::new(0.0, 2.0, 0.0));
    assert_eq!(system.remove_reaction(key), Some(-Vec3::unit_x()));

    system.add_reaction(-Vec3::unit_y());
    system.clear_reactions();
    assert!(system.reactions().is_empty());
    assert_eq!(system.run(0.5), Vec3::new(2.5, 2.0, 0.0));
}

#[test]
fn test_reaction_keys_unique() {
    let mut system = ForceSystem::new();
    let a = system.add_reaction(Vec3::unit_y());
    let b = system.add_reaction(Vec3::unit_y());
    assert_ne!(a, b);
    assert_eq!(system.reactions().len(), 2);
}

#[test]
fn test_checkpoint_round_trip() {
    let mut system = ForceSystem::new();
    system.add("gravity", PhysicsForce::gravity());
    system.add("movement", PhysicsForce::constant(Vec3::new(-5.0, 0.0, 0.0)));
    system.run(0.1);
    system.add_reaction(Vec3::unit_y());

    let before = observable(&system);
    system.push_checkpoint();
    system.run(1.0 / 60.0);
    system.remove("movement");
    system.add_reaction(Vec3::unit_x());
    system.pop_checkpoint().unwrap();
    assert_eq!(observable(&system), before);
    assert_eq!(system.checkpoint_depth(), 0);
}

#[test]
fn test_checkpoints_nest() {
    let mut system = ForceSystem::new();
    system.add("gravity", PhysicsForce::gravity());
    let outer = observable(&system);
    system.push_checkpoint();
    system.run(0.05);
    let inner = observable(&system);
    system.push_checkpoint();
    system.run(0.05);
    assert_eq!(system.checkpoint_depth(), 2);
    system.pop_checkpoint().unwrap();
    assert_eq!(observable(&system), inner);
    system.pop_checkpoint().unwrap();
    assert_eq!(observable(&system), outer);
}

#[test]
fn test_unbalanced_pop_fails() {
    let mut system = ForceSystem::new();
    assert!(system.pop_checkpoint().is_err());
    system.push_checkpoint();
    assert!(system.pop_checkpoint().is_ok());
    assert!(system.pop_checkpoint().is_err());
}

#[test]
fn test_speculate_leaves_state() {
    let mut system = ForceSystem::new();
    system.add("gravity", PhysicsForce::gravity());
    let before = observable(&system);

    let first = system.speculate(0.1, |displacement| displacement).unwrap();
    let second = system.speculate(0.1, |displacement| displacement).unwrap();
    assert_eq!(first, second);
    assert!(first.y < 0.0);
    assert_eq!(observable(&system), before);
    assert_eq!(system.run(0.1), first);
}
