//! Linear translation animations.

use slab::Slab;
use vek::*;


/// Moves something by a fixed translation, evenly over a fixed duration.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Animation {
    /// Translation per second.
    velocity: Vec3<f32>,
    duration: f32,
    elapsed: f32,
}

impl Animation {
    pub fn new(translation: Vec3<f32>, duration: f32) -> Self {
        debug_assert!(duration > 0.0);
        Animation {
            velocity: translation / duration,
            duration,
            elapsed: 0.0,
        }
    }

    pub fn is_done(&self) -> bool {
        self.elapsed >= self.duration
    }

    /// How far the next `dt` seconds would move things, not overshooting the end.
    pub fn change(&self, dt: f32) -> Vec3<f32> {
        if self.is_done() {
            return Vec3::zero();
        }
        self.velocity * f32::min(self.duration - self.elapsed, dt)
    }

    /// Advance by `dt` seconds and return how far things moved.
    pub fn update(&mut self, dt: f32) -> Vec3<f32> {
        let change = self.change(dt);
        self.elapsed += dt;
        change
    }
}


/// Key of an animation within the `Animations` it was started in.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub struct AnimationKey(usize);

/// Set of running animations moving the same thing. Finished animations remove themselves.
#[derive(Debug, Clone, Default)]
pub struct Animations {
    active: Slab<Animation>,
}

impl Animations {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start moving by `translation` over `duration` seconds.
    pub fn start(&mut self, translation: Vec3<f32>, duration: f32) -> AnimationKey {
        AnimationKey(self.active.insert(Animation::new(translation, duration)))
    }

    pub fn is_active(&self, key: AnimationKey) -> bool {
        self.active.contains(key.0)
    }

    pub fn len(&self) -> usize {
        self.active.len()
    }

    pub fn is_empty(&self) -> bool {
        self.active.is_empty()
    }

    pub fn clear(&mut self) {
        self.active.clear();
    }

    /// Total change the next `dt` seconds would bring, without advancing.
    pub fn change(&self, dt: f32) -> Vec3<f32> {
        self.active
            .iter()
            .map(|(_, animation)| animation.change(dt))
            .fold(Vec3::zero(), |sum, change| sum + change)
    }

    /// Advance every animation by `dt` seconds, drop the ones that finish, and return the total
    /// change.
    pub fn update(&mut self, dt: f32) -> Vec3<f32> {
        let mut total: Vec3<f32> = Vec3::zero();
        for (_, animation) in self.active.iter_mut() {
            total += animation.update(dt);
        }
        self.active.retain(|_, animation| !animation.is_done());
        total
    }
}


#[test]
fn test_animation_does_not_overshoot() {
    let mut animation = Animation::new(Vec3::new(0.0, 0.0, 1.0), 1.0);
    let mut total: Vec3<f32> = Vec3::zero();
    for _ in 0..7 {
        total += animation.update(0.25);
    }
    assert!(animation.is_done());
    assert!((total - Vec3::new(0.0, 0.0, 1.0)).magnitude() < 1e-6);
    assert_eq!(animation.change(0.25), Vec3::zero());
}

#[test]
fn test_animations_finish_and_remove() {
    let mut animations = Animations::new();
    let short = animations.start(Vec3::new(0.0, 0.0, -1.0), 0.5);
    let long = animations.start(Vec3::new(2.0, 0.0, 0.0), 1.0);
    assert_eq!(animations.change(0.25), Vec3::new(0.5, 0.0, -0.5));
    assert_eq!(animations.len(), 2);

    assert_eq!(animations.update(0.5), Vec3::new(1.0, 0.0, -1.0));
    assert!(!animations.is_active(short));
    assert!(animations.is_active(long));

    assert_eq!(animations.update(0.75), Vec3::new(1.0, 0.0, 0.0));
    assert!(animations.is_empty());
}
