//! Color cube, the blocks the board is built from.

use super::animation::Animations;
use crate::{
    input::Input,
    physics::prelude::*,
};
use vek::*;
use anyhow::*;


/// Depth of every cube along z.
pub const DEPTH: f32 = 2.0;

/// How far a cube moves towards the player's plane when it extends.
pub const EXTENSION: f32 = 1.0;

/// Seconds an animated extension or retraction takes.
pub const EXTENSION_SECONDS: f32 = 1.0;


/// Static block of one color. Only cubes which are extended reach far enough along z to collide
/// with the player.
#[derive(Debug, Clone)]
pub struct ColorCube {
    label: String,
    color: u32,
    size: f32,
    length: u32,
    cell: Vec2<i64>,
    center: Vec3<f32>,
    /// Offset of the visible block from `center`, moved by extension.
    offset: Vec3<f32>,
    extended: bool,
    animations: Animations,
}

impl ColorCube {
    /// Retracted cube `length` cells long, at board cell `cell` and centered on `center`.
    pub fn new(color: u32, size: f32, length: u32, cell: Vec2<i64>, center: Vec3<f32>) -> Self {
        ColorCube {
            label: format!("cube {:06x} at {},{}", color, cell.x, cell.y),
            color,
            size,
            length,
            cell,
            center,
            offset: Vec3::zero(),
            extended: false,
            animations: Animations::new(),
        }
    }

    pub fn color(&self) -> u32 {
        self.color
    }

    pub fn size(&self) -> f32 {
        self.size
    }

    pub fn cell(&self) -> Vec2<i64> {
        self.cell
    }

    pub fn is_extended(&self) -> bool {
        self.extended
    }

    /// Current center of the visible block.
    pub fn position(&self) -> Vec3<f32> {
        self.center + self.offset
    }

    pub fn is_animating(&self) -> bool {
        !self.animations.is_empty()
    }

    /// Extend towards the player's plane or retract away from it, immediately or over
    /// `EXTENSION_SECONDS`. Does nothing if already in that state.
    pub fn extend(&mut self, active: bool, animated: bool) {
        if self.extended == active {
            return;
        }

        let translation = Vec3::new(0.0, 0.0, if active { EXTENSION } else { -EXTENSION });
        if animated {
            self.animations.start(translation, EXTENSION_SECONDS);
        } else {
            self.offset += translation;
        }
        self.extended = active;
    }

    fn ext(&self) -> Extent3<f32> {
        Extent3::new(self.size * self.length as f32, self.size, DEPTH)
    }
}

impl Body for ColorCube {
    fn label(&self) -> &str {
        &self.label
    }

    fn bounding_box(&mut self, dt: f32) -> Result<AaBox> {
        Ok(AaBox::from_center(self.position() + self.animations.change(dt), self.ext()))
    }

    fn on_collision(&mut self, _other: &dyn Body, _collisions: &[Collision]) {}

    fn pre_update(&mut self, _dt: f32, _input: &Input) {}

    fn update(&mut self, dt: f32) {
        self.offset += self.animations.update(dt);
    }

    fn post_update(&mut self, _dt: f32) {}
}


#[test]
fn test_extend_immediately() {
    let mut cube = ColorCube::new(0xff0000, 0.5, 1, Vec2::new(0, 0), Vec3::zero());
    cube.extend(true, false);
    assert!(cube.is_extended());
    assert_eq!(cube.position(), Vec3::new(0.0, 0.0, 1.0));
    cube.extend(true, false);
    assert_eq!(cube.position(), Vec3::new(0.0, 0.0, 1.0));
    cube.extend(false, false);
    assert_eq!(cube.position(), Vec3::zero());
}

#[test]
fn test_extend_animated() {
    let mut cube = ColorCube::new(0x00ff00, 0.5, 3, Vec2::new(4, 1), Vec3::new(2.0, 0.5, 0.0));
    cube.extend(true, true);
    assert!(cube.is_extended());
    assert!(cube.is_animating());
    assert_eq!(cube.position().z, 0.0);

    let predicted = cube.bounding_box(0.5).unwrap();
    assert_eq!(predicted.center(), Vec3::new(2.0, 0.5, 0.5));
    assert_eq!(predicted.ext(), Extent3::new(1.5, 0.5, DEPTH));

    for _ in 0..4 {
        cube.update(0.25);
    }
    assert!(!cube.is_animating());
    assert!((cube.position() - Vec3::new(2.0, 0.5, 1.0)).magnitude() < 1e-6);
}
