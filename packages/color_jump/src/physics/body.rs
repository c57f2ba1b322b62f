//! Things that take part in collision and physics.

use super::{
    aa_box::AaBox,
    collision::Collision,
};
use crate::input::Input;
use anyhow::Result;


/// A body in the game world.
///
/// Each frame the driver calls, in order and for every body: `pre_update`, then `bounding_box` and
/// `on_collision` through the `CollisionMgr`, then `update`, then `post_update`.
pub trait Body {
    /// Short name for logging.
    fn label(&self) -> &str;

    /// Box the body will occupy `dt` seconds from now, assuming it keeps moving as it is.
    ///
    /// Must not change the body's real state.
    fn bounding_box(&mut self, dt: f32) -> Result<AaBox>;

    /// Respond to colliding with `other`. Each collision's direction is the way this body should
    /// move to get out of `other`.
    fn on_collision(&mut self, other: &dyn Body, collisions: &[Collision]);

    /// Prepare for the frame, before collisions are tested.
    fn pre_update(&mut self, dt: f32, input: &Input);

    /// Move for real.
    fn update(&mut self, dt: f32);

    /// Clean up transient state at the end of the frame.
    fn post_update(&mut self, dt: f32);
}
