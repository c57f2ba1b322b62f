//! Bodies in the game world.

pub mod animation;
pub mod color_cube;
pub mod player;
