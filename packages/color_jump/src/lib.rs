//! Collision detection and force integration core of Color Jump, a side-scrolling platformer.
//!
//! Bodies are axis-aligned boxes. Each frame, every body predicts where its box will be after the
//! frame by speculatively running its forces and rolling them back, pairs of boxes are tested
//! face-by-face, and both bodies in a colliding pair are told about it before they integrate their
//! forces for real.

#[macro_use]
extern crate tracing;

pub mod logging;
pub mod settings;
pub mod input;
pub mod physics;
pub mod objects;
pub mod alarm_mgr;
pub mod cube_index;
pub mod game;
