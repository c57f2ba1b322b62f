//! Collision detection and force integration.
//!
//! Every body is an axis-aligned box. Boxes are tested against each other face by face: each face
//! of one box is compared with the opposite face of the other, which is enough to find
//! separation, resting contact, and penetration along each world axis. Motion comes from forces
//! held in a per-body `ForceSystem`, which can be run forward speculatively and rolled back so
//! bodies can predict their boxes before collisions are tested.

pub mod plane;
pub mod aa_box_face;
pub mod aa_box;
pub mod collision;
pub mod collisions;
pub mod force;
pub mod force_system;
pub mod body;
pub mod collision_mgr;


/// Physics system common re-exports.
pub mod prelude {
    pub use super::{
        aa_box::AaBox,
        body::Body,
        collision::Collision,
        collisions::best_collision,
        collision_mgr::CollisionMgr,
        force::{
            PhysicsForce,
            GRAVITY,
        },
        force_system::ForceSystem,
        plane::EPSILON,
    };
}
