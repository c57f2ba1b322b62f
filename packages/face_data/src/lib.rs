//! Axis, pole, and face enums for axis-aligned geometry.

mod axis;


pub use crate::axis::{
    Axis,
    AXES,
    NUM_AXES,
    Pole,
    Face,
    FACES,
    NUM_FACES,
    PerFace,
};


#[test]
fn test_face_axis_pole_round_trip() {
    for face in FACES {
        let (axis, pole) = face.to_axis_pole();
        assert_eq!(face, Face::from_axis_pole(axis, pole));
    }
}

#[test]
fn test_face_opposites() {
    for face in FACES {
        assert_ne!(face, -face);
        assert_eq!(face, -(-face));
        assert_eq!(face.to_axis(), (-face).to_axis());
        assert_eq!(face.normal(), -(-face).normal());
    }
}

#[test]
fn test_per_face_order_matches_faces() {
    let keys = PerFace::from_fn(|face| face);
    for (i, face) in keys.into_iter().enumerate() {
        assert_eq!(face, FACES[i]);
    }
}
