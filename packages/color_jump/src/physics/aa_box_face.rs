//! Face of an axis-aligned box.

use super::plane::{
    Plane,
    Orientation,
};
use face_data::Face;
use vek::*;


/// One of the six faces of an `AaBox`: a plane facing outwards from the box, and the four
/// corners bounding the face in clockwise winding.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct AaBoxFace {
    pub face: Face,
    pub plane: Plane,
    pub corners: [Vec3<f32>; 4],
}

impl AaBoxFace {
    pub fn new(face: Face, corners: [Vec3<f32>; 4]) -> Self {
        AaBoxFace {
            face,
            plane: Plane::of_face(face, corners[0]),
            corners,
        }
    }

    pub fn normal(&self) -> Vec3<f32> {
        self.plane.normal()
    }

    pub fn translate(&self, offset: Vec3<f32>) -> Self {
        AaBoxFace {
            face: self.face,
            plane: self.plane.translate(offset),
            corners: self.corners.map(|corner| corner + offset),
        }
    }

    /// Orientation of `other` relative to this face's plane.
    ///
    /// This averages the signed distances of `other`'s corners rather than clipping one polygon
    /// against the other. For the parallel, opposing faces of axis-aligned boxes every corner has
    /// the same distance, so the average is exact; for any other pair it is an approximation.
    pub fn classify_against<'a>(&'a self, other: &'a AaBoxFace) -> FaceOrientation<'a> {
        let total = other.corners
            .iter()
            .map(|&corner| self.plane.distance(corner))
            .sum::<f32>();
        let delta = total / other.corners.len() as f32;
        FaceOrientation {
            face: self,
            opposing: other,
            orientation: Orientation::of_distance(delta),
            delta,
        }
    }
}


/// Result of classifying one face against another.
#[derive(Debug, Copy, Clone)]
pub struct FaceOrientation<'a> {
    /// The face whose plane was classified against.
    pub face: &'a AaBoxFace,
    /// The face whose corners were classified.
    pub opposing: &'a AaBoxFace,
    pub orientation: Orientation,
    /// Average signed distance of `opposing`'s corners from `face`'s plane.
    pub delta: f32,
}

impl<'a> FaceOrientation<'a> {
    pub fn is_positive(&self) -> bool {
        self.orientation == Orientation::Positive
    }

    pub fn is_negative(&self) -> bool {
        self.orientation == Orientation::Negative
    }

    pub fn is_intersect(&self) -> bool {
        self.orientation == Orientation::Intersect
    }
}


#[test]
fn test_classify_against_averages_corners() {
    let face = AaBoxFace::new(Face::PosY, [
        Vec3::new(0.5, 0.0, 0.5),
        Vec3::new(-0.5, 0.0, 0.5),
        Vec3::new(-0.5, 0.0, -0.5),
        Vec3::new(0.5, 0.0, -0.5),
    ]);
    // tilted quad straddling the plane, averaging to 0.25 above it
    let other = AaBoxFace::new(Face::NegY, [
        Vec3::new(0.0, 1.0, 0.0),
        Vec3::new(0.0, 1.0, 1.0),
        Vec3::new(1.0, -0.5, 1.0),
        Vec3::new(1.0, -0.5, 0.0),
    ]);
    let orientation = face.classify_against(&other);
    assert!(orientation.is_positive());
    assert!((orientation.delta - 0.25).abs() < 1e-6);
    assert_eq!(orientation.face.face, Face::PosY);
    assert_eq!(orientation.opposing.face, Face::NegY);

    let touching = other.translate(Vec3::new(0.0, -0.25, 0.0));
    assert!(face.classify_against(&touching).is_intersect());

    let sunk = other.translate(Vec3::new(0.0, -1.0, 0.0));
    assert!(face.classify_against(&sunk).is_negative());
}
