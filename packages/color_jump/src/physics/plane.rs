//! Planes and point/plane orientation.

use face_data::Face;
use vek::*;
use anyhow::*;


/// Distances within this of zero are considered to lie on a plane.
pub const EPSILON: f32 = 0.0001;


/// Which side of a plane something lies on.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum Orientation {
    /// In front of the plane, on the side its normal points to.
    Positive,
    /// Behind the plane.
    Negative,
    /// On the plane, within `EPSILON`.
    Intersect,
}

impl Orientation {
    /// Label a signed distance from a plane.
    pub fn of_distance(distance: f32) -> Self {
        if distance > EPSILON {
            Orientation::Positive
        } else if distance < -EPSILON {
            Orientation::Negative
        } else {
            Orientation::Intersect
        }
    }
}


/// Plane in implicit form, `normal · p + d = 0`.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Plane {
    normal: Vec3<f32>,
    point: Vec3<f32>,
    d: f32,
}

impl Plane {
    /// Plane through `point` facing `normal`. The normal is normalized, and must not be zero.
    pub fn new(normal: Vec3<f32>, point: Vec3<f32>) -> Result<Self> {
        let magnitude = normal.magnitude();
        ensure!(
            magnitude.is_finite() && magnitude > 0.0,
            "plane normal must be a non-zero finite vector, got {:?}",
            normal,
        );
        Ok(Self::from_unit_normal(normal / magnitude, point))
    }

    /// Plane through `point` facing outwards from the given face of an axis-aligned box.
    pub fn of_face(face: Face, point: Vec3<f32>) -> Self {
        Self::from_unit_normal(face.normal(), point)
    }

    fn from_unit_normal(normal: Vec3<f32>, point: Vec3<f32>) -> Self {
        Plane {
            normal,
            point,
            d: -normal.dot(point),
        }
    }

    /// Copy of self moved by `offset`.
    pub fn translate(&self, offset: Vec3<f32>) -> Self {
        Self::from_unit_normal(self.normal, self.point + offset)
    }

    pub fn normal(&self) -> Vec3<f32> {
        self.normal
    }

    pub fn point(&self) -> Vec3<f32> {
        self.point
    }

    /// Signed distance from the plane to `point`, positive in front.
    pub fn distance(&self, point: Vec3<f32>) -> f32 {
        self.normal.dot(point) + self.d
    }

    pub fn classify(&self, point: Vec3<f32>) -> Orientation {
        Orientation::of_distance(self.distance(point))
    }
}


#[test]
fn test_plane_classify() {
    let plane = Plane::new(Vec3::new(0.0, 2.0, 0.0), Vec3::new(0.0, 1.0, 0.0)).unwrap();
    assert_eq!(plane.normal(), Vec3::unit_y());
    assert_eq!(plane.classify(Vec3::new(3.0, 1.5, -2.0)), Orientation::Positive);
    assert_eq!(plane.classify(Vec3::new(3.0, 0.5, -2.0)), Orientation::Negative);
    assert_eq!(plane.classify(Vec3::new(3.0, 1.00005, -2.0)), Orientation::Intersect);
    assert!((plane.distance(Vec3::new(0.0, 4.0, 0.0)) - 3.0).abs() < EPSILON);
}

#[test]
fn test_plane_rejects_zero_normal() {
    assert!(Plane::new(Vec3::zero(), Vec3::one()).is_err());
}

#[test]
fn test_plane_translate() {
    let plane = Plane::of_face(Face::NegX, Vec3::new(-0.5, 0.0, 0.0));
    assert_eq!(plane.classify(Vec3::new(-1.0, 0.0, 0.0)), Orientation::Positive);

    let moved = plane.translate(Vec3::new(-1.0, 0.0, 0.0));
    assert_eq!(moved.classify(Vec3::new(-1.0, 0.0, 0.0)), Orientation::Negative);
    assert_eq!(moved.classify(Vec3::new(-1.5, 7.0, 7.0)), Orientation::Intersect);
}
