//! Axis-aligned box.

use super::{
    aa_box_face::{
        AaBoxFace,
        FaceOrientation,
    },
    collision::Collision,
};
use face_data::{
    Face,
    PerFace,
};
use vek::*;


/// Axis-aligned box, stored as its six faces.
///
/// Immutable once built. Use `translate` to get a moved copy.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct AaBox {
    center: Vec3<f32>,
    ext: Extent3<f32>,
    faces: PerFace<AaBoxFace>,
}

impl AaBox {
    /// Box centered on `center` with full width, height, and depth `ext`. Extents are assumed to
    /// be non-negative.
    pub fn from_center(center: Vec3<f32>, ext: Extent3<f32>) -> Self {
        let half = Vec3::new(ext.w, ext.h, ext.d) / 2.0;
        let corner = |x: f32, y: f32, z: f32| center + half * Vec3::new(x, y, z);

        let p = [
            corner(1.0, 1.0, 1.0),
            corner(-1.0, 1.0, 1.0),
            corner(1.0, 1.0, -1.0),
            corner(-1.0, 1.0, -1.0),
            corner(1.0, -1.0, 1.0),
            corner(-1.0, -1.0, 1.0),
            corner(1.0, -1.0, -1.0),
            corner(-1.0, -1.0, -1.0),
        ];

        // clockwise when viewed from outside, first corner lies on the face's plane
        let faces = PerFace::from_fn(|face| AaBoxFace::new(face, match face {
            Face::PosX => [p[0], p[2], p[6], p[4]],
            Face::NegX => [p[1], p[5], p[7], p[3]],
            Face::PosY => [p[0], p[1], p[3], p[2]],
            Face::NegY => [p[4], p[6], p[7], p[5]],
            Face::PosZ => [p[0], p[4], p[5], p[1]],
            Face::NegZ => [p[2], p[3], p[7], p[6]],
        }));

        AaBox {
            center,
            ext,
            faces,
        }
    }

    /// Copy of self moved by `offset`.
    pub fn translate(&self, offset: Vec3<f32>) -> Self {
        AaBox {
            center: self.center + offset,
            ext: self.ext,
            faces: self.faces.map(|face| face.translate(offset)),
        }
    }

    pub fn center(&self) -> Vec3<f32> {
        self.center
    }

    pub fn ext(&self) -> Extent3<f32> {
        self.ext
    }

    pub fn min(&self) -> Vec3<f32> {
        self.center - Vec3::new(self.ext.w, self.ext.h, self.ext.d) / 2.0
    }

    pub fn max(&self) -> Vec3<f32> {
        self.center + Vec3::new(self.ext.w, self.ext.h, self.ext.d) / 2.0
    }

    pub fn face(&self, face: Face) -> &AaBoxFace {
        &self.faces[face]
    }

    /// All eight corners. Each appears once.
    pub fn corners(&self) -> [Vec3<f32>; 8] {
        let pos = self.faces[Face::PosX].corners;
        let neg = self.faces[Face::NegX].corners;
        [pos[0], pos[1], pos[2], pos[3], neg[0], neg[1], neg[2], neg[3]]
    }

    /// Test self against `other`.
    ///
    /// Each face of self is classified against the opposing face of `other`. If any pair is
    /// separated the boxes do not collide and `None` is returned. Otherwise every axis is either
    /// penetrating or exactly touching, and the adjustments along them are returned, sorted
    /// ascending by delta. Exact contact is reported on its own: if any face pair touches, only
    /// the touching ones are returned, so that callers can tell resting on something from pushing
    /// into it.
    ///
    /// Collision directions are the normals of self's faces, so they point the way `other` would
    /// need to move to get out of self.
    pub fn test(&self, other: &AaBox) -> Option<Vec<Collision>> {
        let mut adjustments: Vec<FaceOrientation> = Vec::with_capacity(6);
        for (face, self_face) in self.faces.iter() {
            let orientation = self_face.classify_against(other.face(face.opposite()));
            if orientation.is_positive() {
                return None;
            }
            adjustments.push(orientation);
        }

        adjustments.sort_by(|a, b| a.delta.total_cmp(&b.delta));

        let to_collision = |o: &FaceOrientation| Collision::new(o.face.normal(), o.delta);
        let intersections = adjustments
            .iter()
            .filter(|o| o.is_intersect())
            .map(to_collision)
            .collect::<Vec<_>>();
        if !intersections.is_empty() {
            return Some(intersections);
        }

        Some(adjustments.iter().map(to_collision).collect())
    }

    /// Whether `test` would report anything.
    pub fn intersects(&self, other: &AaBox) -> bool {
        self.faces
            .iter()
            .all(|(face, self_face)| {
                !self_face.classify_against(other.face(face.opposite())).is_positive()
            })
    }
}


#[cfg(test)]
fn unit_box(x: f32, y: f32, z: f32) -> AaBox {
    AaBox::from_center(Vec3::new(x, y, z), Extent3::new(1.0, 1.0, 1.0))
}

#[test]
fn test_from_center_faces() {
    let aa_box = AaBox::from_center(Vec3::new(1.0, 2.0, 3.0), Extent3::new(2.0, 4.0, 6.0));
    assert_eq!(aa_box.min(), Vec3::new(0.0, 0.0, 0.0));
    assert_eq!(aa_box.max(), Vec3::new(2.0, 4.0, 6.0));
    for (face, aa_box_face) in aa_box.faces.iter() {
        assert_eq!(aa_box_face.face, face);
        assert_eq!(aa_box_face.normal(), face.normal());
        for corner in aa_box_face.corners {
            assert!(aa_box_face.plane.distance(corner).abs() < 1e-6);
            assert!(aa_box_face.plane.distance(aa_box.center()) < 0.0);
        }
    }

    let mut corners = aa_box.corners().to_vec();
    corners.sort_by(|a, b| a.into_array().partial_cmp(&b.into_array()).unwrap());
    corners.dedup();
    assert_eq!(corners.len(), 8);
}

#[test]
fn test_disjoint_boxes_do_not_collide() {
    let a = unit_box(0.0, 0.0, 0.0);
    for other in [
        unit_box(10.0, 0.0, 0.0),
        unit_box(-10.0, 0.0, 0.0),
        unit_box(0.0, 1.5, 0.0),
        unit_box(0.0, 0.0, -1.01),
        unit_box(0.3, 0.2, 2.0),
    ] {
        assert!(a.test(&other).is_none());
        assert!(other.test(&a).is_none());
        assert!(!a.intersects(&other));
    }
}

#[test]
fn test_touching_boxes_intersect_once() {
    let a = unit_box(0.0, 0.0, 0.0);
    let b = unit_box(1.0, 0.0, 0.0);
    let collisions = a.test(&b).unwrap();
    assert_eq!(collisions.len(), 1);
    assert_eq!(collisions[0].direction(), Vec3::unit_x());
    assert!(collisions[0].delta().abs() < 1e-4);
    assert!(collisions[0].is_intersection());

    let flipped = b.test(&a).unwrap();
    assert_eq!(flipped.len(), 1);
    assert_eq!(flipped[0].direction(), -Vec3::unit_x());
}

#[test]
fn test_identical_boxes_overlap_on_every_axis() {
    let a = unit_box(0.0, 0.0, 0.0);
    let collisions = a.test(&a).unwrap();
    assert_eq!(collisions.len(), 6);
    for pair in collisions.windows(2) {
        assert!(pair[0].delta() <= pair[1].delta());
    }
    for collision in &collisions {
        assert!((collision.delta() + 1.0).abs() < 1e-6);
        assert!(!collision.is_intersection());
    }
}

#[test]
fn test_penetration_sorted_by_delta() {
    // mostly overlapping on x, barely on y
    let a = unit_box(0.0, 0.0, 0.0);
    let b = unit_box(0.2, 0.9, 0.0);
    let collisions = a.test(&b).unwrap();
    assert_eq!(collisions.len(), 6);
    for pair in collisions.windows(2) {
        assert!(pair[0].delta() <= pair[1].delta());
    }
    // shallowest penetration is the last one, pushing b up out of a
    let last = collisions.last().unwrap();
    assert_eq!(last.direction(), Vec3::unit_y());
    assert!((last.delta() + 0.1).abs() < 1e-5);
}

#[test]
fn test_translate_matches_rebuild() {
    let a = AaBox::from_center(Vec3::new(0.0, 1.0, 0.0), Extent3::new(0.2, 0.5, 0.2));
    let offset = Vec3::new(0.25, -0.5, 1.0);
    let moved = a.translate(offset);
    let rebuilt = AaBox::from_center(a.center() + offset, a.ext());
    for (face, moved_face) in moved.faces.iter() {
        let rebuilt_face = rebuilt.face(face);
        for i in 0..4 {
            assert!((moved_face.corners[i] - rebuilt_face.corners[i]).magnitude() < 1e-6);
        }
    }
}
