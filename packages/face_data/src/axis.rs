
use std::ops::{
    Index,
    IndexMut,
    Neg,
};
use vek::*;


/// One of the three world axes.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
#[repr(u8)]
pub enum Axis {
    X,
    Y,
    Z,
}

pub const NUM_AXES: usize = 3;

pub const AXES: [Axis; NUM_AXES] = [Axis::X, Axis::Y, Axis::Z];

impl Axis {
    /// Unit vector along this axis.
    pub fn unit(self) -> Vec3<f32> {
        match self {
            Axis::X => Vec3::unit_x(),
            Axis::Y => Vec3::unit_y(),
            Axis::Z => Vec3::unit_z(),
        }
    }
}

/// Direction along an axis.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
#[repr(u8)]
pub enum Pole {
    Neg,
    Pos,
}

impl Pole {
    pub const fn to_int(self) -> i64 {
        match self {
            Pole::Neg => -1,
            Pole::Pos => 1,
        }
    }

    pub const fn to_f32(self) -> f32 {
        match self {
            Pole::Neg => -1.0,
            Pole::Pos => 1.0,
        }
    }
}

impl Neg for Pole {
    type Output = Self;

    fn neg(self) -> Self {
        match self {
            Pole::Neg => Pole::Pos,
            Pole::Pos => Pole::Neg,
        }
    }
}


/// One of the six faces of an axis-aligned box, named by the axis and sign of its outward normal.
///
/// Declaration order is +x, -x, +y, -y, +z, -z. `FACES` and `PerFace` iterate in this order.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
#[repr(u8)]
pub enum Face {
    PosX,
    NegX,
    PosY,
    NegY,
    PosZ,
    NegZ,
}

pub const NUM_FACES: usize = 6;

pub const FACES: [Face; NUM_FACES] = [
    Face::PosX,
    Face::NegX,
    Face::PosY,
    Face::NegY,
    Face::PosZ,
    Face::NegZ,
];

impl Face {
    pub const fn to_axis_pole(self) -> (Axis, Pole) {
        match self {
            Face::PosX => (Axis::X, Pole::Pos),
            Face::NegX => (Axis::X, Pole::Neg),
            Face::PosY => (Axis::Y, Pole::Pos),
            Face::NegY => (Axis::Y, Pole::Neg),
            Face::PosZ => (Axis::Z, Pole::Pos),
            Face::NegZ => (Axis::Z, Pole::Neg),
        }
    }

    pub const fn from_axis_pole(axis: Axis, pole: Pole) -> Self {
        match (axis, pole) {
            (Axis::X, Pole::Pos) => Face::PosX,
            (Axis::X, Pole::Neg) => Face::NegX,
            (Axis::Y, Pole::Pos) => Face::PosY,
            (Axis::Y, Pole::Neg) => Face::NegY,
            (Axis::Z, Pole::Pos) => Face::PosZ,
            (Axis::Z, Pole::Neg) => Face::NegZ,
        }
    }

    pub const fn to_axis(self) -> Axis {
        self.to_axis_pole().0
    }

    pub const fn to_pole(self) -> Pole {
        self.to_axis_pole().1
    }

    /// The face on the other side of the box, facing the other way.
    pub const fn opposite(self) -> Self {
        match self {
            Face::PosX => Face::NegX,
            Face::NegX => Face::PosX,
            Face::PosY => Face::NegY,
            Face::NegY => Face::PosY,
            Face::PosZ => Face::NegZ,
            Face::NegZ => Face::PosZ,
        }
    }

    /// Outward unit normal.
    pub fn normal(self) -> Vec3<f32> {
        let (axis, pole) = self.to_axis_pole();
        axis.unit() * pole.to_f32()
    }
}

impl Neg for Face {
    type Output = Self;

    fn neg(self) -> Self {
        self.opposite()
    }
}


/// Value per face, indexable by `Face`.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Default)]
pub struct PerFace<T>(pub [T; NUM_FACES]);

impl<T> PerFace<T> {
    /// Construct by computing the value for each face.
    pub fn from_fn<F: FnMut(Face) -> T>(mut f: F) -> Self {
        PerFace(FACES.map(|face| f(face)))
    }

    pub fn map<B, F: FnMut(T) -> B>(self, f: F) -> PerFace<B> {
        PerFace(self.0.map(f))
    }

    /// Iterate over (face, value) pairs in `FACES` order.
    pub fn iter(&self) -> impl Iterator<Item=(Face, &T)> {
        FACES.into_iter().zip(self.0.iter())
    }
}

impl<T> Index<Face> for PerFace<T> {
    type Output = T;

    fn index(&self, i: Face) -> &T {
        &self.0[i as usize]
    }
}

impl<T> IndexMut<Face> for PerFace<T> {
    fn index_mut(&mut self, i: Face) -> &mut T {
        &mut self.0[i as usize]
    }
}

impl<T> IntoIterator for PerFace<T> {
    type Item = T;
    type IntoIter = <[T; NUM_FACES] as IntoIterator>::IntoIter;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}
