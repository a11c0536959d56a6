//! Geometry primitives shared by the generators, completing the `glam` math
//! crate with axis-aligned box types.

use std::ops::{BitOr, BitOrAssign};
use std::fmt;

use glam::{DVec3, IVec3};


/// Tolerance used when comparing box boundaries. Two boxes closer than this
/// on every axis are considered overlapping, a separation smaller than this
/// on the attachment axis is considered flush.
pub const EPSILON: f64 = 1e-6;


/// One of the three world axes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum Axis {
    X = 0,
    Y = 1,
    Z = 2,
}

impl Axis {

    /// Array containing all 3 axes.
    pub const ALL: [Self; 3] = [Self::X, Self::Y, Self::Z];

    /// Get the component index for that axis when using `glam` vectors.
    #[inline]
    pub fn index(self) -> usize {
        self as usize
    }

    /// Get the two axes orthogonal to this one.
    #[inline]
    pub fn orthogonal(self) -> [Self; 2] {
        match self {
            Axis::X => [Axis::Y, Axis::Z],
            Axis::Y => [Axis::X, Axis::Z],
            Axis::Z => [Axis::X, Axis::Y],
        }
    }

}


/// Represent a box facing, the attachment primitive of the figure assembler.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum Face {
    NegY = 0,
    PosY = 1,
    NegZ = 2,
    PosZ = 3,
    NegX = 4,
    PosX = 5,
}

impl Face {

    /// Array containing all 6 faces.
    pub const ALL: [Self; 6] = [Self::NegY, Self::PosY, Self::NegZ, Self::PosZ, Self::NegX, Self::PosX];

    #[inline]
    pub fn is_pos(self) -> bool {
        matches!(self, Face::PosX | Face::PosY | Face::PosZ)
    }

    /// Get the axis this face is perpendicular to.
    #[inline]
    pub fn axis(self) -> Axis {
        match self {
            Face::NegY | Face::PosY => Axis::Y,
            Face::NegZ | Face::PosZ => Axis::Z,
            Face::NegX | Face::PosX => Axis::X,
        }
    }

    /// Get the opposite face.
    #[inline]
    pub fn opposite(self) -> Self {
        match self {
            Face::NegY => Face::PosY,
            Face::PosY => Face::NegY,
            Face::NegZ => Face::PosZ,
            Face::PosZ => Face::NegZ,
            Face::NegX => Face::PosX,
            Face::PosX => Face::NegX,
        }
    }

    /// Get the delta vector for this face.
    #[inline]
    pub fn delta(self) -> IVec3 {
        match self {
            Face::NegY => IVec3::NEG_Y,
            Face::PosY => IVec3::Y,
            Face::NegZ => IVec3::NEG_Z,
            Face::PosZ => IVec3::Z,
            Face::NegX => IVec3::NEG_X,
            Face::PosX => IVec3::X,
        }
    }

}


/// An axis-aligned bounding box.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct BoundingBox {
    pub min: DVec3,
    pub max: DVec3,
}

impl BoundingBox {

    /// Construct a new bounding box from the minimum and maximum points.
    pub const fn new(min_x: f64, min_y: f64, min_z: f64, max_x: f64, max_y: f64, max_z: f64) -> Self {
        Self {
            min: DVec3::new(min_x, min_y, min_z),
            max: DVec3::new(max_x, max_y, max_z),
        }
    }

    /// Calculate the size of this bounding box.
    pub fn size(self) -> DVec3 {
        self.max - self.min
    }

    /// Calculate the center of the bounding box.
    pub fn center(self) -> DVec3 {
        (self.min + self.max) / 2.0
    }

    /// Return true if this bounding box intersects with the given one, shared
    /// boundaries do not count as an intersection.
    pub fn intersects(self, other: Self) -> bool {
        other.max.x > self.min.x && other.min.x < self.max.x &&
        other.max.y > self.min.y && other.min.y < self.max.y &&
        other.max.z > self.min.z && other.min.z < self.max.z
    }

    /// Return true if this bounding box fully contains the given one.
    pub fn contains_box(self, other: Self) -> bool {
        other.min.x >= self.min.x && other.max.x <= self.max.x &&
        other.min.y >= self.min.y && other.max.y <= self.max.y &&
        other.min.z >= self.min.z && other.max.z <= self.max.z
    }

}

// The bit or operator can be used to make a union of two bounding boxes.
impl BitOr<BoundingBox> for BoundingBox {
    type Output = BoundingBox;
    #[inline]
    fn bitor(self, rhs: BoundingBox) -> Self::Output {
        BoundingBox {
            min: self.min.min(rhs.min),
            max: self.max.max(rhs.max),
        }
    }
}

impl BitOrAssign for BoundingBox {
    #[inline]
    fn bitor_assign(&mut self, rhs: Self) {
        *self = *self | rhs;
    }
}

impl fmt::Display for BoundingBox {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}, {}]", self.min, self.max)
    }
}


/// Visual material of a generated box, picked by the figure assembler when a
/// glass chance is configured.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Material {
    #[default]
    Standard,
    Glass,
}


/// A gameplay modifier attached to a subset of generated boxes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum Debuff {
    Fragile = 0,
    Heavy = 1,
    NonTiltable = 2,
}

impl Debuff {

    /// Array containing all debuff kinds.
    pub const ALL: [Self; 3] = [Self::Fragile, Self::Heavy, Self::NonTiltable];

}


/// A set of unique debuffs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DebuffSet {
    /// Presence of debuffs are encoded bit by bit, the index of each debuff is
    /// the value of their enumeration discriminant.
    inner: u8,
}

impl DebuffSet {

    /// Create a new empty set.
    #[inline]
    pub const fn new() -> Self {
        Self { inner: 0 }
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.inner == 0
    }

    #[inline]
    pub fn clear(&mut self) {
        self.inner = 0;
    }

    #[inline]
    pub fn insert(&mut self, debuff: Debuff) -> bool {
        let prev = self.inner;
        self.inner |= 1 << debuff as u8;
        self.inner != prev
    }

    #[inline]
    pub fn remove(&mut self, debuff: Debuff) -> bool {
        let prev = self.inner;
        self.inner &= !(1 << debuff as u8);
        self.inner != prev
    }

    #[inline]
    pub fn contains(&self, debuff: Debuff) -> bool {
        self.inner & (1 << debuff as u8) != 0
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.inner.count_ones() as usize
    }

}

impl FromIterator<Debuff> for DebuffSet {

    #[inline]
    fn from_iter<T: IntoIterator<Item = Debuff>>(iter: T) -> Self {
        let mut set = DebuffSet::new();
        for debuff in iter {
            set.insert(debuff);
        }
        set
    }

}


/// An axis-aligned box emitted by the generators, defined by its center and
/// extents. Position and size are final once emitted, only the tag fields are
/// touched afterward by the distribution pass.
#[derive(Debug, Clone, PartialEq)]
pub struct PuzzleBox {
    /// Center of the box in world units.
    pub center: DVec3,
    /// Extents along each axis, always strictly positive.
    pub size: DVec3,
    /// Visual material of the box.
    pub material: Material,
    /// Gameplay modifiers attached by the distribution pass.
    pub debuffs: DebuffSet,
    /// Identifier assigned by the consumer once the box leaves the generator,
    /// never set during generation.
    pub id: Option<u32>,
}

impl PuzzleBox {

    #[inline]
    pub fn new(center: DVec3, size: DVec3) -> Self {
        Self {
            center,
            size,
            material: Material::Standard,
            debuffs: DebuffSet::new(),
            id: None,
        }
    }

    /// Calculate the minimum corner of the box.
    #[inline]
    pub fn min(&self) -> DVec3 {
        self.center - self.size / 2.0
    }

    /// Calculate the maximum corner of the box.
    #[inline]
    pub fn max(&self) -> DVec3 {
        self.center + self.size / 2.0
    }

    /// Calculate the volume of the box.
    #[inline]
    pub fn volume(&self) -> f64 {
        self.size.x * self.size.y * self.size.z
    }

    /// Get the bounding box of this box.
    #[inline]
    pub fn bounding_box(&self) -> BoundingBox {
        BoundingBox { min: self.min(), max: self.max() }
    }

    /// Return true if the interiors of the two boxes overlap. A collision
    /// requires overlap on all three axes simultaneously, flush faces are
    /// within tolerance and do not collide.
    pub fn overlaps(&self, other: &Self) -> bool {
        Axis::ALL.iter().all(|axis| {
            let i = axis.index();
            let distance = (self.center[i] - other.center[i]).abs() * 2.0;
            distance < self.size[i] + other.size[i] - EPSILON
        })
    }

    /// Return true if the two boxes are flush on one axis while their extents
    /// overlap on the two others, the contact relation used for connectivity.
    pub fn touches_face(&self, other: &Self) -> bool {
        for axis in Axis::ALL {
            let i = axis.index();
            let distance = (self.center[i] - other.center[i]).abs() * 2.0;
            let flush = (distance - (self.size[i] + other.size[i])).abs() <= EPSILON;
            if !flush {
                continue;
            }
            let touching = axis.orthogonal().iter().all(|ortho| {
                let j = ortho.index();
                let d = (self.center[j] - other.center[j]).abs() * 2.0;
                d < self.size[j] + other.size[j] - EPSILON
            });
            if touching {
                return true;
            }
        }
        false
    }

}


#[cfg(test)]
mod tests {

    use super::*;

    #[test]
    fn bounding_box_union() {
        let a = BoundingBox::new(0.0, 0.0, 0.0, 1.0, 1.0, 1.0);
        let b = BoundingBox::new(2.0, -1.0, 0.0, 3.0, 1.0, 1.0);
        assert_eq!(a | b, BoundingBox::new(0.0, -1.0, 0.0, 3.0, 1.0, 1.0));
    }

    #[test]
    fn box_overlap_requires_all_axes() {
        let a = PuzzleBox::new(DVec3::ZERO, DVec3::splat(2.0));
        let b = PuzzleBox::new(DVec3::new(1.5, 0.0, 0.0), DVec3::splat(2.0));
        let c = PuzzleBox::new(DVec3::new(1.5, 2.5, 0.0), DVec3::splat(2.0));
        assert!(a.overlaps(&b));
        assert!(!a.overlaps(&c));
    }

    #[test]
    fn flush_boxes_do_not_overlap_but_touch() {
        let a = PuzzleBox::new(DVec3::ZERO, DVec3::splat(2.0));
        let b = PuzzleBox::new(DVec3::new(2.0, 0.5, 0.0), DVec3::splat(2.0));
        assert!(!a.overlaps(&b));
        assert!(a.touches_face(&b));
        assert!(b.touches_face(&a));
    }

    #[test]
    fn corner_contact_is_not_a_face_touch() {
        let a = PuzzleBox::new(DVec3::ZERO, DVec3::splat(2.0));
        let b = PuzzleBox::new(DVec3::new(2.0, 2.0, 0.0), DVec3::splat(2.0));
        assert!(!a.overlaps(&b));
        assert!(!a.touches_face(&b));
    }

    #[test]
    fn debuff_set_basics() {
        let mut set = DebuffSet::new();
        assert!(set.is_empty());
        assert!(set.insert(Debuff::Fragile));
        assert!(!set.insert(Debuff::Fragile));
        assert!(set.insert(Debuff::Heavy));
        assert_eq!(set.len(), 2);
        assert!(set.contains(Debuff::Fragile));
        assert!(!set.contains(Debuff::NonTiltable));
        assert!(set.remove(Debuff::Heavy));
        assert!(!set.remove(Debuff::Heavy));
        assert_eq!(set.len(), 1);
        set.clear();
        assert!(set.is_empty());
    }

    #[test]
    fn face_axis_and_opposite() {
        for face in Face::ALL {
            assert_eq!(face.opposite().opposite(), face);
            assert_eq!(face.axis(), face.opposite().axis());
            assert_ne!(face.is_pos(), face.opposite().is_pos());
        }
    }

}
