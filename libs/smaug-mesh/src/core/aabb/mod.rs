//! Axis-aligned bounding boxes.

use super::vec3::Vec3;

/// Axis-aligned bounding box given by its two extreme corners.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aabb {
    /// Componentwise minimum corner.
    pub min: Vec3,
    /// Componentwise maximum corner.
    pub max: Vec3,
}

impl Aabb {
    /// Smallest box holding every point, `None` for an empty set.
    ///
    /// # Examples
    /// ```
    /// use smaug_mesh::{Aabb, Vec3};
    /// let b = Aabb::from_points([Vec3::new(1.0, -2.0, 0.0), Vec3::new(-1.0, 2.0, 3.0)]).unwrap();
    /// assert_eq!(b.min, Vec3::new(-1.0, -2.0, 0.0));
    /// assert_eq!(b.max, Vec3::new(1.0, 2.0, 3.0));
    /// ```
    pub fn from_points<I>(points: I) -> Option<Self>
    where
        I: IntoIterator<Item = Vec3>,
    {
        let mut iter = points.into_iter();
        let first = iter.next()?;
        Some(iter.fold(Self { min: first, max: first }, |b, p| Self {
            min: b.min.min(p),
            max: b.max.max(p),
        }))
    }

    /// Box shifted by `offset`.
    pub fn translated(&self, offset: Vec3) -> Self {
        Self {
            min: self.min + offset,
            max: self.max + offset,
        }
    }

    /// Whether `point` lies inside the box grown by `margin` on every side.
    pub fn contains(&self, point: Vec3, margin: f64) -> bool {
        let grow = Vec3::splat(margin);
        point.cmpge(self.min - grow).all() && point.cmple(self.max + grow).all()
    }

    /// Whether the two boxes touch once each is grown by `margin`.
    ///
    /// Boxes sharing only a face count as overlapping, which is exactly the
    /// case of two rooms with coincident walls.
    pub fn overlaps(&self, other: &Aabb, margin: f64) -> bool {
        let grow = Vec3::splat(margin);
        (self.min - grow).cmple(other.max + grow).all()
            && (other.min - grow).cmple(self.max + grow).all()
    }

    /// Center of the box.
    pub fn center(&self) -> Vec3 {
        (self.min + self.max) * 0.5
    }
}
