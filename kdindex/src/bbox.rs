use crate::scalar::Float;

/// An axis-aligned bounding box using arrays.
///
/// A box is valid when `min <= max` on every axis. The [`Default`] box has `min = +∞` and
/// `max = -∞`: it is empty, invalid, and acts as the identity of [`BoundingBox::union`]. A flat
/// box (`min == max` on some axes) is valid and distinct from the empty box.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BoundingBox<A> {
    /// Minimum corner of the box.
    pub min: A,
    /// Maximum corner of the box.
    pub max: A,
}

impl<A> BoundingBox<A> {
    /// Creates a new [`BoundingBox`] with the given min and max values.
    #[inline]
    pub const fn new(min: A, max: A) -> Self {
        Self { min, max }
    }
}

impl<const D: usize, S: Float> Default for BoundingBox<[S; D]> {
    #[inline]
    fn default() -> Self {
        Self::new([S::infinity(); D], [-S::infinity(); D])
    }
}

impl<const D: usize, S: Float> BoundingBox<[S; D]> {
    /// Creates the empty [`BoundingBox`].
    #[inline]
    pub fn empty() -> Self {
        Self::default()
    }

    /// Creates a degenerate [`BoundingBox`] containing a single position.
    #[inline]
    pub fn point(position: [S; D]) -> Self {
        Self::new(position, position)
    }

    /// Creates a new [`BoundingBox`] that contains the given positions.
    #[inline]
    pub fn with<I>(positions: I) -> Self
    where
        I: IntoIterator<Item = [S; D]>,
    {
        let mut result = Self::default();
        for position in positions {
            result.extend(&position);
        }
        result
    }

    /// Returns `true` if `min <= max` on every axis.
    #[inline]
    pub fn is_valid(&self) -> bool {
        (0..D).all(|i| self.min[i] <= self.max[i])
    }

    /// Returns `true` if every coordinate of the box is finite.
    #[inline]
    pub fn is_finite(&self) -> bool {
        self.min.iter().chain(&self.max).all(|s| s.is_finite())
    }

    /// Extends the [`BoundingBox`] so that it contains the given position.
    #[inline]
    pub fn extend(&mut self, position: &[S; D]) {
        for i in 0..D {
            self.min[i] = self.min[i].min(position[i]);
            self.max[i] = self.max[i].max(position[i]);
        }
    }

    /// Extends the [`BoundingBox`] so that it contains the other box.
    #[inline]
    pub fn expand(&mut self, other: &Self) {
        for i in 0..D {
            self.min[i] = self.min[i].min(other.min[i]);
            self.max[i] = self.max[i].max(other.max[i]);
        }
    }

    /// Returns the smallest box containing both boxes.
    #[inline]
    pub fn union(&self, other: &Self) -> Self {
        let mut result = *self;
        result.expand(other);
        result
    }

    /// Returns the region shared by both boxes. The result is invalid when they are disjoint and
    /// flat when they only touch.
    #[inline]
    pub fn intersection(&self, other: &Self) -> Self {
        let mut result = *self;
        for i in 0..D {
            result.min[i] = self.min[i].max(other.min[i]);
            result.max[i] = self.max[i].min(other.max[i]);
        }
        result
    }

    /// Returns `true` if the boxes share at least one point. Touching boxes overlap.
    #[inline]
    pub fn overlaps(&self, other: &Self) -> bool {
        self.intersection(other).is_valid()
    }

    /// Returns `true` if the position lies inside the box or on its boundary.
    #[inline]
    pub fn contains(&self, position: &[S; D]) -> bool {
        (0..D).all(|i| self.min[i] <= position[i] && position[i] <= self.max[i])
    }

    /// Returns `true` if the other box lies inside this box.
    #[inline]
    pub fn contains_box(&self, other: &Self) -> bool {
        (0..D).all(|i| self.min[i] <= other.min[i] && other.max[i] <= self.max[i])
    }

    /// Returns the center of the [`BoundingBox`].
    #[inline]
    pub fn center(&self) -> [S; D] {
        std::array::from_fn(|i| self.min[i].midpoint(self.max[i]))
    }

    /// Returns the size of the [`BoundingBox`].
    #[inline]
    pub fn size(&self) -> [S; D] {
        std::array::from_fn(|i| self.max[i] - self.min[i])
    }

    /// Returns the axis along which the box is the widest. Ties favour the lowest axis.
    #[inline]
    pub fn major_axis(&self) -> usize {
        let size = self.size();
        (1..D).fold(0, |axis, i| if size[i] > size[axis] { i } else { axis })
    }

    /// Returns the volume (area in 2D, length in 1D) of the box, or zero when it is invalid.
    #[inline]
    pub fn volume(&self) -> S {
        if !self.is_valid() {
            return S::ZERO;
        }

        self.size().into_iter().fold(S::ONE, |v, s| v * s)
    }

    /// Returns the measure of the boundary of the box: the surface area in 3D, the perimeter in
    /// 2D. Zero when the box is invalid.
    pub fn surface_area(&self) -> S {
        if !self.is_valid() {
            return S::ZERO;
        }

        let size = self.size();
        let mut area = S::ZERO;
        for i in 0..D {
            let face = (0..D)
                .filter(|&j| j != i)
                .fold(S::ONE, |f, j| f * size[j]);
            area = area + face;
        }
        area + area
    }

    /// Returns the squared distance between the position and the closest point of the box.
    #[inline]
    pub fn distance_squared(&self, position: &[S; D]) -> S {
        (0..D).fold(S::ZERO, |d, i| {
            let delta = if position[i] < self.min[i] {
                self.min[i] - position[i]
            } else if position[i] > self.max[i] {
                position[i] - self.max[i]
            } else {
                S::ZERO
            };
            d + delta * delta
        })
    }

    /// Splits the box with the plane orthogonal to `axis` at `position`, returning the part
    /// below and the part above the plane.
    #[inline]
    pub fn split(&self, axis: usize, position: S) -> (Self, Self) {
        let mut below = *self;
        let mut above = *self;
        below.max[axis] = position;
        above.min[axis] = position;
        (below, above)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    type Box3 = BoundingBox<[f32; 3]>;

    #[test]
    fn empty_is_not_flat() {
        let empty = Box3::empty();
        let flat = Box3::point([1.0, 2.0, 3.0]);

        assert!(!empty.is_valid());
        assert!(flat.is_valid());
        assert_eq!(flat.volume(), 0.0);
        assert_eq!(empty.union(&flat), flat);
    }

    #[test]
    fn union_and_intersection() {
        let a = Box3::new([0.0; 3], [2.0; 3]);
        let b = Box3::new([1.0; 3], [3.0; 3]);
        let c = Box3::new([2.0, 0.0, 0.0], [4.0, 1.0, 1.0]);
        let d = Box3::new([5.0; 3], [6.0; 3]);

        assert_eq!(a.union(&b), Box3::new([0.0; 3], [3.0; 3]));
        assert_eq!(a.intersection(&b), Box3::new([1.0; 3], [2.0; 3]));
        assert!(a.overlaps(&c));
        assert_eq!(a.intersection(&c).size()[0], 0.0);
        assert!(!a.overlaps(&d));
        assert!(a.union(&b).contains_box(&a));
    }

    #[test]
    fn measures() {
        let b = Box3::new([0.0; 3], [1.0, 2.0, 3.0]);

        assert_eq!(b.volume(), 6.0);
        assert_eq!(b.surface_area(), 22.0);
        assert_eq!(b.major_axis(), 2);
        assert_eq!(b.center(), [0.5, 1.0, 1.5]);

        let square = BoundingBox::<[f64; 2]>::new([0.0; 2], [1.0; 2]);
        assert_eq!(square.surface_area(), 4.0);
        assert_eq!(square.volume(), 1.0);
    }

    #[test]
    fn distance_to_point() {
        let b = Box3::new([0.0; 3], [1.0; 3]);

        assert_eq!(b.distance_squared(&[0.5, 0.5, 0.5]), 0.0);
        assert_eq!(b.distance_squared(&[2.0, 0.5, 3.0]), 5.0);
    }

    #[test]
    fn split_shares_plane() {
        let b = Box3::new([0.0; 3], [4.0; 3]);
        let (below, above) = b.split(1, 1.0);

        assert_eq!(below.max, [4.0, 1.0, 4.0]);
        assert_eq!(above.min, [0.0, 1.0, 0.0]);
        assert_eq!(below.union(&above), b);
    }

    #[test]
    fn non_finite_boxes() {
        assert!(!Box3::point([f32::NAN, 0.0, 0.0]).is_finite());
        assert!(!Box3::point([f32::NAN, 0.0, 0.0]).is_valid());
        assert!(Box3::new([0.0; 3], [1.0; 3]).is_finite());
    }
}
