use crate::{bbox::BoundingBox, scalar::Float};

/// Half-line `origin + t * direction` restricted to the parametric range `[t_min, t_max]`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Ray<S> {
    /// Origin of the ray.
    pub origin: [S; 3],
    /// Direction of the ray. It does not need to be normalized; distances are expressed in
    /// multiples of its length.
    pub direction: [S; 3],
    /// Smallest accepted parametric distance.
    pub t_min: S,
    /// Largest accepted parametric distance.
    pub t_max: S,
}

impl<S: Float> Ray<S> {
    /// Creates a new [`Ray`] covering `[0, ∞)`.
    ///
    /// Any vector type convertible into an array can be used, e.g. `glam::Vec3`.
    #[inline]
    pub fn new(origin: impl Into<[S; 3]>, direction: impl Into<[S; 3]>) -> Self {
        Self {
            origin: origin.into(),
            direction: direction.into(),
            t_min: S::ZERO,
            t_max: S::infinity(),
        }
    }

    /// Returns the same ray restricted to the range `[t_min, t_max]`.
    #[inline]
    pub fn with_range(self, t_min: S, t_max: S) -> Self {
        Self {
            t_min,
            t_max,
            ..self
        }
    }

    /// Returns the point at the parametric distance `t`.
    #[inline]
    pub fn at(&self, t: S) -> [S; 3] {
        std::array::from_fn(|i| self.origin[i] + self.direction[i] * t)
    }
}

/// Closest intersection between a ray and a primitive.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Hit<S> {
    /// Parametric distance along the ray.
    pub t: S,
    /// Index of the primitive in the indexed set.
    pub primitive: usize,
    /// Barycentric coordinates `(u, v)` of the hit point; the weight of the first vertex is
    /// `1 - u - v`.
    pub barycentric: [S; 2],
}

impl<S: Float> BoundingBox<[S; 3]> {
    /// Returns the parametric range over which the ray lies inside the box, clamped to the range
    /// of the ray, or `None` if they do not meet.
    pub fn intersect_ray(&self, ray: &Ray<S>) -> Option<(S, S)> {
        if !self.is_valid() {
            return None;
        }

        let mut near = ray.t_min;
        let mut far = ray.t_max;

        for i in 0..3 {
            let (origin, direction) = (ray.origin[i], ray.direction[i]);

            if direction == S::ZERO {
                if origin < self.min[i] || origin > self.max[i] {
                    return None;
                }
                continue;
            }

            let inverse = S::ONE / direction;
            let mut t0 = (self.min[i] - origin) * inverse;
            let mut t1 = (self.max[i] - origin) * inverse;
            if t0 > t1 {
                std::mem::swap(&mut t0, &mut t1);
            }

            near = near.max(t0);
            far = far.min(t1);

            if near > far {
                return None;
            }
        }

        Some((near, far))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ray_through_box() {
        let b = BoundingBox::new([0.0f32; 3], [1.0; 3]);
        let ray = Ray::new([-1.0, 0.5, 0.5], [1.0, 0.0, 0.0]);

        assert_eq!(b.intersect_ray(&ray), Some((1.0, 2.0)));
        assert_eq!(b.intersect_ray(&ray.with_range(0.0, 0.5)), None);
        assert_eq!(b.intersect_ray(&ray.with_range(1.5, 10.0)), Some((1.5, 2.0)));
    }

    #[test]
    fn ray_parallel_to_slab() {
        let b = BoundingBox::new([0.0f64; 3], [1.0; 3]);

        let inside = Ray::new([0.5, 0.5, -2.0], [0.0, 0.0, 1.0]);
        assert_eq!(b.intersect_ray(&inside), Some((2.0, 3.0)));

        let outside = Ray::new([1.5, 0.5, -2.0], [0.0, 0.0, 1.0]);
        assert_eq!(b.intersect_ray(&outside), None);
    }

    #[test]
    fn ray_from_inside_and_glam_vectors() {
        let b = BoundingBox::new([-1.0f32; 3], [1.0; 3]);
        let ray = Ray::new(glam::Vec3::ZERO, glam::Vec3::new(0.0, -2.0, 0.0));

        assert_eq!(b.intersect_ray(&ray), Some((0.0, 0.5)));
        assert_eq!(ray.at(0.5), [0.0, -1.0, 0.0]);
    }

    #[test]
    fn empty_box_is_never_hit() {
        let ray = Ray::new([0.0f32; 3], [1.0, 1.0, 1.0]);
        assert_eq!(BoundingBox::empty().intersect_ray(&ray), None);
    }
}
