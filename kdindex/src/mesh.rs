//! Primitive sets a [`SurfaceTree`](crate::SurfaceTree) can index.

use crate::{
    bbox::BoundingBox,
    clip::clip_triangle,
    error::{MeshError, MeshResult},
    ray::Ray,
    scalar::{Float, InternalVector},
};

/// Trait for indexed sets of geometric primitives.
///
/// Primitives are identified by their index in `0..len()`. Trees store these indices and never
/// copy the geometry.
pub trait Primitives<S: Float>: Sync {
    /// Number of primitives in the set.
    fn len(&self) -> usize;

    /// Returns `true` if the set holds no primitive.
    #[inline]
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Bounds of the primitive, or `None` if it is degenerate (zero area, non-finite
    /// coordinates) and must not be indexed.
    fn bounds(&self, index: usize) -> Option<BoundingBox<[S; 3]>>;

    /// Bounds of the part of the primitive lying inside `cell`. The result may be invalid when
    /// they are disjoint.
    ///
    /// Defaults to the intersection of the bounds of the primitive with the cell.
    #[inline]
    fn clipped_bounds(&self, index: usize, cell: &BoundingBox<[S; 3]>) -> BoundingBox<[S; 3]> {
        self.bounds(index)
            .map_or_else(BoundingBox::empty, |bounds| bounds.intersection(cell))
    }

    /// Intersects the ray with the primitive, ignoring hits farther than `t_max`.
    ///
    /// Returns the parametric distance and the barycentric coordinates of the hit.
    fn intersect(&self, index: usize, ray: &Ray<S>, t_max: S) -> Option<(S, [S; 2])>;
}

/// Indexed triangle mesh borrowing the buffers of the caller.
#[derive(Clone, Copy, Debug)]
pub struct TriangleMesh<'m, S> {
    vertices: &'m [[S; 3]],
    indices: &'m [[u32; 3]],
}

impl<'m, S: Float> TriangleMesh<'m, S> {
    /// Creates a new [`TriangleMesh`], checking that every index refers to a vertex.
    ///
    /// # Example
    ///
    /// ```
    /// use kdindex::{MeshError, TriangleMesh};
    ///
    /// let vertices = [[0.0, 0.0, 0.0], [1.0, 0.0, 0.0], [0.0, 1.0, 0.0]];
    ///
    /// assert!(TriangleMesh::new(&vertices, &[[0, 1, 2]]).is_ok());
    /// assert!(matches!(
    ///     TriangleMesh::new(&vertices, &[[0, 1, 3]]),
    ///     Err(MeshError::IndexOutOfRange { triangle: 0, index: 3, .. })
    /// ));
    /// ```
    pub fn new(vertices: &'m [[S; 3]], indices: &'m [[u32; 3]]) -> MeshResult<Self> {
        for (triangle, face) in indices.iter().enumerate() {
            if let Some(&index) = face.iter().find(|&&i| i as usize >= vertices.len()) {
                return Err(MeshError::IndexOutOfRange {
                    triangle,
                    index,
                    vertex_count: vertices.len(),
                });
            }
        }

        Ok(Self { vertices, indices })
    }

    /// Vertices of the mesh.
    #[inline]
    pub fn vertices(&self) -> &'m [[S; 3]] {
        self.vertices
    }

    /// Vertex indices of the triangles of the mesh.
    #[inline]
    pub fn indices(&self) -> &'m [[u32; 3]] {
        self.indices
    }

    /// Returns the three vertices of the triangle at the given index.
    #[inline]
    pub fn triangle(&self, index: usize) -> [[S; 3]; 3] {
        self.indices[index].map(|i| self.vertices[i as usize])
    }
}

impl<S: Float> Primitives<S> for TriangleMesh<'_, S> {
    #[inline]
    fn len(&self) -> usize {
        self.indices.len()
    }

    fn bounds(&self, index: usize) -> Option<BoundingBox<[S; 3]>> {
        let triangle = self.triangle(index);
        if !triangle.iter().flatten().all(|s| s.is_finite()) {
            return None;
        }

        let [a, b, c] = triangle.map(S::Vector3::from_array);
        let normal = (b - a).cross(c - a);
        (normal.dot(normal) > S::ZERO).then(|| BoundingBox::with(triangle))
    }

    #[inline]
    fn clipped_bounds(&self, index: usize, cell: &BoundingBox<[S; 3]>) -> BoundingBox<[S; 3]> {
        clip_triangle(self.triangle(index), cell)
    }

    #[inline]
    fn intersect(&self, index: usize, ray: &Ray<S>, t_max: S) -> Option<(S, [S; 2])> {
        intersect_triangle(self.triangle(index), ray, t_max)
    }
}

/// Möller–Trumbore ray/triangle intersection.
///
/// Hits are accepted in `(ray.t_min, t_max]`; rays parallel to the plane of the triangle miss.
pub fn intersect_triangle<S: Float>(
    triangle: [[S; 3]; 3],
    ray: &Ray<S>,
    t_max: S,
) -> Option<(S, [S; 2])> {
    let [a, b, c] = triangle.map(S::Vector3::from_array);
    let origin = S::Vector3::from_array(ray.origin);
    let direction = S::Vector3::from_array(ray.direction);

    let edge1 = b - a;
    let edge2 = c - a;
    let p = direction.cross(edge2);
    let det = edge1.dot(p);

    if det == S::ZERO {
        return None;
    }
    let inv_det = S::ONE / det;

    let s = origin - a;
    let u = s.dot(p) * inv_det;
    if u < S::ZERO || u > S::ONE {
        return None;
    }

    let q = s.cross(edge1);
    let v = direction.dot(q) * inv_det;
    if v < S::ZERO || u + v > S::ONE {
        return None;
    }

    let t = edge2.dot(q) * inv_det;
    (t > ray.t_min && t <= t_max).then_some((t, [u, v]))
}

#[cfg(test)]
mod tests {
    use super::*;

    const VERTICES: [[f32; 3]; 5] = [
        [0.0, 0.0, 0.0],
        [1.0, 0.0, 0.0],
        [0.0, 1.0, 0.0],
        [2.0, 0.0, 0.0],
        [f32::NAN, 0.0, 0.0],
    ];

    #[test]
    fn rejects_out_of_range_indices() {
        let err = TriangleMesh::new(&VERTICES, &[[0, 1, 2], [2, 7, 1]]).unwrap_err();

        assert_eq!(
            err,
            MeshError::IndexOutOfRange {
                triangle: 1,
                index: 7,
                vertex_count: 5
            }
        );
    }

    #[test]
    fn degenerate_triangles_have_no_bounds() {
        let indices = [[0, 1, 2], [0, 1, 3], [0, 0, 2], [0, 1, 4]];
        let mesh = TriangleMesh::new(&VERTICES, &indices).unwrap();

        assert_eq!(
            mesh.bounds(0),
            Some(BoundingBox::new([0.0; 3], [1.0, 1.0, 0.0]))
        );
        assert_eq!(mesh.bounds(1), None);
        assert_eq!(mesh.bounds(2), None);
        assert_eq!(mesh.bounds(3), None);
    }

    #[test]
    fn hits_triangle() {
        let triangle = [[0.0, 0.0, 0.0], [1.0, 0.0, 0.0], [0.0, 1.0, 0.0]];
        let ray = Ray::new([0.25, 0.5, 1.0], [0.0, 0.0, -1.0]);

        let (t, [u, v]) = intersect_triangle(triangle, &ray, f64::INFINITY).unwrap();
        assert_eq!(t, 1.0);
        assert_eq!((u, v), (0.25, 0.5));

        assert_eq!(intersect_triangle(triangle, &ray, 0.5), None);
        assert_eq!(
            intersect_triangle(triangle, &ray.with_range(1.0, 2.0), 2.0),
            None
        );
    }

    #[test]
    fn misses_triangle() {
        let triangle = [[0.0f32, 0.0, 0.0], [1.0, 0.0, 0.0], [0.0, 1.0, 0.0]];

        let outside = Ray::new([0.75, 0.75, 1.0], [0.0, 0.0, -1.0]);
        assert_eq!(intersect_triangle(triangle, &outside, f32::INFINITY), None);

        let behind = Ray::new([0.25, 0.25, 1.0], [0.0, 0.0, 1.0]);
        assert_eq!(intersect_triangle(triangle, &behind, f32::INFINITY), None);

        let parallel = Ray::new([-1.0, 0.25, 0.0], [1.0, 0.0, 0.0]);
        assert_eq!(intersect_triangle(triangle, &parallel, f32::INFINITY), None);
    }

    #[test]
    fn mesh_clips_to_cell() {
        let mesh = TriangleMesh::new(&VERTICES, &[[0, 3, 2]]).unwrap();
        let cell = BoundingBox::new([1.0, 0.0, -1.0], [3.0, 1.0, 1.0]);

        let clipped = mesh.clipped_bounds(0, &cell);
        assert_eq!(clipped.min, [1.0, 0.0, 0.0]);
        assert_eq!(clipped.max, [2.0, 0.5, 0.0]);
    }
}
