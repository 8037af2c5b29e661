//! Bounds of a triangle restricted to an axis-aligned cell.
//!
//! The triangle is clipped as a polygon against the six half-spaces bounding the cell, one after
//! the other (Sutherland–Hodgman), and the bounds of what survives are returned.

use smallvec::SmallVec;

use crate::{bbox::BoundingBox, scalar::Float};

/// A triangle clipped by six planes has at most nine vertices.
type Polygon<S> = SmallVec<[[S; 3]; 9]>;

/// Returns the bounding box of the part of the triangle lying inside `cell`.
///
/// - The result is the empty (invalid) box when the triangle and the cell are disjoint.
/// - When the cell contains the triangle, the result is exactly the bounds of its vertices.
/// - A triangle that only touches the cell yields a flat or point box, which is valid.
///
/// # Example
///
/// ```
/// use kdindex::{clip::clip_triangle, BoundingBox};
///
/// let triangle = [[0.0, 0.0, 0.0], [1.0, 0.0, 0.0], [1.0, 1.0, 0.0]];
/// let cell = BoundingBox::new([0.0, 0.5, -1.0], [1.0, 1.0, 1.0]);
///
/// let clipped = clip_triangle(triangle, &cell);
/// assert_eq!(clipped, BoundingBox::new([0.5, 0.5, 0.0], [1.0, 1.0, 0.0]));
/// ```
pub fn clip_triangle<S: Float>(
    vertices: [[S; 3]; 3],
    cell: &BoundingBox<[S; 3]>,
) -> BoundingBox<[S; 3]> {
    if !cell.is_valid() {
        return BoundingBox::empty();
    }

    let mut polygon: Polygon<S> = vertices.into_iter().collect();

    for axis in 0..3 {
        polygon = clip_polygon(&polygon, axis, cell.min[axis], true);
        polygon = clip_polygon(&polygon, axis, cell.max[axis], false);
    }

    if polygon.len() < 3 {
        return BoundingBox::empty();
    }

    // Vertices kept within tolerance outside a face are clamped onto it.
    let bounds = BoundingBox::with(polygon);
    BoundingBox::new(
        std::array::from_fn(|i| bounds.min[i].max(cell.min[i]).min(cell.max[i])),
        std::array::from_fn(|i| bounds.max[i].min(cell.max[i]).max(cell.min[i])),
    )
}

/// Clips the polygon against the half-space above (`keep_above`) or below the plane orthogonal
/// to `axis` at `value`.
fn clip_polygon<S: Float>(
    input: &Polygon<S>,
    axis: usize,
    value: S,
    keep_above: bool,
) -> Polygon<S> {
    let mut output = Polygon::new();
    if input.len() < 3 {
        return output;
    }

    // Vertices this close to the plane count as lying on it.
    let tolerance = S::EPSILON * (S::ONE + value.abs());
    let is_inside = |vertex: &[S; 3]| {
        let distance = if keep_above {
            vertex[axis] - value
        } else {
            value - vertex[axis]
        };
        distance >= -tolerance
    };

    let Some(mut current) = input.last().copied() else {
        return output;
    };
    let mut current_inside = is_inside(&current);

    for &next in input {
        let next_inside = is_inside(&next);

        if current_inside != next_inside {
            output.push(crossing(&current, &next, axis, value));
        }
        if next_inside {
            output.push(next);
        }

        current = next;
        current_inside = next_inside;
    }

    output
}

/// Point where the segment crosses the plane, snapped onto it.
#[inline]
fn crossing<S: Float>(from: &[S; 3], to: &[S; 3], axis: usize, value: S) -> [S; 3] {
    let t = (value - from[axis]) / (to[axis] - from[axis]);
    let mut point: [S; 3] = std::array::from_fn(|i| from[i] + (to[i] - from[i]) * t);
    point[axis] = value;
    point
}

#[cfg(test)]
mod tests {
    use super::*;

    const TRIANGLE: [[f32; 3]; 3] = [[0.0, 0.0, 0.0], [1.0, 0.0, 0.0], [1.0, 1.0, 0.0]];

    fn cell(min: [f32; 3], max: [f32; 3]) -> BoundingBox<[f32; 3]> {
        BoundingBox::new(min, max)
    }

    #[test]
    fn split_in_half() {
        let clipped = clip_triangle(TRIANGLE, &cell([0.0, 0.5, -1.0], [1.0, 1.0, 1.0]));

        assert_eq!(clipped.min, [0.5, 0.5, 0.0]);
        assert_eq!(clipped.max, [1.0, 1.0, 0.0]);
    }

    #[test]
    fn clipped_away() {
        let clipped = clip_triangle(TRIANGLE, &cell([2.0; 3], [3.0; 3]));

        assert!(!clipped.is_valid());
    }

    #[test]
    fn fully_contained() {
        let clipped = clip_triangle(TRIANGLE, &cell([-1.0; 3], [1.0; 3]));

        assert_eq!(clipped, BoundingBox::with(TRIANGLE));
    }

    #[test]
    fn flat_cell_keeps_coplanar_triangle() {
        let flat = cell([-100.0, -100.0, 0.0], [100.0, 100.0, 0.0]);
        let clipped = clip_triangle(TRIANGLE, &flat);

        assert_eq!(clipped.min, [0.0, 0.0, 0.0]);
        assert_eq!(clipped.max, [1.0, 1.0, 0.0]);
    }

    #[test]
    fn touching_collapses_to_point() {
        let clipped = clip_triangle(TRIANGLE, &cell([0.0, 1.0, 0.0], [1.0, 2.0, 0.0]));

        assert!(clipped.is_valid());
        assert_eq!(clipped.min, [1.0, 1.0, 0.0]);
        assert_eq!(clipped.max, [1.0, 1.0, 0.0]);
    }

    #[test]
    fn touching_along_an_edge_collapses_to_line() {
        let clipped = clip_triangle(TRIANGLE, &cell([1.0, -1.0, -1.0], [2.0, 2.0, 1.0]));

        assert!(clipped.is_valid());
        assert_eq!(clipped.min, [1.0, 0.0, 0.0]);
        assert_eq!(clipped.max, [1.0, 1.0, 0.0]);
    }

    #[test]
    fn vertices_just_outside_a_face_are_clamped_onto_it() {
        let beyond = f32::from_bits(1.0f32.to_bits() + 1);
        let triangle = [[beyond, 0.0, 0.0], [beyond, 1.0, 0.0], [beyond, 0.0, 1.0]];
        let clipped = clip_triangle(triangle, &cell([0.0; 3], [1.0; 3]));

        assert!(clipped.is_valid());
        assert_eq!(clipped.min, [1.0, 0.0, 0.0]);
        assert_eq!(clipped.max, [1.0, 1.0, 1.0]);

        let below = -f32::from_bits(1);
        let triangle = [[0.0, 0.0, below], [1.0, 0.0, below], [0.0, 1.0, 0.5]];
        let clipped = clip_triangle(triangle, &cell([0.0; 3], [1.0; 3]));

        assert!(clipped.is_valid());
        assert_eq!(clipped.min, [0.0; 3]);
        assert_eq!(clipped.max, [1.0, 1.0, 0.5]);
    }

    #[test]
    fn tilted_triangle_in_f64() {
        let triangle = [[0.0, 0.0, 0.0], [2.0, 0.0, 2.0], [0.0, 2.0, 2.0]];
        let clipped = clip_triangle(triangle, &BoundingBox::new([0.0; 3], [1.0, 1.0, 1.0]));

        assert_eq!(clipped.min, [0.0; 3]);
        assert_eq!(clipped.max, [1.0, 1.0, 1.0]);
    }

    #[test]
    fn clipped_bounds_never_leave_the_cell() {
        let triangle = [[-3.0, 0.5, 0.5], [4.0, 0.25, 0.75], [0.5, 5.0, 0.25]];
        let c = cell([0.0, 0.0, 0.0], [1.0, 1.0, 1.0]);
        let clipped = clip_triangle(triangle, &c);

        assert!(clipped.is_valid());
        assert!(c.contains_box(&clipped));
        assert!(BoundingBox::with(triangle).contains_box(&clipped));
    }
}
