//! Strategies choosing where to split a cell.

use crate::{bbox::BoundingBox, config::CostModel, scalar::Float};

/// Strategy used to choose the split plane of a cell, selected once per tree.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum SplitHeuristic {
    /// Median of the centroids along the axis of greatest extent. Produces a depth-balanced tree.
    Balanced,
    /// Sends to the left as many items as the left subtree of a complete binary tree holds.
    /// Point trees built with it use the implicit layout where the children of node `i` are the
    /// nodes `2i + 1` and `2i + 2`.
    LeftBalanced,
    /// Midpoint of the longest side of the cell, moved onto the nearest centroid when every
    /// centroid lies on the same side.
    SlidingMidpoint,
    /// Surface area heuristic: sweeps the bound edges of every axis and keeps the plane of
    /// smallest expected cost, or declines to split when no plane beats a leaf.
    #[default]
    SurfaceArea,
}

/// Axis-aligned plane dividing a cell.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SplitPlane<S> {
    /// Axis the plane is orthogonal to.
    pub axis: usize,
    /// Coordinate of the plane along the axis.
    pub position: S,
}

impl SplitHeuristic {
    /// Proposes a split plane for the items with the given bounds inside `cell`.
    ///
    /// Returns `None` when `bounds` is empty, or when [`SplitHeuristic::SurfaceArea`] finds no
    /// plane cheaper than a leaf. The other heuristics always propose a plane for non-empty input.
    ///
    /// # Example
    ///
    /// ```
    /// use kdindex::{BoundingBox, CostModel, SplitHeuristic};
    ///
    /// let points = [[0.0, 0.0], [1.0, 0.1], [2.0, 0.2], [3.0, 0.3], [4.0, 0.4]];
    /// let bounds: Vec<_> = points.map(BoundingBox::point).to_vec();
    /// let cell = BoundingBox::with(points);
    ///
    /// let plane = SplitHeuristic::Balanced
    ///     .choose_split(&cell, &bounds, &CostModel::default())
    ///     .unwrap();
    /// assert_eq!((plane.axis, plane.position), (0, 2.0));
    /// ```
    pub fn choose_split<const D: usize, S: Float>(
        self,
        cell: &BoundingBox<[S; D]>,
        bounds: &[BoundingBox<[S; D]>],
        cost: &CostModel,
    ) -> Option<SplitPlane<S>> {
        if bounds.is_empty() {
            return None;
        }

        match self {
            Self::Balanced => Some(rank_split(bounds, bounds.len() / 2)),
            Self::LeftBalanced => Some(rank_split(bounds, left_subtree_size(bounds.len()))),
            Self::SlidingMidpoint => Some(sliding_midpoint(cell, bounds)),
            Self::SurfaceArea => surface_area(cell, bounds, cost),
        }
    }
}

/// Number of nodes in the left subtree of a complete binary tree of `n` nodes whose last level
/// is filled from the left.
///
/// ```
/// use kdindex::heuristic::left_subtree_size;
///
/// assert_eq!(left_subtree_size(1), 0);
/// assert_eq!(left_subtree_size(4), 2);
/// assert_eq!(left_subtree_size(7), 3);
/// ```
pub fn left_subtree_size(n: usize) -> usize {
    if n <= 1 {
        return 0;
    }

    let height = (usize::BITS - 1 - n.leading_zeros()) as usize;
    let last_level_capacity = 1 << (height - 1);
    let last_level = n - ((1 << height) - 1);

    (last_level_capacity - 1) + last_level.min(last_level_capacity)
}

#[inline]
fn centroid<const D: usize, S: Float>(bounds: &BoundingBox<[S; D]>, axis: usize) -> S {
    bounds.min[axis].midpoint(bounds.max[axis])
}

/// Plane through the centroid of the given rank along the axis where centroids spread the most.
fn rank_split<const D: usize, S: Float>(
    bounds: &[BoundingBox<[S; D]>],
    rank: usize,
) -> SplitPlane<S> {
    let centroids = BoundingBox::with(bounds.iter().map(BoundingBox::center));
    let axis = centroids.major_axis();

    let mut coordinates: Vec<S> = bounds.iter().map(|b| centroid(b, axis)).collect();
    let rank = rank.min(coordinates.len() - 1);
    let (_, &mut position, _) = coordinates.select_nth_unstable_by(rank, S::total_cmp);

    SplitPlane { axis, position }
}

fn sliding_midpoint<const D: usize, S: Float>(
    cell: &BoundingBox<[S; D]>,
    bounds: &[BoundingBox<[S; D]>],
) -> SplitPlane<S> {
    let axis = cell.major_axis();
    let midpoint = cell.min[axis].midpoint(cell.max[axis]);

    let (lowest, highest, below) = bounds.iter().map(|b| centroid(b, axis)).fold(
        (S::infinity(), -S::infinity(), 0),
        |(lowest, highest, below), c| {
            (lowest.min(c), highest.max(c), below + usize::from(c < midpoint))
        },
    );

    let position = if below == 0 {
        lowest
    } else if below == bounds.len() {
        highest
    } else {
        midpoint
    };

    SplitPlane { axis, position }
}

/// Kind of a sweep event. The order matters: at equal positions, references ending there are
/// removed from the right side before planar references are counted and starting ones added.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
enum Event {
    End,
    Planar,
    Start,
}

fn surface_area<const D: usize, S: Float>(
    cell: &BoundingBox<[S; D]>,
    bounds: &[BoundingBox<[S; D]>],
    cost: &CostModel,
) -> Option<SplitPlane<S>> {
    let area = cell.surface_area().to_f64();
    if !(area > 0.0) {
        return None;
    }

    let n = bounds.len();
    let mut best: Option<(f64, SplitPlane<S>)> = None;
    let mut events = Vec::with_capacity(2 * n);

    for axis in 0..D {
        events.clear();
        for b in bounds {
            let low = b.min[axis].max(cell.min[axis]);
            let high = b.max[axis].min(cell.max[axis]);
            if low == high {
                events.push((low, Event::Planar));
            } else {
                events.push((low, Event::Start));
                events.push((high, Event::End));
            }
        }
        events.sort_unstable_by(|a, b| a.0.total_cmp(&b.0).then(a.1.cmp(&b.1)));

        let (mut left, mut right) = (0, n);
        let mut i = 0;
        while i < events.len() {
            let position = events[i].0;
            let mut counts = [0usize; 3];
            while i < events.len() && events[i].0 == position {
                counts[events[i].1 as usize] += 1;
                i += 1;
            }
            let [ending, planar, starting] = counts;

            right -= ending + planar;

            if cell.min[axis] < position && position < cell.max[axis] {
                let (below, above) = cell.split(axis, position);
                let split_cost = cost.split_cost(
                    below.surface_area().to_f64() / area,
                    above.surface_area().to_f64() / area,
                    left + planar,
                    right,
                );

                if best.map_or(true, |(c, _)| split_cost < c) {
                    best = Some((split_cost, SplitPlane { axis, position }));
                }
            }

            left += starting + planar;
        }
    }

    let leaf_cost = cost.leaf_cost(n);
    best.filter(|&(c, _)| c < leaf_cost).map(|(_, plane)| plane)
}
