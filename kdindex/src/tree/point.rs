use std::{cmp::Ordering, collections::BinaryHeap};

use smallvec::SmallVec;
use tracing::{debug, warn};

use crate::{
    bbox::BoundingBox,
    config::BuildConfig,
    error::{BuildError, BuildResult},
    heuristic::{left_subtree_size, SplitHeuristic, SplitPlane},
    sample::{Position, Value},
    scalar::Float,
    tree::{BuildStats, NodeID, Tree},
};

/// Node of a [`PointTree`], storing one sample.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PointNode<const D: usize, S> {
    /// Position of the sample.
    pub position: [S; D],
    /// Index of the sample in the slice the tree was built from.
    pub index: u32,
    /// Axis of the plane through the sample separating its subtrees.
    pub axis: u8,
    /// Child whose samples are below the plane.
    pub left: Option<NodeID>,
    /// Child whose samples are above the plane.
    pub right: Option<NodeID>,
}

/// Sample found by a nearest neighbor query.
///
/// Results are ordered by distance, then by sample index.
#[derive(Clone, Copy, Debug)]
pub struct SearchResult<S> {
    /// Squared distance between the query and the sample.
    pub distance_squared: S,
    /// Index of the sample in the slice the tree was built from.
    pub index: usize,
    /// Node storing the sample.
    pub node: NodeID,
}

impl<S: Float> PartialEq for SearchResult<S> {
    #[inline]
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl<S: Float> Eq for SearchResult<S> {}

impl<S: Float> PartialOrd for SearchResult<S> {
    #[inline]
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<S: Float> Ord for SearchResult<S> {
    #[inline]
    fn cmp(&self, other: &Self) -> Ordering {
        self.distance_squared
            .total_cmp(&other.distance_squared)
            .then(self.index.cmp(&other.index))
    }
}

/// K-d tree storing one point sample per node, answering proximity queries.
///
/// The values of the samples are stored in a vector parallel to the nodes.
///
/// # Example
///
/// ```
/// use kdindex::{BuildConfig, PointTree};
///
/// let samples = [([0.0, 0.0], 'a'), ([1.0, 0.0], 'b'), ([0.0, 3.0], 'c'), ([5.0, 5.0], 'd')];
/// let config = BuildConfig::for_points();
/// let tree: PointTree<2, f64, char> = PointTree::build(&samples, &config).unwrap();
///
/// let nearest = tree.k_nearest([0.9, 0.2], 2);
/// assert_eq!(nearest.iter().map(|r| r.index).collect::<Vec<_>>(), [1, 0]);
/// assert_eq!(tree.value(&nearest[0]), &'b');
///
/// let mut close = tree.radius_search([0.0, 0.0], 3.0);
/// close.sort();
/// assert_eq!(close, [0, 1, 2]);
/// ```
#[derive(Clone, Debug)]
pub struct PointTree<const D: usize, S, V> {
    tree: Tree<PointNode<D, S>, V>,
    bounds: BoundingBox<[S; D]>,
    heuristic: SplitHeuristic,
    stats: BuildStats,
}

/// Range of samples waiting to be turned into a subtree.
struct Task<const D: usize, S> {
    start: usize,
    end: usize,
    cell: BoundingBox<[S; D]>,
    depth: usize,
    link: Link,
}

#[derive(Clone, Copy)]
enum Link {
    Root,
    Left(NodeID),
    Right(NodeID),
}

impl<const D: usize, S: Float, V> PointTree<D, S, V> {
    /// Builds a [`PointTree`] over the given samples.
    ///
    /// Samples with non-finite coordinates are left out and counted in
    /// [`BuildStats::excluded`]. [`BuildConfig::max_depth`] and [`BuildConfig::max_leaf_size`]
    /// do not apply: every node stores exactly one sample.
    pub fn build<P>(samples: &[P], config: &BuildConfig) -> BuildResult<Self>
    where
        P: Position + Value<Value = V>,
        P::Vector: Into<[S; D]>,
    {
        config.validate()?;

        let count = samples.len();
        if u32::try_from(count).is_err() {
            return Err(BuildError::TooManyPrimitives(count));
        }

        debug!(
            samples = count,
            heuristic = ?config.heuristic,
            dimensions = D,
            "Building point tree"
        );

        let mut entries: Vec<([S; D], u32)> = samples
            .iter()
            .enumerate()
            .map(|(index, sample)| (sample.position().into(), index as u32))
            .filter(|(position, _)| position.iter().all(|s| s.is_finite()))
            .collect();

        let excluded = count - entries.len();
        if excluded > 0 {
            warn!(excluded, samples = count, "Excluded samples with non-finite coordinates");
        }

        let bounds = BoundingBox::with(entries.iter().map(|(position, _)| *position));
        let nodes = build_nodes(&mut entries, bounds, config);

        let mut stats = BuildStats {
            primitives: count,
            excluded,
            nodes: nodes.len(),
            references: nodes.len(),
            ..BuildStats::default()
        };
        stats.leaves = nodes
            .iter()
            .filter(|(node, _)| node.left.is_none() && node.right.is_none())
            .count();
        stats.depth = nodes.iter().map(|&(_, depth)| depth).max().unwrap_or(0);

        let mut tree = Tree::with_capacity(nodes.len());
        for (node, _) in nodes {
            tree.data.push(samples[node.index as usize].value());
            tree.nodes.push(node);
        }

        debug!(
            nodes = stats.nodes,
            leaves = stats.leaves,
            depth = stats.depth,
            "Built point tree"
        );

        Ok(Self {
            tree,
            bounds,
            heuristic: config.heuristic,
            stats,
        })
    }

    /// Returns the nodes of the tree, the root first.
    #[inline]
    pub fn nodes(&self) -> &[PointNode<D, S>] {
        &self.tree.nodes
    }

    /// Returns the values of the samples, parallel to the nodes.
    #[inline]
    pub fn values(&self) -> &[V] {
        &self.tree.data
    }

    /// Returns the value of the sample found by a query.
    #[inline]
    pub fn value(&self, result: &SearchResult<S>) -> &V {
        &self.tree.data[result.node as usize]
    }

    /// Returns the number of samples in the tree.
    #[inline]
    pub fn len(&self) -> usize {
        self.tree.nodes.len()
    }

    /// Returns `true` if the tree holds no sample.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.tree.nodes.is_empty()
    }

    /// Returns the bounds of the samples.
    #[inline]
    pub fn bounds(&self) -> &BoundingBox<[S; D]> {
        &self.bounds
    }

    /// Returns the heuristic the tree was built with.
    #[inline]
    pub fn heuristic(&self) -> SplitHeuristic {
        self.heuristic
    }

    /// Returns the statistics gathered during construction.
    #[inline]
    pub fn stats(&self) -> &BuildStats {
        &self.stats
    }

    /// Returns the `k` samples closest to the query, sorted by increasing distance then by
    /// index. Fewer are returned when the tree holds less than `k` samples.
    ///
    /// # Panics
    ///
    /// Panics if `k` is zero.
    pub fn k_nearest(&self, query: impl Into<[S; D]>, k: usize) -> Vec<SearchResult<S>> {
        self.k_nearest_within(query, k, S::infinity())
    }

    /// Returns the `k` samples closest to the query among those whose squared distance is at
    /// most `max_distance_squared`, sorted by increasing distance then by index.
    ///
    /// # Panics
    ///
    /// Panics if `k` is zero.
    pub fn k_nearest_within(
        &self,
        query: impl Into<[S; D]>,
        k: usize,
        max_distance_squared: S,
    ) -> Vec<SearchResult<S>> {
        let mut results = Vec::with_capacity(k.min(self.len()));
        self.k_nearest_into(query, k, max_distance_squared, &mut results);
        results
    }

    /// Same as [`PointTree::k_nearest_within`], writing into `results` after clearing it.
    ///
    /// Returns the number of visited nodes.
    ///
    /// # Panics
    ///
    /// Panics if `k` is zero.
    pub fn k_nearest_into(
        &self,
        query: impl Into<[S; D]>,
        k: usize,
        max_distance_squared: S,
        results: &mut Vec<SearchResult<S>>,
    ) -> usize {
        assert!(k > 0, "the number of neighbors must be at least one");

        let query = query.into();
        let mut heap = BinaryHeap::with_capacity(k.min(self.len()) + 1);

        let visited = self.search(&query, |node, distance_squared| {
            if distance_squared <= max_distance_squared {
                let candidate = SearchResult {
                    distance_squared,
                    index: self.tree.nodes[node as usize].index as usize,
                    node,
                };

                if heap.len() < k {
                    heap.push(candidate);
                } else if heap.peek().is_some_and(|worst| candidate < *worst) {
                    heap.pop();
                    heap.push(candidate);
                }
            }

            match heap.peek() {
                Some(worst) if heap.len() == k => worst.distance_squared,
                _ => max_distance_squared,
            }
        });

        results.clear();
        results.extend(heap.into_sorted_vec());
        visited
    }

    /// Returns the indices of every sample within `radius` of the query, in no particular order.
    ///
    /// # Panics
    ///
    /// Panics if `radius` is negative or NaN.
    pub fn radius_search(&self, query: impl Into<[S; D]>, radius: S) -> Vec<usize> {
        let mut results = Vec::new();
        self.radius_search_into(query, radius, &mut results);
        results
    }

    /// Same as [`PointTree::radius_search`], writing into `results` after clearing it.
    ///
    /// Returns the number of visited nodes.
    ///
    /// # Panics
    ///
    /// Panics if `radius` is negative or NaN.
    pub fn radius_search_into(
        &self,
        query: impl Into<[S; D]>,
        radius: S,
        results: &mut Vec<usize>,
    ) -> usize {
        assert!(radius >= S::ZERO, "the radius must be non-negative");

        let query = query.into();
        let radius_squared = radius * radius;

        results.clear();
        self.search(&query, |node, distance_squared| {
            if distance_squared <= radius_squared {
                results.push(self.tree.nodes[node as usize].index as usize);
            }
            radius_squared
        })
    }

    /// Depth-first search visiting the child on the side of the query first.
    ///
    /// `visit` receives every visited node with its squared distance to the query and returns
    /// the squared distance beyond which subtrees are pruned. Returns the number of visited
    /// nodes.
    fn search<F>(&self, query: &[S; D], mut visit: F) -> usize
    where
        F: FnMut(NodeID, S) -> S,
    {
        if self.tree.nodes.is_empty() {
            return 0;
        }

        let mut stack: SmallVec<[(NodeID, S); 32]> = SmallVec::new();
        stack.push((0, S::ZERO));
        let mut bound = S::infinity();
        let mut visited = 0;

        while let Some((id, plane_distance)) = stack.pop() {
            if plane_distance > bound {
                continue;
            }

            visited += 1;
            let node = &self.tree.nodes[id as usize];
            bound = visit(id, distance_squared(&node.position, query));

            let axis = node.axis as usize;
            let delta = query[axis] - node.position[axis];
            let (near, far) = if delta < S::ZERO {
                (node.left, node.right)
            } else {
                (node.right, node.left)
            };

            if let Some(far) = far {
                stack.push((far, plane_distance.max(delta * delta)));
            }
            if let Some(near) = near {
                stack.push((near, plane_distance));
            }
        }

        visited
    }
}

#[inline]
fn distance_squared<const D: usize, S: Float>(a: &[S; D], b: &[S; D]) -> S {
    (0..D).fold(S::ZERO, |d, i| {
        let delta = a[i] - b[i];
        d + delta * delta
    })
}

/// Arranges the entries into nodes, returned with their depth.
///
/// Left-balanced trees use the implicit layout, other trees are stored in depth-first order.
fn build_nodes<const D: usize, S: Float>(
    entries: &mut [([S; D], u32)],
    bounds: BoundingBox<[S; D]>,
    config: &BuildConfig,
) -> Vec<(PointNode<D, S>, usize)> {
    let implicit = config.heuristic == SplitHeuristic::LeftBalanced;
    let mut slots: Vec<Option<(PointNode<D, S>, usize)>> = vec![None; entries.len()];
    let mut next = 0;

    let mut stack = Vec::new();
    if !entries.is_empty() {
        stack.push(Task {
            start: 0,
            end: entries.len(),
            cell: bounds,
            depth: 0,
            link: Link::Root,
        });
    }

    while let Some(task) = stack.pop() {
        let id = if implicit {
            match task.link {
                Link::Root => 0,
                Link::Left(parent) => 2 * parent as usize + 1,
                Link::Right(parent) => 2 * parent as usize + 2,
            }
        } else {
            next += 1;
            next - 1
        };

        match task.link {
            Link::Root => {}
            Link::Left(parent) => {
                if let Some((node, _)) = &mut slots[parent as usize] {
                    node.left = Some(id as NodeID);
                }
            }
            Link::Right(parent) => {
                if let Some((node, _)) = &mut slots[parent as usize] {
                    node.right = Some(id as NodeID);
                }
            }
        }

        let samples = &mut entries[task.start..task.end];
        let (plane, median) = choose_plane(&task.cell, samples, config);
        let axis = plane.axis;

        // Ties are broken by index, so ranks stay balanced when coordinates repeat.
        let rank = if implicit {
            left_subtree_size(samples.len())
        } else if median {
            samples.len() / 2
        } else {
            samples
                .iter()
                .filter(|(position, _)| position[axis] < plane.position)
                .count()
                .min(samples.len() - 1)
        };

        samples.select_nth_unstable_by(rank, |(a, i), (b, j)| {
            a[axis].total_cmp(&b[axis]).then(i.cmp(j))
        });
        let (position, index) = samples[rank];
        let pivot = task.start + rank;

        slots[id] = Some((
            PointNode {
                position,
                index,
                axis: axis as u8,
                left: None,
                right: None,
            },
            task.depth,
        ));

        let (below, above) = task.cell.split(axis, position[axis]);
        if pivot + 1 < task.end {
            stack.push(Task {
                start: pivot + 1,
                end: task.end,
                cell: above,
                depth: task.depth + 1,
                link: Link::Right(id as NodeID),
            });
        }
        if task.start < pivot {
            stack.push(Task {
                start: task.start,
                end: pivot,
                cell: below,
                depth: task.depth + 1,
                link: Link::Left(id as NodeID),
            });
        }
    }

    slots.into_iter().flatten().collect()
}

/// Proposes the plane of a node. Point nodes always split, so a declined surface area split
/// falls back to the balanced rule.
/// Chooses the plane of a node, also returning whether the node should take the median sample.
fn choose_plane<const D: usize, S: Float>(
    cell: &BoundingBox<[S; D]>,
    samples: &[([S; D], u32)],
    config: &BuildConfig,
) -> (SplitPlane<S>, bool) {
    let bounds: Vec<_> = samples
        .iter()
        .map(|(position, _)| BoundingBox::point(*position))
        .collect();

    if config.heuristic != SplitHeuristic::Balanced {
        if let Some(plane) = config.heuristic.choose_split(cell, &bounds, &config.cost) {
            return (plane, false);
        }
    }

    let plane = SplitHeuristic::Balanced
        .choose_split(cell, &bounds, &config.cost)
        .unwrap_or_else(|| {
            let axis = cell.major_axis();
            SplitPlane {
                axis,
                position: cell.min[axis].midpoint(cell.max[axis]),
            }
        });

    (plane, true)
}

#[cfg(test)]
mod tests {
    use super::*;

    use rand::prelude::*;

    const HEURISTICS: [SplitHeuristic; 4] = [
        SplitHeuristic::Balanced,
        SplitHeuristic::LeftBalanced,
        SplitHeuristic::SlidingMidpoint,
        SplitHeuristic::SurfaceArea,
    ];

    fn random_samples<const D: usize>(rng: &mut StdRng, count: usize) -> Vec<([f64; D], usize)> {
        (0..count)
            .map(|i| ([(); D].map(|_| rng.gen_range(-10.0..10.0)), i))
            .collect()
    }

    fn brute_force<const D: usize>(
        samples: &[([f64; D], usize)],
        query: [f64; D],
        k: usize,
    ) -> Vec<(f64, usize)> {
        let mut all: Vec<_> = samples
            .iter()
            .enumerate()
            .map(|(i, (position, _))| (distance_squared(position, &query), i))
            .collect();
        all.sort_by(|a, b| a.0.total_cmp(&b.0).then(a.1.cmp(&b.1)));
        all.truncate(k);
        all
    }

    fn check_against_brute_force<const D: usize>(seed: u64) {
        let mut rng = StdRng::seed_from_u64(seed);
        let samples = random_samples::<D>(&mut rng, 500);

        for heuristic in HEURISTICS {
            let config = BuildConfig::for_points().with_heuristic(heuristic);
            let tree: PointTree<D, f64, usize> = PointTree::build(&samples, &config).unwrap();
            assert_eq!(tree.len(), samples.len());

            for _ in 0..50 {
                let query = [(); D].map(|_| rng.gen_range(-12.0..12.0));

                for k in 1..=10 {
                    let found: Vec<_> = tree
                        .k_nearest(query, k)
                        .iter()
                        .map(|r| (r.distance_squared, r.index))
                        .collect();
                    assert_eq!(found, brute_force(&samples, query, k), "{heuristic:?}");
                }

                let radius = rng.gen_range(0.0..4.0);
                let mut found = tree.radius_search(query, radius);
                found.sort_unstable();
                let expected: Vec<_> = (0..samples.len())
                    .filter(|&i| distance_squared(&samples[i].0, &query) <= radius * radius)
                    .collect();
                assert_eq!(found, expected, "{heuristic:?}");
            }
        }
    }

    #[test]
    fn matches_brute_force_2d() {
        check_against_brute_force::<2>(1);
    }

    #[test]
    fn matches_brute_force_3d() {
        check_against_brute_force::<3>(2);
    }

    #[test]
    fn duplicated_positions() {
        let samples: Vec<_> = (0..40).map(|i| ([(i % 4) as f32, 0.0], i)).collect();

        for heuristic in HEURISTICS {
            let config = BuildConfig::for_points().with_heuristic(heuristic);
            let tree: PointTree<2, f32, i32> = PointTree::build(&samples, &config).unwrap();

            let found: Vec<_> = tree.k_nearest([1.2, 0.0], 12).iter().map(|r| r.index).collect();
            let expected: Vec<_> = (0..40).filter(|i| i % 4 == 1).chain([2, 6]).collect();
            assert_eq!(found, expected, "{heuristic:?}");
        }
    }

    #[test]
    fn balanced_trees_stay_balanced_with_repeated_coordinates() {
        let grid: Vec<_> = (0..4096)
            .map(|i| ([(i % 4) as f32, (i / 4 % 4) as f32], i))
            .collect();
        let identical: Vec<_> = (0..2000).map(|i| ([1.0, 1.0], i)).collect();

        for samples in [grid, identical] {
            let count = samples.len();
            let config = BuildConfig::for_points().with_heuristic(SplitHeuristic::Balanced);
            let tree: PointTree<2, f32, i32> = PointTree::build(&samples, &config).unwrap();

            let ceil_log2 = (usize::BITS - (count - 1).leading_zeros()) as usize;
            assert!(tree.stats().depth <= ceil_log2, "depth {}", tree.stats().depth);

            let expected: Vec<_> = samples
                .iter()
                .filter(|(p, _)| (p[0] - 1.0).powi(2) + (p[1] - 1.0).powi(2) <= 1.0)
                .map(|&(_, i)| i as usize)
                .collect();
            let mut found = tree.radius_search([1.0, 1.0], 1.0);
            found.sort_unstable();
            assert_eq!(found, expected);
        }
    }

    #[test]
    fn left_balanced_trees_use_implicit_layout() {
        let mut rng = StdRng::seed_from_u64(9);

        for count in [1, 2, 3, 6, 7, 8, 100, 127, 128] {
            let samples = random_samples::<3>(&mut rng, count);
            let config = BuildConfig::for_points().with_heuristic(SplitHeuristic::LeftBalanced);
            let tree: PointTree<3, f64, usize> = PointTree::build(&samples, &config).unwrap();

            for (i, node) in tree.nodes().iter().enumerate() {
                let left = (2 * i + 1 < count).then_some(2 * i as NodeID + 1);
                let right = (2 * i + 2 < count).then_some(2 * i as NodeID + 2);
                assert_eq!((node.left, node.right), (left, right), "{count} samples");
            }
            assert_eq!(
                tree.stats().depth,
                (usize::BITS - 1 - count.leading_zeros()) as usize
            );
        }
    }

    #[test]
    fn subtrees_respect_split_planes() {
        let mut rng = StdRng::seed_from_u64(4);
        let samples = random_samples::<2>(&mut rng, 200);

        for heuristic in HEURISTICS {
            let config = BuildConfig::for_points().with_heuristic(heuristic);
            let tree: PointTree<2, f64, usize> = PointTree::build(&samples, &config).unwrap();
            let nodes = tree.nodes();

            for node in nodes {
                let axis = node.axis as usize;
                let mut stack: Vec<_> = node.left.into_iter().map(|id| (id, true)).collect();
                stack.extend(node.right.map(|id| (id, false)));

                while let Some((id, below)) = stack.pop() {
                    let child = &nodes[id as usize];
                    if below {
                        assert!(child.position[axis] <= node.position[axis]);
                    } else {
                        assert!(child.position[axis] >= node.position[axis]);
                    }
                    stack.extend(child.left.into_iter().chain(child.right).map(|id| (id, below)));
                }
            }
        }
    }

    #[test]
    fn non_finite_samples_are_excluded() {
        let samples = [
            ([0.0, 0.0], 0),
            ([f32::NAN, 1.0], 1),
            ([1.0, 1.0], 2),
            ([2.0, f32::INFINITY], 3),
        ];
        let tree: PointTree<2, f32, i32> =
            PointTree::build(&samples, &BuildConfig::for_points()).unwrap();

        assert_eq!(tree.len(), 2);
        assert_eq!(tree.stats().excluded, 2);

        let nearest = tree.k_nearest([5.0, 5.0], 4);
        assert_eq!(nearest.iter().map(|r| r.index).collect::<Vec<_>>(), [2, 0]);
        assert_eq!(tree.value(&nearest[1]), &0);
    }

    #[test]
    fn queries_on_small_trees() {
        let empty: [([f64; 3], ()); 0] = [];
        let tree: PointTree<3, f64, ()> =
            PointTree::build(&empty, &BuildConfig::for_points()).unwrap();
        assert!(tree.is_empty());
        assert!(tree.k_nearest([0.0; 3], 3).is_empty());
        assert!(tree.radius_search([0.0; 3], 10.0).is_empty());

        let samples = [([1.0, 2.0, 3.0], "only")];
        let tree: PointTree<3, f64, &str> =
            PointTree::build(&samples, &BuildConfig::for_points()).unwrap();
        let nearest = tree.k_nearest([1.0, 2.0, 4.0], 5);
        assert_eq!(nearest.len(), 1);
        assert_eq!(nearest[0].distance_squared, 1.0);
        assert_eq!(tree.value(&nearest[0]), &"only");
        assert_eq!(tree.radius_search([1.0, 2.0, 4.0], 1.0), [0]);
        assert!(tree.radius_search([1.0, 2.0, 4.0], 0.5).is_empty());
    }

    #[test]
    fn bounded_searches() {
        let samples: Vec<_> = (0..10).map(|i| ([i as f64, 0.0], i)).collect();
        let tree: PointTree<2, f64, i32> =
            PointTree::build(&samples, &BuildConfig::for_points()).unwrap();

        let found = tree.k_nearest_within([0.0, 0.0], 5, 4.0);
        assert_eq!(found.iter().map(|r| r.index).collect::<Vec<_>>(), [0, 1, 2]);

        let mut results = Vec::new();
        let visited = tree.k_nearest_into([0.0, 0.0], 1, f64::INFINITY, &mut results);
        assert_eq!(results.len(), 1);
        assert!(visited >= 1 && visited < tree.len());

        let visited = tree.radius_search_into([9.0, 0.0], 0.0, &mut Vec::new());
        assert!(visited >= 1 && visited <= tree.len());
    }

    #[test]
    #[should_panic(expected = "at least one")]
    fn zero_neighbors_panics() {
        let tree: PointTree<2, f64, ()> =
            PointTree::build(&[([0.0, 0.0], ())], &BuildConfig::for_points()).unwrap();
        tree.k_nearest([0.0, 0.0], 0);
    }

    #[test]
    #[should_panic(expected = "non-negative")]
    fn negative_radius_panics() {
        let tree: PointTree<2, f64, ()> =
            PointTree::build(&[([0.0, 0.0], ())], &BuildConfig::for_points()).unwrap();
        tree.radius_search([0.0, 0.0], -1.0);
    }

    #[test]
    fn building_twice_gives_the_same_tree() {
        let mut rng = StdRng::seed_from_u64(6);
        let samples = random_samples::<3>(&mut rng, 300);

        for heuristic in HEURISTICS {
            let config = BuildConfig::for_points().with_heuristic(heuristic);
            let first: PointTree<3, f64, usize> = PointTree::build(&samples, &config).unwrap();
            let second: PointTree<3, f64, usize> = PointTree::build(&samples, &config).unwrap();

            assert_eq!(first.nodes(), second.nodes());
            assert_eq!(first.values(), second.values());
        }
    }
}
