use smallvec::SmallVec;
use tracing::{debug, trace, warn};

use crate::{
    bbox::BoundingBox,
    config::BuildConfig,
    error::{BuildError, BuildResult},
    heuristic::SplitPlane,
    mesh::Primitives,
    ray::{Hit, Ray},
    scalar::Float,
    tree::{BuildStats, Leaf, Node, NodeID, PrimitiveRef, Split, Tree},
};

/// Node of a [`SurfaceTree`].
pub type SurfaceNode<S> = Node<Split<S>, Leaf>;

/// K-d tree over a set of primitives, answering ray queries.
///
/// Leaves store references to the primitives overlapping their cell; a primitive straddling a
/// split plane is referenced by both sides. The tree borrows the primitive set it was built from.
///
/// # Example
///
/// ```
/// use kdindex::{BuildConfig, Ray, SurfaceTree, TriangleMesh};
///
/// let vertices = [[0.0, 0.0, 0.0], [1.0, 0.0, 0.0], [0.0, 1.0, 0.0], [0.0, 0.0, 2.0]];
/// let indices = [[0, 1, 2], [0, 1, 3]];
/// let mesh = TriangleMesh::new(&vertices, &indices).unwrap();
///
/// let tree = SurfaceTree::build(&mesh, &BuildConfig::for_meshes()).unwrap();
///
/// let hit = tree.intersect(&Ray::new([0.25, 0.25, 1.0], [0.0, 0.0, -1.0])).unwrap();
/// assert_eq!((hit.t, hit.primitive), (1.0, 0));
/// assert!(!tree.intersects_any(&Ray::new([0.25, 0.25, 1.0], [0.0, 0.0, 1.0])));
/// ```
#[derive(Debug)]
pub struct SurfaceTree<'p, S, P> {
    primitives: &'p P,
    tree: Tree<SurfaceNode<S>, PrimitiveRef<S>>,
    bounds: BoundingBox<[S; 3]>,
    stats: BuildStats,
}

impl<'p, S: Float, P: Primitives<S>> SurfaceTree<'p, S, P> {
    /// Builds a [`SurfaceTree`] over the given primitives.
    ///
    /// Degenerate primitives are left out and counted in [`BuildStats::excluded`]. An empty set
    /// produces a tree made of a single empty leaf.
    pub fn build(primitives: &'p P, config: &BuildConfig) -> BuildResult<Self> {
        config.validate()?;

        let count = primitives.len();
        if u32::try_from(count).is_err() {
            return Err(BuildError::TooManyPrimitives(count));
        }

        debug!(
            primitives = count,
            heuristic = ?config.heuristic,
            max_leaf_size = config.max_leaf_size,
            "Building surface tree"
        );

        let references: Vec<_> = primitive_bounds(primitives)
            .into_iter()
            .enumerate()
            .filter_map(|(index, bounds)| {
                bounds.map(|bounds| PrimitiveRef {
                    index: index as u32,
                    bounds,
                })
            })
            .collect();

        let excluded = count - references.len();
        if excluded > 0 {
            warn!(excluded, primitives = count, "Excluded degenerate primitives");
        }

        let bounds = references
            .iter()
            .fold(BoundingBox::empty(), |b, r| b.union(&r.bounds));

        let mut builder = Builder {
            primitives,
            config,
            depth_limit: config.depth_limit(references.len()),
            tree: Tree::with_capacity(references.len()),
            stats: BuildStats {
                primitives: count,
                excluded,
                ..BuildStats::default()
            },
        };
        builder.build(bounds, references)?;

        let Builder { tree, stats, .. } = builder;
        debug!(
            nodes = stats.nodes,
            leaves = stats.leaves,
            empty_leaves = stats.empty_leaves,
            references = stats.references,
            depth = stats.depth,
            "Built surface tree"
        );

        Ok(Self {
            primitives,
            tree,
            bounds,
            stats,
        })
    }

    /// Returns the indexed primitives.
    #[inline]
    pub fn primitives(&self) -> &'p P {
        self.primitives
    }

    /// Returns the bounds of every indexed primitive. Invalid when nothing is indexed.
    #[inline]
    pub fn bounds(&self) -> &BoundingBox<[S; 3]> {
        &self.bounds
    }

    /// Returns the nodes of the tree, the root first.
    #[inline]
    pub fn nodes(&self) -> &[SurfaceNode<S>] {
        &self.tree.nodes
    }

    /// Returns the primitive references stored by the leaves.
    #[inline]
    pub fn references(&self) -> &[PrimitiveRef<S>] {
        &self.tree.data
    }

    /// Returns the statistics gathered during construction.
    #[inline]
    pub fn stats(&self) -> &BuildStats {
        &self.stats
    }

    /// Calls `f` with the cell and the references of every leaf, in depth-first order.
    pub fn for_each_leaf<F>(&self, mut f: F)
    where
        F: FnMut(&BoundingBox<[S; 3]>, &[PrimitiveRef<S>]),
    {
        let mut stack = vec![(0, self.bounds)];
        while let Some((id, cell)) = stack.pop() {
            match self.tree.nodes[id as usize] {
                Node::Internal(split) => {
                    let (below, above) = cell.split(split.axis as usize, split.position);
                    stack.push((split.right, above));
                    stack.push((id + 1, below));
                }
                Node::External(leaf) => f(&cell, &self.tree.data[leaf.range()]),
            }
        }
    }

    /// Returns the closest intersection of the ray with the indexed primitives, within the range
    /// of the ray.
    pub fn intersect(&self, ray: &Ray<S>) -> Option<Hit<S>> {
        let mut hit = None;
        self.traverse(ray, |references, t_max| {
            for reference in references {
                let primitive = reference.index as usize;
                if let Some((t, barycentric)) = self.primitives.intersect(primitive, ray, *t_max) {
                    *t_max = t;
                    hit = Some(Hit {
                        t,
                        primitive,
                        barycentric,
                    });
                }
            }
            false
        });

        hit
    }

    /// Returns `true` if the ray hits any indexed primitive within its range.
    pub fn intersects_any(&self, ray: &Ray<S>) -> bool {
        let mut found = false;
        self.traverse(ray, |references, t_max| {
            found = references
                .iter()
                .any(|r| self.primitives.intersect(r.index as usize, ray, *t_max).is_some());
            found
        });

        found
    }

    /// Visits the leaves pierced by the ray from front to back.
    ///
    /// `leaf` receives the references of a leaf and the distance of the closest hit so far,
    /// which it lowers when it finds a closer one. Returning `true` stops the traversal.
    fn traverse<F>(&self, ray: &Ray<S>, mut leaf: F)
    where
        F: FnMut(&[PrimitiveRef<S>], &mut S) -> bool,
    {
        let Some((mut t_min, mut t_max)) = self.bounds.intersect_ray(ray) else {
            return;
        };

        let mut closest = ray.t_max;
        let mut stack: SmallVec<[(NodeID, S, S); 32]> =
            SmallVec::with_capacity(self.stats.depth + 1);
        let mut id = 0;

        loop {
            // Entries are not sorted by distance once a ray lying in a split plane pushed one.
            if t_min <= closest {
                match self.tree.nodes[id as usize] {
                    Node::Internal(split) => {
                        let axis = split.axis as usize;
                        let (origin, direction) = (ray.origin[axis], ray.direction[axis]);

                        let below_first = origin < split.position
                            || (origin == split.position && direction <= S::ZERO);
                        let (near, far) = if below_first {
                            (id + 1, split.right)
                        } else {
                            (split.right, id + 1)
                        };

                        if direction == S::ZERO {
                            // Primitives touching the plane may sit in either child.
                            if origin == split.position {
                                stack.push((far, t_min, t_max));
                            }
                            id = near;
                            continue;
                        }

                        let t_plane = (split.position - origin) / direction;
                        if t_plane > t_max || t_plane <= S::ZERO {
                            id = near;
                        } else if t_plane < t_min {
                            id = far;
                        } else {
                            stack.push((far, t_plane, t_max));
                            id = near;
                            t_max = t_plane;
                        }
                        continue;
                    }
                    Node::External(node) => {
                        if leaf(&self.tree.data[node.range()], &mut closest) {
                            break;
                        }
                    }
                }
            }

            match stack.pop() {
                Some((next, near, far)) => {
                    id = next;
                    t_min = near;
                    t_max = far;
                }
                None => break,
            }
        }
    }
}

#[cfg(feature = "parallel")]
fn primitive_bounds<S: Float, P: Primitives<S>>(
    primitives: &P,
) -> Vec<Option<BoundingBox<[S; 3]>>> {
    use rayon::prelude::*;

    (0..primitives.len())
        .into_par_iter()
        .map(|index| primitives.bounds(index))
        .collect()
}

#[cfg(not(feature = "parallel"))]
fn primitive_bounds<S: Float, P: Primitives<S>>(
    primitives: &P,
) -> Vec<Option<BoundingBox<[S; 3]>>> {
    (0..primitives.len())
        .map(|index| primitives.bounds(index))
        .collect()
}

/// Cell waiting to be turned into a node.
struct Task<S> {
    cell: BoundingBox<[S; 3]>,
    references: Vec<PrimitiveRef<S>>,
    depth: usize,
    /// Internal node whose right link must point to this task's node.
    parent: Option<NodeID>,
}

struct Builder<'a, S, P> {
    primitives: &'a P,
    config: &'a BuildConfig,
    depth_limit: usize,
    tree: Tree<SurfaceNode<S>, PrimitiveRef<S>>,
    stats: BuildStats,
}

impl<S: Float, P: Primitives<S>> Builder<'_, S, P> {
    fn build(
        &mut self,
        cell: BoundingBox<[S; 3]>,
        references: Vec<PrimitiveRef<S>>,
    ) -> BuildResult<()> {
        let mut stack = vec![Task {
            cell,
            references,
            depth: 0,
            parent: None,
        }];

        while let Some(task) = stack.pop() {
            let id = NodeID::try_from(self.tree.nodes.len())
                .map_err(|_| BuildError::TooManyPrimitives(self.stats.primitives))?;

            if let Some(parent) = task.parent {
                if let Node::Internal(split) = &mut self.tree.nodes[parent as usize] {
                    split.right = id;
                }
            }
            self.stats.nodes += 1;
            self.stats.depth = self.stats.depth.max(task.depth);

            let Some((plane, left, right)) = self.split(&task) else {
                self.push_leaf(task.references)?;
                continue;
            };

            self.tree.nodes.push(Node::Internal(Split {
                axis: plane.axis as u8,
                position: plane.position,
                right: 0,
            }));

            let (below, above) = task.cell.split(plane.axis, plane.position);
            stack.push(Task {
                cell: above,
                references: right,
                depth: task.depth + 1,
                parent: Some(id),
            });
            stack.push(Task {
                cell: below,
                references: left,
                depth: task.depth + 1,
                parent: None,
            });
        }

        self.stats.references = self.tree.data.len();
        Ok(())
    }

    /// Chooses a plane for the task and partitions its references, or returns `None` if the
    /// task must become a leaf.
    #[allow(clippy::type_complexity)]
    fn split(
        &self,
        task: &Task<S>,
    ) -> Option<(SplitPlane<S>, Vec<PrimitiveRef<S>>, Vec<PrimitiveRef<S>>)> {
        let count = task.references.len();
        if count <= self.config.max_leaf_size || task.depth >= self.depth_limit {
            return None;
        }

        let bounds: Vec<_> = task.references.iter().map(|r| r.bounds).collect();
        let Some(plane) = self
            .config
            .heuristic
            .choose_split(&task.cell, &bounds, &self.config.cost)
        else {
            trace!(references = count, depth = task.depth, "No split beats a leaf");
            return None;
        };

        let (left, right) = self.partition(task, plane);
        if left.len() < count || right.len() < count {
            return Some((plane, left, right));
        }

        let plane = forced_median(&task.cell, &bounds);
        trace!(
            references = count,
            depth = task.depth,
            axis = plane.axis,
            "Split made no progress, forcing a median split"
        );

        let (left, right) = self.partition(task, plane);
        (left.len() < count || right.len() < count).then_some((plane, left, right))
    }

    fn partition(
        &self,
        task: &Task<S>,
        plane: SplitPlane<S>,
    ) -> (Vec<PrimitiveRef<S>>, Vec<PrimitiveRef<S>>) {
        let SplitPlane { axis, position } = plane;
        let (below, above) = task.cell.split(axis, position);

        let mut left = Vec::with_capacity(task.references.len());
        let mut right = Vec::with_capacity(task.references.len());

        for reference in &task.references {
            let (min, max) = (reference.bounds.min[axis], reference.bounds.max[axis]);
            let planar = min == position && max == position;
            let goes_left = min < position || planar;
            let goes_right = max > position;

            if goes_left && goes_right {
                left.extend(self.clip(reference, &below));
                right.extend(self.clip(reference, &above));
            } else if goes_left {
                left.push(*reference);
            } else {
                right.push(*reference);
            }
        }

        (left, right)
    }

    /// Restricts a straddling reference to a child cell, dropping it if nothing is left.
    fn clip(
        &self,
        reference: &PrimitiveRef<S>,
        cell: &BoundingBox<[S; 3]>,
    ) -> Option<PrimitiveRef<S>> {
        let bounds = if self.config.clip_primitives {
            self.primitives.clipped_bounds(reference.index as usize, cell)
        } else {
            reference.bounds.intersection(cell)
        };

        bounds.is_valid().then_some(PrimitiveRef {
            index: reference.index,
            bounds,
        })
    }

    fn push_leaf(&mut self, references: Vec<PrimitiveRef<S>>) -> BuildResult<()> {
        let too_many = || BuildError::TooManyPrimitives(self.stats.primitives);
        let start = u32::try_from(self.tree.data.len()).map_err(|_| too_many())?;
        let len = u32::try_from(references.len()).map_err(|_| too_many())?;
        start.checked_add(len).ok_or_else(too_many)?;

        self.stats.leaves += 1;
        if references.is_empty() {
            self.stats.empty_leaves += 1;
        }

        self.tree.nodes.push(Node::External(Leaf { start, len }));
        self.tree.data.extend(references);
        Ok(())
    }
}

/// Plane through the median centroid along the longest axis of the cell.
fn forced_median<S: Float>(
    cell: &BoundingBox<[S; 3]>,
    bounds: &[BoundingBox<[S; 3]>],
) -> SplitPlane<S> {
    let axis = cell.major_axis();
    let mut centroids: Vec<S> = bounds
        .iter()
        .map(|b| b.min[axis].midpoint(b.max[axis]))
        .collect();

    let median = centroids.len() / 2;
    let (_, &mut position, _) = centroids.select_nth_unstable_by(median, S::total_cmp);

    SplitPlane { axis, position }
}
