/// Point trees and nearest neighbor queries.
pub mod point;
/// Surface trees and ray queries.
pub mod surface;

pub use point::*;
pub use surface::*;

use crate::bbox::BoundingBox;

/// Index of a [`Node`] in a [`Tree`].
pub type NodeID = u32;

/// Generic tree data structure.
#[derive(Clone, Debug)]
pub struct Tree<Node, Data> {
    /// Vector of `Node` objects that define the structure of the tree. The root is the first
    /// node.
    pub nodes: Vec<Node>,

    /// Vector of generic `Data` objects associated with the nodes: the primitive references
    /// addressed by the leaves of a [`SurfaceTree`], or the values of the samples of a
    /// [`PointTree`], where the `i`-th value belongs to the `i`-th node.
    pub data: Vec<Data>,
}

impl<Node, Data> Tree<Node, Data> {
    /// Creates a new empty [`Tree`] with at least the specified capacity in the `nodes` and
    /// `data` vectors.
    #[inline]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            nodes: Vec::with_capacity(capacity),
            data: Vec::with_capacity(capacity),
        }
    }
}

/// Node that can either be internal or external, each carrying its own data.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Node<I, E> {
    /// Node with child nodes.
    Internal(I),
    /// Node without children.
    External(E),
}

/// Split plane of an internal node. The left child immediately follows its parent in the node
/// vector.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Split<S> {
    /// Axis the plane is orthogonal to.
    pub axis: u8,
    /// Coordinate of the plane along the axis.
    pub position: S,
    /// Index of the child above the plane.
    pub right: NodeID,
}

/// Range of references stored by a leaf.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Leaf {
    /// Index of the first reference.
    pub start: u32,
    /// Number of references.
    pub len: u32,
}

impl Leaf {
    /// Returns the range of the leaf in the reference vector.
    #[inline]
    pub fn range(&self) -> std::ops::Range<usize> {
        self.start as usize..(self.start + self.len) as usize
    }
}

/// Reference to a primitive from a leaf, with the bounds of the part of the primitive inside the
/// leaf.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PrimitiveRef<S> {
    /// Index of the primitive in the indexed set.
    pub index: u32,
    /// Bounds of the primitive restricted to the cell holding the reference.
    pub bounds: BoundingBox<[S; 3]>,
}

/// Counts gathered while building a tree.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct BuildStats {
    /// Number of primitives or samples given to the builder.
    pub primitives: usize,
    /// Number of primitives or samples left out because their geometry is invalid.
    pub excluded: usize,
    /// Number of nodes.
    pub nodes: usize,
    /// Number of leaves.
    pub leaves: usize,
    /// Number of leaves without references.
    pub empty_leaves: usize,
    /// Number of stored references, counting every duplicate of a straddling primitive.
    pub references: usize,
    /// Depth of the deepest node, the root having depth zero.
    pub depth: usize,
}
