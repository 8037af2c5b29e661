#![warn(missing_docs)]
//! # kdindex
//!
//! kdindex is a k-d tree spatial index serving two workloads with one construction engine:
//!
//! - indexing triangle meshes to find the closest intersection of rays ([`SurfaceTree`]),
//! - indexing point samples to find nearest neighbors and samples within a radius
//!   ([`PointTree`]).
//!
//! Trees are immutable once built. They borrow or copy what they index, never mutate it, and can
//! be queried from several threads at once.
//!
//! ## Split heuristics
//!
//! Where a cell is split is decided by a [`SplitHeuristic`], chosen once per tree through the
//! [`BuildConfig`]:
//!
//! - [`Balanced`](SplitHeuristic::Balanced) splits at the median item,
//! - [`LeftBalanced`](SplitHeuristic::LeftBalanced) produces complete trees stored with an
//!   implicit layout,
//! - [`SlidingMidpoint`](SplitHeuristic::SlidingMidpoint) halves the longest side of the cell,
//! - [`SurfaceArea`](SplitHeuristic::SurfaceArea) minimizes the expected cost of ray queries
//!   described by a [`CostModel`].
//!
//! ## Indexing triangles
//!
//! Any type implementing [`Primitives`] can be indexed; [`TriangleMesh`] wraps vertex and index
//! buffers. Triangles straddling a split plane are referenced by both children, with their bounds
//! clipped exactly to each child cell.
//!
//! ```
//! use kdindex::prelude::*;
//!
//! let vertices = [[0.0, 0.0, 0.0], [4.0, 0.0, 0.0], [0.0, 4.0, 0.0], [0.0, 0.0, 4.0]];
//! let indices = [[0, 1, 2], [0, 1, 3], [0, 2, 3], [1, 2, 3]];
//! let mesh = TriangleMesh::new(&vertices, &indices).unwrap();
//!
//! let config = BuildConfig::for_meshes().with_max_leaf_size(1);
//! let tree = SurfaceTree::build(&mesh, &config).unwrap();
//!
//! let hit = tree.intersect(&Ray::new([1.0, 1.0, -1.0], [0.0, 0.0, 1.0])).unwrap();
//! assert_eq!(hit.primitive, 0);
//! assert_eq!(hit.t, 1.0);
//! ```
//!
//! ## Indexing point samples
//!
//! Samples implement the [`Position`] and [`Value`] traits, which can be derived for types with
//! fields named `position` and `value`. Tuples of a position and a value implement both.
//!
//! ```
//! use kdindex::prelude::*;
//! use glam::Vec2;
//!
//! #[derive(Position, Value)]
//! struct Photon {
//!     position: Vec2,
//!     value: f32,
//! }
//!
//! let photons: Vec<_> = (0..100)
//!     .map(|i| Photon {
//!         position: Vec2::new((i % 10) as f32, (i / 10) as f32),
//!         value: i as f32,
//!     })
//!     .collect();
//!
//! let config = BuildConfig::for_points();
//! let tree: PointTree<2, f32, f32> = PointTree::build(&photons, &config).unwrap();
//!
//! let nearest = tree.k_nearest([2.1, 3.0], 3);
//! assert_eq!(nearest[0].index, 32);
//! assert_eq!(tree.value(&nearest[0]), &32.0);
//!
//! let density: f32 = tree
//!     .radius_search([5.0, 5.0], 1.0)
//!     .into_iter()
//!     .map(|i| photons[i].value)
//!     .sum();
//! assert_eq!(density, 55.0 + 45.0 + 54.0 + 56.0 + 65.0);
//! ```
//!
//! ## Logging
//!
//! Construction reports its progress through [`tracing`]: a debug event when a build starts and
//! ends, trace events for split decisions, and a warning when degenerate primitives or samples
//! are left out. No subscriber is installed by the library.
//!
//! ## Features
//!
//! - `parallel`: computes primitive bounds with [rayon](https://github.com/rayon-rs/rayon) and
//!   provides batch queries through [`ParallelRayQuery`] and [`ParallelNearestQuery`].

/// Axis-aligned bounding boxes.
pub mod bbox;
pub mod clip;
pub mod config;
/// Error types.
pub mod error;
pub mod heuristic;
pub mod mesh;
/// Rays and hits.
pub mod ray;
/// Traits describing point samples.
pub mod sample;
/// Scalar traits.
pub mod scalar;
/// Tree data structures and queries.
pub mod tree;

/// Batch queries using [rayon](https://github.com/rayon-rs/rayon).
#[cfg(feature = "parallel")]
pub mod parallel;

pub use bbox::BoundingBox;
pub use config::{BuildConfig, CostModel};
pub use error::{BuildError, ConfigError, MeshError};
pub use heuristic::{SplitHeuristic, SplitPlane};
pub use mesh::{Primitives, TriangleMesh};
pub use ray::{Hit, Ray};
pub use sample::{Position, Value};
pub use scalar::Float;
pub use tree::{BuildStats, PointTree, SearchResult, SurfaceTree};

#[cfg(feature = "parallel")]
pub use parallel::{ParallelNearestQuery, ParallelRayQuery};

/// Most commonly used re-exported types.
pub mod prelude {
    // Common traits and their derive macros.
    pub use crate::{Position, Primitives, Value};
    pub use kdindex_derive::{Position, Value};

    pub use crate::{
        BoundingBox, BuildConfig, CostModel, Hit, PointTree, Ray, SplitHeuristic, SurfaceTree,
        TriangleMesh,
    };
    #[cfg(feature = "parallel")]
    pub use crate::{ParallelNearestQuery, ParallelRayQuery};
}
