use rayon::iter::{IntoParallelRefIterator, ParallelIterator};

use crate::{
    mesh::Primitives,
    ray::{Hit, Ray},
    scalar::Float,
    tree::{PointTree, SearchResult, SurfaceTree},
};

/// Trait to answer batches of ray queries in parallel.
///
/// Results are returned in the order of the rays.
pub trait ParallelRayQuery<S> {
    /// Returns the closest hit of every ray.
    ///
    /// Refer to [`SurfaceTree::intersect`] for more information.
    fn par_intersect(&self, rays: &[Ray<S>]) -> Vec<Option<Hit<S>>>;

    /// Returns whether every ray hits anything.
    ///
    /// Refer to [`SurfaceTree::intersects_any`] for more information.
    fn par_intersects_any(&self, rays: &[Ray<S>]) -> Vec<bool>;
}

impl<S: Float, P: Primitives<S>> ParallelRayQuery<S> for SurfaceTree<'_, S, P> {
    #[inline]
    fn par_intersect(&self, rays: &[Ray<S>]) -> Vec<Option<Hit<S>>> {
        rays.par_iter().map(|ray| self.intersect(ray)).collect()
    }

    #[inline]
    fn par_intersects_any(&self, rays: &[Ray<S>]) -> Vec<bool> {
        rays.par_iter().map(|ray| self.intersects_any(ray)).collect()
    }
}

/// Trait to answer batches of proximity queries in parallel.
///
/// Results are returned in the order of the queries.
pub trait ParallelNearestQuery<const D: usize, S> {
    /// Returns the `k` samples closest to every query.
    ///
    /// Refer to [`PointTree::k_nearest`] for more information.
    ///
    /// # Panics
    ///
    /// Panics if `k` is zero.
    fn par_k_nearest(&self, queries: &[[S; D]], k: usize) -> Vec<Vec<SearchResult<S>>>;

    /// Returns the samples within `radius` of every query.
    ///
    /// Refer to [`PointTree::radius_search`] for more information.
    ///
    /// # Panics
    ///
    /// Panics if `radius` is negative or NaN.
    fn par_radius_search(&self, queries: &[[S; D]], radius: S) -> Vec<Vec<usize>>;
}

impl<const D: usize, S: Float, V: Sync> ParallelNearestQuery<D, S> for PointTree<D, S, V> {
    #[inline]
    fn par_k_nearest(&self, queries: &[[S; D]], k: usize) -> Vec<Vec<SearchResult<S>>> {
        assert!(k > 0, "the number of neighbors must be at least one");

        queries
            .par_iter()
            .map(|&query| self.k_nearest(query, k))
            .collect()
    }

    #[inline]
    fn par_radius_search(&self, queries: &[[S; D]], radius: S) -> Vec<Vec<usize>> {
        assert!(radius >= S::ZERO, "the radius must be non-negative");

        queries
            .par_iter()
            .map(|&query| self.radius_search(query, radius))
            .collect()
    }
}
