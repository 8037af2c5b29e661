//! Configuration of tree construction.
//!
//! # Presets
//!
//! - [`BuildConfig::for_meshes()`] (also the [`Default`]): surface area heuristic with small
//!   leaves and exact clipping of straddling triangles.
//! - [`BuildConfig::for_points()`]: sliding midpoint rule, one sample per node.
//!
//! # Example
//!
//! ```
//! use kdindex::{BuildConfig, SplitHeuristic};
//!
//! let config = BuildConfig::for_meshes()
//!     .with_max_leaf_size(8)
//!     .with_max_depth(Some(24))
//!     .with_heuristic(SplitHeuristic::Balanced);
//!
//! assert!(config.validate().is_ok());
//! ```

use crate::{
    error::{ConfigError, ConfigResult},
    heuristic::SplitHeuristic,
};

/// Largest depth a surface tree may be configured with.
pub const MAX_DEPTH: usize = 128;

/// Constants of the surface area heuristic.
///
/// The expected cost of a split is
/// `traversal + intersection * (1 - bonus) * (A_L / A * n_L + A_R / A * n_R)` where the bonus only
/// applies when one side is empty. A split is only made when this is cheaper than intersecting
/// every primitive of the cell, `intersection * n`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CostModel {
    /// Cost of visiting an interior node.
    pub traversal: f64,
    /// Cost of one ray/primitive intersection test.
    pub intersection: f64,
    /// Fraction removed from the cost of splits that cut off empty space.
    pub empty_space_bonus: f64,
}

impl Default for CostModel {
    fn default() -> Self {
        Self {
            traversal: 1.0,
            intersection: 80.0,
            empty_space_bonus: 0.5,
        }
    }
}

impl CostModel {
    /// Expected cost of a split sending `left` references to a child whose area relative to the
    /// cell is `left_area`, and `right` references to the other one.
    #[inline]
    pub fn split_cost(&self, left_area: f64, right_area: f64, left: usize, right: usize) -> f64 {
        let bonus = if left == 0 || right == 0 {
            1.0 - self.empty_space_bonus
        } else {
            1.0
        };

        self.traversal
            + self.intersection * bonus * (left_area * left as f64 + right_area * right as f64)
    }

    /// Cost of intersecting every reference of a leaf.
    #[inline]
    pub fn leaf_cost(&self, count: usize) -> f64 {
        self.intersection * count as f64
    }

    /// Checks that the costs are usable.
    pub fn validate(&self) -> ConfigResult<()> {
        for (name, value) in [
            ("traversal", self.traversal),
            ("intersection", self.intersection),
        ] {
            if !value.is_finite() || value <= 0.0 {
                return Err(ConfigError::InvalidCost { name, value });
            }
        }

        if !(0.0..1.0).contains(&self.empty_space_bonus) {
            return Err(ConfigError::InvalidEmptySpaceBonus(self.empty_space_bonus));
        }

        Ok(())
    }
}

/// Configuration of tree construction.
///
/// Use the presets for common scenarios or customize individual settings.
#[derive(Debug, Clone, PartialEq)]
pub struct BuildConfig {
    /// Strategy choosing split planes.
    pub heuristic: SplitHeuristic,

    /// A surface tree cell holding this many references or fewer becomes a leaf.
    pub max_leaf_size: usize,

    /// Depth at which surface tree cells become leaves regardless of their content.
    ///
    /// `None` picks `round(8 + 1.3 log2(n))` for `n` primitives. Point trees ignore this value:
    /// every node stores exactly one sample.
    pub max_depth: Option<usize>,

    /// Clip straddling triangles to the child cells exactly. When disabled, the bounds of the
    /// reference are intersected with the child cells instead, which is faster to build but
    /// produces larger leaves.
    pub clip_primitives: bool,

    /// Constants of the surface area heuristic.
    pub cost: CostModel,
}

impl Default for BuildConfig {
    fn default() -> Self {
        Self {
            heuristic: SplitHeuristic::SurfaceArea,
            max_leaf_size: 4,
            max_depth: None,
            clip_primitives: true,
            cost: CostModel::default(),
        }
    }
}

impl BuildConfig {
    /// Preset for triangle meshes queried with rays.
    #[must_use]
    pub fn for_meshes() -> Self {
        Self::default()
    }

    /// Preset for point samples queried by proximity.
    #[must_use]
    pub fn for_points() -> Self {
        Self {
            heuristic: SplitHeuristic::SlidingMidpoint,
            max_leaf_size: 1,
            ..Self::default()
        }
    }

    /// Sets the split heuristic.
    #[must_use]
    pub fn with_heuristic(mut self, heuristic: SplitHeuristic) -> Self {
        self.heuristic = heuristic;
        self
    }

    /// Sets the maximum number of references stored in a leaf.
    #[must_use]
    pub fn with_max_leaf_size(mut self, max_leaf_size: usize) -> Self {
        self.max_leaf_size = max_leaf_size;
        self
    }

    /// Sets the maximum depth, `None` for automatic.
    #[must_use]
    pub fn with_max_depth(mut self, max_depth: Option<usize>) -> Self {
        self.max_depth = max_depth;
        self
    }

    /// Enables or disables exact clipping of straddling primitives.
    #[must_use]
    pub fn with_clipping(mut self, clip_primitives: bool) -> Self {
        self.clip_primitives = clip_primitives;
        self
    }

    /// Sets the constants of the surface area heuristic.
    #[must_use]
    pub fn with_cost(mut self, cost: CostModel) -> Self {
        self.cost = cost;
        self
    }

    /// Checks the configuration.
    pub fn validate(&self) -> ConfigResult<()> {
        if self.max_leaf_size == 0 {
            return Err(ConfigError::InvalidLeafSize(self.max_leaf_size));
        }

        if let Some(depth) = self.max_depth {
            if depth == 0 || depth > MAX_DEPTH {
                return Err(ConfigError::InvalidMaxDepth(depth));
            }
        }

        self.cost.validate()
    }

    /// Returns the depth limit for a tree over `count` primitives.
    pub fn depth_limit(&self, count: usize) -> usize {
        self.max_depth.unwrap_or_else(|| {
            let log = (count.max(1) as f64).log2();
            ((8.0 + 1.3 * log).round() as usize).min(MAX_DEPTH)
        })
    }
}
