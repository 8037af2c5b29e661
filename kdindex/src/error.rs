use thiserror::Error;

/// Errors raised when validating a [`BuildConfig`](crate::BuildConfig).
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    /// Leaves must be allowed to hold at least one reference.
    #[error("Invalid maximum leaf size: {0} (must be >= 1)")]
    InvalidLeafSize(usize),

    /// Explicit depth limits must be in `1..=MAX_DEPTH`.
    #[error("Invalid maximum depth: {0} (must be in 1..={max})", max = crate::config::MAX_DEPTH)]
    InvalidMaxDepth(usize),

    /// Traversal and intersection costs must be finite and positive.
    #[error("Invalid {name} cost: {value} (must be finite and > 0)")]
    InvalidCost {
        /// Name of the cost.
        name: &'static str,
        /// Rejected value.
        value: f64,
    },

    /// The empty space bonus is a fraction.
    #[error("Invalid empty space bonus: {0} (must be in [0, 1))")]
    InvalidEmptySpaceBonus(f64),
}

/// Errors raised when wrapping caller buffers into a [`TriangleMesh`](crate::TriangleMesh).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MeshError {
    /// A triangle references a vertex that does not exist.
    #[error("Triangle {triangle} references vertex {index} but the mesh has {vertex_count} vertices")]
    IndexOutOfRange {
        /// Index of the offending triangle.
        triangle: usize,
        /// Offending vertex index.
        index: u32,
        /// Number of vertices in the mesh.
        vertex_count: usize,
    },
}

/// Errors raised when building a tree.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum BuildError {
    /// The build configuration is invalid.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// References are stored as `u32`.
    #[error("Too many primitives: {0} (at most {max} can be indexed)", max = u32::MAX)]
    TooManyPrimitives(usize),
}

/// Result type for configuration validation.
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

/// Result type for mesh creation.
pub type MeshResult<T> = std::result::Result<T, MeshError>;

/// Result type for tree construction.
pub type BuildResult<T> = std::result::Result<T, BuildError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display() {
        let err = ConfigError::InvalidLeafSize(0);
        assert_eq!(format!("{err}"), "Invalid maximum leaf size: 0 (must be >= 1)");

        let err = BuildError::from(ConfigError::InvalidEmptySpaceBonus(1.5));
        assert!(format!("{err}").contains("1.5"));

        let err = MeshError::IndexOutOfRange {
            triangle: 3,
            index: 12,
            vertex_count: 4,
        };
        assert_eq!(
            format!("{err}"),
            "Triangle 3 references vertex 12 but the mesh has 4 vertices"
        );
    }
}
