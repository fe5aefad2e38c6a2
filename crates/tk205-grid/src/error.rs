//! Error types for grid construction and evaluation.

/// Errors raised by the interpolation engine.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum GridError {
    /// An axis has no coordinates.
    #[error("axis {axis} is empty")]
    EmptyAxis { axis: usize },

    /// An axis coordinate is NaN or infinite.
    #[error("axis {axis} has a non-finite value at position {position}")]
    NonFiniteAxis { axis: usize, position: usize },

    /// Axis coordinates must strictly increase.
    #[error("axis {axis} is not strictly ascending at position {position}")]
    NotAscending { axis: usize, position: usize },

    /// A grid needs at least one axis.
    #[error("grid has no axes")]
    NoAxes,

    /// The product of axis lengths does not fit in a `usize`.
    #[error("grid point count overflows at axis {axis}")]
    TooManyPoints { axis: usize },

    /// A table does not cover every grid point exactly once.
    #[error("table {table} has {actual} values, grid has {expected} points")]
    TableSize {
        table: usize,
        expected: usize,
        actual: usize,
    },

    /// The target point does not have one coordinate per axis.
    #[error("target has {actual} coordinates, grid has {expected} axes")]
    TargetDimension { expected: usize, actual: usize },

    /// A target coordinate is NaN or infinite.
    #[error("target coordinate {axis} is not finite")]
    NonFiniteTarget { axis: usize },

    /// No table exists at the requested index.
    #[error("no table at index {index} (engine holds {count})")]
    NoSuchTable { index: usize, count: usize },
}
