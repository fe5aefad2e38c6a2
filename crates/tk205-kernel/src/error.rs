//! Error types for kernel operations.

use tk205_grid::GridError;

/// Misuse of a [`PerformanceMap`](crate::PerformanceMap).
///
/// Every variant is a precondition violation: the map refuses the call
/// instead of handing the engine data it may not reject on its own.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum PerformanceMapError {
    /// Axes and tables are frozen once the grid is finalized.
    #[error("cannot {operation} after the grid is finalized")]
    AlreadyFinalized { operation: &'static str },

    /// Evaluation requires a finalized grid.
    #[error("performance map is not finalized")]
    NotFinalized,

    /// Adding an axis would invalidate tables already sized to the grid.
    #[error("cannot add grid axis '{axis}' after data tables were added")]
    AxisAfterTable { axis: String },

    /// An axis must have at least one coordinate.
    #[error("grid axis '{axis}' is empty")]
    EmptyAxis { axis: String },

    /// Tables and finalization need at least one axis.
    #[error("no grid axes were added")]
    NoGridAxes,

    /// Finalization needs at least one table.
    #[error("no data tables were added")]
    NoDataTables,

    /// A table does not hold one value per grid point.
    #[error("data table '{table}' has {actual} values, grid has {expected} points")]
    TableLengthMismatch {
        table: String,
        expected: usize,
        actual: usize,
    },

    /// Table names identify lookups and must be unique.
    #[error("data table '{0}' was already added")]
    DuplicateTable(String),

    /// The requested lookup does not exist.
    #[error("unknown data table '{0}'")]
    UnknownTable(String),

    /// A typed section supplied a different number of value lists than
    /// it declares names for.
    #[error("{names} {kind} are declared, {supplied} supplied")]
    NameCount {
        kind: &'static str,
        names: usize,
        supplied: usize,
    },

    /// The target does not have one value per axis.
    #[error("target has {actual} values, map has {expected} grid axes")]
    TargetDimension { expected: usize, actual: usize },

    /// The engine rejected the grid or the evaluation.
    #[error("interpolation engine: {0}")]
    Engine(#[from] GridError),
}
