//! Multilinear interpolation over a regular grid.

use crate::axis::{Extrapolation, RegularGrid};
use crate::error::GridError;

/// The evaluation surface a performance map talks to.
///
/// Implementations own their axes and tables; callers pass a target with one
/// coordinate per axis, in axis order.
pub trait InterpolationEngine: std::fmt::Debug + Send + Sync {
    /// Number of axes (length every target must have).
    fn dimensions(&self) -> usize;

    /// Number of tables the engine evaluates.
    fn table_count(&self) -> usize;

    /// Interpolated value of every table at `target`, in table order.
    fn evaluate(&self, target: &[f64]) -> Result<Vec<f64>, GridError>;

    /// Interpolated value of one table at `target`.
    fn evaluate_table(&self, index: usize, target: &[f64]) -> Result<f64, GridError> {
        let count = self.table_count();
        if index >= count {
            return Err(GridError::NoSuchTable { index, count });
        }
        Ok(self.evaluate(target)?[index])
    }
}

/// Multilinear interpolator over row-major tables.
#[derive(Debug, Clone)]
pub struct RegularGridInterpolator {
    grid: RegularGrid,
    tables: Vec<Vec<f64>>,
    extrapolation: Extrapolation,
}

impl RegularGridInterpolator {
    /// Build an interpolator. Every table must hold one value per grid point.
    pub fn new(
        axes: Vec<Vec<f64>>,
        tables: Vec<Vec<f64>>,
        extrapolation: Extrapolation,
    ) -> Result<Self, GridError> {
        let grid = RegularGrid::new(axes)?;
        let expected = grid.point_count();
        for (table, values) in tables.iter().enumerate() {
            if values.len() != expected {
                return Err(GridError::TableSize {
                    table,
                    expected,
                    actual: values.len(),
                });
            }
        }
        Ok(Self {
            grid,
            tables,
            extrapolation,
        })
    }

    pub fn grid(&self) -> &RegularGrid {
        &self.grid
    }

    pub fn extrapolation(&self) -> Extrapolation {
        self.extrapolation
    }

    /// Corner offsets and weights of the hypercube enclosing `target`.
    fn stencil(&self, target: &[f64]) -> Result<Vec<(usize, f64)>, GridError> {
        let dims = self.grid.dimensions();
        if target.len() != dims {
            return Err(GridError::TargetDimension {
                expected: dims,
                actual: target.len(),
            });
        }
        if let Some(axis) = target.iter().position(|x| !x.is_finite()) {
            return Err(GridError::NonFiniteTarget { axis });
        }

        // Single-point axes always sit at index 0 with full weight; only
        // spanning axes add corners.
        let mut indices = vec![0usize; dims];
        let mut spanning = Vec::new();
        for (axis, (grid_axis, x)) in self.grid.axes().iter().zip(target).enumerate() {
            if grid_axis.len() > 1 {
                let (lower, fraction) = grid_axis.locate(*x, self.extrapolation);
                spanning.push((axis, lower, fraction));
            }
        }

        // Each spanning axis has at least two points and the point count
        // fits in a usize, so the shift cannot overflow.
        let corner_count = 1usize << spanning.len();
        let mut corners = Vec::with_capacity(corner_count);
        for corner in 0..corner_count {
            let mut weight = 1.0;
            for (bit, (axis, lower, fraction)) in spanning.iter().enumerate() {
                let upper = (corner >> bit) & 1 == 1;
                indices[*axis] = lower + usize::from(upper);
                weight *= if upper { *fraction } else { 1.0 - fraction };
            }
            if weight == 0.0 {
                continue;
            }
            corners.push((self.grid.offset(&indices), weight));
        }
        Ok(corners)
    }

    fn weigh(table: &[f64], corners: &[(usize, f64)]) -> f64 {
        corners
            .iter()
            .map(|(offset, weight)| table[*offset] * weight)
            .sum()
    }
}

impl InterpolationEngine for RegularGridInterpolator {
    fn dimensions(&self) -> usize {
        self.grid.dimensions()
    }

    fn table_count(&self) -> usize {
        self.tables.len()
    }

    fn evaluate(&self, target: &[f64]) -> Result<Vec<f64>, GridError> {
        let corners = self.stencil(target)?;
        Ok(self
            .tables
            .iter()
            .map(|table| Self::weigh(table, &corners))
            .collect())
    }

    fn evaluate_table(&self, index: usize, target: &[f64]) -> Result<f64, GridError> {
        let table = self.tables.get(index).ok_or(GridError::NoSuchTable {
            index,
            count: self.tables.len(),
        })?;
        let corners = self.stencil(target)?;
        Ok(Self::weigh(table, &corners))
    }
}
