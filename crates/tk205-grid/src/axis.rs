//! Grid axes and the regular grid they span.

use crate::error::GridError;
use serde::{Deserialize, Serialize};

/// Behavior for target coordinates outside an axis' range.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Extrapolation {
    /// Hold the boundary value.
    #[default]
    Constant,
    /// Continue the slope of the outermost segment.
    Linear,
}

/// One independent, strictly ascending dimension of a grid.
#[derive(Debug, Clone, PartialEq)]
pub struct GridAxis {
    values: Vec<f64>,
}

impl GridAxis {
    /// Validate and wrap axis coordinates. `index` only labels errors.
    pub fn new(index: usize, values: Vec<f64>) -> Result<Self, GridError> {
        if values.is_empty() {
            return Err(GridError::EmptyAxis { axis: index });
        }
        if let Some(position) = values.iter().position(|v| !v.is_finite()) {
            return Err(GridError::NonFiniteAxis {
                axis: index,
                position,
            });
        }
        if let Some(position) = values.windows(2).position(|pair| pair[1] <= pair[0]) {
            return Err(GridError::NotAscending {
                axis: index,
                position: position + 1,
            });
        }
        Ok(Self { values })
    }

    pub fn values(&self) -> &[f64] {
        &self.values
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Lower bracketing index and the fractional position of `x` inside the
    /// bracket `[values[i], values[i + 1]]`.
    ///
    /// A single-point axis always yields `(0, 0.0)`. Outside the range the
    /// fraction is clamped to `0.0`/`1.0` for constant extrapolation and left
    /// unclamped for linear extrapolation.
    pub fn locate(&self, x: f64, extrapolation: Extrapolation) -> (usize, f64) {
        let n = self.values.len();
        if n == 1 {
            return (0, 0.0);
        }

        let lower = match self.values.partition_point(|v| *v <= x) {
            0 => 0,
            p if p >= n => n - 2,
            p => p - 1,
        };
        let x0 = self.values[lower];
        let x1 = self.values[lower + 1];
        let fraction = (x - x0) / (x1 - x0);

        match extrapolation {
            Extrapolation::Constant => (lower, fraction.clamp(0.0, 1.0)),
            Extrapolation::Linear => (lower, fraction),
        }
    }
}

/// An ordered set of axes with row-major strides.
///
/// The last axis varies fastest in a flattened table, matching the order
/// lookup tables are written in representation documents.
#[derive(Debug, Clone, PartialEq)]
pub struct RegularGrid {
    axes: Vec<GridAxis>,
    strides: Vec<usize>,
}

impl RegularGrid {
    pub fn new(axes: Vec<Vec<f64>>) -> Result<Self, GridError> {
        if axes.is_empty() {
            return Err(GridError::NoAxes);
        }
        let axes = axes
            .into_iter()
            .enumerate()
            .map(|(index, values)| GridAxis::new(index, values))
            .collect::<Result<Vec<_>, _>>()?;

        let mut strides = vec![1usize; axes.len()];
        let mut points = 1usize;
        for i in (0..axes.len()).rev() {
            strides[i] = points;
            points = points
                .checked_mul(axes[i].len())
                .ok_or(GridError::TooManyPoints { axis: i })?;
        }

        Ok(Self { axes, strides })
    }

    pub fn axes(&self) -> &[GridAxis] {
        &self.axes
    }

    pub fn dimensions(&self) -> usize {
        self.axes.len()
    }

    /// Number of grid points (product of all axis lengths). Construction
    /// guarantees the product fits in a `usize`.
    pub fn point_count(&self) -> usize {
        self.axes.iter().map(GridAxis::len).product()
    }

    /// Flat row-major offset of a multi-index.
    pub fn offset(&self, indices: &[usize]) -> usize {
        indices
            .iter()
            .zip(&self.strides)
            .map(|(index, stride)| index * stride)
            .sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn axis_rejects_descending_values() {
        let err = GridAxis::new(2, vec![1.0, 3.0, 2.0]).unwrap_err();
        assert_eq!(
            err,
            GridError::NotAscending {
                axis: 2,
                position: 2
            }
        );
    }

    #[test]
    fn axis_rejects_empty_and_non_finite() {
        assert_eq!(
            GridAxis::new(0, vec![]).unwrap_err(),
            GridError::EmptyAxis { axis: 0 }
        );
        assert_eq!(
            GridAxis::new(1, vec![0.0, f64::NAN]).unwrap_err(),
            GridError::NonFiniteAxis {
                axis: 1,
                position: 1
            }
        );
    }

    #[test]
    fn locate_brackets_interior_points() {
        let axis = GridAxis::new(0, vec![0.0, 10.0, 20.0]).unwrap();
        let (lower, fraction) = axis.locate(15.0, Extrapolation::Constant);
        assert_eq!(lower, 1);
        assert!((fraction - 0.5).abs() < 1e-12);

        let (lower, fraction) = axis.locate(20.0, Extrapolation::Constant);
        assert_eq!(lower, 1);
        assert!((fraction - 1.0).abs() < 1e-12);
    }

    #[test]
    fn locate_clamps_or_extends_outside_the_range() {
        let axis = GridAxis::new(0, vec![1.0, 2.0, 3.0]).unwrap();
        assert_eq!(axis.locate(0.5, Extrapolation::Constant), (0, 0.0));
        let (lower, fraction) = axis.locate(0.5, Extrapolation::Linear);
        assert_eq!(lower, 0);
        assert!((fraction + 0.5).abs() < 1e-12);
        assert_eq!(axis.locate(9.0, Extrapolation::Constant), (1, 1.0));
    }

    #[test]
    fn strides_are_row_major_with_last_axis_fastest() {
        let grid = RegularGrid::new(vec![vec![0.0, 1.0], vec![0.0, 1.0, 2.0]]).unwrap();
        assert_eq!(grid.point_count(), 6);
        assert_eq!(grid.offset(&[0, 2]), 2);
        assert_eq!(grid.offset(&[1, 0]), 3);
    }

    #[test]
    fn point_count_overflow_is_rejected() {
        let err = RegularGrid::new(vec![vec![0.0, 1.0]; 64]).unwrap_err();
        assert!(matches!(err, GridError::TooManyPoints { .. }), "{err:?}");

        let grid = RegularGrid::new(vec![vec![0.0]; 64]).unwrap();
        assert_eq!(grid.point_count(), 1);
    }
}
