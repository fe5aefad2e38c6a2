//! # tk205-grid
//!
//! The interpolation engine behind tk205 performance maps.
//!
//! A performance map is a set of dependent tables tabulated over the
//! cartesian product of ordered grid axes. This crate answers one question:
//! given a target point with one coordinate per axis, what value does each
//! table take there?
//!
//! ## Layout
//!
//! ```text
//! GridAxis              ← strictly ascending, finite coordinates
//!     │
//! RegularGrid           ← ordered axes, row-major strides (last axis fastest)
//!     │
//! RegularGridInterpolator
//!     │  tables: Vec<Vec<f64>>, each len == product of axis lengths
//!     ▼
//! InterpolationEngine   ← evaluate(target) / evaluate_table(index, target)
//! ```
//!
//! Callers that own axes and tables (the kernel's performance-map adapter)
//! only ever talk to the [`InterpolationEngine`] trait.

pub mod axis;
pub mod error;
pub mod interpolator;

pub use axis::{Extrapolation, GridAxis, RegularGrid};
pub use error::GridError;
pub use interpolator::{InterpolationEngine, RegularGridInterpolator};
