//! # tk205 Kernel
//!
//! Binding loosely-typed representation documents to typed objects.
//!
//! This crate is **equipment-agnostic**: it does not know which
//! representation specifications exist. It prescribes how a representation
//! is constructed (through an [`RsFactory`]), how its fields are pulled out
//! of a document (through a [`BindingContext`]), and how its performance
//! maps are handed to the interpolation engine (through a
//! [`PerformanceMap`]).
//!
//! ## Architecture
//!
//! ```text
//! DiagnosticSink        ← severity-tagged messages, may escalate
//!     │
//! BindingContext        ← factory + sink + field path, threaded through binding
//!     │
//! Field<T>              ← Present(value) | Absent(default)
//!     │
//! Envelope              ← RS_ID / version / description / RS_instance
//!     │  RsFactory::create(RS_ID)
//! dyn Representation    ← one concrete type per equipment type
//!     │
//! PerformanceMapSection ← grid_variables + lookup_variables
//!     │
//! PerformanceMap        ← axes + tables → InterpolationEngine
//! ```

pub mod binding;
pub mod diagnostics;
pub mod envelope;
pub mod error;
pub mod factory;
pub mod field;
pub mod performance_map;

pub use binding::{Bindable, BindingContext, DiagnosticCounts};
pub use diagnostics::{
    CollectingSink, Diagnostic, DiagnosticSink, Disposition, Severity, TracingSink,
};
pub use envelope::Envelope;
pub use error::PerformanceMapError;
pub use factory::{Constructor, Representation, RsFactory};
pub use field::Field;
pub use performance_map::{
    AxisValue, GridVariables, LookupVariables, PerformanceMap, PerformanceMapSection,
    axis_coordinates,
};
pub use tk205_grid::Extrapolation;
