//! The performance-map adapter.
//!
//! A [`PerformanceMap`] collects grid axes and row-major data tables, then
//! hands them to the interpolation engine exactly once:
//!
//! ```text
//! Building ── add_grid_axis* ── add_data_table* ── finalize_grid ──▶ Ready
//!                                                                     │
//!                                      calculate_performance(target) ◀┘
//! ```
//!
//! Every out-of-order call is refused with a [`PerformanceMapError`].
//!
//! Typed maps pair a [`GridVariables`] section with a [`LookupVariables`]
//! section through [`PerformanceMapSection`], which binds both from the
//! document and builds the map in schema order.

use crate::binding::{Bindable, BindingContext};
use crate::diagnostics::Severity;
use crate::error::PerformanceMapError;
use crate::field::Field;
use serde_json::Value;
use std::fmt;
use tk205_grid::{Extrapolation, InterpolationEngine, RegularGridInterpolator};

/// Numeric types accepted as grid coordinates. Integers are promoted.
pub trait AxisValue: Copy {
    fn to_f64(self) -> f64;
}

macro_rules! axis_value {
    ($($ty:ty),*) => {
        $(
            impl AxisValue for $ty {
                fn to_f64(self) -> f64 {
                    self as f64
                }
            }
        )*
    };
}

axis_value!(f64, f32, i8, i16, i32, i64, u8, u16, u32, u64);

#[derive(Debug, Default)]
pub struct PerformanceMap {
    axes: Vec<(String, Vec<f64>)>,
    tables: Vec<(String, Vec<f64>)>,
    extrapolation: Extrapolation,
    engine: Option<Box<dyn InterpolationEngine>>,
}

impl PerformanceMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_extrapolation(mut self, extrapolation: Extrapolation) -> Self {
        self.extrapolation = extrapolation;
        self
    }

    /// Append an unnamed axis (`axis_<n>`).
    pub fn add_grid_axis<V: AxisValue>(&mut self, values: &[V]) -> Result<(), PerformanceMapError> {
        let name = format!("axis_{}", self.axes.len());
        self.add_named_grid_axis(name, values)
    }

    /// Append an axis. Axes are ordered; targets follow the same order.
    pub fn add_named_grid_axis<V: AxisValue>(
        &mut self,
        name: impl Into<String>,
        values: &[V],
    ) -> Result<(), PerformanceMapError> {
        self.ensure_building("add a grid axis")?;
        let name = name.into();
        if !self.tables.is_empty() {
            return Err(PerformanceMapError::AxisAfterTable { axis: name });
        }
        if values.is_empty() {
            return Err(PerformanceMapError::EmptyAxis { axis: name });
        }
        tracing::debug!(axis = %name, points = values.len(), "added grid axis");
        self.axes
            .push((name, values.iter().map(|v| v.to_f64()).collect()));
        Ok(())
    }

    /// Append a lookup table holding one value per grid point.
    pub fn add_data_table(
        &mut self,
        name: impl Into<String>,
        values: &[f64],
    ) -> Result<(), PerformanceMapError> {
        self.ensure_building("add a data table")?;
        let name = name.into();
        if self.axes.is_empty() {
            return Err(PerformanceMapError::NoGridAxes);
        }
        if self.tables.iter().any(|(existing, _)| *existing == name) {
            return Err(PerformanceMapError::DuplicateTable(name));
        }
        let expected = self.point_count();
        if values.len() != expected {
            return Err(PerformanceMapError::TableLengthMismatch {
                table: name,
                expected,
                actual: values.len(),
            });
        }
        tracing::debug!(table = %name, "added data table");
        self.tables.push((name, values.to_vec()));
        Ok(())
    }

    /// Build the engine. Succeeds at most once.
    pub fn finalize_grid(&mut self) -> Result<(), PerformanceMapError> {
        self.ensure_building("finalize the grid")?;
        if self.axes.is_empty() {
            return Err(PerformanceMapError::NoGridAxes);
        }
        if self.tables.is_empty() {
            return Err(PerformanceMapError::NoDataTables);
        }
        let engine = RegularGridInterpolator::new(
            self.axes.iter().map(|(_, values)| values.clone()).collect(),
            self.tables.iter().map(|(_, values)| values.clone()).collect(),
            self.extrapolation,
        )?;
        self.engine = Some(Box::new(engine));
        Ok(())
    }

    /// Every table's value at `target`, in insertion order.
    pub fn calculate_performance(&self, target: &[f64]) -> Result<Vec<f64>, PerformanceMapError> {
        let engine = self.ready_engine(target)?;
        Ok(engine.evaluate(target)?)
    }

    /// One named table's value at `target`.
    pub fn calculate_table(&self, name: &str, target: &[f64]) -> Result<f64, PerformanceMapError> {
        let engine = self.ready_engine(target)?;
        let index = self
            .tables
            .iter()
            .position(|(table, _)| table == name)
            .ok_or_else(|| PerformanceMapError::UnknownTable(name.to_string()))?;
        Ok(engine.evaluate_table(index, target)?)
    }

    /// `calculate_performance` paired with table names.
    pub fn calculate_named(&self, target: &[f64]) -> Result<Vec<(&str, f64)>, PerformanceMapError> {
        let values = self.calculate_performance(target)?;
        Ok(self.table_names().zip(values).collect())
    }

    pub fn is_ready(&self) -> bool {
        self.engine.is_some()
    }

    pub fn extrapolation(&self) -> Extrapolation {
        self.extrapolation
    }

    pub fn dimensions(&self) -> usize {
        self.axes.len()
    }

    pub fn axis(&self, index: usize) -> Option<&[f64]> {
        self.axes.get(index).map(|(_, values)| values.as_slice())
    }

    pub fn axis_names(&self) -> impl Iterator<Item = &str> {
        self.axes.iter().map(|(name, _)| name.as_str())
    }

    pub fn table_names(&self) -> impl Iterator<Item = &str> {
        self.tables.iter().map(|(name, _)| name.as_str())
    }

    /// Product of axis lengths (zero before the first axis), saturating at
    /// `usize::MAX`.
    pub fn point_count(&self) -> usize {
        if self.axes.is_empty() {
            return 0;
        }
        self.axes
            .iter()
            .fold(1usize, |points, (_, values)| points.saturating_mul(values.len()))
    }

    fn ensure_building(&self, operation: &'static str) -> Result<(), PerformanceMapError> {
        if self.is_ready() {
            return Err(PerformanceMapError::AlreadyFinalized { operation });
        }
        Ok(())
    }

    fn ready_engine(&self, target: &[f64]) -> Result<&dyn InterpolationEngine, PerformanceMapError> {
        let engine = self
            .engine
            .as_deref()
            .ok_or(PerformanceMapError::NotFinalized)?;
        if target.len() != self.axes.len() {
            return Err(PerformanceMapError::TargetDimension {
                expected: self.axes.len(),
                actual: target.len(),
            });
        }
        Ok(engine)
    }
}

/// Grid coordinates of a bound axis field, promoted to `f64`.
pub fn axis_coordinates<V: AxisValue>(field: &Field<Vec<V>>) -> Vec<f64> {
    field.value().iter().map(|v| v.to_f64()).collect()
}

/// The independent variables of a typed map, in schema order.
pub trait GridVariables: Bindable + fmt::Debug {
    /// Axis names; the map's axes and every target follow this order.
    const AXES: &'static [&'static str];

    /// Coordinates of each axis, paired with `AXES` by position.
    fn axis_values(&self) -> Vec<Vec<f64>>;

    fn populate_performance_map(&self, map: &mut PerformanceMap) -> Result<(), PerformanceMapError> {
        let values = self.axis_values();
        if values.len() != Self::AXES.len() {
            return Err(PerformanceMapError::NameCount {
                kind: "grid axes",
                names: Self::AXES.len(),
                supplied: values.len(),
            });
        }
        Self::AXES
            .iter()
            .zip(values)
            .try_for_each(|(name, values)| map.add_named_grid_axis(*name, &values))
    }
}

/// The dependent tables of a typed map, in schema order.
pub trait LookupVariables: Bindable + fmt::Debug {
    /// Table names; evaluation results follow this order.
    const TABLES: &'static [&'static str];

    /// Values of each table, paired with `TABLES` by position.
    fn table_values(&self) -> Vec<&[f64]>;

    fn populate_performance_map(&self, map: &mut PerformanceMap) -> Result<(), PerformanceMapError> {
        let values = self.table_values();
        if values.len() != Self::TABLES.len() {
            return Err(PerformanceMapError::NameCount {
                kind: "data tables",
                names: Self::TABLES.len(),
                supplied: values.len(),
            });
        }
        Self::TABLES
            .iter()
            .zip(values)
            .try_for_each(|(name, values)| map.add_data_table(*name, values))
    }
}

/// A bound `performance_map_*` section: grid + lookup variables and the
/// map built from them.
#[derive(Debug, Default)]
pub struct PerformanceMapSection<G, L> {
    grid_variables: Field<G>,
    lookup_variables: Field<L>,
    map: PerformanceMap,
}

impl<G: GridVariables, L: LookupVariables> PerformanceMapSection<G, L> {
    pub fn grid_variables(&self) -> &Field<G> {
        &self.grid_variables
    }

    pub fn lookup_variables(&self) -> &Field<L> {
        &self.lookup_variables
    }

    pub fn map(&self) -> &PerformanceMap {
        &self.map
    }

    /// Lookup values at `target`, ordered as `L::TABLES`.
    pub fn calculate_performance(&self, target: &[f64]) -> Result<Vec<f64>, PerformanceMapError> {
        self.map.calculate_performance(target)
    }

    pub fn calculate_table(&self, name: &str, target: &[f64]) -> Result<f64, PerformanceMapError> {
        self.map.calculate_table(name, target)
    }
}

impl<G: GridVariables, L: LookupVariables> Bindable for PerformanceMapSection<G, L> {
    fn initialize(&mut self, node: &Value, cx: &mut BindingContext<'_>) {
        self.grid_variables = cx.object(node, "grid_variables", true);
        self.lookup_variables = cx.object(node, "lookup_variables", true);

        let (Field::Present(grid), Field::Present(lookup)) =
            (&self.grid_variables, &self.lookup_variables)
        else {
            tracing::debug!(path = %cx.path(), "performance map left unbuilt");
            return;
        };

        let mut map = PerformanceMap::new().with_extrapolation(cx.extrapolation());
        let built = grid
            .populate_performance_map(&mut map)
            .and_then(|()| lookup.populate_performance_map(&mut map))
            .and_then(|()| map.finalize_grid());
        if let Err(err) = built {
            cx.diagnose(Severity::Error, format!("cannot build performance map: {err}"));
        }
        self.map = map;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diagnostics::CollectingSink;
    use crate::factory::RsFactory;
    use serde_json::json;
    use tk205_grid::GridError;

    fn ready_map() -> PerformanceMap {
        let mut map = PerformanceMap::new();
        map.add_named_grid_axis("speed", &[1_i32, 2])
            .expect("first axis");
        map.add_named_grid_axis("pressure", &[0.0, 100.0])
            .expect("second axis");
        map.add_data_table("power", &[10.0, 20.0, 30.0, 40.0])
            .expect("power table");
        map.add_data_table("flow", &[1.0, 1.0, 3.0, 3.0])
            .expect("flow table");
        map.finalize_grid().expect("finalize");
        map
    }

    #[test]
    fn evaluates_every_table_in_insertion_order() {
        let map = ready_map();
        assert!(map.is_ready());
        assert_eq!(map.dimensions(), 2);
        assert_eq!(map.axis(0), Some(&[1.0, 2.0][..]));
        assert_eq!(map.table_names().collect::<Vec<_>>(), vec!["power", "flow"]);

        let values = map.calculate_performance(&[1.5, 50.0]).expect("evaluate");
        assert_eq!(values, vec![25.0, 2.0]);
        assert_eq!(map.calculate_table("flow", &[2.0, 0.0]), Ok(3.0));
        assert_eq!(
            map.calculate_named(&[1.0, 100.0]).expect("named"),
            vec![("power", 20.0), ("flow", 1.0)]
        );
    }

    #[test]
    fn unnamed_axes_are_numbered() {
        let mut map = PerformanceMap::new();
        map.add_grid_axis(&[1.0, 2.0]).expect("axis");
        map.add_grid_axis(&[3_u32]).expect("axis");
        assert_eq!(map.axis_names().collect::<Vec<_>>(), vec!["axis_0", "axis_1"]);
        assert_eq!(map.point_count(), 2);
    }

    #[test]
    fn table_length_mismatch_is_rejected() {
        let mut map = PerformanceMap::new();
        map.add_grid_axis(&[1.0, 2.0, 3.0]).expect("axis");
        let err = map.add_data_table("power", &[1.0, 2.0]).unwrap_err();
        assert_eq!(
            err,
            PerformanceMapError::TableLengthMismatch {
                table: "power".to_string(),
                expected: 3,
                actual: 2
            }
        );
        assert_eq!(map.table_names().count(), 0);
    }

    #[test]
    fn oversized_grid_refuses_tables() {
        let mut map = PerformanceMap::new();
        for _ in 0..70 {
            map.add_grid_axis(&[0.0, 1.0]).expect("axis");
        }
        assert_eq!(map.point_count(), usize::MAX);
        assert!(matches!(
            map.add_data_table("power", &[1.0]),
            Err(PerformanceMapError::TableLengthMismatch { .. })
        ));

        let mut map = PerformanceMap::new();
        for _ in 0..64 {
            map.add_grid_axis(&[1.0]).expect("axis");
        }
        map.add_data_table("power", &[9.0]).expect("table");
        map.finalize_grid().expect("finalize");
        assert_eq!(map.calculate_performance(&[1.0; 64]), Ok(vec![9.0]));
    }

    #[test]
    fn evaluation_before_finalize_is_rejected() {
        let mut map = PerformanceMap::new();
        map.add_grid_axis(&[1.0, 2.0]).expect("axis");
        map.add_data_table("power", &[1.0, 2.0]).expect("table");
        assert_eq!(
            map.calculate_performance(&[1.5]),
            Err(PerformanceMapError::NotFinalized)
        );
    }

    #[test]
    fn state_machine_refuses_out_of_order_calls() {
        let mut map = PerformanceMap::new();
        assert_eq!(
            map.add_data_table("power", &[1.0]),
            Err(PerformanceMapError::NoGridAxes)
        );
        assert_eq!(map.finalize_grid(), Err(PerformanceMapError::NoGridAxes));
        map.add_grid_axis(&[1.0]).expect("axis");
        assert_eq!(map.finalize_grid(), Err(PerformanceMapError::NoDataTables));
        map.add_data_table("power", &[5.0]).expect("table");
        assert_eq!(
            map.add_data_table("power", &[6.0]),
            Err(PerformanceMapError::DuplicateTable("power".to_string()))
        );
        assert!(matches!(
            map.add_grid_axis(&[2.0]),
            Err(PerformanceMapError::AxisAfterTable { .. })
        ));
        map.finalize_grid().expect("finalize");
        assert_eq!(
            map.finalize_grid(),
            Err(PerformanceMapError::AlreadyFinalized {
                operation: "finalize the grid"
            })
        );
        assert!(matches!(
            map.add_data_table("flow", &[1.0]),
            Err(PerformanceMapError::AlreadyFinalized { .. })
        ));
    }

    #[test]
    fn empty_axis_and_bad_targets_are_rejected() {
        let mut map = PerformanceMap::new();
        let empty: [f64; 0] = [];
        assert!(matches!(
            map.add_grid_axis(&empty),
            Err(PerformanceMapError::EmptyAxis { .. })
        ));

        let map = ready_map();
        assert_eq!(
            map.calculate_performance(&[1.0]),
            Err(PerformanceMapError::TargetDimension {
                expected: 2,
                actual: 1
            })
        );
        assert_eq!(
            map.calculate_table("efficiency", &[1.0, 0.0]),
            Err(PerformanceMapError::UnknownTable("efficiency".to_string()))
        );
    }

    #[test]
    fn descending_axis_is_reported_by_the_engine() {
        let mut map = PerformanceMap::new();
        map.add_grid_axis(&[3.0, 1.0]).expect("axis");
        map.add_data_table("power", &[1.0, 2.0]).expect("table");
        assert_eq!(
            map.finalize_grid(),
            Err(PerformanceMapError::Engine(GridError::NotAscending {
                axis: 0,
                position: 1
            }))
        );
        assert!(!map.is_ready());
    }

    #[derive(Debug, Default)]
    struct Grid {
        output_power: Field<Vec<f64>>,
    }

    impl Bindable for Grid {
        fn initialize(&mut self, node: &Value, cx: &mut BindingContext<'_>) {
            self.output_power = cx.field(node, "output_power", true);
        }
    }

    impl GridVariables for Grid {
        const AXES: &'static [&'static str] = &["output_power"];

        fn axis_values(&self) -> Vec<Vec<f64>> {
            vec![axis_coordinates(&self.output_power)]
        }
    }

    #[derive(Debug, Default)]
    struct Lookup {
        efficiency: Field<Vec<f64>>,
    }

    impl Bindable for Lookup {
        fn initialize(&mut self, node: &Value, cx: &mut BindingContext<'_>) {
            self.efficiency = cx.field(node, "efficiency", true);
        }
    }

    impl LookupVariables for Lookup {
        const TABLES: &'static [&'static str] = &["efficiency"];

        fn table_values(&self) -> Vec<&[f64]> {
            vec![self.efficiency.value().as_slice()]
        }
    }

    /// Declares two tables but supplies one.
    #[derive(Debug, Default)]
    struct ShortLookup {
        efficiency: Field<Vec<f64>>,
    }

    impl Bindable for ShortLookup {
        fn initialize(&mut self, node: &Value, cx: &mut BindingContext<'_>) {
            self.efficiency = cx.field(node, "efficiency", true);
        }
    }

    impl LookupVariables for ShortLookup {
        const TABLES: &'static [&'static str] = &["efficiency", "power_factor"];

        fn table_values(&self) -> Vec<&[f64]> {
            vec![self.efficiency.value().as_slice()]
        }
    }

    type Section = PerformanceMapSection<Grid, Lookup>;

    fn bind_section(node: Value, sink: &CollectingSink) -> Section {
        let factory = RsFactory::new();
        let mut cx = BindingContext::new(&factory, sink);
        cx.scoped("performance_map", |cx| cx.bind(&node))
    }

    #[test]
    fn section_binds_and_finalizes() {
        let sink = CollectingSink::new();
        let section = bind_section(
            json!({
                "grid_variables": {"output_power": [2000.0, 5000.0, 6100.0]},
                "lookup_variables": {"efficiency": [0.95, 0.984, 0.986]}
            }),
            &sink,
        );
        assert!(sink.diagnostics().is_empty());
        assert!(section.map().is_ready());
        let efficiency = section.calculate_performance(&[5550.0]).expect("evaluate")[0];
        assert!((efficiency - 0.985).abs() < 1e-9);
        assert_eq!(section.map().axis_names().collect::<Vec<_>>(), Grid::AXES);
        assert_eq!(section.map().table_names().collect::<Vec<_>>(), Lookup::TABLES);
    }

    #[test]
    fn declared_names_must_match_supplied_values() {
        let sink = CollectingSink::new();
        let factory = RsFactory::new();
        let mut cx = BindingContext::new(&factory, &sink);
        let node = json!({
            "grid_variables": {"output_power": [2000.0, 5000.0]},
            "lookup_variables": {"efficiency": [0.95, 0.98]}
        });
        let section: PerformanceMapSection<Grid, ShortLookup> =
            cx.scoped("performance_map", |cx| cx.bind(&node));
        assert!(!section.map().is_ready());
        let errors = sink.at_least(Severity::Error);
        assert_eq!(errors.len(), 1);
        assert!(
            errors[0]
                .message
                .contains("2 data tables are declared, 1 supplied"),
            "{}",
            errors[0].message
        );
    }

    #[test]
    fn section_with_bad_table_reports_and_stays_unbuilt() {
        let sink = CollectingSink::new();
        let section = bind_section(
            json!({
                "grid_variables": {"output_power": [2000.0, 5000.0]},
                "lookup_variables": {"efficiency": [0.95]}
            }),
            &sink,
        );
        let errors = sink.at_least(Severity::Error);
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].path, "performance_map");
        assert!(errors[0].message.contains("has 1 values, grid has 2 points"));
        assert_eq!(
            section.calculate_performance(&[2500.0]),
            Err(PerformanceMapError::NotFinalized)
        );
    }

    #[test]
    fn section_missing_lookup_is_unbuilt() {
        let sink = CollectingSink::new();
        let section = bind_section(json!({"grid_variables": {"output_power": [1.0]}}), &sink);
        assert!(section.grid_variables().is_present());
        assert!(!section.lookup_variables().is_present());
        assert!(!section.map().is_ready());
        assert_eq!(sink.diagnostics()[0].path, "performance_map.lookup_variables");
    }
}
