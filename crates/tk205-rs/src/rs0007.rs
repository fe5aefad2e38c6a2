//! RS0007: mechanical drive (belt, gear or direct coupling).

use crate::common::{Metadata, bind_metadata, present_map};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tk205_kernel::{
    Bindable, BindingContext, Field, GridVariables, LookupVariables, PerformanceMap,
    PerformanceMapSection, Representation, axis_coordinates,
};

pub const RS_ID: &str = "RS0007";

#[derive(Debug, Default)]
pub struct Rs0007 {
    pub metadata: Field<Metadata>,
    pub description: Field<Description>,
    pub performance: Field<Performance>,
}

impl Representation for Rs0007 {
    fn rs_id(&self) -> &'static str {
        RS_ID
    }

    fn initialize(&mut self, node: &Value, cx: &mut BindingContext<'_>) {
        self.metadata = bind_metadata(node, RS_ID, cx);
        self.description = cx.object(node, "description", false);
        self.performance = cx.object(node, "performance", true);
    }

    fn performance_maps(&self) -> Vec<(&'static str, &PerformanceMap)> {
        self.performance
            .present()
            .and_then(|p| present_map("performance_map", &p.performance_map))
            .into_iter()
            .collect()
    }
}

#[derive(Debug, Default)]
pub struct Description {
    pub product_information: Field<ProductInformation>,
}

impl Bindable for Description {
    fn initialize(&mut self, node: &Value, cx: &mut BindingContext<'_>) {
        self.product_information = cx.object(node, "product_information", false);
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DriveType {
    Direct,
    Belt,
    Gear,
    #[default]
    #[serde(skip_deserializing)]
    Unknown,
}

#[derive(Debug, Default)]
pub struct ProductInformation {
    pub manufacturer: Field<String>,
    pub model_number: Field<String>,
    pub drive_type: Field<DriveType>,
}

impl Bindable for ProductInformation {
    fn initialize(&mut self, node: &Value, cx: &mut BindingContext<'_>) {
        self.manufacturer = cx.field(node, "manufacturer", false);
        self.model_number = cx.field(node, "model_number", false);
        self.drive_type = cx.field(node, "drive_type", false);
    }
}

#[derive(Debug, Default)]
pub struct Performance {
    /// Driven speed over driving speed.
    pub speed_ratio: Field<f64>,
    pub performance_map: Field<MechanicalDrivePerformanceMap>,
}

pub type MechanicalDrivePerformanceMap =
    PerformanceMapSection<PerformanceMapGrid, PerformanceMapLookup>;

impl Bindable for Performance {
    fn initialize(&mut self, node: &Value, cx: &mut BindingContext<'_>) {
        self.speed_ratio = cx.field(node, "speed_ratio", true);
        self.performance_map = cx.object(node, "performance_map", true);
    }
}

#[derive(Debug, Default)]
pub struct PerformanceMapGrid {
    pub output_power: Field<Vec<f64>>,
}

impl Bindable for PerformanceMapGrid {
    fn initialize(&mut self, node: &Value, cx: &mut BindingContext<'_>) {
        self.output_power = cx.field(node, "output_power", true);
    }
}

impl GridVariables for PerformanceMapGrid {
    const AXES: &'static [&'static str] = &["output_power"];

    fn axis_values(&self) -> Vec<Vec<f64>> {
        vec![axis_coordinates(&self.output_power)]
    }
}

#[derive(Debug, Default)]
pub struct PerformanceMapLookup {
    pub efficiency: Field<Vec<f64>>,
}

impl Bindable for PerformanceMapLookup {
    fn initialize(&mut self, node: &Value, cx: &mut BindingContext<'_>) {
        self.efficiency = cx.field(node, "efficiency", true);
    }
}

impl LookupVariables for PerformanceMapLookup {
    const TABLES: &'static [&'static str] = &["efficiency"];

    fn table_values(&self) -> Vec<&[f64]> {
        vec![self.efficiency.value().as_slice()]
    }
}
