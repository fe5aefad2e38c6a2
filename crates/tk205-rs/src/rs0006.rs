//! RS0006: electronic motor drive.

use crate::common::{Metadata, bind_metadata, present_map};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tk205_kernel::{
    Bindable, BindingContext, Field, GridVariables, LookupVariables, PerformanceMap,
    PerformanceMapSection, Representation, axis_coordinates,
};

pub const RS_ID: &str = "RS0006";

#[derive(Debug, Default)]
pub struct Rs0006 {
    pub metadata: Field<Metadata>,
    pub description: Field<Description>,
    pub performance: Field<Performance>,
}

impl Representation for Rs0006 {
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

#[derive(Debug, Default)]
pub struct ProductInformation {
    pub manufacturer: Field<String>,
    pub model_number: Field<String>,
}

impl Bindable for ProductInformation {
    fn initialize(&mut self, node: &Value, cx: &mut BindingContext<'_>) {
        self.manufacturer = cx.field(node, "manufacturer", false);
        self.model_number = cx.field(node, "model_number", false);
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CoolingMethod {
    ForcedAir,
    PassiveAir,
    Liquid,
    #[default]
    #[serde(skip_deserializing)]
    Unknown,
}

#[derive(Debug, Default)]
pub struct Performance {
    pub maximum_power: Field<f64>,
    pub standby_power: Field<f64>,
    pub cooling_method: Field<CoolingMethod>,
    pub performance_map: Field<DrivePerformanceMap>,
}

pub type DrivePerformanceMap = PerformanceMapSection<PerformanceMapGrid, PerformanceMapLookup>;

impl Bindable for Performance {
    fn initialize(&mut self, node: &Value, cx: &mut BindingContext<'_>) {
        self.maximum_power = cx.field(node, "maximum_power", true);
        self.standby_power = cx.field(node, "standby_power", true);
        self.cooling_method = cx.field(node, "cooling_method", true);
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
