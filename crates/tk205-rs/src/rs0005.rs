//! RS0005: electric motor, optionally with an embedded RS0006 drive.

use crate::common::{Metadata, bind_metadata, present_embedded, present_map};
use serde_json::Value;
use tk205_kernel::{
    Bindable, BindingContext, Envelope, Field, GridVariables, LookupVariables, PerformanceMap,
    PerformanceMapSection, Representation, axis_coordinates,
};

pub const RS_ID: &str = "RS0005";

#[derive(Debug, Default)]
pub struct Rs0005 {
    pub metadata: Field<Metadata>,
    pub description: Field<Description>,
    pub performance: Field<Performance>,
}

impl Representation for Rs0005 {
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

    fn embedded(&self) -> Vec<(&'static str, &Envelope)> {
        self.performance
            .present()
            .and_then(|p| present_embedded("drive_representation", &p.drive_representation))
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

#[derive(Debug, Default)]
pub struct Performance {
    pub maximum_power: Field<f64>,
    pub standby_power: Field<f64>,
    pub number_of_poles: Field<i32>,
    /// An RS0006 envelope.
    pub drive_representation: Field<Envelope>,
    pub performance_map: Field<MotorPerformanceMap>,
}

pub type MotorPerformanceMap = PerformanceMapSection<PerformanceMapGrid, PerformanceMapLookup>;

impl Bindable for Performance {
    fn initialize(&mut self, node: &Value, cx: &mut BindingContext<'_>) {
        self.maximum_power = cx.field(node, "maximum_power", true);
        self.standby_power = cx.field(node, "standby_power", true);
        self.number_of_poles = cx.field(node, "number_of_poles", true);
        self.drive_representation =
            cx.representation(node, "drive_representation", "RS0006", false);
        self.performance_map = cx.object(node, "performance_map", true);
    }
}

#[derive(Debug, Default)]
pub struct PerformanceMapGrid {
    pub shaft_power: Field<Vec<f64>>,
    pub shaft_rotational_speed: Field<Vec<f64>>,
}

impl Bindable for PerformanceMapGrid {
    fn initialize(&mut self, node: &Value, cx: &mut BindingContext<'_>) {
        self.shaft_power = cx.field(node, "shaft_power", true);
        self.shaft_rotational_speed = cx.field(node, "shaft_rotational_speed", true);
    }
}

impl GridVariables for PerformanceMapGrid {
    const AXES: &'static [&'static str] = &["shaft_power", "shaft_rotational_speed"];

    fn axis_values(&self) -> Vec<Vec<f64>> {
        vec![axis_coordinates(&self.shaft_power), axis_coordinates(&self.shaft_rotational_speed)]
    }
}

#[derive(Debug, Default)]
pub struct PerformanceMapLookup {
    pub efficiency: Field<Vec<f64>>,
    pub power_factor: Field<Vec<f64>>,
}

impl Bindable for PerformanceMapLookup {
    fn initialize(&mut self, node: &Value, cx: &mut BindingContext<'_>) {
        self.efficiency = cx.field(node, "efficiency", true);
        self.power_factor = cx.field(node, "power_factor", true);
    }
}

impl LookupVariables for PerformanceMapLookup {
    const TABLES: &'static [&'static str] = &["efficiency", "power_factor"];

    fn table_values(&self) -> Vec<&[f64]> {
        vec![self.efficiency.value().as_slice(), self.power_factor.value().as_slice()]
    }
}
