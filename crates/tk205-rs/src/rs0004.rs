//! RS0004: direct-expansion (DX) air-conditioning system.

use crate::common::{
    CompressorType, Metadata, SpeedControlType, bind_metadata, present_map,
};
use serde_json::Value;
use tk205_kernel::{
    Bindable, BindingContext, Field, GridVariables, LookupVariables, PerformanceMap,
    PerformanceMapSection, Representation, axis_coordinates,
};

pub const RS_ID: &str = "RS0004";

#[derive(Debug, Default)]
pub struct Rs0004 {
    pub metadata: Field<Metadata>,
    pub description: Field<Description>,
    pub performance: Field<Performance>,
}

impl Representation for Rs0004 {
    fn rs_id(&self) -> &'static str {
        RS_ID
    }

    fn initialize(&mut self, node: &Value, cx: &mut BindingContext<'_>) {
        self.metadata = bind_metadata(node, RS_ID, cx);
        self.description = cx.object(node, "description", false);
        self.performance = cx.object(node, "performance", true);
    }

    fn performance_maps(&self) -> Vec<(&'static str, &PerformanceMap)> {
        let Some(performance) = self.performance.present() else {
            return Vec::new();
        };
        [
            present_map(
                "performance_map_cooling",
                &performance.performance_map_cooling,
            ),
            present_map(
                "performance_map_standby",
                &performance.performance_map_standby,
            ),
        ]
        .into_iter()
        .flatten()
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
    pub refrigerant: Field<String>,
    pub compressor_type: Field<CompressorType>,
}

impl Bindable for ProductInformation {
    fn initialize(&mut self, node: &Value, cx: &mut BindingContext<'_>) {
        self.manufacturer = cx.field(node, "manufacturer", false);
        self.model_number = cx.field(node, "model_number", false);
        self.refrigerant = cx.field(node, "refrigerant", false);
        self.compressor_type = cx.field(node, "compressor_type", false);
    }
}

#[derive(Debug, Default)]
pub struct Performance {
    pub compressor_speed_control_type: Field<SpeedControlType>,
    pub cycling_degradation_coefficient: Field<f64>,
    pub performance_map_cooling: Field<CoolingPerformanceMap>,
    pub performance_map_standby: Field<StandbyPerformanceMap>,
}

pub type CoolingPerformanceMap = PerformanceMapSection<CoolingGrid, CoolingLookup>;
pub type StandbyPerformanceMap = PerformanceMapSection<StandbyGrid, StandbyLookup>;

impl Bindable for Performance {
    fn initialize(&mut self, node: &Value, cx: &mut BindingContext<'_>) {
        self.compressor_speed_control_type =
            cx.field(node, "compressor_speed_control_type", true);
        self.cycling_degradation_coefficient =
            cx.field(node, "cycling_degradation_coefficient", true);
        self.performance_map_cooling = cx.object(node, "performance_map_cooling", true);
        self.performance_map_standby = cx.object(node, "performance_map_standby", true);
    }
}

#[derive(Debug, Default)]
pub struct CoolingGrid {
    pub outdoor_coil_entering_dry_bulb_temperature: Field<Vec<f64>>,
    pub indoor_coil_entering_relative_humidity: Field<Vec<f64>>,
    pub indoor_coil_entering_dry_bulb_temperature: Field<Vec<f64>>,
    pub indoor_coil_air_mass_flow_rate: Field<Vec<f64>>,
    pub compressor_sequence_number: Field<Vec<i32>>,
    pub ambient_absolute_air_pressure: Field<Vec<f64>>,
}

impl Bindable for CoolingGrid {
    fn initialize(&mut self, node: &Value, cx: &mut BindingContext<'_>) {
        self.outdoor_coil_entering_dry_bulb_temperature =
            cx.field(node, "outdoor_coil_entering_dry_bulb_temperature", true);
        self.indoor_coil_entering_relative_humidity =
            cx.field(node, "indoor_coil_entering_relative_humidity", true);
        self.indoor_coil_entering_dry_bulb_temperature =
            cx.field(node, "indoor_coil_entering_dry_bulb_temperature", true);
        self.indoor_coil_air_mass_flow_rate =
            cx.field(node, "indoor_coil_air_mass_flow_rate", true);
        self.compressor_sequence_number = cx.field(node, "compressor_sequence_number", true);
        self.ambient_absolute_air_pressure =
            cx.field(node, "ambient_absolute_air_pressure", true);
    }
}

impl GridVariables for CoolingGrid {
    const AXES: &'static [&'static str] = &[
        "outdoor_coil_entering_dry_bulb_temperature",
        "indoor_coil_entering_relative_humidity",
        "indoor_coil_entering_dry_bulb_temperature",
        "indoor_coil_air_mass_flow_rate",
        "compressor_sequence_number",
        "ambient_absolute_air_pressure",
    ];

    fn axis_values(&self) -> Vec<Vec<f64>> {
        vec![
            axis_coordinates(&self.outdoor_coil_entering_dry_bulb_temperature),
            axis_coordinates(&self.indoor_coil_entering_relative_humidity),
            axis_coordinates(&self.indoor_coil_entering_dry_bulb_temperature),
            axis_coordinates(&self.indoor_coil_air_mass_flow_rate),
            axis_coordinates(&self.compressor_sequence_number),
            axis_coordinates(&self.ambient_absolute_air_pressure),
        ]
    }
}

#[derive(Debug, Default)]
pub struct CoolingLookup {
    pub gross_total_capacity: Field<Vec<f64>>,
    pub gross_sensible_capacity: Field<Vec<f64>>,
    pub gross_power: Field<Vec<f64>>,
}

impl Bindable for CoolingLookup {
    fn initialize(&mut self, node: &Value, cx: &mut BindingContext<'_>) {
        self.gross_total_capacity = cx.field(node, "gross_total_capacity", true);
        self.gross_sensible_capacity = cx.field(node, "gross_sensible_capacity", true);
        self.gross_power = cx.field(node, "gross_power", true);
    }
}

impl LookupVariables for CoolingLookup {
    const TABLES: &'static [&'static str] =
        &["gross_total_capacity", "gross_sensible_capacity", "gross_power"];

    fn table_values(&self) -> Vec<&[f64]> {
        vec![
            self.gross_total_capacity.value().as_slice(),
            self.gross_sensible_capacity.value().as_slice(),
            self.gross_power.value().as_slice(),
        ]
    }
}

#[derive(Debug, Default)]
pub struct StandbyGrid {
    pub outdoor_coil_environment_dry_bulb_temperature: Field<Vec<f64>>,
}

impl Bindable for StandbyGrid {
    fn initialize(&mut self, node: &Value, cx: &mut BindingContext<'_>) {
        self.outdoor_coil_environment_dry_bulb_temperature =
            cx.field(node, "outdoor_coil_environment_dry_bulb_temperature", true);
    }
}

impl GridVariables for StandbyGrid {
    const AXES: &'static [&'static str] = &["outdoor_coil_environment_dry_bulb_temperature"];

    fn axis_values(&self) -> Vec<Vec<f64>> {
        vec![axis_coordinates(&self.outdoor_coil_environment_dry_bulb_temperature)]
    }
}

#[derive(Debug, Default)]
pub struct StandbyLookup {
    pub gross_power: Field<Vec<f64>>,
}

impl Bindable for StandbyLookup {
    fn initialize(&mut self, node: &Value, cx: &mut BindingContext<'_>) {
        self.gross_power = cx.field(node, "gross_power", true);
    }
}

impl LookupVariables for StandbyLookup {
    const TABLES: &'static [&'static str] = &["gross_power"];

    fn table_values(&self) -> Vec<&[f64]> {
        vec![self.gross_power.value().as_slice()]
    }
}
