//! RS0001: liquid-cooled chiller.

use crate::common::{
    CompressorType, LiquidMixture, Metadata, SpeedControlType, bind_metadata, present_map,
};
use serde_json::Value;
use tk205_kernel::{
    Bindable, BindingContext, Field, GridVariables, LookupVariables, PerformanceMap,
    PerformanceMapSection, Representation, axis_coordinates,
};

pub const RS_ID: &str = "RS0001";

#[derive(Debug, Default)]
pub struct Rs0001 {
    pub metadata: Field<Metadata>,
    pub description: Field<Description>,
    pub performance: Field<Performance>,
}

impl Representation for Rs0001 {
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
    pub hot_gas_bypass_installed: Field<bool>,
}

impl Bindable for ProductInformation {
    fn initialize(&mut self, node: &Value, cx: &mut BindingContext<'_>) {
        self.manufacturer = cx.field(node, "manufacturer", false);
        self.model_number = cx.field(node, "model_number", false);
        self.refrigerant = cx.field(node, "refrigerant", false);
        self.compressor_type = cx.field(node, "compressor_type", false);
        self.hot_gas_bypass_installed = cx.field(node, "hot_gas_bypass_installed", false);
    }
}

#[derive(Debug, Default)]
pub struct Performance {
    pub evaporator_liquid_type: Field<LiquidMixture>,
    pub condenser_liquid_type: Field<LiquidMixture>,
    pub evaporator_fouling_factor: Field<f64>,
    pub condenser_fouling_factor: Field<f64>,
    pub compressor_speed_control_type: Field<SpeedControlType>,
    pub maximum_power: Field<f64>,
    pub cycling_degradation_coefficient: Field<f64>,
    pub performance_map_cooling: Field<CoolingPerformanceMap>,
    pub performance_map_standby: Field<StandbyPerformanceMap>,
}

pub type CoolingPerformanceMap = PerformanceMapSection<CoolingGrid, CoolingLookup>;
pub type StandbyPerformanceMap = PerformanceMapSection<StandbyGrid, StandbyLookup>;

impl Bindable for Performance {
    fn initialize(&mut self, node: &Value, cx: &mut BindingContext<'_>) {
        self.evaporator_liquid_type = cx.object(node, "evaporator_liquid_type", true);
        self.condenser_liquid_type = cx.object(node, "condenser_liquid_type", true);
        self.evaporator_fouling_factor = cx.field(node, "evaporator_fouling_factor", true);
        self.condenser_fouling_factor = cx.field(node, "condenser_fouling_factor", true);
        self.compressor_speed_control_type =
            cx.field(node, "compressor_speed_control_type", true);
        self.maximum_power = cx.field(node, "maximum_power", false);
        self.cycling_degradation_coefficient =
            cx.field(node, "cycling_degradation_coefficient", true);
        self.performance_map_cooling = cx.object(node, "performance_map_cooling", true);
        self.performance_map_standby = cx.object(node, "performance_map_standby", true);
    }
}

#[derive(Debug, Default)]
pub struct CoolingGrid {
    pub evaporator_liquid_volumetric_flow_rate: Field<Vec<f64>>,
    pub evaporator_liquid_leaving_temperature: Field<Vec<f64>>,
    pub condenser_liquid_volumetric_flow_rate: Field<Vec<f64>>,
    pub condenser_liquid_entering_temperature: Field<Vec<f64>>,
    pub compressor_sequence_number: Field<Vec<i32>>,
}

impl Bindable for CoolingGrid {
    fn initialize(&mut self, node: &Value, cx: &mut BindingContext<'_>) {
        self.evaporator_liquid_volumetric_flow_rate =
            cx.field(node, "evaporator_liquid_volumetric_flow_rate", true);
        self.evaporator_liquid_leaving_temperature =
            cx.field(node, "evaporator_liquid_leaving_temperature", true);
        self.condenser_liquid_volumetric_flow_rate =
            cx.field(node, "condenser_liquid_volumetric_flow_rate", true);
        self.condenser_liquid_entering_temperature =
            cx.field(node, "condenser_liquid_entering_temperature", true);
        self.compressor_sequence_number = cx.field(node, "compressor_sequence_number", true);
    }
}

impl GridVariables for CoolingGrid {
    const AXES: &'static [&'static str] = &[
        "evaporator_liquid_volumetric_flow_rate",
        "evaporator_liquid_leaving_temperature",
        "condenser_liquid_volumetric_flow_rate",
        "condenser_liquid_entering_temperature",
        "compressor_sequence_number",
    ];

    fn axis_values(&self) -> Vec<Vec<f64>> {
        vec![
            axis_coordinates(&self.evaporator_liquid_volumetric_flow_rate),
            axis_coordinates(&self.evaporator_liquid_leaving_temperature),
            axis_coordinates(&self.condenser_liquid_volumetric_flow_rate),
            axis_coordinates(&self.condenser_liquid_entering_temperature),
            axis_coordinates(&self.compressor_sequence_number),
        ]
    }
}

#[derive(Debug, Default)]
pub struct CoolingLookup {
    pub input_power: Field<Vec<f64>>,
    pub net_evaporator_capacity: Field<Vec<f64>>,
    pub net_condenser_capacity: Field<Vec<f64>>,
    pub evaporator_liquid_entering_temperature: Field<Vec<f64>>,
    pub condenser_liquid_leaving_temperature: Field<Vec<f64>>,
    pub evaporator_liquid_differential_pressure: Field<Vec<f64>>,
    pub condenser_liquid_differential_pressure: Field<Vec<f64>>,
    pub oil_cooler_heat: Field<Vec<f64>>,
    pub auxiliary_heat: Field<Vec<f64>>,
}

impl Bindable for CoolingLookup {
    fn initialize(&mut self, node: &Value, cx: &mut BindingContext<'_>) {
        self.input_power = cx.field(node, "input_power", true);
        self.net_evaporator_capacity = cx.field(node, "net_evaporator_capacity", true);
        self.net_condenser_capacity = cx.field(node, "net_condenser_capacity", true);
        self.evaporator_liquid_entering_temperature =
            cx.field(node, "evaporator_liquid_entering_temperature", true);
        self.condenser_liquid_leaving_temperature =
            cx.field(node, "condenser_liquid_leaving_temperature", true);
        self.evaporator_liquid_differential_pressure =
            cx.field(node, "evaporator_liquid_differential_pressure", true);
        self.condenser_liquid_differential_pressure =
            cx.field(node, "condenser_liquid_differential_pressure", true);
        self.oil_cooler_heat = cx.field(node, "oil_cooler_heat", true);
        self.auxiliary_heat = cx.field(node, "auxiliary_heat", true);
    }
}

impl LookupVariables for CoolingLookup {
    const TABLES: &'static [&'static str] = &[
        "input_power",
        "net_evaporator_capacity",
        "net_condenser_capacity",
        "evaporator_liquid_entering_temperature",
        "condenser_liquid_leaving_temperature",
        "evaporator_liquid_differential_pressure",
        "condenser_liquid_differential_pressure",
        "oil_cooler_heat",
        "auxiliary_heat",
    ];

    fn table_values(&self) -> Vec<&[f64]> {
        vec![
            self.input_power.value().as_slice(),
            self.net_evaporator_capacity.value().as_slice(),
            self.net_condenser_capacity.value().as_slice(),
            self.evaporator_liquid_entering_temperature.value().as_slice(),
            self.condenser_liquid_leaving_temperature.value().as_slice(),
            self.evaporator_liquid_differential_pressure.value().as_slice(),
            self.condenser_liquid_differential_pressure.value().as_slice(),
            self.oil_cooler_heat.value().as_slice(),
            self.auxiliary_heat.value().as_slice(),
        ]
    }
}

#[derive(Debug, Default)]
pub struct StandbyGrid {
    pub environment_dry_bulb_temperature: Field<Vec<f64>>,
}

impl Bindable for StandbyGrid {
    fn initialize(&mut self, node: &Value, cx: &mut BindingContext<'_>) {
        self.environment_dry_bulb_temperature =
            cx.field(node, "environment_dry_bulb_temperature", true);
    }
}

impl GridVariables for StandbyGrid {
    const AXES: &'static [&'static str] = &["environment_dry_bulb_temperature"];

    fn axis_values(&self) -> Vec<Vec<f64>> {
        vec![axis_coordinates(&self.environment_dry_bulb_temperature)]
    }
}

#[derive(Debug, Default)]
pub struct StandbyLookup {
    pub input_power: Field<Vec<f64>>,
}

impl Bindable for StandbyLookup {
    fn initialize(&mut self, node: &Value, cx: &mut BindingContext<'_>) {
        self.input_power = cx.field(node, "input_power", true);
    }
}

impl LookupVariables for StandbyLookup {
    const TABLES: &'static [&'static str] = &["input_power"];

    fn table_values(&self) -> Vec<&[f64]> {
        vec![self.input_power.value().as_slice()]
    }
}
