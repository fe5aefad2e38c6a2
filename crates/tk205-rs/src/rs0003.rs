//! RS0003: fan assembly.
//!
//! The shape of the performance map depends on how the fan is operated.
//! A continuously modulated fan tabulates over air flow and static
//! pressure; a discrete-speed fan tabulates over speed number and static
//! pressure. `operation_speed_control_type` selects which one is bound.

use crate::common::{Metadata, SpeedControlType, bind_metadata, present_embedded};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tk205_kernel::{
    Bindable, BindingContext, Envelope, Field, GridVariables, LookupVariables, PerformanceMap,
    PerformanceMapError, PerformanceMapSection, Representation, axis_coordinates,
};

pub const RS_ID: &str = "RS0003";

#[derive(Debug, Default)]
pub struct Rs0003 {
    pub metadata: Field<Metadata>,
    pub description: Field<Description>,
    pub performance: Field<Performance>,
}

impl Representation for Rs0003 {
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
            .and_then(|p| p.performance_map.present())
            .map(|map| ("performance_map", map.map()))
            .into_iter()
            .collect()
    }

    fn embedded(&self) -> Vec<(&'static str, &Envelope)> {
        let Some(performance) = self.performance.present() else {
            return Vec::new();
        };
        [
            present_embedded("motor_representation", &performance.motor_representation),
            present_embedded(
                "mechanical_drive_representation",
                &performance.mechanical_drive_representation,
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

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ImpellerType {
    CentrifugalForwardCurved,
    CentrifugalBackwardCurved,
    CentrifugalAirfoil,
    MixedFlow,
    Axial,
    Propeller,
    Other,
    #[default]
    #[serde(skip_deserializing)]
    Unknown,
}

#[derive(Debug, Default)]
pub struct ProductInformation {
    pub manufacturer: Field<String>,
    pub model_number: Field<String>,
    pub impeller_type: Field<ImpellerType>,
    pub number_of_impellers: Field<i32>,
}

impl Bindable for ProductInformation {
    fn initialize(&mut self, node: &Value, cx: &mut BindingContext<'_>) {
        self.manufacturer = cx.field(node, "manufacturer", false);
        self.model_number = cx.field(node, "model_number", false);
        self.impeller_type = cx.field(node, "impeller_type", false);
        self.number_of_impellers = cx.field(node, "number_of_impellers", false);
    }
}

/// Whether the installed speed is fixed at commissioning or varies in use.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum InstallationSpeedControlType {
    Fixed,
    Variable,
    #[default]
    #[serde(skip_deserializing)]
    Unknown,
}

#[derive(Debug, Default)]
pub struct Performance {
    pub nominal_standard_air_volumetric_flow_rate: Field<f64>,
    pub is_enclosed: Field<bool>,
    pub heat_fraction_to_air_stream: Field<f64>,
    /// An RS0005 envelope.
    pub motor_representation: Field<Envelope>,
    /// An RS0007 envelope.
    pub mechanical_drive_representation: Field<Envelope>,
    pub operation_speed_control_type: Field<SpeedControlType>,
    pub installation_speed_control_type: Field<InstallationSpeedControlType>,
    pub performance_map: Field<FanPerformanceMap>,
}

impl Bindable for Performance {
    fn initialize(&mut self, node: &Value, cx: &mut BindingContext<'_>) {
        self.nominal_standard_air_volumetric_flow_rate =
            cx.field(node, "nominal_standard_air_volumetric_flow_rate", true);
        self.is_enclosed = cx.field(node, "is_enclosed", true);
        self.heat_fraction_to_air_stream = cx.field(node, "heat_fraction_to_air_stream", false);
        self.motor_representation =
            cx.representation(node, "motor_representation", "RS0005", false);
        self.mechanical_drive_representation =
            cx.representation(node, "mechanical_drive_representation", "RS0007", false);
        self.operation_speed_control_type = cx.field(node, "operation_speed_control_type", true);
        self.installation_speed_control_type =
            cx.field(node, "installation_speed_control_type", true);

        // Unknown or missing control types fall back to the continuous layout.
        self.performance_map = match self.operation_speed_control_type.value() {
            SpeedControlType::Discrete => cx
                .object(node, "performance_map", true)
                .map(FanPerformanceMap::Discrete),
            SpeedControlType::Continuous | SpeedControlType::Unknown => cx
                .object(node, "performance_map", true)
                .map(FanPerformanceMap::Continuous),
        };
    }
}

/// The fan performance map, in the layout its speed control calls for.
#[derive(Debug)]
pub enum FanPerformanceMap {
    Continuous(PerformanceMapSection<ContinuousGrid, ContinuousLookup>),
    Discrete(PerformanceMapSection<DiscreteGrid, DiscreteLookup>),
}

impl Default for FanPerformanceMap {
    fn default() -> Self {
        Self::Continuous(PerformanceMapSection::default())
    }
}

impl FanPerformanceMap {
    pub fn map(&self) -> &PerformanceMap {
        match self {
            Self::Continuous(section) => section.map(),
            Self::Discrete(section) => section.map(),
        }
    }

    /// Lookup values at `target`, in the variant's table order.
    pub fn calculate_performance(&self, target: &[f64]) -> Result<Vec<f64>, PerformanceMapError> {
        self.map().calculate_performance(target)
    }

    pub fn speed_control_type(&self) -> SpeedControlType {
        match self {
            Self::Continuous(_) => SpeedControlType::Continuous,
            Self::Discrete(_) => SpeedControlType::Discrete,
        }
    }
}

#[derive(Debug, Default)]
pub struct ContinuousGrid {
    pub standard_air_volumetric_flow_rate: Field<Vec<f64>>,
    pub static_pressure_difference: Field<Vec<f64>>,
}

impl Bindable for ContinuousGrid {
    fn initialize(&mut self, node: &Value, cx: &mut BindingContext<'_>) {
        self.standard_air_volumetric_flow_rate =
            cx.field(node, "standard_air_volumetric_flow_rate", true);
        self.static_pressure_difference = cx.field(node, "static_pressure_difference", true);
    }
}

impl GridVariables for ContinuousGrid {
    const AXES: &'static [&'static str] = &[
        "standard_air_volumetric_flow_rate",
        "static_pressure_difference",
    ];

    fn axis_values(&self) -> Vec<Vec<f64>> {
        vec![
            axis_coordinates(&self.standard_air_volumetric_flow_rate),
            axis_coordinates(&self.static_pressure_difference),
        ]
    }
}

#[derive(Debug, Default)]
pub struct ContinuousLookup {
    pub impeller_rotational_speed: Field<Vec<f64>>,
    pub shaft_power: Field<Vec<f64>>,
}

impl Bindable for ContinuousLookup {
    fn initialize(&mut self, node: &Value, cx: &mut BindingContext<'_>) {
        self.impeller_rotational_speed = cx.field(node, "impeller_rotational_speed", true);
        self.shaft_power = cx.field(node, "shaft_power", true);
    }
}

impl LookupVariables for ContinuousLookup {
    const TABLES: &'static [&'static str] = &["impeller_rotational_speed", "shaft_power"];

    fn table_values(&self) -> Vec<&[f64]> {
        vec![self.impeller_rotational_speed.value().as_slice(), self.shaft_power.value().as_slice()]
    }
}

#[derive(Debug, Default)]
pub struct DiscreteGrid {
    pub speed_number: Field<Vec<i32>>,
    pub static_pressure_difference: Field<Vec<f64>>,
}

impl Bindable for DiscreteGrid {
    fn initialize(&mut self, node: &Value, cx: &mut BindingContext<'_>) {
        self.speed_number = cx.field(node, "speed_number", true);
        self.static_pressure_difference = cx.field(node, "static_pressure_difference", true);
    }
}

impl GridVariables for DiscreteGrid {
    const AXES: &'static [&'static str] = &["speed_number", "static_pressure_difference"];

    fn axis_values(&self) -> Vec<Vec<f64>> {
        vec![
            axis_coordinates(&self.speed_number),
            axis_coordinates(&self.static_pressure_difference),
        ]
    }
}

#[derive(Debug, Default)]
pub struct DiscreteLookup {
    pub standard_air_volumetric_flow_rate: Field<Vec<f64>>,
    pub shaft_power: Field<Vec<f64>>,
    pub impeller_rotational_speed: Field<Vec<f64>>,
}

impl Bindable for DiscreteLookup {
    fn initialize(&mut self, node: &Value, cx: &mut BindingContext<'_>) {
        self.standard_air_volumetric_flow_rate =
            cx.field(node, "standard_air_volumetric_flow_rate", true);
        self.shaft_power = cx.field(node, "shaft_power", true);
        self.impeller_rotational_speed = cx.field(node, "impeller_rotational_speed", true);
    }
}

impl LookupVariables for DiscreteLookup {
    const TABLES: &'static [&'static str] = &[
        "standard_air_volumetric_flow_rate",
        "shaft_power",
        "impeller_rotational_speed",
    ];

    fn table_values(&self) -> Vec<&[f64]> {
        vec![
            self.standard_air_volumetric_flow_rate.value().as_slice(),
            self.shaft_power.value().as_slice(),
            self.impeller_rotational_speed.value().as_slice(),
        ]
    }
}
