//! RS0002: unitary cooling air-conditioning equipment.
//!
//! A composition of an indoor fan (RS0003) and a DX system (RS0004); it has
//! no performance map of its own.

use crate::common::{Metadata, bind_metadata, present_embedded};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tk205_kernel::{Bindable, BindingContext, Envelope, Field, Representation};

pub const RS_ID: &str = "RS0002";

#[derive(Debug, Default)]
pub struct Rs0002 {
    pub metadata: Field<Metadata>,
    pub description: Field<Description>,
    pub performance: Field<Performance>,
}

impl Representation for Rs0002 {
    fn rs_id(&self) -> &'static str {
        RS_ID
    }

    fn initialize(&mut self, node: &Value, cx: &mut BindingContext<'_>) {
        self.metadata = bind_metadata(node, RS_ID, cx);
        self.description = cx.object(node, "description", false);
        self.performance = cx.object(node, "performance", true);
    }

    fn embedded(&self) -> Vec<(&'static str, &Envelope)> {
        let Some(performance) = self.performance.present() else {
            return Vec::new();
        };
        [
            present_embedded(
                "indoor_fan_representation",
                &performance.indoor_fan_representation,
            ),
            present_embedded(
                "dx_system_representation",
                &performance.dx_system_representation,
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
}

impl Bindable for ProductInformation {
    fn initialize(&mut self, node: &Value, cx: &mut BindingContext<'_>) {
        self.manufacturer = cx.field(node, "manufacturer", false);
        self.model_number = cx.field(node, "model_number", false);
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum FanPosition {
    BlowThrough,
    DrawThrough,
    #[default]
    #[serde(skip_deserializing)]
    Unknown,
}

#[derive(Debug, Default)]
pub struct Performance {
    pub standby_power: Field<f64>,
    /// An RS0003 envelope.
    pub indoor_fan_representation: Field<Envelope>,
    pub fan_position: Field<FanPosition>,
    /// An RS0004 envelope.
    pub dx_system_representation: Field<Envelope>,
}

impl Bindable for Performance {
    fn initialize(&mut self, node: &Value, cx: &mut BindingContext<'_>) {
        self.standby_power = cx.field(node, "standby_power", true);
        self.indoor_fan_representation =
            cx.representation(node, "indoor_fan_representation", "RS0003", true);
        self.fan_position = cx.field(node, "fan_position", true);
        self.dx_system_representation =
            cx.representation(node, "dx_system_representation", "RS0004", true);
    }
}
