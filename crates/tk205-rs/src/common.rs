//! Sections and enumerations shared by several representation types.

use chrono::{DateTime, Utc};
use regex::Regex;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::sync::OnceLock;
use tk205_kernel::{
    Bindable, BindingContext, Envelope, Field, GridVariables, LookupVariables, PerformanceMap,
    PerformanceMapSection, Severity,
};
use uuid::Uuid;

/// `metadata`: provenance of a representation document.
#[derive(Debug, Default)]
pub struct Metadata {
    pub data_model: Field<String>,
    pub schema: Field<String>,
    pub schema_version: Field<String>,
    pub description: Field<String>,
    pub id: Field<Uuid>,
    pub data_timestamp: Field<DateTime<Utc>>,
    pub data_version: Field<i64>,
    pub data_source: Field<String>,
    pub disclaimer: Field<String>,
    pub notes: Field<String>,
}

impl Bindable for Metadata {
    fn initialize(&mut self, node: &Value, cx: &mut BindingContext<'_>) {
        self.data_model = cx.field(node, "data_model", true);
        self.schema = cx.field(node, "schema", true);
        self.schema_version = cx.field(node, "schema_version", true);
        self.description = cx.field(node, "description", true);
        self.id = cx.field(node, "id", true);
        self.data_timestamp = cx.field(node, "data_timestamp", true);
        self.data_version = cx.field(node, "data_version", true);
        self.data_source = cx.field(node, "data_source", false);
        self.disclaimer = cx.field(node, "disclaimer", false);
        self.notes = cx.field(node, "notes", false);
    }
}

fn schema_version_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"^\d+\.\d+\.\d+$").expect("schema version regex must compile")
    })
}

/// Bind `metadata` and check it agrees with the payload's type.
pub(crate) fn bind_metadata(
    node: &Value,
    rs_id: &str,
    cx: &mut BindingContext<'_>,
) -> Field<Metadata> {
    let metadata: Field<Metadata> = cx.object(node, "metadata", true);
    let Field::Present(section) = &metadata else {
        return metadata;
    };
    if let Field::Present(schema) = &section.schema {
        if schema != rs_id {
            cx.report(
                Severity::Warn,
                cx.path_of("metadata.schema"),
                format!("metadata names '{schema}' but the payload is {rs_id}"),
            );
        }
    }
    if let Field::Present(version) = &section.schema_version {
        if !schema_version_re().is_match(version) {
            cx.report(
                Severity::Warn,
                cx.path_of("metadata.schema_version"),
                format!("'{version}' is not a MAJOR.MINOR.PATCH version"),
            );
        }
    }
    metadata
}

/// `(key, map)` for a present performance-map section.
pub(crate) fn present_map<'a, G, L>(
    key: &'static str,
    section: &'a Field<PerformanceMapSection<G, L>>,
) -> Option<(&'static str, &'a PerformanceMap)>
where
    G: GridVariables,
    L: LookupVariables,
{
    section.present().map(|section| (key, section.map()))
}

/// `(key, envelope)` for a present embedded representation.
pub(crate) fn present_embedded<'a>(
    key: &'static str,
    representation: &'a Field<Envelope>,
) -> Option<(&'static str, &'a Envelope)> {
    representation.present().map(|envelope| (key, envelope))
}

/// Discrete staging or continuous modulation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SpeedControlType {
    Discrete,
    Continuous,
    #[default]
    #[serde(skip_deserializing)]
    Unknown,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CompressorType {
    Reciprocating,
    Screw,
    Centrifugal,
    Rotary,
    Scroll,
    #[default]
    #[serde(skip_deserializing)]
    Unknown,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum LiquidConstituent {
    Water,
    PropyleneGlycol,
    EthyleneGlycol,
    #[default]
    #[serde(skip_deserializing)]
    Unknown,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ConcentrationType {
    ByVolume,
    ByMass,
    #[default]
    #[serde(skip_deserializing)]
    Unknown,
}

/// One constituent of a heat-transfer liquid.
#[derive(Debug, Default)]
pub struct LiquidComponent {
    pub liquid_constituent: Field<LiquidConstituent>,
    pub concentration: Field<f64>,
}

impl Bindable for LiquidComponent {
    fn initialize(&mut self, node: &Value, cx: &mut BindingContext<'_>) {
        self.liquid_constituent = cx.field(node, "liquid_constituent", true);
        self.concentration = cx.field(node, "concentration", false);
    }
}

/// Heat-transfer liquid flowing through a chiller heat exchanger.
#[derive(Debug, Default)]
pub struct LiquidMixture {
    pub liquid_components: Field<Vec<LiquidComponent>>,
    pub concentration_type: Field<ConcentrationType>,
}

impl Bindable for LiquidMixture {
    fn initialize(&mut self, node: &Value, cx: &mut BindingContext<'_>) {
        self.liquid_components = cx.objects(node, "liquid_components", true);
        self.concentration_type = cx.field(node, "concentration_type", true);
    }
}
