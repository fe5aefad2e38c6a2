//! The RS document envelope.

use crate::binding::{Bindable, BindingContext};
use crate::diagnostics::Severity;
use crate::factory::Representation;
use crate::field::Field;
use regex::Regex;
use serde_json::Value;
use std::sync::OnceLock;

/// `RS_ID` / `version` / `description` / `RS_instance`.
///
/// The payload type is chosen at bind time: the factory is asked for
/// `RS_ID` and the instance it returns is initialized from `RS_instance`.
/// Embedded representations are envelopes too, owned by their parent.
#[derive(Debug, Default)]
pub struct Envelope {
    pub rs_id: Field<String>,
    pub version: Field<String>,
    pub description: Field<String>,
    rs_instance: Option<Box<dyn Representation>>,
}

fn rs_id_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^RS\d{4}$").expect("RS_ID regex must compile"))
}

/// Whether `id` has the `RSnnnn` shape.
pub fn is_rs_id(id: &str) -> bool {
    rs_id_re().is_match(id)
}

impl Envelope {
    pub fn id(&self) -> Option<&str> {
        self.rs_id.present().map(String::as_str)
    }

    pub fn instance(&self) -> Option<&(dyn Representation + 'static)> {
        self.rs_instance.as_deref()
    }

    /// The payload as its concrete type.
    pub fn get<T: Representation>(&self) -> Option<&T> {
        self.instance()?.downcast_ref::<T>()
    }

    pub fn into_instance(self) -> Option<Box<dyn Representation>> {
        self.rs_instance
    }

    /// Follow a dotted chain of embedded-representation keys, e.g.
    /// `"motor_representation.drive_representation"`. An empty path is `self`.
    pub fn resolve(&self, path: &str) -> Option<&Envelope> {
        path.split('.')
            .filter(|segment| !segment.is_empty())
            .try_fold(self, |envelope, segment| {
                envelope.instance()?.embedded_representation(segment)
            })
    }
}

impl Bindable for Envelope {
    fn initialize(&mut self, node: &Value, cx: &mut BindingContext<'_>) {
        self.rs_id = cx.field(node, "RS_ID", true);
        self.version = cx.field(node, "version", false);
        self.description = cx.field(node, "description", false);

        let Field::Present(rs_id) = &self.rs_id else {
            return;
        };
        if !is_rs_id(rs_id) {
            cx.report(
                Severity::Warn,
                cx.path_of("RS_ID"),
                format!("'{rs_id}' is not of the form RSnnnn"),
            );
        }
        let Some(mut instance) = cx.factory().create(rs_id) else {
            cx.report(
                Severity::Warn,
                cx.path_of("RS_ID"),
                format!("no representation registered for '{rs_id}'"),
            );
            return;
        };
        tracing::debug!(rs_id = %rs_id, path = %cx.path(), "binding representation");

        match node.get("RS_instance") {
            Some(payload) if payload.is_object() => {
                cx.scoped("RS_instance", |cx| instance.initialize(payload, cx));
            }
            Some(Value::Null) | None => {
                cx.report(Severity::Warn, cx.path_of("RS_instance"), "missing required field");
            }
            Some(_) => {
                cx.report(
                    Severity::Error,
                    cx.path_of("RS_instance"),
                    "cannot convert field: expected an object",
                );
            }
        }
        self.rs_instance = Some(instance);
    }
}
