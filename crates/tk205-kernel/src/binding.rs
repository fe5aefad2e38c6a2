//! The field-binding contract.
//!
//! Typed representation objects are populated from a loosely-typed document
//! node by calling one of the `BindingContext` binders per field:
//!
//! | document                    | result              | diagnostic            |
//! |-----------------------------|---------------------|-----------------------|
//! | key present, converts       | `Present(value)`    | none                  |
//! | key absent (or `null`)      | `Absent(default)`   | `Warn` when required  |
//! | key present, fails to parse | `Absent(default)`   | `Error`               |
//!
//! Binding never stops early. Every diagnostic carries the dotted path of the
//! field it concerns, and the sink decides whether any of them is fatal.

use crate::diagnostics::{Diagnostic, DiagnosticSink, Disposition, Severity};
use crate::envelope::Envelope;
use crate::factory::RsFactory;
use crate::field::Field;
use serde::Deserialize;
use serde::de::DeserializeOwned;
use serde_json::Value;
use tk205_grid::Extrapolation;

/// An object that can be populated from a document node.
///
/// `Default` yields the all-absent state. The binders call `initialize` once,
/// on a fresh default; that is a convention, not a type-level guarantee.
pub trait Bindable: Default {
    fn initialize(&mut self, node: &Value, cx: &mut BindingContext<'_>);
}

/// Per-severity tally of the diagnostics raised during one binding pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DiagnosticCounts {
    pub debug: usize,
    pub info: usize,
    pub warn: usize,
    pub error: usize,
}

impl DiagnosticCounts {
    fn record(&mut self, severity: Severity) {
        match severity {
            Severity::Debug => self.debug += 1,
            Severity::Info => self.info += 1,
            Severity::Warn => self.warn += 1,
            Severity::Error => self.error += 1,
        }
    }

    pub fn total(&self) -> usize {
        self.debug + self.info + self.warn + self.error
    }

    pub fn at_least(&self, severity: Severity) -> usize {
        Severity::ALL
            .iter()
            .filter(|s| **s >= severity)
            .map(|s| match s {
                Severity::Debug => self.debug,
                Severity::Info => self.info,
                Severity::Warn => self.warn,
                Severity::Error => self.error,
            })
            .sum()
    }
}

/// State threaded through one binding pass.
///
/// Holds the factory used to build embedded representations, the sink that
/// receives diagnostics, the path of the node currently being bound, and
/// the interpolation policy handed to every performance map.
pub struct BindingContext<'a> {
    factory: &'a RsFactory,
    sink: &'a dyn DiagnosticSink,
    path: Vec<String>,
    extrapolation: Extrapolation,
    counts: DiagnosticCounts,
    escalated: Option<Diagnostic>,
}

impl<'a> BindingContext<'a> {
    pub fn new(factory: &'a RsFactory, sink: &'a dyn DiagnosticSink) -> Self {
        Self {
            factory,
            sink,
            path: Vec::new(),
            extrapolation: Extrapolation::default(),
            counts: DiagnosticCounts::default(),
            escalated: None,
        }
    }

    pub fn with_extrapolation(mut self, extrapolation: Extrapolation) -> Self {
        self.extrapolation = extrapolation;
        self
    }

    pub fn factory(&self) -> &'a RsFactory {
        self.factory
    }

    pub fn extrapolation(&self) -> Extrapolation {
        self.extrapolation
    }

    /// Dotted path of the node currently being bound.
    pub fn path(&self) -> String {
        self.path.join(".")
    }

    /// Dotted path of `key` under the current node.
    pub fn path_of(&self, key: &str) -> String {
        if self.path.is_empty() {
            key.to_string()
        } else {
            format!("{}.{key}", self.path())
        }
    }

    pub fn counts(&self) -> DiagnosticCounts {
        self.counts
    }

    /// First diagnostic the sink escalated, if any.
    pub fn escalated(&self) -> Option<&Diagnostic> {
        self.escalated.as_ref()
    }

    pub fn report(&mut self, severity: Severity, path: impl Into<String>, message: impl Into<String>) {
        let diagnostic = Diagnostic::new(severity, path, message);
        self.counts.record(severity);
        if self.sink.report(&diagnostic) == Disposition::Escalate && self.escalated.is_none() {
            self.escalated = Some(diagnostic);
        }
    }

    /// Report against the current node.
    pub fn diagnose(&mut self, severity: Severity, message: impl Into<String>) {
        let path = self.path();
        self.report(severity, path, message);
    }

    /// Run `f` with `segment` pushed onto the field path.
    pub fn scoped<R>(&mut self, segment: impl Into<String>, f: impl FnOnce(&mut Self) -> R) -> R {
        self.path.push(segment.into());
        let result = f(self);
        self.path.pop();
        result
    }

    /// Bind a whole object from `node`.
    pub fn bind<T: Bindable>(&mut self, node: &Value) -> T {
        let mut value = T::default();
        value.initialize(node, self);
        value
    }

    /// Bind a scalar, string, enum or array field.
    pub fn field<T>(&mut self, node: &Value, key: &str, required: bool) -> Field<T>
    where
        T: DeserializeOwned + Default,
    {
        let Some(value) = self.lookup(node, key, required) else {
            return Field::absent();
        };
        match T::deserialize(value) {
            Ok(parsed) => Field::Present(parsed),
            Err(err) => {
                self.report(
                    Severity::Error,
                    self.path_of(key),
                    format!("cannot convert field: {err}"),
                );
                Field::absent()
            }
        }
    }

    /// Bind a nested object.
    pub fn object<T: Bindable>(&mut self, node: &Value, key: &str, required: bool) -> Field<T> {
        let Some(value) = self.lookup(node, key, required) else {
            return Field::absent();
        };
        if !value.is_object() {
            self.not_an_object(key, value);
            return Field::absent();
        }
        Field::Present(self.scoped(key, |cx| cx.bind(value)))
    }

    /// Bind an array of nested objects. Elements that are not objects are
    /// reported and skipped.
    pub fn objects<T: Bindable>(&mut self, node: &Value, key: &str, required: bool) -> Field<Vec<T>> {
        let Some(value) = self.lookup(node, key, required) else {
            return Field::absent();
        };
        let Some(items) = value.as_array() else {
            self.report(
                Severity::Error,
                self.path_of(key),
                format!("cannot convert field: expected an array, found {}", kind(value)),
            );
            return Field::absent();
        };
        let mut bound = Vec::with_capacity(items.len());
        for (index, item) in items.iter().enumerate() {
            let segment = format!("{key}[{index}]");
            if item.is_object() {
                bound.push(self.scoped(segment, |cx| cx.bind(item)));
            } else {
                self.not_an_object(&segment, item);
            }
        }
        Field::Present(bound)
    }

    /// Bind an embedded representation: a complete envelope of type `rs_id`.
    ///
    /// The result is present only when the factory produced an instance of
    /// that type. An envelope naming any other type is reported and dropped.
    pub fn representation(
        &mut self,
        node: &Value,
        key: &str,
        rs_id: &str,
        required: bool,
    ) -> Field<Envelope> {
        let Some(value) = self.lookup(node, key, required) else {
            return Field::absent();
        };
        if !value.is_object() {
            self.not_an_object(key, value);
            return Field::absent();
        }
        let envelope: Envelope = self.scoped(key, |cx| cx.bind(value));
        if envelope.instance().is_none() {
            return Field::absent();
        }
        match envelope.id() {
            Some(found) if found == rs_id => Field::Present(envelope),
            found => {
                self.report(
                    Severity::Warn,
                    format!("{}.RS_ID", self.path_of(key)),
                    format!(
                        "expected an {rs_id} representation, found {}",
                        found.unwrap_or("none")
                    ),
                );
                Field::absent()
            }
        }
    }

    /// End the pass: the tally, or the first escalated diagnostic.
    pub fn finish(self) -> Result<DiagnosticCounts, Diagnostic> {
        match self.escalated {
            Some(diagnostic) => Err(diagnostic),
            None => Ok(self.counts),
        }
    }

    fn lookup<'v>(&mut self, node: &'v Value, key: &str, required: bool) -> Option<&'v Value> {
        match node.get(key) {
            Some(Value::Null) | None => {
                if required {
                    self.report(Severity::Warn, self.path_of(key), "missing required field");
                }
                None
            }
            Some(value) => Some(value),
        }
    }

    fn not_an_object(&mut self, key: &str, value: &Value) {
        self.report(
            Severity::Error,
            self.path_of(key),
            format!("cannot convert field: expected an object, found {}", kind(value)),
        );
    }
}

fn kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diagnostics::CollectingSink;
    use serde_json::json;

    #[derive(Debug, Default)]
    struct Nozzle {
        diameter: Field<f64>,
        label: Field<String>,
    }

    impl Bindable for Nozzle {
        fn initialize(&mut self, node: &Value, cx: &mut BindingContext<'_>) {
            self.diameter = cx.field(node, "diameter", true);
            self.label = cx.field(node, "label", false);
        }
    }

    #[derive(Debug, Default)]
    struct Assembly {
        rated_flow: Field<f64>,
        stages: Field<i32>,
        nozzle: Field<Nozzle>,
        nozzles: Field<Vec<Nozzle>>,
    }

    impl Bindable for Assembly {
        fn initialize(&mut self, node: &Value, cx: &mut BindingContext<'_>) {
            self.rated_flow = cx.field(node, "rated_flow", true);
            self.stages = cx.field(node, "stages", false);
            self.nozzle = cx.object(node, "nozzle", false);
            self.nozzles = cx.objects(node, "nozzles", false);
        }
    }

    fn bind(node: Value, sink: &CollectingSink) -> (Assembly, DiagnosticCounts) {
        let factory = RsFactory::new();
        let mut cx = BindingContext::new(&factory, sink);
        let assembly: Assembly = cx.bind(&node);
        let counts = cx.finish().expect("no escalation");
        (assembly, counts)
    }

    #[test]
    fn present_field_binds_value() {
        let sink = CollectingSink::new();
        let (assembly, counts) = bind(json!({"rated_flow": 0.25, "stages": 0}), &sink);
        assert_eq!(assembly.rated_flow, Field::Present(0.25));
        assert_eq!(assembly.stages, Field::Present(0));
        assert_eq!(counts.total(), 0);
    }

    #[test]
    fn every_bind_starts_from_the_absent_state() {
        let factory = RsFactory::new();
        let sink = CollectingSink::new();
        let mut cx = BindingContext::new(&factory, &sink);
        let first: Assembly = cx.bind(&json!({"rated_flow": 2.0, "stages": 3}));
        let second: Assembly = cx.bind(&json!({"stages": 5}));
        assert_eq!(first.rated_flow, Field::Present(2.0));
        assert_eq!(second.rated_flow, Field::Absent(0.0));
        assert_eq!(second.stages, Field::Present(5));
        assert_eq!(cx.finish().expect("no escalation").warn, 1);
    }

    #[test]
    fn missing_optional_field_is_silent() {
        let sink = CollectingSink::new();
        let (assembly, _) = bind(json!({"rated_flow": 1.0}), &sink);
        assert_eq!(assembly.stages, Field::Absent(0));
        assert!(!assembly.nozzle.is_present());
        assert!(sink.diagnostics().is_empty());
    }

    #[test]
    fn missing_required_field_warns_with_path() {
        let sink = CollectingSink::new();
        let (assembly, counts) = bind(json!({"nozzle": {"label": "A"}}), &sink);
        assert!(!assembly.rated_flow.is_present());
        assert_eq!(counts.warn, 2);

        let paths: Vec<String> = sink.diagnostics().into_iter().map(|d| d.path).collect();
        assert_eq!(paths, vec!["rated_flow", "nozzle.diameter"]);
        let nozzle = assembly.nozzle.present().expect("nozzle bound");
        assert_eq!(nozzle.label, Field::Present("A".to_string()));
    }

    #[test]
    fn null_counts_as_absent() {
        let sink = CollectingSink::new();
        let (assembly, counts) = bind(json!({"rated_flow": null}), &sink);
        assert_eq!(assembly.rated_flow, Field::Absent(0.0));
        assert_eq!(counts.warn, 1);
        assert_eq!(counts.error, 0);
    }

    #[test]
    fn conversion_failure_is_an_error_and_absent() {
        let sink = CollectingSink::new();
        let (assembly, counts) = bind(json!({"rated_flow": "fast", "nozzle": 3}), &sink);
        assert_eq!(assembly.rated_flow, Field::Absent(0.0));
        assert!(!assembly.nozzle.is_present());
        assert_eq!(counts.error, 2);

        let errors = sink.at_least(Severity::Error);
        assert_eq!(errors[0].path, "rated_flow");
        assert!(errors[0].message.starts_with("cannot convert field"));
        insta::assert_snapshot!(
            errors[1].to_string(),
            @"ERROR: nozzle: cannot convert field: expected an object, found a number"
        );
    }

    #[test]
    fn array_elements_carry_indexed_paths() {
        let sink = CollectingSink::new();
        let (assembly, _) = bind(
            json!({"rated_flow": 1.0, "nozzles": [{"diameter": 0.1}, {}, "bad"]}),
            &sink,
        );
        let nozzles = assembly.nozzles.present().expect("array bound");
        assert_eq!(nozzles.len(), 2);
        assert_eq!(nozzles[0].diameter, Field::Present(0.1));

        let paths: Vec<String> = sink.diagnostics().into_iter().map(|d| d.path).collect();
        assert_eq!(paths, vec!["nozzles[1].diameter", "nozzles[2]"]);
    }

    #[test]
    fn escalation_keeps_binding_and_fails_finish() {
        let factory = RsFactory::new();
        let sink = CollectingSink::escalating_at(Severity::Warn);
        let mut cx = BindingContext::new(&factory, &sink);
        let assembly: Assembly = cx.bind(&json!({"stages": 4}));
        assert_eq!(assembly.stages, Field::Present(4));

        let escalated = cx.finish().expect_err("missing required field escalates");
        assert_eq!(escalated.path, "rated_flow");
        assert_eq!(escalated.severity, Severity::Warn);
    }

    #[test]
    fn counts_at_least() {
        let counts = DiagnosticCounts {
            debug: 1,
            info: 2,
            warn: 3,
            error: 4,
        };
        assert_eq!(counts.at_least(Severity::Warn), 7);
        assert_eq!(counts.at_least(Severity::Debug), 10);
    }
}
