//! Reading documents into typed representations.

use crate::config::LoaderConfig;
use crate::error::LoadError;
use crate::format::read_document;
use crate::schema::{SchemaValidator, schema_path};
use serde_json::Value;
use std::path::Path;
use std::sync::Arc;
use tk205_kernel::{
    BindingContext, DiagnosticCounts, DiagnosticSink, Representation, RsFactory, TracingSink,
};
use tk205_rs::{Ashrae205, default_factory};

/// Owns everything a load needs: the factory, the diagnostic sink and the
/// configuration. Nothing is process-global.
pub struct Loader {
    factory: RsFactory,
    sink: Arc<dyn DiagnosticSink>,
    config: LoaderConfig,
}

impl Default for Loader {
    fn default() -> Self {
        Self::new(LoaderConfig::default())
    }
}

impl std::fmt::Debug for Loader {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Loader")
            .field("factory", &self.factory)
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl Loader {
    /// A loader over every built-in representation, reporting through
    /// `tracing` and escalating at `config.escalate_at`.
    pub fn new(config: LoaderConfig) -> Self {
        Self {
            factory: default_factory(),
            sink: Arc::new(TracingSink::with_threshold(config.escalate_at)),
            config,
        }
    }

    pub fn with_factory(mut self, factory: RsFactory) -> Self {
        self.factory = factory;
        self
    }

    /// Replace the sink. The sink alone decides escalation afterwards.
    pub fn with_sink(mut self, sink: Arc<dyn DiagnosticSink>) -> Self {
        self.sink = sink;
        self
    }

    pub fn factory(&self) -> &RsFactory {
        &self.factory
    }

    pub fn config(&self) -> &LoaderConfig {
        &self.config
    }

    /// Read a document and, when configured, validate it against the schema
    /// selected by its `RS_ID`.
    pub fn load_document(&self, path: impl AsRef<Path>) -> Result<Value, LoadError> {
        let document = read_document(path.as_ref())?;
        if self.config.validate {
            self.validate(&document)?;
        }
        Ok(document)
    }

    /// Validate `document` against `<schema_dir>/<RS_ID>.schema.json`.
    pub fn validate(&self, document: &Value) -> Result<(), LoadError> {
        let Some(rs_id) = document.get("RS_ID").and_then(Value::as_str) else {
            return Err(LoadError::Validation {
                schema: self.config.schema_dir.clone(),
                errors: vec!["(root): no RS_ID to select a schema".to_string()],
            });
        };
        let validator = SchemaValidator::from_path(schema_path(&self.config.schema_dir, rs_id))?;
        validator.validate(document)
    }

    /// Bind an in-memory document.
    pub fn bind(&self, document: &Value) -> Result<(Ashrae205, DiagnosticCounts), LoadError> {
        let mut cx = BindingContext::new(&self.factory, self.sink.as_ref())
            .with_extrapolation(self.config.extrapolation);
        let envelope: Ashrae205 = cx.bind(document);
        let counts = cx.finish().map_err(LoadError::Escalated)?;
        Ok((envelope, counts))
    }

    /// Load a document of any registered type, with the diagnostic tally.
    pub fn load_with_counts(
        &self,
        path: impl AsRef<Path>,
    ) -> Result<(Ashrae205, DiagnosticCounts), LoadError> {
        let path = path.as_ref();
        let document = self.load_document(path)?;
        let (envelope, counts) = self.bind(&document)?;
        tracing::debug!(
            path = %path.display(),
            rs_id = envelope.id().unwrap_or_default(),
            diagnostics = counts.total(),
            "loaded document"
        );
        Ok((envelope, counts))
    }

    /// Load a document of any registered type.
    pub fn load(&self, path: impl AsRef<Path>) -> Result<Ashrae205, LoadError> {
        self.load_with_counts(path).map(|(envelope, _)| envelope)
    }

    /// Load a document that must be of type `T`.
    pub fn load_rs<T: Representation + Default>(
        &self,
        path: impl AsRef<Path>,
    ) -> Result<T, LoadError> {
        let path = path.as_ref();
        let expected = T::default().rs_id();
        let unexpected = |found: &str| LoadError::UnexpectedType {
            path: path.to_path_buf(),
            expected,
            found: found.to_string(),
        };

        let document = self.load_document(path)?;
        let found = document
            .get("RS_ID")
            .and_then(Value::as_str)
            .unwrap_or_default();
        if found != expected {
            return Err(unexpected(found));
        }
        let (envelope, _) = self.bind(&document)?;
        envelope
            .into_instance()
            .and_then(|instance| instance.downcast::<T>())
            .map(|instance| *instance)
            .ok_or_else(|| unexpected(found))
    }

    /// Create and initialize a payload of type `rs_id` from its
    /// `RS_instance` object. `None` when the type is not registered.
    pub fn create(
        &self,
        rs_id: &str,
        payload: &Value,
    ) -> Result<Option<Box<dyn Representation>>, LoadError> {
        let Some(mut instance) = self.factory.create(rs_id) else {
            return Ok(None);
        };
        let mut cx = BindingContext::new(&self.factory, self.sink.as_ref())
            .with_extrapolation(self.config.extrapolation);
        instance.initialize(payload, &mut cx);
        cx.finish().map_err(LoadError::Escalated)?;
        Ok(Some(instance))
    }
}
