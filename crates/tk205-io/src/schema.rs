//! JSON Schema validation of raw documents.
//!
//! Schemas are looked up by convention: `<schema_dir>/<RS_ID>.schema.json`.

use crate::error::LoadError;
use serde_json::Value;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

pub struct SchemaValidator {
    path: PathBuf,
    validator: jsonschema::Validator,
}

/// Conventional location of the schema for `rs_id`.
pub fn schema_path(schema_dir: impl AsRef<Path>, rs_id: &str) -> PathBuf {
    schema_dir.as_ref().join(format!("{rs_id}.schema.json"))
}

impl SchemaValidator {
    /// Read and compile a schema file.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, LoadError> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|e| LoadError::Schema {
            schema: path.to_path_buf(),
            message: e.to_string(),
        })?;
        let schema: Value = serde_json::from_str(&text).map_err(|e| LoadError::Schema {
            schema: path.to_path_buf(),
            message: e.to_string(),
        })?;
        Self::from_value(path, &schema)
    }

    /// Compile an in-memory schema; `path` only labels errors.
    pub fn from_value(path: impl Into<PathBuf>, schema: &Value) -> Result<Self, LoadError> {
        let path = path.into();
        let validator = jsonschema::validator_for(schema).map_err(|e| LoadError::Schema {
            schema: path.clone(),
            message: e.to_string(),
        })?;
        Ok(Self { path, validator })
    }

    /// The schema for `rs_id` under `schema_dir`.
    pub fn for_rs_id(schema_dir: impl AsRef<Path>, rs_id: &str) -> Result<Self, LoadError> {
        Self::from_path(schema_path(schema_dir, rs_id))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Every violation as `"<instance path>: <message>"`.
    pub fn errors(&self, document: &Value) -> Vec<String> {
        self.validator
            .iter_errors(document)
            .map(|e| {
                let location = e.instance_path.to_string();
                let location = if location.is_empty() {
                    "(root)".to_string()
                } else {
                    location
                };
                format!("{location}: {e}")
            })
            .collect()
    }

    pub fn is_valid(&self, document: &Value) -> bool {
        self.validator.is_valid(document)
    }

    pub fn validate(&self, document: &Value) -> Result<(), LoadError> {
        let errors = self.errors(document);
        if errors.is_empty() {
            Ok(())
        } else {
            Err(LoadError::Validation {
                schema: self.path.clone(),
                errors,
            })
        }
    }
}

impl fmt::Debug for SchemaValidator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SchemaValidator")
            .field("path", &self.path)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn validator() -> SchemaValidator {
        SchemaValidator::from_value(
            "inline.schema.json",
            &json!({
                "type": "object",
                "required": ["RS_ID", "RS_instance"],
                "properties": {
                    "RS_ID": {"type": "string", "pattern": "^RS[0-9]{4}$"},
                    "RS_instance": {
                        "type": "object",
                        "properties": {"speed_ratio": {"type": "number"}}
                    }
                }
            }),
        )
        .expect("schema compiles")
    }

    #[test]
    fn conforming_document_passes() {
        let validator = validator();
        let document = json!({"RS_ID": "RS0007", "RS_instance": {"speed_ratio": 0.5}});
        assert!(validator.is_valid(&document));
        assert!(validator.validate(&document).is_ok());
    }

    #[test]
    fn violations_carry_instance_paths() {
        let validator = validator();
        let document = json!({"RS_ID": "chiller", "RS_instance": {"speed_ratio": "fast"}});
        let err = validator.validate(&document).unwrap_err();
        let LoadError::Validation { schema, errors } = err else {
            panic!("expected a validation error");
        };
        assert_eq!(schema, PathBuf::from("inline.schema.json"));
        assert_eq!(errors.len(), 2);
        assert!(errors.iter().any(|e| e.starts_with("/RS_ID: ")));
        assert!(errors.iter().any(|e| e.starts_with("/RS_instance/speed_ratio: ")));
    }

    #[test]
    fn root_violations_are_labelled() {
        let errors = validator().errors(&json!({"RS_ID": "RS0007"}));
        assert_eq!(errors.len(), 1);
        assert!(errors[0].starts_with("(root): "));
    }

    #[test]
    fn malformed_schema_is_rejected() {
        let err = SchemaValidator::from_value("bad.schema.json", &json!({"type": 12})).unwrap_err();
        assert!(matches!(err, LoadError::Schema { .. }));
    }

    #[test]
    fn schema_path_follows_convention() {
        assert_eq!(
            schema_path("schema", "RS0005"),
            PathBuf::from("schema/RS0005.schema.json")
        );
    }
}
