use crate::support::{
    apply_schema_dir, exit_with_load_error, load_config_or_exit, print_json,
};
use serde_json::{Value, json};
use tk205_io::{LoadError, Loader, read_document, schema_path};

pub fn run(config: Option<String>, path: String, schema_dir: Option<String>, json_output: bool) {
    let mut config = load_config_or_exit(config.as_deref());
    apply_schema_dir(&mut config, schema_dir);

    let document = read_document(&path).unwrap_or_else(|e| exit_with_load_error(e));
    let rs_id = document
        .get("RS_ID")
        .and_then(Value::as_str)
        .map(str::to_string);
    let schema = rs_id
        .as_deref()
        .map(|id| schema_path(&config.schema_dir, id));

    let loader = Loader::new(config);
    let errors = match loader.validate(&document) {
        Ok(()) => Vec::new(),
        Err(LoadError::Validation { errors, .. }) => errors,
        Err(e) => exit_with_load_error(e),
    };

    if json_output {
        print_json(&json!({
            "path": path,
            "rs_id": rs_id,
            "schema": schema.map(|p| p.display().to_string()),
            "valid": errors.is_empty(),
            "errors": errors,
        }));
    } else {
        println!("tk205 validate {path}");
        println!("  RS_ID: {}", rs_id.as_deref().unwrap_or("(none)"));
        if let Some(schema) = &schema {
            println!("  Schema: {}", schema.display());
        }
        if errors.is_empty() {
            println!("  Valid: yes");
        } else {
            println!("  Valid: no ({} error(s))", errors.len());
            for message in &errors {
                println!("    - {message}");
            }
        }
    }

    if !errors.is_empty() {
        std::process::exit(1);
    }
}
