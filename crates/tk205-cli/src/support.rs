use serde_json::{Value, json};
use std::path::PathBuf;
use tk205_io::{LoadError, LoaderConfig, Tk205Config};
use tk205_kernel::{Diagnostic, Envelope, PerformanceMap};

/// `[load]` from `--config`, or the defaults when no file is given.
pub fn load_config_or_exit(config: Option<&str>) -> LoaderConfig {
    let Some(path) = config else {
        return LoaderConfig::default();
    };
    Tk205Config::from_path(path)
        .map(|config| config.load)
        .unwrap_or_else(|e| {
            eprintln!("error: {e}");
            std::process::exit(1);
        })
}

pub fn apply_schema_dir(config: &mut LoaderConfig, schema_dir: Option<String>) {
    if let Some(dir) = schema_dir {
        config.schema_dir = PathBuf::from(dir);
    }
}

pub fn exit_with_load_error(err: LoadError) -> ! {
    eprintln!("error: {err}");
    if let LoadError::Validation { errors, .. } = &err {
        for message in errors {
            eprintln!("  - {message}");
        }
    }
    std::process::exit(1);
}

pub fn parse_target_or_exit(target: &str) -> Vec<f64> {
    parse_target(target).unwrap_or_else(|e| {
        eprintln!("error: {e}");
        std::process::exit(1);
    })
}

fn parse_target(target: &str) -> Result<Vec<f64>, String> {
    target
        .split(',')
        .map(str::trim)
        .map(|part| {
            part.parse::<f64>()
                .map_err(|_| format!("invalid target coordinate `{part}`"))
        })
        .collect()
}

pub fn print_json(payload: &Value) {
    println!(
        "{}",
        serde_json::to_string_pretty(payload).expect("json serialization")
    );
}

pub fn diagnostic_json(diagnostic: &Diagnostic) -> Value {
    json!({
        "severity": diagnostic.severity.as_str(),
        "path": diagnostic.path,
        "message": diagnostic.message,
    })
}

pub fn map_json(key: &str, map: &PerformanceMap) -> Value {
    let axes: Vec<Value> = map
        .axis_names()
        .enumerate()
        .map(|(i, name)| {
            json!({
                "name": name,
                "points": map.axis(i).map_or(0, <[f64]>::len),
            })
        })
        .collect();
    json!({
        "key": key,
        "ready": map.is_ready(),
        "axes": axes,
        "tables": map.table_names().collect::<Vec<_>>(),
        "point_count": map.point_count(),
    })
}

/// The envelope with its maps and, recursively, its embedded representations.
pub fn representation_json(envelope: &Envelope) -> Value {
    let Some(instance) = envelope.instance() else {
        return json!({"rs_id": envelope.id(), "bound": false});
    };
    let maps: Vec<Value> = instance
        .performance_maps()
        .into_iter()
        .map(|(key, map)| map_json(key, map))
        .collect();
    let embedded: Vec<Value> = instance
        .embedded()
        .into_iter()
        .map(|(key, inner)| json!({"key": key, "representation": representation_json(inner)}))
        .collect();
    json!({
        "rs_id": envelope.id(),
        "bound": true,
        "performance_maps": maps,
        "embedded": embedded,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn target_parses_comma_separated_coordinates() {
        assert_eq!(parse_target("1, 2.5,-3").unwrap(), vec![1.0, 2.5, -3.0]);
        assert!(parse_target("1,,2").is_err());
        assert_eq!(
            parse_target("0.5,fast").unwrap_err(),
            "invalid target coordinate `fast`"
        );
    }
}
