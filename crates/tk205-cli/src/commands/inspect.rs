use crate::support::{
    apply_schema_dir, diagnostic_json, exit_with_load_error, load_config_or_exit, print_json,
    representation_json,
};
use serde_json::{Value, json};
use std::sync::Arc;
use tk205_io::{FileFormat, Loader, document_digest};
use tk205_kernel::{CollectingSink, Envelope, Severity};
use tk205_rs::Ashrae205Ext;
use tk205_rs::common::Metadata;

pub struct Args {
    pub config: Option<String>,
    pub path: String,
    pub validate: bool,
    pub schema_dir: Option<String>,
    pub escalate_at: Option<Severity>,
    pub json: bool,
}

pub fn run(args: Args) {
    let mut config = load_config_or_exit(args.config.as_deref());
    apply_schema_dir(&mut config, args.schema_dir);
    config.validate |= args.validate;
    if args.escalate_at.is_some() {
        config.escalate_at = args.escalate_at;
    }

    let sink = Arc::new(match config.escalate_at {
        Some(severity) => CollectingSink::escalating_at(severity),
        None => CollectingSink::new(),
    });
    let format = FileFormat::from_path(&args.path).unwrap_or_else(|e| exit_with_load_error(e));
    let loader = Loader::new(config).with_sink(sink.clone());
    let document = loader
        .load_document(&args.path)
        .unwrap_or_else(|e| exit_with_load_error(e));
    let digest = document_digest(&document);
    let (envelope, counts) = loader
        .bind(&document)
        .unwrap_or_else(|e| exit_with_load_error(e));
    let diagnostics = sink.diagnostics();

    if args.json {
        print_json(&json!({
            "path": args.path,
            "format": format.extension(),
            "digest": digest,
            "rs_id": envelope.id(),
            "version": envelope.version.present(),
            "description": envelope.description.present(),
            "metadata": envelope.metadata().map(metadata_json),
            "representation": representation_json(&envelope),
            "diagnostic_counts": {
                "debug": counts.debug,
                "info": counts.info,
                "warn": counts.warn,
                "error": counts.error,
            },
            "diagnostics": diagnostics.iter().map(diagnostic_json).collect::<Vec<_>>(),
        }));
        return;
    }

    println!("tk205 inspect {}", args.path);
    println!("  Format: {format}");
    println!("  Digest: {digest}");
    println!("  RS_ID: {}", envelope.id().unwrap_or("(none)"));
    if let Some(description) = envelope.description.present() {
        println!("  Description: {description}");
    }
    if let Some(metadata) = envelope.metadata() {
        println!(
            "  Schema version: {}",
            metadata.schema_version.present().map_or("(none)", String::as_str)
        );
        if let Some(timestamp) = metadata.data_timestamp.present() {
            println!("  Data timestamp: {}", timestamp.to_rfc3339());
        }
    }
    print_representation(&envelope, 1);
    println!(
        "  Diagnostics: {} warning(s), {} error(s)",
        counts.warn, counts.error
    );
    for diagnostic in diagnostics.iter().filter(|d| d.severity >= Severity::Warn) {
        println!("    - {diagnostic}");
    }
}

fn metadata_json(metadata: &Metadata) -> Value {
    json!({
        "schema": metadata.schema.present(),
        "schema_version": metadata.schema_version.present(),
        "description": metadata.description.present(),
        "id": metadata.id.present().map(ToString::to_string),
        "data_timestamp": metadata.data_timestamp.present().map(|t| t.to_rfc3339()),
        "data_version": metadata.data_version.present(),
        "data_source": metadata.data_source.present(),
    })
}

fn print_representation(envelope: &Envelope, depth: usize) {
    let indent = "  ".repeat(depth);
    let Some(instance) = envelope.instance() else {
        println!("{indent}(no payload bound)");
        return;
    };
    for (key, map) in instance.performance_maps() {
        let axes: Vec<String> = map
            .axis_names()
            .enumerate()
            .map(|(i, name)| format!("{name}[{}]", map.axis(i).map_or(0, <[f64]>::len)))
            .collect();
        println!(
            "{indent}Map {key}: {} ({})",
            axes.join(" x "),
            if map.is_ready() { "ready" } else { "not built" }
        );
        println!(
            "{indent}  Tables: {}",
            map.table_names().collect::<Vec<_>>().join(", ")
        );
    }
    for (key, inner) in instance.embedded() {
        println!("{indent}Embedded {key}: {}", inner.id().unwrap_or("(none)"));
        print_representation(inner, depth + 1);
    }
}
