use crate::support::{exit_with_load_error, load_config_or_exit, parse_target_or_exit, print_json};
use serde_json::{Map, Value, json};
use tk205_io::Loader;
use tk205_kernel::Extrapolation;

pub struct Args {
    pub config: Option<String>,
    pub path: String,
    pub map: String,
    pub embedded: Option<String>,
    pub target: String,
    pub extrapolation: Option<Extrapolation>,
    pub json: bool,
}

pub fn run(args: Args) {
    let mut config = load_config_or_exit(args.config.as_deref());
    if let Some(extrapolation) = args.extrapolation {
        config.extrapolation = extrapolation;
    }
    let target = parse_target_or_exit(&args.target);

    let document = Loader::new(config)
        .load(&args.path)
        .unwrap_or_else(|e| exit_with_load_error(e));
    let embedded = args.embedded.as_deref().unwrap_or_default();
    let Some(envelope) = document.resolve(embedded) else {
        eprintln!("error: no embedded representation at `{embedded}`");
        std::process::exit(1);
    };
    let Some(instance) = envelope.instance() else {
        eprintln!(
            "error: no payload bound for {}",
            envelope.id().unwrap_or("(missing RS_ID)")
        );
        std::process::exit(1);
    };
    let Some(map) = instance.performance_map(&args.map) else {
        let available: Vec<&str> = instance
            .performance_maps()
            .into_iter()
            .map(|(key, _)| key)
            .collect();
        eprintln!(
            "error: {} has no performance map `{}` (available: {})",
            instance.rs_id(),
            args.map,
            if available.is_empty() {
                "none".to_string()
            } else {
                available.join(", ")
            }
        );
        std::process::exit(1);
    };
    let values = map.calculate_named(&target).unwrap_or_else(|e| {
        eprintln!("error: {e}");
        std::process::exit(1);
    });

    if args.json {
        let named: Map<String, Value> = values
            .iter()
            .map(|(name, value)| (name.to_string(), json!(value)))
            .collect();
        print_json(&json!({
            "path": args.path,
            "rs_id": instance.rs_id(),
            "embedded": args.embedded,
            "map": args.map,
            "target": target,
            "values": named,
        }));
    } else {
        println!("tk205 calc {} --map {}", args.path, args.map);
        println!("  RS_ID: {}", instance.rs_id());
        println!("  Target: {target:?}");
        for (name, value) in &values {
            println!("  {name} = {value}");
        }
    }
}
