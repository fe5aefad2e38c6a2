use serde_json::{Value, json};
use tk205_kernel::{BindingContext, CollectingSink, Envelope, Field, PerformanceMapError, Severity};
use tk205_rs::common::SpeedControlType;
use tk205_rs::rs0003::FanPerformanceMap;
use tk205_rs::{Ashrae205, Ashrae205Ext, default_factory};

fn metadata(schema: &str) -> Value {
    json!({
        "data_model": "ASHRAE_205",
        "schema": schema,
        "schema_version": "1.0.0",
        "description": format!("{schema} test document"),
        "id": "3f2b7c9e-1a44-4f0a-9d55-6b1c2e8a0f01",
        "data_timestamp": "2021-03-02T12:00:00Z",
        "data_version": 1
    })
}

fn drive() -> Value {
    json!({
        "RS_ID": "RS0006",
        "RS_instance": {
            "metadata": metadata("RS0006"),
            "performance": {
                "maximum_power": 7000.0,
                "standby_power": 10.0,
                "cooling_method": "FORCED_AIR",
                "performance_map": {
                    "grid_variables": {"output_power": [2000.0, 5000.0, 6100.0]},
                    "lookup_variables": {"efficiency": [0.95, 0.984, 0.986]}
                }
            }
        }
    })
}

fn motor(drive: Value) -> Value {
    json!({
        "RS_ID": "RS0005",
        "RS_instance": {
            "metadata": metadata("RS0005"),
            "performance": {
                "maximum_power": 6000.0,
                "standby_power": 0.0,
                "number_of_poles": 4,
                "drive_representation": drive,
                "performance_map": {
                    "grid_variables": {
                        "shaft_power": [500.0, 5000.0],
                        "shaft_rotational_speed": [900.0, 1800.0]
                    },
                    "lookup_variables": {
                        "efficiency": [0.80, 0.82, 0.90, 0.92],
                        "power_factor": [0.7, 0.72, 0.85, 0.86]
                    }
                }
            }
        }
    })
}

fn fan(control: &str, performance_map: Value) -> Value {
    json!({
        "RS_ID": "RS0003",
        "RS_instance": {
            "metadata": metadata("RS0003"),
            "performance": {
                "nominal_standard_air_volumetric_flow_rate": 1.5,
                "is_enclosed": true,
                "motor_representation": motor(drive()),
                "operation_speed_control_type": control,
                "installation_speed_control_type": "FIXED",
                "performance_map": performance_map
            }
        }
    })
}

fn bind(document: &Value, sink: &CollectingSink) -> Ashrae205 {
    let factory = default_factory();
    let mut cx = BindingContext::new(&factory, sink);
    cx.bind(document)
}

#[test]
fn motor_embedded_drive_evaluates() {
    let sink = CollectingSink::new();
    let document = bind(&motor(drive()), &sink);
    assert!(sink.diagnostics().is_empty(), "{:?}", sink.diagnostics());

    let motor = document.get_rs0005().expect("motor payload");
    let performance = motor.performance.present().expect("performance");
    assert_eq!(performance.number_of_poles, Field::Present(4));
    let metadata = document.metadata().expect("motor metadata");
    assert_eq!(metadata.schema.value(), "RS0005");
    assert_eq!(metadata.data_version, Field::Present(1));

    let drive = performance
        .drive_representation
        .get_rs0006()
        .expect("embedded drive");
    let efficiency = drive
        .performance
        .value()
        .performance_map
        .value()
        .calculate_performance(&[5550.0])
        .expect("evaluate");
    assert_eq!(efficiency.len(), 1);
    assert!((efficiency[0] - 0.985).abs() < 1e-9);

    assert!(document.get_rs0006().is_none());
    assert_eq!(
        document.instance().expect("payload").embedded()[0].0,
        "drive_representation"
    );
}

#[test]
fn continuous_fan_binds_continuous_layout() {
    let sink = CollectingSink::new();
    let document = bind(
        &fan(
            "CONTINUOUS",
            json!({
                "grid_variables": {
                    "standard_air_volumetric_flow_rate": [0.5, 2.0],
                    "static_pressure_difference": [100.0, 500.0]
                },
                "lookup_variables": {
                    "impeller_rotational_speed": [10.0, 14.0, 20.0, 24.0],
                    "shaft_power": [100.0, 300.0, 400.0, 1200.0]
                }
            }),
        ),
        &sink,
    );
    let fan = document.get_rs0003().expect("fan payload");
    let map = fan.performance.value().performance_map.present().expect("map");
    assert!(matches!(map, FanPerformanceMap::Continuous(_)));
    let values = map.calculate_performance(&[2.0, 100.0]).expect("evaluate");
    assert_eq!(values, vec![20.0, 400.0]);
}

#[test]
fn discrete_fan_binds_discrete_layout() {
    let sink = CollectingSink::new();
    let document = bind(
        &fan(
            "DISCRETE",
            json!({
                "grid_variables": {
                    "speed_number": [1, 2],
                    "static_pressure_difference": [100.0, 500.0]
                },
                "lookup_variables": {
                    "standard_air_volumetric_flow_rate": [1.0, 0.8, 2.0, 1.7],
                    "shaft_power": [150.0, 250.0, 600.0, 900.0],
                    "impeller_rotational_speed": [12.0, 12.0, 24.0, 24.0]
                }
            }),
        ),
        &sink,
    );
    let fan = document.get_rs0003().expect("fan payload");
    let performance = fan.performance.value();
    assert_eq!(
        performance.operation_speed_control_type,
        Field::Present(SpeedControlType::Discrete)
    );
    let map = performance.performance_map.present().expect("map");
    assert_eq!(map.speed_control_type(), SpeedControlType::Discrete);
    assert_eq!(
        map.map().axis_names().collect::<Vec<_>>(),
        vec!["speed_number", "static_pressure_difference"]
    );
    assert_eq!(map.calculate_performance(&[2.0, 500.0]).expect("evaluate")[1], 900.0);

    // fan -> motor -> drive
    let drive = document
        .resolve("motor_representation.drive_representation")
        .and_then(|envelope| envelope.get_rs0006())
        .expect("deeply embedded drive");
    assert!(drive.performance.value().performance_map.value().map().is_ready());
}

#[test]
fn unknown_embedded_type_is_absent_and_warned() {
    let sink = CollectingSink::new();
    let mut unknown = drive();
    unknown["RS_ID"] = json!("RS0099");
    let document = bind(&motor(unknown), &sink);

    let motor = document.get_rs0005().expect("motor payload");
    assert!(!motor.performance.value().drive_representation.is_present());
    assert!(motor.performance.value().drive_representation.get_rs0006().is_none());

    let warnings = sink.at_least(Severity::Warn);
    assert_eq!(warnings.len(), 1);
    assert_eq!(
        warnings[0].path,
        "RS_instance.performance.drive_representation.RS_ID"
    );
}

#[test]
fn bad_table_leaves_map_unbuilt() {
    let sink = CollectingSink::new();
    let mut broken = drive();
    broken["RS_instance"]["performance"]["performance_map"]["lookup_variables"]["efficiency"] =
        json!([0.95, 0.984]);
    let document = bind(&broken, &sink);

    let drive = document.get_rs0006().expect("drive payload");
    let map = drive.performance.value().performance_map.value();
    assert_eq!(
        map.calculate_performance(&[3000.0]),
        Err(PerformanceMapError::NotFinalized)
    );
    let errors = sink.at_least(Severity::Error);
    assert_eq!(errors.len(), 1);
    assert_eq!(errors[0].path, "RS_instance.performance.performance_map");
}

#[test]
fn missing_required_sections_warn_with_paths() {
    let sink = CollectingSink::new();
    let document = bind(
        &json!({"RS_ID": "RS0007", "RS_instance": {"metadata": metadata("RS0007")}}),
        &sink,
    );
    let drive = document.get_rs0007().expect("payload exists");
    assert!(!drive.performance.is_present());

    let diagnostics = sink.diagnostics();
    assert_eq!(diagnostics.len(), 1);
    insta::assert_snapshot!(
        diagnostics[0].to_string(),
        @"WARN: RS_instance.performance: missing required field"
    );
}

#[test]
fn unitary_system_embeds_fan_and_dx() {
    let sink = CollectingSink::new();
    let document = bind(
        &json!({
            "RS_ID": "RS0002",
            "RS_instance": {
                "metadata": metadata("RS0002"),
                "performance": {
                    "standby_power": 12.0,
                    "indoor_fan_representation": fan("CONTINUOUS", json!({
                        "grid_variables": {
                            "standard_air_volumetric_flow_rate": [0.5, 2.0],
                            "static_pressure_difference": [100.0, 500.0]
                        },
                        "lookup_variables": {
                            "impeller_rotational_speed": [10.0, 14.0, 20.0, 24.0],
                            "shaft_power": [100.0, 300.0, 400.0, 1200.0]
                        }
                    })),
                    "fan_position": "BLOW_THROUGH",
                    "dx_system_representation": {"RS_ID": "RS0004", "RS_instance": {}}
                }
            }
        }),
        &sink,
    );
    let unitary = document.get_rs0002().expect("unitary payload");
    let performance = unitary.performance.value();
    assert!(performance.indoor_fan_representation.get_rs0003().is_some());
    assert!(performance.dx_system_representation.get_rs0004().is_some());

    let embedded: Vec<&str> = document
        .instance()
        .expect("payload")
        .embedded()
        .into_iter()
        .map(|(key, _)| key)
        .collect();
    assert_eq!(
        embedded,
        vec!["indoor_fan_representation", "dx_system_representation"]
    );
    let fan_envelope: &Envelope = document
        .resolve("indoor_fan_representation")
        .expect("fan envelope");
    assert_eq!(fan_envelope.id(), Some("RS0003"));

    // The empty DX payload only produces warnings below its own path.
    assert!(sink.at_least(Severity::Error).is_empty());
    assert!(sink
        .diagnostics()
        .iter()
        .all(|d| d.path.starts_with("RS_instance.performance.dx_system_representation")));
}
