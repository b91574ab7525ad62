use survivor_agent::DecisionConfig;

#[test]
fn defaults_survive_a_yaml_round_trip() {
    let config = DecisionConfig::default();
    let yaml = config.to_yaml().expect("serialize");
    let parsed: DecisionConfig = serde_yaml::from_str(&yaml).expect("parse");
    assert_eq!(parsed, config);
}

#[test]
fn partial_yaml_keeps_remaining_defaults() {
    let yaml = "hunger_threshold: 5.0\nsteering:\n  wander_radius: 4.0\n";
    let config: DecisionConfig = serde_yaml::from_str(yaml).expect("parse");
    assert_eq!(config.hunger_threshold, 5.0);
    assert_eq!(config.steering.wander_radius, 4.0);
    assert_eq!(config.steering.wander_offset, 30.0);
    assert_eq!(config.injury_threshold, 8.1);
    assert_eq!(config.explored_house_cap, 6);
}

#[test]
fn load_reads_file_and_missing_file_falls_back() {
    let dir = tempfile::tempdir().expect("temp dir");
    let path = dir.path().join("decision.yaml");
    std::fs::write(&path, "stock_limit: 3\n").expect("write config");

    let loaded = DecisionConfig::load(&path).expect("load");
    assert_eq!(loaded.stock_limit, 3);

    let missing = dir.path().join("missing.yaml");
    let fallback = DecisionConfig::load_or_default(&missing).expect("fallback");
    assert_eq!(fallback, DecisionConfig::default());

    let err = DecisionConfig::load(&missing).expect_err("missing file");
    assert!(format!("{err:#}").contains("Failed to read config"));
}

#[test]
fn config_serializes_to_json_too() {
    let json = serde_json::to_string(&DecisionConfig::default()).expect("json");
    let parsed: DecisionConfig = serde_json::from_str(&json).expect("parse");
    assert_eq!(parsed, DecisionConfig::default());
}
