use adcopy_lab::config::EngineConfig;

#[test]
fn defaults_cover_every_section() {
    let config = EngineConfig::default();

    assert!((config.optimizer.target_score - 8.0).abs() < 1e-6);
    assert_eq!(config.winner.min_clicks, 100);
    assert!((config.winner.min_confidence - 0.95).abs() < 1e-6);
    assert_eq!(config.predictor.business_type, "esoteric");
    assert_eq!(config.generator.max_workers, 3);
}

#[test]
fn config_round_trips_through_toml() {
    let config = EngineConfig::default();
    let payload = toml::to_string_pretty(&config).expect("serialize config");
    let parsed: EngineConfig = toml::from_str(&payload).expect("parse config");

    assert!((parsed.optimizer.target_score - config.optimizer.target_score).abs() < 1e-6);
    assert_eq!(parsed.generator.endpoint, config.generator.endpoint);
    assert_eq!(parsed.winner.min_clicks, config.winner.min_clicks);
}

#[test]
fn partial_sections_error_rather_than_guess() {
    let partial = "[optimizer]\ntarget_score = 9.0\n";
    assert!(toml::from_str::<EngineConfig>(partial).is_err());
}
