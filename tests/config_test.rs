// ==========================================
// 运行方案加载集成测试
// ==========================================
// 测试目标: JSON 方案解析、相对路径解析、参数校验
// ==========================================

use retail_sim::config::{ConfigError, ProfileLoader};
use retail_sim::domain::DecayFunction;
use std::fs;
use tempfile::TempDir;

#[test]
fn test_load_profile_resolves_relative_paths() {
    let dir = TempDir::new().unwrap();
    let profile_path = dir.path().join("profile.json");
    fs::write(
        &profile_path,
        r#"{
            "inputs": {
                "brands": "brands.csv",
                "classifications": "oac.csv",
                "zones": "data/demand.csv",
                "stores": "/abs/stores.csv"
            },
            "model": { "decay": "POWER", "min_distance_km": 0.25 },
            "output_dir": "out"
        }"#,
    )
    .unwrap();

    let profile = ProfileLoader::load(&profile_path).unwrap();

    assert_eq!(profile.inputs.brands, dir.path().join("brands.csv"));
    assert_eq!(profile.inputs.zones, dir.path().join("data/demand.csv"));
    assert_eq!(profile.inputs.stores, std::path::PathBuf::from("/abs/stores.csv"));
    assert_eq!(profile.output_dir, Some(dir.path().join("out")));
    assert_eq!(profile.model.min_distance_km, 0.25);
    assert_eq!(profile.model.distance_unit_m, 1000.0);
    // RETAIL_SIM_DECAY 未设置时保留文件中的值
    if std::env::var(retail_sim::config::ENV_DECAY).is_err() {
        assert_eq!(profile.model.decay, DecayFunction::Power);
    }
}

#[test]
fn test_model_section_is_optional() {
    let profile = ProfileLoader::parse(
        r#"{"inputs": {"brands": "b.csv", "classifications": "c.csv", "zones": "z.csv", "stores": "s.csv"}}"#,
    )
    .unwrap();
    assert_eq!(profile.model.decay, DecayFunction::Exponential);
    assert!(profile.output_dir.is_none());
}

#[test]
fn test_invalid_model_value_rejected() {
    let dir = TempDir::new().unwrap();
    let profile_path = dir.path().join("profile.json");
    fs::write(
        &profile_path,
        r#"{
            "inputs": {"brands": "b.csv", "classifications": "c.csv", "zones": "z.csv", "stores": "s.csv"},
            "model": { "tolerance": -1.0 }
        }"#,
    )
    .unwrap();

    let err = ProfileLoader::load(&profile_path).unwrap_err();
    assert!(matches!(err, ConfigError::InvalidValue { ref key, .. } if key == "tolerance"));
}

#[test]
fn test_malformed_json_rejected() {
    let err = ProfileLoader::parse("{ not json").unwrap_err();
    assert!(matches!(err, ConfigError::ParseError(_)));
}

#[test]
fn test_missing_profile_file() {
    let err = ProfileLoader::load("/definitely/not/here.json").unwrap_err();
    assert!(matches!(err, ConfigError::ReadError { .. }));
}
