//! config.toml 로드/검증 테스트.
use physics_lab_toolbox::config::{self, Config, ConfigError};
use physics_lab_toolbox::thermo::ReactionPreset;

#[test]
fn defaults_match_documented_values() {
    let cfg = Config::default();
    cfg.validate().expect("defaults are valid");
    assert_eq!(cfg.doppler.wave_speed, 343.0);
    assert_eq!(cfg.doppler.base_frequency, 1000.0);
    assert_eq!(cfg.doppler.observer_speed, 0.0);
    assert_eq!(cfg.doppler.source_speed_min, 0.0);
    assert_eq!(cfg.doppler.source_speed_max, 300.0);
    assert_eq!(cfg.doppler.steps, 50);
    assert_eq!(cfg.animation.frames, 200);
    assert_eq!(cfg.thermo.temperature_k, 298.0);
    assert_eq!(cfg.thermo.preset, ReactionPreset::MethaneCombustion);
}

#[test]
fn partial_file_is_filled_with_defaults() {
    let cfg = Config::from_toml(
        r#"
language = "es"

[doppler]
base_frequency = 440.0

[thermo]
preset = "ammonia_synthesis"

[[compounds]]
name = "XeF2 (g)"
value_kj_per_mol = -107.0
"#,
    )
    .expect("parse");
    assert_eq!(cfg.language, "es");
    assert_eq!(cfg.doppler.base_frequency, 440.0);
    assert_eq!(cfg.doppler.wave_speed, 343.0);
    assert_eq!(cfg.thermo.preset, ReactionPreset::AmmoniaSynthesis);
    assert_eq!(cfg.compounds.len(), 1);
    assert_eq!(cfg.compounds[0].reference, None);
}

#[test]
fn toml_round_trip_preserves_config() {
    let mut cfg = Config::default();
    cfg.doppler.steps = 7;
    cfg.output.write_csv = false;
    let text = cfg.to_toml().expect("serialize");
    assert_eq!(Config::from_toml(&text).expect("parse"), cfg);
}

#[test]
fn invalid_values_are_rejected() {
    for src in [
        "[doppler]\nsteps = 0\n",
        "[doppler]\nwave_speed = 0.0\n",
        "[doppler]\nbase_frequency = -5.0\n",
        "[animation]\nwindow_start = 4.0\nwindow_end = 1.0\n",
        "[animation]\nfps = 0\n",
        "[thermo]\ntemperature_k = 0.0\n",
        "[output]\nwidth = 10\n",
    ] {
        assert!(
            matches!(Config::from_toml(src), Err(ConfigError::Invalid(_))),
            "accepted: {src}"
        );
    }
    assert!(matches!(
        Config::from_toml("[thermo]\npreset = \"fusion\"\n"),
        Err(ConfigError::Serde(_))
    ));
}

#[test]
fn missing_file_is_created_with_defaults() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.toml");

    let created = config::load_or_default(&path).expect("create");
    assert!(path.exists());
    assert_eq!(created, Config::default());

    let mut changed = created.clone();
    changed.language = "ko".into();
    changed.save(&path).expect("save");
    assert_eq!(config::load_or_default(&path).expect("reload").language, "ko");
}
