//! 대화형 입력 흐름 테스트. 표준 입력 대신 메모리 버퍼를 쓴다.
use std::io::Cursor;

use physics_lab_toolbox::config::Config;
use physics_lab_toolbox::i18n::Translator;
use physics_lab_toolbox::thermo::{FormationEnthalpyTable, ReactionPreset};
use physics_lab_toolbox::ui_cli::{Console, MenuChoice};

fn console(input: &str) -> Console<Cursor<Vec<u8>>, Vec<u8>> {
    Console::new(Cursor::new(input.as_bytes().to_vec()), Vec::new())
}

fn output(c: Console<Cursor<Vec<u8>>, Vec<u8>>) -> String {
    String::from_utf8(c.into_output()).expect("utf8")
}

#[test]
fn custom_reaction_matches_methane_preset() {
    let tr = Translator::new("en");
    let mut c = console("CH4 (g)\n1\nO2 (g)\nabc\n2\nfin\nCO2 (g)\n1\nH2O (l)\n2\nFIN\n-2\n");
    let reaction = c.read_custom_reaction(&tr).expect("reaction");
    assert_eq!(reaction, ReactionPreset::MethaneCombustion.reaction());
    assert!(output(c).contains("Please enter a number."));
}

#[test]
fn empty_prompts_fall_back_to_defaults() {
    let tr = Translator::new("en");
    let cfg = Config::default();
    let mut c = console("\n2000\n\n\n250\n\n");
    let run = c.prompt_doppler(&tr, &cfg).expect("prompts");
    assert_eq!(run.doppler.wave_speed, 343.0);
    assert_eq!(run.doppler.base_frequency, 2000.0);
    assert_eq!(run.doppler.source_speed_max, 250.0);
    assert_eq!(run.doppler.steps, 50);
    assert!(output(c).contains("(default: 343)"));
}

#[test]
fn menu_retries_until_valid_choice() {
    let tr = Translator::new("en");
    let mut c = console("9\n3\n");
    assert_eq!(c.main_menu(&tr).expect("menu"), MenuChoice::Compounds);
    assert!(output(c).contains("Invalid input. Please try again."));
}

#[test]
fn closed_input_is_an_error() {
    let tr = Translator::new("en");
    let mut c = console("");
    assert!(c.main_menu(&tr).is_err());
}

#[test]
fn unknown_compound_aborts_without_results() {
    let tr = Translator::new("en");
    let dir = tempfile::tempdir().unwrap();
    let mut cfg = Config::default();
    cfg.output.directory = dir.path().to_path_buf();
    let table = FormationEnthalpyTable::built_in();
    let mut c = console("2\nXeF2 (g)\n1\nfin\nO2 (g)\n1\nfin\n0\n\n");
    c.handle_enthalpy(&tr, &cfg, &table).expect("handled");
    let text = output(c);
    assert!(text.contains("Compound not found in the table: XeF2 (g)"));
    assert!(!text.contains("ΔH (enthalpy change):"));
    assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 0);
}

#[test]
fn preset_run_prints_results_in_spanish() {
    let tr = Translator::new("es");
    let mut cfg = Config::default();
    let dir = tempfile::tempdir().unwrap();
    cfg.output.directory = dir.path().to_path_buf();
    cfg.output.width = 96;
    cfg.output.height = 72;
    let table = FormationEnthalpyTable::built_in();
    let mut c = console("1\n1\n\n");
    c.handle_enthalpy(&tr, &cfg, &table).expect("handled");
    let text = output(c);
    assert!(text.contains("ΔH (cambio de entalpía): -890.31 kJ"));
    assert!(text.contains("ΔU (cambio de energía interna): -885.35 kJ"));
    assert!(text.contains("La reacción es exotérmica."));
}
