use std::collections::HashMap;
use std::fs;
use std::path::Path;
use sys_locale::get_locale;

/// 언어팩 기본 디렉터리.
pub const LOCALES_DIR: &str = "locales";

/// 문자열 키를 모아두는 네임스페이스.
pub mod keys {
    pub const ERROR_PREFIX: &str = "general.error_prefix";
    pub const APP_EXIT: &str = "general.app_exit";
    pub const DEFAULT_LABEL: &str = "general.default_label";
    pub const ERROR_INVALID_NUMBER: &str = "error.invalid_number";
    pub const ERROR_UNKNOWN_COMPOUND: &str = "error.unknown_compound";
    pub const ERROR_UNEXPECTED: &str = "error.unexpected";
    pub const INVALID_SELECTION_RETRY: &str = "error.invalid_selection_retry";

    pub const MAIN_MENU_TITLE: &str = "main_menu.title";
    pub const MAIN_MENU_DOPPLER: &str = "main_menu.doppler";
    pub const MAIN_MENU_ENTHALPY: &str = "main_menu.enthalpy";
    pub const MAIN_MENU_COMPOUNDS: &str = "main_menu.compounds";
    pub const MAIN_MENU_SETTINGS: &str = "main_menu.settings";
    pub const MAIN_MENU_EXIT: &str = "main_menu.exit";
    pub const PROMPT_MENU_SELECT: &str = "prompt.menu_select";

    pub const DOPPLER_HEADING: &str = "doppler.heading";
    pub const PROMPT_WAVE_SPEED: &str = "doppler.prompt_wave_speed";
    pub const PROMPT_BASE_FREQUENCY: &str = "doppler.prompt_base_frequency";
    pub const PROMPT_OBSERVER_SPEED: &str = "doppler.prompt_observer_speed";
    pub const PROMPT_SOURCE_MIN: &str = "doppler.prompt_source_min";
    pub const PROMPT_SOURCE_MAX: &str = "doppler.prompt_source_max";
    pub const PROMPT_STEPS: &str = "doppler.prompt_steps";
    pub const PROMPT_ANIMATE: &str = "doppler.prompt_animate";
    pub const DOPPLER_RESULT_RANGE: &str = "doppler.result_range";
    pub const DOPPLER_SUPERSONIC_WARNING: &str = "doppler.supersonic_warning";
    pub const RESULT_FILE_SAVED: &str = "result.file_saved";

    pub const ENTHALPY_HEADING: &str = "enthalpy.heading";
    pub const COMPOUNDS_AVAILABLE: &str = "enthalpy.compounds_available";
    pub const ENTHALPY_MODE_PROMPT: &str = "enthalpy.mode_prompt";
    pub const PRESET_LIST_HEADING: &str = "enthalpy.preset_list";
    pub const PROMPT_PRESET: &str = "enthalpy.prompt_preset";
    pub const ENTER_REACTANTS: &str = "enthalpy.enter_reactants";
    pub const ENTER_PRODUCTS: &str = "enthalpy.enter_products";
    pub const PROMPT_COMPOUND: &str = "enthalpy.prompt_compound";
    pub const PROMPT_COEFFICIENT: &str = "enthalpy.prompt_coefficient";
    pub const PROMPT_GAS_DELTA: &str = "enthalpy.prompt_gas_delta";
    pub const PROMPT_TEMPERATURE: &str = "enthalpy.prompt_temperature";
    pub const RESULTS_HEADING: &str = "enthalpy.results";
    pub const RESULT_DELTA_H: &str = "enthalpy.delta_h";
    pub const RESULT_DELTA_U: &str = "enthalpy.delta_u";
    pub const RESULT_EXOTHERMIC: &str = "enthalpy.exothermic";
    pub const RESULT_ENDOTHERMIC: &str = "enthalpy.endothermic";
    pub const INVALID_OPTION_EXIT: &str = "enthalpy.invalid_option";

    pub const SETTINGS_HEADING: &str = "settings.heading";
    pub const SETTINGS_CURRENT_LANGUAGE: &str = "settings.current_language";
    pub const SETTINGS_PROMPT_LANGUAGE: &str = "settings.prompt_language";
    pub const SETTINGS_PROMPT_OUTPUT_DIR: &str = "settings.prompt_output_dir";
    pub const SETTINGS_SAVED: &str = "settings.saved";
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Language {
    En,
    Es,
    Ko,
}

impl Language {
    fn from_code(code: &str) -> Self {
        let c = code.to_lowercase();
        if c.starts_with("es") {
            Language::Es
        } else if c.starts_with("ko") {
            Language::Ko
        } else {
            Language::En
        }
    }

    pub fn as_code(&self) -> &'static str {
        match self {
            Language::En => "en",
            Language::Es => "es",
            Language::Ko => "ko",
        }
    }
}

/// 런타임 언어 번들을 제공한다.
#[derive(Debug, Clone)]
pub struct Translator {
    lang: Language,
    overrides: Option<HashMap<String, String>>,
}

impl Translator {
    /// 언어 코드(en/es/ko)에 따라 번역기를 생성한다. 알 수 없는 코드는 en으로 폴백한다.
    pub fn new(lang_code: &str) -> Self {
        Self {
            lang: Language::from_code(lang_code),
            overrides: None,
        }
    }

    /// 언어 코드 + 언어팩 디렉터리를 받아서 번역기를 생성한다.
    /// `{dir}/{lang}.toml`이 없으면 내장 문자열만 사용한다.
    pub fn new_with_pack(lang_code: &str, pack_dir: &Path) -> Self {
        let overrides = load_overrides(pack_dir, lang_code);
        Self {
            lang: Language::from_code(lang_code),
            overrides,
        }
    }

    pub fn language(&self) -> Language {
        self.lang
    }

    pub fn language_code(&self) -> &'static str {
        self.lang.as_code()
    }

    /// 번역을 가져온다. 해당 언어에 없으면 영어 문자열로 폴백한다.
    pub fn t(&self, key: &str) -> &str {
        if let Some(v) = self.overrides.as_ref().and_then(|m| m.get(key)) {
            return v;
        }
        let built_in = match self.lang {
            Language::En => None,
            Language::Es => es(key),
            Language::Ko => ko(key),
        };
        built_in.unwrap_or_else(|| en(key))
    }
}

/// CLI 플래그/설정/시스템 순으로 언어 코드를 결정한다.
pub fn resolve_language(cli_arg: Option<&str>, config_lang: Option<&str>) -> String {
    cli_arg
        .and_then(normalize_lang)
        .or_else(|| config_lang.and_then(normalize_lang))
        .or_else(detect_system_language)
        .unwrap_or_else(|| "en".to_string())
}

fn normalize_lang(code: &str) -> Option<String> {
    let c = code.trim().to_lowercase();
    match c.as_str() {
        "auto" | "" => None,
        other if other.starts_with("en") => Some("en".into()),
        other if other.starts_with("es") => Some("es".into()),
        other if other.starts_with("ko") => Some("ko".into()),
        _ => None,
    }
}

fn normalize_locale_string(loc: &str) -> Option<String> {
    let lang = loc
        .split(['.', '_', '-'])
        .next()
        .unwrap_or_default()
        .to_lowercase();
    normalize_lang(&lang)
}

/// 시스템 로케일에서 언어를 추정한다.
pub fn detect_system_language() -> Option<String> {
    if let Some(loc) = get_locale() {
        if let Some(lang) = normalize_locale_string(&loc) {
            return Some(lang);
        }
    }
    for var in ["LC_ALL", "LANG"] {
        if let Ok(lang) = std::env::var(var) {
            if let Some(code) = normalize_locale_string(&lang) {
                return Some(code);
            }
        }
    }
    None
}

/// TOML 기반 언어팩을 로드한다. 형식: 섹션.키 = "값" 으로 평탄화된다.
fn load_overrides(dir: &Path, lang: &str) -> Option<HashMap<String, String>> {
    let path = dir.join(format!("{lang}.toml"));
    let content = fs::read_to_string(path).ok()?;
    parse_toml_to_map(&content)
}

fn parse_toml_to_map(src: &str) -> Option<HashMap<String, String>> {
    let value: toml::Value = toml::from_str(src).ok()?;
    let table = value.as_table()?;
    let mut map = HashMap::new();

    fn walk(prefix: &str, val: &toml::Value, out: &mut HashMap<String, String>) {
        match val {
            toml::Value::String(s) => {
                out.insert(prefix.to_string(), s.to_string());
            }
            toml::Value::Table(t) => {
                for (k, v) in t {
                    let key = if prefix.is_empty() {
                        k.clone()
                    } else {
                        format!("{prefix}.{k}")
                    };
                    walk(&key, v, out);
                }
            }
            _ => {}
        }
    }

    for (k, v) in table {
        walk(k, v, &mut map);
    }

    if map.is_empty() {
        None
    } else {
        Some(map)
    }
}

fn en(key: &str) -> &'static str {
    use keys::*;
    match key {
        ERROR_PREFIX => "Error",
        APP_EXIT => "Exiting application.",
        DEFAULT_LABEL => "default",
        ERROR_INVALID_NUMBER => "Please enter a number.",
        ERROR_UNKNOWN_COMPOUND => "Compound not found in the table:",
        ERROR_UNEXPECTED => "Unexpected error:",
        INVALID_SELECTION_RETRY => "Invalid input. Please try again.",
        MAIN_MENU_TITLE => "\n=== Physics Lab Toolbox ===",
        MAIN_MENU_DOPPLER => "1) Doppler effect",
        MAIN_MENU_ENTHALPY => "2) Reaction enthalpy / internal energy",
        MAIN_MENU_COMPOUNDS => "3) Formation enthalpy table",
        MAIN_MENU_SETTINGS => "4) Settings",
        MAIN_MENU_EXIT => "0) Exit",
        PROMPT_MENU_SELECT => "Select menu: ",
        DOPPLER_HEADING => "\n-- Doppler effect --",
        PROMPT_WAVE_SPEED => "Wave speed in the medium (m/s)",
        PROMPT_BASE_FREQUENCY => "Source frequency (Hz)",
        PROMPT_OBSERVER_SPEED => "Observer speed (m/s)",
        PROMPT_SOURCE_MIN => "Minimum source speed (m/s)",
        PROMPT_SOURCE_MAX => "Maximum source speed (m/s)",
        PROMPT_STEPS => "Number of source-speed steps",
        PROMPT_ANIMATE => "Render animations? (y/N): ",
        DOPPLER_RESULT_RANGE => "Observed frequency range:",
        DOPPLER_SUPERSONIC_WARNING => "Warning: samples faster than the wave give negative frequencies:",
        RESULT_FILE_SAVED => "Saved:",
        ENTHALPY_HEADING => "\n-- Reaction enthalpy and internal energy --",
        COMPOUNDS_AVAILABLE => "Available compounds:",
        ENTHALPY_MODE_PROMPT => "Use a tabulated reaction (1) or enter your own (2)? ",
        PRESET_LIST_HEADING => "Preset reactions:",
        PROMPT_PRESET => "Preset number",
        ENTER_REACTANTS => "Enter the reactants:",
        ENTER_PRODUCTS => "Enter the products:",
        PROMPT_COMPOUND => "Compound ('end' to finish): ",
        PROMPT_COEFFICIENT => "Coefficient of",
        PROMPT_GAS_DELTA => "Change in moles of gas (Δn_gas): ",
        PROMPT_TEMPERATURE => "Temperature (K)",
        RESULTS_HEADING => "\nResults:",
        RESULT_DELTA_H => "ΔH (enthalpy change):",
        RESULT_DELTA_U => "ΔU (internal energy change):",
        RESULT_EXOTHERMIC => "The reaction is exothermic.",
        RESULT_ENDOTHERMIC => "The reaction is endothermic.",
        INVALID_OPTION_EXIT => "Invalid option.",
        SETTINGS_HEADING => "\n-- Settings --",
        SETTINGS_CURRENT_LANGUAGE => "Current language:",
        SETTINGS_PROMPT_LANGUAGE => "Language (auto/en/es/ko, enter to keep): ",
        SETTINGS_PROMPT_OUTPUT_DIR => "Output directory (enter to keep): ",
        SETTINGS_SAVED => "Settings saved.",
        _ => "[missing translation]",
    }
}

fn es(key: &str) -> Option<&'static str> {
    use keys::*;
    Some(match key {
        ERROR_PREFIX => "Error",
        APP_EXIT => "Saliendo del programa.",
        DEFAULT_LABEL => "por defecto",
        ERROR_INVALID_NUMBER => "Ingrese un número.",
        ERROR_UNKNOWN_COMPOUND => "Compuesto no encontrado en la tabla:",
        ERROR_UNEXPECTED => "Error inesperado:",
        INVALID_SELECTION_RETRY => "Entrada inválida. Intente de nuevo.",
        MAIN_MENU_DOPPLER => "1) Efecto Doppler",
        MAIN_MENU_ENTHALPY => "2) Entalpía / energía interna de reacción",
        MAIN_MENU_COMPOUNDS => "3) Tabla de entalpías de formación",
        MAIN_MENU_SETTINGS => "4) Configuración",
        MAIN_MENU_EXIT => "0) Salir",
        PROMPT_MENU_SELECT => "Seleccione: ",
        DOPPLER_HEADING => "\n-- Efecto Doppler --",
        PROMPT_WAVE_SPEED => "Ingrese la velocidad de la onda en el medio (m/s)",
        PROMPT_BASE_FREQUENCY => "Ingrese la frecuencia inicial (Hz)",
        PROMPT_OBSERVER_SPEED => "Ingrese la velocidad del observador (m/s)",
        PROMPT_SOURCE_MIN => "Ingrese la velocidad mínima de la fuente (m/s)",
        PROMPT_SOURCE_MAX => "Ingrese la velocidad máxima de la fuente (m/s)",
        PROMPT_STEPS => "Ingrese el número de pasos para la velocidad de la fuente",
        PROMPT_ANIMATE => "¿Generar animaciones? (s/N): ",
        DOPPLER_RESULT_RANGE => "Rango de frecuencia observada:",
        RESULT_FILE_SAVED => "Guardado:",
        ENTHALPY_HEADING => "\n-- Cálculo de entalpía y energía interna de una reacción química --",
        COMPOUNDS_AVAILABLE => "Compuestos disponibles:",
        ENTHALPY_MODE_PROMPT => "¿Desea usar compuestos tabulados (1) o ingresar sus propios valores (2)? ",
        PRESET_LIST_HEADING => "Reacciones predefinidas:",
        PROMPT_PRESET => "Número de reacción",
        ENTER_REACTANTS => "Ingrese los reactivos:",
        ENTER_PRODUCTS => "Ingrese los productos:",
        PROMPT_COMPOUND => "Compuesto (o 'fin' para terminar): ",
        PROMPT_COEFFICIENT => "Coeficiente de",
        PROMPT_GAS_DELTA => "Cambio en el número de moles de gases (Δn_gases): ",
        PROMPT_TEMPERATURE => "Temperatura (K)",
        RESULTS_HEADING => "\nResultados:",
        RESULT_DELTA_H => "ΔH (cambio de entalpía):",
        RESULT_DELTA_U => "ΔU (cambio de energía interna):",
        RESULT_EXOTHERMIC => "La reacción es exotérmica.",
        RESULT_ENDOTHERMIC => "La reacción es endotérmica.",
        INVALID_OPTION_EXIT => "Opción inválida.",
        SETTINGS_HEADING => "\n-- Configuración --",
        SETTINGS_SAVED => "Configuración guardada.",
        _ => return None,
    })
}

fn ko(key: &str) -> Option<&'static str> {
    use keys::*;
    Some(match key {
        ERROR_PREFIX => "오류",
        APP_EXIT => "프로그램을 종료합니다.",
        DEFAULT_LABEL => "기본값",
        ERROR_INVALID_NUMBER => "숫자를 입력하세요.",
        ERROR_UNKNOWN_COMPOUND => "표에 없는 화합물:",
        ERROR_UNEXPECTED => "예기치 않은 오류:",
        INVALID_SELECTION_RETRY => "잘못된 입력입니다. 다시 선택하세요.",
        MAIN_MENU_TITLE => "\n=== 물리 실험 도구 ===",
        MAIN_MENU_DOPPLER => "1) 도플러 효과",
        MAIN_MENU_ENTHALPY => "2) 반응 엔탈피 / 내부 에너지",
        MAIN_MENU_COMPOUNDS => "3) 생성 엔탈피 표",
        MAIN_MENU_SETTINGS => "4) 설정",
        MAIN_MENU_EXIT => "0) 종료",
        PROMPT_MENU_SELECT => "메뉴 선택: ",
        DOPPLER_HEADING => "\n-- 도플러 효과 --",
        PROMPT_WAVE_SPEED => "매질 내 파동 속도 (m/s)",
        PROMPT_BASE_FREQUENCY => "음원 주파수 (Hz)",
        PROMPT_OBSERVER_SPEED => "관측자 속도 (m/s)",
        PROMPT_SOURCE_MIN => "음원 최소 속도 (m/s)",
        PROMPT_SOURCE_MAX => "음원 최대 속도 (m/s)",
        PROMPT_STEPS => "음원 속도 단계 수",
        PROMPT_ANIMATE => "애니메이션을 만들까요? (y/N): ",
        DOPPLER_RESULT_RANGE => "관측 주파수 범위:",
        DOPPLER_SUPERSONIC_WARNING => "경고: 파동보다 빠른 표본은 음의 주파수가 됩니다:",
        RESULT_FILE_SAVED => "저장됨:",
        ENTHALPY_HEADING => "\n-- 반응 엔탈피와 내부 에너지 --",
        COMPOUNDS_AVAILABLE => "사용 가능한 화합물:",
        ENTHALPY_MODE_PROMPT => "표의 반응을 쓸까요 (1), 직접 입력할까요 (2)? ",
        PRESET_LIST_HEADING => "미리 정의된 반응:",
        PROMPT_PRESET => "반응 번호",
        ENTER_REACTANTS => "반응물을 입력하세요:",
        ENTER_PRODUCTS => "생성물을 입력하세요:",
        PROMPT_COMPOUND => "화합물 (끝내려면 'end'): ",
        PROMPT_COEFFICIENT => "계수",
        PROMPT_GAS_DELTA => "기체 몰수 변화 (Δn_gas): ",
        PROMPT_TEMPERATURE => "온도 (K)",
        RESULTS_HEADING => "\n결과:",
        RESULT_DELTA_H => "ΔH (엔탈피 변화):",
        RESULT_DELTA_U => "ΔU (내부 에너지 변화):",
        RESULT_EXOTHERMIC => "발열 반응입니다.",
        RESULT_ENDOTHERMIC => "흡열 반응입니다.",
        INVALID_OPTION_EXIT => "잘못된 선택입니다.",
        SETTINGS_HEADING => "\n-- 설정 --",
        SETTINGS_CURRENT_LANGUAGE => "현재 언어:",
        SETTINGS_PROMPT_LANGUAGE => "언어 (auto/en/es/ko, 엔터는 유지): ",
        SETTINGS_PROMPT_OUTPUT_DIR => "출력 디렉터리 (엔터는 유지): ",
        SETTINGS_SAVED => "설정을 저장했습니다.",
        _ => return None,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn spanish_falls_back_to_english_for_missing_keys() {
        let tr = Translator::new("es-ES");
        assert_eq!(tr.language(), Language::Es);
        assert_eq!(tr.t(keys::RESULT_DELTA_H), "ΔH (cambio de entalpía):");
        assert_eq!(tr.t(keys::SETTINGS_PROMPT_LANGUAGE), en(keys::SETTINGS_PROMPT_LANGUAGE));
    }

    #[test]
    fn cli_flag_wins_over_config() {
        assert_eq!(resolve_language(Some("ko-KR"), Some("es")), "ko");
        assert_eq!(resolve_language(Some("auto"), Some("es")), "es");
    }

    #[test]
    fn nested_toml_pack_is_flattened() {
        let map = parse_toml_to_map("[enthalpy]\ndelta_h = \"dH:\"\n").expect("pack");
        assert_eq!(map.get("enthalpy.delta_h").map(String::as_str), Some("dH:"));
    }

    const ALL_KEYS: &[&str] = &[
        keys::ERROR_PREFIX,
        keys::APP_EXIT,
        keys::DEFAULT_LABEL,
        keys::ERROR_INVALID_NUMBER,
        keys::ERROR_UNKNOWN_COMPOUND,
        keys::ERROR_UNEXPECTED,
        keys::INVALID_SELECTION_RETRY,
        keys::MAIN_MENU_TITLE,
        keys::MAIN_MENU_DOPPLER,
        keys::MAIN_MENU_ENTHALPY,
        keys::MAIN_MENU_COMPOUNDS,
        keys::MAIN_MENU_SETTINGS,
        keys::MAIN_MENU_EXIT,
        keys::PROMPT_MENU_SELECT,
        keys::DOPPLER_HEADING,
        keys::PROMPT_WAVE_SPEED,
        keys::PROMPT_BASE_FREQUENCY,
        keys::PROMPT_OBSERVER_SPEED,
        keys::PROMPT_SOURCE_MIN,
        keys::PROMPT_SOURCE_MAX,
        keys::PROMPT_STEPS,
        keys::PROMPT_ANIMATE,
        keys::DOPPLER_RESULT_RANGE,
        keys::DOPPLER_SUPERSONIC_WARNING,
        keys::RESULT_FILE_SAVED,
        keys::ENTHALPY_HEADING,
        keys::COMPOUNDS_AVAILABLE,
        keys::ENTHALPY_MODE_PROMPT,
        keys::PRESET_LIST_HEADING,
        keys::PROMPT_PRESET,
        keys::ENTER_REACTANTS,
        keys::ENTER_PRODUCTS,
        keys::PROMPT_COMPOUND,
        keys::PROMPT_COEFFICIENT,
        keys::PROMPT_GAS_DELTA,
        keys::PROMPT_TEMPERATURE,
        keys::RESULTS_HEADING,
        keys::RESULT_DELTA_H,
        keys::RESULT_DELTA_U,
        keys::RESULT_EXOTHERMIC,
        keys::RESULT_ENDOTHERMIC,
        keys::INVALID_OPTION_EXIT,
        keys::SETTINGS_HEADING,
        keys::SETTINGS_CURRENT_LANGUAGE,
        keys::SETTINGS_PROMPT_LANGUAGE,
        keys::SETTINGS_PROMPT_OUTPUT_DIR,
        keys::SETTINGS_SAVED,
    ];

    #[test]
    fn korean_table_covers_every_key() {
        for key in ALL_KEYS {
            assert_ne!(en(key), "[missing translation]", "en lacks {key}");
            assert!(ko(key).is_some(), "ko lacks {key}");
        }
    }

    #[test]
    fn pack_directory_overrides_built_in_strings() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join("ko.toml"),
            "[enthalpy]\ndelta_h = \"엔탈피 변화:\"\n",
        )
        .unwrap();
        let tr = Translator::new_with_pack("ko", dir.path());
        assert_eq!(tr.t(keys::RESULT_DELTA_H), "엔탈피 변화:");
        assert_eq!(tr.t(keys::RESULT_DELTA_U), "ΔU (내부 에너지 변화):");

        let missing = Translator::new_with_pack("ko", &dir.path().join("absent"));
        assert_eq!(missing.t(keys::RESULT_DELTA_H), "ΔH (엔탈피 변화):");
    }
}
