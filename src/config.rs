use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::doppler::{AnimationSettings, SweepRange, WaveParameters};
use crate::render::ChartSize;
use crate::thermo::{CompoundEntry, ReactionPreset, STANDARD_TEMPERATURE_K};

/// 기본 설정 파일 이름.
pub const DEFAULT_CONFIG_FILE: &str = "config.toml";

/// 도플러 스윕 기본값.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DopplerSettings {
    /// 매질 내 파동 속도 [m/s] (공기 중 음속)
    pub wave_speed: f64,
    /// 음원 주파수 [Hz]
    pub base_frequency: f64,
    /// 관측자 속도 [m/s]
    pub observer_speed: f64,
    pub source_speed_min: f64,
    pub source_speed_max: f64,
    pub steps: usize,
}

impl Default for DopplerSettings {
    fn default() -> Self {
        Self {
            wave_speed: 343.0,
            base_frequency: 1000.0,
            observer_speed: 0.0,
            source_speed_min: 0.0,
            source_speed_max: 300.0,
            steps: 50,
        }
    }
}

impl DopplerSettings {
    pub fn wave(&self) -> WaveParameters {
        WaveParameters {
            wave_speed: self.wave_speed,
            observer_speed: self.observer_speed,
            base_frequency: self.base_frequency,
        }
    }

    pub fn range(&self) -> SweepRange {
        SweepRange {
            source_speed_min: self.source_speed_min,
            source_speed_max: self.source_speed_max,
            steps: self.steps,
        }
    }
}

/// 애니메이션 기본값.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnimationConfig {
    pub frames: usize,
    pub fps: u32,
    pub window_start: f64,
    pub window_end: f64,
    pub wave_samples: usize,
}

impl Default for AnimationConfig {
    fn default() -> Self {
        let d = AnimationSettings::default();
        Self {
            frames: d.frames,
            fps: d.fps,
            window_start: d.window_start,
            window_end: d.window_end,
            wave_samples: d.wave_samples,
        }
    }
}

impl AnimationConfig {
    pub fn settings(&self) -> AnimationSettings {
        AnimationSettings {
            frames: self.frames,
            fps: self.fps,
            window_start: self.window_start,
            window_end: self.window_end,
            wave_samples: self.wave_samples,
        }
    }
}

/// 반응 열역학 기본값.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ThermoSettings {
    /// ΔU 계산 온도 [K]
    pub temperature_k: f64,
    pub preset: ReactionPreset,
}

impl Default for ThermoSettings {
    fn default() -> Self {
        Self {
            temperature_k: STANDARD_TEMPERATURE_K,
            preset: ReactionPreset::MethaneCombustion,
        }
    }
}

/// 파일 출력 설정.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputSettings {
    pub directory: PathBuf,
    pub width: u32,
    pub height: u32,
    pub write_csv: bool,
}

impl Default for OutputSettings {
    fn default() -> Self {
        Self {
            directory: PathBuf::from("output"),
            width: 800,
            height: 480,
            write_csv: true,
        }
    }
}

impl OutputSettings {
    pub fn chart_size(&self) -> ChartSize {
        ChartSize::new(self.width, self.height)
    }
}

/// 애플리케이션 설정을 표현한다.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// 언어 코드 (auto/en/es/ko)
    pub language: String,
    pub doppler: DopplerSettings,
    pub animation: AnimationConfig,
    pub thermo: ThermoSettings,
    pub output: OutputSettings,
    /// 내장 생성 엔탈피 표에 추가/대체할 항목
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub compounds: Vec<CompoundEntry>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            language: "auto".to_string(),
            doppler: DopplerSettings::default(),
            animation: AnimationConfig::default(),
            thermo: ThermoSettings::default(),
            output: OutputSettings::default(),
            compounds: Vec::new(),
        }
    }
}

/// 설정 로드/저장 시 발생 가능한 오류를 표현한다.
#[derive(Debug)]
pub enum ConfigError {
    /// 파일 입출력 오류
    Io(std::io::Error),
    /// TOML 역직렬화 오류
    Serde(toml::de::Error),
    /// TOML 직렬화 오류
    Serialize(toml::ser::Error),
    /// 값 검증 실패
    Invalid(&'static str),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::Io(e) => write!(f, "config file error: {e}"),
            ConfigError::Serde(e) => write!(f, "config parse error: {e}"),
            ConfigError::Serialize(e) => write!(f, "config serialize error: {e}"),
            ConfigError::Invalid(msg) => write!(f, "invalid config value: {msg}"),
        }
    }
}

impl std::error::Error for ConfigError {}

impl From<std::io::Error> for ConfigError {
    fn from(value: std::io::Error) -> Self {
        ConfigError::Io(value)
    }
}

impl From<toml::de::Error> for ConfigError {
    fn from(value: toml::de::Error) -> Self {
        ConfigError::Serde(value)
    }
}

impl From<toml::ser::Error> for ConfigError {
    fn from(value: toml::ser::Error) -> Self {
        ConfigError::Serialize(value)
    }
}

/// 설정 파일을 로드하거나 없으면 기본 설정을 생성한다.
pub fn load_or_default(path: &Path) -> Result<Config, ConfigError> {
    if path.exists() {
        let content = fs::read_to_string(path)?;
        let cfg = Config::from_toml(&content)?;
        tracing::info!(path = %path.display(), "config loaded");
        Ok(cfg)
    } else {
        let cfg = Config::default();
        save_config(&cfg, path)?;
        tracing::info!(path = %path.display(), "default config created");
        Ok(cfg)
    }
}

fn save_config(cfg: &Config, path: &Path) -> Result<(), ConfigError> {
    let content = toml::to_string_pretty(cfg)?;
    fs::write(path, content)?;
    Ok(())
}

impl Config {
    /// TOML 문자열을 읽고 검증한다. 빠진 항목은 기본값으로 채운다.
    pub fn from_toml(src: &str) -> Result<Self, ConfigError> {
        let cfg: Config = toml::from_str(src)?;
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn to_toml(&self) -> Result<String, ConfigError> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// 설정을 파일에 저장한다.
    pub fn save(&self, path: &Path) -> Result<(), ConfigError> {
        save_config(self, path)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let d = &self.doppler;
        if !(d.wave_speed.is_finite() && d.wave_speed > 0.0) {
            return Err(ConfigError::Invalid("doppler.wave_speed must be positive"));
        }
        if !(d.base_frequency.is_finite() && d.base_frequency > 0.0) {
            return Err(ConfigError::Invalid("doppler.base_frequency must be positive"));
        }
        if !(d.observer_speed.is_finite()
            && d.source_speed_min.is_finite()
            && d.source_speed_max.is_finite())
        {
            return Err(ConfigError::Invalid("doppler speeds must be finite"));
        }
        if d.steps == 0 {
            return Err(ConfigError::Invalid("doppler.steps must be at least 1"));
        }

        let a = &self.animation;
        if a.frames == 0 || a.fps == 0 {
            return Err(ConfigError::Invalid("animation.frames and animation.fps must be at least 1"));
        }
        if !(a.window_end > a.window_start) {
            return Err(ConfigError::Invalid("animation.window_end must exceed window_start"));
        }
        if a.wave_samples < 2 {
            return Err(ConfigError::Invalid("animation.wave_samples must be at least 2"));
        }

        if !(self.thermo.temperature_k.is_finite() && self.thermo.temperature_k > 0.0) {
            return Err(ConfigError::Invalid("thermo.temperature_k must be positive"));
        }

        if self.output.width < 64 || self.output.height < 64 {
            return Err(ConfigError::Invalid("output.width and output.height must be at least 64"));
        }
        if self.compounds.iter().any(|c| c.name.trim().is_empty()) {
            return Err(ConfigError::Invalid("compound names must not be empty"));
        }
        Ok(())
    }
}
