use std::io::{BufRead, Write};
use std::path::{Path, PathBuf};

use tracing::{info, warn};

use crate::config::{Config, ConfigError};
use crate::doppler::{self, DopplerAnimation, DopplerError, DopplerSweep};
use crate::i18n::Translator;
use crate::render::{self, DopplerExport, DopplerOutputs, ReactionExport, RenderError};
use crate::thermo::{self, FormationEnthalpyTable, Reaction, ReactionEnergy, ThermoError};
use crate::ui_cli::{Console, MenuChoice};

/// 애플리케이션 실행 중 발생 가능한 오류를 표현한다.
#[derive(Debug)]
pub enum AppError {
    /// 파일/콘솔 입출력 오류
    Io(std::io::Error),
    /// 설정 저장/로드 오류
    Config(ConfigError),
    /// 도플러 계산 오류
    Doppler(DopplerError),
    /// 반응 열역학 계산 오류
    Thermo(ThermoError),
    /// 그래프/애니메이션 저장 오류
    Render(RenderError),
    /// 입력 스트림이 닫힘
    InputClosed,
}

impl std::fmt::Display for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AppError::Io(e) => write!(f, "I/O error: {e}"),
            AppError::Config(e) => write!(f, "{e}"),
            AppError::Doppler(e) => write!(f, "Doppler calculation error: {e}"),
            AppError::Thermo(e) => write!(f, "thermodynamics error: {e}"),
            AppError::Render(e) => write!(f, "render error: {e}"),
            AppError::InputClosed => write!(f, "input stream closed"),
        }
    }
}

impl std::error::Error for AppError {}

impl From<std::io::Error> for AppError {
    fn from(value: std::io::Error) -> Self {
        AppError::Io(value)
    }
}

impl From<ConfigError> for AppError {
    fn from(value: ConfigError) -> Self {
        AppError::Config(value)
    }
}

impl From<DopplerError> for AppError {
    fn from(value: DopplerError) -> Self {
        AppError::Doppler(value)
    }
}

impl From<ThermoError> for AppError {
    fn from(value: ThermoError) -> Self {
        AppError::Thermo(value)
    }
}

impl From<RenderError> for AppError {
    fn from(value: RenderError) -> Self {
        AppError::Render(value)
    }
}

/// 한 번의 도플러 실행 결과.
#[derive(Debug, Clone)]
pub struct DopplerReport {
    pub sweep: DopplerSweep,
    pub supersonic_samples: usize,
    pub outputs: DopplerOutputs,
}

/// 도플러 실행 옵션.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DopplerRunOptions {
    pub plot: bool,
    pub animate: bool,
}

impl Default for DopplerRunOptions {
    fn default() -> Self {
        Self {
            plot: true,
            animate: false,
        }
    }
}

/// 설정값으로 스윕을 계산하고 결과 파일을 저장한다.
pub fn run_doppler(config: &Config, options: DopplerRunOptions) -> Result<DopplerReport, AppError> {
    let wave = config.doppler.wave();
    let range = config.doppler.range();
    let sweep = doppler::sweep(&wave, &range)?;
    let supersonic_samples = sweep.supersonic_count(wave.wave_speed);
    if supersonic_samples > 0 {
        warn!(
            samples = supersonic_samples,
            wave_speed = wave.wave_speed,
            "source faster than the wave; observed frequency turns negative"
        );
    }
    if let Some((lo, hi)) = sweep.frequency_bounds() {
        info!(samples = sweep.len(), min_hz = lo, max_hz = hi, "sweep computed");
    }

    let animation = if options.animate {
        Some(DopplerAnimation::new(wave, range, config.animation.settings())?)
    } else {
        None
    };

    let outputs = if options.plot || options.animate || config.output.write_csv {
        render::export_doppler(
            &config.output.directory,
            &sweep,
            animation.as_ref(),
            wave.base_frequency,
            wave.wave_speed,
            DopplerExport {
                plot: options.plot,
                csv: config.output.write_csv,
                animate: options.animate,
                fps: config.animation.fps,
                size: config.output.chart_size(),
            },
        )?
    } else {
        DopplerOutputs::default()
    };

    Ok(DopplerReport {
        sweep,
        supersonic_samples,
        outputs,
    })
}

/// 반응 하나의 계산 결과와 저장된 파일.
#[derive(Debug, Clone)]
pub struct EnthalpyReport {
    pub energy: ReactionEnergy,
    pub files: Vec<PathBuf>,
}

/// 반응의 ΔH/ΔU를 계산하고 막대 그래프와 CSV를 저장한다.
///
/// 그래프는 `plot`, CSV는 `output.write_csv`로 따로 켠다.
///
/// 표에 없는 화합물이 있으면 아무 파일도 쓰지 않고 `UnknownCompound`를 돌려준다.
pub fn run_enthalpy(
    config: &Config,
    table: &FormationEnthalpyTable,
    reaction: &Reaction,
    key: &str,
    temperature_k: f64,
    plot: bool,
) -> Result<EnthalpyReport, AppError> {
    let energy = thermo::analyze(reaction, table, temperature_k).map_err(|e| {
        if let ThermoError::UnknownCompound(name) = &e {
            warn!(compound = %name, "unknown compound");
        }
        e
    })?;
    let files = render::export_reaction(
        &config.output.directory,
        key,
        &energy,
        ReactionExport {
            plot,
            csv: config.output.write_csv,
            size: config.output.chart_size(),
        },
    )?;
    Ok(EnthalpyReport { energy, files })
}

/// 설정의 추가 항목으로 생성 엔탈피 표를 만든다.
pub fn build_table(config: &Config) -> Result<FormationEnthalpyTable, AppError> {
    let table = FormationEnthalpyTable::with_extra(&config.compounds)?;
    info!(entries = table.len(), "formation enthalpy table built");
    Ok(table)
}

/// CLI 애플리케이션의 메인 루프를 실행한다.
pub fn run<R: BufRead, W: Write>(
    console: &mut Console<R, W>,
    config: &mut Config,
    config_path: &Path,
    tr: &Translator,
) -> Result<(), AppError> {
    let table = build_table(config)?;
    loop {
        match console.main_menu(tr)? {
            MenuChoice::Doppler => console.handle_doppler(tr, config)?,
            MenuChoice::Enthalpy => console.handle_enthalpy(tr, config, &table)?,
            MenuChoice::Compounds => console.print_table(tr, &table)?,
            MenuChoice::Settings => {
                console.handle_settings(tr, config)?;
                config.save(config_path)?;
            }
            MenuChoice::Exit => {
                config.save(config_path)?;
                console.say(tr.t(crate::i18n::keys::APP_EXIT))?;
                break;
            }
        }
    }
    Ok(())
}
